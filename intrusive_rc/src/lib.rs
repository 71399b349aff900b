//! Intrusive reference counting.
//!
//! Objects that participate in intrusive reference counting
//! carry their own reference count, in a [`RefCounter`] field.
//! There is no separate control block next to the object,
//! so a handle to such an object is a single pointer,
//! and a raw pointer to the object can be turned back into a handle
//! without losing track of the count.
//!
//! # Counters and handles
//!
//! | Item              | Role                                                  |
//! |-------------------|-------------------------------------------------------|
//! | [`RefCounter`]    | Atomic count embedded in the object                   |
//! | [`RefCounted`]    | Exposes the embedded counter                          |
//! | [`Countable`]     | What [`IntrusivePtr`] needs: add a reference, release |
//! | [`IntrusivePtr`]  | Owning handle that adds and releases references       |
//! | [`Upcast`]        | Declared conversion between handle types              |
//!
//! # Examples
//!
//! ```
//! use intrusive_rc::IntrusivePtr;
//! use intrusive_rc::RefCounter;
//! use intrusive_rc::ref_counted;
//!
//! struct Document
//! {
//!     counter: RefCounter,
//!     title: &'static str,
//! }
//!
//! ref_counted!(Document => counter);
//!
//! let a = IntrusivePtr::new(Document{counter: RefCounter::new(), title: "draft"});
//! let b = a.clone();
//! assert_eq!(a.use_count(), 2);
//! assert_eq!(b.title, "draft");
//! assert!(a == b);
//! ```
//!
//! Reference cycles are never destroyed.
//! There are no weak references to break them with.

#![no_std]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use] mod macros;

pub use self::counter::*;
pub use self::ptr::*;

mod counter;
mod ptr;

#[cfg(test)]
mod testing;
