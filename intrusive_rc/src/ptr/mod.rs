//! Owning handles to counted objects.
//!
//! # Raw pointers
//!
//! A handle owns one reference to the object it points to.
//! Raw pointers own nothing, unless the code that handles them
//! keeps track of a reference on their behalf.
//! There are two ways to move a reference across that boundary.
//!
//! | From → To          | Method                                       | Count     |
//! |--------------------|----------------------------------------------|-----------|
//! | Handle → raw       | [`detach`], [`into_raw`]                     | Unchanged |
//! | Raw → handle       | [`from_raw`] with `add_ref` false            | Unchanged |
//!
//! [`from_raw`] with `add_ref` true instead creates a new reference,
//! for raw pointers that do not own one.
//!
//! [`detach`]: `IntrusivePtr::detach`
//! [`into_raw`]: `IntrusivePtr::into_raw`
//! [`from_raw`]: `IntrusivePtr::from_raw`

pub use self::handle::*;
pub use self::ops::*;
pub use self::upcast::*;

mod handle;
mod ops;
mod upcast;
