use super::RefCounter;

use alloc::boxed::Box;
use core::ptr::NonNull;

/// Object with an embedded [`RefCounter`].
///
/// Implementing this trait makes the type [`Countable`],
/// with the counter deciding when the object is destroyed.
/// Objects of such types are destroyed by dropping them as a [`Box`],
/// so they must be allocated with [`Box`] before they are handed to a handle.
/// [`IntrusivePtr::new`] and [`IntrusivePtr::from_box`] take care of that.
///
/// The trait is object safe.
/// A trait that has this trait as a supertrait
/// gives you counted trait objects,
/// which are destroyed through their vtable.
///
/// Normally you implement this trait with the [`ref_counted!`] macro.
///
/// # Safety
///
/// [`ref_counter`][`Self::ref_counter`] must return
/// a counter stored inside `self`,
/// and the same counter on every call.
///
/// [`IntrusivePtr::new`]: `crate::IntrusivePtr::new`
/// [`IntrusivePtr::from_box`]: `crate::IntrusivePtr::from_box`
/// [`ref_counted!`]: `crate::ref_counted`
pub unsafe trait RefCounted
{
    /// The counter embedded in this object.
    fn ref_counter(&self) -> &RefCounter;
}

/// Types that [`IntrusivePtr`] can point to.
///
/// Every [`RefCounted`] type is countable,
/// which is how most types get this capability.
/// Implement this trait directly if objects must be counted
/// or destroyed in some other way,
/// for instance when they live in a pool rather than in a [`Box`].
///
/// # Safety
///
/// The count must start at zero for a new object,
/// [`add_ref`][`Self::add_ref`] must add one reference,
/// and [`release`][`Self::release`] must remove one.
/// The object must stay alive while there are references to it,
/// and must be destroyed at most once, by the release of the last reference.
/// The count must be safe to update from multiple threads
/// if the type is [`Sync`].
///
/// [`IntrusivePtr`]: `crate::IntrusivePtr`
pub unsafe trait Countable
{
    /// Add a reference to the object.
    ///
    /// Adding a reference without eventually releasing it
    /// leaks the object, which is safe.
    fn add_ref(&self);

    /// Release a reference to the object,
    /// destroying the object if it was the last reference.
    ///
    /// # Safety
    ///
    /// The pointer must point to a live object
    /// and the caller must own one of its references,
    /// which it gives up by calling this function.
    /// The object must not be used through this reference afterwards.
    unsafe fn release(this: NonNull<Self>);
}

unsafe impl<T> Countable for T
    where T: ?Sized + RefCounted
{
    #[inline]
    fn add_ref(&self)
    {
        self.ref_counter().increment();
    }

    #[inline]
    unsafe fn release(this: NonNull<Self>)
    {
        // SAFETY: The caller owns a reference, so the object is alive.
        let last = this.as_ref().ref_counter().decrement();

        if last {
            // SAFETY: RefCounted objects are allocated with Box,
            //         and no other references to the object remain.
            //         Dropping the Box<T> rather than anything less specific
            //         runs the destructor of the whole object.
            drop(Box::from_raw(this.as_ptr()));
        }
    }
}
