use crate::counter::Countable;
use crate::counter::RefCounted;

use alloc::boxed::Box;
use core::fmt;
use core::marker::PhantomData;
use core::mem;
use core::ops::Deref;
use core::ptr;
use core::ptr::NonNull;

/// Owning handle to a counted object.
///
/// A handle is either null or points to a live object
/// and owns one of its references.
/// Cloning the handle adds a reference, dropping it releases one,
/// and the object is destroyed when its last reference is released.
/// Moving a handle moves its reference along with it.
///
/// Handles compare, order, and hash by address,
/// so two handles are equal exactly when they point to the same object.
///
/// Handles offer only shared access to the object.
/// The count is safe to update from many threads at once,
/// but the rest of the object needs its own synchronization
/// if it is mutated while shared.
pub struct IntrusivePtr<T>
    where T: ?Sized + Countable
{
    pointer: Option<NonNull<T>>,

    /// The handle may drop a `T`.
    _owns: PhantomData<T>,
}

// SAFETY: Like Arc, a handle can be used to access the object from any thread
//         and the last handle may destroy it on any thread.
unsafe impl<T> Send for IntrusivePtr<T>
    where T: ?Sized + Countable + Send + Sync
{
}

// SAFETY: See the Send impl.
unsafe impl<T> Sync for IntrusivePtr<T>
    where T: ?Sized + Countable + Send + Sync
{
}

impl<T> IntrusivePtr<T>
    where T: ?Sized + Countable
{
    /// Create a null handle.
    #[inline]
    pub const fn null() -> Self
    {
        Self{pointer: None, _owns: PhantomData}
    }

    /// Create a handle from a raw pointer.
    ///
    /// If `add_ref` is true, a new reference to the object is added.
    /// Otherwise the handle adopts a reference
    /// that the caller already owns, for instance one obtained from
    /// [`detach`][`Self::detach`] or [`into_raw`][`Self::into_raw`].
    /// A null pointer results in a null handle,
    /// regardless of `add_ref`.
    ///
    /// # Safety
    ///
    /// The pointer must be null or point to a live object
    /// that may be destroyed by [`Countable::release`].
    /// For [`RefCounted`] types this means it was allocated with [`Box`].
    /// If `add_ref` is false, the caller must own a reference to the object,
    /// which it gives up to the handle.
    #[inline]
    pub unsafe fn from_raw(pointer: *mut T, add_ref: bool) -> Self
    {
        match NonNull::new(pointer) {
            Some(pointer) => Self::from_non_null(pointer, add_ref),
            None => Self::null(),
        }
    }

    /// Like [`from_raw`][`Self::from_raw`], for non-null pointers.
    ///
    /// # Safety
    ///
    /// See [`from_raw`][`Self::from_raw`].
    #[inline]
    pub unsafe fn from_non_null(pointer: NonNull<T>, add_ref: bool) -> Self
    {
        if add_ref {
            pointer.as_ref().add_ref();
        }
        Self{pointer: Some(pointer), _owns: PhantomData}
    }

    /// Access the object, unless the handle is null.
    #[inline]
    pub fn get(&self) -> Option<&T>
    {
        // SAFETY: The handle owns a reference, so the object is alive.
        self.pointer.map(|pointer| unsafe { &*pointer.as_ptr() })
    }

    /// Pointer to the object, unless the handle is null.
    ///
    /// The reference count is not affected,
    /// and the pointer is valid only as long as the object has references.
    #[inline]
    pub fn as_ptr(&self) -> Option<NonNull<T>>
    {
        self.pointer
    }

    /// Whether the handle points to an object.
    #[inline]
    pub fn is_some(&self) -> bool
    {
        self.pointer.is_some()
    }

    /// Whether the handle is null.
    #[inline]
    pub fn is_null(&self) -> bool
    {
        self.pointer.is_none()
    }

    /// Make the handle null without releasing its reference.
    ///
    /// The reference is handed to the caller,
    /// who must eventually release it,
    /// for instance by passing the pointer to [`from_raw`][`Self::from_raw`]
    /// with `add_ref` set to false.
    /// Failing to do so leaks the object.
    #[inline]
    #[must_use = "the detached reference must be released"]
    pub fn detach(&mut self) -> Option<NonNull<T>>
    {
        self.pointer.take()
    }

    /// Consume the handle without releasing its reference.
    ///
    /// See [`detach`][`Self::detach`].
    #[inline]
    #[must_use = "the detached reference must be released"]
    pub fn into_raw(mut self) -> Option<NonNull<T>>
    {
        self.detach()
    }

    /// Move the reference out of the handle,
    /// leaving the handle null.
    #[inline]
    pub fn take(&mut self) -> Self
    {
        mem::take(self)
    }

    /// Release the reference held by the handle, making it null.
    #[inline]
    pub fn reset(&mut self)
    {
        Self::null().swap(self);
    }

    /// Point the handle to another object.
    ///
    /// The handle is replaced by [`from_raw`][`Self::from_raw`]`(pointer, add_ref)`,
    /// and only then is the previous reference released.
    /// So it is fine for `pointer` to refer to an object
    /// that is kept alive only through the previous object.
    ///
    /// # Safety
    ///
    /// See [`from_raw`][`Self::from_raw`].
    #[inline]
    pub unsafe fn reset_raw(&mut self, pointer: *mut T, add_ref: bool)
    {
        Self::from_raw(pointer, add_ref).swap(self);
    }

    /// Exchange the objects two handles point to.
    ///
    /// No references are added or released.
    #[inline]
    pub fn swap(&mut self, other: &mut Self)
    {
        mem::swap(&mut self.pointer, &mut other.pointer);
    }

    /// Whether two handles point to the same object.
    ///
    /// Handles of different types may point to the same object
    /// if one was [upcast][`Self::upcast`] from the other.
    #[inline]
    pub fn ptr_eq<U>(this: &Self, other: &IntrusivePtr<U>) -> bool
        where U: ?Sized + Countable
    {
        this.address() == other.address()
    }

    /// Address of the object, or null.
    ///
    /// Any pointer metadata is discarded.
    #[inline]
    pub (crate) fn address(&self) -> *const u8
    {
        match self.pointer {
            Some(pointer) => pointer.as_ptr() as *const u8,
            None => ptr::null(),
        }
    }
}

impl<T> IntrusivePtr<T>
    where T: RefCounted
{
    /// Move a value into a new allocation
    /// and create the first handle to it.
    #[inline]
    pub fn new(value: T) -> Self
    {
        Self::from_box(Box::new(value))
    }
}

impl<T> IntrusivePtr<T>
    where T: ?Sized + RefCounted
{
    /// Create the first handle to a boxed object.
    #[inline]
    pub fn from_box(boxed: Box<T>) -> Self
    {
        // SAFETY: The object is allocated with Box
        //         and owned by nothing but the Box.
        unsafe { Self::from_raw(Box::into_raw(boxed), true) }
    }

    /// The number of references to the object, or zero if null.
    ///
    /// Use it for diagnostics and tests, not for synchronization.
    /// See [`RefCounter::use_count`].
    ///
    /// [`RefCounter::use_count`]: `crate::RefCounter::use_count`
    #[inline]
    pub fn use_count(&self) -> usize
    {
        self.get().map_or(0, |object| object.ref_counter().use_count())
    }
}

impl<T> Drop for IntrusivePtr<T>
    where T: ?Sized + Countable
{
    #[inline]
    fn drop(&mut self)
    {
        if let Some(pointer) = self.pointer.take() {
            // SAFETY: The handle owns this reference and gives it up here.
            unsafe { T::release(pointer) };
        }
    }
}

impl<T> Clone for IntrusivePtr<T>
    where T: ?Sized + Countable
{
    /// Create another handle to the same object.
    #[inline]
    fn clone(&self) -> Self
    {
        if let Some(object) = self.get() {
            object.add_ref();
        }
        Self{pointer: self.pointer, _owns: PhantomData}
    }

    /// Point this handle to the object `source` points to.
    ///
    /// The new reference is added before the previous one is released.
    #[inline]
    fn clone_from(&mut self, source: &Self)
    {
        source.clone().swap(self);
    }
}

impl<T> Default for IntrusivePtr<T>
    where T: ?Sized + Countable
{
    /// Create a null handle.
    #[inline]
    fn default() -> Self
    {
        Self::null()
    }
}

impl<T> Deref for IntrusivePtr<T>
    where T: ?Sized + Countable
{
    type Target = T;

    /// Access the object.
    ///
    /// # Panics
    ///
    /// Panics if the handle is null.
    #[inline]
    #[track_caller]
    fn deref(&self) -> &T
    {
        match self.get() {
            Some(object) => object,
            None => null_dereference(),
        }
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn null_dereference() -> !
{
    panic!("dereferenced a null IntrusivePtr");
}

impl<T> From<Box<T>> for IntrusivePtr<T>
    where T: ?Sized + RefCounted
{
    #[inline]
    fn from(boxed: Box<T>) -> Self
    {
        Self::from_box(boxed)
    }
}

impl<T> fmt::Debug for IntrusivePtr<T>
    where T: ?Sized + Countable + fmt::Debug
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        match self.get() {
            Some(object) => f.debug_tuple("IntrusivePtr").field(&object).finish(),
            None => f.write_str("IntrusivePtr(null)"),
        }
    }
}

impl<T> fmt::Pointer for IntrusivePtr<T>
    where T: ?Sized + Countable
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        fmt::Pointer::fmt(&self.address(), f)
    }
}
