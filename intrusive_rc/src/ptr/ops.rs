//! Identity comparisons on handles.
//!
//! Handles are compared by the address of the object they point to,
//! never by the value of the object.
//! Null handles compare equal to each other and to null pointers.
//! The order is the order of addresses, which carries no meaning
//! beyond making handles usable as keys in ordered collections.

use super::IntrusivePtr;
use crate::counter::Countable;

use core::cmp::Ordering;
use core::hash::Hash;
use core::hash::Hasher;

/// Exchange the objects two handles point to.
///
/// See [`IntrusivePtr::swap`].
#[inline]
pub fn swap<T>(a: &mut IntrusivePtr<T>, b: &mut IntrusivePtr<T>)
    where T: ?Sized + Countable
{
    a.swap(b);
}

impl<T, U> PartialEq<IntrusivePtr<U>> for IntrusivePtr<T>
    where T: ?Sized + Countable,
          U: ?Sized + Countable,
{
    #[inline]
    fn eq(&self, other: &IntrusivePtr<U>) -> bool
    {
        self.address() == other.address()
    }
}

impl<T> Eq for IntrusivePtr<T>
    where T: ?Sized + Countable
{
}

impl<T, U> PartialEq<*const U> for IntrusivePtr<T>
    where T: ?Sized + Countable,
          U: ?Sized,
{
    #[inline]
    fn eq(&self, other: &*const U) -> bool
    {
        self.address() == other.cast::<u8>()
    }
}

impl<T, U> PartialEq<*mut U> for IntrusivePtr<T>
    where T: ?Sized + Countable,
          U: ?Sized,
{
    #[inline]
    fn eq(&self, other: &*mut U) -> bool
    {
        self.address() == other.cast::<u8>().cast_const()
    }
}

impl<T, U> PartialEq<IntrusivePtr<T>> for *const U
    where T: ?Sized + Countable,
          U: ?Sized,
{
    #[inline]
    fn eq(&self, other: &IntrusivePtr<T>) -> bool
    {
        other == self
    }
}

impl<T, U> PartialEq<IntrusivePtr<T>> for *mut U
    where T: ?Sized + Countable,
          U: ?Sized,
{
    #[inline]
    fn eq(&self, other: &IntrusivePtr<T>) -> bool
    {
        other == self
    }
}

impl<T> PartialOrd for IntrusivePtr<T>
    where T: ?Sized + Countable
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering>
    {
        Some(self.cmp(other))
    }
}

impl<T> Ord for IntrusivePtr<T>
    where T: ?Sized + Countable
{
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering
    {
        // Plain address comparison, so that handles
        // to unrelated allocations have a total order.
        (self.address() as usize).cmp(&(other.address() as usize))
    }
}

impl<T> Hash for IntrusivePtr<T>
    where T: ?Sized + Countable
{
    #[inline]
    fn hash<H>(&self, state: &mut H)
        where H: Hasher
    {
        self.address().hash(state);
    }
}
