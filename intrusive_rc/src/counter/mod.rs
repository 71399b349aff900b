//! Reference counts embedded in objects.

pub use self::countable::*;

use core::fmt;
use core::hash::Hash;
use core::hash::Hasher;
use core::sync::atomic::AtomicUsize;
use core::sync::atomic::Ordering;
use core::sync::atomic::fence;

mod countable;

/// Counts above this are treated as an overflow.
///
/// Leaves half of the range as headroom,
/// so that racing increments cannot wrap around
/// before one of them notices.
const MAX_REFCOUNT: usize = isize::MAX as usize;

/// Atomic reference count to embed in a counted object.
///
/// The counter belongs to the physical object it is embedded in,
/// not to the value of that object.
/// Cloning a counter therefore produces a fresh counter at zero,
/// and [`clone_from`][`Clone::clone_from`] leaves the destination as it is.
/// Likewise, all counters compare equal and hash to nothing,
/// so deriving [`PartialEq`] or [`Hash`] on the owning type
/// compares only the owner's other fields.
///
/// The count changes only when a reference is added or released,
/// which happens through [`IntrusivePtr`] or [`Countable`].
///
/// [`IntrusivePtr`]: `crate::IntrusivePtr`
pub struct RefCounter
{
    count: AtomicUsize,
}

impl RefCounter
{
    /// Create a counter with no references.
    #[inline]
    pub const fn new() -> Self
    {
        Self{count: AtomicUsize::new(0)}
    }

    /// The number of references to the object.
    ///
    /// The value may be out of date by the time it is returned
    /// if other threads add or release references concurrently.
    /// Use it for diagnostics and tests, not for synchronization.
    #[inline]
    pub fn use_count(&self) -> usize
    {
        self.count.load(Ordering::Relaxed)
    }

    /// Add a reference.
    ///
    /// The caller already holds a reference,
    /// which orders this increment after the object was published,
    /// so the increment itself needs no ordering.
    #[inline]
    pub (crate) fn increment(&self)
    {
        let previous = self.count.fetch_add(1, Ordering::Relaxed);
        if previous > MAX_REFCOUNT {
            overflow();
        }
    }

    /// Release a reference.
    ///
    /// Returns whether this was the last reference.
    /// In that case every write made through other references
    /// happens before this method returns,
    /// and the caller is responsible for destroying the object.
    #[inline]
    #[must_use = "the object must be destroyed when the last reference is released"]
    pub (crate) fn decrement(&self) -> bool
    {
        let previous = self.count.fetch_sub(1, Ordering::Release);

        debug_assert!(
            previous != 0,
            "released a reference to an object whose reference count is zero",
        );

        if previous != 1 {
            return false;
        }

        // Pairs with the release decrements of all other references.
        fence(Ordering::Acquire);

        true
    }
}

#[cold]
#[inline(never)]
fn overflow() -> !
{
    panic!("reference count overflow");
}

impl Default for RefCounter
{
    #[inline]
    fn default() -> Self
    {
        Self::new()
    }
}

impl Clone for RefCounter
{
    /// Create a counter with no references.
    ///
    /// The count of `self` is not copied.
    #[inline]
    fn clone(&self) -> Self
    {
        Self::new()
    }

    /// Does nothing.
    ///
    /// The count of `self` is not overwritten.
    #[inline]
    fn clone_from(&mut self, _source: &Self)
    {
    }
}

impl PartialEq for RefCounter
{
    #[inline]
    fn eq(&self, _other: &Self) -> bool
    {
        true
    }
}

impl Eq for RefCounter
{
}

impl Hash for RefCounter
{
    #[inline]
    fn hash<H>(&self, _state: &mut H)
        where H: Hasher
    {
    }
}

impl fmt::Debug for RefCounter
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        f.debug_struct("RefCounter")
            .field("use_count", &self.use_count())
            .finish()
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    use alloc::format;

    #[test]
    fn starts_at_zero()
    {
        assert_eq!(RefCounter::new().use_count(), 0);
        assert_eq!(RefCounter::default().use_count(), 0);
    }

    #[test]
    fn decrement_reports_last_reference()
    {
        let counter = RefCounter::new();
        counter.increment();
        counter.increment();
        assert!(!counter.decrement());
        assert_eq!(counter.use_count(), 1);
        assert!(counter.decrement());
        assert_eq!(counter.use_count(), 0);
    }

    #[test]
    fn clone_does_not_copy_count()
    {
        let counter = RefCounter::new();
        counter.increment();
        counter.increment();

        let cloned = counter.clone();
        assert_eq!(cloned.use_count(), 0);
        assert_eq!(counter.use_count(), 2);

        let mut target = RefCounter::new();
        target.increment();
        target.clone_from(&counter);
        assert_eq!(target.use_count(), 1);
    }

    #[test]
    fn counters_are_not_part_of_the_value()
    {
        let a = RefCounter::new();
        let b = RefCounter::new();
        b.increment();
        assert_eq!(a, b);
        assert_eq!(format!("{:?}", b), "RefCounter { use_count: 1 }");
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "reference count is zero")]
    fn over_release_is_caught()
    {
        let counter = RefCounter::new();
        let _ = counter.decrement();
    }
}
