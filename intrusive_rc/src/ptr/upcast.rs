use super::IntrusivePtr;
use crate::counter::Countable;

use core::ptr::NonNull;

/// Declared conversion from handles to `Self` into handles to `U`.
///
/// Conversions between handle types are never implicit.
/// A type opts into each conversion with an implementation of this trait,
/// usually generated by the [`upcast!`] macro,
/// after which [`IntrusivePtr::upcast`] and [`IntrusivePtr::upcast_from`]
/// perform it.
///
/// Every type converts to itself.
///
/// # Safety
///
/// [`upcast`][`Self::upcast`] must return a pointer to the same object,
/// such that references added or released through `U`
/// update the same count as those through `Self`,
/// and such that the release of the last reference through `U`
/// destroys the whole object exactly as a release through `Self` would.
///
/// [`upcast!`]: `crate::upcast`
pub unsafe trait Upcast<U>
    where U: ?Sized + Countable
{
    /// Convert a pointer to the object.
    fn upcast(pointer: NonNull<Self>) -> NonNull<U>;
}

// SAFETY: The pointer is unchanged.
unsafe impl<T> Upcast<T> for T
    where T: ?Sized + Countable
{
    #[inline]
    fn upcast(pointer: NonNull<Self>) -> NonNull<T>
    {
        pointer
    }
}

impl<T> IntrusivePtr<T>
    where T: ?Sized + Countable
{
    /// Convert the handle into a handle to a related type.
    ///
    /// The reference moves along with the conversion,
    /// so the count does not change.
    #[inline]
    pub fn upcast<U>(self) -> IntrusivePtr<U>
        where T: Upcast<U>,
              U: ?Sized + Countable,
    {
        match self.into_raw() {
            // SAFETY: The reference owned by self is passed on.
            Some(pointer) => unsafe {
                IntrusivePtr::from_non_null(<T as Upcast<U>>::upcast(pointer), false)
            },
            None => IntrusivePtr::null(),
        }
    }

    /// Create a handle to the object another handle points to,
    /// converting from a related type.
    ///
    /// A reference is added, unless `other` is null.
    #[inline]
    pub fn upcast_from<Y>(other: &IntrusivePtr<Y>) -> Self
        where Y: ?Sized + Countable + Upcast<T>
    {
        other.clone().upcast()
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::RefCounted;
    use crate::RefCounter;
    use crate::testing::Drops;
    use crate::testing::Tracked;

    trait Shape: RefCounted
    {
        fn area(&self) -> u32;
    }

    struct Square
    {
        counter: RefCounter,
        side: u32,
        _tracked: Tracked,
    }

    struct Rectangle
    {
        counter: RefCounter,
        width: u32,
        height: u32,
    }

    impl Shape for Square
    {
        fn area(&self) -> u32
        {
            self.side * self.side
        }
    }

    impl Shape for Rectangle
    {
        fn area(&self) -> u32
        {
            self.width * self.height
        }
    }

    ref_counted!(Square => counter, Rectangle => counter);
    upcast!(Square => dyn Shape, Rectangle => dyn Shape);

    fn square(side: u32) -> (Square, Drops)
    {
        let (tracked, drops) = Tracked::new(side);
        (Square{counter: RefCounter::new(), side, _tracked: tracked}, drops)
    }

    #[test]
    fn upcast_moves_reference()
    {
        let (square, drops) = square(3);
        let square = IntrusivePtr::new(square);
        let keep = square.clone();

        let shape: IntrusivePtr<dyn Shape> = square.upcast();
        assert_eq!(shape.area(), 9);
        assert_eq!(keep.use_count(), 2);
        assert!(shape == keep);

        drop(keep);
        assert_eq!(drops.get(), 0);
        drop(shape);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn upcast_from_adds_reference()
    {
        let (square, drops) = square(2);
        let square = IntrusivePtr::new(square);

        let shape = IntrusivePtr::<dyn Shape>::upcast_from(&square);
        assert_eq!(square.use_count(), 2);
        assert!(IntrusivePtr::ptr_eq(&shape, &square));

        // The last release happens through the trait object,
        // and must still drop every field of the square.
        drop(square);
        assert_eq!(shape.area(), 4);
        assert_eq!(shape.ref_counter().use_count(), 1);
        drop(shape);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn upcast_null()
    {
        let null = IntrusivePtr::<Square>::null();
        let shape: IntrusivePtr<dyn Shape> = IntrusivePtr::upcast_from(&null);
        assert!(shape.is_null());
        assert!(null.upcast::<dyn Shape>().is_null());
    }

    #[test]
    fn upcast_to_self()
    {
        let (tracked, _drops) = Tracked::new(1);
        let a = IntrusivePtr::new(tracked);
        let b: IntrusivePtr<Tracked> = IntrusivePtr::upcast_from(&a);
        assert!(a == b);
        assert_eq!(a.use_count(), 2);
    }

    #[test]
    fn heterogeneous_shapes()
    {
        let (square, _drops) = square(2);
        let shapes: [IntrusivePtr<dyn Shape>; 2] = [
            IntrusivePtr::new(square).upcast(),
            IntrusivePtr::new(Rectangle{counter: RefCounter::new(), width: 2, height: 5})
                .upcast(),
        ];
        let total: u32 = shapes.iter().map(|shape| shape.area()).sum();
        assert_eq!(total, 14);
        assert!(shapes[0] != shapes[1]);
    }
}
