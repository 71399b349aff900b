/// Implement [`RefCounted`] for types with a [`RefCounter`] field.
///
/// Each entry names a type and its counter field.
/// Generic types are introduced with `impl<...>`,
/// without bounds on the parameters.
///
/// ```
/// use intrusive_rc::RefCounter;
/// use intrusive_rc::ref_counted;
///
/// struct Leaf
/// {
///     counter: RefCounter,
/// }
///
/// struct Node<T>
/// {
///     refs: RefCounter,
///     value: T,
/// }
///
/// ref_counted!(Leaf => counter);
/// ref_counted!(impl<T> Node<T> => refs);
/// ```
///
/// [`RefCounted`]: `crate::RefCounted`
/// [`RefCounter`]: `crate::RefCounter`
#[macro_export]
macro_rules! ref_counted
{
    (impl<$($param:ident),* $(,)?> $type:ty => $field:ident) => {
        // SAFETY: The counter is a field of the object.
        unsafe impl<$($param),*> $crate::RefCounted for $type
        {
            #[inline]
            fn ref_counter(&self) -> &$crate::RefCounter
            {
                &self.$field
            }
        }
    };

    ($($type:ty => $field:ident),+ $(,)?) => {
        $(
            // SAFETY: The counter is a field of the object.
            unsafe impl $crate::RefCounted for $type
            {
                #[inline]
                fn ref_counter(&self) -> &$crate::RefCounter
                {
                    &self.$field
                }
            }
        )+
    };
}

/// Implement [`Upcast`] for unsizing conversions.
///
/// Each entry `From => To` lets handles to `From`
/// be converted into handles to `To`,
/// where `To` is a trait object (or other unsized type)
/// that `From` coerces to.
/// Conversions that are not unsizing coercions do not compile.
///
/// ```
/// use intrusive_rc::IntrusivePtr;
/// use intrusive_rc::RefCounted;
/// use intrusive_rc::RefCounter;
/// use intrusive_rc::ref_counted;
/// use intrusive_rc::upcast;
///
/// trait Shape: RefCounted
/// {
///     fn area(&self) -> u32;
/// }
///
/// struct Square
/// {
///     counter: RefCounter,
///     side: u32,
/// }
///
/// impl Shape for Square
/// {
///     fn area(&self) -> u32
///     {
///         self.side * self.side
///     }
/// }
///
/// ref_counted!(Square => counter);
/// upcast!(Square => dyn Shape);
///
/// let square = IntrusivePtr::new(Square{counter: RefCounter::new(), side: 3});
/// let shape: IntrusivePtr<dyn Shape> = IntrusivePtr::upcast_from(&square);
/// assert_eq!(shape.area(), 9);
/// assert_eq!(square.use_count(), 2);
/// ```
///
/// [`Upcast`]: `crate::Upcast`
#[macro_export]
macro_rules! upcast
{
    ($($from:ty => $to:ty),+ $(,)?) => {
        $(
            // SAFETY: Unsizing keeps the address and thus the counter,
            //         and the vtable drops the whole object.
            unsafe impl $crate::Upcast<$to> for $from
            {
                #[inline]
                fn upcast(pointer: ::core::ptr::NonNull<Self>)
                    -> ::core::ptr::NonNull<$to>
                {
                    pointer
                }
            }
        )+
    };
}
