use core::ptr::{self, NonNull};

/// Marker for the way default construction initializes storage.
///
/// This trait is sealed, the only policies are [`ValueInit`] and [`DefaultInit`].
///
/// [`ValueInit`]: struct.ValueInit.html
/// [`DefaultInit`]: struct.DefaultInit.html
pub trait InitPolicy: sealed::Sealed {}

/// The standard policy: default construction writes `T::default()`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ValueInit;

/// The no-init policy: default construction of plain-old-data leaves the bytes untouched.
///
/// All other types still run their `Default` constructor, see [`NoInitDefault`]. Note that leaving
/// bytes untouched does not make it valid to read bytes that were never written. Whoever reads
/// the elements must know that the storage held some initialized bytes before, for example since
/// it was zeroed by the allocator or reused from earlier values.
///
/// [`NoInitDefault`]: trait.NoInitDefault.html
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DefaultInit;

impl InitPolicy for ValueInit {}
impl InitPolicy for DefaultInit {}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::ValueInit {}
    impl Sealed for super::DefaultInit {}
}

/// Types that can be default constructed in place under the policy `P`.
///
/// Implemented for every `Default` type under [`ValueInit`] and for every [`NoInitDefault`] type
/// under [`DefaultInit`].
///
/// [`NoInitDefault`]: trait.NoInitDefault.html
///
/// [`ValueInit`]: struct.ValueInit.html
/// [`DefaultInit`]: struct.DefaultInit.html
pub trait DefaultConstruct<P: InitPolicy>: Sized {
    /// Construct a default value at `slot`.
    ///
    /// # Safety
    ///
    /// `slot` must be aligned and valid for writes of `Self`. Any previous value at the location
    /// is overwritten without being dropped.
    unsafe fn construct_default(slot: NonNull<Self>);
}

impl<T: Default> DefaultConstruct<ValueInit> for T {
    unsafe fn construct_default(slot: NonNull<Self>) {
        slot.as_ptr().write(T::default())
    }
}

impl<T: NoInitDefault> DefaultConstruct<DefaultInit> for T {
    unsafe fn construct_default(slot: NonNull<Self>) {
        T::default_init(slot)
    }
}

/// Types with a default-initialization that may differ from their `Default` value.
///
/// The provided method simply writes `Self::default()`, which is right for any type with a
/// destructor or an invariant. Opt such a type into the no-init policy with an empty impl:
///
/// ```
/// use construct_hooks::NoInitDefault;
///
/// #[derive(Default)]
/// struct Names(Vec<&'static str>);
///
/// unsafe impl NoInitDefault for Names {}
/// ```
///
/// Primitive numbers, and arrays of any implementor, override it so that their storage is not
/// touched at all.
///
/// # Safety
///
/// An override must leave a valid value in the slot for any initialized bytes found there. In
/// particular it may only skip writing if every initialized bit pattern is a valid `Self`.
pub unsafe trait NoInitDefault: Default {
    /// Default initialize the value at `slot`.
    ///
    /// # Safety
    ///
    /// `slot` must be aligned and valid for writes of `Self`. Any previous value at the location
    /// is overwritten without being dropped.
    unsafe fn default_init(slot: NonNull<Self>) {
        slot.as_ptr().write(Self::default())
    }
}

macro_rules! trivial_default_init {
    ($($ty:ty),*) => {
        $(
            unsafe impl NoInitDefault for $ty {
                unsafe fn default_init(_: NonNull<Self>) {
                    // Nothing to run, every bit pattern is already a value.
                }
            }
        )*
    };
}

trivial_default_init!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, ());

unsafe impl<T: NoInitDefault, const N: usize> NoInitDefault for [T; N]
where
    [T; N]: Default,
{
    unsafe fn default_init(slot: NonNull<Self>) {
        /// Drops the elements initialized so far unless all of them are.
        struct Partial<T> {
            base: *mut T,
            done: usize,
        }

        impl<T> Drop for Partial<T> {
            fn drop(&mut self) {
                unsafe {
                    ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.base, self.done))
                }
            }
        }

        let mut partial = Partial { base: slot.as_ptr().cast::<T>(), done: 0 };
        while partial.done < N {
            T::default_init(NonNull::new_unchecked(partial.base.add(partial.done)));
            partial.done += 1;
        }
        partial.done = 0;
    }
}

#[cfg(feature = "alloc")]
mod alloc_impls {
    use alloc::{boxed::Box, string::String, vec::Vec};

    use super::NoInitDefault;

    unsafe impl NoInitDefault for String {}
    unsafe impl<T> NoInitDefault for Vec<T> {}
    unsafe impl<T: Default> NoInitDefault for Box<T> {}
}
