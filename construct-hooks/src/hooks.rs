use core::ptr::{self, NonNull};

use crate::policy::{DefaultConstruct, InitPolicy, ValueInit};

/// An allocator that may intercept the construction and destruction of elements.
///
/// All hooks have a default implementation doing the obvious thing: writing the value in place,
/// running the policy's default construction, or dropping in place. An allocator overrides a hook
/// to be notified of, or to customize, each element placed into its memory.
///
/// # Safety
///
/// Callers rely on the hooks actually doing their job. After `construct` or `construct_default`
/// returns normally the slot must hold a valid value of `T`, and after `destroy` returns the value
/// must have been dropped exactly once. A hook that unwinds must leave the slot uninitialized (or
/// dropped, respectively) and must not have leaked the given value into any other place.
pub unsafe trait ElementAlloc {
    /// The initialization policy of `construct_default`.
    type Init: InitPolicy;

    /// Move `value` into the uninitialized `slot`.
    ///
    /// # Safety
    ///
    /// `slot` must be aligned, valid for writes of `T` and not hold a value that still needs to be
    /// dropped.
    unsafe fn construct<T>(&mut self, slot: NonNull<T>, value: T) {
        slot.as_ptr().write(value)
    }

    /// Default construct an element in the uninitialized `slot`.
    ///
    /// # Safety
    ///
    /// Same as for `construct`.
    unsafe fn construct_default<T>(&mut self, slot: NonNull<T>)
    where
        T: DefaultConstruct<Self::Init>,
    {
        T::construct_default(slot)
    }

    /// Drop the element in `slot`, leaving it uninitialized.
    ///
    /// # Safety
    ///
    /// `slot` must hold a valid value that is not used afterwards.
    unsafe fn destroy<T>(&mut self, slot: NonNull<T>) {
        ptr::drop_in_place(slot.as_ptr())
    }
}

/// The allocator handle without any hooks.
///
/// Constructs directly in place, value-initializing on default construction. Use this when some
/// memory is not associated with an allocator at all, such as a local array of `MaybeUninit`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InPlace;

unsafe impl ElementAlloc for InPlace {
    type Init = ValueInit;
}

unsafe impl<A: ElementAlloc> ElementAlloc for &'_ mut A {
    type Init = A::Init;

    unsafe fn construct<T>(&mut self, slot: NonNull<T>, value: T) {
        (**self).construct(slot, value)
    }

    unsafe fn construct_default<T>(&mut self, slot: NonNull<T>)
    where
        T: DefaultConstruct<Self::Init>,
    {
        (**self).construct_default(slot)
    }

    unsafe fn destroy<T>(&mut self, slot: NonNull<T>) {
        (**self).destroy(slot)
    }
}
