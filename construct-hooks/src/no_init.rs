use core::ptr::NonNull;

use crate::hooks::ElementAlloc;
use crate::policy::{DefaultConstruct, DefaultInit};

/// Adapts an allocator to default-initialize instead of value-initialize.
///
/// Default construction of plain-old-data leaves the storage as it was found. The inner
/// allocator's `construct_default` hook is bypassed since its policy no longer applies, while
/// constructing from a value and destroying still go through its hooks.
///
/// ```
/// use core::mem::MaybeUninit;
/// use core::ptr::NonNull;
/// use construct_hooks::{ElementAlloc, InPlace, NoInit};
///
/// let mut memory = [MaybeUninit::new(0xffu8); 4];
/// let mut alloc = NoInit::new(InPlace);
///
/// let base = NonNull::new(memory.as_mut_ptr()).unwrap().cast::<u8>();
/// unsafe { alloc.construct_default(base) };
/// assert_eq!(unsafe { memory[0].assume_init() }, 0xff);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NoInit<A> {
    inner: A,
}

impl<A> NoInit<A> {
    /// Wrap an allocator.
    pub const fn new(inner: A) -> Self {
        NoInit { inner }
    }

    /// Get a reference to the wrapped allocator.
    pub fn get_ref(&self) -> &A {
        &self.inner
    }

    /// Get a mutable reference to the wrapped allocator.
    pub fn get_mut(&mut self) -> &mut A {
        &mut self.inner
    }

    /// Unwrap the adapted allocator.
    pub fn into_inner(self) -> A {
        self.inner
    }
}

unsafe impl<A: ElementAlloc> ElementAlloc for NoInit<A> {
    type Init = DefaultInit;

    unsafe fn construct<T>(&mut self, slot: NonNull<T>, value: T) {
        self.inner.construct(slot, value)
    }

    unsafe fn construct_default<T>(&mut self, slot: NonNull<T>)
    where
        T: DefaultConstruct<Self::Init>,
    {
        T::construct_default(slot)
    }

    unsafe fn destroy<T>(&mut self, slot: NonNull<T>) {
        self.inner.destroy(slot)
    }
}
