//! Construction and destruction of single elements.
//!
//! These are thin wrappers around the hooks of [`ElementAlloc`] which the bulk operations build
//! upon. Most users will want the functions at the crate root instead.
//!
//! [`ElementAlloc`]: ../../construct_hooks/trait.ElementAlloc.html
use core::mem;
use core::ptr::NonNull;

use construct_hooks::{DefaultConstruct, ElementAlloc};

use crate::abort::AbortOnDrop;

/// Default construct one element at `ptr`.
///
/// Which value this produces depends on the initialization policy of the allocator. A panic of
/// the constructor propagates, leaving `ptr` uninitialized.
///
/// # Safety
///
/// `ptr` must be aligned and valid for writes of `T`. A value already at `ptr` is overwritten
/// without being dropped.
pub unsafe fn construct<A, T>(alloc: &mut A, ptr: NonNull<T>)
where
    A: ElementAlloc,
    T: DefaultConstruct<A::Init>,
{
    alloc.construct_default(ptr)
}

/// Construct one element at `ptr` from some arguments.
///
/// Every type converts from itself, so moving or copying a complete value works just as well as
/// passing a tuple of constructor arguments to a type implementing `From` for that tuple.
///
/// ```
/// use core::mem::MaybeUninit;
/// use core::ptr::NonNull;
/// use bulk_construct::{element, InPlace};
///
/// struct Span { start: usize, len: usize }
///
/// impl From<(usize, usize)> for Span {
///     fn from((start, end): (usize, usize)) -> Self {
///         Span { start, len: end - start }
///     }
/// }
///
/// let mut memory = MaybeUninit::<Span>::uninit();
/// let ptr = NonNull::new(memory.as_mut_ptr()).unwrap();
/// unsafe { element::construct_with(&mut InPlace, ptr, (4, 9)) };
///
/// let span = unsafe { memory.assume_init() };
/// assert_eq!((span.start, span.len), (4, 5));
/// ```
///
/// # Safety
///
/// Same as for [`construct`].
///
/// [`construct`]: fn.construct.html
pub unsafe fn construct_with<A, T, Args>(alloc: &mut A, ptr: NonNull<T>, args: Args)
where
    A: ElementAlloc,
    T: From<Args>,
{
    alloc.construct(ptr, T::from(args))
}

/// Destroy the element at `ptr`.
///
/// # Safety
///
/// `ptr` must point to a valid value that is not used afterwards.
pub unsafe fn destroy<A, T>(alloc: &mut A, ptr: NonNull<T>)
where
    A: ElementAlloc,
{
    alloc.destroy(ptr)
}

/// Destroy `n` contiguous elements starting at `ptr`, the last one first.
///
/// Dropping an element must never panic. If it does nonetheless then the process is aborted
/// since the remaining elements can neither be dropped nor be handed back to anyone.
///
/// # Safety
///
/// `ptr` must point to `n` contiguous valid values that are not used afterwards.
pub unsafe fn destroy_range<A, T>(alloc: &mut A, ptr: NonNull<T>, mut n: usize)
where
    A: ElementAlloc,
{
    while n > 0 {
        n -= 1;
        let abort_flag = AbortOnDrop;
        destroy(alloc, slot(ptr, n));
        mem::forget(abort_flag);
    }
}

/// The pointer to the element at `index`.
///
/// # Safety
///
/// `index` must be in bounds, or one past the end, of the buffer starting at `base`.
pub(crate) unsafe fn slot<T>(base: NonNull<T>, index: usize) -> NonNull<T> {
    // SAFETY: an offset within an allocation does not wrap around to null.
    NonNull::new_unchecked(base.as_ptr().add(index))
}
