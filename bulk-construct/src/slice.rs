//! Safe construction into slices of `MaybeUninit`.
//!
//! The returned slices are references, the values are not dropped automatically. Call
//! [`destroy_n`] on them when they are no longer needed or simply leak them, which is safe.
//!
//! [`destroy_n`]: ../fn.destroy_n.html
use core::mem::MaybeUninit;
use core::ptr::NonNull;
use core::slice;

use construct_hooks::{ElementAlloc, ValueInit};

use crate::bulk;
use crate::error::ConstructError;

fn base_of<T>(slots: &mut [MaybeUninit<T>]) -> NonNull<T> {
    NonNull::from(slots).cast()
}

/// Treat the slots as initialized.
///
/// # Safety
///
/// All of `slots` must have been initialized.
unsafe fn assume_init<T>(slots: &mut [MaybeUninit<T>]) -> &mut [T] {
    let len = slots.len();
    slice::from_raw_parts_mut(base_of(slots).as_ptr(), len)
}

/// Default construct every slot.
///
/// This requires an allocator with the standard policy. Default construction under the no-init
/// policy may leave uninitialized bytes which must not be exposed through a reference.
///
/// ```
/// use core::mem::MaybeUninit;
/// use bulk_construct::{slice::init_slice, InPlace};
///
/// let mut memory = [MaybeUninit::<u64>::uninit(); 4];
/// let values = init_slice(&mut InPlace, &mut memory[..]);
/// assert_eq!(values, [0; 4]);
/// ```
pub fn init_slice<'a, A, T>(alloc: &mut A, slots: &'a mut [MaybeUninit<T>]) -> &'a mut [T]
where
    A: ElementAlloc<Init = ValueInit>,
    T: Default,
{
    unsafe {
        // SAFETY: the slots are valid for writes, and exclusively ours.
        bulk::construct_n(alloc, base_of(slots), slots.len());
        assume_init(slots)
    }
}

/// Clone the repeated `source` into the slots.
///
/// See [`construct_n_from`] for the exact pattern. Fails if `source` is empty while `slots` is
/// not.
///
/// [`construct_n_from`]: ../fn.construct_n_from.html
pub fn init_slice_from<'a, A, T>(
    alloc: &mut A,
    slots: &'a mut [MaybeUninit<T>],
    source: &[T],
) -> Result<&'a mut [T], ConstructError>
where
    A: ElementAlloc,
    T: Clone,
{
    unsafe {
        // SAFETY: the slots are valid for writes, and exclusively ours. Being borrowed mutably,
        // they can not overlap the shared `source`.
        bulk::construct_n_from(alloc, base_of(slots), slots.len(), source)?;
        Ok(assume_init(slots))
    }
}

/// Initialize slot `i` with the result of `f(i)`, stopping at the first error.
///
/// Nothing is left initialized when an error is returned.
pub fn try_init_slice_with<'a, A, T, E, F>(
    alloc: &mut A,
    slots: &'a mut [MaybeUninit<T>],
    f: F,
) -> Result<&'a mut [T], E>
where
    A: ElementAlloc,
    F: FnMut(usize) -> Result<T, E>,
{
    unsafe {
        // SAFETY: the slots are valid for writes, and exclusively ours.
        bulk::try_construct_n_with(alloc, base_of(slots), slots.len(), f)?;
        Ok(assume_init(slots))
    }
}
