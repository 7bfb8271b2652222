use core::convert::Infallible;
use core::ptr::NonNull;

use construct_hooks::{DefaultConstruct, ElementAlloc};

use crate::element;
use crate::error::ConstructError;
use crate::rollback::Rollback;

/// Construct `n` elements in ascending order, each by one call of `step`.
///
/// The elements constructed so far are destroyed again if `step` panics or fails, and the failure
/// is passed on unchanged.
///
/// # Safety
///
/// `ptr` must be valid for writes of `n` elements. `step` must initialize the slot it is given
/// whenever it returns `Ok`.
unsafe fn fill<A, T, E, F>(alloc: &mut A, ptr: NonNull<T>, n: usize, mut step: F) -> Result<(), E>
where
    A: ElementAlloc,
    F: FnMut(&mut A, NonNull<T>, usize) -> Result<(), E>,
{
    let mut hold = Rollback::new(alloc, ptr);

    while hold.len() < n {
        let index = hold.len();
        let slot = hold.next_slot();
        step(hold.alloc(), slot, index)?;
        hold.advance();
    }

    hold.commit();
    Ok(())
}

fn unwrap_infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(val) => val,
        Err(never) => match never {},
    }
}

/// Default construct `n` elements at `ptr`.
///
/// Elements are constructed in ascending order. If one of them panics then those already
/// constructed are destroyed, in descending order, before the panic continues. So either all `n`
/// elements are live afterwards and belong to the caller, or none is.
///
/// ```
/// use bulk_construct::{construct_n, destroy_n, InPlace};
/// use core::ptr::NonNull;
///
/// let mut memory: Vec<Vec<u8>> = Vec::with_capacity(3);
/// let base = NonNull::new(memory.as_mut_ptr()).unwrap();
///
/// unsafe {
///     construct_n(&mut InPlace, base, 3);
///     memory.set_len(3);
/// }
/// assert!(memory.iter().all(Vec::is_empty));
///
/// unsafe {
///     memory.set_len(0);
///     destroy_n(&mut InPlace, base, 3);
/// }
/// ```
///
/// # Safety
///
/// `ptr` must be aligned and valid for writes of `n` contiguous elements, and must not be
/// accessed otherwise during the call. Values already in the buffer are overwritten without being
/// dropped.
pub unsafe fn construct_n<A, T>(alloc: &mut A, ptr: NonNull<T>, n: usize)
where
    A: ElementAlloc,
    T: DefaultConstruct<A::Init>,
{
    unwrap_infallible(fill(alloc, ptr, n, |alloc, slot, _| {
        element::construct(alloc, slot);
        Ok(())
    }))
}

/// Construct `n` elements at `ptr` as clones of the repeated `source`.
///
/// Element `i` is a clone of `source[i % source.len()]`. A single element in `source` is
/// therefore cloned into every slot, while a source of exactly `n` elements is cloned one to one.
/// Shorter sources are tiled. The rollback guarantee of [`construct_n`] applies to panics in
/// `Clone`.
///
/// Returns an error without touching the buffer if `source` is empty but `n` is not zero.
///
/// ```
/// use bulk_construct::{construct_n_from, InPlace};
/// use core::mem::MaybeUninit;
/// use core::ptr::NonNull;
///
/// let mut memory = [MaybeUninit::<u8>::uninit(); 5];
/// let base = NonNull::new(memory.as_mut_ptr()).unwrap().cast::<u8>();
///
/// unsafe { construct_n_from(&mut InPlace, base, 5, &[1, 2]) }.unwrap();
/// let values = memory.map(|val| unsafe { val.assume_init() });
/// assert_eq!(values, [1, 2, 1, 2, 1]);
/// ```
///
/// # Safety
///
/// Same as for [`construct_n`]. Additionally, `source` must not overlap the buffer.
///
/// [`construct_n`]: fn.construct_n.html
pub unsafe fn construct_n_from<A, T>(
    alloc: &mut A,
    ptr: NonNull<T>,
    n: usize,
    source: &[T],
) -> Result<(), ConstructError>
where
    A: ElementAlloc,
    T: Clone,
{
    let m = source.len();

    if n == 0 {
        return Ok(());
    } else if m == 0 {
        return Err(ConstructError::EmptySource { n });
    } else if m < n {
        log::trace!("tiling {} source elements over {} slots at {:p}", m, n, ptr.as_ptr());
    }

    unwrap_infallible(fill(alloc, ptr, n, |alloc, slot, i| {
        element::construct_with(alloc, slot, source[i % m].clone());
        Ok(())
    }));

    Ok(())
}

/// Construct `n` elements at `ptr`, element `i` being the result of `f(i)`.
///
/// The rollback guarantee of [`construct_n`] applies to panics in `f`.
///
/// # Safety
///
/// Same as for [`construct_n`].
///
/// [`construct_n`]: fn.construct_n.html
pub unsafe fn construct_n_with<A, T, F>(alloc: &mut A, ptr: NonNull<T>, n: usize, mut f: F)
where
    A: ElementAlloc,
    F: FnMut(usize) -> T,
{
    unwrap_infallible(fill(alloc, ptr, n, |alloc, slot, i| {
        element::construct_with(alloc, slot, f(i));
        Ok(())
    }))
}

/// Construct `n` elements at `ptr` from the results of a fallible `f(i)`.
///
/// When `f` returns an error for some index, all elements before it are destroyed in descending
/// order and the error is returned as is. Panics are rolled back just the same.
///
/// ```
/// use bulk_construct::{try_construct_n_with, InPlace};
/// use core::ptr::NonNull;
///
/// let mut memory: Vec<String> = Vec::with_capacity(4);
/// let base = NonNull::new(memory.as_mut_ptr()).unwrap();
///
/// let result = unsafe {
///     try_construct_n_with(&mut InPlace, base, 4, |i| match i {
///         2 => Err("no third word"),
///         _ => Ok(i.to_string()),
///     })
/// };
///
/// // The first two strings have been dropped again.
/// assert_eq!(result, Err("no third word"));
/// ```
///
/// # Safety
///
/// Same as for [`construct_n`].
///
/// [`construct_n`]: fn.construct_n.html
pub unsafe fn try_construct_n_with<A, T, E, F>(
    alloc: &mut A,
    ptr: NonNull<T>,
    n: usize,
    mut f: F,
) -> Result<(), E>
where
    A: ElementAlloc,
    F: FnMut(usize) -> Result<T, E>,
{
    fill(alloc, ptr, n, |alloc, slot, i| {
        element::construct_with(alloc, slot, f(i)?);
        Ok(())
    })
}

/// Destroy `n` elements at `ptr`, in descending order.
///
/// This is the counterpart to all the bulk constructors. As for [`element::destroy_range`], a
/// panicking destructor aborts the process.
///
/// # Safety
///
/// `ptr` must point to `n` contiguous valid values that are not used afterwards.
///
/// [`element::destroy_range`]: element/fn.destroy_range.html
pub unsafe fn destroy_n<A, T>(alloc: &mut A, ptr: NonNull<T>, n: usize)
where
    A: ElementAlloc,
{
    element::destroy_range(alloc, ptr, n)
}
