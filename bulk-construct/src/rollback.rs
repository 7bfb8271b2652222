use core::fmt;
use core::ptr::NonNull;

use construct_hooks::ElementAlloc;

use crate::element;

/// Tracks the progress of a bulk construction and undoes it unless committed.
///
/// The guard counts how many elements, starting at its base pointer, have been constructed. When
/// it is dropped, all of them are destroyed again in reverse order. This happens in particular
/// when a constructor panics and the stack unwinds through the guard. There is no separate flag
/// to disarm it. Instead, [`commit`] resets the count to zero so that dropping has nothing left
/// to do and the elements belong to the caller.
///
/// ```
/// use core::mem::MaybeUninit;
/// use core::ptr::NonNull;
/// use bulk_construct::{ElementAlloc, InPlace, Rollback};
///
/// let mut memory: [MaybeUninit<String>; 2] = [MaybeUninit::uninit(), MaybeUninit::uninit()];
/// let base = NonNull::new(memory.as_mut_ptr()).unwrap().cast::<String>();
///
/// let mut alloc = InPlace;
/// let mut hold = unsafe { Rollback::new(&mut alloc, base) };
/// for word in ["left", "right"] {
///     let slot = hold.next_slot();
///     unsafe {
///         hold.alloc().construct(slot, String::from(word));
///         hold.advance();
///     }
/// }
/// assert_eq!(hold.len(), 2);
/// hold.commit();
///
/// let [left, right] = memory;
/// assert_eq!(unsafe { left.assume_init() }, "left");
/// assert_eq!(unsafe { right.assume_init() }, "right");
/// ```
///
/// [`commit`]: #method.commit
pub struct Rollback<'a, A: ElementAlloc, T> {
    alloc: &'a mut A,
    base: NonNull<T>,
    /// Number of live elements at the start of `base`.
    progress: usize,
}

impl<'a, A: ElementAlloc, T> Rollback<'a, A, T> {
    /// Start tracking construction into the buffer at `base`, initially empty.
    ///
    /// # Safety
    ///
    /// `base` must be aligned and valid for writes of every element the guard is advanced over,
    /// and not be accessed by anything but this guard until it is dropped or committed.
    pub unsafe fn new(alloc: &'a mut A, base: NonNull<T>) -> Self {
        Rollback {
            alloc,
            base,
            progress: 0,
        }
    }

    /// The number of elements constructed so far.
    pub fn len(&self) -> usize {
        self.progress
    }

    /// Returns `true` if no element is tracked.
    pub fn is_empty(&self) -> bool {
        self.progress == 0
    }

    /// The allocator constructing the elements.
    pub fn alloc(&mut self) -> &mut A {
        &mut *self.alloc
    }

    /// The slot of the next element.
    pub fn next_slot(&self) -> NonNull<T> {
        unsafe {
            // SAFETY: every slot before this one was valid as per `advance`, so this is at most
            // one past the end of the buffer.
            element::slot(self.base, self.progress)
        }
    }

    /// Take ownership of the element in the next slot.
    ///
    /// # Safety
    ///
    /// The slot returned by `next_slot` must hold a valid value now.
    pub unsafe fn advance(&mut self) {
        self.progress += 1;
    }

    /// Release all elements to the caller instead of destroying them.
    pub fn commit(mut self) {
        self.progress = 0;
    }
}

impl<A: ElementAlloc, T> Drop for Rollback<'_, A, T> {
    fn drop(&mut self) {
        if self.progress == 0 {
            return;
        }

        log::trace!(
            "rolling back {} constructed elements at {:p}",
            self.progress,
            self.base.as_ptr()
        );

        unsafe {
            // SAFETY: the guard owns exactly these elements.
            element::destroy_range(&mut *self.alloc, self.base, self.progress)
        }
    }
}

impl<A: ElementAlloc, T> fmt::Debug for Rollback<'_, A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rollback")
            .field("base", &self.base)
            .field("progress", &self.progress)
            .finish()
    }
}
