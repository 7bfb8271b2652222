//! A recording allocator and an element type counting its live instances.
#![allow(dead_code)]
use core::cell::Cell;
use core::mem;
use core::ptr::NonNull;

use bulk_construct::{DefaultConstruct, ElementAlloc, NoInitDefault, ValueInit};

/// One call of an allocator hook, by element index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Construct(usize),
    Destroy(usize),
}

/// Records every hook call, then does the default thing.
///
/// Construction is recorded before the element is placed, so an attempt that panics shows up.
pub struct Recorder {
    base: usize,
    size: usize,
    pub events: Vec<Event>,
}

impl Recorder {
    pub fn new<T>(base: NonNull<T>) -> Self {
        Recorder {
            base: base.as_ptr() as usize,
            size: mem::size_of::<T>(),
            events: Vec::new(),
        }
    }

    fn index<T>(&self, slot: NonNull<T>) -> usize {
        assert_eq!(mem::size_of::<T>(), self.size, "recorder used with another type");
        (slot.as_ptr() as usize - self.base) / self.size
    }

    pub fn constructed(&self) -> Vec<usize> {
        self.events.iter().filter_map(|ev| match ev {
            Event::Construct(idx) => Some(*idx),
            Event::Destroy(_) => None,
        }).collect()
    }

    pub fn destroyed(&self) -> Vec<usize> {
        self.events.iter().filter_map(|ev| match ev {
            Event::Construct(_) => None,
            Event::Destroy(idx) => Some(*idx),
        }).collect()
    }
}

unsafe impl ElementAlloc for Recorder {
    type Init = ValueInit;

    unsafe fn construct<T>(&mut self, slot: NonNull<T>, value: T) {
        self.events.push(Event::Construct(self.index(slot)));
        slot.as_ptr().write(value)
    }

    unsafe fn construct_default<T>(&mut self, slot: NonNull<T>)
    where
        T: DefaultConstruct<Self::Init>,
    {
        self.events.push(Event::Construct(self.index(slot)));
        T::construct_default(slot)
    }

    unsafe fn destroy<T>(&mut self, slot: NonNull<T>) {
        self.events.push(Event::Destroy(self.index(slot)));
        core::ptr::drop_in_place(slot.as_ptr())
    }
}

/// The panic payload of a failing `Tracked` constructor.
#[derive(Debug, PartialEq, Eq)]
pub struct ExampleError;

thread_local! {
    static LIVE: Cell<usize> = Cell::new(0);
    static FUSE: Cell<Option<usize>> = Cell::new(None);
}

/// The number of `Tracked` values alive on this thread.
pub fn live() -> usize {
    LIVE.with(Cell::get)
}

/// Let the constructor of `Tracked` panic after `successes` more successful constructions.
pub fn fail_after(successes: usize) {
    FUSE.with(|fuse| fuse.set(Some(successes)));
}

/// Let all constructions of `Tracked` succeed again.
pub fn defuse() {
    FUSE.with(|fuse| fuse.set(None));
}

/// A value that counts its live instances and can be told to fail construction.
#[derive(Debug, PartialEq, Eq)]
pub struct Tracked(pub usize);

impl Tracked {
    pub fn new(val: usize) -> Self {
        FUSE.with(|fuse| match fuse.get() {
            Some(0) => {
                fuse.set(None);
                std::panic::panic_any(ExampleError)
            }
            Some(left) => fuse.set(Some(left - 1)),
            None => {}
        });
        LIVE.with(|live| live.set(live.get() + 1));
        Tracked(val)
    }
}

impl Default for Tracked {
    fn default() -> Self {
        Tracked::new(0)
    }
}

// Has a destructor, so default-initialization runs `Default` as well.
unsafe impl NoInitDefault for Tracked {}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        Tracked::new(self.0)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        LIVE.with(|live| live.set(live.get() - 1));
    }
}

/// Uninitialized memory for `n` elements and a pointer to it.
pub fn buffer<T>(n: usize) -> (Vec<T>, NonNull<T>) {
    let mut memory = Vec::with_capacity(n);
    let base = NonNull::new(memory.as_mut_ptr()).unwrap();
    (memory, base)
}

/// Read the `n` elements at `base` without taking ownership.
pub unsafe fn view<'a, T>(base: NonNull<T>, n: usize) -> &'a [T] {
    core::slice::from_raw_parts(base.as_ptr(), n)
}
