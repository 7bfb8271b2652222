//! Construct and destroy contiguous runs of values through an allocator, all or nothing.
//!
//! Containers that manage their own memory, such as a fixed capacity vector or a shared array,
//! often need to place `n` values into a buffer they have just allocated. When one of the
//! constructors panics midway, the values already placed must not be leaked, and the buffer should
//! be left as it was found so the container can simply deallocate it. This crate provides exactly
//! that operation, routed through the construct and destroy hooks of an [`ElementAlloc`].
//!
//! ## Usage
//!
//! ```
//! use core::ptr::NonNull;
//! use bulk_construct::{construct_n_from, destroy_n, InPlace};
//!
//! let prototype = [String::from("spam")];
//! let mut memory: Vec<String> = Vec::with_capacity(3);
//! let base = NonNull::new(memory.as_mut_ptr()).unwrap();
//!
//! unsafe {
//!     construct_n_from(&mut InPlace, base, 3, &prototype).unwrap();
//!     memory.set_len(3);
//! }
//! assert_eq!(memory, ["spam", "spam", "spam"]);
//!
//! unsafe {
//!     memory.set_len(0);
//!     destroy_n(&mut InPlace, base, 3);
//! }
//! ```
//!
//! The buffer itself is never allocated nor freed here.
//!
//! ## Features
//!
//! * `alloc`: allow `String`, `Vec` and `Box` elements under the no-init policy.
//! * `std`: implies `alloc`, implement `std::error::Error` for [`ConstructError`] and abort through the process
//!   when a destructor panics.
//!
//! [`ElementAlloc`]: trait.ElementAlloc.html
//! [`ConstructError`]: enum.ConstructError.html
#![no_std]
#![deny(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

mod abort;
mod bulk;
pub mod element;
mod error;
mod rollback;
pub mod slice;

pub use construct_hooks::{
    DefaultConstruct, DefaultInit, ElementAlloc, InPlace, InitPolicy, NoInit, NoInitDefault,
    ValueInit,
};

pub use crate::bulk::{
    construct_n, construct_n_from, construct_n_with, destroy_n, try_construct_n_with,
};
pub use crate::element::{construct, construct_with, destroy};
pub use crate::error::ConstructError;
pub use crate::rollback::Rollback;

// Compile the examples of the Readme, to ensure they keep working.
#[cfg(doctest)]
#[doc = include_str!("../Readme.md")]
pub struct ReadmeDoctests;
