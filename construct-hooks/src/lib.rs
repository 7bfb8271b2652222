//! Traits describing how an allocator wants values placed into, and removed from, its memory.
//!
//! Containers that draw memory from an allocator usually do not write values into it directly.
//! Instead they ask the allocator to do so, which gives the allocator the chance to observe or
//! customize each construction and destruction. Most allocators have no interest in this and
//! simply inherit the default hooks of [`ElementAlloc`], which write in place and drop in place.
//!
//! Additionally each allocator selects an initialization policy for *default* construction:
//! * [`ValueInit`]: the element is `Default::default()`, zeroing for plain integers.
//! * [`DefaultInit`]: storage of plain-old-data types is left exactly as it was found, other
//!   types still run their `Default` constructor.
//!
//! The choice is a property of the allocator type, resolved at compile time. Use [`NoInit`] to
//! switch any allocator over to the second policy.
//!
//! [`ElementAlloc`]: trait.ElementAlloc.html
//! [`ValueInit`]: struct.ValueInit.html
//! [`DefaultInit`]: struct.DefaultInit.html
//! [`NoInit`]: struct.NoInit.html
#![no_std]
#![deny(missing_docs)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod hooks;
mod no_init;
mod policy;

pub use crate::hooks::{ElementAlloc, InPlace};
pub use crate::no_init::NoInit;
pub use crate::policy::{DefaultConstruct, DefaultInit, InitPolicy, NoInitDefault, ValueInit};

// Compile the examples of the Readme, to ensure they keep working.
#[cfg(doctest)]
#[doc = include_str!("../Readme.md")]
pub struct ReadmeDoctests;
