//! Positive integers validated against a closed set of named power-of-two flags
//!
//! Declare a set with [`flag_set!`], then wrap raw integers as [`BitAware`] values bound to it:
//!
//! ```
//! use bit_aware::{flag_set, Active, BitAware};
//! flag_set! {
//!     pub struct Permission {
//!         READ = 1,
//!         WRITE = 2,
//!         EXEC = 4,
//!     }
//! }
//! let perm: BitAware<Permission> = BitAware::new(Permission::READ | Permission::EXEC).unwrap();
//! let active: Vec<_> = perm.iter().collect();
//! assert_eq!(active, [Active::Member(Permission::READ), Active::Member(Permission::EXEC)]);
//! assert_eq!(perm, 5u64);
//! ```
#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod flag_set;
mod macros;
#[cfg(feature = "serde-1")]
mod serde_impl;
mod value;

pub use error::{DefinitionError, Error, LookupError};
pub use flag_set::{Flag, FlagSet, Iter as FlagSetIter};
pub use value::{Active, BitAware, Binding, IntoBitAware, Iter, Label, Unbound};
