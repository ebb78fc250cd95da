//! Tagwise-core - closed variant sets and the code that dispatches on them
//!
//! This crate provides:
//! - Exhaustive dispatch over tagged unions, with a construction-time checked
//!   dispatch table for data that arrives untyped
//! - The network state union and its `describe` dispatcher
//! - Structural narrowing predicates over dynamic JSON values
//! - Type queries (field-name sets, `typeof`, indexed access)
//! - Literal-set unions/intersections and composed record shapes
//!
//! ## Laws (Compiler Enforced)
//!
//! - No `unwrap()` / `expect()` / `panic!()` - returns `Result` instead
//! - No `unsafe`
//! - No `_ => default` arm on a tagged union: an unhandled variant is a
//!   build failure, or an [`Error`] carrying the offending value

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod dispatch;
pub mod error;
pub mod lookup;
pub mod narrowing;
pub mod network;
pub mod queries;
pub mod unions;

pub use dispatch::{
    check_coverage, parse_tagged, parse_tagged_value, unexpected_variant, DispatchTable,
    DispatchTableBuilder, TaggedUnion,
};
pub use error::{Error, Result};
pub use lookup::{maybe_get_user_info, Coin, LookupError, UserInfo, UserLookup};
pub use narrowing::{classify_pet, narrow_by_swim, pad_left, Bird, Fish, Padding, Pet};
pub use network::{describe, describe_download, NetworkResponse, NetworkState, NetworkTag};
pub use queries::{type_of, FieldKind, FieldValue, IndexSignature, JsType, Person, PersonKey};
pub use unions::{CardDetails, EvenAndSmall, EvenOrSmall, LaysEggs};
