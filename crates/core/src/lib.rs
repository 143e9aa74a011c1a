//! Core domain types, errors, and constants for the `filegate` application.
//!
//! This crate establishes the foundational data structures and error handling
//! mechanisms shared by the token, storage, and server crates.
//!
//! ## Key Components
//!
//! - **`errors`**: Defines the primary `Error` enum and `Result` type alias
//!   for configuration and startup failures.
//! - **`types`**: Domain newtypes such as [`ResourceScope`] and [`SecretKey`]
//!   that enforce invariants at the type level.
//! - **`constants`**: Shared constants such as environment variable names,
//!   the default token lifetime, and the token wire separators.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, Result},
    types::{ResourceScope, SecretKey},
};
