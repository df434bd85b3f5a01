//! High-level operations.
//!
//! This module contains the implementation of jdkscout commands.

pub mod add;
pub mod generate;
pub mod select;

pub use add::{add_toolchain, AddOptions};
pub use generate::{generate, write_definitions};
pub use select::{select_toolchain, JdkMode, SelectError, SelectOutcome, SelectRequest};
