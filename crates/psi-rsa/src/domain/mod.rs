//! # Domain Layer
//!
//! Pure big-integer arithmetic with no I/O dependencies.

pub mod encoding;
pub mod entities;
pub mod errors;
pub mod field;
pub mod keys;
