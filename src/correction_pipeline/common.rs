//! Common utilities module
//!
//! This module contains shared utilities used across the correction pipeline.

pub mod cancel;
pub mod error;

pub use cancel::CancellationToken;
pub use error::{CorrectionError, Result};
