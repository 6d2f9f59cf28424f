//! User adjustment module
//!
//! Combines an estimated base matrix with the gain and balance sliders.

mod model;
pub mod types;

#[cfg(test)]
mod tests;

pub use model::TweakModel;
pub use types::{MagicWeights, TweakParameters};
