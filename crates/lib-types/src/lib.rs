//! # lib-types
//!
//! Core type definitions shared by the engcalc workspace.
//!
//! This crate provides:
//! - Physical units with compile-time safety
//! - The [`Quantity`] trait that ties each unit newtype to its SI symbol
//! - Waveform representation for uniformly sampled signals

pub mod quantity;
pub mod units;
pub mod waveform;

pub use quantity::Quantity;
pub use units::*;
pub use waveform::*;

/// Re-export num_complex for convenience
pub use num_complex::Complex64;
