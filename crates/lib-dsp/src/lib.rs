//! # lib-dsp
//!
//! Signal-processing utilities for measured and simulated data.
//!
//! - **Unstair**: compress quantized step functions ([`unstair::unstair`])
//! - **Polyfit**: least-squares fits with automatic degree selection
//!   ([`polyfit::optimum_polyfit`])
//! - **FFT**: windowed spectra and averaged spectra of overlapping chunks
//! - **Selection**: runs, ranges, extrema and nearest-value lookups
//! - **Resampling**: decimation, lazy timebases and parallel linear resampling
//!
//! ```
//! use lib_dsp::polyfit::{optimum_polyfit, PolyfitOptions};
//!
//! let x: Vec<f64> = (0..20).map(f64::from).collect();
//! let y: Vec<f64> = x.iter().map(|v| 0.5 * v * v - 3.0).collect();
//! let fit = optimum_polyfit(&x, &y, &PolyfitOptions::default()).unwrap();
//! assert!(fit.score < 1e-6);
//! ```

pub mod chunks;
pub mod error;
pub mod fft;
pub mod linrange;
pub mod normalize;
pub mod polyfit;
pub mod resample;
pub mod selection;
pub mod simulation;
pub mod unstair;
pub mod weight;
pub mod window;

pub use error::{DspError, DspResult};
pub use fft::{compute_fft, compute_fft_with, FftEngine, FftResult};
pub use linrange::LinRange;
pub use polyfit::{optimum_polyfit, polyfit, PolyfitOptions, PolyfitResult, Polynomial};
pub use unstair::{unstair, UnstairMethod};
pub use window::FftWindow;
