//! Real-valued FFT spectra and chunked FFT averaging.
//!
//! Spectra are one-sided: for an `n`-point transform the first `n / 2`
//! bins are returned, with amplitudes scaled by `2 / n` so a sine of peak
//! amplitude `A` shows up as roughly `A` (minus window loss).

use crate::chunks::overlapping_chunks;
use crate::error::{DspError, DspResult};
use crate::normalize::remove_mean;
use crate::selection::{find_closest_index, frequency_range_indices};
use crate::window::{generate_window, FftWindow};
use lib_types::units::Hertz;
use ndarray::ArrayView1;
use num_complex::Complex64;
use rayon::prelude::*;
use realfft::{RealFftPlanner, RealToComplex};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// FFT engine with a cached real-to-complex planner.
pub struct FftEngine {
    planner: RealFftPlanner<f64>,
}

impl FftEngine {
    pub fn new() -> Self {
        Self {
            planner: RealFftPlanner::new(),
        }
    }

    /// Forward plan for `len` samples; any length of at least 2 is supported.
    pub fn plan(&mut self, len: usize) -> DspResult<Arc<dyn RealToComplex<f64>>> {
        if len < 2 {
            return Err(DspError::InvalidFftSize(len));
        }
        Ok(self.planner.plan_fft_forward(len))
    }

    /// Forward real-to-complex FFT.
    ///
    /// Input: N real samples
    /// Output: N/2 + 1 complex samples (Hermitian symmetry exploited)
    pub fn rfft(&mut self, data: &[f64]) -> DspResult<Vec<Complex64>> {
        let r2c = self.plan(data.len())?;
        run_plan(r2c.as_ref(), data)
    }
}

impl Default for FftEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn run_plan(r2c: &dyn RealToComplex<f64>, data: &[f64]) -> DspResult<Vec<Complex64>> {
    let mut input = data.to_vec();
    let mut output = r2c.make_output_vec();
    r2c.process(&mut input, &mut output)
        .map_err(|e| DspError::NumericalInstability(e.to_string()))?;
    Ok(output)
}

/// Frequencies of the first `fftsize / 2` bins of a real FFT.
pub fn fft_frequencies(fftsize: usize, samplerate: Hertz) -> Vec<f64> {
    let df = samplerate.0 / fftsize as f64;
    (0..fftsize / 2).map(|i| i as f64 * df).collect()
}

/// One frequency bin of a spectrum.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpectrumBin {
    pub frequency: f64,
    pub amplitude: f64,
    /// Phase in degrees, if the spectrum carries phase information.
    pub angle: Option<f64>,
}

/// A one-sided amplitude spectrum.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FftResult {
    pub frequencies: Vec<f64>,
    pub amplitudes: Vec<f64>,
    /// Phases in degrees. Averaged spectra carry no phase.
    pub angles: Option<Vec<f64>>,
}

impl FftResult {
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    fn slice(&self, start: usize, end: usize) -> FftResult {
        FftResult {
            frequencies: self.frequencies[start..end].to_vec(),
            amplitudes: self.amplitudes[start..end].to_vec(),
            angles: self.angles.as_ref().map(|a| a[start..end].to_vec()),
        }
    }

    /// Bins with `low <= frequency < high`; `None` leaves a side open.
    pub fn select_frequency_range(&self, low: Option<f64>, high: Option<f64>) -> FftResult {
        let (start, end) = frequency_range_indices(&self.frequencies, low, high);
        self.slice(start, end)
    }

    /// Frequency of the largest amplitude within the optional range.
    pub fn dominant_frequency(&self, low: Option<f64>, high: Option<f64>) -> DspResult<f64> {
        let (start, end) = frequency_range_indices(&self.frequencies, low, high);
        (start..end)
            .max_by(|&a, &b| {
                self.amplitudes[a]
                    .total_cmp(&self.amplitudes[b])
                    .then(b.cmp(&a))
            })
            .map(|i| self.frequencies[i])
            .ok_or_else(|| DspError::insufficient(1, 0))
    }

    /// Sum of amplitudes in `[low, high)` divided by the covered bandwidth,
    /// in amplitude units per Hz.
    pub fn amplitude_integral(&self, low: Option<f64>, high: Option<f64>) -> DspResult<f64> {
        let (start, end) = frequency_range_indices(&self.frequencies, low, high);
        if end - start < 2 {
            return Err(DspError::insufficient(2, end - start));
        }
        let bandwidth = self.frequencies[end - 1] - self.frequencies[start];
        Ok(self.amplitudes[start..end].iter().sum::<f64>() / bandwidth)
    }

    /// The bin closest to `frequency`.
    pub fn find_closest_frequency(&self, frequency: f64) -> Option<SpectrumBin> {
        let idx = find_closest_index(&self.frequencies, frequency)?;
        Some(SpectrumBin {
            frequency: self.frequencies[idx],
            amplitude: self.amplitudes[idx],
            angle: self.angles.as_ref().map(|a| a[idx]),
        })
    }

    /// Index of the first local minimum of the amplitudes, or 0 if the
    /// amplitudes never rise.
    pub fn dc_artifact_index(&self) -> usize {
        self.amplitudes
            .windows(2)
            .position(|w| w[1] > w[0])
            .unwrap_or(0)
    }

    /// Drop the bins before the first local minimum, removing the DC
    /// leakage peak at the start of a spectrum.
    pub fn cut_dc_artifacts(&self) -> FftResult {
        self.slice(self.dc_artifact_index(), self.len())
    }
}

/// Windowed FFT of `y` sampled at `samplerate`.
///
/// Plans a fresh transform; use [`compute_fft_with`] to reuse plans across calls.
pub fn compute_fft(y: &[f64], samplerate: Hertz, window: FftWindow) -> DspResult<FftResult> {
    compute_fft_with(&mut FftEngine::new(), y, samplerate, window)
}

/// Like [`compute_fft`], planning through `engine`.
pub fn compute_fft_with(
    engine: &mut FftEngine,
    y: &[f64],
    samplerate: Hertz,
    window: FftWindow,
) -> DspResult<FftResult> {
    let n = y.len();
    let coefficients = generate_window(window, n);
    let windowed: Vec<f64> = y.iter().zip(&coefficients).map(|(v, w)| v * w).collect();
    let spectrum = engine.rfft(&windowed)?;

    let half = &spectrum[..n / 2];
    let scale = 2.0 / n as f64;
    Ok(FftResult {
        frequencies: fft_frequencies(n, samplerate),
        amplitudes: half.iter().map(|c| c.norm() * scale).collect(),
        angles: Some(half.iter().map(|c| c.arg().to_degrees()).collect()),
    })
}

/// Options for [`fft_reduce`] and [`parallel_fft_reduce`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FftReduceOptions {
    pub window: FftWindow,
    /// Subtract the mean of each chunk before windowing.
    pub remove_dc: bool,
    /// Scale the summed spectrum to an average `2|X| / n` amplitude.
    pub normalize: bool,
    /// Distance between chunk starts; `fftsize / 4` if unset.
    pub shiftsize: Option<usize>,
}

impl Default for FftReduceOptions {
    fn default() -> Self {
        Self {
            window: FftWindow::Blackman,
            remove_dc: false,
            normalize: true,
            shiftsize: None,
        }
    }
}

fn chunk_magnitudes(
    r2c: &dyn RealToComplex<f64>,
    chunk: ArrayView1<'_, f64>,
    window: &[f64],
    remove_dc: bool,
) -> DspResult<Vec<f64>> {
    let mut block = chunk.to_vec();
    if remove_dc {
        block = remove_mean(&block);
    }
    block.iter_mut().zip(window).for_each(|(v, w)| *v *= w);
    let spectrum = run_plan(r2c, &block)?;
    Ok(spectrum[..block.len() / 2].iter().map(|c| c.norm()).collect())
}

fn accumulate(mut acc: Vec<f64>, other: Vec<f64>) -> Vec<f64> {
    acc.iter_mut().zip(other).for_each(|(a, b)| *a += b);
    acc
}

struct ReducePlan {
    r2c: Arc<dyn RealToComplex<f64>>,
    window: Vec<f64>,
    shiftsize: usize,
}

fn reduce_plan(fftsize: usize, opts: &FftReduceOptions) -> DspResult<ReducePlan> {
    let r2c = FftEngine::new().plan(fftsize)?;
    Ok(ReducePlan {
        r2c,
        window: generate_window(opts.window, fftsize),
        shiftsize: opts.shiftsize.unwrap_or(fftsize / 4).max(1),
    })
}

fn finish_reduce(
    sum: Vec<f64>,
    count: usize,
    fftsize: usize,
    samplerate: Hertz,
    opts: &FftReduceOptions,
) -> FftResult {
    let scale = if opts.normalize {
        2.0 / (count * fftsize) as f64
    } else {
        1.0
    };
    FftResult {
        frequencies: fft_frequencies(fftsize, samplerate),
        amplitudes: sum.into_iter().map(|v| v * scale).collect(),
        angles: None,
    }
}

/// Sum of the windowed FFT magnitudes of all full `fftsize` chunks of
/// `values`, computed on the calling thread.
pub fn fft_reduce(
    values: &[f64],
    samplerate: Hertz,
    fftsize: usize,
    opts: &FftReduceOptions,
) -> DspResult<FftResult> {
    let plan = reduce_plan(fftsize, opts)?;
    let chunks = overlapping_chunks(values, fftsize, plan.shiftsize)?;
    if chunks.is_empty() {
        return Err(DspError::insufficient(fftsize, values.len()));
    }

    let mut sum = vec![0.0; fftsize / 2];
    for chunk in chunks.iter() {
        let magnitudes = chunk_magnitudes(plan.r2c.as_ref(), chunk, &plan.window, opts.remove_dc)?;
        sum = accumulate(sum, magnitudes);
    }

    debug!(chunks = chunks.len(), fftsize, shiftsize = plan.shiftsize, "fft reduce");
    Ok(finish_reduce(sum, chunks.len(), fftsize, samplerate, opts))
}

/// Like [`fft_reduce`], with the chunks transformed in parallel.
///
/// All workers share one FFT plan.
pub fn parallel_fft_reduce(
    values: &[f64],
    samplerate: Hertz,
    fftsize: usize,
    opts: &FftReduceOptions,
) -> DspResult<FftResult> {
    let plan = reduce_plan(fftsize, opts)?;
    let chunks = overlapping_chunks(values, fftsize, plan.shiftsize)?;
    if chunks.is_empty() {
        return Err(DspError::insufficient(fftsize, values.len()));
    }

    let half = fftsize / 2;
    let sum = (0..chunks.len())
        .into_par_iter()
        .map(|i| -> DspResult<Vec<f64>> {
            let chunk = chunks.get(i).ok_or_else(|| DspError::insufficient(i + 1, chunks.len()))?;
            chunk_magnitudes(plan.r2c.as_ref(), chunk, &plan.window, opts.remove_dc)
        })
        .try_reduce(|| vec![0.0; half], |a, b| Ok(accumulate(a, b)))?;

    debug!(
        chunks = chunks.len(),
        fftsize,
        shiftsize = plan.shiftsize,
        "parallel fft reduce"
    );
    Ok(finish_reduce(sum, chunks.len(), fftsize, samplerate, opts))
}
