//! Resampling of timestamped data.
//!
//! Timestamps are plain `f64` values scaled by a `time_factor`: with
//! `time_factor = 1e6` a difference of 1.0 between two timestamps is one
//! microsecond. The new timebase is a [`LinRange`], so it costs no memory
//! regardless of its length.

use crate::error::{check_same_len, DspError, DspResult};
use crate::linrange::LinRange;
use lib_types::units::Hertz;
use lib_types::waveform::Waveform;
use rayon::prelude::*;
use tracing::debug;

/// Timestamps in microseconds.
pub const DEFAULT_TIME_FACTOR: f64 = 1e6;

/// Output samples computed per parallel work item.
pub const DEFAULT_RESAMPLE_CHUNKSIZE: usize = 10_000;

/// Keep every `divisor`-th value starting at `offset`.
pub fn resample_discard(values: &[f64], divisor: usize, offset: usize) -> DspResult<Vec<f64>> {
    if divisor == 0 {
        return Err(DspError::InvalidConfig("resampling divisor must be positive".into()));
    }
    Ok(values.iter().skip(offset).step_by(divisor).copied().collect())
}

/// [`resample_discard`] for a waveform, keeping its timebase consistent.
pub fn resample_discard_waveform(
    waveform: &Waveform,
    divisor: usize,
    offset: usize,
) -> DspResult<Waveform> {
    if divisor == 0 {
        return Err(DspError::InvalidConfig("resampling divisor must be positive".into()));
    }
    Ok(waveform.decimate(divisor, offset))
}

/// Timebase covering `t` (sorted ascending) at `new_samplerate`.
///
/// The range starts at `t[0]` and steps by `time_factor / new_samplerate`
/// up to, but not including, the last timestamp.
pub fn resampled_timespace(t: &[f64], new_samplerate: Hertz, time_factor: f64) -> DspResult<LinRange> {
    if t.len() < 2 {
        return Err(DspError::insufficient(2, t.len()));
    }
    if new_samplerate.0.is_nan() || new_samplerate.0 <= 0.0 {
        return Err(DspError::InvalidConfig(format!(
            "new samplerate must be positive, got {}",
            new_samplerate
        )));
    }
    if !time_factor.is_finite() || time_factor <= 0.0 {
        return Err(DspError::InvalidConfig(format!(
            "time factor must be positive and finite, got {}",
            time_factor
        )));
    }
    let dst_delta = time_factor / new_samplerate.0;
    let (start, end) = (t[0], t[t.len() - 1]);
    if end - start < dst_delta {
        return Err(DspError::InvalidConfig(format!(
            "time span {} is shorter than a single resampled step {}",
            end - start,
            dst_delta
        )));
    }
    Ok(LinRange::range(start, end, dst_delta))
}

/// Linearly interpolate `(t, y)` at `at`, clamping outside the source range.
fn interpolate_at(t: &[f64], y: &[f64], at: f64) -> f64 {
    let idx = t.partition_point(|&v| v <= at);
    if idx == 0 {
        return y[0];
    }
    if idx >= t.len() {
        return y[y.len() - 1];
    }
    let (t0, t1) = (t[idx - 1], t[idx]);
    let (y0, y1) = (y[idx - 1], y[idx]);
    if t1 == t0 {
        return y0;
    }
    y0 + (y1 - y0) * (at - t0) / (t1 - t0)
}

/// Linear interpolation of `(t, y)` onto the timebase from [`resampled_timespace`].
///
/// The output is split into chunks of `chunksize` samples which are
/// interpolated in parallel. `t` must be sorted ascending.
pub fn parallel_resample(
    t: &[f64],
    y: &[f64],
    new_samplerate: Hertz,
    time_factor: f64,
    chunksize: usize,
) -> DspResult<(LinRange, Vec<f64>)> {
    check_same_len(t, y)?;
    if chunksize == 0 {
        return Err(DspError::InvalidConfig("chunk size must be positive".into()));
    }
    let timebase = resampled_timespace(t, new_samplerate, time_factor)?;
    let mut out = vec![0.0; timebase.len()];

    out.par_chunks_mut(chunksize)
        .enumerate()
        .for_each(|(chunk_idx, chunk)| {
            let base = chunk_idx * chunksize;
            for (i, slot) in chunk.iter_mut().enumerate() {
                if let Some(at) = timebase.get(base + i) {
                    *slot = interpolate_at(t, y, at);
                }
            }
        });

    debug!(
        source = t.len(),
        resampled = out.len(),
        samplerate = new_samplerate.0,
        "linear resample"
    );
    Ok((timebase, out))
}
