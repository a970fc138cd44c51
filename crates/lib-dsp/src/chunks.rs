//! Zero-copy chunking of sample buffers.

use crate::error::{DspError, DspResult};
use ndarray::{ArrayView1, ArrayView2};

/// Lazily generated, possibly overlapping, fixed-size chunks of a buffer.
///
/// Only full chunks are produced. Each chunk is a view into the original
/// data, so nothing is copied until a consumer needs a mutable buffer.
#[derive(Clone, Debug)]
pub struct OverlappingChunks<'a> {
    data: &'a [f64],
    chunksize: usize,
    shiftsize: usize,
    count: usize,
}

impl<'a> OverlappingChunks<'a> {
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn chunksize(&self) -> usize {
        self.chunksize
    }

    /// Start offset of every chunk in the source buffer.
    pub fn offsets(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.count).map(move |i| i * self.shiftsize)
    }

    pub fn get(&self, index: usize) -> Option<ArrayView1<'a, f64>> {
        if index >= self.count {
            return None;
        }
        Some(self.chunk(index))
    }

    #[inline]
    fn chunk(&self, index: usize) -> ArrayView1<'a, f64> {
        let start = index * self.shiftsize;
        ArrayView1::from(&self.data[start..start + self.chunksize])
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = ArrayView1<'a, f64>> + '_ {
        (0..self.count).map(move |i| self.chunk(i))
    }
}

/// Chunks of `chunksize` samples starting every `shiftsize` samples.
pub fn overlapping_chunks(
    values: &[f64],
    chunksize: usize,
    shiftsize: usize,
) -> DspResult<OverlappingChunks<'_>> {
    if chunksize == 0 || shiftsize == 0 {
        return Err(DspError::InvalidConfig(format!(
            "chunk size and shift size must be positive, got {chunksize} and {shiftsize}"
        )));
    }
    let count = if values.len() < chunksize {
        0
    } else {
        (values.len() - chunksize) / shiftsize + 1
    };
    Ok(OverlappingChunks {
        data: values,
        chunksize,
        shiftsize,
        count,
    })
}

/// Non-overlapping chunks as rows of a 2D view. Trailing samples that do
/// not fill a whole chunk are discarded.
pub fn reshaped_chunks(values: &[f64], chunksize: usize) -> DspResult<ArrayView2<'_, f64>> {
    if chunksize == 0 {
        return Err(DspError::InvalidConfig("chunk size must be positive".into()));
    }
    let rows = values.len() / chunksize;
    ArrayView2::from_shape((rows, chunksize), &values[..rows * chunksize])
        .map_err(|e| DspError::InvalidConfig(format!("cannot reshape into chunks: {e}")))
}
