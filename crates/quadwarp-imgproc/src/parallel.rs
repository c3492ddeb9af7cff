use rayon::prelude::*;
use thiserror::Error;

use quadwarp_image::{ImageError, PixelBuffer};

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),
}

impl From<ParallelError> for ImageError {
    fn from(e: ParallelError) -> Self {
        ImageError::ParallelExecution(e.to_string())
    }
}

/// Controls how the rows of a destination buffer are distributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process rows in parallel.
    #[default]
    ParallelRows,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

/// Apply a function to every pixel of the destination buffer.
///
/// The closure receives the pixel column, the pixel row and the mutable bytes
/// of that pixel. Rows are split on the buffer stride so each worker owns a
/// disjoint row; the padding at the end of each row is never handed out.
///
/// # Arguments
///
/// * `dst` - The destination buffer.
/// * `strategy` - How rows are distributed over threads.
/// * `f` - The per-pixel function.
pub fn par_iter_rows_resample(
    dst: &mut PixelBuffer,
    strategy: ExecutionStrategy,
    f: impl Fn(usize, usize, &mut [u8]) + Send + Sync,
) -> Result<(), ParallelError> {
    let stride = dst.stride();
    let row_bytes = dst.row_bytes();
    let bpp = dst.bytes_per_pixel();

    let process_row = |(y, dst_row): (usize, &mut [u8])| {
        dst_row[..row_bytes]
            .chunks_exact_mut(bpp)
            .enumerate()
            .for_each(|(x, dst_pixel)| f(x, y, dst_pixel));
    };

    match strategy {
        ExecutionStrategy::Serial => {
            dst.as_slice_mut()
                .chunks_exact_mut(stride)
                .enumerate()
                .for_each(process_row);
        }
        ExecutionStrategy::ParallelRows => {
            dst.as_slice_mut()
                .par_chunks_exact_mut(stride)
                .enumerate()
                .for_each(process_row);
        }
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                dst.as_slice_mut()
                    .par_chunks_exact_mut(stride)
                    .enumerate()
                    .for_each(process_row);
            });
        }
    }

    Ok(())
}
