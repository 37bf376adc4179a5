// Detection of contiguous runs of true samples
// Copyright © 2025 Hs293Go
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation
// the rights to use, copy, modify, merge, publish, distribute, sublicense,
// and/or sell copies of the Software, and to permit persons to whom the
// Software is furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included
// in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES
// OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.
// IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
// DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT,
// TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE
// OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use alloc::vec::Vec;
use core::iter::{Enumerate, Fuse};
use core::ops::Range;

use num_traits::Float;

/// Errors raised while constructing a [`ClusterDetector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum ClusterError {
    /// The minimum run length was zero.
    #[cfg_attr(feature = "std", error("minimum cluster length must be at least one"))]
    ZeroMinimumLength,
}

/// A maximal run of `true` samples.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cluster {
    /// Index of the first sample of the run.
    pub start: usize,
    /// Number of samples in the run.
    pub len: usize,
}

impl Cluster {
    /// Index one past the last sample of the run.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// The sample indices covered by the run.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Returns the absolute index of the largest sample inside the run.
    ///
    /// Returns `None` if the run lies outside `samples` or every sample in it is NaN. On ties the
    /// first index wins.
    pub fn argmax<F: Float>(&self, samples: &[F]) -> Option<usize> {
        self.extremum(samples, |candidate, best| candidate > best)
    }

    /// Returns the absolute index of the smallest sample inside the run.
    ///
    /// See [`argmax`](Self::argmax).
    pub fn argmin<F: Float>(&self, samples: &[F]) -> Option<usize> {
        self.extremum(samples, |candidate, best| candidate < best)
    }

    fn extremum<F: Float>(&self, samples: &[F], better: impl Fn(F, F) -> bool) -> Option<usize> {
        let window = samples.get(self.range())?;
        window
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_nan())
            .fold(None, |best: Option<(usize, F)>, (i, &v)| match best {
                Some((_, b)) if !better(v, b) => best,
                _ => Some((i, v)),
            })
            .map(|(i, _)| self.start + i)
    }
}

/// Scans boolean sequences for runs of `true` that are at least `min_len` samples long.
///
/// Runs are maximal: a single `false` always splits two runs, and adjacent runs are never merged.
///
/// ```rust
/// use daq_kernels::cluster::{Cluster, ClusterDetector};
///
/// let detector = ClusterDetector::new(2).unwrap();
/// let cond = [false, true, true, false, true, false, false, true, true, true];
/// assert_eq!(
///     detector.detect(cond),
///     vec![Cluster { start: 1, len: 2 }, Cluster { start: 7, len: 3 }]
/// );
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClusterDetector {
    min_len: usize,
}

impl ClusterDetector {
    /// Creates a detector reporting runs of at least `min_len` samples.
    ///
    /// # Errors
    /// [`ClusterError::ZeroMinimumLength`] if `min_len == 0`.
    pub fn new(min_len: usize) -> Result<Self, ClusterError> {
        if min_len == 0 {
            return Err(ClusterError::ZeroMinimumLength);
        }
        Ok(Self { min_len })
    }

    /// Returns the minimum reported run length.
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// Collects every qualifying run in increasing start order.
    pub fn detect<I>(&self, cond: I) -> Vec<Cluster>
    where
        I: IntoIterator<Item = bool>,
    {
        self.clusters(cond).collect()
    }

    /// Lazily yields qualifying runs as the condition sequence is consumed.
    pub fn clusters<I>(&self, cond: I) -> Clusters<I::IntoIter>
    where
        I: IntoIterator<Item = bool>,
    {
        Clusters {
            samples: cond.into_iter().fuse().enumerate(),
            min_len: self.min_len,
        }
    }
}

/// Iterator over the runs found by [`ClusterDetector::clusters`].
#[derive(Clone, Debug)]
pub struct Clusters<I: Iterator<Item = bool>> {
    samples: Enumerate<Fuse<I>>,
    min_len: usize,
}

impl<I: Iterator<Item = bool>> Iterator for Clusters<I> {
    type Item = Cluster;

    fn next(&mut self) -> Option<Cluster> {
        let mut run: Option<Cluster> = None;
        loop {
            match self.samples.next() {
                Some((i, true)) => match run.as_mut() {
                    Some(current) => current.len += 1,
                    None => run = Some(Cluster { start: i, len: 1 }),
                },
                Some((_, false)) => {
                    if let Some(current) = run.take() {
                        if current.len >= self.min_len {
                            return Some(current);
                        }
                    }
                }
                None => return run.filter(|c| c.len >= self.min_len),
            }
        }
    }
}

/// Finds every run of `true` in `cond` that is at least `min_len` samples long.
///
/// # Errors
/// [`ClusterError::ZeroMinimumLength`] if `min_len == 0`.
pub fn find_clusters(cond: &[bool], min_len: usize) -> Result<Vec<Cluster>, ClusterError> {
    Ok(ClusterDetector::new(min_len)?.detect(cond.iter().copied()))
}
