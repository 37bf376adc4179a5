// Fixed-capacity ring buffer with an explicit filling/full state
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
use core::iter::Chain;
use core::slice::Iter;

/// Errors raised while constructing a [`RingBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum RingBufferError {
    /// The requested capacity was zero.
    #[cfg_attr(feature = "std", error("ring buffer capacity must be greater than zero"))]
    ZeroCapacity,
}

/// The append strategy currently in effect.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BufferMode {
    /// Fewer than `capacity` elements stored; `add` appends.
    Filling,
    /// Exactly `capacity` elements stored; `add` overwrites the oldest element at `write_pos`.
    Full {
        /// Index of the oldest element, which the next `add` overwrites.
        write_pos: usize,
    },
}

/// A fixed-capacity buffer that keeps the last `capacity` values added to it.
///
/// The buffer starts in [`BufferMode::Filling`] and switches to [`BufferMode::Full`] on the add
/// that fills it. The switch is one-way. Reads always yield elements from oldest to newest.
///
/// ```rust
/// use daq_kernels::ring::RingBuffer;
///
/// let mut buf = RingBuffer::new(3).unwrap();
/// for v in [1, 2, 3, 4, 5] {
///     buf.add(v);
/// }
/// assert_eq!(buf.get(), vec![3, 4, 5]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingBuffer<T> {
    capacity: usize,
    data: Vec<T>,
    mode: BufferMode,
}

impl<T> RingBuffer<T> {
    /// Creates an empty buffer holding at most `capacity` elements.
    ///
    /// # Errors
    /// [`RingBufferError::ZeroCapacity`] if `capacity == 0`.
    pub fn new(capacity: usize) -> Result<Self, RingBufferError> {
        if capacity == 0 {
            return Err(RingBufferError::ZeroCapacity);
        }
        Ok(Self {
            capacity,
            data: Vec::with_capacity(capacity),
            mode: BufferMode::Filling,
        })
    }

    /// Adds a value, overwriting the oldest one once the buffer is full.
    pub fn add(&mut self, value: T) {
        match self.mode {
            BufferMode::Filling => {
                self.data.push(value);
                if self.data.len() == self.capacity {
                    self.mode = BufferMode::Full { write_pos: 0 };
                }
            }
            BufferMode::Full { write_pos } => {
                self.data[write_pos] = value;
                self.mode = BufferMode::Full {
                    write_pos: (write_pos + 1) % self.capacity,
                };
            }
        }
    }

    /// Returns the stored elements as two slices which, concatenated, run oldest to newest.
    pub fn as_slices(&self) -> (&[T], &[T]) {
        match self.mode {
            BufferMode::Filling => (&self.data[..], &self.data[..0]),
            BufferMode::Full { write_pos } => {
                let (newer, older) = self.data.split_at(write_pos);
                (older, newer)
            }
        }
    }

    /// Iterates over the stored elements from oldest to newest without allocating.
    pub fn iter(&self) -> Chain<Iter<'_, T>, Iter<'_, T>> {
        let (older, newer) = self.as_slices();
        older.iter().chain(newer.iter())
    }

    /// Returns the most recently added element.
    pub fn latest(&self) -> Option<&T> {
        match self.mode {
            BufferMode::Filling => self.data.last(),
            BufferMode::Full { write_pos } => {
                self.data.get((write_pos + self.capacity - 1) % self.capacity)
            }
        }
    }

    /// Returns the oldest element still stored.
    pub fn oldest(&self) -> Option<&T> {
        match self.mode {
            BufferMode::Filling => self.data.first(),
            BufferMode::Full { write_pos } => self.data.get(write_pos),
        }
    }

    /// Returns the number of stored elements, `min(adds, capacity)`.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if nothing was added yet.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` once the buffer has filled up.
    pub fn is_full(&self) -> bool {
        matches!(self.mode, BufferMode::Full { .. })
    }

    /// Returns the maximum number of stored elements.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the current append strategy.
    pub fn mode(&self) -> BufferMode {
        self.mode
    }
}

impl<T: Clone> RingBuffer<T> {
    /// Returns a copy of the stored elements ordered from oldest to newest.
    pub fn get(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Chain<Iter<'a, T>, Iter<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
