/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Multi-rank contiguous pixel buffers
//!
//! An [`NdBuffer`] owns one flat allocation of `product(dims)` elements
//! and knows its own dimensions, so it can be indexed with a chained
//! index `[i, j, k]` or viewed row by row without copying.
//!
//! ```
//! use fourier_image::buffer::NdBuffer;
//!
//! let mut buffer = NdBuffer::<u8>::new(&[2, 3, 3]).unwrap();
//! *buffer.get_mut(&[1, 2, 0]).unwrap() = 9;
//!
//! let offset = buffer.offset(&[1, 2, 0]).unwrap();
//! assert_eq!(buffer.as_slice()[offset], 9);
//! assert_eq!(buffer.pixel_rows().unwrap()[1][2][0], 9);
//! ```
use core::ops::{Index, IndexMut};

use bytemuck::Pod;

use crate::errors::ImageErrors;

/// Highest rank a buffer may have
pub const MAX_RANK: usize = 3;

/// A contiguous, zero initialized buffer of rank 1, 2 or 3
#[derive(Clone, Debug, PartialEq)]
pub struct NdBuffer<T: Pod> {
    data:    Vec<T>,
    rank:    usize,
    dims:    [usize; MAX_RANK],
    strides: [usize; MAX_RANK]
}

impl<T: Pod> NdBuffer<T> {
    /// Allocate a zeroed buffer with the given dimensions
    ///
    /// # Errors
    /// - `InvalidArgument`: zero sized element, rank outside `1..=3`, a zero
    ///   dimension or a total size that overflows
    /// - `OutOfMemory`: the allocation could not be satisfied
    pub fn new(dims: &[usize]) -> Result<NdBuffer<T>, ImageErrors> {
        let element_size = core::mem::size_of::<T>();

        if element_size == 0 {
            return Err(ImageErrors::InvalidArgument(
                "Element size must be positive".to_string()
            ));
        }
        if dims.is_empty() || dims.len() > MAX_RANK {
            let msg = format!("Rank must be between 1 and {MAX_RANK}, found {}", dims.len());
            return Err(ImageErrors::InvalidArgument(msg));
        }
        if dims.contains(&0) {
            let msg = format!("Dimensions must be positive, found {dims:?}");
            return Err(ImageErrors::InvalidArgument(msg));
        }

        let len = dims
            .iter()
            .try_fold(1_usize, |acc, dim| acc.checked_mul(*dim))
            .filter(|len| {
                len.checked_mul(element_size)
                    .is_some_and(|bytes| bytes <= isize::MAX as usize)
            })
            .ok_or_else(|| {
                ImageErrors::InvalidArgument(format!("Dimensions {dims:?} overflow"))
            })?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| ImageErrors::OutOfMemory(len * element_size))?;
        data.resize(len, T::zeroed());

        let rank = dims.len();
        let mut stored_dims = [1; MAX_RANK];
        stored_dims[..rank].copy_from_slice(dims);

        // stride of a level is the product of all deeper dimensions
        let mut strides = [1; MAX_RANK];
        for level in (0..rank.saturating_sub(1)).rev() {
            strides[level] = strides[level + 1] * stored_dims[level + 1];
        }

        Ok(NdBuffer {
            data,
            rank,
            dims: stored_dims,
            strides
        })
    }

    /// Allocate a buffer with every element set to `value`
    pub fn filled(dims: &[usize], value: T) -> Result<NdBuffer<T>, ImageErrors> {
        let mut buffer = NdBuffer::new(dims)?;
        buffer.data.fill(value);
        Ok(buffer)
    }

    /// Release the buffer returning the rank that was released
    pub fn free(self) -> usize {
        self.rank
    }

    pub const fn rank(&self) -> usize {
        self.rank
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims[..self.rank]
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides[..self.rank]
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Resolve a chained index to an offset into the flat view
    ///
    /// Returns `None` if the index has the wrong rank or is out of bounds
    pub fn offset(&self, index: &[usize]) -> Option<usize> {
        if index.len() != self.rank {
            return None;
        }
        let mut offset = 0;

        for ((i, dim), stride) in index.iter().zip(self.dims()).zip(self.strides()) {
            if i >= dim {
                return None;
            }
            offset += i * stride;
        }
        Some(offset)
    }

    pub fn get(&self, index: &[usize]) -> Option<&T> {
        self.offset(index).map(|offset| &self.data[offset])
    }

    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut T> {
        self.offset(index).map(|offset| &mut self.data[offset])
    }

    /// The flat view of the buffer
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// The raw bytes of the buffer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        bytemuck::cast_slice_mut(&mut self.data)
    }

    /// A row view `view[i][j]` over a rank 2 buffer
    pub fn rows(&self) -> Option<Rows<'_, T>> {
        (self.rank == 2).then(|| Rows::new(&self.data, self.dims[1]))
    }

    pub fn rows_mut(&mut self) -> Option<RowsMut<'_, T>> {
        let cols = self.dims[1];
        (self.rank == 2).then(|| RowsMut::new(&mut self.data, cols))
    }

    /// A row view `view[i][j][k]` over a rank 3 buffer whose innermost
    /// dimension is 3
    pub fn pixel_rows(&self) -> Option<Rows<'_, [T; 3]>> {
        if self.rank != 3 || self.dims[2] != 3 {
            return None;
        }
        let pixels = bytemuck::try_cast_slice(&self.data).ok()?;
        Some(Rows::new(pixels, self.dims[1]))
    }

    pub fn pixel_rows_mut(&mut self) -> Option<RowsMut<'_, [T; 3]>> {
        if self.rank != 3 || self.dims[2] != 3 {
            return None;
        }
        let cols = self.dims[1];
        let pixels = bytemuck::try_cast_slice_mut(&mut self.data).ok()?;
        Some(RowsMut::new(pixels, cols))
    }
}

/// A borrowed row by row view over a flat buffer
#[derive(Copy, Clone, Debug)]
pub struct Rows<'a, T> {
    data: &'a [T],
    cols: usize
}

impl<'a, T> Rows<'a, T> {
    pub(crate) fn new(data: &'a [T], cols: usize) -> Rows<'a, T> {
        Rows { data, cols }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.data.len() / self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> core::slice::ChunksExact<'a, T> {
        self.data.chunks_exact(self.cols)
    }
}

impl<T> Index<usize> for Rows<'_, T> {
    type Output = [T];

    fn index(&self, row: usize) -> &[T] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }
}

/// A mutable row by row view over a flat buffer
#[derive(Debug)]
pub struct RowsMut<'a, T> {
    data: &'a mut [T],
    cols: usize
}

impl<'a, T> RowsMut<'a, T> {
    pub(crate) fn new(data: &'a mut [T], cols: usize) -> RowsMut<'a, T> {
        RowsMut { data, cols }
    }

    pub fn len(&self) -> usize {
        self.data.len() / self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter_mut(&mut self) -> core::slice::ChunksExactMut<'_, T> {
        self.data.chunks_exact_mut(self.cols)
    }
}

impl<T> Index<usize> for RowsMut<'_, T> {
    type Output = [T];

    fn index(&self, row: usize) -> &[T] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }
}

impl<T> IndexMut<usize> for RowsMut<'_, T> {
    fn index_mut(&mut self, row: usize) -> &mut [T] {
        &mut self.data[row * self.cols..(row + 1) * self.cols]
    }
}
