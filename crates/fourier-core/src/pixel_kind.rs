/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Pixel kinds understood by the library
//!
//! The kind of an image fixes its band count, the element type
//! stored in its buffer and the rank of that buffer.

/// The seven pixel representations an image can carry
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PixelKind {
    /// One bit per pixel stored in a byte, `1` is object and `0` background
    Binary,
    /// 8-bit gray scale
    Gray,
    /// 8-bit red, green and blue, band interleaved
    Rgb,
    /// Signed integer, one band
    Int1,
    /// Signed integer, three bands
    Int3,
    /// Double precision, one band
    Double1,
    /// Double precision, three bands
    Double3
}

impl PixelKind {
    /// Number of bands a pixel of this kind has
    ///
    /// ```
    /// use fourier_core::pixel_kind::PixelKind;
    /// assert_eq!(PixelKind::Gray.bands(), 1);
    /// assert_eq!(PixelKind::Double3.bands(), 3);
    /// ```
    pub const fn bands(self) -> usize {
        match self {
            PixelKind::Binary | PixelKind::Gray | PixelKind::Int1 | PixelKind::Double1 => 1,
            PixelKind::Rgb | PixelKind::Int3 | PixelKind::Double3 => 3
        }
    }

    /// Rank of the buffer backing an image of this kind,
    /// 2 for single band kinds and 3 for triple band kinds
    pub const fn rank(self) -> usize {
        match self.bands() {
            1 => 2,
            _ => 3
        }
    }

    /// Size in bytes of a single sample
    pub const fn element_width(self) -> usize {
        match self {
            PixelKind::Binary | PixelKind::Gray | PixelKind::Rgb => core::mem::size_of::<u8>(),
            PixelKind::Int1 | PixelKind::Int3 => core::mem::size_of::<i32>(),
            PixelKind::Double1 | PixelKind::Double3 => core::mem::size_of::<f64>()
        }
    }

    /// The fixed maximum pixel value of a kind.
    ///
    /// 255 for byte kinds, the largest `i32` otherwise.
    pub const fn max_pixel_value(self) -> i32 {
        if self.is_byte() {
            255
        } else {
            i32::MAX
        }
    }

    pub const fn is_byte(self) -> bool {
        matches!(self, PixelKind::Binary | PixelKind::Gray | PixelKind::Rgb)
    }

    pub const fn is_integer(self) -> bool {
        matches!(self, PixelKind::Int1 | PixelKind::Int3)
    }

    pub const fn is_double(self) -> bool {
        matches!(self, PixelKind::Double1 | PixelKind::Double3)
    }

    /// The single band kind with the same element type
    pub const fn single_band(self) -> PixelKind {
        match self {
            PixelKind::Rgb => PixelKind::Gray,
            PixelKind::Int3 => PixelKind::Int1,
            PixelKind::Double3 => PixelKind::Double1,
            kind => kind
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PixelKind::Binary => "binary",
            PixelKind::Gray => "gray",
            PixelKind::Rgb => "rgb",
            PixelKind::Int1 => "int-1b",
            PixelKind::Int3 => "int-3b",
            PixelKind::Double1 => "double-1b",
            PixelKind::Double3 => "double-3b"
        }
    }
}
