/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Whole image operations
//!
//! Every operation here leaves its input untouched and returns a newly
//! allocated image, the only exception being comparisons which return
//! booleans.
use fourier_core::log::trace;
use fourier_core::pixel_kind::PixelKind;

use crate::errors::ImageErrors;
use crate::image::Image;

/// Rec. 601 luma weights
const LUMA_WEIGHTS: [f64; 3] = [0.29893602129378, 0.58704307445112, 0.11402090425510];

/// Number of distinct 24 bit colors, one bit each
const COLOR_SET_WORDS: usize = (1 << 24) / 64;

impl Image {
    fn require(
        &self, operation: &str, accepted: &str, predicate: fn(&Image) -> bool
    ) -> Result<PixelKind, ImageErrors> {
        let kind = self.kind()?;

        if !predicate(self) {
            let msg = format!("{operation}: expected {accepted} image, found {}", kind.name());
            return Err(ImageErrors::InvalidObject(msg));
        }
        Ok(kind)
    }

    /// Convert a byte image to a double image of the same band count
    ///
    /// Samples are copied unchanged.
    pub fn byte_to_double(&self) -> Result<Image, ImageErrors> {
        let kind = self.require("byte_to_double", "a byte", Image::is_byte)?;

        let out_kind = if kind.bands() == 1 {
            PixelKind::Double1
        } else {
            PixelKind::Double3
        };
        let mut out = Image::allocate(out_kind, self.rows, self.cols)?;

        out.flat_mut::<f64>()?
            .iter_mut()
            .zip(self.flat::<u8>()?)
            .for_each(|(out, inp)| *out = f64::from(*inp));

        Ok(out)
    }

    /// Convert a double image to a gray or rgb image
    ///
    /// Samples are rounded half away from zero and clamped to `[0, 255]`.
    pub fn double_to_byte(&self) -> Result<Image, ImageErrors> {
        let kind = self.require("double_to_byte", "a double", Image::is_double)?;

        let out_kind = if kind.bands() == 1 {
            PixelKind::Gray
        } else {
            PixelKind::Rgb
        };
        let mut out = Image::allocate(out_kind, self.rows, self.cols)?;

        out.flat_mut::<u8>()?
            .iter_mut()
            .zip(self.flat::<f64>()?)
            .for_each(|(out, inp)| *out = clamp_byte(*inp));

        Ok(out)
    }

    /// Negate a byte image
    ///
    /// Each sample becomes `max - sample` where max is 1 for binary images
    /// and 255 otherwise.
    pub fn negate(&self) -> Result<Image, ImageErrors> {
        let kind = self.require("negate", "a byte", Image::is_byte)?;

        let max_value: u8 = if kind == PixelKind::Binary { 1 } else { 255 };
        let mut out = Image::allocate(kind, self.rows, self.cols)?;

        out.flat_mut::<u8>()?
            .iter_mut()
            .zip(self.flat::<u8>()?)
            .for_each(|(out, inp)| *out = max_value.wrapping_sub(*inp));

        Ok(out)
    }

    /// Convert an rgb image to a gray image using Rec. 601 luma
    pub fn rgb_to_gray(&self) -> Result<Image, ImageErrors> {
        self.require("rgb_to_gray", "an rgb", Image::is_rgb)?;

        let mut out = Image::allocate(PixelKind::Gray, self.rows, self.cols)?;

        out.flat_mut::<u8>()?
            .iter_mut()
            .zip(self.flat::<u8>()?.chunks_exact(3))
            .for_each(|(out, pix)| {
                let luma = LUMA_WEIGHTS
                    .iter()
                    .zip(pix)
                    .map(|(w, c)| w * f64::from(*c))
                    .sum::<f64>();
                // truncation
                *out = luma as u8;
            });

        Ok(out)
    }

    /// Count the distinct colors of an rgb image
    pub fn count_colors(&self) -> Result<usize, ImageErrors> {
        self.require("count_colors", "an rgb", Image::is_rgb)?;

        let mut seen: Vec<u64> = Vec::new();
        seen.try_reserve_exact(COLOR_SET_WORDS)
            .map_err(|_| ImageErrors::OutOfMemory(COLOR_SET_WORDS * 8))?;
        seen.resize(COLOR_SET_WORDS, 0);

        for pix in self.flat::<u8>()?.chunks_exact(3) {
            let packed = (usize::from(pix[0]) << 16) | (usize::from(pix[1]) << 8) | usize::from(pix[2]);
            seen[packed >> 6] |= 1_u64 << (packed & 63);
        }
        let count = seen.iter().map(|word| word.count_ones() as usize).sum();

        trace!("Image has {count} distinct colors");

        Ok(count)
    }

    /// Split an rgb image into its red, green and blue bands
    pub fn split_rgb_bands(&self) -> Result<[Image; 3], ImageErrors> {
        self.require("split_rgb_bands", "an rgb", Image::is_rgb)?;

        let mut red = Image::allocate(PixelKind::Gray, self.rows, self.cols)?;
        let mut green = Image::allocate(PixelKind::Gray, self.rows, self.cols)?;
        let mut blue = Image::allocate(PixelKind::Gray, self.rows, self.cols)?;

        let pixels = self.flat::<u8>()?.chunks_exact(3);

        for (((pix, r), g), b) in pixels
            .zip(red.flat_mut::<u8>()?.iter_mut())
            .zip(green.flat_mut::<u8>()?.iter_mut())
            .zip(blue.flat_mut::<u8>()?.iter_mut())
        {
            *r = pix[0];
            *g = pix[1];
            *b = pix[2];
        }

        Ok([red, green, blue])
    }

    /// Combine three gray images into an rgb image
    pub fn combine_rgb_bands(red: &Image, green: &Image, blue: &Image) -> Result<Image, ImageErrors> {
        for band in [red, green, blue] {
            band.require("combine_rgb_bands", "a gray", Image::is_gray)?;
        }
        if !red.dims_agree(green)? || !green.dims_agree(blue)? {
            return Err(ImageErrors::InvalidArgument(
                "combine_rgb_bands: dimensions of the band images must agree".to_string()
            ));
        }
        let mut out = Image::allocate(PixelKind::Rgb, red.rows, red.cols)?;

        let bands = red
            .flat::<u8>()?
            .iter()
            .zip(green.flat::<u8>()?)
            .zip(blue.flat::<u8>()?);

        for (pix, ((r, g), b)) in out.flat_mut::<u8>()?.chunks_exact_mut(3).zip(bands) {
            pix.copy_from_slice(&[*r, *g, *b]);
        }

        Ok(out)
    }

    /// Remove `border` pixels from every side of the image
    ///
    /// # Errors
    /// `InvalidArgument` if nothing would remain
    pub fn crop(&self, border: usize) -> Result<Image, ImageErrors> {
        let kind = self.kind()?;

        let rows = self.rows.saturating_sub(border.saturating_mul(2));
        let cols = self.cols.saturating_sub(border.saturating_mul(2));

        if rows == 0 || cols == 0 {
            let msg = format!(
                "crop: border {border} leaves nothing of a {}x{} image",
                self.cols, self.rows
            );
            return Err(ImageErrors::InvalidArgument(msg));
        }
        let mut out = Image::allocate(kind, rows, cols)?;

        let pixel_bytes = kind.bands() * kind.element_width();
        let in_stride = self.cols * pixel_bytes;
        let out_stride = cols * pixel_bytes;

        let input = self.as_bytes()?;

        for (row, out_row) in out
            .data_mut()?
            .as_bytes_mut()
            .chunks_exact_mut(out_stride)
            .enumerate()
        {
            let start = (row + border) * in_stride + border * pixel_bytes;
            out_row.copy_from_slice(&input[start..start + out_stride]);
        }
        out.max_pixel_value = self.max_pixel_value;

        Ok(out)
    }

    /// Return true if both images have the same rows and columns
    pub fn dims_agree(&self, other: &Image) -> Result<bool, ImageErrors> {
        Ok(self.dimensions()? == other.dimensions()?)
    }

    /// Return true if both images have the same kind
    pub fn types_agree(&self, other: &Image) -> Result<bool, ImageErrors> {
        Ok(self.kind()? == other.kind()?)
    }

    /// Return true if two byte images hold identical pixels
    ///
    /// # Errors
    /// - `InvalidArgument` if the dimensions or kinds disagree
    /// - `InvalidObject` if the images are not byte images
    pub fn is_equal(&self, other: &Image) -> Result<bool, ImageErrors> {
        if !self.dims_agree(other)? {
            return Err(ImageErrors::InvalidArgument(
                "is_equal: image dimensions must agree".to_string()
            ));
        }
        if !self.types_agree(other)? {
            return Err(ImageErrors::InvalidArgument(
                "is_equal: image types must agree".to_string()
            ));
        }
        self.require("is_equal", "a byte", Image::is_byte)?;

        Ok(self.flat::<u8>()? == other.flat::<u8>()?)
    }
}

/// Round half away from zero then clamp to a byte
#[inline]
fn clamp_byte(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
