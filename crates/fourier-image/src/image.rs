/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! This module represents a single image
//!
//! An image is a tagged pixel buffer
//!
//! - of one of seven [`PixelKind`]s
//!     - stored in a single [`NdBuffer`] of rank 2 (one band) or 3 (three bands)
//!         - with a fixed number of rows and columns
//!
//! The buffer is owned by exactly one image, images never share storage.
//! Once [freed](Image::free) every accessor reports the image as invalid.
use fourier_core::pixel_kind::PixelKind;

use crate::buffer::{NdBuffer, Rows, RowsMut};
use crate::errors::ImageErrors;
use crate::traits::Sample;

/// The pixel storage of an image, one variant per pixel kind
#[derive(Clone, Debug, PartialEq)]
pub enum PixelData {
    Binary(NdBuffer<u8>),
    Gray(NdBuffer<u8>),
    Rgb(NdBuffer<u8>),
    Int1(NdBuffer<i32>),
    Int3(NdBuffer<i32>),
    Double1(NdBuffer<f64>),
    Double3(NdBuffer<f64>)
}

/// Evaluate `$body` with `$buf` bound to the buffer of any variant
macro_rules! with_buffer {
    ($data:expr, $buf:ident => $body:expr) => {
        match $data {
            PixelData::Binary($buf) | PixelData::Gray($buf) | PixelData::Rgb($buf) => $body,
            PixelData::Int1($buf) | PixelData::Int3($buf) => $body,
            PixelData::Double1($buf) | PixelData::Double3($buf) => $body
        }
    };
}

impl PixelData {
    /// Allocate zeroed storage for a `rows` x `cols` image of `kind`
    pub fn new(kind: PixelKind, rows: usize, cols: usize) -> Result<PixelData, ImageErrors> {
        let one = [rows, cols];
        let three = [rows, cols, 3];

        let data = match kind {
            PixelKind::Binary => PixelData::Binary(NdBuffer::new(&one)?),
            PixelKind::Gray => PixelData::Gray(NdBuffer::new(&one)?),
            PixelKind::Rgb => PixelData::Rgb(NdBuffer::new(&three)?),
            PixelKind::Int1 => PixelData::Int1(NdBuffer::new(&one)?),
            PixelKind::Int3 => PixelData::Int3(NdBuffer::new(&three)?),
            PixelKind::Double1 => PixelData::Double1(NdBuffer::new(&one)?),
            PixelKind::Double3 => PixelData::Double3(NdBuffer::new(&three)?)
        };
        Ok(data)
    }

    pub const fn kind(&self) -> PixelKind {
        match self {
            PixelData::Binary(_) => PixelKind::Binary,
            PixelData::Gray(_) => PixelKind::Gray,
            PixelData::Rgb(_) => PixelKind::Rgb,
            PixelData::Int1(_) => PixelKind::Int1,
            PixelData::Int3(_) => PixelKind::Int3,
            PixelData::Double1(_) => PixelKind::Double1,
            PixelData::Double3(_) => PixelKind::Double3
        }
    }

    /// Dimensions of the underlying buffer
    pub fn dims(&self) -> &[usize] {
        with_buffer!(self, buf => buf.dims())
    }

    /// Release the buffer returning the rank released
    pub fn free(self) -> usize {
        with_buffer!(self, buf => buf.free())
    }

    pub fn as_bytes(&self) -> &[u8] {
        with_buffer!(self, buf => buf.as_bytes())
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        with_buffer!(self, buf => buf.as_bytes_mut())
    }
}

/// Summary of an image
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub kind:            PixelKind,
    pub rows:            usize,
    pub cols:            usize,
    pub bands:           usize,
    pub max_pixel_value: i32,
    pub num_components:  Option<usize>
}

/// Represents a single image
#[derive(Debug)]
pub struct Image {
    data:                       Option<PixelData>,
    pub(crate) rows:            usize,
    pub(crate) cols:            usize,
    pub(crate) max_pixel_value: i32,
    pub(crate) num_cc:          Option<usize>
}

impl Image {
    /// Allocate a zeroed image of `kind`
    ///
    /// # Errors
    /// - `InvalidArgument` if `rows` or `cols` is zero
    /// - `OutOfMemory` if the pixels cannot be allocated
    ///
    /// # Example
    /// ```
    /// use fourier_core::pixel_kind::PixelKind;
    /// use fourier_image::image::Image;
    ///
    /// let image = Image::allocate(PixelKind::Rgb, 4, 6).unwrap();
    /// assert_eq!(image.bands().unwrap(), 3);
    /// assert_eq!(image.dimensions().unwrap(), (6, 4));
    /// ```
    pub fn allocate(kind: PixelKind, rows: usize, cols: usize) -> Result<Image, ImageErrors> {
        if rows == 0 || cols == 0 {
            let msg = format!("Image dimensions must be positive, found {rows} rows and {cols} cols");
            return Err(ImageErrors::InvalidArgument(msg));
        }
        Image::from_data(PixelData::new(kind, rows, cols)?)
    }

    /// Allocate an image of `kind` with every sample set to `value`
    ///
    /// Byte kinds accept `[0, 255]`, integer kinds the `i32` range and
    /// double kinds any finite value. Fractions are truncated for
    /// byte and integer kinds.
    pub fn allocate_const(
        kind: PixelKind, rows: usize, cols: usize, value: f64
    ) -> Result<Image, ImageErrors> {
        let in_range = if kind.is_byte() {
            (0.0..=255.0).contains(&value)
        } else if kind.is_integer() {
            (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&value)
        } else {
            value.is_finite()
        };

        if !in_range {
            let msg = format!("Value {value} is out of range for a {} image", kind.name());
            return Err(ImageErrors::InvalidArgument(msg));
        }

        let mut image = Image::allocate(kind, rows, cols)?;

        match image.data_mut()? {
            PixelData::Binary(buf) | PixelData::Gray(buf) | PixelData::Rgb(buf) => {
                buf.as_mut_slice().fill(value as u8)
            }
            PixelData::Int1(buf) | PixelData::Int3(buf) => buf.as_mut_slice().fill(value as i32),
            PixelData::Double1(buf) | PixelData::Double3(buf) => buf.as_mut_slice().fill(value)
        }
        Ok(image)
    }

    /// Wrap existing storage in an image
    ///
    /// Rows and columns are taken from the buffer dimensions.
    ///
    /// # Errors
    /// `InvalidArgument` if the buffer is not `[rows, cols]` for single
    /// band kinds or `[rows, cols, 3]` for triple band kinds
    pub fn from_data(data: PixelData) -> Result<Image, ImageErrors> {
        let kind = data.kind();
        let (rows, cols) = match (kind.bands(), data.dims()) {
            (1, &[rows, cols]) | (3, &[rows, cols, 3]) if rows > 0 && cols > 0 => (rows, cols),
            (_, dims) => {
                let msg = format!("Buffer of dimensions {dims:?} cannot back a {} image", kind.name());
                return Err(ImageErrors::InvalidArgument(msg));
            }
        };

        Ok(Image {
            data: Some(data),
            rows,
            cols,
            max_pixel_value: kind.max_pixel_value(),
            num_cc: None
        })
    }

    /// Release the pixels and reset every field to an invalid value
    ///
    /// # Errors
    /// `InvalidObject` if the image was already freed
    pub fn free(&mut self) -> Result<(), ImageErrors> {
        let data = self
            .data
            .take()
            .ok_or_else(|| ImageErrors::InvalidObject("free: image already freed".to_string()))?;

        let expected = data.kind().rank();
        let released = data.free();

        self.rows = 0;
        self.cols = 0;
        self.max_pixel_value = i32::MIN;
        self.num_cc = None;

        if released != expected {
            let msg = format!("free: released rank {released} but kind needs rank {expected}");
            return Err(ImageErrors::InvariantViolation(msg));
        }
        Ok(())
    }

    /// Create a deep copy of this image
    pub fn try_clone(&self) -> Result<Image, ImageErrors> {
        let kind = self.kind()?;
        let mut clone = Image::allocate(kind, self.rows, self.cols)?;

        clone
            .data_mut()?
            .as_bytes_mut()
            .copy_from_slice(self.data()?.as_bytes());

        clone.max_pixel_value = self.max_pixel_value;
        clone.num_cc = self.num_cc;

        Ok(clone)
    }

    /// Return true if the image has not been freed
    pub const fn is_valid(&self) -> bool {
        self.data.is_some()
    }

    fn invalid(operation: &str) -> ImageErrors {
        ImageErrors::InvalidObject(format!("{operation}: image is not valid"))
    }

    /// Return a reference to the pixel storage
    pub fn data(&self) -> Result<&PixelData, ImageErrors> {
        self.data.as_ref().ok_or_else(|| Image::invalid("data"))
    }

    /// Return a mutable reference to the pixel storage
    pub fn data_mut(&mut self) -> Result<&mut PixelData, ImageErrors> {
        self.data.as_mut().ok_or_else(|| Image::invalid("data_mut"))
    }

    pub fn kind(&self) -> Result<PixelKind, ImageErrors> {
        self.data
            .as_ref()
            .map(PixelData::kind)
            .ok_or_else(|| Image::invalid("kind"))
    }

    pub fn rows(&self) -> Result<usize, ImageErrors> {
        self.data().map(|_| self.rows)
    }

    pub fn cols(&self) -> Result<usize, ImageErrors> {
        self.data().map(|_| self.cols)
    }

    /// Number of bands, 1 or 3
    pub fn bands(&self) -> Result<usize, ImageErrors> {
        self.kind().map(PixelKind::bands)
    }

    /// Get image dimensions as a tuple of (width, height)
    pub fn dimensions(&self) -> Result<(usize, usize), ImageErrors> {
        self.data().map(|_| (self.cols, self.rows))
    }

    pub fn max_pixel_value(&self) -> Result<i32, ImageErrors> {
        self.data().map(|_| self.max_pixel_value)
    }

    /// Size in bytes of a single sample
    pub fn element_width(&self) -> Result<usize, ImageErrors> {
        self.kind().map(PixelKind::element_width)
    }

    /// Number of connected components of a label image
    ///
    /// # Errors
    /// `NotALabelImage` if the count was never set
    pub fn num_components(&self) -> Result<usize, ImageErrors> {
        self.data()?;
        self.num_cc.ok_or(ImageErrors::NotALabelImage)
    }

    /// Turn a single band integer image into a label image with `count` components
    pub fn set_num_components(&mut self, count: usize) -> Result<(), ImageErrors> {
        let kind = self.kind()?;

        if kind != PixelKind::Int1 {
            let msg = format!("Only int-1b images can be label images, found {}", kind.name());
            return Err(ImageErrors::InvalidArgument(msg));
        }
        if count == 0 {
            return Err(ImageErrors::InvalidArgument(
                "Component count must be positive".to_string()
            ));
        }
        self.num_cc = Some(count);
        Ok(())
    }

    fn kind_is(&self, predicate: impl Fn(PixelKind) -> bool) -> bool {
        self.kind().is_ok_and(predicate)
    }

    pub fn is_binary(&self) -> bool {
        self.kind_is(|kind| kind == PixelKind::Binary)
    }

    pub fn is_gray(&self) -> bool {
        self.kind_is(|kind| kind == PixelKind::Gray)
    }

    pub fn is_rgb(&self) -> bool {
        self.kind_is(|kind| kind == PixelKind::Rgb)
    }

    /// Binary, gray or rgb
    pub fn is_byte(&self) -> bool {
        self.kind_is(PixelKind::is_byte)
    }

    pub fn is_integer(&self) -> bool {
        self.kind_is(PixelKind::is_integer)
    }

    pub fn is_double(&self) -> bool {
        self.kind_is(PixelKind::is_double)
    }

    pub fn is_double_3b(&self) -> bool {
        self.kind_is(|kind| kind == PixelKind::Double3)
    }

    /// A single band integer image with a component count
    pub fn is_label(&self) -> bool {
        self.kind_is(|kind| kind == PixelKind::Int1) && self.num_cc.is_some()
    }

    pub fn is_binary_or_label(&self) -> bool {
        self.is_binary() || self.is_label()
    }

    pub fn is_binary_or_gray(&self) -> bool {
        self.is_binary() || self.is_gray()
    }

    /// The raw bytes of the pixels
    pub fn as_bytes(&self) -> Result<&[u8], ImageErrors> {
        self.data().map(PixelData::as_bytes)
    }

    fn buffer<T: Sample>(&self, operation: &str) -> Result<&NdBuffer<T>, ImageErrors> {
        let data = self.data.as_ref().ok_or_else(|| Image::invalid(operation))?;

        T::buffer(data).ok_or_else(|| {
            let msg = format!(
                "{operation}: {} samples requested from a {} image",
                T::NAME,
                data.kind().name()
            );
            ImageErrors::InvalidArgument(msg)
        })
    }

    fn buffer_mut<T: Sample>(&mut self, operation: &str) -> Result<&mut NdBuffer<T>, ImageErrors> {
        let data = self.data.as_mut().ok_or_else(|| Image::invalid(operation))?;
        let kind = data.kind();

        T::buffer_mut(data).ok_or_else(|| {
            let msg = format!(
                "{operation}: {} samples requested from a {} image",
                T::NAME,
                kind.name()
            );
            ImageErrors::InvalidArgument(msg)
        })
    }

    /// The flat view over all samples, band interleaved for three band kinds
    ///
    /// `T` must match the sample type of the kind, `u8` for byte kinds,
    /// `i32` for integer kinds and `f64` for double kinds.
    pub fn flat<T: Sample>(&self) -> Result<&[T], ImageErrors> {
        self.buffer::<T>("flat").map(NdBuffer::as_slice)
    }

    pub fn flat_mut<T: Sample>(&mut self) -> Result<&mut [T], ImageErrors> {
        self.buffer_mut::<T>("flat_mut").map(NdBuffer::as_mut_slice)
    }

    /// A nested view `view[row][col]` of a single band image
    pub fn nested_1b<T: Sample>(&self) -> Result<Rows<'_, T>, ImageErrors> {
        self.buffer::<T>("nested_1b")?
            .rows()
            .ok_or_else(|| ImageErrors::InvalidArgument("nested_1b: image has three bands".into()))
    }

    pub fn nested_1b_mut<T: Sample>(&mut self) -> Result<RowsMut<'_, T>, ImageErrors> {
        self.buffer_mut::<T>("nested_1b_mut")?
            .rows_mut()
            .ok_or_else(|| {
                ImageErrors::InvalidArgument("nested_1b_mut: image has three bands".into())
            })
    }

    /// A nested view `view[row][col][band]` of a three band image
    pub fn nested_3b<T: Sample>(&self) -> Result<Rows<'_, [T; 3]>, ImageErrors> {
        self.buffer::<T>("nested_3b")?
            .pixel_rows()
            .ok_or_else(|| ImageErrors::InvalidArgument("nested_3b: image has one band".into()))
    }

    pub fn nested_3b_mut<T: Sample>(&mut self) -> Result<RowsMut<'_, [T; 3]>, ImageErrors> {
        self.buffer_mut::<T>("nested_3b_mut")?
            .pixel_rows_mut()
            .ok_or_else(|| ImageErrors::InvalidArgument("nested_3b_mut: image has one band".into()))
    }

    /// Return a summary of the image
    pub fn info(&self) -> Result<ImageInfo, ImageErrors> {
        let kind = self.kind()?;

        Ok(ImageInfo {
            kind,
            rows: self.rows,
            cols: self.cols,
            bands: kind.bands(),
            max_pixel_value: self.max_pixel_value,
            num_components: self.num_cc
        })
    }
}

#[cfg(test)]
mod tests {
    use fourier_core::pixel_kind::PixelKind;
    use fourier_core::status::StatusCode;

    use crate::buffer::NdBuffer;
    use crate::errors::ImageErrors;
    use crate::image::{Image, PixelData};

    const ALL: [PixelKind; 7] = [
        PixelKind::Binary,
        PixelKind::Gray,
        PixelKind::Rgb,
        PixelKind::Int1,
        PixelKind::Int3,
        PixelKind::Double1,
        PixelKind::Double3
    ];

    #[test]
    fn from_data_checks_buffer_shape() {
        let flat = PixelData::Rgb(NdBuffer::new(&[5]).unwrap());
        let err = Image::from_data(flat).unwrap_err();
        assert_eq!(err.code(), StatusCode::InvalidArgument);

        let cube = PixelData::Gray(NdBuffer::new(&[2, 3, 3]).unwrap());
        assert!(Image::from_data(cube).is_err());

        let four_bands = PixelData::Double3(NdBuffer::new(&[2, 3, 4]).unwrap());
        assert!(Image::from_data(four_bands).is_err());

        let rgb = PixelData::Rgb(NdBuffer::new(&[2, 3, 3]).unwrap());
        let image = Image::from_data(rgb).unwrap();
        assert_eq!(image.dimensions().unwrap(), (3, 2));
        assert_eq!(image.try_clone().unwrap().as_bytes().unwrap().len(), 18);
    }

    #[test]
    fn band_count_follows_kind() {
        for kind in ALL {
            let image = Image::allocate(kind, 3, 5).unwrap();
            let expected = match kind {
                PixelKind::Rgb | PixelKind::Int3 | PixelKind::Double3 => 3,
                _ => 1
            };
            assert_eq!(image.bands().unwrap(), expected, "{kind:?}");
            assert_eq!(image.data().unwrap().dims().len(), kind.rank());
            assert_eq!(image.as_bytes().unwrap().len(), 3 * 5 * expected * kind.element_width());
        }
    }

    #[test]
    fn freed_image_is_invalid() {
        for kind in ALL {
            let mut image = Image::allocate(kind, 2, 2).unwrap();
            assert!(image.is_valid());

            image.free().unwrap();
            assert!(!image.is_valid());
            assert!(!image.is_byte() && !image.is_double() && !image.is_integer());

            let err = image.rows().unwrap_err();
            assert_eq!(err.code(), StatusCode::InvalidObject);
            assert!(image.flat::<u8>().is_err());

            // a second free is caught by the validity check
            assert_eq!(image.free().unwrap_err().code(), StatusCode::InvalidObject);
        }
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let err = Image::allocate(PixelKind::Gray, 0, 4).unwrap_err();
        assert!(matches!(err, ImageErrors::InvalidArgument(_)));
    }

    #[test]
    fn const_values_are_range_checked() {
        assert!(Image::allocate_const(PixelKind::Gray, 1, 1, 256.0).is_err());
        assert!(Image::allocate_const(PixelKind::Gray, 1, 1, -1.0).is_err());
        assert!(Image::allocate_const(PixelKind::Int1, 1, 1, 3e10).is_err());
        assert!(Image::allocate_const(PixelKind::Double3, 1, 1, f64::NAN).is_err());

        let image = Image::allocate_const(PixelKind::Int3, 2, 2, -40.0).unwrap();
        assert!(image.flat::<i32>().unwrap().iter().all(|x| *x == -40));

        let image = Image::allocate_const(PixelKind::Double1, 2, 2, 1e300).unwrap();
        assert!(image.flat::<f64>().unwrap().iter().all(|x| *x == 1e300));
    }

    #[test]
    fn views_alias_flat_storage() {
        let mut image = Image::allocate(PixelKind::Gray, 3, 4).unwrap();
        image.nested_1b_mut::<u8>().unwrap()[2][3] = 77;
        assert_eq!(image.flat::<u8>().unwrap()[2 * 4 + 3], 77);

        let mut image = Image::allocate(PixelKind::Double3, 2, 3).unwrap();
        image.flat_mut::<f64>().unwrap()[(1 * 3 + 2) * 3 + 1] = 0.5;
        assert_eq!(image.nested_3b::<f64>().unwrap()[1][2][1], 0.5);
    }

    #[test]
    fn wrong_sample_type() {
        let image = Image::allocate(PixelKind::Int1, 2, 2).unwrap();

        assert!(image.flat::<u8>().is_err());
        assert!(image.nested_3b::<i32>().is_err());
        assert!(image.nested_1b::<i32>().is_ok());
    }

    #[test]
    fn clone_is_deep() {
        let mut image = Image::allocate_const(PixelKind::Rgb, 2, 2, 9.0).unwrap();
        let clone = image.try_clone().unwrap();

        image.flat_mut::<u8>().unwrap()[0] = 1;

        assert_eq!(clone.flat::<u8>().unwrap(), &[9; 12]);
        assert_eq!(clone.info().unwrap(), image.info().unwrap());
    }

    #[test]
    fn label_images() {
        let mut image = Image::allocate(PixelKind::Int1, 2, 2).unwrap();

        assert!(!image.is_label());
        assert!(matches!(image.num_components(), Err(ImageErrors::NotALabelImage)));

        image.set_num_components(4).unwrap();
        assert!(image.is_label() && image.is_binary_or_label());
        assert_eq!(image.num_components().unwrap(), 4);

        let mut gray = Image::allocate(PixelKind::Gray, 2, 2).unwrap();
        assert!(gray.set_num_components(4).is_err());
        assert!(gray.is_binary_or_gray());
    }

    #[test]
    fn max_pixel_value_per_kind() {
        assert_eq!(Image::allocate(PixelKind::Binary, 1, 1).unwrap().max_pixel_value().unwrap(), 255);
        assert_eq!(Image::allocate(PixelKind::Int3, 1, 1).unwrap().max_pixel_value().unwrap(), i32::MAX);
    }
}
