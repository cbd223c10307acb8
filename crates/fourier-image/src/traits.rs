/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Traits shared by decoders, encoders and pixel samples
use fourier_core::bytestream::ByteWriterTrait;
use fourier_core::log::trace;
use fourier_core::pixel_kind::PixelKind;

use crate::buffer::NdBuffer;
use crate::codecs::ImageFormat;
use crate::errors::ImageErrors;
use crate::image::{Image, PixelData};

/// A sample type that can back an image
///
/// Implemented for `u8` (binary, gray and rgb),
/// `i32` (integer kinds) and `f64` (double kinds)
pub trait Sample: bytemuck::Pod + PartialEq + core::fmt::Debug {
    /// Name used in diagnostics
    const NAME: &'static str;

    /// Return the buffer if `data` stores samples of this type
    fn buffer(data: &PixelData) -> Option<&NdBuffer<Self>>;

    fn buffer_mut(data: &mut PixelData) -> Option<&mut NdBuffer<Self>>;
}

impl Sample for u8 {
    const NAME: &'static str = "u8";

    fn buffer(data: &PixelData) -> Option<&NdBuffer<Self>> {
        match data {
            PixelData::Binary(buf) | PixelData::Gray(buf) | PixelData::Rgb(buf) => Some(buf),
            _ => None
        }
    }

    fn buffer_mut(data: &mut PixelData) -> Option<&mut NdBuffer<Self>> {
        match data {
            PixelData::Binary(buf) | PixelData::Gray(buf) | PixelData::Rgb(buf) => Some(buf),
            _ => None
        }
    }
}

impl Sample for i32 {
    const NAME: &'static str = "i32";

    fn buffer(data: &PixelData) -> Option<&NdBuffer<Self>> {
        match data {
            PixelData::Int1(buf) | PixelData::Int3(buf) => Some(buf),
            _ => None
        }
    }

    fn buffer_mut(data: &mut PixelData) -> Option<&mut NdBuffer<Self>> {
        match data {
            PixelData::Int1(buf) | PixelData::Int3(buf) => Some(buf),
            _ => None
        }
    }
}

impl Sample for f64 {
    const NAME: &'static str = "f64";

    fn buffer(data: &PixelData) -> Option<&NdBuffer<Self>> {
        match data {
            PixelData::Double1(buf) | PixelData::Double3(buf) => Some(buf),
            _ => None
        }
    }

    fn buffer_mut(data: &mut PixelData) -> Option<&mut NdBuffer<Self>> {
        match data {
            PixelData::Double1(buf) | PixelData::Double3(buf) => Some(buf),
            _ => None
        }
    }
}

/// Encapsulates an image decoder.
///
/// All supported image decoders must implement this class
pub trait DecoderTrait {
    /// Decode a buffer already in memory
    ///
    /// The buffer should be passed during the decoder's creation
    ///
    /// # Returns
    /// - `Ok(Image)`: the decoded image
    /// - `Err(ImageErrors)`: The error encountered during decoding
    fn decode(&mut self) -> Result<Image, ImageErrors>;

    /// Read image headers without decoding pixels
    fn read_headers(&mut self) -> Result<(), ImageErrors>;

    /// Get width and height of the image
    ///
    /// # Returns
    /// - Some(width,height)
    /// - None -> If image hasn't been decoded and we can't extract
    ///  the width and height.
    fn dimensions(&self) -> Option<(usize, usize)>;

    /// Kind of the image the decoder returns
    fn out_kind(&self) -> Option<PixelKind>;

    /// Get the name of the decoder
    fn name(&self) -> &'static str;
}

/// Encapsulates an image encoder
///
/// Implementors provide [`encode_inner`](EncoderTrait::encode_inner), callers
/// use [`encode`](EncoderTrait::encode) which validates the image first.
pub trait EncoderTrait {
    /// Get the name of the encoder
    fn name(&self) -> &'static str;

    /// The format this encoder writes
    fn format(&self) -> ImageFormat;

    /// Pixel kinds the encoder can store
    fn supported_kinds(&self) -> &'static [PixelKind];

    /// Encode a validated image into `sink`
    ///
    /// Returns the number of bytes written
    fn encode_inner<T: ByteWriterTrait>(
        &mut self, image: &Image, sink: T
    ) -> Result<usize, ImageErrors>;

    /// Encode an image into `sink`
    ///
    /// Checks run in order, the first failure is returned
    /// - the image is valid, else `InvalidObject`
    /// - the image stores bytes, else `InvalidObject`
    /// - the encoder supports the kind, else `InvalidArgument`
    /// - the maximum pixel value fits a byte, else `InvalidPixelDepth`
    fn encode<T: ByteWriterTrait>(&mut self, image: &Image, sink: T) -> Result<usize, ImageErrors>
    where
        Self: Sized
    {
        if !image.is_valid() {
            return Err(ImageErrors::InvalidObject(format!(
                "{}: image is not valid",
                self.name()
            )));
        }
        let kind = image.kind()?;

        if !kind.is_byte() {
            let msg = format!("{}: cannot store {} images", self.name(), kind.name());
            return Err(ImageErrors::InvalidObject(msg));
        }
        if !self.supported_kinds().contains(&kind) {
            let msg = format!(
                "{}: {} images are not supported, expected one of {:?}",
                self.name(),
                kind.name(),
                self.supported_kinds()
            );
            return Err(ImageErrors::InvalidArgument(msg));
        }
        let max_value = image.max_pixel_value()?;

        if max_value > 255 {
            let msg = format!("{}: maximum pixel value {max_value} exceeds 255", self.name());
            return Err(ImageErrors::InvalidPixelDepth(msg));
        }
        trace!("Encoding {} image with {}", kind.name(), self.name());

        self.encode_inner(image, sink)
    }
}
