/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Raw PBM, PGM and PPM support
//!
//! | Format | Image kind |
//! |--------|------------|
//! | P4     | binary     |
//! | P5     | gray       |
//! | P6     | rgb        |
use fourier_core::bytestream::{ByteIoTrait, ByteWriterTrait};
use fourier_core::log::debug;
use fourier_core::options::DecoderOptions;
use fourier_core::pixel_kind::PixelKind;
pub use fourier_pnm::{PnmDecodeErrors, PnmDecoder, PnmEncodeErrors, PnmEncoder, PnmVersion};

use crate::codecs::ImageFormat;
use crate::errors::{ImageErrors, ImgEncodeErrors};
use crate::image::Image;
use crate::traits::{DecoderTrait, EncoderTrait};

/// Image kind stored by a PNM variant
pub const fn kind_for(version: PnmVersion) -> PixelKind {
    match version {
        PnmVersion::P4 => PixelKind::Binary,
        PnmVersion::P5 => PixelKind::Gray,
        PnmVersion::P6 => PixelKind::Rgb
    }
}

/// Decodes one raw PNM variant into an [`Image`]
pub struct PnmImageDecoder<T: ByteIoTrait> {
    decoder: PnmDecoder<T>,
    version: PnmVersion
}

impl<T: ByteIoTrait> PnmImageDecoder<T> {
    pub fn new(data: T, version: PnmVersion, options: DecoderOptions) -> PnmImageDecoder<T> {
        PnmImageDecoder {
            decoder: PnmDecoder::new_with_options(options, data),
            version
        }
    }
}

impl<T: ByteIoTrait> DecoderTrait for PnmImageDecoder<T> {
    fn decode(&mut self) -> Result<Image, ImageErrors> {
        self.read_headers()?;

        let (cols, rows) = self
            .decoder
            .get_dimensions()
            .ok_or(ImageErrors::GenericStr("Headers were not decoded"))?;

        let mut image = Image::allocate(kind_for(self.version), rows, cols)?;

        self.decoder.decode_into(image.data_mut()?.as_bytes_mut())?;

        if self.decoder.get_missing_bytes() != 0 {
            debug!("{} bytes of payload were zero filled", self.decoder.get_missing_bytes());
        }
        Ok(image)
    }

    fn read_headers(&mut self) -> Result<(), ImageErrors> {
        self.decoder.read_headers_for(self.version)?;
        Ok(())
    }

    fn dimensions(&self) -> Option<(usize, usize)> {
        self.decoder.get_dimensions()
    }

    fn out_kind(&self) -> Option<PixelKind> {
        Some(kind_for(self.version))
    }

    fn name(&self) -> &'static str {
        "PNM Decoder"
    }
}

/// Encodes binary, gray or rgb images as raw PNM
#[derive(Copy, Clone)]
pub struct PnmImageEncoder {
    version: PnmVersion
}

impl PnmImageEncoder {
    pub fn new(version: PnmVersion) -> PnmImageEncoder {
        PnmImageEncoder { version }
    }
}

impl EncoderTrait for PnmImageEncoder {
    fn name(&self) -> &'static str {
        "PNM Encoder"
    }

    fn format(&self) -> ImageFormat {
        match self.version {
            PnmVersion::P4 => ImageFormat::PBM,
            PnmVersion::P5 => ImageFormat::PGM,
            PnmVersion::P6 => ImageFormat::PPM
        }
    }

    fn supported_kinds(&self) -> &'static [PixelKind] {
        match self.version {
            PnmVersion::P4 => &[PixelKind::Binary],
            PnmVersion::P5 => &[PixelKind::Gray],
            PnmVersion::P6 => &[PixelKind::Rgb]
        }
    }

    fn encode_inner<T: ByteWriterTrait>(
        &mut self, image: &Image, sink: T
    ) -> Result<usize, ImageErrors> {
        let (cols, rows) = image.dimensions()?;
        let data = image.flat::<u8>()?;

        let bytes_written = PnmEncoder::new(data, cols, rows, self.version)
            .set_max_value(i64::from(image.max_pixel_value()?))
            .encode(sink)
            .map_err(<PnmEncodeErrors as Into<ImgEncodeErrors>>::into)?;

        Ok(bytes_written)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use fourier_core::options::DecoderOptions;
    use fourier_core::pixel_kind::PixelKind;
    use fourier_core::status::StatusCode;

    use crate::codecs::pnm::{PnmImageDecoder, PnmImageEncoder, PnmVersion};
    use crate::image::Image;
    use crate::traits::{DecoderTrait, EncoderTrait};

    #[test]
    fn header_is_read_lazily() {
        let mut decoder = PnmImageDecoder::new(
            Cursor::new(b"P6\n2 3\n255\n"),
            PnmVersion::P6,
            DecoderOptions::default()
        );
        assert_eq!(decoder.dimensions(), None);
        decoder.read_headers().unwrap();
        assert_eq!(decoder.dimensions(), Some((2, 3)));
        assert_eq!(decoder.out_kind(), Some(PixelKind::Rgb));
    }

    #[test]
    fn truncated_payload_is_zero_filled() {
        let mut decoder = PnmImageDecoder::new(
            Cursor::new(b"P5\n2 2\n255\n\x09\x08"),
            PnmVersion::P5,
            DecoderOptions::default()
        );
        let image = decoder.decode().unwrap();
        assert_eq!(image.flat::<u8>().unwrap(), &[9, 8, 0, 0]);
    }

    #[test]
    fn wrong_kind_is_rejected() {
        let image = Image::allocate(PixelKind::Gray, 2, 2).unwrap();
        let err = PnmImageEncoder::new(PnmVersion::P6)
            .encode(&image, Vec::<u8>::new())
            .unwrap_err();
        assert_eq!(err.code(), StatusCode::InvalidArgument);

        let image = Image::allocate(PixelKind::Double1, 2, 2).unwrap();
        let err = PnmImageEncoder::new(PnmVersion::P5)
            .encode(&image, Vec::<u8>::new())
            .unwrap_err();
        assert_eq!(err.code(), StatusCode::InvalidObject);
    }

    #[test]
    fn freed_image_is_rejected() {
        let mut image = Image::allocate(PixelKind::Gray, 2, 2).unwrap();
        image.free().unwrap();

        let err = PnmImageEncoder::new(PnmVersion::P5)
            .encode(&image, Vec::<u8>::new())
            .unwrap_err();
        assert_eq!(err.code(), StatusCode::InvalidObject);
    }
}
