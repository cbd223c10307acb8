/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![cfg(feature = "png")]
//! PNG support, delegated to the `png` crate
//!
//! Decoding always produces an rgb image, grayscale is expanded
//! to three bands, alpha is discarded and 16 bit samples are stripped to 8 bits.
//! Only rgb images can be encoded.
use fourier_core::bytestream::{ByteIoTrait, ByteReader, ByteWriter, ByteWriterTrait};
use fourier_core::log::{info, warn};
use fourier_core::options::DecoderOptions;
use fourier_core::pixel_kind::PixelKind;

use crate::codecs::ImageFormat;
use crate::errors::ImageErrors;
use crate::image::Image;
use crate::traits::{DecoderTrait, EncoderTrait};

enum State<T: ByteIoTrait> {
    Start(ByteReader<T>),
    Headers(::png::Reader<ByteReader<T>>),
    Done
}

/// A PNG decoder producing rgb images
pub struct PngDecoder<T: ByteIoTrait> {
    state:      State<T>,
    options:    DecoderOptions,
    dimensions: Option<(usize, usize)>
}

impl<T: ByteIoTrait> PngDecoder<T> {
    pub fn new(data: T, options: DecoderOptions) -> PngDecoder<T> {
        PngDecoder {
            state: State::Start(ByteReader::new(data)),
            options,
            dimensions: None
        }
    }
}

/// Expand a decoded frame with `samples` channels per pixel into rgb
fn to_rgb(frame: &[u8], samples: usize, rgb: &mut [u8]) {
    for (pix, out) in frame.chunks_exact(samples).zip(rgb.chunks_exact_mut(3)) {
        match samples {
            1 | 2 => out.fill(pix[0]),
            _ => out.copy_from_slice(&pix[..3])
        }
    }
}

impl<T: ByteIoTrait> DecoderTrait for PngDecoder<T> {
    fn decode(&mut self) -> Result<Image, ImageErrors> {
        self.read_headers()?;

        let State::Headers(mut reader) = core::mem::replace(&mut self.state, State::Done) else {
            return Err(ImageErrors::GenericStr("PNG stream already decoded"));
        };
        let (cols, rows) = self
            .dimensions
            .ok_or(ImageErrors::GenericStr("Headers were not decoded"))?;

        let mut frame = vec![0; reader.output_buffer_size()];
        let output = reader.next_frame(&mut frame)?;

        let samples = output.color_type.samples();

        if matches!(
            output.color_type,
            ::png::ColorType::GrayscaleAlpha | ::png::ColorType::Rgba
        ) && self.options.get_policy().get_warnings()
        {
            warn!("Warning in decode: discarding PNG alpha channel");
        }
        let mut image = Image::allocate(PixelKind::Rgb, rows, cols)?;

        to_rgb(
            &frame[..output.buffer_size()],
            samples,
            image.flat_mut::<u8>()?
        );
        Ok(image)
    }

    fn read_headers(&mut self) -> Result<(), ImageErrors> {
        let source = match core::mem::replace(&mut self.state, State::Done) {
            State::Start(source) => source,
            state => {
                self.state = state;
                return Ok(());
            }
        };
        let mut decoder = ::png::Decoder::new(source);
        decoder.set_transformations(::png::Transformations::EXPAND | ::png::Transformations::STRIP_16);

        let reader = decoder.read_info()?;

        let width = reader.info().width as usize;
        let height = reader.info().height as usize;

        if width > self.options.get_max_width() || height > self.options.get_max_height() {
            let msg = format!(
                "Image dimensions {width}x{height} exceed the configured maximum {}x{}",
                self.options.get_max_width(),
                self.options.get_max_height()
            );
            return Err(ImageErrors::InvalidArgument(msg));
        }
        info!("Width: {width}, Height: {height}");

        self.dimensions = Some((width, height));
        self.state = State::Headers(reader);

        Ok(())
    }

    fn dimensions(&self) -> Option<(usize, usize)> {
        self.dimensions
    }

    fn out_kind(&self) -> Option<PixelKind> {
        Some(PixelKind::Rgb)
    }

    fn name(&self) -> &'static str {
        "PNG Decoder"
    }
}

/// Encodes rgb images as 8 bit PNG
#[derive(Copy, Clone, Default)]
pub struct PngEncoder;

impl PngEncoder {
    pub fn new() -> PngEncoder {
        PngEncoder
    }
}

impl EncoderTrait for PngEncoder {
    fn name(&self) -> &'static str {
        "PNG Encoder"
    }

    fn format(&self) -> ImageFormat {
        ImageFormat::PNG
    }

    fn supported_kinds(&self) -> &'static [PixelKind] {
        &[PixelKind::Rgb]
    }

    fn encode_inner<T: ByteWriterTrait>(
        &mut self, image: &Image, sink: T
    ) -> Result<usize, ImageErrors> {
        let (cols, rows) = image.dimensions()?;

        let width = u32::try_from(cols)
            .map_err(|_| ImageErrors::InvalidArgument(format!("Width {cols} is too large for PNG")))?;
        let height = u32::try_from(rows)
            .map_err(|_| ImageErrors::InvalidArgument(format!("Height {rows} is too large for PNG")))?;

        let mut writer = ByteWriter::new(sink);
        {
            let mut encoder = ::png::Encoder::new(&mut writer, width, height);
            encoder.set_color(::png::ColorType::Rgb);
            encoder.set_depth(::png::BitDepth::Eight);

            let mut png_writer = encoder.write_header()?;
            png_writer.write_image_data(image.flat::<u8>()?)?;
            png_writer.finish()?;
        }
        writer.flush()?;

        Ok(writer.bytes_written())
    }
}

#[cfg(test)]
mod tests {
    use crate::codecs::png::to_rgb;

    #[test]
    fn expansion() {
        let mut rgb = [0; 6];
        to_rgb(&[10, 255, 20, 0], 2, &mut rgb);
        assert_eq!(rgb, [10, 10, 10, 20, 20, 20]);

        to_rgb(&[1, 2, 3, 4, 5, 6, 7, 8], 4, &mut rgb);
        assert_eq!(rgb, [1, 2, 3, 5, 6, 7]);
    }
}
