/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Entry point for all formats the library understands
//!
//! Formats are recognised by their magic bytes, see [`guess_format`].
//! Only a subset of the recognised formats can be decoded or encoded,
//! the rest fail with [`ImageDecoderNotImplemented`](ImageErrors::ImageDecoderNotImplemented).
//!
//! | Format         | Decode | Encode | Image kind |
//! |----------------|--------|--------|------------|
//! | Raw/Binary PBM | yes    | yes    | binary     |
//! | Raw/Binary PGM | yes    | yes    | gray       |
//! | Raw/Binary PPM | yes    | yes    | rgb        |
//! | PNG            | `png`  | `png`  | rgb        |
use std::io::{BufReader, Cursor};
use std::path::Path;

use fourier_core::bytestream::{ByteIoTrait, ByteReader, ByteWriterTrait};
use fourier_core::log::{info, trace};
use fourier_core::options::DecoderOptions;
use fourier_pnm::PnmVersion;

use crate::errors::{ImageErrors, ImgEncodeErrors};
use crate::image::Image;
use crate::traits::{DecoderTrait, EncoderTrait};

pub mod png;
pub mod pnm;

/// All recognised image formats
///
/// Only the raw PNM variants and PNG carry codecs, the others are
/// detected so callers get a precise error.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum ImageFormat {
    /// Windows Bitmap
    BMP,
    /// Graphics Interchange Format
    GIF,
    /// Joint Photographic Experts Group
    JPG,
    /// Plain/ASCII portable bitmap, `P1`
    PBMA,
    /// Raw/Binary portable bitmap, `P4`
    PBM,
    /// ZSoft Paintbrush
    PCX,
    /// Plain/ASCII portable graymap, `P2`
    PGMA,
    /// Raw/Binary portable graymap, `P5`
    PGM,
    /// Portable Network Graphics
    PNG,
    /// Plain/ASCII portable pixmap, `P3`
    PPMA,
    /// Raw/Binary portable pixmap, `P6`
    PPM,
    /// Photoshop document
    PSD,
    /// Sun raster
    RAS,
    /// Truevision TGA
    TGA,
    /// Tagged Image File Format
    TIFF,
    /// Any unknown format
    Unknown
}

impl ImageFormat {
    /// Human readable name of the format
    pub const fn name(self) -> &'static str {
        match self {
            ImageFormat::BMP => "BMP",
            ImageFormat::GIF => "GIF",
            ImageFormat::JPG => "JPG",
            ImageFormat::PBMA => "Plain/ASCII PBM",
            ImageFormat::PBM => "Raw/Binary PBM",
            ImageFormat::PCX => "PCX",
            ImageFormat::PGMA => "Plain/ASCII PGM",
            ImageFormat::PGM => "Raw/Binary PGM",
            ImageFormat::PNG => "PNG",
            ImageFormat::PPMA => "Plain/ASCII PPM",
            ImageFormat::PPM => "Raw/Binary PPM",
            ImageFormat::PSD => "PSD",
            ImageFormat::RAS => "RAS",
            ImageFormat::TGA => "TGA",
            ImageFormat::TIFF => "TIFF",
            ImageFormat::Unknown => "unknown"
        }
    }

    /// The raw PNM variant this format corresponds to, if any
    pub const fn pnm_version(self) -> Option<PnmVersion> {
        match self {
            ImageFormat::PBM => Some(PnmVersion::P4),
            ImageFormat::PGM => Some(PnmVersion::P5),
            ImageFormat::PPM => Some(PnmVersion::P6),
            _ => None
        }
    }

    /// Return true if the library can decode this format
    pub const fn has_decoder(self) -> bool {
        match self {
            ImageFormat::PBM | ImageFormat::PGM | ImageFormat::PPM => true,
            ImageFormat::PNG => cfg!(feature = "png"),
            _ => false
        }
    }

    /// Return true if an image format has an encoder that can convert the image
    /// into that format
    pub const fn has_encoder(self) -> bool {
        self.has_decoder()
    }

    /// Create a decoder for this format reading from `data`
    pub fn decoder_with_options<'a, T>(
        self, data: T, options: DecoderOptions
    ) -> Result<Box<dyn DecoderTrait + 'a>, ImageErrors>
    where
        T: ByteIoTrait + 'a
    {
        if let Some(version) = self.pnm_version() {
            return Ok(Box::new(pnm::PnmImageDecoder::new(data, version, options)));
        }
        match self {
            ImageFormat::PNG => {
                #[cfg(feature = "png")]
                {
                    Ok(Box::new(png::PngDecoder::new(data, options)))
                }
                #[cfg(not(feature = "png"))]
                {
                    Err(ImageErrors::ImageDecoderNotIncluded(self))
                }
            }
            ImageFormat::Unknown => Err(ImageErrors::UnknownFormat),
            _ => Err(ImageErrors::ImageDecoderNotImplemented(self))
        }
    }

    /// Encode `image` into `sink` using this format
    ///
    /// Returns the number of bytes written
    pub fn encode<T: ByteWriterTrait>(self, image: &Image, sink: T) -> Result<usize, ImageErrors> {
        if let Some(version) = self.pnm_version() {
            return pnm::PnmImageEncoder::new(version).encode(image, sink);
        }
        if self == ImageFormat::PNG {
            #[cfg(feature = "png")]
            {
                return png::PngEncoder::new().encode(image, sink);
            }
        }
        Err(ImageErrors::EncodeErrors(
            ImgEncodeErrors::NoEncoderForFormat(self)
        ))
    }

    /// Pick an encoder format from a file extension
    ///
    /// Matching is case-insensitive, unknown extensions return `None`
    pub fn encoder_for_extension<P: AsRef<str>>(extension: P) -> Option<ImageFormat> {
        match extension.as_ref().to_ascii_lowercase().as_str() {
            "pbm" => Some(ImageFormat::PBM),
            "pgm" => Some(ImageFormat::PGM),
            "ppm" => Some(ImageFormat::PPM),
            "png" => {
                #[cfg(feature = "png")]
                {
                    Some(ImageFormat::PNG)
                }
                #[cfg(not(feature = "png"))]
                {
                    None
                }
            }
            _ => None
        }
    }
}

impl core::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Longest signature in the table
const MAX_MAGIC_LEN: usize = 8;

/// Signatures checked after the single byte ones
static MAGIC_BYTES: [(&[u8], ImageFormat); 14] = [
    (&[137, 80, 78, 71, 13, 10, 26, 10], ImageFormat::PNG),
    (b"8BPS", ImageFormat::PSD),
    (&[0x59, 0xA6, 0x6A, 0x95], ImageFormat::RAS),
    (b"GIF", ImageFormat::GIF),
    (b"BM", ImageFormat::BMP),
    (&[0xFF, 0xD8], ImageFormat::JPG),
    (b"II", ImageFormat::TIFF),
    (b"MM", ImageFormat::TIFF),
    (b"P1", ImageFormat::PBMA),
    (b"P2", ImageFormat::PGMA),
    (b"P3", ImageFormat::PPMA),
    (b"P4", ImageFormat::PBM),
    (b"P5", ImageFormat::PGM),
    (b"P6", ImageFormat::PPM)
];

/// Guess the format of an image based on its magic bytes
///
/// At most 8 bytes are inspected and the reader position is left unchanged.
///
/// # Returns
/// - `Ok(format)`: the recognised format
/// - `Err(EndOfStream)`: the stream is empty, or holds a single byte that is
///   not a single byte signature
/// - `Err(UnknownFormat)`: no signature matched
///
/// # Example
/// ```
/// use std::io::Cursor;
/// use fourier_core::bytestream::ByteReader;
/// use fourier_image::codecs::{guess_format, ImageFormat};
///
/// let mut reader = ByteReader::new(Cursor::new(b"P6\n1 1\n255\n"));
/// assert_eq!(guess_format(&mut reader).unwrap(), ImageFormat::PPM);
/// ```
pub fn guess_format<T: ByteIoTrait>(reader: &mut ByteReader<T>) -> Result<ImageFormat, ImageErrors> {
    let magic = reader.peek_available(MAX_MAGIC_LEN)?;

    let format = match magic {
        [] => return Err(ImageErrors::EndOfStream),
        [0x00, ..] => ImageFormat::TGA,
        [0x0A, ..] => ImageFormat::PCX,
        [_] => return Err(ImageErrors::EndOfStream),
        _ => MAGIC_BYTES
            .iter()
            .find(|(signature, _)| magic.starts_with(signature))
            .map_or(ImageFormat::Unknown, |(_, format)| *format)
    };
    trace!("Magic bytes {magic:02X?} identified as {}", format.name());

    match format {
        ImageFormat::Unknown => Err(ImageErrors::UnknownFormat),
        format => Ok(format)
    }
}

/// Detect the format of the file at `path`
///
/// # Errors
/// `FileOpen` if the file cannot be opened, otherwise as [`guess_format`]
pub fn detect_file<P: AsRef<Path>>(path: P) -> Result<ImageFormat, ImageErrors> {
    let file = std::fs::File::open(path).map_err(ImageErrors::FileOpen)?;
    let mut reader = ByteReader::new(BufReader::new(file));

    guess_format(&mut reader)
}

// save and open
impl Image {
    /// Open an encoded file for which the library has a configured decoder for it
    ///
    /// # Arguments
    /// - file: The file path from which to read the file from, the file must be a supported format
    ///   otherwise it's an error to try and decode
    ///
    /// See also [read](Self::read) for reading from memory
    pub fn open<P: AsRef<Path>>(file: P) -> Result<Image, ImageErrors> {
        Self::open_with_options(file, DecoderOptions::default())
    }

    /// Open an encoded file with the specified custom decoder options
    ///
    /// # Example
    ///  - Only accept images less than 100 pixels wide
    ///
    /// ```no_run
    /// use fourier_core::options::DecoderOptions;
    /// use fourier_image::image::Image;
    /// let options = DecoderOptions::default().set_max_width(100);
    /// let image = Image::open_with_options("/a/file.pgm", options).unwrap();
    /// ```
    pub fn open_with_options<P: AsRef<Path>>(
        file: P, options: DecoderOptions
    ) -> Result<Image, ImageErrors> {
        let file = std::fs::File::open(file).map_err(ImageErrors::FileOpen)?;
        Self::read(BufReader::new(file), options)
    }

    /// Decode an image from any byte source
    ///
    /// # Example
    /// ```
    /// use std::io::Cursor;
    /// use fourier_core::options::DecoderOptions;
    /// use fourier_image::image::Image;
    ///
    /// let image = Image::read(Cursor::new(b"P5 1 1 255 \x07"), DecoderOptions::default()).unwrap();
    /// assert_eq!(image.flat::<u8>().unwrap(), &[7]);
    /// ```
    pub fn read<T>(src: T, options: DecoderOptions) -> Result<Image, ImageErrors>
    where
        T: ByteIoTrait
    {
        let mut reader = ByteReader::new(src);
        let format = guess_format(&mut reader)?;

        info!("Decoding {} image", format.name());

        let mut decoder = format.decoder_with_options(reader.consume(), options)?;
        decoder.decode()
    }

    /// Decode an image already in memory
    pub fn read_from_memory(bytes: &[u8], options: DecoderOptions) -> Result<Image, ImageErrors> {
        Self::read(Cursor::new(bytes), options)
    }

    /// Save the image to a file and use the extension to
    /// determine the format
    ///
    /// If the extension cannot be determined from the path, it's an error.
    pub fn save<P: AsRef<Path>>(&self, file: P) -> Result<(), ImageErrors> {
        let Some(ext) = file.as_ref().extension() else {
            let msg = format!("No extension for file {:?}", file.as_ref());
            return Err(ImageErrors::EncodeErrors(ImgEncodeErrors::Generic(msg)));
        };
        match ImageFormat::encoder_for_extension(ext.to_string_lossy()) {
            Some(format) => self.save_to(file, format),
            None => {
                let msg = format!("No encoder for extension {ext:?}");
                Err(ImageErrors::EncodeErrors(ImgEncodeErrors::Generic(msg)))
            }
        }
    }

    /// Save an image using a specified format to a file
    ///
    /// # Example
    /// ```no_run
    /// use fourier_core::pixel_kind::PixelKind;
    /// use fourier_image::codecs::ImageFormat;
    /// use fourier_image::image::Image;
    ///
    /// let image = Image::allocate_const(PixelKind::Gray, 200, 200, 0.0).unwrap();
    /// image.save_to("black.pgm", ImageFormat::PGM).unwrap();
    /// ```
    pub fn save_to<P: AsRef<Path>>(&self, file: P, format: ImageFormat) -> Result<(), ImageErrors> {
        // encode fully before touching the file so a rejected image
        // leaves existing contents alone
        let encoded = self.write_to_vec(format)?;
        std::fs::write(file, encoded).map_err(ImageErrors::FileOpen)
    }

    /// Encode to a generic sink an image of a specific format
    ///
    /// # Returns
    ///  - The size of bytes written to sink or an error if it occurs
    pub fn encode<T: ByteWriterTrait>(&self, format: ImageFormat, sink: T) -> Result<usize, ImageErrors> {
        format.encode(self, sink)
    }

    /// Encode an image returning a vector containing the result
    /// of the encoding
    pub fn write_to_vec(&self, format: ImageFormat) -> Result<Vec<u8>, ImageErrors> {
        if !format.has_encoder() {
            return Err(ImageErrors::EncodeErrors(
                ImgEncodeErrors::NoEncoderForFormat(format)
            ));
        }
        let mut sink: Vec<u8> = vec![];
        self.encode(format, &mut sink)?;
        Ok(sink)
    }

    /// Decode an image with a configured decoder
    pub fn from_decoder(mut decoder: impl DecoderTrait) -> Result<Image, ImageErrors> {
        decoder.decode()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use fourier_core::bytestream::ByteReader;

    use crate::codecs::{guess_format, ImageFormat};
    use crate::errors::ImageErrors;

    fn guess(bytes: &[u8]) -> Result<ImageFormat, ImageErrors> {
        guess_format(&mut ByteReader::new(Cursor::new(bytes)))
    }

    #[test]
    fn signatures() {
        let cases: [(&[u8], ImageFormat); 14] = [
            (b"P6\n", ImageFormat::PPM),
            (b"P4", ImageFormat::PBM),
            (b"P1 2 2", ImageFormat::PBMA),
            (b"BM\x00\x00", ImageFormat::BMP),
            (b"GIF89a", ImageFormat::GIF),
            (&[0xFF, 0xD8, 0xFF], ImageFormat::JPG),
            (b"II*\x00", ImageFormat::TIFF),
            (b"MM\x00*", ImageFormat::TIFF),
            (b"8BPS\x00\x01", ImageFormat::PSD),
            (&[0x59, 0xA6, 0x6A, 0x95, 0], ImageFormat::RAS),
            (&[137, 80, 78, 71, 13, 10, 26, 10, 0], ImageFormat::PNG),
            (&[0x00], ImageFormat::TGA),
            (&[0x00, 0x02, 0x00], ImageFormat::TGA),
            (&[0x0A, 0x05], ImageFormat::PCX)
        ];
        for (bytes, format) in cases {
            assert_eq!(guess(bytes).unwrap(), format, "{bytes:?}");
        }
    }

    #[test]
    fn short_and_unknown_streams() {
        assert!(matches!(guess(b""), Err(ImageErrors::EndOfStream)));
        assert!(matches!(guess(b"P"), Err(ImageErrors::EndOfStream)));
        assert!(matches!(guess(b"P7"), Err(ImageErrors::UnknownFormat)));
        assert!(matches!(guess(b"GI"), Err(ImageErrors::UnknownFormat)));
        assert!(matches!(guess(b"8BP"), Err(ImageErrors::UnknownFormat)));
    }

    #[test]
    fn position_is_restored() {
        let mut reader = ByteReader::new(Cursor::new(b"P5 1 1 255 \x07".to_vec()));
        guess_format(&mut reader).unwrap();
        assert_eq!(reader.position().unwrap(), 0);
    }

    #[test]
    fn names() {
        assert_eq!(ImageFormat::PGM.name(), "Raw/Binary PGM");
        assert_eq!(ImageFormat::PPMA.name(), "Plain/ASCII PPM");
        assert_eq!(ImageFormat::Unknown.to_string(), "unknown");
    }

    #[test]
    fn extensions() {
        assert_eq!(ImageFormat::encoder_for_extension("PGM"), Some(ImageFormat::PGM));
        assert_eq!(ImageFormat::encoder_for_extension("pbm"), Some(ImageFormat::PBM));
        assert_eq!(ImageFormat::encoder_for_extension("jpg"), None);
    }

    #[test]
    fn recognised_without_codec() {
        let err = crate::image::Image::read(Cursor::new(b"GIF89a"), Default::default()).unwrap_err();
        assert!(matches!(err, ImageErrors::ImageDecoderNotImplemented(ImageFormat::GIF)));
    }
}
