/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during image processing
use std::fmt::{Debug, Display, Formatter};

use fourier_core::bytestream::ByteIoError;
use fourier_core::status::{Severity, StatusCode};
use fourier_pnm::{PnmDecodeErrors, PnmEncodeErrors};

use crate::codecs::ImageFormat;

/// All possible image errors that can occur.
///
/// This is the grandfather of image errors and contains
/// all allocation, decoding, processing and encoding errors possible
pub enum ImageErrors {
    /// An argument was outside the accepted range
    InvalidArgument(String),
    /// The image was freed, or is not of a kind the operation accepts
    InvalidObject(String),
    /// A pixel depth that cannot be represented
    InvalidPixelDepth(String),
    /// Number of bytes that could not be allocated
    OutOfMemory(usize),
    /// The component count was read from an image that is not a label image
    NotALabelImage,
    /// The format is understood but its codec was compiled out
    ImageDecoderNotIncluded(ImageFormat),
    /// The format is recognised but has no codec
    ImageDecoderNotImplemented(ImageFormat),
    /// The stream matched no known signature
    UnknownFormat,
    /// The stream ended before a format could be recognised
    EndOfStream,
    FileOpen(std::io::Error),
    FileRead(String),
    PnmDecodeErrors(PnmDecodeErrors),
    #[cfg(feature = "png")]
    PngDecodeErrors(png::DecodingError),
    EncodeErrors(ImgEncodeErrors),
    /// A structurally impossible state was reached
    InvariantViolation(String),
    /// An error escalated by an abort on error policy
    Aborted {
        operation: &'static str,
        source:    Box<ImageErrors>
    },
    GenericString(String),
    GenericStr(&'static str)
}

/// All errors possible during image encoding
pub enum ImgEncodeErrors {
    Generic(String),
    GenericStatic(&'static str),
    NoEncoderForFormat(ImageFormat),
    PnmEncodeErrors(PnmEncodeErrors),
    #[cfg(feature = "png")]
    PngEncodeErrors(png::EncodingError),
    IoErrors(std::io::Error)
}

impl ImageErrors {
    /// The status code this error maps to
    pub fn code(&self) -> StatusCode {
        match self {
            ImageErrors::InvalidArgument(_) | ImageErrors::NotALabelImage => {
                StatusCode::InvalidArgument
            }
            ImageErrors::InvalidObject(_) => StatusCode::InvalidObject,
            ImageErrors::InvalidPixelDepth(_) => StatusCode::InvalidPixelDepth,
            ImageErrors::OutOfMemory(_) => StatusCode::OutOfMemory,
            ImageErrors::ImageDecoderNotIncluded(_) | ImageErrors::ImageDecoderNotImplemented(_) => {
                StatusCode::NotImplemented
            }
            ImageErrors::UnknownFormat => StatusCode::UnknownFormat,
            ImageErrors::EndOfStream => StatusCode::EndOfStream,
            ImageErrors::FileOpen(_) => StatusCode::FileOpen,
            ImageErrors::FileRead(_) => StatusCode::FileRead,
            ImageErrors::PnmDecodeErrors(err) => match err {
                PnmDecodeErrors::UnknownMagic(_) => StatusCode::UnknownFormat,
                PnmDecodeErrors::UnsupportedDepth(_) => StatusCode::InvalidPixelDepth,
                PnmDecodeErrors::EndOfStream => StatusCode::EndOfStream,
                PnmDecodeErrors::LargeDimensions(_, _) => StatusCode::InvalidArgument,
                PnmDecodeErrors::IoErrors(_) => StatusCode::FileRead,
                PnmDecodeErrors::InvalidHeader(_)
                | PnmDecodeErrors::TokenTooLong(_)
                | PnmDecodeErrors::Generic(_)
                | PnmDecodeErrors::GenericStatic(_) => StatusCode::Failure
            },
            #[cfg(feature = "png")]
            ImageErrors::PngDecodeErrors(err) => match err {
                png::DecodingError::LimitsExceeded => StatusCode::OutOfMemory,
                _ => StatusCode::FileRead
            },
            ImageErrors::EncodeErrors(err) => err.code(),
            ImageErrors::Aborted { source, .. } => source.code(),
            ImageErrors::InvariantViolation(_)
            | ImageErrors::GenericString(_)
            | ImageErrors::GenericStr(_) => StatusCode::Failure
        }
    }

    /// How serious this error is.
    ///
    /// Escalated errors and invariant violations are fatal,
    /// everything else is an ordinary error.
    pub fn severity(&self) -> Severity {
        match self {
            ImageErrors::Aborted { .. } | ImageErrors::InvariantViolation(_) => Severity::Fatal,
            _ => Severity::Error
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl ImgEncodeErrors {
    pub fn code(&self) -> StatusCode {
        match self {
            ImgEncodeErrors::NoEncoderForFormat(_) => StatusCode::NotImplemented,
            ImgEncodeErrors::PnmEncodeErrors(err) => match err {
                PnmEncodeErrors::UnsupportedDepth(_) => StatusCode::InvalidPixelDepth,
                PnmEncodeErrors::DimensionsMismatch(_, _) => StatusCode::InvalidArgument,
                PnmEncodeErrors::Static(_) | PnmEncodeErrors::IoErrors(_) => StatusCode::Failure
            },
            #[cfg(feature = "png")]
            ImgEncodeErrors::PngEncodeErrors(_) => StatusCode::Failure,
            ImgEncodeErrors::Generic(_)
            | ImgEncodeErrors::GenericStatic(_)
            | ImgEncodeErrors::IoErrors(_) => StatusCode::Failure
        }
    }
}

impl Debug for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(reason) => writeln!(f, "Invalid argument: {reason}"),
            Self::InvalidObject(reason) => writeln!(f, "Invalid object: {reason}"),
            Self::InvalidPixelDepth(reason) => writeln!(f, "Invalid pixel depth: {reason}"),
            Self::OutOfMemory(bytes) => writeln!(f, "Could not allocate {bytes} bytes"),
            Self::NotALabelImage => writeln!(f, "Not a label image"),
            Self::ImageDecoderNotIncluded(format) => {
                writeln!(f, "Image format {format:?} present but the feature is not included")
            }
            Self::ImageDecoderNotImplemented(format) => {
                writeln!(f, "No codec implemented for {}", format.name())
            }
            Self::UnknownFormat => writeln!(f, "Unknown file format"),
            Self::EndOfStream => writeln!(f, "End of file reached"),
            Self::FileOpen(err) => writeln!(f, "Could not open file: {err}"),
            Self::FileRead(err) => writeln!(f, "Could not read file: {err}"),
            Self::PnmDecodeErrors(err) => writeln!(f, "pnm: {err:?}"),
            #[cfg(feature = "png")]
            Self::PngDecodeErrors(err) => writeln!(f, "png: {err}"),
            Self::EncodeErrors(err) => writeln!(f, "{err:?}"),
            Self::InvariantViolation(reason) => writeln!(f, "Invariant violated: {reason}"),
            Self::Aborted { operation, source } => {
                writeln!(f, "Aborted in {operation}: {source:?}")
            }
            Self::GenericString(err) => writeln!(f, "{err}"),
            Self::GenericStr(err) => writeln!(f, "{err}")
        }
    }
}

impl Display for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), format!("{self:?}").trim_end())
    }
}

impl std::error::Error for ImageErrors {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Aborted { source, .. } => Some(source.as_ref()),
            Self::PnmDecodeErrors(err) => Some(err),
            Self::FileOpen(err) => Some(err),
            _ => None
        }
    }
}

impl Debug for ImgEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generic(string) => writeln!(f, "{string}"),
            Self::GenericStatic(string) => writeln!(f, "{string}"),
            Self::NoEncoderForFormat(format) => {
                writeln!(f, "No encoder for {}", format.name())
            }
            Self::PnmEncodeErrors(err) => writeln!(f, "pnm: {err:?}"),
            #[cfg(feature = "png")]
            Self::PngEncodeErrors(err) => writeln!(f, "png: {err}"),
            Self::IoErrors(err) => writeln!(f, "{err}")
        }
    }
}

impl From<PnmDecodeErrors> for ImageErrors {
    fn from(from: PnmDecodeErrors) -> Self {
        ImageErrors::PnmDecodeErrors(from)
    }
}

impl From<PnmEncodeErrors> for ImgEncodeErrors {
    fn from(error: PnmEncodeErrors) -> Self {
        ImgEncodeErrors::PnmEncodeErrors(error)
    }
}

impl From<PnmEncodeErrors> for ImageErrors {
    fn from(error: PnmEncodeErrors) -> Self {
        ImageErrors::EncodeErrors(error.into())
    }
}

#[cfg(feature = "png")]
impl From<png::DecodingError> for ImageErrors {
    fn from(from: png::DecodingError) -> Self {
        ImageErrors::PngDecodeErrors(from)
    }
}

#[cfg(feature = "png")]
impl From<png::EncodingError> for ImageErrors {
    fn from(from: png::EncodingError) -> Self {
        ImageErrors::EncodeErrors(ImgEncodeErrors::PngEncodeErrors(from))
    }
}

impl From<ImgEncodeErrors> for ImageErrors {
    fn from(from: ImgEncodeErrors) -> Self {
        ImageErrors::EncodeErrors(from)
    }
}

impl From<ByteIoError> for ImageErrors {
    fn from(from: ByteIoError) -> Self {
        if from.is_end_of_stream() {
            return ImageErrors::EndOfStream;
        }
        ImageErrors::FileRead(format!("{from:?}").trim_end().to_string())
    }
}

impl From<std::io::Error> for ImageErrors {
    fn from(from: std::io::Error) -> Self {
        ImageErrors::EncodeErrors(ImgEncodeErrors::IoErrors(from))
    }
}

impl From<String> for ImageErrors {
    fn from(s: String) -> ImageErrors {
        ImageErrors::GenericString(s)
    }
}

impl From<&'static str> for ImageErrors {
    fn from(s: &'static str) -> ImageErrors {
        ImageErrors::GenericStr(s)
    }
}

#[cfg(test)]
mod tests {
    use fourier_core::status::{Severity, StatusCode};
    use fourier_pnm::PnmDecodeErrors;

    use crate::codecs::ImageFormat;
    use crate::errors::ImageErrors;

    #[test]
    fn codes() {
        let err: ImageErrors = PnmDecodeErrors::UnsupportedDepth(65535).into();
        assert_eq!(err.code(), StatusCode::InvalidPixelDepth);

        let err = ImageErrors::ImageDecoderNotImplemented(ImageFormat::GIF);
        assert_eq!(err.code(), StatusCode::NotImplemented);
        assert_eq!(err.code().as_str(), "feature not implemented");
    }

    #[test]
    fn aborted_keeps_code_and_is_fatal() {
        let err = ImageErrors::Aborted {
            operation: "open",
            source:    Box::new(ImageErrors::UnknownFormat)
        };
        assert_eq!(err.code(), StatusCode::UnknownFormat);
        assert_eq!(err.severity(), Severity::Fatal);
        assert!(!ImageErrors::UnknownFormat.is_fatal());
        assert!(ImageErrors::InvariantViolation(String::new()).is_fatal());
    }
}
