/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use std::fmt::{Debug, Display, Formatter};

use fourier_core::bytestream::ByteIoError;

/// Errors possible during decoding a PNM header or payload
pub enum PnmDecodeErrors {
    Generic(String),
    GenericStatic(&'static str),
    /// A header field could not be parsed
    InvalidHeader(String),
    /// The magic token did not match the expected one
    UnknownMagic(String),
    /// The header declared a max value other than 255
    UnsupportedDepth(usize),
    /// A header token was longer than the configured bound
    TokenTooLong(usize),
    /// expected, found
    LargeDimensions(usize, usize),
    /// The stream ended before the header was complete
    EndOfStream,
    IoErrors(ByteIoError)
}

impl Debug for PnmDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generic(val) => {
                writeln!(f, "{val}")
            }
            Self::GenericStatic(val) => writeln!(f, "{val}"),
            Self::InvalidHeader(val) => {
                writeln!(f, "Invalid header, reason: {val}")
            }
            Self::UnknownMagic(val) => {
                writeln!(f, "Unknown magic token `{val}`")
            }
            Self::UnsupportedDepth(val) => {
                writeln!(f, "Unsupported max value {val}, only 255 is supported")
            }
            Self::TokenTooLong(limit) => {
                writeln!(f, "Header token longer than {limit} characters")
            }
            Self::LargeDimensions(expected, found) => {
                writeln!(
                    f,
                    "Too large dimensions, expected a value less than {expected} but found {found}"
                )
            }
            Self::EndOfStream => writeln!(f, "Stream ended before the header was complete"),
            Self::IoErrors(err) => writeln!(f, "{err:?}")
        }
    }
}

impl Display for PnmDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for PnmDecodeErrors {}

impl From<ByteIoError> for PnmDecodeErrors {
    fn from(err: ByteIoError) -> Self {
        if err.is_end_of_stream() {
            return PnmDecodeErrors::EndOfStream;
        }
        PnmDecodeErrors::IoErrors(err)
    }
}

/// Errors occurring during encoding
pub enum PnmEncodeErrors {
    Static(&'static str),
    /// expected, found
    DimensionsMismatch(usize, usize),
    /// The max value cannot be represented in a byte
    UnsupportedDepth(i64),
    IoErrors(ByteIoError)
}

impl Debug for PnmEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static(errors) => {
                writeln!(f, "{errors}")
            }
            Self::DimensionsMismatch(expected, found) => {
                writeln!(
                    f,
                    "Data length does not match image dimensions, expected {expected} bytes but found {found}"
                )
            }
            Self::UnsupportedDepth(value) => {
                writeln!(f, "Max value {value} does not fit in a byte")
            }
            Self::IoErrors(err) => {
                writeln!(f, "{err:?}")
            }
        }
    }
}

impl Display for PnmEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for PnmEncodeErrors {}

impl From<ByteIoError> for PnmEncodeErrors {
    fn from(err: ByteIoError) -> Self {
        PnmEncodeErrors::IoErrors(err)
    }
}
