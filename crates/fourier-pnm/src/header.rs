/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Header tokenizer for the binary netpbm formats
//!
//! A header is a two character magic token followed by
//! whitespace separated decimal fields, `cols rows` for P4 and
//! `cols rows maxval` for P5 and P6. A `#` starts a comment
//! running to the end of the line.
use std::fmt::{Display, Formatter};

use fourier_core::bytestream::{ByteIoTrait, ByteReader};
use fourier_core::log::info;
use fourier_core::options::DecoderOptions;

use crate::errors::PnmDecodeErrors;

/// Binary netpbm variants
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PnmVersion {
    /// Packed 1 bit
    P4,
    /// 8 bit gray
    P5,
    /// 8 bit RGB
    P6
}

impl PnmVersion {
    /// The magic token for this version
    pub const fn magic(self) -> &'static str {
        match self {
            PnmVersion::P4 => "P4",
            PnmVersion::P5 => "P5",
            PnmVersion::P6 => "P6"
        }
    }

    /// Match a magic token, ignoring case
    pub fn from_magic(token: &[u8]) -> Option<PnmVersion> {
        [PnmVersion::P4, PnmVersion::P5, PnmVersion::P6]
            .into_iter()
            .find(|version| token.eq_ignore_ascii_case(version.magic().as_bytes()))
    }

    /// Number of bands of a decoded pixel
    pub const fn bands(self) -> usize {
        match self {
            PnmVersion::P4 | PnmVersion::P5 => 1,
            PnmVersion::P6 => 3
        }
    }

    /// Whether the header carries a max value field
    pub const fn has_max_value(self) -> bool {
        !matches!(self, PnmVersion::P4)
    }

    /// Number of payload bytes per row
    pub const fn row_bytes(self, cols: usize) -> usize {
        match self {
            PnmVersion::P4 => cols.div_ceil(8),
            PnmVersion::P5 => cols,
            PnmVersion::P6 => cols * 3
        }
    }
}

impl Display for PnmVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.magic())
    }
}

/// A parsed header
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PnmHeader {
    pub version:   PnmVersion,
    pub cols:      usize,
    pub rows:      usize,
    /// `None` for P4 which has no max value field
    pub max_value: Option<usize>
}

impl PnmHeader {
    /// Number of payload bytes following the header
    pub const fn payload_size(&self) -> usize {
        self.version.row_bytes(self.cols) * self.rows
    }

    /// Number of bytes a decoded image occupies
    pub const fn output_size(&self) -> usize {
        self.cols * self.rows * self.version.bands()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum State {
    Skipping,
    Accumulating
}

/// Whitespace as understood by netpbm, this includes vertical tab
/// which `u8::is_ascii_whitespace` excludes
const fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

struct Tokenizer<'r, T: ByteIoTrait> {
    reader: &'r mut ByteReader<T>,
    token:  Vec<u8>,
    limit:  usize
}

impl<'r, T: ByteIoTrait> Tokenizer<'r, T> {
    fn new(reader: &'r mut ByteReader<T>, limit: usize) -> Tokenizer<'r, T> {
        Tokenizer {
            reader,
            token: Vec::with_capacity(limit),
            limit
        }
    }

    fn next_byte(&mut self) -> Result<u8, PnmDecodeErrors> {
        self.reader.read_u8()?.ok_or(PnmDecodeErrors::EndOfStream)
    }

    fn skip_comment(&mut self) -> Result<(), PnmDecodeErrors> {
        while self.next_byte()? != b'\n' {}
        Ok(())
    }

    /// Return the next token.
    ///
    /// The whitespace byte ending the token is consumed, nothing after it is.
    fn next_token(&mut self) -> Result<&[u8], PnmDecodeErrors> {
        let mut state = State::Skipping;
        self.token.clear();

        loop {
            let byte = self.next_byte()?;

            if byte == b'#' {
                // state is kept, a comment may interrupt a token
                self.skip_comment()?;
                continue;
            }
            match (state, is_space(byte)) {
                (State::Skipping, true) => {}
                (State::Skipping, false) | (State::Accumulating, false) => {
                    if self.token.len() >= self.limit {
                        return Err(PnmDecodeErrors::TokenTooLong(self.limit));
                    }
                    self.token.push(byte);
                    state = State::Accumulating;
                }
                (State::Accumulating, true) => return Ok(&self.token)
            }
        }
    }

    fn next_number(&mut self, field: &'static str) -> Result<usize, PnmDecodeErrors> {
        let token = self.next_token()?;
        parse_decimal(token).ok_or_else(|| {
            PnmDecodeErrors::InvalidHeader(format!(
                "{field} `{}` is not a decimal number",
                String::from_utf8_lossy(token)
            ))
        })
    }
}

/// Parse a plain ASCII decimal that fits in an `i32`
fn parse_decimal(token: &[u8]) -> Option<usize> {
    if token.is_empty() {
        return None;
    }
    let mut value = 0_usize;

    for byte in token {
        if !byte.is_ascii_digit() {
            return None;
        }
        value = value
            .checked_mul(10)?
            .checked_add(usize::from(byte - b'0'))?;

        if value > i32::MAX as usize {
            return None;
        }
    }
    Some(value)
}

/// Read the header of a `version` stream, leaving `reader`
/// positioned at the first payload byte.
///
/// # Errors
/// - `UnknownMagic` if the magic token is not that of `version`
/// - `InvalidHeader` for fields that are not positive decimals
/// - `UnsupportedDepth` if a max value other than 255 is declared
/// - `LargeDimensions` if the dimensions exceed those in `options`
/// - `TokenTooLong` if a token exceeds `options.get_max_token_len()`
/// - `EndOfStream` if the stream ends before every field was read
pub fn read_header<T: ByteIoTrait>(
    reader: &mut ByteReader<T>, version: PnmVersion, options: &DecoderOptions
) -> Result<PnmHeader, PnmDecodeErrors> {
    let mut tokens = Tokenizer::new(reader, options.get_max_token_len());

    let magic = tokens.next_token()?;

    if !magic.eq_ignore_ascii_case(version.magic().as_bytes()) {
        return Err(PnmDecodeErrors::UnknownMagic(
            String::from_utf8_lossy(magic).into_owned()
        ));
    }

    let cols = tokens.next_number("width")?;
    let rows = tokens.next_number("height")?;

    if cols == 0 || rows == 0 {
        let msg = format!("Zero sized image, width {cols} height {rows}");
        return Err(PnmDecodeErrors::InvalidHeader(msg));
    }
    if cols > options.get_max_width() {
        return Err(PnmDecodeErrors::LargeDimensions(
            options.get_max_width(),
            cols
        ));
    }
    if rows > options.get_max_height() {
        return Err(PnmDecodeErrors::LargeDimensions(
            options.get_max_height(),
            rows
        ));
    }

    let max_value = if version.has_max_value() {
        let max_value = tokens.next_number("max value")?;

        if max_value != 255 {
            return Err(PnmDecodeErrors::UnsupportedDepth(max_value));
        }
        Some(max_value)
    } else {
        None
    };

    info!("Version: {version}");
    info!("Width: {cols}, height: {rows}");

    Ok(PnmHeader {
        version,
        cols,
        rows,
        max_value
    })
}

/// Format the header written in front of a payload
pub fn header_bytes(version: PnmVersion, cols: usize, rows: usize, max_value: usize) -> String {
    match version {
        PnmVersion::P4 => format!("{version}\n{cols} {rows}\n"),
        PnmVersion::P5 | PnmVersion::P6 => format!("{version}\n{cols} {rows}\n{max_value}\n")
    }
}
