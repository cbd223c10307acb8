/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use fourier_core::bytestream::{ByteIoTrait, ByteReader};
use fourier_core::log::warn;
use fourier_core::options::DecoderOptions;

use crate::errors::PnmDecodeErrors;
use crate::header::{read_header, PnmHeader, PnmVersion};

/// An instance of a PNM decoder
///
/// The decoder can currently decode P4, P5 and P6 formats
pub struct PnmDecoder<T: ByteIoTrait> {
    reader:        ByteReader<T>,
    header:        Option<PnmHeader>,
    missing_bytes: usize,
    options:       DecoderOptions
}

impl<T: ByteIoTrait> PnmDecoder<T> {
    /// Create a new pnm decoder with default options
    ///
    /// # Arguments
    /// - data: PNM encoded pixels
    ///
    /// # Example
    /// ```
    /// use std::io::Cursor;
    /// use fourier_pnm::PnmDecoder;
    /// let mut decoder = PnmDecoder::new(Cursor::new(b"NOT VALID PPM"));
    ///
    /// assert!(decoder.decode().is_err());
    /// ```
    pub fn new(data: T) -> PnmDecoder<T> {
        PnmDecoder::new_with_options(DecoderOptions::default(), data)
    }

    /// Create a new PNM decoder with the specified options
    pub fn new_with_options(options: DecoderOptions, data: T) -> PnmDecoder<T> {
        PnmDecoder {
            reader: ByteReader::new(data),
            header: None,
            missing_bytes: 0,
            options
        }
    }

    /// Read PNM headers and store them in internal state
    ///
    /// The version is picked from the first two bytes of the stream.
    /// Calling this more than once is a no-op.
    pub fn read_headers(&mut self) -> Result<(), PnmDecodeErrors> {
        if self.header.is_some() {
            return Ok(());
        }
        let magic = self.reader.peek_available(2)?;
        if magic.len() < 2 {
            return Err(PnmDecodeErrors::EndOfStream);
        }

        let version = PnmVersion::from_magic(magic).ok_or_else(|| {
            PnmDecodeErrors::UnknownMagic(String::from_utf8_lossy(magic).into_owned())
        })?;

        self.read_headers_for(version)
    }

    /// Read headers for a stream already known to be `version`
    pub fn read_headers_for(&mut self, version: PnmVersion) -> Result<(), PnmDecodeErrors> {
        if self.header.is_none() {
            self.header = Some(read_header(&mut self.reader, version, &self.options)?);
        }
        Ok(())
    }

    /// Return the parsed header or none if headers aren't decoded
    pub const fn get_header(&self) -> Option<PnmHeader> {
        self.header
    }

    /// Return image dimensions as `(cols, rows)` or none if headers aren't decoded
    pub fn get_dimensions(&self) -> Option<(usize, usize)> {
        self.header.map(|header| (header.cols, header.rows))
    }

    /// Return the version of the stream or none if headers aren't decoded
    pub fn get_version(&self) -> Option<PnmVersion> {
        self.header.map(|header| header.version)
    }

    /// Number of payload bytes the stream lacked during the last decode
    pub const fn get_missing_bytes(&self) -> usize {
        self.missing_bytes
    }

    /// Return the number of bytes required to hold a decoded image frame
    pub fn output_buffer_size(&self) -> Option<usize> {
        self.header.map(|header| header.output_size())
    }

    /// Decode the stream and return the pixels.
    ///
    /// P4 pixels are unpacked to one byte each, `1` for object and `0` for background.
    /// P6 pixels are band interleaved.
    pub fn decode(&mut self) -> Result<Vec<u8>, PnmDecodeErrors> {
        self.read_headers()?;
        let size = self
            .output_buffer_size()
            .ok_or(PnmDecodeErrors::GenericStatic("Headers were not decoded"))?;

        let mut out = vec![0; size];
        self.decode_into(&mut out)?;
        Ok(out)
    }

    /// Decode the stream into `out`.
    ///
    /// `out` must be at least [`output_buffer_size`](Self::output_buffer_size) bytes.
    /// Pixels whose payload is missing from the stream are set to zero.
    pub fn decode_into(&mut self, out: &mut [u8]) -> Result<(), PnmDecodeErrors> {
        self.read_headers()?;

        let header = self
            .header
            .ok_or(PnmDecodeErrors::GenericStatic("Headers were not decoded"))?;

        let size = header.output_size();

        if out.len() < size {
            let msg = format!(
                "Output buffer too small, expected at least {size} bytes but found {}",
                out.len()
            );
            return Err(PnmDecodeErrors::Generic(msg));
        }
        let out = &mut out[..size];

        let expected = header.payload_size();

        let read = match header.version {
            PnmVersion::P4 => {
                let mut packed = vec![0_u8; expected];
                let read = self.reader.read_fill(&mut packed)?;
                unpack_bits(&packed[..read], header.cols, out);
                read
            }
            PnmVersion::P5 | PnmVersion::P6 => {
                let read = self.reader.read_fill(out)?;
                out[read..].fill(0);
                read
            }
        };

        self.missing_bytes = expected - read;

        if self.missing_bytes != 0 && self.options.get_policy().get_warnings() {
            warn!(
                "Warning in decode: payload truncated, expected {expected} bytes but found {read}, missing pixels are set to zero"
            );
        }

        Ok(())
    }
}

/// Unpack `packed` rows of 1 bit pixels into `out`.
///
/// `0` bits on disk are foreground and become `1`.
/// Pixels past the end of `packed` become `0`.
fn unpack_bits(packed: &[u8], cols: usize, out: &mut [u8]) {
    let row_bytes = cols.div_ceil(8);

    for (row, out_row) in out.chunks_exact_mut(cols).enumerate() {
        let start = row * row_bytes;
        let in_row = packed.get(start..).unwrap_or(&[]);

        for (col, pix) in out_row.iter_mut().enumerate() {
            *pix = match in_row.get(col / 8) {
                Some(&byte) => u8::from((byte >> (7 - (col % 8))) & 1 == 0),
                None => 0
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::decoder::{unpack_bits, PnmDecoder};
    use crate::header::PnmVersion;
    use crate::PnmDecodeErrors;

    #[test]
    fn unpack_inverts_and_reads_msb_first() {
        let mut out = [9_u8; 10];
        unpack_bits(&[0b0111_1110, 0b1011_1111], 10, &mut out);

        assert_eq!(out, [1, 0, 0, 0, 0, 0, 0, 1, 0, 1]);
    }

    #[test]
    fn decode_gray() {
        let mut bytes = b"P5\n3 2\n255\n".to_vec();
        bytes.extend([1, 2, 3, 4, 5, 6]);

        let mut decoder = PnmDecoder::new(Cursor::new(bytes));
        let pixels = decoder.decode().unwrap();

        assert_eq!(decoder.get_dimensions(), Some((3, 2)));
        assert_eq!(decoder.get_version(), Some(PnmVersion::P5));
        assert_eq!(pixels, [1, 2, 3, 4, 5, 6]);
        assert_eq!(decoder.get_missing_bytes(), 0);
    }

    #[test]
    fn truncated_rgb_is_zero_filled() {
        let mut bytes = b"P6 2 1 255\n".to_vec();
        bytes.extend([10, 20, 30, 40]);

        let mut decoder = PnmDecoder::new(Cursor::new(bytes));
        let pixels = decoder.decode().unwrap();

        assert_eq!(pixels, [10, 20, 30, 40, 0, 0]);
        assert_eq!(decoder.get_missing_bytes(), 2);
    }

    #[test]
    fn truncated_bitmap_is_background() {
        // second row is missing, it must not turn into foreground
        let bytes = b"P4 3 2\n\x1f".to_vec();

        let mut decoder = PnmDecoder::new(Cursor::new(bytes));
        let pixels = decoder.decode().unwrap();

        assert_eq!(pixels, [1, 1, 1, 0, 0, 0]);
        assert_eq!(decoder.get_missing_bytes(), 1);
    }

    #[test]
    fn unknown_magic() {
        let mut decoder = PnmDecoder::new(Cursor::new(b"P3 1 1 255\n1 1 1".to_vec()));

        assert!(matches!(
            decoder.decode(),
            Err(PnmDecodeErrors::UnknownMagic(_))
        ));
    }

    #[test]
    fn short_stream_is_end_of_stream() {
        for bytes in [&b""[..], b"P"] {
            let mut decoder = PnmDecoder::new(Cursor::new(bytes.to_vec()));

            assert!(matches!(
                decoder.read_headers(),
                Err(PnmDecodeErrors::EndOfStream)
            ));
        }
    }

    #[test]
    fn small_output_buffer() {
        let mut decoder = PnmDecoder::new(Cursor::new(b"P5 2 2 255\n\x01\x02\x03\x04".to_vec()));
        let mut out = [0; 3];

        assert!(decoder.decode_into(&mut out).is_err());
    }
}
