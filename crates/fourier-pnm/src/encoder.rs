/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use fourier_core::bytestream::{ByteWriter, ByteWriterTrait};

use crate::errors::PnmEncodeErrors;
use crate::header::{header_bytes, PnmVersion};

/// A PNM encoder
///
/// Pixels are expected in the layout [`PnmDecoder`](crate::PnmDecoder) produces,
/// i.e one byte per pixel for P4 where any non zero value is object.
pub struct PnmEncoder<'a> {
    data:      &'a [u8],
    cols:      usize,
    rows:      usize,
    version:   PnmVersion,
    max_value: i64
}

impl<'a> PnmEncoder<'a> {
    /// Create a new encoder for `data` with a max value of 255
    pub fn new(data: &'a [u8], cols: usize, rows: usize, version: PnmVersion) -> PnmEncoder<'a> {
        PnmEncoder {
            data,
            cols,
            rows,
            version,
            max_value: 255
        }
    }

    /// Set the max value written in P5 and P6 headers
    pub fn set_max_value(mut self, max_value: i64) -> Self {
        self.max_value = max_value;
        self
    }

    /// Encode the pixels into `sink`, writing the header first
    ///
    /// Returns the number of bytes written
    pub fn encode<T: ByteWriterTrait>(&self, sink: T) -> Result<usize, PnmEncodeErrors> {
        if self.cols == 0 || self.rows == 0 {
            return Err(PnmEncodeErrors::Static("Zero sized image"));
        }
        let expected = self.cols * self.rows * self.version.bands();

        if self.data.len() != expected {
            return Err(PnmEncodeErrors::DimensionsMismatch(
                expected,
                self.data.len()
            ));
        }
        if self.version.has_max_value() && !(1..=255).contains(&self.max_value) {
            return Err(PnmEncodeErrors::UnsupportedDepth(self.max_value));
        }

        let mut writer = ByteWriter::new(sink);

        let header = header_bytes(
            self.version,
            self.cols,
            self.rows,
            self.max_value as usize
        );
        writer.write_all(header.as_bytes())?;

        match self.version {
            PnmVersion::P4 => {
                let mut packed = vec![0; self.version.row_bytes(self.cols)];

                for row in self.data.chunks_exact(self.cols) {
                    pack_row(row, &mut packed);
                    writer.write_all(&packed)?;
                }
            }
            PnmVersion::P5 | PnmVersion::P6 => writer.write_all(self.data)?
        }
        writer.flush()?;

        Ok(writer.bytes_written())
    }
}

/// Pack a row of pixels into bits, most significant bit first,
/// then invert so that `0` on disk is foreground.
///
/// Unused low bits of the last byte are clear before inversion
/// so they are read back as background.
fn pack_row(row: &[u8], packed: &mut [u8]) {
    for (byte, pixels) in packed.iter_mut().zip(row.chunks(8)) {
        let mut bits = 0_u8;

        for (pos, pix) in pixels.iter().enumerate() {
            bits |= u8::from(*pix != 0) << (7 - pos);
        }
        *byte = !bits;
    }
}

#[cfg(test)]
mod tests {
    use crate::encoder::{pack_row, PnmEncoder};
    use crate::header::PnmVersion;
    use crate::PnmEncodeErrors;

    #[test]
    fn partial_byte_padding_is_background() {
        let mut packed = [0; 2];
        pack_row(&[1, 0, 1, 1, 1, 1, 1, 1, 1, 1], &mut packed);

        assert_eq!(packed, [0b0100_0000, 0b0011_1111]);
    }

    #[test]
    fn header_and_payload() {
        let mut sink: Vec<u8> = vec![];
        let written = PnmEncoder::new(&[7; 4], 2, 2, PnmVersion::P5)
            .encode(&mut sink)
            .unwrap();

        assert_eq!(sink, b"P5\n2 2\n255\n\x07\x07\x07\x07");
        assert_eq!(written, sink.len());
    }

    #[test]
    fn bitmap_rows_are_padded_separately() {
        let mut sink: Vec<u8> = vec![];
        PnmEncoder::new(&[1, 0, 0, 1, 1, 1], 3, 2, PnmVersion::P4)
            .encode(&mut sink)
            .unwrap();

        assert_eq!(sink, b"P4\n3 2\n\x7f\x1f");
    }

    #[test]
    fn length_mismatch() {
        let err = PnmEncoder::new(&[0; 5], 2, 1, PnmVersion::P6)
            .encode(Vec::<u8>::new())
            .unwrap_err();

        assert!(matches!(err, PnmEncodeErrors::DimensionsMismatch(6, 5)));
    }

    #[test]
    fn max_value_must_fit_a_byte() {
        let err = PnmEncoder::new(&[0; 1], 1, 1, PnmVersion::P5)
            .set_max_value(i64::from(i32::MAX))
            .encode(Vec::<u8>::new())
            .unwrap_err();

        assert!(matches!(err, PnmEncodeErrors::UnsupportedDepth(_)));
    }
}
