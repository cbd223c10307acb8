/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A raw PBM, PGM and PPM decoder and encoder
//!
//! The crate understands the binary variants of the netpbm family
//!
//! - P4: 1 bit packed, most significant bit first, `0` on disk is foreground
//! - P5: 8 bit gray scale
//! - P6: 8 bit RGB, band interleaved
//!
//! Only a max value of 255 is supported for P5 and P6.
//!
//! Decoded P4 pixels are unpacked to one byte per pixel with `1` meaning
//! object and `0` background, encoding expects the same layout.
//!
//! # Example
//! ```
//! use std::io::Cursor;
//! use fourier_pnm::{PnmDecoder, PnmEncoder, PnmVersion};
//!
//! let pixels = [7_u8; 16];
//! let mut sink: Vec<u8> = vec![];
//! PnmEncoder::new(&pixels, 4, 4, PnmVersion::P5).encode(&mut sink).unwrap();
//!
//! let mut decoder = PnmDecoder::new(Cursor::new(sink));
//! assert_eq!(decoder.decode().unwrap(), pixels);
//! ```
pub use decoder::*;
pub use encoder::*;
pub use errors::*;
pub use header::*;

mod decoder;
mod encoder;
mod errors;
mod header;
