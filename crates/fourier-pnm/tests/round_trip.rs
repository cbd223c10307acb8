/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use std::io::Cursor;

use fourier_core::bytestream::ByteReader;
use fourier_core::options::DecoderOptions;
use fourier_pnm::{read_header, PnmDecoder, PnmEncoder, PnmVersion};
use nanorand::Rng;

fn encode(pixels: &[u8], cols: usize, rows: usize, version: PnmVersion) -> Vec<u8> {
    let mut sink: Vec<u8> = vec![];
    PnmEncoder::new(pixels, cols, rows, version)
        .encode(&mut sink)
        .unwrap();
    sink
}

fn decode(bytes: Vec<u8>) -> Vec<u8> {
    PnmDecoder::new(Cursor::new(bytes)).decode().unwrap()
}

#[test]
fn random_gray_and_rgb_round_trip() {
    let mut rng = nanorand::WyRand::new_seed(0x5eed);

    for _ in 0..20 {
        let cols = rng.generate_range(1_usize..=37);
        let rows = rng.generate_range(1_usize..=23);

        for version in [PnmVersion::P5, PnmVersion::P6] {
            let mut pixels = vec![0_u8; cols * rows * version.bands()];
            rng.fill(&mut pixels);

            let decoded = decode(encode(&pixels, cols, rows, version));
            assert_eq!(decoded, pixels, "{version} {cols}x{rows}");
        }
    }
}

#[test]
fn random_bitmap_round_trip_with_partial_bytes() {
    let mut rng = nanorand::WyRand::new_seed(42);

    for cols in 1..=17 {
        let rows = rng.generate_range(1_usize..=9);
        let mut pixels = vec![0_u8; cols * rows];
        rng.fill(&mut pixels);
        pixels.iter_mut().for_each(|x| *x &= 1);

        let bytes = encode(&pixels, cols, rows, PnmVersion::P4);
        assert_eq!(bytes.len(), format!("P4\n{cols} {rows}\n").len() + cols.div_ceil(8) * rows);

        assert_eq!(decode(bytes), pixels, "{cols}x{rows}");
    }
}

#[test]
fn constant_gray_end_to_end() {
    let bytes = encode(&[7; 16], 4, 4, PnmVersion::P5);

    let mut reader = ByteReader::new(Cursor::new(bytes));
    let header = read_header(&mut reader, PnmVersion::P5, &DecoderOptions::default()).unwrap();

    assert_eq!((header.cols, header.rows, header.max_value), (4, 4, Some(255)));

    let payload = reader.remaining_bytes().unwrap();
    assert_eq!(payload, &[7; 16]);
}
