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
use fourier_core::pixel_kind::PixelKind;
use fourier_core::status::StatusCode;
use fourier_image::codecs::ImageFormat;
use fourier_image::image::Image;
use fourier_pnm::{read_header, PnmVersion};

#[test]
fn constant_gray_through_pgm() {
    let image = Image::allocate_const(PixelKind::Gray, 4, 4, 7.0).unwrap();

    let mut sink: Vec<u8> = vec![];
    let written = image.encode(ImageFormat::PGM, &mut sink).unwrap();
    assert_eq!(written, sink.len());

    let mut reader = ByteReader::new(Cursor::new(sink));
    let header = read_header(&mut reader, PnmVersion::P5, &DecoderOptions::default()).unwrap();

    assert_eq!(header.cols, 4);
    assert_eq!(header.rows, 4);
    assert_eq!(header.max_value, Some(255));

    let payload = reader.remaining_bytes().unwrap();
    assert_eq!(payload, &[7; 16]);
}

#[test]
fn header_with_comment() {
    let mut bytes = b"P5\n# comment\n12 8\n255\n".to_vec();
    bytes.extend_from_slice(&[3; 96]);

    let image = Image::read_from_memory(&bytes, DecoderOptions::default()).unwrap();

    assert_eq!(image.dimensions().unwrap(), (12, 8));
    assert_eq!(image.max_pixel_value().unwrap(), 255);
    assert!(image.flat::<u8>().unwrap().iter().all(|x| *x == 3));
}

#[test]
fn limits_are_checked_before_allocation() {
    let options = DecoderOptions::default().set_max_width(10);
    let err = Image::read_from_memory(b"P5\n11 1\n255\n", options).unwrap_err();

    assert_eq!(err.code(), StatusCode::InvalidArgument);
}

#[test]
fn truncated_rgb_is_zero_filled() {
    let image = Image::read_from_memory(b"P6\n2 1\n255\n\x01\x02\x03\x04", DecoderOptions::default()).unwrap();

    assert_eq!(image.nested_3b::<u8>().unwrap()[0][1], [4, 0, 0]);
}

#[test]
fn unsupported_depth() {
    let err = Image::read_from_memory(b"P5\n1 1\n65535\n\x00\x00", DecoderOptions::default()).unwrap_err();
    assert_eq!(err.code(), StatusCode::InvalidPixelDepth);
}

#[test]
fn plain_pnm_is_not_implemented() {
    let err = Image::read_from_memory(b"P2\n1 1\n255\n7\n", DecoderOptions::default()).unwrap_err();
    assert_eq!(err.code(), StatusCode::NotImplemented);
}

#[test]
fn split_bands_through_files() {
    let mut image = Image::allocate(PixelKind::Rgb, 2, 2).unwrap();
    for (i, x) in image.flat_mut::<u8>().unwrap().iter_mut().enumerate() {
        *x = i as u8 * 10;
    }
    let bands = image.split_rgb_bands().unwrap();

    let reread: Vec<Image> = bands
        .iter()
        .map(|band| {
            let bytes = band.write_to_vec(ImageFormat::PGM).unwrap();
            Image::read_from_memory(&bytes, DecoderOptions::default()).unwrap()
        })
        .collect();

    let combined = Image::combine_rgb_bands(&reread[0], &reread[1], &reread[2]).unwrap();
    assert!(combined.is_equal(&image).unwrap());
    assert_eq!(combined.count_colors().unwrap(), 4);
}
