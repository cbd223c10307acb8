/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
#![cfg(feature = "png")]

use fourier_core::options::DecoderOptions;
use fourier_core::pixel_kind::PixelKind;
use fourier_image::codecs::ImageFormat;
use fourier_image::image::Image;
use nanorand::Rng;

/// Encode `data` with the reference png encoder
fn reference_png(data: &[u8], width: u32, height: u32, color: png::ColorType) -> Vec<u8> {
    let mut out = vec![];
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
    }
    out
}

#[test]
fn rgb_matches_reference_decoder() {
    let mut rng = nanorand::WyRand::new_seed(1234);

    let mut image = Image::allocate(PixelKind::Rgb, 9, 11).unwrap();
    rng.fill(image.flat_mut::<u8>().unwrap());

    let bytes = image.write_to_vec(ImageFormat::PNG).unwrap();

    let mut reader = png::Decoder::new(bytes.as_slice()).read_info().unwrap();
    let mut frame = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut frame).unwrap();

    assert_eq!((info.width, info.height), (11, 9));
    assert_eq!(info.color_type, png::ColorType::Rgb);
    assert_eq!(&frame[..info.buffer_size()], image.flat::<u8>().unwrap());

    let decoded = Image::read_from_memory(&bytes, DecoderOptions::default()).unwrap();
    assert!(decoded.is_equal(&image).unwrap());
}

#[test]
fn gray_is_expanded_and_alpha_dropped() {
    let gray = reference_png(&[10, 20], 2, 1, png::ColorType::Grayscale);
    let image = Image::read_from_memory(&gray, DecoderOptions::default()).unwrap();

    assert!(image.is_rgb());
    assert_eq!(image.flat::<u8>().unwrap(), &[10, 10, 10, 20, 20, 20]);

    let rgba = reference_png(&[1, 2, 3, 4, 5, 6, 7, 8], 1, 2, png::ColorType::Rgba);
    let image = Image::read_from_memory(&rgba, DecoderOptions::default()).unwrap();

    assert_eq!(image.dimensions().unwrap(), (1, 2));
    assert_eq!(image.flat::<u8>().unwrap(), &[1, 2, 3, 5, 6, 7]);
}

#[test]
fn only_rgb_is_encoded() {
    let gray = Image::allocate(PixelKind::Gray, 2, 2).unwrap();
    assert!(gray.write_to_vec(ImageFormat::PNG).is_err());
}
