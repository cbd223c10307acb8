/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use std::path::PathBuf;

use fourier_core::pixel_kind::PixelKind;
use fourier_core::status::StatusCode;
use fourier_image::codecs::{detect_file, ImageFormat};
use fourier_image::errors::ImageErrors;
use fourier_image::image::Image;
use nanorand::Rng;

fn temp_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("fourier-{}-{name}", std::process::id()))
}

fn random_image(rng: &mut nanorand::WyRand, kind: PixelKind, rows: usize, cols: usize) -> Image {
    let mut image = Image::allocate(kind, rows, cols).unwrap();
    let pixels = image.flat_mut::<u8>().unwrap();
    rng.fill(&mut *pixels);

    if kind == PixelKind::Binary {
        pixels.iter_mut().for_each(|x| *x &= 1);
    }
    image
}

#[test]
fn save_then_open_is_lossless() {
    let mut rng = nanorand::WyRand::new_seed(42);

    let cases = [
        (PixelKind::Binary, "binary.pbm", ImageFormat::PBM),
        (PixelKind::Gray, "gray.pgm", ImageFormat::PGM),
        (PixelKind::Rgb, "rgb.ppm", ImageFormat::PPM)
    ];

    for (kind, name, format) in cases {
        // 13 columns leave a partial byte in every pbm row
        let image = random_image(&mut rng, kind, 7, 13);
        let path = temp_file(name);

        image.save(&path).unwrap();
        assert_eq!(detect_file(&path).unwrap(), format);

        let opened = Image::open(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(opened.kind().unwrap(), kind);
        assert_eq!(opened.dimensions().unwrap(), (13, 7));
        assert!(opened.is_equal(&image).unwrap(), "{name}");
    }
}

#[test]
fn pbm_padding_is_background() {
    let image = Image::allocate_const(PixelKind::Binary, 2, 3, 1.0).unwrap();
    let bytes = image.write_to_vec(ImageFormat::PBM).unwrap();

    // three object pixels, five padding bits stored as background
    assert_eq!(bytes, b"P4\n3 2\n\x1F\x1F");

    let decoded = Image::read_from_memory(&bytes, Default::default()).unwrap();
    assert_eq!(decoded.flat::<u8>().unwrap(), &[1; 6]);
}

#[test]
fn missing_file() {
    let path = temp_file("does-not-exist.pgm");

    let err = Image::open(&path).unwrap_err();
    assert_eq!(err.code(), StatusCode::FileOpen);
    assert!(matches!(detect_file(&path), Err(ImageErrors::FileOpen(_))));
}

#[test]
fn rejected_save_keeps_existing_file() {
    let path = temp_file("keep.ppm");

    let rgb = Image::allocate_const(PixelKind::Rgb, 2, 2, 9.0).unwrap();
    rgb.save_to(&path, ImageFormat::PPM).unwrap();
    let before = std::fs::read(&path).unwrap();

    let gray = Image::allocate(PixelKind::Gray, 2, 2).unwrap();
    let err = gray.save_to(&path, ImageFormat::PPM).unwrap_err();
    assert_eq!(err.code(), StatusCode::InvalidArgument);

    let mut freed = rgb.try_clone().unwrap();
    freed.free().unwrap();
    assert!(freed.save_to(&path, ImageFormat::PPM).is_err());

    assert_eq!(std::fs::read(&path).unwrap(), before);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn save_checks() {
    let gray = Image::allocate(PixelKind::Gray, 2, 2).unwrap();

    let path = temp_file("gray.ppm");
    let _ = std::fs::remove_file(&path);
    let err = gray.save(&path).unwrap_err();
    assert_eq!(err.code(), StatusCode::InvalidArgument);
    assert!(!path.exists());

    let err = gray.save(temp_file("gray.bmp")).unwrap_err();
    assert_eq!(err.code(), StatusCode::Failure);

    let err = gray.write_to_vec(ImageFormat::TIFF).unwrap_err();
    assert_eq!(err.code(), StatusCode::NotImplemented);

    let double = Image::allocate(PixelKind::Double3, 2, 2).unwrap();
    let err = double.write_to_vec(ImageFormat::PPM).unwrap_err();
    assert_eq!(err.code(), StatusCode::InvalidObject);
}

#[test]
fn negate_survives_round_trip() {
    let mut rng = nanorand::WyRand::new_seed(7);
    let image = random_image(&mut rng, PixelKind::Gray, 5, 5);

    let negated = image.negate().unwrap();
    let bytes = negated.write_to_vec(ImageFormat::PGM).unwrap();
    let decoded = Image::read_from_memory(&bytes, Default::default()).unwrap();

    assert!(decoded.negate().unwrap().is_equal(&image).unwrap());
}
