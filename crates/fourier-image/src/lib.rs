/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The image value of the fourier image toolkit
//!
//! This crate ties together
//! - [`buffer`]: contiguous pixel storage of rank 1 to 3 with nested views
//! - [`image`]: a tagged image owning one buffer, in one of seven pixel kinds
//! - [`codecs`]: format detection by magic bytes, plus reading and writing
//!   raw PBM/PGM/PPM and (with the `png` feature) PNG
//! - [`context`]: logging and escalation of errors according to an error policy
//!
//! # Example
//! ```
//! use fourier_core::pixel_kind::PixelKind;
//! use fourier_image::codecs::ImageFormat;
//! use fourier_image::image::Image;
//!
//! let image = Image::allocate_const(PixelKind::Gray, 4, 4, 7.0).unwrap();
//! let encoded = image.write_to_vec(ImageFormat::PGM).unwrap();
//! assert!(encoded.starts_with(b"P5\n4 4\n255\n"));
//!
//! let decoded = Image::read_from_memory(&encoded, Default::default()).unwrap();
//! assert!(decoded.is_equal(&image).unwrap());
//! ```
//!
//! # Features
//! - `png`: PNG decoding and encoding through the `png` crate, on by default
//! - `log`: route diagnostics through the `log` facade, on by default
//! - `serde-support`: `Serialize` for [`ImageInfo`](image::ImageInfo) and [`ImageFormat`](codecs::ImageFormat)

pub mod buffer;
pub mod codecs;
pub mod context;
pub mod errors;
pub mod image;
mod ops;
mod serde;
pub mod traits;
