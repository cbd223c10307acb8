/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by all fourier libraries
//!
//! This crate provides a set of core routines shared
//! by the pixel codecs and the image crate.
//!
//! It currently contains
//!
//! - A bytestream reader and writer abstraction over `std::io`
//! - The pixel kind table describing the seven image kinds
//! - Status codes and their human readable descriptions
//! - Decoder options and the error policy shared by all routines
//! - A logging shim which forwards to the `log` crate when enabled
//!
//! # Features
//!  - `log`: Forward the logging macros to the [`log`](https://docs.rs/log) crate,
//!     otherwise they compile to nothing.
//!
//!  - `serde`: Enables serializing of some of the data structures
//!     present in the crate
#![macro_use]

pub mod bytestream;
#[cfg(not(feature = "log"))]
pub mod log;
#[cfg(feature = "log")]
pub use log;
pub mod options;
pub mod pixel_kind;
pub mod serde;
pub mod status;
