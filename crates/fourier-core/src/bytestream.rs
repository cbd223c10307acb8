/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A simple implementation of a bytestream reader and writer.
//!
//! Decoders pull bytes through [`ByteReader`], which wraps anything
//! implementing [`ByteIoTrait`], encoders push bytes through [`ByteWriter`]
//! which wraps anything implementing [`ByteWriterTrait`].
pub use reader::{ByteIoError, ByteReader, SeekFrom};
pub use traits::*;
pub use writer::ByteWriter;

mod reader;
mod traits;
mod writer;
