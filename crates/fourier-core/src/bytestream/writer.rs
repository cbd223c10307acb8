/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use crate::bytestream::{ByteIoError, ByteWriterTrait};

/// Encapsulates a simple byte writer which keeps
/// track of how many bytes went into the sink
pub struct ByteWriter<T: ByteWriterTrait> {
    inner:         T,
    bytes_written: usize
}

impl<T: ByteWriterTrait> ByteWriter<T> {
    /// Create a new writer for the sink
    pub fn new(sink: T) -> ByteWriter<T> {
        ByteWriter {
            inner:         sink,
            bytes_written: 0
        }
    }

    /// Write all bytes in `buf` or return an error
    #[inline]
    pub fn write_all(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        self.inner.write_all_bytes(buf)?;
        self.bytes_written += buf.len();
        Ok(())
    }

    /// Write a single byte
    #[inline]
    pub fn write_u8(&mut self, byte: u8) -> Result<(), ByteIoError> {
        self.write_all(&[byte])
    }

    /// Return the number of bytes the writer has written
    ///
    /// ```
    /// use fourier_core::bytestream::ByteWriter;
    /// let mut sink = vec![];
    /// let mut writer = ByteWriter::new(&mut sink);
    /// writer.write_all(b"P5").unwrap();
    /// assert_eq!(writer.bytes_written(), 2);
    /// ```
    pub const fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Flush the underlying sink
    pub fn flush(&mut self) -> Result<(), ByteIoError> {
        self.inner.flush_bytes()
    }

    /// Destroy the writer returning the underlying sink
    pub fn consume(self) -> T {
        self.inner
    }
}

impl<T: ByteWriterTrait> std::io::Write for ByteWriter<T> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let written = self.inner.write_bytes(buf).map_err(std::io::Error::other)?;
        self.bytes_written += written;
        Ok(written)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush_bytes().map_err(std::io::Error::other)
    }
}
