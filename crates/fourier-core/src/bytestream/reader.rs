/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use core::fmt::Formatter;

use crate::bytestream::ByteIoTrait;

/// Enumeration of possible methods to seek within an I/O object.
///
/// It is analogous to the [SeekFrom](std::io::SeekFrom) in the std library
#[derive(Copy, PartialEq, Eq, Clone, Debug)]
pub enum SeekFrom {
    /// Sets the offset to the provided number of bytes.
    Start(u64),
    /// Sets the offset to the size of this object plus the specified number of
    /// bytes.
    End(i64),
    /// Sets the offset to the current position plus the specified number of
    /// bytes.
    Current(i64)
}

impl SeekFrom {
    /// Convert to [SeekFrom](std::io::SeekFrom) from the `std::io` library
    pub(crate) fn to_std_seek(self) -> std::io::SeekFrom {
        match self {
            SeekFrom::Start(pos) => std::io::SeekFrom::Start(pos),
            SeekFrom::End(pos) => std::io::SeekFrom::End(pos),
            SeekFrom::Current(pos) => std::io::SeekFrom::Current(pos)
        }
    }
}

/// Errors raised by the byte readers and writers
pub enum ByteIoError {
    StdIoError(std::io::Error),
    TryFromIntError(core::num::TryFromIntError),
    // requested, read
    NotEnoughBytes(usize, usize),
    Generic(&'static str),
    SeekError(&'static str)
}

impl ByteIoError {
    /// Return true if this error was raised because the
    /// stream ended before a request could be satisfied
    pub fn is_end_of_stream(&self) -> bool {
        match self {
            ByteIoError::StdIoError(err) => err.kind() == std::io::ErrorKind::UnexpectedEof,
            ByteIoError::NotEnoughBytes(_, _) => true,
            _ => false
        }
    }
}

impl core::fmt::Debug for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ByteIoError::StdIoError(err) => {
                writeln!(f, "Underlying I/O error {}", err)
            }
            ByteIoError::TryFromIntError(err) => {
                writeln!(f, "Cannot convert to int {}", err)
            }
            ByteIoError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
            ByteIoError::Generic(err) => {
                writeln!(f, "Generic I/O error: {err}")
            }
            ByteIoError::SeekError(err) => {
                writeln!(f, "Seek error: {err}")
            }
        }
    }
}

impl core::fmt::Display for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for ByteIoError {}

impl From<std::io::Error> for ByteIoError {
    fn from(value: std::io::Error) -> Self {
        ByteIoError::StdIoError(value)
    }
}

impl From<core::num::TryFromIntError> for ByteIoError {
    fn from(value: core::num::TryFromIntError) -> Self {
        ByteIoError::TryFromIntError(value)
    }
}

impl From<&'static str> for ByteIoError {
    fn from(value: &'static str) -> Self {
        ByteIoError::Generic(value)
    }
}

/// A byte reader over any source implementing [`ByteIoTrait`]
///
/// The reader keeps a small scratch buffer for peeks so that
/// callers can look ahead without consuming bytes.
pub struct ByteReader<T: ByteIoTrait> {
    inner:       T,
    temp_buffer: Vec<u8>
}

impl<T: ByteIoTrait> ByteReader<T> {
    pub fn new(source: T) -> ByteReader<T> {
        ByteReader {
            inner:       source,
            temp_buffer: vec![]
        }
    }
    /// Destroy this reader returning
    /// the underlying source of the bytes
    /// from which we were decoding
    #[inline(always)]
    pub fn consume(self) -> T {
        self.inner
    }

    #[inline(always)]
    pub fn skip(&mut self, num: usize) -> Result<u64, ByteIoError> {
        let offset = i64::try_from(num)?;
        self.inner.z_seek(SeekFrom::Current(offset))
    }

    #[inline(always)]
    pub fn rewind(&mut self, num: usize) -> Result<u64, ByteIoError> {
        let offset = i64::try_from(num)?;
        self.inner.z_seek(SeekFrom::Current(-offset))
    }

    #[inline(always)]
    pub fn seek(&mut self, from: SeekFrom) -> Result<u64, ByteIoError> {
        self.inner.z_seek(from)
    }

    /// Read a single byte returning `None` when the stream
    /// has no more bytes
    #[inline]
    pub fn read_u8(&mut self) -> Result<Option<u8>, ByteIoError> {
        let mut buf = [0];
        match self.inner.read_bytes(&mut buf)? {
            0 => Ok(None),
            _ => Ok(Some(buf[0]))
        }
    }

    /// Read a single byte or error out if the stream has ended
    #[inline]
    pub fn read_u8_err(&mut self) -> Result<u8, ByteIoError> {
        let mut buf = [0];
        self.inner.read_exact_bytes(&mut buf)?;
        Ok(buf[0])
    }

    /// Look ahead position bytes and return a reference
    /// to num_bytes from that position, or an error if the
    /// peek would be out of bounds.
    ///
    /// This doesn't increment the position, bytes would have to be discarded
    /// at a later point.
    #[inline]
    pub fn peek_at(&mut self, position: usize, num_bytes: usize) -> Result<&[u8], ByteIoError> {
        // short circuit for zero
        // important since implementations like File will
        // cause a syscall on skip
        if position != 0 {
            // skip position bytes from start
            self.skip(position)?;
        }
        // resize buffer
        self.temp_buffer.resize(num_bytes, 0);
        // read bytes
        let result = self.inner.peek_exact_bytes(&mut self.temp_buffer[..]);

        if position != 0 {
            // rewind back to where we were
            self.rewind(position)?;
        }
        result?;
        Ok(&self.temp_buffer)
    }

    /// Return up to `num_bytes` bytes from the current position
    /// without advancing the stream.
    ///
    /// The returned slice is shorter than `num_bytes` when the
    /// stream ends early and empty when the stream is exhausted.
    pub fn peek_available(&mut self, num_bytes: usize) -> Result<&[u8], ByteIoError> {
        let start = self.inner.z_position()?;
        self.temp_buffer.resize(num_bytes, 0);

        let mut filled = 0;

        while filled < num_bytes {
            match self.inner.read_bytes(&mut self.temp_buffer[filled..])? {
                0 => break,
                n => filled += n
            }
        }
        self.inner.z_seek(SeekFrom::Start(start))?;

        Ok(&self.temp_buffer[..filled])
    }

    /// Read as many bytes as possible into `buf`, stopping early only
    /// when the stream ends.
    ///
    /// Returns the number of bytes actually read.
    pub fn read_fill(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        let mut filled = 0;

        while filled < buf.len() {
            match self.inner.read_bytes(&mut buf[filled..])? {
                0 => break,
                n => filled += n
            }
        }
        Ok(filled)
    }

    #[inline]
    pub fn set_position(&mut self, position: usize) -> Result<(), ByteIoError> {
        self.seek(SeekFrom::Start(position as u64))?;

        Ok(())
    }

    #[inline(always)]
    pub fn eof(&mut self) -> Result<bool, ByteIoError> {
        self.inner.is_eof()
    }

    #[inline(always)]
    pub fn position(&mut self) -> Result<u64, ByteIoError> {
        self.inner.z_position()
    }

    pub fn remaining_bytes(&mut self) -> Result<&[u8], ByteIoError> {
        self.temp_buffer.clear();
        let bytes_read = self.inner.read_remaining(&mut self.temp_buffer)?;
        Ok(&self.temp_buffer[..bytes_read])
    }

    pub fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        self.inner.read_exact_bytes(buf)
    }

    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        self.inner.read_bytes(buf)
    }
}

impl<T> std::io::Read for ByteReader<T>
where
    T: ByteIoTrait
{
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        use std::io::ErrorKind;
        self.read_bytes(buf)
            .map_err(|e| std::io::Error::new(ErrorKind::Other, format!("{:?}", e)))
    }
}
