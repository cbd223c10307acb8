/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Traits for reading and writing images in fourier
//!
//! This exposes the traits and implementations for readers
//! and writers used by the pixel codecs.

use std::io::{BufRead, BufReader, Cursor, Read, Seek, Write};

use crate::bytestream::reader::{ByteIoError, SeekFrom};

/// The Input trait implemented for readers.
///
/// This provides the basic functions the decoders and the format
/// sniffer need, i.e reads, peeks that do not advance the stream and seeks.
///
/// It is implemented for [`Cursor`] over anything that can be viewed as bytes
/// and for [`BufReader`] over any `Read + Seek` source such as a [`File`](std::fs::File).
pub trait ByteIoTrait {
    /// Read exact bytes required to fill `buf` or return an error if that isn't possible
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError>;

    /// Read bytes into `buf` returning how many bytes you have read or an error if one occurred
    ///
    /// A return of `Ok(0)` for a non-empty `buf` means the end of the stream was reached.
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError>;

    /// Reads data into provided buffer but does not advance read position.
    fn peek_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError>;

    /// Fill `buf` completely without advancing the read position, or error out
    fn peek_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError>;

    /// Seek into a new position from the buffer
    fn z_seek(&mut self, from: SeekFrom) -> Result<u64, ByteIoError>;

    /// Report whether we are at the end of a stream.
    fn is_eof(&mut self) -> Result<bool, ByteIoError>;

    /// Return the current position of the inner cursor.
    fn z_position(&mut self) -> Result<u64, ByteIoError>;

    /// Read all bytes remaining in this input to `sink` until we hit eof
    ///
    /// # Returns
    /// - `Ok(usize)` The actual number of bytes added to the sink
    /// - `Err()` An error that occurred when reading bytes
    fn read_remaining(&mut self, sink: &mut Vec<u8>) -> Result<usize, ByteIoError>;
}

impl<T> ByteIoTrait for Cursor<T>
where
    T: AsRef<[u8]>
{
    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        self.read_exact(buf).map_err(ByteIoError::from)
    }

    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        self.read(buf).map_err(ByteIoError::from)
    }

    #[inline(always)]
    fn peek_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        let start = self.position();
        let bytes_read = self.read_bytes(buf)?;
        self.set_position(start);
        Ok(bytes_read)
    }

    #[inline(always)]
    fn peek_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        let start = self.position();
        let result = self.read_exact_bytes(buf);
        self.set_position(start);
        result
    }

    #[inline(always)]
    fn z_seek(&mut self, from: SeekFrom) -> Result<u64, ByteIoError> {
        self.seek(from.to_std_seek()).map_err(ByteIoError::from)
    }

    #[inline(always)]
    fn is_eof(&mut self) -> Result<bool, ByteIoError> {
        Ok(self.position() as usize >= self.get_ref().as_ref().len())
    }

    fn z_position(&mut self) -> Result<u64, ByteIoError> {
        Ok(self.position())
    }

    fn read_remaining(&mut self, sink: &mut Vec<u8>) -> Result<usize, ByteIoError> {
        self.read_to_end(sink).map_err(ByteIoError::from)
    }
}

impl<T: Read + Seek> ByteIoTrait for BufReader<T> {
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        self.read_exact(buf).map_err(ByteIoError::from)
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        self.read(buf).map_err(ByteIoError::from)
    }

    fn peek_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        // first read bytes to the buffer
        let bytes_read = self.read_bytes(buf)?;
        let converted = -i64::try_from(bytes_read).map_err(ByteIoError::from)?;
        self.seek_relative(converted).map_err(ByteIoError::from)?;

        Ok(bytes_read)
    }

    fn peek_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        let start = self.stream_position()?;

        if let Err(e) = self.read_exact_bytes(buf) {
            // read_exact leaves the position unspecified on failure
            self.seek(std::io::SeekFrom::Start(start))?;
            return Err(e);
        }
        let converted = -i64::try_from(buf.len()).map_err(ByteIoError::from)?;
        self.seek_relative(converted).map_err(ByteIoError::from)?;

        Ok(())
    }

    fn z_seek(&mut self, from: SeekFrom) -> Result<u64, ByteIoError> {
        self.seek(from.to_std_seek()).map_err(ByteIoError::from)
    }

    fn is_eof(&mut self) -> Result<bool, ByteIoError> {
        self.fill_buf()
            .map(|b| b.is_empty())
            .map_err(ByteIoError::from)
    }

    fn z_position(&mut self) -> Result<u64, ByteIoError> {
        self.stream_position().map_err(ByteIoError::from)
    }

    fn read_remaining(&mut self, sink: &mut Vec<u8>) -> Result<usize, ByteIoError> {
        self.read_to_end(sink).map_err(ByteIoError::from)
    }
}

/// The writer trait implemented for the fourier encoders
///
/// Anything that implements [`Write`] can be used as a sink
/// for writing encoded images
pub trait ByteWriterTrait {
    /// Write some bytes into the sink returning number of bytes written or
    /// an error if something bad happened
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, ByteIoError>;

    /// Write all bytes to the sink or return an error if something occurred
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError>;

    /// Ensure bytes are written to the sink.
    fn flush_bytes(&mut self) -> Result<(), ByteIoError>;
}

impl<W: Write> ByteWriterTrait for W {
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, ByteIoError> {
        self.write(buf).map_err(ByteIoError::StdIoError)
    }

    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        self.write_all(buf).map_err(ByteIoError::StdIoError)
    }

    fn flush_bytes(&mut self) -> Result<(), ByteIoError> {
        self.flush().map_err(ByteIoError::StdIoError)
    }
}
