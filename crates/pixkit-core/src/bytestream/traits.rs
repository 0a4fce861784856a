/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Traits for reading and writing images in pixkit
//!
//! Decoders are generic over [`ByteReaderTrait`] and encoders over
//! [`ByteWriterTrait`] so the same codec works on in memory buffers and files.

use crate::bytestream::reader::ByteIoError;

/// The Input trait implemented for readers.
///
/// # Considerations
///
/// If you have an in memory buffer, prefer [`ByteCursor`](crate::bytestream::ByteCursor)
/// over `std::io::Cursor`, which has no implementation here.
pub trait ByteReaderTrait {
    /// Read exact bytes required to fill `buf` or return an error if that isn't possible
    ///
    ///  ## Errors
    /// In case of an error, the implementation should not increment the internal position
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError>;

    /// Same as [`read_exact_bytes`](Self::read_exact_bytes) but for
    /// sizes known at compile time
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), ByteIoError>;

    /// Move `count` bytes forward and return the new position.
    ///
    /// Skipping past the end is allowed, the next read fails instead.
    fn skip_bytes(&mut self, count: u64) -> Result<u64, ByteIoError>;
    /// Return the current position of the inner cursor.
    fn z_position(&mut self) -> Result<u64, ByteIoError>;
    /// Return the total size of the stream in bytes
    fn z_size(&mut self) -> Result<u64, ByteIoError>;
}

/// The writer trait implemented by encoder sinks
///
/// Anything that implements this trait can be used as a sink
/// for writing encoded images
pub trait ByteWriterTrait {
    /// Write all bytes to the sink or return an error
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError>;
    /// Write a fixed number of bytes and error out if we can't write all of them
    fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), ByteIoError>;
    /// Ensure bytes are written to the sink.
    fn flush_bytes(&mut self) -> Result<(), ByteIoError>;
}
