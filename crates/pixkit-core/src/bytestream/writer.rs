/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::bit_depth::ByteEndian;
use crate::bytestream::{ByteIoError, ByteWriterTrait};

mod no_std_writer;
mod std_writer;

/// Encapsulates a simple byte writer with
/// support for endian aware writes
pub struct ByteWriter<T: ByteWriterTrait> {
    buffer:        T,
    bytes_written: usize
}

impl<T: ByteWriterTrait> ByteWriter<T> {
    /// Create a new bytestream writer
    pub fn new(data: T) -> ByteWriter<T> {
        ByteWriter {
            buffer:        data,
            bytes_written: 0
        }
    }

    /// Write all bytes from `buf` into the bytestream and return
    /// an error if not all bytes can be written
    #[inline]
    pub fn write_all(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        self.buffer.write_all_bytes(buf)?;
        self.bytes_written += buf.len();
        Ok(())
    }

    /// Write `count` zero bytes
    pub fn write_zeroes(&mut self, mut count: usize) -> Result<(), ByteIoError> {
        const ZEROES: [u8; 64] = [0; 64];

        while count > 0 {
            let chunk = count.min(ZEROES.len());
            self.write_all(&ZEROES[..chunk])?;
            count -= chunk;
        }
        Ok(())
    }

    #[inline]
    pub fn write_const_bytes<const N: usize>(
        &mut self, byte: &[u8; N]
    ) -> Result<(), ByteIoError> {
        self.buffer.write_const_bytes(byte)?;
        self.bytes_written += N;
        Ok(())
    }

    /// Write a `u32` in the byte order given by `endian`
    #[inline(always)]
    pub fn write_u32_err(&mut self, value: u32, endian: ByteEndian) -> Result<(), ByteIoError> {
        let bytes = match endian {
            ByteEndian::BE => value.to_be_bytes(),
            ByteEndian::LE => value.to_le_bytes()
        };
        self.write_const_bytes(&bytes)
    }

    /// Return the number of bytes written by this encoder
    pub const fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Push buffered bytes through to the sink
    pub fn flush(&mut self) -> Result<(), ByteIoError> {
        self.buffer.flush_bytes()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::bit_depth::ByteEndian;
    use crate::bytestream::{ByteIoError, ByteWriter};

    #[test]
    fn endian_writes() {
        let mut sink = Vec::new();
        let mut writer = ByteWriter::new(&mut sink);
        writer.write_u32_err(0xAABB_CCDD, ByteEndian::BE).unwrap();
        writer.write_u32_err(0x0102, ByteEndian::LE).unwrap();
        writer.write_zeroes(3).unwrap();
        writer.flush().unwrap();
        assert_eq!(writer.bytes_written(), 11);
        assert_eq!(
            sink,
            [0xAA, 0xBB, 0xCC, 0xDD, 0x02, 0x01, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn slice_sink_overflow_errors() {
        let mut storage = [0_u8; 2];
        let mut writer = ByteWriter::new(&mut storage[..]);
        assert!(matches!(
            writer.write_u32_err(1, ByteEndian::BE),
            Err(ByteIoError::NotEnoughBuffer(4, _))
        ));
        assert_eq!(writer.bytes_written(), 0);
    }
}
