/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![cfg(feature = "std")]

use std::io;
use std::io::{BufReader, Read, Seek, SeekFrom};

use crate::bytestream::reader::ByteIoError;
use crate::bytestream::ByteReaderTrait;

impl<T: io::Read + io::Seek> ByteReaderTrait for BufReader<T> {
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        let position = self.stream_position()?;
        if let Err(e) = self.read_exact(buf) {
            // restore the position, a failed read must not advance the cursor
            self.seek(SeekFrom::Start(position))?;
            return Err(ByteIoError::from(e));
        }
        Ok(())
    }

    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), ByteIoError> {
        self.read_exact_bytes(buf)
    }

    fn skip_bytes(&mut self, count: u64) -> Result<u64, ByteIoError> {
        self.seek_relative(i64::try_from(count)?)?;
        self.stream_position().map_err(ByteIoError::from)
    }

    fn z_position(&mut self) -> Result<u64, ByteIoError> {
        self.stream_position().map_err(ByteIoError::from)
    }

    fn z_size(&mut self) -> Result<u64, ByteIoError> {
        let old_pos = self.stream_position()?;
        let len = self.seek(SeekFrom::End(0))?;

        // Avoid seeking a third time when we were already at the end of the
        // stream.
        if old_pos != len {
            self.seek(SeekFrom::Start(old_pos))?;
        }

        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufReader, Cursor};

    use crate::bit_depth::ByteEndian;
    use crate::bytestream::ByteReader;

    #[test]
    fn buffered_reads_match_cursor_reads() {
        let data = Cursor::new(vec![0_u8, 0, 0, 7, 1, 2, 3, 4, 9]);
        let mut reader = ByteReader::new(BufReader::new(data));

        assert_eq!(reader.get_u32_err(ByteEndian::BE).unwrap(), 7);
        assert_eq!(reader.skip(4).unwrap(), 8);
        assert_eq!(reader.remaining().unwrap(), 1);
        assert!(reader.read_fixed_bytes_or_error::<2>().is_err());
        assert_eq!(reader.get_u8_err().unwrap(), 9);
    }
}
