/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::bytestream::{ByteIoError, ByteReaderTrait};

/// An in memory source of bytes
///
/// This works for anything that can be viewed as a byte slice,
/// e.g `Vec<u8>`, `&[u8]` and `[u8; N]`
///
/// # Example
/// ```
/// use pixkit_core::bytestream::{ByteCursor, ByteReader};
/// let mut reader = ByteReader::new(ByteCursor::new([0xAB_u8, 0x01]));
/// assert_eq!(reader.get_u8_err().unwrap(), 0xAB);
/// assert_eq!(reader.remaining().unwrap(), 1);
/// ```
pub struct ByteCursor<T: AsRef<[u8]>> {
    stream:   T,
    position: usize
}

impl<T: AsRef<[u8]>> ByteCursor<T> {
    pub fn new(buffer: T) -> ByteCursor<T> {
        ByteCursor {
            stream:   buffer,
            position: 0
        }
    }
    #[inline]
    fn len(&self) -> usize {
        self.stream.as_ref().len()
    }
    #[inline]
    fn available(&self) -> &[u8] {
        let start = self.position.min(self.len());
        &self.stream.as_ref()[start..]
    }
}

impl<T: AsRef<[u8]>> ByteReaderTrait for ByteCursor<T> {
    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        let available = self.available();
        if available.len() < buf.len() {
            return Err(ByteIoError::NotEnoughBytes(buf.len(), available.len()));
        }
        buf.copy_from_slice(&available[..buf.len()]);
        self.position += buf.len();
        Ok(())
    }

    #[inline(always)]
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), ByteIoError> {
        self.read_exact_bytes(buf)
    }

    fn skip_bytes(&mut self, count: u64) -> Result<u64, ByteIoError> {
        self.position = usize::try_from(count)
            .ok()
            .and_then(|count| self.position.checked_add(count))
            .ok_or(ByteIoError::SeekError("Skipping past the addressable range"))?;

        Ok(self.position as u64)
    }

    #[inline(always)]
    fn z_position(&mut self) -> Result<u64, ByteIoError> {
        Ok(self.position as u64)
    }

    #[inline(always)]
    fn z_size(&mut self) -> Result<u64, ByteIoError> {
        Ok(self.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use crate::bit_depth::ByteEndian;
    use crate::bytestream::{ByteCursor, ByteIoError, ByteReader};

    #[test]
    fn endian_reads() {
        let data = [0x00_u8, 0x00, 0x01, 0x02, 0x02, 0x01, 0x00, 0x00];
        let mut reader = ByteReader::new(ByteCursor::new(&data[..]));
        assert_eq!(reader.get_u32_err(ByteEndian::BE).unwrap(), 0x0102);
        assert_eq!(reader.get_u32_err(ByteEndian::LE).unwrap(), 0x0102);
        assert_eq!(reader.remaining().unwrap(), 0);
    }

    #[test]
    fn short_read_does_not_advance() {
        let mut reader = ByteReader::new(ByteCursor::new([1_u8, 2, 3]));
        assert!(matches!(
            reader.get_u32_err(ByteEndian::BE),
            Err(ByteIoError::NotEnoughBytes(4, 3))
        ));
        assert_eq!(reader.remaining().unwrap(), 3);
        assert_eq!(reader.read_fixed_bytes_or_error::<3>().unwrap(), [1, 2, 3]);
    }

    #[test]
    fn skip_past_end_fails_the_next_read() {
        let mut reader = ByteReader::new(ByteCursor::new([0_u8; 4]));
        assert_eq!(reader.skip(3).unwrap(), 3);
        assert_eq!(reader.remaining().unwrap(), 1);
        assert_eq!(reader.skip(10).unwrap(), 13);
        assert_eq!(reader.remaining().unwrap(), 0);
        assert!(matches!(
            reader.get_u8_err(),
            Err(ByteIoError::NotEnoughBytes(1, 0))
        ));
    }
}
