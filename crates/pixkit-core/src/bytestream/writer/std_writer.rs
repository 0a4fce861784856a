/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![cfg(feature = "std")]

use std::io::Write;

use crate::bytestream::{ByteIoError, ByteWriterTrait};

impl<T: Write> ByteWriterTrait for T {
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        self.write_all(buf).map_err(|e| {
            if e.kind() == std::io::ErrorKind::WriteZero {
                ByteIoError::NotEnoughBuffer(buf.len(), 0)
            } else {
                ByteIoError::StdIoError(e)
            }
        })
    }

    fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), ByteIoError> {
        self.write_all_bytes(buf)
    }

    fn flush_bytes(&mut self) -> Result<(), ByteIoError> {
        self.flush().map_err(ByteIoError::StdIoError)
    }
}
