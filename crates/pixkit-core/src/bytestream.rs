/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A simple implementation of a bytestream reader
//! and writer.
//!
//! Reads and writes are endian aware, every multi-byte value
//! can be read or written in big or little endian order, or in an
//! order only known at runtime via [`ByteEndian`](crate::bit_depth::ByteEndian).
pub use reader::cursor::ByteCursor;
pub use reader::{ByteIoError, ByteReader};
pub use traits::*;
pub use writer::ByteWriter;

mod reader;
mod traits;
mod writer;
