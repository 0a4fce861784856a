/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![cfg(feature = "serde")]

use alloc::format;

use serde::ser::{Serialize, Serializer};

use crate::bit_depth::{BitDepth, ByteEndian};
use crate::colorspace::ColorSpace;

/// Serialize a fieldless enum as the name of its variant
macro_rules! serialize_as_name {
    ($($name:ty),+) => {
        $(
            impl Serialize for $name {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.serialize_str(&format!("{self:?}"))
                }
            }
        )+
    };
}

serialize_as_name!(ColorSpace, BitDepth);

impl Serialize for ByteEndian {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(match self {
            ByteEndian::BE => "big",
            ByteEndian::LE => "little"
        })
    }
}
