/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

pub const VIFF_MAGIC: u8 = 0xAB;
/// Fixed header size, comment included
pub const VIFF_HEADER_SIZE: usize = 1024;
pub const VIFF_COMMENT_SIZE: usize = 512;
pub const VIFF_HEADER_PADDING: usize = 420;
/// Comments this short are treated as absent
pub const VIFF_MIN_COMMENT_LENGTH: usize = 4;

pub const VFF_FILE_TYPE_IMAGE: u8 = 1;
pub const VFF_RELEASE: u8 = 1;
pub const VFF_VERSION: u8 = 3;

pub const VFF_DEP_IEEEORDER: u8 = 0x2;
pub const VFF_DEP_DECORDER: u8 = 0x4;
pub const VFF_DEP_NSORDER: u8 = 0x8;

pub const VFF_DES_RAW: u32 = 0;
pub const VFF_LOC_IMPLICIT: u32 = 1;

pub const VFF_CM_NONE: u32 = 0;
pub const VFF_CM_NTSC_RGB: u32 = 1;
pub const VFF_CM_GENERIC_RGB: u32 = 15;

/// Largest colormap the decoder accepts
pub const VIFF_MAX_MAP_COLUMNS: u32 = 1 << 16;

/// `1.0f32`, written for the x and y pixel size
pub const VIFF_UNIT_PIXEL_SIZE: u32 = 0x3F80_0000;

/// How pixel samples are stored
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StorageType {
    /// One bit per pixel, rows padded to whole bytes
    Bit,
    OneByte,
    /// Signed 16 bit integers
    TwoByte,
    /// Signed 32 bit integers
    FourByte,
    Float,
    Double
}

impl StorageType {
    pub const fn from_u32(value: u32) -> Option<StorageType> {
        match value {
            0 => Some(StorageType::Bit),
            1 => Some(StorageType::OneByte),
            2 => Some(StorageType::TwoByte),
            4 => Some(StorageType::FourByte),
            5 => Some(StorageType::Float),
            9 => Some(StorageType::Double),
            _ => None
        }
    }

    pub const fn to_u32(self) -> u32 {
        match self {
            StorageType::Bit => 0,
            StorageType::OneByte => 1,
            StorageType::TwoByte => 2,
            StorageType::FourByte => 4,
            StorageType::Float => 5,
            StorageType::Double => 9
        }
    }

    /// Bytes per stored sample, bit storage counts packed bytes
    pub const fn size_of(self) -> usize {
        match self {
            StorageType::Bit | StorageType::OneByte => 1,
            StorageType::TwoByte => 2,
            StorageType::FourByte | StorageType::Float => 4,
            StorageType::Double => 8
        }
    }
}

/// How colormap entries are stored
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MapStorageType {
    None,
    OneByte,
    TwoByte,
    FourByte,
    Float,
    Double
}

impl MapStorageType {
    pub const fn from_u32(value: u32) -> Option<MapStorageType> {
        match value {
            0 => Some(MapStorageType::None),
            1 => Some(MapStorageType::OneByte),
            2 => Some(MapStorageType::TwoByte),
            4 => Some(MapStorageType::FourByte),
            5 => Some(MapStorageType::Float),
            7 => Some(MapStorageType::Double),
            _ => None
        }
    }

    pub const fn to_u32(self) -> u32 {
        match self {
            MapStorageType::None => 0,
            MapStorageType::OneByte => 1,
            MapStorageType::TwoByte => 2,
            MapStorageType::FourByte => 4,
            MapStorageType::Float => 5,
            MapStorageType::Double => 7
        }
    }

    /// Bytes per stored entry, a map without a declared type is read as bytes
    pub const fn size_of(self) -> usize {
        match self {
            MapStorageType::None | MapStorageType::OneByte => 1,
            MapStorageType::TwoByte => 2,
            MapStorageType::FourByte | MapStorageType::Float => 4,
            MapStorageType::Double => 8
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MapScheme {
    None,
    /// Each band has its own map plane
    OnePerBand,
    /// Bands share a map
    Shared
}

impl MapScheme {
    pub const fn from_u32(value: u32) -> Option<MapScheme> {
        match value {
            0 => Some(MapScheme::None),
            1 => Some(MapScheme::OnePerBand),
            3 => Some(MapScheme::Shared),
            _ => None
        }
    }

    pub const fn to_u32(self) -> u32 {
        match self {
            MapScheme::None => 0,
            MapScheme::OnePerBand => 1,
            MapScheme::Shared => 3
        }
    }
}
