/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The fixed 1024 byte VIFF header
use alloc::string::String;
use alloc::vec::Vec;

use pixkit_core::bit_depth::ByteEndian;
use pixkit_core::bytestream::{ByteReader, ByteReaderTrait, ByteWriter, ByteWriterTrait};
use pixkit_core::log::trace;
use pixkit_core::options::DecoderOptions;

use crate::constants::{
    MapScheme, MapStorageType, StorageType, VFF_CM_GENERIC_RGB, VFF_CM_NONE, VFF_CM_NTSC_RGB,
    VFF_DEP_DECORDER, VFF_DEP_NSORDER, VFF_DES_RAW, VFF_LOC_IMPLICIT, VIFF_COMMENT_SIZE,
    VIFF_HEADER_PADDING, VIFF_MAGIC, VIFF_MAX_MAP_COLUMNS, VIFF_MIN_COMMENT_LENGTH
};
use crate::errors::ViffDecodeErrors;

/// A VIFF header as stored in the file.
///
/// Field names follow the format, note `rows` holds the image
/// width and `columns` the image height.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViffHeader {
    pub file_type:          u8,
    pub release:            u8,
    pub version:            u8,
    pub machine_dependency: u8,
    pub comment:            Option<String>,
    pub rows:               u32,
    pub columns:            u32,
    pub subrows:            u32,
    pub x_offset:           i32,
    pub y_offset:           i32,
    pub x_bits_per_pixel:   u32,
    pub y_bits_per_pixel:   u32,
    pub location_type:      u32,
    pub location_dimension: u32,
    pub number_of_images:   u32,
    pub number_data_bands:  u32,
    pub data_storage_type:  u32,
    pub data_encode_scheme: u32,
    pub map_scheme:         u32,
    pub map_storage_type:   u32,
    pub map_rows:           u32,
    pub map_columns:        u32,
    pub map_subrows:        u32,
    pub map_enable:         u32,
    pub maps_per_cycle:     u32,
    pub color_space_model:  u32
}

/// A validated header, with everything needed to read the sub-image
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FrameLayout {
    pub width:       usize,
    pub height:      usize,
    pub bands:       usize,
    pub storage:     StorageType,
    pub map_scheme:  MapScheme,
    pub map_storage: MapStorageType,
    pub map_rows:    usize,
    pub map_columns: usize,
    pub endian:      ByteEndian
}

impl FrameLayout {
    /// Number of stored samples in the pixel plane
    pub const fn packets(&self) -> usize {
        match self.storage {
            StorageType::Bit => self.width.div_ceil(8).saturating_mul(self.height),
            _ => self
                .width
                .saturating_mul(self.height)
                .saturating_mul(self.bands)
        }
    }

    pub const fn plane_bytes(&self) -> usize {
        self.packets().saturating_mul(self.storage.size_of())
    }

    pub const fn map_bytes(&self) -> usize {
        match self.map_scheme {
            MapScheme::None => 0,
            _ => self
                .map_rows
                .saturating_mul(self.map_columns)
                .saturating_mul(self.map_storage.size_of())
        }
    }

    pub const fn has_map(&self) -> bool {
        !matches!(self.map_scheme, MapScheme::None)
    }
}

impl ViffHeader {
    /// Byte order of every multi byte field and sample following the header
    pub const fn endian(&self) -> ByteEndian {
        match self.machine_dependency {
            VFF_DEP_DECORDER | VFF_DEP_NSORDER => ByteEndian::LE,
            _ => ByteEndian::BE
        }
    }

    /// Read a header, the magic byte having been consumed already
    pub(crate) fn read<T: ByteReaderTrait>(
        stream: &mut ByteReader<T>
    ) -> Result<ViffHeader, ViffDecodeErrors> {
        let [file_type, release, version, machine_dependency] =
            stream.read_fixed_bytes_or_error::<4>()?;
        // reserved
        stream.read_fixed_bytes_or_error::<3>()?;

        let raw_comment = stream.read_fixed_bytes_or_error::<VIFF_COMMENT_SIZE>()?;
        // the last byte is always a terminator
        let comment_end = raw_comment[..VIFF_COMMENT_SIZE - 1]
            .iter()
            .position(|x| *x == 0)
            .unwrap_or(VIFF_COMMENT_SIZE - 1);

        let comment = if comment_end > VIFF_MIN_COMMENT_LENGTH {
            Some(String::from_utf8_lossy(&raw_comment[..comment_end]).into_owned())
        } else {
            None
        };

        let mut header = ViffHeader {
            file_type,
            release,
            version,
            machine_dependency,
            comment,
            ..ViffHeader::default()
        };
        let endian = header.endian();

        header.rows = stream.get_u32_err(endian)?;
        header.columns = stream.get_u32_err(endian)?;
        header.subrows = stream.get_u32_err(endian)?;
        header.x_offset = stream.get_u32_err(endian)? as i32;
        header.y_offset = stream.get_u32_err(endian)? as i32;
        header.x_bits_per_pixel = stream.get_u32_err(endian)?;
        header.y_bits_per_pixel = stream.get_u32_err(endian)?;
        header.location_type = stream.get_u32_err(endian)?;
        header.location_dimension = stream.get_u32_err(endian)?;
        header.number_of_images = stream.get_u32_err(endian)?;
        header.number_data_bands = stream.get_u32_err(endian)?;
        header.data_storage_type = stream.get_u32_err(endian)?;
        header.data_encode_scheme = stream.get_u32_err(endian)?;
        header.map_scheme = stream.get_u32_err(endian)?;
        header.map_storage_type = stream.get_u32_err(endian)?;
        header.map_rows = stream.get_u32_err(endian)?;
        header.map_columns = stream.get_u32_err(endian)?;
        header.map_subrows = stream.get_u32_err(endian)?;
        header.map_enable = stream.get_u32_err(endian)?;
        header.maps_per_cycle = stream.get_u32_err(endian)?;
        header.color_space_model = stream.get_u32_err(endian)?;

        stream.skip(VIFF_HEADER_PADDING)?;

        trace!("Image width: {}", header.rows);
        trace!("Image height: {}", header.columns);
        trace!("Byte order: {:?}", endian);
        trace!("Data bands: {}", header.number_data_bands);
        trace!("Data storage type: {}", header.data_storage_type);
        trace!("Map scheme: {}", header.map_scheme);
        trace!("Map storage type: {}", header.map_storage_type);
        trace!("Color space model: {}", header.color_space_model);

        Ok(header)
    }

    /// Check every field and the declared sizes against `remaining`
    /// bytes of the stream.
    ///
    /// Nothing sized from the header is allocated before this succeeds.
    pub(crate) fn validate(
        &self, options: &DecoderOptions, remaining: u64
    ) -> Result<FrameLayout, ViffDecodeErrors> {
        let width = self.rows as usize;
        let height = self.columns as usize;

        if width == 0 || height == 0 {
            return Err(ViffDecodeErrors::ZeroDimensions(width, height));
        }
        if width > options.get_max_width() {
            return Err(ViffDecodeErrors::TooLargeDimensions(
                "width",
                options.get_max_width(),
                width
            ));
        }
        if height > options.get_max_height() {
            return Err(ViffDecodeErrors::TooLargeDimensions(
                "height",
                options.get_max_height(),
                height
            ));
        }
        if !(1..=4).contains(&self.number_data_bands) {
            return Err(ViffDecodeErrors::InvalidBandCount(self.number_data_bands));
        }
        let storage = StorageType::from_u32(self.data_storage_type)
            .ok_or(ViffDecodeErrors::InvalidStorageType(self.data_storage_type))?;

        if self.data_encode_scheme != VFF_DES_RAW {
            return Err(ViffDecodeErrors::UnsupportedEncodeScheme(
                self.data_encode_scheme
            ));
        }
        let map_storage = MapStorageType::from_u32(self.map_storage_type)
            .ok_or(ViffDecodeErrors::InvalidMapStorageType(self.map_storage_type))?;

        if !matches!(
            self.color_space_model,
            VFF_CM_NONE | VFF_CM_NTSC_RGB | VFF_CM_GENERIC_RGB
        ) {
            return Err(ViffDecodeErrors::InvalidColorModel(self.color_space_model));
        }
        if self.location_type != VFF_LOC_IMPLICIT {
            return Err(ViffDecodeErrors::UnsupportedLocationType(self.location_type));
        }
        if self.number_of_images != 1 {
            return Err(ViffDecodeErrors::UnsupportedImageCount(self.number_of_images));
        }
        // a map without rows is no map
        let map_scheme = if self.map_rows == 0 {
            MapScheme::None
        } else {
            MapScheme::from_u32(self.map_scheme)
                .ok_or(ViffDecodeErrors::UnsupportedMapScheme(self.map_scheme))?
        };
        if map_scheme != MapScheme::None
            && (self.map_columns == 0 || self.map_columns > VIFF_MAX_MAP_COLUMNS)
        {
            return Err(ViffDecodeErrors::InvalidMapColumns(self.map_columns));
        }

        let layout = FrameLayout {
            width,
            height,
            bands: self.number_data_bands as usize,
            storage,
            map_scheme,
            map_storage,
            map_rows: self.map_rows as usize,
            map_columns: self.map_columns as usize,
            endian: self.endian()
        };

        // widths and heights are bounded by the options and bands by four,
        // but map rows come straight from the file
        let map_bytes = u64::from(self.map_rows)
            .saturating_mul(u64::from(self.map_columns))
            .saturating_mul(map_storage.size_of() as u64);
        let map_bytes = if layout.has_map() { map_bytes } else { 0 };

        let plane_bytes = (layout.packets() as u64).saturating_mul(storage.size_of() as u64);
        let expected = plane_bytes.saturating_add(map_bytes);

        if expected > remaining {
            return Err(ViffDecodeErrors::InsufficientData(expected, remaining));
        }
        Ok(layout)
    }

    /// Write the header in its own byte order, magic byte included
    pub(crate) fn write<T: ByteWriterTrait>(
        &self, writer: &mut ByteWriter<T>
    ) -> Result<(), crate::ViffEncodeErrors> {
        let endian = self.endian();

        writer.write_const_bytes(&[
            VIFF_MAGIC,
            self.file_type,
            self.release,
            self.version,
            self.machine_dependency,
            0,
            0,
            0
        ])?;

        let mut comment = Vec::with_capacity(VIFF_COMMENT_SIZE);
        if let Some(text) = &self.comment {
            let bytes = text.as_bytes();
            comment.extend_from_slice(&bytes[..bytes.len().min(VIFF_COMMENT_SIZE - 1)]);
        }
        comment.resize(VIFF_COMMENT_SIZE, 0);
        writer.write_all(&comment)?;

        for field in [
            self.rows,
            self.columns,
            self.subrows,
            self.x_offset as u32,
            self.y_offset as u32,
            self.x_bits_per_pixel,
            self.y_bits_per_pixel,
            self.location_type,
            self.location_dimension,
            self.number_of_images,
            self.number_data_bands,
            self.data_storage_type,
            self.data_encode_scheme,
            self.map_scheme,
            self.map_storage_type,
            self.map_rows,
            self.map_columns,
            self.map_subrows,
            self.map_enable,
            self.maps_per_cycle,
            self.color_space_model
        ] {
            writer.write_u32_err(field, endian)?;
        }
        writer.write_zeroes(VIFF_HEADER_PADDING)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pixkit_core::bit_depth::ByteEndian;
    use pixkit_core::bytestream::{ByteCursor, ByteReader, ByteWriter};
    use pixkit_core::options::DecoderOptions;

    use crate::constants::{VFF_DEP_NSORDER, VIFF_HEADER_SIZE, VIFF_MAGIC};
    use crate::header::ViffHeader;
    use crate::{ErrorKind, ViffDecodeErrors};

    fn gray_header() -> ViffHeader {
        ViffHeader {
            file_type: 1,
            release: 1,
            version: 3,
            machine_dependency: 0x2,
            comment: Some("written by a test".into()),
            rows: 4,
            columns: 3,
            location_type: 1,
            number_of_images: 1,
            number_data_bands: 1,
            data_storage_type: 1,
            ..ViffHeader::default()
        }
    }

    #[test]
    fn header_is_1024_bytes_and_reads_back() {
        for dependency in [0x2, VFF_DEP_NSORDER] {
            let header = ViffHeader {
                machine_dependency: dependency,
                x_offset: -1,
                ..gray_header()
            };
            let mut sink = Vec::new();
            header.write(&mut ByteWriter::new(&mut sink)).unwrap();
            assert_eq!(sink.len(), VIFF_HEADER_SIZE);
            assert_eq!(sink[0], VIFF_MAGIC);

            let mut stream = ByteReader::new(ByteCursor::new(&sink[1..]));
            let parsed = ViffHeader::read(&mut stream).unwrap();
            assert_eq!(parsed, header);
        }
    }

    #[test]
    fn lsb_flag_selects_little_endian() {
        let header = ViffHeader {
            machine_dependency: VFF_DEP_NSORDER,
            ..gray_header()
        };
        assert_eq!(header.endian(), ByteEndian::LE);
        assert_eq!(gray_header().endian(), ByteEndian::BE);

        let mut sink = Vec::new();
        header.write(&mut ByteWriter::new(&mut sink)).unwrap();
        // rows field directly after the comment
        assert_eq!(&sink[520..524], &[4, 0, 0, 0]);
    }

    #[test]
    fn short_comments_are_dropped() {
        let header = ViffHeader {
            comment: Some("abcd".into()),
            ..gray_header()
        };
        let mut sink = Vec::new();
        header.write(&mut ByteWriter::new(&mut sink)).unwrap();

        let parsed = ViffHeader::read(&mut ByteReader::new(ByteCursor::new(&sink[1..]))).unwrap();
        assert_eq!(parsed.comment, None);
    }

    #[test]
    fn band_count_is_validated() {
        let options = DecoderOptions::default();
        for bands in [0, 5] {
            let header = ViffHeader {
                number_data_bands: bands,
                ..gray_header()
            };
            let err = header.validate(&options, 1 << 20).unwrap_err();
            assert!(matches!(err, ViffDecodeErrors::InvalidBandCount(b) if b == bands));
            assert_eq!(err.kind(), ErrorKind::CorruptHeader);
        }
    }

    #[test]
    fn encode_scheme_is_unsupported() {
        let header = ViffHeader {
            data_encode_scheme: 1,
            ..gray_header()
        };
        let err = header
            .validate(&DecoderOptions::default(), 1 << 20)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFeature);
    }

    #[test]
    fn declared_size_must_fit_stream() {
        let header = gray_header();
        assert!(header.validate(&DecoderOptions::default(), 12).is_ok());
        let err = header
            .validate(&DecoderOptions::default(), 11)
            .unwrap_err();
        assert!(matches!(err, ViffDecodeErrors::InsufficientData(12, 11)));
    }

    #[test]
    fn map_without_rows_is_ignored() {
        let header = ViffHeader {
            map_scheme: 42,
            map_columns: 0,
            ..gray_header()
        };
        let layout = header.validate(&DecoderOptions::default(), 12).unwrap();
        assert!(!layout.has_map());

        let header = ViffHeader {
            map_scheme: 1,
            map_rows: 3,
            map_columns: 70000,
            ..gray_header()
        };
        assert!(matches!(
            header.validate(&DecoderOptions::default(), 1 << 24),
            Err(ViffDecodeErrors::InvalidMapColumns(70000))
        ));
    }

    #[test]
    fn limits_are_resource_errors() {
        let header = ViffHeader {
            rows: 100,
            ..gray_header()
        };
        let options = DecoderOptions::default().set_max_width(50);
        let err = header.validate(&options, u64::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceExhaustion);
    }
}
