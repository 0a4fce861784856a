/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use pixkit_core::bytestream::{ByteWriter, ByteWriterTrait};
use pixkit_core::colorspace::ColorSpace;
use pixkit_core::log::trace;
use pixkit_core::options::EncoderOptions;
use pixkit_image::{scale_quantum_to_char, Image};
use pixkit_quantum::{QuantumExporter, QuantumInfo, QuantumType};

use crate::constants::{
    MapScheme, MapStorageType, StorageType, VFF_CM_GENERIC_RGB, VFF_CM_NONE, VFF_DEP_IEEEORDER,
    VFF_DES_RAW, VFF_FILE_TYPE_IMAGE, VFF_LOC_IMPLICIT, VFF_RELEASE, VFF_VERSION,
    VIFF_UNIT_PIXEL_SIZE
};
use crate::errors::ViffEncodeErrors;
use crate::header::ViffHeader;

const SUPPORTED_COLORSPACES: [ColorSpace; 4] = [
    ColorSpace::RGB,
    ColorSpace::RGBA,
    ColorSpace::Luma,
    ColorSpace::LumaA
];

/// Largest palette written as a stored map
const MAX_MAP_COLORS: usize = 256;

type ProgressCallback<'a> = Box<dyn FnMut(usize, usize) -> bool + 'a>;

/// Storage chosen for a single frame
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Representation {
    /// One bit per pixel, a set bit is black
    Bilevel,
    /// One byte band of gray levels
    Gray,
    /// One byte band of indexes into a three plane map of `colors` entries
    Colormapped { colors: usize },
    /// Planar red, green and blue bytes, plus alpha when present
    DirectColor { bands: usize }
}

impl Representation {
    fn choose(image: &Image) -> Representation {
        let bands = if image.has_alpha() { 4 } else { 3 };

        if image.has_alpha() {
            return Representation::DirectColor { bands };
        }
        // direct color images stay in color even when every pixel is gray
        let gray = image.is_gray() && (image.is_colormapped() || image.colorspace().is_grayscale());

        match image.colormap() {
            Some(colormap) if gray && colormap.len() <= 2 => Representation::Bilevel,
            _ if gray => Representation::Gray,
            Some(colormap) if colormap.len() <= MAX_MAP_COLORS => Representation::Colormapped {
                colors: colormap.len()
            },
            _ => Representation::DirectColor { bands }
        }
    }

    /// Bytes of one stored row of pixels, per band
    fn row_bytes(self, width: usize) -> usize {
        match self {
            Representation::Bilevel => width.div_ceil(8),
            _ => width
        }
    }
}

/// A Khoros VIFF encoder
///
/// Each frame is written as a header, an optional colormap and planar
/// pixel bands, choosing the smallest representation able to hold it.
///
/// # Example
/// ```
/// use pixkit_core::colorspace::ColorSpace;
/// use pixkit_image::Image;
/// use pixkit_viff::ViffEncoder;
///
/// let image = Image::new(4, 4, ColorSpace::RGB).unwrap();
/// let frames = [image];
/// let mut sink = vec![];
///
/// let written = ViffEncoder::new(&frames).encode(&mut sink).unwrap();
/// // header and three bands of sixteen bytes
/// assert_eq!(written, 1024 + 3 * 16);
/// ```
pub struct ViffEncoder<'a> {
    frames:   &'a [Image],
    options:  EncoderOptions,
    progress: Option<ProgressCallback<'a>>
}

impl<'a> ViffEncoder<'a> {
    /// Create an encoder writing every frame of `frames`
    pub fn new(frames: &'a [Image]) -> ViffEncoder<'a> {
        ViffEncoder::new_with_options(frames, EncoderOptions::default())
    }

    /// Create an encoder, `adjoin` in the options controls whether
    /// frames after the first are written
    pub fn new_with_options(frames: &'a [Image], options: EncoderOptions) -> ViffEncoder<'a> {
        ViffEncoder {
            frames,
            options,
            progress: None
        }
    }

    /// Install a callback polled once per written row with `(row, rows)`,
    /// returning `false` cancels encoding
    pub fn set_progress<F>(&mut self, callback: F)
    where
        F: FnMut(usize, usize) -> bool + 'a
    {
        self.progress = Some(Box::new(callback));
    }

    fn report_progress(&mut self, row: usize, rows: usize) -> Result<(), ViffEncodeErrors> {
        if let Some(callback) = self.progress.as_mut() {
            if !callback(row, rows) {
                return Err(ViffEncodeErrors::Cancelled(row));
            }
        }
        Ok(())
    }

    fn check_frames(&self) -> Result<&'a [Image], ViffEncodeErrors> {
        if self.frames.is_empty() {
            return Err(ViffEncodeErrors::NoFrames);
        }
        let frames = if self.options.get_adjoin() {
            self.frames
        } else {
            &self.frames[..1]
        };

        for image in frames {
            if !SUPPORTED_COLORSPACES.contains(&image.colorspace()) {
                return Err(ViffEncodeErrors::UnsupportedColorspace(
                    image.colorspace(),
                    &SUPPORTED_COLORSPACES
                ));
            }
            for dimension in [image.width(), image.height()] {
                if (dimension as u64) > u64::from(u32::MAX) {
                    return Err(ViffEncodeErrors::TooLargeDimensions(dimension));
                }
            }
        }
        Ok(frames)
    }

    /// Encode the frames into `sink`
    ///
    /// # Returns
    /// - Ok(size): Number of bytes written
    /// - Err: The error encountered during encoding, the sink is left
    ///   untouched unless the error came from the sink itself
    pub fn encode<T: ByteWriterTrait>(&mut self, sink: T) -> Result<usize, ViffEncodeErrors> {
        let frames = self.check_frames()?;
        // the sink only ever sees a complete stream
        let mut stream = Vec::new();

        for image in frames {
            self.encode_frame(image, &mut stream)?;
        }
        let mut writer = ByteWriter::new(sink);
        writer.write_all(&stream)?;
        writer.flush()?;

        Ok(writer.bytes_written())
    }

    fn encode_frame(&mut self, image: &Image, stream: &mut Vec<u8>) -> Result<(), ViffEncodeErrors> {
        let representation = Representation::choose(image);
        let (width, height) = image.dimensions();

        trace!("Encoding {width}x{height} {:?} frame as {representation:?}", image.colorspace());

        let mut writer = ByteWriter::new(stream);
        let header = frame_header(image, representation);
        header.write(&mut writer)?;

        if let (Representation::Colormapped { .. }, Some(colormap)) =
            (representation, image.colormap())
        {
            let red = colormap.iter().map(|c| scale_quantum_to_char(c.red));
            let green = colormap.iter().map(|c| scale_quantum_to_char(c.green));
            let blue = colormap.iter().map(|c| scale_quantum_to_char(c.blue));

            let map = red.chain(green).chain(blue).collect::<Vec<u8>>();
            writer.write_all(&map)?;
        }

        let exporters = band_exporters(representation)?;
        let row_bytes = representation.row_bytes(width);
        let plane_len = row_bytes * height;

        // bands are planar, so rows land at their offset in each band
        let mut planes = vec![0_u8; plane_len * exporters.len()];

        for y in 0..height {
            let row = image.row(y)?;

            for (band, exporter) in exporters.iter().enumerate() {
                let start = band * plane_len + y * row_bytes;
                exporter.export(row, &mut planes[start..start + row_bytes])?;
            }
            self.report_progress(y, height)?;
        }
        writer.write_all(&planes)?;

        Ok(())
    }
}

fn band_exporters(representation: Representation) -> Result<Vec<QuantumExporter>, ViffEncodeErrors> {
    let byte = QuantumInfo::new(8);

    let bands = match representation {
        Representation::Bilevel => {
            vec![(QuantumType::Gray, QuantumInfo::new(1).set_min_is_white(true))]
        }
        Representation::Gray => vec![(QuantumType::Gray, byte)],
        Representation::Colormapped { .. } => vec![(QuantumType::Index, byte)],
        Representation::DirectColor { bands } => [
            QuantumType::Red,
            QuantumType::Green,
            QuantumType::Blue,
            QuantumType::Alpha
        ]
        .into_iter()
        .take(bands)
        .map(|quantum_type| (quantum_type, byte))
        .collect()
    };
    let exporters = bands
        .into_iter()
        .map(|(quantum_type, info)| QuantumExporter::new(info, quantum_type))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(exporters)
}

fn frame_header(image: &Image, representation: Representation) -> ViffHeader {
    let (bands, storage, color_model) = match representation {
        Representation::Bilevel => (1, StorageType::Bit, VFF_CM_NONE),
        Representation::Gray => (1, StorageType::OneByte, VFF_CM_NONE),
        Representation::Colormapped { .. } => (1, StorageType::OneByte, VFF_CM_GENERIC_RGB),
        Representation::DirectColor { bands } => (bands as u32, StorageType::OneByte, VFF_CM_GENERIC_RGB)
    };
    let (map_scheme, map_storage, map_rows, map_columns) = match representation {
        Representation::Colormapped { colors } => {
            (MapScheme::OnePerBand, MapStorageType::OneByte, 3, colors as u32)
        }
        _ => (MapScheme::None, MapStorageType::None, 0, 0)
    };

    ViffHeader {
        file_type: VFF_FILE_TYPE_IMAGE,
        release: VFF_RELEASE,
        version: VFF_VERSION,
        machine_dependency: VFF_DEP_IEEEORDER,
        comment: image.comment().map(String::from),
        rows: image.width() as u32,
        columns: image.height() as u32,
        subrows: 0,
        x_offset: -1,
        y_offset: -1,
        x_bits_per_pixel: VIFF_UNIT_PIXEL_SIZE,
        y_bits_per_pixel: VIFF_UNIT_PIXEL_SIZE,
        location_type: VFF_LOC_IMPLICIT,
        location_dimension: 0,
        number_of_images: 1,
        number_data_bands: bands,
        data_storage_type: storage.to_u32(),
        data_encode_scheme: VFF_DES_RAW,
        map_scheme: map_scheme.to_u32(),
        map_storage_type: map_storage.to_u32(),
        map_rows,
        map_columns,
        map_subrows: 0,
        map_enable: 1,
        maps_per_cycle: 0,
        color_space_model: color_model
    }
}
