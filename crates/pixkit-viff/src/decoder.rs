/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

use pixkit_core::bit_depth::ByteEndian;
use pixkit_core::bytestream::{ByteReader, ByteReaderTrait};
use pixkit_core::colorspace::ColorSpace;
use pixkit_core::log::{trace, warn};
use pixkit_core::options::DecoderOptions;
use pixkit_image::{
    clamp_to_quantum, scale_char_to_quantum, Image, IndexPacket, Pixel, PixelRowMut, Quantum,
    QUANTUM_RANGE
};
use pixkit_quantum::{QuantumImporter, QuantumInfo, QuantumType};

use crate::constants::{MapStorageType, StorageType, VIFF_MAGIC};
use crate::errors::{ErrorKind, ViffDecodeErrors};
use crate::header::{FrameLayout, ViffHeader};

type ProgressCallback = Box<dyn FnMut(usize, usize) -> bool>;

/// Read sample `index` of a plane holding `storage` samples
fn read_sample(plane: &[u8], storage: StorageType, endian: ByteEndian, index: usize) -> f64 {
    let size = storage.size_of();
    let start = index * size;
    let bytes = &plane[start..start + size];

    macro_rules! decode {
        ($int_type:ty) => {{
            let mut space = [0; core::mem::size_of::<$int_type>()];
            space.copy_from_slice(bytes);
            match endian {
                ByteEndian::BE => <$int_type>::from_be_bytes(space),
                ByteEndian::LE => <$int_type>::from_le_bytes(space)
            }
        }};
    }

    match storage {
        StorageType::Bit | StorageType::OneByte => f64::from(bytes[0]),
        StorageType::TwoByte => f64::from(decode!(i16)),
        StorageType::FourByte => f64::from(decode!(i32)),
        StorageType::Float => f64::from(decode!(f32)),
        StorageType::Double => decode!(f64)
    }
}

fn read_map_entry(map: &[u8], storage: MapStorageType, endian: ByteEndian, index: usize) -> f64 {
    let storage = match storage {
        MapStorageType::None | MapStorageType::OneByte => StorageType::OneByte,
        MapStorageType::TwoByte => StorageType::TwoByte,
        MapStorageType::FourByte => StorageType::FourByte,
        MapStorageType::Float => StorageType::Float,
        MapStorageType::Double => StorageType::Double
    };
    read_sample(map, storage, endian, index)
}

/// Reduce a stored map value to 8 bits, then widen to canonical
fn map_value_to_quantum(value: f64) -> Quantum {
    let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 255.0) };
    scale_char_to_quantum(value as u8)
}

/// Turn a raw sample into a colormap index, `None` when it is out of range
fn sample_to_index(value: f64, colors: usize) -> Option<usize> {
    if value.is_nan() || value < 0.0 {
        return None;
    }
    let index = value as usize;
    (index < colors).then_some(index)
}

/// Global affine map from the observed sample range to the canonical range
#[derive(Copy, Clone, Debug)]
struct Rescale {
    minimum: f64,
    scale:   f64
}

impl Rescale {
    fn scan(plane: &[u8], layout: &FrameLayout) -> Rescale {
        let packets = layout.packets();

        let mut minimum = f64::INFINITY;
        let mut maximum = f64::NEG_INFINITY;

        for i in 0..packets {
            let value = read_sample(plane, layout.storage, layout.endian, i);
            if value.is_nan() {
                continue;
            }
            minimum = minimum.min(value);
            maximum = maximum.max(value);
        }
        // constant planes and planes of nothing but NaN map to zero
        let scale = if maximum > minimum {
            f64::from(QUANTUM_RANGE) / (maximum - minimum)
        } else {
            0.0
        };
        trace!("Sample range {minimum} to {maximum}, scale {scale}");

        Rescale { minimum, scale }
    }

    fn apply(&self, value: f64) -> Quantum {
        clamp_to_quantum((value - self.minimum) * self.scale)
    }
}

/// A Khoros VIFF decoder
///
/// The decoder is initialized by calling `new`
/// and either of [`decode_headers`] to decode the first header
/// or [`decode`] to return every sub-image of the stream.
///
/// The decoder is also an iterator yielding one [`Image`] per
/// chained sub-image.
///
/// [`decode_headers`]:ViffDecoder::decode_headers
/// [`decode`]:ViffDecoder::decode
///
/// # Example
/// ```
/// use pixkit_core::bytestream::ByteCursor;
/// use pixkit_viff::ViffDecoder;
///
/// let mut decoder = ViffDecoder::new(ByteCursor::new(&[0_u8; 0]));
/// assert!(decoder.decode_headers().is_err());
/// ```
pub struct ViffDecoder<T: ByteReaderTrait> {
    stream:   ByteReader<T>,
    options:  DecoderOptions,
    /// Header and layout of the sub-image to decode next
    pending:  Option<(ViffHeader, FrameLayout)>,
    frames:   usize,
    finished: bool,
    progress: Option<ProgressCallback>
}

impl<T: ByteReaderTrait> ViffDecoder<T> {
    /// Create a new decoder with the default options
    pub fn new(data: T) -> ViffDecoder<T> {
        ViffDecoder::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new decoder that obeys specified restrictions
    ///
    /// E.g can be used to set width and height limits to prevent OOM attacks
    ///
    /// # Example
    /// ```
    /// use pixkit_core::bytestream::ByteCursor;
    /// use pixkit_core::options::DecoderOptions;
    /// use pixkit_viff::ViffDecoder;
    ///
    /// let options = DecoderOptions::default().set_max_width(10).set_max_height(10);
    /// let decoder = ViffDecoder::new_with_options(ByteCursor::new([0_u8; 0]), options);
    /// ```
    pub fn new_with_options(data: T, options: DecoderOptions) -> ViffDecoder<T> {
        ViffDecoder {
            stream: ByteReader::new(data),
            options,
            pending: None,
            frames: 0,
            finished: false,
            progress: None
        }
    }

    /// Install a callback polled once per decoded row with `(row, rows)`,
    /// returning `false` cancels decoding
    pub fn set_progress<F>(&mut self, callback: F)
    where
        F: FnMut(usize, usize) -> bool + 'static
    {
        self.progress = Some(Box::new(callback));
    }

    /// Decode and validate the header of the first sub-image
    ///
    /// Calling this more than once is a no-op.
    pub fn decode_headers(&mut self) -> Result<(), ViffDecodeErrors> {
        if self.pending.is_some() || self.frames > 0 {
            return Ok(());
        }
        let magic = self
            .stream
            .get_u8_err()
            .map_err(|_| ViffDecodeErrors::WrongMagicBytes(None))?;

        if magic != VIFF_MAGIC {
            return Err(ViffDecodeErrors::WrongMagicBytes(Some(magic)));
        }
        self.read_header()
    }

    fn read_header(&mut self) -> Result<(), ViffDecodeErrors> {
        let header = ViffHeader::read(&mut self.stream)?;
        let remaining = self.stream.remaining()?;
        let layout = header.validate(&self.options, remaining)?;

        self.pending = Some((header, layout));
        Ok(())
    }

    /// Header of the sub-image decoded next, `None` before [`decode_headers`](Self::decode_headers)
    pub fn header(&self) -> Option<&ViffHeader> {
        self.pending.as_ref().map(|(header, _)| header)
    }

    /// Return the width and height of the next sub-image
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.pending
            .as_ref()
            .map(|(_, layout)| (layout.width, layout.height))
    }

    /// Colorspace the next sub-image decodes to
    pub fn colorspace(&self) -> Option<ColorSpace> {
        self.pending.as_ref().map(|(_, layout)| {
            if layout.storage == StorageType::Bit {
                ColorSpace::Luma
            } else if layout.bands == 4 {
                ColorSpace::RGBA
            } else if layout.bands == 3 {
                ColorSpace::RGB
            } else {
                // palette backed, gray unless the map says otherwise
                ColorSpace::Luma
            }
        })
    }

    pub fn comment(&self) -> Option<&str> {
        self.header().and_then(|header| header.comment.as_deref())
    }

    /// Decode every sub-image of the stream
    ///
    /// When a sub-image after the first fails, the ones before it are
    /// returned unless the failure is a resource limit.
    pub fn decode(&mut self) -> Result<Vec<Image>, ViffDecodeErrors> {
        let mut images = vec![];

        for result in self.by_ref() {
            match result {
                Ok(image) => images.push(image),
                Err(err) if images.is_empty() || err.kind() == ErrorKind::ResourceExhaustion => {
                    return Err(err);
                }
                Err(err) => {
                    warn!("Sub-image {} failed, keeping earlier images: {err:?}", images.len());
                    break;
                }
            }
        }
        Ok(images)
    }

    /// Move to the next sub-image, returning `false` at the end of the stream
    fn advance(&mut self) -> Result<bool, ViffDecodeErrors> {
        if self.pending.is_some() {
            return Ok(true);
        }
        if self.frames == 0 {
            self.decode_headers()?;
            return Ok(true);
        }
        if self.frames >= self.options.get_max_frames() {
            return Ok(false);
        }
        match self.stream.get_u8_err() {
            Err(_) => Ok(false),
            Ok(VIFF_MAGIC) => {
                self.read_header()?;
                Ok(true)
            }
            Ok(byte) => {
                if self.options.get_strict_mode() {
                    return Err(ViffDecodeErrors::TrailingBytes(byte));
                }
                warn!("Ignoring trailing data starting with {byte:#04X} after image {}", self.frames);
                Ok(false)
            }
        }
    }

    fn report_progress(&mut self, row: usize, rows: usize) -> Result<(), ViffDecodeErrors> {
        if let Some(callback) = self.progress.as_mut() {
            if !callback(row, rows) {
                return Err(ViffDecodeErrors::Cancelled(row));
            }
        }
        Ok(())
    }

    fn decode_frame(
        &mut self, header: ViffHeader, layout: FrameLayout
    ) -> Result<Image, ViffDecodeErrors> {
        let (width, height) = (layout.width, layout.height);

        let map = if layout.has_map() {
            let mut map = vec![0; layout.map_bytes()];
            self.stream.read_exact_bytes(&mut map)?;
            Some(self.build_colormap(&map, &layout))
        } else {
            None
        };

        let mut plane = vec![0; layout.plane_bytes()];
        self.stream.read_exact_bytes(&mut plane)?;

        let mut image = if layout.storage == StorageType::Bit {
            self.decode_bilevel(&plane, &layout)?
        } else if layout.bands < 3 {
            self.decode_indexed(&plane, &layout, map)?
        } else {
            self.decode_direct(&plane, &layout, map.as_deref())?
        };

        if let Some(comment) = header.comment {
            image.set_comment(comment);
        }
        trace!(
            "Decoded {width}x{height} sub-image {} as {:?}",
            self.frames,
            image.colorspace()
        );
        Ok(image)
    }

    /// Colormap from stored planes, red first.
    ///
    /// The first plane sets all three channels so a single plane map is gray
    fn build_colormap(&self, map: &[u8], layout: &FrameLayout) -> Vec<Pixel> {
        let colors = layout.map_columns;
        let mut colormap = vec![Pixel::default(); colors];

        for plane in 0..layout.map_rows.min(3) {
            for (i, entry) in colormap.iter_mut().enumerate() {
                let value = read_map_entry(map, layout.map_storage, layout.endian, plane * colors + i);
                let value = map_value_to_quantum(value);

                match plane {
                    0 => *entry = Pixel::gray(value),
                    1 => entry.green = value,
                    _ => entry.blue = value
                }
            }
        }
        colormap
    }

    /// One bit per pixel, most significant bit first, a set bit is black
    fn decode_bilevel(
        &mut self, plane: &[u8], layout: &FrameLayout
    ) -> Result<Image, ViffDecodeErrors> {
        let (width, height) = (layout.width, layout.height);
        let stride = width.div_ceil(8);

        let mut indexes: Vec<IndexPacket> = vec![0; width * height];

        for (y, (row, packed)) in indexes
            .chunks_exact_mut(width)
            .zip(plane.chunks_exact(stride))
            .enumerate()
        {
            for (x, index) in row.iter_mut().enumerate() {
                let bit = (packed[x >> 3] >> (7 - (x & 7))) & 1;
                *index = IndexPacket::from(bit == 0);
            }
            self.report_progress(y, height)?;
        }
        let colormap = vec![Pixel::gray(0), Pixel::gray(QUANTUM_RANGE)];

        Ok(Image::from_indexes(width, height, colormap, indexes)?)
    }

    /// One or two bands, the first band indexes a stored map or a gray ramp
    fn decode_indexed(
        &mut self, plane: &[u8], layout: &FrameLayout, map: Option<Vec<Pixel>>
    ) -> Result<Image, ViffDecodeErrors> {
        let (width, height) = (layout.width, layout.height);

        let (colormap, rescale) = match map {
            Some(colormap) => (colormap, None),
            None if layout.storage == StorageType::OneByte => {
                let ramp: Vec<Pixel> = (0..=255).map(|i| Pixel::gray(scale_char_to_quantum(i))).collect();
                (ramp, None)
            }
            None => {
                let ramp: Vec<Pixel> = (0..=QUANTUM_RANGE).map(Pixel::gray).collect();
                (ramp, Some(Rescale::scan(plane, layout)))
            }
        };

        let mut indexes: Vec<IndexPacket> = vec![0; width * height];
        let mut invalid = 0_usize;

        for (y, row) in indexes.chunks_exact_mut(width).enumerate() {
            for (x, index) in row.iter_mut().enumerate() {
                let value = read_sample(plane, layout.storage, layout.endian, y * width + x);

                *index = match rescale {
                    Some(rescale) => rescale.apply(value),
                    None => match sample_to_index(value, colormap.len()) {
                        Some(index) => index as IndexPacket,
                        None => {
                            invalid += 1;
                            0
                        }
                    }
                };
            }
            self.report_progress(y, height)?;
        }
        if invalid > 0 {
            warn!("{invalid} colormap indexes out of range, replaced by index 0");
        }
        Ok(Image::from_indexes(width, height, colormap, indexes)?)
    }

    /// Three or four planar bands, red, green, blue and alpha
    fn decode_direct(
        &mut self, plane: &[u8], layout: &FrameLayout, map: Option<&[Pixel]>
    ) -> Result<Image, ViffDecodeErrors> {
        let (width, height) = (layout.width, layout.height);
        let plane_len = width * height;
        let has_alpha = layout.bands == 4;

        let colorspace = if has_alpha {
            ColorSpace::RGBA
        } else {
            ColorSpace::RGB
        };
        let mut pixels = vec![Pixel::default(); plane_len];

        if map.is_none() && layout.storage == StorageType::OneByte {
            // planar bytes are exactly single channel 8 bit rows
            let bands: &[QuantumType] = if has_alpha {
                &[QuantumType::Red, QuantumType::Green, QuantumType::Blue, QuantumType::Alpha]
            } else {
                &[QuantumType::Red, QuantumType::Green, QuantumType::Blue]
            };
            let importers = bands
                .iter()
                .map(|band| QuantumImporter::new(QuantumInfo::new(8), *band))
                .collect::<Result<Vec<_>, _>>()?;

            for (y, row) in pixels.chunks_exact_mut(width).enumerate() {
                let mut row = PixelRowMut::new(row).with_colorspace(colorspace);

                for (band, importer) in importers.iter().enumerate() {
                    let start = band * plane_len + y * width;
                    importer.import(&plane[start..start + width], &mut row)?;
                }
                self.report_progress(y, height)?;
            }
            return Ok(Image::from_pixels(width, height, colorspace, pixels)?);
        }

        let rescale = match (map, layout.storage) {
            (None, StorageType::OneByte) | (Some(_), _) => None,
            (None, _) => Some(Rescale::scan(plane, layout))
        };
        let convert = |value: f64| match rescale {
            Some(rescale) => rescale.apply(value),
            None if layout.storage == StorageType::OneByte => scale_char_to_quantum(value as u8),
            None => clamp_to_quantum(value)
        };
        let mut invalid = 0_usize;

        for (y, row) in pixels.chunks_exact_mut(width).enumerate() {
            for (x, pixel) in row.iter_mut().enumerate() {
                let offset = y * width + x;
                let sample =
                    |band: usize| read_sample(plane, layout.storage, layout.endian, band * plane_len + offset);

                let [red, green, blue] = [0, 1, 2].map(|band| {
                    let value = sample(band);
                    match map {
                        None => convert(value),
                        Some(colormap) => {
                            let entry = match sample_to_index(value, colormap.len()) {
                                Some(index) => colormap[index],
                                None => {
                                    invalid += 1;
                                    colormap[0]
                                }
                            };
                            [entry.red, entry.green, entry.blue][band]
                        }
                    }
                });
                *pixel = Pixel::new(red, green, blue);

                if has_alpha {
                    pixel.set_alpha(convert(sample(3)));
                }
            }
            self.report_progress(y, height)?;
        }
        if invalid > 0 {
            warn!("{invalid} colormap indexes out of range, replaced by index 0");
        }
        Ok(Image::from_pixels(width, height, colorspace, pixels)?)
    }
}

impl<T: ByteReaderTrait> Iterator for ViffDecoder<T> {
    type Item = Result<Image, ViffDecodeErrors>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let frame = match self.advance() {
            Ok(true) => self.pending.take(),
            Ok(false) => None,
            Err(err) => {
                self.finished = true;
                return Some(Err(err));
            }
        };
        let Some((header, layout)) = frame else {
            self.finished = true;
            return None;
        };
        let result = self.decode_frame(header, layout);

        self.frames += 1;
        if result.is_err() {
            self.finished = true;
        }
        Some(result)
    }
}
