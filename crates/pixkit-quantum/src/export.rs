/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use pixkit_core::colorspace::ColorSpace;
use pixkit_core::log::trace;
use pixkit_image::{IndexPacket, Pixel, PixelRow, Quantum, QUANTUM_RANGE};

use crate::codec::{SampleCodec, SampleWriter};
use crate::errors::QuantumErrors;
use crate::info::{QuantumAlpha, QuantumInfo};
use crate::layout::{Channel, QuantumType, Requirement};

/// Check a row carries what `quantum_type` needs and return the index plane
/// the layout reads, if any
pub(crate) fn check_row<'a>(
    quantum_type: QuantumType, colorspace: ColorSpace, colormapped: bool, pixels: usize,
    indexes: Option<&'a [IndexPacket]>
) -> Result<Option<&'a [IndexPacket]>, QuantumErrors> {
    match quantum_type.requirement() {
        Requirement::None => return Ok(None),
        Requirement::Colormapped if !colormapped => {
            return Err(QuantumErrors::ColormappedImageRequired(quantum_type));
        }
        Requirement::ColorSeparated if !colorspace.is_cmyk() => {
            return Err(QuantumErrors::ColorSeparatedImageRequired(quantum_type));
        }
        _ => ()
    }
    match indexes {
        None => Err(QuantumErrors::MissingIndexes(quantum_type)),
        Some(plane) if plane.len() < pixels => Err(QuantumErrors::RowMismatch(pixels, plane.len())),
        plane => Ok(plane)
    }
}

#[inline]
pub(crate) fn premultiply(pixel: Pixel) -> Pixel {
    let alpha = u32::from(pixel.alpha());
    let range = u32::from(QUANTUM_RANGE);
    let scale = |c: Quantum| ((u32::from(c) * alpha + range / 2) / range) as Quantum;

    Pixel {
        red: scale(pixel.red),
        green: scale(pixel.green),
        blue: scale(pixel.blue),
        opacity: pixel.opacity
    }
}

/// Writes rows of canonical pixels in one external layout
///
/// # Example
/// Export a row of gray pixels as 1 bit samples
/// ```
/// use pixkit_image::{Pixel, PixelRow, QUANTUM_RANGE};
/// use pixkit_quantum::{QuantumExporter, QuantumInfo, QuantumType};
///
/// let row = [Pixel::gray(QUANTUM_RANGE), Pixel::gray(0), Pixel::gray(QUANTUM_RANGE)];
/// let exporter = QuantumExporter::new(QuantumInfo::new(1), QuantumType::Gray).unwrap();
/// let mut out = [0_u8; 1];
///
/// assert_eq!(exporter.export(PixelRow::new(&row), &mut out).unwrap(), 1);
/// assert_eq!(out[0], 0b1010_0000);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct QuantumExporter {
    info:         QuantumInfo,
    quantum_type: QuantumType,
    codec:        SampleCodec
}

impl QuantumExporter {
    /// Create an exporter, failing if `info` is unusable
    pub fn new(info: QuantumInfo, quantum_type: QuantumType) -> Result<Self, QuantumErrors> {
        info.validate()?;

        Ok(QuantumExporter {
            info,
            quantum_type,
            codec: SampleCodec::select(&info, quantum_type)
        })
    }

    pub const fn info(&self) -> &QuantumInfo {
        &self.info
    }

    pub const fn quantum_type(&self) -> QuantumType {
        self.quantum_type
    }

    /// Bytes produced for a row of `number_pixels` pixels
    pub fn extent(&self, number_pixels: usize) -> Result<usize, QuantumErrors> {
        self.codec
            .extent(&self.info, self.quantum_type, number_pixels)
    }

    /// Write `row` into `out`, returning the number of bytes written.
    ///
    /// The row is never modified, associated alpha and chroma reordering
    /// are applied to copies of the samples.
    pub fn export(&self, row: PixelRow<'_>, out: &mut [u8]) -> Result<usize, QuantumErrors> {
        let indexes = check_row(
            self.quantum_type,
            row.colorspace,
            row.is_colormapped(),
            row.len(),
            row.indexes
        )?;

        let extent = self.extent(row.len())?;

        if out.len() < extent {
            return Err(QuantumErrors::TooSmallBuffer(extent, out.len()));
        }
        let pad = self.info.pad();
        let associated =
            self.info.alpha() == QuantumAlpha::Associated && row.colorspace.has_alpha();
        let invert = self.info.min_is_white() && self.info.depth() == 1;

        let prepare = |pixel: &Pixel| {
            if associated {
                premultiply(*pixel)
            } else {
                *pixel
            }
        };

        let mut writer = SampleWriter::new(&self.info, self.codec, &mut out[..extent]);

        if self.quantum_type == QuantumType::CbYCrY {
            for pair in row.pixels.chunks(2) {
                let first = prepare(&pair[0]);
                // an odd trailing pixel pairs with itself
                let second = pair.get(1).map_or(first, prepare);

                if self.codec.word_per_pixel(self.quantum_type) {
                    for luma in [first.red, second.red] {
                        writer.push(luma);
                        writer.push(first.green);
                        writer.push(first.blue);
                    }
                } else {
                    writer.push(first.green);
                    writer.push(first.red);
                    writer.push(first.blue);
                    writer.push(second.red);
                }
                writer.end_group(pad);
            }
        } else {
            let channels = self.quantum_type.channels();

            for (x, pixel) in row.pixels.iter().enumerate() {
                let pixel = prepare(pixel);
                let index = indexes.map_or(0, |plane| plane[x]);

                for channel in channels {
                    match channel {
                        Channel::Red => writer.push(pixel.red),
                        Channel::Green => writer.push(pixel.green),
                        Channel::Blue => writer.push(pixel.blue),
                        Channel::Alpha => writer.push(pixel.alpha()),
                        Channel::Opacity => writer.push(pixel.opacity),
                        Channel::Black => writer.push(index),
                        Channel::Index => writer.push_raw(u64::from(index)),
                        Channel::Gray => {
                            let luma = pixel.luma();
                            writer.push(if invert { QUANTUM_RANGE - luma } else { luma });
                        }
                    }
                }
                writer.end_group(pad);
            }
        }
        let written = writer.finish();

        trace!(
            "Exported {} pixels as {:?}, {written} bytes",
            row.len(),
            self.quantum_type
        );
        Ok(written)
    }
}

/// Write `row` in `quantum_type` layout into `out`
///
/// Shorthand for [`QuantumExporter::new`] followed by [`QuantumExporter::export`]
pub fn export_quantum_pixels(
    info: &QuantumInfo, quantum_type: QuantumType, row: PixelRow<'_>, out: &mut [u8]
) -> Result<usize, QuantumErrors> {
    QuantumExporter::new(*info, quantum_type)?.export(row, out)
}
