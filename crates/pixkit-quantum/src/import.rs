/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use pixkit_core::log::{trace, warn};
use pixkit_image::{IndexPacket, Pixel, PixelRowMut, Quantum, QUANTUM_RANGE};

use crate::codec::{SampleCodec, SampleReader};
use crate::errors::QuantumErrors;
use crate::export::check_row;
use crate::info::{QuantumAlpha, QuantumInfo};
use crate::layout::{Channel, QuantumType, Requirement};

/// Undo [premultiplication](crate::QuantumAlpha::Associated), fully
/// transparent pixels are left as they are
#[inline]
fn unpremultiply(pixel: &mut Pixel) {
    let alpha = u32::from(pixel.alpha());

    if alpha == 0 {
        return;
    }
    let range = u32::from(QUANTUM_RANGE);
    let scale =
        |c: Quantum| ((u32::from(c) * range + alpha / 2) / alpha).min(range) as Quantum;

    pixel.red = scale(pixel.red);
    pixel.green = scale(pixel.green);
    pixel.blue = scale(pixel.blue);
}

/// Reads rows of canonical pixels from one external layout
#[derive(Copy, Clone, Debug)]
pub struct QuantumImporter {
    info:         QuantumInfo,
    quantum_type: QuantumType,
    codec:        SampleCodec
}

impl QuantumImporter {
    /// Create an importer, failing if `info` is unusable
    pub fn new(info: QuantumInfo, quantum_type: QuantumType) -> Result<Self, QuantumErrors> {
        info.validate()?;

        Ok(QuantumImporter {
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

    /// Bytes consumed for a row of `number_pixels` pixels
    pub fn extent(&self, number_pixels: usize) -> Result<usize, QuantumErrors> {
        self.codec
            .extent(&self.info, self.quantum_type, number_pixels)
    }

    /// Fill `row` from `input`, returning the number of bytes consumed.
    ///
    /// Only the channels named by the layout are written, everything else
    /// in the row keeps its value. Colormap indexes outside the colormap
    /// are replaced by zero.
    pub fn import(&self, input: &[u8], row: &mut PixelRowMut<'_>) -> Result<usize, QuantumErrors> {
        let number_pixels = row.len();
        let requirement = self.quantum_type.requirement();

        // validate with a shared view, then take the index plane mutably
        check_row(
            self.quantum_type,
            row.colorspace,
            row.is_colormapped(),
            number_pixels,
            row.indexes.as_deref()
        )?;

        let extent = self.extent(number_pixels)?;

        if input.len() < extent {
            return Err(QuantumErrors::TooSmallBuffer(extent, input.len()));
        }
        let pad = self.info.pad();
        let associated =
            self.info.alpha() == QuantumAlpha::Associated && row.colorspace.has_alpha();
        let invert = self.info.min_is_white() && self.info.depth() == 1;
        let colormap = row.colormap.unwrap_or(&[]);

        let mut indexes: Option<&mut [IndexPacket]> = match requirement {
            Requirement::None => None,
            _ => row.indexes.as_deref_mut()
        };

        let mut reader = SampleReader::new(&self.info, self.codec, &input[..extent]);
        let mut invalid_indexes = 0_usize;

        if self.quantum_type == QuantumType::CbYCrY {
            for pair in row.pixels.chunks_mut(2) {
                let (cb, y0, cr, y1) = if self.codec.word_per_pixel(self.quantum_type) {
                    let y0 = reader.pull();
                    let cb = reader.pull();
                    let cr = reader.pull();
                    let y1 = reader.pull();
                    // the second word repeats the chroma
                    reader.pull();
                    reader.pull();
                    (cb, y0, cr, y1)
                } else {
                    (reader.pull(), reader.pull(), reader.pull(), reader.pull())
                };

                let y = [y0, y1];

                for (pixel, luma) in pair.iter_mut().zip(y) {
                    pixel.red = luma;
                    pixel.green = cb;
                    pixel.blue = cr;

                    if associated {
                        unpremultiply(pixel);
                    }
                }
                reader.end_group(pad);
            }
        } else {
            let channels = self.quantum_type.channels();

            for (x, pixel) in row.pixels.iter_mut().enumerate() {
                for channel in channels {
                    match channel {
                        Channel::Red => pixel.red = reader.pull(),
                        Channel::Green => pixel.green = reader.pull(),
                        Channel::Blue => pixel.blue = reader.pull(),
                        Channel::Alpha => pixel.set_alpha(reader.pull()),
                        Channel::Opacity => pixel.opacity = reader.pull(),
                        Channel::Gray => {
                            let value = reader.pull();
                            let value = if invert { QUANTUM_RANGE - value } else { value };
                            *pixel = Pixel {
                                red:     value,
                                green:   value,
                                blue:    value,
                                opacity: pixel.opacity
                            };
                        }
                        Channel::Black => {
                            let black = reader.pull();
                            if let Some(plane) = indexes.as_deref_mut() {
                                plane[x] = black;
                            }
                        }
                        Channel::Index => {
                            let raw = reader.pull_raw();

                            let index = match usize::try_from(raw) {
                                Ok(index) if index < colormap.len() => index,
                                _ => {
                                    invalid_indexes += 1;
                                    0
                                }
                            };
                            if let Some(entry) = colormap.get(index) {
                                *pixel = *entry;
                            }
                            if let Some(plane) = indexes.as_deref_mut() {
                                plane[x] = index as IndexPacket;
                            }
                        }
                    }
                }
                if associated {
                    unpremultiply(pixel);
                }
                reader.end_group(pad);
            }
        }
        if invalid_indexes > 0 {
            warn!("{invalid_indexes} colormap indexes out of range, replaced by index 0");
        }
        let consumed = reader.finish();

        trace!(
            "Imported {number_pixels} pixels as {:?}, {consumed} bytes",
            self.quantum_type
        );
        Ok(consumed)
    }
}

/// Fill `row` from `input` holding samples in `quantum_type` layout
///
/// Shorthand for [`QuantumImporter::new`] followed by [`QuantumImporter::import`]
pub fn import_quantum_pixels(
    info: &QuantumInfo, quantum_type: QuantumType, input: &[u8], mut row: PixelRowMut<'_>
) -> Result<usize, QuantumErrors> {
    QuantumImporter::new(*info, quantum_type)?.import(input, &mut row)
}
