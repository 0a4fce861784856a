/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Per sample encoding and decoding.
//!
//! The sample codec is resolved once per call from the depth, format and
//! packing, the inner loops then dispatch on a single small enum.
use half::f16;
use pixkit_image::{scale_any_to_quantum, scale_quantum_to_any, Quantum};

use crate::bits::{BitPacker, BitUnpacker};
use crate::errors::QuantumErrors;
use crate::info::{Packing, PackingUnit, QuantumFormat, QuantumInfo};
use crate::layout::QuantumType;
use crate::state::QuantumState;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum SampleCodec {
    U8,
    U16,
    U32,
    U64,
    F16,
    F32,
    F64,
    /// Any other width, packed through the bit register
    Bits(u32),
    /// Three 10 bit samples per big endian 32 bit word.
    ///
    /// `ascending` places the first sample of a group in the low slot
    Words10 { ascending: bool },
    /// One 12 bit sample per 16 bit word, shifted up by four
    Words12
}

impl SampleCodec {
    pub fn select(info: &QuantumInfo, quantum_type: QuantumType) -> SampleCodec {
        let depth = info.depth();

        if info.format() == QuantumFormat::FloatingPoint {
            match depth {
                16 => return SampleCodec::F16,
                32 => return SampleCodec::F32,
                64 => return SampleCodec::F64,
                _ => ()
            }
        }
        match (depth, info.packing()) {
            (8, _) => SampleCodec::U8,
            (16, _) => SampleCodec::U16,
            (32, _) => SampleCodec::U32,
            (64, _) => SampleCodec::U64,
            (10, Packing::Words) => SampleCodec::Words10 {
                ascending: quantum_type == QuantumType::Gray
            },
            (12, Packing::Words) => SampleCodec::Words12,
            (depth, _) => SampleCodec::Bits(depth)
        }
    }

    /// Whether a 4:2:2 pair is stored as one word per pixel, each word
    /// holding that pixel's luma followed by the pair's chroma blue and red
    pub const fn word_per_pixel(self, quantum_type: QuantumType) -> bool {
        matches!(self, SampleCodec::Words10 { .. }) && matches!(quantum_type, QuantumType::CbYCrY)
    }

    /// Samples stored for one group of `quantum_type`
    const fn group_samples(self, quantum_type: QuantumType) -> usize {
        if self.word_per_pixel(quantum_type) {
            6
        } else {
            quantum_type.channels().len()
        }
    }

    /// Size in bytes of one sample for codecs that store whole bytes
    const fn sample_bytes(self) -> Option<usize> {
        match self {
            SampleCodec::U8 => Some(1),
            SampleCodec::U16 | SampleCodec::F16 | SampleCodec::Words12 => Some(2),
            SampleCodec::U32 | SampleCodec::F32 => Some(4),
            SampleCodec::U64 | SampleCodec::F64 => Some(8),
            SampleCodec::Bits(_) | SampleCodec::Words10 { .. } => None
        }
    }

    /// Register unit the codec packs with.
    ///
    /// Only arbitrary widths honour the configured unit, byte sized
    /// samples and word packings are always laid out byte by byte.
    fn unit(self, info: &QuantumInfo) -> PackingUnit {
        match self {
            SampleCodec::Bits(_) => info.unit(),
            _ => PackingUnit::Byte
        }
    }

    pub fn extent(
        self, info: &QuantumInfo, quantum_type: QuantumType, number_pixels: usize
    ) -> Result<usize, QuantumErrors> {
        let overflow = || QuantumErrors::ExtentOverflow(number_pixels);

        let groups = quantum_type.groups(number_pixels);
        let samples = self.group_samples(quantum_type);
        let pad = info.pad();

        let bytes = match self {
            SampleCodec::Bits(depth) => {
                let group_bits = samples * depth as usize + pad * 8;
                let total_bits = groups.checked_mul(group_bits).ok_or_else(overflow)?;
                let unit_bits = self.unit(info).bits() as usize;

                total_bits.div_ceil(unit_bits) * (unit_bits / 8)
            }
            SampleCodec::Words10 { .. } => {
                if pad == 0 {
                    let total = groups.checked_mul(samples).ok_or_else(overflow)?;
                    total.div_ceil(3) * 4
                } else {
                    groups
                        .checked_mul(samples.div_ceil(3) * 4 + pad)
                        .ok_or_else(overflow)?
                }
            }
            codec => {
                let size = codec.sample_bytes().unwrap_or(1);
                groups
                    .checked_mul(samples * size + pad)
                    .ok_or_else(overflow)?
            }
        };
        Ok(bytes)
    }
}

/// Encodes canonical samples into an output buffer
pub(crate) struct SampleWriter<'a> {
    packer:  BitPacker<'a>,
    codec:   SampleCodec,
    pending: [u64; 3],
    filled:  usize
}

impl<'a> SampleWriter<'a> {
    pub fn new(info: &QuantumInfo, codec: SampleCodec, out: &'a mut [u8]) -> SampleWriter<'a> {
        let state = QuantumState::with_unit(info, codec.unit(info));

        SampleWriter {
            packer: BitPacker::new(out, state, info.endian()),
            codec,
            pending: [0; 3],
            filled: 0
        }
    }

    /// Write one canonical sample, scaled to the external depth
    pub fn push(&mut self, sample: Quantum) {
        match self.codec {
            SampleCodec::U8 => self.packer.put_bits(scale_quantum_to_any(sample, 8), 8),
            SampleCodec::U16 => self.packer.put_bits(u64::from(sample), 16),
            SampleCodec::U32 => self.packer.put_bits(scale_quantum_to_any(sample, 32), 32),
            SampleCodec::U64 => self.packer.put_bits(scale_quantum_to_any(sample, 64), 64),
            SampleCodec::F16 | SampleCodec::F32 | SampleCodec::F64 => {
                let value = self.packer.state().quantum_to_float(sample);
                self.push_float(value);
            }
            SampleCodec::Bits(depth) => {
                self.packer.put_bits(scale_quantum_to_any(sample, depth), depth);
            }
            SampleCodec::Words10 { .. } => self.push_word_sample(scale_quantum_to_any(sample, 10)),
            SampleCodec::Words12 => self.packer.put_bits(scale_quantum_to_any(sample, 12) << 4, 16)
        }
    }

    /// Write a raw value, indexes are never scaled
    pub fn push_raw(&mut self, value: u64) {
        match self.codec {
            SampleCodec::U8 => self.packer.put_bits(value, 8),
            SampleCodec::U16 => self.packer.put_bits(value, 16),
            SampleCodec::U32 => self.packer.put_bits(value, 32),
            SampleCodec::U64 => self.packer.put_bits(value, 64),
            SampleCodec::F16 | SampleCodec::F32 | SampleCodec::F64 => self.push_float(value as f64),
            SampleCodec::Bits(depth) => self.packer.put_bits(value, depth),
            SampleCodec::Words10 { .. } => self.push_word_sample(value & 0x3FF),
            SampleCodec::Words12 => self.packer.put_bits((value & 0xFFF) << 4, 16)
        }
    }

    fn push_float(&mut self, value: f64) {
        match self.codec {
            SampleCodec::F16 => {
                self.packer.put_bits(u64::from(f16::from_f64(value).to_bits()), 16);
            }
            SampleCodec::F32 => self.packer.put_bits(u64::from((value as f32).to_bits()), 32),
            _ => self.packer.put_bits(value.to_bits(), 64)
        }
    }

    fn push_word_sample(&mut self, value: u64) {
        self.pending[self.filled] = value;
        self.filled += 1;

        if self.filled == 3 {
            self.emit_word();
        }
    }

    fn emit_word(&mut self) {
        if self.filled == 0 {
            return;
        }
        for slot in self.filled..3 {
            self.pending[slot] = 0;
        }
        let [a, b, c] = self.pending;

        let order = match self.codec {
            SampleCodec::Words10 { ascending: true } => [c, b, a],
            _ => [a, b, c]
        };
        for sample in order {
            self.packer.put_bits(sample, 10);
        }
        self.packer.put_bits(0, 2);
        self.filled = 0;
    }

    /// Close a group, appending `pad` zero bytes
    pub fn end_group(&mut self, pad: usize) {
        if pad > 0 {
            self.emit_word();
            self.packer.put_zeros(pad);
        }
    }

    pub fn finish(mut self) -> usize {
        self.emit_word();
        self.packer.finish()
    }
}

/// Decodes external samples into canonical ones
pub(crate) struct SampleReader<'a> {
    unpacker: BitUnpacker<'a>,
    codec:    SampleCodec,
    pending:  [u64; 3],
    next:     usize
}

impl<'a> SampleReader<'a> {
    pub fn new(info: &QuantumInfo, codec: SampleCodec, input: &'a [u8]) -> SampleReader<'a> {
        let state = QuantumState::with_unit(info, codec.unit(info));

        SampleReader {
            unpacker: BitUnpacker::new(input, state, info.endian()),
            codec,
            pending: [0; 3],
            next: 3
        }
    }

    /// Read one sample scaled to the canonical range
    pub fn pull(&mut self) -> Quantum {
        match self.codec {
            SampleCodec::U8 => scale_any_to_quantum(self.unpacker.get_bits(8), 8),
            SampleCodec::U16 => self.unpacker.get_bits(16) as Quantum,
            SampleCodec::U32 => scale_any_to_quantum(self.unpacker.get_bits(32), 32),
            SampleCodec::U64 => scale_any_to_quantum(self.unpacker.get_bits(64), 64),
            SampleCodec::F16 | SampleCodec::F32 | SampleCodec::F64 => {
                let value = self.pull_float();
                self.unpacker.state().float_to_quantum(value)
            }
            SampleCodec::Bits(depth) => scale_any_to_quantum(self.unpacker.get_bits(depth), depth),
            SampleCodec::Words10 { .. } => {
                let value = self.pull_word_sample();
                scale_any_to_quantum(value, 10)
            }
            SampleCodec::Words12 => scale_any_to_quantum(self.unpacker.get_bits(16) >> 4, 12)
        }
    }

    /// Read a raw unscaled value
    pub fn pull_raw(&mut self) -> u64 {
        match self.codec {
            SampleCodec::U8 => self.unpacker.get_bits(8),
            SampleCodec::U16 => self.unpacker.get_bits(16),
            SampleCodec::U32 => self.unpacker.get_bits(32),
            SampleCodec::U64 => self.unpacker.get_bits(64),
            SampleCodec::F16 | SampleCodec::F32 | SampleCodec::F64 => {
                let value = self.pull_float();
                if value.is_nan() || value <= 0.0 {
                    0
                } else {
                    (value + 0.5) as u64
                }
            }
            SampleCodec::Bits(depth) => self.unpacker.get_bits(depth),
            SampleCodec::Words10 { .. } => self.pull_word_sample(),
            SampleCodec::Words12 => self.unpacker.get_bits(16) >> 4
        }
    }

    fn pull_float(&mut self) -> f64 {
        match self.codec {
            SampleCodec::F16 => f16::from_bits(self.unpacker.get_bits(16) as u16).to_f64(),
            SampleCodec::F32 => f64::from(f32::from_bits(self.unpacker.get_bits(32) as u32)),
            _ => f64::from_bits(self.unpacker.get_bits(64))
        }
    }

    fn pull_word_sample(&mut self) -> u64 {
        if self.next == 3 {
            let first = self.unpacker.get_bits(10);
            let second = self.unpacker.get_bits(10);
            let third = self.unpacker.get_bits(10);
            self.unpacker.get_bits(2);

            self.pending = match self.codec {
                SampleCodec::Words10 { ascending: true } => [third, second, first],
                _ => [first, second, third]
            };
            self.next = 0;
        }
        let value = self.pending[self.next];
        self.next += 1;
        value
    }

    /// Close a group, skipping `pad` bytes
    pub fn end_group(&mut self, pad: usize) {
        if pad > 0 {
            // the rest of a partially used word belongs to this group
            self.next = 3;
            self.unpacker.skip_bytes(pad);
        }
    }

    pub fn finish(self) -> usize {
        self.unpacker.finish()
    }
}

#[cfg(test)]
mod tests {
    use pixkit_core::bit_depth::ByteEndian;

    use crate::codec::{SampleCodec, SampleReader, SampleWriter};
    use crate::{Packing, PackingUnit, QuantumFormat, QuantumInfo, QuantumType};

    #[test]
    fn codec_selection() {
        let float = QuantumInfo::new(16).set_format(QuantumFormat::FloatingPoint);
        assert_eq!(SampleCodec::select(&float, QuantumType::RGB), SampleCodec::F16);

        // no 24 bit float, falls back to integer packing
        let float24 = QuantumInfo::new(24).set_format(QuantumFormat::FloatingPoint);
        assert_eq!(SampleCodec::select(&float24, QuantumType::RGB), SampleCodec::Bits(24));

        let words = QuantumInfo::new(10).set_packing(Packing::Words);
        assert_eq!(
            SampleCodec::select(&words, QuantumType::Gray),
            SampleCodec::Words10 { ascending: true }
        );
        assert_eq!(
            SampleCodec::select(&words, QuantumType::RGB),
            SampleCodec::Words10 { ascending: false }
        );
        assert_eq!(
            SampleCodec::select(&QuantumInfo::new(10), QuantumType::RGB),
            SampleCodec::Bits(10)
        );
    }

    #[test]
    fn ten_bit_words_ignore_endian() {
        for endian in [ByteEndian::BE, ByteEndian::LE] {
            let info = QuantumInfo::new(10)
                .set_packing(Packing::Words)
                .set_endian(endian);
            let codec = SampleCodec::select(&info, QuantumType::RGB);

            let mut out = [0_u8; 4];
            let mut writer = SampleWriter::new(&info, codec, &mut out);
            writer.push_raw(0x3FF);
            writer.push_raw(0);
            writer.push_raw(0x155);
            assert_eq!(writer.finish(), 4);

            let word = u32::from_be_bytes(out);
            assert_eq!(word >> 22, 0x3FF);
            assert_eq!((word >> 12) & 0x3FF, 0);
            assert_eq!((word >> 2) & 0x3FF, 0x155);
            assert_eq!(word & 3, 0);
        }
    }

    #[test]
    fn twelve_bit_words_shift_up() {
        let info = QuantumInfo::new(12)
            .set_packing(Packing::Words)
            .set_endian(ByteEndian::LE);
        let codec = SampleCodec::select(&info, QuantumType::Gray);

        let mut out = [0_u8; 2];
        let mut writer = SampleWriter::new(&info, codec, &mut out);
        writer.push_raw(0xABC);
        assert_eq!(writer.finish(), 2);
        assert_eq!(u16::from_le_bytes(out), 0xABC0);

        let mut reader = SampleReader::new(&info, codec, &out);
        assert_eq!(reader.pull_raw(), 0xABC);
    }

    #[test]
    fn long_unit_extent_rounds_to_words() {
        let info = QuantumInfo::new(4).set_unit(PackingUnit::Long);
        // 9 samples of 4 bits is 36 bits, two words
        assert_eq!(info.extent(QuantumType::RGB, 3).unwrap(), 8);
        assert_eq!(QuantumInfo::new(4).extent(QuantumType::RGB, 3).unwrap(), 5);
    }

    #[test]
    fn float_indexes_are_plain_numbers() {
        let info = QuantumInfo::new(32).set_format(QuantumFormat::FloatingPoint);
        let codec = SampleCodec::select(&info, QuantumType::Index);

        let mut out = [0_u8; 4];
        let mut writer = SampleWriter::new(&info, codec, &mut out);
        writer.push_raw(7);
        writer.finish();
        assert_eq!(f32::from_be_bytes(out), 7.0);
    }
}
