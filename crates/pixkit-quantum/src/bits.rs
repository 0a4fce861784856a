/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Bit level packing of samples into byte buffers.
//!
//! Two accumulation units exist.
//!
//! With [`PackingUnit::Byte`] samples are placed most significant bit
//! first, a sample whose width is a whole number of bytes and that starts
//! on a byte boundary is stored as an ordinary multi byte integer in the
//! configured byte order.
//!
//! With [`PackingUnit::Long`] samples fill a 32 bit register starting at its
//! least significant bit, every full register is emitted as a 32 bit word in
//! the configured byte order.
//!
//! Out of range writes are dropped and out of range reads return zero, the
//! callers size buffers beforehand via [`QuantumInfo::extent`](crate::QuantumInfo::extent).
use pixkit_core::bit_depth::ByteEndian;

use crate::info::PackingUnit;
use crate::state::QuantumState;

#[inline(always)]
const fn mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1 << width) - 1
    }
}

/// Writes samples of arbitrary width into a byte buffer
pub struct BitPacker<'a> {
    buffer:   &'a mut [u8],
    position: usize,
    state:    QuantumState,
    endian:   ByteEndian
}

impl<'a> BitPacker<'a> {
    pub fn new(buffer: &'a mut [u8], state: QuantumState, endian: ByteEndian) -> BitPacker<'a> {
        BitPacker {
            buffer,
            position: 0,
            state,
            endian
        }
    }

    pub const fn state(&self) -> &QuantumState {
        &self.state
    }

    /// Bytes emitted so far, not counting a partially filled unit
    pub const fn position(&self) -> usize {
        self.position
    }

    #[inline(always)]
    fn push_byte(&mut self, byte: u8) {
        if let Some(slot) = self.buffer.get_mut(self.position) {
            *slot = byte;
        }
        self.position += 1;
    }

    fn push_word(&mut self, word: u32) {
        let bytes = match self.endian {
            ByteEndian::BE => word.to_be_bytes(),
            ByteEndian::LE => word.to_le_bytes()
        };
        for byte in bytes {
            self.push_byte(byte);
        }
    }

    /// Append the low `width` bits of `value`, `width` in `1..=64`
    pub fn put_bits(&mut self, value: u64, width: u32) {
        let value = value & mask(width);

        match self.state.unit() {
            PackingUnit::Byte => {
                if width % 8 == 0 && self.state.is_aligned() {
                    let count = (width / 8) as usize;
                    let bytes = value.to_be_bytes();
                    let bytes = &bytes[8 - count..];

                    match self.endian {
                        ByteEndian::BE => bytes.iter().for_each(|x| self.push_byte(*x)),
                        ByteEndian::LE => bytes.iter().rev().for_each(|x| self.push_byte(*x))
                    }
                    return;
                }
                let mut remaining = width;

                while remaining > 0 {
                    let take = remaining.min(self.state.bits);
                    remaining -= take;

                    let chunk = (value >> remaining) & mask(take);

                    self.state.bits -= take;
                    self.state.pixel |= (chunk as u32) << self.state.bits;

                    if self.state.bits == 0 {
                        let byte = self.state.pixel as u8;
                        self.push_byte(byte);
                        self.state.reset();
                    }
                }
            }
            PackingUnit::Long => {
                let mut consumed = 0;

                while consumed < width {
                    let take = (width - consumed).min(self.state.bits);
                    let chunk = (value >> consumed) & mask(take);

                    self.state.pixel |= (chunk as u32) << (32 - self.state.bits);
                    self.state.bits -= take;
                    consumed += take;

                    if self.state.bits == 0 {
                        let word = self.state.pixel;
                        self.push_word(word);
                        self.state.reset();
                    }
                }
            }
        }
    }

    /// Append `count` zero bytes
    pub fn put_zeros(&mut self, count: usize) {
        if self.state.unit() == PackingUnit::Byte && self.state.is_aligned() {
            for _ in 0..count {
                self.push_byte(0);
            }
        } else {
            for _ in 0..count {
                self.put_bits(0, 8);
            }
        }
    }

    /// Emit a partially filled unit, the unfilled bits are zero
    pub fn flush(&mut self) {
        if self.state.is_aligned() {
            return;
        }
        match self.state.unit() {
            PackingUnit::Byte => {
                let byte = self.state.pixel as u8;
                self.push_byte(byte);
            }
            PackingUnit::Long => {
                let word = self.state.pixel;
                self.push_word(word);
            }
        }
        self.state.reset();
    }

    /// Flush and return the number of bytes written
    pub fn finish(mut self) -> usize {
        self.flush();
        self.position
    }
}

/// Reads samples of arbitrary width from a byte buffer.
///
/// Mirrors [`BitPacker`], bits written by a packer configured the same
/// way are read back in the same order.
pub struct BitUnpacker<'a> {
    buffer:   &'a [u8],
    position: usize,
    state:    QuantumState,
    endian:   ByteEndian
}

impl<'a> BitUnpacker<'a> {
    pub fn new(buffer: &'a [u8], state: QuantumState, endian: ByteEndian) -> BitUnpacker<'a> {
        BitUnpacker {
            buffer,
            position: 0,
            state,
            endian
        }
    }

    pub const fn state(&self) -> &QuantumState {
        &self.state
    }

    /// Bytes consumed so far, a partially consumed unit counts in full
    pub const fn position(&self) -> usize {
        self.position
    }

    #[inline(always)]
    fn pull_byte(&mut self) -> u8 {
        let byte = self.buffer.get(self.position).copied().unwrap_or(0);
        self.position += 1;
        byte
    }

    fn pull_word(&mut self) -> u32 {
        let bytes = [
            self.pull_byte(),
            self.pull_byte(),
            self.pull_byte(),
            self.pull_byte()
        ];
        match self.endian {
            ByteEndian::BE => u32::from_be_bytes(bytes),
            ByteEndian::LE => u32::from_le_bytes(bytes)
        }
    }

    /// Read the next `width` bits, `width` in `1..=64`
    pub fn get_bits(&mut self, width: u32) -> u64 {
        match self.state.unit() {
            PackingUnit::Byte => {
                if width % 8 == 0 && self.state.is_aligned() {
                    let count = width / 8;
                    let mut value = 0_u64;

                    match self.endian {
                        ByteEndian::BE => {
                            for _ in 0..count {
                                value = (value << 8) | u64::from(self.pull_byte());
                            }
                        }
                        ByteEndian::LE => {
                            for i in 0..count {
                                value |= u64::from(self.pull_byte()) << (8 * i);
                            }
                        }
                    }
                    return value;
                }
                let mut value = 0_u64;
                let mut remaining = width;

                while remaining > 0 {
                    if self.state.is_aligned() {
                        self.state.pixel = u32::from(self.pull_byte());
                    }
                    let take = remaining.min(self.state.bits);

                    self.state.bits -= take;
                    remaining -= take;

                    let chunk = (u64::from(self.state.pixel) >> self.state.bits) & mask(take);
                    value = (value << take) | chunk;

                    if self.state.bits == 0 {
                        self.state.reset();
                    }
                }
                value
            }
            PackingUnit::Long => {
                let mut value = 0_u64;
                let mut consumed = 0;

                while consumed < width {
                    if self.state.is_aligned() {
                        self.state.pixel = self.pull_word();
                    }
                    let take = (width - consumed).min(self.state.bits);
                    let chunk = (u64::from(self.state.pixel) >> (32 - self.state.bits)) & mask(take);

                    value |= chunk << consumed;
                    self.state.bits -= take;
                    consumed += take;

                    if self.state.bits == 0 {
                        self.state.reset();
                    }
                }
                value
            }
        }
    }

    /// Skip `count` bytes worth of bits
    pub fn skip_bytes(&mut self, count: usize) {
        if self.state.unit() == PackingUnit::Byte && self.state.is_aligned() {
            self.position += count;
        } else {
            for _ in 0..count {
                self.get_bits(8);
            }
        }
    }

    /// Drop what remains of a partially consumed unit
    pub fn flush(&mut self) {
        self.state.reset();
    }

    pub fn finish(mut self) -> usize {
        self.flush();
        self.position
    }
}
