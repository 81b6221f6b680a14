/* Copyright (C) 2021 Casper Meijn <casper@meijn.net>
 * SPDX-License-Identifier: GPL-3.0-or-later
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <http://www.gnu.org/licenses/>.
 */

use bitvec::prelude::*;

/// Append-only bit sequence, packed most significant bit first
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Buffer {
    bits: BitVec<u8, Msb0>,
}

impl Buffer {
    /// Creates a new empty buffer
    ///
    /// # Example
    ///```
    /// use qr_core::buffer::Buffer;
    /// let mut buffer = Buffer::new();
    /// assert_eq!(buffer.data(), []);
    /// buffer.append_bytes(&[1, 2, 3]);
    /// assert_eq!(buffer.data(), [1, 2, 3]);
    ///```
    pub fn new() -> Buffer {
        Buffer {
            bits: BitVec::new(),
        }
    }

    /// Return the amount of bytes and bits written to the buffer
    ///
    /// # Example
    ///```
    /// use qr_core::buffer::Buffer;
    /// let mut buffer = Buffer::new();
    /// buffer.append_bytes(&[1, 2, 3]);
    /// buffer.append_bits(&[true, false, true, false]);
    /// assert_eq!(buffer.byte_bit_len(), (3, 4));
    ///```
    pub fn byte_bit_len(&self) -> (usize, usize) {
        (self.bit_len() / 8, self.bit_len() % 8)
    }

    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    /// Adds a single bit to the buffer
    ///
    /// # Example
    ///```
    /// use qr_core::buffer::Buffer;
    /// let mut buffer = Buffer::new();
    /// buffer.append_bit(true);
    /// buffer.append_bit(false);
    /// buffer.append_bit(true);
    /// buffer.append_bit(false);
    /// assert_eq!(buffer.data(), [0b1010_0000]);
    ///```
    pub fn append_bit(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn append_bits(&mut self, bits: &[bool]) {
        for bit in bits {
            self.append_bit(*bit)
        }
    }

    /// Adds the low `bit_len` bits of `number`, most significant first
    ///
    /// # Example
    ///```
    /// use qr_core::buffer::Buffer;
    /// let mut buffer = Buffer::new();
    /// buffer.append_number(3, 4);
    /// buffer.append_number(0b111100, 6);
    /// buffer.append_number(2, 2);
    /// assert_eq!(buffer.data(), [0b0011_1111, 0b0010_0000]);
    ///```
    pub fn append_number(&mut self, number: u32, bit_len: usize) {
        debug_assert!(bit_len <= 32);
        for index in (0..bit_len).rev() {
            self.append_bit((number >> index) & 1 != 0)
        }
    }

    pub fn append_byte(&mut self, byte: u8) {
        self.append_number(byte as u32, 8)
    }

    pub fn append_bytes(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.append_byte(*byte)
        }
    }

    /// Returns all written data, a trailing partial byte is padded with zeros
    pub fn data(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }

    pub fn bits(&self) -> &BitSlice<u8, Msb0> {
        self.bits.as_bitslice()
    }
}
