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

use crate::buffer::Buffer;
use crate::error::QrError;
use crate::error_correction::ErrorCorrectionLevel;
use crate::qr_version::Version;

pub(crate) const BYTE_MODE_INDICATOR: u32 = 0b0100;
const PAD_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];

/// Picks the smallest supported version that holds `data_len` bytes
pub fn select_version(
    data_len: usize,
    error_correction: ErrorCorrectionLevel,
) -> Result<Version, QrError> {
    Version::all()
        .find(|version| version.byte_capacity(error_correction) >= data_len)
        .ok_or(QrError::UnsupportedSize {
            length: data_len,
            level: error_correction,
        })
}

/// Encodes a payload as a single byte mode segment, padded to the data
/// capacity of the version
pub struct ByteDataEncoder {
    pub(crate) version: Version,
    pub(crate) error_correction: ErrorCorrectionLevel,
}

impl ByteDataEncoder {
    fn capacity_bit_len(&self) -> usize {
        self.version.data_codeword_bit_len(self.error_correction)
    }

    fn encode_mode_indicator(&self, buffer: &mut Buffer) {
        buffer.append_number(BYTE_MODE_INDICATOR, 4)
    }

    fn encode_character_count_indicator(&self, count: usize, buffer: &mut Buffer) {
        let bit_len = self.version.character_count_indicator_bit_length();
        buffer.append_number(count as u32, bit_len);
    }

    fn encode_data(&self, data: &[u8], buffer: &mut Buffer) {
        buffer.append_bytes(data);
    }

    fn encode_terminator(&self, buffer: &mut Buffer) {
        // Up to four zero bits, then zeros up to the next codeword boundary
        let remaining = self.capacity_bit_len() - buffer.bit_len();
        buffer.append_number(0, remaining.min(4));

        let (_, bit_len) = buffer.byte_bit_len();
        if bit_len != 0 {
            buffer.append_number(0, 8 - bit_len);
        }
    }

    fn encode_padding(&self, buffer: &mut Buffer) {
        let capacity = self.capacity_bit_len();
        for pad in PAD_CODEWORDS.iter().cycle() {
            if buffer.bit_len() >= capacity {
                break;
            }
            buffer.append_byte(*pad);
        }
    }

    pub fn encode(&self, data: &[u8]) -> Result<Buffer, QrError> {
        let capacity = self.version.byte_capacity(self.error_correction);
        if data.len() > capacity {
            return Err(QrError::DataTooLong {
                length: data.len(),
                capacity,
                version: self.version.number(),
                level: self.error_correction,
            });
        }

        let mut buffer = Buffer::new();
        self.encode_mode_indicator(&mut buffer);
        self.encode_character_count_indicator(data.len(), &mut buffer);
        self.encode_data(data, &mut buffer);
        self.encode_terminator(&mut buffer);
        self.encode_padding(&mut buffer);
        debug_assert_eq!(buffer.bit_len(), self.capacity_bit_len());
        Ok(buffer)
    }
}
