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

use crate::blocks::{interleave, BlockLengthIterator, EncodedBlock};
use crate::buffer::Buffer;
use crate::error::QrError;
use crate::galois;
use crate::qr_version::Version;
use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::{Display, Formatter};
use core::str::FromStr;

/// Qr codes use Reed–Solomon error correction
#[derive(Copy, Clone, Debug, Hash, Ord, PartialOrd, Eq, PartialEq, Default)]
pub enum ErrorCorrectionLevel {
    /// Allows recovery of 7% of missing data
    Low,
    /// Allows recovery of 15% of missing data
    #[default]
    Medium,
    /// Allows recovery of 25% of missing data
    Quartile,
    /// Allows recovery of 30% of missing data
    High,
}

impl ErrorCorrectionLevel {
    pub const ALL: [ErrorCorrectionLevel; 4] = [
        ErrorCorrectionLevel::Low,
        ErrorCorrectionLevel::Medium,
        ErrorCorrectionLevel::Quartile,
        ErrorCorrectionLevel::High,
    ];

    /// The two bit indicator used in the format information
    pub(crate) fn format_bits(self) -> u8 {
        match self {
            ErrorCorrectionLevel::Low => 0b01,
            ErrorCorrectionLevel::Medium => 0b00,
            ErrorCorrectionLevel::Quartile => 0b11,
            ErrorCorrectionLevel::High => 0b10,
        }
    }

    pub fn letter(self) -> char {
        match self {
            ErrorCorrectionLevel::Low => 'L',
            ErrorCorrectionLevel::Medium => 'M',
            ErrorCorrectionLevel::Quartile => 'Q',
            ErrorCorrectionLevel::High => 'H',
        }
    }
}

impl Display for ErrorCorrectionLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl TryFrom<char> for ErrorCorrectionLevel {
    type Error = QrError;

    fn try_from(letter: char) -> Result<Self, Self::Error> {
        match letter.to_ascii_uppercase() {
            'L' => Ok(ErrorCorrectionLevel::Low),
            'M' => Ok(ErrorCorrectionLevel::Medium),
            'Q' => Ok(ErrorCorrectionLevel::Quartile),
            'H' => Ok(ErrorCorrectionLevel::High),
            _ => Err(QrError::UnknownErrorCorrectionLevel(letter.to_string())),
        }
    }
}

impl FromStr for ErrorCorrectionLevel {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Self::try_from(letter),
            _ => Err(QrError::UnknownErrorCorrectionLevel(s.to_string())),
        }
    }
}

/// Computes error correction codewords for a single block
pub struct ReedSolomonEncoder {
    /// Generator polynomial, highest degree first. Always monic.
    generator: Vec<u8>,
}

impl ReedSolomonEncoder {
    /// Builds the generator polynomial (x - α^0)(x - α^1)...(x - α^(ecc_len-1))
    pub fn new(ecc_len: usize) -> Self {
        let mut generator = vec![1u8];
        for power in 0..ecc_len {
            let root = galois::exp(power);
            let mut next = vec![0u8; generator.len() + 1];
            for (index, &coefficient) in generator.iter().enumerate() {
                next[index] ^= coefficient;
                next[index + 1] ^= galois::multiply(coefficient, root);
            }
            generator = next;
        }
        Self { generator }
    }

    pub fn ecc_len(&self) -> usize {
        self.generator.len() - 1
    }

    /// Remainder of data(x) * x^ecc_len divided by the generator polynomial
    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>, QrError> {
        let ecc_len = self.ecc_len();
        let mut remainder = vec![0u8; data.len() + ecc_len];
        remainder[..data.len()].copy_from_slice(data);

        for index in 0..data.len() {
            let lead = remainder[index];
            if lead == 0 {
                continue;
            }
            let factor = galois::divide(lead, self.generator[0])?;
            for (offset, &coefficient) in self.generator.iter().enumerate() {
                remainder[index + offset] ^= galois::multiply(coefficient, factor);
            }
        }

        Ok(remainder.split_off(data.len()))
    }
}

/// All codewords of a symbol, in placement order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorCorrectedData {
    codewords: Vec<u8>,
}

impl ErrorCorrectedData {
    pub fn codewords(&self) -> &[u8] {
        &self.codewords
    }
}

pub struct ErrorCorrectionEncoder {
    pub(crate) version: Version,
    pub(crate) error_correction: ErrorCorrectionLevel,
}

impl ErrorCorrectionEncoder {
    /// Splits the data codewords into blocks, computes the error correction
    /// of every block and interleaves the result
    pub fn encode(&self, buffer: &Buffer) -> Result<ErrorCorrectedData, QrError> {
        let data = buffer.data();
        debug_assert_eq!(buffer.bit_len() % 8, 0);
        debug_assert_eq!(
            data.len(),
            self.version.data_codeword_count(self.error_correction)
        );

        // Every block of a symbol carries the same amount of error correction
        let block_count = self.version.block_count(self.error_correction);
        let ecc_len =
            self.version.error_correction_codeword_count(self.error_correction) / block_count;
        let encoder = ReedSolomonEncoder::new(ecc_len);

        let mut blocks = Vec::with_capacity(block_count);
        for block in BlockLengthIterator::new(self.version, self.error_correction) {
            let block_data = &data[block.data_pos..block.data_pos + block.data_len];
            blocks.push(EncodedBlock {
                data: block_data,
                ecc: encoder.encode(block_data)?,
            });
        }

        log::trace!(
            "{} error correction blocks for version {}-{}",
            blocks.len(),
            self.version.number(),
            self.error_correction
        );

        Ok(ErrorCorrectedData {
            codewords: interleave(&blocks),
        })
    }
}
