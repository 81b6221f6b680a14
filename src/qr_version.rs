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

use crate::error::QrError;
use crate::error_correction::ErrorCorrectionLevel;

pub const MIN_VERSION: u8 = 1;
/// Largest version this crate can build
pub const MAX_VERSION: u8 = 5;

pub const fn version_to_size(version: u8) -> usize {
    version as usize * 4 + 17
}

/// A group of identical error correction blocks
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BlockGroup {
    pub count: usize,
    pub total_codewords: usize,
    pub data_codewords: usize,
}

impl BlockGroup {
    const fn new(count: usize, total_codewords: usize, data_codewords: usize) -> Self {
        Self {
            count,
            total_codewords,
            data_codewords,
        }
    }

    pub const fn ecc_codewords(&self) -> usize {
        self.total_codewords - self.data_codewords
    }
}

/// Error correction blocks per version, in the order L, M, Q, H
const BLOCK_TABLE: [[&[BlockGroup]; 4]; MAX_VERSION as usize] = [
    [
        &[BlockGroup::new(1, 26, 19)],
        &[BlockGroup::new(1, 26, 16)],
        &[BlockGroup::new(1, 26, 13)],
        &[BlockGroup::new(1, 26, 9)],
    ],
    [
        &[BlockGroup::new(1, 44, 34)],
        &[BlockGroup::new(1, 44, 28)],
        &[BlockGroup::new(1, 44, 22)],
        &[BlockGroup::new(1, 44, 16)],
    ],
    [
        &[BlockGroup::new(1, 70, 55)],
        &[BlockGroup::new(1, 70, 44)],
        &[BlockGroup::new(2, 35, 17)],
        &[BlockGroup::new(2, 35, 13)],
    ],
    [
        &[BlockGroup::new(1, 100, 80)],
        &[BlockGroup::new(2, 50, 32)],
        &[BlockGroup::new(2, 50, 24)],
        &[BlockGroup::new(4, 25, 9)],
    ],
    [
        &[BlockGroup::new(1, 134, 108)],
        &[BlockGroup::new(2, 67, 43)],
        &[BlockGroup::new(2, 33, 15), BlockGroup::new(2, 34, 16)],
        &[BlockGroup::new(2, 33, 11), BlockGroup::new(2, 34, 12)],
    ],
];

#[derive(Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
pub struct Version {
    pub(crate) version: u8,
}

impl Version {
    pub fn new(version: u8) -> Result<Self, QrError> {
        if (MIN_VERSION..=MAX_VERSION).contains(&version) {
            Ok(Self { version })
        } else {
            Err(QrError::UnsupportedVersion(version))
        }
    }

    /// Returns the version with a width of `size` modules
    pub fn from_size(size: usize) -> Option<Self> {
        if size < version_to_size(MIN_VERSION) || (size - 17) % 4 != 0 {
            return None;
        }
        u8::try_from((size - 17) / 4)
            .ok()
            .and_then(|version| Self::new(version).ok())
    }

    /// All supported versions, smallest first
    pub fn all() -> impl Iterator<Item = Version> {
        (MIN_VERSION..=MAX_VERSION).map(|version| Version { version })
    }

    pub fn number(&self) -> u8 {
        self.version
    }

    pub const fn width(&self) -> usize {
        version_to_size(self.version)
    }

    /// Byte mode character count indicator length
    pub fn character_count_indicator_bit_length(&self) -> usize {
        match self.version {
            1..=9 => 8,
            _ => 16,
        }
    }

    pub fn total_codeword_count(&self) -> usize {
        match self.version {
            1 => 26,
            2 => 44,
            3 => 70,
            4 => 100,
            5 => 134,
            _ => unreachable!("version is validated on construction"),
        }
    }

    pub fn block_groups(&self, error_correction: ErrorCorrectionLevel) -> &'static [BlockGroup] {
        let level = match error_correction {
            ErrorCorrectionLevel::Low => 0,
            ErrorCorrectionLevel::Medium => 1,
            ErrorCorrectionLevel::Quartile => 2,
            ErrorCorrectionLevel::High => 3,
        };
        BLOCK_TABLE[self.version as usize - 1][level]
    }

    pub fn block_count(&self, error_correction: ErrorCorrectionLevel) -> usize {
        self.block_groups(error_correction)
            .iter()
            .map(|group| group.count)
            .sum()
    }

    pub fn data_codeword_count(&self, error_correction: ErrorCorrectionLevel) -> usize {
        self.block_groups(error_correction)
            .iter()
            .map(|group| group.count * group.data_codewords)
            .sum()
    }

    pub fn data_codeword_bit_len(&self, error_correction: ErrorCorrectionLevel) -> usize {
        self.data_codeword_count(error_correction) * 8
    }

    pub fn error_correction_codeword_count(&self, error_correction: ErrorCorrectionLevel) -> usize {
        self.total_codeword_count() - self.data_codeword_count(error_correction)
    }

    /// Maximum payload length in byte mode
    pub fn byte_capacity(&self, error_correction: ErrorCorrectionLevel) -> usize {
        // Mode indicator and character count indicator
        let header_bits = 4 + self.character_count_indicator_bit_length();
        (self.data_codeword_bit_len(error_correction) - header_bits) / 8
    }

    /// Row and column coordinates of alignment pattern centers
    pub fn alignment_pattern_positions(&self) -> &'static [usize] {
        match self.version {
            1 => &[],
            2 => &[6, 18],
            3 => &[6, 22],
            4 => &[6, 26],
            5 => &[6, 30],
            _ => unreachable!("version is validated on construction"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::QrError;
    use crate::error_correction::ErrorCorrectionLevel;
    use crate::qr_version::Version;

    #[test]
    fn supported_range() {
        assert_eq!(Version::new(0), Err(QrError::UnsupportedVersion(0)));
        assert_eq!(Version::new(6), Err(QrError::UnsupportedVersion(6)));
        assert_eq!(Version::new(5).map(|v| v.width()), Ok(37));
        assert_eq!(Version::all().count(), 5);
    }

    #[test]
    fn from_size() {
        assert_eq!(Version::from_size(21), Version::new(1).ok());
        assert_eq!(Version::from_size(37), Version::new(5).ok());
        assert_eq!(Version::from_size(22), None);
        assert_eq!(Version::from_size(41), None);
        assert_eq!(Version::from_size(17), None);
        assert_eq!(Version::from_size(0), None);
    }

    #[test]
    fn block_tables_are_consistent() {
        for version in Version::all() {
            for level in ErrorCorrectionLevel::ALL {
                let total: usize = version
                    .block_groups(level)
                    .iter()
                    .map(|group| group.count * group.total_codewords)
                    .sum();
                assert_eq!(total, version.total_codeword_count());

                let ecc: usize = version
                    .block_groups(level)
                    .iter()
                    .map(|group| group.count * group.ecc_codewords())
                    .sum();
                assert_eq!(ecc, version.error_correction_codeword_count(level));
            }
        }
    }

    #[test]
    fn byte_capacity() {
        use ErrorCorrectionLevel::{High, Low, Medium, Quartile};
        let v1 = Version::new(1).unwrap();
        assert_eq!(v1.byte_capacity(Low), 17);
        assert_eq!(v1.byte_capacity(Medium), 14);
        assert_eq!(v1.byte_capacity(Quartile), 11);
        assert_eq!(v1.byte_capacity(High), 7);

        let v5 = Version::new(5).unwrap();
        assert_eq!(v5.byte_capacity(Low), 106);
        assert_eq!(v5.byte_capacity(Medium), 84);
        assert_eq!(v5.byte_capacity(Quartile), 60);
        assert_eq!(v5.byte_capacity(High), 44);
    }
}
