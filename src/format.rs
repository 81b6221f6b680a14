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

use crate::error_correction::ErrorCorrectionLevel;
use crate::mask::MaskPattern;

const FORMAT_GENERATOR: u32 = 0b101_0011_0111;
const FORMAT_MASK: u16 = 0b101_0100_0001_0010;
const VERSION_GENERATOR: u32 = 0b1_1111_0010_0101;

/// Appends the BCH remainder of `data` to `data`
fn bch_encode(data: u32, generator: u32) -> u32 {
    let generator_len = u32::BITS - generator.leading_zeros();
    let shift = generator_len - 1;
    let mut remainder = data << shift;
    loop {
        let remainder_len = u32::BITS - remainder.leading_zeros();
        if remainder_len < generator_len {
            break;
        }
        remainder ^= generator << (remainder_len - generator_len);
    }
    (data << shift) | remainder
}

pub struct FormatEncoder {
    pub(crate) error_correction_level: ErrorCorrectionLevel,
    pub(crate) mask_pattern: MaskPattern,
}

impl FormatEncoder {
    fn data_bits(&self) -> u8 {
        (self.error_correction_level.format_bits() << 3) | self.mask_pattern.reference()
    }

    /// 15 bit format information, ready for placement
    pub fn encode(&self) -> u16 {
        bch_encode(self.data_bits() as u32, FORMAT_GENERATOR) as u16 ^ FORMAT_MASK
    }
}

/// Finds the format information nearest to `bits`, allowing at most three
/// flipped bits
pub fn decode_format(bits: u16) -> Option<(ErrorCorrectionLevel, MaskPattern)> {
    let (distance, level, pattern) = ErrorCorrectionLevel::ALL
        .iter()
        .flat_map(|&level| MaskPattern::ALL.iter().map(move |&pattern| (level, pattern)))
        .map(|(level, pattern)| {
            let encoded = FormatEncoder {
                error_correction_level: level,
                mask_pattern: pattern,
            }
            .encode();
            ((encoded ^ bits).count_ones(), level, pattern)
        })
        .min_by_key(|(distance, _, _)| *distance)?;

    (distance <= 3).then_some((level, pattern))
}

/// 18 bit version information of a version number. Symbols carry it
/// from version 7 onwards, beyond [`MAX_VERSION`](crate::qr_version::MAX_VERSION).
pub fn encode_version(version: u8) -> u32 {
    bch_encode(version as u32, VERSION_GENERATOR)
}

#[cfg(test)]
mod tests {
    use crate::error_correction::ErrorCorrectionLevel;
    use crate::format::{decode_format, encode_version, FormatEncoder};
    use crate::mask::MaskPattern;

    // Masked format information per data bits, ISO/IEC 18004 table C.1
    const FORMAT_TABLE: [u16; 32] = [
        0x5412, 0x5125, 0x5e7c, 0x5b4b, 0x45f9, 0x40ce, 0x4f97, 0x4aa0, 0x77c4, 0x72f3, 0x7daa,
        0x789d, 0x662f, 0x6318, 0x6c41, 0x6976, 0x1689, 0x13be, 0x1ce7, 0x19d0, 0x0762, 0x0255,
        0x0d0c, 0x083b, 0x355f, 0x3068, 0x3f31, 0x3a06, 0x24b4, 0x2183, 0x2eda, 0x2bed,
    ];

    #[test]
    fn format_table() {
        for level in ErrorCorrectionLevel::ALL {
            for pattern in MaskPattern::ALL {
                let encoder = FormatEncoder {
                    error_correction_level: level,
                    mask_pattern: pattern,
                };
                let expected = FORMAT_TABLE[encoder.data_bits() as usize];
                assert_eq!(encoder.encode(), expected, "{}-{}", level, pattern);
            }
        }
    }

    #[test]
    fn medium_mask_2() {
        let encoder = FormatEncoder {
            error_correction_level: ErrorCorrectionLevel::Medium,
            mask_pattern: MaskPattern::new(2).unwrap(),
        };
        assert_eq!(encoder.encode(), 0b101_1110_0111_1100);
    }

    #[test]
    fn version_information() {
        // Version 7, ISO/IEC 18004 table D.1
        assert_eq!(encode_version(7), 0x07C94);
        assert_eq!(encode_version(8), 0x085BC);
        assert_eq!(encode_version(40), 0x28C69);
    }

    #[test]
    fn decode_with_errors() {
        let level = ErrorCorrectionLevel::Quartile;
        let pattern = MaskPattern::new(5).unwrap();
        let encoded = FormatEncoder {
            error_correction_level: level,
            mask_pattern: pattern,
        }
        .encode();

        assert_eq!(decode_format(encoded), Some((level, pattern)));
        assert_eq!(decode_format(encoded ^ 0b100_0000_0100_0001), Some((level, pattern)));
        assert_eq!(decode_format(0), None);
    }
}
