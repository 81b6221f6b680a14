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

//! Reading symbols back from a module grid.
//!
//! Only clean, axis aligned grids are supported, one bool per module with
//! `true` being dark. A payload is returned only after every block passed
//! Reed–Solomon correction.

use crate::array_2d::{Array2D, Coordinate};
use crate::blocks::deinterleave;
use crate::encoding::BYTE_MODE_INDICATOR;
use crate::error::DecodeError;
use crate::error_correction::ErrorCorrectionLevel;
use crate::format::decode_format;
use crate::mask::MaskPattern;
use crate::matrix::{FormatPositionIterator, Matrix, Module, PositionIterator};
use crate::qr_version::Version;
use alloc::string::String;
use alloc::vec::Vec;
use bitvec::prelude::*;

/// Agreeing modules needed to accept a finder pattern, out of 49
const FINDER_THRESHOLD: usize = 40;

struct Grid {
    version: Version,
    modules: Array2D<bool>,
}

impl Grid {
    fn read<R: AsRef<[bool]>>(rows: &[R]) -> Result<Grid, DecodeError> {
        let size = rows.len();
        let malformed = |columns| DecodeError::MalformedMatrix {
            rows: size,
            columns,
        };

        if let Some(row) = rows.iter().find(|row| row.as_ref().len() != size) {
            return Err(malformed(row.as_ref().len()));
        }
        let version = Version::from_size(size).ok_or(malformed(size))?;

        let mut modules = Array2D::new(size);
        for (pos, module) in modules.iter_mut() {
            *module = rows[pos.row].as_ref()[pos.col];
        }
        Ok(Grid { version, modules })
    }

    fn is_dark(&self, row: usize, col: usize) -> bool {
        self.modules[Coordinate::new(row, col)]
    }

    fn finder_agreement(&self, top: usize, left: usize) -> usize {
        (0..7usize)
            .flat_map(|dr| (0..7usize).map(move |dc| (dr, dc)))
            .filter(|&(dr, dc)| {
                let ring = dr.abs_diff(3).max(dc.abs_diff(3));
                self.is_dark(top + dr, left + dc) == (ring != 2)
            })
            .count()
    }

    fn check_finder_patterns(&self) -> Result<(), DecodeError> {
        let far = self.modules.size() - 7;
        let found = [(0, 0), (0, far), (far, 0)]
            .iter()
            .filter(|&&(top, left)| self.finder_agreement(top, left) >= FINDER_THRESHOLD)
            .count();

        if found < 2 {
            return Err(DecodeError::MissingFinderPatterns { found });
        }
        Ok(())
    }

    fn read_format(&self) -> Result<(ErrorCorrectionLevel, MaskPattern), DecodeError> {
        let mut copies = [0u16; 2];
        for (index, positions) in FormatPositionIterator::new(self.modules.size()).enumerate() {
            for (copy, pos) in copies.iter_mut().zip(positions) {
                if self.modules[pos] {
                    *copy |= 1 << index;
                }
            }
        }

        let [first, second] = copies;
        decode_format(first)
            .or_else(|| decode_format(second))
            .ok_or(DecodeError::UnreadableFormat)
    }

    /// Unmasked codewords in placement order, remainder bits dropped
    fn read_codewords(&self, mask: MaskPattern) -> Vec<u8> {
        let mut function = Matrix::new(self.version);
        function.fill_symbol();

        let mut bits: BitVec<u8, Msb0> = BitVec::new();
        for pos in PositionIterator::new(self.modules.size()) {
            if function.module(pos) == Module::Empty {
                bits.push(self.modules[pos] ^ mask.condition(pos.row, pos.col));
            }
        }

        bits.truncate(self.version.total_codeword_count() * 8);
        bits.into_vec()
    }
}

fn correct_blocks(
    codewords: &[u8],
    version: Version,
    level: ErrorCorrectionLevel,
) -> Result<Vec<u8>, DecodeError> {
    let ecc_len = version.error_correction_codeword_count(level) / version.block_count(level);
    let decoder = reed_solomon::Decoder::new(ecc_len);

    let mut data = Vec::with_capacity(version.data_codeword_count(level));
    for mut block in deinterleave(codewords, version, level) {
        let corrected = decoder
            .correct(&mut block, None)
            .map_err(|_| DecodeError::TooManyErrors)?;
        data.extend_from_slice(corrected.data());
    }
    Ok(data)
}

fn read_byte_segment(data: &[u8], version: Version) -> Result<String, DecodeError> {
    let bits = data.view_bits::<Msb0>();
    let count_len = version.character_count_indicator_bit_length();
    if bits.len() < 4 + count_len {
        return Err(DecodeError::Truncated);
    }

    let mode = bits[..4].load_be::<u8>();
    if mode as u32 != BYTE_MODE_INDICATOR {
        return Err(DecodeError::UnsupportedMode(mode));
    }
    let count = bits[4..4 + count_len].load_be::<usize>();

    let payload = &bits[4 + count_len..];
    if payload.len() < count * 8 {
        return Err(DecodeError::Truncated);
    }
    let bytes: Vec<u8> = payload
        .chunks_exact(8)
        .take(count)
        .map(|byte| byte.load_be::<u8>())
        .collect();

    String::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8)
}

/// Decodes a grid of modules, reporting why it could not be read
pub fn decode<R: AsRef<[bool]>>(rows: &[R]) -> Result<String, DecodeError> {
    let grid = Grid::read(rows)?;
    grid.check_finder_patterns()?;
    let (level, mask) = grid.read_format()?;
    log::trace!(
        "reading version {}-{} with mask {}",
        grid.version.number(),
        level,
        mask
    );

    let codewords = grid.read_codewords(mask);
    let data = correct_blocks(&codewords, grid.version, level)?;
    read_byte_segment(&data, grid.version)
}

/// Returns the payload of a grid of modules, or `None` when it cannot be
/// reconstructed from the codewords
pub fn attempt_decode<R: AsRef<[bool]>>(rows: &[R]) -> Option<String> {
    match decode(rows) {
        Ok(text) => Some(text),
        Err(error) => {
            log::debug!("unable to decode: {}", error);
            None
        }
    }
}
