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
use crate::qr_version::{BlockGroup, Version};
use alloc::vec;
use alloc::vec::Vec;

/// Data codewords of one block together with their error correction
pub struct EncodedBlock<'a> {
    pub data: &'a [u8],
    pub ecc: Vec<u8>,
}

/// Interleaves blocks: the n-th data codeword of every block, for every n,
/// followed by the n-th error correction codeword of every block
pub fn interleave(blocks: &[EncodedBlock]) -> Vec<u8> {
    let max_data_len = blocks.iter().map(|b| b.data.len()).max().unwrap_or(0);
    let max_ecc_len = blocks.iter().map(|b| b.ecc.len()).max().unwrap_or(0);
    let total = blocks.iter().map(|b| b.data.len() + b.ecc.len()).sum();

    let mut codewords = Vec::with_capacity(total);
    for index in 0..max_data_len {
        codewords.extend(blocks.iter().filter_map(|b| b.data.get(index)));
    }
    for index in 0..max_ecc_len {
        codewords.extend(blocks.iter().filter_map(|b| b.ecc.get(index)));
    }
    codewords
}

/// Reverses [`interleave`], returning every block as its data codewords
/// followed by its error correction codewords
pub fn deinterleave(
    codewords: &[u8],
    version: Version,
    error_correction: ErrorCorrectionLevel,
) -> Vec<Vec<u8>> {
    let layout: Vec<BlockLength> = BlockLengthIterator::new(version, error_correction).collect();
    let mut blocks: Vec<Vec<u8>> = layout
        .iter()
        .map(|block| vec![0; block.data_len + block.ecc_len])
        .collect();

    let max_data_len = layout.iter().map(|b| b.data_len).max().unwrap_or(0);
    let max_ecc_len = layout.iter().map(|b| b.ecc_len).max().unwrap_or(0);
    let mut source = codewords.iter().copied();

    for index in 0..max_data_len {
        for (block, length) in blocks.iter_mut().zip(&layout) {
            if index < length.data_len {
                block[index] = source.next().unwrap_or(0);
            }
        }
    }
    for index in 0..max_ecc_len {
        for (block, length) in blocks.iter_mut().zip(&layout) {
            if index < length.ecc_len {
                block[length.data_len + index] = source.next().unwrap_or(0);
            }
        }
    }
    blocks
}

#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug)]
pub struct BlockLength {
    pub block_number: usize,
    pub block_count: usize,
    pub data_pos: usize,
    pub data_len: usize,
    pub ecc_pos: usize,
    pub ecc_len: usize,
}

/// Walks the block layout of a version and error correction level, giving
/// the position of every block in the non-interleaved codeword sequence
#[derive(Clone, Debug)]
pub struct BlockLengthIterator {
    groups: &'static [BlockGroup],
    group_index: usize,
    index_in_group: usize,
    block_number: usize,
    block_count: usize,
    data_pos: usize,
    ecc_pos: usize,
}

impl BlockLengthIterator {
    pub fn new(version: Version, error_correction: ErrorCorrectionLevel) -> BlockLengthIterator {
        BlockLengthIterator {
            groups: version.block_groups(error_correction),
            group_index: 0,
            index_in_group: 0,
            block_number: 0,
            block_count: version.block_count(error_correction),
            data_pos: 0,
            ecc_pos: version.data_codeword_count(error_correction),
        }
    }
}

impl Iterator for BlockLengthIterator {
    type Item = BlockLength;

    fn next(&mut self) -> Option<Self::Item> {
        let mut group = self.groups.get(self.group_index)?;
        if self.index_in_group == group.count {
            self.group_index += 1;
            self.index_in_group = 0;
            group = self.groups.get(self.group_index)?;
        }

        let block = BlockLength {
            block_number: self.block_number,
            block_count: self.block_count,
            data_pos: self.data_pos,
            data_len: group.data_codewords,
            ecc_pos: self.ecc_pos,
            ecc_len: group.ecc_codewords(),
        };

        self.index_in_group += 1;
        self.block_number += 1;
        self.data_pos += block.data_len;
        self.ecc_pos += block.ecc_len;
        Some(block)
    }
}

#[cfg(test)]
mod tests {
    use crate::blocks::{deinterleave, interleave, BlockLength, BlockLengthIterator, EncodedBlock};
    use crate::error_correction::{ErrorCorrectionLevel, ReedSolomonEncoder};
    use crate::qr_version::Version;
    use alloc::vec::Vec;

    // Data and error correction of a 5-Q symbol, block after block
    const DATA_5Q: [u8; 134] = [
        67, 85, 70, 134, 87, 38, 85, 194, 119, 50, 6, 18, 6, 103, 38, 246, 246, 66, 7, 118, 134,
        242, 7, 38, 86, 22, 198, 199, 146, 6, 182, 230, 247, 119, 50, 7, 118, 134, 87, 38, 82, 6,
        134, 151, 50, 7, 70, 247, 118, 86, 194, 6, 151, 50, 16, 236, 17, 236, 17, 236, 17, 236,
        213, 199, 11, 45, 115, 247, 241, 223, 229, 248, 154, 117, 154, 111, 86, 161, 111, 39, 87,
        204, 96, 60, 202, 182, 124, 157, 200, 134, 27, 129, 209, 17, 163, 163, 120, 133, 148, 116,
        177, 212, 76, 133, 75, 242, 238, 76, 195, 230, 189, 10, 108, 240, 192, 141, 235, 159, 5,
        173, 24, 147, 59, 33, 106, 40, 255, 172, 82, 2, 131, 32, 178, 236,
    ];

    const INTERLEAVED_5Q: [u8; 134] = [
        67, 246, 182, 70, 85, 246, 230, 247, 70, 66, 247, 118, 134, 7, 119, 86, 87, 118, 50, 194,
        38, 134, 7, 6, 85, 242, 118, 151, 194, 7, 134, 50, 119, 38, 87, 16, 50, 86, 38, 236, 6,
        22, 82, 17, 18, 198, 6, 236, 6, 199, 134, 17, 103, 146, 151, 236, 38, 6, 50, 17, 7, 236,
        213, 87, 148, 235, 199, 204, 116, 159, 11, 96, 177, 5, 45, 60, 212, 173, 115, 202, 76, 24,
        247, 182, 133, 147, 241, 124, 75, 59, 223, 157, 242, 33, 229, 200, 238, 106, 248, 134, 76,
        40, 154, 27, 195, 255, 117, 129, 230, 172, 154, 209, 189, 82, 111, 17, 10, 2, 86, 163,
        108, 131, 161, 163, 240, 32, 111, 120, 192, 178, 39, 133, 141, 236,
    ];

    fn version_5q() -> (Version, ErrorCorrectionLevel) {
        (Version { version: 5 }, ErrorCorrectionLevel::Quartile)
    }

    #[test]
    fn block_len_iter_5q() {
        let (version, level) = version_5q();
        let mut iter = BlockLengthIterator::new(version, level);
        assert_eq!(
            iter.next(),
            Some(BlockLength {
                block_number: 0,
                block_count: 4,
                data_pos: 0,
                data_len: 15,
                ecc_pos: 62,
                ecc_len: 18
            })
        );
        assert_eq!(
            iter.next(),
            Some(BlockLength {
                block_number: 1,
                block_count: 4,
                data_pos: 15,
                data_len: 15,
                ecc_pos: 80,
                ecc_len: 18
            })
        );
        assert_eq!(
            iter.next(),
            Some(BlockLength {
                block_number: 2,
                block_count: 4,
                data_pos: 30,
                data_len: 16,
                ecc_pos: 98,
                ecc_len: 18
            })
        );
        assert_eq!(
            iter.next(),
            Some(BlockLength {
                block_number: 3,
                block_count: 4,
                data_pos: 46,
                data_len: 16,
                ecc_pos: 116,
                ecc_len: 18
            })
        );
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn single_block() {
        let blocks: Vec<BlockLength> =
            BlockLengthIterator::new(Version { version: 1 }, ErrorCorrectionLevel::Medium)
                .collect();
        assert_eq!(
            blocks,
            [BlockLength {
                block_number: 0,
                block_count: 1,
                data_pos: 0,
                data_len: 16,
                ecc_pos: 16,
                ecc_len: 10
            }]
        );
    }

    #[test]
    fn block_iter_5q() {
        let (version, level) = version_5q();
        let blocks: Vec<EncodedBlock> = BlockLengthIterator::new(version, level)
            .map(|block| EncodedBlock {
                data: &DATA_5Q[block.data_pos..block.data_pos + block.data_len],
                ecc: DATA_5Q[block.ecc_pos..block.ecc_pos + block.ecc_len].to_vec(),
            })
            .collect();

        assert_eq!(interleave(&blocks), INTERLEAVED_5Q);
    }

    #[test]
    fn ecc_5q_matches_reference() {
        let (version, level) = version_5q();
        let encoder = ReedSolomonEncoder::new(18);
        for block in BlockLengthIterator::new(version, level) {
            let data = &DATA_5Q[block.data_pos..block.data_pos + block.data_len];
            let ecc = &DATA_5Q[block.ecc_pos..block.ecc_pos + block.ecc_len];
            assert_eq!(encoder.encode(data).unwrap(), ecc);
        }
    }

    #[test]
    fn deinterleave_5q() {
        let (version, level) = version_5q();
        let blocks = deinterleave(&INTERLEAVED_5Q, version, level);
        assert_eq!(blocks.len(), 4);
        for (block, length) in blocks.iter().zip(BlockLengthIterator::new(version, level)) {
            assert_eq!(
                block[..length.data_len],
                DATA_5Q[length.data_pos..length.data_pos + length.data_len]
            );
            assert_eq!(
                block[length.data_len..],
                DATA_5Q[length.ecc_pos..length.ecc_pos + length.ecc_len]
            );
        }
    }
}
