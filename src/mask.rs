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

use crate::array_2d::Coordinate;
use crate::matrix::{Color, Matrix, Module};
use alloc::vec::Vec;
use core::fmt::{Display, Formatter};
use core::iter::Peekable;

const FINDER_LIKE: [[Color; 11]; 2] = {
    use Color::{Black as B, White as W};
    [
        [B, W, B, B, B, W, B, W, W, W, W],
        [W, W, W, W, B, W, B, B, B, W, B],
    ]
};

/// One of the eight data mask patterns
#[derive(Copy, Clone, Debug, Hash, Ord, PartialOrd, Eq, PartialEq)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern(0),
        MaskPattern(1),
        MaskPattern(2),
        MaskPattern(3),
        MaskPattern(4),
        MaskPattern(5),
        MaskPattern(6),
        MaskPattern(7),
    ];

    pub fn new(reference: u8) -> Option<Self> {
        (reference < 8).then_some(MaskPattern(reference))
    }

    /// The three bit reference stored in the format information
    pub fn reference(self) -> u8 {
        self.0
    }

    /// Whether the module at `row`, `col` is inverted by this pattern
    pub fn condition(self, row: usize, col: usize) -> bool {
        let (i, j) = (row, col);
        match self.0 {
            0 => (i + j) % 2 == 0,
            1 => i % 2 == 0,
            2 => j % 3 == 0,
            3 => (i + j) % 3 == 0,
            4 => (i / 2 + j / 3) % 2 == 0,
            5 => (i * j) % 2 + (i * j) % 3 == 0,
            6 => ((i * j) % 2 + (i * j) % 3) % 2 == 0,
            _ => ((i + j) % 2 + (i * j) % 3) % 2 == 0,
        }
    }
}

impl Display for MaskPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Penalty points of a masked symbol, per rule
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Score {
    pub adjacent_horizontal: usize,
    pub adjacent_vertical: usize,
    pub blocks: usize,
    pub pattern_horizontal: usize,
    pub pattern_vertical: usize,
    pub proportion: usize,
}

impl Score {
    pub fn total(&self) -> usize {
        self.adjacent_horizontal
            + self.adjacent_vertical
            + self.blocks
            + self.pattern_horizontal
            + self.pattern_vertical
            + self.proportion
    }
}

impl Matrix {
    /// Returns a copy with `pattern` applied to the data modules. Function
    /// patterns and format information are left alone.
    pub fn mask(&self, pattern: MaskPattern) -> Self {
        let mut masked = self.clone();
        for (pos, module) in masked.data.iter_mut() {
            if let Module::Filled(color) = *module {
                if pattern.condition(pos.row, pos.col) {
                    *module = Module::Filled(color.inverse());
                }
            }
        }
        masked
    }

    fn score_adjacent<'a>(lines: impl Iterator<Item = impl Iterator<Item = &'a Module>>) -> usize {
        lines
            .map(|line| {
                AdjacentIterator::new(line)
                    .filter(|&run| run >= 5)
                    .map(|run| run - 2)
                    .sum::<usize>()
            })
            .sum()
    }

    fn score_adjacent_horizontal(&self) -> usize {
        Self::score_adjacent(self.data.rows().map(|row| row.iter()))
    }

    fn score_adjacent_vertical(&self) -> usize {
        Self::score_adjacent(self.data.columns())
    }

    fn score_blocks(&self) -> usize {
        let size = self.size();
        let color = |row, col| Color::from(self.data[Coordinate::new(row, col)]);
        (0..size - 1)
            .map(|row| {
                (0..size - 1)
                    .filter(|&col| {
                        let top_left = color(row, col);
                        top_left == color(row, col + 1)
                            && top_left == color(row + 1, col)
                            && top_left == color(row + 1, col + 1)
                    })
                    .count()
                    * 3
            })
            .sum()
    }

    fn score_match_pattern<'a>(line: impl Iterator<Item = &'a Module>) -> usize {
        let colors: Vec<Color> = line.map(|&module| module.into()).collect();
        colors
            .windows(11)
            .filter(|window| FINDER_LIKE.iter().any(|pattern| pattern[..] == **window))
            .count()
    }

    fn score_pattern_horizontal(&self) -> usize {
        self.data
            .rows()
            .map(|row| Self::score_match_pattern(row.iter()))
            .sum::<usize>()
            * 40
    }

    fn score_pattern_vertical(&self) -> usize {
        self.data
            .columns()
            .map(|column| Self::score_match_pattern(column))
            .sum::<usize>()
            * 40
    }

    fn score_proportion(&self) -> usize {
        let black_count = self
            .data
            .iter()
            .filter(|(_, module)| Color::from(**module) == Color::Black)
            .count();
        let size = self.size();
        let percentage = black_count * 100 / (size * size);
        percentage.abs_diff(50) / 5 * 10
    }

    pub fn score(&self) -> Score {
        Score {
            adjacent_horizontal: self.score_adjacent_horizontal(),
            adjacent_vertical: self.score_adjacent_vertical(),
            blocks: self.score_blocks(),
            pattern_horizontal: self.score_pattern_horizontal(),
            pattern_vertical: self.score_pattern_vertical(),
            proportion: self.score_proportion(),
        }
    }

    /// Tries every mask pattern and returns the one with the lowest penalty,
    /// the first pattern wins a tie
    pub fn select_mask(&self) -> (MaskPattern, Matrix) {
        let mut best: Option<(MaskPattern, Matrix, usize)> = None;
        for pattern in MaskPattern::ALL {
            let masked = self.mask(pattern);
            let score = masked.score().total();
            log::trace!("mask pattern {} scores {}", pattern, score);
            if best.as_ref().map_or(true, |(_, _, lowest)| score < *lowest) {
                best = Some((pattern, masked, score));
            }
        }

        match best {
            Some((pattern, masked, score)) => {
                log::debug!("selected mask pattern {} with score {}", pattern, score);
                (pattern, masked)
            }
            None => (MaskPattern(0), self.mask(MaskPattern(0))),
        }
    }
}

/// Lengths of the runs of equally colored modules in a line
struct AdjacentIterator<T: Iterator> {
    data_iter: Peekable<T>,
}

impl<'a, T> AdjacentIterator<T>
where
    T: Iterator<Item = &'a Module>,
{
    fn new(data_iter: T) -> Self {
        Self {
            data_iter: data_iter.peekable(),
        }
    }
}

impl<'a, T> Iterator for AdjacentIterator<T>
where
    T: Iterator<Item = &'a Module>,
{
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let first: Color = (*self.data_iter.next()?).into();
        let mut count = 1;
        while self
            .data_iter
            .next_if(|&&later| Color::from(later) == first)
            .is_some()
        {
            count += 1;
        }
        Some(count)
    }
}
