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

use crate::array_2d::{Array2D, Coordinate};
use crate::qr_version::Version;
use core::fmt::{Debug, Display, Formatter, Write};

#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Default)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    pub(crate) fn inverse(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Color::Black
    }
}

impl From<bool> for Color {
    fn from(dark: bool) -> Self {
        if dark {
            Color::Black
        } else {
            Color::White
        }
    }
}

#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Default)]
pub enum Module {
    /// Part of the encoded region and filled with a specific color
    Filled(Color),
    /// Part of the encoded region, but not yet filled with a color
    #[default]
    Empty,
    /// Part of a function pattern and filled with a specific color
    Static(Color),
    /// Part of the format information, not yet filled with a color
    Reserved,
}

impl From<Module> for Color {
    fn from(module: Module) -> Self {
        match module {
            Module::Filled(color) => color,
            Module::Empty => Color::White,
            Module::Static(color) => color,
            Module::Reserved => Color::White,
        }
    }
}

/// The module grid of a single symbol
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Matrix {
    pub(crate) data: Array2D<Module>,
    version: Version,
}

impl Matrix {
    pub fn new(version: Version) -> Self {
        Self {
            data: Array2D::new(version.width()),
            version,
        }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn size(&self) -> usize {
        self.data.size()
    }

    pub fn module(&self, pos: Coordinate) -> Module {
        self.data[pos]
    }

    fn fill_module(&mut self, pos: Coordinate, data: Module) {
        self.data[pos] = data;
    }

    /// Finder pattern with its separator. `top` and `left` may be one module
    /// outside the symbol, those cells are clipped.
    fn fill_finder_pattern(&mut self, top: usize, left: usize) {
        let size = self.size();
        for dr in -1..=7 {
            for dc in -1..=7 {
                let (Some(row), Some(col)) =
                    (top.checked_add_signed(dr), left.checked_add_signed(dc))
                else {
                    continue;
                };
                if row >= size || col >= size {
                    continue;
                }

                let ring = dr.abs_diff(3).max(dc.abs_diff(3));
                let color = Color::from(ring != 2 && ring != 4);
                self.fill_module(Coordinate::new(row, col), Module::Static(color));
            }
        }
    }

    fn fill_finder_patterns(&mut self) {
        let size = self.size();
        self.fill_finder_pattern(0, 0);
        self.fill_finder_pattern(0, size - 7);
        self.fill_finder_pattern(size - 7, 0);
    }

    fn fill_alignment_pattern(&mut self, center: Coordinate) {
        for row in center.row - 2..=center.row + 2 {
            for col in center.col - 2..=center.col + 2 {
                let ring = row.abs_diff(center.row).max(col.abs_diff(center.col));
                self.fill_module(Coordinate::new(row, col), Module::Static(Color::from(ring != 1)));
            }
        }
    }

    fn fill_alignment_patterns(&mut self) {
        let positions = self.version.alignment_pattern_positions();
        for &row in positions {
            for &col in positions {
                let center = Coordinate::new(row, col);
                // Centers inside a finder pattern are skipped
                if self.data[center] == Module::Empty {
                    self.fill_alignment_pattern(center);
                }
            }
        }
    }

    fn fill_reserved(&mut self) {
        let size = self.size();

        // Around the top-left finder, skipping the timing pattern
        for index in (0..=8).filter(|&index| index != 6) {
            self.fill_module(Coordinate::new(index, 8), Module::Reserved);
            self.fill_module(Coordinate::new(8, index), Module::Reserved);
        }
        // Below the top-right finder and beside the bottom-left finder
        for index in 0..8 {
            self.fill_module(Coordinate::new(8, size - 1 - index), Module::Reserved);
            self.fill_module(Coordinate::new(size - 1 - index, 8), Module::Reserved);
        }
    }

    fn fill_timing_pattern(&mut self) {
        let size = self.size();
        for index in 8..size - 8 {
            let color = Module::Static(Color::from(index % 2 == 0));
            for pos in [Coordinate::new(6, index), Coordinate::new(index, 6)] {
                if self.data[pos] == Module::Empty {
                    self.fill_module(pos, color);
                }
            }
        }
    }

    fn fill_dark_module(&mut self) {
        let row = 4 * self.version.number() as usize + 9;
        self.fill_module(Coordinate::new(row, 8), Module::Static(Color::Black));
    }

    /// Places every function pattern and reserves the format information
    pub fn fill_symbol(&mut self) {
        self.fill_finder_patterns();
        self.fill_reserved();
        self.fill_timing_pattern();
        self.fill_alignment_patterns();
        self.fill_dark_module();
    }

    /// Writes the codewords into the empty modules in zigzag order. Modules
    /// left over after the last codeword are filled light.
    pub fn place_data(&mut self, codewords: &[u8]) {
        let mut bits = codewords
            .iter()
            .flat_map(|&byte| (0..8).rev().map(move |index| (byte >> index) & 1 != 0));

        for pos in PositionIterator::new(self.size()) {
            if self.data[pos] == Module::Empty {
                let bit = bits.next().unwrap_or(false);
                self.data[pos] = Module::Filled(Color::from(bit));
            }
        }
        debug_assert!(bits.next().is_none(), "more codewords than modules");
    }

    /// Writes both copies of the format information, least significant bit
    /// first
    pub fn place_format(&mut self, data: u16) {
        for (index, positions) in FormatPositionIterator::new(self.size()).enumerate() {
            let color = Color::from(data & (1 << index) != 0);
            for pos in positions {
                self.fill_module(pos, Module::Static(color));
            }
        }
    }
}

impl Debug for Matrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        self.data.rows().try_for_each(|row| {
            row.iter().try_for_each(|module| match module {
                Module::Filled(Color::White) => f.write_char('_'),
                Module::Filled(Color::Black) => f.write_char('\u{2588}'),
                Module::Empty => f.write_char('\u{FFFD}'),
                Module::Static(Color::White) => f.write_char('\u{2591}'),
                Module::Static(Color::Black) => f.write_char('\u{2593}'),
                Module::Reserved => f.write_char('\u{2592}'),
            })?;
            f.write_char('\n')
        })
    }
}

impl Display for Matrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let upper = self.data.rows().step_by(2);
        let lower = self.data.rows().skip(1).step_by(2);
        upper.zip(lower).try_for_each(|(up_row, down_row)| {
            up_row.iter().zip(down_row).try_for_each(|(&up, &down)| {
                f.write_char(match (Color::from(up), Color::from(down)) {
                    (Color::Black, Color::Black) => '\u{2588}',
                    (Color::Black, Color::White) => '\u{2580}',
                    (Color::White, Color::Black) => '\u{2584}',
                    (Color::White, Color::White) => ' ',
                })
            })?;
            f.write_char('\n')
        })?;

        if self.size() % 2 == 1 {
            if let Some(last_row) = self.data.rows().last() {
                last_row.iter().try_for_each(|&up| {
                    f.write_char(match Color::from(up) {
                        Color::Black => '\u{2580}',
                        Color::White => ' ',
                    })
                })?;
                f.write_char('\n')?;
            }
        }
        Ok(())
    }
}

/// Positions of format information bit `index` in both copies
#[derive(Copy, Clone)]
pub(crate) struct FormatPositionIterator {
    size: usize,
    index: usize,
}

impl FormatPositionIterator {
    pub(crate) fn new(size: usize) -> FormatPositionIterator {
        FormatPositionIterator { size, index: 0 }
    }
}

impl Iterator for FormatPositionIterator {
    type Item = [Coordinate; 2];

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.index;
        if index > 14 {
            return None;
        }

        // Around the top-left finder
        let first = match index {
            0..=5 => Coordinate::new(index, 8),
            6 => Coordinate::new(7, 8),
            7 => Coordinate::new(8, 8),
            8 => Coordinate::new(8, 7),
            _ => Coordinate::new(8, 14 - index),
        };
        // Below the top-right finder, then beside the bottom-left finder
        let second = match index {
            0..=7 => Coordinate::new(8, self.size - 1 - index),
            _ => Coordinate::new(self.size - 15 + index, 8),
        };

        self.index += 1;
        Some([first, second])
    }
}

/// Zigzag walk over column pairs, starting upwards at the bottom-right
/// corner. The right column of a pair comes first and the vertical timing
/// column is skipped.
#[derive(Copy, Clone)]
pub(crate) struct PositionIterator {
    size: usize,
    row: usize,
    col: usize,
    left: bool,
    upwards: bool,
    done: bool,
}

impl PositionIterator {
    pub(crate) fn new(size: usize) -> PositionIterator {
        PositionIterator {
            size,
            row: size - 1,
            col: size - 1,
            left: false,
            upwards: true,
            done: false,
        }
    }

    fn next_column_pair(&mut self) {
        self.upwards = !self.upwards;
        if self.col < 2 {
            self.done = true;
            return;
        }
        self.col -= 2;
        if self.col == 6 {
            self.col -= 1;
        }
    }
}

impl Iterator for PositionIterator {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let col = if self.left { self.col - 1 } else { self.col };
        let pos = Coordinate::new(self.row, col);

        if !self.left {
            self.left = true;
        } else {
            self.left = false;
            match (self.upwards, self.row) {
                (true, 0) => self.next_column_pair(),
                (true, _) => self.row -= 1,
                (false, row) if row == self.size - 1 => self.next_column_pair(),
                (false, _) => self.row += 1,
            }
        }
        Some(pos)
    }
}
