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

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Coordinate {
        Coordinate { row, col }
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from(pos: (usize, usize)) -> Self {
        let (row, col) = pos;
        Coordinate::new(row, col)
    }
}

/// Square grid, stored row after row
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Array2D<T> {
    data: Vec<T>,
    size: usize,
}

impl<T> Index<Coordinate> for Array2D<T> {
    type Output = T;

    fn index(&self, index: Coordinate) -> &Self::Output {
        debug_assert!(index.row < self.size && index.col < self.size);
        &self.data[index.row * self.size + index.col]
    }
}

impl<T> IndexMut<Coordinate> for Array2D<T> {
    fn index_mut(&mut self, index: Coordinate) -> &mut Self::Output {
        debug_assert!(index.row < self.size && index.col < self.size);
        &mut self.data[index.row * self.size + index.col]
    }
}

impl<T> Array2D<T>
where
    T: Default + Clone,
{
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![T::default(); size * size],
            size,
        }
    }
}

impl<T> Array2D<T> {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, index: Coordinate) -> Option<&T> {
        if index.row < self.size && index.col < self.size {
            Some(&self[index])
        } else {
            None
        }
    }

    pub fn rows(&self) -> Rows<'_, T> {
        Rows {
            data: self,
            row: 0,
        }
    }

    pub fn columns(&self) -> Columns<'_, T> {
        Columns {
            data: self,
            col: 0,
        }
    }

    /// Every cell with its coordinate, row after row
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, &T)> {
        let size = self.size;
        self.data
            .iter()
            .enumerate()
            .map(move |(index, value)| (Coordinate::new(index / size, index % size), value))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Coordinate, &mut T)> {
        let size = self.size;
        self.data
            .iter_mut()
            .enumerate()
            .map(move |(index, value)| (Coordinate::new(index / size, index % size), value))
    }
}

#[derive(Copy, Clone)]
pub struct Rows<'a, T> {
    data: &'a Array2D<T>,
    row: usize,
}

impl<'a, T> Iterator for Rows<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        let size = self.data.size;
        if self.row < size {
            let start = self.row * size;
            self.row += 1;
            Some(&self.data.data[start..start + size])
        } else {
            None
        }
    }
}

#[derive(Copy, Clone)]
pub struct Columns<'a, T> {
    data: &'a Array2D<T>,
    col: usize,
}

impl<'a, T> Iterator for Columns<'a, T> {
    type Item = Column<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.col < self.data.size {
            let result = Column {
                data: self.data,
                row: 0,
                col: self.col,
            };
            self.col += 1;
            Some(result)
        } else {
            None
        }
    }
}

#[derive(Copy, Clone)]
pub struct Column<'a, T> {
    data: &'a Array2D<T>,
    row: usize,
    col: usize,
}

impl<'a, T> Iterator for Column<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.row < self.data.size {
            let result = &self.data[Coordinate::new(self.row, self.col)];
            self.row += 1;
            Some(result)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::array_2d::{Array2D, Coordinate};
    use alloc::vec::Vec;

    fn numbered(size: usize) -> Array2D<usize> {
        let mut array = Array2D::new(size);
        for (pos, value) in array.iter_mut() {
            *value = pos.row * 10 + pos.col;
        }
        array
    }

    #[test]
    fn rows_and_columns() {
        let array = numbered(3);
        let rows: Vec<Vec<usize>> = array.rows().map(|row| row.to_vec()).collect();
        assert_eq!(rows, [[0, 1, 2], [10, 11, 12], [20, 21, 22]]);

        let columns: Vec<Vec<usize>> = array
            .columns()
            .map(|column| column.copied().collect())
            .collect();
        assert_eq!(columns, [[0, 10, 20], [1, 11, 21], [2, 12, 22]]);
    }

    #[test]
    fn index_is_row_major() {
        let mut array = numbered(4);
        assert_eq!(array[Coordinate::new(2, 3)], 23);
        array[(3, 1).into()] = 99;
        assert_eq!(array.rows().nth(3).map(|row| row[1]), Some(99));
        assert_eq!(array.get(Coordinate::new(4, 0)), None);
        assert_eq!(array.get(Coordinate::new(0, 3)), Some(&3));
    }
}
