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

use crate::matrix::Color;
use crate::qrcode::QrCode;

/// Width of the light quiet zone around the symbol, in modules
pub const BORDER_SIZE: usize = 4;

/// A pixel, `x` counting columns and `y` counting rows
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CoordinatedColor {
    pub x: usize,
    pub y: usize,
    pub color: Color,
}

/// Walks every pixel of a symbol including its quiet zone, row by row
pub struct DrawIterator<'a> {
    qrcode: &'a QrCode,
    x: usize,
    y: usize,
}

impl<'a> DrawIterator<'a> {
    pub(crate) fn new(qrcode: &'a QrCode) -> Self {
        DrawIterator { qrcode, x: 0, y: 0 }
    }

    pub fn height(&self) -> usize {
        2 * BORDER_SIZE + self.qrcode.size()
    }

    pub fn width(&self) -> usize {
        2 * BORDER_SIZE + self.qrcode.size()
    }

    fn is_current_pos_border(&self) -> bool {
        let size = self.qrcode.size();

        self.x < BORDER_SIZE
            || self.y < BORDER_SIZE
            || self.x >= size + BORDER_SIZE
            || self.y >= size + BORDER_SIZE
    }
}

impl Iterator for DrawIterator<'_> {
    type Item = CoordinatedColor;

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.height() {
            return None;
        }

        let color = if self.is_current_pos_border() {
            Color::White
        } else {
            self.qrcode
                .color(self.y - BORDER_SIZE, self.x - BORDER_SIZE)
        };
        let result = CoordinatedColor {
            x: self.x,
            y: self.y,
            color,
        };

        self.x += 1;
        if self.x >= self.width() {
            self.x = 0;
            self.y += 1;
        }

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use crate::draw_iterator::{CoordinatedColor, BORDER_SIZE};
    use crate::matrix::Color;
    use crate::qrcode::{encode, EncodeOptions};

    #[test]
    fn quiet_zone() {
        let qr_code = encode("quiet", EncodeOptions::default()).unwrap();
        let iter = qr_code.draw_iter();
        assert_eq!(iter.width(), 29);
        assert_eq!(iter.height(), 29);

        let mut count = 0;
        for pixel in iter {
            let inside = (BORDER_SIZE..BORDER_SIZE + 21).contains(&pixel.x)
                && (BORDER_SIZE..BORDER_SIZE + 21).contains(&pixel.y);
            if inside {
                let expected = qr_code.color(pixel.y - BORDER_SIZE, pixel.x - BORDER_SIZE);
                assert_eq!(pixel.color, expected);
            } else {
                assert_eq!(pixel.color, Color::White);
            }
            count += 1;
        }
        assert_eq!(count, 29 * 29);
    }

    #[test]
    fn row_by_row() {
        let qr_code = encode("order", EncodeOptions::default()).unwrap();
        let mut iter = qr_code.draw_iter().skip(29 * 4 + 4);
        assert_eq!(
            iter.next(),
            Some(CoordinatedColor {
                x: 4,
                y: 4,
                color: Color::Black
            })
        );
        assert_eq!(iter.nth(6).map(|pixel| (pixel.x, pixel.color)), Some((11, Color::White)));
    }
}
