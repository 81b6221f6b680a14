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

//! Arithmetic in GF(2^8) with the QR code primitive polynomial
//! x^8 + x^4 + x^3 + x^2 + 1.

use crate::error::QrError;

const PRIMITIVE_POLYNOMIAL: u16 = 0x11D;

struct Tables {
    exp: [u8; 256],
    log: [u8; 256],
}

const fn build_tables() -> Tables {
    let mut exp = [0u8; 256];
    let mut log = [0u8; 256];
    let mut value: u16 = 1;
    let mut power = 0;
    while power < 255 {
        exp[power] = value as u8;
        log[value as usize] = power as u8;
        value <<= 1;
        if value & 0x100 != 0 {
            value ^= PRIMITIVE_POLYNOMIAL;
        }
        power += 1;
    }
    // α^255 == α^0
    exp[255] = exp[0];
    Tables { exp, log }
}

static TABLES: Tables = build_tables();

/// α raised to `power`, wrapping at the field order 255
pub fn exp(power: usize) -> u8 {
    TABLES.exp[power % 255]
}

/// Discrete logarithm of `value`, `None` for zero
pub fn log(value: u8) -> Option<u8> {
    if value == 0 {
        None
    } else {
        Some(TABLES.log[value as usize])
    }
}

pub fn multiply(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let sum = TABLES.log[a as usize] as usize + TABLES.log[b as usize] as usize;
    exp(sum)
}

pub fn divide(a: u8, b: u8) -> Result<u8, QrError> {
    if b == 0 {
        return Err(QrError::DivisionByZero);
    }
    if a == 0 {
        return Ok(0);
    }
    let difference = TABLES.log[a as usize] as usize + 255 - TABLES.log[b as usize] as usize;
    Ok(exp(difference))
}
