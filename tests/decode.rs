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

use qr_core::{
    attempt_decode, decode, encode, DecodeError, EncodeOptions, ErrorCorrectionLevel, Version,
};

#[test]
fn round_trip_every_version_and_level() {
    for version in Version::all() {
        for level in ErrorCorrectionLevel::ALL {
            let capacity = version.byte_capacity(level);
            let text: String = "Größe 0123456789".chars().cycle().take(capacity / 2).collect();
            let options = EncodeOptions {
                error_correction_level: level,
                version: Some(version.number()),
            };
            let qr_code = encode(&text, options).unwrap();
            assert_eq!(
                attempt_decode(&qr_code.to_rows()).as_deref(),
                Some(text.as_str()),
                "version {}-{}",
                version.number(),
                level
            );
        }
    }
}

#[test]
fn round_trip_full_capacity() {
    let text = "Q".repeat(60);
    let options = EncodeOptions {
        error_correction_level: ErrorCorrectionLevel::Quartile,
        version: None,
    };
    let qr_code = encode(&text, options).unwrap();
    assert_eq!(qr_code.version().number(), 5);
    assert_eq!(decode(&qr_code.to_rows()), Ok(text));
}

#[test]
fn empty_payload() {
    let qr_code = encode("", EncodeOptions::default()).unwrap();
    assert_eq!(attempt_decode(&qr_code.to_rows()).as_deref(), Some(""));
}

#[test]
fn nothing_from_blank_input() {
    for size in [21, 25, 29, 33, 37] {
        assert_eq!(attempt_decode(&vec![vec![false; size]; size]), None);
        assert_eq!(attempt_decode(&vec![vec![true; size]; size]), None);
    }
    let none: Vec<Vec<bool>> = Vec::new();
    assert_eq!(attempt_decode(&none), None);
}

#[test]
fn nothing_from_noise() {
    let mut state = 0x2545_F491_u32;
    let noise: Vec<Vec<bool>> = (0..25)
        .map(|_| {
            (0..25)
                .map(|_| {
                    state ^= state << 13;
                    state ^= state >> 17;
                    state ^= state << 5;
                    state & 1 == 1
                })
                .collect()
        })
        .collect();
    assert_eq!(attempt_decode(&noise), None);
}

#[test]
fn finders_alone_are_not_enough() {
    let qr_code = encode("https://example.com", EncodeOptions::default()).unwrap();
    let mut rows = qr_code.to_rows();
    let size = rows.len();
    // Keep function patterns and format information, wipe the data area
    for (row, line) in rows.iter_mut().enumerate() {
        for (col, module) in line.iter_mut().enumerate() {
            let in_finder = (row < 9 && col < 9)
                || (row < 9 && col >= size - 8)
                || (row >= size - 8 && col < 9);
            let in_timing = row == 6 || col == 6;
            let in_alignment = row.abs_diff(size - 7) <= 2 && col.abs_diff(size - 7) <= 2;
            if !(in_finder || in_timing || in_alignment) {
                *module = false;
            }
        }
    }
    assert_eq!(attempt_decode(&rows), None);
    assert!(decode(&rows).is_err());
}

#[test]
fn recovers_from_damage() {
    let options = EncodeOptions {
        error_correction_level: ErrorCorrectionLevel::High,
        version: Some(2),
    };
    let qr_code = encode("damaged", options).unwrap();
    let mut rows = qr_code.to_rows();
    // Bottom-right corner, inside the first codewords
    for row in 21..25 {
        for col in 21..25 {
            rows[row][col] = !rows[row][col];
        }
    }
    assert_eq!(attempt_decode(&rows).as_deref(), Some("damaged"));
}

#[test]
fn rejects_malformed() {
    let rows = vec![vec![false; 21]; 20];
    assert_eq!(
        decode(&rows),
        Err(DecodeError::MalformedMatrix {
            rows: 20,
            columns: 21
        })
    );
}
