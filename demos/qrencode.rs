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

use qr_core::{ErrorCorrectionLevel, QrCode};
use std::env;
use std::process::exit;

fn main() {
    let mut args = env::args().skip(1).peekable();
    let mut level = ErrorCorrectionLevel::default();
    if let Some(flag) = args.next_if(|arg| arg.starts_with("-l")) {
        level = match flag.trim_start_matches("-l").parse() {
            Ok(level) => level,
            Err(err) => {
                eprintln!("{}", err);
                exit(2);
            }
        };
    }
    let data = args.collect::<Vec<String>>().join(" ");
    println!("QR code for {}", data);

    match QrCode::generator()
        .with_error_correction_level(level)
        .with_text(data.as_str())
        .build()
    {
        Ok(qr_code) => println!("{}", qr_code),
        Err(err) => {
            eprintln!("Unable to encode: {}", err);
            exit(1);
        }
    }
}
