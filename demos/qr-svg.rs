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

use qr_core::{encode, Color, EncodeOptions, ErrorCorrectionLevel, QrCode};
use std::env;
use std::fmt::Write;

const MODULE_SIZE: usize = 8;

fn render_svg(qr_code: &QrCode) -> Result<String, std::fmt::Error> {
    let iter = qr_code.draw_iter();
    let (width, height) = (iter.width() * MODULE_SIZE, iter.height() * MODULE_SIZE);

    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" "#
    )?;
    writeln!(svg, r#"     viewBox="0 0 {width} {height}">"#)?;
    writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
    for module in iter.filter(|module| module.color == Color::Black) {
        writeln!(
            svg,
            r#"<rect x="{}" y="{}" width="{MODULE_SIZE}" height="{MODULE_SIZE}" fill="black"/>"#,
            module.x * MODULE_SIZE,
            module.y * MODULE_SIZE,
        )?;
    }
    svg.push_str("</svg>\n");
    Ok(svg)
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let data = args.join(" ");

    let options = EncodeOptions {
        error_correction_level: ErrorCorrectionLevel::Quartile,
        version: None,
    };
    let qr_code = match encode(&data, options) {
        Ok(qr_code) => qr_code,
        Err(err) => {
            eprintln!("Unable to encode: {}", err);
            std::process::exit(1);
        }
    };

    match render_svg(&qr_code) {
        Ok(svg) => print!("{}", svg),
        Err(err) => {
            eprintln!("Unable to render: {}", err);
            std::process::exit(1);
        }
    }
}
