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

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use qr_core::{attempt_decode, encode, EncodeOptions, ErrorCorrectionLevel};

fn bench_encode_small(c: &mut Criterion) {
    c.bench_function("encode_hello_1m", |b| {
        b.iter(|| encode(black_box("HELLO"), EncodeOptions::default()))
    });
}

fn bench_encode_large(c: &mut Criterion) {
    let text = "x".repeat(106);
    let options = EncodeOptions {
        error_correction_level: ErrorCorrectionLevel::Low,
        version: None,
    };
    c.bench_function("encode_106_bytes_5l", |b| {
        b.iter(|| encode(black_box(&text), options))
    });
}

fn bench_decode(c: &mut Criterion) {
    let rows = match encode("https://example.com/decode", EncodeOptions::default()) {
        Ok(qr_code) => qr_code.to_rows(),
        Err(err) => panic!("{}", err),
    };
    c.bench_function("decode_3m", |b| b.iter(|| attempt_decode(black_box(&rows))));
}

criterion_group!(benches, bench_encode_small, bench_encode_large, bench_decode);
criterion_main!(benches);
