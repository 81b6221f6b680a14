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

#![no_std]
//! Encodes byte payloads into QR code symbols of version 1 up to 5, and
//! reads such symbols back.
//!
//! ```
//! use qr_core::{attempt_decode, encode, EncodeOptions, ErrorCorrectionLevel};
//! let options = EncodeOptions {
//!     error_correction_level: ErrorCorrectionLevel::Low,
//!     version: None,
//! };
//! let qr_code = encode("https://example.com", options).unwrap();
//! assert_eq!(qr_code.size(), 25);
//! assert!(qr_code.is_dark(0, 0));
//! assert_eq!(attempt_decode(&qr_code.to_rows()).as_deref(), Some("https://example.com"));
//! ```

extern crate alloc;

mod array_2d;
mod blocks;
pub mod buffer;
mod decode;
mod draw_iterator;
mod encoding;
mod error;
mod error_correction;
mod format;
pub mod galois;
mod mask;
mod matrix;
mod qr_version;
mod qrcode;

pub use decode::{attempt_decode, decode};
pub use draw_iterator::{CoordinatedColor, DrawIterator, BORDER_SIZE};
pub use error::{DecodeError, QrError};
pub use error_correction::ErrorCorrectionLevel;
pub use format::encode_version;
pub use mask::MaskPattern;
pub use matrix::Color;
pub use qr_version::{Version, MAX_VERSION, MIN_VERSION};
pub use qrcode::{encode, EncodeOptions, QrCode, QrCodeGenerator};
