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

use crate::error_correction::ErrorCorrectionLevel;
use crate::qr_version::MAX_VERSION;
use alloc::string::String;

/// Errors returned while building a QR code
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QrError {
    /// The payload does not fit into the requested version and level
    #[error("{length} bytes exceed the {capacity} byte capacity of version {version}-{level}")]
    DataTooLong {
        length: usize,
        capacity: usize,
        version: u8,
        level: ErrorCorrectionLevel,
    },
    /// The requested version is outside of the supported range
    #[error("version {0} is not supported, expected 1..={max}", max = MAX_VERSION)]
    UnsupportedVersion(u8),
    /// No supported version is large enough for the payload
    #[error("{length} bytes do not fit into any supported version at level {level}")]
    UnsupportedSize {
        length: usize,
        level: ErrorCorrectionLevel,
    },
    #[error("division by zero in GF(256)")]
    DivisionByZero,
    #[error("unknown error correction level {0:?}, expected one of L, M, Q or H")]
    UnknownErrorCorrectionLevel(String),
}

/// Reasons a module matrix could not be decoded
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("a {rows}x{columns} matrix is not a supported QR code size")]
    MalformedMatrix { rows: usize, columns: usize },
    #[error("found {found} finder patterns, at least 2 are required")]
    MissingFinderPatterns { found: usize },
    #[error("format information is unreadable")]
    UnreadableFormat,
    #[error("too many errors to correct")]
    TooManyErrors,
    #[error("segment mode {0:#06b} is not supported")]
    UnsupportedMode(u8),
    #[error("bitstream ended before the declared payload length")]
    Truncated,
    #[error("payload is not valid UTF-8")]
    InvalidUtf8,
}
