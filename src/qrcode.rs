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

use crate::array_2d::Coordinate;
use crate::draw_iterator::DrawIterator;
use crate::encoding::{select_version, ByteDataEncoder};
use crate::error::QrError;
use crate::error_correction::{ErrorCorrectionEncoder, ErrorCorrectionLevel};
use crate::format::FormatEncoder;
use crate::mask::MaskPattern;
use crate::matrix::{Color, Matrix};
use crate::qr_version::Version;
use alloc::vec::Vec;
use core::fmt::{Debug, Display, Formatter};

/// Parameters of a single encode call
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct EncodeOptions {
    pub error_correction_level: ErrorCorrectionLevel,
    /// The smallest version that fits is used when not set
    pub version: Option<u8>,
}

/// A complete symbol, ready to be rendered
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct QrCode {
    matrix: Matrix,
    error_correction: ErrorCorrectionLevel,
    mask: MaskPattern,
}

impl QrCode {
    pub fn generator<'a>() -> QrCodeGenerator<'a> {
        QrCodeGenerator::new()
    }

    /// Width and height in modules
    pub fn size(&self) -> usize {
        self.matrix.size()
    }

    pub fn version(&self) -> Version {
        self.matrix.version()
    }

    pub fn error_correction_level(&self) -> ErrorCorrectionLevel {
        self.error_correction
    }

    pub fn mask_pattern(&self) -> MaskPattern {
        self.mask
    }

    /// Modules outside the symbol are light
    pub fn color(&self, row: usize, col: usize) -> Color {
        self.matrix
            .data
            .get(Coordinate::new(row, col))
            .map_or(Color::White, |&module| module.into())
    }

    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        self.color(row, col).is_dark()
    }

    /// All modules row by row, `true` being dark
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.matrix
            .data
            .rows()
            .map(|row| row.iter().map(|&module| Color::from(module).is_dark()).collect())
            .collect()
    }

    /// Pixels of the symbol surrounded by a quiet zone
    pub fn draw_iter(&self) -> DrawIterator<'_> {
        DrawIterator::new(self)
    }
}

impl Display for QrCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Display::fmt(&self.matrix, f)
    }
}

impl Debug for QrCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(
            f,
            "QrCode version {}-{} mask {}",
            self.version().number(),
            self.error_correction,
            self.mask
        )?;
        Debug::fmt(&self.matrix, f)
    }
}

/// Builder for a [`QrCode`]
///
/// ```
/// use qr_core::{ErrorCorrectionLevel, QrCode};
/// let qr_code = QrCode::generator()
///     .with_error_correction_level(ErrorCorrectionLevel::Quartile)
///     .with_text("HELLO")
///     .build()
///     .unwrap();
/// assert_eq!(qr_code.size(), 21);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct QrCodeGenerator<'a> {
    data: &'a [u8],
    options: EncodeOptions,
}

impl<'a> Default for QrCodeGenerator<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> QrCodeGenerator<'a> {
    pub fn new() -> Self {
        Self {
            data: &[],
            options: EncodeOptions::default(),
        }
    }

    pub fn with_error_correction_level(mut self, level: ErrorCorrectionLevel) -> Self {
        self.options.error_correction_level = level;
        self
    }

    /// Use a specific version instead of the smallest one that fits
    pub fn with_version(mut self, version: u8) -> Self {
        self.options.version = Some(version);
        self
    }

    pub fn with_options(mut self, options: EncodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Text is encoded as its UTF-8 bytes
    pub fn with_text(self, text: &'a str) -> Self {
        self.with_bytes(text.as_bytes())
    }

    pub fn with_bytes(mut self, data: &'a [u8]) -> Self {
        self.data = data;
        self
    }

    pub fn build(&self) -> Result<QrCode, QrError> {
        let error_correction = self.options.error_correction_level;
        let version = match self.options.version {
            Some(version) => Version::new(version)?,
            None => select_version(self.data.len(), error_correction)?,
        };
        log::debug!(
            "encoding {} bytes as version {}-{}",
            self.data.len(),
            version.number(),
            error_correction
        );

        let buffer = ByteDataEncoder {
            version,
            error_correction,
        }
        .encode(self.data)?;

        let error_corrected = ErrorCorrectionEncoder {
            version,
            error_correction,
        }
        .encode(&buffer)?;

        let mut matrix = Matrix::new(version);
        matrix.fill_symbol();
        matrix.place_data(error_corrected.codewords());

        let (mask, mut matrix) = matrix.select_mask();
        let format = FormatEncoder {
            error_correction_level: error_correction,
            mask_pattern: mask,
        }
        .encode();
        matrix.place_format(format);

        Ok(QrCode {
            matrix,
            error_correction,
            mask,
        })
    }
}

/// Encodes `text` into a symbol
pub fn encode(text: &str, options: EncodeOptions) -> Result<QrCode, QrError> {
    QrCode::generator()
        .with_options(options)
        .with_text(text)
        .build()
}
