//! Bitmap encoding for the write-image command
//!
//! Signs take their bitmap one column at a time. Each column is split into
//! 8-row groups (the image is padded with blank rows until its height is a
//! multiple of 8) and every group becomes one byte. The payload is the
//! byte count followed by the packed bytes, all as ASCII hex.
//!
//! Two bit layouts are in circulation:
//!
//! ```text
//!            Canonical                  LegacyTopPadded
//!  row 0  ─► bit 0 (LSB) of byte 0      padding rows first,
//!  row 7  ─► bit 7 (MSB) of byte 0      then row 0 at the bit
//!  row 8  ─► bit 0 of byte 1            following the padding,
//!  ...       padding at the bottom      MSB first
//! ```

use alloc::vec;
use alloc::vec::Vec;

use crate::frame::push_hex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rows per packed byte
pub const ROWS_PER_BYTE: usize = 8;

/// Errors building a pixel matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImageError {
    /// A row's length differs from the first row's
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl core::fmt::Display for ImageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ImageError::RaggedRow {
                row,
                expected,
                found,
            } => write!(f, "row {} has {} columns, expected {}", row, found, expected),
        }
    }
}

/// Bit layout used when packing a bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ImageLayout {
    /// Bottom padding, top row of each 8-row group in the least
    /// significant bit, groups top to bottom
    #[default]
    Canonical,
    /// Top padding, top row of each group in the most significant bit
    LegacyTopPadded,
}

/// Boolean bitmap, `true` = dot flipped to the visible side
///
/// Row 0 is the top of the image and column 0 the left edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PixelMatrix {
    rows: usize,
    columns: usize,
    /// Row-major
    pixels: Vec<bool>,
}

impl PixelMatrix {
    /// Blank image of the given size
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            pixels: vec![false; rows * columns],
        }
    }

    /// Build from a slice of equally long rows
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, ImageError> {
        let columns = rows.first().map_or(0, |row| row.as_ref().len());
        let mut pixels = Vec::with_capacity(rows.len() * columns);

        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != columns {
                return Err(ImageError::RaggedRow {
                    row: index,
                    expected: columns,
                    found: row.len(),
                });
            }
            pixels.extend_from_slice(row);
        }

        Ok(Self {
            rows: rows.len(),
            columns,
            pixels,
        })
    }

    /// Build by evaluating `f(row, column)` for every pixel
    pub fn from_fn(rows: usize, columns: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut pixels = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for column in 0..columns {
                pixels.push(f(row, column));
            }
        }
        Self {
            rows,
            columns,
            pixels,
        }
    }

    /// Image height
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Image width
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Pixel at `(row, column)`, `None` outside the image
    pub fn get(&self, row: usize, column: usize) -> Option<bool> {
        if row < self.rows && column < self.columns {
            Some(self.pixels[row * self.columns + column])
        } else {
            None
        }
    }

    /// Set the pixel at `(row, column)`
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the image.
    pub fn set(&mut self, row: usize, column: usize, value: bool) {
        assert!(
            row < self.rows && column < self.columns,
            "pixel ({}, {}) outside {}x{} image",
            row,
            column,
            self.rows,
            self.columns
        );
        self.pixels[row * self.columns + column] = value;
    }

    /// Set every pixel to `value`
    pub fn fill(&mut self, value: bool) {
        self.pixels.fill(value);
    }

    /// Number of set pixels
    pub fn count_set(&self) -> usize {
        self.pixels.iter().filter(|&&pixel| pixel).count()
    }

    /// The image turned upside down (rows and columns both reversed)
    pub fn rotated_180(&self) -> Self {
        // Reversing a row-major buffer reverses row order and each row
        let mut pixels = self.pixels.clone();
        pixels.reverse();
        Self {
            rows: self.rows,
            columns: self.columns,
            pixels,
        }
    }

    /// Iterate over rows
    pub fn iter_rows(&self) -> impl Iterator<Item = &[bool]> {
        // Not chunks(): it panics on zero-width images
        let columns = self.columns;
        (0..self.rows).map(move |row| &self.pixels[row * columns..(row + 1) * columns])
    }
}

/// ASCII preview, one line per row
impl core::fmt::Display for PixelMatrix {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for row in self.iter_rows() {
            f.write_str("|")?;
            for &pixel in row {
                f.write_str(if pixel { "#" } else { " " })?;
            }
            f.write_str("|\n")?;
        }
        Ok(())
    }
}

/// Height rounded up to a whole number of bytes per column
pub fn padded_rows(height: usize) -> usize {
    height.div_ceil(ROWS_PER_BYTE) * ROWS_PER_BYTE
}

/// Pack `image` column by column
///
/// All bytes of column 0 come before column 1, because the sign shifts
/// its data in one pixel column at a time.
pub fn pack_columns(image: &PixelMatrix, layout: ImageLayout) -> Vec<u8> {
    let padded = padded_rows(image.rows());
    let groups = padded / ROWS_PER_BYTE;
    let mut packed = Vec::with_capacity(groups * image.columns());

    for column in 0..image.columns() {
        for group in 0..groups {
            let mut byte = 0u8;
            for bit in 0..ROWS_PER_BYTE {
                let padded_row = group * ROWS_PER_BYTE + bit;
                match layout {
                    ImageLayout::Canonical => {
                        if image.get(padded_row, column) == Some(true) {
                            byte |= 1 << bit;
                        }
                    }
                    ImageLayout::LegacyTopPadded => {
                        let padding = padded - image.rows();
                        let set = padded_row
                            .checked_sub(padding)
                            .and_then(|row| image.get(row, column))
                            == Some(true);
                        if set {
                            byte |= 0x80 >> bit;
                        }
                    }
                }
            }
            packed.push(byte);
        }
    }

    packed
}

/// Payload for the write-image command
///
/// The leading resolution field is one byte on the wire, so the byte count
/// is sent modulo 256.
pub fn encode_image(image: &PixelMatrix, layout: ImageLayout) -> Vec<u8> {
    let packed = pack_columns(image, layout);
    let resolution = (packed.len() & 0xFF) as u8;

    let mut payload = Vec::with_capacity(2 + packed.len() * 2);
    push_hex(&mut payload, resolution);
    for &byte in &packed {
        push_hex(&mut payload, byte);
    }
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::encode;
    use proptest::prelude::*;

    fn write_image(image: &PixelMatrix, layout: ImageLayout) -> Vec<u8> {
        encode(1, 1, Some(&encode_image(image, layout))).unwrap()
    }

    #[test]
    fn test_padded_rows() {
        assert_eq!(padded_rows(0), 0);
        assert_eq!(padded_rows(1), 8);
        assert_eq!(padded_rows(8), 8);
        assert_eq!(padded_rows(15), 16);
        assert_eq!(padded_rows(16), 16);
    }

    #[test]
    fn test_small_image() {
        let mut image = PixelMatrix::new(3, 2);
        image.set(0, 0, true);

        assert_eq!(pack_columns(&image, ImageLayout::Canonical), [0x01, 0x00]);
        assert_eq!(write_image(&image, ImageLayout::Canonical), b"\x0211020100\x0378");
    }

    #[test]
    fn test_tall_image() {
        // Rows 0 and 9 of column 0: one bit in each of its two bytes
        let mut image = PixelMatrix::new(15, 2);
        image.set(0, 0, true);
        image.set(9, 0, true);

        assert_eq!(
            write_image(&image, ImageLayout::Canonical),
            b"\x02110401020000\x03B4"
        );
    }

    #[test]
    fn test_two_columns() {
        let mut image = PixelMatrix::new(3, 2);
        image.set(0, 0, true);
        image.set(2, 1, true);

        assert_eq!(write_image(&image, ImageLayout::Canonical), b"\x0211020104\x0374");
    }

    #[test]
    fn test_legacy_small_image() {
        // | p, p | x5, then the image rows
        let mut image = PixelMatrix::new(3, 2);
        image.set(0, 0, true);

        assert_eq!(
            write_image(&image, ImageLayout::LegacyTopPadded),
            b"\x0211020400\x0375"
        );
    }

    #[test]
    fn test_legacy_tall_image() {
        let mut image = PixelMatrix::new(15, 2);
        image.set(0, 0, true);
        image.set(9, 0, true);

        assert_eq!(
            write_image(&image, ImageLayout::LegacyTopPadded),
            b"\x02110440200000\x03B1"
        );
    }

    #[test]
    fn test_resolution_truncated() {
        // 8 rows x 300 columns = 300 bytes, sent as 300 mod 256 = 44
        let image = PixelMatrix::new(8, 300);
        let payload = encode_image(&image, ImageLayout::Canonical);

        assert_eq!(&payload[..2], b"2C");
        assert_eq!(payload.len(), 2 + 300 * 2);
    }

    #[test]
    fn test_resolution_wraps_to_zero() {
        let image = PixelMatrix::new(16, 128);
        assert_eq!(&encode_image(&image, ImageLayout::Canonical)[..2], b"00");
    }

    #[test]
    fn test_column_major_order() {
        // Full first column, empty second
        let image = PixelMatrix::from_fn(16, 2, |_, column| column == 0);
        assert_eq!(
            pack_columns(&image, ImageLayout::Canonical),
            [0xFF, 0xFF, 0x00, 0x00]
        );
    }

    #[test]
    fn test_from_rows() {
        let image = PixelMatrix::from_rows(&[[true, false], [false, true]]).unwrap();
        assert_eq!(image.rows(), 2);
        assert_eq!(image.columns(), 2);
        assert_eq!(image.get(1, 1), Some(true));
        assert_eq!(image.get(2, 0), None);
    }

    #[test]
    fn test_from_rows_ragged() {
        let rows: [&[bool]; 2] = [&[true, false], &[true]];
        assert_eq!(
            PixelMatrix::from_rows(&rows),
            Err(ImageError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_rotated_180() {
        let mut image = PixelMatrix::new(3, 2);
        image.set(0, 1, true);
        image.set(2, 1, true);

        let rotated = image.rotated_180();
        assert_eq!(rotated.get(2, 0), Some(true));
        assert_eq!(rotated.get(0, 0), Some(true));
        assert_eq!(rotated.count_set(), 2);
    }

    #[test]
    fn test_preview() {
        let image = PixelMatrix::from_rows(&[[true, false], [false, true]]).unwrap();
        assert_eq!(image.to_string(), "|# |\n| #|\n");
    }

    proptest! {
        #[test]
        fn payload_length_matches_padding(rows in 0usize..40, columns in 0usize..40) {
            let image = PixelMatrix::new(rows, columns);
            let expected = padded_rows(rows) / ROWS_PER_BYTE * columns;

            prop_assert_eq!(pack_columns(&image, ImageLayout::Canonical).len(), expected);
            prop_assert_eq!(pack_columns(&image, ImageLayout::LegacyTopPadded).len(), expected);
            prop_assert_eq!(encode_image(&image, ImageLayout::Canonical).len(), 2 + 2 * expected);
        }

        #[test]
        fn rotating_twice_is_identity(rows in 1usize..20, columns in 1usize..20, seed in any::<u64>()) {
            let image = PixelMatrix::from_fn(rows, columns, |r, c| (seed >> ((r * columns + c) % 64)) & 1 == 1);
            prop_assert_eq!(image.rotated_180().rotated_180(), image);
        }

        #[test]
        fn every_set_pixel_is_packed(rows in 1usize..24, columns in 1usize..8, seed in any::<u64>()) {
            let image = PixelMatrix::from_fn(rows, columns, |r, c| (seed >> ((r * columns + c) % 64)) & 1 == 1);
            for layout in [ImageLayout::Canonical, ImageLayout::LegacyTopPadded] {
                let bits: u32 = pack_columns(&image, layout).iter().map(|b| b.count_ones()).sum();
                prop_assert_eq!(bits as usize, image.count_set());
            }
        }
    }
}
