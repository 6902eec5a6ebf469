//! Sign descriptors
//!
//! A [`Sign`] knows where a physical unit sits on the bus, how big it is
//! and whether it hangs upside down, and turns bitmaps into write-image
//! packets for it.

use alloc::string::String;

use hanover_protocol::{Address, ImageLayout, Packet, PixelMatrix};

use crate::config::{sign_name, SignConfig};
use crate::error::{ConfigError, SignError};

/// One addressable flipdot sign
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sign {
    name: String,
    address: Address,
    width: usize,
    height: usize,
    flip: bool,
    layout: ImageLayout,
}

impl Sign {
    /// Create a sign descriptor
    ///
    /// `flip` marks a sign mounted upside down; its images are rotated by
    /// 180 degrees before transmission.
    pub fn new(
        name: &str,
        address: u8,
        width: usize,
        height: usize,
        flip: bool,
    ) -> Result<Self, ConfigError> {
        let name = sign_name(name)?;
        let address = Address::new(address).map_err(|_| ConfigError::AddressOutOfRange(address))?;
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroDimension { width, height });
        }

        Ok(Self {
            name,
            address,
            width,
            height,
            flip,
            layout: ImageLayout::Canonical,
        })
    }

    /// Create a sign from its configuration entry
    pub fn from_config(config: &SignConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            &config.name,
            config.address,
            config.width,
            config.height,
            config.flip,
        )?
        .with_layout(config.layout))
    }

    /// Use a different bit layout for this sign's images
    pub fn with_layout(mut self, layout: ImageLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Friendly name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bus address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Width in dots (image columns)
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in dots (image rows)
    pub fn height(&self) -> usize {
        self.height
    }

    /// Mounted upside down
    pub fn is_flipped(&self) -> bool {
        self.flip
    }

    /// Bit layout used for this sign's images
    pub fn layout(&self) -> ImageLayout {
        self.layout
    }

    /// Blank image sized for this sign
    pub fn create_blank_image(&self) -> PixelMatrix {
        PixelMatrix::new(self.height, self.width)
    }

    /// Build the write-image packet for `image`
    pub fn to_packet(&self, image: &PixelMatrix) -> Result<Packet, SignError> {
        if image.rows() != self.height || image.columns() != self.width {
            return Err(SignError::DimensionMismatch {
                expected_width: self.width,
                expected_height: self.height,
                width: image.columns(),
                height: image.rows(),
            });
        }

        let rotated;
        let image = if self.flip {
            rotated = image.rotated_180();
            &rotated
        } else {
            image
        };

        Ok(Packet::image(self.address, image, self.layout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sign_validation() {
        assert_eq!(
            Sign::new("", 1, 2, 3, false),
            Err(ConfigError::EmptyName)
        );
        assert_eq!(
            Sign::new("dev", 16, 2, 3, false),
            Err(ConfigError::AddressOutOfRange(16))
        );
        assert_eq!(
            Sign::new("dev", 1, 0, 3, false),
            Err(ConfigError::ZeroDimension {
                width: 0,
                height: 3
            })
        );
    }

    #[test]
    fn test_blank_image_matches_sign() {
        let sign = Sign::new("dev", 1, 86, 7, false).unwrap();
        let image = sign.create_blank_image();

        assert_eq!(image.rows(), 7);
        assert_eq!(image.columns(), 86);
        assert_eq!(image.count_set(), 0);
    }

    #[test]
    fn test_to_packet() {
        let sign = Sign::new("dev", 1, 2, 3, false).unwrap();
        let mut image = sign.create_blank_image();
        image.set(0, 0, true);
        image.set(2, 1, true);

        let packet = sign.to_packet(&image).unwrap();
        assert_eq!(packet.address().value(), 1);
        assert_eq!(packet.encode(), b"\x0211020104\x0374");
    }

    #[test]
    fn test_dimension_mismatch() {
        let sign = Sign::new("dev", 1, 2, 3, false).unwrap();
        let image = PixelMatrix::new(4, 5);

        assert_eq!(
            sign.to_packet(&image),
            Err(SignError::DimensionMismatch {
                expected_width: 2,
                expected_height: 3,
                width: 5,
                height: 4,
            })
        );
    }

    #[test]
    fn test_transposed_image_rejected() {
        // Same pixel count, wrong shape
        let sign = Sign::new("dev", 1, 2, 3, false).unwrap();
        assert!(sign.to_packet(&PixelMatrix::new(2, 3)).is_err());
    }

    #[test]
    fn test_flipped_sign_rotates() {
        let flipped = Sign::new("dev", 1, 2, 3, true).unwrap();
        let upright = Sign::new("dev", 1, 2, 3, false).unwrap();

        let mut image = flipped.create_blank_image();
        image.set(0, 1, true);
        image.set(2, 1, true);

        let mut rotated = upright.create_blank_image();
        rotated.set(2, 0, true);
        rotated.set(0, 0, true);

        let packet = flipped.to_packet(&image).unwrap();
        assert_eq!(packet, upright.to_packet(&rotated).unwrap());
        assert_eq!(packet.encode(), b"\x0211020500\x0374");
    }

    #[test]
    fn test_from_config_keeps_layout() {
        let mut config = SignConfig::new("old", 2, 2, 3).unwrap();
        config.layout = ImageLayout::LegacyTopPadded;

        let sign = Sign::from_config(&config).unwrap();
        let mut image = sign.create_blank_image();
        image.set(0, 0, true);

        assert_eq!(sign.layout(), ImageLayout::LegacyTopPadded);
        assert_eq!(sign.to_packet(&image).unwrap().payload(), b"020400");
    }

    #[test]
    fn test_long_name_accepted() {
        let name = "north-entrance-platform-2-departures-board";
        let sign = Sign::new(name, 4, 86, 7, false).unwrap();
        assert_eq!(sign.name(), name);
    }

    proptest! {
        #[test]
        fn flipped_sign_sends_rotated_image(
            width in 1usize..24,
            height in 1usize..20,
            seed in any::<u64>(),
        ) {
            let flipped = Sign::new("flipped", 3, width, height, true).unwrap();
            let upright = Sign::new("upright", 3, width, height, false).unwrap();
            let image = PixelMatrix::from_fn(height, width, |r, c| {
                (seed >> ((r * width + c) % 64)) & 1 == 1
            });

            prop_assert_eq!(
                flipped.to_packet(&image).unwrap(),
                upright.to_packet(&image.rotated_180()).unwrap()
            );
        }

        #[test]
        fn wrong_size_never_encoded(
            width in 1usize..16,
            height in 1usize..16,
            rows in 0usize..20,
            columns in 0usize..20,
        ) {
            prop_assume!(rows != height || columns != width);
            let sign = Sign::new("dev", 1, width, height, false).unwrap();
            prop_assert!(sign.to_packet(&PixelMatrix::new(rows, columns)).is_err());
        }
    }
}
