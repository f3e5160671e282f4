//! Packed 32-bit colors.
//!
//! Colors are stored the way immediate-mode draw lists consume them:
//! `0xAABBGGRR` (alpha in the high byte, red in the low byte).

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Packed `0xAABBGGRR` color.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgba(pub u32);

impl Rgba {
    /// Opaque white.
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    /// Opaque black.
    pub const BLACK: Self = Self(0xFF00_0000);
    /// Opaque red.
    pub const RED: Self = Self(0xFF00_00FF);
    /// Opaque green.
    pub const GREEN: Self = Self(0xFF00_FF00);
    /// Opaque blue.
    pub const BLUE: Self = Self(0xFFFF_0000);
    /// Opaque yellow. Used for entities that hit an unexpected rule path.
    pub const YELLOW: Self = Self(0xFF00_FFFF);
    /// Opaque gold.
    pub const GOLD: Self = Self(0xFF00_D7FF);

    /// Builds a color from 8-bit channels.
    #[inline]
    #[must_use]
    pub const fn from_channels(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self((a as u32) << 24 | (b as u32) << 16 | (g as u32) << 8 | r as u32)
    }

    /// Builds a color from normalized float channels (`[r, g, b, a]`, 0..=1).
    #[must_use]
    pub fn from_floats(rgba: [f32; 4]) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::from_channels(to_u8(rgba[0]), to_u8(rgba[1]), to_u8(rgba[2]), to_u8(rgba[3]))
    }

    /// Alpha channel.
    #[inline]
    #[must_use]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Applies an opacity mask of the form `0xAAFFFFFF`.
    ///
    /// The mask is AND-ed in, so the resulting alpha never exceeds either input.
    #[inline]
    #[must_use]
    pub const fn masked(self, opacity: OpacityMask) -> Self {
        Self(self.0 & opacity.0)
    }

    /// Replaces the alpha channel.
    #[inline]
    #[must_use]
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self((self.0 & 0x00FF_FFFF) | (alpha as u32) << 24)
    }
}

impl From<u32> for Rgba {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Opacity stored as a color mask (`0xAA_FFFFFF`).
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpacityMask(pub u32);

impl OpacityMask {
    /// No transparency.
    pub const OPAQUE: Self = Self(0xFFFF_FFFF);

    /// Builds a mask from a normalized opacity (0..=1).
    #[must_use]
    pub fn from_fraction(opacity: f32) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let alpha = (opacity.clamp(0.0, 1.0) * 255.0) as u32;
        Self(alpha << 24 | 0x00FF_FFFF)
    }

    /// Normalized opacity (0..=1).
    #[must_use]
    pub fn fraction(self) -> f32 {
        f32::from((self.0 >> 24) as u8) / 255.0
    }
}

impl Default for OpacityMask {
    fn default() -> Self {
        Self::OPAQUE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_packing() {
        let c = Rgba::from_channels(0x11, 0x22, 0x33, 0x44);
        assert_eq!(c.0, 0x4433_2211);
        assert_eq!(c.alpha(), 0x44);
        assert_eq!(Rgba::from_floats([1.0, 0.0, 0.0, 1.0]), Rgba::RED);
    }

    #[test]
    fn test_opacity_mask() {
        let mask = OpacityMask::from_fraction(0.5);
        assert_eq!(mask.0, 0x7FFF_FFFF);
        assert_eq!(Rgba::WHITE.masked(mask).alpha(), 0x7F);
        // Mask never raises alpha
        assert_eq!(Rgba::WHITE.with_alpha(0x10).masked(mask).alpha(), 0x10);
    }
}
