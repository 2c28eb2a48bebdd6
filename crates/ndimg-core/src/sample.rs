//! Sample (element) types stored in grids.
//!
//! # Types
//!
//! - [`RealSample`] - scalar numeric samples (u8, u16, i16, i32, u32, f16, f32, f64)
//! - [`NumericSample`] - arithmetic needed to blend samples (N-linear interpolation)
//! - [`Argb`] - packed 8-bit-per-channel colour, a composite sample
//! - [`Sample`] - anything storable in a grid
//! - [`SampleKind`] - closed classification reported by dynamic grid containers
//!
//! # Design
//!
//! Real samples are handled through their raw numeric value: a `u8` of 200
//! converts to `200.0`, not `0.784`. Normalisation is a [`Converter`]
//! concern, never an implicit one.
//!
//! Blending needs `zero`, `add` and `scale`. Integer types do not implement
//! [`NumericSample`] because every intermediate step would round; callers
//! convert to a float grid first and convert back once at the end.
//!
//! [`Converter`]: crate::converter::Converter
//!
//! # Dependencies
//!
//! - `half` crate for `f16` support

use half::f16;
use std::fmt;

/// Coarse classification of a sample type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SampleKind {
    /// Scalar real number
    Real,
    /// Packed multi-channel colour
    PackedArgb,
    /// Anything that has no numeric meaning (labels, masks)
    Opaque,
}

/// Any element that can live in a grid.
pub trait Sample: Clone + Send + Sync + 'static {}

macro_rules! impl_sample {
    ($($t:ty),*) => {$(
        impl Sample for $t {}
    )*};
}

impl_sample!(u8, u16, i16, i32, u32, f16, f32, f64, Argb, bool);

/// Scalar numeric sample convertible through `f64`.
///
/// # Example
///
/// ```
/// use ndimg_core::RealSample;
///
/// assert_eq!(u8::from_f64(254.6), 255);
/// assert_eq!(u8::from_f64(-3.0), 0);
/// assert_eq!(200u8.to_f64(), 200.0);
/// ```
pub trait RealSample: Sample + Copy + Default + PartialOrd {
    /// Raw value as `f64`.
    fn to_f64(self) -> f64;

    /// Converts from `f64`. Integer types round to nearest and saturate.
    fn from_f64(v: f64) -> Self;
}

macro_rules! impl_real_int {
    ($($t:ty),*) => {$(
        impl RealSample for $t {
            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(v: f64) -> Self {
                // `as` saturates and maps NaN to zero.
                v.round() as $t
            }
        }
    )*};
}

impl_real_int!(u8, u16, i16, i32, u32);

impl RealSample for f32 {
    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }
}

impl RealSample for f64 {
    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }
}

impl RealSample for f16 {
    #[inline]
    fn to_f64(self) -> f64 {
        f16::to_f64(self)
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        f16::from_f64(v)
    }
}

/// Arithmetic capability required to blend samples.
pub trait NumericSample: Clone {
    /// Additive identity.
    fn zero() -> Self;

    /// Sum of two samples.
    fn add(&self, other: &Self) -> Self;

    /// Sample multiplied by a real factor.
    fn scale(&self, factor: f64) -> Self;
}

impl NumericSample for f32 {
    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn add(&self, other: &Self) -> Self {
        self + other
    }

    #[inline]
    fn scale(&self, factor: f64) -> Self {
        (*self as f64 * factor) as f32
    }
}

impl NumericSample for f64 {
    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn add(&self, other: &Self) -> Self {
        self + other
    }

    #[inline]
    fn scale(&self, factor: f64) -> Self {
        self * factor
    }
}

impl NumericSample for f16 {
    #[inline]
    fn zero() -> Self {
        f16::ZERO
    }

    #[inline]
    fn add(&self, other: &Self) -> Self {
        f16::from_f64(self.to_f64() + other.to_f64())
    }

    #[inline]
    fn scale(&self, factor: f64) -> Self {
        f16::from_f64(self.to_f64() * factor)
    }
}

/// One 8-bit channel of an [`Argb`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Channel {
    /// Bits 24..32
    Alpha,
    /// Bits 16..24
    Red,
    /// Bits 8..16
    Green,
    /// Bits 0..8
    Blue,
}

impl Channel {
    /// All channels in packing order.
    pub const ALL: [Channel; 4] = [Channel::Alpha, Channel::Red, Channel::Green, Channel::Blue];

    /// Bit offset of the channel inside the packed word.
    #[inline]
    pub const fn shift(self) -> u32 {
        match self {
            Channel::Alpha => 24,
            Channel::Red => 16,
            Channel::Green => 8,
            Channel::Blue => 0,
        }
    }
}

/// Packed `0xAARRGGBB` colour sample.
///
/// # Example
///
/// ```
/// use ndimg_core::{Argb, Channel};
///
/// let c = Argb::from_channels(255, 10, 20, 30);
/// assert_eq!(c.0, 0xFF0A141E);
/// assert_eq!(c.channel(Channel::Green), 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Argb(pub u32);

impl Argb {
    /// Packs four 8-bit channels.
    #[inline]
    pub const fn from_channels(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Packs four real channel values (A, R, G, B order), rounding and
    /// clamping each to `[0, 255]`.
    #[inline]
    pub fn from_real_channels(values: [f64; 4]) -> Self {
        let [a, r, g, b] = values.map(|v| v.round().clamp(0.0, 255.0) as u8);
        Self::from_channels(a, r, g, b)
    }

    /// Extracts one channel.
    #[inline]
    pub const fn channel(self, channel: Channel) -> u8 {
        ((self.0 >> channel.shift()) & 0xff) as u8
    }

    /// Alpha channel.
    #[inline]
    pub const fn alpha(self) -> u8 {
        self.channel(Channel::Alpha)
    }

    /// Red channel.
    #[inline]
    pub const fn red(self) -> u8 {
        self.channel(Channel::Red)
    }

    /// Green channel.
    #[inline]
    pub const fn green(self) -> u8 {
        self.channel(Channel::Green)
    }

    /// Blue channel.
    #[inline]
    pub const fn blue(self) -> u8 {
        self.channel(Channel::Blue)
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}
