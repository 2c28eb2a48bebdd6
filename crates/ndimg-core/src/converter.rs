//! Element-wise conversion between sample types.
//!
//! A [`Converter`] writes a target element from a source element. It is
//! stateless with respect to the data it converts: it never keeps references
//! to either side, so one converter can be shared by every position of a
//! projection or a resampling pass.
//!
//! # Provided Converters
//!
//! | Converter          | From            | To              |
//! |--------------------|-----------------|-----------------|
//! | [`Identity`]       | `T`             | `T`             |
//! | [`RealConvert`]    | any real        | any real        |
//! | [`Normalize`]      | any real        | `f32` in [0, 1] |
//! | [`ChannelExtract`] | [`Argb`]        | `f32` / `f64`   |
//! | [`GrayToArgb`]     | any real        | opaque grey [`Argb`] |
//!
//! Any `Fn(&A, &mut B)` closure is a converter as well:
//!
//! ```rust
//! use ndimg_core::Converter;
//!
//! let double = |a: &i32, b: &mut i64| *b = 2 * *a as i64;
//! let mut out = 0i64;
//! double.convert(&21i32, &mut out);
//! assert_eq!(out, 42);
//! ```

use crate::sample::{Argb, Channel, RealSample};

/// Converts a source element into a target element in place.
pub trait Converter<A: ?Sized, B: ?Sized> {
    /// Overwrites `output` with the converted `input`.
    fn convert(&self, input: &A, output: &mut B);
}

impl<A: ?Sized, B: ?Sized, F> Converter<A, B> for F
where
    F: Fn(&A, &mut B),
{
    #[inline]
    fn convert(&self, input: &A, output: &mut B) {
        self(input, output)
    }
}

/// Copies the element unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl<T: Clone> Converter<T, T> for Identity {
    #[inline]
    fn convert(&self, input: &T, output: &mut T) {
        output.clone_from(input);
    }
}

/// Converts between real types through `f64`, without normalisation.
///
/// Integer targets round to nearest and saturate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RealConvert;

impl<A: RealSample, B: RealSample> Converter<A, B> for RealConvert {
    #[inline]
    fn convert(&self, input: &A, output: &mut B) {
        *output = B::from_f64(input.to_f64());
    }
}

/// Linear map of `[min, max]` onto `[0, 1]`, clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalize {
    /// Value mapped to 0
    pub min: f64,
    /// Value mapped to 1
    pub max: f64,
}

impl Normalize {
    /// Creates a normalising converter.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    fn unit(&self, v: f64) -> f64 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        ((v - self.min) / range).clamp(0.0, 1.0)
    }
}

impl<A: RealSample> Converter<A, f32> for Normalize {
    #[inline]
    fn convert(&self, input: &A, output: &mut f32) {
        *output = self.unit(input.to_f64()) as f32;
    }
}

/// Reads one channel of a packed colour as a real value in `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelExtract(pub Channel);

impl Converter<Argb, f32> for ChannelExtract {
    #[inline]
    fn convert(&self, input: &Argb, output: &mut f32) {
        *output = input.channel(self.0) as f32;
    }
}

impl Converter<Argb, f64> for ChannelExtract {
    #[inline]
    fn convert(&self, input: &Argb, output: &mut f64) {
        *output = input.channel(self.0) as f64;
    }
}

/// Display conversion: maps `[min, max]` to an opaque grey level.
///
/// ```rust
/// use ndimg_core::{Argb, Converter, GrayToArgb};
///
/// let mut px = Argb::default();
/// GrayToArgb::new(0.0, 1.0).convert(&0.5f32, &mut px);
/// assert_eq!(px, Argb::from_channels(255, 128, 128, 128));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrayToArgb {
    normalize: Normalize,
}

impl GrayToArgb {
    /// Creates a grey-level converter for the value range `[min, max]`.
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            normalize: Normalize::new(min, max),
        }
    }
}

impl<A: RealSample> Converter<A, Argb> for GrayToArgb {
    #[inline]
    fn convert(&self, input: &A, output: &mut Argb) {
        let g = (self.normalize.unit(input.to_f64()) * 255.0).round() as u8;
        *output = Argb::from_channels(255, g, g, g);
    }
}
