//! Affine resampling of 2D and 3D grids.
//!
//! Resampling maps every position `P` of the output grid back through the
//! inverse model, `Q = model⁻¹(P)`, and samples the out-of-bounds-extended
//! input there with the chosen interpolator. The output grid covers the
//! integer bounding box of the transformed input.
//!
//! # Entry Points
//!
//! - [`affine`] - dynamic entry over [`AnyImg`] driven by a [`ResampleConfig`]
//! - [`affine_real`] - scalar grids (`u8` .. `f64`, `f16`)
//! - [`affine_argb`] - packed colour, resampled channel by channel
//!
//! # Matrix Layout
//!
//! Matrices are flat, row-major, with the translation as last column. The
//! canonical layout has 12 entries (`3x4`) for both 2D and 3D:
//!
//! ```text
//! 3D: [m00 m01 m02 tx  m10 m11 m12 ty  m20 m21 m22 tz]
//! 2D: [m00 m01  _  tx  m10 m11  _  ty   _   _   _   _]
//! ```
//!
//! A 2D transform may also be given as a compact 6-entry `2x3` array
//! `[m00 m01 tx m10 m11 ty]`.
//!
//! # Output Size
//!
//! The output interval is the floor/ceil bounding box of the mapped input
//! corners. A 3D model that leaves the depth axis untouched in scale
//! (`m22 == 1` within `1e-6`, `m20 == m21 == 0`) keeps the input's depth,
//! whatever fractional depth translation is applied.
//!
//! # Example
//!
//! ```rust
//! use ndimg_core::{ArrayImg, Position};
//! use ndimg_ops::{affine, AnyImg, ResampleConfig};
//!
//! let img = ArrayImg::from_vec(&[2, 2], vec![1.0f32, 2.0, 3.0, 4.0]).unwrap();
//! let config = ResampleConfig::new(vec![1.0, 0.0, 0.5, 0.0, 1.0, 0.5]);
//! let AnyImg::F32(out) = affine(&AnyImg::F32(img), &config).unwrap() else { unreachable!() };
//! assert_eq!(out.get(&Position::new([1, 1])), Some(&2.5));
//! ```
//!
//! # Dependencies
//!
//! - `ndimg-math` - the affine model and bounding box
//! - [`crate::interpolation`], [`crate::out_of_bounds`] - sampling
//!
//! # Used By
//!
//! - external viewers and batch tools

use crate::error::{OpsError, OpsResult};
use crate::interpolation::Mode;
use crate::out_of_bounds::{Boundary, OutOfBoundsFactory};
use half::f16;
use ndimg_core::{
    Argb, ArrayImg, Channel, ChannelExtract, Interval, IterableTarget, NumericSample,
    RealConvert, RealRandomAccessible, RealSample, SampleKind,
};
use ndimg_math::{AffineModel, bounding_interval};
use tracing::{debug, trace};

/// Operation name used in diagnostics.
const OP: &str = "affine transform";

/// Out-of-bounds strategy in element-type-independent form.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutOfBoundsConfig {
    /// Constant value. Real grids convert it with saturating rounding; packed
    /// colour grids read it as a `0xAARRGGBB` word.
    ConstantValue(f64),
    /// Nearest edge sample
    Border,
    /// Tiling
    Periodic,
    /// Reflection
    Mirror(Boundary),
}

impl Default for OutOfBoundsConfig {
    fn default() -> Self {
        Self::ConstantValue(0.0)
    }
}

impl OutOfBoundsConfig {
    /// Strategy for a real element type.
    pub fn factory<T: RealSample>(&self) -> OutOfBoundsFactory<T> {
        self.typed(T::from_f64)
    }

    /// Strategy for packed colour.
    ///
    /// The constant is truncated to an integer and its low 32 bits are the
    /// colour, so `-16777216.0` and `4278190080.0` both read as opaque black.
    pub fn argb_factory(&self) -> OutOfBoundsFactory<Argb> {
        self.typed(|v| Argb(v as i64 as u32))
    }

    fn typed<T>(&self, convert: impl FnOnce(f64) -> T) -> OutOfBoundsFactory<T> {
        match *self {
            Self::ConstantValue(v) => OutOfBoundsFactory::ConstantValue(convert(v)),
            Self::Border => OutOfBoundsFactory::Border,
            Self::Periodic => OutOfBoundsFactory::Periodic,
            Self::Mirror(b) => OutOfBoundsFactory::Mirror(b),
        }
    }
}

/// Parameters of one resampling call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResampleConfig {
    /// Flat row-major matrix (see the module docs for the layout)
    pub matrix: Vec<f64>,
    /// Interpolation mode
    #[cfg_attr(feature = "serde", serde(default))]
    pub mode: Mode,
    /// Out-of-bounds strategy
    #[cfg_attr(feature = "serde", serde(default))]
    pub out_of_bounds: OutOfBoundsConfig,
}

impl ResampleConfig {
    /// Linear interpolation, zero outside the input.
    pub fn new(matrix: impl Into<Vec<f64>>) -> Self {
        Self {
            matrix: matrix.into(),
            mode: Mode::default(),
            out_of_bounds: OutOfBoundsConfig::default(),
        }
    }

    /// Sets the interpolation mode.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the out-of-bounds strategy.
    pub fn with_out_of_bounds(mut self, out_of_bounds: OutOfBoundsConfig) -> Self {
        self.out_of_bounds = out_of_bounds;
        self
    }
}

/// Grid of any element type the engine knows about.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyImg {
    /// 8-bit unsigned
    U8(ArrayImg<u8>),
    /// 16-bit unsigned
    U16(ArrayImg<u16>),
    /// 16-bit signed
    I16(ArrayImg<i16>),
    /// 32-bit signed
    I32(ArrayImg<i32>),
    /// Half float
    F16(ArrayImg<f16>),
    /// Single float
    F32(ArrayImg<f32>),
    /// Double float
    F64(ArrayImg<f64>),
    /// Packed colour
    Argb(ArrayImg<Argb>),
    /// Object identifiers; not resampleable
    Label(ArrayImg<u32>),
    /// Binary mask; not resampleable
    Mask(ArrayImg<bool>),
}

macro_rules! any_img_from {
    ($($t:ty => $variant:ident),*) => {$(
        impl From<ArrayImg<$t>> for AnyImg {
            fn from(img: ArrayImg<$t>) -> Self {
                AnyImg::$variant(img)
            }
        }
    )*};
}

any_img_from!(
    u8 => U8, u16 => U16, i16 => I16, i32 => I32, f16 => F16, f32 => F32, f64 => F64,
    Argb => Argb, u32 => Label, bool => Mask
);

impl AnyImg {
    /// Element type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::F16(_) => "f16",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::Argb(_) => "argb",
            Self::Label(_) => "label",
            Self::Mask(_) => "mask",
        }
    }

    /// Classification of the element type.
    pub fn sample_kind(&self) -> SampleKind {
        match self {
            Self::Argb(_) => SampleKind::PackedArgb,
            Self::Label(_) | Self::Mask(_) => SampleKind::Opaque,
            _ => SampleKind::Real,
        }
    }

    /// Domain of the grid.
    pub fn interval(&self) -> &Interval {
        match self {
            Self::U8(i) => i.interval(),
            Self::U16(i) => i.interval(),
            Self::I16(i) => i.interval(),
            Self::I32(i) => i.interval(),
            Self::F16(i) => i.interval(),
            Self::F32(i) => i.interval(),
            Self::F64(i) => i.interval(),
            Self::Argb(i) => i.interval(),
            Self::Label(i) => i.interval(),
            Self::Mask(i) => i.interval(),
        }
    }

    /// Number of axes.
    pub fn num_dims(&self) -> usize {
        self.interval().num_dims()
    }
}

/// Builds the model for a grid of `num_dims` axes from a flat matrix.
///
/// # Errors
///
/// - [`OpsError::UnsupportedDimensionality`] unless `num_dims` is 2 or 3
/// - [`OpsError::InvalidArgument`] if the matrix is too short or holds a
///   non-finite value
pub fn parse_model(matrix: &[f64], num_dims: usize) -> OpsResult<AffineModel> {
    if !(2..=3).contains(&num_dims) {
        return Err(OpsError::UnsupportedDimensionality(num_dims));
    }
    if let Some(i) = matrix.iter().position(|v| !v.is_finite()) {
        return Err(OpsError::invalid_argument(format!(
            "matrix entry {i} is not finite ({})",
            matrix[i]
        )));
    }
    let m = matrix;
    match (num_dims, m.len()) {
        (2, n) if n >= 12 => Ok(AffineModel::new_2d(m[0], m[1], m[4], m[5], m[3], m[7])),
        (2, n) if n >= 6 => Ok(AffineModel::new_2d(m[0], m[1], m[3], m[4], m[2], m[5])),
        (3, n) if n >= 12 => Ok(AffineModel::new_3d([
            [m[0], m[1], m[2], m[3]],
            [m[4], m[5], m[6], m[7]],
            [m[8], m[9], m[10], m[11]],
        ])),
        (d, n) => Err(OpsError::invalid_argument(format!(
            "matrix has {n} entries, {d}D needs at least {}",
            if d == 2 { 6 } else { 12 }
        ))),
    }
}

/// Output interval of `input` under `model`.
pub fn output_interval(model: &AffineModel, input: &Interval) -> OpsResult<Interval> {
    let bbox = bounding_interval(model, input)?;
    if model.num_dims() == 3 && model.is_pass_through_axis(2) {
        let min = bbox.min(2);
        let max = min + input.dimension(2) as i64 - 1;
        return Ok(bbox.with_axis(2, min, max)?);
    }
    Ok(bbox)
}

/// Resamples a working-type grid.
fn resample<W>(
    src: &ArrayImg<W>,
    model: &AffineModel,
    mode: Mode,
    oob: &OutOfBoundsFactory<W>,
) -> OpsResult<ArrayImg<W>>
where
    W: NumericSample + Default,
{
    let inverse = model.inverse().ok_or_else(|| {
        OpsError::processing_failure(
            OP,
            format!("model is not invertible (determinant {})", model.determinant()),
        )
    })?;
    let interval = output_interval(model, src.interval())?;
    debug!(input = %src.interval(), output = %interval, ?mode, "affine resample");

    let interp = mode.interpolate(oob.extend(src));
    let mut out = ArrayImg::with_interval(interval, W::default())?;
    for (p, dst) in out.localizing_cursor_mut() {
        *dst = interp.sample_at(&inverse.apply(&p.to_real()));
    }
    Ok(out)
}

/// Resamples a scalar grid.
///
/// Samples are blended in `f64` and written back with the element type's
/// saturating rounding.
///
/// # Errors
///
/// See [`parse_model`]; [`OpsError::ProcessingFailure`] for a singular model.
pub fn affine_real<T: RealSample>(
    img: &ArrayImg<T>,
    matrix: &[f64],
    mode: Mode,
    oob: &OutOfBoundsFactory<T>,
) -> OpsResult<ArrayImg<T>> {
    let model = parse_model(matrix, img.num_dims())?;
    let work: ArrayImg<f64> = img.map_into(&RealConvert);
    let oob = oob.map_value(|v| v.to_f64());
    let out = resample(&work, &model, mode, &oob)?;
    Ok(out.map_into(&RealConvert))
}

/// Resamples a packed colour grid.
///
/// Each channel is extracted into an `f32` grid, resampled on its own and
/// recomposed with rounding and clamping to `[0, 255]`. A constant
/// out-of-bounds colour is split into per-channel constants; other
/// strategies apply to every channel unchanged.
pub fn affine_argb(
    img: &ArrayImg<Argb>,
    matrix: &[f64],
    mode: Mode,
    oob: &OutOfBoundsFactory<Argb>,
) -> OpsResult<ArrayImg<Argb>> {
    let model = parse_model(matrix, img.num_dims())?;
    let mut channels = Vec::with_capacity(Channel::ALL.len());
    for ch in Channel::ALL {
        trace!(channel = ?ch, "affine resample channel");
        let plane: ArrayImg<f32> = img.map_into(&ChannelExtract(ch));
        let ch_oob = oob.map_value(|c| c.channel(ch) as f32);
        channels.push(resample(&plane, &model, mode, &ch_oob)?);
    }

    let interval = channels[0].interval().clone();
    let [a, r, g, b] = [0, 1, 2, 3].map(|i| channels[i].data());
    let data = (0..a.len())
        .map(|i| Argb::from_real_channels([a[i], r[i], g[i], b[i]].map(f64::from)))
        .collect();
    Ok(ArrayImg::from_vec_in(interval, data)?)
}

/// Resamples any supported grid as described by `config`.
///
/// # Errors
///
/// [`OpsError::UnsupportedElementType`] for label and mask grids; otherwise
/// as [`affine_real`] / [`affine_argb`].
pub fn affine(img: &AnyImg, config: &ResampleConfig) -> OpsResult<AnyImg> {
    macro_rules! real {
        ($variant:ident, $i:expr) => {
            affine_real($i, &config.matrix, config.mode, &config.out_of_bounds.factory())
                .map(AnyImg::$variant)
        };
    }

    match img {
        AnyImg::U8(i) => real!(U8, i),
        AnyImg::U16(i) => real!(U16, i),
        AnyImg::I16(i) => real!(I16, i),
        AnyImg::I32(i) => real!(I32, i),
        AnyImg::F16(i) => real!(F16, i),
        AnyImg::F32(i) => real!(F32, i),
        AnyImg::F64(i) => real!(F64, i),
        AnyImg::Argb(i) => {
            affine_argb(i, &config.matrix, config.mode, &config.out_of_bounds.argb_factory())
                .map(AnyImg::Argb)
        }
        AnyImg::Label(_) | AnyImg::Mask(_) => Err(OpsError::UnsupportedElementType {
            kind: img.type_name().to_string(),
            op: OP.to_string(),
        }),
    }
}
