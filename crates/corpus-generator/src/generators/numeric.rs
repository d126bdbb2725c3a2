//! Numeric value generators.
//!
//! Draws are non-negative magnitudes bounded by the type's domain, narrowed by
//! the configured `range`. With `fuzziness`, each draw after the first stays
//! within `max(|previous| * fuzziness, fuzziness)` of the previous draw
//! (at least one unit for integer types).

use super::{SynthContext, SynthesisError, ValueSynthesizer};
use corpus_core::{FieldConfig, Value};
use rand::Rng;

/// Default upper bound for floating point draws without a range.
pub const DEFAULT_FLOAT_RANGE: f64 = 1_000_000.0;

/// Largest finite half precision value.
pub const HALF_FLOAT_MAX: f64 = 65504.0;

/// Scaling factor applied to `scaled_float` and `half_float` values.
pub const SCALING_FACTOR: f64 = 100.0;

/// Numeric type family members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    Integer,
    Long,
    UnsignedLong,
    Float,
    Double,
    HalfFloat,
    ScaledFloat,
}

impl NumericKind {
    /// Largest value representable by the type.
    fn type_max(self) -> f64 {
        match self {
            Self::Integer => f64::from(i32::MAX),
            Self::Long => i64::MAX as f64,
            Self::UnsignedLong => u64::MAX as f64,
            Self::Float => f64::from(f32::MAX),
            Self::Double => f64::MAX,
            Self::HalfFloat => HALF_FLOAT_MAX,
            Self::ScaledFloat => i64::MAX as f64 / SCALING_FACTOR,
        }
    }

    /// Upper bound of a draw, given an optional configured range.
    pub fn upper_bound(self, range: Option<f64>) -> f64 {
        let default = match self {
            Self::Integer | Self::Long | Self::UnsignedLong => self.type_max(),
            Self::Float | Self::Double | Self::ScaledFloat => DEFAULT_FLOAT_RANGE,
            Self::HalfFloat => HALF_FLOAT_MAX,
        };
        range.map_or(default, |r| r.min(self.type_max()))
    }

    /// Round a float draw to the precision the type stores.
    fn quantize(self, value: f64) -> f64 {
        match self {
            Self::Float => f64::from(value as f32),
            Self::HalfFloat | Self::ScaledFloat => (value * SCALING_FACTOR).round() / SCALING_FACTOR,
            _ => value,
        }
    }
}

/// Synthesizer for every numeric type.
#[derive(Debug, Clone, Copy)]
pub struct NumericSynthesizer(pub NumericKind);

impl ValueSynthesizer for NumericSynthesizer {
    fn synthesize(&self, ctx: &mut SynthContext<'_>) -> Result<Value, SynthesisError> {
        let kind = self.0;
        let high = kind.upper_bound(ctx.range());
        let fuzziness = ctx.fuzziness();
        let baseline = ctx.baseline;
        let fuzzy = baseline.is_some() && fuzziness.is_some();

        let value = match kind {
            NumericKind::Integer | NumericKind::Long => {
                let v = if fuzzy {
                    draw_fuzzed(ctx.rng, baseline, fuzziness, 1.0, 0.0, high).round() as i64
                } else {
                    ctx.rng.random_range(0..=high as i64)
                };
                ctx.baseline = Some(v as f64);
                Value::Int(v)
            }
            NumericKind::UnsignedLong => {
                let v = if fuzzy {
                    draw_fuzzed(ctx.rng, baseline, fuzziness, 1.0, 0.0, high).round() as u64
                } else {
                    ctx.rng.random_range(0..=high as u64)
                };
                ctx.baseline = Some(v as f64);
                Value::UnsignedInt(v)
            }
            _ => {
                let min_width = fuzziness.unwrap_or_default();
                let v = draw_fuzzed(ctx.rng, baseline, fuzziness, min_width, 0.0, high);
                let v = kind.quantize(v);
                ctx.baseline = Some(v);
                Value::Float(v)
            }
        };

        Ok(value)
    }

    fn domain_size(&self, config: Option<&FieldConfig>) -> Option<u64> {
        let high = self.0.upper_bound(config.and_then(|c| c.range));
        match self.0 {
            NumericKind::Integer | NumericKind::Long | NumericKind::UnsignedLong => {
                Some((high as u64).saturating_add(1))
            }
            NumericKind::HalfFloat | NumericKind::ScaledFloat => {
                Some(((high * SCALING_FACTOR) as u64).saturating_add(1))
            }
            // Non-negative floats order like their bit patterns, so the bits
            // of the bound count the representable values below it.
            NumericKind::Float | NumericKind::Double if high <= 0.0 => Some(1),
            NumericKind::Float => Some(u64::from((high as f32).to_bits())),
            NumericKind::Double => Some(high.to_bits()),
        }
    }
}

/// Draw a float in `[low, high)`.
///
/// With both a baseline and a fuzziness ratio the draw is taken from the
/// window `baseline ± max(|baseline| * ratio, min_width)` instead, clamped
/// to `[low, high]`.
pub fn draw_fuzzed<R: Rng + ?Sized>(
    rng: &mut R,
    baseline: Option<f64>,
    fuzziness: Option<f64>,
    min_width: f64,
    low: f64,
    high: f64,
) -> f64 {
    let (lo, hi) = match (baseline, fuzziness) {
        (Some(base), Some(ratio)) => {
            let width = (base.abs() * ratio).max(min_width);
            ((base - width).max(low), (base + width).min(high))
        }
        _ => (low, high),
    };

    if lo < hi {
        rng.random_range(lo..hi)
    } else {
        lo.clamp(low, high)
    }
}
