//! Date value generator.
//!
//! Dates are anchored to the instant of emission and reach back at most
//! [`DATE_SPAN_SECS`] seconds. The configured `range` (in seconds) narrows the
//! span and `fuzziness` keeps consecutive offsets close to each other.

use super::numeric::draw_fuzzed;
use super::{SynthContext, SynthesisError, ValueSynthesizer};
use chrono::{Duration, Utc};
use corpus_core::Value;

/// Layout of every emitted date.
pub const DATE_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Maximum distance of an emitted date from the emission instant, in seconds.
pub const DATE_SPAN_SECS: i64 = 86_400;

/// Timestamps in the recent past.
#[derive(Debug, Clone, Copy)]
pub struct DateSynthesizer;

impl DateSynthesizer {
    fn span(range: Option<f64>) -> f64 {
        let max = DATE_SPAN_SECS as f64;
        range.map_or(max, |r| r.min(max))
    }
}

impl ValueSynthesizer for DateSynthesizer {
    fn synthesize(&self, ctx: &mut SynthContext<'_>) -> Result<Value, SynthesisError> {
        let span = Self::span(ctx.range());
        let fuzziness = ctx.fuzziness();
        let offset = draw_fuzzed(ctx.rng, ctx.baseline, fuzziness, 1.0, 0.0, span);
        ctx.baseline = Some(offset);

        let micros = (offset * 1_000_000.0) as i64;
        let date = Utc::now() - Duration::microseconds(micros);
        Ok(Value::String(date.format(DATE_LAYOUT).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use corpus_core::FieldConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn age_secs(value: &Value) -> i64 {
        let text = value.as_str().unwrap();
        let parsed = NaiveDateTime::parse_from_str(text, DATE_LAYOUT).unwrap().and_utc();
        (Utc::now() - parsed).num_seconds()
    }

    #[test]
    fn test_date_within_span() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..1024 {
            let mut ctx = SynthContext {
                rng: &mut rng,
                config: None,
                baseline: None,
            };
            let value = DateSynthesizer.synthesize(&mut ctx).unwrap();
            let age = age_secs(&value);
            assert!((-1..=DATE_SPAN_SECS + 1).contains(&age), "age {age}s out of span");
        }
    }

    #[test]
    fn test_range_narrows_span() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = FieldConfig::new("alpha").with_range(60.0);

        for _ in 0..256 {
            let mut ctx = SynthContext {
                rng: &mut rng,
                config: Some(&config),
                baseline: None,
            };
            let value = DateSynthesizer.synthesize(&mut ctx).unwrap();
            assert!(age_secs(&value) <= 61);
        }
    }

    #[test]
    fn test_range_never_widens_span() {
        assert_eq!(DateSynthesizer::span(Some(1e9)), DATE_SPAN_SECS as f64);
        assert_eq!(DateSynthesizer::span(None), DATE_SPAN_SECS as f64);
    }
}
