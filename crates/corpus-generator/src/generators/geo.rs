//! Geo point generator.

use super::{SynthContext, SynthesisError, ValueSynthesizer};
use corpus_core::Value;
use rand::Rng;

/// `lat,lon` pairs with latitude in [-90, 90] and longitude in [-180, 180].
#[derive(Debug, Clone, Copy)]
pub struct GeoPointSynthesizer;

impl ValueSynthesizer for GeoPointSynthesizer {
    fn synthesize(&self, ctx: &mut SynthContext<'_>) -> Result<Value, SynthesisError> {
        let lat: f64 = ctx.rng.random_range(-90.0..=90.0);
        let lon: f64 = ctx.rng.random_range(-180.0..=180.0);
        Ok(Value::String(format!("{lat:.6},{lon:.6}")))
    }
}
