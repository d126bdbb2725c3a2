//! Boolean value generator.

use super::{SynthContext, SynthesisError, ValueSynthesizer};
use corpus_core::{FieldConfig, Value};
use rand::Rng;

/// Uniform `true`/`false`.
#[derive(Debug, Clone, Copy)]
pub struct BoolSynthesizer;

impl ValueSynthesizer for BoolSynthesizer {
    fn synthesize(&self, ctx: &mut SynthContext<'_>) -> Result<Value, SynthesisError> {
        Ok(Value::Bool(ctx.rng.random_bool(0.5)))
    }

    fn domain_size(&self, _config: Option<&FieldConfig>) -> Option<u64> {
        Some(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_both_outcomes_occur() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut trues = 0;
        let spins = 1024;

        for _ in 0..spins {
            let mut ctx = SynthContext {
                rng: &mut rng,
                config: None,
                baseline: None,
            };
            if BoolSynthesizer.synthesize(&mut ctx).unwrap() == Value::Bool(true) {
                trues += 1;
            }
        }

        assert!(trues > 0, "no true values");
        assert!(trues < spins, "no false values");
    }
}
