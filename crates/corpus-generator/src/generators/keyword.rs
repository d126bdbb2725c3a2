//! Keyword value generator.

use super::{SynthContext, SynthesisError, ValueSynthesizer};
use corpus_core::Value;
use rand::distr::Alphanumeric;
use rand::Rng;

/// Length of a generated keyword.
pub const KEYWORD_LEN: usize = 10;

/// Random ASCII alphanumeric keywords.
#[derive(Debug, Clone, Copy)]
pub struct KeywordSynthesizer;

impl ValueSynthesizer for KeywordSynthesizer {
    fn synthesize(&self, ctx: &mut SynthContext<'_>) -> Result<Value, SynthesisError> {
        let keyword: String = (0..KEYWORD_LEN)
            .map(|_| char::from(ctx.rng.sample(Alphanumeric)))
            .collect();
        Ok(Value::String(keyword))
    }
}
