//! IP address generator.

use super::{SynthContext, SynthesisError, ValueSynthesizer};
use corpus_core::Value;
use rand::Rng;
use std::net::Ipv4Addr;

/// Uniformly random dotted-decimal IPv4 addresses.
#[derive(Debug, Clone, Copy)]
pub struct IpSynthesizer;

impl ValueSynthesizer for IpSynthesizer {
    fn synthesize(&self, ctx: &mut SynthContext<'_>) -> Result<Value, SynthesisError> {
        let addr = Ipv4Addr::from(ctx.rng.random::<u32>());
        Ok(Value::String(addr.to_string()))
    }
}
