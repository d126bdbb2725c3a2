//! Mutable generation state.
//!
//! A `GenState` owns the random source, the per-field cardinality pools and
//! the previous numeric draw of every fuzzy field. It is the only thing an
//! emission mutates; a `Generator` itself stays immutable.

use crate::generators::{synthesizer_for, SynthContext, SynthesisError};
use corpus_core::{Field, FieldConfig, FieldType, Value};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{HashMap, HashSet};

/// Attempts made to find a fresh distinct value before a pool gives up.
pub const MAX_DISTINCT_ATTEMPTS: usize = 128;

/// Attempts per domain value when the domain is small enough to be nearly
/// exhausted by the pool.
const ATTEMPTS_PER_DOMAIN_VALUE: usize = 16;

/// Per-run generation state.
pub struct GenState {
    rng: StdRng,
    pools: HashMap<String, CardinalityPool>,
    baselines: HashMap<String, f64>,
}

impl GenState {
    /// Create a state seeded from the operating system.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Create a reproducible state.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            pools: HashMap::new(),
            baselines: HashMap::new(),
        }
    }

    /// Number of distinct values collected for a field so far.
    #[cfg(test)]
    fn pool_len(&self, name: &str) -> Option<usize> {
        self.pools.get(name).map(|pool| pool.values.len())
    }

    /// Draw a generated value for a field, honouring its cardinality pool and
    /// fuzziness baseline.
    pub(crate) fn draw(
        &mut self,
        field: &Field,
        config: Option<&FieldConfig>,
    ) -> Result<Value, SynthesisError> {
        let Self {
            rng,
            pools,
            baselines,
        } = self;

        let synthesizer = synthesizer_for(field.field_type);
        let pool_size = match (config.and_then(FieldConfig::pool_size), field.field_type) {
            (Some(size), _) => Some(size),
            (None, FieldType::ConstantKeyword) => Some(1),
            (None, _) => None,
        };
        // Pool entries are uniform draws over the domain; fuzziness only
        // shapes unpooled fields.
        let fuzzy = pool_size.is_none() && config.and_then(|c| c.fuzziness).is_some();

        let mut fresh = || -> Result<Value, SynthesisError> {
            let mut ctx = SynthContext {
                rng: &mut *rng,
                config,
                baseline: if fuzzy {
                    baselines.get(&field.name).copied()
                } else {
                    None
                },
            };
            let value = synthesizer.synthesize(&mut ctx)?;
            if fuzzy {
                if let Some(next) = ctx.baseline {
                    match baselines.get_mut(&field.name) {
                        Some(slot) => *slot = next,
                        None => {
                            baselines.insert(field.name.clone(), next);
                        }
                    }
                }
            }
            Ok(value)
        };

        let Some(pool_size) = pool_size else {
            return fresh();
        };

        if let Some(pool) = pools.get_mut(&field.name) {
            return pool.next(fresh);
        }

        let domain = synthesizer
            .domain_size(config)
            .map(|d| usize::try_from(d).unwrap_or(usize::MAX));
        let capacity = domain.map_or(pool_size, |d| pool_size.min(d)).max(1);
        let attempts = match domain {
            Some(d) if d <= capacity.saturating_mul(ATTEMPTS_PER_DOMAIN_VALUE) => {
                MAX_DISTINCT_ATTEMPTS.max(d.saturating_mul(ATTEMPTS_PER_DOMAIN_VALUE))
            }
            _ => MAX_DISTINCT_ATTEMPTS,
        };
        let mut pool = CardinalityPool::new(capacity, attempts);
        let value = pool.next(fresh)?;
        pools.insert(field.name.clone(), pool);
        Ok(value)
    }
}

impl Default for GenState {
    fn default() -> Self {
        Self::new()
    }
}

/// A bounded set of distinct values, filled on demand then replayed in order.
#[derive(Debug)]
struct CardinalityPool {
    capacity: usize,
    attempts: usize,
    values: Vec<Value>,
    seen: HashSet<String>,
    cursor: usize,
}

impl CardinalityPool {
    fn new(capacity: usize, attempts: usize) -> Self {
        Self {
            capacity,
            attempts,
            values: Vec::with_capacity(capacity.min(1024)),
            seen: HashSet::new(),
            cursor: 0,
        }
    }

    fn next(
        &mut self,
        mut fresh: impl FnMut() -> Result<Value, SynthesisError>,
    ) -> Result<Value, SynthesisError> {
        if self.values.len() < self.capacity {
            for _ in 0..self.attempts {
                let value = fresh()?;
                if self.seen.insert(value.to_string()) {
                    self.values.push(value.clone());
                    return Ok(value);
                }
            }
            return Err(SynthesisError::CardinalityExhausted {
                found: self.values.len(),
                wanted: self.capacity,
                attempts: self.attempts,
            });
        }

        let value = self.values[self.cursor % self.values.len()].clone();
        self.cursor = (self.cursor + 1) % self.values.len();
        Ok(value)
    }
}
