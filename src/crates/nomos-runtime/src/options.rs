// options.rs

use nomos_bignum::AReal;

/// Evaluator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalOptions {
    /// Nested calls allowed before evaluation fails.
    pub max_call_depth: usize,
    /// Mantissa bits for real literals that need arbitrary precision.
    pub real_precision: u32,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            max_call_depth: 512,
            real_precision: AReal::DEFAULT_PRECISION,
        }
    }
}

impl EvalOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn with_real_precision(mut self, bits: u32) -> Self {
        self.real_precision = bits;
        self
    }
}
