use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::roi::format;

pub const DEFAULT_DURATION_MS: u64 = 1_000;

/// Animated number display that counts from zero up to `target` with an
/// ease-out cubic curve. Purely cosmetic; restart by sampling from zero again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountUp {
    pub target: Decimal,
    pub decimals: u32,
    pub duration_ms: u64,
}

impl CountUp {
    pub fn new(target: Decimal, decimals: u32) -> Self {
        Self { target, decimals, duration_ms: DEFAULT_DURATION_MS }
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn is_finished(&self, elapsed_ms: u64) -> bool {
        elapsed_ms >= self.duration_ms
    }

    /// Displayed value after `elapsed_ms`, rounded to `decimals`.
    pub fn value_at(&self, elapsed_ms: u64) -> Decimal {
        if self.is_finished(elapsed_ms) {
            return format::round_half_up(self.target, self.decimals);
        }
        let progress = elapsed_ms as f64 / self.duration_ms as f64;
        let eased = Decimal::from_f64(ease_out_cubic(progress)).unwrap_or(Decimal::ONE);
        format::round_half_up(self.target * eased, self.decimals)
    }
}

pub fn ease_out_cubic(progress: f64) -> f64 {
    let clamped = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - clamped).powi(3)
}
