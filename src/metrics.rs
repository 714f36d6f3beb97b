use rand::Rng;

use crate::ledger::FinancialSnapshot;

/// Cosmetic API-latency readout: a clamped random walk, nothing more.
pub struct LatencyMeter {
    ms: f64,
    floor: f64,
    ceil: f64,
    step: f64,
}

impl LatencyMeter {
    pub fn new() -> Self {
        Self { ms: 12.0, floor: 8.0, ceil: 45.0, step: 10.0 }
    }

    pub fn ms(&self) -> f64 {
        self.ms
    }

    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> f64 {
        let half = self.step / 2.0;
        self.ms = (self.ms + rng.gen_range(-half..half)).clamp(self.floor, self.ceil);
        self.ms
    }
}

impl Default for LatencyMeter {
    fn default() -> Self {
        Self::new()
    }
}

/// Fraction of the monthly goal reached, clamped to [0, 1].
pub fn savings_progress(snapshot: &FinancialSnapshot) -> f64 {
    if snapshot.monthly_goal <= 0.0 {
        return 0.0;
    }
    (snapshot.monthly_savings / snapshot.monthly_goal).clamp(0.0, 1.0)
}
