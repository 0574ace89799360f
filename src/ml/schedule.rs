// ============================================================
// Layer 5 — Learning-Rate Schedule
// ============================================================
// Linear warmup followed by linear decay, the schedule used
// for transformer fine-tuning:
//
//   lr
//   base ┤        /\
//        │       /  \
//        │      /    \
//      0 ┤_____/      \_____
//        └────┴────────┴──── step
//          warmup    total
//
// The optimizer in this crate takes the learning rate as an
// argument at every step, so the schedule is a pure function
// of the step counter and needs no framework hooks.

#[derive(Debug, Clone, Copy)]
pub struct LinearWarmupSchedule {
    base_lr: f64,
    warmup_steps: usize,
    total_steps: usize,
}

impl LinearWarmupSchedule {
    pub fn new(base_lr: f64, warmup_steps: usize, total_steps: usize) -> Self {
        Self { base_lr, warmup_steps, total_steps }
    }

    /// Learning rate for the given 0-based optimizer step.
    ///
    /// Ramps from base_lr/warmup_steps up to base_lr over the
    /// warmup phase, then decays linearly to zero at total_steps.
    /// Short runs where warmup covers the whole run stay in the
    /// ramp the entire time and never exceed base_lr.
    pub fn lr_at(&self, step: usize) -> f64 {
        if self.warmup_steps > 0 && step < self.warmup_steps {
            return self.base_lr * (step + 1) as f64 / self.warmup_steps as f64;
        }
        if self.total_steps <= self.warmup_steps {
            return self.base_lr;
        }
        let remaining = self.total_steps.saturating_sub(step) as f64;
        let decay_span = (self.total_steps - self.warmup_steps) as f64;
        self.base_lr * (remaining / decay_span).clamp(0.0, 1.0)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warmup_ramps_linearly_to_base() {
        let s = LinearWarmupSchedule::new(1.0, 4, 10);
        assert!((s.lr_at(0) - 0.25).abs() < 1e-12);
        assert!((s.lr_at(1) - 0.50).abs() < 1e-12);
        assert!((s.lr_at(3) - 1.00).abs() < 1e-12);
    }

    #[test]
    fn decays_to_zero_at_total_steps() {
        let s = LinearWarmupSchedule::new(1.0, 4, 10);
        assert!(s.lr_at(4) < 1.0 + 1e-12);
        assert!(s.lr_at(9) > 0.0);
        assert_eq!(s.lr_at(10), 0.0);
        assert_eq!(s.lr_at(50), 0.0);
    }

    #[test]
    fn never_exceeds_base_lr() {
        let s = LinearWarmupSchedule::new(5e-5, 500, 2000);
        for step in 0..2200 {
            assert!(s.lr_at(step) <= 5e-5 + 1e-18);
        }
    }

    #[test]
    fn short_run_stays_inside_warmup() {
        // Fewer total steps than warmup steps — tiny datasets
        let s = LinearWarmupSchedule::new(1.0, 500, 10);
        assert!(s.lr_at(0) > 0.0);
        assert!(s.lr_at(9) <= 1.0);
    }

    #[test]
    fn zero_warmup_starts_at_base() {
        let s = LinearWarmupSchedule::new(1.0, 0, 10);
        assert_eq!(s.lr_at(0), 1.0);
        assert_eq!(s.lr_at(10), 0.0);
    }
}
