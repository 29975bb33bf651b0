//! Charm pricing: snaps a converted price to the nearest attractive ending.
//!
//! | magnitude ≥ | step | ending |
//! |---|---|---|
//! | 1000 | 1000 | 990 |
//! | 100 | 100 | 99 |
//! | 10 | 10 | 9 |
//! | below 10 | | nearest integer |
//!
//! A rounded price always stays in the tier of its input, which keeps the
//! rounding idempotent: `1000` becomes `1990` rather than `990`, and `9.7`
//! becomes `9` rather than `10`.

#[derive(Debug, Clone, Copy)]
struct Tier {
    step: f64,
    tail: f64,
}

const TIERS: [Tier; 3] = [
    Tier {
        step: 1000.0,
        tail: 990.0,
    },
    Tier {
        step: 100.0,
        tail: 99.0,
    },
    Tier {
        step: 10.0,
        tail: 9.0,
    },
];

const INTEGER_TIER_MAX: f64 = 9.0;

impl Tier {
    fn contains(&self, magnitude: f64) -> bool {
        magnitude >= self.step
    }

    /// Anchors are `k * step + tail` with `k >= 1`; ties go to the lower anchor.
    fn nearest_anchor(&self, magnitude: f64) -> f64 {
        let position = (magnitude - self.tail) / self.step;
        let lower = position.floor().max(1.0) * self.step + self.tail;
        let upper = position.ceil().max(1.0) * self.step + self.tail;
        if magnitude - lower <= upper - magnitude {
            lower
        } else {
            upper
        }
    }
}

/// Rounds `value` to its charm price, preserving sign. Non-finite input yields `0`.
///
/// Below 10 the result is the nearest integer capped at 9, so `9.5` and `9.7`
/// give `9` instead of crossing into the tens tier.
pub fn charm_round(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }

    let magnitude = value.abs();
    let rounded = match TIERS.iter().find(|tier| tier.contains(magnitude)) {
        Some(tier) => tier.nearest_anchor(magnitude),
        None => magnitude.round().min(INTEGER_TIER_MAX),
    };

    if rounded == 0.0 {
        0.0
    } else {
        rounded.copysign(value)
    }
}
