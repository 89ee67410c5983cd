use std::collections::BTreeSet;

use astronav_core::{ArtifactId, PlanError, PlanResult, Scalar, Vec2};

/// Continuous planning state plus the discrete collected-artifact set.
/// Values are immutable; successors are freshly constructed.
#[derive(Clone, Debug, PartialEq)]
pub struct StateVertex {
    pub x: Vec2,
    pub v: Vec2,
    pub t_u: Scalar,
    pub fuel: Scalar,
    pub collected: BTreeSet<ArtifactId>,
}

impl StateVertex {
    pub fn new(x: Vec2, v: Vec2, t_u: Scalar, fuel: Scalar) -> Self {
        Self { x, v, t_u, fuel, collected: BTreeSet::new() }
    }

    /// State invariant: finite components, non-negative fuel and time.
    /// Horizon and radius bounds are the action model's checks.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.v.is_finite()
            && self.t_u.is_finite()
            && self.fuel.is_finite()
            && self.fuel >= 0.0
            && self.t_u >= 0.0
    }
}

/// Integer-binned identity of a state. Two continuous states sharing a key
/// are the same planning node; this is the only identity the visited set
/// and parent map ever see.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DiscreteState {
    pub qx: [i64; 2],
    pub qv: [i64; 2],
    pub qt: i64,
    pub qf: i64,
    pub collected: BTreeSet<ArtifactId>,
}

/// Folds the continuous manifold into finite bins via round(value / bin).
/// Rounding to i64 sidesteps float hashing entirely: -0.0 rounds to bin 0
/// and NaN is rejected up front.
#[derive(Clone, Debug)]
pub struct Quantizer {
    pub pos_bin: Scalar,
    pub vel_bin: Scalar,
    pub time_bin: Scalar,
    pub fuel_bin: Scalar,
}

impl Quantizer {
    pub fn new(
        pos_bin: Scalar,
        vel_bin: Scalar,
        time_bin: Scalar,
        fuel_bin: Scalar,
    ) -> PlanResult<Self> {
        for (name, bin) in [
            ("pos_bin", pos_bin),
            ("vel_bin", vel_bin),
            ("time_bin", time_bin),
            ("fuel_bin", fuel_bin),
        ] {
            if !(bin > 0.0) {
                return Err(PlanError::config(format!("{name} must be positive")));
            }
        }
        Ok(Self { pos_bin, vel_bin, time_bin, fuel_bin })
    }

    pub fn quantize(&self, sv: &StateVertex) -> DiscreteState {
        DiscreteState {
            qx: [bin(sv.x.x, self.pos_bin), bin(sv.x.y, self.pos_bin)],
            qv: [bin(sv.v.x, self.vel_bin), bin(sv.v.y, self.vel_bin)],
            qt: bin(sv.t_u, self.time_bin),
            qf: bin(sv.fuel, self.fuel_bin),
            collected: sv.collected.clone(),
        }
    }
}

#[inline]
fn bin(value: Scalar, bin: Scalar) -> i64 {
    debug_assert!(value.is_finite(), "quantizer fed a non-finite value");
    (value / bin).round() as i64
}
