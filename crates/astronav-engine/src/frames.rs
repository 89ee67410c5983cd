use std::collections::BTreeSet;

use astronav_core::{ArtifactId, Scalar, Vec2};

/// Read-only per-step snapshots handed to the consumer (graphics layer).

#[derive(Clone, Debug)]
pub struct ShipFrame {
    pub x: Vec2,
    pub v: Vec2,
    pub fuel: Scalar,
    /// Onboard clock, accumulated along the flown path.
    pub t_p: Scalar,
    pub collected: BTreeSet<ArtifactId>,
}

#[derive(Clone, Debug)]
pub struct BodyFrame {
    pub id: u32,
    pub x: Vec2,
    pub v: Vec2,
    pub radius: Scalar,
    pub mass: Scalar,
}

#[derive(Clone, Debug)]
pub struct WormholeFrame {
    pub id: u32,
    pub entry: Vec2,
    pub exit: Vec2,
    pub t_open: Scalar,
    pub t_close: Scalar,
    pub open: bool,
}

#[derive(Clone, Debug)]
pub struct ArtifactFrame {
    pub id: u32,
    pub position: Vec2,
}

#[derive(Clone, Debug)]
pub struct WorldFrame {
    pub t_u: Scalar,
    pub ship: ShipFrame,
    pub bodies: Vec<BodyFrame>,
    pub wormholes: Vec<WormholeFrame>,
    pub artifacts: Vec<ArtifactFrame>,
}
