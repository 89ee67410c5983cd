use std::sync::Arc;

use astronav_core::{ArtifactId, BodyId, Scalar, Vec2, WormholeId};

use crate::data::WorldData;

/// Radius queries against the world at a given global time. Results come
/// back as id handles in arena order, so scans stay deterministic on ties.
pub trait WorldIndex: Send + Sync {
    fn query_bodies(&self, x: Vec2, radius: Scalar, t_u: Scalar) -> Vec<BodyId>;
    fn query_wormholes(&self, x: Vec2, radius: Scalar, t_u: Scalar) -> Vec<WormholeId>;
    fn query_artifacts(&self, x: Vec2, radius: Scalar, t_u: Scalar) -> Vec<ArtifactId>;
}

/// Reference linear scan. Body positions are sampled at `t_u`; wormhole
/// entries and artifacts are static.
pub struct LinearIndex {
    world: Arc<WorldData>,
}

impl LinearIndex {
    pub fn new(world: Arc<WorldData>) -> Self {
        Self { world }
    }
}

impl WorldIndex for LinearIndex {
    fn query_bodies(&self, x: Vec2, radius: Scalar, t_u: Scalar) -> Vec<BodyId> {
        self.world
            .bodies()
            .iter()
            .filter(|b| (b.pos(t_u) - x).length() <= radius)
            .map(|b| b.id)
            .collect()
    }

    fn query_wormholes(&self, x: Vec2, radius: Scalar, _t_u: Scalar) -> Vec<WormholeId> {
        self.world
            .wormholes()
            .iter()
            .filter(|w| (w.entry - x).length() <= radius)
            .map(|w| w.id)
            .collect()
    }

    fn query_artifacts(&self, x: Vec2, radius: Scalar, _t_u: Scalar) -> Vec<ArtifactId> {
        self.world
            .artifacts()
            .iter()
            .filter(|a| (a.position - x).length() <= radius)
            .map(|a| a.id)
            .collect()
    }
}

/// Uniform grid over the static entities (artifacts, wormhole entries),
/// keyed by cell like a tile cache; a BTreeMap keeps cell walks ordered.
/// Bodies move, so they stay a linear scan. Query results are identical to
/// `LinearIndex`, including order on ties.
pub struct GridIndex {
    world: Arc<WorldData>,
    cell: Scalar,
    artifact_cells: std::collections::BTreeMap<(i64, i64), Vec<usize>>,
    wormhole_cells: std::collections::BTreeMap<(i64, i64), Vec<usize>>,
}

impl GridIndex {
    pub fn new(world: Arc<WorldData>, cell: Scalar) -> Self {
        let mut artifact_cells = std::collections::BTreeMap::new();
        for (i, a) in world.artifacts().iter().enumerate() {
            artifact_cells
                .entry(cell_of(a.position, cell))
                .or_insert_with(Vec::new)
                .push(i);
        }
        let mut wormhole_cells = std::collections::BTreeMap::new();
        for (i, w) in world.wormholes().iter().enumerate() {
            wormhole_cells
                .entry(cell_of(w.entry, cell))
                .or_insert_with(Vec::new)
                .push(i);
        }
        Self { world, cell, artifact_cells, wormhole_cells }
    }

    /// Arena indices of candidates in the cells touching the query disc,
    /// restored to arena order so ties match the linear scan.
    fn candidates(
        &self,
        cells: &std::collections::BTreeMap<(i64, i64), Vec<usize>>,
        x: Vec2,
        radius: Scalar,
    ) -> Vec<usize> {
        let (cx0, cy0) = cell_of(x - Vec2::splat(radius), self.cell);
        let (cx1, cy1) = cell_of(x + Vec2::splat(radius), self.cell);
        let mut out = Vec::new();
        for cx in cx0..=cx1 {
            for cy in cy0..=cy1 {
                if let Some(members) = cells.get(&(cx, cy)) {
                    out.extend_from_slice(members);
                }
            }
        }
        out.sort_unstable();
        out
    }
}

#[inline]
fn cell_of(p: Vec2, cell: Scalar) -> (i64, i64) {
    ((p.x / cell).floor() as i64, (p.y / cell).floor() as i64)
}

impl WorldIndex for GridIndex {
    fn query_bodies(&self, x: Vec2, radius: Scalar, t_u: Scalar) -> Vec<BodyId> {
        self.world
            .bodies()
            .iter()
            .filter(|b| (b.pos(t_u) - x).length() <= radius)
            .map(|b| b.id)
            .collect()
    }

    fn query_wormholes(&self, x: Vec2, radius: Scalar, _t_u: Scalar) -> Vec<WormholeId> {
        let wormholes = self.world.wormholes();
        self.candidates(&self.wormhole_cells, x, radius)
            .into_iter()
            .filter(|&i| (wormholes[i].entry - x).length() <= radius)
            .map(|i| wormholes[i].id)
            .collect()
    }

    fn query_artifacts(&self, x: Vec2, radius: Scalar, _t_u: Scalar) -> Vec<ArtifactId> {
        let artifacts = self.world.artifacts();
        self.candidates(&self.artifact_cells, x, radius)
            .into_iter()
            .filter(|&i| (artifacts[i].position - x).length() <= radius)
            .map(|i| artifacts[i].id)
            .collect()
    }
}
