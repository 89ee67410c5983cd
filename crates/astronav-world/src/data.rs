use astronav_core::{ArtifactId, BodyId, PlanError, PlanResult, Scalar, WormholeId};

use crate::entities::{Artifact, CelestialBody, Wormhole};

/// Owns every entity for the lifetime of a run. Entities are immutable once
/// built; everything downstream refers to them by id.
pub struct WorldData {
    bodies: Vec<CelestialBody>,
    wormholes: Vec<Wormhole>,
    artifacts: Vec<Artifact>,
    max_radius: Scalar,
}

impl WorldData {
    pub fn new(
        bodies: Vec<CelestialBody>,
        wormholes: Vec<Wormhole>,
        artifacts: Vec<Artifact>,
        max_radius: Scalar,
    ) -> PlanResult<Self> {
        if max_radius <= 0.0 {
            return Err(PlanError::config("universe radius must be positive"));
        }
        check_unique("body", bodies.iter().map(|b| b.id.0))?;
        check_unique("wormhole", wormholes.iter().map(|w| w.id.0))?;
        check_unique("artifact", artifacts.iter().map(|a| a.id.0))?;
        Ok(Self { bodies, wormholes, artifacts, max_radius })
    }

    #[inline] pub fn bodies(&self) -> &[CelestialBody] { &self.bodies }
    #[inline] pub fn wormholes(&self) -> &[Wormhole] { &self.wormholes }
    #[inline] pub fn artifacts(&self) -> &[Artifact] { &self.artifacts }
    #[inline] pub fn max_radius(&self) -> Scalar { self.max_radius }

    pub fn body(&self, id: BodyId) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn wormhole(&self, id: WormholeId) -> Option<&Wormhole> {
        self.wormholes.iter().find(|w| w.id == id)
    }

    pub fn artifact(&self, id: ArtifactId) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.id == id)
    }

    /// Largest body radius, 0 for an empty universe. Used to size the
    /// collision query window.
    pub fn max_body_radius(&self) -> Scalar {
        self.bodies.iter().map(|b| b.radius).fold(0.0, Scalar::max)
    }
}

fn check_unique(kind: &str, ids: impl Iterator<Item = u32>) -> PlanResult<()> {
    let mut seen: Vec<u32> = ids.collect();
    seen.sort_unstable();
    if seen.windows(2).any(|w| w[0] == w[1]) {
        return Err(PlanError::config(format!("duplicate {kind} id")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Motion;
    use astronav_core::vec2;

    fn body(id: u32, r: Scalar) -> CelestialBody {
        CelestialBody::new(BodyId(id), r, 1.0, Motion::Fixed(vec2(id as Scalar, 0.0))).unwrap()
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = WorldData::new(vec![body(1, 1.0), body(1, 2.0)], vec![], vec![], 10.0);
        assert!(err.is_err());
    }

    #[test]
    fn rejects_non_positive_radius() {
        assert!(WorldData::new(vec![], vec![], vec![], 0.0).is_err());
    }

    #[test]
    fn id_lookup_and_max_body_radius() {
        let w = WorldData::new(vec![body(3, 1.0), body(7, 2.5)], vec![], vec![], 10.0).unwrap();
        assert!(w.body(BodyId(7)).is_some());
        assert!(w.body(BodyId(4)).is_none());
        assert_eq!(w.max_body_radius(), 2.5);
        let empty = WorldData::new(vec![], vec![], vec![], 10.0).unwrap();
        assert_eq!(empty.max_body_radius(), 0.0);
    }
}
