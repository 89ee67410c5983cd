use std::collections::BTreeSet;
use std::ops::{Add, Mul};
use std::sync::Arc;

use astronav_core::{
    from_homogeneous, normp, rk4, rotate2d, safe_div, to_homogeneous, Scalar, Vec2, EPS,
};
use astronav_env::{EnvironmentModel, TimePolicy};
use astronav_world::{Spacecraft, WorldData, WorldIndex};

use crate::state::StateVertex;

/// Planner edges. The only kind so far is a burn (or coast) of one global
/// time step along a fixed unit direction.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Thrust { level: Scalar, dir: Vec2, dt_global: Scalar },
}

impl Action {
    #[inline]
    pub fn cost(&self) -> Scalar {
        match self {
            Action::Thrust { dt_global, .. } => *dt_global,
        }
    }
}

/// Expands a state into a finite action fan-out plus a partial successor
/// function. Infeasible edges come back as None and prune the search tree.
pub trait ActionModel: Send + Sync {
    fn enumerate(&self, from: &StateVertex) -> Vec<Action>;
    fn apply(&self, from: &StateVertex, action: &Action) -> Option<StateVertex>;
}

/// Integrated 4-tuple (x, v, fuel, t_u) advanced over proper time.
#[derive(Copy, Clone, Debug)]
struct ShotState {
    x: Vec2,
    v: Vec2,
    fuel: Scalar,
    t_u: Scalar,
}

impl Add for ShotState {
    type Output = Self;
    fn add(self, o: Self) -> Self {
        Self { x: self.x + o.x, v: self.v + o.v, fuel: self.fuel + o.fuel, t_u: self.t_u + o.t_u }
    }
}

impl Mul<Scalar> for ShotState {
    type Output = Self;
    fn mul(self, k: Scalar) -> Self {
        Self { x: self.x * k, v: self.v * k, fuel: self.fuel * k, t_u: self.t_u * k }
    }
}

pub struct ThrustActionModel {
    env: Arc<dyn EnvironmentModel>,
    time: Arc<dyn TimePolicy>,
    index: Arc<dyn WorldIndex>,
    world: Arc<WorldData>,
    craft: Arc<Spacecraft>,
    capture_radius: Scalar,
}

impl ThrustActionModel {
    pub fn new(
        env: Arc<dyn EnvironmentModel>,
        time: Arc<dyn TimePolicy>,
        index: Arc<dyn WorldIndex>,
        world: Arc<WorldData>,
        craft: Arc<Spacecraft>,
        capture_radius: Scalar,
    ) -> Self {
        Self { env, time, index, world, craft, capture_radius }
    }

    /// Unit heading the fan-out is built around: the velocity direction,
    /// or +x when the craft is at rest.
    fn forward(&self, from: &StateVertex) -> Vec2 {
        let speed = normp(from.v, 2);
        if speed > EPS { from.v / speed } else { Vec2::X }
    }

    fn artifacts_here(&self, x: Vec2, t_u: Scalar) -> BTreeSet<astronav_core::ArtifactId> {
        self.index
            .query_artifacts(x, self.capture_radius, t_u)
            .into_iter()
            .collect()
    }

    fn collides(&self, x: Vec2, t_u: Scalar) -> bool {
        let window = self.world.max_body_radius() + 1.0;
        for id in self.index.query_bodies(x, window, t_u) {
            if let Some(body) = self.world.body(id) {
                if (x - body.pos(t_u)).length() <= body.radius {
                    return true;
                }
            }
        }
        false
    }
}

/// Fingerprint for fan-out dedup; +0.0 and -0.0 collapse before the bit
/// compare so a configured zero thrust level cannot shadow the coast.
#[inline]
fn fingerprint(level: Scalar, dir: Vec2) -> (u64, u64, u64) {
    ((level + 0.0).to_bits(), (dir.x + 0.0).to_bits(), (dir.y + 0.0).to_bits())
}

impl ActionModel for ThrustActionModel {
    fn enumerate(&self, from: &StateVertex) -> Vec<Action> {
        let forward = self.forward(from);
        let dt = self.time.dt_u();

        let mut actions = Vec::with_capacity(
            self.craft.possible_directions.len() * self.craft.thrust_levels.len() + 1,
        );
        let mut seen: Vec<(u64, u64, u64)> = Vec::new();
        let mut push = |actions: &mut Vec<Action>, level: Scalar, dir: Vec2| {
            let fp = fingerprint(level, dir);
            if !seen.contains(&fp) {
                seen.push(fp);
                actions.push(Action::Thrust { level, dir, dt_global: dt });
            }
        };

        for &theta in &self.craft.possible_directions {
            let dir = from_homogeneous(rotate2d(theta) * to_homogeneous(forward));
            for &level in &self.craft.thrust_levels {
                push(&mut actions, level, dir);
            }
        }
        // coast is always on the menu, last
        push(&mut actions, 0.0, forward);

        actions
    }

    fn apply(&self, from: &StateVertex, action: &Action) -> Option<StateVertex> {
        let Action::Thrust { level, dir, dt_global } = action;
        let (level, dir) = (*level, *dir);

        let dt_p = self.time.to_proper(*dt_global, from.x, from.v, from.t_u);

        let s0 = ShotState { x: from.x, v: from.v, fuel: from.fuel, t_u: from.t_u };
        let mass = self.craft.mass;
        let exhaust = self.craft.exhaust_velocity;
        let deriv = |s: &ShotState, _tau: Scalar| {
            let g = self.env.gamma(s.x, s.v, s.t_u);
            let a_grav = self.env.gravity(s.x, s.t_u);
            let a_thrust = if s.fuel > 0.0 {
                dir * (level / (mass + s.fuel))
            } else {
                Vec2::ZERO
            };
            ShotState {
                x: s.v * g,
                v: (a_grav + a_thrust) * g,
                fuel: safe_div(-level, exhaust, 0.0),
                t_u: g,
            }
        };

        let mut s1 = rk4(s0, 0.0, dt_p, deriv);
        s1.fuel = s1.fuel.max(0.0);

        let mut collected = from.collected.clone();
        collected.extend(self.artifacts_here(s1.x, s1.t_u));

        let next = StateVertex { x: s1.x, v: s1.v, t_u: s1.t_u, fuel: s1.fuel, collected };

        if !next.is_valid()
            || self.collides(next.x, next.t_u)
            || next.t_u > self.time.t_max()
            || next.x.length() > self.world.max_radius()
        {
            return None;
        }

        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astronav_core::{vec2, ArtifactId, BodyId};
    use astronav_env::{DilatedTimePolicy, NewtonianEnvironment};
    use astronav_world::{Artifact, CelestialBody, LinearIndex, Motion};

    struct Fixture {
        model: ThrustActionModel,
    }

    fn fixture(
        bodies: Vec<CelestialBody>,
        artifacts: Vec<Artifact>,
        max_radius: Scalar,
        t_max: Scalar,
        dt_u: Scalar,
        thrust_levels: Vec<Scalar>,
        directions: Vec<Scalar>,
    ) -> Fixture {
        let world = Arc::new(WorldData::new(bodies, vec![], artifacts, max_radius).unwrap());
        let env: Arc<dyn EnvironmentModel> = Arc::new(NewtonianEnvironment::new(world.clone()));
        let time: Arc<dyn TimePolicy> =
            Arc::new(DilatedTimePolicy::new(env.clone(), t_max, dt_u));
        let index: Arc<dyn WorldIndex> = Arc::new(LinearIndex::new(world.clone()));
        let craft = Arc::new(
            Spacecraft::new(1.0, 10.0, 0.0, thrust_levels, 5.0, directions).unwrap(),
        );
        Fixture {
            model: ThrustActionModel::new(env, time, index, world, craft, EPS),
        }
    }

    fn far_body() -> CelestialBody {
        CelestialBody::new(BodyId(0), 1.0, 1.0, Motion::Fixed(vec2(1e8, 1e8))).unwrap()
    }

    #[test]
    fn fan_out_cardinality_and_coast_last() {
        let f = fixture(
            vec![far_body()],
            vec![],
            1e9,
            100.0,
            1.0,
            vec![1.0, 2.0],
            vec![0.5, -0.5],
        );
        let from = StateVertex::new(vec2(0.0, 0.0), vec2(1.0, 0.0), 0.0, 10.0);
        let actions = f.model.enumerate(&from);
        assert_eq!(actions.len(), 2 * 2 + 1);
        let Action::Thrust { level, dir, .. } = actions.last().unwrap();
        assert_eq!(*level, 0.0);
        assert!((*dir - vec2(1.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn zero_level_and_zero_direction_do_not_duplicate_coast() {
        let f = fixture(
            vec![far_body()],
            vec![],
            1e9,
            100.0,
            1.0,
            vec![0.0, 1.0],
            vec![0.0],
        );
        let from = StateVertex::new(vec2(0.0, 0.0), vec2(1.0, 0.0), 0.0, 10.0);
        let actions = f.model.enumerate(&from);
        // (0, fwd), (1, fwd); the appended coast collapses into the first
        assert_eq!(actions.len(), 2);
    }

    #[test]
    fn rest_state_uses_x_axis_heading() {
        let f = fixture(vec![far_body()], vec![], 1e9, 100.0, 1.0, vec![1.0], vec![]);
        let from = StateVertex::new(vec2(0.0, 0.0), vec2(0.0, 0.0), 0.0, 10.0);
        let actions = f.model.enumerate(&from);
        assert_eq!(actions.len(), 1);
        let Action::Thrust { dir, .. } = &actions[0];
        assert!((*dir - vec2(1.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn coast_advances_time_and_position() {
        let f = fixture(vec![far_body()], vec![], 1e9, 100.0, 1.0, vec![0.0], vec![]);
        let from = StateVertex::new(vec2(0.0, 0.0), vec2(2.0, 0.0), 0.0, 5.0);
        let coast = Action::Thrust { level: 0.0, dir: vec2(1.0, 0.0), dt_global: 1.0 };
        let next = f.model.apply(&from, &coast).unwrap();
        assert!((next.t_u - 1.0).abs() < 1e-6);
        assert!((next.x - vec2(2.0, 0.0)).length() < 1e-6);
        assert!((next.fuel - 5.0).abs() < 1e-9);
    }

    #[test]
    fn burning_spends_fuel_and_accelerates() {
        let f = fixture(vec![far_body()], vec![], 1e9, 100.0, 1.0, vec![2.0], vec![]);
        let from = StateVertex::new(vec2(0.0, 0.0), vec2(1.0, 0.0), 0.0, 10.0);
        let burn = Action::Thrust { level: 2.0, dir: vec2(1.0, 0.0), dt_global: 1.0 };
        let next = f.model.apply(&from, &burn).unwrap();
        assert!(next.v.x > from.v.x);
        // dfuel/dtau = -2/5 over ~1s of proper time
        assert!((next.fuel - (10.0 - 0.4)).abs() < 1e-3);
    }

    #[test]
    fn empty_tank_coasts_even_under_thrust() {
        let f = fixture(vec![far_body()], vec![], 1e9, 100.0, 1.0, vec![3.0], vec![]);
        let from = StateVertex::new(vec2(0.0, 0.0), vec2(1.0, 0.0), 0.0, 0.0);
        let burn = Action::Thrust { level: 3.0, dir: vec2(1.0, 0.0), dt_global: 1.0 };
        let next = f.model.apply(&from, &burn).unwrap();
        // no acceleration without propellant, and fuel clamps at zero
        assert!((next.v.x - 1.0).abs() < 1e-6);
        assert_eq!(next.fuel, 0.0);
    }

    #[test]
    fn collision_with_a_body_prunes_the_edge() {
        let wall =
            CelestialBody::new(BodyId(0), 1.0, 1.0, Motion::Fixed(vec2(5.0, 0.0))).unwrap();
        let f = fixture(vec![wall], vec![], 1e9, 100.0, 1.0, vec![0.0], vec![]);
        let from = StateVertex::new(vec2(0.0, 0.0), vec2(5.0, 0.0), 0.0, 0.0);
        let coast = Action::Thrust { level: 0.0, dir: vec2(1.0, 0.0), dt_global: 1.0 };
        assert!(f.model.apply(&from, &coast).is_none());
    }

    #[test]
    fn horizon_overshoot_prunes_the_edge() {
        let f = fixture(vec![far_body()], vec![], 1e9, 1.0, 2.0, vec![0.0], vec![]);
        let from = StateVertex::new(vec2(0.0, 0.0), vec2(1.0, 0.0), 0.0, 0.0);
        let coast = Action::Thrust { level: 0.0, dir: vec2(1.0, 0.0), dt_global: 2.0 };
        assert!(f.model.apply(&from, &coast).is_none());
    }

    #[test]
    fn escape_beyond_universe_radius_prunes_the_edge() {
        let f = fixture(vec![far_body()], vec![], 10.0, 100.0, 1.0, vec![0.0], vec![]);
        let from = StateVertex::new(vec2(9.0, 0.0), vec2(5.0, 0.0), 0.0, 0.0);
        let coast = Action::Thrust { level: 0.0, dir: vec2(1.0, 0.0), dt_global: 1.0 };
        assert!(f.model.apply(&from, &coast).is_none());
    }

    #[test]
    fn passing_over_an_artifact_collects_it() {
        let f = fixture(
            vec![far_body()],
            vec![Artifact::new(ArtifactId(7), vec2(1.0, 0.0))],
            1e9,
            100.0,
            1.0,
            vec![0.0],
            vec![],
        );
        let from = StateVertex::new(vec2(0.0, 0.0), vec2(1.0, 0.0), 0.0, 0.0);
        let coast = Action::Thrust { level: 0.0, dir: vec2(1.0, 0.0), dt_global: 1.0 };
        let next = f.model.apply(&from, &coast).unwrap();
        assert!(next.collected.contains(&ArtifactId(7)));
    }
}
