use std::sync::Arc;

use astronav_core::{Scalar, Vec2};

use crate::environment::EnvironmentModel;

/// Converts time intervals between the global coordinate clock and the
/// spacecraft's onboard clock, holding (x, v) locally constant. Also owns
/// the fixed enumeration step `dt_u` and the horizon `t_max`.
pub trait TimePolicy: Send + Sync {
    fn to_proper(&self, dt_u: Scalar, x: Vec2, v: Vec2, t_u: Scalar) -> Scalar;
    fn to_global(&self, dt_p: Scalar, x: Vec2, v: Vec2, t_u: Scalar) -> Scalar;
    fn dt_u(&self) -> Scalar;
    fn t_max(&self) -> Scalar;
}

/// Rectangle-rule accumulation with a fixed quadrature step.
pub struct DilatedTimePolicy {
    env: Arc<dyn EnvironmentModel>,
    t_max: Scalar,
    dt_u: Scalar,
}

const QUAD_STEP: Scalar = 0.01;

impl DilatedTimePolicy {
    pub fn new(env: Arc<dyn EnvironmentModel>, t_max: Scalar, dt_u: Scalar) -> Self {
        Self { env, t_max, dt_u }
    }
}

impl TimePolicy for DilatedTimePolicy {
    fn to_proper(&self, dt_u: Scalar, x: Vec2, v: Vec2, t_u: Scalar) -> Scalar {
        let mut dt_p = 0.0;
        let mut t = t_u;
        while t < t_u + dt_u {
            dt_p += QUAD_STEP * self.env.inv_gamma(x, v, t);
            t += QUAD_STEP;
        }
        dt_p
    }

    fn to_global(&self, dt_p: Scalar, x: Vec2, v: Vec2, t_u: Scalar) -> Scalar {
        let mut dt_g = 0.0;
        let mut t = t_u;
        while dt_g < dt_p {
            dt_g += QUAD_STEP * self.env.gamma(x, v, t);
            t += QUAD_STEP;
        }
        dt_g
    }

    #[inline] fn dt_u(&self) -> Scalar { self.dt_u }
    #[inline] fn t_max(&self) -> Scalar { self.t_max }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::NewtonianEnvironment;
    use astronav_core::{vec2, BodyId};
    use astronav_world::{CelestialBody, Motion, WorldData};

    fn policy(mass: Scalar) -> DilatedTimePolicy {
        let body =
            CelestialBody::new(BodyId(0), 1.0, mass, Motion::Fixed(vec2(0.0, 0.0))).unwrap();
        let world = Arc::new(WorldData::new(vec![body], vec![], vec![], 1e9).unwrap());
        let env = Arc::new(NewtonianEnvironment::new(world));
        DilatedTimePolicy::new(env, 100.0, 1.0)
    }

    #[test]
    fn flat_spacetime_is_near_identity() {
        let tp = policy(1.0);
        let far = vec2(1e6, 0.0);
        let dt_p = tp.to_proper(1.0, far, Vec2::ZERO, 0.0);
        assert!((dt_p - 1.0).abs() < 1e-9);
        let dt_g = tp.to_global(1.0, far, Vec2::ZERO, 0.0);
        assert!((dt_g - 1.0).abs() < 0.011);
    }

    #[test]
    fn proper_time_contracts_in_a_deep_well() {
        let tp = policy(1e30);
        let dt_p = tp.to_proper(1.0, vec2(5.0, 0.0), vec2(50.0, 0.0), 0.0);
        assert!(dt_p < 1.0);
        assert!(dt_p > 0.0);
    }

    #[test]
    fn conversions_roughly_invert() {
        let tp = policy(1e29);
        let x = vec2(20.0, 0.0);
        let v = vec2(10.0, 0.0);
        let dt_p = tp.to_proper(1.0, x, v, 0.0);
        let dt_g = tp.to_global(dt_p, x, v, 0.0);
        // quadrature step bounds the round-trip error
        assert!((dt_g - 1.0).abs() < 0.05);
    }

    #[test]
    fn exposes_step_and_horizon() {
        let tp = policy(1.0);
        assert_eq!(tp.dt_u(), 1.0);
        assert_eq!(tp.t_max(), 100.0);
    }
}
