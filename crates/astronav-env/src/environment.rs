use std::sync::Arc;

use astronav_core::{Scalar, Vec2, EPS, GRAV_CONST, LIGHT_SPEED};
use astronav_world::WorldData;

/// Field queries the dynamics integrate against. `gamma` is the
/// weak-field time-rate factor dt_global / dt_proper.
pub trait EnvironmentModel: Send + Sync {
    fn gravity(&self, x: Vec2, t_u: Scalar) -> Vec2;
    fn potential(&self, x: Vec2, t_u: Scalar) -> Scalar;
    fn gamma(&self, x: Vec2, v: Vec2, t_u: Scalar) -> Scalar;
    fn inv_gamma(&self, x: Vec2, v: Vec2, t_u: Scalar) -> Scalar;
}

/// Superposed point-mass fields with a Schwarzschild-like weak-field clock
/// rate. Denominators are EPS-softened so body centers do not blow up;
/// that softening is numerical, not a physical cutoff.
pub struct NewtonianEnvironment {
    world: Arc<WorldData>,
}

impl NewtonianEnvironment {
    pub fn new(world: Arc<WorldData>) -> Self {
        Self { world }
    }
}

impl EnvironmentModel for NewtonianEnvironment {
    fn gravity(&self, x: Vec2, t_u: Scalar) -> Vec2 {
        let mut a = Vec2::ZERO;
        for body in self.world.bodies() {
            let r = body.pos(t_u) - x;
            let d = r.length();
            a += r * (GRAV_CONST * body.mass / (d * d * d + EPS));
        }
        a
    }

    fn potential(&self, x: Vec2, t_u: Scalar) -> Scalar {
        let mut phi = 0.0;
        for body in self.world.bodies() {
            let d = (body.pos(t_u) - x).length();
            phi += GRAV_CONST * body.mass / (d + EPS);
        }
        -phi
    }

    fn gamma(&self, x: Vec2, v: Vec2, t_u: Scalar) -> Scalar {
        1.0 / self.inv_gamma(x, v, t_u)
    }

    fn inv_gamma(&self, x: Vec2, v: Vec2, t_u: Scalar) -> Scalar {
        let c2 = LIGHT_SPEED * LIGHT_SPEED;
        let phi = self.potential(x, t_u);
        1.0 + phi / c2 - v.length_squared() / (2.0 * c2)
    }
}
