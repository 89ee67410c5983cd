pub mod scalar;
pub mod ids;
pub mod types;
pub mod hash;
pub mod error;
pub mod integrate;

pub use scalar::{Scalar, EPS, GRAV_CONST, LIGHT_SPEED, float_eq, safe_div, wrap_angle};
pub use ids::{ArtifactId, BodyId, WormholeId};
pub use types::{
    angle_of, from_homogeneous, normalized, normp, rotate2d, to_homogeneous, trace, translate2d,
    vec2, Affine2, Vec2,
};
pub use hash::{hash_f64, hash_u32, hash_vec2, StepHasher};
pub use error::{PlanError, PlanResult};
pub use integrate::{rk4, PhaseSpace};
