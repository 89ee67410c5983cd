use glam::{DMat3, DVec2, DVec3};

use crate::error::{PlanError, PlanResult};
use crate::scalar::{Scalar, EPS};

/// All spatial quantities are double-precision 2-vectors; affine maps are 3x3.
pub type Vec2 = DVec2;
pub type Affine2 = DMat3;

#[inline] pub fn vec2(x: Scalar, y: Scalar) -> Vec2 { Vec2::new(x, y) }

/// Canonical 2D rotation embedded as a 3x3 affine with no translation.
#[inline]
pub fn rotate2d(angle_rad: Scalar) -> Affine2 {
    Affine2::from_angle(angle_rad)
}

#[inline]
pub fn translate2d(tx: Scalar, ty: Scalar) -> Affine2 {
    Affine2::from_translation(Vec2::new(tx, ty))
}

/// Append the trailing 1 for affine transforms.
#[inline] pub fn to_homogeneous(v: Vec2) -> DVec3 { DVec3::new(v.x, v.y, 1.0) }

/// Drop the trailing coordinate again.
#[inline] pub fn from_homogeneous(h: DVec3) -> Vec2 { Vec2::new(h.x, h.y) }

/// p-norm of a 2-vector.
pub fn normp(v: Vec2, p: i32) -> Scalar {
    let p = p as Scalar;
    (v.x.abs().powf(p) + v.y.abs().powf(p)).powf(1.0 / p)
}

/// Unit vector, or the zero-vector error when the norm is below EPS.
pub fn normalized(v: Vec2) -> PlanResult<Vec2> {
    let n = v.length();
    if n < EPS {
        return Err(PlanError::ZeroVector);
    }
    Ok(v / n)
}

/// Heading of a 2-vector in radians, range [-π, π].
#[inline]
pub fn angle_of(v: Vec2) -> Scalar {
    v.y.atan2(v.x)
}

/// Sum of the main diagonal. glam stops at transpose; the planner's few
/// matrix identities want this too.
#[inline]
pub fn trace(m: &Affine2) -> Scalar {
    m.x_axis.x + m.y_axis.y + m.z_axis.z
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::{FRAC_PI_2, PI};

    fn apply(m: Affine2, v: Vec2) -> Vec2 {
        from_homogeneous(m * to_homogeneous(v))
    }

    #[test]
    fn homogeneous_round_trip_is_identity() {
        let v = vec2(3.25, -7.5);
        assert_eq!(from_homogeneous(to_homogeneous(v)), v);
    }

    #[test]
    fn rotations_compose_additively() {
        let a = 0.7;
        let b = 1.9;
        let composed = rotate2d(a) * rotate2d(b);
        let direct = rotate2d(a + b);
        let v = vec2(1.0, 2.0);
        assert!((apply(composed, v) - apply(direct, v)).length() < 1e-10);
    }

    #[test]
    fn rotate2d_quarter_turn() {
        let r = rotate2d(FRAC_PI_2);
        let v = apply(r, vec2(1.0, 0.0));
        assert!((v - vec2(0.0, 1.0)).length() < 1e-12);
        let w = apply(rotate2d(PI), vec2(1.0, 0.0));
        assert!((w - vec2(-1.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn translate2d_moves_points() {
        let t = translate2d(2.0, -3.0);
        assert_eq!(apply(t, vec2(1.0, 1.0)), vec2(3.0, -2.0));
    }

    #[test]
    fn normp_matches_euclidean_for_p2() {
        let v = vec2(3.0, 4.0);
        assert!((normp(v, 2) - 5.0).abs() < 1e-12);
        assert!((normp(v, 1) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn angle_of_covers_all_quadrants() {
        assert!((angle_of(vec2(1.0, 0.0)) - 0.0).abs() < 1e-12);
        assert!((angle_of(vec2(0.0, 1.0)) - FRAC_PI_2).abs() < 1e-12);
        assert!((angle_of(vec2(-1.0, 0.0)).abs() - PI).abs() < 1e-12);
        assert!((angle_of(vec2(0.0, -1.0)) + FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn trace_of_a_rotation_is_one_plus_twice_cosine() {
        let theta = 0.4;
        let t = trace(&rotate2d(theta));
        assert!((t - (1.0 + 2.0 * theta.cos())).abs() < 1e-12);
        assert!((trace(&Affine2::IDENTITY) - 3.0).abs() < 1e-12);
        assert_eq!(trace(&Affine2::ZERO), 0.0);
    }

    #[test]
    fn normalized_rejects_zero() {
        assert!(matches!(normalized(Vec2::ZERO), Err(PlanError::ZeroVector)));
        let u = normalized(vec2(0.0, 2.0)).unwrap();
        assert!((u - vec2(0.0, 1.0)).length() < 1e-12);
    }
}
