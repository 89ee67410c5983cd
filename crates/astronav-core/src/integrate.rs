use core::ops::{Add, Mul};

use crate::scalar::Scalar;

/// Anything RK4 can integrate: a vector space over f64.
pub trait PhaseSpace: Copy + Add<Output = Self> + Mul<Scalar, Output = Self> {}

impl<T> PhaseSpace for T where T: Copy + Add<Output = T> + Mul<Scalar, Output = T> {}

/// One classical Runge-Kutta step of size `dt` starting at `(x0, t)`.
///
/// Stages are evaluated at `(x0, t)`, `(x0 + k1*dt/2, t + dt/2)`,
/// `(x0 + k2*dt/2, t + dt/2)`, `(x0 + k3*dt, t + dt)`; the result is
/// `x0 + (k1 + 2k2 + 2k3 + k4) * dt/6`.
pub fn rk4<S, F>(x0: S, t: Scalar, dt: Scalar, f: F) -> S
where
    S: PhaseSpace,
    F: Fn(&S, Scalar) -> S,
{
    let half = dt * 0.5;
    let k1 = f(&x0, t);
    let k2 = f(&(x0 + k1 * half), t + half);
    let k3 = f(&(x0 + k2 * half), t + half);
    let k4 = f(&(x0 + k3 * dt), t + dt);
    x0 + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0)
}
