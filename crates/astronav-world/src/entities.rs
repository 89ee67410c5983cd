use astronav_core::{
    from_homogeneous, rotate2d, to_homogeneous, ArtifactId, BodyId, PlanError, PlanResult, Scalar,
    Vec2, WormholeId,
};

/// Parametric ellipse traced at angular rate `omega` from phase `phi`,
/// tilted by `angle` about its own center.
#[derive(Clone, Debug)]
pub struct EllipticalOrbit {
    pub a: Scalar,
    pub b: Scalar,
    pub omega: Scalar,
    pub phi: Scalar,
    pub center: Vec2,
    pub angle: Scalar,
}

impl EllipticalOrbit {
    pub fn new(
        a: Scalar,
        b: Scalar,
        omega: Scalar,
        phi: Scalar,
        center: Vec2,
        angle: Scalar,
    ) -> PlanResult<Self> {
        if a <= 0.0 {
            return Err(PlanError::config("orbit semi-major axis must be positive"));
        }
        if b <= 0.0 {
            return Err(PlanError::config("orbit semi-minor axis must be positive"));
        }
        if omega <= 0.0 {
            return Err(PlanError::config("orbit angular rate must be positive"));
        }
        if !(0.0..core::f64::consts::TAU).contains(&angle) {
            return Err(PlanError::config("orbit tilt angle must lie in [0, 2pi)"));
        }
        Ok(Self { a, b, omega, phi, center, angle })
    }

    pub fn pos(&self, t: Scalar) -> Vec2 {
        let x = self.a * (self.omega * t + self.phi).cos();
        let y = self.b * (self.omega * t + self.phi).sin();
        let rotated = rotate2d(self.angle) * to_homogeneous(Vec2::new(x, y));
        self.center + from_homogeneous(rotated)
    }
}

/// How a celestial body moves through the universe.
#[derive(Clone, Debug)]
pub enum Motion {
    Fixed(Vec2),
    Orbit(EllipticalOrbit),
}

#[derive(Clone, Debug)]
pub struct CelestialBody {
    pub id: BodyId,
    pub radius: Scalar,
    pub mass: Scalar,
    pub motion: Motion,
}

impl CelestialBody {
    pub fn new(id: BodyId, radius: Scalar, mass: Scalar, motion: Motion) -> PlanResult<Self> {
        if radius <= 0.0 {
            return Err(PlanError::config("body radius must be positive"));
        }
        if mass <= 0.0 {
            return Err(PlanError::config("body mass must be positive"));
        }
        Ok(Self { id, radius, mass, motion })
    }

    #[inline]
    pub fn pos(&self, t: Scalar) -> Vec2 {
        match &self.motion {
            Motion::Fixed(p) => *p,
            Motion::Orbit(orbit) => orbit.pos(t),
        }
    }

    /// Forward finite-difference velocity over `delta`.
    #[inline]
    pub fn vel(&self, t: Scalar, delta: Scalar) -> Vec2 {
        match &self.motion {
            Motion::Fixed(_) => Vec2::ZERO,
            Motion::Orbit(_) => (self.pos(t + delta) - self.pos(t)) / delta,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Wormhole {
    pub id: WormholeId,
    pub entry: Vec2,
    pub exit: Vec2,
    pub t_open: Scalar,
    pub t_close: Scalar,
}

impl Wormhole {
    pub fn new(
        id: WormholeId,
        entry: Vec2,
        exit: Vec2,
        t_open: Scalar,
        t_close: Scalar,
    ) -> PlanResult<Self> {
        if t_open >= t_close {
            return Err(PlanError::config("wormhole must open before it closes"));
        }
        Ok(Self { id, entry, exit, t_open, t_close })
    }

    #[inline]
    pub fn is_open(&self, t: Scalar) -> bool {
        t >= self.t_open && t <= self.t_close
    }
}

#[derive(Clone, Debug)]
pub struct Artifact {
    pub id: ArtifactId,
    pub position: Vec2,
}

impl Artifact {
    pub fn new(id: ArtifactId, position: Vec2) -> Self {
        Self { id, position }
    }
}

/// The planned vehicle. `possible_directions` are headings in radians
/// relative to the current velocity direction.
#[derive(Clone, Debug)]
pub struct Spacecraft {
    pub mass: Scalar,
    pub fuel: Scalar,
    pub min_fuel_to_land: Scalar,
    pub thrust_levels: Vec<Scalar>,
    pub exhaust_velocity: Scalar,
    pub possible_directions: Vec<Scalar>,
}

impl Spacecraft {
    pub fn new(
        mass: Scalar,
        fuel: Scalar,
        min_fuel_to_land: Scalar,
        thrust_levels: Vec<Scalar>,
        exhaust_velocity: Scalar,
        possible_directions: Vec<Scalar>,
    ) -> PlanResult<Self> {
        if mass <= 0.0 {
            return Err(PlanError::config("spacecraft mass must be positive"));
        }
        if fuel < 0.0 {
            return Err(PlanError::config("spacecraft fuel cannot be negative"));
        }
        if thrust_levels.is_empty() {
            return Err(PlanError::config("spacecraft needs at least one thrust level"));
        }
        if thrust_levels.iter().any(|&l| l < 0.0) {
            return Err(PlanError::config("thrust levels must be non-negative"));
        }
        if exhaust_velocity <= 0.0 {
            return Err(PlanError::config("exhaust velocity must be positive"));
        }
        Ok(Self {
            mass,
            fuel,
            min_fuel_to_land,
            thrust_levels,
            exhaust_velocity,
            possible_directions,
        })
    }
}
