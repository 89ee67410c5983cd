use serde::{Deserialize, Serialize};

use astronav_core::{PlanError, PlanResult, Scalar, EPS};

/// Body descriptions are a tagged sum: fixed in place, or riding an
/// elliptical trajectory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodyConfig {
    Stationary {
        id: u32,
        mass: Scalar,
        radius: Scalar,
        position: [Scalar; 2],
    },
    Trajectory {
        id: u32,
        mass: Scalar,
        radius: Scalar,
        a: Scalar,
        b: Scalar,
        omega: Scalar,
        phi: Scalar,
        angle: Scalar,
        center: [Scalar; 2],
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WormholeConfig {
    pub id: u32,
    pub entry: [Scalar; 2],
    pub exit: [Scalar; 2],
    pub t_open: Scalar,
    pub t_close: Scalar,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    pub id: u32,
    pub position: [Scalar; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub wormholes: Vec<WormholeConfig>,
    #[serde(default)]
    pub artifacts: Vec<ArtifactConfig>,
    pub max_radius: Scalar,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeConfig {
    pub tmax_u: Scalar,
    pub dt_u: Scalar,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantizationConfig {
    pub pos_bin: Scalar,
    pub vel_bin: Scalar,
    pub time_bin: Scalar,
    pub fuel_bin: Scalar,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpacecraftConfig {
    pub mass: Scalar,
    pub max_fuel: Scalar,
    pub thrust_levels: Vec<Scalar>,
    pub exhaust_speed: Scalar,
    /// Headings in radians, relative to the velocity direction.
    #[serde(default)]
    pub possible_directions: Vec<Scalar>,
    pub initial_position: [Scalar; 2],
    pub initial_velocity: [Scalar; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitialStateConfig {
    pub position: [Scalar; 2],
    pub velocity: [Scalar; 2],
    pub fuel: Scalar,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub world: WorldConfig,
    pub time: TimeConfig,
    pub quantization: QuantizationConfig,
    pub spacecraft: SpacecraftConfig,
    pub initial_state: InitialStateConfig,
    /// Target artifact count.
    pub k: usize,
    /// Artifact pickup distance; the numerical-noise default means
    /// "the planner is exactly here".
    #[serde(default = "default_capture_radius")]
    pub capture_radius: Scalar,
    /// Finite-difference step for orbiting-body velocities.
    #[serde(default = "default_orbit_vel_delta")]
    pub orbit_vel_delta: Scalar,
}

fn default_capture_radius() -> Scalar {
    EPS
}

fn default_orbit_vel_delta() -> Scalar {
    1e-3
}

impl EngineConfig {
    pub fn from_json(json: &str) -> PlanResult<Self> {
        let cfg: EngineConfig = serde_json::from_str(json)
            .map_err(|e| PlanError::config(format!("JSON parse error: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks the knobs the entity constructors never see. Entity-level
    /// invariants (masses, radii, windows) fail later, at build time.
    pub fn validate(&self) -> PlanResult<()> {
        if self.time.tmax_u <= 0.0 {
            return Err(PlanError::config("tmax_u must be positive"));
        }
        if self.time.dt_u <= 0.0 {
            return Err(PlanError::config("dt_u must be positive"));
        }
        if self.initial_state.fuel < 0.0 {
            return Err(PlanError::config("initial fuel cannot be negative"));
        }
        if self.initial_state.fuel > self.spacecraft.max_fuel {
            return Err(PlanError::config("initial fuel exceeds tank capacity"));
        }
        if self.capture_radius < 0.0 {
            return Err(PlanError::config("capture radius cannot be negative"));
        }
        if self.orbit_vel_delta <= 0.0 {
            return Err(PlanError::config("orbit velocity delta must be positive"));
        }
        Ok(())
    }
}
