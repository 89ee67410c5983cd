use std::sync::Arc;

use astronav_core::{vec2, ArtifactId, BodyId, PlanError, PlanResult, Scalar, WormholeId};
use astronav_env::{DilatedTimePolicy, EnvironmentModel, NewtonianEnvironment, TimePolicy};
use astronav_search::{
    ActionModel, FifoFrontier, Quantizer, Solver, SolverResult, StateVertex, ThrustActionModel,
};
use astronav_world::{
    Artifact, CelestialBody, EllipticalOrbit, LinearIndex, Motion, Spacecraft, Wormhole,
    WorldData, WorldIndex,
};

use crate::config::{BodyConfig, EngineConfig};
use crate::frames::{ArtifactFrame, BodyFrame, ShipFrame, WorldFrame, WormholeFrame};
use crate::trace::{DebugSettings, Ledger, TraceEvent};

/// Owns every component for the lifetime of a run and drives the
/// compute-then-playback cycle: `new` builds, `compute` searches, `step`
/// dispenses one frame per path element, `shutdown` releases the result.
pub struct Engine {
    config: EngineConfig,
    world: Arc<WorldData>,
    time: Arc<dyn TimePolicy>,
    solver: Solver,

    result: Option<SolverResult>,
    cursor: usize,
    ship_t_p: Scalar,
    tick: u64,
    debug: DebugSettings,
    ledger: Ledger,
}

impl Engine {
    pub fn new(config: EngineConfig) -> PlanResult<Self> {
        config.validate()?;

        let world = Arc::new(build_world(&config)?);
        let env: Arc<dyn EnvironmentModel> = Arc::new(NewtonianEnvironment::new(world.clone()));
        let time: Arc<dyn TimePolicy> = Arc::new(DilatedTimePolicy::new(
            env.clone(),
            config.time.tmax_u,
            config.time.dt_u,
        ));
        let index: Arc<dyn WorldIndex> = Arc::new(LinearIndex::new(world.clone()));

        let sc = &config.spacecraft;
        let craft = Arc::new(Spacecraft::new(
            sc.mass,
            sc.max_fuel,
            0.0,
            sc.thrust_levels.clone(),
            sc.exhaust_speed,
            sc.possible_directions.clone(),
        )?);

        let quantizer = Quantizer::new(
            config.quantization.pos_bin,
            config.quantization.vel_bin,
            config.quantization.time_bin,
            config.quantization.fuel_bin,
        )?;

        let models: Vec<Arc<dyn ActionModel>> = vec![Arc::new(ThrustActionModel::new(
            env,
            time.clone(),
            index,
            world.clone(),
            craft,
            config.capture_radius,
        ))];

        let solver = Solver::new(quantizer, models);

        Ok(Self {
            config,
            world,
            time,
            solver,
            result: None,
            cursor: 0,
            ship_t_p: 0.0,
            tick: 0,
            debug: DebugSettings::default(),
            ledger: Ledger::new(4096),
        })
    }

    pub fn set_debug(&mut self, cfg: DebugSettings) {
        self.debug = cfg;
    }

    /// Runs the search from the configured initial state toward
    /// `|collected| >= k`. CPU-bound; returns only when the search is done.
    pub fn compute(&mut self) -> PlanResult<()> {
        let init = &self.config.initial_state;
        let start = StateVertex::new(
            vec2(init.position[0], init.position[1]),
            vec2(init.velocity[0], init.velocity[1]),
            0.0,
            init.fuel,
        );

        let k = self.config.k;
        let result = self
            .solver
            .solve::<FifoFrontier, _>(&start, |sv| sv.collected.len() >= k)
            .ok_or(PlanError::SearchExhausted)?;

        self.result = Some(result);
        self.cursor = 0;
        self.ship_t_p = 0.0;
        self.tick = 0;
        self.ledger.clear();
        Ok(())
    }

    pub fn result(&self) -> Option<&SolverResult> {
        self.result.as_ref()
    }

    pub fn result_digest(&self) -> PlanResult<[u8; 32]> {
        self.result
            .as_ref()
            .map(SolverResult::digest)
            .ok_or(PlanError::NotComputed)
    }

    /// Frames left to dispense.
    pub fn remaining(&self) -> usize {
        self.result
            .as_ref()
            .map_or(0, |r| r.path.len() - self.cursor)
    }

    /// Dispenses the next frame of the computed path.
    pub fn step(&mut self) -> PlanResult<WorldFrame> {
        let result = self.result.as_ref().ok_or(PlanError::NotComputed)?;
        if self.cursor >= result.path.len() {
            return Err(PlanError::PlaybackDone);
        }

        let state = result.path[self.cursor].state.clone();
        let edge = result.path[self.cursor].action.clone();
        let prev = self.cursor.checked_sub(1).map(|i| result.path[i].state.clone());
        let total_cost = result.total_cost;
        let last = self.cursor + 1 == result.path.len();
        self.cursor += 1;
        self.tick += 1;

        // onboard clock: integrate the edge just flown over proper time
        if let (Some(prev), Some(edge)) = (&prev, &edge) {
            self.ship_t_p += self.time.to_proper(edge.cost(), prev.x, prev.v, prev.t_u);
            for id in state.collected.iter() {
                if !prev.collected.contains(id) {
                    self.ledger.push(TraceEvent::Capture { id: id.0, t_u: state.t_u });
                }
            }
        }

        let frame = self.to_frame(&state);
        self.ledger.push(TraceEvent::Frame {
            tick: self.tick,
            t_u: frame.t_u,
            x: frame.ship.x,
            v: frame.ship.v,
            fuel: frame.ship.fuel,
            collected: frame.ship.collected.len() as u32,
        });
        if last {
            self.ledger.push(TraceEvent::Done { frames: self.tick, total_cost });
        }

        if self.debug.print_every != 0 && (self.tick as u32) % self.debug.print_every == 0 {
            self.print_debug_block(&frame);
            let _ = self.ledger.write_jsonl("out", self.tick);
        }

        Ok(frame)
    }

    pub fn shutdown(&mut self) {
        self.result = None;
        self.cursor = 0;
        self.ship_t_p = 0.0;
        self.tick = 0;
        self.ledger.clear();
    }

    fn to_frame(&self, state: &StateVertex) -> WorldFrame {
        let t_u = state.t_u;
        let delta = self.config.orbit_vel_delta;

        let ship = ShipFrame {
            x: state.x,
            v: state.v,
            fuel: state.fuel,
            t_p: self.ship_t_p,
            collected: state.collected.clone(),
        };

        let bodies = self
            .world
            .bodies()
            .iter()
            .map(|b| BodyFrame {
                id: b.id.0,
                x: b.pos(t_u),
                v: b.vel(t_u, delta),
                radius: b.radius,
                mass: b.mass,
            })
            .collect();

        let wormholes = self
            .world
            .wormholes()
            .iter()
            .map(|w| WormholeFrame {
                id: w.id.0,
                entry: w.entry,
                exit: w.exit,
                t_open: w.t_open,
                t_close: w.t_close,
                open: w.is_open(t_u),
            })
            .collect();

        let artifacts = self
            .world
            .artifacts()
            .iter()
            .map(|a| ArtifactFrame { id: a.id.0, position: a.position })
            .collect();

        WorldFrame { t_u, ship, bodies, wormholes, artifacts }
    }

    fn print_debug_block(&self, frame: &WorldFrame) {
        println!("--- playback @ tick {}  t_u={:.3} ---", self.tick, frame.t_u);

        if self.debug.show_ship {
            let s = &frame.ship;
            println!(
                "ship  pos=({:+.3},{:+.3})  vel=({:+.3},{:+.3})  fuel={:.3}  t_p={:.3}  got={}",
                s.x.x, s.x.y, s.v.x, s.v.y, s.fuel, s.t_p, s.collected.len()
            );
        }

        if self.debug.show_bodies {
            let mut lines = 0usize;
            for b in &frame.bodies {
                println!(
                    "body {:3}  pos=({:+.3},{:+.3})  r={:.3}",
                    b.id, b.x.x, b.x.y, b.radius
                );
                lines += 1;
                if lines >= self.debug.max_lines { break; }
            }
        }
    }
}

/* ---------- entity construction from config ---------- */

fn build_world(config: &EngineConfig) -> PlanResult<WorldData> {
    let wc = &config.world;

    let mut bodies = Vec::with_capacity(wc.bodies.len());
    for bc in &wc.bodies {
        bodies.push(make_body(bc)?);
    }

    let mut wormholes = Vec::with_capacity(wc.wormholes.len());
    for whc in &wc.wormholes {
        wormholes.push(Wormhole::new(
            WormholeId(whc.id),
            vec2(whc.entry[0], whc.entry[1]),
            vec2(whc.exit[0], whc.exit[1]),
            whc.t_open,
            whc.t_close,
        )?);
    }

    let artifacts = wc
        .artifacts
        .iter()
        .map(|ac| Artifact::new(ArtifactId(ac.id), vec2(ac.position[0], ac.position[1])))
        .collect();

    WorldData::new(bodies, wormholes, artifacts, wc.max_radius)
}

fn make_body(config: &BodyConfig) -> PlanResult<CelestialBody> {
    match *config {
        BodyConfig::Stationary { id, mass, radius, position } => CelestialBody::new(
            BodyId(id),
            radius,
            mass,
            Motion::Fixed(vec2(position[0], position[1])),
        ),
        BodyConfig::Trajectory { id, mass, radius, a, b, omega, phi, angle, center } => {
            let orbit =
                EllipticalOrbit::new(a, b, omega, phi, vec2(center[0], center[1]), angle)?;
            CelestialBody::new(BodyId(id), radius, mass, Motion::Orbit(orbit))
        }
    }
}
