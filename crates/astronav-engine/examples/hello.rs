use anyhow::Result;
use astronav_core::PlanError;
use astronav_engine::{DebugSettings, Engine, EngineConfig};

const CONFIG: &str = r#"{
    "world": {
        "bodies": [
            {"kind": "stationary", "id": 0, "mass": 1e18, "radius": 1.0, "position": [40.0, 40.0]}
        ],
        "artifacts": [
            {"id": 0, "position": [2.0, 0.0]},
            {"id": 1, "position": [4.0, 0.0]}
        ],
        "max_radius": 500.0
    },
    "time": {"tmax_u": 20.0, "dt_u": 1.0},
    "quantization": {"pos_bin": 0.5, "vel_bin": 0.1, "time_bin": 1.0, "fuel_bin": 1.0},
    "spacecraft": {
        "mass": 1.0, "max_fuel": 5.0, "thrust_levels": [2.0],
        "exhaust_speed": 4.0, "possible_directions": [0.0, 1.5707963267948966, -1.5707963267948966],
        "initial_position": [0.0, 0.0], "initial_velocity": [2.0, 0.0]
    },
    "initial_state": {"position": [0.0, 0.0], "velocity": [2.0, 0.0], "fuel": 5.0},
    "k": 2,
    "capture_radius": 0.25
}"#;

fn main() -> Result<()> {
    let cfg = EngineConfig::from_json(CONFIG)?;
    let mut engine = Engine::new(cfg)?;
    engine.set_debug(DebugSettings {
        print_every: 1,
        show_ship: true,
        ..Default::default()
    });

    engine.compute()?;
    println!(
        "plan found: {} frames, cost {:.3}, digest {:02x?}",
        engine.remaining(),
        engine.result().map(|r| r.total_cost).unwrap_or(0.0),
        &engine.result_digest()?[..8]
    );

    loop {
        match engine.step() {
            Ok(frame) => println!(
                "t_u={:.2}  ship=({:+.3},{:+.3})  fuel={:.2}  collected={}",
                frame.t_u,
                frame.ship.x.x,
                frame.ship.x.y,
                frame.ship.fuel,
                frame.ship.collected.len()
            ),
            Err(PlanError::PlaybackDone) => break,
            Err(e) => return Err(e.into()),
        }
    }

    engine.shutdown();
    Ok(())
}
