pub mod config;
pub mod frames;
pub mod trace;
pub mod engine;

pub use config::{
    ArtifactConfig, BodyConfig, EngineConfig, InitialStateConfig, QuantizationConfig,
    SpacecraftConfig, TimeConfig, WorldConfig, WormholeConfig,
};
pub use engine::Engine;
pub use frames::{ArtifactFrame, BodyFrame, ShipFrame, WorldFrame, WormholeFrame};
pub use trace::{DebugSettings, Ledger, TraceEvent};
