pub mod environment;
pub mod time;

pub use environment::{EnvironmentModel, NewtonianEnvironment};
pub use time::{DilatedTimePolicy, TimePolicy};
