pub mod state;
pub mod action;
pub mod frontier;
pub mod solver;

pub use state::{DiscreteState, Quantizer, StateVertex};
pub use action::{Action, ActionModel, ThrustActionModel};
pub use frontier::{CostFrontier, FifoFrontier, Frontier};
pub use solver::{PathStep, Solver, SolverResult};
