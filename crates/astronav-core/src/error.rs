use thiserror::Error;

/// Failure taxonomy for the planner stack.
///
/// Construction problems surface eagerly as `Config`; infeasible search
/// edges are pruned silently (they are `None`, not errors) and only an
/// exhausted search reports `SearchExhausted`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("cannot normalize a zero-length vector")]
    ZeroVector,

    #[error("search exhausted without reaching the goal")]
    SearchExhausted,

    #[error("no plan computed yet")]
    NotComputed,

    #[error("playback already consumed the full path")]
    PlaybackDone,
}

pub type PlanResult<T> = Result<T, PlanError>;

impl PlanError {
    pub fn config(msg: impl Into<String>) -> Self {
        PlanError::Config(msg.into())
    }
}
