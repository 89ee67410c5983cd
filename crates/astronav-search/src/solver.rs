use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use astronav_core::{hash_f64, hash_u32, hash_vec2, Scalar, StepHasher};

use crate::action::{Action, ActionModel};
use crate::frontier::Frontier;
use crate::state::{DiscreteState, Quantizer, StateVertex};

/// One element of a returned path. The first element carries no action;
/// each later element's action is the edge taken to reach its state.
#[derive(Clone, Debug)]
pub struct PathStep {
    pub state: StateVertex,
    pub action: Option<Action>,
}

#[derive(Clone, Debug)]
pub struct SolverResult {
    pub path: Vec<PathStep>,
    pub total_cost: Scalar,
}

impl SolverResult {
    /// Deterministic 32-byte digest of the full result. Two runs with
    /// identical configs must agree on it bit for bit.
    pub fn digest(&self) -> [u8; 32] {
        let mut h = StepHasher::new();
        hash_f64(&mut h, self.total_cost);
        for step in &self.path {
            hash_vec2(&mut h, &step.state.x);
            hash_vec2(&mut h, &step.state.v);
            hash_f64(&mut h, step.state.t_u);
            hash_f64(&mut h, step.state.fuel);
            hash_u32(&mut h, step.state.collected.len() as u32);
            for id in &step.state.collected {
                hash_u32(&mut h, id.0);
            }
            match &step.action {
                None => h.update_bytes(&[0u8]),
                Some(Action::Thrust { level, dir, dt_global }) => {
                    h.update_bytes(&[1u8]);
                    hash_f64(&mut h, *level);
                    hash_vec2(&mut h, dir);
                    hash_f64(&mut h, *dt_global);
                }
            }
        }
        h.finalize()
    }
}

/// Graph search over quantized states with at-most-once visitation and
/// parent-pointer reconstruction. Generic over the frontier container;
/// FIFO gives the reference BFS.
pub struct Solver {
    quantizer: Quantizer,
    models: Vec<Arc<dyn ActionModel>>,
    // Accepted but advisory: the reference strategy does not prune on it.
    max_cost: Scalar,
}

impl Solver {
    pub fn new(quantizer: Quantizer, models: Vec<Arc<dyn ActionModel>>) -> Self {
        Self { quantizer, models, max_cost: Scalar::INFINITY }
    }

    pub fn with_max_cost(mut self, max_cost: Scalar) -> Self {
        self.max_cost = max_cost;
        self
    }

    #[inline]
    pub fn max_cost(&self) -> Scalar {
        self.max_cost
    }

    /// Feasible successors of a state, in the enumeration order of each
    /// model. Ties between quantized duplicates resolve to the earliest
    /// enumerated edge.
    fn neighbors(&self, sv: &StateVertex) -> Vec<(StateVertex, Action)> {
        let mut out = Vec::new();
        for model in &self.models {
            for action in model.enumerate(sv) {
                if let Some(next) = model.apply(sv, &action) {
                    out.push((next, action));
                }
            }
        }
        out
    }

    pub fn solve<F, G>(&self, start: &StateVertex, is_goal: G) -> Option<SolverResult>
    where
        F: Frontier,
        G: Fn(&StateVertex) -> bool,
    {
        let mut frontier = F::default();
        let mut visited: HashSet<DiscreteState> = HashSet::new();
        let mut parent: HashMap<DiscreteState, (StateVertex, Action)> = HashMap::new();

        frontier.push(start.clone());
        visited.insert(self.quantizer.quantize(start));

        while let Some(current) = frontier.pop() {
            if is_goal(&current) {
                return Some(self.reconstruct(current, &parent));
            }

            for (next, action) in self.neighbors(&current) {
                let key = self.quantizer.quantize(&next);
                if !visited.contains(&key) {
                    visited.insert(key.clone());
                    parent.insert(key, (current.clone(), action));
                    frontier.push(next);
                }
            }
        }

        None
    }

    /// Walks the parent map back from the goal. The start key never enters
    /// the map, so the missing-key lookup is the loop's exit.
    fn reconstruct(
        &self,
        goal: StateVertex,
        parent: &HashMap<DiscreteState, (StateVertex, Action)>,
    ) -> SolverResult {
        let mut path = Vec::new();
        let mut current = goal;
        loop {
            match parent.get(&self.quantizer.quantize(&current)) {
                Some((prev, action)) => {
                    path.push(PathStep { state: current, action: Some(action.clone()) });
                    current = prev.clone();
                }
                None => {
                    path.push(PathStep { state: current, action: None });
                    break;
                }
            }
        }
        path.reverse();

        let total_cost = path
            .iter()
            .filter_map(|step| step.action.as_ref())
            .map(Action::cost)
            .sum();

        SolverResult { path, total_cost }
    }
}
