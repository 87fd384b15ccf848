//! Deterministic algorithm trace synthesis
//!
//! A registry of hand-written simulators, one per catalog algorithm id. Each
//! simulator recomputes its algorithm over a fixed canonical input it owns
//! and emits the instructional step sequence a visualizer renders. The
//! simulators are pure functions: the same id always yields the same trace,
//! they never inspect submitted code, and concurrent lookups share nothing
//! mutable. External visualizers key off the exact emitted shape, so a
//! registered id's step count, ordering and field semantics must never
//! change for its canonical input; new behavior means a new id.

mod binary_search;
mod bubble_sort;
mod graph_search;

use std::collections::HashMap;

use crate::core_types::TraceStep;

type Simulator = fn() -> Vec<TraceStep>;

/// Immutable mapping from algorithm id to its simulator, built once at
/// startup. Lookups are lock-free.
pub struct TraceRegistry {
    simulators: HashMap<&'static str, Simulator>,
}

impl TraceRegistry {
    pub fn new() -> Self {
        let mut simulators: HashMap<&'static str, Simulator> = HashMap::new();
        simulators.insert("bubble-sort", bubble_sort::simulate);
        simulators.insert("binary-search", binary_search::simulate);
        simulators.insert("bfs", graph_search::simulate);
        Self { simulators }
    }

    /// Trace for `algo_id`, or an empty sequence when the id is absent or
    /// unrecognized. Never fails.
    pub fn synthesize(&self, algo_id: Option<&str>) -> Vec<TraceStep> {
        algo_id
            .and_then(|id| self.simulators.get(id))
            .map(|simulate| simulate())
            .unwrap_or_default()
    }

    /// Registered algorithm ids, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.simulators.keys().copied()
    }
}

impl Default for TraceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Assigns contiguous step numbers starting at 1 so the numbering invariant
/// holds by construction in every simulator.
struct TraceBuilder {
    steps: Vec<TraceStep>,
}

impl TraceBuilder {
    fn new() -> Self {
        Self { steps: Vec::new() }
    }

    fn push(
        &mut self,
        description: impl Into<String>,
        current_line: u32,
        array_snapshot: Option<Vec<i64>>,
        highlighted_indices: Option<Vec<usize>>,
    ) {
        self.steps.push(TraceStep {
            step: self.steps.len() + 1,
            description: description.into(),
            current_line,
            array_snapshot,
            highlighted_indices,
        });
    }

    fn finish(self) -> Vec<TraceStep> {
        self.steps
    }
}
