//! Breadth-first search simulator over a fixed five-node graph.
//!
//! The snapshots show the BFS queue; node 2 is reachable from both 0 and 1,
//! so the trace exercises the skip-already-visited rule.

use std::collections::VecDeque;

use super::TraceBuilder;
use crate::core_types::TraceStep;

/// Canonical adjacency list, iterated in fixed order.
const ADJACENCY: [&[usize]; 5] = [&[1, 2], &[2, 3], &[4], &[], &[]];
const START: usize = 0;

const LINE_INIT: u32 = 2;
const LINE_DEQUEUE: u32 = 4;
const LINE_VISIT: u32 = 5;
const LINE_DISCOVER: u32 = 7;
const LINE_QUEUE_STATE: u32 = 9;
const LINE_DONE: u32 = 11;

pub(super) fn simulate() -> Vec<TraceStep> {
    let mut trace = TraceBuilder::new();
    let mut visited = [false; ADJACENCY.len()];
    let mut queue: VecDeque<usize> = VecDeque::new();

    visited[START] = true;
    queue.push_back(START);
    trace.push(
        format!("Start BFS at node {START}: queue holds only the start node"),
        LINE_INIT,
        Some(snapshot(&queue)),
        None,
    );

    while let Some(&node) = queue.front() {
        trace.push(
            format!("Dequeue node {node} from the front of the queue"),
            LINE_DEQUEUE,
            Some(snapshot(&queue)),
            Some(vec![0]),
        );
        queue.pop_front();

        trace.push(
            format!("Visit node {node}"),
            LINE_VISIT,
            Some(snapshot(&queue)),
            None,
        );

        for &neighbor in ADJACENCY[node] {
            if visited[neighbor] {
                continue;
            }
            visited[neighbor] = true;
            queue.push_back(neighbor);
            trace.push(
                format!("Discover neighbor {neighbor} of node {node} and enqueue it"),
                LINE_DISCOVER,
                Some(snapshot(&queue)),
                Some(vec![queue.len() - 1]),
            );
        }

        trace.push(
            format!("Neighbors of node {node} processed"),
            LINE_QUEUE_STATE,
            Some(snapshot(&queue)),
            None,
        );
    }

    trace.push("BFS complete", LINE_DONE, Some(Vec::new()), None);
    trace.finish()
}

fn snapshot(queue: &VecDeque<usize>) -> Vec<i64> {
    queue.iter().map(|&node| node as i64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_trace_shape_is_stable() {
        let trace = simulate();
        // 1 initial + 5 × (dequeue, visit, queue-state) + 4 discoveries + 1 terminal.
        assert_eq!(trace.len(), 21);
    }

    #[test]
    fn every_node_is_visited_exactly_once_in_bfs_order() {
        let trace = simulate();
        let visits: Vec<&str> = trace
            .iter()
            .filter(|step| step.description.starts_with("Visit node"))
            .map(|step| step.description.as_str())
            .collect();
        assert_eq!(
            visits,
            vec![
                "Visit node 0",
                "Visit node 1",
                "Visit node 2",
                "Visit node 3",
                "Visit node 4",
            ]
        );
    }

    #[test]
    fn already_visited_neighbors_are_not_rediscovered() {
        let trace = simulate();
        let discoveries = trace
            .iter()
            .filter(|step| step.description.starts_with("Discover"))
            .count();
        // Node 2 is adjacent to both 0 and 1 but is only discovered once.
        assert_eq!(discoveries, 4);
    }

    #[test]
    fn discovery_steps_highlight_the_appended_position() {
        let trace = simulate();
        for step in trace.iter().filter(|s| s.description.starts_with("Discover")) {
            let snapshot = step.array_snapshot.as_ref().unwrap();
            let highlighted = step.highlighted_indices.as_ref().unwrap();
            assert_eq!(highlighted, &vec![snapshot.len() - 1]);
        }
    }

    #[test]
    fn terminal_step_shows_an_empty_queue() {
        let trace = simulate();
        let last = trace.last().unwrap();
        assert_eq!(last.description, "BFS complete");
        assert_eq!(last.array_snapshot.as_deref(), Some(&[][..]));
    }
}
