//! Bubble sort simulator over the canonical input `[5, 1, 4, 2, 8]`.
//!
//! The full O(n²) comparison schedule is always emitted; there is no
//! early-exit when a pass performs no swap, so the trace shape is the same
//! on every run.

use super::TraceBuilder;
use crate::core_types::TraceStep;

const CANONICAL_INPUT: [i64; 5] = [5, 1, 4, 2, 8];

// Line numbers refer to the canonical source listing shown beside the trace.
const LINE_PASS: u32 = 2;
const LINE_COMPARE: u32 = 3;
const LINE_SWAP: u32 = 4;
const LINE_DONE: u32 = 7;

pub(super) fn simulate() -> Vec<TraceStep> {
    let mut values = CANONICAL_INPUT.to_vec();
    let mut trace = TraceBuilder::new();
    let n = values.len();

    for pass in 0..n - 1 {
        for j in 0..n - 1 - pass {
            trace.push(
                format!(
                    "Compare positions {} and {}: {} vs {}",
                    j,
                    j + 1,
                    values[j],
                    values[j + 1]
                ),
                LINE_COMPARE,
                Some(values.clone()),
                Some(vec![j, j + 1]),
            );

            if values[j] > values[j + 1] {
                let (left, right) = (values[j], values[j + 1]);
                values.swap(j, j + 1);
                trace.push(
                    format!("Swap {left} and {right}"),
                    LINE_SWAP,
                    Some(values.clone()),
                    Some(vec![j, j + 1]),
                );
            }
        }
        trace.push(
            format!("End of pass {}", pass + 1),
            LINE_PASS,
            Some(values.clone()),
            None,
        );
    }

    trace.push("Array is sorted", LINE_DONE, Some(values), None);
    trace.finish()
}
