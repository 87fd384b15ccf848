//! Binary search simulator over the canonical input `[1, 3, 5, 7, 9, 11]`,
//! searching for 7.

use super::TraceBuilder;
use crate::core_types::TraceStep;

const CANONICAL_INPUT: [i64; 6] = [1, 3, 5, 7, 9, 11];
const TARGET: i64 = 7;

const LINE_PROBE: u32 = 3;
const LINE_FOUND: u32 = 4;
const LINE_MOVE: u32 = 6;
const LINE_MISSING: u32 = 9;

pub(super) fn simulate() -> Vec<TraceStep> {
    let values = CANONICAL_INPUT.to_vec();
    let mut trace = TraceBuilder::new();
    let mut lo = 0usize;
    let mut hi = values.len() - 1;

    while lo <= hi {
        let mid = lo + (hi - lo) / 2;
        trace.push(
            format!(
                "Inspect middle index {}: lo={}, hi={}, value {}",
                mid, lo, hi, values[mid]
            ),
            LINE_PROBE,
            Some(values.clone()),
            Some(bounds(lo, mid, hi, values.len())),
        );

        if values[mid] == TARGET {
            trace.push(
                format!("Found target {TARGET} at index {mid}"),
                LINE_FOUND,
                Some(values.clone()),
                Some(vec![mid]),
            );
            return trace.finish();
        }

        if values[mid] < TARGET {
            lo = mid + 1;
            trace.push(
                format!("Value {} is below the target; move lo to {}", values[mid], lo),
                LINE_MOVE,
                Some(values.clone()),
                Some(bounds(lo, lo, hi, values.len())),
            );
        } else {
            if mid == 0 {
                break;
            }
            hi = mid - 1;
            trace.push(
                format!("Value {} is above the target; move hi to {}", values[mid], hi),
                LINE_MOVE,
                Some(values.clone()),
                Some(bounds(lo, lo, hi, values.len())),
            );
        }
    }

    trace.push(
        format!("Target {TARGET} is not present"),
        LINE_MISSING,
        Some(values),
        None,
    );
    trace.finish()
}

/// Deduplicated, ordered highlight set for the active bounds, restricted to
/// valid snapshot indices.
fn bounds(lo: usize, mid: usize, hi: usize, len: usize) -> Vec<usize> {
    let mut indices = vec![lo, mid, hi];
    indices.retain(|&index| index < len);
    indices.sort_unstable();
    indices.dedup();
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_trace_shape_is_stable() {
        let trace = simulate();
        // Three probes, two bound moves, one found step.
        assert_eq!(trace.len(), 6);
    }

    #[test]
    fn terminal_step_reports_an_index_holding_the_target() {
        let trace = simulate();
        let last = trace.last().unwrap();
        assert!(last.description.contains("Found target 7 at index 3"));

        let snapshot = last.array_snapshot.as_ref().unwrap();
        let index = last.highlighted_indices.as_ref().unwrap()[0];
        assert_eq!(snapshot[index], TARGET);
    }

    #[test]
    fn probes_narrow_from_both_sides() {
        let trace = simulate();
        assert!(trace[0].description.contains("lo=0, hi=5"));
        assert!(trace[1].description.contains("move lo to 3"));
        assert!(trace[3].description.contains("move hi to 3"));
    }
}
