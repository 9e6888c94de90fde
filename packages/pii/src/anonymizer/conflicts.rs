//! Turning possibly overlapping analyzer results into disjoint spans.

use crate::types::RecognizerResult;

/// Resolve overlaps so every byte of text belongs to at most one result.
///
/// 1. A result inside another result is dropped. On identical spans the
///    higher score wins, then the lower entity type, then the earlier result.
/// 2. Same-entity results that overlap or are separated only by whitespace
///    merge into one span.
/// 3. Remaining partial overlaps are cut: the later result starts where the
///    earlier one ends.
///
/// Returned results are sorted by start offset. Spans must already be valid
/// for `text`.
pub fn resolve_conflicts(text: &str, results: &[RecognizerResult]) -> Vec<RecognizerResult> {
    let mut kept: Vec<RecognizerResult> = results
        .iter()
        .enumerate()
        .filter(|(i, result)| {
            !results
                .iter()
                .enumerate()
                .any(|(j, other)| *i != j && dominates(other, j, result, *i))
        })
        .map(|(_, result)| result.clone())
        .collect();

    kept.sort_by(|a, b| (a.start, a.end).cmp(&(b.start, b.end)));

    let mut merged: Vec<RecognizerResult> = Vec::with_capacity(kept.len());
    for result in kept {
        if let Some(last) = merged.last_mut() {
            let touching = result.start <= last.end
                || text
                    .get(last.end..result.start)
                    .is_some_and(|gap| gap.chars().all(char::is_whitespace));

            if last.entity_type == result.entity_type && touching {
                last.end = last.end.max(result.end);
                last.score = last.score.max(result.score);
                continue;
            }
        }
        merged.push(result);
    }

    let mut resolved: Vec<RecognizerResult> = Vec::with_capacity(merged.len());
    for mut result in merged {
        if let Some(previous) = resolved.last() {
            if result.start < previous.end {
                result.start = previous.end;
            }
        }
        if result.start < result.end {
            resolved.push(result);
        }
    }
    resolved
}

fn dominates(other: &RecognizerResult, j: usize, result: &RecognizerResult, i: usize) -> bool {
    if !other.contains(result) {
        return false;
    }
    if !other.same_span(result) {
        return true;
    }
    other.score > result.score
        || (other.score == result.score
            && (other.entity_type < result.entity_type
                || (other.entity_type == result.entity_type && j < i)))
}
