//! Repeated, predicate-gated merging of candidates in an ordered sequence.
//!
//! Both Kruskal's algorithm and selective search reduce to the same step: find the (at most
//! two) items an edge touches and combine them. The functions here do the scan and collect
//! part once, leaving the combining policy to the caller.

/// A single edge joins at most two components, so two is the natural merge limit.
pub const DEFAULT_MERGE_LIMIT: usize = 2;

/// Pulls up to `merge_limit` candidates matching `is_mergeable` out of `candidates` and, when
/// at least two were found, replaces them with the single item returned by `combine`.
///
/// # Parameters
/// * `candidates` - the ordered sequence of items to scan.
/// * `is_mergeable` - the predicate selecting items to merge. It is not called again once
///                    `merge_limit` items have matched.
/// * `combine` - builds one item out of the matched items, in their original order.
/// * `merge_limit` - the maximum number of items pulled into a merge.
///
/// # Returns
/// * The unmatched items in their original relative order, followed by the combined item. If
///   fewer than two items matched, the candidates are returned unchanged.
///
/// # Examples
/// ```
///use graph_segmentation::merge;
///
///let merged = merge(vec![1, 2, 3, 4, 5], |_| true, |ints| ints.iter().sum(), 5);
///assert_eq!(merged, vec![15]);
/// ```
pub fn merge<V, P, F>(
    candidates: Vec<V>,
    is_mergeable: P,
    combine: F,
    merge_limit: usize,
) -> Vec<V>
where
    P: FnMut(&V) -> bool,
    F: FnOnce(Vec<V>) -> V,
{
    try_merge(
        candidates,
        is_mergeable,
        |mergeable| vec![combine(mergeable)],
        merge_limit,
    )
}

/// Like [`merge`], but `combine` returns a sequence rather than a single item. This lets the
/// caller decide whether to merge at all: return the matched items to refuse, a single item
/// to accept, or any other recomposition.
///
/// # Examples
/// ```
///use graph_segmentation::try_merge;
///
/// // Refuse to merge, the matched items move to the back
///let result = try_merge(vec![1, 2, 3, 4], |i| i % 2 == 0, |evens| evens, 2);
///assert_eq!(result, vec![1, 3, 2, 4]);
/// ```
pub fn try_merge<V, P, F>(
    candidates: Vec<V>,
    mut is_mergeable: P,
    combine: F,
    merge_limit: usize,
) -> Vec<V>
where
    P: FnMut(&V) -> bool,
    F: FnOnce(Vec<V>) -> Vec<V>,
{
    let picked: Vec<usize> = candidates
        .iter()
        .enumerate()
        .filter(|&(_, candidate)| is_mergeable(candidate))
        .map(|(n, _)| n)
        .take(merge_limit)
        .collect();

    if picked.len() < 2 {
        return candidates;
    }

    let mut mergeable = Vec::with_capacity(picked.len());
    let mut result = Vec::with_capacity(candidates.len() - picked.len() + 1);
    let mut picked = picked.into_iter().peekable();
    for (n, candidate) in candidates.into_iter().enumerate() {
        if picked.next_if_eq(&n).is_some() {
            mergeable.push(candidate);
        } else {
            result.push(candidate);
        }
    }
    result.extend(combine(mergeable));
    result
}
