use std::sync::Arc;

use hashbrown::HashSet;
use tracing::{info, instrument, warn};

use crate::{
    candidates::BoundedRankedSet,
    error::{Result, ResultError},
    result::ResultCollection,
    statistics::RunLog,
};

/// Combines independently produced collections into a new one.
///
/// Inputs are never modified. With a single input the result is an independent copy of it.
/// Otherwise:
/// - the node set of the first input is used for every candidate. Inputs are assumed to
///   describe the same problem; a differing node set is logged as a warning, not rejected,
/// - candidates are deduplicated by structure, the first occurrence in input order wins,
/// - the merged candidates are sorted ascending by score and the result is unbounded, so a
///   merge of full collections may hold more networks than any input's capacity,
/// - run records are concatenated in input order.
///
/// # Errors
/// [`ResultError::NothingToMerge`] when `collections` is empty.
#[instrument(skip_all)]
pub fn merge<'a, I>(collections: I) -> Result<ResultCollection>
where
    I: IntoIterator<Item = &'a ResultCollection>,
{
    let collections: Vec<&ResultCollection> = collections.into_iter().collect();

    let first = match collections.as_slice() {
        [] => return Err(ResultError::NothingToMerge),
        [only] => return Ok((*only).clone()),
        [first, ..] => *first,
    };
    let nodes = Arc::clone(first.nodes());

    for (i, collection) in collections.iter().enumerate().skip(1) {
        if **collection.nodes() != *nodes {
            warn!(
                input = i,
                nodes = collection.nodes().len(),
                expected = nodes.len(),
                "node set differs from the first input, using the first"
            );
        }
    }

    let total: usize = collections.iter().map(|c| c.len()).sum();
    let mut seen = HashSet::with_capacity(total);
    let mut members = Vec::with_capacity(total);
    for collection in &collections {
        for candidate in collection.candidates() {
            if seen.insert(candidate.fingerprint()) {
                members.push(candidate.rebind(&nodes));
            }
        }
    }
    // fingerprints are unique here, so the order is total
    members.sort();

    let runs = collections
        .iter()
        .fold(RunLog::new(), |acc, c| acc.merge(c.runs()));

    info!(
        inputs = collections.len(),
        offered = total,
        kept = members.len(),
        runs = runs.len(),
        "merged result collections"
    );

    let ranked = BoundedRankedSet::from_sorted(0, members)?;
    Ok(ResultCollection::from_parts(nodes, ranked, runs))
}
