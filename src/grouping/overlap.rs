//! Overlap resolution between groups of an [Index].
use std::collections::BTreeSet;

use log::{debug, warn};

use crate::error::Error;
use crate::filtering::Limits;

use super::Index;

/// Resolved grouping scope: the groups of interest, and the targets present in every one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    pub groups: BTreeSet<String>,
    pub targets: BTreeSet<String>,
}

/// Compute the groups in scope and the targets common to all of them.
///
/// Fails if the grouping field restriction holds values that are absent from the index.
/// An unrestricted grouping field puts every indexed group in scope.
pub fn compute_overlap(index: &Index, limits: &Limits) -> Result<Scope, Error> {
    let grouping_field = index.grouping_field;
    let all_groups = index.groups();

    let groups = match limits.get(grouping_field) {
        None => {
            warn!(
                "you are grouping by {}, but you have not restricted this field. \
                 There will probably be no overlap and you will probably get an empty result.",
                grouping_field
            );
            all_groups
        }
        Some(requested) => {
            let missing: BTreeSet<String> = requested.difference(&all_groups).cloned().collect();
            if !missing.is_empty() {
                return Err(Error::MissingGroups(grouping_field, missing));
            }
            requested.intersection(&all_groups).cloned().collect()
        }
    };
    debug!("limiting {}s to {:?}", grouping_field, groups);

    let targets = common_targets(index, &groups);
    debug!("limiting {}s to {:?}", index.target_field, targets);

    Ok(Scope { groups, targets })
}

/// Intersection of the target sets of `groups`. Empty when there are no groups.
fn common_targets(index: &Index, groups: &BTreeSet<String>) -> BTreeSet<String> {
    let mut sets = groups.iter().filter_map(|g| index.data.get(g));
    let first = match sets.next() {
        Some(first) => first.clone(),
        None => return BTreeSet::new(),
    };

    sets.fold(first, |acc, targets| {
        acc.intersection(targets).cloned().collect()
    })
}
