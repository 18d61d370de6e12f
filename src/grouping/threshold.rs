//! Threshold filters over collected posts.
use std::collections::BTreeSet;

use super::PostsByTarget;

/// Drop, for every target, the groups holding fewer than `m` posts.
///
/// Targets left without groups are kept (with no groups).
pub fn filter_min_posts(posts: PostsByTarget, m: usize) -> PostsByTarget {
    posts.map_groups(|groups| {
        groups
            .into_iter()
            .filter(|(_, records)| records.len() >= m)
            .collect()
    })
}

/// Keep targets whose groups are exactly `desired_groups`.
pub fn filter_desired_groups(
    posts: PostsByTarget,
    desired_groups: &BTreeSet<String>,
) -> PostsByTarget {
    posts.retain(|_, groups| {
        groups.len() == desired_groups.len() && groups.keys().all(|g| desired_groups.contains(g))
    })
}

#[cfg(test)]
mod tests {
    use crate::record::Record;

    use super::*;

    fn posts(spec: &[(&str, &str, usize)]) -> PostsByTarget {
        let mut posts = PostsByTarget::new();
        for (target, group, nb) in spec {
            for i in 0..*nb {
                posts.push(target, group, Record::new(target, "s", group, &i.to_string()));
            }
        }
        posts
    }

    fn groups(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn min_posts() {
        let p = posts(&[("A", "de", 3), ("A", "en", 1), ("B", "de", 1)]);
        let p = filter_min_posts(p, 2);

        assert_eq!(p.nb_targets(), 2);
        let a: Vec<&String> = p.get("A").unwrap().keys().collect();
        assert_eq!(a, vec!["de"]);
        assert!(p.get("B").unwrap().is_empty());
        assert_eq!(p.nb_posts(), 3);
    }

    #[test]
    fn min_posts_can_empty() {
        let p = filter_min_posts(posts(&[("A", "de", 1), ("B", "en", 1)]), 2);
        assert!(p.is_empty());
    }

    #[test]
    fn desired_groups_exact() {
        let p = posts(&[
            ("full", "de", 1),
            ("full", "en", 1),
            ("subset", "de", 1),
            ("superset", "de", 1),
            ("superset", "en", 1),
            ("superset", "fr", 1),
            ("other", "de", 1),
            ("other", "fr", 1),
        ]);
        let wanted = groups(&["de", "en"]);
        let p = filter_desired_groups(p, &wanted);

        let kept: Vec<&String> = p.iter().map(|(t, _)| t).collect();
        assert_eq!(kept, vec!["full"]);
        for (_, g) in p.iter() {
            let keys: BTreeSet<String> = g.keys().cloned().collect();
            assert_eq!(keys, wanted);
        }
    }

    #[test]
    fn sequence_drops_partial_targets() {
        let p = posts(&[("A", "de", 2), ("A", "en", 2), ("B", "de", 2), ("B", "en", 1)]);
        let wanted = groups(&["de", "en"]);
        let p = filter_desired_groups(filter_min_posts(p, 2), &wanted);

        assert_eq!(p.nb_targets(), 1);
        assert!(p.get("A").is_some());
    }
}
