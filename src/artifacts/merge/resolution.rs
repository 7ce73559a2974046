//! Per-file three-way merge resolution
//!
//! Each path is resolved by comparing its blob hashes in the split-point,
//! current and target snapshots — hashes, not content. The outcome per path:
//!
//! | in split | current side        | target side         | action            |
//! |----------|---------------------|---------------------|-------------------|
//! | yes      | unchanged           | changed             | take target       |
//! | yes      | changed             | changed differently | conflict          |
//! | yes      | unchanged           | absent              | remove            |
//! | yes      | absent              | changed             | conflict          |
//! | yes      | changed             | absent              | conflict          |
//! | no       | absent              | present             | take target       |
//! | no       | present             | differing present   | conflict          |
//!
//! Everything else (unchanged on both sides, changed identically, additions
//! private to the current branch) needs no action.

use crate::artifacts::objects::commit::FileMap;
use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;

/// Resolution outcome for one path
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum MergeAction {
    /// Check out the target side's blob and stage it
    TakeTarget(ObjectId),
    /// Untrack the file and delete it from the working tree
    Remove,
    /// Both sides disagree: write conflict markers and stage the result
    Conflict {
        current: Option<ObjectId>,
        target: Option<ObjectId>,
    },
}

/// Resolve every path of the three snapshots into its merge action
///
/// Paths needing no action are omitted. Results are in sorted path order.
pub fn resolve(split: &FileMap, current: &FileMap, target: &FileMap) -> Vec<(PathBuf, MergeAction)> {
    let mut actions = Vec::new();

    for (path, split_oid) in split {
        let current_oid = current.get(path);
        let target_oid = target.get(path);

        let action = match (current_oid, target_oid) {
            (Some(current_oid), Some(target_oid)) => {
                if target_oid != split_oid && current_oid == split_oid {
                    Some(MergeAction::TakeTarget(target_oid.clone()))
                } else if target_oid != split_oid && current_oid != target_oid {
                    Some(MergeAction::Conflict {
                        current: Some(current_oid.clone()),
                        target: Some(target_oid.clone()),
                    })
                } else {
                    None
                }
            }
            (None, Some(target_oid)) if target_oid != split_oid => Some(MergeAction::Conflict {
                current: None,
                target: Some(target_oid.clone()),
            }),
            (Some(current_oid), None) if current_oid != split_oid => Some(MergeAction::Conflict {
                current: Some(current_oid.clone()),
                target: None,
            }),
            (Some(_), None) => Some(MergeAction::Remove),
            _ => None,
        };

        if let Some(action) = action {
            actions.push((path.clone(), action));
        }
    }

    for (path, target_oid) in target {
        if split.contains_key(path) {
            continue;
        }

        let action = match current.get(path) {
            None => Some(MergeAction::TakeTarget(target_oid.clone())),
            Some(current_oid) if current_oid != target_oid => Some(MergeAction::Conflict {
                current: Some(current_oid.clone()),
                target: Some(target_oid.clone()),
            }),
            Some(_) => None,
        };

        if let Some(action) = action {
            actions.push((path.clone(), action));
        }
    }

    actions
}

/// Render the conflicted working-file content for one path
///
/// Either side may be absent (deleted on that side); its section is then
/// empty. The layout is byte-exact: the side content is spliced in verbatim,
/// so a side not ending in a newline runs into the following marker.
pub fn conflict_file_content(current: &str, target: &str) -> String {
    format!("<<<<<<< HEAD\n{current}=======\n{target}>>>>>>>\n")
}

#[cfg(test)]
mod tests {
    use super::{MergeAction, conflict_file_content, resolve};
    use crate::artifacts::objects::commit::FileMap;
    use crate::artifacts::objects::object_id::ObjectId;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::path::PathBuf;

    fn oid(digit: char) -> ObjectId {
        ObjectId::try_parse(digit.to_string().repeat(40)).unwrap()
    }

    fn file_map(entries: &[(&str, char)]) -> FileMap {
        entries
            .iter()
            .map(|(path, digit)| (PathBuf::from(path), oid(*digit)))
            .collect()
    }

    #[rstest]
    // unchanged on both sides: already consistent
    #[case(&[("f", '1')], &[("f", '1')], &[("f", '1')], None)]
    // changed identically on both sides
    #[case(&[("f", '1')], &[("f", '2')], &[("f", '2')], None)]
    // unchanged in current, changed in target: take target
    #[case(&[("f", '1')], &[("f", '1')], &[("f", '2')],
        Some(MergeAction::TakeTarget(ObjectId::try_parse("2".repeat(40)).unwrap())))]
    // changed in current only: current wins, no action
    #[case(&[("f", '1')], &[("f", '2')], &[("f", '1')], None)]
    // changed differently on both sides: conflict
    #[case(&[("f", '1')], &[("f", '2')], &[("f", '3')],
        Some(MergeAction::Conflict {
            current: Some(ObjectId::try_parse("2".repeat(40)).unwrap()),
            target: Some(ObjectId::try_parse("3".repeat(40)).unwrap()),
        }))]
    // unchanged in current, deleted in target: remove
    #[case(&[("f", '1')], &[("f", '1')], &[], Some(MergeAction::Remove))]
    // deleted in target, changed in current: conflict with empty target side
    #[case(&[("f", '1')], &[("f", '2')], &[],
        Some(MergeAction::Conflict {
            current: Some(ObjectId::try_parse("2".repeat(40)).unwrap()),
            target: None,
        }))]
    // deleted in current, changed in target: conflict with empty current side
    #[case(&[("f", '1')], &[], &[("f", '2')],
        Some(MergeAction::Conflict {
            current: None,
            target: Some(ObjectId::try_parse("2".repeat(40)).unwrap()),
        }))]
    // deleted in current, untouched in target: stays deleted
    #[case(&[("f", '1')], &[], &[("f", '1')], None)]
    // deleted on both sides
    #[case(&[("f", '1')], &[], &[], None)]
    // absent from split, added only in target: take target
    #[case(&[], &[], &[("f", '2')],
        Some(MergeAction::TakeTarget(ObjectId::try_parse("2".repeat(40)).unwrap())))]
    // absent from split, added only in current: survives untouched
    #[case(&[], &[("f", '2')], &[], None)]
    // absent from split, added differently on both sides: conflict
    #[case(&[], &[("f", '2')], &[("f", '3')],
        Some(MergeAction::Conflict {
            current: Some(ObjectId::try_parse("2".repeat(40)).unwrap()),
            target: Some(ObjectId::try_parse("3".repeat(40)).unwrap()),
        }))]
    // absent from split, added identically on both sides
    #[case(&[], &[("f", '2')], &[("f", '2')], None)]
    fn per_file_resolution(
        #[case] split: &[(&str, char)],
        #[case] current: &[(&str, char)],
        #[case] target: &[(&str, char)],
        #[case] expected: Option<MergeAction>,
    ) {
        let actions = resolve(&file_map(split), &file_map(current), &file_map(target));

        match expected {
            Some(action) => assert_eq!(actions, vec![(PathBuf::from("f"), action)]),
            None => assert_eq!(actions, vec![]),
        }
    }

    #[test]
    fn actions_come_out_in_sorted_path_order() {
        let split = file_map(&[("b", '1'), ("d", '1')]);
        let current = file_map(&[("b", '1'), ("d", '1')]);
        let target = file_map(&[("b", '2'), ("d", '2'), ("a", '3'), ("c", '3')]);

        let paths = resolve(&split, &current, &target)
            .into_iter()
            .map(|(path, _)| path)
            .collect::<Vec<_>>();

        // split-driven paths first (sorted), then target-only additions (sorted)
        assert_eq!(
            paths,
            vec![
                PathBuf::from("b"),
                PathBuf::from("d"),
                PathBuf::from("a"),
                PathBuf::from("c"),
            ]
        );
    }

    #[test]
    fn conflict_content_matches_the_template_exactly() {
        assert_eq!(
            conflict_file_content("X\n", "Y\n"),
            "<<<<<<< HEAD\nX\n=======\nY\n>>>>>>>\n"
        );
    }

    #[test]
    fn conflict_content_with_an_empty_side() {
        assert_eq!(
            conflict_file_content("", "Y\n"),
            "<<<<<<< HEAD\n=======\nY\n>>>>>>>\n"
        );
        assert_eq!(
            conflict_file_content("X\n", ""),
            "<<<<<<< HEAD\nX\n=======\n>>>>>>>\n"
        );
    }
}
