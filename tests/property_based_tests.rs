mod common;

use common::strategies::*;
use hayabusa_worker::packaging::{normalize_display_name, OutputSpec};
use hayabusa_worker::selection::CompatibilityFilter;
use hayabusa_worker::tasks::csv_timeline;
use proptest::prelude::*;
use std::path::Path;

proptest! {
    /// Property: A filter without criteria selects every candidate in order
    #[test]
    fn pass_through_filter_is_identity(candidates in prop::collection::vec(input_artifact_strategy(), 0..20)) {
        let selected = CompatibilityFilter::pass_through().select(&candidates);
        prop_assert_eq!(selected, candidates);
    }

    /// Property: Selection keeps exactly the matching candidates, in order
    #[test]
    fn selection_equals_matching_subsequence(candidates in prop::collection::vec(input_artifact_strategy(), 0..20)) {
        let filter = csv_timeline::definition().compatible_inputs;
        let expected: Vec<_> = candidates.iter().filter(|a| filter.matches(a)).cloned().collect();
        prop_assert_eq!(filter.select(&candidates), expected);
    }

    /// Property: Every selected artifact is an event log by name or MIME type
    #[test]
    fn timeline_selects_only_event_logs(candidates in prop::collection::vec(input_artifact_strategy(), 0..20)) {
        let filter = csv_timeline::definition().compatible_inputs;
        for artifact in filter.select(&candidates) {
            let by_name = artifact
                .match_name()
                .is_some_and(|name| name.to_ascii_lowercase().ends_with(".evtx"));
            let by_mime = artifact.mime_type.as_deref() == Some("application/x-ms-evtx");
            prop_assert!(by_name || by_mime, "unexpected selection: {:?}", artifact);
        }
    }

    /// Property: Normalized display names end with the extension and are stable
    #[test]
    fn normalized_names_are_idempotent(name in display_name_strategy()) {
        let once = normalize_display_name(&name, "html");
        prop_assert!(once.to_ascii_lowercase().ends_with(".html"));
        prop_assert_eq!(normalize_display_name(&once, "html"), once.clone());
    }

    /// Property: Allocated outputs always live directly under the output root
    #[test]
    fn allocated_outputs_stay_under_root(name in prop::option::of(display_name_strategy())) {
        let root = Path::new("/data/output");
        let output = OutputSpec::new("csv", "openrelik:hayabusa:csv_timeline", "Hayabusa_CSV_timeline")
            .allocate(root, name.as_deref());

        prop_assert_eq!(output.path.parent(), Some(root));
        prop_assert!(output.display_name.to_ascii_lowercase().ends_with(".csv"));
        let expected = format!("{}.csv", output.uuid);
        prop_assert_eq!(output.path.file_name().and_then(|n| n.to_str()), Some(expected.as_str()));
    }
}
