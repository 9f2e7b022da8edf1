use hayabusa_worker::models::InputArtifact;
use proptest::prelude::*;

/// Strategy for base filenames with a mix of extensions and cases
pub fn filename_strategy() -> impl Strategy<Value = String> {
    ("[a-zA-Z0-9_-]{1,16}", prop::sample::select(vec!["evtx", "EVTX", "log", "txt", "csv", "html"]))
        .prop_map(|(stem, extension)| format!("{stem}.{extension}"))
}

/// Strategy for MIME types, some of them event logs
pub fn mime_type_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of(
        prop::sample::select(vec!["application/x-ms-evtx", "text/plain", "text/csv"])
            .prop_map(str::to_string),
    )
}

/// Strategy for artifact descriptors under a fake evidence store
pub fn input_artifact_strategy() -> impl Strategy<Value = InputArtifact> {
    (filename_strategy(), mime_type_strategy()).prop_map(|(name, mime_type)| {
        let artifact = InputArtifact::new(format!("/store/{name}"));
        match mime_type {
            Some(mime_type) => artifact.with_mime_type(mime_type),
            None => artifact,
        }
    })
}

/// Strategy for user-supplied display names
pub fn display_name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _.-]{1,32}"
}
