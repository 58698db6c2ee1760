use std::collections::BTreeSet;

use ggen_core::GenerationRequest;

use super::helpers::required_imports;

/// Collect the imports needed by the helpers that will actually be emitted.
///
/// The result is deduplicated and sorted so regeneration is byte-identical.
pub fn resolve_imports(request: &GenerationRequest) -> Vec<String> {
    if !request.emits_helpers() {
        return Vec::new();
    }
    let imports: BTreeSet<&str> = request
        .helpers
        .iter()
        .flat_map(|kind| required_imports(*kind, request.is_collection))
        .copied()
        .collect();
    imports.into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ggen_core::{EntityConfig, TagPolicy};

    fn request(item: &str, coll: bool, helpers: &[&str]) -> GenerationRequest {
        let config = EntityConfig {
            item: item.to_string(),
            coll,
            helpers: helpers.iter().map(|s| s.to_string()).collect(),
            ..EntityConfig::default()
        };
        GenerationRequest::resolve("Lists", &config, "api", TagPolicy::Lenient).unwrap()
    }

    #[test]
    fn test_no_helpers_no_imports() {
        assert!(resolve_imports(&request("", false, &[])).is_empty());
    }

    #[test]
    fn test_normalized_only_needs_nothing() {
        assert!(resolve_imports(&request("", false, &["Normalized"])).is_empty());
    }

    #[test]
    fn test_item_data_needs_json() {
        assert_eq!(resolve_imports(&request("", false, &["Data"])), vec!["encoding/json"]);
    }

    #[test]
    fn test_collection_data_needs_nothing() {
        assert!(resolve_imports(&request("List", true, &["Data", "Normalized"])).is_empty());
    }

    #[test]
    fn test_deduplicated() {
        let imports = resolve_imports(&request("List", true, &["ToMap", "ToMap", "Data"]));
        assert_eq!(imports, vec!["encoding/json"]);
        let imports = resolve_imports(&request("", false, &["Data", "ToMap"]));
        assert_eq!(imports, vec!["encoding/json"]);
    }

    #[test]
    fn test_suppressed_helpers_import_nothing() {
        assert!(resolve_imports(&request("", true, &["ToMap"])).is_empty());
    }
}
