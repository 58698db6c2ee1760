use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::config::{EntityConfig, TagPolicy};
use crate::error::ConfigError;
use crate::naming::{instance_identifier, output_file_name};

/// A chainable query modifier method generated on the entity builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ModifierKind {
    Select,
    Expand,
    Filter,
    Top,
    Skip,
    OrderBy,
}

impl ModifierKind {
    pub const ALL: [ModifierKind; 6] = [
        ModifierKind::Select,
        ModifierKind::Expand,
        ModifierKind::Filter,
        ModifierKind::Top,
        ModifierKind::Skip,
        ModifierKind::OrderBy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModifierKind::Select => "Select",
            ModifierKind::Expand => "Expand",
            ModifierKind::Filter => "Filter",
            ModifierKind::Top => "Top",
            ModifierKind::Skip => "Skip",
            ModifierKind::OrderBy => "OrderBy",
        }
    }
}

impl fmt::Display for ModifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModifierKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModifierKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownModifier(s.to_string()))
    }
}

/// A response-processing method generated on the entity's `Resp` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HelperKind {
    Data,
    Normalized,
    ToMap,
}

impl HelperKind {
    pub const ALL: [HelperKind; 3] = [HelperKind::Data, HelperKind::Normalized, HelperKind::ToMap];

    pub fn as_str(&self) -> &'static str {
        match self {
            HelperKind::Data => "Data",
            HelperKind::Normalized => "Normalized",
            HelperKind::ToMap => "ToMap",
        }
    }
}

impl fmt::Display for HelperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HelperKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HelperKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownHelper(s.to_string()))
    }
}

/// A validated, immutable description of one entity's generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub entity: String,
    pub item: Option<String>,
    pub configurable: bool,
    pub is_collection: bool,
    pub modifiers: Vec<ModifierKind>,
    pub helpers: Vec<HelperKind>,
    pub package: String,
}

impl GenerationRequest {
    /// Validate raw entity parameters into a request.
    ///
    /// Under [`TagPolicy::Lenient`] unknown tags are dropped and duplicates kept;
    /// under [`TagPolicy::Strict`] both are rejected.
    pub fn resolve(
        entity: &str,
        config: &EntityConfig,
        package: &str,
        policy: TagPolicy,
    ) -> Result<Self, ConfigError> {
        // A blank or whitespace-only name counts as missing.
        let entity = entity.trim();
        if entity.is_empty() {
            return Err(ConfigError::MissingEntity);
        }

        let modifiers = parse_tags(&config.mods, policy, ConfigError::DuplicateModifier)?;
        let helpers = parse_tags(&config.helpers, policy, ConfigError::DuplicateHelper)?;

        let item = config.item.trim();
        Ok(Self {
            entity: entity.to_string(),
            item: (!item.is_empty()).then(|| item.to_string()),
            configurable: config.conf,
            is_collection: config.coll,
            modifiers,
            helpers,
            package: package.to_string(),
        })
    }

    /// Receiver / local variable name of the entity.
    pub fn instance(&self) -> String {
        instance_identifier(&self.entity)
    }

    /// A collection without a known item type gets no response helpers at all.
    pub fn emits_helpers(&self) -> bool {
        !(self.is_collection && self.item.is_none())
    }
}

/// Fail if two requests would be written to the same output file, e.g. `Web`
/// and `WEB` both become `web_gen.go`.
pub fn check_output_collisions(
    requests: &[GenerationRequest],
    extension: &str,
) -> Result<(), ConfigError> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for request in requests {
        let file = output_file_name(&request.entity, extension);
        if let Some(first) = seen.get(&file) {
            return Err(ConfigError::OutputCollision {
                file,
                first: first.to_string(),
                second: request.entity.clone(),
            });
        }
        seen.insert(file, &request.entity);
    }
    Ok(())
}

fn parse_tags<K>(
    raw: &[String],
    policy: TagPolicy,
    duplicate: fn(K) -> ConfigError,
) -> Result<Vec<K>, ConfigError>
where
    K: FromStr<Err = ConfigError> + PartialEq + Copy,
{
    let mut kinds = Vec::with_capacity(raw.len());
    // Surrounding whitespace is ignored, so `" Expand"` is `Expand`.
    for tag in raw.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
        match (tag.parse::<K>(), policy) {
            (Ok(kind), TagPolicy::Strict) if kinds.contains(&kind) => return Err(duplicate(kind)),
            (Ok(kind), _) => kinds.push(kind),
            (Err(e), TagPolicy::Strict) => return Err(e),
            (Err(e), TagPolicy::Lenient) => log::debug!("skipping {e}"),
        }
    }
    Ok(kinds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(mods: &[&str], helpers: &[&str]) -> EntityConfig {
        EntityConfig {
            mods: mods.iter().map(|s| s.to_string()).collect(),
            helpers: helpers.iter().map(|s| s.to_string()).collect(),
            ..EntityConfig::default()
        }
    }

    #[test]
    fn test_tag_names_parse_back() {
        for kind in ModifierKind::ALL {
            assert_eq!(kind.as_str().parse::<ModifierKind>().unwrap(), kind);
        }
        for kind in HelperKind::ALL {
            assert_eq!(kind.to_string().parse::<HelperKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        assert!("select".parse::<ModifierKind>().is_err());
        assert!("data".parse::<HelperKind>().is_err());
    }

    #[test]
    fn test_resolve_basic() {
        let cfg = EntityConfig {
            item: "File".to_string(),
            conf: true,
            coll: true,
            ..config(&["Select", "Top"], &["Data"])
        };
        let req = GenerationRequest::resolve("Files", &cfg, "api", TagPolicy::Lenient).unwrap();
        assert_eq!(req.entity, "Files");
        assert_eq!(req.item.as_deref(), Some("File"));
        assert!(req.configurable);
        assert!(req.is_collection);
        assert_eq!(req.modifiers, vec![ModifierKind::Select, ModifierKind::Top]);
        assert_eq!(req.helpers, vec![HelperKind::Data]);
        assert_eq!(req.package, "api");
        assert_eq!(req.instance(), "files");
    }

    #[test]
    fn test_missing_entity() {
        let err = GenerationRequest::resolve("", &EntityConfig::default(), "api", TagPolicy::Lenient)
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingEntity));
    }

    #[test]
    fn test_blank_entity_is_missing() {
        let err = GenerationRequest::resolve("  ", &EntityConfig::default(), "api", TagPolicy::Lenient)
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingEntity));
    }

    #[test]
    fn test_output_collisions() {
        let resolve = |name: &str| {
            GenerationRequest::resolve(name, &EntityConfig::default(), "api", TagPolicy::Lenient)
                .unwrap()
        };
        let distinct = vec![resolve("Web"), resolve("Files")];
        assert!(check_output_collisions(&distinct, "go").is_ok());

        let clashing = vec![resolve("Web"), resolve("Files"), resolve("WEB")];
        let err = check_output_collisions(&clashing, "go").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutputCollision { ref file, ref first, ref second }
                if file == "web_gen.go" && first == "Web" && second == "WEB"
        ));
    }

    #[test]
    fn test_lenient_drops_unknown_tags() {
        let cfg = config(&["Select", "Bogus", "Expand"], &["Bogus", "ToMap"]);
        let req = GenerationRequest::resolve("Web", &cfg, "api", TagPolicy::Lenient).unwrap();
        assert_eq!(req.modifiers, vec![ModifierKind::Select, ModifierKind::Expand]);
        assert_eq!(req.helpers, vec![HelperKind::ToMap]);
    }

    #[test]
    fn test_lenient_keeps_duplicates() {
        let cfg = config(&["Select", "Select"], &[]);
        let req = GenerationRequest::resolve("Web", &cfg, "api", TagPolicy::Lenient).unwrap();
        assert_eq!(req.modifiers, vec![ModifierKind::Select, ModifierKind::Select]);
    }

    #[test]
    fn test_strict_rejects_unknown_tags() {
        let cfg = config(&["Select", "Bogus"], &[]);
        let err = GenerationRequest::resolve("Web", &cfg, "api", TagPolicy::Strict).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownModifier(ref t) if t == "Bogus"));

        let cfg = config(&[], &["Bogus"]);
        let err = GenerationRequest::resolve("Web", &cfg, "api", TagPolicy::Strict).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownHelper(ref t) if t == "Bogus"));
    }

    #[test]
    fn test_strict_rejects_duplicates() {
        let cfg = config(&[], &["Data", "Data"]);
        let err = GenerationRequest::resolve("Web", &cfg, "api", TagPolicy::Strict).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateHelper(HelperKind::Data)));
    }

    #[test]
    fn test_whitespace_and_empty_segments() {
        // Padded tags are accepted rather than dropped as unknown.
        let cfg = config(&[" Select", "", "Expand "], &[]);
        let req = GenerationRequest::resolve("Web", &cfg, "api", TagPolicy::Strict).unwrap();
        assert_eq!(req.modifiers, vec![ModifierKind::Select, ModifierKind::Expand]);
    }

    #[test]
    fn test_emits_helpers() {
        let mut cfg = config(&[], &["Data"]);
        cfg.coll = true;
        let req = GenerationRequest::resolve("Files", &cfg, "api", TagPolicy::Lenient).unwrap();
        assert!(!req.emits_helpers());

        cfg.item = "File".to_string();
        let req = GenerationRequest::resolve("Files", &cfg, "api", TagPolicy::Lenient).unwrap();
        assert!(req.emits_helpers());

        let req = GenerationRequest::resolve("Web", &config(&[], &["Data"]), "api", TagPolicy::Lenient)
            .unwrap();
        assert!(req.emits_helpers());
    }
}
