//! Planner configuration.
//!
//! Every knob has a default matching the conventional bean rules, so
//! [`PlannerConfig::default`] is what most callers want. A configuration can
//! also be loaded from TOML:
//!
//! ```
//! use bp_introspect::{PlannerConfig, SiblingExclusion};
//! use bp_introspect::info::Visibility;
//!
//! let cfg = PlannerConfig::from_toml_str(r#"
//!     ignore_markers = ["Ignore", "Skip"]
//!     min_field_visibility = "protected"
//!     sibling_exclusion = "first_declared"
//! "#).unwrap();
//!
//! assert_eq!(cfg.ignore_markers, ["Ignore", "Skip"]);
//! assert_eq!(cfg.transient_markers, ["transient"]);
//! assert_eq!(cfg.min_field_visibility, Visibility::Protected);
//! assert_eq!(cfg.sibling_exclusion, SiblingExclusion::FirstDeclared);
//! ```

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use log::warn;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::info::Visibility;

// -----------------------------------------------------------------------------
// SiblingExclusion

/// How exclusion markers combine across effective declarations of one
/// property that are not in an override relation, e.g. the same getter
/// declared by two unrelated interfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiblingExclusion {
    /// Any marked effective declaration excludes the property.
    #[default]
    Sticky,
    /// Only the first effective declaration of each slot (read, write, field)
    /// in precedence order is consulted.
    FirstDeclared,
}

// -----------------------------------------------------------------------------
// PlannerConfig

/// Rules used to classify members and resolve properties.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
    /// Annotation simple names meaning "explicitly ignored".
    pub ignore_markers: Vec<String>,
    /// Annotation simple names meaning "excluded from storage".
    pub transient_markers: Vec<String>,
    /// Least visibility a field needs to become a plain-field property.
    pub min_field_visibility: Visibility,
    pub sibling_exclusion: SiblingExclusion,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            ignore_markers: Vec::from(
                ["Ignore", "Transient", "XmlTransient", "JsonIgnore", "SerdeSkip"].map(String::from),
            ),
            transient_markers: alloc::vec![String::from("transient")],
            min_field_visibility: Visibility::Public,
            sibling_exclusion: SiblingExclusion::Sticky,
        }
    }
}

impl PlannerConfig {
    /// Parses a configuration from TOML; missing keys take their defaults.
    ///
    /// Marker names are trimmed. A name that is blank after trimming is
    /// rejected with [`ConfigError::EmptyMarker`].
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let mut cfg: Self = toml::from_str(source)?;
        cfg.normalize()?;
        Ok(cfg)
    }

    /// Trims marker names and rejects blank ones.
    pub fn normalize(&mut self) -> Result<(), ConfigError> {
        normalize_markers("ignore_markers", &mut self.ignore_markers)?;
        normalize_markers("transient_markers", &mut self.transient_markers)
    }
}

fn normalize_markers(key: &'static str, markers: &mut [String]) -> Result<(), ConfigError> {
    for (index, marker) in markers.iter_mut().enumerate() {
        let trimmed = marker.trim();
        if trimmed.is_empty() {
            warn!("blank marker name at `{key}[{index}]`");
            return Err(ConfigError::EmptyMarker { key, index });
        }
        if trimmed.len() != marker.len() {
            warn!("marker name `{marker}` at `{key}[{index}]` has surrounding whitespace");
            *marker = trimmed.to_string();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{PlannerConfig, SiblingExclusion};
    use crate::error::ConfigError;
    use crate::info::Visibility;

    #[test]
    fn defaults() {
        let cfg = PlannerConfig::default();
        assert!(cfg.ignore_markers.iter().any(|m| m == "XmlTransient"));
        assert_eq!(cfg.transient_markers, ["transient"]);
        assert_eq!(cfg.min_field_visibility, Visibility::Public);
        assert_eq!(cfg.sibling_exclusion, SiblingExclusion::Sticky);

        assert_eq!(PlannerConfig::from_toml_str("").unwrap(), cfg);
    }

    #[test]
    fn trims_markers() {
        let cfg = PlannerConfig::from_toml_str("transient_markers = [\" volatile \"]").unwrap();
        assert_eq!(cfg.transient_markers, ["volatile"]);
    }

    #[test]
    fn rejects_blank_marker() {
        let err = PlannerConfig::from_toml_str("ignore_markers = [\"Ignore\", \"  \"]").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EmptyMarker { key: "ignore_markers", index: 1 }
        ));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = PlannerConfig::from_toml_str("ignore = []").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = PlannerConfig::from_toml_str("min_field_visibility = \"internal\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
