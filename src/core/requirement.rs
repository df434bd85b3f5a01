//! Toolchain requirements and matching.

use std::collections::BTreeMap;
use std::fmt;

use super::model::{ToolchainModel, ENV, RUNTIME_NAME, RUNTIME_VERSION, VENDOR, VERSION};
use super::version::VersionRequirement;

/// Constraints supplied by a caller. Unset fields impose no requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constraints {
    /// Version or version range (`17`, `[11,17)`)
    pub version: Option<String>,
    /// Exact `runtime.name`
    pub runtime_name: Option<String>,
    /// Exact `runtime.version`
    pub runtime_version: Option<String>,
    /// Exact `vendor`
    pub vendor: Option<String>,
    /// Name of a `JAVA*_HOME` variable that must point at the toolchain
    pub env: Option<String>,
}

impl Constraints {
    /// Whether no constraint was supplied at all.
    pub fn is_empty(&self) -> bool {
        self.version.is_none()
            && self.runtime_name.is_none()
            && self.runtime_version.is_none()
            && self.vendor.is_none()
            && self.env.is_none()
    }
}

/// Required provide values, keyed by provide name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementSet {
    requirements: BTreeMap<String, String>,
}

impl RequirementSet {
    /// Create an empty requirement set.
    pub fn new() -> Self {
        RequirementSet::default()
    }

    /// Build a requirement set from the constraints that were actually supplied.
    pub fn from_constraints(constraints: &Constraints) -> Self {
        let mut set = RequirementSet::new();
        let fields = [
            (VERSION, &constraints.version),
            (RUNTIME_NAME, &constraints.runtime_name),
            (RUNTIME_VERSION, &constraints.runtime_version),
            (VENDOR, &constraints.vendor),
            (ENV, &constraints.env),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                set.insert(key, value.clone());
            }
        }
        set
    }

    /// Add or replace a requirement.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.requirements.insert(key.into(), value.into());
    }

    /// Add a requirement (builder style).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Whether there are no requirements.
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    /// Iterate requirements in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.requirements
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether `model` satisfies every requirement.
    pub fn matches(&self, model: &ToolchainModel) -> bool {
        matches(model, self)
    }
}

impl fmt::Display for RequirementSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.requirements.is_empty() {
            return write!(f, "jdk [ any ]");
        }
        write!(f, "jdk [")?;
        for (key, value) in &self.requirements {
            write!(f, " {}='{}'", key, value)?;
        }
        write!(f, " ]")
    }
}

/// Whether `model` provides every key in `requirements` with a matching value.
pub fn matches(model: &ToolchainModel, requirements: &RequirementSet) -> bool {
    for (key, required) in requirements.iter() {
        let Some(provided) = model.provide(key) else {
            tracing::debug!("{} is missing required property: {}", model, key);
            return false;
        };
        if !matches_value(key, required, provided) {
            tracing::debug!(
                "{} doesn't match required property: {} ({} != {})",
                model,
                key,
                provided,
                required
            );
            return false;
        }
    }
    true
}

/// Compare one required value against a provided one.
pub fn matches_value(key: &str, required: &str, provided: &str) -> bool {
    match key {
        VERSION => match required.parse::<VersionRequirement>() {
            Ok(req) => req.matches(provided),
            Err(e) => {
                tracing::debug!("ignoring unusable version requirement: {}", e);
                false
            }
        },
        ENV => provided.split(',').any(|token| token.trim() == required),
        _ => provided == required,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Provides;

    fn model(pairs: &[(&str, &str)]) -> ToolchainModel {
        let provides: Provides = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ToolchainModel::jdk("/opt/jdk", provides)
    }

    #[test]
    fn test_version_prefix_match() {
        let reqs = RequirementSet::new().with(VERSION, "17");
        assert!(matches(&model(&[(VERSION, "17.0.9")]), &reqs));
        assert!(!matches(&model(&[(VERSION, "170.1")]), &reqs));
    }

    #[test]
    fn test_version_range_match() {
        let reqs = RequirementSet::new().with(VERSION, "[11,17)");
        assert!(matches(&model(&[(VERSION, "11.0.2")]), &reqs));
        assert!(!matches(&model(&[(VERSION, "17.0.1")]), &reqs));
    }

    #[test]
    fn test_malformed_range_never_matches() {
        let reqs = RequirementSet::new().with(VERSION, "[11,");
        assert!(!matches(&model(&[(VERSION, "11.0.2")]), &reqs));
    }

    #[test]
    fn test_exact_match_for_other_keys() {
        let reqs = RequirementSet::new().with(RUNTIME_NAME, "X");
        assert!(!matches(&model(&[(VERSION, "17"), (RUNTIME_NAME, "Y")]), &reqs));
        assert!(matches(&model(&[(VERSION, "17"), (RUNTIME_NAME, "X")]), &reqs));
    }

    #[test]
    fn test_missing_key_does_not_match() {
        let reqs = RequirementSet::new().with(VENDOR, "Acme");
        assert!(!matches(&model(&[(VERSION, "17")]), &reqs));
    }

    #[test]
    fn test_env_token_match() {
        let reqs = RequirementSet::new().with(ENV, "JAVA17_HOME");
        assert!(matches(
            &model(&[(VERSION, "17"), (ENV, "JAVA17_HOME,JAVA_HOME")]),
            &reqs
        ));
        assert!(matches(&model(&[(VERSION, "17"), (ENV, "JAVA17_HOME")]), &reqs));
        assert!(!matches(&model(&[(VERSION, "17"), (ENV, "JAVA_HOME")]), &reqs));
        // no substring matches
        let reqs = RequirementSet::new().with(ENV, "JAVA1");
        assert!(!matches(&model(&[(VERSION, "17"), (ENV, "JAVA17_HOME")]), &reqs));
    }

    #[test]
    fn test_all_keys_must_match() {
        let reqs = RequirementSet::new()
            .with(VERSION, "17")
            .with(VENDOR, "Acme");
        assert!(matches(&model(&[(VERSION, "17.0.1"), (VENDOR, "Acme")]), &reqs));
        assert!(!matches(&model(&[(VERSION, "17.0.1"), (VENDOR, "Other")]), &reqs));
    }

    #[test]
    fn test_from_constraints_omits_unset() {
        let constraints = Constraints {
            version: Some("21".into()),
            vendor: Some("Acme".into()),
            ..Default::default()
        };
        let reqs = RequirementSet::from_constraints(&constraints);
        let keys: Vec<&str> = reqs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![VENDOR, VERSION]);
        assert_eq!(reqs.to_string(), "jdk [ vendor='Acme' version='21' ]");
    }

    #[test]
    fn test_empty_constraints() {
        assert!(Constraints::default().is_empty());
        assert!(RequirementSet::from_constraints(&Constraints::default()).is_empty());
        assert_eq!(RequirementSet::new().to_string(), "jdk [ any ]");
    }
}
