//! Shared helpers for behaviour tests.

use fioctl_targets::api::{ApiError, AppBundle, Target, TargetSet, TargetsApi};
use serde_json::{Value, json};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Hex SHA-256 given to every fake target.
pub const FAKE_SHA256: &str = "abababababababababababababababababababababababababababababababab";

/// Factory every scenario operates on.
pub const FACTORY: &str = "acme";

/// In-memory stand-in for the targets API.
#[derive(Debug, Default)]
pub struct FakeApi {
    /// Targets returned by `list_targets`.
    pub targets: TargetSet,
    /// Bundles keyed by app name.
    pub bundles: BTreeMap<String, AppBundle>,
    /// `target/app` pairs requested through `fetch_app_bundle`.
    pub bundle_requests: RefCell<Vec<String>>,
}

impl FakeApi {
    /// Build a fake serving targets with the given custom metadata.
    pub fn with_customs(customs: &BTreeMap<String, Value>) -> Self {
        let targets = customs
            .iter()
            .map(|(name, custom)| (name.clone(), fake_target(custom)))
            .collect();
        Self {
            targets,
            ..Self::default()
        }
    }
}

impl TargetsApi for FakeApi {
    fn list_targets(&self, factory: &str) -> Result<TargetSet, ApiError> {
        assert_eq!(factory, FACTORY, "unexpected factory");
        Ok(self.targets.clone())
    }

    fn fetch_app_bundle(
        &self,
        _factory: &str,
        target: &str,
        app: &str,
    ) -> Result<AppBundle, ApiError> {
        self.bundle_requests
            .borrow_mut()
            .push(format!("{target}/{app}"));
        self.bundles
            .get(app)
            .cloned()
            .ok_or_else(|| ApiError::NotFound {
                url: format!("fake://{target}/{app}"),
            })
    }
}

/// Wrap custom metadata in a target with a fixed hash.
pub fn fake_target(custom: &Value) -> Target {
    serde_json::from_value(json!({
        "hashes": {"sha256": FAKE_SHA256},
        "length": 0,
        "custom": custom,
    }))
    .expect("fake target should parse")
}

/// Count the data rows of the `TARGET NAME` table in `output`.
pub fn hash_table_rows(output: &str) -> usize {
    output
        .lines()
        .skip_while(|line| !line.starts_with("TARGET NAME"))
        .skip(2)
        .take_while(|line| !line.is_empty())
        .count()
}
