//! TOML golden-fixture files.
//!
//! A fixture file carries a `format` tag and a list of `[[cases]]`. Each case has an `id`, an
//! optional `status` (`active`, `xfail`, `skip`) and a `reason` that is required exactly when
//! the status is not `active`.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FixtureStatus {
    #[default]
    Active,
    Xfail,
    Skip,
}

/// Fields every case shares. Flatten it into the crate-specific case type.
#[derive(Clone, Debug, Deserialize)]
pub struct CaseMeta {
    pub id: String,
    #[serde(default)]
    pub status: FixtureStatus,
    pub reason: Option<String>,
}

pub trait FixtureCase {
    fn meta(&self) -> &CaseMeta;
}

#[derive(Debug, Deserialize)]
struct FixtureFile<C> {
    format: String,
    cases: Vec<C>,
}

/// Loads and validates the cases in `path`. Panics with the file name on any problem.
pub fn load_cases<C>(path: &Path, format: &str) -> Vec<C>
where
    C: DeserializeOwned + FixtureCase,
{
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read fixture file {path:?}: {err}"));
    let file: FixtureFile<C> = toml::from_str(&content)
        .unwrap_or_else(|err| panic!("failed to parse fixture file {path:?}: {err}"));
    assert_eq!(
        file.format, format,
        "unsupported fixture format in {path:?}"
    );
    assert!(!file.cases.is_empty(), "no cases in {path:?}");

    let mut seen = BTreeSet::new();
    for case in &file.cases {
        let meta = case.meta();
        assert!(
            seen.insert(meta.id.clone()),
            "duplicate case id '{}' in {path:?}",
            meta.id
        );
        let has_reason = meta.reason.as_deref().is_some_and(|r| !r.is_empty());
        match meta.status {
            FixtureStatus::Active => assert!(
                meta.reason.is_none(),
                "case '{}' has a reason but is active in {path:?}",
                meta.id
            ),
            FixtureStatus::Xfail | FixtureStatus::Skip => assert!(
                has_reason,
                "case '{}' with status {:?} is missing a reason in {path:?}",
                meta.id,
                meta.status
            ),
        }
    }
    file.cases
}

/// Optional case-id substring filter read from an environment variable.
pub struct CaseFilter(Option<String>);

impl CaseFilter {
    pub fn from_env(key: &str) -> Self {
        Self(std::env::var(key).ok().filter(|v| !v.is_empty()))
    }

    pub fn matches(&self, id: &str) -> bool {
        self.0.as_deref().is_none_or(|needle| id.contains(needle))
    }
}
