use crate::file::FileConfig;
use depdiff_core::{ChangeKind, CheckDocs};
use std::collections::BTreeSet;
use std::fmt;
use std::io;
use thiserror::Error;

/// Environment variables read by [`ActionConfig::from_env`]
pub mod env_keys {
    pub const REPOSITORY: &str = "GITHUB_REPOSITORY";
    pub const BASE_REF: &str = "GITHUB_BASE_REF";
    pub const HEAD_REF: &str = "GITHUB_HEAD_REF";
    pub const GIT_REF: &str = "GITHUB_REF";
    pub const SHA: &str = "GITHUB_SHA";
    pub const CHECKS: &str = "INPUT_CHECKS";
    pub const CHANGE_TYPES: &str = "INPUT_CHANGE_TYPES";
    pub const REPO_TOKEN: &str = "INPUT_REPO_TOKEN";
    pub const TOKEN: &str = "GITHUB_TOKEN";
}

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid {field}: '{value}'")]
    Invalid { field: &'static str, value: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

/// `owner/repo` pair of the repository under review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub repo: String,
}

impl Repository {
    /// Parse `owner/repo`
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.split('/').collect::<Vec<_>>().as_slice() {
            [owner, repo] if !owner.is_empty() && !repo.is_empty() => Ok(Self {
                owner: (*owner).to_string(),
                repo: (*repo).to_string(),
            }),
            _ => Err(ConfigError::Invalid {
                field: "repository",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Everything a dependency-diff run needs from its environment
#[derive(Debug, Clone, PartialEq)]
pub struct ActionConfig {
    pub repository: Repository,
    /// Base reference of the pull request (usually the default branch)
    pub base_ref: String,
    /// Head reference of the pull request source branch
    pub head_ref: String,
    /// Full git ref, `refs/pull/<n>/merge` for pull request events
    pub git_ref: Option<String>,
    pub head_sha: Option<String>,
    /// Checks requested from the scanner; empty means all
    pub checks: Vec<String>,
    /// Change kinds to report; empty means all
    pub change_kinds: BTreeSet<ChangeKind>,
    pub token: Option<String>,
    pub publish_comment: bool,
    pub publish_check_run: bool,
}

impl ActionConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let repository = get(env_keys::REPOSITORY)
            .ok_or(ConfigError::Missing("repository"))
            .and_then(|s| Repository::parse(&s))?;
        let base_ref = get(env_keys::BASE_REF).ok_or(ConfigError::Missing("base ref"))?;
        let head_ref = get(env_keys::HEAD_REF).ok_or(ConfigError::Missing("head ref"))?;

        let checks = get(env_keys::CHECKS)
            .map(|s| split_list(&s))
            .unwrap_or_default();
        let change_kinds = match get(env_keys::CHANGE_TYPES) {
            Some(s) => parse_change_kinds(split_list(&s))?,
            None => BTreeSet::new(),
        };

        Ok(Self {
            repository,
            base_ref,
            head_ref,
            git_ref: get(env_keys::GIT_REF),
            head_sha: get(env_keys::SHA),
            checks,
            change_kinds,
            token: get(env_keys::REPO_TOKEN).or_else(|| get(env_keys::TOKEN)),
            publish_comment: true,
            publish_check_run: false,
        })
    }

    /// Overlay settings from a config file
    ///
    /// Environment values win; the file only fills in lists left empty and
    /// sets the publishing switches.
    pub fn merge_file(&mut self, file: &FileConfig) -> Result<(), ConfigError> {
        if self.checks.is_empty() {
            if let Some(checks) = &file.checks {
                self.checks = checks.clone();
            }
        }
        if self.change_kinds.is_empty() {
            if let Some(kinds) = &file.change_types {
                self.change_kinds = parse_change_kinds(kinds.clone())?;
            }
        }
        if let Some(comment) = file.comment {
            self.publish_comment = comment;
        }
        if let Some(check_run) = file.check_run {
            self.publish_check_run = check_run;
        }
        Ok(())
    }

    /// Reject requested checks that are not in the reference table
    pub fn validate_checks(&self, docs: &CheckDocs) -> Result<(), ConfigError> {
        match self.checks.iter().find(|c| !docs.is_known(c)) {
            Some(unknown) => Err(ConfigError::Invalid {
                field: "check",
                value: unknown.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Whether records of this kind should be reported
    pub fn includes(&self, kind: ChangeKind) -> bool {
        self.change_kinds.is_empty() || self.change_kinds.contains(&kind)
    }

    /// Pull request number from a `refs/pull/<n>/merge` ref
    pub fn pull_request_number(&self) -> Result<u64, ConfigError> {
        let git_ref = self.git_ref.as_deref().ok_or(ConfigError::Missing("github ref"))?;
        let invalid = || ConfigError::Invalid {
            field: "github ref",
            value: git_ref.to_string(),
        };

        match git_ref.split('/').collect::<Vec<_>>().as_slice() {
            [_, _, number, _] => number.parse().map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_change_kinds(items: Vec<String>) -> Result<BTreeSet<ChangeKind>, ConfigError> {
    items
        .into_iter()
        .map(|item| {
            ChangeKind::parse(&item).ok_or(ConfigError::Invalid {
                field: "change type",
                value: item,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn base_vars() -> Vec<(&'static str, &'static str)> {
        vec![
            (env_keys::REPOSITORY, "ossf/scorecard"),
            (env_keys::BASE_REF, "main"),
            (env_keys::HEAD_REF, "feature"),
            (env_keys::GIT_REF, "refs/pull/42/merge"),
        ]
    }

    #[test]
    fn test_minimal_env() {
        let config = ActionConfig::from_lookup(lookup(&base_vars())).unwrap();
        assert_eq!(config.repository.to_string(), "ossf/scorecard");
        assert_eq!(config.base_ref, "main");
        assert_eq!(config.head_ref, "feature");
        assert!(config.checks.is_empty());
        assert!(config.includes(ChangeKind::Added));
        assert!(config.includes(ChangeKind::Removed));
        assert!(config.publish_comment);
        assert!(!config.publish_check_run);
    }

    #[test]
    fn test_missing_base_ref() {
        let vars: Vec<_> = base_vars()
            .into_iter()
            .filter(|(k, _)| *k != env_keys::BASE_REF)
            .collect();
        let err = ActionConfig::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("base ref")));
    }

    #[test]
    fn test_empty_head_ref_is_missing() {
        let mut vars = base_vars();
        vars[2] = (env_keys::HEAD_REF, "");
        let err = ActionConfig::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("head ref")));
    }

    #[test]
    fn test_invalid_repository() {
        let mut vars = base_vars();
        vars[0] = (env_keys::REPOSITORY, "just-a-name");
        let err = ActionConfig::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "repository", .. }));
    }

    #[test]
    fn test_checks_and_change_types() {
        let mut vars = base_vars();
        vars.push((env_keys::CHECKS, "Code-Review, Maintained,,"));
        vars.push((env_keys::CHANGE_TYPES, "added,removed"));
        let config = ActionConfig::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.checks, vec!["Code-Review", "Maintained"]);
        assert!(config.includes(ChangeKind::Added));
        assert!(config.includes(ChangeKind::Removed));
        assert!(!config.includes(ChangeKind::Updated));
    }

    #[test]
    fn test_invalid_change_type() {
        let mut vars = base_vars();
        vars.push((env_keys::CHANGE_TYPES, "added,renamed"));
        let err = ActionConfig::from_lookup(lookup(&vars)).unwrap_err();
        match err {
            ConfigError::Invalid { field, value } => {
                assert_eq!(field, "change type");
                assert_eq!(value, "renamed");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_token_precedence() {
        let mut vars = base_vars();
        vars.push((env_keys::TOKEN, "from-github"));
        vars.push((env_keys::REPO_TOKEN, "from-input"));
        let config = ActionConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.token.as_deref(), Some("from-input"));
    }

    #[test]
    fn test_pull_request_number() {
        let config = ActionConfig::from_lookup(lookup(&base_vars())).unwrap();
        assert_eq!(config.pull_request_number().unwrap(), 42);
    }

    #[test]
    fn test_pull_request_number_rejects_branch_ref() {
        let mut vars = base_vars();
        vars[3] = (env_keys::GIT_REF, "refs/heads/main");
        let config = ActionConfig::from_lookup(lookup(&vars)).unwrap();
        assert!(matches!(
            config.pull_request_number(),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_pull_request_number_rejects_non_numeric() {
        let mut vars = base_vars();
        vars[3] = (env_keys::GIT_REF, "refs/pull/abc/merge");
        let config = ActionConfig::from_lookup(lookup(&vars)).unwrap();
        assert!(config.pull_request_number().is_err());
    }

    #[test]
    fn test_validate_checks() {
        let docs = CheckDocs::built_in().unwrap();
        let mut vars = base_vars();
        vars.push((env_keys::CHECKS, "Code-Review,Bogus"));
        let config = ActionConfig::from_lookup(lookup(&vars)).unwrap();
        assert!(matches!(
            config.validate_checks(&docs),
            Err(ConfigError::Invalid { field: "check", .. })
        ));
    }

    #[test]
    fn test_merge_file_fills_gaps_only() {
        let mut vars = base_vars();
        vars.push((env_keys::CHECKS, "Maintained"));
        let mut config = ActionConfig::from_lookup(lookup(&vars)).unwrap();

        let file = FileConfig {
            checks: Some(vec!["Code-Review".to_string()]),
            change_types: Some(vec!["added".to_string()]),
            comment: Some(false),
            check_run: Some(true),
        };
        config.merge_file(&file).unwrap();

        assert_eq!(config.checks, vec!["Maintained"]);
        assert!(config.includes(ChangeKind::Added));
        assert!(!config.includes(ChangeKind::Removed));
        assert!(!config.publish_comment);
        assert!(config.publish_check_run);
    }
}
