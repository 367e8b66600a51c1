//! The five pieces of revision metadata the plugin knows how to extract.

use std::fmt;

/// Command to get the commit hash.
pub const COMMITHASH_COMMAND: &str = "rev-parse HEAD";
/// Command to get the version.
pub const VERSION_COMMAND: &str = "describe --always";
/// Command to get the branch.
pub const BRANCH_COMMAND: &str = "rev-parse --abbrev-ref HEAD";
/// Command to get the last commit time (strict ISO 8601).
pub const LASTCOMMITTIME_COMMAND: &str = "log -1 --format=%cI";
/// Command to get the subject line of the last commit.
pub const LASTCOMMITMSG_COMMAND: &str = "log -1 --format=%s";

pub const COMMITHASH_VAR: &str = "GIT_COMMITHASH";
pub const VERSION_VAR: &str = "GIT_VERSION";
pub const BRANCH_VAR: &str = "GIT_BRANCH";
pub const LASTCOMMITTIME_VAR: &str = "GIT_LASTCOMMITTIME";
pub const LASTCOMMITMSG_VAR: &str = "GIT_LASTCOMMITMSG";

/// Suffix appended to the default version command for lightweight tags.
pub const LIGHTWEIGHT_TAGS_SUFFIX: &str = " --tags";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    CommitHash,
    Version,
    Branch,
    LastCommitTime,
    LastCommitMsg,
}

impl Feature {
    /// Every feature, in extraction order.
    pub const ALL: [Feature; 5] = [
        Feature::CommitHash,
        Feature::Version,
        Feature::Branch,
        Feature::LastCommitTime,
        Feature::LastCommitMsg,
    ];

    /// Option name of the (ignored) boolean flag for this feature.
    pub fn flag_name(self) -> &'static str {
        match self {
            Feature::CommitHash => "commitHash",
            Feature::Version => "version",
            Feature::Branch => "branch",
            Feature::LastCommitTime => "lastCommitTime",
            Feature::LastCommitMsg => "lastCommitMsg",
        }
    }

    pub fn default_command(self) -> &'static str {
        match self {
            Feature::CommitHash => COMMITHASH_COMMAND,
            Feature::Version => VERSION_COMMAND,
            Feature::Branch => BRANCH_COMMAND,
            Feature::LastCommitTime => LASTCOMMITTIME_COMMAND,
            Feature::LastCommitMsg => LASTCOMMITMSG_COMMAND,
        }
    }

    pub fn default_var(self) -> &'static str {
        match self {
            Feature::CommitHash => COMMITHASH_VAR,
            Feature::Version => VERSION_VAR,
            Feature::Branch => BRANCH_VAR,
            Feature::LastCommitTime => LASTCOMMITTIME_VAR,
            Feature::LastCommitMsg => LASTCOMMITMSG_VAR,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag_name())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_order_is_fixed() {
        let names: Vec<_> = Feature::ALL.iter().map(|f| f.flag_name()).collect();
        assert_eq!(
            names,
            ["commitHash", "version", "branch", "lastCommitTime", "lastCommitMsg"]
        );
    }

    #[test]
    fn test_default_vars_are_distinct() {
        let vars: HashSet<_> = Feature::ALL.iter().map(|f| f.default_var()).collect();
        assert_eq!(vars.len(), Feature::ALL.len());
    }

    #[test]
    fn test_defaults_are_non_empty() {
        for feature in Feature::ALL {
            assert!(!feature.default_command().is_empty(), "{feature}");
            assert!(feature.default_var().starts_with("GIT_"), "{feature}");
        }
    }
}
