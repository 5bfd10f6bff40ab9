//! Version normalization and range membership
//!
//! Versions are compared component by component (`2.10.0 > 2.9.0`), with an
//! optional fourth numeral and an optional stability suffix in the style used
//! by Composer and npm tags: `1.2.3`, `v1.2.3.4`, `1.0.0-RC1`, `2.0.0-beta.2`,
//! `3.1.0alpha3`, `1.0.0-dev`. Build metadata (`+build.5`) is ignored.

use std::cmp::Ordering;
use std::sync::LazyLock;

use lockdiff_core::error::VersionError;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Regex for decomposing a version without its `v` prefix
static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(\d+)\.(\d+)\.(\d+)(?:\.(\d+))?(?:[-._]?(dev|alpha|beta|rc|a|b)(?:[-.]?(\d+))?)?(?:\+[0-9a-z.\-]+)?$",
    )
    .expect("Invalid regex")
});

/// Stability of a release, ordered from least to most stable
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stability {
    /// Development snapshot
    Dev,
    /// Alpha pre-release
    Alpha,
    /// Beta pre-release
    Beta,
    /// Release candidate
    Rc,
    /// Final release
    Stable,
}

impl Stability {
    /// Whether this is anything other than a final release
    pub fn is_prerelease(&self) -> bool {
        !matches!(self, Self::Stable)
    }

    /// Returns the canonical suffix for this stability
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Rc => "RC",
            Self::Stable => "stable",
        }
    }

    fn from_tag(tag: &str) -> Self {
        match tag.to_lowercase().as_str() {
            "dev" => Self::Dev,
            "alpha" | "a" => Self::Alpha,
            "beta" | "b" => Self::Beta,
            "rc" => Self::Rc,
            _ => Self::Stable,
        }
    }
}

/// A version decomposed into comparable components
///
/// A missing stability number compares equal to zero (`RC` == `RC0`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NormalizedVersion {
    /// Major version
    pub major: u64,
    /// Minor version
    pub minor: u64,
    /// Patch version
    pub patch: u64,
    /// Optional fourth numeral (treated as 0 when absent)
    pub build: u64,
    /// Stability tag
    pub stability: Stability,
    /// Number attached to the stability tag (`RC2` -> 2)
    pub stability_number: Option<u64>,
}

impl NormalizedVersion {
    /// Whether this version is a pre-release
    pub fn is_prerelease(&self) -> bool {
        self.stability.is_prerelease()
    }
}

impl Ord for NormalizedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch, self.build)
            .cmp(&(other.major, other.minor, other.patch, other.build))
            .then(self.stability.cmp(&other.stability))
            .then(
                self.stability_number
                    .unwrap_or(0)
                    .cmp(&other.stability_number.unwrap_or(0)),
            )
    }
}

impl PartialEq for NormalizedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NormalizedVersion {}

impl PartialOrd for NormalizedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for NormalizedVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if self.build != 0 {
            write!(f, ".{}", self.build)?;
        }
        if self.stability.is_prerelease() {
            write!(f, "-{}", self.stability.as_str())?;
            if let Some(n) = self.stability_number {
                write!(f, "{}", n)?;
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for NormalizedVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(s)
    }
}

/// Remove one leading `v`/`V` from a version string
pub fn strip_prefix(version: &str) -> &str {
    version
        .strip_prefix('v')
        .or_else(|| version.strip_prefix('V'))
        .unwrap_or(version)
}

/// Decompose a version string into comparable components
pub fn normalize(version: &str) -> Result<NormalizedVersion, VersionError> {
    let trimmed = strip_prefix(version.trim());
    let invalid = || VersionError::InvalidVersion(version.to_string());

    let caps = VERSION_REGEX.captures(trimmed).ok_or_else(invalid)?;
    let number = |i: usize| -> Result<u64, VersionError> {
        match caps.get(i) {
            Some(m) => m.as_str().parse().map_err(|_| invalid()),
            None => Ok(0),
        }
    };

    let stability = caps
        .get(5)
        .map(|m| Stability::from_tag(m.as_str()))
        .unwrap_or(Stability::Stable);
    let stability_number = match caps.get(6) {
        Some(m) => Some(m.as_str().parse().map_err(|_| invalid())?),
        None => None,
    };

    Ok(NormalizedVersion {
        major: number(1)?,
        minor: number(2)?,
        patch: number(3)?,
        build: number(4)?,
        stability,
        stability_number,
    })
}

/// Whether a version is a pre-release (alpha, beta, rc or dev)
///
/// Branch identifiers such as `dev-main` or `2.x-dev` cannot be normalized
/// but are still development snapshots.
pub fn is_prerelease(version: &str) -> bool {
    match normalize(version) {
        Ok(v) => v.is_prerelease(),
        Err(_) => {
            let lower = version.trim().to_lowercase();
            lower.starts_with("dev-") || lower.ends_with("-dev")
        }
    }
}

/// Whether `version` falls in `(from, to]`, or equals `from` when both bounds match
pub fn in_range(version: &str, from: &str, to: &str) -> bool {
    let (Ok(version), Ok(from), Ok(to)) = (normalize(version), normalize(from), normalize(to))
    else {
        return false;
    };

    if from == to {
        return version == from;
    }

    from < version && version <= to
}

/// A version window used to filter release entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRange {
    /// Lower bound (exclusive unless equal to `to`)
    pub from: String,
    /// Upper bound (inclusive)
    pub to: String,
}

impl VersionRange {
    /// Create a new range
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Range membership
    pub fn contains(&self, version: &str) -> bool {
        in_range(version, &self.from, &self.to)
    }

    /// Range membership combined with the pre-release filter
    pub fn accepts(&self, version: &str, include_prerelease: bool) -> bool {
        if !include_prerelease && is_prerelease(version) {
            return false;
        }
        self.contains(version)
    }
}

impl std::fmt::Display for VersionRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_simple() {
        let v = normalize("1.2.3").unwrap();
        assert_eq!((v.major, v.minor, v.patch, v.build), (1, 2, 3, 0));
        assert_eq!(v.stability, Stability::Stable);
    }

    #[test]
    fn test_normalize_prefixes() {
        assert_eq!(normalize("v1.2.3").unwrap(), normalize("1.2.3").unwrap());
        assert_eq!(normalize("V1.2.3").unwrap(), normalize("1.2.3").unwrap());
    }

    #[test]
    fn test_normalize_fourth_numeral() {
        let v = normalize("1.2.3.4").unwrap();
        assert_eq!(v.build, 4);
        assert_eq!(normalize("1.2.3.0").unwrap(), normalize("1.2.3").unwrap());
    }

    #[test]
    fn test_normalize_stability_suffixes() {
        let rc = normalize("1.0.0-RC1").unwrap();
        assert_eq!(rc.stability, Stability::Rc);
        assert_eq!(rc.stability_number, Some(1));

        let beta = normalize("2.0.0-beta.2").unwrap();
        assert_eq!(beta.stability, Stability::Beta);
        assert_eq!(beta.stability_number, Some(2));

        assert_eq!(normalize("3.1.0alpha3").unwrap().stability, Stability::Alpha);
        assert_eq!(normalize("1.0.0-dev").unwrap().stability, Stability::Dev);
        assert_eq!(normalize("1.0.0-b1").unwrap().stability, Stability::Beta);
    }

    #[test]
    fn test_normalize_build_metadata_ignored() {
        assert_eq!(normalize("1.2.3+build.7").unwrap(), normalize("1.2.3").unwrap());
    }

    #[test]
    fn test_normalize_invalid() {
        assert!(normalize("dev-main").is_err());
        assert!(normalize("1.2").is_err());
        assert!(normalize("latest").is_err());
        assert!(normalize("1.2.3-foo").is_err());
        assert!(normalize("").is_err());
        assert_eq!(
            normalize("nope").unwrap_err(),
            VersionError::InvalidVersion("nope".to_string())
        );
    }

    #[test]
    fn test_numeric_comparison() {
        assert!(normalize("2.10.0").unwrap() > normalize("2.9.0").unwrap());
        assert!(normalize("1.0.0-alpha").unwrap() < normalize("1.0.0-beta").unwrap());
        assert!(normalize("1.0.0-RC2").unwrap() < normalize("1.0.0").unwrap());
        assert!(normalize("1.0.0-dev").unwrap() < normalize("1.0.0-alpha1").unwrap());
        assert!(normalize("1.0.0-RC1").unwrap() < normalize("1.0.0-RC2").unwrap());
    }

    #[test]
    fn test_is_prerelease() {
        assert!(is_prerelease("1.0.0-alpha"));
        assert!(is_prerelease("v1.0.0-RC1"));
        assert!(is_prerelease("dev-main"));
        assert!(is_prerelease("2.x-dev"));
        assert!(!is_prerelease("1.0.0"));
        assert!(!is_prerelease("garbage"));
    }

    #[test]
    fn test_in_range() {
        assert!(in_range("1.5.0", "1.0.0", "2.0.0"));
        assert!(in_range("2.0.0", "1.0.0", "2.0.0"));
        assert!(!in_range("1.0.0", "1.0.0", "2.0.0"));
        assert!(!in_range("2.0.1", "1.0.0", "2.0.0"));
        assert!(in_range("v2.10.0", "2.9.0", "V2.10.0"));
    }

    #[test]
    fn test_in_range_equal_bounds() {
        assert!(in_range("2.0.0", "2.0.0", "2.0.0"));
        assert!(in_range("v2.0.0", "2.0.0", "v2.0.0"));
        assert!(!in_range("1.0.0", "2.0.0", "2.0.0"));
    }

    #[test]
    fn test_in_range_unparsable() {
        assert!(!in_range("dev-main", "1.0.0", "2.0.0"));
        assert!(!in_range("1.5.0", "dev-main", "2.0.0"));
        assert!(!in_range("1.5.0", "1.0.0", "whatever"));
    }

    #[test]
    fn test_version_range_accepts() {
        let range = VersionRange::new("1.0.0", "2.0.0");
        assert!(range.accepts("1.1.0", false));
        assert!(!range.accepts("1.1.0-beta1", false));
        assert!(range.accepts("1.1.0-beta1", true));
    }

    #[test]
    fn test_display_is_canonical() {
        assert_eq!(normalize("v1.2.3").unwrap().to_string(), "1.2.3");
        assert_eq!(normalize("1.2.3.4").unwrap().to_string(), "1.2.3.4");
        assert_eq!(normalize("1.0.0-rc.2").unwrap().to_string(), "1.0.0-RC2");
        assert_eq!(normalize("1.0.0-beta").unwrap().to_string(), "1.0.0-beta");
    }

    fn version_strategy() -> impl Strategy<Value = (u64, u64, u64)> {
        (0u64..20, 0u64..20, 0u64..20)
    }

    fn prefix_strategy() -> impl Strategy<Value = &'static str> {
        prop_oneof![Just(""), Just("v"), Just("V")]
    }

    proptest! {
        #[test]
        fn prop_in_range_matches_numeric_order(
            v in version_strategy(),
            a in version_strategy(),
            b in version_strategy(),
            pv in prefix_strategy(),
            pa in prefix_strategy(),
            pb in prefix_strategy(),
        ) {
            prop_assume!(a < b);
            let version = format!("{}{}.{}.{}", pv, v.0, v.1, v.2);
            let from = format!("{}{}.{}.{}", pa, a.0, a.1, a.2);
            let to = format!("{}{}.{}.{}", pb, b.0, b.1, b.2);
            prop_assert_eq!(in_range(&version, &from, &to), a < v && v <= b);
        }

        #[test]
        fn prop_equal_bounds_is_exact_match(
            v in version_strategy(),
            x in version_strategy(),
            pv in prefix_strategy(),
        ) {
            let version = format!("{}{}.{}.{}", pv, v.0, v.1, v.2);
            let bound = format!("{}.{}.{}", x.0, x.1, x.2);
            prop_assert_eq!(
                in_range(&version, &bound, &bound),
                normalize(&version).unwrap() == normalize(&bound).unwrap()
            );
        }

        #[test]
        fn prop_normalize_idempotent(
            v in version_strategy(),
            p in prefix_strategy(),
            suffix in prop_oneof![
                Just(""), Just("-alpha"), Just("-beta.2"), Just("-RC1"), Just("-dev"), Just(".4")
            ],
        ) {
            let raw = format!("{}{}.{}.{}{}", p, v.0, v.1, v.2, suffix);
            let once = normalize(&raw).unwrap();
            prop_assert_eq!(normalize(strip_prefix(&raw)).unwrap(), once);
            prop_assert_eq!(normalize(&once.to_string()).unwrap(), once);
        }
    }
}
