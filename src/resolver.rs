//! Release tag resolution
//!
//! Maps each configured CPython release series to the newest upstream tag
//! that belongs to it. Tags that do not parse as a strict `vX.Y.Z` release
//! (pre-releases, non-version tags) are ignored, and a series with no
//! matching tag is simply absent from the result.

use std::collections::BTreeMap;
use std::fmt;

/// A CPython release series to vendor for, e.g. 3.7
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TargetVersion {
    pub major: u32,
    pub minor: u32,
}

impl TargetVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for TargetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// A full `major.minor.patch` release version
///
/// Derived ordering is lexicographic over the numeric fields, which is
/// exactly the release ordering within a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReleaseVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ReleaseVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn series(&self) -> TargetVersion {
        TargetVersion::new(self.major, self.minor)
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// The tag chosen for one target series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTag {
    pub version: ReleaseVersion,
    pub tag: String,
}

/// Parse a tag of the exact form `v<major>.<minor>.<patch>`
///
/// Components must be purely numeric, so `v3.11.0rc1` and `v3.11` are
/// rejected along with anything that is not a final release tag.
pub fn parse_release_tag(tag: &str) -> Option<ReleaseVersion> {
    let rest = tag.strip_prefix('v')?;
    let mut parts = rest.split('.');

    let major = parse_component(parts.next()?)?;
    let minor = parse_component(parts.next()?)?;
    let patch = parse_component(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }

    Some(ReleaseVersion::new(major, minor, patch))
}

fn parse_component(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Resolve each target series to the numerically greatest matching tag
///
/// Pure function of its inputs; the order of `tags` does not affect the
/// result. Targets without a matching tag get no entry.
pub fn resolve<S: AsRef<str>>(
    targets: &[TargetVersion],
    tags: &[S],
) -> BTreeMap<TargetVersion, ResolvedTag> {
    let mut resolved: BTreeMap<TargetVersion, ResolvedTag> = BTreeMap::new();

    for tag in tags {
        let tag = tag.as_ref();
        let Some(version) = parse_release_tag(tag) else {
            continue;
        };
        if !targets.contains(&version.series()) {
            continue;
        }

        match resolved.get_mut(&version.series()) {
            Some(current) if current.version >= version => {}
            Some(current) => {
                *current = ResolvedTag {
                    version,
                    tag: tag.to_string(),
                };
            }
            None => {
                resolved.insert(
                    version.series(),
                    ResolvedTag {
                        version,
                        tag: tag.to_string(),
                    },
                );
            }
        }
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_release_tag() {
        assert_eq!(
            parse_release_tag("v3.7.13"),
            Some(ReleaseVersion::new(3, 7, 13))
        );
        assert_eq!(parse_release_tag("v0.9.8"), Some(ReleaseVersion::new(0, 9, 8)));
    }

    #[test]
    fn test_parse_rejects_non_release_tags() {
        assert_eq!(parse_release_tag("3.7.13"), None);
        assert_eq!(parse_release_tag("v3.7"), None);
        assert_eq!(parse_release_tag("v3.7.13.1"), None);
        assert_eq!(parse_release_tag("v3.11.0rc1"), None);
        assert_eq!(parse_release_tag("v3.11.0a7"), None);
        assert_eq!(parse_release_tag("v3..1"), None);
        assert_eq!(parse_release_tag("v3.+7.1"), None);
        assert_eq!(parse_release_tag("release-3.7.1"), None);
        assert_eq!(parse_release_tag(""), None);
    }

    #[test]
    fn test_release_version_ordering_is_numeric() {
        // 3.7.10 > 3.7.9 numerically even though "10" < "9" lexicographically
        assert!(ReleaseVersion::new(3, 7, 10) > ReleaseVersion::new(3, 7, 9));
        assert!(ReleaseVersion::new(3, 10, 0) > ReleaseVersion::new(3, 9, 18));
    }

    #[test]
    fn test_resolve_picks_greatest_patch() {
        let targets = [TargetVersion::new(3, 7)];
        let tags = ["v3.7.1", "v3.7.10", "v3.7.3", "v3.7.9"];
        let resolved = resolve(&targets, &tags);

        let pick = &resolved[&TargetVersion::new(3, 7)];
        assert_eq!(pick.version, ReleaseVersion::new(3, 7, 10));
        assert_eq!(pick.tag, "v3.7.10");
    }

    #[test]
    fn test_resolve_silently_omits_unmatched_targets() {
        // Worked example: {v3.7.1, v3.7.3, v3.8.0} against {(3,7), (3,9)}
        let targets = [TargetVersion::new(3, 7), TargetVersion::new(3, 9)];
        let tags = ["v3.7.1", "v3.7.3", "v3.8.0"];
        let resolved = resolve(&targets, &tags);

        assert_eq!(resolved.len(), 1);
        let pick = &resolved[&TargetVersion::new(3, 7)];
        assert_eq!(pick.version, ReleaseVersion::new(3, 7, 3));
        assert_eq!(pick.tag, "v3.7.3");
        assert!(!resolved.contains_key(&TargetVersion::new(3, 9)));
    }

    #[test]
    fn test_resolve_is_order_insensitive() {
        let targets = [TargetVersion::new(3, 8), TargetVersion::new(3, 9)];
        let mut tags = vec!["v3.8.0", "v3.9.2", "v3.8.12", "v3.9.0", "v3.8.5"];
        let forward = resolve(&targets, &tags);
        tags.reverse();
        let backward = resolve(&targets, &tags);

        assert_eq!(forward, backward);
        assert_eq!(forward[&TargetVersion::new(3, 8)].tag, "v3.8.12");
        assert_eq!(forward[&TargetVersion::new(3, 9)].tag, "v3.9.2");
    }

    #[test]
    fn test_resolve_ignores_unparseable_tags() {
        let targets = [TargetVersion::new(3, 10)];
        let tags = ["v3.10.0rc2", "v3.10.0", "v3.10", "whatever"];
        let resolved = resolve(&targets, &tags);

        assert_eq!(resolved[&TargetVersion::new(3, 10)].tag, "v3.10.0");
    }

    #[test]
    fn test_resolve_result_sorted_by_target() {
        let targets = [
            TargetVersion::new(3, 9),
            TargetVersion::new(3, 7),
            TargetVersion::new(3, 8),
        ];
        let tags = ["v3.9.1", "v3.7.2", "v3.8.3"];
        let resolved = resolve(&targets, &tags);

        let order: Vec<_> = resolved.keys().copied().collect();
        assert_eq!(
            order,
            vec![
                TargetVersion::new(3, 7),
                TargetVersion::new(3, 8),
                TargetVersion::new(3, 9),
            ]
        );
    }
}
