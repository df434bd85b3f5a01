//! JDK version ordering and version requirements.
//!
//! JDK versions are not semver (`1.8.0_392`, `17`, `21.0.1`, `22-ea`), so they
//! are compared segment by segment on `.` boundaries.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Compare two version strings by dot segments.
///
/// Each segment compares its leading digits numerically, then whatever
/// follows them as a string, so `9 < 10 < 11-ea`. A segment without leading
/// digits sorts before any segment with them. When all shared segments are
/// equal the version with fewer segments is lesser, so `11 < 11.0.1`.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let sa: Vec<&str> = a.split('.').collect();
    let sb: Vec<&str> = b.split('.').collect();

    for (x, y) in sa.iter().zip(sb.iter()) {
        let ord = compare_segments(x, y);
        if ord != Ordering::Equal {
            return ord;
        }
    }

    sa.len().cmp(&sb.len())
}

fn compare_segments(a: &str, b: &str) -> Ordering {
    let (da, ra) = split_digits(a);
    let (db, rb) = split_digits(b);

    let numeric = match (da.is_empty(), db.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => {
            // compare digit runs without parsing, so any length works
            let (na, nb) = (trim_zeros(da), trim_zeros(db));
            na.len().cmp(&nb.len()).then_with(|| na.cmp(nb))
        }
    };
    numeric.then_with(|| ra.cmp(rb))
}

fn split_digits(segment: &str) -> (&str, &str) {
    let end = segment
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(segment.len());
    segment.split_at(end)
}

fn trim_zeros(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0"
    } else {
        trimmed
    }
}

/// Whether `version` equals `prefix` or starts with `prefix` followed by a dot.
pub fn is_dotted_prefix(prefix: &str, version: &str) -> bool {
    version == prefix
        || (version.len() > prefix.len()
            && version.starts_with(prefix)
            && version.as_bytes()[prefix.len()] == b'.')
}

/// Error parsing a version range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("unbalanced brackets in version range `{0}`")]
    Unbalanced(String),

    #[error("invalid version range `{0}`")]
    Invalid(String),
}

/// One bound of a [`VersionRange`].
#[derive(Debug, Clone, PartialEq, Eq)]
struct Bound {
    version: String,
    inclusive: bool,
}

/// A single interval such as `[11,17)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    lower: Option<Bound>,
    upper: Option<Bound>,
}

impl VersionRange {
    /// Whether `version` falls inside this interval.
    pub fn contains(&self, version: &str) -> bool {
        if let Some(lower) = &self.lower {
            match compare_versions(version, &lower.version) {
                Ordering::Less => return false,
                Ordering::Equal if !lower.inclusive => return false,
                _ => {}
            }
        }
        if let Some(upper) = &self.upper {
            match compare_versions(version, &upper.version) {
                Ordering::Greater => return false,
                Ordering::Equal if !upper.inclusive => return false,
                _ => {}
            }
        }
        true
    }

    fn parse(text: &str) -> Result<Self, RangeError> {
        let invalid = || RangeError::Invalid(text.to_string());

        let lower_inclusive = match text.chars().next() {
            Some('[') => true,
            Some('(') => false,
            _ => return Err(invalid()),
        };
        let upper_inclusive = match text.chars().last() {
            Some(']') => true,
            Some(')') => false,
            _ => return Err(invalid()),
        };
        let inner = text[1..text.len() - 1].trim();

        match inner.split_once(',') {
            None => {
                // [21] pins an exact version
                if inner.is_empty() || !lower_inclusive || !upper_inclusive {
                    return Err(invalid());
                }
                let bound = Bound {
                    version: inner.to_string(),
                    inclusive: true,
                };
                Ok(VersionRange {
                    lower: Some(bound.clone()),
                    upper: Some(bound),
                })
            }
            Some((lo, hi)) => {
                let (lo, hi) = (lo.trim(), hi.trim());
                if hi.contains(',') || (lo.is_empty() && hi.is_empty()) {
                    return Err(invalid());
                }
                let lower = (!lo.is_empty()).then(|| Bound {
                    version: lo.to_string(),
                    inclusive: lower_inclusive,
                });
                let upper = (!hi.is_empty()).then(|| Bound {
                    version: hi.to_string(),
                    inclusive: upper_inclusive,
                });
                if let (Some(l), Some(u)) = (&lower, &upper) {
                    if compare_versions(&l.version, &u.version) == Ordering::Greater {
                        return Err(invalid());
                    }
                }
                Ok(VersionRange { lower, upper })
            }
        }
    }
}

/// A requested version: either a plain version (exact or dotted-prefix match)
/// or a union of ranges in bracket notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRequirement {
    /// `17` matches `17`, `17.0.9`, but not `170`.
    Prefix(String),
    /// `[11,17),[21,)`
    Ranges(Vec<VersionRange>),
}

impl VersionRequirement {
    /// Whether a discovered version satisfies this requirement.
    pub fn matches(&self, version: &str) -> bool {
        match self {
            VersionRequirement::Prefix(prefix) => is_dotted_prefix(prefix, version),
            VersionRequirement::Ranges(ranges) => ranges.iter().any(|r| r.contains(version)),
        }
    }
}

impl FromStr for VersionRequirement {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.starts_with('[') && !s.starts_with('(') {
            return Ok(VersionRequirement::Prefix(s.to_string()));
        }

        let mut ranges = Vec::new();
        let mut rest = s;
        while !rest.is_empty() {
            let close = rest
                .find(|c: char| c == ']' || c == ')')
                .ok_or_else(|| RangeError::Unbalanced(s.to_string()))?;
            ranges.push(VersionRange::parse(&rest[..=close])?);

            rest = rest[close + 1..].trim_start();
            if let Some(next) = rest.strip_prefix(',') {
                rest = next.trim_start();
                if rest.is_empty() {
                    return Err(RangeError::Invalid(s.to_string()));
                }
            } else if !rest.is_empty() {
                return Err(RangeError::Invalid(s.to_string()));
            }
        }

        Ok(VersionRequirement::Ranges(ranges))
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.lower, &self.upper) {
            (Some(l), Some(u)) if l == u => write!(f, "[{}]", l.version),
            _ => {
                match &self.lower {
                    Some(l) if l.inclusive => write!(f, "[{}", l.version)?,
                    Some(l) => write!(f, "({}", l.version)?,
                    None => write!(f, "(")?,
                }
                write!(f, ",")?;
                match &self.upper {
                    Some(u) if u.inclusive => write!(f, "{}]", u.version),
                    Some(u) => write!(f, "{})", u.version),
                    None => write!(f, ")"),
                }
            }
        }
    }
}
