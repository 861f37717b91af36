//! Chat badges, parsed from the `badges` tag.

use smallvec::SmallVec;

/// A single `name/version` badge.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Badge {
  name: String,
  version: String,
}

generate_getters! {
  for Badge as self {
    /// Name of the badge, e.g. `moderator`.
    name -> &str = self.name.as_ref(),

    /// Version of the badge, e.g. `1`.
    ///
    /// For `subscriber`, this is the tier and month count combined.
    version -> &str = self.version.as_ref(),
  }
}

/// A mapping of badge names to versions.
///
/// Parsing is best-effort: malformed entries are dropped,
/// and it never fails.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BadgeSet(SmallVec<[Badge; 4]>);

impl BadgeSet {
  /// Parse a `name1/version1,name2/version2` list.
  ///
  /// Entries which do not consist of exactly two `/`-separated parts are skipped.
  /// If a name is repeated, the last version wins.
  pub fn parse(src: &str) -> Self {
    let mut set = BadgeSet::default();
    for entry in src.split(',') {
      let mut parts = entry.split('/');
      let (Some(name), Some(version), None) = (parts.next(), parts.next(), parts.next()) else {
        continue;
      };
      set.insert(name, version);
    }
    set
  }

  fn insert(&mut self, name: &str, version: &str) {
    match self.0.iter_mut().find(|badge| badge.name == name) {
      Some(badge) => badge.version = version.into(),
      None => self.0.push(Badge {
        name: name.into(),
        version: version.into(),
      }),
    }
  }

  /// Whether a badge named `name` is present.
  pub fn contains(&self, name: &str) -> bool {
    self.0.iter().any(|badge| badge.name == name)
  }

  /// Version of the badge named `name`.
  pub fn version(&self, name: &str) -> Option<&str> {
    self
      .0
      .iter()
      .find(|badge| badge.name == name)
      .map(|badge| badge.version.as_str())
  }

  pub fn iter(&self) -> impl ExactSizeIterator<Item = &Badge> + '_ {
    self.0.iter()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_badges() {
    let set = BadgeSet::parse("moderator/1,subscriber/12");
    assert_eq!(set.len(), 2);
    assert!(set.contains("moderator"));
    assert_eq!(set.version("subscriber"), Some("12"));
    assert!(!set.contains("vip"));
  }

  #[test]
  fn malformed_entries_are_skipped() {
    let set = BadgeSet::parse("vip,staff/1/2,,broadcaster/1,/");
    let names: Vec<_> = set.iter().map(|badge| badge.name()).collect();
    // `/` splits into two empty parts, which is still a well-formed pair
    assert_eq!(names, ["broadcaster", ""]);
  }

  #[test]
  fn never_fails() {
    for src in ["", ",", "/", "//", "a/b,", "ü/ß,,,x"] {
      let set = BadgeSet::parse(src);
      for badge in set.iter() {
        assert!(!badge.name().contains('/'));
        assert!(!badge.version().contains('/'));
      }
    }
  }

  #[test]
  fn repeated_name_overwrites() {
    let set = BadgeSet::parse("subscriber/3,subscriber/6");
    assert_eq!(set.len(), 1);
    assert_eq!(set.version("subscriber"), Some("6"));
  }
}
