use std::borrow::Borrow;
use std::ops::Deref;

/// Canonical channel name.
///
/// This is the channel login without the `#` prefix, in lowercase.
/// Every event that names a channel goes through [`ChannelName::resolve`]
/// before any lookup happens.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct ChannelName(String);

impl ChannelName {
  /// Get the string value of the channel name.
  pub fn as_str(&self) -> &str {
    self.0.as_str()
  }

  /// Normalize a protocol target into a channel name.
  ///
  /// Strips one leading `#`. Fails if nothing is left, or if the target is the
  /// `*` placeholder the server uses before login.
  pub fn resolve(target: &str) -> Result<Self, InvalidChannelName> {
    let name = target.strip_prefix('#').unwrap_or(target);
    match name {
      "" | "*" => Err(InvalidChannelName),
      name => Ok(Self(name.to_ascii_lowercase())),
    }
  }

  /// Name of a local channel which does not exist on the server.
  pub(crate) fn special(name: &str) -> Self {
    Self(name.into())
  }

  /// The name as it appears on the wire, prefixed by `#`.
  pub fn to_target(&self) -> String {
    format!("#{}", self.0)
  }
}

impl Deref for ChannelName {
  type Target = str;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl AsRef<str> for ChannelName {
  fn as_ref(&self) -> &str {
    self.0.as_ref()
  }
}

impl Borrow<str> for ChannelName {
  fn borrow(&self) -> &str {
    self.0.borrow()
  }
}

impl std::fmt::Display for ChannelName {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

impl std::str::FromStr for ChannelName {
  type Err = InvalidChannelName;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::resolve(s)
  }
}

/// Failed to resolve a channel name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("target does not name a channel")]
pub struct InvalidChannelName;

static_assert_send!(ChannelName);
static_assert_sync!(ChannelName);
