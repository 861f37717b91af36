//! Reasons an event produced no visible effect.
//!
//! None of these are failures of the dispatcher itself: each one only ends
//! the processing of a single event, and is logged by the dispatcher.

use crate::common::ChannelName;
use crate::context::IgnoreKind;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Dropped {
  /// The target parameter does not name a channel.
  #[error("`{0}` is not a valid channel name")]
  InvalidChannel(String),

  /// A required parameter or tag is absent.
  #[error("missing {0}")]
  MissingParam(&'static str),

  /// The channel is not joined.
  #[error("channel `{0}` not found")]
  UnknownChannel(ChannelName),

  /// Suppressed by an ignore rule.
  #[error("ignored by {0:?} rule")]
  Ignored(IgnoreKind),
}

impl Dropped {
  /// Whether this drop should be visible in diagnostics by default.
  pub(crate) fn is_diagnostic(&self) -> bool {
    matches!(self, Dropped::UnknownChannel(_))
  }
}
