//! ## Display-ready chat messages
//!
//! The entrypoint to this module is [`ChatMessage`].
//!
//! Messages are produced in two ways:
//! - [`MessageBuilder`] turns chatter content from a raw protocol message into a
//!   [`ChatMessage`], applying ignore and highlight rules.
//! - The factories in [`system`] create locally generated notices, such as
//!   "Chat has been cleared by a moderator."
//!
//! A built message never changes. Stores that need a different flag set, for
//! example to strike out moderated messages or to deliver a copy of a whisper
//! to other channels, derive a new value with [`ChatMessage::with_flags`].

pub mod badges;
pub use badges::*;
pub mod builder;
pub use builder::*;
pub mod flags;
pub use flags::*;
pub mod system;

use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// A single entry in a channel's message history.
///
/// With the `serde` feature, messages can be written to and read back from a log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChatMessage {
  id: Option<String>,
  login: String,
  display_name: String,
  text: String,
  tags: HashMap<String, String>,
  badges: BadgeSet,
  flags: MessageFlags,
  timestamp: DateTime<Utc>,
  timeout: Option<Timeout>,
}

generate_getters! {
  for ChatMessage as self {
    /// Unique ID of the message, used to delete it later.
    ///
    /// System messages have no ID.
    id -> Option<&str> = self.id.as_deref(),

    /// Login of the sender.
    ///
    /// Empty for system messages.
    login -> &str = self.login.as_ref(),

    /// Display name of the sender.
    display_name -> &str = self.display_name.as_ref(),

    /// Text content of the message.
    ///
    /// For `/me` messages, this does not include the action prefix/suffix bytes.
    text -> &str = self.text.as_ref(),

    /// Raw tags of the protocol message this was built from.
    ///
    /// Values are still escaped.
    tags -> &HashMap<String, String> = &self.tags,

    /// Channel badges of the sender.
    badges -> &BadgeSet = &self.badges,

    /// Flags assigned when the message was built.
    flags -> MessageFlags,

    /// The time at which the message was sent, or created if it is a system message.
    timestamp -> DateTime<Utc>,

    /// Set on timeout and ban notices.
    timeout -> Option<&Timeout> = self.timeout.as_ref(),
  }
}

impl ChatMessage {
  /// Get the value of a raw tag.
  pub fn tag(&self, name: &str) -> Option<&str> {
    self.tags.get(name).map(String::as_str)
  }

  /// Whether the message has `flag` set.
  #[inline]
  pub fn has(&self, flag: MessageFlag) -> bool {
    self.flags.has(flag)
  }

  /// Derive a copy of this message with a different flag set.
  ///
  /// `self` is left untouched.
  pub fn with_flags(&self, flags: MessageFlags) -> ChatMessage {
    ChatMessage {
      flags,
      ..self.clone()
    }
  }
}

/// Parameters of a timeout or ban notice.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timeout {
  user: String,
  duration: String,
  reason: String,
  count: u32,
}

generate_getters! {
  for Timeout as self {
    /// Login of the user who was timed out or banned.
    user -> &str = self.user.as_ref(),

    /// Timeout length in seconds, as sent by the server.
    ///
    /// Empty for permanent bans.
    duration -> &str = self.duration.as_ref(),

    /// Reason given by the moderator, unescaped. May be empty.
    reason -> &str = self.reason.as_ref(),

    /// How many timeouts this notice stands for.
    ///
    /// Repeated timeouts of the same user in quick succession are coalesced.
    count -> u32,
  }
}

impl Timeout {
  /// Whether this is a permanent ban rather than a timeout.
  pub fn is_ban(&self) -> bool {
    self.duration.is_empty()
  }
}

static_assert_send!(ChatMessage);
static_assert_sync!(ChatMessage);

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
  use chrono::TimeZone;
  Utc.timestamp_millis_opt(s.parse().ok()?).single()
}

/// Split `/me` content into its text and whether it was an action.
pub fn parse_message_text(input: &str) -> (&str, bool) {
  let Some(s) = input.strip_prefix("\u{0001}ACTION ") else {
    return (input, false);
  };
  let Some(s) = s.strip_suffix('\u{0001}') else {
    return (input, false);
  };
  (s, true)
}
