use crate::irc::{IrcMessageRef, Tag};

/// Channel-wide chat settings.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
  feature = "serde",
  derive(serde::Serialize, serde::Deserialize),
  serde(default, rename_all = "camelCase")
)]
pub struct RoomModes {
  pub emote_only: bool,
  /// Subscribers-only mode.
  pub submode: bool,
  /// Seconds between messages, `0` when off.
  pub slow_mode: i32,
  /// Unique-message mode.
  pub r9k: bool,
  /// Empty when unset.
  pub broadcaster_lang: String,
  /// Minutes a user must follow before chatting, `-1` when off.
  pub follower_only: i32,
}

impl Default for RoomModes {
  fn default() -> Self {
    Self {
      emote_only: false,
      submode: false,
      slow_mode: 0,
      r9k: false,
      broadcaster_lang: String::new(),
      follower_only: -1,
    }
  }
}

impl RoomModes {
  /// Apply the tags of a `ROOMSTATE` message.
  ///
  /// `ROOMSTATE` only carries the tags which changed, so every field without a
  /// tag keeps its value. Integer tags which fail to parse are skipped as well.
  pub fn apply(&mut self, msg: &IrcMessageRef<'_>) {
    if let Some(value) = msg.tag(Tag::EmoteOnly) {
      self.emote_only = value == "1";
    }
    if let Some(value) = msg.tag(Tag::SubsOnly) {
      self.submode = value == "1";
    }
    if let Some(value) = msg.tag(Tag::Slow).and_then(|v| v.parse().ok()) {
      self.slow_mode = value;
    }
    if let Some(value) = msg.tag(Tag::R9K) {
      self.r9k = value == "1";
    }
    if let Some(value) = msg.tag(Tag::BroadcasterLang) {
      self.broadcaster_lang = value.to_owned();
    }
    if let Some(value) = msg.tag(Tag::FollowersOnly).and_then(|v| v.parse().ok()) {
      self.follower_only = value;
    }
  }
}
