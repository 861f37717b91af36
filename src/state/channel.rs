use std::sync::Arc;

use super::{MessageLog, MessageStore, RecentChatters, RoomModes};
use crate::common::ChannelName;
use crate::context::{Account, Settings};
use crate::msg::ChatMessage;

/// A joined channel or one of the local channels.
#[derive(Clone, Debug)]
pub struct Channel {
  name: ChannelName,
  kind: ChannelKind,
  messages: MessageLog,
}

/// What kind of channel a [`Channel`] is.
///
/// Only Twitch channels carry server-side state.
#[derive(Clone, Debug)]
pub enum ChannelKind {
  Twitch(TwitchState),
  /// Collects received whispers.
  Whispers,
  /// Collects highlighted messages from every channel.
  Mentions,
}

impl Channel {
  pub(crate) fn twitch(name: ChannelName, settings: &Settings) -> Self {
    Self {
      name,
      kind: ChannelKind::Twitch(TwitchState::new(settings.recent_chatters_limit)),
      messages: MessageLog::new(settings.message_limit),
    }
  }

  pub(crate) fn whispers(settings: &Settings) -> Self {
    Self {
      name: ChannelName::special("/whispers"),
      kind: ChannelKind::Whispers,
      messages: MessageLog::new(settings.message_limit),
    }
  }

  pub(crate) fn mentions(settings: &Settings) -> Self {
    Self {
      name: ChannelName::special("/mentions"),
      kind: ChannelKind::Mentions,
      messages: MessageLog::new(settings.message_limit),
    }
  }

  pub fn name(&self) -> &ChannelName {
    &self.name
  }

  pub fn kind(&self) -> &ChannelKind {
    &self.kind
  }

  pub fn messages(&self) -> &MessageLog {
    &self.messages
  }

  pub(crate) fn messages_mut(&mut self) -> &mut MessageLog {
    &mut self.messages
  }

  /// State of a Twitch channel, `None` for local channels.
  pub fn twitch_state(&self) -> Option<&TwitchState> {
    match &self.kind {
      ChannelKind::Twitch(state) => Some(state),
      _ => None,
    }
  }

  pub(crate) fn twitch_state_mut(&mut self) -> Option<&mut TwitchState> {
    match &mut self.kind {
      ChannelKind::Twitch(state) => Some(state),
      _ => None,
    }
  }

  pub fn is_twitch(&self) -> bool {
    matches!(self.kind, ChannelKind::Twitch(_))
  }

  /// Whether `account` owns this channel.
  pub fn is_broadcaster(&self, account: &Account) -> bool {
    self.is_twitch() && account.is(&self.name)
  }

  /// Whether the local user may bypass user ignores here.
  pub fn is_staff_or_broadcaster(&self, account: &Account) -> bool {
    self.is_broadcaster(account) || self.twitch_state().is_some_and(|state| state.is_staff)
  }

  pub(crate) fn add_message(&mut self, message: Arc<ChatMessage>) {
    self.messages.append(message);
  }
}

/// Names kept per pending join or part list. Later names are dropped until the next flush.
const PENDING_PRESENCE_LIMIT: usize = 1000;

fn push_pending(pending: &mut Vec<String>, name: &str) {
  if pending.len() < PENDING_PRESENCE_LIMIT {
    pending.push(name.to_owned());
  }
}

/// Server-side state of a Twitch channel.
#[derive(Clone, Debug)]
pub struct TwitchState {
  room_id: Option<String>,
  room_modes: RoomModes,
  mods: Vec<String>,
  is_mod: bool,
  is_vip: bool,
  is_staff: bool,
  chatters: RecentChatters,
  joined: Vec<String>,
  parted: Vec<String>,
}

generate_getters! {
  for TwitchState as self {
    /// Numeric ID of the channel, known after the first `ROOMSTATE`.
    room_id -> Option<&str> = self.room_id.as_deref(),

    room_modes -> &RoomModes = &self.room_modes,

    /// Moderator names from `MODE` messages, in arrival order.
    ///
    /// Both `+o` and `-o` append, so names may repeat.
    mods -> &[String] = &self.mods,

    /// The local user is a moderator here.
    is_mod -> bool,

    /// The local user is a VIP here.
    is_vip -> bool,

    /// The local user is Twitch staff.
    is_staff -> bool,

    chatters -> &RecentChatters = &self.chatters,

    /// Users who joined since the last flush.
    joined -> &[String] = &self.joined,

    /// Users who parted since the last flush.
    parted -> &[String] = &self.parted,
  }
}

impl TwitchState {
  fn new(chatters_limit: usize) -> Self {
    Self {
      room_id: None,
      room_modes: RoomModes::default(),
      mods: Vec::new(),
      is_mod: false,
      is_vip: false,
      is_staff: false,
      chatters: RecentChatters::new(chatters_limit),
      joined: Vec::new(),
      parted: Vec::new(),
    }
  }

  pub(crate) fn set_room_id(&mut self, room_id: &str) {
    self.room_id = Some(room_id.to_owned());
  }

  pub(crate) fn room_modes_mut(&mut self) -> &mut RoomModes {
    &mut self.room_modes
  }

  pub(crate) fn add_mod(&mut self, name: &str) {
    self.mods.push(name.to_owned());
  }

  pub(crate) fn set_mod(&mut self, value: bool) {
    self.is_mod = value;
  }

  pub(crate) fn set_vip(&mut self, value: bool) {
    self.is_vip = value;
  }

  pub(crate) fn set_staff(&mut self, value: bool) {
    self.is_staff = value;
  }

  pub(crate) fn chatters_mut(&mut self) -> &mut RecentChatters {
    &mut self.chatters
  }

  pub(crate) fn add_joined(&mut self, name: &str) {
    push_pending(&mut self.joined, name);
  }

  pub(crate) fn add_parted(&mut self, name: &str) {
    push_pending(&mut self.parted, name);
  }

  pub(crate) fn take_presence(&mut self) -> (Vec<String>, Vec<String>) {
    (
      std::mem::take(&mut self.joined),
      std::mem::take(&mut self.parted),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn pending_presence_is_bounded() {
    let mut state = TwitchState::new(10);
    for i in 0..PENDING_PRESENCE_LIMIT + 50 {
      state.add_joined(&format!("user{i}"));
    }
    state.add_parted("randers");
    assert_eq!(state.joined().len(), PENDING_PRESENCE_LIMIT);
    let last = format!("user{}", PENDING_PRESENCE_LIMIT - 1);
    assert_eq!(state.joined().last(), Some(&last));

    let (joined, parted) = state.take_presence();
    assert_eq!(joined.len(), PENDING_PRESENCE_LIMIT);
    assert_eq!(parted, ["randers"]);
    state.add_joined("pajlada");
    assert_eq!(state.joined(), ["pajlada"]);
  }
}
