//! ## Channel state
//!
//! [`Channels`] is the registry of live channels: every joined Twitch channel,
//! plus the local whispers and mentions channels. There is exactly one
//! [`Channel`] per canonical name.

pub mod channel;
pub use channel::{Channel, ChannelKind, TwitchState};
pub mod chatters;
pub use chatters::RecentChatters;
pub mod room_modes;
pub use room_modes::RoomModes;
pub mod store;
pub use store::{MessageLog, MessageStore};
pub(crate) mod sync;

use std::collections::BTreeMap;

use crate::common::ChannelName;
use crate::context::Settings;
use crate::error::Dropped;

#[derive(Clone, Debug)]
pub struct Channels {
  twitch: BTreeMap<ChannelName, Channel>,
  whispers: Channel,
  mentions: Channel,
}

impl Channels {
  pub fn new(settings: &Settings) -> Self {
    Self {
      twitch: BTreeMap::new(),
      whispers: Channel::whispers(settings),
      mentions: Channel::mentions(settings),
    }
  }

  /// Start tracking `name`. Joining a channel twice keeps the existing state.
  pub fn join(&mut self, name: ChannelName, settings: &Settings) -> &mut Channel {
    self
      .twitch
      .entry(name.clone())
      .or_insert_with(|| Channel::twitch(name, settings))
  }

  /// Stop tracking `name`, returning its final state.
  pub fn part(&mut self, name: &str) -> Option<Channel> {
    self.twitch.remove(name)
  }

  pub fn get(&self, name: &str) -> Option<&Channel> {
    self.twitch.get(name)
  }

  pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Channel> {
    self.twitch.get_mut(name)
  }

  /// Resolve a protocol target to a joined channel.
  pub(crate) fn resolve_mut(&mut self, target: Option<&str>) -> Result<&mut Channel, Dropped> {
    let target = target.ok_or(Dropped::MissingParam("channel"))?;
    let name =
      ChannelName::resolve(target).map_err(|_| Dropped::InvalidChannel(target.to_owned()))?;
    match self.twitch.get_mut(name.as_str()) {
      Some(channel) => Ok(channel),
      None => Err(Dropped::UnknownChannel(name)),
    }
  }

  pub fn whispers(&self) -> &Channel {
    &self.whispers
  }

  pub(crate) fn whispers_mut(&mut self) -> &mut Channel {
    &mut self.whispers
  }

  pub fn mentions(&self) -> &Channel {
    &self.mentions
  }

  pub(crate) fn mentions_mut(&mut self) -> &mut Channel {
    &mut self.mentions
  }

  /// Joined Twitch channels, ordered by name.
  pub fn iter(&self) -> impl Iterator<Item = &Channel> + '_ {
    self.twitch.values()
  }

  pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Channel> + '_ {
    self.twitch.values_mut()
  }

  /// Joined Twitch channels followed by the local channels.
  pub(crate) fn iter_with_special_mut(&mut self) -> impl Iterator<Item = &mut Channel> + '_ {
    self
      .twitch
      .values_mut()
      .chain(std::iter::once(&mut self.whispers))
      .chain(std::iter::once(&mut self.mentions))
  }

  pub fn len(&self) -> usize {
    self.twitch.len()
  }

  pub fn is_empty(&self) -> bool {
    self.twitch.is_empty()
  }
}
