//! Independent boolean facets of a [`ChatMessage`][super::ChatMessage].

use std::fmt::Debug;
use std::ops::{BitOr, BitOrAssign};

/// A single message flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum MessageFlag {
  /// Generated locally, not a chatter's content.
  System = 1 << 0,
  /// A timeout or ban notice.
  Timeout = 1 << 1,
  /// Matched a highlight rule.
  Highlighted = 1 << 2,
  /// A subscription event, or content attached to one.
  Subscription = 1 << 3,
  /// A received whisper.
  Whisper = 1 << 4,
  /// Must not cause a sound or taskbar alert.
  DoNotTriggerNotification = 1 << 5,
  /// Must not be written to chat logs.
  DoNotLog = 1 << 6,
  /// Struck out by a moderation action.
  Disabled = 1 << 7,
  /// Sent with `/me`.
  Action = 1 << 8,
}

impl MessageFlag {
  const ALL: [MessageFlag; 9] = [
    MessageFlag::System,
    MessageFlag::Timeout,
    MessageFlag::Highlighted,
    MessageFlag::Subscription,
    MessageFlag::Whisper,
    MessageFlag::DoNotTriggerNotification,
    MessageFlag::DoNotLog,
    MessageFlag::Disabled,
    MessageFlag::Action,
  ];

  #[inline]
  const fn bit(self) -> u16 {
    self as u16
  }
}

/// A set of [`MessageFlag`]s.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
  feature = "serde",
  derive(serde::Serialize, serde::Deserialize),
  serde(transparent)
)]
pub struct MessageFlags(u16);

impl MessageFlags {
  /// No flags set.
  pub const fn empty() -> Self {
    Self(0)
  }

  #[inline]
  pub fn has(&self, flag: MessageFlag) -> bool {
    self.0 & flag.bit() != 0
  }

  #[inline]
  pub fn has_any(&self, flags: MessageFlags) -> bool {
    self.0 & flags.0 != 0
  }

  #[inline]
  pub fn set(&mut self, flag: MessageFlag) {
    self.0 |= flag.bit();
  }

  #[inline]
  pub fn unset(&mut self, flag: MessageFlag) {
    self.0 &= !flag.bit();
  }

  /// Returns a copy with `flag` set.
  #[must_use]
  pub fn with(mut self, flag: MessageFlag) -> Self {
    self.set(flag);
    self
  }

  /// Returns a copy with `flag` unset.
  #[must_use]
  pub fn without(mut self, flag: MessageFlag) -> Self {
    self.unset(flag);
    self
  }

  pub fn is_empty(&self) -> bool {
    self.0 == 0
  }

  /// Iterator over the flags which are set.
  pub fn iter(&self) -> impl Iterator<Item = MessageFlag> + '_ {
    MessageFlag::ALL
      .into_iter()
      .filter(move |flag| self.has(*flag))
  }
}

impl From<MessageFlag> for MessageFlags {
  fn from(flag: MessageFlag) -> Self {
    Self(flag.bit())
  }
}

impl FromIterator<MessageFlag> for MessageFlags {
  fn from_iter<I: IntoIterator<Item = MessageFlag>>(iter: I) -> Self {
    let mut flags = MessageFlags::empty();
    for flag in iter {
      flags.set(flag);
    }
    flags
  }
}

impl BitOr<MessageFlag> for MessageFlags {
  type Output = MessageFlags;

  fn bitor(self, rhs: MessageFlag) -> Self::Output {
    self.with(rhs)
  }
}

impl BitOr for MessageFlag {
  type Output = MessageFlags;

  fn bitor(self, rhs: MessageFlag) -> Self::Output {
    MessageFlags::from(self).with(rhs)
  }
}

impl BitOrAssign<MessageFlag> for MessageFlags {
  fn bitor_assign(&mut self, rhs: MessageFlag) {
    self.set(rhs);
  }
}

impl Debug for MessageFlags {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_set().entries(self.iter()).finish()
  }
}
