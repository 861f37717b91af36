//! Factories for locally generated messages.

use super::{ChatMessage, MessageFlag, MessageFlags, Timeout};
use crate::common::JoinIter;
use chrono::Utc;

pub const CHAT_CLEARED: &str = "Chat has been cleared by a moderator.";
pub const LOGIN_EXPIRED: &str = "Login expired! Try logging in again.";
pub const DELETE_USAGE: &str = "Usage: \"/delete <msg-id>\" - can't take more than one argument";

fn synthetic(text: String, flags: MessageFlags, timeout: Option<Timeout>) -> ChatMessage {
  ChatMessage {
    id: None,
    login: String::new(),
    display_name: String::new(),
    text,
    tags: Default::default(),
    badges: Default::default(),
    flags,
    timestamp: Utc::now(),
    timeout,
  }
}

/// A plain system message.
pub fn system_message(text: impl Into<String>) -> ChatMessage {
  synthetic(text.into(), MessageFlag::System.into(), None)
}

/// A timeout notice for `user`.
///
/// An empty `duration` means the user was banned. `count` is the number of
/// timeouts this notice stands for, and is only rendered when greater than one.
pub fn timeout_message(user: &str, duration: &str, reason: &str, count: u32) -> ChatMessage {
  let mut text = String::with_capacity(64);
  text.push_str(user);
  if duration.is_empty() {
    text.push_str(" has been permanently banned");
  } else {
    text.push_str(" has been timed out for ");
    match duration.parse::<u64>() {
      Ok(seconds) => text.push_str(&format_time(seconds)),
      Err(_) => text.push_str(duration),
    }
  }
  if !reason.is_empty() {
    text.push_str(&format!(": \"{reason}\""));
  }
  text.push('.');
  if count > 1 {
    text.push_str(&format!(" ({count} times)"));
  }

  synthetic(
    text,
    MessageFlag::System | MessageFlag::Timeout | MessageFlag::DoNotTriggerNotification,
    Some(Timeout {
      user: user.into(),
      duration: duration.into(),
      reason: reason.into(),
      count,
    }),
  )
}

/// Derive the notice which replaces `previous` when `next` repeats it.
pub(crate) fn coalesce_timeout(previous: &Timeout, next: &Timeout) -> ChatMessage {
  timeout_message(
    &next.user,
    &next.duration,
    &next.reason,
    previous.count.saturating_add(1),
  )
}

/// `Users joined: a, b`
pub fn users_joined<'a>(users: impl IntoIterator<Item = &'a str>) -> ChatMessage {
  presence("Users joined: ", users)
}

/// `Users parted: a, b`
pub fn users_parted<'a>(users: impl IntoIterator<Item = &'a str>) -> ChatMessage {
  presence("Users parted: ", users)
}

fn presence<'a>(prefix: &str, users: impl IntoIterator<Item = &'a str>) -> ChatMessage {
  let text = format!("{prefix}{}", users.into_iter().join(", "));
  synthetic(
    text,
    MessageFlag::System | MessageFlag::DoNotTriggerNotification,
    None,
  )
}

/// Format a duration as `1d 2h 3m 4s`, omitting zero components.
pub fn format_time(seconds: u64) -> String {
  if seconds == 0 {
    return "0s".into();
  }

  let units = [
    (seconds / 86400, 'd'),
    (seconds / 3600 % 24, 'h'),
    (seconds / 60 % 60, 'm'),
    (seconds % 60, 's'),
  ];
  units
    .into_iter()
    .filter(|(value, _)| *value > 0)
    .map(|(value, unit)| format!("{value}{unit}"))
    .join(" ")
    .to_string()
}
