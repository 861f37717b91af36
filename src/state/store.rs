//! Bounded per-channel message history.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::Duration;

use crate::msg::system::coalesce_timeout;
use crate::msg::{ChatMessage, MessageFlag};

/// How many of the most recent messages are searched for a timeout to coalesce with.
const COALESCE_LOOKBACK: usize = 20;
/// How old a timeout may be to still be coalesced with.
const COALESCE_WINDOW_SECS: i64 = 5;

/// Operations moderation applies to a channel's history.
pub trait MessageStore {
  /// Append a message, evicting the oldest one if the store is full.
  fn append(&mut self, message: Arc<ChatMessage>);

  /// Strike out every stored message.
  fn disable_all(&mut self);

  /// Add a timeout notice, coalescing it with a recent notice for the same user.
  fn add_or_replace_timeout(&mut self, message: ChatMessage);

  /// Remove the message with `id`. Returns `false` if there was none.
  fn delete_by_id(&mut self, id: &str) -> bool;
}

/// The default [`MessageStore`], a ring of at most `limit` messages.
#[derive(Clone, Debug)]
pub struct MessageLog {
  entries: VecDeque<Arc<ChatMessage>>,
  limit: usize,
}

impl MessageLog {
  pub fn new(limit: usize) -> Self {
    Self {
      entries: VecDeque::new(),
      limit: limit.max(1),
    }
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn limit(&self) -> usize {
    self.limit
  }

  /// Oldest first.
  pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Arc<ChatMessage>> + '_ {
    self.entries.iter()
  }

  pub fn last(&self) -> Option<&Arc<ChatMessage>> {
    self.entries.back()
  }

  pub fn find_by_id(&self, id: &str) -> Option<&Arc<ChatMessage>> {
    self.entries.iter().find(|entry| entry.id() == Some(id))
  }

  /// A copy of the current history which can be sent to another thread.
  pub fn snapshot(&self) -> Vec<Arc<ChatMessage>> {
    self.entries.iter().cloned().collect()
  }

  fn disable_at(&mut self, index: usize) {
    let Some(entry) = self.entries.get_mut(index) else {
      return;
    };
    if !entry.has(MessageFlag::Disabled) {
      *entry = Arc::new(entry.with_flags(entry.flags().with(MessageFlag::Disabled)));
    }
  }
}

impl MessageStore for MessageLog {
  fn append(&mut self, message: Arc<ChatMessage>) {
    self.entries.push_back(message);
    while self.entries.len() > self.limit {
      self.entries.pop_front();
    }
  }

  fn disable_all(&mut self) {
    for index in 0..self.entries.len() {
      self.disable_at(index);
    }
  }

  fn add_or_replace_timeout(&mut self, message: ChatMessage) {
    let Some(timeout) = message.timeout() else {
      self.append(Arc::new(message));
      return;
    };

    let oldest = message.timestamp() - Duration::seconds(COALESCE_WINDOW_SECS);
    let mut replaced = false;
    let start = self.entries.len().saturating_sub(COALESCE_LOOKBACK);
    for index in (start..self.entries.len()).rev() {
      let entry = &self.entries[index];
      if entry.timestamp() < oldest {
        break;
      }
      let Some(previous) = entry.timeout() else {
        continue;
      };
      if previous.user().eq_ignore_ascii_case(timeout.user()) {
        let replacement = coalesce_timeout(previous, timeout);
        self.entries[index] = Arc::new(replacement);
        replaced = true;
        break;
      }
    }

    for index in 0..self.entries.len() {
      let entry = &self.entries[index];
      if !entry.has(MessageFlag::Timeout) && entry.login().eq_ignore_ascii_case(timeout.user()) {
        self.disable_at(index);
      }
    }

    if !replaced {
      self.append(Arc::new(message));
    }
  }

  fn delete_by_id(&mut self, id: &str) -> bool {
    match self.entries.iter().position(|entry| entry.id() == Some(id)) {
      Some(index) => self.entries.remove(index).is_some(),
      None => false,
    }
  }
}
