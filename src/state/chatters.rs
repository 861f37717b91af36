use std::collections::VecDeque;

/// Display names of users who recently sent a message, least recent first.
#[derive(Clone, Debug)]
pub struct RecentChatters {
  names: VecDeque<String>,
  limit: usize,
}

impl RecentChatters {
  pub fn new(limit: usize) -> Self {
    Self {
      names: VecDeque::new(),
      limit,
    }
  }

  /// Record `name` as the most recent chatter.
  ///
  /// A name already present (in any case) is moved to the end.
  pub fn add(&mut self, name: &str) {
    if name.is_empty() || self.limit == 0 {
      return;
    }
    if let Some(pos) = self
      .names
      .iter()
      .position(|existing| existing.eq_ignore_ascii_case(name))
    {
      self.names.remove(pos);
    }
    self.names.push_back(name.to_owned());
    while self.names.len() > self.limit {
      self.names.pop_front();
    }
  }

  pub fn contains(&self, name: &str) -> bool {
    self
      .names
      .iter()
      .any(|existing| existing.eq_ignore_ascii_case(name))
  }

  pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> + '_ {
    self.names.iter().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.names.len()
  }

  pub fn is_empty(&self) -> bool {
    self.names.is_empty()
  }
}
