//! Rule lists backing the default [`IgnoreFilter`] and [`HighlightRules`].

use std::sync::RwLock;

use regex::Regex;

use crate::context::{HighlightCheck, HighlightRules, IgnoreFilter};

/// A phrase matched against message text.
///
/// Plain phrases match whole words, case-insensitively.
/// Regex phrases are used as written.
#[derive(Clone, Debug)]
pub struct Phrase {
  pattern: String,
  regex: Option<Regex>,
}

impl Phrase {
  /// A whole-word, case-insensitive phrase.
  pub fn plain(phrase: &str) -> Self {
    let escaped = regex::escape(phrase);
    let start = match phrase.starts_with(is_word_char) {
      true => r"\b",
      false => "",
    };
    let end = match phrase.ends_with(is_word_char) {
      true => r"\b",
      false => "",
    };
    let pattern = format!("(?i){start}{escaped}{end}");
    Self {
      pattern: phrase.into(),
      regex: Regex::new(&pattern).ok(),
    }
  }

  /// A user-written regular expression.
  pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
    Ok(Self {
      pattern: pattern.into(),
      regex: Some(Regex::new(pattern)?),
    })
  }

  /// The phrase as configured.
  pub fn as_str(&self) -> &str {
    &self.pattern
  }

  pub fn is_match(&self, text: &str) -> bool {
    match &self.regex {
      Some(regex) => !self.pattern.is_empty() && regex.is_match(text),
      None => false,
    }
  }
}

fn is_word_char(c: char) -> bool {
  c.is_alphanumeric() || c == '_'
}

/// Ignore rules: ignored users and ignored phrases.
#[derive(Clone, Debug, Default)]
pub struct IgnoreList {
  users: Vec<String>,
  phrases: Vec<Phrase>,
}

impl IgnoreList {
  pub fn user(mut self, login: &str) -> Self {
    self.users.push(login.to_ascii_lowercase());
    self
  }

  pub fn phrase(mut self, phrase: Phrase) -> Self {
    self.phrases.push(phrase);
    self
  }
}

impl IgnoreFilter for IgnoreList {
  fn ignores_user(&self, login: &str) -> bool {
    self
      .users
      .iter()
      .any(|user| user.eq_ignore_ascii_case(login))
  }

  fn ignores_text(&self, text: &str) -> bool {
    self.phrases.iter().any(|phrase| phrase.is_match(text))
  }
}

/// Highlight rules: the local user's name, phrases and users.
#[derive(Debug)]
pub struct HighlightList {
  own_login: bool,
  users: Vec<String>,
  phrases: Vec<Phrase>,
  /// Compiled phrase for the last seen local login.
  own_phrase: RwLock<Option<Phrase>>,
}

impl Default for HighlightList {
  fn default() -> Self {
    Self {
      own_login: true,
      users: Vec::new(),
      phrases: Vec::new(),
      own_phrase: RwLock::new(None),
    }
  }
}

impl Clone for HighlightList {
  fn clone(&self) -> Self {
    Self {
      own_login: self.own_login,
      users: self.users.clone(),
      phrases: self.phrases.clone(),
      own_phrase: RwLock::new(None),
    }
  }
}

impl HighlightList {
  /// Toggle highlighting of messages which mention the local user's login.
  pub fn own_login(mut self, enabled: bool) -> Self {
    self.own_login = enabled;
    self
  }

  /// Highlight every message sent by `login`.
  pub fn user(mut self, login: &str) -> Self {
    self.users.push(login.to_ascii_lowercase());
    self
  }

  pub fn phrase(mut self, phrase: Phrase) -> Self {
    self.phrases.push(phrase);
    self
  }
}

impl HighlightList {
  /// Match `text` against the local login, compiling its phrase only when the login changes.
  fn mentions(&self, own_login: &str, text: &str) -> bool {
    if let Ok(cached) = self.own_phrase.read() {
      if let Some(phrase) = cached.as_ref().filter(|p| p.as_str() == own_login) {
        return phrase.is_match(text);
      }
    }

    let phrase = Phrase::plain(own_login);
    let matched = phrase.is_match(text);
    if let Ok(mut cached) = self.own_phrase.write() {
      *cached = Some(phrase);
    }
    matched
  }
}

impl HighlightRules for HighlightList {
  fn is_highlighted(&self, check: &HighlightCheck<'_>) -> bool {
    if self.own_login && !check.own_login.is_empty() && self.mentions(check.own_login, check.text) {
      return true;
    }
    if self
      .users
      .iter()
      .any(|user| user.eq_ignore_ascii_case(check.login))
    {
      return true;
    }
    self.phrases.iter().any(|phrase| phrase.is_match(check.text))
  }
}
