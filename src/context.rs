//! ## Collaborators of the dispatcher
//!
//! Everything message handling needs from the rest of the application is
//! passed in through a [`Context`]: the local account, a settings snapshot,
//! and the rule and notification interfaces. Nothing is reached through
//! global state.

use std::sync::Arc;

use crate::common::ChannelName;
use crate::filter::{HighlightList, IgnoreList};
use crate::msg::ChatMessage;

/// The locally logged-in user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Account {
  /// Login name, lowercase.
  pub login: String,
}

impl Account {
  pub fn new(login: impl Into<String>) -> Self {
    Self {
      login: login.into().to_ascii_lowercase(),
    }
  }

  /// Whether `login` refers to this account.
  pub fn is(&self, login: &str) -> bool {
    !self.login.is_empty() && self.login.eq_ignore_ascii_case(login)
  }
}

/// A snapshot of the settings that affect message handling.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
  feature = "serde",
  derive(serde::Serialize, serde::Deserialize),
  serde(default, rename_all = "camelCase")
)]
pub struct Settings {
  /// Track users joining and parting channels.
  pub show_joins: bool,
  /// Show received whispers in every open channel.
  pub inline_whispers: bool,
  /// Moderated messages are hidden instead of struck out.
  pub hide_moderated: bool,
  /// Maximum number of messages kept per channel.
  pub message_limit: usize,
  /// Maximum number of recent chatters kept per channel.
  pub recent_chatters_limit: usize,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      show_joins: false,
      inline_whispers: true,
      hide_moderated: false,
      message_limit: 1000,
      recent_chatters_limit: 1000,
    }
  }
}

/// Which kind of ignore rule matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreKind {
  /// The sender is ignored.
  User,
  /// The content contains an ignored phrase.
  Phrase,
}

/// Decides whether a message should be suppressed.
pub trait IgnoreFilter: Send + Sync {
  /// Whether messages from `login` are ignored.
  fn ignores_user(&self, login: &str) -> bool;
  /// Whether `text` contains an ignored phrase.
  fn ignores_text(&self, text: &str) -> bool;
}

/// Everything highlight rules may look at.
#[derive(Clone, Copy, Debug)]
pub struct HighlightCheck<'a> {
  pub channel: &'a str,
  pub login: &'a str,
  pub display_name: &'a str,
  pub text: &'a str,
  /// Login of the local user.
  pub own_login: &'a str,
}

/// Decides whether a message is highlighted.
pub trait HighlightRules: Send + Sync {
  fn is_highlighted(&self, check: &HighlightCheck<'_>) -> bool;
}

/// Receives every built message, to decide on sounds and taskbar alerts.
pub trait HighlightController: Send + Sync {
  fn notify(&self, message: &ChatMessage);
}

/// Requests to whatever displays the channels.
///
/// All of these are fire-and-forget.
pub trait UiSink: Send + Sync {
  /// The room modes of `channel` were updated.
  fn room_modes_changed(&self, channel: &ChannelName);
  /// Messages visible in `channel` changed in place.
  fn repaint_channel(&self, channel: &ChannelName);
  /// Every channel view must be laid out again.
  fn force_relayout(&self);
}

/// Collaborator which ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct Noop;

impl HighlightController for Noop {
  fn notify(&self, _: &ChatMessage) {}
}

impl UiSink for Noop {
  fn room_modes_changed(&self, _: &ChannelName) {}
  fn repaint_channel(&self, _: &ChannelName) {}
  fn force_relayout(&self) {}
}

/// The bundle of collaborators owned by a [`Dispatcher`][crate::Dispatcher].
#[derive(Clone)]
pub struct Context {
  pub account: Account,
  pub settings: Settings,
  pub ignores: Arc<dyn IgnoreFilter>,
  pub highlights: Arc<dyn HighlightRules>,
  pub controller: Arc<dyn HighlightController>,
  pub ui: Arc<dyn UiSink>,
}

impl Context {
  /// A context with default settings, empty rule lists and no-op notifications.
  pub fn new(account: Account) -> Self {
    Self {
      account,
      settings: Settings::default(),
      ignores: Arc::new(IgnoreList::default()),
      highlights: Arc::new(HighlightList::default()),
      controller: Arc::new(Noop),
      ui: Arc::new(Noop),
    }
  }

  pub fn with_settings(mut self, settings: Settings) -> Self {
    self.settings = settings;
    self
  }

  pub fn with_ignores(mut self, ignores: impl IgnoreFilter + 'static) -> Self {
    self.ignores = Arc::new(ignores);
    self
  }

  pub fn with_highlights(mut self, highlights: impl HighlightRules + 'static) -> Self {
    self.highlights = Arc::new(highlights);
    self
  }

  pub fn with_controller(mut self, controller: Arc<dyn HighlightController>) -> Self {
    self.controller = controller;
    self
  }

  pub fn with_ui(mut self, ui: Arc<dyn UiSink>) -> Self {
    self.ui = ui;
    self
  }
}

impl std::fmt::Debug for Context {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Context")
      .field("account", &self.account)
      .field("settings", &self.settings)
      .finish_non_exhaustive()
  }
}

static_assert_send!(Context);
static_assert_sync!(Context);
