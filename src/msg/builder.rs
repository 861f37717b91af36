//! Turns chatter content into a [`ChatMessage`].

use chrono::Utc;

use super::{parse_timestamp, BadgeSet, ChatMessage, MessageFlag, MessageFlags};
use crate::common::maybe_unescape;
use crate::context::{Context, HighlightCheck, IgnoreKind};
use crate::error::Dropped;
use crate::irc::{IrcMessageRef, Tag};

const HOST_SUFFIX: &str = ".tmi.twitch.tv";

/// Per-message options for [`MessageBuilder`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseArgs {
  /// Take the sender from the `login` tag instead of the prefix.
  ///
  /// Used for content attached to subscription notices, which are sent by the server.
  pub trim_subscriber_username: bool,
  /// The local user is staff or the broadcaster, so user ignores do not apply.
  pub is_staff_or_broadcaster: bool,
  /// The message is a whisper sent to the local user.
  pub is_received_whisper: bool,
}

/// Builds one [`ChatMessage`] from a protocol message.
///
/// ```rust
/// use tmi_chat::{Account, Context, IrcMessageRef, MessageFlag, ParseArgs};
/// use tmi_chat::msg::MessageBuilder;
///
/// let ctx = Context::new(Account::new("fourtf"));
/// let line = "@display-name=Randers :randers!randers@randers.tmi.twitch.tv PRIVMSG #pajlada :hi fourtf";
/// let msg = IrcMessageRef::parse(line).unwrap();
///
/// let built = MessageBuilder::new(&ctx, "pajlada", &msg, ParseArgs::default(), "hi fourtf", false)
///   .build()
///   .unwrap();
/// assert_eq!(built.display_name(), "Randers");
/// assert!(built.has(MessageFlag::Highlighted));
/// ```
pub struct MessageBuilder<'a> {
  ctx: &'a Context,
  channel: &'a str,
  msg: &'a IrcMessageRef<'a>,
  args: ParseArgs,
  content: &'a str,
  login: &'a str,
  flags: MessageFlags,
  subscription: bool,
}

impl<'a> MessageBuilder<'a> {
  pub fn new(
    ctx: &'a Context,
    channel: &'a str,
    msg: &'a IrcMessageRef<'a>,
    args: ParseArgs,
    content: &'a str,
    is_action: bool,
  ) -> Self {
    let mut flags = MessageFlags::empty();
    if is_action {
      flags.set(MessageFlag::Action);
    }
    if args.is_received_whisper {
      flags.set(MessageFlag::Whisper);
    }

    Self {
      ctx,
      channel,
      msg,
      args,
      content,
      login: resolve_login(msg, args),
      flags,
      subscription: false,
    }
  }

  /// Mark the message as subscription content.
  ///
  /// It will never be highlighted, ignored, or passed to the highlight controller.
  pub fn subscription(mut self) -> Self {
    self.subscription = true;
    self.flags.set(MessageFlag::Subscription);
    self.flags.unset(MessageFlag::Highlighted);
    self
  }

  /// Login of the sender.
  pub fn user_name(&self) -> &'a str {
    self.login
  }

  /// Returns the kind of ignore rule this message matches.
  ///
  /// User rules are skipped for staff and broadcasters.
  pub fn ignored(&self) -> Option<IgnoreKind> {
    let ignores = &self.ctx.ignores;
    if !self.args.is_staff_or_broadcaster && ignores.ignores_user(self.login) {
      return Some(IgnoreKind::User);
    }
    if ignores.ignores_text(self.content) {
      return Some(IgnoreKind::Phrase);
    }
    None
  }

  pub fn is_ignored(&self) -> bool {
    self.ignored().is_some()
  }

  /// Finish the message.
  ///
  /// Fails only if the message is ignored. Unless this is subscription content,
  /// the highlight controller is notified about the result.
  pub fn build(self) -> Result<ChatMessage, Dropped> {
    if !self.subscription {
      if let Some(kind) = self.ignored() {
        return Err(Dropped::Ignored(kind));
      }
    }

    let display_name = match self.msg.tag(Tag::DisplayName).map(maybe_unescape) {
      Some(name) if !name.trim().is_empty() => name.trim().to_owned(),
      _ => self.login.to_owned(),
    };

    let mut flags = self.flags;
    let own = self.ctx.account.is(self.login);
    if own {
      flags.set(MessageFlag::DoNotTriggerNotification);
    } else if !self.subscription {
      let check = HighlightCheck {
        channel: self.channel,
        login: self.login,
        display_name: &display_name,
        text: self.content,
        own_login: &self.ctx.account.login,
      };
      if self.ctx.highlights.is_highlighted(&check) {
        flags.set(MessageFlag::Highlighted);
      }
    }

    let message = ChatMessage {
      id: self.msg.tag(Tag::Id).map(String::from),
      login: self.login.to_owned(),
      display_name,
      text: self.content.to_owned(),
      tags: self.msg.tag_map(),
      badges: BadgeSet::parse(self.msg.tag(Tag::Badges).unwrap_or_default()),
      flags,
      timestamp: self
        .msg
        .tag(Tag::TmiSentTs)
        .and_then(parse_timestamp)
        .unwrap_or_else(Utc::now),
      timeout: None,
    };

    if !self.subscription {
      self.ctx.controller.notify(&message);
    }

    Ok(message)
  }
}

fn resolve_login<'a>(msg: &IrcMessageRef<'a>, args: ParseArgs) -> &'a str {
  let login = match msg.nick() {
    Some(nick) if !nick.is_empty() && !args.trim_subscriber_username => nick,
    _ => msg.tag(Tag::Login).unwrap_or_default(),
  };
  login.strip_suffix(HOST_SUFFIX).unwrap_or(login)
}
