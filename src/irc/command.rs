use std::fmt::Display;

use crate::common::Span;

macro_rules! commands {
  ($($(#[$meta:meta])* $name:ident = $wire:literal,)*) => {
    /// A Twitch IRC command.
    ///
    /// Commands the dispatcher does not route are still recognized, so that
    /// they can be logged by name.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub enum Command<'src> {
      $($(#[$meta])* $name,)*
      /// Unknown command
      Other(&'src str),
    }

    impl<'src> Command<'src> {
      /// Get the string value of the [`Command`].
      pub fn as_str(&self) -> &'src str {
        match self {
          $(Command::$name => $wire,)*
          Command::Other(cmd) => cmd,
        }
      }

      fn known(token: &str) -> Option<Command<'static>> {
        match token {
          $($wire => Some(Command::$name),)*
          _ => None,
        }
      }
    }
  };
}

commands! {
  /// Ping the peer
  Ping = "PING",
  /// The peer's response to a [`Command::Ping`]
  Pong = "PONG",
  /// A user joined a channel
  Join = "JOIN",
  /// A user left a channel
  Part = "PART",
  /// Operator status was granted or revoked
  Mode = "MODE",
  /// A message sent to a channel
  Privmsg = "PRIVMSG",
  /// A private message from another user
  Whisper = "WHISPER",
  /// Purge a user's messages in a channel, or the whole channel
  ClearChat = "CLEARCHAT",
  /// Remove a single message
  ClearMsg = "CLEARMSG",
  /// Sent after login
  GlobalUserState = "GLOBALUSERSTATE",
  /// General notices from the server
  Notice = "NOTICE",
  /// The server is about to restart
  Reconnect = "RECONNECT",
  /// Changed chat settings of a channel
  RoomState = "ROOMSTATE",
  /// Subscriptions, raids and other channel events
  UserNotice = "USERNOTICE",
  /// The local user's status in a channel
  UserState = "USERSTATE",
}

impl<'src> Display for Command<'src> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A parsed command which does not borrow the source yet.
#[derive(Clone, Copy)]
pub(super) enum RawCommand {
  Known(Command<'static>),
  Other(Span),
}

impl RawCommand {
  #[inline]
  pub(super) fn get<'src>(&self, src: &'src str) -> Command<'src> {
    match *self {
      RawCommand::Known(command) => command,
      RawCommand::Other(span) => Command::Other(span.get(src)),
    }
  }
}

/// `COMMAND <rest>`
///
/// Returns `None` if the command is empty.
#[inline(always)]
pub(super) fn parse(src: &str, pos: &mut usize) -> Option<RawCommand> {
  let start = *pos;
  let end = src[start..].find(' ').map_or(src.len(), |len| start + len);
  let token = &src[start..end];
  if token.is_empty() {
    return None;
  }

  *pos = (end + 1).min(src.len());
  Some(match Command::known(token) {
    Some(command) => RawCommand::Known(command),
    None => RawCommand::Other(Span::from(start..end)),
  })
}
