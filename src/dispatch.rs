//! ## Dispatcher
//!
//! The entrypoint to this module is [`Dispatcher`].
//!
//! The dispatcher owns every channel and applies incoming protocol messages
//! to them, one at a time, in arrival order. Each message is classified by
//! its command and routed to the message builder, the channel state
//! synchronizer, or the moderation applier.
//!
//! Handling never fails: a message which names an unknown channel, lacks a
//! required parameter or is ignored simply has no effect, and the reason is
//! logged through [`tracing`].
//!
//! ```rust
//! use tmi_chat::{Account, Context, Dispatcher, IrcMessageRef};
//!
//! let mut dispatcher = Dispatcher::new(Context::new(Account::new("fourtf")));
//! dispatcher.join("#pajlada").unwrap();
//!
//! let line = ":randers!randers@randers.tmi.twitch.tv PRIVMSG #pajlada :hello";
//! dispatcher.handle(&IrcMessageRef::parse(line).unwrap());
//!
//! let channel = dispatcher.channel("pajlada").unwrap();
//! assert_eq!(channel.messages().last().unwrap().text(), "hello");
//! ```

mod notice;
mod presence;
mod privmsg;
mod user_notice;
mod whisper;

use std::sync::Arc;

use crate::common::{ChannelName, InvalidChannelName};
use crate::context::{Account, Context, Settings};
use crate::error::Dropped;
use crate::irc::{Command, IrcMessageRef, MessageParseError};
use crate::moderation;
use crate::msg::system::{users_joined, users_parted};
use crate::msg::ChatMessage;
use crate::state::{sync, Channel, Channels, RoomModes};

/// Applies protocol messages to channel state.
#[derive(Debug)]
pub struct Dispatcher {
  ctx: Context,
  channels: Channels,
  last_whisperer: Option<String>,
}

impl Dispatcher {
  pub fn new(ctx: Context) -> Self {
    let channels = Channels::new(&ctx.settings);
    Self {
      ctx,
      channels,
      last_whisperer: None,
    }
  }

  pub fn context(&self) -> &Context {
    &self.ctx
  }

  /// Replace the settings snapshot.
  ///
  /// Storage limits only apply to channels joined afterwards.
  pub fn set_settings(&mut self, settings: Settings) {
    self.ctx.settings = settings;
  }

  pub fn set_account(&mut self, account: Account) {
    self.ctx.account = account;
  }

  /// Start tracking a channel.
  ///
  /// Joining a channel which is already joined keeps its state.
  pub fn join(&mut self, channel: &str) -> Result<&Channel, InvalidChannelName> {
    let name = ChannelName::resolve(channel)?;
    trace!("join {name}");
    Ok(&*self.channels.join(name, &self.ctx.settings))
  }

  /// Stop tracking a channel, returning its final state.
  pub fn part(&mut self, channel: &str) -> Option<Channel> {
    let name = ChannelName::resolve(channel).ok()?;
    trace!("part {name}");
    self.channels.part(&name)
  }

  /// Look up a joined channel. `channel` may carry the `#` prefix.
  pub fn channel(&self, channel: &str) -> Option<&Channel> {
    let name = ChannelName::resolve(channel).ok()?;
    self.channels.get(&name)
  }

  pub fn channels(&self) -> &Channels {
    &self.channels
  }

  pub fn whispers(&self) -> &Channel {
    self.channels.whispers()
  }

  pub fn mentions(&self) -> &Channel {
    self.channels.mentions()
  }

  /// Login of the user who most recently whispered the local user.
  pub fn last_whisperer(&self) -> Option<&str> {
    self.last_whisperer.as_deref()
  }

  /// A copy of a channel's current room modes.
  pub fn room_modes(&self, channel: &str) -> Option<RoomModes> {
    self
      .channel(channel)?
      .twitch_state()
      .map(|state| state.room_modes().clone())
  }

  /// Apply a single protocol message.
  pub fn handle(&mut self, msg: &IrcMessageRef<'_>) {
    let command = msg.command();
    let result = match command {
      Command::Privmsg => privmsg::handle(self, msg),
      Command::UserNotice => user_notice::handle(self, msg),
      Command::Notice => notice::handle(self, msg),
      Command::Whisper => whisper::handle(self, msg),
      Command::RoomState => sync::room_state(&mut self.channels, &self.ctx, msg),
      Command::UserState => sync::user_state(&mut self.channels, msg),
      Command::Mode => sync::mode(&mut self.channels, msg),
      Command::ClearChat => moderation::clear_chat(&mut self.channels, &self.ctx, msg),
      Command::ClearMsg => moderation::clear_msg(&mut self.channels, msg),
      Command::Join => presence::join(self, msg),
      Command::Part => presence::part(self, msg),
      _ => {
        trace!("unhandled command {command}");
        Ok(())
      }
    };

    if let Err(reason) = result {
      if reason.is_diagnostic() {
        debug!("dropped {command}: {reason}");
      } else {
        trace!("dropped {command}: {reason}");
      }
    }
  }

  /// Parse and apply a raw protocol line.
  pub fn handle_line(&mut self, line: &str) -> Result<(), MessageParseError> {
    let msg = IrcMessageRef::parse(line)?;
    self.handle(&msg);
    Ok(())
  }

  /// The messages `msg` would produce in `channel`, without storing them.
  ///
  /// Only `PRIVMSG`, `USERNOTICE` and `NOTICE` produce messages here. This is
  /// used to replay history, so no channel state is touched.
  pub fn parse(&self, channel: &str, msg: &IrcMessageRef<'_>) -> Vec<ChatMessage> {
    let result = match msg.command() {
      Command::Privmsg => privmsg::parse(&self.ctx, channel, msg).map(|message| vec![message]),
      Command::UserNotice => Ok(user_notice::build(&self.ctx, channel, msg)),
      Command::Notice => Ok(vec![notice::build(msg)]),
      _ => Ok(Vec::new()),
    };
    result.unwrap_or_else(|reason| {
      trace!("parse dropped {}: {reason}", msg.command());
      Vec::new()
    })
  }

  /// Turn pending joins and parts into `Users joined` and `Users parted` messages.
  pub fn flush_presence(&mut self) {
    for channel in self.channels.iter_mut() {
      let Some(state) = channel.twitch_state_mut() else {
        continue;
      };
      let (joined, parted) = state.take_presence();
      if !joined.is_empty() {
        channel.add_message(Arc::new(users_joined(joined.iter().map(String::as_str))));
      }
      if !parted.is_empty() {
        channel.add_message(Arc::new(users_parted(parted.iter().map(String::as_str))));
      }
    }
  }
}

static_assert_send!(Dispatcher);
