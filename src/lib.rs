#![doc = include_str!("../README.md")]

#[macro_use]
extern crate tracing;

pub(crate) const fn assert_sync<T: ?Sized + Sync>() {}
macro_rules! static_assert_sync {
  ($T:ty) => {
    const _: () = {
      let _ = $crate::assert_sync::<$T>;
    };
  };
}

pub(crate) const fn assert_send<T: ?Sized + Send>() {}
macro_rules! static_assert_send {
  ($T:ty) => {
    const _: () = {
      let _ = $crate::assert_send::<$T>;
    };
  };
}

#[macro_use]
mod macros;

pub mod common;
pub use common::{ChannelName, InvalidChannelName};

pub mod irc;
pub use irc::{Command, IrcMessage, IrcMessageRef, MessageParseError, Prefix, Tag};

pub mod msg;
pub use msg::{BadgeSet, ChatMessage, MessageFlag, MessageFlags, ParseArgs};

pub mod state;
pub use state::{Channel, ChannelKind, Channels, MessageLog, RoomModes};

pub mod context;
pub use context::{Account, Context, Settings};

pub mod filter;

pub mod moderation;

pub mod dispatch;
pub use dispatch::Dispatcher;

pub mod error;

#[cfg(feature = "runtime")]
pub mod runtime;
