//! ## Dispatcher task
//!
//! [`spawn`] moves a [`Dispatcher`] into a tokio task, which becomes the only
//! owner of channel state. Other tasks talk to it through a cloneable
//! [`DispatchHandle`]: protocol messages are queued in arrival order, and reads
//! return copies of the current state.
//!
//! ```rust,no_run
//! # async fn run() -> Result<(), tmi_chat::runtime::RuntimeError> {
//! use tmi_chat::{Account, Context, Dispatcher};
//!
//! let handle = tmi_chat::runtime::spawn(Dispatcher::new(Context::new(Account::new("fourtf"))));
//! handle.join("#pajlada").await?;
//! handle.send_line("@slow=10 :tmi.twitch.tv ROOMSTATE #pajlada")?;
//!
//! let modes = handle.room_modes("pajlada").await?;
//! assert_eq!(modes.map(|m| m.slow_mode), Some(10));
//!
//! let dispatcher = handle.shutdown().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;

use crate::common::InvalidChannelName;
use crate::context::Settings;
use crate::dispatch::Dispatcher;
use crate::irc::{IrcMessage, IrcMessageRef};
use crate::msg::ChatMessage;
use crate::state::RoomModes;

/// How often pending joins and parts are merged into `Users joined` and `Users parted` messages.
pub const PRESENCE_FLUSH_INTERVAL: Duration = Duration::from_millis(500);

/// An error returned by [`DispatchHandle`] operations.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
  /// The dispatcher task has stopped.
  #[error("dispatcher task is closed")]
  Closed,

  #[error(transparent)]
  InvalidChannel(#[from] InvalidChannelName),
}

impl<T> From<mpsc::error::SendError<T>> for RuntimeError {
  fn from(_: mpsc::error::SendError<T>) -> Self {
    Self::Closed
  }
}

impl From<oneshot::error::RecvError> for RuntimeError {
  fn from(_: oneshot::error::RecvError) -> Self {
    Self::Closed
  }
}

type Reply<T> = oneshot::Sender<T>;

enum Request {
  Message(IrcMessage),
  Line(String),
  Join(String, Reply<Result<(), InvalidChannelName>>),
  Part(String),
  RoomModes(String, Reply<Option<RoomModes>>),
  Messages(String, Reply<Option<Vec<Arc<ChatMessage>>>>),
  LastWhisperer(Reply<Option<String>>),
  FlushPresence,
  Settings(Settings),
  Shutdown(Reply<Dispatcher>),
}

/// Handle to a running dispatcher task.
///
/// The task stops once every handle is dropped, or on [`DispatchHandle::shutdown`].
#[derive(Clone, Debug)]
pub struct DispatchHandle {
  tx: mpsc::UnboundedSender<Request>,
}

/// Move `dispatcher` into a new task on the current tokio runtime.
///
/// The task flushes pending joins and parts every [`PRESENCE_FLUSH_INTERVAL`].
///
/// Panics if called outside of a runtime.
pub fn spawn(dispatcher: Dispatcher) -> DispatchHandle {
  let (tx, rx) = mpsc::unbounded_channel();
  tokio::spawn(run(dispatcher, rx));
  DispatchHandle { tx }
}

async fn run(mut dispatcher: Dispatcher, mut rx: mpsc::UnboundedReceiver<Request>) {
  let mut presence = tokio::time::interval(PRESENCE_FLUSH_INTERVAL);
  presence.set_missed_tick_behavior(MissedTickBehavior::Delay);

  loop {
    let request = tokio::select! {
      biased;
      _ = presence.tick() => {
        dispatcher.flush_presence();
        continue;
      }
      request = rx.recv() => request,
    };
    let Some(request) = request else {
      break;
    };

    match request {
      Request::Message(msg) => dispatcher.handle(&msg.as_ref()),
      Request::Line(line) => match IrcMessageRef::parse(&line) {
        Ok(msg) => dispatcher.handle(&msg),
        Err(e) => trace!("{e}: {line:?}"),
      },
      Request::Join(channel, reply) => {
        let _ = reply.send(dispatcher.join(&channel).map(|_| ()));
      }
      Request::Part(channel) => {
        dispatcher.part(&channel);
      }
      Request::RoomModes(channel, reply) => {
        let _ = reply.send(dispatcher.room_modes(&channel));
      }
      Request::Messages(channel, reply) => {
        let snapshot = dispatcher
          .channel(&channel)
          .map(|channel| channel.messages().snapshot());
        let _ = reply.send(snapshot);
      }
      Request::LastWhisperer(reply) => {
        let _ = reply.send(dispatcher.last_whisperer().map(String::from));
      }
      Request::FlushPresence => dispatcher.flush_presence(),
      Request::Settings(settings) => dispatcher.set_settings(settings),
      Request::Shutdown(reply) => {
        let _ = reply.send(dispatcher);
        return;
      }
    }
  }
  trace!("all dispatcher handles dropped");
}

impl DispatchHandle {
  /// Queue a protocol message.
  pub fn send(&self, msg: IrcMessage) -> Result<(), RuntimeError> {
    Ok(self.tx.send(Request::Message(msg))?)
  }

  /// Queue a raw protocol line. Lines which fail to parse are skipped.
  pub fn send_line(&self, line: impl Into<String>) -> Result<(), RuntimeError> {
    Ok(self.tx.send(Request::Line(line.into()))?)
  }

  pub async fn join(&self, channel: impl Into<String>) -> Result<(), RuntimeError> {
    let (reply, rx) = oneshot::channel();
    self.tx.send(Request::Join(channel.into(), reply))?;
    Ok(rx.await??)
  }

  pub fn part(&self, channel: impl Into<String>) -> Result<(), RuntimeError> {
    Ok(self.tx.send(Request::Part(channel.into()))?)
  }

  /// A copy of a channel's room modes, after every message queued before this call.
  pub async fn room_modes(
    &self,
    channel: impl Into<String>,
  ) -> Result<Option<RoomModes>, RuntimeError> {
    let (reply, rx) = oneshot::channel();
    self.tx.send(Request::RoomModes(channel.into(), reply))?;
    Ok(rx.await?)
  }

  /// A copy of a channel's message history.
  pub async fn messages(
    &self,
    channel: impl Into<String>,
  ) -> Result<Option<Vec<Arc<ChatMessage>>>, RuntimeError> {
    let (reply, rx) = oneshot::channel();
    self.tx.send(Request::Messages(channel.into(), reply))?;
    Ok(rx.await?)
  }

  pub async fn last_whisperer(&self) -> Result<Option<String>, RuntimeError> {
    let (reply, rx) = oneshot::channel();
    self.tx.send(Request::LastWhisperer(reply))?;
    Ok(rx.await?)
  }

  pub fn flush_presence(&self) -> Result<(), RuntimeError> {
    Ok(self.tx.send(Request::FlushPresence)?)
  }

  pub fn set_settings(&self, settings: Settings) -> Result<(), RuntimeError> {
    Ok(self.tx.send(Request::Settings(settings))?)
  }

  /// Stop the task after every queued message, and take back the dispatcher.
  pub async fn shutdown(self) -> Result<Dispatcher, RuntimeError> {
    let (reply, rx) = oneshot::channel();
    self.tx.send(Request::Shutdown(reply))?;
    Ok(rx.await?)
  }
}

static_assert_send!(DispatchHandle);
static_assert_sync!(DispatchHandle);
