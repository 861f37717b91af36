use std::sync::Arc;

use super::{privmsg, Dispatcher};
use crate::common::maybe_unescape;
use crate::context::Context;
use crate::error::Dropped;
use crate::irc::{IrcMessageRef, Tag};
use crate::msg::system::system_message;
use crate::msg::{ChatMessage, MessageBuilder, MessageFlag, ParseArgs};

/// Notice kinds which may carry a message from the subscriber.
fn has_sub_content(msg_id: &str) -> bool {
  matches!(msg_id, "sub" | "resub" | "subgift")
}

fn content<'src>(msg: &IrcMessageRef<'src>) -> Option<&'src str> {
  let msg_id = msg.tag(Tag::MsgId).unwrap_or_default();
  msg
    .param(1)
    .filter(|content| has_sub_content(msg_id) && !content.is_empty())
}

/// The server-rendered notice text, as a subscription system message.
fn system(msg: &IrcMessageRef<'_>) -> Option<ChatMessage> {
  let text = maybe_unescape(msg.tag(Tag::SystemMsg)?);
  let message = system_message(text);
  Some(message.with_flags(message.flags().with(MessageFlag::Subscription)))
}

pub(super) fn handle(dispatcher: &mut Dispatcher, msg: &IrcMessageRef<'_>) -> Result<(), Dropped> {
  if let Some(content) = content(msg) {
    privmsg::add_message(dispatcher, msg, content, true, false)?;
  }

  if let Some(message) = system(msg) {
    let channel = dispatcher.channels.resolve_mut(msg.param(0))?;
    channel.add_message(Arc::new(message));
  }
  Ok(())
}

/// Both messages a `USERNOTICE` produces: the subscriber's message and the system text.
pub(super) fn build(
  ctx: &Context,
  channel: &str,
  msg: &IrcMessageRef<'_>,
) -> Vec<ChatMessage> {
  let mut messages = Vec::with_capacity(2);

  if let Some(content) = content(msg) {
    let args = ParseArgs {
      trim_subscriber_username: true,
      ..Default::default()
    };
    let built = MessageBuilder::new(ctx, channel, msg, args, content, false)
      .subscription()
      .build();
    // subscription content is never ignored
    if let Ok(message) = built {
      messages.push(message);
    }
  }

  messages.extend(system(msg));
  messages
}
