use std::sync::Arc;

use super::Dispatcher;
use crate::context::Context;
use crate::error::Dropped;
use crate::irc::IrcMessageRef;
use crate::msg::{parse_message_text, ChatMessage, MessageBuilder, MessageFlag, ParseArgs};

pub(super) fn handle(dispatcher: &mut Dispatcher, msg: &IrcMessageRef<'_>) -> Result<(), Dropped> {
  let text = msg.param(1).ok_or(Dropped::MissingParam("text"))?;
  let (content, is_action) = parse_message_text(text);
  add_message(dispatcher, msg, content, false, is_action)
}

/// Build chatter content and store it in the target channel.
///
/// Subscription content is never ignored and never goes to mentions.
pub(super) fn add_message(
  dispatcher: &mut Dispatcher,
  msg: &IrcMessageRef<'_>,
  content: &str,
  is_sub: bool,
  is_action: bool,
) -> Result<(), Dropped> {
  let Dispatcher { ctx, channels, .. } = dispatcher;

  let channel = channels.resolve_mut(msg.param(0))?;
  let name = channel.name().clone();
  let args = ParseArgs {
    trim_subscriber_username: is_sub,
    is_staff_or_broadcaster: channel.is_staff_or_broadcaster(&ctx.account),
    is_received_whisper: false,
  };

  let mut builder = MessageBuilder::new(ctx, &name, msg, args, content, is_action);
  if is_sub {
    builder = builder.subscription();
  }
  let message = Arc::new(builder.build()?);

  if !is_sub && message.has(MessageFlag::Highlighted) {
    channels.mentions_mut().add_message(message.clone());
  }

  let channel = channels
    .get_mut(&name)
    .ok_or_else(|| Dropped::UnknownChannel(name.clone()))?;
  if let Some(state) = channel.twitch_state_mut() {
    state.chatters_mut().add(message.display_name());
  }
  channel.add_message(message);
  Ok(())
}

pub(super) fn parse(
  ctx: &Context,
  channel: &str,
  msg: &IrcMessageRef<'_>,
) -> Result<ChatMessage, Dropped> {
  let text = msg.param(1).ok_or(Dropped::MissingParam("text"))?;
  let (content, is_action) = parse_message_text(text);
  MessageBuilder::new(ctx, channel, msg, ParseArgs::default(), content, is_action).build()
}
