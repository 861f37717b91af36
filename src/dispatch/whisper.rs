use std::sync::Arc;

use super::Dispatcher;
use crate::error::Dropped;
use crate::irc::IrcMessageRef;
use crate::msg::{parse_message_text, MessageBuilder, MessageFlag, ParseArgs};

/// `:sender!sender@sender.tmi.twitch.tv WHISPER recipient :text`
pub(super) fn handle(dispatcher: &mut Dispatcher, msg: &IrcMessageRef<'_>) -> Result<(), Dropped> {
  debug!("received whisper");

  let text = msg.param(1).ok_or(Dropped::MissingParam("text"))?;
  let (content, is_action) = parse_message_text(text);

  let ctx = &dispatcher.ctx;
  let channels = &mut dispatcher.channels;
  let whispers = channels.whispers().name().clone();

  let args = ParseArgs {
    is_received_whisper: true,
    ..Default::default()
  };
  let builder = MessageBuilder::new(ctx, &whispers, msg, args, content, is_action);
  let sender = builder.user_name().to_owned();
  let message = Arc::new(builder.build()?);

  dispatcher.last_whisperer = Some(sender);

  if message.has(MessageFlag::Highlighted) {
    channels.mentions_mut().add_message(message.clone());
  }
  channels.whispers_mut().add_message(message.clone());

  if ctx.settings.inline_whispers {
    let flags = message
      .flags()
      .with(MessageFlag::DoNotTriggerNotification)
      .with(MessageFlag::DoNotLog);
    let copy = Arc::new(message.with_flags(flags));
    for channel in channels.iter_mut() {
      channel.add_message(copy.clone());
    }
  }
  Ok(())
}
