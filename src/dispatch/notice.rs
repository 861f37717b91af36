use std::sync::Arc;

use super::Dispatcher;
use crate::common::ChannelName;
use crate::error::Dropped;
use crate::irc::{IrcMessageRef, Tag};
use crate::msg::system::{system_message, DELETE_USAGE, LOGIN_EXPIRED};
use crate::msg::ChatMessage;

const LOGIN_AUTH: &str = "Login auth";

/// Notices sent to this target are meant for every channel.
const BROADCAST_TARGET: &str = "jtv";

pub(super) fn build(msg: &IrcMessageRef<'_>) -> ChatMessage {
  let content = msg.param(1).unwrap_or_default();
  let is_login_failure = content
    .get(..LOGIN_AUTH.len())
    .is_some_and(|prefix| prefix.eq_ignore_ascii_case(LOGIN_AUTH));
  match is_login_failure {
    true => system_message(LOGIN_EXPIRED),
    false => system_message(content),
  }
}

pub(super) fn handle(dispatcher: &mut Dispatcher, msg: &IrcMessageRef<'_>) -> Result<(), Dropped> {
  let message = Arc::new(build(msg));

  let target = msg
    .param(0)
    .and_then(|target| ChannelName::resolve(target).ok())
    .filter(|name| name.as_str() != BROADCAST_TARGET);
  let Some(name) = target else {
    for channel in dispatcher.channels.iter_with_special_mut() {
      channel.add_message(message.clone());
    }
    return Ok(());
  };

  let channel = dispatcher
    .channels
    .get_mut(&name)
    .ok_or_else(|| Dropped::UnknownChannel(name.clone()))?;
  match msg.tag(Tag::MsgId) {
    Some("bad_delete_message_error" | "usage_delete") => {
      channel.add_message(Arc::new(system_message(DELETE_USAGE)));
    }
    _ => channel.add_message(message),
  }
  Ok(())
}
