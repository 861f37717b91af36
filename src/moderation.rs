//! Replays moderation actions against a channel's history.

use std::sync::Arc;

use crate::common::maybe_unescape;
use crate::context::Context;
use crate::error::Dropped;
use crate::irc::{IrcMessageRef, Tag};
use crate::msg::system::{system_message, timeout_message, CHAT_CLEARED};
use crate::state::{Channels, MessageStore};

/// `CLEARCHAT #channel` clears the whole channel,
/// `CLEARCHAT #channel :user` times out or bans one user.
pub(crate) fn clear_chat(
  channels: &mut Channels,
  ctx: &Context,
  msg: &IrcMessageRef<'_>,
) -> Result<(), Dropped> {
  let channel = channels.resolve_mut(msg.param(0))?;
  let name = channel.name().clone();
  let store = channel.messages_mut();

  match msg.param(1) {
    None => apply_clear(store),
    Some(user) => {
      let duration = msg.tag(Tag::BanDuration).unwrap_or_default();
      let reason = maybe_unescape(msg.tag(Tag::BanReason).unwrap_or_default());
      apply_timeout(store, user, duration, &reason);
    }
  }

  ctx.ui.repaint_channel(&name);
  if ctx.settings.hide_moderated {
    ctx.ui.force_relayout();
  }
  Ok(())
}

/// `CLEARMSG #channel :text` with a `target-msg-id` tag removes one message.
pub(crate) fn clear_msg(channels: &mut Channels, msg: &IrcMessageRef<'_>) -> Result<(), Dropped> {
  let channel = channels.resolve_mut(msg.param(0))?;
  if let Some(id) = msg.tag(Tag::TargetMsgId) {
    apply_delete(channel.messages_mut(), id);
  }
  Ok(())
}

/// Strike out every message and announce the clear.
pub fn apply_clear(store: &mut impl MessageStore) {
  store.disable_all();
  store.append(Arc::new(system_message(CHAT_CLEARED)));
}

/// Add a timeout notice for `user`. Empty `duration` means a permanent ban.
pub fn apply_timeout(store: &mut impl MessageStore, user: &str, duration: &str, reason: &str) {
  store.add_or_replace_timeout(timeout_message(user, duration, reason, 1));
}

/// Remove the message with `id`, if it is still stored.
pub fn apply_delete(store: &mut impl MessageStore, id: &str) -> bool {
  store.delete_by_id(id)
}
