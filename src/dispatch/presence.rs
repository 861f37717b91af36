use super::Dispatcher;
use crate::error::Dropped;
use crate::irc::IrcMessageRef;

#[derive(Clone, Copy)]
enum Presence {
  Joined,
  Parted,
}

pub(super) fn join(dispatcher: &mut Dispatcher, msg: &IrcMessageRef<'_>) -> Result<(), Dropped> {
  track(dispatcher, msg, Presence::Joined)
}

pub(super) fn part(dispatcher: &mut Dispatcher, msg: &IrcMessageRef<'_>) -> Result<(), Dropped> {
  track(dispatcher, msg, Presence::Parted)
}

fn track(
  dispatcher: &mut Dispatcher,
  msg: &IrcMessageRef<'_>,
  presence: Presence,
) -> Result<(), Dropped> {
  if !dispatcher.ctx.settings.show_joins {
    return Ok(());
  }
  let nick = msg.nick().ok_or(Dropped::MissingParam("nick"))?;
  if dispatcher.ctx.account.is(nick) {
    return Ok(());
  }

  let channel = dispatcher.channels.resolve_mut(msg.param(0))?;
  if let Some(state) = channel.twitch_state_mut() {
    match presence {
      Presence::Joined => state.add_joined(nick),
      Presence::Parted => state.add_parted(nick),
    }
  }
  Ok(())
}
