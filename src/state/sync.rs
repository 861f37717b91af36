//! Applies server updates to channel state.

use super::Channels;
use crate::context::Context;
use crate::error::Dropped;
use crate::irc::{IrcMessageRef, Tag};
use crate::msg::BadgeSet;

/// `ROOMSTATE`: room id and room modes.
pub(crate) fn room_state(
  channels: &mut Channels,
  ctx: &Context,
  msg: &IrcMessageRef<'_>,
) -> Result<(), Dropped> {
  let channel = channels.resolve_mut(msg.param(0))?;
  let name = channel.name().clone();
  let Some(state) = channel.twitch_state_mut() else {
    return Err(Dropped::UnknownChannel(name));
  };

  if let Some(room_id) = msg.tag(Tag::RoomId) {
    state.set_room_id(room_id);
  }
  state.room_modes_mut().apply(msg);

  ctx.ui.room_modes_changed(&name);
  Ok(())
}

/// `USERSTATE`: the local user's status in a channel.
pub(crate) fn user_state(channels: &mut Channels, msg: &IrcMessageRef<'_>) -> Result<(), Dropped> {
  let channel = channels.resolve_mut(msg.param(0))?;
  let name = channel.name().clone();
  let Some(state) = channel.twitch_state_mut() else {
    return Err(Dropped::UnknownChannel(name));
  };

  if let Some(badges) = msg.tag(Tag::Badges) {
    let badges = BadgeSet::parse(badges);
    state.set_vip(badges.contains("vip"));
    state.set_staff(badges.contains("staff"));
  }
  if let Some(value) = msg.tag(Tag::Mod) {
    state.set_mod(value == "1");
  }
  Ok(())
}

/// `MODE #channel +o name`
///
/// Both `+o` and `-o` append to the moderator list.
pub(crate) fn mode(channels: &mut Channels, msg: &IrcMessageRef<'_>) -> Result<(), Dropped> {
  let channel = channels.resolve_mut(msg.param(0))?;
  let name = channel.name().clone();
  let Some(state) = channel.twitch_state_mut() else {
    return Err(Dropped::UnknownChannel(name));
  };

  match msg.param(1) {
    Some("+o" | "-o") => {
      let user = msg.param(2).ok_or(Dropped::MissingParam("mode target"))?;
      state.add_mod(user);
    }
    _ => {}
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::common::ChannelName;
  use crate::context::{Account, Settings};

  fn setup() -> (Channels, Context) {
    let settings = Settings::default();
    let mut channels = Channels::new(&settings);
    channels.join(ChannelName::resolve("pajlada").unwrap(), &settings);
    (channels, Context::new(Account::new("fourtf")))
  }

  fn state(channels: &Channels) -> &crate::state::TwitchState {
    channels.get("pajlada").unwrap().twitch_state().unwrap()
  }

  #[test]
  fn room_id_overwrites() {
    let (mut channels, ctx) = setup();
    room_state(&mut channels, &ctx, &irc!("@room-id=1;slow=10 :tmi.twitch.tv ROOMSTATE #pajlada")).unwrap();
    room_state(&mut channels, &ctx, &irc!("@room-id=2 :tmi.twitch.tv ROOMSTATE #pajlada")).unwrap();
    assert_eq!(state(&channels).room_id(), Some("2"));
    assert_eq!(state(&channels).room_modes().slow_mode, 10);
  }

  #[test]
  fn room_state_for_unknown_channel() {
    let (mut channels, ctx) = setup();
    let result = room_state(&mut channels, &ctx, &irc!("@slow=10 :tmi.twitch.tv ROOMSTATE #forsen"));
    assert!(matches!(result, Err(Dropped::UnknownChannel(_))));
  }

  #[test]
  fn user_state_partial() {
    let (mut channels, _) = setup();
    user_state(&mut channels, &irc!("@badges=vip/1;mod=0 :tmi.twitch.tv USERSTATE #pajlada")).unwrap();
    assert!(state(&channels).is_vip());
    assert!(!state(&channels).is_mod());

    user_state(&mut channels, &irc!("@mod=1 :tmi.twitch.tv USERSTATE #pajlada")).unwrap();
    assert!(state(&channels).is_vip());
    assert!(state(&channels).is_mod());

    user_state(&mut channels, &irc!("@badges=staff/1 :tmi.twitch.tv USERSTATE #pajlada")).unwrap();
    assert!(!state(&channels).is_vip());
    assert!(state(&channels).is_staff());
    assert!(state(&channels).is_mod());
  }

  #[test]
  fn mode_appends_for_grant_and_revoke() {
    let (mut channels, _) = setup();
    mode(&mut channels, &irc!(":jtv MODE #pajlada +o fourtf")).unwrap();
    mode(&mut channels, &irc!(":jtv MODE #pajlada -o fourtf")).unwrap();
    mode(&mut channels, &irc!(":jtv MODE #pajlada +v fourtf")).unwrap();
    assert_eq!(state(&channels).mods(), ["fourtf", "fourtf"]);
  }

  #[test]
  fn mode_without_target() {
    let (mut channels, _) = setup();
    assert_eq!(
      mode(&mut channels, &irc!(":jtv MODE #pajlada +o")),
      Err(Dropped::MissingParam("mode target"))
    );
    assert!(state(&channels).mods().is_empty());
  }
}
