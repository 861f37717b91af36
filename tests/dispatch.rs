use std::sync::{Arc, Mutex};

use tmi_chat::context::{HighlightController, UiSink};
use tmi_chat::filter::{HighlightList, IgnoreList, Phrase};
use tmi_chat::{
  Account, BadgeSet, ChannelName, ChatMessage, Context, Dispatcher, IrcMessageRef, MessageFlag,
  RoomModes, Settings,
};

#[derive(Default)]
struct Recorder {
  notified: Mutex<Vec<String>>,
  ui: Mutex<Vec<String>>,
}

impl Recorder {
  fn notified(&self) -> Vec<String> {
    self.notified.lock().unwrap().clone()
  }

  fn ui(&self) -> Vec<String> {
    self.ui.lock().unwrap().clone()
  }
}

impl HighlightController for Recorder {
  fn notify(&self, message: &ChatMessage) {
    self
      .notified
      .lock()
      .unwrap()
      .push(format!("{}: {}", message.login(), message.text()));
  }
}

impl UiSink for Recorder {
  fn room_modes_changed(&self, channel: &ChannelName) {
    self.ui.lock().unwrap().push(format!("modes {channel}"));
  }

  fn repaint_channel(&self, channel: &ChannelName) {
    self.ui.lock().unwrap().push(format!("repaint {channel}"));
  }

  fn force_relayout(&self) {
    self.ui.lock().unwrap().push("relayout".into());
  }
}

fn setup_with(settings: Settings) -> (Dispatcher, Arc<Recorder>) {
  let recorder = Arc::new(Recorder::default());
  let ctx = Context::new(Account::new("fourtf"))
    .with_settings(settings)
    .with_ignores(
      IgnoreList::default()
        .user("spammer")
        .phrase(Phrase::plain("buy followers")),
    )
    .with_highlights(HighlightList::default().phrase(Phrase::plain("forsen")))
    .with_controller(recorder.clone())
    .with_ui(recorder.clone());
  let mut dispatcher = Dispatcher::new(ctx);
  dispatcher.join("#pajlada").unwrap();
  dispatcher.join("#randers").unwrap();
  (dispatcher, recorder)
}

fn setup() -> (Dispatcher, Arc<Recorder>) {
  setup_with(Settings::default())
}

fn handle(dispatcher: &mut Dispatcher, line: &str) {
  dispatcher.handle(&IrcMessageRef::parse(line).unwrap());
}

fn texts(dispatcher: &Dispatcher, channel: &str) -> Vec<String> {
  dispatcher
    .channel(channel)
    .unwrap()
    .messages()
    .iter()
    .map(|m| m.text().to_owned())
    .collect()
}

fn privmsg(login: &str, id: &str, text: &str) -> String {
  format!("@display-name={login};id={id};tmi-sent-ts=1594555275886 :{login}!{login}@{login}.tmi.twitch.tv PRIVMSG #pajlada :{text}")
}

#[test]
fn badge_parsing_keeps_only_pairs() {
  for src in [
    "moderator/1,subscriber/12",
    "a,b/c/d,,e/",
    "/,//,x/y",
    "",
  ] {
    let set = BadgeSet::parse(src);
    let valid = src
      .split(',')
      .filter(|entry| entry.matches('/').count() == 1)
      .count();
    assert!(set.len() <= valid, "{src}");
    for badge in set.iter() {
      assert!(src.contains(&format!("{}/{}", badge.name(), badge.version())));
    }
  }
}

#[test]
fn privmsg_is_stored_and_notified() {
  let (mut dispatcher, recorder) = setup();
  handle(&mut dispatcher, &privmsg("randers", "a", "hello"));

  let channel = dispatcher.channel("pajlada").unwrap();
  let message = channel.messages().last().unwrap();
  assert_eq!(message.text(), "hello");
  assert_eq!(message.display_name(), "randers");
  assert!(channel.twitch_state().unwrap().chatters().contains("randers"));
  assert_eq!(recorder.notified(), ["randers: hello"]);
}

#[test]
fn action_privmsg() {
  let (mut dispatcher, _) = setup();
  handle(&mut dispatcher, &privmsg("randers", "a", "\u{1}ACTION waves\u{1}"));
  let channel = dispatcher.channel("pajlada").unwrap();
  let message = channel.messages().last().unwrap();
  assert_eq!(message.text(), "waves");
  assert!(message.has(MessageFlag::Action));
}

#[test]
fn ignored_privmsg_has_no_effect() {
  let (mut dispatcher, recorder) = setup();
  handle(&mut dispatcher, &privmsg("spammer", "a", "hello"));
  handle(&mut dispatcher, &privmsg("randers", "b", "buy followers here"));

  assert!(texts(&dispatcher, "pajlada").is_empty());
  assert!(recorder.notified().is_empty());
  let chatters = dispatcher
    .channel("pajlada")
    .unwrap()
    .twitch_state()
    .unwrap()
    .chatters();
  assert!(chatters.is_empty());
}

#[test]
fn broadcaster_sees_ignored_users() {
  let (mut dispatcher, _) = setup();
  dispatcher.join("fourtf").unwrap();
  handle(
    &mut dispatcher,
    ":spammer!spammer@spammer.tmi.twitch.tv PRIVMSG #fourtf :hello",
  );
  assert_eq!(texts(&dispatcher, "fourtf"), ["hello"]);
}

#[test]
fn highlighted_privmsg_goes_to_mentions() {
  let (mut dispatcher, _) = setup();
  handle(&mut dispatcher, &privmsg("randers", "a", "forsen"));
  handle(&mut dispatcher, &privmsg("randers", "b", "hi @fourtf"));
  handle(&mut dispatcher, &privmsg("randers", "c", "nothing"));

  let mentions: Vec<_> = dispatcher
    .mentions()
    .messages()
    .iter()
    .map(|m| m.text().to_owned())
    .collect();
  assert_eq!(mentions, ["forsen", "hi @fourtf"]);
  assert_eq!(texts(&dispatcher, "pajlada").len(), 3);
}

#[test]
fn resub_produces_two_subscription_messages() {
  let (mut dispatcher, recorder) = setup();
  handle(
    &mut dispatcher,
    r"@badges=subscriber/12;display-name=Randers;login=randers;msg-id=resub;system-msg=Randers\ssubscribed\sfor\s12\smonths!;tmi-sent-ts=1594555275886 :tmi.twitch.tv USERNOTICE #pajlada :forsen pog",
  );

  let messages: Vec<_> = dispatcher
    .channel("pajlada")
    .unwrap()
    .messages()
    .iter()
    .cloned()
    .collect();
  assert_eq!(messages.len(), 2);
  for message in &messages {
    assert!(message.has(MessageFlag::Subscription));
    assert!(!message.has(MessageFlag::Highlighted));
  }
  assert_eq!(messages[0].text(), "forsen pog");
  assert_eq!(messages[0].login(), "randers");
  assert!(messages[0].badges().contains("subscriber"));
  assert_eq!(messages[1].text(), "Randers subscribed for 12 months!");
  assert!(messages[1].has(MessageFlag::System));
  assert!(recorder.notified().is_empty());
  assert!(dispatcher.mentions().messages().is_empty());
}

#[test]
fn user_notice_without_content() {
  let (mut dispatcher, _) = setup();
  handle(
    &mut dispatcher,
    r"@login=randers;msg-id=sub;system-msg=randers\ssubscribed. :tmi.twitch.tv USERNOTICE #pajlada",
  );
  handle(
    &mut dispatcher,
    r"@login=randers;msg-id=raid;system-msg=5\sraiders :tmi.twitch.tv USERNOTICE #pajlada :ignored content",
  );
  assert_eq!(
    texts(&dispatcher, "pajlada"),
    ["randers subscribed.", "5 raiders"]
  );
}

#[test]
fn clear_chat_disables_and_announces() {
  let (mut dispatcher, recorder) = setup();
  handle(&mut dispatcher, &privmsg("randers", "a", "one"));
  handle(&mut dispatcher, &privmsg("pajlada", "b", "two"));
  handle(&mut dispatcher, ":tmi.twitch.tv CLEARCHAT #pajlada");

  let messages: Vec<_> = dispatcher
    .channel("pajlada")
    .unwrap()
    .messages()
    .iter()
    .cloned()
    .collect();
  assert_eq!(messages.len(), 3);
  assert!(messages[..2].iter().all(|m| m.has(MessageFlag::Disabled)));
  assert_eq!(messages[2].text(), "Chat has been cleared by a moderator.");
  assert!(!messages[2].has(MessageFlag::Disabled));
  assert_eq!(recorder.ui(), ["repaint pajlada"]);
}

#[test]
fn clear_chat_relayouts_when_hiding() {
  let (mut dispatcher, recorder) = setup_with(Settings {
    hide_moderated: true,
    ..Settings::default()
  });
  handle(&mut dispatcher, ":tmi.twitch.tv CLEARCHAT #pajlada :bob");
  assert_eq!(recorder.ui(), ["repaint pajlada", "relayout"]);
}

#[test]
fn timeout_message_parameters() {
  let (mut dispatcher, _) = setup();
  handle(&mut dispatcher, &privmsg("bob", "a", "hello"));
  handle(
    &mut dispatcher,
    "@ban-duration=600;ban-reason=spam;room-id=1;target-user-id=2 :tmi.twitch.tv CLEARCHAT #pajlada :bob",
  );
  handle(&mut dispatcher, ":tmi.twitch.tv CLEARCHAT #randers :bob");

  let channel = dispatcher.channel("pajlada").unwrap();
  assert!(channel.messages().find_by_id("a").unwrap().has(MessageFlag::Disabled));
  let timeout = channel.messages().last().unwrap();
  let params = timeout.timeout().unwrap();
  assert_eq!(
    (params.user(), params.duration(), params.reason()),
    ("bob", "600", "spam")
  );
  assert_eq!(timeout.text(), "bob has been timed out for 10m: \"spam\".");

  let channel = dispatcher.channel("randers").unwrap();
  let params = channel.messages().last().unwrap().timeout().unwrap().clone();
  assert_eq!(
    (params.user(), params.duration(), params.reason()),
    ("bob", "", "")
  );
}

#[test]
fn repeated_timeouts_are_coalesced() {
  let (mut dispatcher, _) = setup();
  for _ in 0..3 {
    handle(
      &mut dispatcher,
      "@ban-duration=1 :tmi.twitch.tv CLEARCHAT #pajlada :bob",
    );
  }
  assert_eq!(
    texts(&dispatcher, "pajlada"),
    ["bob has been timed out for 1s. (3 times)"]
  );
}

#[test]
fn clear_msg_removes_exactly_one() {
  let (mut dispatcher, _) = setup();
  handle(&mut dispatcher, &privmsg("randers", "abc123", "one"));
  handle(&mut dispatcher, &privmsg("randers", "def456", "two"));

  handle(
    &mut dispatcher,
    "@login=randers;target-msg-id=abc123 :tmi.twitch.tv CLEARMSG #pajlada :one",
  );
  assert_eq!(texts(&dispatcher, "pajlada"), ["two"]);

  handle(
    &mut dispatcher,
    "@login=randers;target-msg-id=abc123 :tmi.twitch.tv CLEARMSG #pajlada :one",
  );
  assert_eq!(texts(&dispatcher, "pajlada"), ["two"]);
}

#[test]
fn jtv_notice_is_broadcast() {
  let (mut dispatcher, _) = setup();
  handle(&mut dispatcher, ":tmi.twitch.tv NOTICE #jtv :maintenance soon");

  for channel in ["pajlada", "randers"] {
    assert_eq!(texts(&dispatcher, channel), ["maintenance soon"]);
  }
  assert_eq!(dispatcher.whispers().messages().len(), 1);
  assert_eq!(dispatcher.mentions().messages().len(), 1);
}

#[test]
fn unparseable_notice_target_is_broadcast() {
  let (mut dispatcher, _) = setup();
  handle(
    &mut dispatcher,
    ":tmi.twitch.tv NOTICE * :Login authentication failed",
  );
  for channel in ["pajlada", "randers"] {
    assert_eq!(
      texts(&dispatcher, channel),
      ["Login expired! Try logging in again."]
    );
  }
}

#[test]
fn channel_notice() {
  let (mut dispatcher, _) = setup();
  handle(
    &mut dispatcher,
    "@msg-id=slow_on :tmi.twitch.tv NOTICE #pajlada :This room is now in slow mode.",
  );
  handle(
    &mut dispatcher,
    "@msg-id=usage_delete :tmi.twitch.tv NOTICE #pajlada :Usage: \"/delete <msg id>\"",
  );
  handle(
    &mut dispatcher,
    "@msg-id=slow_on :tmi.twitch.tv NOTICE #forsen :This room is now in slow mode.",
  );
  assert_eq!(
    texts(&dispatcher, "pajlada"),
    [
      "This room is now in slow mode.",
      "Usage: \"/delete <msg-id>\" - can't take more than one argument"
    ]
  );
  assert!(texts(&dispatcher, "randers").is_empty());
}

#[test]
fn room_state_omitted_tags_are_unchanged() {
  let (mut dispatcher, recorder) = setup();
  handle(
    &mut dispatcher,
    "@broadcaster-lang=en;emote-only=1;followers-only=10;r9k=1;room-id=11148817;slow=30;subs-only=1 :tmi.twitch.tv ROOMSTATE #pajlada",
  );
  let before = dispatcher.room_modes("pajlada").unwrap();

  let partial = [
    "@emote-only=0",
    "@followers-only=-1",
    "@r9k=0",
    "@slow=0",
    "@subs-only=0",
    "@broadcaster-lang=",
  ];
  for tags in partial {
    let (mut dispatcher, _) = setup();
    handle(
      &mut dispatcher,
      "@broadcaster-lang=en;emote-only=1;followers-only=10;r9k=1;slow=30;subs-only=1 :tmi.twitch.tv ROOMSTATE #pajlada",
    );
    handle(
      &mut dispatcher,
      &format!("{tags} :tmi.twitch.tv ROOMSTATE #pajlada"),
    );
    let after = dispatcher.room_modes("pajlada").unwrap();
    let changed = [
      before.emote_only != after.emote_only,
      before.follower_only != after.follower_only,
      before.r9k != after.r9k,
      before.slow_mode != after.slow_mode,
      before.submode != after.submode,
      before.broadcaster_lang != after.broadcaster_lang,
    ];
    assert_eq!(changed.iter().filter(|c| **c).count(), 1, "{tags}");
  }

  assert_eq!(recorder.ui(), ["modes pajlada"]);
  let state = dispatcher.channel("pajlada").unwrap().twitch_state().unwrap();
  assert_eq!(state.room_id(), Some("11148817"));
}

#[test]
fn room_state_for_unjoined_channel_has_no_effect() {
  let (mut dispatcher, recorder) = setup();
  handle(&mut dispatcher, "@slow=10 :tmi.twitch.tv ROOMSTATE #forsen");
  handle(&mut dispatcher, "@slow=10 :tmi.twitch.tv ROOMSTATE #");
  assert!(recorder.ui().is_empty());
  assert_eq!(dispatcher.room_modes("pajlada"), Some(RoomModes::default()));
}

#[test]
fn user_state_and_mode() {
  let (mut dispatcher, _) = setup();
  handle(
    &mut dispatcher,
    "@badges=vip/1;mod=0 :tmi.twitch.tv USERSTATE #pajlada",
  );
  handle(&mut dispatcher, ":jtv MODE #pajlada +o randers");
  handle(&mut dispatcher, ":jtv MODE #pajlada -o randers");

  let state = dispatcher.channel("pajlada").unwrap().twitch_state().unwrap();
  assert!(state.is_vip());
  assert!(!state.is_mod());
  assert_eq!(state.mods(), ["randers", "randers"]);
}

#[test]
fn whisper_fan_out() {
  let (mut dispatcher, recorder) = setup();
  handle(
    &mut dispatcher,
    "@display-name=Randers;message-id=1 :randers!randers@randers.tmi.twitch.tv WHISPER fourtf :hey forsen",
  );

  assert_eq!(dispatcher.last_whisperer(), Some("randers"));
  let original = dispatcher.whispers().messages().last().unwrap().clone();
  assert!(original.has(MessageFlag::Whisper));
  assert!(original.has(MessageFlag::Highlighted));
  assert!(!original.has(MessageFlag::DoNotLog));
  assert!(!original.has(MessageFlag::DoNotTriggerNotification));
  assert_eq!(dispatcher.mentions().messages().len(), 1);

  for channel in ["pajlada", "randers"] {
    let channel = dispatcher.channel(channel).unwrap();
    let copy = channel.messages().last().unwrap();
    assert_eq!(copy.text(), "hey forsen");
    assert!(copy.has(MessageFlag::Whisper));
    assert!(copy.has(MessageFlag::DoNotLog));
    assert!(copy.has(MessageFlag::DoNotTriggerNotification));
  }
  assert_eq!(recorder.notified().len(), 1);
}

#[test]
fn whisper_without_inline() {
  let (mut dispatcher, _) = setup_with(Settings {
    inline_whispers: false,
    ..Settings::default()
  });
  handle(
    &mut dispatcher,
    ":randers!randers@randers.tmi.twitch.tv WHISPER fourtf :hey",
  );
  assert_eq!(dispatcher.whispers().messages().len(), 1);
  assert!(texts(&dispatcher, "pajlada").is_empty());
}

#[test]
fn ignored_whisper() {
  let (mut dispatcher, _) = setup();
  handle(
    &mut dispatcher,
    ":spammer!spammer@spammer.tmi.twitch.tv WHISPER fourtf :hey",
  );
  assert!(dispatcher.whispers().messages().is_empty());
  assert_eq!(dispatcher.last_whisperer(), None);
}

#[test]
fn presence_is_gated_and_batched() {
  let (mut dispatcher, _) = setup();
  handle(&mut dispatcher, ":randers!randers@randers.tmi.twitch.tv JOIN #pajlada");
  dispatcher.flush_presence();
  assert!(texts(&dispatcher, "pajlada").is_empty());

  let (mut dispatcher, _) = setup_with(Settings {
    show_joins: true,
    ..Settings::default()
  });
  handle(&mut dispatcher, ":randers!randers@randers.tmi.twitch.tv JOIN #pajlada");
  handle(&mut dispatcher, ":fourtf!fourtf@fourtf.tmi.twitch.tv JOIN #pajlada");
  handle(&mut dispatcher, ":zneix!zneix@zneix.tmi.twitch.tv JOIN #pajlada");
  handle(&mut dispatcher, ":randers!randers@randers.tmi.twitch.tv PART #pajlada");
  dispatcher.flush_presence();
  dispatcher.flush_presence();
  assert_eq!(
    texts(&dispatcher, "pajlada"),
    ["Users joined: randers, zneix", "Users parted: randers"]
  );
}

#[test]
fn malformed_events_do_not_stop_dispatch() {
  let (mut dispatcher, _) = setup();
  for line in [
    ":tmi.twitch.tv CLEARCHAT",
    ":tmi.twitch.tv CLEARCHAT #",
    ":tmi.twitch.tv CLEARMSG",
    ":tmi.twitch.tv USERSTATE",
    ":tmi.twitch.tv ROOMSTATE",
    ":jtv MODE",
    ":randers!randers@randers.tmi.twitch.tv PRIVMSG #pajlada",
    ":randers!randers@randers.tmi.twitch.tv WHISPER fourtf",
    ":tmi.twitch.tv USERNOTICE",
  ] {
    handle(&mut dispatcher, line);
  }
  assert!(texts(&dispatcher, "pajlada").is_empty());

  handle(&mut dispatcher, &privmsg("randers", "a", "still alive"));
  assert_eq!(texts(&dispatcher, "pajlada"), ["still alive"]);
}

#[test]
fn message_limit_bounds_history() {
  let (mut dispatcher, _) = setup_with(Settings {
    message_limit: 2,
    ..Settings::default()
  });
  for (i, text) in ["a", "b", "c"].into_iter().enumerate() {
    handle(&mut dispatcher, &privmsg("randers", &i.to_string(), text));
  }
  assert_eq!(texts(&dispatcher, "pajlada"), ["b", "c"]);
}
