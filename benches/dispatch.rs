use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tmi_chat::{Account, Context, Dispatcher, IrcMessageRef};

const SAMPLE: &[&str] = &[
  "@badge-info=;badges=;color=#0000FF;display-name=JuN1oRRRR;emotes=;flags=;id=e9d998c3-36f1-430f-89ec-6b887c28af36;mod=0;room-id=11148817;subscriber=0;tmi-sent-ts=1594545155039;turbo=0;user-id=29803735;user-type= :jun1orrrr!jun1orrrr@jun1orrrr.tmi.twitch.tv PRIVMSG #pajlada :dank cam",
  "@badge-info=subscriber/22;badges=moderator/1,subscriber/12;color=#19E6E6;display-name=randers;emotes=;flags=;id=d831d848-b7c7-4559-ae3a-2cb88f4dbfed;mod=1;room-id=11148817;subscriber=1;tmi-sent-ts=1594555275886;turbo=0;user-id=40286300;user-type=mod :randers!randers@randers.tmi.twitch.tv PRIVMSG #pajlada :\u{1}ACTION -tags\u{1}",
  "@badge-info=subscriber/5;badges=subscriber/3;color=;display-name=Mr_Kumo;emotes=;flags=;id=8b3cb4ae-2b8b-4b32-9a8d-0b2d5d3e8f6c;login=mr_kumo;mod=0;msg-id=resub;msg-param-cumulative-months=5;room-id=11148817;subscriber=1;system-msg=Mr_Kumo\\ssubscribed\\sat\\sTier\\s1.;tmi-sent-ts=1594583782376;user-id=104418549;user-type= :tmi.twitch.tv USERNOTICE #pajlada :forsen pog",
  "@emote-only=0;followers-only=-1;r9k=0;rituals=0;room-id=11148817;slow=0;subs-only=0 :tmi.twitch.tv ROOMSTATE #pajlada",
  "@badge-info=;badges=;color=;display-name=fourtf;emote-sets=0;mod=0;subscriber=0;user-type= :tmi.twitch.tv USERSTATE #pajlada",
  "@ban-duration=1;room-id=11148817;target-user-id=148973258;tmi-sent-ts=1594553828245 :tmi.twitch.tv CLEARCHAT #pajlada :fabzeef",
  "@login=alazymeme;room-id=;target-msg-id=3c92014f-340a-4dc3-a9c9-e5cf182f4a84;tmi-sent-ts=1594561955611 :tmi.twitch.tv CLEARMSG #pajlada :good night",
  "@msg-id=slow_on :tmi.twitch.tv NOTICE #pajlada :This room is now in slow mode. You may send messages every 10 seconds.",
  ":jtv MODE #pajlada +o fourtf",
];

fn read_input() -> Vec<String> {
  SAMPLE
    .iter()
    .cycle()
    .take(1000)
    .map(|line| line.to_string())
    .collect()
}

fn dispatcher() -> Dispatcher {
  let mut dispatcher = Dispatcher::new(Context::new(Account::new("fourtf")));
  let _ = dispatcher.join("#pajlada");
  dispatcher
}

fn dispatch(c: &mut Criterion) {
  let input = read_input();
  c.bench_with_input(BenchmarkId::new("parse", "sample"), &input, |b, lines| {
    b.iter(|| {
      for line in lines {
        black_box(IrcMessageRef::parse(line).expect("failed to parse"));
      }
    });
  });
  c.bench_with_input(BenchmarkId::new("dispatch", "sample"), &input, |b, lines| {
    b.iter_with_setup(dispatcher, |mut dispatcher| {
      for line in lines {
        dispatcher.handle(&IrcMessageRef::parse(line).expect("failed to parse"));
      }
      black_box(dispatcher)
    });
  });
}

criterion_group!(benches, dispatch);
criterion_main!(benches);
