use std::fmt::Display;
use std::ops::Deref;

use crate::common::Span;

macro_rules! tags_def {
  (
    $tag:ident;
    $($(#[$meta:meta])* $key:literal = $name:ident),* $(,)?
  ) => {
    /// A known tag name.
    #[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
    #[non_exhaustive]
    pub enum $tag<'src> {
      $(
        $(#[$meta])*
        $name,
      )*
      Unknown(&'src str),
    }

    impl<'src> $tag<'src> {
      #[doc = concat!("Get the string value of the [`", stringify!($tag), "`].")]
      #[inline]
      pub fn as_str(&self) -> &'src str {
        match self {
          $(Self::$name => $key,)*
          Self::Unknown(key) => key,
        }
      }

      #[doc = concat!("Parse a [`", stringify!($tag), "`] from a string.")]
      #[inline]
      pub fn parse(src: &'src str) -> Self {
        match src {
          $($key => Self::$name,)*
          _ => Self::Unknown(src),
        }
      }
    }
  }
}

impl<'src> From<&'src str> for Tag<'src> {
  fn from(value: &'src str) -> Self {
    Tag::parse(value)
  }
}

tags_def! {
  Tag;
  /// Kind of notice or user notice, e.g. `resub` or `usage_delete`.
  "msg-id" = MsgId,
  /// `name/version` pairs separated by commas.
  "badges" = Badges,
  "badge-info" = BadgeInfo,
  "display-name" = DisplayName,
  "emote-only" = EmoteOnly,
  "emotes" = Emotes,
  "emote-sets" = EmoteSets,
  "flags" = Flags,
  /// Unique ID of a chat message.
  "id" = Id,
  "mod" = Mod,
  "vip" = Vip,
  "room-id" = RoomId,
  "subscriber" = Subscriber,
  "tmi-sent-ts" = TmiSentTs,
  "turbo" = Turbo,
  "user-id" = UserId,
  "user-type" = UserType,
  "color" = Color,
  "bits" = Bits,
  "login" = Login,
  "followers-only" = FollowersOnly,
  "r9k" = R9K,
  "slow" = Slow,
  "subs-only" = SubsOnly,
  "broadcaster-lang" = BroadcasterLang,
  /// Server-rendered text of a user notice. Escaped.
  "system-msg" = SystemMsg,
  "target-msg-id" = TargetMsgId,
  "target-user-id" = TargetUserId,
  /// Timeout length in seconds. Absent for permanent bans.
  "ban-duration" = BanDuration,
  /// Escaped.
  "ban-reason" = BanReason,
  "message-id" = MessageId,
  "thread-id" = ThreadId,
}

impl<'src> Display for Tag<'src> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Default, Clone)]
pub(super) struct RawTags(Vec<TagPair>);

impl Deref for RawTags {
  type Target = Vec<TagPair>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

#[derive(Clone, Copy)]
pub(super) struct TagPair {
  pub(super) key: Span,
  pub(super) value: Span,
}

impl TagPair {
  #[inline]
  pub(super) fn get<'a>(&self, src: &'a str) -> (&'a str, &'a str) {
    (&src[self.key], &src[self.value])
  }
}

/// `@key=value;key=value <rest>`
///
/// Returns an empty set if there are no tags, and `None` if the tags
/// are not followed by anything.
pub(super) fn parse(src: &str, pos: &mut usize) -> Option<RawTags> {
  let Some(rest) = src[*pos..].strip_prefix('@') else {
    return Some(RawTags::default());
  };
  let start = *pos + 1;
  let end = start + rest.find(' ')?;

  let mut tags = Vec::with_capacity(32);
  let mut key_start = start;
  for segment in src[start..end].split(';') {
    let segment_end = key_start + segment.len();
    let pair = match segment.find('=') {
      // `key=value`, the value may itself contain `=`
      Some(eq) => TagPair {
        key: Span::from(key_start..key_start + eq),
        value: Span::from(key_start + eq + 1..segment_end),
      },
      // `key`, same as an empty value
      None => TagPair {
        key: Span::from(key_start..segment_end),
        value: Span::from(segment_end..segment_end),
      },
    };
    if pair.key.start != pair.key.end {
      tags.push(pair);
    }
    key_start = segment_end + 1;
  }

  *pos = end + 1;

  Some(RawTags(tags))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn roundtrip() {
    let src = "@some-key-a=some-value-a;some-key-b=some-value-b;some-key-c=some-value-c ";

    let mut pos = 0;
    let parsed = format!(
      "@{} ",
      parse(src, &mut pos)
        .unwrap()
        .iter()
        .map(|tag| format!("{}={}", &src[tag.key], &src[tag.value]))
        .collect::<Vec<_>>()
        .join(";")
    );

    assert_eq!(&src[pos..], "");
    assert_eq!(src, parsed);
  }

  #[test]
  fn key_without_value() {
    let src = "@badges;mod=1 rest";
    let mut pos = 0;
    let tags = parse(src, &mut pos).unwrap();
    let pairs: Vec<_> = tags.iter().map(|tag| tag.get(src)).collect();
    assert_eq!(pairs, [("badges", ""), ("mod", "1")]);
    assert_eq!(&src[pos..], "rest");
  }

  #[test]
  fn no_tags() {
    let mut pos = 0;
    assert!(parse(":tmi.twitch.tv PING", &mut pos).unwrap().is_empty());
    assert_eq!(pos, 0);
  }

  #[test]
  fn tag_names() {
    assert_eq!(Tag::parse("ban-duration"), Tag::BanDuration);
    assert_eq!(Tag::parse("x-custom"), Tag::Unknown("x-custom"));
    assert_eq!(Tag::TargetMsgId.as_str(), "target-msg-id");
  }
}
