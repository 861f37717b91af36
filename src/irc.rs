//! ## Raw Twitch IRC messages
//!
//! The entrypoint to this module is [`IrcMessageRef`].
//!
//! ```rust
//! let msg = tmi_chat::IrcMessageRef::parse(":tmi.twitch.tv CLEARCHAT #pajlada :fabzeef").unwrap();
//! assert_eq!(msg.command(), tmi_chat::Command::ClearChat);
//! assert_eq!(msg.param(1), Some("fabzeef"));
//! ```
//!
//! ⚠ This parser is _not_ compliant with the IRCv3 spec!
//! It assumes that it will only ever parse messages sent by Twitch,
//! which means it handles Twitch-specific quirks, but it also means
//! that it's unlikely to work for IRC messages sent by other servers.

mod command;
mod params;
mod prefix;
mod tags;

pub use command::Command;
pub use prefix::Prefix;
pub use tags::Tag;

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::Debug;

use command::RawCommand;
use params::RawParams;
use prefix::RawPrefix;
use tags::RawTags;

/// A base IRC message.
///
/// This variant references the original string instead of owning it.
#[derive(Clone)]
pub struct IrcMessageRef<'src> {
  src: &'src str,
  parts: Cow<'src, IrcMessageParts>,
}

#[derive(Clone)]
struct IrcMessageParts {
  tags: RawTags,
  prefix: Option<RawPrefix>,
  command: RawCommand,
  params: RawParams,
}

impl<'src> IrcMessageRef<'src> {
  /// Parse a single Twitch IRC message.
  pub fn parse(src: &'src str) -> Result<Self, MessageParseError> {
    let parts = parse_parts(src).ok_or(MessageParseError)?;
    Ok(Self {
      src,
      parts: Cow::Owned(parts),
    })
  }

  /// Get the string from which this message was parsed.
  pub fn raw(&self) -> &'src str {
    self.src
  }

  /// Get an iterator over the message [`Tag`]s.
  ///
  /// Values are returned as they appear on the wire, still escaped.
  pub fn tags(&self) -> impl Iterator<Item = (&'src str, &'src str)> + '_ {
    let src = self.src;
    self.parts.tags.iter().map(move |pair| pair.get(src))
  }

  /// Collect the tags into an owned dictionary.
  ///
  /// If a key is repeated, the first occurrence wins.
  pub fn tag_map(&self) -> HashMap<String, String> {
    let mut map = HashMap::with_capacity(self.parts.tags.len());
    for (key, value) in self.tags() {
      map
        .entry(key.to_owned())
        .or_insert_with(|| value.to_owned());
    }
    map
  }

  /// Retrieve the value of `tag`.
  ///
  /// `tag` can provided as:
  /// - A variant of the [`Tag`] enum
  /// - The stringified kebab-case tag name
  ///
  /// [`None`] means the tag is absent, which is not the same
  /// as a tag that is present with an empty value.
  pub fn tag<'a>(&self, tag: impl Into<Tag<'a>>) -> Option<&'src str> {
    let tag = tag.into();
    let src = self.src;
    self
      .parts
      .tags
      .iter()
      .find(|pair| &src[pair.key] == tag.as_str())
      .map(|pair| &src[pair.value])
  }

  /// Get the message [`Prefix`].
  pub fn prefix(&self) -> Option<Prefix<'src>> {
    self.parts.prefix.map(|prefix| prefix.get(self.src))
  }

  /// Nickname of the sender, taken from the prefix.
  ///
  /// Messages sent by the server itself (`:tmi.twitch.tv`) have no nickname.
  pub fn nick(&self) -> Option<&'src str> {
    self.prefix().and_then(|prefix| prefix.nick)
  }

  /// Get the message [`Command`].
  pub fn command(&self) -> Command<'src> {
    self.parts.command.get(self.src)
  }

  /// Get the channel this message was sent to, including the `#`.
  ///
  /// This is the first parameter, if it looks like a channel.
  pub fn channel(&self) -> Option<&'src str> {
    self.param(0).filter(|param| param.starts_with('#'))
  }

  /// Get the parameter at `index`.
  ///
  /// The trailing parameter (after ` :`) is returned without its colon.
  pub fn param(&self, index: usize) -> Option<&'src str> {
    self.parts.params.list.get(index).map(|span| &self.src[*span])
  }

  /// Get an iterator over all parameters, in order.
  pub fn params(&self) -> impl ExactSizeIterator<Item = &'src str> + '_ {
    let src = self.src;
    self.parts.params.list.iter().map(move |span| &src[*span])
  }

  /// Number of parameters.
  pub fn num_params(&self) -> usize {
    self.parts.params.list.len()
  }

  /// Returns the trailing parameter, the part after ` :`.
  pub fn text(&self) -> Option<&'src str> {
    match self.parts.params.trailing {
      true => self.param(self.num_params() - 1),
      false => None,
    }
  }

  /// Turn the [`IrcMessageRef`] into its owned variant, [`IrcMessage`].
  pub fn into_owned(self) -> IrcMessage {
    IrcMessage {
      src: self.src.into(),
      parts: self.parts.into_owned(),
    }
  }
}

impl<'src> Debug for IrcMessageRef<'src> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("IrcMessage")
      .field("tags", &DebugIter::new(self.tags()))
      .field("prefix", &self.prefix())
      .field("command", &self.command())
      .field("params", &DebugIter::new(self.params()))
      .finish()
  }
}

/// A base IRC message.
///
/// This variants owns the input message.
#[derive(Clone)]
pub struct IrcMessage {
  src: String,
  parts: IrcMessageParts,
}

impl IrcMessage {
  /// Parse a single Twitch IRC message.
  pub fn parse(src: impl ToString) -> Result<Self, MessageParseError> {
    let src = src.to_string();
    let parts = parse_parts(&src).ok_or(MessageParseError)?;
    Ok(IrcMessage { src, parts })
  }

  /// Turn the [`IrcMessage`] into its borrowed variant, [`IrcMessageRef`].
  ///
  /// This does not copy anything.
  pub fn as_ref(&self) -> IrcMessageRef<'_> {
    IrcMessageRef {
      src: &self.src,
      parts: Cow::Borrowed(&self.parts),
    }
  }

  /// Get the string from which this message was parsed.
  pub fn raw(&self) -> &str {
    &self.src
  }

  /// Get the message [`Command`].
  pub fn command(&self) -> Command<'_> {
    self.parts.command.get(&self.src)
  }
}

impl Debug for IrcMessage {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    self.as_ref().fmt(f)
  }
}

/// Failed to parse a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("failed to parse message")]
pub struct MessageParseError;

// @tags :prefix COMMAND params :trailing
fn parse_parts(src: &str) -> Option<IrcMessageParts> {
  let src = src.trim_end_matches(|c: char| c == '\r' || c == '\n');
  let mut pos = 0usize;

  let tags = tags::parse(src, &mut pos)?;
  let prefix = prefix::parse(src, &mut pos);
  let command = command::parse(src, &mut pos)?;
  let params = params::parse(src, pos);

  Some(IrcMessageParts {
    tags,
    prefix,
    command,
    params,
  })
}

static_assert_send!(IrcMessageRef);
static_assert_sync!(IrcMessageRef);

static_assert_send!(IrcMessage);
static_assert_sync!(IrcMessage);

struct DebugIter<I>(std::cell::RefCell<I>);
impl<I> DebugIter<I> {
  fn new(iter: I) -> Self {
    Self(std::cell::RefCell::new(iter))
  }
}
impl<I> Debug for DebugIter<I>
where
  I: Iterator,
  I::Item: Debug,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    use std::ops::DerefMut;
    let mut list = f.debug_list();
    for item in self.0.borrow_mut().deref_mut() {
      list.entry(&item);
    }
    list.finish()
  }
}
