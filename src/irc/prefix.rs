use crate::common::Span;

#[derive(Debug, Clone, Copy)]
pub(super) struct RawPrefix {
  nick: Option<Span>,
  user: Option<Span>,
  host: Span,
}

impl RawPrefix {
  pub(super) fn get<'src>(&self, src: &'src str) -> Prefix<'src> {
    Prefix {
      nick: self.nick.map(|span| span.get(src)),
      user: self.user.map(|span| span.get(src)),
      host: self.host.get(src),
    }
  }
}

/// The sender of a message.
///
/// Server messages only carry a host, such as `tmi.twitch.tv`. Messages sent
/// by users carry the login as both nick and user:
///
/// ```text,ignore
/// :randers!randers@randers.tmi.twitch.tv
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Prefix<'src> {
  pub nick: Option<&'src str>,
  pub user: Option<&'src str>,
  pub host: &'src str,
}

impl<'src> Prefix<'src> {
  /// Whether this prefix names the server rather than a user.
  pub fn is_server(&self) -> bool {
    self.nick.is_none()
  }
}

impl<'src> std::fmt::Display for Prefix<'src> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    if let Some(nick) = self.nick {
      f.write_str(nick)?;
      if let Some(user) = self.user {
        write!(f, "!{user}")?;
      }
      f.write_str("@")?;
    }
    f.write_str(self.host)
  }
}

/// `:nick!user@host <rest>`
///
/// Returns `None` if there is no prefix, or if nothing follows it.
#[inline(always)]
pub(super) fn parse(src: &str, pos: &mut usize) -> Option<RawPrefix> {
  if !src[*pos..].starts_with(':') {
    return None;
  }

  let start = *pos + 1;
  let len = src[start..].find(' ')?;
  let prefix = &src[start..start + len];
  let span = |from: usize, to: usize| Span::from(start + from..start + to);

  let raw = match prefix.find('@') {
    // :host
    None => RawPrefix {
      nick: None,
      user: None,
      host: span(0, len),
    },
    // :nick@host or :nick!user@host
    Some(at) => {
      let (nick, user) = match prefix[..at].find('!') {
        Some(bang) => (span(0, bang), Some(span(bang + 1, at))),
        None => (span(0, at), None),
      };
      RawPrefix {
        nick: Some(nick),
        user,
        host: span(at + 1, len),
      }
    }
  };

  *pos = start + len + 1;
  Some(raw)
}
