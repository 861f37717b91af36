use crate::common::Span;

#[derive(Clone, Default)]
pub(super) struct RawParams {
  pub(super) list: Vec<Span>,
  /// Whether the last param was introduced by ` :`.
  pub(super) trailing: bool,
}

/// `middle middle :trailing with spaces`
#[inline(always)]
pub(super) fn parse(src: &str, pos: usize) -> RawParams {
  let bytes = src.as_bytes();
  let mut params = RawParams::default();

  let mut pos = pos;
  while pos < bytes.len() {
    match bytes[pos] {
      b' ' => pos += 1,
      b':' => {
        params.list.push(Span::from(pos + 1..src.len()));
        params.trailing = true;
        break;
      }
      _ => {
        let end = match src[pos..].find(' ') {
          Some(end) => pos + end,
          None => src.len(),
        };
        params.list.push(Span::from(pos..end));
        pos = end;
      }
    }
  }

  params
}
