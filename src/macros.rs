macro_rules! generate_getters {
  {
    $(<$($L:lifetime)*>)? for $T:ty as $self:ident {
      $(
        $(#[$meta:meta])*
        $field:ident -> $R:ty $(= $e:expr)?
      ),* $(,)?
    }
  } => {
    impl$(<$($L)*>)? $T {
      $(
        #[inline]
        $(#[$meta])*
        pub fn $field(&$self) -> $R {
          generate_getters!(@getter $self $field $($e)?)
        }
      )*
    }
  };

  (@getter $self:ident $field:ident $e:expr) => ($e);
  (@getter $self:ident $field:ident) => ($self.$field.clone());
}

/// Parse a raw line in tests, panicking if it is malformed.
#[cfg(test)]
macro_rules! irc {
  ($input:expr) => {
    $crate::irc::IrcMessageRef::parse($input).expect("invalid test line")
  };
}
