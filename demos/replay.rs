//! Replay a log of raw Twitch IRC lines through the dispatcher.
//!
//! ```text,ignore
//! $ RUST_LOG=tmi_chat=trace cargo run --example replay -- \
//!   --login fourtf \
//!   --channel #pajlada \
//!   --input pajlada.log
//! ```

use std::io::BufRead;

use anyhow::{Context as _, Result};
use clap::Parser;
use tmi_chat::filter::{HighlightList, Phrase};
use tmi_chat::{Account, Context, Dispatcher, MessageFlag, Settings};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version)]
struct Args {
  /// Login of the local user
  #[arg(long, default_value = "justinfan12345")]
  login: String,

  /// Channels to join before replaying
  #[arg(long)]
  channel: Vec<String>,

  /// Phrases to highlight
  #[arg(long)]
  highlight: Vec<String>,

  /// Track joins and parts
  #[arg(long)]
  show_joins: bool,

  /// File with one raw line per row. Reads stdin if omitted.
  #[arg(long)]
  input: Option<std::path::PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let args = Args::parse();

  let highlights = args
    .highlight
    .iter()
    .fold(HighlightList::default(), |list, phrase| {
      list.phrase(Phrase::plain(phrase))
    });
  let ctx = Context::new(Account::new(&args.login))
    .with_settings(Settings {
      show_joins: args.show_joins,
      ..Settings::default()
    })
    .with_highlights(highlights);

  let handle = tmi_chat::runtime::spawn(Dispatcher::new(ctx));
  for channel in &args.channel {
    handle
      .join(channel.as_str())
      .await
      .with_context(|| format!("failed to join {channel}"))?;
  }

  let reader: Box<dyn BufRead> = match &args.input {
    Some(path) => Box::new(std::io::BufReader::new(
      std::fs::File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
    )),
    None => Box::new(std::io::stdin().lock()),
  };
  for line in reader.lines() {
    let line = line?;
    if line.trim().is_empty() {
      continue;
    }
    handle.send_line(line)?;
  }
  handle.flush_presence()?;

  let dispatcher = handle.shutdown().await?;
  for channel in dispatcher.channels().iter() {
    println!("#{}", channel.name());
    for message in channel.messages().iter() {
      let marker = if message.has(MessageFlag::Disabled) {
        "~"
      } else if message.has(MessageFlag::Highlighted) {
        "!"
      } else if message.has(MessageFlag::System) {
        "*"
      } else {
        " "
      };
      match message.display_name() {
        "" => println!("{marker} {}", message.text()),
        name => println!("{marker} {name}: {}", message.text()),
      }
    }
  }
  if let Some(login) = dispatcher.last_whisperer() {
    println!("last whisper from {login}");
  }

  Ok(())
}
