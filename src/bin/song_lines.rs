//! Print the lines a JSON song shows in the navigator.
//!
//! Usage: cargo run --bin song_lines -- <song.json> [--prefix -]

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use ezlyric::constants::navigator::DEFAULT_COMMENT_PREFIX;
use ezlyric::song::Song;

const USAGE: &str = "usage: song_lines <song.json> [--prefix <prefix>]";

/// Split arguments into the song path and the comment prefix.
fn parse_args(args: &[String]) -> Result<(PathBuf, &str)> {
    let mut path = None;
    let mut prefix = DEFAULT_COMMENT_PREFIX;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--prefix" {
            let Some(value) = iter.next() else {
                bail!("--prefix needs a value\n{USAGE}");
            };
            prefix = value.as_str();
        } else if path.is_none() {
            path = Some(PathBuf::from(arg));
        } else {
            bail!("unexpected argument {arg:?}\n{USAGE}");
        }
    }

    let Some(path) = path else {
        bail!(USAGE);
    };
    Ok((path, prefix))
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (path, prefix) = parse_args(&args)?;

    let song = Song::load(&path).with_context(|| format!("Failed to load {}", path.display()))?;

    println!("#{} {} ({})", song.number, song.title, song.author);
    for line in song.to_lines(prefix) {
        println!("{line}");
    }
    Ok(())
}
