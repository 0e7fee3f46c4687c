//! Line protocol used by the binary to forward page input to regions.
//!
//! ```text
//! <region> next | prev | goto N | open N | pause | resume | dismiss
//! <region> key <Escape|ArrowLeft|ArrowRight|Enter|Space>
//! <region> activate N <Enter|Space>
//! ```

use anyhow::{Context, Result, anyhow, bail};

use crate::events::{Key, RegionCommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlLine {
    pub region: String,
    pub command: RegionCommand,
}

pub fn parse_line(line: &str) -> Result<ControlLine> {
    let mut words = line.split_whitespace();
    let region = words
        .next()
        .ok_or_else(|| anyhow!("empty command line"))?
        .to_string();
    let verb = words
        .next()
        .ok_or_else(|| anyhow!("missing command for region '{region}'"))?;

    let command = match verb {
        "next" => RegionCommand::Advance,
        "prev" | "previous" => RegionCommand::Retreat,
        "goto" => RegionCommand::JumpTo(parse_index(words.next())?),
        "open" => RegionCommand::Open(parse_index(words.next())?),
        "pause" => RegionCommand::PauseEntered,
        "resume" => RegionCommand::PauseLeft,
        "dismiss" | "close" => RegionCommand::Dismiss,
        "key" => RegionCommand::Key(parse_key(words.next())?),
        "activate" => {
            let index = parse_index(words.next())?;
            let key = parse_key(words.next())?;
            RegionCommand::Activate { index, key }
        }
        other => bail!("unknown command '{other}'"),
    };

    if let Some(extra) = words.next() {
        bail!("unexpected trailing argument '{extra}'");
    }
    Ok(ControlLine { region, command })
}

fn parse_index(word: Option<&str>) -> Result<usize> {
    let word = word.ok_or_else(|| anyhow!("missing index"))?;
    word.parse()
        .with_context(|| format!("invalid index '{word}'"))
}

fn parse_key(word: Option<&str>) -> Result<Key> {
    let word = word.ok_or_else(|| anyhow!("missing key name"))?;
    match word.parse::<Key>() {
        Ok(key) => Ok(key),
        Err(never) => match never {},
    }
}
