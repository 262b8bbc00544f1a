//! Line commands read from stdin.
//!
//! Result and queue numbers are 1-based on the command line and 0-based once
//! parsed.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search { query: String, page: usize },
    Artist { query: String, page: usize },
    /// Play search result `n`, queueing the whole result page.
    Play(usize),
    /// Append search result `n` to the queue.
    Add(usize),
    Queue,
    Jump(usize),
    Remove(usize),
    Up(usize),
    Down(usize),
    Next,
    Prev,
    Toggle,
    Stop,
    Seek { millis: u64 },
    Status,
    Config,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?}; try `help`")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("{0:?} is not a valid number")]
    InvalidNumber(String),
    #[error("numbers start at 1")]
    ZeroIndex,
}

/// Parse one input line. `Ok(None)` for a blank line.
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    let Some((word, rest)) = split_word(line) else {
        return Ok(None);
    };

    let cmd = match word.to_ascii_lowercase().as_str() {
        "search" | "s" => {
            let (query, page) = query_and_page(rest, "search")?;
            Command::Search { query, page }
        }
        "artist" | "a" => {
            let (query, page) = query_and_page(rest, "artist")?;
            Command::Artist { query, page }
        }
        "play" | "p" => Command::Play(index_arg(rest, "play")?),
        "add" => Command::Add(index_arg(rest, "add")?),
        "queue" | "q" => Command::Queue,
        "jump" | "j" => Command::Jump(index_arg(rest, "jump")?),
        "rm" | "remove" => Command::Remove(index_arg(rest, "rm")?),
        "up" => Command::Up(index_arg(rest, "up")?),
        "down" => Command::Down(index_arg(rest, "down")?),
        "next" | "n" => Command::Next,
        "prev" => Command::Prev,
        "toggle" | "t" | "pause" => Command::Toggle,
        "stop" => Command::Stop,
        "seek" => Command::Seek {
            millis: seconds_arg(rest)?,
        },
        "status" => Command::Status,
        "config" => Command::Config,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(Some(cmd))
}

fn split_word(s: &str) -> Option<(&str, &str)> {
    if s.is_empty() {
        return None;
    }
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => Some((word, rest.trim())),
        None => Some((s, "")),
    }
}

/// A trailing number is the page when something precedes it.
fn query_and_page(rest: &str, name: &'static str) -> Result<(String, usize), CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument(name));
    }
    if let Some((query, last)) = rest.rsplit_once(char::is_whitespace) {
        if let Ok(page) = last.parse::<usize>() {
            return Ok((query.trim().to_string(), page.max(1)));
        }
    }
    Ok((rest.to_string(), 1))
}

fn index_arg(rest: &str, name: &'static str) -> Result<usize, CommandError> {
    let arg = rest
        .split_whitespace()
        .next()
        .ok_or(CommandError::MissingArgument(name))?;
    let n: usize = arg
        .parse()
        .map_err(|_| CommandError::InvalidNumber(arg.to_string()))?;
    n.checked_sub(1).ok_or(CommandError::ZeroIndex)
}

fn seconds_arg(rest: &str) -> Result<u64, CommandError> {
    let arg = rest
        .split_whitespace()
        .next()
        .ok_or(CommandError::MissingArgument("seek"))?;
    let secs: f64 = arg
        .parse()
        .map_err(|_| CommandError::InvalidNumber(arg.to_string()))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(CommandError::InvalidNumber(arg.to_string()));
    }
    Ok((secs * 1000.0).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        parse_line(line).unwrap().unwrap()
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(parse_line("   "), Ok(None));
    }

    #[test]
    fn search_takes_optional_trailing_page() {
        assert_eq!(
            parse("search daft punk 2"),
            Command::Search {
                query: "daft punk".into(),
                page: 2
            }
        );
        assert_eq!(
            parse("search 1999"),
            Command::Search {
                query: "1999".into(),
                page: 1
            }
        );
        assert_eq!(
            parse("artist  Nina Simone "),
            Command::Artist {
                query: "Nina Simone".into(),
                page: 1
            }
        );
    }

    #[test]
    fn indices_are_one_based() {
        assert_eq!(parse("play 1"), Command::Play(0));
        assert_eq!(parse("RM 3"), Command::Remove(2));
        assert_eq!(parse_line("jump 0"), Err(CommandError::ZeroIndex));
        assert_eq!(
            parse_line("up x"),
            Err(CommandError::InvalidNumber("x".into()))
        );
        assert_eq!(
            parse_line("down"),
            Err(CommandError::MissingArgument("down"))
        );
    }

    #[test]
    fn seek_accepts_fractional_seconds() {
        assert_eq!(parse("seek 12.5"), Command::Seek { millis: 12_500 });
        assert!(parse_line("seek -3").is_err());
    }

    #[test]
    fn unknown_words_are_reported() {
        assert_eq!(
            parse_line("dance"),
            Err(CommandError::Unknown("dance".into()))
        );
    }
}
