use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use crate::audio::Player;
use crate::config;
use crate::library::{Catalog, CatalogError, SearchPage, Track, display_line};
use crate::runtime::command::{Command, parse_line};
use crate::runtime::view;

/// State tracked by the command loop across lines.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Results of the last search; `play`/`add` index into these.
    pub results: Vec<Track>,
}

/// Read commands from `input` until `quit` or end of input, writing replies
/// to `out`. Player failures never end the loop; only I/O on `out` does.
pub fn run<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    settings: &config::Settings,
    catalog: &dyn Catalog,
    player: &Player,
    state: &mut EventLoopState,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let cmd = match parse_line(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };
        debug!(?cmd, "command");

        if cmd == Command::Quit {
            break;
        }
        handle(cmd, out, settings, catalog, player, state)?;
        out.flush()?;
    }
    Ok(())
}

fn handle<W: Write>(
    cmd: Command,
    out: &mut W,
    settings: &config::Settings,
    catalog: &dyn Catalog,
    player: &Player,
    state: &mut EventLoopState,
) -> io::Result<()> {
    match cmd {
        Command::Search { query, page } => {
            show_results(catalog.search(&query, page), out, settings, state)?
        }
        Command::Artist { query, page } => {
            show_results(catalog.search_artists(&query, page), out, settings, state)?
        }
        Command::Play(n) => {
            if n < state.results.len() {
                player.play_list(state.results.clone(), n);
            } else {
                writeln!(out, "no result {}", n + 1)?;
            }
        }
        Command::Add(n) => match state.results.get(n) {
            Some(track) => {
                player.add_to_queue(track.clone());
                writeln!(out, "added {}", display_line(track))?;
            }
            None => writeln!(out, "no result {}", n + 1)?,
        },
        Command::Queue => match player.snapshot() {
            Some(snapshot) => writeln!(
                out,
                "{}",
                view::queue_listing(&snapshot.queue, &snapshot.playback)
            )?,
            None => writeln!(out, "player is not running")?,
        },
        Command::Jump(i) => player.play_at(i),
        Command::Remove(i) => player.remove_from_queue(i),
        Command::Up(i) => player.move_up(i),
        Command::Down(i) => player.move_down(i),
        Command::Next => player.skip_next(),
        Command::Prev => player.skip_previous(),
        Command::Toggle => player.toggle_play_pause(),
        Command::Stop => player.stop(),
        Command::Seek { millis } => player.seek_to(millis),
        Command::Status => {
            // Read the published session; never waits on the player thread.
            let handle = player.playback_handle();
            let line = match handle.lock() {
                Ok(info) => view::status_line(&info),
                Err(_) => "playback state unavailable".to_string(),
            };
            writeln!(out, "{line}")?;
        }
        Command::Config => match settings.to_toml() {
            Ok(rendered) => write!(out, "{rendered}")?,
            Err(e) => {
                warn!(error = %e, "failed to render settings");
                writeln!(out, "failed to render settings: {e}")?;
            }
        },
        Command::Help => writeln!(out, "{}", view::help_text())?,
        Command::Quit => {}
    }
    Ok(())
}

fn show_results<W: Write>(
    result: Result<SearchPage, CatalogError>,
    out: &mut W,
    settings: &config::Settings,
    state: &mut EventLoopState,
) -> io::Result<()> {
    match result {
        Ok(page) => {
            writeln!(
                out,
                "{}",
                view::results_listing(&page, settings.library.page_size)
            )?;
            state.results = page.results;
        }
        Err(e) => {
            warn!(error = %e, "search failed");
            writeln!(out, "search failed: {e}")?;
        }
    }
    Ok(())
}
