//! The `segue` binary: settings, logging, library scan, queue restore and
//! the stdin command loop.

use std::env;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};

use crate::audio::{Player, RodioEngine};
use crate::library::LocalCatalog;
use crate::store::FileStorage;

pub mod command;
pub mod event_loop;
pub mod logging;
pub mod settings;
pub mod view;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, problem) = settings::load_settings();
    logging::init_logging(&settings.logging);
    if let Some(problem) = problem {
        warn!("{problem}");
    }

    let dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .map_or_else(env::current_dir, Ok)?;
    let catalog = LocalCatalog::scan(&dir, &settings.library)?;

    let data_dir = settings
        .storage_dir()
        .ok_or("cannot determine a data directory; set storage.data_dir")?;
    let storage = FileStorage::new(data_dir);
    info!(dir = %storage.dir().display(), "queue storage");

    let interval = Duration::from_millis(settings.audio.status_interval_ms);
    let player = Player::spawn(
        move || RodioEngine::open_default(interval),
        storage,
        &settings.audio,
    )?;
    // Restore only; playback waits for a command.
    player.load_queue();

    println!(
        "{} tracks in {}. Type `help` for commands.",
        catalog.len(),
        catalog.root().display()
    );

    let mut state = event_loop::EventLoopState::default();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let result = event_loop::run(
        stdin.lock(),
        &mut stdout,
        &settings,
        &catalog,
        &player,
        &mut state,
    );

    player.quit();
    result.map_err(Into::into)
}
