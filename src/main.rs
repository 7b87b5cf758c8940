use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event};
use snake::config::{
    DEFAULT_TICK_INTERVAL_MS, FRAME_INTERVAL_MS, GridSize, Settings, THEME_CLASSIC,
    tick_interval_from_ms,
};
use snake::input::{Control, PointerInput, map_key};
use snake::logging;
use snake::renderer::{self, RenderOptions, ScreenLayout};
use snake::score::{FileStore, HighScoreStore, MemoryStore, ScoreKeeper};
use snake::session::{Flow, Session};
use snake::terminal_runtime::{TerminalSession, install_panic_hook};
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(version, about = "Classic Snake on a square grid")]
struct Cli {
    /// Cells per side of the board; unusable values fall back to 15.
    #[arg(long = "grid-size")]
    grid_size: Option<String>,

    /// Milliseconds between ticks.
    #[arg(long = "tick-ms", default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    tick_ms: u64,

    /// Seed for reproducible food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Where to keep the high score instead of the platform data directory.
    #[arg(long = "scores-file")]
    scores_file: Option<PathBuf>,

    /// Disable mouse swipes and the on-screen direction pad.
    #[arg(long = "no-mouse")]
    no_mouse: bool,

    /// Append diagnostic logs to this file (filter with SNAKE_LOG).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn into_settings(self) -> Settings {
        Settings {
            grid: GridSize::from_raw(self.grid_size.as_deref()),
            tick_interval: tick_interval_from_ms(self.tick_ms),
            seed: self.seed,
            scores_path: self.scores_file,
            pointer_input: !self.no_mouse,
            log_file: self.log_file,
        }
    }
}

fn main() -> io::Result<()> {
    let settings = Cli::parse().into_settings();
    logging::init(settings.log_file.as_deref())?;
    info!(
        grid = settings.grid.side(),
        tick_interval = ?settings.tick_interval,
        "starting"
    );

    let scores = ScoreKeeper::new(open_store(&settings));
    if let Some(warning) = scores.warning() {
        eprintln!("Warning: {warning}");
    }
    let mut session =
        Session::new(settings.grid, settings.tick_interval, scores).with_seed(settings.seed);

    install_panic_hook();
    let mut terminal = TerminalSession::enter(settings.pointer_input)?;
    let result = run(&mut terminal, &mut session, &settings);
    drop(terminal);

    if let Some(warning) = session.scores().warning() {
        eprintln!("Warning: {warning}");
    }
    if let Err(error) = &result {
        warn!(%error, "exited with error");
    }
    result
}

fn open_store(settings: &Settings) -> Box<dyn HighScoreStore> {
    let store = match &settings.scores_path {
        Some(path) => Ok(FileStore::new(path.clone())),
        None => FileStore::at_default_location(),
    };

    match store {
        Ok(store) => Box::new(store),
        Err(error) => {
            warn!(%error, "no score file available, high score lasts this session only");
            eprintln!("Warning: {error}; high score lasts this session only");
            Box::new(MemoryStore::default())
        }
    }
}

fn run(
    terminal: &mut TerminalSession,
    session: &mut Session,
    settings: &Settings,
) -> io::Result<()> {
    let mut pointer = PointerInput::new();
    let frame_interval = Duration::from_millis(FRAME_INTERVAL_MS);

    loop {
        let show_pad = settings.pointer_input && pointer.detected();
        let mut layout: Option<ScreenLayout> = None;
        terminal.terminal_mut().draw(|frame| {
            layout = Some(renderer::render(
                frame,
                session,
                RenderOptions {
                    theme: &THEME_CLASSIC,
                    show_pad,
                },
            ));
        })?;

        let now = Instant::now();
        let timeout = session
            .time_until_tick(now)
            .map_or(frame_interval, |until| until.min(frame_interval));

        if event::poll(timeout)? {
            let control = match event::read()? {
                Event::Key(key) => map_key(key),
                Event::Mouse(mouse) if settings.pointer_input => {
                    let pad = layout.as_ref().and_then(|layout| layout.pad.as_ref());
                    pointer.handle(mouse, pad).map(Control::Turn)
                }
                _ => None,
            };

            if let Some(control) = control {
                if session.handle(control, Instant::now()) == Flow::Quit {
                    break;
                }
            }
        }

        session.update(Instant::now());
    }

    info!(high_score = session.high_score(), "quitting");
    Ok(())
}
