use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::rc::Rc;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use arena_shooter::clock::{Clock, SystemClock};
use arena_shooter::compute::{apply_command, init_state, tick, Transition};
use arena_shooter::config::{Args, GameConfig};
use arena_shooter::display::{self, View};
use arena_shooter::entities::Screen;
use arena_shooter::error::{GameError, GameResult};
use arena_shooter::input::{Command, InputMapper};
use arena_shooter::map::TileMap;
use arena_shooter::timestep::{FixedTimestep, FrameStats};

/// Pause taken by loop iterations that had no tick due.
const IDLE_YIELD: Duration = Duration::from_millis(1);

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal belongs to the game, so logs only go to `--log-file`.
fn init_logging(config: &GameConfig) -> GameResult<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path).map_err(|source| GameError::LogFile {
        path: path.clone(),
        source,
    })?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until a quit command.
///
/// Each iteration drains pending input, banks the elapsed wall-clock time,
/// runs one `tick` per whole step that is due and then renders once.
fn game_loop<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, config: &GameConfig) -> Result<()> {
    let (need_cols, need_rows) = display::required_size();
    let (mut cols, mut rows) = terminal::size()?;
    if cols < need_cols || rows < need_rows {
        return Err(GameError::TerminalTooSmall {
            need_cols,
            need_rows,
            cols,
            rows,
        }
        .into());
    }

    let map = Rc::new(TileMap::arena().context("building the arena")?);
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut state = init_state(map, config.start_screen);
    let clock = SystemClock::new();
    let mut timestep = FixedTimestep::new(config.tick_rate);
    info!(
        screen = ?state.screen(),
        tick_rate = config.tick_rate,
        tick_us = timestep.tick_duration().as_micros() as u64,
        "session started"
    );
    let mut stats = FrameStats::new(clock.now_ms());
    let mut input = InputMapper::new();
    let mut last = clock.now();

    loop {
        let now_ms = clock.now_ms();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(event) = rx.try_recv() {
            if let Event::Resize(c, r) = event {
                cols = c;
                rows = r;
                continue;
            }
            let Some(command) = input.handle_event(&event, now_ms) else {
                continue;
            };
            let command = match command {
                Command::Click { column, row } => {
                    match display::menu_item_at(column, row, cols, rows) {
                        Some(item) if state.screen() == Screen::Menu => Command::Activate(item),
                        _ => continue,
                    }
                }
                other => other,
            };

            let before = state.screen();
            let (next, transition) = apply_command(&state, command, now_ms);
            state = next;
            if transition == Transition::Quit {
                info!(frames = state.frame, "quit requested");
                return Ok(());
            }
            if state.screen() != before {
                // Don't carry a held click or key into the next screen
                input.release_all();
            }
        }

        if state.screen() == Screen::Playing {
            state.input = input.snapshot(now_ms);
        }

        // ── Fixed-rate simulation ─────────────────────────────────────────────
        let now = clock.now();
        let ticks = timestep.advance(now.saturating_sub(last));
        last = now;
        for _ in 0..ticks {
            state = tick(&state, clock.now_ms(), &mut rng);
        }
        stats.record_ticks(ticks);

        if ticks > 0 {
            let rates = if config.show_fps { stats.last_rates() } else { None };
            let view = View { cols, rows, rates, now_ms: clock.now_ms() };
            display::render(out, &state, &view)?;
            stats.record_frame();
        } else {
            thread::sleep(IDLE_YIELD);
        }

        if let Some((fps, tps)) = stats.roll(clock.now_ms()) {
            debug!(fps, tps, "frame rate");
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Everything between entering and leaving raw mode.  `keyboard_enhanced`
/// records whether the flags were pushed so teardown can pop them.
fn run<W: Write>(out: &mut W, config: &GameConfig, keyboard_enhanced: &mut bool) -> Result<()> {
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    *keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    debug!(keyboard_enhanced = *keyboard_enhanced, "terminal ready");

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    game_loop(out, &rx, config)
}

fn main() -> Result<()> {
    let config = GameConfig::from(Args::parse());
    init_logging(&config).context("setting up logging")?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    let mut keyboard_enhanced = false;
    let result = run(&mut out, &config, &mut keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
