use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::entities::Screen;
use crate::timestep::DEFAULT_TICK_RATE;

// ============================================================================
// CLI Argument Parsing
// ============================================================================

#[derive(Debug, Parser)]
#[command(author, version, about = "Top-down arena shooter for the terminal", long_about = None)]
pub struct Args {
    /// Logic updates per second.
    #[arg(
        long,
        value_name = "TPS",
        default_value_t = DEFAULT_TICK_RATE,
        value_parser = clap::value_parser!(u32).range(1..=240)
    )]
    pub tick_rate: u32,

    /// Seed for weapon spread; random when omitted.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Write logs to this file (the terminal itself is taken by the game).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, value_name = "FILTER", default_value = "info")]
    pub log_level: String,

    /// Show frame and tick rates in the HUD.
    #[arg(long, default_value_t = false)]
    pub show_fps: bool,

    /// Screen to start on.
    #[arg(long, value_enum, default_value_t = StartScreen::Title)]
    pub start_screen: StartScreen,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StartScreen {
    Title,
    Menu,
    Playing,
}

impl From<StartScreen> for Screen {
    fn from(start: StartScreen) -> Self {
        match start {
            StartScreen::Title => Screen::Title,
            StartScreen::Menu => Screen::Menu,
            StartScreen::Playing => Screen::Playing,
        }
    }
}

/// Settled runtime configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub tick_rate: u32,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub log_level: String,
    pub show_fps: bool,
    pub start_screen: Screen,
}

impl From<Args> for GameConfig {
    fn from(args: Args) -> Self {
        Self {
            tick_rate: args.tick_rate,
            seed: args.seed,
            log_file: args.log_file,
            log_level: args.log_level,
            show_fps: args.show_fps,
            start_screen: args.start_screen.into(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_rate: DEFAULT_TICK_RATE,
            seed: None,
            log_file: None,
            log_level: "info".to_string(),
            show_fps: false,
            start_screen: Screen::Title,
        }
    }
}
