//! Mergetui: 2048-style tile-merging puzzle in the terminal.

mod app;
mod input;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, ValueEnum};
use mergetui::prefs::{Profile, ThemeName};
use mergetui::storage::DirStore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Options derived from CLI that affect the host (animation, sound).
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Slide animation length; `None` commits each move immediately.
    pub animation: Option<Duration>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let store = match &args.config_dir {
        Some(dir) => DirStore::new(dir),
        None => DirStore::in_config_dir(),
    };
    info!(dir = %store.dir().display(), "preferences");
    let mut profile = Profile::open(store);
    if let Some(theme) = args.theme {
        profile.override_theme(theme.into());
    }
    if args.mute {
        profile.override_sound(false);
    }

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let config = HostConfig {
        animation: (!args.no_animation && args.anim_ms > 0)
            .then(|| Duration::from_millis(args.anim_ms)),
    };

    let mut app = App::new(config, profile, rng);
    app.run()?;
    Ok(())
}

/// Install a file logger when `--log-file` is given; the terminal owns stdout.
fn init_logging(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = std::fs::File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&args.log_level))
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// 2048-style tile-merging puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "mergetui",
    version,
    about = "2048 in the terminal: slide tiles, merge equal pairs, reach 2048.",
    long_about = "Mergetui is a terminal take on 2048.\n\n\
        Slide all tiles in one direction; two equal tiles that meet merge into their sum. \
        A new 2 or 4 appears after every move. Reach 2048 to win, keep going for a higher score.\n\n\
        CONTROLS:\n  Arrows / hjkl / wasd  Move    U  Undo    N  New game\n  \
        T  Toggle theme    M  Toggle sound    C  Continue after win    Q / Esc  Quit\n\n\
        Best score, theme and sound are kept as plain text files in the config directory."
)]
pub struct Args {
    /// Seed for tile spawns (same seed, same game).
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Directory holding best score / theme / sound files. Defaults to $XDG_CONFIG_HOME/mergetui.
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Theme for this run (not saved).
    #[arg(short, long)]
    pub theme: Option<ThemeArg>,

    /// Disable sound for this run (not saved).
    #[arg(long)]
    pub mute: bool,

    /// Disable slide animation (commit every move instantly).
    #[arg(long)]
    pub no_animation: bool,

    /// Slide animation length in milliseconds.
    #[arg(long, default_value = "180", value_name = "MS")]
    pub anim_ms: u64,

    /// Write logs to this file.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. `info` or `mergetui=debug`.
    #[arg(long, default_value = "info", value_name = "FILTER")]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    #[value(alias = "soft")]
    Neumorph,
    Contrast,
}

impl From<ThemeArg> for ThemeName {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Neumorph => Self::Neumorph,
            ThemeArg::Contrast => Self::Contrast,
        }
    }
}
