//! App: terminal init, main loop, move-in-flight guard and key handling.

use crate::HostConfig;
use crate::input::{Action, key_to_action};
use crate::theme::Theme;
use crate::ui::{self, Highlight, SlideView};
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use mergetui::prefs::Profile;
use mergetui::storage::DirStore;
use mergetui::{Commit, Cue, Direction, MoveResult, Session};
use rand::rngs::StdRng;
use ratatui::DefaultTerminal;
use std::io::Write;
use std::ops::ControlFlow;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Frame budget for drawing and input polling (~60 FPS).
const FRAME_MS: u64 = 16;

/// A resolved move being animated; the session is in flight until it is committed.
struct Slide {
    result: MoveResult,
    started: Instant,
}

pub struct App {
    config: HostConfig,
    profile: Profile<DirStore>,
    theme: Theme,
    session: Session<StdRng>,
    slide: Option<Slide>,
    highlight: Highlight,
}

impl App {
    pub fn new(config: HostConfig, profile: Profile<DirStore>, rng: StdRng) -> Self {
        let theme = Theme::for_name(profile.prefs().theme);
        let session = Session::new(rng, profile.prefs().best_score);
        Self {
            config,
            profile,
            theme,
            session,
            slide: None,
            highlight: Highlight::default(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            execute,
            terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;

        let result = self.run_loop(&mut terminal);

        // Restore
        execute!(std::io::stdout(), LeaveAlternateScreen)?;
        disable_raw_mode()?;

        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            let now = Instant::now();
            self.finish_slide(now);

            let progress = self.slide_progress(now);
            terminal.draw(|f| {
                let slide = self.slide.as_ref().map(|s| SlideView {
                    result: &s.result,
                    progress,
                });
                ui::draw(
                    f,
                    &self.session,
                    self.profile.prefs(),
                    &self.theme,
                    slide,
                    &mut self.highlight,
                    now,
                );
            })?;

            let timeout = Duration::from_millis(FRAME_MS).saturating_sub(now.elapsed());
            if event::poll(timeout)? {
                while event::poll(Duration::ZERO)? {
                    if let Event::Key(key) = event::read()? {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        if self.handle_action(key_to_action(key), Instant::now()).is_break() {
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    fn handle_action(&mut self, action: Action, now: Instant) -> ControlFlow<()> {
        match action {
            Action::Quit => return ControlFlow::Break(()),
            Action::Move(direction) => self.try_move(direction, now),
            Action::NewGame => {
                self.session.new_game();
                self.slide = None;
                self.highlight.clear();
            }
            Action::Undo => {
                if self.session.undo() {
                    self.highlight.clear();
                }
            }
            Action::ToggleTheme => {
                let name = self.profile.toggle_theme();
                self.theme = Theme::for_name(name);
                self.highlight.clear();
            }
            Action::ToggleSound => {
                if self.profile.toggle_sound() {
                    ring_bell();
                }
            }
            Action::Continue => self.session.continue_playing(),
            Action::None => {}
        }
        ControlFlow::Continue(())
    }

    /// Directional input is dropped while a move is in flight or an overlay is up.
    fn try_move(&mut self, direction: Direction, now: Instant) {
        if self.slide.is_some() || self.session.overlay().is_some() {
            debug!(%direction, "move rejected");
            return;
        }
        if self.config.animation.is_none() {
            if let Some(commit) = self.session.apply_direction(direction) {
                self.on_commit(commit);
            }
            return;
        }
        if let Some(result) = self.session.begin_move(direction) {
            self.slide = Some(Slide {
                result,
                started: now,
            });
        }
    }

    fn slide_progress(&self, now: Instant) -> f32 {
        match (&self.slide, self.config.animation) {
            (Some(slide), Some(duration)) if !duration.is_zero() => {
                now.saturating_duration_since(slide.started).as_secs_f32() / duration.as_secs_f32()
            }
            _ => 1.0,
        }
    }

    /// Commit the in-flight move once its slide has played out.
    fn finish_slide(&mut self, now: Instant) {
        if self.slide.is_none() || self.slide_progress(now) < 1.0 {
            return;
        }
        self.slide = None;
        if let Some(commit) = self.session.commit() {
            self.on_commit(commit);
        }
    }

    fn on_commit(&mut self, commit: Commit) {
        if commit.new_best {
            self.profile.record_best(self.session.best_score());
        }
        let mut cells = commit.merged;
        cells.extend(commit.spawn.map(|s| s.cell));
        self.highlight.set(cells);
        if self.profile.prefs().sound_enabled && matches!(commit.cue, Cue::Win | Cue::Lose) {
            ring_bell();
        }
    }
}

/// Terminal bell: the only sound a terminal host can make.
fn ring_bell() {
    let mut out = std::io::stdout();
    if let Err(e) = out.write_all(b"\x07").and_then(|()| out.flush()) {
        warn!(error = %e, "bell failed");
    }
}
