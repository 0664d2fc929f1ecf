//! Layout and drawing: HUD, board, slide animation, spawn/merge highlight, overlays.

use crate::theme::Theme;
use mergetui::prefs::Preferences;
use mergetui::{BOARD_SIZE, Board, CellRef, MoveResult, Overlay, Session};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use std::collections::HashSet;
use std::time::Instant;
use tachyonfx::{CellFilter, Duration as TfxDuration, Effect, EffectRenderer, Interpolation, fx, ref_count};

/// Tile size in terminal cells.
const TILE_W: u16 = 8;
const TILE_H: u16 = 3;
/// Gutter between tiles (and around the edge of the board).
const GAP_X: u16 = 1;
const GAP_Y: u16 = 1;

const BOARD_W: u16 = BOARD_SIZE as u16 * (TILE_W + GAP_X) + GAP_X;
const BOARD_H: u16 = BOARD_SIZE as u16 * (TILE_H + GAP_Y) + GAP_Y;

const HUD_H: u16 = 3;
/// Board + HUD + status + hints.
const TOTAL_H: u16 = HUD_H + BOARD_H + 2;

/// Spawn/merge highlight fade length.
const HIGHLIGHT_MS: u32 = 220;

/// A move being presented: the resolved result and how far along the slide is (0..=1).
#[derive(Debug, Clone, Copy)]
pub struct SlideView<'a> {
    pub result: &'a MoveResult,
    pub progress: f32,
}

/// Tiles to flash after a commit, with the effect that does it.
#[derive(Default)]
pub struct Highlight {
    cells: Vec<CellRef>,
    effect: Option<Effect>,
    process_time: Option<Instant>,
}

impl Highlight {
    pub fn set(&mut self, cells: Vec<CellRef>) {
        self.cells = cells;
        self.effect = None;
        self.process_time = None;
    }

    pub fn clear(&mut self) {
        self.set(Vec::new());
    }
}

/// Draw the whole screen.
pub fn draw<R>(
    frame: &mut Frame,
    session: &Session<R>,
    prefs: &Preferences,
    theme: &Theme,
    slide: Option<SlideView<'_>>,
    highlight: &mut Highlight,
    now: Instant,
) {
    let area = frame.area();
    frame.buffer_mut().set_style(area, Style::default().bg(theme.bg));

    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(BOARD_W),
            Constraint::Fill(1),
        ])
        .split(area);
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(HUD_H),
            Constraint::Length(BOARD_H),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .split(horiz[1]);
    let (hud_area, board_area, status_area, hints_area) = (vert[1], vert[2], vert[3], vert[4]);

    if area.height < TOTAL_H || area.width < BOARD_W {
        draw_too_small(frame, theme, area);
        return;
    }

    draw_hud(frame, session, theme, slide, hud_area);
    match slide {
        Some(slide) => draw_sliding_board(frame, session.board(), theme, slide, board_area),
        None => {
            draw_board(frame, session.board(), theme, board_area);
            apply_highlight_effect(frame, theme, board_area, highlight, now);
        }
    }
    draw_status(frame, session.status(), theme, status_area);
    draw_hints(frame, session, prefs, theme, hints_area);

    if slide.is_none() {
        if let Some(overlay) = session.overlay() {
            draw_overlay(frame, theme, overlay, board_area);
        }
    }
}

/// Screen rect of a board cell.
fn cell_rect(board: Rect, cell: CellRef) -> Rect {
    Rect {
        x: board.x + GAP_X + cell.col as u16 * (TILE_W + GAP_X),
        y: board.y + GAP_Y + cell.row as u16 * (TILE_H + GAP_Y),
        width: TILE_W,
        height: TILE_H,
    }
}

/// Tile rect part way between two cells.
fn lerp_rect(board: Rect, from: CellRef, to: CellRef, t: f32) -> Rect {
    let a = cell_rect(board, from);
    let b = cell_rect(board, to);
    let lerp = |p: u16, q: u16| (f32::from(p) + (f32::from(q) - f32::from(p)) * t).round() as u16;
    Rect {
        x: lerp(a.x, b.x),
        y: lerp(a.y, b.y),
        ..a
    }
}

fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

fn draw_tile(frame: &mut Frame, theme: &Theme, rect: Rect, value: u32) {
    let rect = rect.intersection(frame.area());
    let (bg, fg) = theme.tile_colors(value);
    let label = if value == 0 {
        String::new()
    } else {
        value.to_string()
    };
    let mut lines = vec![Line::from(""); (TILE_H / 2) as usize];
    lines.push(Line::from(label));
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(bg).fg(fg).bold())
        .render(rect, frame.buffer_mut());
}

fn draw_board_background(frame: &mut Frame, theme: &Theme, area: Rect) {
    frame
        .buffer_mut()
        .set_style(area, Style::default().bg(theme.board_bg));
    for cell in Board::coords() {
        draw_tile(frame, theme, cell_rect(area, cell), 0);
    }
}

fn draw_board(frame: &mut Frame, board: &Board, theme: &Theme, area: Rect) {
    draw_board_background(frame, theme, area);
    for cell in Board::coords() {
        let value = board.get(cell);
        if value != 0 {
            draw_tile(frame, theme, cell_rect(area, cell), value);
        }
    }
}

/// Pre-move board with travelling tiles lifted off, then each travelling tile drawn
/// part way to its destination.
fn draw_sliding_board(frame: &mut Frame, board: &Board, theme: &Theme, slide: SlideView<'_>, area: Rect) {
    let result = slide.result;
    let mut travelling: Vec<(CellRef, CellRef, u32)> = result
        .moves
        .iter()
        .map(|m| (m.from, m.to, m.value))
        .collect();
    for merge in &result.merges {
        travelling.push((merge.from1, merge.to, merge.value / 2));
        travelling.push((merge.from2, merge.to, merge.value / 2));
    }
    let lifted: HashSet<CellRef> = travelling.iter().map(|&(from, _, _)| from).collect();

    draw_board_background(frame, theme, area);
    for cell in Board::coords() {
        let value = board.get(cell);
        if value != 0 && !lifted.contains(&cell) {
            draw_tile(frame, theme, cell_rect(area, cell), value);
        }
    }

    let t = ease_out(slide.progress);
    for (from, to, value) in travelling {
        draw_tile(frame, theme, lerp_rect(area, from, to, t), value);
    }
}

/// Flash spawned and merged tiles (TachyonFX: fade from the title colour to the tile colour).
fn apply_highlight_effect(frame: &mut Frame, theme: &Theme, board: Rect, highlight: &mut Highlight, now: Instant) {
    if highlight.cells.is_empty() {
        return;
    }
    let delta = highlight
        .process_time
        .map(|t| now.saturating_duration_since(t))
        .unwrap_or(std::time::Duration::ZERO);
    let delta_ms = delta.as_millis().min(u32::MAX as u128) as u32;
    highlight.process_time = Some(now);

    if highlight.effect.is_none() {
        let rects: Vec<Rect> = highlight.cells.iter().map(|&c| cell_rect(board, c)).collect();
        let filter = CellFilter::PositionFn(ref_count(move |pos: Position| {
            rects.iter().any(|r| r.contains(pos))
        }));
        let effect = fx::fade_from(theme.title, theme.title, (HIGHLIGHT_MS, Interpolation::QuadOut))
            .with_filter(filter)
            .with_area(board);
        highlight.effect = Some(effect);
    }

    if let Some(effect) = &mut highlight.effect {
        frame.render_effect(effect, board, TfxDuration::from_millis(delta_ms));
        if effect.done() {
            highlight.clear();
        }
    }
}

fn score_box(label: &str, value: String, extra: Option<String>, theme: &Theme) -> Paragraph<'static> {
    let mut spans = vec![Span::styled(value, Style::default().fg(theme.main_fg).bold())];
    if let Some(extra) = extra {
        spans.push(Span::styled(extra, Style::default().fg(theme.title)));
    }
    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.div_line))
                .title(Span::styled(format!(" {label} "), Style::default().fg(theme.title))),
        )
}

fn draw_hud<R>(frame: &mut Frame, session: &Session<R>, theme: &Theme, slide: Option<SlideView<'_>>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(12),
            Constraint::Length(12),
        ])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(" 2048 ", Style::default().fg(theme.title).bold())),
    ]);
    title.render(chunks[0], frame.buffer_mut());

    let delta = slide
        .map(|s| s.result.score_delta)
        .filter(|&d| d > 0);
    let shown_score = session.score() + delta.unwrap_or(0);
    let best = session.best_score().max(shown_score);
    score_box("Score", shown_score.to_string(), delta.map(|d| format!(" +{d}")), theme)
        .render(chunks[1], frame.buffer_mut());
    score_box("Best", best.to_string(), None, theme).render(chunks[2], frame.buffer_mut());
}

fn draw_status(frame: &mut Frame, status: &str, theme: &Theme, area: Rect) {
    Paragraph::new(Line::from(Span::styled(status, Style::default().fg(theme.main_fg))))
        .alignment(Alignment::Center)
        .render(area, frame.buffer_mut());
}

fn draw_hints<R>(frame: &mut Frame, session: &Session<R>, prefs: &Preferences, theme: &Theme, area: Rect) {
    let key = Style::default().fg(theme.title);
    let text = Style::default().fg(theme.main_fg);
    let undo_style = if session.can_undo() {
        text
    } else {
        Style::default().fg(theme.inactive_fg)
    };
    let sound = if prefs.sound_enabled { "On" } else { "Off" };
    let line = Line::from(vec![
        Span::styled("U ", key),
        Span::styled("Undo  ", undo_style),
        Span::styled("N ", key),
        Span::styled("New  ", text),
        Span::styled("T ", key),
        Span::styled(format!("Theme: {}  ", theme.name.label()), text),
        Span::styled("M ", key),
        Span::styled(format!("Sound: {sound}"), text),
    ]);
    Paragraph::new(line)
        .alignment(Alignment::Center)
        .render(area, frame.buffer_mut());
}

fn draw_overlay(frame: &mut Frame, theme: &Theme, overlay: Overlay, board: Rect) {
    let popup_w = BOARD_W.saturating_sub(2);
    let popup_h = 7u16;
    let popup = Rect {
        x: board.x + board.width.saturating_sub(popup_w) / 2,
        y: board.y + board.height.saturating_sub(popup_h) / 2,
        width: popup_w.min(board.width),
        height: popup_h.min(board.height),
    };
    let (title, message, keys) = match overlay {
        Overlay::Win => (
            " You made 2048! ",
            "You can continue playing for a higher score.",
            " C: Continue    N: New game ",
        ),
        Overlay::Lose => (
            " Game over ",
            "No valid moves left. Start a new game.",
            " N: New game    Q: Quit ",
        ),
    };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(title, Style::default().fg(theme.bg).bg(theme.title).bold())),
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(theme.main_fg))),
        Line::from(Span::styled(keys, Style::default().fg(theme.main_fg))),
    ];
    frame.buffer_mut().set_style(popup, Style::default().bg(theme.bg));
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.div_line).bg(theme.bg)),
        )
        .render(popup, frame.buffer_mut());
}

fn draw_too_small(frame: &mut Frame, theme: &Theme, area: Rect) {
    let msg = format!("Terminal too small: need {}×{}", BOARD_W, TOTAL_H);
    Paragraph::new(Line::from(Span::styled(msg, Style::default().fg(theme.main_fg))))
        .alignment(Alignment::Center)
        .render(area, frame.buffer_mut());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_rects_do_not_overlap_and_fit_board() {
        let board = Rect::new(0, 0, BOARD_W, BOARD_H);
        let last = cell_rect(board, CellRef::new(BOARD_SIZE - 1, BOARD_SIZE - 1));
        assert_eq!(last.right() + GAP_X, BOARD_W);
        assert_eq!(last.bottom() + GAP_Y, BOARD_H);
        let a = cell_rect(board, CellRef::new(0, 0));
        let b = cell_rect(board, CellRef::new(0, 1));
        assert!(!a.intersects(b));
    }

    #[test]
    fn lerp_hits_endpoints() {
        let board = Rect::new(0, 0, BOARD_W, BOARD_H);
        let from = CellRef::new(0, 3);
        let to = CellRef::new(0, 0);
        assert_eq!(lerp_rect(board, from, to, 0.0), cell_rect(board, from));
        assert_eq!(lerp_rect(board, from, to, 1.0), cell_rect(board, to));
    }
}
