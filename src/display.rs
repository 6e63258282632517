//! Terminal presentation — all terminal I/O lives here.
//!
//! The render pass paints the playfield into a [`Canvas`]; this module scales
//! that framebuffer into half-block cells (two pixels per cell), prints the
//! HUD text runs on top, and overlays the start/restart prompt while no
//! session is running.  No game logic is performed.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_invader::raster::Canvas;
use space_invader::session::{Prompt, Session};
use space_invader::surface::{Rgb, Surface, C_BACKGROUND};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HINT: Color = Color::DarkGrey;
const C_PROMPT_BORDER: Color = Color::Rgb { r: 0x4f, g: 0x46, b: 0xe5 }; // indigo
const C_PROMPT_TEXT: Color = Color::White;
const C_PROMPT_ACTION: Color = Color::Yellow;

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: &str = "▀";

fn term_color(c: Rgb) -> Color {
    Color::Rgb { r: c.0, g: c.1, b: c.2 }
}

/// Where the canvas lands on the terminal.
#[derive(Clone, Copy, Debug)]
struct Viewport {
    /// Terminal cells per canvas pixel, horizontally.  Vertically a cell
    /// holds two pixels, so `2 * scale` pixel rows map onto one cell row.
    scale: f32,
    left: u16,
    cols: u16,
    rows: u16,
}

impl Viewport {
    fn fit(canvas: &Canvas, term_w: u16, term_h: u16) -> Self {
        let (cw, ch) = canvas.size();
        // Last row is reserved for the controls hint.
        let avail_rows = term_h.saturating_sub(1).max(1);
        let scale = (term_w as f32 / cw as f32).min(2.0 * avail_rows as f32 / ch as f32);
        let cols = ((cw as f32 * scale) as u16).max(1).min(term_w.max(1));
        let rows = ((ch as f32 * scale / 2.0) as u16).max(1).min(avail_rows);
        Viewport {
            scale,
            left: term_w.saturating_sub(cols) / 2,
            cols,
            rows,
        }
    }

    fn sample(&self, canvas: &Canvas, col: u16, pixel_row: u32) -> Rgb {
        let x = ((col as f32 + 0.5) / self.scale) as u32;
        let y = ((pixel_row as f32 + 0.5) / self.scale) as u32;
        canvas.pixel(x, y).unwrap_or(C_BACKGROUND)
    }

    /// Terminal cell for a canvas point.
    fn cell(&self, x: f32, y: f32) -> (u16, u16) {
        let col = self.left + ((x * self.scale) as u16).min(self.cols.saturating_sub(1));
        let row = ((y * self.scale / 2.0) as u16).min(self.rows.saturating_sub(1));
        (col, row)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Present one complete frame.
pub fn present<W: Write>(out: &mut W, canvas: &Canvas, session: &Session) -> std::io::Result<()> {
    let (term_w, term_h) = terminal::size()?;
    let view = Viewport::fit(canvas, term_w, term_h);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_playfield(out, canvas, &view)?;
    draw_hud(out, canvas, &view)?;
    draw_controls_hint(out, term_h)?;

    if let Some(prompt) = session.prompt() {
        draw_prompt(out, &prompt, &view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, term_h.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Playfield ─────────────────────────────────────────────────────────────────

fn draw_playfield<W: Write>(out: &mut W, canvas: &Canvas, view: &Viewport) -> std::io::Result<()> {
    for row in 0..view.rows {
        out.queue(cursor::MoveTo(view.left, row))?;
        let mut last: Option<(Rgb, Rgb)> = None;
        for col in 0..view.cols {
            let top = view.sample(canvas, col, 2 * row as u32);
            let bottom = view.sample(canvas, col, 2 * row as u32 + 1);
            if last != Some((top, bottom)) {
                out.queue(style::SetForegroundColor(term_color(top)))?;
                out.queue(style::SetBackgroundColor(term_color(bottom)))?;
                last = Some((top, bottom));
            }
            out.queue(Print(HALF_BLOCK))?;
        }
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, canvas: &Canvas, view: &Viewport) -> std::io::Result<()> {
    for run in canvas.text_runs() {
        let (col, row) = view.cell(run.x, run.y);
        let behind = view.sample(canvas, col.saturating_sub(view.left), 2 * row as u32);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetBackgroundColor(term_color(behind)))?;
        out.queue(style::SetForegroundColor(term_color(run.color)))?;
        out.queue(Print(&run.text))?;
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, term_h: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, term_h.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   ENTER : Start   Q : Quit"))?;
    Ok(())
}

// ── Start / game-over overlay ─────────────────────────────────────────────────

fn draw_prompt<W: Write>(out: &mut W, prompt: &Prompt, view: &Viewport) -> std::io::Result<()> {
    let action = format!("[ ENTER ] {}", prompt.action);
    let inner = prompt
        .lines
        .iter()
        .map(|l| l.chars().count())
        .chain([prompt.title.chars().count(), action.chars().count()])
        .max()
        .unwrap_or(0)
        + 4;

    let bar = "═".repeat(inner);
    let centred = |text: &str| {
        let len = text.chars().count();
        let left = (inner - len) / 2;
        format!("║{}{}{}║", " ".repeat(left), text, " ".repeat(inner - len - left))
    };

    let mut rows: Vec<(String, Color)> = vec![
        (format!("╔{}╗", bar), C_PROMPT_BORDER),
        (centred(prompt.title), C_PROMPT_TEXT),
        (centred(""), C_PROMPT_BORDER),
    ];
    for line in &prompt.lines {
        rows.push((centred(line), C_PROMPT_TEXT));
    }
    rows.push((centred(""), C_PROMPT_BORDER));
    rows.push((centred(&action), C_PROMPT_ACTION));
    rows.push((format!("╚{}╝", bar), C_PROMPT_BORDER));

    let cx = view.left + view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(rows.len() as u16 / 2);
    let col = cx.saturating_sub((inner as u16 + 2) / 2);

    out.queue(style::SetBackgroundColor(Color::Black))?;
    for (i, (text, color)) in rows.iter().enumerate() {
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(text))?;
    }
    out.queue(style::ResetColor)?;
    Ok(())
}
