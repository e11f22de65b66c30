//! Terminal Surface
//!
//! Renders scenes with ratatui. The logical canvas is stretched over the
//! whole terminal; images are drawn with half-block cells so each cell
//! carries two vertically stacked pixels.

use crossterm::{
    cursor::{Hide, Show},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use image::imageops::FilterType;
use image::DynamicImage;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Clear, Paragraph, Widget, Wrap},
    Frame, Terminal,
};
use std::io::{stdout, Stdout};
use tracing::debug;

use super::{Canvas, Placement, Scene, Stimulus, Surface};
use crate::error::Result;

pub const BACKGROUND: Color = Color::Rgb(245, 245, 245);
pub const FOREGROUND: Color = Color::Rgb(20, 20, 20);

/// Puts the terminal into raw mode on the alternate screen and restores it
/// when dropped, including on early returns and panics that unwind.
struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut out = stdout();
        out.execute(EnterAlternateScreen)?;
        out.execute(Hide)?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let mut out = stdout();
        let _ = out.execute(Show);
        let _ = out.execute(LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

pub struct TerminalSurface<B: Backend> {
    terminal: Terminal<B>,
    canvas: Canvas,
    _guard: Option<RawModeGuard>,
}

impl TerminalSurface<CrosstermBackend<Stdout>> {
    /// Take over the controlling terminal for the rest of the session
    pub fn open(canvas: Canvas) -> Result<Self> {
        let guard = RawModeGuard::enter()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        terminal.clear()?;
        debug!("Display surface opened ({}x{} logical)", canvas.width, canvas.height);
        Ok(Self {
            terminal,
            canvas,
            _guard: Some(guard),
        })
    }
}

impl<B: Backend> TerminalSurface<B> {
    /// Render onto an arbitrary backend without touching the real terminal
    pub fn with_backend(backend: B, canvas: Canvas) -> Result<Self> {
        Ok(Self {
            terminal: Terminal::new(backend)?,
            canvas,
            _guard: None,
        })
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

impl<B: Backend> Surface for TerminalSurface<B> {
    fn present(&mut self, scene: &Scene) -> Result<()> {
        let canvas = self.canvas;
        self.terminal.draw(|f| render_scene(f, scene, canvas))?;
        Ok(())
    }
}

fn render_scene(f: &mut Frame, scene: &Scene, canvas: Canvas) {
    let area = f.area();
    f.render_widget(Clear, area);
    f.render_widget(Block::default().style(Style::default().bg(BACKGROUND)), area);

    for stimulus in scene.stimuli() {
        match stimulus {
            Stimulus::Text { text, placement, bold } => {
                let rect = to_cells(*placement, canvas, area);
                if rect.is_empty() {
                    continue;
                }
                let rect = centre_vertically(rect, estimate_lines(text, rect.width));
                let mut style = Style::default().fg(FOREGROUND).bg(BACKGROUND);
                if *bold {
                    style = style.add_modifier(Modifier::BOLD);
                }
                let paragraph = Paragraph::new(text.as_str())
                    .style(style)
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true });
                f.render_widget(paragraph, rect);
            }
            Stimulus::Image { image, placement, .. } => {
                let rect = to_cells(*placement, canvas, area);
                if !rect.is_empty() {
                    f.render_widget(HalfBlockImage(image), rect);
                }
            }
        }
    }
}

/// Map a logical placement onto terminal cells, clipped to `area`
fn to_cells(placement: Placement, canvas: Canvas, area: Rect) -> Rect {
    let sx = f32::from(area.width) / canvas.width;
    let sy = f32::from(area.height) / canvas.height;

    let left = (placement.x - placement.width / 2.0 + canvas.width / 2.0) * sx;
    let top = (canvas.height / 2.0 - (placement.y + placement.height / 2.0)) * sy;
    let width = (placement.width * sx).round().max(1.0);
    let height = (placement.height * sy).round().max(1.0);

    let x = (f32::from(area.x) + left.round()).clamp(0.0, f32::from(u16::MAX)) as u16;
    let y = (f32::from(area.y) + top.round()).clamp(0.0, f32::from(u16::MAX)) as u16;
    let rect = Rect::new(
        x,
        y,
        width.min(f32::from(u16::MAX)) as u16,
        height.min(f32::from(u16::MAX)) as u16,
    );
    rect.intersection(area)
}

/// Rough wrapped line count for `text` at `width` columns
fn estimate_lines(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let lines: usize = text
        .split('\n')
        .map(|line| line.chars().count().div_ceil(width).max(1))
        .sum();
    u16::try_from(lines).unwrap_or(u16::MAX)
}

fn centre_vertically(rect: Rect, lines: u16) -> Rect {
    if lines >= rect.height {
        return rect;
    }
    let offset = (rect.height - lines) / 2;
    Rect::new(rect.x, rect.y + offset, rect.width, rect.height - offset)
}

/// Draws an image scaled to the target area, two pixel rows per cell
struct HalfBlockImage<'a>(&'a DynamicImage);

impl Widget for HalfBlockImage<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let pixels = self
            .0
            .resize_exact(u32::from(area.width), u32::from(area.height) * 2, FilterType::Triangle)
            .to_rgb8();

        for row in 0..area.height {
            for col in 0..area.width {
                let upper = pixels.get_pixel(u32::from(col), u32::from(row) * 2);
                let lower = pixels.get_pixel(u32::from(col), u32::from(row) * 2 + 1);
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol("▀")
                        .set_fg(Color::Rgb(upper[0], upper[1], upper[2]))
                        .set_bg(Color::Rgb(lower[0], lower[1], lower[2]));
                }
            }
        }
    }
}
