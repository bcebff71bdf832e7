use std::io::{self, Write};
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent};
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor, execute, queue, terminal};

use crate::buffer::{cell, Buffer};
use crate::element::Element;
use crate::layout::{layout, LayoutResult, Rect};
use crate::render::render_to_buffer;
use crate::style::{Rgb, Stylesheet, TextStyle};
use crate::text::char_width;

/// Raw-mode terminal that paints element trees with buffer diffing.
///
/// Restores the terminal on drop.
pub struct Terminal {
    stdout: io::Stdout,
    current_buffer: Buffer,
    previous_buffer: Buffer,
    last_layout: LayoutResult,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        let (width, height) = terminal::size()?;
        log::debug!("terminal opened at {width}x{height}");

        Ok(Self {
            stdout,
            current_buffer: Buffer::new(width, height),
            previous_buffer: Buffer::new(width, height),
            last_layout: LayoutResult::new(),
        })
    }

    /// Wait for input. With a timeout, returns an empty vec if nothing arrived.
    pub fn poll(&self, timeout: Option<Duration>) -> io::Result<Vec<CrosstermEvent>> {
        let mut events = Vec::new();

        let has_event = match timeout {
            Some(dur) => event::poll(dur)?,
            None => {
                events.push(event::read()?);
                return Ok(events);
            }
        };

        if has_event {
            events.push(event::read()?);
            while event::poll(Duration::ZERO)? {
                events.push(event::read()?);
            }
        }

        Ok(events)
    }

    pub fn render(&mut self, root: &Element, stylesheet: &Stylesheet) -> io::Result<&LayoutResult> {
        let (width, height) = terminal::size()?;
        if width != self.current_buffer.width() || height != self.current_buffer.height() {
            self.current_buffer = Buffer::new(width, height);
            // Force a full repaint after a resize.
            self.previous_buffer = Buffer::new(width, height);
            execute!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
        }

        self.current_buffer.clear();
        self.last_layout = layout(root, Rect::from_size(width, height));
        render_to_buffer(root, &self.last_layout, &mut self.current_buffer, stylesheet);

        self.flush_diff()?;
        std::mem::swap(&mut self.current_buffer, &mut self.previous_buffer);

        Ok(&self.last_layout)
    }

    /// Get the layout from the last render.
    pub fn layout(&self) -> &LayoutResult {
        &self.last_layout
    }

    /// Write the cells that changed since the previous frame.
    fn flush_diff(&mut self) -> io::Result<()> {
        let mut pen = Pen::default();
        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        pen.apply_colors(&mut self.stdout)?;

        // Where the cursor will be after the last write, if known.
        let mut cursor_at: Option<(u16, u16)> = None;

        for (x, y, cell) in self.current_buffer.diff(&self.previous_buffer) {
            if cell.wide_continuation {
                continue;
            }
            if cursor_at != Some((x, y)) {
                queue!(self.stdout, cursor::MoveTo(x, y))?;
            }

            pen.switch(&mut self.stdout, cell.fg, cell.bg, cell.style)?;
            queue!(self.stdout, Print(cell.char))?;

            let advance = u16::try_from(char_width(cell.char).max(1)).unwrap_or(1);
            cursor_at = Some((x.saturating_add(advance), y));
        }

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()
    }
}

/// Colors and attributes currently active on the terminal.
struct Pen {
    fg: Rgb,
    bg: Rgb,
    style: TextStyle,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            fg: cell::DEFAULT_FG,
            bg: cell::DEFAULT_BG,
            style: TextStyle::new(),
        }
    }
}

impl Pen {
    fn switch(&mut self, out: &mut impl Write, fg: Rgb, bg: Rgb, style: TextStyle) -> io::Result<()> {
        if style != self.style {
            // A reset clears colors too, so they are re-sent below.
            queue!(out, SetAttribute(Attribute::Reset))?;
            let attributes = [
                (style.bold, Attribute::Bold),
                (style.dim, Attribute::Dim),
                (style.italic, Attribute::Italic),
                (style.underline, Attribute::Underlined),
                (style.reverse, Attribute::Reverse),
            ];
            for (_, attribute) in attributes.into_iter().filter(|(on, _)| *on) {
                queue!(out, SetAttribute(attribute))?;
            }
            self.style = style;
            self.fg = fg;
            self.bg = bg;
            return self.apply_colors(out);
        }

        if fg != self.fg {
            queue!(out, SetForegroundColor(color(fg)))?;
            self.fg = fg;
        }
        if bg != self.bg {
            queue!(out, SetBackgroundColor(color(bg)))?;
            self.bg = bg;
        }
        Ok(())
    }

    fn apply_colors(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, SetForegroundColor(color(self.fg)), SetBackgroundColor(color(self.bg)))
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
