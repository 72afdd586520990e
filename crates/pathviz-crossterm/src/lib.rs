//! Crossterm terminal driver for pathviz.
//!
//! Provides a [`CrosstermDriver`] that implements [`pathviz_core::Driver`]:
//! raw mode, alternate screen, mouse capture, and batched glyph painting.

use std::error::Error;
use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind},
    queue,
    style::{Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use pathviz_core::{
    Point,
    app::Driver,
    canvas::Frame,
    messages::{Key, ModMask, MouseAction, Msg},
    style::{AttrMask, Color},
};

/// Maps a [`pathviz_core::Color`] to a [`crossterm::style::Color`].
fn to_ct_color(c: Color) -> CtColor {
    if c.is_default() {
        CtColor::Reset
    } else {
        CtColor::Rgb {
            r: c.r(),
            g: c.g(),
            b: c.b(),
        }
    }
}

fn to_mod_mask(mods: KeyModifiers) -> ModMask {
    let mut m = ModMask::NONE;
    if mods.contains(KeyModifiers::SHIFT) {
        m = m | ModMask::SHIFT;
    }
    if mods.contains(KeyModifiers::CONTROL) {
        m = m | ModMask::CTRL;
    }
    if mods.contains(KeyModifiers::ALT) {
        m = m | ModMask::ALT;
    }
    m
}

fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        _ => None,
    }
}

/// Translate one crossterm event; `None` for events pathviz ignores.
fn to_msg(ev: Event) -> Option<Msg> {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press | KeyEventKind::Repeat,
            ..
        }) => to_key(code).map(|key| Msg::KeyDown {
            key,
            modifiers: to_mod_mask(modifiers),
        }),
        Event::Mouse(me) => {
            let action = match me.kind {
                MouseEventKind::Down(MouseButton::Left) => MouseAction::Main,
                MouseEventKind::Down(MouseButton::Right) => MouseAction::Secondary,
                MouseEventKind::Down(MouseButton::Middle) => MouseAction::Auxiliary,
                MouseEventKind::Up(_) => MouseAction::Release,
                MouseEventKind::Moved | MouseEventKind::Drag(_) => MouseAction::Move,
                _ => return None,
            };
            Some(Msg::Mouse {
                action,
                pos: Point::new(me.column as i32, me.row as i32),
                modifiers: to_mod_mask(me.modifiers),
            })
        }
        Event::Resize(w, h) => Some(Msg::Screen {
            width: w as i32,
            height: h as i32,
        }),
        _ => None,
    }
}

/// A terminal back-end using crossterm.
///
/// Mouse capture is always on: editing the board is done with the mouse.
pub struct CrosstermDriver {
    out: Stdout,
}

impl CrosstermDriver {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn Error>> {
        terminal::enable_raw_mode()?;
        queue!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All),
            event::EnableMouseCapture
        )?;
        self.out.flush()?;
        log::debug!("terminal initialised");
        Ok(())
    }

    fn poll_msgs(&mut self, timeout: Duration) -> Result<Vec<Msg>, Box<dyn Error>> {
        let mut msgs = Vec::new();
        if !event::poll(timeout)? {
            return Ok(msgs);
        }
        while event::poll(Duration::ZERO)? {
            if let Some(m) = to_msg(event::read()?) {
                msgs.push(m);
            }
        }
        Ok(msgs)
    }

    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn Error>> {
        let mut style = None;
        for fg in &frame.glyphs {
            let (p, glyph) = (fg.pos, fg.glyph);
            queue!(self.out, cursor::MoveTo(p.x as u16, p.y as u16))?;

            // Only re-emit colours and attributes when they change.
            if style != Some(glyph.style) {
                let s = glyph.style;
                queue!(
                    self.out,
                    SetAttribute(Attribute::Reset),
                    SetForegroundColor(to_ct_color(s.fg)),
                    SetBackgroundColor(to_ct_color(s.bg))
                )?;
                if s.attrs.contains(AttrMask::BOLD) {
                    queue!(self.out, SetAttribute(Attribute::Bold))?;
                }
                if s.attrs.contains(AttrMask::DIM) {
                    queue!(self.out, SetAttribute(Attribute::Dim))?;
                }
                style = Some(s);
            }
            queue!(self.out, Print(glyph.ch))?;
        }
        queue!(self.out, SetAttribute(Attribute::Reset))?;
        self.out.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let _ = queue!(
            self.out,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = self.out.flush();
        let _ = terminal::disable_raw_mode();
        log::debug!("terminal restored");
    }
}
