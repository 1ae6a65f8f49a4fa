//! Crossterm-backed output sink.
//!
//! Commands accumulate in memory and are translated into escape sequences
//! only on `flush`, so one render cycle reaches the terminal as one write
//! burst followed by a single `Write::flush`.

use crate::{Color, Command, DisplayAttributes, TerminalOutput};
use crossterm::{
    cursor::{Hide, MoveDown, MoveLeft, MoveRight, MoveTo, MoveUp, Show},
    queue,
    style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType, SetTitle},
};
use std::io::{self, Write};

const INDEX: &[u8] = b"\x1bD";
const REVERSE_INDEX: &[u8] = b"\x1bM";

pub struct CrosstermOutput<W: Write> {
    out: W,
    pending: Vec<Command>,
}

impl<W: Write> CrosstermOutput<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            pending: Vec::new(),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TerminalOutput for CrosstermOutput<W> {
    fn push(&mut self, cmd: Command) {
        self.pending.push(cmd);
    }

    fn flush(&mut self) -> io::Result<()> {
        let count = self.pending.len();
        for cmd in self.pending.drain(..) {
            emit(&mut self.out, cmd)?;
        }
        self.out.flush()?;
        tracing::trace!(target: "terminal", commands = count, "flush");
        Ok(())
    }
}

fn emit<W: Write>(out: &mut W, cmd: Command) -> io::Result<()> {
    match cmd {
        Command::Text(s) => {
            // Text must never smuggle control sequences past the sink.
            let s = s.replace('\x1b', "?");
            queue!(out, Print(s))?;
        }
        Command::Raw(bytes) => out.write_all(&bytes)?,
        Command::SetColor { fg, bg, bold } => {
            queue!(out, SetAttribute(Attribute::Reset))?;
            if bold {
                queue!(out, SetAttribute(Attribute::Bold))?;
            }
            queue!(
                out,
                SetForegroundColor(to_crossterm(fg)),
                SetBackgroundColor(to_crossterm(bg))
            )?;
        }
        Command::SetDisplayAttributes { fg, bg, attrs } => {
            queue!(out, SetAttribute(Attribute::Reset))?;
            for attr in attributes(attrs) {
                queue!(out, SetAttribute(attr))?;
            }
            queue!(
                out,
                SetForegroundColor(to_crossterm(fg)),
                SetBackgroundColor(to_crossterm(bg))
            )?;
        }
        Command::CursorUp(n) => queue!(out, MoveUp(clamp_u16(n)))?,
        Command::CursorDown(n) => queue!(out, MoveDown(clamp_u16(n)))?,
        Command::CursorForward(n) => queue!(out, MoveRight(clamp_u16(n)))?,
        Command::CursorBackward(n) => queue!(out, MoveLeft(clamp_u16(n)))?,
        Command::CursorGoTo { row, col } => queue!(out, MoveTo(clamp_u16(col), clamp_u16(row)))?,
        Command::EraseLine => queue!(out, Clear(ClearType::CurrentLine))?,
        Command::EraseDown => queue!(out, Clear(ClearType::FromCursorDown))?,
        Command::EraseScreen => queue!(out, Clear(ClearType::All))?,
        Command::HideCursor => queue!(out, Hide)?,
        Command::ShowCursor => queue!(out, Show)?,
        Command::ScrollUp => out.write_all(REVERSE_INDEX)?,
        Command::ScrollDown => out.write_all(INDEX)?,
        Command::SetTitle(title) => queue!(out, SetTitle(title))?,
        Command::ClearTitle => queue!(out, SetTitle(""))?,
    }
    Ok(())
}

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn attributes(attrs: DisplayAttributes) -> impl Iterator<Item = Attribute> {
    const TABLE: [(DisplayAttributes, Attribute); 8] = [
        (DisplayAttributes::BOLD, Attribute::Bold),
        (DisplayAttributes::LOW_INTENSITY, Attribute::Dim),
        (DisplayAttributes::ITALIC, Attribute::Italic),
        (DisplayAttributes::UNDERLINE, Attribute::Underlined),
        (DisplayAttributes::BLINK, Attribute::SlowBlink),
        (DisplayAttributes::REVERSE, Attribute::Reverse),
        (DisplayAttributes::INVISIBLE, Attribute::Hidden),
        (DisplayAttributes::CROSSED_OUT, Attribute::CrossedOut),
    ];
    TABLE
        .into_iter()
        .filter(move |(flag, _)| attrs.contains(*flag))
        .map(|(_, attr)| attr)
}

fn to_crossterm(color: Color) -> crossterm::style::Color {
    use crossterm::style::Color as C;
    match color {
        Color::Default => C::Reset,
        Color::Black => C::Black,
        Color::DarkRed => C::DarkRed,
        Color::DarkGreen => C::DarkGreen,
        Color::Brown => C::DarkYellow,
        Color::DarkBlue => C::DarkBlue,
        Color::Purple => C::DarkMagenta,
        Color::Cyan => C::DarkCyan,
        Color::LightGray => C::Grey,
        Color::DarkGray => C::DarkGrey,
        Color::Red => C::Red,
        Color::Green => C::Green,
        Color::Yellow => C::Yellow,
        Color::Blue => C::Blue,
        Color::Fuchsia => C::Magenta,
        Color::Turquoise => C::Cyan,
        Color::White => C::White,
    }
}
