//! Plain line printer for output outside the TUI (rules, final scorecard)
use std::io::{self, Write};

use crossterm::style::{Color, ResetColor, SetForegroundColor};
use crossterm::QueueableCommand;

pub struct TerminalPrinter<W: Write> {
    out: W,
}

impl TerminalPrinter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn print_line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    /// Print a colored line, resetting the color afterwards
    pub fn print_colored_line(&mut self, text: &str, color: TerminalColor) -> io::Result<()> {
        self.out.queue(SetForegroundColor(color.into()))?;
        write!(self.out, "{text}")?;
        self.out.queue(ResetColor)?;
        writeln!(self.out)
    }

    pub fn empty_line(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    /// Flush all output at once
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[derive(Clone, Copy)]
pub enum TerminalColor {
    Red,
    Green,
    Yellow,
    Cyan,
}

impl From<TerminalColor> for Color {
    fn from(color: TerminalColor) -> Self {
        match color {
            TerminalColor::Red => Color::Red,
            TerminalColor::Green => Color::Green,
            TerminalColor::Yellow => Color::Yellow,
            TerminalColor::Cyan => Color::Cyan,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_end_with_newline() {
        let mut printer = TerminalPrinter::new(Vec::new());
        printer.print_line("Rahul 3").unwrap();
        printer.empty_line().unwrap();
        assert_eq!(String::from_utf8(printer.into_inner()).unwrap(), "Rahul 3\n\n");
    }

    #[test]
    fn colored_line_keeps_the_text() {
        let mut printer = TerminalPrinter::new(Vec::new());
        printer.print_colored_line("You Won!", TerminalColor::Green).unwrap();
        let out = String::from_utf8(printer.into_inner()).unwrap();
        assert!(out.contains("You Won!"));
        assert!(out.ends_with('\n'));
    }
}
