//! Interactive console on stdin/stdout.

use crossterm::style::{style, Color, Stylize};
use std::io::{self, BufRead, Write};

use super::{Console, Prompt, Tone};

const BANNER_COLORS: [Color; 3] = [Color::Cyan, Color::Green, Color::Magenta];

pub struct TerminalConsole {
    color: bool,
    /// Rotates banner colours so consecutive banners stand apart.
    banner_count: usize,
}

impl TerminalConsole {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            banner_count: 0,
        }
    }

    fn next_banner_color(&mut self) -> Color {
        let color = BANNER_COLORS[self.banner_count % BANNER_COLORS.len()];
        self.banner_count += 1;
        color
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            style(text).with(color).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Frames `message` in a box of asterisks.
pub fn bordered(message: &str) -> [String; 3] {
    let border = "*".repeat(message.chars().count() + 4);
    [border.clone(), format!("* {} *", message), border]
}

impl Console for TerminalConsole {
    fn ask(&mut self, prompt: &Prompt) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt.text())?;
        stdout.flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    fn show(&mut self, text: &str, tone: Tone) {
        let color = match tone {
            Tone::Plain => {
                println!("{}", text);
                return;
            }
            Tone::Banner => self.next_banner_color(),
            Tone::Danger => Color::Red,
        };
        for line in bordered(text) {
            println!("{}", self.paint(&line, color));
        }
    }
}
