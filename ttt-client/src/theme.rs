//! Themes and color schemes
//!
//! ANSI colors for the terminal board

const RESET: &str = "\x1b[0m";

/// Terminal color theme
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorTheme {
    pub name: &'static str,

    // Marks
    pub x_mark: &'static str,
    pub o_mark: &'static str,

    // Board
    pub grid: &'static str,
    pub empty_cell: &'static str,
    pub winning_line: &'static str,
    pub last_move: &'static str,

    // Text
    pub status: &'static str,
    pub commentary: &'static str,
}

impl ColorTheme {
    /// For light terminal backgrounds
    pub fn light() -> Self {
        Self {
            name: "Light",
            x_mark: "\x1b[1;34m",       // bold blue
            o_mark: "\x1b[1;31m",       // bold red
            grid: "\x1b[90m",           // gray
            empty_cell: "\x1b[37m",     // light gray
            winning_line: "\x1b[42;30m", // black on green
            last_move: "\x1b[4m",       // underline
            status: "\x1b[1m",
            commentary: "\x1b[3;35m",   // italic magenta
        }
    }

    /// For dark terminal backgrounds
    pub fn dark() -> Self {
        Self {
            name: "Dark",
            x_mark: "\x1b[1;96m",       // bright cyan
            o_mark: "\x1b[1;93m",       // bright yellow
            grid: "\x1b[37m",
            empty_cell: "\x1b[90m",
            winning_line: "\x1b[102;30m",
            last_move: "\x1b[4m",
            status: "\x1b[1;97m",
            commentary: "\x1b[3;95m",
        }
    }

    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// Wrap `text` in `color`
    pub fn paint(&self, text: &str, color: &str) -> String {
        format!("{}{}{}", color, text, RESET)
    }
}
