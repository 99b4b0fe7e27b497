//! Character display collaborator.
//!
//! The display is purely observational: the controller pushes frames and never
//! reads anything back.

/// Columns on the character display.
pub const DISPLAY_COLS: usize = 16;

/// Rows on the character display.
pub const DISPLAY_ROWS: usize = 2;

/// Backlight colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backlight {
    /// Backlight off.
    Off,
    /// Red, used for errors and shutdown.
    Red,
    /// Green, main screen.
    Green,
    /// Yellow, authentication and locking.
    Yellow,
    /// Teal, coin insertion.
    Teal,
    /// Violet, coin accepted.
    Violet,
    /// Plain white backlight.
    White,
}

/// One write to the display: `text` placed at (`col`, `row`), optionally
/// clearing first and switching the backlight. A `'\n'` in `text` continues on
/// the next row at column 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFrame {
    /// Text to write.
    pub text: String,
    /// Cursor column.
    pub col: u8,
    /// Cursor row.
    pub row: u8,
    /// Clear the display before writing.
    pub clear: bool,
    /// New backlight colour, if any.
    pub backlight: Option<Backlight>,
}

impl DisplayFrame {
    /// Write `text` at (`col`, `row`) without clearing.
    pub fn at(text: impl Into<String>, col: u8, row: u8) -> Self {
        Self {
            text: text.into(),
            col,
            row,
            clear: false,
            backlight: None,
        }
    }

    /// Clear, set the backlight and write `text` from the top-left corner.
    pub fn screen(text: impl Into<String>, backlight: Backlight) -> Self {
        Self {
            text: text.into(),
            col: 0,
            row: 0,
            clear: true,
            backlight: Some(backlight),
        }
    }
}

/// Sink for display frames.
pub trait Display {
    /// Render one frame.
    fn show(&mut self, frame: DisplayFrame);
}

impl<T: Display + ?Sized> Display for Box<T> {
    fn show(&mut self, frame: DisplayFrame) {
        (**self).show(frame)
    }
}
