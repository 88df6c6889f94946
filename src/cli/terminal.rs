//! Terminal styling for recipe output

use chonky::Difficulty;
use owo_colors::{OwoColorize, colors::css};

/// Whether stdout should get colored output
#[must_use]
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Terminal width, if stdout is a terminal
#[must_use]
pub fn terminal_width() -> Option<usize> {
    terminal_size::terminal_size().map(|(w, _)| usize::from(w.0))
}

/// Shortens `text` to at most `width` characters, marking the cut with `…`.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Badge for a difficulty, colored like the recipe cards: green for quick
/// dishes, red for gourmet, yellow for comfort food.
///
/// The label is padded to `width` characters before it is colored, so
/// escape codes never count towards the column width.
#[must_use]
pub fn difficulty_badge(difficulty: Difficulty, width: usize) -> String {
    paint_badge(difficulty, width, supports_color())
}

fn paint_badge(difficulty: Difficulty, width: usize, color: bool) -> String {
    let icon = match difficulty {
        Difficulty::Quickie => "⚡",
        Difficulty::Gourmet => "👨‍🍳",
        Difficulty::ComfortFood => "🤗",
    };
    let label = format!("{:<width$}", format!("{icon} {difficulty}"));
    if !color {
        return label;
    }
    match difficulty {
        Difficulty::Quickie => label.fg::<css::LimeGreen>().to_string(),
        Difficulty::Gourmet => label.fg::<css::IndianRed>().to_string(),
        Difficulty::ComfortFood => label.fg::<css::Gold>().to_string(),
    }
}

/// Heart marker for favorites, blank otherwise
#[must_use]
pub fn favorite_marker(is_favorite: bool) -> String {
    match (is_favorite, supports_color()) {
        (false, _) => " ".to_string(),
        (true, false) => "♥".to_string(),
        (true, true) => "♥".fg::<css::Red>().to_string(),
    }
}

/// Extension trait for colorizing messages
pub trait Colorize {
    /// Green, for completed actions
    fn success(&self) -> String;
    /// Orange, for things the user should notice
    fn warning(&self) -> String;
    /// Dimmed, for secondary details
    fn dim(&self) -> String;
}

impl<T: AsRef<str> + ?Sized> Colorize for T {
    fn success(&self) -> String {
        let text = self.as_ref();
        if supports_color() {
            text.fg::<css::Green>().to_string()
        } else {
            text.to_string()
        }
    }

    fn warning(&self) -> String {
        let text = self.as_ref();
        if supports_color() {
            text.fg::<css::Orange>().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self) -> String {
        let text = self.as_ref();
        if supports_color() {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}
