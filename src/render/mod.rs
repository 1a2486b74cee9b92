//! Display port: what the controller hands to the screen and how keys come back.

mod terminal;

pub use terminal::TerminalDisplay;

use anyhow::Result;
use unicode_width::UnicodeWidthChar;

use crate::input::Key;

/// Blank line, title, blank line.
pub const HEADER_ROWS: u16 = 3;

/// Placeholder row drawn for a menu with no options.
pub const EMPTY_MENU_LABEL: &str = "(no options)";

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MenuView {
    pub title: String,
    pub labels: Vec<String>,
    /// `None` for an empty menu.
    pub selected: Option<usize>,
    /// First label row shown when the list is taller than the screen.
    pub scroll_offset: usize,
    /// Action output or acknowledgement shown in place of the list.
    pub transient: Option<String>,
}

impl MenuView {
    /// Labels to draw, with the empty-menu placeholder substituted.
    pub fn rows(&self) -> Vec<&str> {
        if self.labels.is_empty() {
            return vec![EMPTY_MENU_LABEL];
        }
        self.labels.iter().map(String::as_str).collect()
    }
}

/// Offset that keeps `selected` inside a window of `rows` lines.
pub fn visible_window(len: usize, selected: usize, rows: usize) -> usize {
    if rows == 0 || len <= rows {
        return 0;
    }
    let offset = (selected + 1).saturating_sub(rows);
    offset.min(len - rows)
}

/// Rows left for menu labels on a screen `rows` tall.
pub fn list_rows(rows: u16) -> usize {
    usize::from(rows.saturating_sub(HEADER_ROWS))
}

/// Clip `text` to `cols` display columns, marking the cut with `~`.
pub fn fit_width(text: &str, cols: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    let total: usize = text.chars().map(|ch| ch.width().unwrap_or(0)).sum();
    if total <= cols {
        return text.to_string();
    }
    let budget = cols.saturating_sub(1);
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > budget {
            break;
        }
        width += ch_width;
        out.push(ch);
    }
    if cols > 0 {
        out.push('~');
    }
    out
}

/// Screen and keyboard the runtime drives once per tick.
pub trait RenderPort {
    fn draw(&mut self, view: &MenuView) -> Result<()>;

    /// `(cols, rows)` of the drawable area.
    fn viewport(&self) -> (u16, u16);

    /// Next pending key, without blocking.
    fn poll_key(&mut self) -> Result<Option<Key>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_stays_at_top_until_selection_leaves_it() {
        assert_eq!(visible_window(10, 0, 4), 0);
        assert_eq!(visible_window(10, 3, 4), 0);
        assert_eq!(visible_window(10, 4, 4), 1);
        assert_eq!(visible_window(10, 9, 4), 6);
    }

    #[test]
    fn short_lists_never_scroll() {
        assert_eq!(visible_window(3, 2, 10), 0);
        assert_eq!(visible_window(3, 2, 0), 0);
    }

    #[test]
    fn fit_width_clips_wide_text() {
        assert_eq!(fit_width("Library", 20), "Library");
        assert_eq!(fit_width("Library", 4), "Lib~");
        assert_eq!(fit_width("日本語", 5), "日本~");
        assert_eq!(fit_width("abc", 0), "");
    }

    #[test]
    fn list_rows_leaves_room_for_the_title() {
        assert_eq!(list_rows(24), 21);
        assert_eq!(list_rows(2), 0);
    }

    #[test]
    fn empty_menu_renders_placeholder() {
        let view = MenuView {
            title: "Songs".to_string(),
            ..MenuView::default()
        };
        assert_eq!(view.rows(), vec![EMPTY_MENU_LABEL]);
    }
}
