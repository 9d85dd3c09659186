//! Row rendering and row actions.
//!
//! A [`RowDelegate`] turns an item into one rendered row and handles the keys
//! pressed while that row is selected. Actions that change the underlying
//! data get a [`Refresh`] handle so they can reload the current page once they
//! are done.

use super::msgs::RefreshMsg;
use super::types::Item;
use crate::key;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use std::fmt::Display;
use std::future::Future;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Where a row is being drawn.
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a> {
    /// Position on the current page.
    pub index: usize,
    /// True for the row under the cursor.
    pub selected: bool,
    /// Width available to the row; zero means unbounded.
    pub width: usize,
    /// Current search term, for highlighting.
    pub search_term: &'a str,
}

/// Handle a row action uses to reload the modal's current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Refresh {
    modal_id: i64,
}

impl Refresh {
    pub(crate) fn new(modal_id: i64) -> Self {
        Self { modal_id }
    }

    /// Modal this handle reloads.
    pub fn modal_id(&self) -> i64 {
        self.modal_id
    }

    /// Reloads the current page right away.
    pub fn cmd(&self) -> Cmd {
        let id = self.modal_id;
        Box::pin(async move { Some(Box::new(RefreshMsg { id }) as Msg) })
    }

    /// Runs `action` and reloads the current page if it succeeds.
    ///
    /// A failed action is logged and leaves the page as it is.
    pub fn after<F, E>(&self, action: F) -> Cmd
    where
        F: Future<Output = Result<(), E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let id = self.modal_id;
        Box::pin(async move {
            match action.await {
                Ok(()) => Some(Box::new(RefreshMsg { id }) as Msg),
                Err(err) => {
                    tracing::warn!(modal = id, error = %err, "row action failed, not refreshing");
                    None
                }
            }
        })
    }
}

/// Renders rows and handles row-level keys.
pub trait RowDelegate<I: Item>: Send + Sync {
    /// Renders one item. The result may span several lines; see
    /// [`RowDelegate::height`].
    fn render(&self, item: &I, ctx: &RowContext<'_>) -> String;

    /// Lines per rendered row.
    fn height(&self) -> usize {
        1
    }

    /// Handles a key the modal did not consume while `item` is selected.
    fn update(&self, _msg: &KeyMsg, _item: &I, _refresh: Refresh) -> Option<Cmd> {
        None
    }

    /// Row bindings added to the modal's help footer.
    fn short_help(&self) -> Vec<key::Binding> {
        vec![]
    }
}

/// Styles used by [`DefaultDelegate`].
#[derive(Debug, Clone)]
pub struct DefaultRowStyles {
    /// Unselected row.
    pub normal: Style,
    /// Row under the cursor.
    pub selected: Style,
    /// Characters matching the search term.
    pub search_match: Style,
}

impl Default for DefaultRowStyles {
    fn default() -> Self {
        Self {
            normal: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#1a1a1a",
                    Dark: "#dddddd",
                })
                .padding(0, 0, 0, 2),
            selected: Style::new()
                .border_style(lipgloss::normal_border())
                .border_left(true)
                .border_left_foreground(Color::from("#AD58B4"))
                .foreground(Color::from("#EE6FF8"))
                .padding(0, 0, 0, 1),
            search_match: Style::new().underline(true),
        }
    }
}

/// Renders any `Display` item on one line and highlights the characters that
/// fuzzy-match the search term.
#[derive(Debug, Clone, Default)]
pub struct DefaultDelegate {
    /// Row styles.
    pub styles: DefaultRowStyles,
}

impl DefaultDelegate {
    /// Creates a delegate with default styles.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<I: Item + Display> RowDelegate<I> for DefaultDelegate {
    fn render(&self, item: &I, ctx: &RowContext<'_>) -> String {
        // Two columns go to the left padding / selection border.
        let text = truncate(&item.to_string(), ctx.width.saturating_sub(2));
        let base = if ctx.selected {
            &self.styles.selected
        } else {
            &self.styles.normal
        };
        let matches = match_indices(&text, ctx.search_term);
        if matches.is_empty() {
            return base.render(&text);
        }

        let highlight = Style::new()
            .inline(true)
            .inherit(self.styles.search_match.clone());
        let mut line = String::new();
        for (i, c) in text.chars().enumerate() {
            let s = c.to_string();
            if matches.contains(&i) {
                line.push_str(&highlight.render(&s));
            } else {
                line.push_str(&s);
            }
        }
        base.render(&line)
    }
}

/// Character positions in `text` that fuzzy-match `term`.
pub fn match_indices(text: &str, term: &str) -> Vec<usize> {
    if term.is_empty() {
        return Vec::new();
    }
    SkimMatcherV2::default()
        .fuzzy_indices(text, term)
        .map(|(_, indices)| indices)
        .unwrap_or_default()
}

/// Cuts `s` to `width` terminal columns, ending with `…` when shortened.
/// A zero width leaves the text alone.
pub fn truncate(s: &str, width: usize) -> String {
    if width == 0 || s.width() <= width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for g in s.graphemes(true) {
        let w = g.width();
        if used + w + 1 > width {
            break;
        }
        used += w;
        out.push_str(g);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Name(&'static str);

    impl Display for Name {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    impl Item for Name {
        fn key(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("engineering", 0), "engineering");
        assert_eq!(truncate("engineering", 20), "engineering");
        assert_eq!(truncate("engineering", 6), "engin…");
    }

    #[test]
    fn test_match_indices() {
        assert!(match_indices("design", "").is_empty());
        assert_eq!(match_indices("design", "dsg"), vec![0, 2, 4]);
        assert!(match_indices("design", "xyz").is_empty());
    }

    #[test]
    fn test_default_delegate_renders_text() {
        let delegate = DefaultDelegate::new();
        let ctx = RowContext {
            index: 0,
            selected: false,
            width: 0,
            search_term: "des",
        };
        let out = lipgloss::strip_ansi(&delegate.render(&Name("design"), &ctx));
        assert_eq!(out.trim(), "design");
    }

    #[tokio::test]
    async fn test_refresh_after_success_emits_refresh() {
        let refresh = Refresh::new(7);
        let msg = refresh.after(async { Ok::<(), String>(()) }).await;
        let msg = msg.expect("refresh message");
        assert_eq!(msg.downcast_ref::<RefreshMsg>().map(|m| m.id), Some(7));
    }

    #[tokio::test]
    async fn test_refresh_after_failure_is_silent() {
        let refresh = Refresh::new(7);
        let msg = refresh
            .after(async { Err::<(), _>("unlink failed".to_string()) })
            .await;
        assert!(msg.is_none());
    }
}
