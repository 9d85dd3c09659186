//! View rendering for the list modal.
//!
//! The dialog is drawn top to bottom as: title line (with the optional title
//! button), search box, range label, rows or the loading placeholder, page
//! controls and the help footer, all inside the frame style.

use super::delegate::RowContext;
use super::model::Model;
use super::style::{NEXT_ARROW, PREV_ARROW};
use super::types::Item;
use crate::key;

impl<I: Item> Model<I> {
    pub(super) fn view_title(&self) -> String {
        let mut line = self.styles.title.render(&self.title);
        if let Some(button) = &self.title_button {
            line.push(' ');
            line.push_str(&self.styles.title_button.render(&button.text));
        }
        line
    }

    pub(super) fn view_range(&self) -> String {
        let label = self.range_label();
        if label.is_empty() {
            return label;
        }
        self.styles.range.render(&label)
    }

    /// Rows of the current page, or the spinner while a fetch is pending.
    ///
    /// Only the rows inside the viewport are drawn when a height is set.
    pub(super) fn view_rows(&self) -> String {
        if self.state.is_loading {
            return format!(
                "{} {}",
                self.spinner.view(),
                self.styles.loading.render("Loading…")
            );
        }

        let take = self.rows_per_view().unwrap_or(self.state.items.len());
        let width = self.inner_width();
        self.state
            .items
            .iter()
            .enumerate()
            .skip(self.viewport_start)
            .take(take)
            .map(|(index, item)| {
                let ctx = RowContext {
                    index,
                    selected: index == self.cursor,
                    width,
                    search_term: &self.state.search_term,
                };
                self.delegate.render(item, &ctx)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub(super) fn view_controls(&self) -> String {
        let mut controls = Vec::new();
        if self.has_prev_page() {
            controls.push(self.styles.control.render(&format!("{} Previous", PREV_ARROW)));
        }
        if self.has_next_page() {
            controls.push(self.styles.control.render(&format!("Next {}", NEXT_ARROW)));
        }
        controls.join("   ")
    }

    pub(super) fn view_help(&self) -> String {
        let delegate_bindings = if self.focus == super::types::Focus::Rows {
            self.delegate.short_help()
        } else {
            Vec::new()
        };
        let mut bindings = key::KeyMap::short_help(self);
        // Row actions go before the dialog-level bindings.
        let insert_at = bindings.len().saturating_sub(3);
        for (offset, binding) in delegate_bindings.iter().enumerate() {
            bindings.insert(insert_at + offset, binding);
        }
        self.styles.help.render(&self.help.short_help_view(bindings))
    }

    /// Renders the dialog. Hidden and closed modals render nothing.
    pub fn view(&self) -> String {
        if !self.is_visible() {
            return String::new();
        }

        let mut sections = vec![self.view_title(), self.search.view(), self.view_range()];
        let rows = self.view_rows();
        if !rows.is_empty() {
            sections.push(rows);
        }
        let controls = self.view_controls();
        if !controls.is_empty() {
            sections.push(controls);
        }
        sections.push(self.view_help());

        self.styles.frame.render(&sections.join("\n"))
    }
}
