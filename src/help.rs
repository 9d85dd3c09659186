//! One-line help footer for the modal.
//!
//! Renders `key desc • key desc • ...` from any [`KeyMap`], truncating with an
//! ellipsis when a width is set and the line does not fit.

use crate::key::{self, KeyMap};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Styles for the help footer.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Trailing ellipsis when truncated.
    pub ellipsis: Style,
    /// Key label.
    pub key: Style,
    /// Binding description.
    pub desc: Style,
    /// Separator between bindings.
    pub separator: Style,
}

impl Default for Styles {
    fn default() -> Self {
        let key_style = Style::new().foreground(AdaptiveColor {
            Light: "#909090",
            Dark: "#626262",
        });
        let desc_style = Style::new().foreground(AdaptiveColor {
            Light: "#B2B2B2",
            Dark: "#4A4A4A",
        });
        let sep_style = Style::new().foreground(AdaptiveColor {
            Light: "#DDDADA",
            Dark: "#3C3C3C",
        });

        Self {
            ellipsis: sep_style.clone(),
            key: key_style,
            desc: desc_style,
            separator: sep_style,
        }
    }
}

/// Help footer state.
#[derive(Debug, Clone)]
pub struct Model {
    /// Maximum rendered width; zero means unbounded.
    pub width: usize,
    /// Separator placed between bindings.
    pub separator: String,
    /// Marker appended when bindings were cut off.
    pub ellipsis: String,
    /// Visual styles.
    pub styles: Styles,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            width: 0,
            separator: " • ".to_string(),
            ellipsis: "…".to_string(),
            styles: Styles::default(),
        }
    }
}

impl Model {
    /// Creates a help footer with default styles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the short help of a key map.
    pub fn view<K: KeyMap>(&self, keymap: &K) -> String {
        self.short_help_view(keymap.short_help())
    }

    /// Renders the given bindings on one line. Disabled bindings are skipped.
    pub fn short_help_view(&self, bindings: Vec<&key::Binding>) -> String {
        let separator = self.styles.separator.clone().inline(true).render(&self.separator);

        let mut out = String::new();
        let mut total_width = 0;
        for kb in bindings.into_iter().filter(|b| b.enabled()) {
            let sep = if total_width > 0 { separator.as_str() } else { "" };
            let help = kb.help();
            let item = format!(
                "{}{} {}",
                sep,
                self.styles.key.clone().inline(true).render(&help.key),
                self.styles.desc.clone().inline(true).render(&help.desc)
            );
            let item_width = lipgloss::width_visible(&item);

            if self.width > 0 && total_width + item_width > self.width {
                let tail = format!(
                    " {}",
                    self.styles.ellipsis.clone().inline(true).render(&self.ellipsis)
                );
                if total_width + lipgloss::width_visible(&tail) <= self.width {
                    out.push_str(&tail);
                }
                break;
            }

            total_width += item_width;
            out.push_str(&item);
        }
        out
    }
}
