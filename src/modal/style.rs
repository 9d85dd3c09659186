//! Styles for the list modal.
//!
//! ```rust
//! use bubbletea_list_modal::modal::ModalStyles;
//! use lipgloss_extras::prelude::*;
//!
//! let mut styles = ModalStyles::default();
//! styles.title = Style::new().bold(true);
//! ```

use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Arrow shown before the previous-page control.
pub const PREV_ARROW: &str = "‹";

/// Arrow shown after the next-page control.
pub const NEXT_ARROW: &str = "›";

/// Visual styles for each part of the modal.
#[derive(Debug, Clone)]
pub struct ModalStyles {
    /// Border and padding around the whole dialog.
    pub frame: Style,
    /// Dialog title.
    pub title: Style,
    /// Title button.
    pub title_button: Style,
    /// `1 - 50 of 120 total` line.
    pub range: Style,
    /// Text next to the spinner while loading.
    pub loading: Style,
    /// Spinner frames.
    pub spinner: Style,
    /// Previous/next controls.
    pub control: Style,
    /// Help footer container.
    pub help: Style,
}

impl Default for ModalStyles {
    fn default() -> Self {
        let subdued = || AdaptiveColor {
            Light: "#9B9B9B",
            Dark: "#5C5C5C",
        };

        Self {
            frame: Style::new()
                .border_style(lipgloss::normal_border())
                .border_foreground(Color::from("62"))
                .padding(0, 1, 0, 1),
            title: Style::new()
                .background(Color::from("62"))
                .foreground(Color::from("230"))
                .padding(0, 1, 0, 1),
            title_button: Style::new()
                .foreground(Color::from("230"))
                .background(Color::from("#166de0"))
                .padding(0, 1, 0, 1),
            range: Style::new().foreground(subdued()),
            loading: Style::new().foreground(subdued()),
            spinner: Style::new().foreground(AdaptiveColor {
                Light: "#8E8E8E",
                Dark: "#747373",
            }),
            control: Style::new().foreground(AdaptiveColor {
                Light: "#166de0",
                Dark: "#4f9fff",
            }),
            help: Style::new().padding(1, 0, 0, 0),
        }
    }
}
