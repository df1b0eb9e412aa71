use colored::Colorize;
use std::cell::Cell;

/// Anything that can be shown and hidden, like a spinner or an error banner.
pub trait Indicator {
    fn show(&self);
    fn hide(&self);
}

/// In-memory indicator that remembers its visibility.
#[derive(Debug, Default)]
pub struct ToggleIndicator {
    visible: Cell<bool>,
    shown: Cell<usize>,
    hidden: Cell<usize>,
}

impl ToggleIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// How many times `show()` was called.
    pub fn show_count(&self) -> usize {
        self.shown.get()
    }

    /// How many times `hide()` was called.
    pub fn hide_count(&self) -> usize {
        self.hidden.get()
    }
}

impl Indicator for ToggleIndicator {
    fn show(&self) {
        self.visible.set(true);
        self.shown.set(self.shown.get() + 1);
    }

    fn hide(&self) {
        self.visible.set(false);
        self.hidden.set(self.hidden.get() + 1);
    }
}

/// Indicator that prints a coloured status line when shown.
///
/// Hiding only clears the visibility flag; nothing is printed.
pub struct TerminalIndicator {
    message: String,
    style: IndicatorStyle,
    visible: Cell<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorStyle {
    Progress,
    Failure,
}

impl TerminalIndicator {
    pub fn new(message: impl Into<String>, style: IndicatorStyle) -> Self {
        Self {
            message: message.into(),
            style,
            visible: Cell::new(false),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }
}

impl Indicator for TerminalIndicator {
    fn show(&self) {
        self.visible.set(true);
        match self.style {
            IndicatorStyle::Progress => eprintln!("{}", self.message.as_str().dimmed()),
            IndicatorStyle::Failure => eprintln!("{}", self.message.as_str().red().bold()),
        }
    }

    fn hide(&self) {
        self.visible.set(false);
    }
}
