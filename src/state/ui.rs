#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// Whether the floating chat panel is on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelVisibility {
    #[default]
    Hidden,
    Shown,
}

impl PanelVisibility {
    #[must_use]
    pub fn is_shown(self) -> bool {
        self == Self::Shown
    }
}

/// Where a document-level click landed, relative to the widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    /// Inside the panel; never dismisses it.
    Panel,
    /// On the toggle button, which has its own handler.
    Toggle,
    /// On a "chat with user" trigger, which has its own handler.
    ChatWithTrigger,
    /// Anywhere else on the page.
    Outside,
}

impl ClickTarget {
    /// Whether a click here should dismiss an open panel.
    #[must_use]
    pub fn dismisses_panel(self) -> bool {
        self == Self::Outside
    }
}
