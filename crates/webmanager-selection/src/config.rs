//! Selection controller configuration.

use std::time::Duration;

/// What the published state shows while a new selection is loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingDisplay {
    /// Clear the previous content as soon as a selection settles.
    #[default]
    HideContent,
    /// Keep the previous content until the new result arrives.
    KeepStale,
}

/// Configuration for the selection controller.
#[derive(Debug, Clone)]
pub struct SelectionConfig {
    /// Quiet period a selection must survive before it is fetched.
    pub debounce: Duration,
    /// Content policy while loading.
    pub loading_display: LoadingDisplay,
    /// Abort superseded fetch tasks instead of only discarding their results.
    pub abort_superseded: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(100),
            loading_display: LoadingDisplay::HideContent,
            abort_superseded: false,
        }
    }
}

impl SelectionConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the debounce window.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Sets the loading display policy.
    pub fn with_loading_display(mut self, display: LoadingDisplay) -> Self {
        self.loading_display = display;
        self
    }

    /// Enables or disables aborting superseded fetches.
    pub fn with_abort_superseded(mut self, abort: bool) -> Self {
        self.abort_superseded = abort;
        self
    }
}
