//! Published controller state.

use webmanager_models::SelectionSummary;

/// State observed by the presentation layer.
///
/// Only the controller's driver task mutates this value; observers receive
/// clones through a watch channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerState<C> {
    /// Content of the latest successful fetch.
    pub content: Option<C>,
    /// Message of the latest failed fetch.
    pub error: Option<String>,
    /// True while the fetch for the latest settled selection is outstanding.
    pub is_loading: bool,
    /// Latest settled selection.
    pub selected: Option<SelectionSummary>,
    /// Generation of the latest settlement (0 before the first).
    pub generation: u64,
}

impl<C> Default for ControllerState<C> {
    fn default() -> Self {
        Self {
            content: None,
            error: None,
            is_loading: false,
            selected: None,
            generation: 0,
        }
    }
}

/// The primary rendering of a state.
#[derive(Debug, PartialEq)]
pub enum StateView<'a, C> {
    /// Nothing selected yet.
    Empty,
    /// A fetch is outstanding; `stale` is the previous content when kept.
    Loading { stale: Option<&'a C> },
    /// The latest fetch succeeded.
    Content(&'a C),
    /// The latest fetch failed.
    Error(&'a str),
}

impl<C> ControllerState<C> {
    /// Returns true if nothing has been selected or loaded.
    pub fn is_empty(&self) -> bool {
        !self.is_loading && self.content.is_none() && self.error.is_none()
    }

    /// Returns the single primary rendering of this state.
    pub fn view(&self) -> StateView<'_, C> {
        if self.is_loading {
            return StateView::Loading {
                stale: self.content.as_ref(),
            };
        }
        if let Some(ref message) = self.error {
            return StateView::Error(message);
        }
        match self.content {
            Some(ref content) => StateView::Content(content),
            None => StateView::Empty,
        }
    }
}
