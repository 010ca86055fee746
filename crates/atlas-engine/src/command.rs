//! Commands sent by the rendering layer and the effects they request.

use atlas_core::QueryError;

use crate::state::QueryState;

/// A user event. The rendering layer sends nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// The query text changed.
    Input(String),

    /// A suggestion was picked by name.
    SelectSuggestion(String),

    /// Search button or Enter.
    SearchCommit,

    /// Restore the unfiltered list by fetching it again.
    Reset,
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the full dataset again. State is cleared when it completes.
    Refetch,
}

/// Result of applying one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// State after the command.
    pub state: QueryState,

    /// Effect for the caller to perform, if any.
    pub effect: Option<Effect>,

    /// Non-fatal problem noticed while applying the command.
    pub warning: Option<QueryError>,
}

impl Transition {
    pub(crate) fn to(state: QueryState) -> Self {
        Self {
            state,
            effect: None,
            warning: None,
        }
    }

    pub(crate) fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }

    pub(crate) fn with_warning(mut self, warning: QueryError) -> Self {
        self.warning = Some(warning);
        self
    }
}
