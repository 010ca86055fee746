//! Pure reducer and derived view.
//!
//! Nothing here performs IO or holds state. The store in `engine` owns the
//! single mutable instance and calls into these functions.

use atlas_core::{QueryError, Record};

use crate::command::{Command, Effect, Transition};
use crate::state::{Commit, Phase, QueryState};

// =============================================================================
// Matching
// =============================================================================

/// Records whose name starts with `query`, ignoring case, in dataset order.
///
/// An empty query matches everything.
pub fn prefix_matches(dataset: &[Record], query: &str) -> Vec<Record> {
    dataset
        .iter()
        .filter(|r| r.name_starts_with(query))
        .cloned()
        .collect()
}

/// Records whose name equals `name` exactly.
///
/// A filter rather than a lookup so duplicate names all come back.
pub fn exact_matches(dataset: &[Record], name: &str) -> Vec<Record> {
    dataset.iter().filter(|r| r.has_name(name)).cloned().collect()
}

/// Live suggestions for typed text. Empty text suggests nothing.
pub fn suggestions_for(dataset: &[Record], text: &str) -> Vec<Record> {
    if text.is_empty() {
        return Vec::new();
    }
    prefix_matches(dataset, text)
}

// =============================================================================
// Derived View
// =============================================================================

/// What the UI lists, recomputed on every change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedView {
    /// Suggestion dropdown.
    pub suggestions: Vec<Record>,

    /// Result list.
    pub results: Vec<Record>,
}

/// Derive the view from a dataset and a query state.
pub fn derive(dataset: &[Record], state: &QueryState) -> DerivedView {
    match state.phase {
        Phase::Browsing => DerivedView {
            suggestions: suggestions_for(dataset, &state.query),
            results: dataset.to_vec(),
        },
        Phase::Filtered(Commit::Prefix) => DerivedView {
            suggestions: Vec::new(),
            results: prefix_matches(dataset, &state.query),
        },
        Phase::Filtered(Commit::Exact) => DerivedView {
            suggestions: Vec::new(),
            results: exact_matches(dataset, &state.query),
        },
    }
}

// =============================================================================
// Transition
// =============================================================================

/// Apply one command to a state.
///
/// `Reset` leaves the state untouched and asks for a refetch; the state is
/// cleared only once that fetch succeeds.
pub fn transition(dataset: &[Record], state: &QueryState, command: Command) -> Transition {
    match command {
        Command::Input(text) => Transition::to(QueryState::browsing(text)),
        Command::SelectSuggestion(name) => {
            let known = dataset.iter().any(|r| r.has_name(&name));
            let next = Transition::to(QueryState::filtered(name.clone(), Commit::Exact));
            if known {
                next
            } else {
                next.with_warning(QueryError::InvalidSelection { name })
            }
        }
        Command::SearchCommit => {
            Transition::to(QueryState::filtered(state.query.clone(), Commit::Prefix))
        }
        Command::Reset => Transition::to(state.clone()).with_effect(Effect::Refetch),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Vec<Record> {
        vec![
            Record::new("France", "fr.png").with_capital("Paris"),
            Record::new("Germany", "de.png").with_capital("Berlin"),
            Record::new("Fiji", "fj.png").with_capital("Suva"),
        ]
    }

    fn names(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    fn apply(dataset: &[Record], state: &QueryState, command: Command) -> QueryState {
        transition(dataset, state, command).state
    }

    #[test]
    fn test_input_suggests_prefix_matches_in_order() {
        let data = dataset();
        let state = apply(&data, &QueryState::default(), Command::Input("F".into()));

        assert_eq!(state, QueryState::browsing("F"));
        let view = derive(&data, &state);
        assert_eq!(names(&view.suggestions), vec!["France", "Fiji"]);
        assert_eq!(view.results, data);
    }

    #[test]
    fn test_input_is_case_insensitive() {
        let data = dataset();
        let state = apply(&data, &QueryState::default(), Command::Input("gER".into()));
        assert_eq!(names(&derive(&data, &state).suggestions), vec!["Germany"]);
    }

    #[test]
    fn test_empty_input_suggests_nothing() {
        let data = dataset();
        let state = apply(&data, &QueryState::browsing("F"), Command::Input(String::new()));
        assert!(derive(&data, &state).suggestions.is_empty());
    }

    #[test]
    fn test_suggestions_are_prefix_only() {
        let data = dataset();
        // "ance" is inside "France" but not a prefix
        let state = apply(&data, &QueryState::default(), Command::Input("ance".into()));
        assert!(derive(&data, &state).suggestions.is_empty());
    }

    #[test]
    fn test_search_commit_filters_by_prefix() {
        let data = dataset();
        let state = apply(&data, &QueryState::browsing("f"), Command::SearchCommit);

        assert!(state.committed());
        assert_eq!(state.query, "f");
        let view = derive(&data, &state);
        assert!(view.suggestions.is_empty());
        assert_eq!(names(&view.results), vec!["France", "Fiji"]);
    }

    #[test]
    fn test_search_commit_multi_match() {
        let data = vec![
            Record::new("United States", ""),
            Record::new("Uganda", ""),
            Record::new("United Kingdom", ""),
        ];
        let state = apply(&data, &QueryState::browsing("United"), Command::SearchCommit);
        assert_eq!(
            names(&derive(&data, &state).results),
            vec!["United States", "United Kingdom"]
        );
    }

    #[test]
    fn test_search_commit_empty_query_returns_everything() {
        let data = dataset();
        let state = apply(&data, &QueryState::default(), Command::SearchCommit);
        assert!(state.show_reset());
        assert_eq!(derive(&data, &state).results, data);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let data = dataset();
        let typed = transition(&data, &QueryState::default(), Command::Input("zz".into()));
        assert!(typed.warning.is_none());
        assert!(derive(&data, &typed.state).suggestions.is_empty());

        let committed = transition(&data, &typed.state, Command::SearchCommit);
        assert!(committed.warning.is_none());
        assert!(derive(&data, &committed.state).results.is_empty());
    }

    #[test]
    fn test_select_suggestion_filters_exactly() {
        let data = dataset();
        let typed = apply(&data, &QueryState::default(), Command::Input("F".into()));
        let state = apply(&data, &typed, Command::SelectSuggestion("Fiji".into()));

        assert_eq!(state, QueryState::filtered("Fiji", Commit::Exact));
        let view = derive(&data, &state);
        assert!(view.suggestions.is_empty());
        assert_eq!(names(&view.results), vec!["Fiji"]);
        assert!(state.show_reset());
    }

    #[test]
    fn test_select_is_idempotent() {
        let data = dataset();
        let once = apply(&data, &QueryState::default(), Command::SelectSuggestion("France".into()));
        let twice = apply(&data, &once, Command::SelectSuggestion("France".into()));
        assert_eq!(once, twice);
        assert_eq!(derive(&data, &once), derive(&data, &twice));
    }

    #[test]
    fn test_select_returns_all_duplicates() {
        let data = vec![
            Record::new("Congo", "a.png"),
            Record::new("Chad", "td.png"),
            Record::new("Congo", "b.png"),
        ];
        let state = apply(&data, &QueryState::default(), Command::SelectSuggestion("Congo".into()));
        let results = derive(&data, &state).results;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].flag_url, "a.png");
        assert_eq!(results[1].flag_url, "b.png");
    }

    #[test]
    fn test_select_unknown_name_warns_and_matches_nothing() {
        let data = dataset();
        let result = transition(
            &data,
            &QueryState::default(),
            Command::SelectSuggestion("Atlantis".into()),
        );

        assert_eq!(
            result.warning,
            Some(QueryError::InvalidSelection {
                name: "Atlantis".into()
            })
        );
        assert!(result.effect.is_none());
        assert!(derive(&data, &result.state).results.is_empty());
    }

    #[test]
    fn test_select_is_case_sensitive() {
        let data = dataset();
        let result = transition(
            &data,
            &QueryState::default(),
            Command::SelectSuggestion("fiji".into()),
        );
        assert!(result.warning.is_some());
        assert!(derive(&data, &result.state).results.is_empty());
    }

    #[test]
    fn test_input_after_commit_returns_to_browsing() {
        let data = dataset();
        let committed = QueryState::filtered("Fiji", Commit::Exact);
        let state = apply(&data, &committed, Command::Input("Ge".into()));

        assert!(!state.committed());
        let view = derive(&data, &state);
        assert_eq!(names(&view.suggestions), vec!["Germany"]);
        assert_eq!(view.results, data);
    }

    #[test]
    fn test_reset_requests_refetch_without_touching_state() {
        let data = dataset();
        let committed = QueryState::filtered("F", Commit::Prefix);
        let result = transition(&data, &committed, Command::Reset);

        assert_eq!(result.effect, Some(Effect::Refetch));
        assert_eq!(result.state, committed);
    }

    #[test]
    fn test_empty_dataset() {
        let data: Vec<Record> = Vec::new();
        for state in [
            QueryState::browsing("F"),
            QueryState::filtered("", Commit::Prefix),
            QueryState::filtered("France", Commit::Exact),
        ] {
            assert_eq!(derive(&data, &state), DerivedView::default());
        }
    }

    #[test]
    fn test_suggestions_are_subset_with_matching_prefix() {
        let data = vec![
            Record::new("Åland Islands", ""),
            Record::new("Albania", ""),
            Record::new("Algeria", ""),
            Record::new("Andorra", ""),
            Record::new("Ålesund", ""),
        ];
        for query in ["", "a", "AL", "alg", "å", "Å", "x"] {
            let suggestions = suggestions_for(&data, query);
            if query.is_empty() {
                assert!(suggestions.is_empty());
            }
            for s in &suggestions {
                assert!(data.contains(s));
                assert!(s.name.to_lowercase().starts_with(&query.to_lowercase()));
            }
        }
        assert_eq!(suggestions_for(&data, "å").len(), 2);
    }
}
