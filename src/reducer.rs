//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, Readings};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Readings actions =====
        Action::ReadingsFetch => {
            state.readings = Readings::Loading;
            state.scroll = 0;
            state.tick_count = 0;
            DispatchResult::changed_with(Effect::FetchReadings)
        }

        // Results only land on a pending load; anything else is stale.
        Action::ReadingsDidLoad(locations) => {
            if !state.readings.is_loading() {
                return DispatchResult::unchanged();
            }
            state.readings = Readings::Loaded(locations);
            DispatchResult::changed()
        }

        Action::ReadingsDidError(message) => {
            if !state.readings.is_loading() {
                return DispatchResult::unchanged();
            }
            state.readings = Readings::Failed(message);
            DispatchResult::changed()
        }

        // ===== UI actions =====
        // Scroll is kept in grid rows; `rows` changes with the terminal width.
        Action::UiScrollDown { rows } => {
            let current = state.scroll.min(rows.saturating_sub(1));
            let next = (current + 1).min(rows.saturating_sub(1));
            set_scroll(state, next)
        }

        Action::UiScrollUp { rows } => {
            let current = state.scroll.min(rows.saturating_sub(1));
            set_scroll(state, current.saturating_sub(1))
        }

        Action::UiScrollTop => {
            if state.scroll > 0 {
                state.scroll = 0;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Global actions =====
        Action::Tick => {
            if state.readings.is_loading() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn set_scroll(state: &mut AppState, scroll: usize) -> DispatchResult<Effect> {
    if state.readings.is_loaded() && state.scroll != scroll {
        state.scroll = scroll;
        DispatchResult::changed()
    } else {
        DispatchResult::unchanged()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Location, Measurement};

    fn newark() -> Location {
        Location {
            name: "Newark".into(),
            measurements: vec![Measurement {
                parameter: "pm25".into(),
                value: 12.4,
                unit: "µg/m³".into(),
            }],
        }
    }

    #[test]
    fn test_fetch_sets_loading_and_requests() {
        let mut state = AppState {
            readings: Readings::Failed("boom".into()),
            scroll: 3,
            tick_count: 9,
            ..Default::default()
        };

        let result = reducer(&mut state, Action::ReadingsFetch);

        assert!(result.changed);
        assert!(state.readings.is_loading());
        assert_eq!(state.scroll, 0);
        assert_eq!(state.tick_count, 0);
        assert_eq!(result.effects.len(), 1);
        assert!(matches!(result.effects[0], Effect::FetchReadings));
    }

    #[test]
    fn test_did_load_replaces_data() {
        let mut state = AppState::default();
        reducer(&mut state, Action::ReadingsFetch);

        let result = reducer(&mut state, Action::ReadingsDidLoad(vec![newark()]));

        assert!(result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(state.readings, Readings::Loaded(vec![newark()]));
    }

    #[test]
    fn test_did_error_is_terminal() {
        let mut state = AppState::default();
        reducer(&mut state, Action::ReadingsFetch);

        let result = reducer(
            &mut state,
            Action::ReadingsDidError("HTTP error! status: 503".into()),
        );
        assert!(result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(state.readings.error(), Some("HTTP error! status: 503"));

        // A late success must not overwrite the failure
        let result = reducer(&mut state, Action::ReadingsDidLoad(vec![newark()]));
        assert!(!result.changed);
        assert!(state.readings.is_failed());
    }

    #[test]
    fn test_stale_error_after_load_is_ignored() {
        let mut state = AppState::default();
        reducer(&mut state, Action::ReadingsFetch);
        reducer(&mut state, Action::ReadingsDidLoad(vec![newark()]));

        let result = reducer(&mut state, Action::ReadingsDidError("late".into()));

        assert!(!result.changed);
        assert!(state.readings.is_loaded());
    }

    #[test]
    fn test_scroll_bounds() {
        let mut state = AppState {
            readings: Readings::Loaded(vec![newark(), newark()]),
            ..Default::default()
        };

        assert!(!reducer(&mut state, Action::UiScrollUp { rows: 2 }).changed);
        assert!(reducer(&mut state, Action::UiScrollDown { rows: 2 }).changed);
        assert_eq!(state.scroll, 1);
        assert!(!reducer(&mut state, Action::UiScrollDown { rows: 2 }).changed);
        assert!(reducer(&mut state, Action::UiScrollTop).changed);
        assert_eq!(state.scroll, 0);
    }

    #[test]
    fn test_scroll_stops_at_last_row_not_last_location() {
        // 9 locations in 3 columns: 3 rows
        let mut state = AppState {
            readings: Readings::Loaded(vec![newark(); 9]),
            ..Default::default()
        };

        let changed = (0..20)
            .filter(|_| reducer(&mut state, Action::UiScrollDown { rows: 3 }).changed)
            .count();
        assert_eq!(changed, 2);
        assert_eq!(state.scroll, 2);

        assert!(reducer(&mut state, Action::UiScrollUp { rows: 3 }).changed);
        assert_eq!(state.scroll, 1);
    }

    #[test]
    fn test_scroll_up_after_widening_moves_immediately() {
        // Scrolled to row 5 in one column, then a wider terminal left only 3 rows
        let mut state = AppState {
            readings: Readings::Loaded(vec![newark(); 9]),
            scroll: 5,
            ..Default::default()
        };

        assert!(reducer(&mut state, Action::UiScrollUp { rows: 3 }).changed);
        assert_eq!(state.scroll, 1);
    }

    #[test]
    fn test_scroll_ignored_while_loading() {
        let mut state = AppState::default();
        assert!(!reducer(&mut state, Action::UiScrollDown { rows: 4 }).changed);
        assert_eq!(state.scroll, 0);
    }

    #[test]
    fn test_tick_only_animates_while_loading() {
        let mut state = AppState::default();
        assert!(reducer(&mut state, Action::Tick).changed);
        assert_eq!(state.tick_count, 1);

        state.readings = Readings::Loaded(Vec::new());
        assert!(!reducer(&mut state, Action::Tick).changed);
        assert_eq!(state.tick_count, 1);
    }
}
