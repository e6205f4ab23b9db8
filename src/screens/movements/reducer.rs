use crate::screens::movements::filter::{filter_movements, kpis, sort_newest_first};
use crate::screens::movements::intent::MovementsIntent;
use crate::screens::movements::state::{MovementCriteria, MovementsState};
use crate::state::{FetchState, Reducer};

pub struct MovementsReducer;

impl Reducer for MovementsReducer {
    type State = MovementsState;
    type Intent = MovementsIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            MovementsIntent::LoadStarted => {
                state.fetch = FetchState::Loading;
                return state;
            }
            MovementsIntent::Loaded {
                mut items,
                rejected_rows,
            } => {
                sort_newest_first(&mut items);
                state.fetch = FetchState::Loaded;
                state.items = items;
                state.rejected_rows = rejected_rows;
            }
            MovementsIntent::LoadFailed(message) => {
                state.fetch = FetchState::Failed(message);
                return state;
            }
            MovementsIntent::QueryTyped(text) => {
                state.query_input = text;
                return state;
            }
            MovementsIntent::SearchCommitted(text) => state.criteria.search = text,
            MovementsIntent::TypeFilterSelected(kind) => state.criteria.kind = kind,
            MovementsIntent::DateRangeSelected(start, end) => {
                state.criteria.date_range = (start, end);
            }
            MovementsIntent::FiltersCleared => {
                state.query_input.clear();
                state.criteria = MovementCriteria::default();
            }
            MovementsIntent::Inserted(movement) => {
                if state.items.iter().any(|m| m.id == movement.id) {
                    return state;
                }
                state.items.insert(0, movement);
                sort_newest_first(&mut state.items);
            }
        }

        state.kpis = kpis(&state.items);
        state.view = filter_movements(&state.items, &state.criteria);
        state
    }
}
