use chrono::NaiveDate;

use crate::model::Movement;
use crate::screens::movements::state::MovementTypeFilter;
use crate::state::Intent;

#[derive(Debug, Clone)]
pub enum MovementsIntent {
    LoadStarted,
    Loaded {
        items: Vec<Movement>,
        rejected_rows: usize,
    },
    LoadFailed(String),
    QueryTyped(String),
    SearchCommitted(String),
    TypeFilterSelected(MovementTypeFilter),
    DateRangeSelected(Option<NaiveDate>, Option<NaiveDate>),
    FiltersCleared,
    /// A movement confirmed by the server elsewhere (new-movement form).
    Inserted(Movement),
}

impl Intent for MovementsIntent {}
