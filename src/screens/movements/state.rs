use chrono::NaiveDate;

use crate::model::{Movement, MovementType};
use crate::state::{FetchState, UiState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementTypeFilter {
    #[default]
    All,
    Entrada,
    Salida,
}

impl MovementTypeFilter {
    pub fn matches(&self, kind: MovementType) -> bool {
        match self {
            MovementTypeFilter::All => true,
            MovementTypeFilter::Entrada => kind == MovementType::Entrada,
            MovementTypeFilter::Salida => kind == MovementType::Salida,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MovementCriteria {
    /// Committed search text; matches product code, product name or actor.
    pub search: String,
    pub kind: MovementTypeFilter,
    /// Both bounds: inclusive range. One bound: that exact day.
    pub date_range: (Option<NaiveDate>, Option<NaiveDate>),
}

impl MovementCriteria {
    pub fn is_active(&self) -> bool {
        !self.search.is_empty()
            || self.kind != MovementTypeFilter::All
            || self.date_range != (None, None)
    }
}

/// Counters over the full movement list, not the filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MovementKpis {
    pub total: usize,
    pub entradas: usize,
    pub salidas: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MovementsState {
    pub fetch: FetchState,
    /// Confirmed movements, newest first.
    pub items: Vec<Movement>,
    /// Rows of the last fetch dropped by the mapper.
    pub rejected_rows: usize,
    pub query_input: String,
    pub criteria: MovementCriteria,
    pub view: Vec<Movement>,
    pub kpis: MovementKpis,
}

impl UiState for MovementsState {}
