use chrono::NaiveDate;

use crate::model::{Movement, MovementType};
use crate::screens::movements::state::{MovementCriteria, MovementKpis};

pub fn filter_movements(items: &[Movement], criteria: &MovementCriteria) -> Vec<Movement> {
    let needle = criteria.search.trim().to_lowercase();
    items
        .iter()
        .filter(|m| {
            needle.is_empty()
                || m.product.code.to_lowercase().contains(&needle)
                || m.product.name.to_lowercase().contains(&needle)
                || m.actor.to_lowercase().contains(&needle)
        })
        .filter(|m| criteria.kind.matches(m.kind))
        .filter(|m| in_range(m.timestamp.date(), criteria.date_range))
        .cloned()
        .collect()
}

fn in_range(day: NaiveDate, range: (Option<NaiveDate>, Option<NaiveDate>)) -> bool {
    match range {
        (Some(start), Some(end)) => start <= day && day <= end,
        (Some(only), None) | (None, Some(only)) => day == only,
        (None, None) => true,
    }
}

/// Newest first; equal timestamps keep their relative order.
pub fn sort_newest_first(items: &mut [Movement]) {
    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

pub fn kpis(items: &[Movement]) -> MovementKpis {
    let entradas = items
        .iter()
        .filter(|m| m.kind == MovementType::Entrada)
        .count();
    MovementKpis {
        total: items.len(),
        entradas,
        salidas: items.len() - entradas,
    }
}
