use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

/// Actor label used when the backend sends no user.
pub const DEFAULT_ACTOR: &str = "Sistema";
/// Product code label used when the backend sends none.
pub const DEFAULT_PRODUCT_CODE: &str = "N/A";
/// Product name label used when the backend sends none.
pub const DEFAULT_PRODUCT_NAME: &str = "Producto desconocido";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MovementType {
    Entrada,
    Salida,
}

impl MovementType {
    /// Wire spelling expected by the backend.
    pub fn as_wire(&self) -> &'static str {
        match self {
            MovementType::Entrada => "ENTRADA",
            MovementType::Salida => "SALIDA",
        }
    }

    /// Case-insensitive parse of the wire spelling. Anything else is `None`.
    pub fn from_wire(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("ENTRADA") {
            Some(MovementType::Entrada)
        } else if value.eq_ignore_ascii_case("SALIDA") {
            Some(MovementType::Salida)
        } else {
            None
        }
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_wire())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRef {
    pub id: i64,
    pub code: String,
    pub name: String,
}

/// A stock movement. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movement {
    pub id: i64,
    pub timestamp: NaiveDateTime,
    pub actor: String,
    pub product: ProductRef,
    pub quantity: u32,
    pub kind: MovementType,
    pub description: Option<String>,
    pub receipt_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_type_parses_case_insensitively() {
        assert_eq!(MovementType::from_wire("ENTRADA"), Some(MovementType::Entrada));
        assert_eq!(MovementType::from_wire("salida"), Some(MovementType::Salida));
        assert_eq!(MovementType::from_wire("Salida"), Some(MovementType::Salida));
        assert_eq!(MovementType::from_wire("AJUSTE"), None);
        assert_eq!(MovementType::from_wire(""), None);
    }

    #[test]
    fn movement_type_wire_spelling() {
        assert_eq!(MovementType::Salida.to_string(), "SALIDA");
    }
}
