use crate::model::{MovementType, Product};
use crate::validation::{ErrorMap, FieldError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MovementField {
    Kind,
    Product,
    Quantity,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovementForm {
    pub kind: Option<MovementType>,
    /// Backend id of the selected product.
    pub product_id: Option<i64>,
    pub quantity: String,
    pub description: String,
}

/// A movement ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedMovement {
    pub kind: MovementType,
    pub product_id: i64,
    pub quantity: u32,
    pub description: Option<String>,
}

/// Validates a new movement against the selectable products.
///
/// A SALIDA may not take more than the selected product's stock.
pub fn validate_movement(
    form: &MovementForm,
    products: &[Product],
) -> Result<ValidatedMovement, ErrorMap<MovementField>> {
    let mut errors = ErrorMap::new();

    if form.kind.is_none() {
        errors.insert(MovementField::Kind, FieldError::NotSelected);
    }

    let product = form
        .product_id
        .and_then(|id| products.iter().find(|p| p.id == id));
    if product.is_none() {
        errors.insert(MovementField::Product, FieldError::NotSelected);
    }

    let quantity = match form.quantity.trim().parse::<u32>() {
        Ok(q) if q > 0 => Some(q),
        _ => {
            errors.insert(MovementField::Quantity, FieldError::NotPositive);
            None
        }
    };

    if let (Some(MovementType::Salida), Some(product), Some(q)) = (form.kind, product, quantity) {
        if q > product.stock {
            errors.insert(
                MovementField::Quantity,
                FieldError::InsufficientStock {
                    available: product.stock,
                },
            );
        }
    }

    match (form.kind, product, quantity) {
        (Some(kind), Some(product), Some(quantity)) if errors.is_empty() => Ok(ValidatedMovement {
            kind,
            product_id: product.id,
            quantity,
            description: Some(form.description.trim().to_string()).filter(|d| !d.is_empty()),
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, stock: u32) -> Product {
        Product {
            id,
            code: "HCOR-001".into(),
            name: "Broca".into(),
            category: "Herramientas".into(),
            category_id: None,
            description: String::new(),
            price: 0.0,
            stock,
            active: true,
        }
    }

    fn form(kind: MovementType, quantity: &str) -> MovementForm {
        MovementForm {
            kind: Some(kind),
            product_id: Some(1),
            quantity: quantity.into(),
            description: String::new(),
        }
    }

    #[test]
    fn salida_over_stock_reports_available() {
        let errors = validate_movement(&form(MovementType::Salida, "100"), &[product(1, 12)])
            .unwrap_err();
        assert_eq!(
            errors.get(&MovementField::Quantity),
            Some(&FieldError::InsufficientStock { available: 12 })
        );
        assert_eq!(
            errors[&MovementField::Quantity].to_string(),
            "Stock insuficiente (disponible: 12)"
        );
    }

    #[test]
    fn entrada_ignores_stock() {
        let validated =
            validate_movement(&form(MovementType::Entrada, "100"), &[product(1, 12)]).unwrap();
        assert_eq!(validated.quantity, 100);
        assert_eq!(validated.description, None);
    }

    #[test]
    fn salida_equal_to_stock_is_allowed() {
        assert!(validate_movement(&form(MovementType::Salida, "12"), &[product(1, 12)]).is_ok());
    }

    #[test]
    fn empty_form_reports_every_field() {
        let errors = validate_movement(&MovementForm::default(), &[]).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn zero_and_garbage_quantities_rejected() {
        for raw in ["0", "-3", "tres", ""] {
            let errors =
                validate_movement(&form(MovementType::Entrada, raw), &[product(1, 5)]).unwrap_err();
            assert_eq!(errors.get(&MovementField::Quantity), Some(&FieldError::NotPositive));
        }
    }
}
