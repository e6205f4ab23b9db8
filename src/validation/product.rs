use std::sync::OnceLock;

use regex::Regex;

use crate::model::Product;
use crate::validation::{insert_if, ErrorMap, FieldError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProductField {
    Code,
    Name,
    Category,
    Price,
    Stock,
}

impl ProductField {
    /// Form key as the backend and UI name it.
    pub fn key(&self) -> &'static str {
        match self {
            ProductField::Code => "codigo",
            ProductField::Name => "nombre",
            ProductField::Category => "categoria",
            ProductField::Price => "precio",
            ProductField::Stock => "stock",
        }
    }
}

/// Raw text of the add/edit product form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub code: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: String,
    pub stock: String,
}

/// Parsed values of a form that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedProduct {
    pub code: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub stock: u32,
}

fn code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z]{4}-\d{3}$").expect("valid product code regex"))
}

/// Codes are typed in any case and stored upper-cased.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Validates the form against the loaded products.
///
/// In edit mode `original_code` is the code being edited; keeping it
/// unchanged is not a duplicate.
pub fn validate_product(
    form: &ProductForm,
    existing: &[Product],
    original_code: Option<&str>,
) -> Result<ValidatedProduct, ErrorMap<ProductField>> {
    let mut errors = ErrorMap::new();

    let code = normalize_code(&form.code);
    let code_error = if code.is_empty() {
        Some(FieldError::Required)
    } else if !code_re().is_match(&code) {
        Some(FieldError::InvalidCodeFormat)
    } else if original_code != Some(code.as_str()) && existing.iter().any(|p| p.code == code) {
        Some(FieldError::DuplicateCode)
    } else {
        None
    };
    insert_if(&mut errors, ProductField::Code, code_error);

    if form.name.trim().is_empty() {
        errors.insert(ProductField::Name, FieldError::Required);
    }
    if form.category.trim().is_empty() {
        errors.insert(ProductField::Category, FieldError::Required);
    }

    let price = match form.price.trim() {
        "" => Err(FieldError::Required),
        raw => match raw.replace(',', ".").parse::<f64>() {
            Ok(value) if !value.is_finite() => Err(FieldError::InvalidNumber),
            Ok(value) if value < 0.0 => Err(FieldError::Negative),
            Ok(value) => Ok(value),
            Err(_) => Err(FieldError::InvalidNumber),
        },
    };
    if let Err(error) = &price {
        errors.insert(ProductField::Price, error.clone());
    }

    let stock = match form.stock.trim() {
        "" => Err(FieldError::Required),
        raw => match raw.parse::<i64>() {
            Ok(value) if value < 0 => Err(FieldError::Negative),
            Ok(value) => u32::try_from(value).map_err(|_| FieldError::InvalidNumber),
            Err(_) => Err(FieldError::InvalidNumber),
        },
    };
    if let Err(error) = &stock {
        errors.insert(ProductField::Stock, error.clone());
    }

    match (price, stock) {
        (Ok(price), Ok(stock)) if errors.is_empty() => Ok(ValidatedProduct {
            code,
            name: form.name.trim().to_string(),
            category: form.category.trim().to_string(),
            description: form.description.trim().to_string(),
            price,
            stock,
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(code: &str) -> Product {
        Product {
            id: 1,
            code: code.into(),
            name: "Broca".into(),
            category: "Herramientas".into(),
            category_id: None,
            description: String::new(),
            price: 100.0,
            stock: 4,
            active: true,
        }
    }

    fn form(code: &str) -> ProductForm {
        ProductForm {
            code: code.into(),
            name: "Broca 6mm".into(),
            category: "Herramientas".into(),
            description: String::new(),
            price: "1200".into(),
            stock: "10".into(),
        }
    }

    #[test]
    fn code_format_boundaries() {
        assert!(code_re().is_match("ABCD-123"));
        for bad in ["abcd-123", "ABCD-12", "AB-123", "ABCD123", "ABCDE-123"] {
            assert!(!code_re().is_match(bad), "{} should not match", bad);
        }
    }

    #[test]
    fn lowercase_input_is_normalized_before_matching() {
        let validated = validate_product(&form("hcor-005"), &[], None).unwrap();
        assert_eq!(validated.code, "HCOR-005");
    }

    #[test]
    fn valid_form_parses_values() {
        let validated = validate_product(&form("HCOR-005"), &[product("HCOR-001")], None).unwrap();
        assert_eq!(validated.price, 1200.0);
        assert_eq!(validated.stock, 10);
    }

    #[test]
    fn duplicate_code_rejected_unless_original() {
        let existing = [product("HCOR-001")];
        let errors = validate_product(&form("HCOR-001"), &existing, None).unwrap_err();
        assert_eq!(errors.get(&ProductField::Code), Some(&FieldError::DuplicateCode));

        assert!(validate_product(&form("HCOR-001"), &existing, Some("HCOR-001")).is_ok());
    }

    #[test]
    fn every_field_reported_at_once() {
        let errors = validate_product(&ProductForm::default(), &[], None).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.values().all(|e| *e == FieldError::Required));
    }

    #[test]
    fn numeric_ranges() {
        let mut bad = form("HCOR-005");
        bad.price = "-1".into();
        bad.stock = "dos".into();
        let errors = validate_product(&bad, &[], None).unwrap_err();
        assert_eq!(errors.get(&ProductField::Price), Some(&FieldError::Negative));
        assert_eq!(errors.get(&ProductField::Stock), Some(&FieldError::InvalidNumber));
        assert_eq!(errors.len(), 2);

        let mut decimal_comma = form("HCOR-005");
        decimal_comma.price = "1200,50".into();
        assert_eq!(
            validate_product(&decimal_comma, &[], None).unwrap().price,
            1200.5
        );
    }

    #[test]
    fn field_keys() {
        assert_eq!(ProductField::Code.key(), "codigo");
        assert_eq!(ProductField::Price.key(), "precio");
    }
}
