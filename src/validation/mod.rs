//! Form validators.
//!
//! Validators are pure and total: every field is checked on every call and
//! the result is a complete map from offending field to error. A form is
//! submittable iff its map is empty.

mod movement;
mod product;
mod user;

use std::collections::BTreeMap;

use thiserror::Error;

pub use movement::{validate_movement, MovementField, MovementForm, ValidatedMovement};
pub use product::{normalize_code, validate_product, ProductField, ProductForm, ValidatedProduct};
pub use user::{
    has_changes, validate_edit_user, validate_new_user, EditUserForm, NewUserForm, UserField,
};

pub type ErrorMap<F> = BTreeMap<F, FieldError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Este campo es obligatorio")]
    Required,

    #[error("Debe tener al menos {min} caracteres")]
    TooShort { min: usize },

    #[error("El formato debe ser AAAA-123")]
    InvalidCodeFormat,

    #[error("El código ya existe")]
    DuplicateCode,

    #[error("Debe ser un número válido")]
    InvalidNumber,

    #[error("No puede ser negativo")]
    Negative,

    #[error("Ingresa una cantidad válida")]
    NotPositive,

    #[error("Stock insuficiente (disponible: {available})")]
    InsufficientStock { available: u32 },

    #[error("Selecciona una opción")]
    NotSelected,

    #[error("Usuario debe tener 3-20 caracteres (letras, números, . _ -)")]
    InvalidUsername,

    #[error("Este nombre de usuario ya existe")]
    DuplicateUsername,

    #[error("Formato de correo inválido")]
    InvalidEmail,

    #[error("Este correo ya está registrado")]
    DuplicateEmail,

    #[error("Las contraseñas no coinciden")]
    PasswordMismatch,

    #[error("Debe seleccionar al menos un rol")]
    NoRoleSelected,
}

/// Required + minimum length on the trimmed value.
fn check_name(value: &str, min: usize) -> Option<FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Some(FieldError::Required)
    } else if trimmed.chars().count() < min {
        Some(FieldError::TooShort { min })
    } else {
        None
    }
}

fn insert_if<F: Ord>(errors: &mut ErrorMap<F>, field: F, error: Option<FieldError>) {
    if let Some(error) = error {
        errors.insert(field, error);
    }
}
