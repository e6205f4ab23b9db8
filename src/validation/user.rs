use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::config::SecureString;
use crate::model::User;
use crate::validation::{check_name, insert_if, ErrorMap, FieldError};

const MIN_NAME_LEN: usize = 2;
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UserField {
    Nombre,
    Apellido,
    Username,
    Email,
    Password,
    ConfirmPassword,
    Roles,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewUserForm {
    pub nombre: String,
    pub apellido: String,
    pub username: String,
    pub email: String,
    pub password: SecureString,
    pub confirm_password: SecureString,
    /// Canonical role tags.
    pub roles: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditUserForm {
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub roles: BTreeSet<String>,
}

impl EditUserForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            nombre: user.nombre.clone(),
            apellido: user.apellido.clone(),
            email: user.email.clone(),
            roles: user.roles.clone(),
        }
    }
}

fn username_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9._-]{3,20}$").expect("valid username regex"))
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
    })
}

fn check_email<'a>(
    email: &str,
    mut others: impl Iterator<Item = &'a User>,
) -> Option<FieldError> {
    let email = email.trim();
    if email.is_empty() {
        Some(FieldError::Required)
    } else if !email_re().is_match(email) {
        Some(FieldError::InvalidEmail)
    } else if others.any(|u| u.email.eq_ignore_ascii_case(email)) {
        Some(FieldError::DuplicateEmail)
    } else {
        None
    }
}

pub fn validate_new_user(form: &NewUserForm, existing: &[User]) -> ErrorMap<UserField> {
    let mut errors = ErrorMap::new();

    insert_if(&mut errors, UserField::Nombre, check_name(&form.nombre, MIN_NAME_LEN));
    insert_if(&mut errors, UserField::Apellido, check_name(&form.apellido, MIN_NAME_LEN));

    let username = form.username.trim();
    let username_error = if username.is_empty() {
        Some(FieldError::Required)
    } else if !username_re().is_match(username) {
        Some(FieldError::InvalidUsername)
    } else if existing
        .iter()
        .any(|u| u.username.eq_ignore_ascii_case(username))
    {
        Some(FieldError::DuplicateUsername)
    } else {
        None
    };
    insert_if(&mut errors, UserField::Username, username_error);

    insert_if(&mut errors, UserField::Email, check_email(&form.email, existing.iter()));

    let password = form.password.expose();
    let password_error = if password.is_empty() {
        Some(FieldError::Required)
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        Some(FieldError::TooShort {
            min: MIN_PASSWORD_LEN,
        })
    } else {
        None
    };
    insert_if(&mut errors, UserField::Password, password_error);

    let confirm_error = if form.confirm_password.is_empty() {
        Some(FieldError::Required)
    } else if form.confirm_password != form.password {
        Some(FieldError::PasswordMismatch)
    } else {
        None
    };
    insert_if(&mut errors, UserField::ConfirmPassword, confirm_error);

    if form.roles.is_empty() {
        errors.insert(UserField::Roles, FieldError::NoRoleSelected);
    }

    errors
}

/// Validates an edit of `user_id`; its own email is not a duplicate.
pub fn validate_edit_user(
    form: &EditUserForm,
    user_id: i64,
    existing: &[User],
) -> ErrorMap<UserField> {
    let mut errors = ErrorMap::new();

    insert_if(&mut errors, UserField::Nombre, check_name(&form.nombre, MIN_NAME_LEN));
    insert_if(&mut errors, UserField::Apellido, check_name(&form.apellido, MIN_NAME_LEN));
    insert_if(
        &mut errors,
        UserField::Email,
        check_email(&form.email, existing.iter().filter(|u| u.id != user_id)),
    );
    if form.roles.is_empty() {
        errors.insert(UserField::Roles, FieldError::NoRoleSelected);
    }

    errors
}

pub fn has_changes(form: &EditUserForm, original: &User) -> bool {
    form.nombre.trim() != original.nombre
        || form.apellido.trim() != original.apellido
        || !form.email.trim().eq_ignore_ascii_case(&original.email)
        || form.roles != original.roles
}
