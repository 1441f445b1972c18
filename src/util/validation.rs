//! Field validation shared by the user forms.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

pub const MIN_NAME_LEN: usize = 2;
pub const MAX_BIO_LEN: usize = 500;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 100;

/// One failed field and its message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

pub fn check_name(name: &str) -> Option<FieldError> {
    (name.trim().chars().count() < MIN_NAME_LEN)
        .then(|| FieldError::new("name", "Name must be at least 2 characters"))
}

/// Structural check only: one `@`, a non-empty local part and a dotted
/// domain without empty labels.
pub fn check_email(email: &str) -> Option<FieldError> {
    let invalid = Some(FieldError::new("email", "Invalid email address"));
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return invalid;
    };
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return invalid;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return invalid;
    }
    None
}

pub fn check_password(password: &str) -> Option<FieldError> {
    (password.chars().count() < MIN_PASSWORD_LEN)
        .then(|| FieldError::new("password", "Password must be at least 6 characters"))
}

pub fn check_bio(bio: &str) -> Option<FieldError> {
    (bio.chars().count() > MAX_BIO_LEN).then(|| FieldError::new("bio", "Bio must be less than 500 characters"))
}

/// Parse and range-check an age field.
pub fn check_age(raw: &str) -> Result<u32, FieldError> {
    let age: u32 = raw
        .trim()
        .parse()
        .map_err(|_| FieldError::new("age", "Age must be a number"))?;
    if age < MIN_AGE {
        return Err(FieldError::new("age", "Must be at least 18 years old"));
    }
    if age > MAX_AGE {
        return Err(FieldError::new("age", "Must be less than 100 years old"));
    }
    Ok(age)
}
