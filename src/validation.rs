//! Registration schema: per-field rules evaluated against a draft
//!
//! Every field is checked on each pass so a single submit reports all
//! problems at once. Within a field, rules run in order and the first
//! failure is the one reported.

use crate::state::{FieldId, FormData, GENDERS};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// WHATWG `input[type=email]` syntax
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("Invalid regex pattern for email")
});

/// Leading decimal literal, the part of the input a lenient float parse consumes
static NUMBER_PREFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|[0-9]+\.?[0-9]*(?:[eE][+-]?[0-9]+)?|\.[0-9]+(?:[eE][+-]?[0-9]+)?)")
        .expect("Invalid regex pattern for number prefix")
});

/// Characters that satisfy the password's special-character rule
pub const PASSWORD_SPECIALS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Character classes a password must contain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Lowercase,
    Uppercase,
    Digit,
    Special,
}

impl CharClass {
    const ALL: [CharClass; 4] = [
        CharClass::Lowercase,
        CharClass::Uppercase,
        CharClass::Digit,
        CharClass::Special,
    ];

    fn matches(self, c: char) -> bool {
        match self {
            Self::Lowercase => c.is_ascii_lowercase(),
            Self::Uppercase => c.is_ascii_uppercase(),
            Self::Digit => c.is_ascii_digit(),
            Self::Special => PASSWORD_SPECIALS.contains(c),
        }
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lowercase => "lowercase letter",
            Self::Uppercase => "uppercase letter",
            Self::Digit => "number",
            Self::Special => "special character",
        })
    }
}

/// A single rule violation. `Display` is the message shown under the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{}", required_message(.0))]
    Required(FieldId),
    #[error("First character must be uppercase")]
    NotCapitalized,
    #[error("Age must be a number")]
    NotANumber,
    #[error("Age must be a whole number")]
    NotWholeNumber,
    #[error("Age must be a non-negative value")]
    Negative,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password must contain at least one {0}")]
    MissingCharClass(CharClass),
    #[error("Passwords must match")]
    PasswordMismatch,
    #[error("Gender must be male or female")]
    UnknownGender,
    #[error("You must accept the terms and conditions")]
    TermsNotAccepted,
}

fn required_message(field: &FieldId) -> &'static str {
    match field {
        FieldId::Name => "Name is required",
        FieldId::Age => "Age is required",
        FieldId::Email => "Email is required",
        FieldId::Password => "Password is required",
        FieldId::ConfirmPassword => "Confirm password is required",
        FieldId::Gender => "Gender is required",
        FieldId::Terms => "You must accept the terms and conditions",
        FieldId::Picture => "Image is required",
        FieldId::Country => "Country is required",
        FieldId::CountrySelect => "Country selection is required",
    }
}

/// Per-field failures from one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<FieldId, FieldError>);

impl ValidationErrors {
    pub fn get(&self, field: FieldId) -> Option<&FieldError> {
        self.0.get(&field)
    }

    /// Message for `field`, if it failed
    pub fn message(&self, field: FieldId) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Outcome of validating a draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid(ValidationErrors),
}

type Rule = fn(&FormData) -> Result<(), FieldError>;

/// The registration schema, one rule chain per field
const SCHEMA: &[(FieldId, Rule)] = &[
    (FieldId::Name, check_name),
    (FieldId::Age, check_age),
    (FieldId::Email, check_email),
    (FieldId::Password, check_password),
    (FieldId::ConfirmPassword, check_confirm_password),
    (FieldId::Gender, check_gender),
    (FieldId::Terms, check_terms),
    (FieldId::Picture, check_picture),
    (FieldId::Country, check_country),
    (FieldId::CountrySelect, check_country_select),
];

/// Evaluate every field of `data`
pub fn validate(data: &FormData) -> Validation {
    let errors = ValidationErrors(
        SCHEMA
            .iter()
            .filter_map(|(field, rule)| rule(data).err().map(|e| (*field, e)))
            .collect(),
    );

    if errors.is_empty() {
        Validation::Valid
    } else {
        tracing::debug!(fields = ?errors.fields().collect::<Vec<_>>(), "Validation failed");
        Validation::Invalid(errors)
    }
}

fn required(field: FieldId, value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        Err(FieldError::Required(field))
    } else {
        Ok(())
    }
}

/// Lenient float parse: reads the longest numeric prefix after leading
/// whitespace and ignores whatever follows.
pub fn parse_leading_number(value: &str) -> Option<f64> {
    let m = NUMBER_PREFIX_REGEX.find(value.trim_start())?;
    m.as_str().parse().ok()
}

fn check_name(data: &FormData) -> Result<(), FieldError> {
    required(FieldId::Name, &data.name)?;
    match data.name.chars().next() {
        Some(c) if c.is_ascii_uppercase() => Ok(()),
        _ => Err(FieldError::NotCapitalized),
    }
}

fn check_age(data: &FormData) -> Result<(), FieldError> {
    required(FieldId::Age, &data.age)?;
    let age = parse_leading_number(&data.age).ok_or(FieldError::NotANumber)?;
    if !age.is_finite() || age.fract() != 0.0 {
        return Err(FieldError::NotWholeNumber);
    }
    if age < 0.0 {
        return Err(FieldError::Negative);
    }
    Ok(())
}

fn check_email(data: &FormData) -> Result<(), FieldError> {
    required(FieldId::Email, &data.email)?;
    if EMAIL_REGEX.is_match(&data.email) {
        Ok(())
    } else {
        Err(FieldError::InvalidEmail)
    }
}

fn check_password(data: &FormData) -> Result<(), FieldError> {
    required(FieldId::Password, &data.password)?;
    for class in CharClass::ALL {
        if !data.password.chars().any(|c| class.matches(c)) {
            return Err(FieldError::MissingCharClass(class));
        }
    }
    Ok(())
}

fn check_confirm_password(data: &FormData) -> Result<(), FieldError> {
    required(FieldId::ConfirmPassword, &data.confirm_password)?;
    if data.confirm_password == data.password {
        Ok(())
    } else {
        Err(FieldError::PasswordMismatch)
    }
}

fn check_gender(data: &FormData) -> Result<(), FieldError> {
    required(FieldId::Gender, &data.gender)?;
    if GENDERS.contains(&data.gender.as_str()) {
        Ok(())
    } else {
        Err(FieldError::UnknownGender)
    }
}

fn check_terms(data: &FormData) -> Result<(), FieldError> {
    if data.terms {
        Ok(())
    } else {
        Err(FieldError::TermsNotAccepted)
    }
}

fn check_picture(data: &FormData) -> Result<(), FieldError> {
    required(FieldId::Picture, &data.picture)
}

fn check_country(data: &FormData) -> Result<(), FieldError> {
    if data.country.is_empty() {
        Err(FieldError::Required(FieldId::Country))
    } else {
        Ok(())
    }
}

fn check_country_select(data: &FormData) -> Result<(), FieldError> {
    required(FieldId::CountrySelect, &data.country_select)
}
