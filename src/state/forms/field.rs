//! Form field identifiers and edit operations

use std::fmt;

/// How a field is edited and rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Text rendered masked
    Secret,
    Radio,
    Checkbox,
    /// Path prompt that uploads on Enter
    File,
    Select,
}

/// Identifies one field of the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    Name,
    Age,
    Email,
    Password,
    ConfirmPassword,
    Gender,
    Terms,
    Picture,
    Country,
    CountrySelect,
}

impl FieldId {
    /// Focusable fields in display order. `Country` is the option list behind
    /// `CountrySelect` and has no input of its own.
    pub const INPUTS: [FieldId; 9] = [
        FieldId::Name,
        FieldId::Age,
        FieldId::Email,
        FieldId::Password,
        FieldId::ConfirmPassword,
        FieldId::Gender,
        FieldId::Terms,
        FieldId::Picture,
        FieldId::CountrySelect,
    ];

    /// Record key, as serialized
    pub fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Age => "age",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
            Self::Gender => "gender",
            Self::Terms => "terms",
            Self::Picture => "picture",
            Self::Country => "country",
            Self::CountrySelect => "countrySelect",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Age => "Age",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::ConfirmPassword => "Repeat password",
            Self::Gender => "Gender",
            Self::Terms => "Terms and Conditions agreement",
            Self::Picture => "Upload picture (path, Enter to load)",
            Self::Country => "Countries",
            Self::CountrySelect => "Choose a country",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Self::Name | Self::Age | Self::Email => FieldKind::Text,
            Self::Password | Self::ConfirmPassword => FieldKind::Secret,
            Self::Gender => FieldKind::Radio,
            Self::Terms => FieldKind::Checkbox,
            Self::Picture => FieldKind::File,
            Self::Country | Self::CountrySelect => FieldKind::Select,
        }
    }

    /// Whether typed characters edit this field directly
    pub fn accepts_text(self) -> bool {
        matches!(self.kind(), FieldKind::Text | FieldKind::Secret)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Direction for cycling radio and select options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    Next,
    Prev,
}

/// A single-field change to the draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    /// Append a character to a text field
    Push(FieldId, char),
    /// Remove the last character of a text field
    Pop(FieldId),
    /// Cycle the gender radio
    CycleGender(Cycle),
    /// Set the terms checkbox
    Terms(bool),
    /// Cycle through the country list
    CycleCountry(Cycle),
    /// Replace the decoded picture
    Picture(String),
}

/// Step `current` through `options`, wrapping at both ends. An unknown
/// current value moves to the first (or last) option.
pub fn cycle_option<'a>(options: &'a [String], current: &str, dir: Cycle) -> Option<&'a String> {
    if options.is_empty() {
        return None;
    }
    let len = options.len();
    let next = match (options.iter().position(|o| o == current), dir) {
        (Some(i), Cycle::Next) => (i + 1) % len,
        (Some(0), Cycle::Prev) => len - 1,
        (Some(i), Cycle::Prev) => i - 1,
        (None, Cycle::Next) => 0,
        (None, Cycle::Prev) => len - 1,
    };
    options.get(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    }

    #[test]
    fn test_inputs_skip_country_list() {
        assert!(!FieldId::INPUTS.contains(&FieldId::Country));
        assert_eq!(FieldId::INPUTS.len(), 9);
    }

    #[test]
    fn test_names_match_record_keys() {
        assert_eq!(FieldId::ConfirmPassword.name(), "confirmPassword");
        assert_eq!(FieldId::CountrySelect.to_string(), "countrySelect");
    }

    #[test]
    fn test_accepts_text() {
        assert!(FieldId::Name.accepts_text());
        assert!(FieldId::ConfirmPassword.accepts_text());
        assert!(!FieldId::Terms.accepts_text());
        assert!(!FieldId::Picture.accepts_text());
    }

    #[test]
    fn test_cycle_wraps_forward() {
        let opts = options();
        assert_eq!(cycle_option(&opts, "c", Cycle::Next).unwrap(), "a");
        assert_eq!(cycle_option(&opts, "a", Cycle::Next).unwrap(), "b");
    }

    #[test]
    fn test_cycle_wraps_backward() {
        let opts = options();
        assert_eq!(cycle_option(&opts, "a", Cycle::Prev).unwrap(), "c");
    }

    #[test]
    fn test_cycle_from_unknown_value() {
        let opts = options();
        assert_eq!(cycle_option(&opts, "", Cycle::Next).unwrap(), "a");
        assert_eq!(cycle_option(&opts, "", Cycle::Prev).unwrap(), "c");
    }

    #[test]
    fn test_cycle_empty_options() {
        assert!(cycle_option(&[], "a", Cycle::Next).is_none());
    }
}
