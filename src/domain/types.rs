//! Strongly-typed value objects used by domain entities.
//!
//! Records are built from these wrappers at the boundary, so invalid field
//! values never reach the repository or the templates.

use std::fmt::{Display, Formatter};
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// National ID must be 7 to 10 digits.
    #[error("national id must be 7 to 10 digits")]
    InvalidNationalId,
    /// Phone must be 8 to 15 digits.
    #[error("phone must be 8 to 15 digits")]
    InvalidPhone,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(ClientId, "Unique identifier for a client.");
id_newtype!(TicketId, "Unique identifier for a service ticket.");

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = value.into().trim().to_string();
                if trimmed.is_empty() {
                    return Err(TypeConstraintError::EmptyString);
                }
                Ok(Self(trimmed))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(PersonName, "Client name component enforcing non-empty values.");

non_empty_string_newtype!(
    TicketCost,
    "Cost as entered by the operator. Kept as text, only required to be non-empty."
);

/// National identity document number: 7 to 10 digits.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NationalId(String);

impl NationalId {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if !is_all_digits(&trimmed) || !(7..=10).contains(&trimmed.len()) {
            return Err(TypeConstraintError::InvalidNationalId);
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for NationalId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for NationalId {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NationalId> for String {
    fn from(value: NationalId) -> Self {
        value.0
    }
}

/// Contact phone number: 8 to 15 digits, no separators.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if !is_all_digits(&trimmed) || !(8..=15).contains(&trimmed.len()) {
            return Err(TypeConstraintError::InvalidPhone);
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for PhoneNumber {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

/// Free-text ticket description, sanitized and non-empty.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TicketDetail(String);

impl TicketDetail {
    /// The default allow-list keeps benign formatting tags, so the non-empty
    /// check runs on a fully tag-stripped rendering: `<b></b>` is rejected
    /// even though it survives sanitization verbatim.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let raw = value.into();
        let text_only = ammonia::Builder::empty().clean(&raw).to_string();
        if text_only.trim().is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(ammonia::clean(&raw).trim().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for TicketDetail {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for TicketDetail {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TicketDetail> for String {
    fn from(value: TicketDetail) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn national_id_accepts_7_to_10_digits() {
        assert!(NationalId::new("1234567").is_ok());
        assert!(NationalId::new("1234567890").is_ok());
        assert_eq!(
            NationalId::new("123456"),
            Err(TypeConstraintError::InvalidNationalId)
        );
        assert_eq!(
            NationalId::new("12345678901"),
            Err(TypeConstraintError::InvalidNationalId)
        );
        assert_eq!(
            NationalId::new("1234567a"),
            Err(TypeConstraintError::InvalidNationalId)
        );
    }

    #[test]
    fn national_id_trims_whitespace() {
        assert_eq!(NationalId::new(" 12345678 ").unwrap().as_str(), "12345678");
    }

    #[test]
    fn phone_accepts_8_to_15_digits() {
        assert!(PhoneNumber::new("12345678").is_ok());
        assert!(PhoneNumber::new("123456789012345").is_ok());
        assert_eq!(
            PhoneNumber::new("1234567"),
            Err(TypeConstraintError::InvalidPhone)
        );
        assert_eq!(
            PhoneNumber::new("+12345678"),
            Err(TypeConstraintError::InvalidPhone)
        );
    }

    #[test]
    fn ticket_detail_rejects_markup_only_input() {
        assert!(TicketDetail::new("<b></b>").is_err());
        assert!(TicketDetail::new("<i> \n </i>").is_err());
        assert!(TicketDetail::new("<script>alert(1)</script>").is_err());
        let detail = TicketDetail::new("screen <script>alert(1)</script> replacement").unwrap();
        assert!(!detail.as_str().contains("script"));
    }

    #[test]
    fn ticket_detail_keeps_allowed_formatting() {
        let detail = TicketDetail::new("<b>broken</b> hinge").unwrap();
        assert_eq!(detail.as_str(), "<b>broken</b> hinge");
    }

    #[test]
    fn ids_must_be_positive() {
        assert!(ClientId::new(1).is_ok());
        assert_eq!(ClientId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(TicketId::new(-5), Err(TypeConstraintError::NonPositiveId));
    }
}
