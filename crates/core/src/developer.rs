//! Developer seniority levels and the storage-free developer rule set.

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::error::CoreError;
use crate::rules::{check_max_len, require_non_empty};

/// Maximum length of a full name and of an email address.
pub const MAX_FIELD_LEN: usize = 200;

pub const SENIORITY_JUNIOR: &str = "JR";
pub const SENIORITY_SEMI_SENIOR: &str = "SSR";
pub const SENIORITY_SENIOR: &str = "SR";

/// All valid seniority strings.
pub const VALID_SENIORITIES: &[&str] = &[SENIORITY_JUNIOR, SENIORITY_SEMI_SENIOR, SENIORITY_SENIOR];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seniority {
    #[serde(rename = "JR")]
    Junior,
    #[serde(rename = "SSR")]
    SemiSenior,
    #[serde(rename = "SR")]
    Senior,
}

impl Seniority {
    pub fn as_str(self) -> &'static str {
        match self {
            Seniority::Junior => SENIORITY_JUNIOR,
            Seniority::SemiSenior => SENIORITY_SEMI_SENIOR,
            Seniority::Senior => SENIORITY_SENIOR,
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            SENIORITY_JUNIOR => Ok(Seniority::Junior),
            SENIORITY_SEMI_SENIOR => Ok(Seniority::SemiSenior),
            SENIORITY_SENIOR => Ok(Seniority::Senior),
            _ => Err(CoreError::Validation(format!(
                "Seniority must be one of: {}",
                VALID_SENIORITIES.join(", ")
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeveloperFields<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub seniority: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDeveloper {
    pub full_name: String,
    pub email: String,
    pub seniority: Seniority,
}

/// Run the shape checks for a developer create or update.
///
/// Order: full name, email presence, email syntax, seniority.
pub fn validate_developer(fields: &DeveloperFields<'_>) -> Result<ValidDeveloper, CoreError> {
    require_non_empty("Full name", fields.full_name)?;
    let full_name = fields.full_name.trim();
    check_max_len("Full name", full_name, MAX_FIELD_LEN)?;

    require_non_empty("Email", fields.email)?;
    let email = fields.email.trim();
    validate_email(email)?;

    let seniority = Seniority::parse(fields.seniority)?;

    Ok(ValidDeveloper {
        full_name: full_name.to_string(),
        email: email.to_string(),
        seniority,
    })
}

/// Syntactic `local@domain` check.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    check_max_len("Email", email, MAX_FIELD_LEN)?;
    if !email.validate_email() {
        return Err(CoreError::Validation(format!(
            "Email '{email}' is not a valid address"
        )));
    }
    Ok(())
}
