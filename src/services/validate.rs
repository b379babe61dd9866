//! Client-side form validation
//!
//! Validation failures are resolved at the form and never reach the
//! network. The first failing field aborts submission.

use crate::models::{CreateApplicationInput, CreateReviewInput};

/// A field that failed client-side validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    /// Form field name
    pub field: &'static str,
    /// Why it was rejected
    pub reason: String,
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ValidationError {
    ValidationError {
        field,
        reason: reason.into(),
    }
}

/// Accepted values for the gender field
pub const GENDERS: &[&str] = &["female", "male", "other"];

/// Validate the application form before checkout begins.
pub fn validate_application(input: &CreateApplicationInput) -> Result<(), ValidationError> {
    let phone = input.applicant_phone.trim();
    if phone.is_empty() {
        return Err(invalid("applicantPhone", "is required"));
    }
    if !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("applicantPhone", "must contain digits only"));
    }
    if !(7..=15).contains(&phone.len()) {
        return Err(invalid("applicantPhone", "must be 7 to 15 digits"));
    }

    if input.applicant_address.trim().is_empty() {
        return Err(invalid("applicantAddress", "is required"));
    }

    if !GENDERS.contains(&input.applicant_gender.to_lowercase().as_str()) {
        return Err(invalid(
            "applicantGender",
            "must be one of female, male or other",
        ));
    }

    for (field, value) in [("sscResult", input.ssc_result), ("hscResult", input.hsc_result)] {
        if !(0.0..=5.0).contains(&value) {
            return Err(invalid(field, "must be between 0.00 and 5.00"));
        }
    }

    if let Some(gap) = input.study_gap {
        if !(1..=3).contains(&gap) {
            return Err(invalid("studyGap", "must be 1 to 3 years"));
        }
    }

    Ok(())
}

/// Validate a review before submission.
pub fn validate_review(input: &CreateReviewInput) -> Result<(), ValidationError> {
    if !(1.0..=5.0).contains(&input.rating) {
        return Err(invalid("rating", "must be between 1 and 5"));
    }
    if input.comment.trim().is_empty() {
        return Err(invalid("comment", "is required"));
    }
    Ok(())
}
