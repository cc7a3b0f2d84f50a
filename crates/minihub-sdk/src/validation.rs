//! Client-side checks run before building a transaction

use minihub_primitives::TimestampMs;
use serde::Serialize;

/// Longest accepted job title
pub const MAX_TITLE_LEN: usize = 200;
/// Longest accepted job description
pub const MAX_DESCRIPTION_LEN: usize = 5_000;
/// Longest accepted profile name
pub const MAX_NAME_LEN: usize = 100;
/// Longest accepted biography
pub const MAX_BIO_LEN: usize = 1_000;
/// Upper bound on years of experience
pub const MAX_EXPERIENCE_YEARS: i64 = 100;

/// Outcome of a validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// No errors were found
    pub valid: bool,
    /// Human-readable problems, in check order
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Check the inputs of `post_job`
pub fn validate_post_job_params(
    title: &str,
    description: &str,
    deadline: TimestampMs,
    now: TimestampMs,
) -> ValidationReport {
    let mut errors = Vec::new();

    if title.trim().is_empty() {
        errors.push("Title is required".to_string());
    } else if title.chars().count() > MAX_TITLE_LEN {
        errors.push(format!("Title must be at most {} characters", MAX_TITLE_LEN));
    }

    if description.trim().is_empty() {
        errors.push("Description is required".to_string());
    } else if description.chars().count() > MAX_DESCRIPTION_LEN {
        errors.push(format!(
            "Description must be at most {} characters",
            MAX_DESCRIPTION_LEN
        ));
    }

    if deadline <= now {
        errors.push("Deadline must be in the future".to_string());
    }

    ValidationReport::from_errors(errors)
}

/// Check the inputs of `create_user_profile` / `update_user_profile`.
/// `experience_years` is signed so negative input can be reported.
pub fn validate_user_profile_params(
    name: &str,
    bio: &str,
    experience_years: i64,
) -> ValidationReport {
    let mut errors = Vec::new();

    if name.trim().is_empty() {
        errors.push("Name is required".to_string());
    } else if name.chars().count() > MAX_NAME_LEN {
        errors.push(format!("Name must be at most {} characters", MAX_NAME_LEN));
    }

    if bio.chars().count() > MAX_BIO_LEN {
        errors.push(format!("Bio must be at most {} characters", MAX_BIO_LEN));
    }

    if experience_years < 0 {
        errors.push("Experience years cannot be negative".to_string());
    } else if experience_years > MAX_EXPERIENCE_YEARS {
        errors.push(format!(
            "Experience years cannot exceed {}",
            MAX_EXPERIENCE_YEARS
        ));
    }

    ValidationReport::from_errors(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_job_valid() {
        let report = validate_post_job_params("Engineer", "Build things", 2_000, 1_000);
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_post_job_collects_all_errors() {
        let report = validate_post_job_params("  ", "", 1_000, 1_000);
        assert!(!report.valid);
        assert_eq!(
            report.errors,
            vec![
                "Title is required",
                "Description is required",
                "Deadline must be in the future",
            ]
        );
    }

    #[test]
    fn test_post_job_title_too_long() {
        let title = "x".repeat(MAX_TITLE_LEN + 1);
        let report = validate_post_job_params(&title, "d", 2, 1);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("at most"));
    }

    #[test]
    fn test_user_profile() {
        assert!(validate_user_profile_params("Ada", "", 0).valid);

        let report = validate_user_profile_params("", &"b".repeat(MAX_BIO_LEN + 1), -1);
        assert_eq!(report.errors.len(), 3);
        assert!(report.errors[2].contains("negative"));

        assert!(!validate_user_profile_params("Ada", "", 101).valid);
    }
}
