use std::str::FromStr;

use serde::Deserialize;

use super::ProjectType;

pub const FIRST_NAME_REQUIRED: &str = "الاسم الأول مطلوب";
pub const LAST_NAME_REQUIRED: &str = "اسم العائلة مطلوب";
pub const EMAIL_REQUIRED: &str = "البريد الإلكتروني مطلوب";
pub const PHONE_REQUIRED: &str = "رقم الهاتف مطلوب";
pub const MESSAGE_REQUIRED: &str = "الرسالة مطلوبة";
pub const INVALID_PROJECT_TYPE: &str = "نوع المشروع غير صالح";

/// Contact form data from HTTP request (JSON or URL-encoded).
///
/// Missing fields deserialize as empty strings so they are reported by
/// [`validate_submission`] instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub project_type: String,
    pub message: String,
    /// Honeypot. Hidden from people, filled in by bots.
    pub company: String,
}

impl ContactSubmission {
    /// True when the honeypot field was filled in.
    pub fn is_bot(&self) -> bool {
        !self.company.trim().is_empty()
    }

    /// Full name as "first last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    /// Selected project type, `None` when the field was left blank.
    ///
    /// Returns an error for values outside the fixed category set.
    pub fn project_type(&self) -> Result<Option<ProjectType>, &'static str> {
        let raw = self.project_type.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        ProjectType::from_str(raw)
            .map(Some)
            .map_err(|_| INVALID_PROJECT_TYPE)
    }
}

/// Check that a field is non-blank after trimming.
fn check_required(value: &str, error: &'static str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        Err(error)
    } else {
        Ok(())
    }
}

/// Validate a submission. Returns every applicable error in rule order;
/// an empty list means the submission is acceptable.
pub fn validate_submission(submission: &ContactSubmission) -> Vec<String> {
    let checks = [
        check_required(&submission.first_name, FIRST_NAME_REQUIRED),
        check_required(&submission.last_name, LAST_NAME_REQUIRED),
        check_required(&submission.email, EMAIL_REQUIRED),
        check_required(&submission.phone, PHONE_REQUIRED),
        check_required(&submission.message, MESSAGE_REQUIRED),
        submission.project_type().map(|_| ()),
    ];

    checks
        .into_iter()
        .filter_map(Result::err)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ContactSubmission {
        ContactSubmission {
            first_name: "Sara".to_string(),
            last_name: "Ali".to_string(),
            email: "sara@example.com".to_string(),
            phone: "0500000000".to_string(),
            project_type: "landing".to_string(),
            message: "Hello".to_string(),
            company: String::new(),
        }
    }

    #[test]
    fn valid_submission_has_no_errors() {
        assert!(validate_submission(&valid()).is_empty());
    }

    #[test]
    fn each_required_field_reports_its_error() {
        let cases: [(fn(&mut ContactSubmission), &str); 5] = [
            (|s| s.first_name.clear(), FIRST_NAME_REQUIRED),
            (|s| s.last_name = "   ".to_string(), LAST_NAME_REQUIRED),
            (|s| s.email.clear(), EMAIL_REQUIRED),
            (|s| s.phone = "\t".to_string(), PHONE_REQUIRED),
            (|s| s.message.clear(), MESSAGE_REQUIRED),
        ];
        for (blank, expected) in cases {
            let mut submission = valid();
            blank(&mut submission);
            assert_eq!(validate_submission(&submission), vec![expected.to_string()]);
        }
    }

    #[test]
    fn errors_are_collected_in_rule_order() {
        let submission = ContactSubmission {
            project_type: "blog".to_string(),
            ..ContactSubmission::default()
        };
        assert_eq!(
            validate_submission(&submission),
            vec![
                FIRST_NAME_REQUIRED,
                LAST_NAME_REQUIRED,
                EMAIL_REQUIRED,
                PHONE_REQUIRED,
                MESSAGE_REQUIRED,
                INVALID_PROJECT_TYPE,
            ]
        );
    }

    #[test]
    fn project_type_is_optional() {
        let mut submission = valid();
        submission.project_type.clear();
        assert!(validate_submission(&submission).is_empty());
        assert_eq!(submission.project_type(), Ok(None));
    }

    #[test]
    fn every_category_is_accepted() {
        for raw in ["landing", "website", "ecommerce", "info-app", "booking-app", "custom"] {
            let mut submission = valid();
            submission.project_type = raw.to_string();
            assert!(validate_submission(&submission).is_empty(), "{raw} rejected");
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        let mut submission = valid();
        submission.project_type = "mobile-game".to_string();
        assert_eq!(
            validate_submission(&submission),
            vec![INVALID_PROJECT_TYPE.to_string()]
        );
    }

    #[test]
    fn email_format_is_not_checked() {
        let mut submission = valid();
        submission.email = "not an address".to_string();
        assert!(validate_submission(&submission).is_empty());
    }

    #[test]
    fn validation_is_repeatable() {
        let submission = ContactSubmission {
            first_name: "Sara".to_string(),
            project_type: "nope".to_string(),
            ..ContactSubmission::default()
        };
        assert_eq!(validate_submission(&submission), validate_submission(&submission));
    }

    #[test]
    fn honeypot_detects_bots() {
        let mut submission = valid();
        assert!(!submission.is_bot());
        submission.company = "  ".to_string();
        assert!(!submission.is_bot());
        submission.company = "Acme".to_string();
        assert!(submission.is_bot());
    }
}
