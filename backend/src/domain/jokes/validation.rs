//! Joke submission rules.
//!
//! These functions are the single source of truth for what a valid joke
//! looks like. The submission command gates persistence on them and the
//! [`super::reconciler::SubmissionReconciler`] decides whether to show an
//! optimistic preview with them, so the two can never disagree.

use serde::{Deserialize, Serialize};

use crate::domain::{Error, ErrorCode};

/// Minimum trimmed character count for a joke name.
pub const JOKE_NAME_MIN: usize = 2;
/// Minimum trimmed character count for joke content.
pub const JOKE_CONTENT_MIN: usize = 10;
/// Whole-form error reported when fields are missing.
pub const FORM_ERROR: &str = "Form not submitted correctly";

const NAME_TOO_SHORT: &str = "Joke's name is too short";
const CONTENT_TOO_SHORT: &str = "Joke is too short";
const SUBMISSION_INVALID: &str = "joke submission is invalid";

fn trimmed_len(value: &str) -> usize {
    value.trim().chars().count()
}

/// Check a joke name, returning the error message when it is too short.
///
/// # Examples
/// ```
/// use jokes::domain::validate_joke_name;
///
/// assert!(validate_joke_name("Ab").is_none());
/// assert!(validate_joke_name(" A ").is_some());
/// ```
pub fn validate_joke_name(name: &str) -> Option<&'static str> {
    (trimmed_len(name) < JOKE_NAME_MIN).then_some(NAME_TOO_SHORT)
}

/// Check joke content, returning the error message when it is too short.
///
/// # Examples
/// ```
/// use jokes::domain::validate_joke_content;
///
/// assert!(validate_joke_content("short").is_some());
/// assert!(validate_joke_content("long enough to laugh").is_none());
/// ```
pub fn validate_joke_content(content: &str) -> Option<&'static str> {
    (trimmed_len(content) < JOKE_CONTENT_MIN).then_some(CONTENT_TOO_SHORT)
}

/// Submitted values for a joke, echoed back on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JokeFields {
    pub name: String,
    pub content: String,
}

/// Per-field messages; a field is present only when it failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl FieldErrors {
    /// Run both field checks against `fields`.
    pub fn check(fields: &JokeFields) -> Self {
        Self {
            name: validate_joke_name(&fields.name).map(str::to_owned),
            content: validate_joke_content(&fields.content).map(str::to_owned),
        }
    }

    /// True when neither field failed.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.content.is_none()
    }
}

/// Why a submission was refused.
///
/// Either `form_error` is set (fields were missing) or `field_errors` and
/// `fields` are set (fields were present but failed a check).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionFailure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<FieldErrors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<JokeFields>,
}

impl SubmissionFailure {
    /// Failure for a form that arrived without the expected fields.
    pub fn malformed() -> Self {
        Self {
            form_error: Some(FORM_ERROR.to_owned()),
            field_errors: None,
            fields: None,
        }
    }

    fn rejected(field_errors: FieldErrors, fields: JokeFields) -> Self {
        Self {
            form_error: None,
            field_errors: Some(field_errors),
            fields: Some(fields),
        }
    }

    /// Recover a submission failure from an error produced by
    /// `From<SubmissionFailure> for Error`.
    ///
    /// Other `invalid_request` details decode with every field unset; those
    /// are not submission failures and yield `None`.
    pub fn from_error(error: &Error) -> Option<Self> {
        if error.code() != ErrorCode::InvalidRequest {
            return None;
        }
        error
            .details()
            .and_then(|details| serde_json::from_value::<Self>(details.clone()).ok())
            .filter(|failure| !failure.is_blank())
    }

    fn is_blank(&self) -> bool {
        self.form_error.is_none() && self.field_errors.is_none() && self.fields.is_none()
    }
}

impl From<SubmissionFailure> for Error {
    fn from(value: SubmissionFailure) -> Self {
        let error = Error::invalid_request(SUBMISSION_INVALID);
        match serde_json::to_value(&value) {
            Ok(details) => error.with_details(details),
            Err(_) => error,
        }
    }
}

/// Raw joke form as received; either field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JokeSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl JokeSubmission {
    /// Submission with both fields present.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            content: Some(content.into()),
        }
    }

    /// Both fields, if both were submitted.
    pub fn fields(&self) -> Option<JokeFields> {
        match (&self.name, &self.content) {
            (Some(name), Some(content)) => Some(JokeFields {
                name: name.clone(),
                content: content.clone(),
            }),
            _ => None,
        }
    }

    /// Whether the submission would be accepted, without consuming it.
    pub fn passes(&self) -> bool {
        self.fields()
            .is_some_and(|fields| FieldErrors::check(&fields).is_empty())
    }

    /// Validate the submission.
    pub fn validate(self) -> Result<ValidJoke, SubmissionFailure> {
        let Self {
            name: Some(name),
            content: Some(content),
        } = self
        else {
            return Err(SubmissionFailure::malformed());
        };
        let fields = JokeFields { name, content };
        let field_errors = FieldErrors::check(&fields);
        if field_errors.is_empty() {
            Ok(ValidJoke(fields))
        } else {
            Err(SubmissionFailure::rejected(field_errors, fields))
        }
    }
}

/// Joke fields that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidJoke(JokeFields);

impl ValidJoke {
    /// Validated name.
    pub fn name(&self) -> &str {
        self.0.name.as_str()
    }

    /// Validated content.
    pub fn content(&self) -> &str {
        self.0.content.as_str()
    }

    pub(crate) fn into_parts(self) -> (String, String) {
        (self.0.name, self.0.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("", true)]
    #[case("A", true)]
    #[case("  A  ", true)]
    #[case("Ab", false)]
    #[case(" Ab ", false)]
    #[case("Éé", false)]
    fn name_threshold_uses_trimmed_length(#[case] name: &str, #[case] fails: bool) {
        assert_eq!(validate_joke_name(name).is_some(), fails);
    }

    #[rstest]
    #[case("short", true)]
    #[case("123456789", true)]
    #[case("   123456789   ", true)]
    #[case("1234567890", false)]
    #[case("This is plenty long content.", false)]
    fn content_threshold_uses_trimmed_length(#[case] content: &str, #[case] fails: bool) {
        assert_eq!(validate_joke_content(content).is_some(), fails);
    }

    #[rstest]
    fn checks_are_deterministic() {
        for input in ["", "x", "xy", "a longer joke body"] {
            assert_eq!(validate_joke_name(input), validate_joke_name(input));
            assert_eq!(validate_joke_content(input), validate_joke_content(input));
        }
    }

    #[rstest]
    fn short_content_reports_only_the_content_field() {
        let failure = JokeSubmission::new("Ab", "short")
            .validate()
            .expect_err("content is too short");

        let errors = failure.field_errors.expect("field errors");
        assert!(errors.name.is_none());
        assert_eq!(errors.content.as_deref(), Some("Joke is too short"));
        assert_eq!(
            failure.fields,
            Some(JokeFields {
                name: "Ab".to_owned(),
                content: "short".to_owned(),
            })
        );
        assert!(failure.form_error.is_none());
    }

    #[rstest]
    #[case(JokeSubmission { name: None, content: Some("long enough content".to_owned()) })]
    #[case(JokeSubmission { name: Some("Ab".to_owned()), content: None })]
    #[case(JokeSubmission::default())]
    fn missing_fields_are_a_form_error(#[case] submission: JokeSubmission) {
        let failure = submission.validate().expect_err("malformed");
        assert_eq!(failure, SubmissionFailure::malformed());
    }

    #[rstest]
    fn failures_survive_the_error_envelope() {
        let failure = JokeSubmission::new("A", "short")
            .validate()
            .expect_err("both fields fail");
        let error = Error::from(failure.clone());

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            error.details(),
            Some(&json!({
                "fieldErrors": {
                    "name": "Joke's name is too short",
                    "content": "Joke is too short",
                },
                "fields": {"name": "A", "content": "short"},
            }))
        );
        assert_eq!(SubmissionFailure::from_error(&error), Some(failure));
    }

    #[rstest]
    #[case(json!({ "field": "_method", "value": "patch" }))]
    #[case(json!({}))]
    fn unrelated_invalid_request_details_are_not_failures(#[case] details: serde_json::Value) {
        let error = Error::invalid_request("unsupported form action").with_details(details);
        assert_eq!(SubmissionFailure::from_error(&error), None);
    }

    #[rstest]
    fn passes_agrees_with_validate() {
        let cases = [
            JokeSubmission::new("Ab", "short"),
            JokeSubmission::new("A Valid Name", "This is plenty long content."),
            JokeSubmission::default(),
        ];
        for submission in cases {
            assert_eq!(submission.passes(), submission.clone().validate().is_ok());
        }
    }
}
