//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their serialised shape and live in the inbound
//! adapter where framework concerns belong.

#![expect(
    dead_code,
    reason = "Schema wrappers are only read by utoipa during document generation"
)]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not the owner.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested joke does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// There are no jokes at all.
    #[schema(rename = "empty")]
    Empty,
    /// A backing service could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "What a joke! Not found.")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details, such as submission failures or a login hint.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Joke`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Joke, rename_all = "camelCase")]
pub struct JokeSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    #[schema(example = "Frog")]
    name: String,
    #[schema(example = "What happens to a frog's car when it breaks down? It gets toad away.")]
    content: String,
    /// Owner recorded at creation.
    #[schema(value_type = String, format = Uuid)]
    jokester_id: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::JokeSummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::JokeSummary)]
pub struct JokeSummarySchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    name: String,
}

/// OpenAPI schema for [`crate::domain::JokeMeta`].
#[derive(ToSchema)]
#[schema(as = crate::domain::JokeMeta)]
pub struct JokeMetaSchema {
    #[schema(example = "Frog joke")]
    title: String,
    #[schema(example = "Enjoy the Frog joke and much more")]
    description: String,
}

/// OpenAPI schema for [`crate::domain::ports::JokeView`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::JokeView, rename_all = "camelCase")]
pub struct JokeViewSchema {
    joke: JokeSchema,
    /// Whether the caller owns the joke and may delete it.
    is_owner: bool,
    meta: JokeMetaSchema,
}

/// OpenAPI schema for [`crate::domain::ports::RandomJoke`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::RandomJoke)]
pub struct RandomJokeSchema {
    joke: JokeSchema,
    meta: JokeMetaSchema,
}

/// OpenAPI schema for the `application/x-www-form-urlencoded` joke form.
#[derive(ToSchema)]
#[schema(as = crate::domain::JokeSubmission)]
pub struct JokeFormSchema {
    #[schema(example = "Frog")]
    name: Option<String>,
    #[schema(example = "What happens to a frog's car when it breaks down? It gets toad away.")]
    content: Option<String>,
}

/// OpenAPI schema for the delete form posted to a joke page.
#[derive(ToSchema)]
pub struct DeleteFormSchema {
    /// Must be `delete`.
    #[schema(rename = "_method", example = "delete")]
    method: String,
}

/// OpenAPI schema for [`crate::domain::SubmissionFailure`], carried in
/// `details` of a rejected submission.
#[derive(ToSchema)]
#[schema(as = crate::domain::SubmissionFailure, rename_all = "camelCase")]
pub struct SubmissionFailureSchema {
    #[schema(example = "Form not submitted correctly")]
    form_error: Option<String>,
    field_errors: Option<FieldErrorsSchema>,
    fields: Option<JokeFieldsSchema>,
}

/// OpenAPI schema for [`crate::domain::FieldErrors`].
#[derive(ToSchema)]
#[schema(as = crate::domain::FieldErrors)]
pub struct FieldErrorsSchema {
    #[schema(example = "Joke's name is too short")]
    name: Option<String>,
    #[schema(example = "Joke is too short")]
    content: Option<String>,
}

/// OpenAPI schema for [`crate::domain::JokeFields`].
#[derive(ToSchema)]
#[schema(as = crate::domain::JokeFields)]
pub struct JokeFieldsSchema {
    name: String,
    content: String,
}
