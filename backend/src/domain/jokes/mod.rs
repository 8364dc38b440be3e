//! Jokes: submission, reading, random selection and owner-only deletion.

mod joke;
mod ownership;
mod random;
mod reconciler;
mod service;
mod validation;

pub use joke::{JOKES_PATH, Joke, JokeId, JokeMeta, JokeSummary, NewJoke};
pub use ownership::{DeleteDenial, authorize_delete};
pub use random::{NO_JOKES, pick_random};
pub use reconciler::{
    JokePreview, ReconcileError, SubmissionOutcome, SubmissionReconciler, SubmissionState,
    SubmissionView,
};
pub use service::JokesService;
pub use validation::{
    FORM_ERROR, FieldErrors, JOKE_CONTENT_MIN, JOKE_NAME_MIN, JokeFields, JokeSubmission,
    SubmissionFailure, ValidJoke, validate_joke_content, validate_joke_name,
};
