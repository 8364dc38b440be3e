//! Optimistic preview of an in-flight joke submission.
//!
//! The reconciler mirrors what a client shows between pressing "submit" and
//! hearing back from the server. It runs the same validators as the
//! submission command, so a preview is only ever shown for input the server
//! would accept, and it always drops the preview once the server answers.

use serde::Serialize;

use crate::domain::Error;

use super::joke::Joke;
use super::validation::{JokeSubmission, SubmissionFailure};

/// Lifecycle of a single submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    /// Nothing sent yet.
    Idle,
    /// Fields sent, response pending.
    Submitting(JokeSubmission),
    /// Server has answered.
    Settled(SubmissionOutcome),
}

/// Authoritative server answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The joke was stored at `path`.
    Created { path: String },
    /// The server refused the submission.
    Rejected(SubmissionFailure),
}

impl SubmissionOutcome {
    /// Interpret the result of a submission command.
    ///
    /// Errors that do not carry a [`SubmissionFailure`] become a whole-form
    /// error so the form is still re-rendered.
    pub fn from_result(result: Result<Joke, Error>) -> Self {
        match result {
            Ok(joke) => Self::Created {
                path: joke.id().path(),
            },
            Err(error) => Self::Rejected(SubmissionFailure::from_error(&error).unwrap_or_else(
                || SubmissionFailure {
                    form_error: Some(error.message().to_owned()),
                    field_errors: None,
                    fields: None,
                },
            )),
        }
    }
}

/// Would-be joke rendered while a submission is in flight.
///
/// It is always the caller's own joke, and it cannot be deleted because it
/// has no identifier yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JokePreview {
    pub name: String,
    pub content: String,
    pub is_owner: bool,
    pub can_delete: bool,
}

/// What the client should render for the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionView {
    /// The form, with server errors and echoed fields after a rejection.
    Form(Option<SubmissionFailure>),
    /// Optimistic preview of the in-flight joke.
    Preview(JokePreview),
    /// Navigate to the stored joke.
    Redirect(String),
}

/// Invalid reconciler transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReconcileError {
    #[error("a submission is already in flight")]
    AlreadySubmitting,
    #[error("no submission is in flight")]
    NotSubmitting,
}

/// Submission state machine: `Idle -> Submitting -> Settled`.
///
/// # Examples
/// ```
/// use jokes::domain::{JokeSubmission, SubmissionOutcome, SubmissionReconciler, SubmissionView};
///
/// let mut reconciler = SubmissionReconciler::new();
/// reconciler
///     .begin(JokeSubmission::new("Ab", "long enough content"))
///     .unwrap();
/// assert!(matches!(reconciler.view(), SubmissionView::Preview(_)));
///
/// reconciler
///     .settle(SubmissionOutcome::Created { path: "/jokes/1".into() })
///     .unwrap();
/// assert_eq!(reconciler.view(), SubmissionView::Redirect("/jokes/1".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReconciler {
    state: SubmissionState,
}

impl Default for SubmissionReconciler {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionReconciler {
    /// Start idle.
    pub fn new() -> Self {
        Self {
            state: SubmissionState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Record that `submission` has been sent.
    ///
    /// Allowed from `Idle` and `Settled`, so a rejected form can be resent.
    pub fn begin(&mut self, submission: JokeSubmission) -> Result<(), ReconcileError> {
        if matches!(self.state, SubmissionState::Submitting(_)) {
            return Err(ReconcileError::AlreadySubmitting);
        }
        self.state = SubmissionState::Submitting(submission);
        Ok(())
    }

    /// Replace the in-flight submission with the server's answer.
    pub fn settle(&mut self, outcome: SubmissionOutcome) -> Result<(), ReconcileError> {
        if !matches!(self.state, SubmissionState::Submitting(_)) {
            return Err(ReconcileError::NotSubmitting);
        }
        self.state = SubmissionState::Settled(outcome);
        Ok(())
    }

    /// View for the current state.
    pub fn view(&self) -> SubmissionView {
        match &self.state {
            SubmissionState::Idle => SubmissionView::Form(None),
            SubmissionState::Submitting(submission) => preview(submission)
                .map_or(SubmissionView::Form(None), SubmissionView::Preview),
            SubmissionState::Settled(SubmissionOutcome::Created { path }) => {
                SubmissionView::Redirect(path.clone())
            }
            SubmissionState::Settled(SubmissionOutcome::Rejected(failure)) => {
                SubmissionView::Form(Some(failure.clone()))
            }
        }
    }
}

fn preview(submission: &JokeSubmission) -> Option<JokePreview> {
    if !submission.passes() {
        return None;
    }
    let fields = submission.fields()?;
    Some(JokePreview {
        name: fields.name,
        content: fields.content,
        is_owner: true,
        can_delete: false,
    })
}
