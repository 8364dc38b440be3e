//! Ownership check guarding joke deletion.

use crate::domain::{Error, UserId};

use super::joke::Joke;

/// Reasons a deletion is refused. Each maps to its own status downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DeleteDenial {
    /// The joke is gone or never existed.
    #[error("Can't delete what does not exist")]
    NotFound,
    /// Someone other than the owner asked.
    #[error("Pssh, nice try. That's not your joke")]
    Forbidden,
}

/// Decide whether `identity` may delete `joke`.
///
/// Absence is checked before ownership, so a missing joke is reported as
/// missing no matter who asks.
///
/// # Examples
/// ```
/// use jokes::domain::{authorize_delete, DeleteDenial, UserId};
///
/// assert_eq!(
///     authorize_delete(None, &UserId::random()),
///     Err(DeleteDenial::NotFound)
/// );
/// ```
pub fn authorize_delete(joke: Option<&Joke>, identity: &UserId) -> Result<(), DeleteDenial> {
    let joke = joke.ok_or(DeleteDenial::NotFound)?;
    if joke.jokester_id() != identity {
        return Err(DeleteDenial::Forbidden);
    }
    Ok(())
}

impl From<DeleteDenial> for Error {
    fn from(value: DeleteDenial) -> Self {
        match value {
            DeleteDenial::NotFound => Error::not_found(value.to_string()),
            DeleteDenial::Forbidden => Error::forbidden(value.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::jokes::joke::{JokeId, NewJoke};
    use crate::domain::jokes::validation::JokeSubmission;
    use chrono::Utc;
    use rstest::rstest;

    fn joke_owned_by(owner: &UserId) -> Joke {
        let valid = JokeSubmission::new("Owl", "Owls are a hoot at parties.")
            .validate()
            .expect("fixture is valid");
        Joke::from_parts(
            JokeId::random(),
            NewJoke::new(valid, owner.clone()),
            Utc::now(),
        )
    }

    #[rstest]
    fn owners_may_delete() {
        for _ in 0..16 {
            let owner = UserId::random();
            let joke = joke_owned_by(&owner);
            assert_eq!(authorize_delete(Some(&joke), &owner), Ok(()));
        }
    }

    #[rstest]
    fn everyone_else_is_forbidden() {
        let owner = UserId::random();
        let joke = joke_owned_by(&owner);
        for _ in 0..16 {
            let other = UserId::random();
            assert_eq!(
                authorize_delete(Some(&joke), &other),
                Err(DeleteDenial::Forbidden)
            );
        }
    }

    #[rstest]
    fn missing_jokes_are_not_found_for_anyone() {
        let owner = UserId::random();
        assert_eq!(authorize_delete(None, &owner), Err(DeleteDenial::NotFound));
        assert_eq!(
            authorize_delete(None, &UserId::random()),
            Err(DeleteDenial::NotFound)
        );
    }

    #[rstest]
    #[case(DeleteDenial::NotFound, ErrorCode::NotFound, "Can't delete what does not exist")]
    #[case(
        DeleteDenial::Forbidden,
        ErrorCode::Forbidden,
        "Pssh, nice try. That's not your joke"
    )]
    fn denials_keep_distinct_codes(
        #[case] denial: DeleteDenial,
        #[case] code: ErrorCode,
        #[case] message: &str,
    ) {
        let error = Error::from(denial);
        assert_eq!(error.code(), code);
        assert_eq!(error.message(), message);
    }
}
