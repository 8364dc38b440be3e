//! Uniform random joke selection.
//!
//! Selection is "count, then fetch one at an offset": the store is never
//! read in full, and every stored joke has probability `1/N` as long as the
//! [`OffsetPicker`] is uniform over `[0, N)`.

use crate::domain::Error;
use crate::domain::ports::{JokeRepository, OffsetPicker};

use super::joke::Joke;
use super::service::map_repository_error;

/// Message carried by the `empty` error.
pub const NO_JOKES: &str = "There are no jokes to display";

/// Pick one stored joke uniformly at random.
///
/// Fails with [`crate::domain::ErrorCode::Empty`] when nothing is stored,
/// including when the store drains between the count and the fetch.
pub async fn pick_random<R>(repo: &R, picker: &dyn OffsetPicker) -> Result<Joke, Error>
where
    R: JokeRepository + ?Sized,
{
    let total = repo.count().await.map_err(map_repository_error)?;
    if total == 0 {
        return Err(Error::empty(NO_JOKES));
    }
    let offset = picker.pick(total);
    repo.find_at_offset(offset, 1)
        .await
        .map_err(map_repository_error)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::empty(NO_JOKES))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::jokes::joke::{JokeId, NewJoke};
    use crate::domain::jokes::validation::JokeSubmission;
    use crate::domain::ports::{JokeRepositoryError, MockJokeRepository, MockOffsetPicker};
    use crate::domain::UserId;
    use chrono::Utc;
    use mockall::predicate::eq;
    use rstest::rstest;

    fn stored_joke() -> Joke {
        let valid = JokeSubmission::new("Cow", "Why do cows wear bells? Their horns don't work.")
            .validate()
            .expect("fixture is valid");
        Joke::from_parts(
            JokeId::random(),
            NewJoke::new(valid, UserId::random()),
            Utc::now(),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn empty_store_is_reported_as_empty() {
        let mut repo = MockJokeRepository::new();
        repo.expect_count().times(1).return_once(|| Ok(0));
        repo.expect_find_at_offset().times(0);
        let mut picker = MockOffsetPicker::new();
        picker.expect_pick().times(0);

        let error = pick_random(&repo, &picker).await.expect_err("empty");
        assert_eq!(error.code(), ErrorCode::Empty);
        assert_eq!(error.message(), NO_JOKES);
    }

    #[rstest]
    #[tokio::test]
    async fn fetches_exactly_one_joke_at_the_drawn_offset() {
        let joke = stored_joke();
        let expected = joke.clone();
        let mut repo = MockJokeRepository::new();
        repo.expect_count().return_once(|| Ok(7));
        repo.expect_find_at_offset()
            .with(eq(4), eq(1))
            .times(1)
            .return_once(move |_, _| Ok(vec![joke]));
        let mut picker = MockOffsetPicker::new();
        picker.expect_pick().with(eq(7)).return_const(4_u64);

        let picked = pick_random(&repo, &picker).await.expect("picked");
        assert_eq!(picked, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn drained_store_after_count_is_empty() {
        let mut repo = MockJokeRepository::new();
        repo.expect_count().return_once(|| Ok(1));
        repo.expect_find_at_offset()
            .return_once(|_, _| Ok(Vec::new()));
        let mut picker = MockOffsetPicker::new();
        picker.expect_pick().return_const(0_u64);

        let error = pick_random(&repo, &picker).await.expect_err("raced");
        assert_eq!(error.code(), ErrorCode::Empty);
    }

    #[rstest]
    #[case(JokeRepositoryError::connection("down"), ErrorCode::ServiceUnavailable)]
    #[case(JokeRepositoryError::query("boom"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn count_failures_are_not_mistaken_for_empty(
        #[case] failure: JokeRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockJokeRepository::new();
        repo.expect_count().return_once(move || Err(failure));
        let picker = MockOffsetPicker::new();

        let error = pick_random(&repo, &picker).await.expect_err("failure");
        assert_eq!(error.code(), expected);
    }
}
