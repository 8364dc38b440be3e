//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod joke_repository;
mod jokes_command;
mod jokes_query;
mod login_service;
mod offset_picker;
mod user_repository;

#[cfg(test)]
pub use joke_repository::MockJokeRepository;
pub use joke_repository::{FixtureJokeRepository, JokeRepository, JokeRepositoryError};
#[cfg(test)]
pub use jokes_command::MockJokesCommand;
pub use jokes_command::{FixtureJokesCommand, JokesCommand};
#[cfg(test)]
pub use jokes_query::MockJokesQuery;
pub use jokes_query::{DEFAULT_LIST_LIMIT, FixtureJokesQuery, JokeView, JokesQuery, RandomJoke};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, LoginService, ROSTER, RosterUser, roster_user};
#[cfg(test)]
pub use offset_picker::MockOffsetPicker;
pub use offset_picker::{OffsetPicker, UniformOffsetPicker};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
