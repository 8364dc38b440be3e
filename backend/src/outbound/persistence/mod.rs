//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories here only translate between Diesel rows and domain types.
//! Row structs and table definitions stay private to this module, and every
//! database failure is mapped onto the owning port's error enum: pool and
//! closed-connection failures become `Connection`, everything else `Query`.
//!
//! # Example
//!
//! ```ignore
//! use jokes::outbound::persistence::{DbPool, DieselJokeRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/jokes")).await?;
//! let jokes = DieselJokeRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_joke_repository;
mod diesel_login_service;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_joke_repository::DieselJokeRepository;
pub use diesel_login_service::DieselLoginService;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
