//! Rota Core - reviewer assignment for Reviewer Rota
//!
//! This crate holds the domain model, the reviewer selection rules and the
//! pull request lifecycle. Persistence is reached only through the traits in
//! [`store`]; an in-memory implementation lives here, SQLite in `rota-db`.

pub mod config;
pub mod error;
pub mod locks;
pub mod models;
pub mod random;
pub mod selection;
pub mod service;
pub mod store;

pub use config::Config;
pub use error::{EntityKind, Error, Result};
pub use models::{PrStatus, PullRequest, Team, User, MAX_REVIEWERS};
pub use random::{RandomSource, SeededRandom, SequenceRandom, ThreadRandom};
pub use service::{Reassignment, ReviewService};
pub use store::{EntityStore, MemoryStore, PullRequestStore, TeamStore, UserStore};
