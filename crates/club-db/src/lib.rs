//! # club-db
//!
//! PostgreSQL implementations of the repository traits from `club-core`,
//! built on SQLx without the macro layer: models derive `FromRow`, mapper
//! functions lift rows into domain entities, and each `Pg*Repository`
//! owns the SQL for one aggregate.

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{
    PgApplicationRepository, PgBlogRepository, PgBugRepository, PgEventRepository,
    PgMemberRepository, PgUserRepository,
};
