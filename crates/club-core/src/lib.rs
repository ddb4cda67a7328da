//! # club-core
//!
//! Domain layer containing entities, value objects, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    slugify, Application, ApplicationStatus, Blog, BlogStatus, Bug, BugPriority, BugStatus,
    Event, Member, MemberStatus, Registration, Review, User,
};
pub use error::DomainError;
pub use traits::{
    ApplicationRepository, BlogRepository, BugRepository, EventRepository, MemberFilter,
    MemberRepository, RepoResult, UserRepository,
};
pub use value_objects::{
    ClubDomain, Permissions, Role, Snowflake, SnowflakeGenerator, SnowflakeParseError,
};
