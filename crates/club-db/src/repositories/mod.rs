//! PostgreSQL repository implementations

mod application;
mod blog;
mod bug;
mod error;
mod event;
mod member;
mod user;

pub use application::PgApplicationRepository;
pub use blog::PgBlogRepository;
pub use bug::PgBugRepository;
pub use event::PgEventRepository;
pub use member::PgMemberRepository;
pub use user::PgUserRepository;
