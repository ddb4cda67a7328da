//! Domain entities

mod application;
mod blog;
mod bug;
mod event;
mod member;
mod user;

pub use application::{Application, ApplicationStatus, Review};
pub use blog::{slugify, Blog, BlogStatus};
pub use bug::{Bug, BugPriority, BugStatus};
pub use event::{Event, Registration};
pub use member::{Member, MemberStatus};
pub use user::User;
