//! Business logic services
//!
//! Services orchestrate domain entities and repositories. Each service
//! borrows a [`ServiceContext`] and exposes the operations for one
//! resource. Authorization checks happen here, before any repository
//! call.

mod application;
mod auth;
mod blog;
mod bug;
mod context;
mod error;
mod event;
mod member;
mod permission;
mod user;

pub use application::ApplicationService;
pub use auth::AuthService;
pub use blog::BlogService;
pub use bug::BugService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use event::EventService;
pub use member::MemberService;
pub use user::UserService;
