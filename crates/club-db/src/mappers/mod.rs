//! Entity <-> model mappers

mod application;
mod blog;
mod bug;
mod event;
mod member;
mod user;

pub use application::application_from_model;
pub use blog::blog_with_upvotes;
pub use bug::bug_from_model;
pub use event::event_with_registrations;
pub use member::member_from_model;
pub use user::user_from_model;
