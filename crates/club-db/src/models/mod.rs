//! Database models with SQLx FromRow derives

mod application;
mod blog;
mod bug;
mod event;
mod member;
mod user;

pub use application::ApplicationModel;
pub use blog::BlogModel;
pub use bug::BugModel;
pub use event::{EventModel, RegistrationModel};
pub use member::MemberModel;
pub use user::UserModel;
