//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod applications;
pub mod blogs;
pub mod bugs;
pub mod events;
pub mod health;
pub mod members;
pub mod users;
