//! Value objects - immutable types that represent domain concepts

mod domain;
mod permissions;
mod role;
mod snowflake;

pub use domain::ClubDomain;
pub use permissions::Permissions;
pub use role::Role;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
