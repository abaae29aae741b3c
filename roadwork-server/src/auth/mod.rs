//! Who may sync which team's records.

pub mod password;
pub mod users;
pub mod basic;

pub use basic::AuthenticatedUser;
pub use users::{User, UserRegistry, ADMIN_TEAM};
