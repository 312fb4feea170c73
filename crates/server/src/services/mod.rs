//! Business services composed from the repositories.

pub mod auth;
pub mod lists;
pub mod token;

pub use auth::{AuthError, AuthService};
pub use lists::{ListError, ListService, ProductInput};
pub use token::{TokenError, TokenService};
