//! Request guards and layers shared by the controllers.
//!
//! - `auth` - `AuthGuard` resolving the session user and checking permissions
//! - `session` - typed access to session data
//! - `rate_limit` - per-client limits for login, registration, and public counters

pub mod auth;
pub mod rate_limit;
pub mod session;

#[cfg(test)]
mod test;
