//! Simulated sign-in and the persisted session.
//!
//! This module provides:
//! - `Authenticator`: checks admin credentials from the config, or a member
//!   id plus the last four digits of that member's phone
//! - `Session`: the signed-in user, persisted to `session.json` in the cache
//!
//! There is no server and no real secret here. Member "passwords" are derived
//! from directory data, so this only gates which views are offered.

pub mod login;
pub mod session;

pub use login::{AuthError, Authenticator, Role, SessionUser};
pub use session::Session;
