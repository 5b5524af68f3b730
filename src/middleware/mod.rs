//! Request middleware and extractors.
//!
//! - [`auth`]: the authentication layer and the [`auth::CurrentUser`] extractor
//! - [`role`]: role gates
//!
//! # Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. [`auth::authenticate`] validates the token and attaches a `CurrentUser`
//! 3. [`role::require_role`] admits or rejects the caller's role
//! 4. The handler runs, reading `CurrentUser` if it needs the caller

pub mod auth;
pub mod role;
