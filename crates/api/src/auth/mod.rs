//! Sign-in machinery for the hotel's administrator accounts.
//!
//! [`password`] hashes the stored credentials; [`jwt`] issues the tokens the
//! dashboard presents on room and booking management routes.

pub mod jwt;
pub mod password;
