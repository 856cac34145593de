//! Request extractors that guard administrator routes.

pub mod auth;
