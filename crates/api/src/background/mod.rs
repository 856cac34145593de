//! Background jobs spawned at startup.
//!
//! Each job is a long-running async function stopped through a
//! [`CancellationToken`](tokio_util::sync::CancellationToken).

pub mod session_cleanup;
