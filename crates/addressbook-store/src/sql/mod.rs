//! Resource-safe SQL execution.
//!
//! Data-access code hands [`SqlTemplate`] a SQL string, a parameter binder
//! and a result processor. The template acquires a connection from its
//! [`ConnectionProvider`], prepares the statement, runs both callbacks and
//! returns the connection on every exit path.

mod provider;
mod template;

pub use provider::{ConnectionProvider, PathConnectionProvider, SharedConnectionProvider};
pub use template::{no_params, GeneratedKeys, Prepared, SqlTemplate};
