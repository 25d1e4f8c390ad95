//! CLI command implementations.

pub(crate) mod list;
pub(crate) mod serve;

pub(crate) use list::ListArgs;
pub(crate) use serve::ServeArgs;
