//! CLI command implementations.

pub(crate) mod notify;

pub(crate) use notify::NotifyArgs;
