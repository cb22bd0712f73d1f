//! Process exit codes returned by [`crate::run`].

/// Command completed, or help/version was printed.
pub const SUCCESS: i32 = 0;

/// Parse failure, invalid configuration, or a rejected engine operation.
pub const ERROR: i32 = 2;
