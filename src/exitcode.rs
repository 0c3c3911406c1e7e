//! Standard exit codes (BSD sysexits.h compatible)

/// Requested course does not exist or cannot be changed
pub const NOTFOUND: i32 = 1;

/// Cannot open input
pub const NOINPUT: i32 = 66;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
