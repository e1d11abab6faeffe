//! Feature-gated logging macros.
//!
//! With the `logging` feature these forward to `tracing`; without it they
//! emit nothing, but still reference their field values inside a dead
//! branch, so bindings that only feed a log line do not trip
//! `unused_variables`.
//!
//! ```rust,ignore
//! use crate::logging::{debug, warn};
//!
//! warn!(error = %err, "host facility failed its probe");
//! debug!(key, "decode failed, treating as missing");
//! ```

/// Emit a debug-level log (per-operation detail).
#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {{ $crate::logging::log_fields!($($arg)*); }};
}

/// Emit an info-level log (engine selection and other lifecycle events).
#[cfg(feature = "logging")]
macro_rules! log_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_info {
    ($($arg:tt)*) => {{ $crate::logging::log_fields!($($arg)*); }};
}

/// Emit a warn-level log (engine failures absorbed by the facade).
#[cfg(feature = "logging")]
macro_rules! log_warn {
    ($($arg:tt)*) => { tracing::warn!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {{ $crate::logging::log_fields!($($arg)*); }};
}

/// Walk `tracing`-style fields (`name`, `name = value`, `name = %value`,
/// `name = ?value`, then a message with format arguments) and borrow each
/// value in a branch that never runs.
#[cfg(not(feature = "logging"))]
macro_rules! log_fields {
    () => {};
    ($name:ident = % $value:expr $(, $($rest:tt)*)?) => {
        if false {
            let _ = &$value;
        }
        $($crate::logging::log_fields!($($rest)*);)?
    };
    ($name:ident = ? $value:expr $(, $($rest:tt)*)?) => {
        if false {
            let _ = &$value;
        }
        $($crate::logging::log_fields!($($rest)*);)?
    };
    ($name:ident = $value:expr $(, $($rest:tt)*)?) => {
        if false {
            let _ = &$value;
        }
        $($crate::logging::log_fields!($($rest)*);)?
    };
    ($name:ident $(, $($rest:tt)*)?) => {
        if false {
            let _ = &$name;
        }
        $($crate::logging::log_fields!($($rest)*);)?
    };
    ($message:literal $(, $arg:expr)* $(,)?) => {
        if false {
            let _ = ($(&$arg,)*);
        }
    };
}

#[cfg(not(feature = "logging"))]
pub(crate) use log_fields;

pub(crate) use log_debug as debug;
pub(crate) use log_info as info;
pub(crate) use log_warn as warn;
