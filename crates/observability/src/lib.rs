//! Process-wide logging setup shared by salesdesk binaries.

/// Install the global subscriber (see [`tracing::init`]).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    tracing::init();
}

/// Subscriber configuration (filters, output format).
pub mod tracing;

pub use self::tracing::LogFormat;
