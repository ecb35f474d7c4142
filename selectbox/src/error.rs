//! Configuration errors.

use thiserror::Error;

/// Errors reported when building a machine from invalid options.
///
/// Once built, a machine never fails: runtime problems such as an empty list
/// or an unmounted element degrade to no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A zero timeout would clear the type-ahead buffer before the next key.
    #[error("type-ahead timeout must be greater than zero")]
    ZeroTypeAheadTimeout,

    /// The host filters items itself, so a matcher would never be used.
    #[error("a matcher was supplied but filtering is controlled by the host")]
    MatcherWithControlledFiltering,
}
