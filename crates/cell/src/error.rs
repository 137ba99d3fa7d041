use thiserror::Error;

use crate::{MAX_DATA_BITS, MAX_REFS};

/// Structural (de)serialization failure.
///
/// Decode-side variants report that the input is not an instance of the
/// attempted schema; callers trying several schemas in a fixed order treat
/// them as a "try the next one" signal, see
/// [`is_structural`](CellError::is_structural). Overflow variants are
/// encode-side misuses: a value that does not fit a single cell is never
/// truncated or auto-split.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CellError {
    #[error("not enough data: requested {requested} bits, only {left} left")]
    BitsUnderflow { requested: usize, left: usize },

    #[error("no references left")]
    RefsUnderflow,

    #[error("no constructor of `{type_name}` matched, candidates: {candidates:?}")]
    NoConstructorMatched {
        type_name: &'static str,
        candidates: &'static [&'static str],
    },

    #[error("unconsumed data left: {bits} bits, {refs} references")]
    TrailingData { bits: usize, refs: usize },

    #[error("unsupported address: {0}")]
    UnsupportedAddress(&'static str),

    #[error("cell data overflow: {len} + {appended} bits exceed {MAX_DATA_BITS}")]
    BitsOverflow { len: usize, appended: usize },

    #[error("cell cannot hold more than {MAX_REFS} references")]
    RefsOverflow,

    #[error("value does not fit into {bits} bits")]
    IntOverflow { bits: usize },

    #[error("value does not fit into 15 bytes")]
    CoinsOverflow,
}

impl CellError {
    /// Whether this error means "the data is not an instance of the attempted
    /// schema", as opposed to a misuse of [`CellBuilder`](crate::CellBuilder).
    #[inline]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::BitsUnderflow { .. }
                | Self::RefsUnderflow
                | Self::NoConstructorMatched { .. }
                | Self::TrailingData { .. }
                | Self::UnsupportedAddress(_)
        )
    }
}
