//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout the radical algebra workspace.
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Taxonomy
//!
//! - [`ConfigError`]: a data table or configuration file could not be
//!   loaded. Raised at construction time only, never per lookup. Always
//!   names the table that failed.
//! - [`ValidationError`]: a radical or radical set was rejected.
//! - [`TensorError`]: a tensor request was out of range or too large, or
//!   a cell accessor was given bad coordinates.
//! - [`IdsError`]: an Ideographic Description Sequence could not be parsed,
//!   or a structure could not be filled or enumerated.
//!
//! A lookup miss is not an error. It is represented as `found = false`
//! in the composition result.

use thiserror::Error;

/// Top-level error type for the radical algebra engine.
#[derive(Error, Debug)]
pub enum RalgError {
    /// A data table or configuration file could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A radical or radical set was rejected.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Tensor generation or access failed.
    #[error("tensor error: {0}")]
    Tensor(#[from] TensorError),

    /// An IDS string or structure request was rejected.
    #[error("IDS error: {0}")]
    Ids(#[from] IdsError),

    /// Canonicalization failed while computing a digest.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}

/// Failure to load a data table or the engine configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The table file could not be read.
    #[error("failed to read {table} from {path}: {source}")]
    Read {
        /// Identity of the table (e.g. "oracle table").
        table: String,
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The table could not be parsed as a whole.
    #[error("malformed {table}: {reason}")]
    Malformed {
        /// Identity of the table.
        table: String,
        /// What was wrong.
        reason: String,
    },

    /// A single line of a line-oriented table was rejected.
    #[error("malformed {table} at line {line}: {reason}")]
    MalformedLine {
        /// Identity of the table.
        table: String,
        /// 1-based line number.
        line: usize,
        /// What was wrong.
        reason: String,
    },

    /// The table parsed but contains no usable entries.
    #[error("{table} contains no entries")]
    Empty {
        /// Identity of the table.
        table: String,
    },

    /// The configuration names a Unicode block the oracle table does not define.
    #[error("unknown ideograph block '{0}' in enabled_blocks")]
    UnknownBlock(String),

    /// The engine configuration file is invalid YAML or has bad values.
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}

/// Rejection of a radical or radical set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A radical set must contain at least one radical.
    #[error("radical set must contain at least one radical")]
    EmptySet,

    /// A radical appears more than once in a radical set.
    #[error("radical '{radical}' appears at positions {first} and {second}")]
    DuplicateRadical {
        /// The repeated radical.
        radical: char,
        /// Index of its first occurrence.
        first: usize,
        /// Index of the repeat.
        second: usize,
    },

    /// The code point is neither a valid ideograph nor a radical form.
    #[error("'{0}' (U+{code:04X}) is not a CJK ideograph or radical", code = code_point(.0))]
    InvalidRadical(char),

    /// The code point is a simplified-Chinese form.
    #[error("'{0}' (U+{code:04X}) is a simplified-Chinese form", code = code_point(.0))]
    SimplifiedRadical(char),

    /// Input that should be one character was not.
    #[error("expected a single character, got {0:?}")]
    NotSingleCharacter(String),
}

fn code_point(c: &char) -> u32 {
    u32::from(*c)
}

/// Tensor generation and access errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    /// The requested rank is outside the supported range.
    #[error("rank must be between {min} and {max}, got {rank}")]
    RankOutOfRange {
        /// Requested rank.
        rank: usize,
        /// Smallest supported rank.
        min: usize,
        /// Largest supported rank.
        max: usize,
    },

    /// `len^rank` exceeds the configured cell bound.
    #[error("tensor of {len}^{rank} cells exceeds the limit of {limit} cells")]
    TensorSizeExceeded {
        /// Radical set length.
        len: usize,
        /// Requested rank.
        rank: usize,
        /// Configured cell bound.
        limit: u64,
    },

    /// A coordinate tuple has the wrong number of entries.
    #[error("expected {expected} coordinates, got {actual}")]
    ArityMismatch {
        /// The tensor rank.
        expected: usize,
        /// Number of coordinates supplied.
        actual: usize,
    },

    /// A coordinate is outside its axis.
    #[error("index {index} out of bounds for axis {axis} of size {size}")]
    IndexOutOfBounds {
        /// Axis number.
        axis: usize,
        /// Offending index.
        index: usize,
        /// Axis length.
        size: usize,
    },

    /// A radical used as a coordinate is not in the tensor's radical set.
    #[error("radical '{0}' is not an axis label of this tensor")]
    UnknownLabel(char),
}

/// Ideographic Description Sequence errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdsError {
    /// The IDS string was empty.
    #[error("empty IDS")]
    Empty,

    /// An operator was not followed by enough operands.
    #[error("operator '{operator}' expects {expected} operands, found {found}")]
    Truncated {
        /// The operator missing operands.
        operator: char,
        /// Operator arity.
        expected: usize,
        /// Operands actually present.
        found: usize,
    },

    /// Characters remained after a complete IDS tree was read.
    #[error("trailing input {rest:?} at position {position}")]
    TrailingInput {
        /// Character offset where the trailing input starts.
        position: usize,
        /// The unparsed remainder.
        rest: String,
    },

    /// An Ideographic Description Character outside the twelve supported
    /// operators (e.g. the Unicode 15.1 additions U+2FFC..U+2FFF).
    #[error("unsupported IDS operator '{0}' (U+{code:04X})", code = code_point(.0))]
    UnsupportedOperator(char),

    /// Operators were nested deeper than the parser allows.
    #[error("IDS nests operators deeper than {max} levels")]
    TooDeep {
        /// Nesting limit.
        max: usize,
    },

    /// A structure was filled with the wrong number of radicals.
    #[error("structure has {expected} slots, got {actual} radicals")]
    ArityMismatch {
        /// Number of slots in the structure.
        expected: usize,
        /// Number of radicals supplied.
        actual: usize,
    },

    /// Structure enumeration was asked for zero slots.
    #[error("structures need at least one slot")]
    ZeroSlots,

    /// Structure enumeration was asked for more slots than can be
    /// materialized.
    #[error("cannot enumerate structures over {slots} slots; the limit is {max}")]
    TooManySlots {
        /// Requested slot count.
        slots: usize,
        /// Enumeration limit.
        max: usize,
    },
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values have no deterministic canonical form.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
