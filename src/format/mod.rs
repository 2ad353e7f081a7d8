//! Board wire formats.
//!
//! Two inbound shapes exist, one outbound:
//!
//! - **Compact** (`compact`): `T1=0,0,1;T2=;...`, the canonical
//!   persisted and exchanged representation. Round-trips exactly.
//! - **Legacy JSON** (`legacy`): the shape older persisted levels used
//!   (`{"Tubes":[{"Balls":[{"Color":"#FF6B6B","Position":0}]}]}`).
//!   Accepted and normalized on ingest, never emitted.
//!
//! A malformed board is a [`FormatError`]; callers treat it like a
//! missing level and regenerate. No partial repair is attempted.

mod compact;
mod legacy;

pub use compact::{decode_board, encode_board};
pub use legacy::decode_legacy_board;

use thiserror::Error;

/// Parse failure for either board format.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("board text is empty")]
    Empty,

    #[error("malformed tube entry `{entry}`")]
    MalformedTube { entry: String },

    #[error("invalid color token `{token}`")]
    InvalidColor { token: String },

    #[error("tube {tube} holds {count} balls but capacity is {capacity}")]
    CapacityExceeded {
        tube: u32,
        count: usize,
        capacity: usize,
    },

    #[error("legacy board JSON: {0}")]
    LegacyJson(String),

    #[error("unknown legacy color `{0}`")]
    UnknownLegacyColor(String),
}
