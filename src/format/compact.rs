//! Compact board codec: `T1=0,0,1;T2=;T3=2`.
//!
//! Tube labels are 1-based and follow display order. Balls are listed
//! bottom-to-top as palette indices. An empty tube is a bare label.
//! The format carries no capacity, so decoding takes it from the caller
//! (the owning level knows it).

use crate::core::{Board, Color, Tube, TubeId};

use super::FormatError;

/// Serialize a board's tube contents to the compact format.
#[must_use]
pub fn encode_board(board: &Board) -> String {
    let mut out = String::with_capacity(board.tube_count() * 12);
    for (i, tube) in board.tubes().iter().enumerate() {
        if i > 0 {
            out.push(';');
        }
        out.push('T');
        out.push_str(&(i + 1).to_string());
        out.push('=');
        for (j, color) in tube.balls().iter().enumerate() {
            if j > 0 {
                out.push(',');
            }
            out.push_str(&color.index().to_string());
        }
    }
    out
}

/// Parse a compact board string into an in-progress board.
///
/// Tube ids are assigned 1-based in the order tubes appear, matching the
/// labels the encoder writes. Capacity applies uniformly to every tube.
///
/// # Errors
///
/// Returns [`FormatError`] for an empty string, a tube entry without a
/// `T<n>=` label, an unparsable color token, or a tube holding more
/// balls than `capacity`.
pub fn decode_board(text: &str, capacity: usize) -> Result<Board, FormatError> {
    if text.is_empty() {
        return Err(FormatError::Empty);
    }

    let mut tubes = Vec::new();
    for (index, entry) in text.split(';').enumerate() {
        let body = parse_label(entry)?;
        let id = TubeId::new(index as u32 + 1);

        let mut colors = Vec::new();
        if !body.is_empty() {
            for token in body.split(',') {
                let value: u8 = token.parse().map_err(|_| FormatError::InvalidColor {
                    token: token.to_string(),
                })?;
                colors.push(Color::new(value));
            }
        }

        if colors.len() > capacity {
            return Err(FormatError::CapacityExceeded {
                tube: id.raw(),
                count: colors.len(),
                capacity,
            });
        }

        tubes.push(Tube::with_balls(id, capacity, colors));
    }

    Ok(Board::new(tubes))
}

/// Split `T<n>=<body>` into its body, validating the label.
fn parse_label(entry: &str) -> Result<&str, FormatError> {
    let malformed = || FormatError::MalformedTube {
        entry: entry.to_string(),
    };

    let rest = entry.strip_prefix('T').ok_or_else(malformed)?;
    let (label, body) = rest.split_once('=').ok_or_else(malformed)?;
    if label.is_empty() || label.parse::<u32>().is_err() {
        return Err(malformed());
    }
    Ok(body)
}
