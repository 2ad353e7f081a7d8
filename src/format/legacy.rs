//! Legacy JSON board ingestion.
//!
//! Older persisted levels stored a full object graph with display hex
//! colors and explicit per-ball positions. This is a one-time migration
//! input: accept, normalize to the in-memory [`Board`], never emit.

use serde::Deserialize;

use crate::core::{Board, Color, Tube, TubeId};

use super::FormatError;

/// Capacity assumed when a legacy tube does not declare one.
const LEGACY_DEFAULT_CAPACITY: usize = 4;

#[derive(Debug, Deserialize)]
struct LegacyBoard {
    #[serde(rename = "Tubes")]
    tubes: Vec<LegacyTube>,
}

#[derive(Debug, Deserialize)]
struct LegacyTube {
    #[serde(rename = "Balls", default)]
    balls: Vec<LegacyBall>,
    #[serde(rename = "Capacity", default)]
    capacity: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct LegacyBall {
    #[serde(rename = "Color")]
    color: String,
    #[serde(rename = "Position")]
    position: i64,
}

/// Parse a legacy JSON board and normalize it.
///
/// Normalization: balls are re-ordered by their stored `Position`
/// (gaps collapse), hex colors map to palette indices, and tube ids are
/// re-assigned 1-based in array order regardless of the legacy `Id`
/// field; the compact encoding of the result is the canonical identity
/// from here on.
///
/// # Errors
///
/// Returns [`FormatError::LegacyJson`] for malformed JSON and
/// [`FormatError::UnknownLegacyColor`] for a color outside the palette.
pub fn decode_legacy_board(json: &str) -> Result<Board, FormatError> {
    let legacy: LegacyBoard =
        serde_json::from_str(json).map_err(|e| FormatError::LegacyJson(e.to_string()))?;

    if legacy.tubes.is_empty() {
        return Err(FormatError::Empty);
    }

    let mut tubes = Vec::with_capacity(legacy.tubes.len());
    for (index, mut tube) in legacy.tubes.into_iter().enumerate() {
        tube.balls.sort_by_key(|b| b.position);

        let mut colors = Vec::with_capacity(tube.balls.len());
        for ball in &tube.balls {
            colors.push(parse_legacy_color(&ball.color)?);
        }

        // A declared capacity wins; either way never below the actual
        // ball count, so nothing silently drops.
        let capacity = tube
            .capacity
            .unwrap_or(LEGACY_DEFAULT_CAPACITY)
            .max(colors.len());

        tubes.push(Tube::with_balls(
            TubeId::new(index as u32 + 1),
            capacity,
            colors,
        ));
    }

    Ok(Board::new(tubes))
}

/// Legacy colors are usually hex codes; a few early rows stored raw
/// palette indices as strings. Accept both.
fn parse_legacy_color(token: &str) -> Result<Color, FormatError> {
    if let Some(color) = Color::from_hex(token) {
        return Ok(color);
    }
    if let Ok(index) = token.parse::<u8>() {
        return Ok(Color::new(index));
    }
    Err(FormatError::UnknownLegacyColor(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::encode_board;

    #[test]
    fn test_decode_basic_board() {
        let json = r##"{"Tubes":[
            {"Id":0,"Balls":[{"Color":"#FF6B6B","Position":0},{"Color":"#4ECDC4","Position":1}],"Capacity":3},
            {"Id":1,"Balls":[{"Color":"#4ECDC4","Position":0},{"Color":"#FF6B6B","Position":1}],"Capacity":3},
            {"Id":2,"Balls":[],"Capacity":3}
        ]}"##;

        let board = decode_legacy_board(json).unwrap();
        assert_eq!(board.tube_count(), 3);
        assert_eq!(board.tubes()[0].capacity(), 3);
        assert_eq!(encode_board(&board), "T1=0,1;T2=1,0;T3=");
    }

    #[test]
    fn test_positions_reordered_and_gaps_collapsed() {
        // Out-of-order with a hole: positions 4 and 0
        let json = r##"{"Tubes":[
            {"Balls":[{"Color":"#4ECDC4","Position":4},{"Color":"#FF6B6B","Position":0}]}
        ]}"##;

        let board = decode_legacy_board(json).unwrap();
        let tube = &board.tubes()[0];
        assert_eq!(tube.balls(), &[Color::new(0), Color::new(1)]);
    }

    #[test]
    fn test_missing_capacity_defaults() {
        let json = r##"{"Tubes":[{"Balls":[{"Color":"#FF6B6B","Position":0}]}]}"##;
        let board = decode_legacy_board(json).unwrap();
        assert_eq!(board.tubes()[0].capacity(), 4);
    }

    #[test]
    fn test_capacity_never_below_ball_count() {
        let json = r##"{"Tubes":[{"Balls":[
            {"Color":"#FF6B6B","Position":0},
            {"Color":"#FF6B6B","Position":1},
            {"Color":"#FF6B6B","Position":2},
            {"Color":"#FF6B6B","Position":3},
            {"Color":"#FF6B6B","Position":4}
        ]}]}"##;
        let board = decode_legacy_board(json).unwrap();
        assert_eq!(board.tubes()[0].count(), 5);
        assert_eq!(board.tubes()[0].capacity(), 5);
    }

    #[test]
    fn test_numeric_color_tokens_accepted() {
        let json = r##"{"Tubes":[{"Balls":[{"Color":"3","Position":0}]}]}"##;
        let board = decode_legacy_board(json).unwrap();
        assert_eq!(board.tubes()[0].top_color(), Some(Color::new(3)));
    }

    #[test]
    fn test_unknown_color_rejected() {
        let json = r##"{"Tubes":[{"Balls":[{"Color":"#123456","Position":0}]}]}"##;
        assert!(matches!(
            decode_legacy_board(json),
            Err(FormatError::UnknownLegacyColor(_))
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            decode_legacy_board("{not json"),
            Err(FormatError::LegacyJson(_))
        ));
    }

    #[test]
    fn test_no_tubes_rejected() {
        assert_eq!(
            decode_legacy_board(r#"{"Tubes":[]}"#),
            Err(FormatError::Empty)
        );
    }
}
