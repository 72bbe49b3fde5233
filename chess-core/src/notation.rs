//! 坐标记谱法
//!
//! 列用 `a`..`h` 表示（第 0 列为 a），横线用 `1`..`8` 表示（第 7 行为 1）。
//! 格式：`<起始格><目标格>[升变]`，例如 `e2e4`、`a7a8q`。
//! 走子方始终是上方阵营，所以坐标相对上方阵营的视角。

use crate::constants::BOARD_SIZE;
use crate::error::ChessError;
use crate::moves::{Move, Special};
use crate::piece::{PieceKind, Side, Square};

/// 坐标记谱法
pub struct Notation;

impl Notation {
    /// 格子转换为坐标，例如 (6, 4) -> "e2"
    pub fn square_name(sq: Square) -> String {
        let file = char::from(b'a' + sq.col);
        let rank = BOARD_SIZE as u8 - sq.row;
        format!("{}{}", file, rank)
    }

    /// 解析坐标，例如 "e2" -> (6, 4)
    pub fn parse_square(text: &str) -> Option<Square> {
        let mut chars = text.chars();
        let file = chars.next()?.to_ascii_lowercase();
        let rank = chars.next()?.to_digit(10)?;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !(1..=8).contains(&rank) {
            return None;
        }
        Square::new(BOARD_SIZE as u8 - rank as u8, file as u8 - b'a')
    }

    /// 将走法转换为坐标记谱
    pub fn to_coordinate(mv: &Move) -> String {
        let mut text = format!(
            "{}{}",
            Self::square_name(mv.from),
            Self::square_name(mv.to)
        );
        if let Special::Promotion(kind) = mv.special {
            text.push(kind.to_tag(Side::Lower));
        }
        text
    }

    /// 解析坐标记谱，返回 (起始格, 目标格, 升变棋子)
    pub fn from_coordinate(
        text: &str,
    ) -> Result<(Square, Square, Option<PieceKind>), ChessError> {
        let text = text.trim();
        let invalid = |reason: &str| ChessError::InvalidRecord {
            record: text.to_string(),
            reason: reason.to_string(),
        };

        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(invalid("expected coordinates like e2e4"));
        }

        let from = Self::parse_square(&text[0..2]).ok_or_else(|| invalid("bad origin square"))?;
        let to = Self::parse_square(&text[2..4]).ok_or_else(|| invalid("bad destination square"))?;
        let promotion = match text[4..].chars().next() {
            Some(tag) => {
                let (kind, _) = PieceKind::from_tag(tag).ok_or(ChessError::InvalidPieceTag(tag))?;
                Some(kind)
            }
            None => None,
        };

        Ok((from, to, promotion))
    }

    /// 在合法走法列表中查找坐标记谱对应的走法
    ///
    /// 升变可以省略后缀，默认升变为后。
    pub fn find_move(legal: &[Move], text: &str) -> Result<Move, ChessError> {
        let (from, to, promotion) = Self::from_coordinate(text)?;

        legal
            .iter()
            .find(|mv| {
                mv.from == from
                    && mv.to == to
                    && match (mv.special, promotion) {
                        (Special::Promotion(kind), Some(wanted)) => kind == wanted,
                        (_, Some(_)) => false,
                        _ => true,
                    }
            })
            .copied()
            .ok_or_else(|| ChessError::IllegalMove(text.trim().to_string()))
    }
}
