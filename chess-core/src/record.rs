//! 走法记录格式
//!
//! 文本格式固定 7 个字段：
//! `<起始行><起始列><目标行><目标列><被吃棋子><字段6><字段7>`
//!
//! - 普通走法：字段 6、7 为空白 `-`
//! - 升变：字段 6 为升变后的棋子（`Q`），字段 7 为 `P`
//! - 吃过路兵：字段 6、7 为被吃兵所在的行和列
//!
//! 例：`6444---`、`1404-QP`、`3423p33`。带评分的结果在 7 个字段后追加十进制分数。

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{BLANK_FIELD, MOVE_RECORD_LEN, PROMOTION_MARKER};
use crate::error::{ChessError, CodecError};
use crate::moves::{Move, Special};
use crate::piece::{Piece, PieceKind, Side, Square};

impl Move {
    /// 转换为 7 字段文本记录
    pub fn to_record(&self) -> String {
        let mut record = String::with_capacity(MOVE_RECORD_LEN);
        record.push(digit(self.from.row));
        record.push(digit(self.from.col));
        record.push(digit(self.to.row));
        record.push(digit(self.to.col));
        record.push(self.captured.map_or(BLANK_FIELD, |piece| piece.to_tag()));
        match self.special {
            Special::None => {
                record.push(BLANK_FIELD);
                record.push(BLANK_FIELD);
            }
            Special::Promotion(kind) => {
                record.push(kind.to_tag(Side::Upper));
                record.push(PROMOTION_MARKER);
            }
            Special::EnPassant { captured_at } => {
                record.push(digit(captured_at.row));
                record.push(digit(captured_at.col));
            }
        }
        record
    }

    /// 从 7 字段文本记录解析
    pub fn from_record(record: &str) -> Result<Move, ChessError> {
        let invalid = |reason: &str| ChessError::InvalidRecord {
            record: record.to_string(),
            reason: reason.to_string(),
        };

        let fields: Vec<char> = record.chars().collect();
        if fields.len() != MOVE_RECORD_LEN {
            return Err(invalid("expected exactly 7 fields"));
        }

        let from = square(fields[0], fields[1]).ok_or_else(|| invalid("bad origin square"))?;
        let to = square(fields[2], fields[3]).ok_or_else(|| invalid("bad destination square"))?;
        let captured = match fields[4] {
            BLANK_FIELD => None,
            tag => Some(Piece::from_tag(tag).ok_or(ChessError::InvalidPieceTag(tag))?),
        };

        let special = match (fields[5], fields[6]) {
            (BLANK_FIELD, BLANK_FIELD) => Special::None,
            (tag, PROMOTION_MARKER) => {
                let (kind, _) = PieceKind::from_tag(tag).ok_or(ChessError::InvalidPieceTag(tag))?;
                if matches!(kind, PieceKind::Pawn | PieceKind::King) {
                    return Err(invalid("cannot promote to pawn or king"));
                }
                Special::Promotion(kind)
            }
            (row, col) => {
                let captured_at = square(row, col).ok_or_else(|| invalid("bad special field"))?;
                if captured.is_none() {
                    return Err(invalid("en passant without a captured pawn"));
                }
                Special::EnPassant { captured_at }
            }
        };

        Ok(Move {
            from,
            to,
            captured,
            special,
        })
    }

    /// 二进制编码（bincode）
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        Ok(bincode::serialize(self)?)
    }

    /// 二进制解码（bincode）
    pub fn from_bytes(bytes: &[u8]) -> Result<Move, CodecError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl FromStr for Move {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::from_record(s)
    }
}

fn digit(value: u8) -> char {
    char::from(b'0' + value)
}

fn square(row: char, col: char) -> Option<Square> {
    let row = row.to_digit(10)?;
    let col = col.to_digit(10)?;
    Square::new(row as u8, col as u8)
}

/// 搜索结果：走法加评分
///
/// 没有走法时（搜索起点无子可动）只有评分。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredMove {
    /// 最佳走法
    pub mv: Option<Move>,
    /// 以搜索发起方视角的评分
    pub score: i32,
}

impl ScoredMove {
    pub fn new(mv: Option<Move>, score: i32) -> Self {
        Self { mv, score }
    }

    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string(self)?)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl std::fmt::Display for ScoredMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.mv {
            Some(mv) => write!(f, "{}{}", mv.to_record(), self.score),
            None => write!(f, "{}", self.score),
        }
    }
}

impl FromStr for ScoredMove {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ChessError::InvalidRecord {
            record: s.to_string(),
            reason: "bad score".to_string(),
        };

        // 前 7 个字段能解析为走法时，分数在后缀里；否则整个字符串都是分数
        if s.is_char_boundary(MOVE_RECORD_LEN) && s.len() > MOVE_RECORD_LEN {
            let (record, score) = s.split_at(MOVE_RECORD_LEN);
            if let Ok(mv) = Move::from_record(record) {
                let score = score.parse().map_err(|_| invalid())?;
                return Ok(ScoredMove::new(Some(mv), score));
            }
        }
        let score = s.parse().map_err(|_| invalid())?;
        Ok(ScoredMove::new(None, score))
    }
}
