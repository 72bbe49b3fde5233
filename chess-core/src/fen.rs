//! 棋盘布局字符串
//!
//! 只描述棋子摆放的 FEN 子集：`<第0行>/<第1行>/.../<第7行>`，
//! 数字表示连续空格，大写字母为上方阵营（走子方），小写为下方阵营。
//!
//! 示例（初始局面）：
//! `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`

use crate::board::Board;
use crate::constants::BOARD_SIZE;
use crate::error::ChessError;
use crate::piece::{Piece, PieceKind, Side, Square};

/// 初始局面布局
pub const INITIAL_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// 布局字符串处理
pub struct Fen;

impl Fen {
    /// 解析布局字符串为棋盘
    pub fn parse(fen: &str) -> Result<Board, ChessError> {
        let invalid = |reason: String| ChessError::InvalidLayout { reason };

        let placement = fen
            .split_whitespace()
            .next()
            .ok_or_else(|| invalid("Empty layout string".to_string()))?;
        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != BOARD_SIZE {
            return Err(invalid(format!("Expected 8 rows, got {}", rows.len())));
        }

        let mut board = Board::empty();
        for (row_idx, row) in rows.iter().enumerate() {
            let mut col = 0usize;

            for c in row.chars() {
                if col >= BOARD_SIZE {
                    return Err(invalid(format!("Row {} has too many columns", row_idx)));
                }

                if let Some(empty_count) = c.to_digit(10) {
                    if empty_count == 0 {
                        return Err(invalid(format!("Row {} has a zero run", row_idx)));
                    }
                    col += empty_count as usize;
                } else {
                    let piece = Piece::from_tag(c).ok_or(ChessError::InvalidPieceTag(c))?;
                    board.set(Square::new_unchecked(row_idx as u8, col as u8), Some(piece));
                    col += 1;
                }
            }

            if col != BOARD_SIZE {
                return Err(invalid(format!(
                    "Row {} has {} columns, expected 8",
                    row_idx, col
                )));
            }
        }

        for side in [Side::Upper, Side::Lower] {
            let kings = board
                .pieces(side)
                .iter()
                .filter(|(_, piece)| piece.kind == PieceKind::King)
                .count();
            if kings != 1 {
                return Err(invalid(format!("{:?} side has {} kings", side, kings)));
            }
        }

        Ok(board)
    }

    /// 将棋盘转换为布局字符串
    pub fn to_string(board: &Board) -> String {
        let mut rows = Vec::with_capacity(BOARD_SIZE);

        for row in 0..BOARD_SIZE as u8 {
            let mut text = String::new();
            let mut empty_count = 0;

            for col in 0..BOARD_SIZE as u8 {
                if let Some(piece) = board.get(Square::new_unchecked(row, col)) {
                    if empty_count > 0 {
                        text.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    text.push(piece.to_tag());
                } else {
                    empty_count += 1;
                }
            }

            if empty_count > 0 {
                text.push_str(&empty_count.to_string());
            }

            rows.push(text);
        }

        rows.join("/")
    }
}
