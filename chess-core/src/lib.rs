//! 国际象棋规则核心库
//!
//! 包含:
//! - 棋子、格子、棋盘等核心数据结构
//! - 方向偏移表
//! - 走法生成和王的安全检查
//! - 走法执行/撤销与棋盘镜像
//! - 走法记录格式（7 字段文本、bincode、JSON）
//! - 棋盘布局字符串和坐标记谱法

mod board;
mod constants;
mod error;
mod fen;
mod moves;
mod notation;
pub mod offsets;
mod piece;
mod record;

pub use board::{Board, GameStatus};
pub use constants::*;
pub use error::{ChessError, CodecError, Result};
pub use fen::{Fen, INITIAL_FEN};
pub use moves::{Move, MoveGenerator, Special};
pub use notation::Notation;
pub use piece::{Piece, PieceKind, Side, Square};
pub use record::ScoredMove;
