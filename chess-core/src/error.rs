//! 错误类型定义

use thiserror::Error;

/// 象棋规则错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// 无效的格子坐标
    #[error("Invalid square: ({row}, {col})")]
    InvalidSquare { row: i8, col: i8 },

    /// 无效的棋子标记
    #[error("Invalid piece tag: {0:?}")]
    InvalidPieceTag(char),

    /// 走法记录与棋盘状态不一致
    #[error("Invalid move {record}: {reason}")]
    InvalidMove { record: String, reason: String },

    /// 不在合法走法列表中的走法
    #[error("Illegal move: {0}")]
    IllegalMove(String),

    /// 无法解析的走法记录
    #[error("Invalid move record {record:?}: {reason}")]
    InvalidRecord { record: String, reason: String },

    /// 无效的棋盘布局字符串
    #[error("Invalid layout: {reason}")]
    InvalidLayout { reason: String },

    /// 走子方无子可动（将死或困毙）
    #[error("No legal moves (in check: {in_check})")]
    NoLegalMoves { in_check: bool },
}

/// 编解码错误
#[derive(Error, Debug)]
pub enum CodecError {
    /// 序列化错误（bincode）
    #[error("Bincode serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    /// JSON 序列化错误
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 象棋规则错误
    #[error("Chess error: {0}")]
    Chess(#[from] ChessError),
}

/// 规则操作结果类型
pub type Result<T> = std::result::Result<T, ChessError>;
