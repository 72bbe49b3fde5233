//! 规则常量定义

/// 棋盘边长（行数 = 列数）
pub const BOARD_SIZE: usize = 8;

/// 棋盘格子总数
pub const SQUARE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// 滑行棋子单个方向的最大步数
pub const MAX_RAY_LENGTH: usize = 7;

/// 上方阵营兵的起始行（可以一次走两格）
pub const PAWN_START_ROW: u8 = 6;

/// 上方阵营兵可以吃过路兵的行
pub const EN_PASSANT_ROW: u8 = 3;

/// 上方阵营兵升变前所在的行
pub const PROMOTION_ROW: u8 = 1;

/// 升变的目标行（上方阵营的底线）
pub const LAST_ROW: u8 = 0;

/// 走法记录的字段数
pub const MOVE_RECORD_LEN: usize = 7;

/// 走法记录中的空白字段
pub const BLANK_FIELD: char = '-';

/// 升变走法的标记字符
pub const PROMOTION_MARKER: char = 'P';
