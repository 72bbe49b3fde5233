//! 棋子定义

use serde::{Deserialize, Serialize};

use crate::constants::BOARD_SIZE;
use crate::error::ChessError;

/// 棋子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    /// 兵
    Pawn,
    /// 马
    Knight,
    /// 象
    Bishop,
    /// 车
    Rook,
    /// 后
    Queen,
    /// 王
    King,
}

impl PieceKind {
    /// 获取棋子的子力分值（用于 AI 评估）
    pub fn value(&self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 300,
            PieceKind::Bishop => 300,
            PieceKind::Rook => 500,
            PieceKind::Queen => 1000,
            PieceKind::King => 10000,
        }
    }

    /// 获取标记字符（上方阵营大写，下方阵营小写）
    pub fn to_tag(&self, side: Side) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match side {
            Side::Upper => c.to_ascii_uppercase(),
            Side::Lower => c,
        }
    }

    /// 从标记字符解析
    pub fn from_tag(c: char) -> Option<(PieceKind, Side)> {
        let side = if c.is_ascii_uppercase() {
            Side::Upper
        } else {
            Side::Lower
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((kind, side))
    }
}

/// 阵营标记
///
/// 上方阵营（大写标记）永远是当前视角下的走子方，向第 0 行推进；
/// 镜像棋盘时两个阵营的标记互换。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// 大写标记，走子方
    Upper,
    /// 小写标记，对方
    Lower,
}

impl Side {
    /// 获取对方阵营
    pub fn opponent(&self) -> Side {
        match self {
            Side::Upper => Side::Lower,
            Side::Lower => Side::Upper,
        }
    }

    /// 数组索引（王位置缓存使用）
    pub(crate) fn index(&self) -> usize {
        match self {
            Side::Upper => 0,
            Side::Lower => 1,
        }
    }
}

/// 棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    /// 创建新棋子
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Self { kind, side }
    }

    /// 上方阵营的棋子
    pub const fn upper(kind: PieceKind) -> Self {
        Self::new(kind, Side::Upper)
    }

    /// 下方阵营的棋子
    pub const fn lower(kind: PieceKind) -> Self {
        Self::new(kind, Side::Lower)
    }

    /// 获取标记字符
    pub fn to_tag(&self) -> char {
        self.kind.to_tag(self.side)
    }

    /// 从标记字符解析
    pub fn from_tag(c: char) -> Option<Piece> {
        PieceKind::from_tag(c).map(|(kind, side)| Piece { kind, side })
    }

    /// 交换阵营标记（镜像时使用）
    pub fn flipped(&self) -> Piece {
        Piece::new(self.kind, self.side.opponent())
    }

    /// 获取棋子分值
    pub fn value(&self) -> i32 {
        self.kind.value()
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_tag())
    }
}

/// 棋盘格子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    /// 行 (0-7)，第 0 行是上方阵营的升变行
    pub row: u8,
    /// 列 (0-7)
    pub col: u8,
}

impl Square {
    /// 创建新格子
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// 创建新格子（不检查边界，内部使用）
    pub const fn new_unchecked(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// 创建新格子，越界时返回错误
    pub fn try_new(row: i8, col: i8) -> Result<Self, ChessError> {
        if row < 0 || col < 0 {
            return Err(ChessError::InvalidSquare { row, col });
        }
        Self::new(row as u8, col as u8).ok_or(ChessError::InvalidSquare { row, col })
    }

    /// 检查格子是否在棋盘内
    pub fn is_valid(&self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE
    }

    /// 获取偏移后的格子
    pub fn offset(&self, dr: i8, dc: i8) -> Option<Square> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if row >= 0 && (row as usize) < BOARD_SIZE && col >= 0 && (col as usize) < BOARD_SIZE {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// 镜像后的格子（行翻转，列不变）
    pub fn mirrored(&self) -> Square {
        Square {
            row: (BOARD_SIZE - 1) as u8 - self.row,
            col: self.col,
        }
    }

    /// 转换为数组索引（行优先）
    pub fn to_index(&self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    /// 从数组索引转换
    pub fn from_index(index: usize) -> Option<Self> {
        if index < BOARD_SIZE * BOARD_SIZE {
            Some(Square {
                row: (index / BOARD_SIZE) as u8,
                col: (index % BOARD_SIZE) as u8,
            })
        } else {
            None
        }
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_tag() {
        let upper_king = Piece::upper(PieceKind::King);
        assert_eq!(upper_king.to_tag(), 'K');

        let lower_knight = Piece::lower(PieceKind::Knight);
        assert_eq!(lower_knight.to_tag(), 'n');

        assert_eq!(Piece::from_tag('Q'), Some(Piece::upper(PieceKind::Queen)));
        assert_eq!(Piece::from_tag('p'), Some(Piece::lower(PieceKind::Pawn)));
        assert_eq!(Piece::from_tag('x'), None);
    }

    #[test]
    fn test_piece_flipped() {
        let rook = Piece::upper(PieceKind::Rook);
        assert_eq!(rook.flipped(), Piece::lower(PieceKind::Rook));
        assert_eq!(rook.flipped().flipped(), rook);
    }

    #[test]
    fn test_piece_values() {
        assert_eq!(PieceKind::Pawn.value(), 100);
        assert_eq!(PieceKind::Knight.value(), 300);
        assert_eq!(PieceKind::Bishop.value(), 300);
        assert_eq!(PieceKind::Rook.value(), 500);
        assert_eq!(PieceKind::Queen.value(), 1000);
        assert_eq!(PieceKind::King.value(), 10000);
    }

    #[test]
    fn test_square_valid() {
        assert!(Square::new(0, 0).is_some());
        assert!(Square::new(7, 7).is_some());
        assert!(Square::new(8, 0).is_none());
        assert!(Square::new(0, 8).is_none());
        assert!(Square::try_new(-1, 3).is_err());
    }

    #[test]
    fn test_square_offset() {
        let sq = Square::new_unchecked(0, 7);
        assert_eq!(sq.offset(1, -1), Some(Square::new_unchecked(1, 6)));
        assert_eq!(sq.offset(-1, 0), None);
        assert_eq!(sq.offset(0, 1), None);
    }

    #[test]
    fn test_square_mirrored() {
        let sq = Square::new_unchecked(6, 4);
        assert_eq!(sq.mirrored(), Square::new_unchecked(1, 4));
        assert_eq!(sq.mirrored().mirrored(), sq);
    }

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::Upper.opponent(), Side::Lower);
        assert_eq!(Side::Lower.opponent(), Side::Upper);
    }
}
