//! 走法生成和验证
//!
//! 所有走法都以上方阵营为走子方生成。每个候选走法都会在棋盘上模拟一次，
//! 只有走完后己方王仍然安全的走法才会被保留。

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::constants::{EN_PASSANT_ROW, PAWN_START_ROW, PROMOTION_ROW};
use crate::offsets::{self, Ray};
use crate::piece::{Piece, PieceKind, Side, Square};

/// 走法的特殊规则标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Special {
    /// 普通走法
    None,
    /// 兵升变为指定棋子
    Promotion(PieceKind),
    /// 吃过路兵，被吃的兵不在目标格上
    EnPassant { captured_at: Square },
}

/// 走法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 起始格
    pub from: Square,
    /// 目标格
    pub to: Square,
    /// 被吃的棋子（如果有）
    pub captured: Option<Piece>,
    /// 升变 / 吃过路兵标记
    pub special: Special,
}

impl Move {
    /// 创建新走法
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            captured: None,
            special: Special::None,
        }
    }

    /// 创建带吃子的走法
    pub fn with_capture(from: Square, to: Square, captured: Piece) -> Self {
        Self {
            from,
            to,
            captured: Some(captured),
            special: Special::None,
        }
    }

    /// 创建升变走法（只升变为后）
    pub fn promotion(from: Square, to: Square, captured: Option<Piece>) -> Self {
        Self {
            from,
            to,
            captured,
            special: Special::Promotion(PieceKind::Queen),
        }
    }

    /// 创建吃过路兵走法
    pub fn en_passant(from: Square, to: Square, captured_at: Square, captured: Piece) -> Self {
        Self {
            from,
            to,
            captured: Some(captured),
            special: Special::EnPassant { captured_at },
        }
    }

    /// 是否吃子
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// 是否升变
    pub fn is_promotion(&self) -> bool {
        matches!(self.special, Special::Promotion(_))
    }

    /// 是否吃过路兵
    pub fn is_en_passant(&self) -> bool {
        matches!(self.special, Special::EnPassant { .. })
    }

    /// 被吃棋子所在的格子
    pub fn captured_square(&self) -> Option<Square> {
        self.captured?;
        match self.special {
            Special::EnPassant { captured_at } => Some(captured_at),
            _ => Some(self.to),
        }
    }

    /// 在镜像棋盘上表示同一个走法
    pub fn mirrored(&self) -> Move {
        Move {
            from: self.from.mirrored(),
            to: self.to.mirrored(),
            captured: self.captured.map(|piece| piece.flipped()),
            special: match self.special {
                Special::EnPassant { captured_at } => Special::EnPassant {
                    captured_at: captured_at.mirrored(),
                },
                other => other,
            },
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_record())
    }
}

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 生成走子方（上方阵营）的所有合法走法，按棋盘行优先顺序排列
    pub fn generate_legal(board: &mut Board) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);

        for (sq, piece) in board.pieces(Side::Upper) {
            Self::generate_piece_moves(board, sq, piece, &mut moves);
        }

        moves
    }

    /// 生成指定棋子的所有合法走法
    pub fn generate_piece_moves(board: &mut Board, from: Square, piece: Piece, moves: &mut Vec<Move>) {
        match offsets::directions(piece.kind) {
            Some(directions) => Self::generate_table_moves(board, from, directions, moves),
            None => Self::generate_pawn_moves(board, from, moves),
        }
    }

    /// 按偏移表生成走法（象、车、后、马、王）
    fn generate_table_moves(board: &mut Board, from: Square, directions: &[Ray], moves: &mut Vec<Move>) {
        for ray in directions {
            for &(dr, dc) in ray.iter() {
                let Some(to) = from.offset(dr, dc) else {
                    break;
                };

                match board.get(to) {
                    // 己方棋子挡住
                    Some(target) if target.side == Side::Upper => break,
                    Some(target) => {
                        Self::push_if_king_safe(board, Move::with_capture(from, to, target), moves);
                        break;
                    }
                    None => Self::push_if_king_safe(board, Move::new(from, to), moves),
                }
            }
        }
    }

    /// 生成兵的走法：前进/跳步、斜吃、吃过路兵、升变
    fn generate_pawn_moves(board: &mut Board, from: Square, moves: &mut Vec<Move>) {
        Self::pawn_advances(board, from, moves);
        Self::pawn_captures(board, from, moves);
        Self::pawn_en_passant(board, from, moves);
        Self::pawn_promotions(board, from, moves);
    }

    /// 前进一格，起始行可以前进两格
    fn pawn_advances(board: &mut Board, from: Square, moves: &mut Vec<Move>) {
        if from.row == PROMOTION_ROW {
            return;
        }
        let Some(one) = from.offset(-1, 0) else {
            return;
        };
        if board.get(one).is_some() {
            return;
        }
        Self::push_if_king_safe(board, Move::new(from, one), moves);

        if from.row == PAWN_START_ROW {
            if let Some(two) = from.offset(-2, 0) {
                if board.get(two).is_none() {
                    Self::push_if_king_safe(board, Move::new(from, two), moves);
                }
            }
        }
    }

    /// 斜前方吃子
    fn pawn_captures(board: &mut Board, from: Square, moves: &mut Vec<Move>) {
        if from.row == PROMOTION_ROW {
            return;
        }
        for dc in [-1i8, 1i8] {
            if let Some(to) = from.offset(-1, dc) {
                if let Some(target) = Self::enemy_at(board, to) {
                    Self::push_if_king_safe(board, Move::with_capture(from, to, target), moves);
                }
            }
        }
    }

    /// 吃过路兵：旁边是对方的兵，斜前方为空
    fn pawn_en_passant(board: &mut Board, from: Square, moves: &mut Vec<Move>) {
        if from.row != EN_PASSANT_ROW {
            return;
        }
        for dc in [-1i8, 1i8] {
            let (Some(beside), Some(to)) = (from.offset(0, dc), from.offset(-1, dc)) else {
                continue;
            };
            let enemy_pawn = Piece::lower(PieceKind::Pawn);
            if board.get(beside) == Some(enemy_pawn) && board.get(to).is_none() {
                Self::push_if_king_safe(board, Move::en_passant(from, to, beside, enemy_pawn), moves);
            }
        }
    }

    /// 升变：从倒数第二行前进或斜吃到底线
    fn pawn_promotions(board: &mut Board, from: Square, moves: &mut Vec<Move>) {
        if from.row != PROMOTION_ROW {
            return;
        }
        if let Some(to) = from.offset(-1, 0) {
            if board.get(to).is_none() {
                Self::push_if_king_safe(board, Move::promotion(from, to, None), moves);
            }
        }
        for dc in [-1i8, 1i8] {
            if let Some(to) = from.offset(-1, dc) {
                if let Some(target) = Self::enemy_at(board, to) {
                    Self::push_if_king_safe(board, Move::promotion(from, to, Some(target)), moves);
                }
            }
        }
    }

    fn enemy_at(board: &Board, sq: Square) -> Option<Piece> {
        board.get(sq).filter(|piece| piece.side == Side::Lower)
    }

    /// 模拟走法，己方王安全时加入列表，然后还原棋盘
    fn push_if_king_safe(board: &mut Board, mv: Move, moves: &mut Vec<Move>) {
        board.apply(&mv);
        let safe = Self::king_safe(board);
        board.revert(&mv);
        if safe {
            moves.push(mv);
        }
    }

    /// 检查走子方（上方阵营）的王是否安全
    ///
    /// 从王的位置沿 8 条射线向外找第一个棋子，再单独检查 8 个马跳位置。
    pub fn king_safe(board: &Board) -> bool {
        let Some(king) = board.king_square(Side::Upper) else {
            // 没有王，视为安全
            return true;
        };

        for ray in offsets::QUEEN.iter() {
            for &(dr, dc) in ray.iter() {
                let Some(sq) = king.offset(dr, dc) else {
                    break;
                };
                if let Some(piece) = board.get(sq) {
                    if piece.side == Side::Lower && Self::threatens_along_ray(piece.kind, dr, dc) {
                        return false;
                    }
                    break;
                }
            }
        }

        let enemy_knight = Some(Piece::lower(PieceKind::Knight));
        for ray in offsets::KNIGHT.iter() {
            let (dr, dc) = ray[0];
            if let Some(sq) = king.offset(dr, dc) {
                if board.get(sq) == enemy_knight {
                    return false;
                }
            }
        }

        true
    }

    /// 射线上第一个对方棋子能否从该位移攻击到王
    fn threatens_along_ray(kind: PieceKind, dr: i8, dc: i8) -> bool {
        let diagonal = dr.abs() == dc.abs();
        match kind {
            PieceKind::King => dr.abs() <= 1 && dc.abs() <= 1,
            // 对方的兵向行号增大的方向走，只能从王的上一行斜向攻击
            PieceKind::Pawn => diagonal && dr == -1,
            PieceKind::Bishop => diagonal,
            PieceKind::Rook => !diagonal,
            PieceKind::Queen => true,
            // 马只在专门的马跳检查里处理
            PieceKind::Knight => false,
        }
    }
}
