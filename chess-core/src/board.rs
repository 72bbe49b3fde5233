//! 棋盘状态
//!
//! 棋盘永远以上方阵营（大写标记）为走子方。对方走棋前先镜像棋盘，
//! 这样同一套走法生成和评估逻辑可以服务双方。

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::{BOARD_SIZE, SQUARE_COUNT};
use crate::error::ChessError;
use crate::moves::{Move, MoveGenerator, Special};
use crate::piece::{Piece, PieceKind, Side, Square};

/// 对局状态（以走子方视角）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// 还有合法走法
    Ongoing,
    /// 无子可动且王被攻击
    Checkmate,
    /// 无子可动但王安全
    Stalemate,
}

/// 棋盘
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// 8x8 棋盘，索引为 row * 8 + col，使用 Vec 以支持 serde
    squares: Vec<Option<Piece>>,
    /// 双方王的位置缓存，按 Side::index 索引
    kings: [Option<Square>; 2],
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: vec![None; SQUARE_COUNT],
            kings: [None, None],
        }
    }

    /// 创建初始棋盘
    pub fn initial() -> Self {
        let mut board = Self::empty();
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        for (col, kind) in back_rank.into_iter().enumerate() {
            let col = col as u8;
            // 下方阵营（对方）在第 0、1 行
            board.set(Square::new_unchecked(0, col), Some(Piece::lower(kind)));
            board.set(Square::new_unchecked(1, col), Some(Piece::lower(PieceKind::Pawn)));
            // 上方阵营（走子方）在第 6、7 行
            board.set(Square::new_unchecked(6, col), Some(Piece::upper(PieceKind::Pawn)));
            board.set(Square::new_unchecked(7, col), Some(Piece::upper(kind)));
        }

        board
    }

    /// 获取指定格子的棋子
    pub fn get(&self, sq: Square) -> Option<Piece> {
        if sq.is_valid() {
            self.squares[sq.to_index()]
        } else {
            None
        }
    }

    /// 设置指定格子的棋子，同步维护王的位置缓存
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        if !sq.is_valid() {
            return;
        }
        let index = sq.to_index();
        if let Some(old) = self.squares[index] {
            if old.kind == PieceKind::King && self.kings[old.side.index()] == Some(sq) {
                self.kings[old.side.index()] = None;
            }
        }
        if let Some(new) = piece {
            if new.kind == PieceKind::King {
                self.kings[new.side.index()] = Some(sq);
            }
        }
        self.squares[index] = piece;
    }

    /// 获取王的位置（缓存）
    pub fn king_square(&self, side: Side) -> Option<Square> {
        self.kings[side.index()]
    }

    /// 获取指定阵营的所有棋子（行优先顺序）
    pub fn pieces(&self, side: Side) -> Vec<(Square, Piece)> {
        self.all_pieces()
            .into_iter()
            .filter(|(_, piece)| piece.side == side)
            .collect()
    }

    /// 获取所有棋子（行优先顺序）
    pub fn all_pieces(&self) -> Vec<(Square, Piece)> {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(index, piece)| {
                let piece = (*piece)?;
                Square::from_index(index).map(|sq| (sq, piece))
            })
            .collect()
    }

    /// 计算指定阵营的子力总分
    pub fn material(&self, side: Side) -> i32 {
        self.squares
            .iter()
            .flatten()
            .filter(|piece| piece.side == side)
            .map(|piece| piece.value())
            .sum()
    }

    /// 水平镜像棋盘：行序反转，双方标记互换
    ///
    /// 镜像两次还原原棋盘。
    pub fn mirror_horizontally(&mut self) {
        let mut squares = vec![None; SQUARE_COUNT];
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let from = Square::new_unchecked(row as u8, col as u8);
                squares[from.mirrored().to_index()] =
                    self.squares[from.to_index()].map(|piece| piece.flipped());
            }
        }
        self.squares = squares;

        let [upper, lower] = self.kings;
        self.kings = [lower.map(|sq| sq.mirrored()), upper.map(|sq| sq.mirrored())];
    }

    /// 执行走法
    ///
    /// 只检查走法记录与棋盘是否一致，不检查规则合法性；
    /// 调用方应传入 `all_legal_moves` 生成的走法。
    pub fn execute_move(&mut self, mv: &Move) -> Result<(), ChessError> {
        self.check_executable(mv).inspect_err(|err| {
            warn!("拒绝执行走法 {}: {}", mv, err);
        })?;
        self.apply(mv);
        Ok(())
    }

    /// 撤销走法（execute_move 的逆操作）
    pub fn undo_move(&mut self, mv: &Move) -> Result<(), ChessError> {
        self.check_undoable(mv).inspect_err(|err| {
            warn!("拒绝撤销走法 {}: {}", mv, err);
        })?;
        self.revert(mv);
        Ok(())
    }

    /// 走子方的王是否安全
    pub fn king_safe(&self) -> bool {
        MoveGenerator::king_safe(self)
    }

    /// 生成走子方的所有合法走法
    pub fn all_legal_moves(&mut self) -> Vec<Move> {
        MoveGenerator::generate_legal(self)
    }

    /// 走子方视角的对局状态
    pub fn status(&mut self) -> GameStatus {
        if !self.all_legal_moves().is_empty() {
            GameStatus::Ongoing
        } else if self.king_safe() {
            GameStatus::Stalemate
        } else {
            GameStatus::Checkmate
        }
    }

    /// 执行走法（不检查）
    pub(crate) fn apply(&mut self, mv: &Move) {
        let piece = self.get(mv.from);
        self.set(mv.from, None);
        match mv.special {
            Special::None => self.set(mv.to, piece),
            Special::Promotion(kind) => {
                self.set(mv.to, piece.map(|p| Piece::new(kind, p.side)));
            }
            Special::EnPassant { captured_at } => {
                self.set(captured_at, None);
                self.set(mv.to, piece);
            }
        }
    }

    /// 撤销走法（不检查）
    pub(crate) fn revert(&mut self, mv: &Move) {
        let moved = self.get(mv.to);
        let original = match mv.special {
            Special::Promotion(_) => moved.map(|p| Piece::new(PieceKind::Pawn, p.side)),
            _ => moved,
        };
        self.set(mv.from, original);
        match mv.special {
            Special::EnPassant { captured_at } => {
                self.set(mv.to, None);
                self.set(captured_at, mv.captured);
            }
            _ => self.set(mv.to, mv.captured),
        }
    }

    /// 走法涉及的格子必须都在棋盘内
    fn check_on_board(mv: &Move) -> Result<(), ChessError> {
        let mut squares = vec![mv.from, mv.to];
        if let Special::EnPassant { captured_at } = mv.special {
            squares.push(captured_at);
        }
        if squares.iter().all(|sq| sq.is_valid()) {
            return Ok(());
        }
        Err(ChessError::InvalidMove {
            record: mv.to_record(),
            reason: "square is off the board".to_string(),
        })
    }

    fn check_executable(&self, mv: &Move) -> Result<(), ChessError> {
        let invalid = |reason: &str| ChessError::InvalidMove {
            record: mv.to_record(),
            reason: reason.to_string(),
        };

        Self::check_on_board(mv)?;
        let piece = self.get(mv.from).ok_or_else(|| invalid("origin square is empty"))?;
        if let Some(captured) = mv.captured {
            if captured.side == piece.side {
                return Err(invalid("captured piece belongs to the mover"));
            }
        }

        match mv.special {
            Special::None | Special::Promotion(_) => {
                if self.get(mv.to) != mv.captured {
                    return Err(invalid("destination does not hold the captured piece"));
                }
            }
            Special::EnPassant { captured_at } => {
                if self.get(mv.to).is_some() {
                    return Err(invalid("en passant destination is occupied"));
                }
                if mv.captured.is_none() || self.get(captured_at) != mv.captured {
                    return Err(invalid("en passant square does not hold the captured pawn"));
                }
            }
        }

        if mv.special != Special::None && piece.kind != PieceKind::Pawn {
            return Err(invalid("special move by a non-pawn"));
        }
        Ok(())
    }

    fn check_undoable(&self, mv: &Move) -> Result<(), ChessError> {
        let invalid = |reason: &str| ChessError::InvalidMove {
            record: mv.to_record(),
            reason: reason.to_string(),
        };

        Self::check_on_board(mv)?;
        let piece = self.get(mv.to).ok_or_else(|| invalid("destination square is empty"))?;
        if self.get(mv.from).is_some() {
            return Err(invalid("origin square is occupied"));
        }
        match mv.special {
            Special::None => {}
            Special::Promotion(kind) => {
                if piece.kind != kind {
                    return Err(invalid("destination does not hold the promoted piece"));
                }
            }
            Special::EnPassant { captured_at } => {
                if piece.kind != PieceKind::Pawn {
                    return Err(invalid("en passant by a non-pawn"));
                }
                if self.get(captured_at).is_some() {
                    return Err(invalid("en passant square is occupied"));
                }
            }
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}
