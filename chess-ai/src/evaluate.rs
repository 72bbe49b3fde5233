//! 棋局评估函数

use chess_core::{Board, Side};

use crate::search::Role;

/// 将死基础分
pub const MATE_SCORE: i32 = 100_000;

/// 每剩余一层搜索深度的加分
pub const DEPTH_BONUS: i32 = 50;

/// 评估器
///
/// 所有分值都以搜索发起方（引擎）的视角给出。`Role::Max` 表示引擎在上方（轮到引擎走），
/// `Role::Min` 表示棋盘已镜像，对方在上方。
pub struct Evaluator;

impl Evaluator {
    /// 上方阵营的子力总和
    pub fn material_value(board: &Board) -> i32 {
        board.material(Side::Upper)
    }

    /// 叶子节点评估：子力差加深度奖励
    ///
    /// 引擎在上方时为 `己方 - 对方 + depth*50`，
    /// 对方在上方时为 `己方 - 对方 - depth*50`。
    pub fn evaluate(board: &Board, depth: u8, role: Role) -> i32 {
        let top = Self::material_value(board);
        let bottom = board.material(Side::Lower);
        let bonus = depth as i32 * DEPTH_BONUS;

        match role {
            Role::Max => top - bottom + bonus,
            Role::Min => bottom - top - bonus,
        }
    }

    /// 无子可动时的评估
    ///
    /// 上方的王被攻击为将死：引擎被将死得 `-(MATE + depth*50)`，将死对方得正值，
    /// 剩余深度越大说明杀得越快。王安全则为困毙，记 0 分。
    pub fn terminal(board: &Board, depth: u8, role: Role) -> i32 {
        if board.king_safe() {
            return 0;
        }

        let score = MATE_SCORE + depth as i32 * DEPTH_BONUS;
        match role {
            Role::Max => -score,
            Role::Min => score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Fen;

    #[test]
    fn test_initial_position_balanced() {
        let board = Board::initial();
        assert_eq!(Evaluator::evaluate(&board, 0, Role::Max), 0);
        assert_eq!(Evaluator::evaluate(&board, 0, Role::Min), 0);
        assert_eq!(Evaluator::material_value(&board), 8 * 100 + 4 * 300 + 2 * 500 + 1000 + 10000);
    }

    #[test]
    fn test_material_advantage_and_depth_bonus() {
        // 上方多一个车
        let board = Fen::parse("k7/8/8/8/8/8/8/R3K3").unwrap();
        assert_eq!(Evaluator::evaluate(&board, 0, Role::Max), 500);
        assert_eq!(Evaluator::evaluate(&board, 2, Role::Max), 600);
        // 对方在上方时，上方多出的车对引擎不利
        assert_eq!(Evaluator::evaluate(&board, 0, Role::Min), -500);
        assert_eq!(Evaluator::evaluate(&board, 2, Role::Min), -600);
    }

    #[test]
    fn test_terminal_scores() {
        // 上方被将死
        let mated = Fen::parse("K7/1q6/8/8/8/8/8/1r5k").unwrap();
        assert_eq!(Evaluator::terminal(&mated, 0, Role::Max), -MATE_SCORE);
        assert_eq!(Evaluator::terminal(&mated, 2, Role::Min), MATE_SCORE + 100);

        // 上方困毙
        let stalemate = Fen::parse("K7/2q5/1k6/8/8/8/8/8").unwrap();
        assert_eq!(Evaluator::terminal(&stalemate, 3, Role::Max), 0);
        assert_eq!(Evaluator::terminal(&stalemate, 3, Role::Min), 0);
    }
}
