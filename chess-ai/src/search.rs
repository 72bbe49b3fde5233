//! 搜索引擎
//!
//! 镜像式 Minimax + Alpha-Beta 剪枝。
//! 走子方永远在棋盘上方：每走一步就镜像棋盘，让对方成为上方阵营，
//! 递归返回后再镜像回来并撤销走法。分值始终以搜索发起方的视角计算，不取反。

use std::fmt;
use std::str::FromStr;

use chess_core::{Board, ChessError, Move, ScoredMove};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::evaluate::Evaluator;

/// 默认搜索深度
pub const DEFAULT_DEPTH: u8 = 4;

/// 初始 alpha
pub const ALPHA_INIT: i32 = -1_000_000;

/// 初始 beta
pub const BETA_INIT: i32 = 1_000_000;

/// 当前节点是哪一方在走
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// 引擎走棋，取最大值
    Max,
    /// 对方走棋，取最小值
    Min,
}

impl Role {
    /// 切换到另一方
    pub fn toggled(&self) -> Role {
        match self {
            Role::Max => Role::Min,
            Role::Min => Role::Max,
        }
    }
}

/// AI 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{}' (easy, medium, hard)", other)),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        write!(f, "{}", name)
    }
}

/// AI 配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    pub difficulty: Difficulty,
    pub max_depth: u8,
}

impl AiConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let max_depth = match difficulty {
            Difficulty::Easy => 2,
            Difficulty::Medium => DEFAULT_DEPTH,
            Difficulty::Hard => 5,
        };
        Self {
            difficulty,
            max_depth,
        }
    }

    /// 覆盖搜索深度
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.max_depth = depth;
        self
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::Medium)
    }
}

/// AI 引擎
pub struct AiEngine {
    config: AiConfig,
    nodes_searched: u64,
}

impl AiEngine {
    /// 创建新的 AI 引擎
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            nodes_searched: 0,
        }
    }

    /// 从难度创建
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self::new(AiConfig::from_difficulty(difficulty))
    }

    /// 当前配置
    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// 为上方阵营搜索最佳走法
    ///
    /// 使用配置的深度和默认窗口。没有合法走法时返回 `NoLegalMoves`。
    pub fn best_move(&mut self, board: &mut Board) -> Result<ScoredMove, ChessError> {
        let moves = board.all_legal_moves();
        let Some(&first) = moves.first() else {
            return Err(ChessError::NoLegalMoves {
                in_check: !board.king_safe(),
            });
        };

        let depth = self.config.max_depth;
        debug!("开始搜索: depth={}, {} 个候选走法", depth, moves.len());

        let mut result = self.search(board, depth, BETA_INIT, ALPHA_INIT, None, Role::Max)?;
        if result.mv.is_none() {
            // 窗口内没有走法提高 alpha
            warn!("搜索没有选出走法，使用第一个合法走法 {}", first);
            result.mv = Some(first);
        }

        debug!(
            "搜索完成: best={}, nodes={}",
            result,
            self.nodes_searched
        );
        Ok(result)
    }

    /// 顶层搜索入口
    ///
    /// `accum` 是调用方已有的候选走法，根节点没有选出更好的走法时原样返回。
    pub fn search(
        &mut self,
        board: &mut Board,
        depth: u8,
        beta: i32,
        alpha: i32,
        accum: Option<Move>,
        role: Role,
    ) -> Result<ScoredMove, ChessError> {
        self.nodes_searched = 0;
        let (score, best) = self.alpha_beta(board, depth, alpha, beta, role, true)?;
        Ok(ScoredMove::new(best.or(accum), score))
    }

    /// Alpha-Beta 搜索（fail-hard）
    ///
    /// 返回 (分值, 根节点最佳走法)。只有根节点记录走法，
    /// 取最大值时 alpha 严格提高才更新，取最小值时 beta 严格降低才更新。
    fn alpha_beta(
        &mut self,
        board: &mut Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        role: Role,
        root: bool,
    ) -> Result<(i32, Option<Move>), ChessError> {
        self.nodes_searched += 1;

        if depth == 0 {
            return Ok((Evaluator::evaluate(board, depth, role), None));
        }

        let moves = board.all_legal_moves();
        if moves.is_empty() {
            return Ok((Evaluator::terminal(board, depth, role), None));
        }

        let mut best = None;
        for mv in moves {
            let value = self.child_value(board, &mv, |engine, board| {
                engine
                    .alpha_beta(board, depth - 1, alpha, beta, role.toggled(), false)
                    .map(|(value, _)| value)
            })?;

            match role {
                Role::Max => {
                    if value > alpha {
                        alpha = value;
                        if root {
                            best = Some(mv);
                        }
                    }
                }
                Role::Min => {
                    if value < beta {
                        beta = value;
                        if root {
                            best = Some(mv);
                        }
                    }
                }
            }

            if alpha >= beta {
                break;
            }
        }

        let bound = match role {
            Role::Max => alpha,
            Role::Min => beta,
        };
        Ok((bound, best))
    }

    /// 不剪枝的 Minimax，用于校验 Alpha-Beta 的结果
    pub fn minimax(
        &mut self,
        board: &mut Board,
        depth: u8,
        role: Role,
    ) -> Result<ScoredMove, ChessError> {
        self.nodes_searched = 0;
        let (score, best) = self.minimax_node(board, depth, role)?;
        Ok(ScoredMove::new(best, score))
    }

    fn minimax_node(
        &mut self,
        board: &mut Board,
        depth: u8,
        role: Role,
    ) -> Result<(i32, Option<Move>), ChessError> {
        self.nodes_searched += 1;

        if depth == 0 {
            return Ok((Evaluator::evaluate(board, depth, role), None));
        }

        let moves = board.all_legal_moves();
        if moves.is_empty() {
            return Ok((Evaluator::terminal(board, depth, role), None));
        }

        let mut best_score = match role {
            Role::Max => i32::MIN,
            Role::Min => i32::MAX,
        };
        let mut best_move = None;

        for mv in moves {
            let value = self.child_value(board, &mv, |engine, board| {
                engine
                    .minimax_node(board, depth - 1, role.toggled())
                    .map(|(value, _)| value)
            })?;

            let better = match role {
                Role::Max => value > best_score,
                Role::Min => value < best_score,
            };
            if better {
                best_score = value;
                best_move = Some(mv);
            }
        }

        Ok((best_score, best_move))
    }

    /// 走一步、镜像、递归、镜像回来、撤销
    ///
    /// 递归出错时也先还原棋盘再返回错误。
    fn child_value<F>(
        &mut self,
        board: &mut Board,
        mv: &Move,
        recurse: F,
    ) -> Result<i32, ChessError>
    where
        F: FnOnce(&mut Self, &mut Board) -> Result<i32, ChessError>,
    {
        board.execute_move(mv)?;
        board.mirror_horizontally();
        let value = recurse(self, board);
        board.mirror_horizontally();
        board.undo_move(mv)?;
        value
    }

    /// 获取搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Fen, Square};
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    #[test]
    fn test_depth_zero_is_static_evaluation() {
        let mut board = Fen::parse("k7/8/8/3n4/8/8/8/R3K3").unwrap();
        let mut engine = AiEngine::new(AiConfig::default());

        let result = engine
            .search(&mut board, 0, BETA_INIT, ALPHA_INIT, None, Role::Max)
            .unwrap();
        assert_eq!(result.score, Evaluator::evaluate(&board, 0, Role::Max));
        assert_eq!(result.score, 200);
        assert_eq!(result.mv, None);
        assert_eq!(engine.nodes_searched(), 1);
    }

    #[test]
    fn test_alpha_beta_matches_minimax() {
        let positions = [
            chess_core::INITIAL_FEN,
            "k7/8/8/3n4/4P3/8/8/R3K3",
            "r3k3/1p6/2n5/3Pp3/8/5N2/PP6/R3K3",
            "k7/4P3/8/8/8/2q5/8/4K3",
        ];

        for fen in positions {
            for role in [Role::Max, Role::Min] {
                let mut board = Fen::parse(fen).unwrap();
                let mut engine = AiEngine::new(AiConfig::default());

                let pruned = engine
                    .search(&mut board, 2, BETA_INIT, ALPHA_INIT, None, role)
                    .unwrap();
                let pruned_nodes = engine.nodes_searched();
                let full = engine.minimax(&mut board, 2, role).unwrap();

                assert_eq!(pruned.score, full.score, "{:?} score differs for {}", role, fen);
                assert_eq!(pruned.mv, full.mv, "{:?} move differs for {}", role, fen);
                assert!(pruned.mv.is_some());
                assert!(pruned_nodes <= engine.nodes_searched());
            }
        }
    }

    #[test]
    fn test_minimizing_root_picks_move() {
        let mut board = Board::initial();
        let legal = board.all_legal_moves();
        let mut engine = AiEngine::new(AiConfig::default());

        let result = engine
            .search(&mut board, 2, BETA_INIT, ALPHA_INIT, None, Role::Min)
            .unwrap();
        let mv = result.mv.unwrap();
        assert!(legal.contains(&mv));
        assert_eq!(result, engine.minimax(&mut board, 2, Role::Min).unwrap());
    }

    #[test]
    fn test_alpha_beta_matches_minimax_on_random_positions() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut board = Board::initial();
        let mut engine = AiEngine::new(AiConfig::default());

        for _ in 0..12 {
            let moves = board.all_legal_moves();
            let Some(mv) = moves.choose(&mut rng).copied() else {
                break;
            };
            board.execute_move(&mv).unwrap();
            board.mirror_horizontally();

            for role in [Role::Max, Role::Min] {
                let pruned = engine
                    .search(&mut board, 2, BETA_INIT, ALPHA_INIT, None, role)
                    .unwrap();
                let full = engine.minimax(&mut board, 2, role).unwrap();
                assert_eq!(pruned.score, full.score);
                assert_eq!(pruned.mv, full.mv);
            }
        }
    }

    #[test]
    fn test_forced_single_move() {
        init_tracing();
        // 上方的王被将军，只能吃掉没有保护的后
        let mut board = Fen::parse("7k/8/8/8/8/8/1q6/K7").unwrap();
        let legal = board.all_legal_moves();
        assert_eq!(legal.len(), 1);

        let mut engine = AiEngine::from_difficulty(Difficulty::Medium);
        let result = engine.best_move(&mut board).unwrap();
        assert_eq!(result.mv, Some(legal[0]));
    }

    #[test]
    fn test_finds_mate_in_one() {
        // 后有多种一步杀，任选其一即可
        let mut board = Fen::parse("k7/8/1K6/8/8/8/8/7Q").unwrap();
        let mut engine = AiEngine::from_difficulty(Difficulty::Easy);

        let result = engine.best_move(&mut board).unwrap();
        let mv = result.mv.unwrap();

        board.execute_move(&mv).unwrap();
        board.mirror_horizontally();
        assert!(!board.king_safe());
        assert!(board.all_legal_moves().is_empty());
        assert!(result.score >= crate::evaluate::MATE_SCORE);
    }

    #[test]
    fn test_prefers_winning_material() {
        // 车可以白吃对方的后
        let mut board = Fen::parse("k7/8/8/8/3q4/8/8/3RK3").unwrap();
        let mut engine = AiEngine::from_difficulty(Difficulty::Easy);

        let result = engine.best_move(&mut board).unwrap();
        let mv = result.mv.unwrap();
        assert_eq!(mv.to, Square::new_unchecked(4, 3));
        assert!(mv.is_capture());
    }

    #[test]
    fn test_search_restores_board() {
        let mut board = Fen::parse("r3k3/1p6/2n5/3Pp3/8/5N2/PP6/R3K3").unwrap();
        let before = board.clone();

        let mut engine = AiEngine::new(AiConfig::from_difficulty(Difficulty::Medium).with_depth(3));
        engine.best_move(&mut board).unwrap();
        assert_eq!(board, before);
        assert!(engine.nodes_searched() > 0);
    }

    #[test]
    fn test_no_legal_moves() {
        let mut engine = AiEngine::new(AiConfig::default());

        let mut mated = Fen::parse("K7/1q6/8/8/8/8/8/1r5k").unwrap();
        assert_eq!(
            engine.best_move(&mut mated),
            Err(ChessError::NoLegalMoves { in_check: true })
        );

        let mut stalemate = Fen::parse("K7/2q5/1k6/8/8/8/8/8").unwrap();
        assert_eq!(
            engine.best_move(&mut stalemate),
            Err(ChessError::NoLegalMoves { in_check: false })
        );
    }

    #[test]
    fn test_accum_kept_when_nothing_improves() {
        let mut board = Board::initial();
        let legal = board.all_legal_moves();
        let mut engine = AiEngine::new(AiConfig::default());

        // 窗口下界高于任何可能的分值，根节点选不出走法
        let result = engine
            .search(&mut board, 1, BETA_INIT, BETA_INIT - 1, Some(legal[3]), Role::Max)
            .unwrap();
        assert_eq!(result.mv, Some(legal[3]));
        assert_eq!(result.score, BETA_INIT - 1);
    }

    #[test]
    fn test_difficulty_config() {
        let easy = AiConfig::from_difficulty(Difficulty::Easy);
        assert_eq!(easy.max_depth, 2);

        let medium = AiConfig::from_difficulty(Difficulty::Medium);
        assert_eq!(medium.max_depth, DEFAULT_DEPTH);
        assert_eq!(AiConfig::default(), medium);

        let hard = AiConfig::from_difficulty(Difficulty::Hard);
        assert_eq!(hard.max_depth, 5);
        assert_eq!(hard.with_depth(1).max_depth, 1);

        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("expert".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Easy.to_string(), "easy");
    }
}
