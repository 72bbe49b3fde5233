//! 人机对局
//!
//! 棋盘始终保持玩家（上方阵营）在走子方的位置。引擎走棋时先镜像棋盘，
//! 搜索并执行走法后再镜像回来。

use chess_ai::{AiConfig, AiEngine};
use chess_core::{Board, ChessError, GameStatus, Move, Notation, ScoredMove};
use tracing::{debug, info};

/// 一次人机对局
pub struct Game {
    board: Board,
    engine: AiEngine,
    /// 已走的棋，统一以玩家视角的棋盘坐标记录
    history: Vec<Move>,
}

impl Game {
    /// 从初始局面开始
    pub fn new(config: AiConfig) -> Self {
        Self::from_board(Board::initial(), config)
    }

    /// 从指定局面开始，轮到上方阵营（玩家）走
    pub fn from_board(board: Board, config: AiConfig) -> Self {
        Self {
            board,
            engine: AiEngine::new(config),
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn config(&self) -> &AiConfig {
        self.engine.config()
    }

    /// 重新开始
    pub fn new_game(&mut self) {
        info!("新对局");
        self.board = Board::initial();
        self.history.clear();
    }

    /// 玩家的所有合法走法
    pub fn legal_moves(&mut self) -> Vec<Move> {
        self.board.all_legal_moves()
    }

    /// 玩家的王是否被将军
    pub fn human_in_check(&self) -> bool {
        !self.board.king_safe()
    }

    /// 玩家视角的对局状态
    pub fn status(&mut self) -> GameStatus {
        self.board.status()
    }

    /// 引擎视角的对局状态
    pub fn engine_status(&mut self) -> GameStatus {
        self.board.mirror_horizontally();
        let status = self.board.status();
        self.board.mirror_horizontally();
        status
    }

    /// 任一方无子可动
    pub fn is_over(&mut self) -> bool {
        self.status() != GameStatus::Ongoing || self.engine_status() != GameStatus::Ongoing
    }

    /// 执行玩家的走法（坐标记谱，例如 `e2e4`）
    ///
    /// 只接受合法走法列表中的走法。
    pub fn play_human(&mut self, text: &str) -> Result<Move, ChessError> {
        let legal = self.board.all_legal_moves();
        if legal.is_empty() {
            return Err(ChessError::NoLegalMoves {
                in_check: self.human_in_check(),
            });
        }

        let mv = Notation::find_move(&legal, text)?;
        self.board.execute_move(&mv)?;
        self.history.push(mv);
        info!("玩家走棋: {}", Notation::to_coordinate(&mv));
        Ok(mv)
    }

    /// 引擎应着
    ///
    /// 返回的走法已换算回玩家视角的棋盘坐标。
    pub fn engine_reply(&mut self) -> Result<ScoredMove, ChessError> {
        self.board.mirror_horizontally();
        let result = self.engine_turn();
        self.board.mirror_horizontally();

        let scored = result?;
        if let Some(mv) = scored.mv {
            self.history.push(mv);
            info!(
                "引擎走棋: {} (评分 {}, 节点 {})",
                Notation::to_coordinate(&mv),
                scored.score,
                self.engine.nodes_searched()
            );
        }
        Ok(scored)
    }

    /// 在镜像棋盘上搜索并执行
    fn engine_turn(&mut self) -> Result<ScoredMove, ChessError> {
        let legal = self.board.all_legal_moves();
        let scored = self.engine.best_move(&mut self.board)?;
        let mv = scored.mv.ok_or(ChessError::NoLegalMoves {
            in_check: !self.board.king_safe(),
        })?;

        if !legal.contains(&mv) {
            return Err(ChessError::IllegalMove(mv.to_record()));
        }
        self.board.execute_move(&mv)?;
        debug!("引擎走法记录: {}", scored);

        Ok(ScoredMove::new(Some(mv.mirrored()), scored.score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_ai::Difficulty;
    use chess_core::{Fen, Piece, PieceKind, Side, Square};

    fn quick_config() -> AiConfig {
        AiConfig::from_difficulty(Difficulty::Easy).with_depth(2)
    }

    #[test]
    fn test_play_human_and_engine_reply() {
        let mut game = Game::new(quick_config());

        let mv = game.play_human("e2e4").unwrap();
        assert_eq!(mv.to, Square::new_unchecked(4, 4));
        assert_eq!(game.board().get(mv.to), Some(Piece::upper(PieceKind::Pawn)));

        let reply = game.engine_reply().unwrap();
        let engine_move = reply.mv.unwrap();
        // 引擎的棋子在玩家视角是下方阵营
        assert_eq!(game.board().get(engine_move.to).map(|p| p.side), Some(Side::Lower));
        assert!(game.board().get(engine_move.from).is_none());
        assert_eq!(game.history().len(), 2);

        // 又轮到玩家，玩家的棋子仍在下半边
        assert_eq!(game.board().king_square(Side::Upper), Some(Square::new_unchecked(7, 4)));
        assert_eq!(game.status(), GameStatus::Ongoing);
    }

    #[test]
    fn test_illegal_human_move_rejected() {
        let mut game = Game::new(quick_config());
        let before = game.board().clone();

        assert!(matches!(game.play_human("e2e5"), Err(ChessError::IllegalMove(_))));
        assert!(game.play_human("zz").is_err());
        assert_eq!(game.board(), &before);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_engine_mates_human() {
        // 玩家的王被自己的兵挡住，引擎的车可以沉底将死
        let board = Fen::parse("k3r3/8/8/8/8/8/P5PP/7K").unwrap();
        let mut game = Game::from_board(board, quick_config());

        game.play_human("a2a3").unwrap();
        let reply = game.engine_reply().unwrap();
        assert!(reply.score >= chess_ai::MATE_SCORE);

        assert!(game.human_in_check());
        assert_eq!(game.status(), GameStatus::Checkmate);
        assert!(game.is_over());
    }

    #[test]
    fn test_statuses_and_check() {
        // 玩家被将死
        let board = Fen::parse("K7/1q6/8/8/8/8/8/1r5k").unwrap();
        let mut game = Game::from_board(board, quick_config());
        assert!(game.human_in_check());
        assert_eq!(game.status(), GameStatus::Checkmate);
        assert!(game.is_over());
        assert!(matches!(
            game.play_human("a8a7"),
            Err(ChessError::NoLegalMoves { in_check: true })
        ));

        // 引擎被困毙：镜像后下方阵营无子可动
        let board = Fen::parse("k7/2Q5/1K6/8/8/8/8/8").unwrap();
        let mut game = Game::from_board(board, quick_config());
        assert_eq!(game.engine_status(), GameStatus::Stalemate);
        assert!(matches!(
            game.engine_reply(),
            Err(ChessError::NoLegalMoves { in_check: false })
        ));
        // 失败后棋盘仍是玩家视角
        assert_eq!(game.board().king_square(Side::Upper), Some(Square::new_unchecked(2, 1)));
    }

    #[test]
    fn test_new_game_resets() {
        let mut game = Game::new(quick_config());
        game.play_human("d2d4").unwrap();
        game.new_game();
        assert_eq!(game.board(), &Board::initial());
        assert!(game.history().is_empty());
        assert_eq!(game.legal_moves().len(), 20);
    }
}
