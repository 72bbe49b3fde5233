//! 国际象棋 AI 引擎
//!
//! 包含:
//! - 子力评估函数
//! - 镜像式 Minimax + Alpha-Beta 搜索
//! - 难度与搜索深度配置

mod evaluate;
mod search;

pub use evaluate::{Evaluator, DEPTH_BONUS, MATE_SCORE};
pub use search::{AiConfig, AiEngine, Difficulty, Role, ALPHA_INIT, BETA_INIT, DEFAULT_DEPTH};
