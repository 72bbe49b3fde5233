//! 国际象棋终端对局
//!
//! 包含:
//! - 人机对局会话（玩家走棋校验、引擎应着）
//! - ASCII 棋盘渲染
//! - 用户设置持久化
//! - 交互命令循环

pub mod game;
pub mod render;
pub mod repl;
pub mod settings;

pub use game::Game;
pub use settings::Settings;
