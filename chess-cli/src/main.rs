use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chess_ai::Difficulty;
use chess_cli::{repl, Game, Settings};
use chess_core::Fen;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 终端国际象棋，与 Alpha-Beta 引擎对弈
#[derive(Debug, Parser)]
#[command(name = "chess-cli", version, about)]
struct Args {
    /// AI 难度 (easy, medium, hard)
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// 搜索深度，覆盖难度的默认值
    #[arg(long)]
    depth: Option<u8>,

    /// 设置文件路径
    #[arg(long)]
    config: Option<PathBuf>,

    /// 起始布局，例如 "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
    #[arg(long)]
    layout: Option<String>,
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("chess_cli=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref());
    if let Some(difficulty) = args.difficulty {
        settings.difficulty = difficulty;
    }
    if args.depth.is_some() {
        settings.depth = args.depth;
    }
    let config = settings.to_ai_config();
    info!("难度 {}，搜索深度 {}", config.difficulty, config.max_depth);

    let mut game = match &args.layout {
        Some(layout) => {
            let board = Fen::parse(layout).with_context(|| format!("无效的布局: {}", layout))?;
            Game::from_board(board, config)
        }
        None => Game::new(config),
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    repl::run(&mut game, stdin.lock(), &mut stdout)
}
