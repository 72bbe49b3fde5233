//! 交互命令循环

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chess_core::{GameStatus, Notation};

use crate::game::Game;
use crate::render::{render_board, render_moves};

const HELP: &str = "命令: <走法> (例如 e2e4, e7e8q) | moves | new | help | quit";

/// 一行输入对应的命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 坐标记谱走法
    Move(String),
    /// 列出合法走法
    Moves,
    /// 新对局
    New,
    Help,
    Quit,
}

impl Command {
    /// 解析一行输入，空行返回 None
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let command = match line.to_ascii_lowercase().as_str() {
            "moves" => Command::Moves,
            "new" => Command::New,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => Command::Move(line.to_string()),
        };
        Some(command)
    }
}

/// 运行命令循环，直到输入结束或 quit
pub fn run<R: BufRead, W: Write>(game: &mut Game, input: R, output: &mut W) -> Result<()> {
    writeln!(output, "{}", HELP)?;
    write!(output, "{}", render_board(game.board()))?;
    prompt(output)?;

    for line in input.lines() {
        let line = line.context("读取输入失败")?;
        let Some(command) = Command::parse(&line) else {
            prompt(output)?;
            continue;
        };

        match command {
            Command::Quit => break,
            Command::Help => writeln!(output, "{}", HELP)?,
            Command::New => {
                game.new_game();
                write!(output, "{}", render_board(game.board()))?;
            }
            Command::Moves => {
                let moves = game.legal_moves();
                writeln!(output, "{}", render_moves(&moves))?;
            }
            Command::Move(text) => play_turn(game, &text, output)?,
        }

        prompt(output)?;
    }

    Ok(())
}

/// 玩家走一步，引擎应一步
fn play_turn<W: Write>(game: &mut Game, text: &str, output: &mut W) -> Result<()> {
    if game.is_over() {
        writeln!(output, "对局已结束，输入 new 重新开始")?;
        return Ok(());
    }

    let mv = match game.play_human(text) {
        Ok(mv) => mv,
        Err(e) => {
            writeln!(output, "{}", e)?;
            return Ok(());
        }
    };
    writeln!(output, "你走: {}", Notation::to_coordinate(&mv))?;

    match game.engine_status() {
        GameStatus::Checkmate => {
            write!(output, "{}", render_board(game.board()))?;
            writeln!(output, "将死，你赢了！")?;
            return Ok(());
        }
        GameStatus::Stalemate => {
            write!(output, "{}", render_board(game.board()))?;
            writeln!(output, "困毙，和棋")?;
            return Ok(());
        }
        GameStatus::Ongoing => {}
    }

    let reply = game.engine_reply().context("引擎走棋失败")?;
    if let Some(mv) = reply.mv {
        writeln!(output, "引擎走: {} (评分 {})", Notation::to_coordinate(&mv), reply.score)?;
    }
    write!(output, "{}", render_board(game.board()))?;

    match game.status() {
        GameStatus::Checkmate => writeln!(output, "将死，你输了")?,
        GameStatus::Stalemate => writeln!(output, "困毙，和棋")?,
        GameStatus::Ongoing if game.human_in_check() => writeln!(output, "将军！")?,
        GameStatus::Ongoing => {}
    }
    Ok(())
}

fn prompt<W: Write>(output: &mut W) -> Result<()> {
    write!(output, "> ")?;
    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_ai::{AiConfig, Difficulty};
    use chess_core::Fen;
    use std::io::Cursor;

    fn quick_game() -> Game {
        Game::new(AiConfig::from_difficulty(Difficulty::Easy).with_depth(1))
    }

    fn run_script(game: &mut Game, script: &str) -> String {
        let mut output = Vec::new();
        run(game, Cursor::new(script.as_bytes()), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("  "), None);
        assert_eq!(Command::parse("MOVES"), Some(Command::Moves));
        assert_eq!(Command::parse("new\n"), Some(Command::New));
        assert_eq!(Command::parse("q"), Some(Command::Quit));
        assert_eq!(Command::parse("e2e4"), Some(Command::Move("e2e4".to_string())));
    }

    #[test]
    fn test_move_and_reply() {
        let mut game = quick_game();
        let text = run_script(&mut game, "e2e4\nquit\ne2e3\n");

        assert!(text.contains("你走: e2e4"));
        assert!(text.contains("引擎走: "));
        // quit 之后的输入不再处理
        assert!(!text.contains("你走: e2e3"));
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn test_illegal_input_and_listing() {
        let mut game = quick_game();
        let text = run_script(&mut game, "moves\ne2e5\nhello\n");

        assert!(text.contains("g1f3"));
        assert!(text.contains("Illegal move: e2e5"));
        assert!(text.contains("Invalid move record"));
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_new_game_command() {
        let mut game = quick_game();
        run_script(&mut game, "d2d4\nnew\n");
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_human_delivers_mate() {
        // 后走到 b7 将死
        let board = Fen::parse("k7/8/1K6/8/8/8/8/7Q").unwrap();
        let mut game = Game::from_board(board, AiConfig::from_difficulty(Difficulty::Easy));
        let text = run_script(&mut game, "h1b7\ne1e2\n");

        assert!(text.contains("将死，你赢了"));
        assert!(text.contains("对局已结束"));
        assert_eq!(game.history().len(), 1);
    }
}
