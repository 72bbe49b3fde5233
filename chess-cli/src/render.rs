//! 终端棋盘渲染

use chess_core::{Board, Notation, Side, Square, BOARD_SIZE};

/// 列标
const FILES: &str = "   a  b  c  d  e  f  g  h";

/// 将棋盘渲染为 ASCII 文本，玩家（上方阵营）在下方
///
/// 被将军的王用方括号标出，例如 `[K]`。
pub fn render_board(board: &Board) -> String {
    let checked = if board.king_safe() {
        None
    } else {
        board.king_square(Side::Upper)
    };

    let mut out = String::new();
    out.push_str(FILES);
    out.push('\n');

    for row in 0..BOARD_SIZE as u8 {
        let rank = BOARD_SIZE as u8 - row;
        out.push_str(&format!("{} ", rank));

        for col in 0..BOARD_SIZE as u8 {
            let sq = Square::new_unchecked(row, col);
            let tag = board.get(sq).map_or('.', |piece| piece.to_tag());
            if Some(sq) == checked {
                out.push_str(&format!("[{}]", tag));
            } else {
                out.push_str(&format!(" {} ", tag));
            }
        }

        out.push_str(&format!(" {}\n", rank));
    }

    out.push_str(FILES);
    out.push('\n');
    out
}

/// 走法列表渲染为一行坐标记谱
pub fn render_moves(moves: &[chess_core::Move]) -> String {
    moves
        .iter()
        .map(Notation::to_coordinate)
        .collect::<Vec<_>>()
        .join(" ")
}
