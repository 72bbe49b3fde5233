//! 方向偏移表
//!
//! 每种棋子对应一组方向，每个方向是一串按距离递增排列的 (行, 列) 偏移。
//! 滑行棋子（象、车、后）每个方向最多 7 步；跳跃棋子（马、王）每个方向只有一步。
//! 兵的走法依赖方向、所在行和周围状态，不由偏移表描述。

use crate::constants::MAX_RAY_LENGTH;
use crate::piece::PieceKind;

/// 一个方向上的偏移序列
pub type Ray = &'static [(i8, i8)];

const fn ray(dr: i8, dc: i8) -> [(i8, i8); MAX_RAY_LENGTH] {
    let mut out = [(0, 0); MAX_RAY_LENGTH];
    let mut i = 0;
    while i < MAX_RAY_LENGTH {
        let step = i as i8 + 1;
        out[i] = (dr * step, dc * step);
        i += 1;
    }
    out
}

static UP_LEFT: [(i8, i8); MAX_RAY_LENGTH] = ray(-1, -1);
static DOWN_LEFT: [(i8, i8); MAX_RAY_LENGTH] = ray(1, -1);
static UP_RIGHT: [(i8, i8); MAX_RAY_LENGTH] = ray(-1, 1);
static DOWN_RIGHT: [(i8, i8); MAX_RAY_LENGTH] = ray(1, 1);
static RIGHT: [(i8, i8); MAX_RAY_LENGTH] = ray(0, 1);
static LEFT: [(i8, i8); MAX_RAY_LENGTH] = ray(0, -1);
static DOWN: [(i8, i8); MAX_RAY_LENGTH] = ray(1, 0);
static UP: [(i8, i8); MAX_RAY_LENGTH] = ray(-1, 0);

/// 象：4 条斜线
pub static BISHOP: [Ray; 4] = [&UP_LEFT, &DOWN_LEFT, &UP_RIGHT, &DOWN_RIGHT];

/// 车：4 条直线
pub static ROOK: [Ray; 4] = [&RIGHT, &LEFT, &DOWN, &UP];

/// 后：斜线 + 直线
pub static QUEEN: [Ray; 8] = [
    &UP_LEFT,
    &DOWN_LEFT,
    &UP_RIGHT,
    &DOWN_RIGHT,
    &RIGHT,
    &LEFT,
    &DOWN,
    &UP,
];

/// 马：8 个日字跳
pub static KNIGHT: [Ray; 8] = [
    &[(-2, -1)],
    &[(-2, 1)],
    &[(-1, 2)],
    &[(1, 2)],
    &[(2, 1)],
    &[(2, -1)],
    &[(1, -2)],
    &[(-1, -2)],
];

/// 王：8 个相邻格
pub static KING: [Ray; 8] = [
    &[(-1, -1)],
    &[(-1, 0)],
    &[(-1, 1)],
    &[(0, 1)],
    &[(1, 1)],
    &[(1, 0)],
    &[(1, -1)],
    &[(0, -1)],
];

/// 获取棋子的方向表，兵返回 None
pub fn directions(kind: PieceKind) -> Option<&'static [Ray]> {
    match kind {
        PieceKind::Bishop => Some(&BISHOP[..]),
        PieceKind::Rook => Some(&ROOK[..]),
        PieceKind::Queen => Some(&QUEEN[..]),
        PieceKind::Knight => Some(&KNIGHT[..]),
        PieceKind::King => Some(&KING[..]),
        PieceKind::Pawn => None,
    }
}
