use rand::Rng;
use rand::seq::SliceRandom;

use crate::moves::RobotMove;

/// Upper bound for random scrambles.
pub const MAX_RANDOM_MOVES: usize = 25;

const PRESET: [(i8, u8, i8); 23] = [
    (0, 2, 2),
    (0, 1, 1),
    (0, 2, 2),
    (-1, 1, 2),
    (0, 1, -1),
    (-1, 1, 2),
    (2, 1, -1),
    (2, 1, 2),
    (1, 1, 2),
    (0, 1, 2),
    (2, 1, -1),
    (0, 2, 1),
    (-1, 1, -1),
    (-1, 1, -1),
    (2, 1, 2),
    (0, 1, 1),
    (0, 1, 1),
    (-1, 1, 2),
    (1, 1, 1),
    (2, 1, 2),
    (-1, 1, 0),
    (-1, 1, 0),
    (2, 0, 1),
];

/// Fixed 23-step scramble, handy for repeatable demos.
pub fn preset_scramble() -> Vec<RobotMove> {
    PRESET
        .iter()
        .map(|&(spin, flips, rotate)| RobotMove::new(spin, flips, rotate))
        .collect()
}

/// `n` random robot moves, at most [`MAX_RANDOM_MOVES`].
pub fn random_scramble<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<RobotMove> {
    const ROTATIONS: [i8; 3] = [-1, 1, 2];
    (0..n.min(MAX_RANDOM_MOVES))
        .map(|_| RobotMove {
            spin: rng.gen_range(-1..=2),
            flips: rng.gen_range(0..=3),
            rotate: *ROTATIONS.choose(rng).unwrap_or(&1),
        })
        .collect()
}
