//! D2Q9 velocity set.
//!
//! Direction layout:
//! ```text
//!     6   2   5
//!       \ | /
//!     3 - 0 - 1
//!       / | \
//!     7   4   8
//! ```

/// Number of discrete velocities.
pub const Q: usize = 9;

/// Lattice velocity `e_k` for each direction.
pub const E: [[i32; 2]; Q] = [
    [0, 0],
    [1, 0],
    [0, 1],
    [-1, 0],
    [0, -1],
    [1, 1],
    [-1, 1],
    [-1, -1],
    [1, -1],
];

/// Weight `w_k` for each direction. Sums to one.
pub const W: [f32; Q] = [
    4.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
];

/// Index of the direction with `E[OPP[k]] == -E[k]`, used by bounce-back.
pub const OPP: [usize; Q] = [0, 3, 4, 1, 2, 7, 8, 5, 6];

/// Lattice speed of sound squared.
pub const CS2: f32 = 1.0 / 3.0;

/// The nine populations held by one cell.
pub type Populations = [f32; Q];
