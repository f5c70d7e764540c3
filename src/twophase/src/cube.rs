//! The cubie level representation of a 3x3x3 cube and the group operation
//! acting on it.

use crate::notation::{Algorithm, Move, MoveFace, NotationError, Power};
use std::sync::LazyLock;

/// Face identities. A center value, and the index of a center position.
pub const U: u8 = 0;
pub const R: u8 = 1;
pub const F: u8 = 2;
pub const D: u8 = 3;
pub const L: u8 = 4;
pub const B: u8 = 5;

/// Corner cubies and corner positions.
pub const URF: u8 = 0;
pub const UFL: u8 = 1;
pub const ULB: u8 = 2;
pub const UBR: u8 = 3;
pub const DFR: u8 = 4;
pub const DLF: u8 = 5;
pub const DBL: u8 = 6;
pub const DRB: u8 = 7;

/// Edge cubies and edge positions.
pub const UR: u8 = 0;
pub const UF: u8 = 1;
pub const UL: u8 = 2;
pub const UB: u8 = 3;
pub const DR: u8 = 4;
pub const DF: u8 = 5;
pub const DL: u8 = 6;
pub const DB: u8 = 7;
pub const FR: u8 = 8;
pub const FL: u8 = 9;
pub const BL: u8 = 10;
pub const BR: u8 = 11;

/// Marks a permutation slot whose cubie is not known. Only produced by the
/// coordinate decoders; see [`crate::coordinates`].
pub const UNASSIGNED: u8 = u8::MAX;

/// Which set of cubies a coordinate describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orbit {
    Corners,
    Edges,
}

/// A cube state. `cp[i]` is the corner cubie sitting at position `i` and
/// `co[i]` its twist, likewise for edges. `center[i]` is the face whose center
/// currently sits at position `i`, which only changes under slice moves and
/// rotations.
///
/// Moves are cube states too: composing a state with a move's state through
/// [`Cube::multiply`] applies the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cube {
    pub center: [u8; 6],
    pub cp: [u8; 8],
    pub co: [u8; 8],
    pub ep: [u8; 12],
    pub eo: [u8; 12],
}

const IDENTITY: Cube = Cube {
    center: [U, R, F, D, L, B],
    cp: [URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB],
    co: [0; 8],
    ep: [UR, UF, UL, UB, DR, DF, DL, DB, FR, FL, BL, BR],
    eo: [0; 12],
};

/// The quarter turns of the six faces and the three slices, indexed like
/// `MoveFace`.
const BASE_MOVES: [Cube; 9] = [
    // U
    Cube {
        center: [U, R, F, D, L, B],
        cp: [UBR, URF, UFL, ULB, DFR, DLF, DBL, DRB],
        co: [0, 0, 0, 0, 0, 0, 0, 0],
        ep: [UB, UR, UF, UL, DR, DF, DL, DB, FR, FL, BL, BR],
        eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    },
    // R
    Cube {
        center: [U, R, F, D, L, B],
        cp: [DFR, UFL, ULB, URF, DRB, DLF, DBL, UBR],
        co: [2, 0, 0, 1, 1, 0, 0, 2],
        ep: [FR, UF, UL, UB, BR, DF, DL, DB, DR, FL, BL, UR],
        eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    },
    // F
    Cube {
        center: [U, R, F, D, L, B],
        cp: [UFL, DLF, ULB, UBR, URF, DFR, DBL, DRB],
        co: [1, 2, 0, 0, 2, 1, 0, 0],
        ep: [UR, FL, UL, UB, DR, FR, DL, DB, UF, DF, BL, BR],
        eo: [0, 1, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0],
    },
    // D
    Cube {
        center: [U, R, F, D, L, B],
        cp: [URF, UFL, ULB, UBR, DLF, DBL, DRB, DFR],
        co: [0, 0, 0, 0, 0, 0, 0, 0],
        ep: [UR, UF, UL, UB, DF, DL, DB, DR, FR, FL, BL, BR],
        eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    },
    // L
    Cube {
        center: [U, R, F, D, L, B],
        cp: [URF, ULB, DBL, UBR, DFR, UFL, DLF, DRB],
        co: [0, 1, 2, 0, 0, 2, 1, 0],
        ep: [UR, UF, BL, UB, DR, DF, FL, DB, FR, UL, DL, BR],
        eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    },
    // B
    Cube {
        center: [U, R, F, D, L, B],
        cp: [URF, UFL, UBR, DRB, DFR, DLF, ULB, DBL],
        co: [0, 0, 1, 2, 0, 0, 2, 1],
        ep: [UR, UF, UL, BR, DR, DF, DL, BL, FR, FL, UB, DB],
        eo: [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 1],
    },
    // E
    Cube {
        center: [U, F, L, D, B, R],
        cp: [URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB],
        co: [0, 0, 0, 0, 0, 0, 0, 0],
        ep: [UR, UF, UL, UB, DR, DF, DL, DB, FL, BL, BR, FR],
        eo: [0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1],
    },
    // M
    Cube {
        center: [B, R, U, F, L, D],
        cp: [URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB],
        co: [0, 0, 0, 0, 0, 0, 0, 0],
        ep: [UR, UB, UL, DB, DR, UF, DL, DF, FR, FL, BL, BR],
        eo: [0, 1, 0, 1, 0, 1, 0, 1, 0, 0, 0, 0],
    },
    // S
    Cube {
        center: [L, U, F, R, D, B],
        cp: [URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB],
        co: [0, 0, 0, 0, 0, 0, 0, 0],
        ep: [UL, UF, DL, UB, UR, DF, DR, DB, FR, FL, BL, BR],
        eo: [1, 0, 1, 0, 1, 0, 1, 0, 0, 0, 0, 0],
    },
];

/// How the rotations and two layer turns decompose into base moves, in
/// `MoveFace` order starting at `x`.
const DERIVED_MOVES: [&[Move]; 9] = {
    use MoveFace as M;
    use Power::{Inverse, Quarter};
    [
        &[Move::new(M::R, Quarter), Move::new(M::M, Inverse), Move::new(M::L, Inverse)],
        &[Move::new(M::U, Quarter), Move::new(M::E, Inverse), Move::new(M::D, Inverse)],
        &[Move::new(M::F, Quarter), Move::new(M::S, Quarter), Move::new(M::B, Inverse)],
        &[Move::new(M::U, Quarter), Move::new(M::E, Inverse)],
        &[Move::new(M::R, Quarter), Move::new(M::M, Inverse)],
        &[Move::new(M::F, Quarter), Move::new(M::S, Quarter)],
        &[Move::new(M::D, Quarter), Move::new(M::E, Quarter)],
        &[Move::new(M::L, Quarter), Move::new(M::M, Quarter)],
        &[Move::new(M::B, Quarter), Move::new(M::S, Inverse)],
    ]
};

/// The quarter turn of every `MoveFace` as a cube state.
pub(crate) static MOVE_CUBES: LazyLock<[Cube; 18]> = LazyLock::new(|| {
    std::array::from_fn(|face| {
        if face < BASE_MOVES.len() {
            return BASE_MOVES[face];
        }
        let mut cube = IDENTITY;
        for moove in DERIVED_MOVES[face - BASE_MOVES.len()] {
            for _ in 0..moove.power.quarter_turns() {
                cube.multiply(&BASE_MOVES[moove.face.index()]);
            }
        }
        cube
    })
});

impl Default for Cube {
    fn default() -> Self {
        IDENTITY
    }
}

impl Cube {
    /// The solved cube.
    #[must_use]
    pub const fn identity() -> Cube {
        IDENTITY
    }

    /// The quarter turn of `face` as a cube state.
    #[must_use]
    pub fn move_cube(face: MoveFace) -> &'static Cube {
        &MOVE_CUBES[face.index()]
    }

    /// Reset to the solved cube.
    pub fn reset(&mut self) -> &mut Self {
        *self = IDENTITY;
        self
    }

    /// Compose with `other` restricted to centers.
    pub fn center_multiply(&mut self, other: &Cube) {
        let center = self.center;
        for (to, &from) in other.center.iter().enumerate() {
            self.center[to] = center[usize::from(from)];
        }
    }

    /// Compose with `other` restricted to corners.
    pub fn corner_multiply(&mut self, other: &Cube) {
        let (cp, co) = (self.cp, self.co);
        for (to, &from) in other.cp.iter().enumerate() {
            let from = usize::from(from);
            self.cp[to] = cp[from];
            self.co[to] = (co[from] + other.co[to]) % 3;
        }
    }

    /// Compose with `other` restricted to edges.
    pub fn edge_multiply(&mut self, other: &Cube) {
        let (ep, eo) = (self.ep, self.eo);
        for (to, &from) in other.ep.iter().enumerate() {
            let from = usize::from(from);
            self.ep[to] = ep[from];
            self.eo[to] = (eo[from] + other.eo[to]) % 2;
        }
    }

    /// Compose with `other`: position `to` receives the cubie that sat at
    /// `other.cp[to]`, with the orientations added.
    pub fn multiply(&mut self, other: &Cube) {
        self.center_multiply(other);
        self.corner_multiply(other);
        self.edge_multiply(other);
    }

    /// Compose with `other` restricted to one orbit.
    pub fn orbit_multiply(&mut self, orbit: Orbit, other: &Cube) {
        match orbit {
            Orbit::Corners => self.corner_multiply(other),
            Orbit::Edges => self.edge_multiply(other),
        }
    }

    /// Apply a single move. Half turns and inverse turns are two and three
    /// quarter turns.
    pub fn apply_move(&mut self, moove: Move) -> &mut Self {
        let quarter_turn = Self::move_cube(moove.face);
        for _ in 0..moove.power.quarter_turns() {
            self.multiply(quarter_turn);
        }
        self
    }

    pub fn apply_alg(&mut self, alg: &Algorithm) -> &mut Self {
        for &moove in alg.moves() {
            self.apply_move(moove);
        }
        self
    }

    /// Parse and apply an algorithm written in move notation.
    ///
    /// # Errors
    ///
    /// If the algorithm contains a malformed move. The cube is left
    /// untouched in that case.
    pub fn apply_moves(&mut self, moves: &str) -> Result<&mut Self, NotationError> {
        let alg: Algorithm = moves.parse()?;
        Ok(self.apply_alg(&alg))
    }

    fn center_position(&self, face: u8) -> u8 {
        (0..6)
            .find(|&i| self.center[usize::from(i)] == face)
            .unwrap_or(face)
    }

    /// The rotation, at most two moves long, that brings the F center to the
    /// front and the U center to the top. The solver only understands cubes
    /// in that orientation.
    #[must_use]
    pub fn upright(&self) -> Algorithm {
        let mut clone = *self;
        let mut result = Vec::with_capacity(2);

        let front_rotation = match clone.center_position(F) {
            D => Some(Move::new(MoveFace::X, Power::Quarter)),
            U => Some(Move::new(MoveFace::X, Power::Inverse)),
            B => Some(Move::new(MoveFace::X, Power::Half)),
            R => Some(Move::new(MoveFace::Y, Power::Quarter)),
            L => Some(Move::new(MoveFace::Y, Power::Inverse)),
            _ => None,
        };
        if let Some(rotation) = front_rotation {
            clone.apply_move(rotation);
            result.push(rotation);
        }

        match clone.center_position(U) {
            L => result.push(Move::new(MoveFace::Z, Power::Quarter)),
            R => result.push(Move::new(MoveFace::Z, Power::Inverse)),
            D => result.push(Move::new(MoveFace::Z, Power::Half)),
            _ => {}
        }

        Algorithm::new(result)
    }

    /// Whether the cube is solved up to a whole cube rotation.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        let mut clone = *self;
        clone.apply_alg(&self.upright());
        clone == IDENTITY
    }

    /// A uniformly random reachable cube with the centers in place.
    pub fn random(rng: &mut fastrand::Rng) -> Cube {
        let mut cube = IDENTITY;

        // Half of all shuffles have matching parities
        loop {
            rng.shuffle(&mut cube.cp);
            rng.shuffle(&mut cube.ep);
            if cube.corner_parity() == cube.edge_parity() {
                break;
            }
        }

        loop {
            cube.co.iter_mut().for_each(|co| *co = rng.u8(0..3));
            if cube.co.iter().sum::<u8>() % 3 == 0 {
                break;
            }
        }

        loop {
            cube.eo.iter_mut().for_each(|eo| *eo = rng.u8(0..2));
            if cube.eo.iter().sum::<u8>() % 2 == 0 {
                break;
            }
        }

        cube
    }
}
