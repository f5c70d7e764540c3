//! Move notation: the 18 face letters, the three powers, and algorithms
//! written as whitespace-separated tokens such as `R U2 F'`.

use itertools::Itertools;
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("Invalid move: {0}")]
    InvalidMove(String),
}

/// Everything that can be turned. The first six are the outer faces, which
/// are the only moves the search ever emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum MoveFace {
    U,
    R,
    F,
    D,
    L,
    B,
    /// Equator slice, turned like D.
    E,
    /// Middle slice, turned like L.
    M,
    /// Standing slice, turned like F.
    S,
    /// Whole cube rotation around R.
    X,
    /// Whole cube rotation around U.
    Y,
    /// Whole cube rotation around F.
    Z,
    /// Two layer turns, written in lowercase.
    Uw,
    Rw,
    Fw,
    Dw,
    Lw,
    Bw,
}

impl MoveFace {
    pub const ALL: [MoveFace; 18] = [
        MoveFace::U,
        MoveFace::R,
        MoveFace::F,
        MoveFace::D,
        MoveFace::L,
        MoveFace::B,
        MoveFace::E,
        MoveFace::M,
        MoveFace::S,
        MoveFace::X,
        MoveFace::Y,
        MoveFace::Z,
        MoveFace::Uw,
        MoveFace::Rw,
        MoveFace::Fw,
        MoveFace::Dw,
        MoveFace::Lw,
        MoveFace::Bw,
    ];

    /// The outer faces in index order.
    pub const OUTER: [MoveFace; 6] = [
        MoveFace::U,
        MoveFace::R,
        MoveFace::F,
        MoveFace::D,
        MoveFace::L,
        MoveFace::B,
    ];

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<MoveFace> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub fn letter(self) -> char {
        b"URFDLBEMSxyzurfdlb"[self.index()] as char
    }

    #[must_use]
    pub fn from_letter(letter: char) -> Option<MoveFace> {
        Self::ALL.into_iter().find(|face| face.letter() == letter)
    }

    /// Whether this is one of the six outer faces.
    #[must_use]
    pub fn is_outer(self) -> bool {
        self.index() < 6
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Power {
    Quarter,
    Half,
    Inverse,
}

impl Power {
    pub const ALL: [Power; 3] = [Power::Quarter, Power::Half, Power::Inverse];

    /// How many clockwise quarter turns this power stands for.
    #[must_use]
    pub fn quarter_turns(self) -> usize {
        self as usize + 1
    }

    #[must_use]
    pub fn inverse(self) -> Power {
        match self {
            Power::Quarter => Power::Inverse,
            Power::Half => Power::Half,
            Power::Inverse => Power::Quarter,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Power::Quarter => "",
            Power::Half => "2",
            Power::Inverse => "'",
        }
    }
}

/// A single move. Its code is `face * 3 + power`, which for the outer faces
/// is the column index into the move tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub face: MoveFace,
    pub power: Power,
}

impl Move {
    #[must_use]
    pub const fn new(face: MoveFace, power: Power) -> Move {
        Move { face, power }
    }

    #[must_use]
    pub fn code(self) -> usize {
        self.face.index() * 3 + self.power as usize
    }

    #[must_use]
    pub fn from_code(code: usize) -> Option<Move> {
        let face = MoveFace::from_index(code / 3)?;
        Some(Move::new(face, Power::ALL[code % 3]))
    }

    #[must_use]
    pub fn inverse(self) -> Move {
        Move::new(self.face, self.power.inverse())
    }

    /// Every move of the outer faces, in code order.
    pub fn outer() -> impl Iterator<Item = Move> {
        MoveFace::OUTER
            .into_iter()
            .flat_map(|face| Power::ALL.into_iter().map(move |power| Move::new(face, power)))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face.letter(), self.power.suffix())
    }
}

impl FromStr for Move {
    type Err = NotationError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let invalid = || NotationError::InvalidMove(token.to_owned());

        let mut chars = token.chars();
        let face = chars
            .next()
            .and_then(MoveFace::from_letter)
            .ok_or_else(invalid)?;
        let power = match chars.next() {
            None => Power::Quarter,
            Some('2') => Power::Half,
            Some('\'') => Power::Inverse,
            Some(_) => return Err(invalid()),
        };
        if chars.next().is_some() {
            return Err(invalid());
        }

        Ok(Move::new(face, power))
    }
}

/// A sequence of moves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Algorithm(Vec<Move>);

impl Algorithm {
    #[must_use]
    pub fn new(moves: Vec<Move>) -> Algorithm {
        Algorithm(moves)
    }

    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.0
    }

    #[must_use]
    pub fn into_moves(self) -> Vec<Move> {
        self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The group inverse: the moves reversed, each with its power inverted.
    #[must_use]
    pub fn inverse(&self) -> Algorithm {
        Algorithm(self.0.iter().rev().map(|m| m.inverse()).collect())
    }
}

impl From<Vec<Move>> for Algorithm {
    fn from(moves: Vec<Move>) -> Self {
        Algorithm(moves)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(" "))
    }
}

impl FromStr for Algorithm {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(Algorithm)
    }
}

/// Invert an algorithm written in move notation.
///
/// # Errors
///
/// If any token of `algorithm` is not a valid move.
pub fn inverse(algorithm: &str) -> Result<String, NotationError> {
    Ok(algorithm.parse::<Algorithm>()?.inverse().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_string() {
        assert_eq!(inverse("F B' R").unwrap(), "R' B F'");
        assert_eq!(inverse("").unwrap(), "");
        assert_eq!(inverse("  U2  ").unwrap(), "U2");
    }

    #[test]
    fn test_double_inverse_is_identity() {
        let alg: Algorithm = "U R2 F' x y2 M' u2 z' S b".parse().unwrap();
        assert_eq!(alg.inverse().inverse(), alg);
    }

    #[test]
    fn test_codes() {
        assert_eq!("U".parse::<Move>().unwrap().code(), 0);
        assert_eq!("U'".parse::<Move>().unwrap().code(), 2);
        assert_eq!("R2".parse::<Move>().unwrap().code(), 4);
        assert_eq!("b'".parse::<Move>().unwrap().code(), 53);
        for code in 0..54 {
            assert_eq!(Move::from_code(code).unwrap().code(), code);
        }
        assert!(Move::from_code(54).is_none());
        assert_eq!(Move::outer().map(Move::code).collect::<Vec<_>>(), (0..18).collect::<Vec<_>>());
    }

    #[test]
    fn test_rejects_malformed_tokens() {
        for bad in ["U2'", "Q", "U3", "R\"", "'", "Rw"] {
            assert_eq!(
                bad.parse::<Algorithm>(),
                Err(NotationError::InvalidMove(bad.to_owned())),
                "{bad} should be rejected"
            );
        }
        assert_eq!(
            "R U X".parse::<Algorithm>(),
            Err(NotationError::InvalidMove("X".to_owned()))
        );
    }

    #[test]
    fn test_round_trip_display() {
        let text = "U R2 F' E M2 S' x y' z2 u r f' d l2 b";
        assert_eq!(text.parse::<Algorithm>().unwrap().to_string(), text);
    }
}
