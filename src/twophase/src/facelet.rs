//! Conversion between [`Cube`] and the 54 character sticker string, faces in
//! the order U R F D L B with nine stickers each, read row by row.

use crate::cube::{Cube, UNASSIGNED};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FaceletError {
    #[error("Expected 54 facelets, found {0}")]
    WrongLength(usize),
    #[error("Invalid facelet color '{0}'")]
    InvalidColor(char),
    #[error("Expected 9 facelets of color '{color}', found {count}")]
    WrongColorCount { color: char, count: usize },
    #[error("The corner at position {0} matches no corner cubie")]
    InvalidCorner(usize),
    #[error("The edge at position {0} matches no edge cubie")]
    InvalidEdge(usize),
    #[error("The corner at position {0} repeats a corner cubie seen earlier")]
    DuplicateCorner(usize),
    #[error("The edge at position {0} repeats an edge cubie seen earlier")]
    DuplicateEdge(usize),
}

const COLORS: [char; 6] = ['U', 'R', 'F', 'D', 'L', 'B'];

const fn facelet(face: usize, n: usize) -> usize {
    face * 9 + n - 1
}

const fn u(n: usize) -> usize {
    facelet(0, n)
}
const fn r(n: usize) -> usize {
    facelet(1, n)
}
const fn f(n: usize) -> usize {
    facelet(2, n)
}
const fn d(n: usize) -> usize {
    facelet(3, n)
}
const fn l(n: usize) -> usize {
    facelet(4, n)
}
const fn b(n: usize) -> usize {
    facelet(5, n)
}

const CENTER_FACELETS: [usize; 6] = [u(5), r(5), f(5), d(5), l(5), b(5)];

/// The stickers of each corner position, starting with its U or D sticker
/// and going clockwise.
const CORNER_FACELETS: [[usize; 3]; 8] = [
    [u(9), r(1), f(3)],
    [u(7), f(1), l(3)],
    [u(1), l(1), b(3)],
    [u(3), b(1), r(3)],
    [d(3), f(9), r(7)],
    [d(1), l(9), f(7)],
    [d(7), b(9), l(7)],
    [d(9), r(9), b(7)],
];

const EDGE_FACELETS: [[usize; 2]; 12] = [
    [u(6), r(2)],
    [u(8), f(2)],
    [u(4), l(2)],
    [u(2), b(2)],
    [d(6), r(8)],
    [d(2), f(8)],
    [d(4), l(8)],
    [d(8), b(8)],
    [f(6), r(4)],
    [f(4), l(6)],
    [b(6), l(4)],
    [b(4), r(6)],
];

const CORNER_COLORS: [[char; 3]; 8] = [
    ['U', 'R', 'F'],
    ['U', 'F', 'L'],
    ['U', 'L', 'B'],
    ['U', 'B', 'R'],
    ['D', 'F', 'R'],
    ['D', 'L', 'F'],
    ['D', 'B', 'L'],
    ['D', 'R', 'B'],
];

const EDGE_COLORS: [[char; 2]; 12] = [
    ['U', 'R'],
    ['U', 'F'],
    ['U', 'L'],
    ['U', 'B'],
    ['D', 'R'],
    ['D', 'F'],
    ['D', 'L'],
    ['D', 'B'],
    ['F', 'R'],
    ['F', 'L'],
    ['B', 'L'],
    ['B', 'R'],
];

fn color(index: u8) -> char {
    COLORS.get(usize::from(index)).copied().unwrap_or('?')
}

impl Cube {
    /// The sticker string of the cube. Slots of a partially decoded cube show
    /// as `?`.
    #[must_use]
    pub fn to_facelets(&self) -> String {
        let mut facelets = ['?'; 54];

        for (&slot, &center) in CENTER_FACELETS.iter().zip(&self.center) {
            facelets[slot] = color(center);
        }

        for (i, slots) in CORNER_FACELETS.iter().enumerate() {
            let Some(colors) = CORNER_COLORS.get(usize::from(self.cp[i])) else {
                continue;
            };
            let ori = usize::from(self.co[i]);
            for (n, &color) in colors.iter().enumerate() {
                facelets[slots[(n + ori) % 3]] = color;
            }
        }

        for (i, slots) in EDGE_FACELETS.iter().enumerate() {
            let Some(colors) = EDGE_COLORS.get(usize::from(self.ep[i])) else {
                continue;
            };
            let ori = usize::from(self.eo[i]);
            for (n, &color) in colors.iter().enumerate() {
                facelets[slots[(n + ori) % 2]] = color;
            }
        }

        facelets.iter().collect()
    }

    /// Parse a sticker string.
    ///
    /// # Errors
    ///
    /// If the string is not 54 stickers of the six face letters, nine of
    /// each, or a corner or edge carries a color combination no cubie has, or
    /// the same cubie appears twice.
    pub fn from_facelets(facelets: &str) -> Result<Cube, FaceletError> {
        let stickers: Vec<char> = facelets.chars().collect();
        if stickers.len() != 54 {
            return Err(FaceletError::WrongLength(stickers.len()));
        }
        if let Some(&invalid) = stickers.iter().find(|&&sticker| !COLORS.contains(&sticker)) {
            return Err(FaceletError::InvalidColor(invalid));
        }
        for color in COLORS {
            let count = stickers.iter().filter(|&&sticker| sticker == color).count();
            if count != 9 {
                return Err(FaceletError::WrongColorCount { color, count });
            }
        }

        let mut cube = Cube::identity();
        cube.cp = [UNASSIGNED; 8];
        cube.ep = [UNASSIGNED; 12];

        for (i, &slot) in CENTER_FACELETS.iter().enumerate() {
            if let Some(face) = COLORS.iter().position(|&color| color == stickers[slot]) {
                cube.center[i] = face as u8;
            }
        }

        for (i, slots) in CORNER_FACELETS.iter().enumerate() {
            let ori = (0..3)
                .find(|&ori| matches!(stickers[slots[ori]], 'U' | 'D'))
                .ok_or(FaceletError::InvalidCorner(i))?;
            let clockwise = stickers[slots[(ori + 1) % 3]];
            let counter_clockwise = stickers[slots[(ori + 2) % 3]];
            let corner = CORNER_COLORS
                .iter()
                .position(|colors| colors[1] == clockwise && colors[2] == counter_clockwise)
                .ok_or(FaceletError::InvalidCorner(i))?;
            if cube.cp[..i].contains(&(corner as u8)) {
                return Err(FaceletError::DuplicateCorner(i));
            }
            cube.cp[i] = corner as u8;
            cube.co[i] = ori as u8;
        }

        for (i, slots) in EDGE_FACELETS.iter().enumerate() {
            let stickers = [stickers[slots[0]], stickers[slots[1]]];
            let (edge, ori) = EDGE_COLORS
                .iter()
                .enumerate()
                .find_map(|(edge, colors)| {
                    if *colors == stickers {
                        Some((edge, 0))
                    } else if [colors[1], colors[0]] == stickers {
                        Some((edge, 1))
                    } else {
                        None
                    }
                })
                .ok_or(FaceletError::InvalidEdge(i))?;
            if cube.ep[..i].contains(&(edge as u8)) {
                return Err(FaceletError::DuplicateEdge(i));
            }
            cube.ep[i] = edge as u8;
            cube.eo[i] = ori;
        }

        Ok(cube)
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_facelets())
    }
}

impl FromStr for Cube {
    type Err = FaceletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cube::from_facelets(s)
    }
}
