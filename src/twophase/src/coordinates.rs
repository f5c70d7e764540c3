//! Bijections between aspects of a [`Cube`] and bounded integers.
//!
//! Every coordinate can encode a cube into an index and decode an index back
//! into the part of a cube it describes, leaving the rest of the cube alone.
//! Decoding a permutation coordinate marks every slot outside its piece range
//! as [`UNASSIGNED`] so that two partial decodings can be merged.

use crate::{
    FACTORIAL,
    cube::{BR, Cube, DF, DLF, FR, Orbit, UB, UL, UNASSIGNED, UR, URF},
};
use itertools::Itertools;

/// A projection of the cube onto `0..SIZE` that a move table is built for.
pub trait Coordinate {
    const NAME: &'static str;
    /// The number of rows of the move table.
    const SIZE: usize;
    /// Which cubies the coordinate reads. Move tables only multiply this
    /// orbit.
    const ORBIT: Orbit;

    fn encode(cube: &Cube) -> u32;
    fn decode(cube: &mut Cube, index: u32);
}

/// The binomial coefficient, zero when `n < k`.
#[must_use]
pub const fn n_choose_k(n: u32, k: u32) -> u32 {
    if n < k {
        return 0;
    }
    let k = if k > n - k { n - k } else { k };
    let mut result = 1;
    let mut i = 0;
    while i < k {
        result = result * (n - i) / (i + 1);
        i += 1;
    }
    result
}

/// The number of inversions of `perm`, modulo two.
fn permutation_parity(perm: &[u8]) -> u8 {
    let inversions = perm
        .iter()
        .tuple_combinations()
        .filter(|(a, b)| a > b)
        .count();
    u8::from(inversions % 2 == 1)
}

/// A contiguous range of named pieces whose positions and relative order are
/// encoded together.
///
/// The index is `combination * len! + permutation`, where the combination
/// says which slots hold a piece of the range and the permutation says in
/// which order. The combination is counted from the first slot, or from the
/// last when `from_end` is set.
#[derive(Debug, Clone, Copy)]
struct PermutationRange {
    orbit: Orbit,
    start: u8,
    end: u8,
    from_end: bool,
}

impl PermutationRange {
    const fn len(self) -> usize {
        (self.end - self.start + 1) as usize
    }

    fn contains(self, piece: u8) -> bool {
        (self.start..=self.end).contains(&piece)
    }

    fn perm(self, cube: &Cube) -> &[u8] {
        match self.orbit {
            Orbit::Corners => &cube.cp,
            Orbit::Edges => &cube.ep,
        }
    }

    fn perm_mut(self, cube: &mut Cube) -> &mut [u8] {
        match self.orbit {
            Orbit::Corners => &mut cube.cp,
            Orbit::Edges => &mut cube.ep,
        }
    }

    fn encode(self, cube: &Cube) -> u32 {
        let perm = self.perm(cube);
        let n = self.len();
        let last_slot = perm.len() - 1;

        let mut ours = [UNASSIGNED; 6];
        let ours = &mut ours[..n];
        let mut combination = 0;
        let mut found = 0;

        if self.from_end {
            for (slot, &piece) in perm.iter().enumerate().rev() {
                if found == n {
                    break;
                }
                if self.contains(piece) {
                    combination += n_choose_k((last_slot - slot) as u32, found as u32 + 1);
                    ours[n - 1 - found] = piece;
                    found += 1;
                }
            }
        } else {
            for (slot, &piece) in perm.iter().enumerate() {
                if found == n {
                    break;
                }
                if self.contains(piece) {
                    combination += n_choose_k(slot as u32, found as u32 + 1);
                    ours[found] = piece;
                    found += 1;
                }
            }
        }

        // Rotate each piece into its home slot from the top down, counting the
        // rotations as the digits of a mixed-radix number
        let mut permutation = 0;
        for j in (0..n).rev() {
            let target = self.start + j as u8;
            let position = ours[..=j]
                .iter()
                .position(|&piece| piece == target)
                .unwrap_or(j);
            let k = (position + 1) % (j + 1);
            ours[..=j].rotate_left(k);
            permutation = (j as u32 + 1) * permutation + k as u32;
        }

        combination * FACTORIAL[n] + permutation
    }

    fn decode(self, cube: &mut Cube, index: u32) {
        let n = self.len();
        let mut permutation = index % FACTORIAL[n];
        let mut combination = index / FACTORIAL[n];

        let mut ours = [0; 6];
        let ours = &mut ours[..n];
        for (piece, slot) in (self.start..=self.end).zip(ours.iter_mut()) {
            *slot = piece;
        }
        for j in 1..n {
            let radix = j as u32 + 1;
            let k = permutation % radix;
            permutation /= radix;
            ours[..=j].rotate_right(k as usize);
        }

        let perm = self.perm_mut(cube);
        perm.fill(UNASSIGNED);
        let last_slot = perm.len() - 1;
        let mut remaining = n;

        if self.from_end {
            for slot in 0..perm.len() {
                if remaining == 0 {
                    break;
                }
                let c = n_choose_k((last_slot - slot) as u32, remaining as u32);
                if combination >= c {
                    perm[slot] = ours[n - remaining];
                    combination -= c;
                    remaining -= 1;
                }
            }
        } else {
            for slot in (0..perm.len()).rev() {
                if remaining == 0 {
                    break;
                }
                let c = n_choose_k(slot as u32, remaining as u32);
                if combination >= c {
                    perm[slot] = ours[remaining - 1];
                    combination -= c;
                    remaining -= 1;
                }
            }
        }
    }
}

macro_rules! permutation_coordinate {
    ($(#[$meta:meta])* $name:ident, $size:expr, $range:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl $name {
            const RANGE: PermutationRange = $range;
        }

        impl Coordinate for $name {
            const NAME: &'static str = stringify!($name);
            const SIZE: usize = $size;
            const ORBIT: Orbit = Self::RANGE.orbit;

            fn encode(cube: &Cube) -> u32 {
                Self::RANGE.encode(cube)
            }

            fn decode(cube: &mut Cube, index: u32) {
                Self::RANGE.decode(cube, index);
            }
        }
    };
}

/// Corner orientation, `0..3^7`. The orientation of DRB is implied.
#[derive(Debug, Clone, Copy)]
pub struct Twist;

impl Coordinate for Twist {
    const NAME: &'static str = "Twist";
    const SIZE: usize = 2187;
    const ORBIT: Orbit = Orbit::Corners;

    fn encode(cube: &Cube) -> u32 {
        cube.co[..7]
            .iter()
            .fold(0, |twist, &co| 3 * twist + u32::from(co))
    }

    fn decode(cube: &mut Cube, mut index: u32) {
        let mut sum = 0;
        for co in cube.co[..7].iter_mut().rev() {
            *co = (index % 3) as u8;
            index /= 3;
            sum += *co;
        }
        cube.co[7] = (3 - sum % 3) % 3;
    }
}

/// Edge orientation, `0..2^11`. The orientation of BR is implied.
#[derive(Debug, Clone, Copy)]
pub struct Flip;

impl Coordinate for Flip {
    const NAME: &'static str = "Flip";
    const SIZE: usize = 2048;
    const ORBIT: Orbit = Orbit::Edges;

    fn encode(cube: &Cube) -> u32 {
        cube.eo[..11]
            .iter()
            .fold(0, |flip, &eo| 2 * flip + u32::from(eo))
    }

    fn decode(cube: &mut Cube, mut index: u32) {
        let mut sum = 0;
        for eo in cube.eo[..11].iter_mut().rev() {
            *eo = (index % 2) as u8;
            index /= 2;
            sum += *eo;
        }
        cube.eo[11] = (2 - sum % 2) % 2;
    }
}

permutation_coordinate!(
    /// Positions and order of the four slice edges FR, FL, BL, BR. Divided by
    /// 24 it is the phase 1 slice coordinate; below 24 in phase 2.
    FrToBr,
    11880,
    PermutationRange { orbit: Orbit::Edges, start: FR, end: BR, from_end: true }
);

permutation_coordinate!(
    /// Positions and order of the corners URF to DLF.
    UrfToDlf,
    20160,
    PermutationRange { orbit: Orbit::Corners, start: URF, end: DLF, from_end: false }
);

permutation_coordinate!(
    /// Positions and order of the edges UR to DF. Only tracked in phase 2,
    /// where its value stays below 20160.
    UrToDf,
    20160,
    PermutationRange { orbit: Orbit::Edges, start: UR, end: DF, from_end: false }
);

permutation_coordinate!(
    /// Positions and order of the edges UR, UF, UL.
    UrToUl,
    1320,
    PermutationRange { orbit: Orbit::Edges, start: UR, end: UL, from_end: false }
);

permutation_coordinate!(
    /// Positions and order of the edges UB, DR, DF.
    UbToDf,
    1320,
    PermutationRange { orbit: Orbit::Edges, start: UB, end: DF, from_end: false }
);

/// The number of phase 1 slice values: where the four slice edges are,
/// ignoring their order.
pub const N_SLICE: usize = 495;
/// The number of orders of the four slice edges.
pub const N_SLICE_PERM: usize = 24;
/// The number of `UrToUl`/`UbToDf` values reachable in phase 2.
pub const N_MERGE: usize = 336;

/// Rebuild `UrToDf` from its two halves. `None` when the halves claim the
/// same slot, which no real cube does.
#[must_use]
pub fn merge_ur_to_df(ur_to_ul: u32, ub_to_df: u32) -> Option<u32> {
    let mut a = Cube::identity();
    let mut b = Cube::identity();
    UrToUl::decode(&mut a, ur_to_ul);
    UbToDf::decode(&mut b, ub_to_df);

    for (&ours, theirs) in a.ep.iter().zip(b.ep.iter_mut()) {
        if ours != UNASSIGNED {
            if *theirs != UNASSIGNED {
                return None;
            }
            *theirs = ours;
        }
    }

    Some(UrToDf::encode(&b))
}

impl Cube {
    /// The corner orientation coordinate.
    #[must_use]
    pub fn twist(&self) -> u32 {
        Twist::encode(self)
    }

    /// The edge orientation coordinate.
    #[must_use]
    pub fn flip(&self) -> u32 {
        Flip::encode(self)
    }

    /// The parity of the corner permutation, 0 for even.
    #[must_use]
    pub fn corner_parity(&self) -> u8 {
        permutation_parity(&self.cp)
    }

    /// The parity of the edge permutation, 0 for even. Equal to the corner
    /// parity on every reachable cube.
    #[must_use]
    pub fn edge_parity(&self) -> u8 {
        permutation_parity(&self.ep)
    }
}
