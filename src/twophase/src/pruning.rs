//! Admissible lower bounds on the number of moves left in each phase,
//! indexed by pairs of coordinates and stored four bits per entry.

use crate::{
    N_MOVES,
    coordinates::{Coordinate, Flip, N_SLICE, N_SLICE_PERM, Twist, UrToDf, UrfToDlf},
    move_table::{MoveTable, MoveTables, PHASE_TWO_MOVES, parity_move},
    start, success, working,
};
use log::{debug, info, warn};
use std::time::Instant;

/// The value of an entry no breadth first layer has reached yet.
const UNKNOWN: u8 = 0xF;
const ENTRIES_PER_WORD: usize = 8;

/// The number of corner permutation parities.
const N_PARITY: usize = 2;

/// A table of 4 bit distances packed eight to a `u32`.
pub struct PruningTable {
    name: &'static str,
    words: Box<[u32]>,
    len: usize,
}

impl PruningTable {
    fn new(name: &'static str, len: usize) -> Self {
        PruningTable {
            name,
            words: vec![u32::MAX; len.div_ceil(ENTRIES_PER_WORD)].into_boxed_slice(),
            len,
        }
    }

    /// Fill a table by breadth first layering from the solved index 0.
    /// `next_index` maps an index and a move code to the index after the
    /// move.
    fn generate(
        name: &'static str,
        len: usize,
        moves: &[usize],
        next_index: impl Fn(usize, usize) -> usize,
    ) -> Self {
        let start = Instant::now();
        let mut table = PruningTable::new(name, len);
        table.set(0, 0);
        let mut done = 1;
        let mut depth = 0;

        while done < len {
            debug_assert!(depth + 1 < UNKNOWN, "{name} is deeper than its entries can hold");
            let mut reached = 0;
            for index in 0..len {
                if table.get(index) != depth {
                    continue;
                }
                for &moove in moves {
                    let next = next_index(index, moove);
                    if table.get(next) == UNKNOWN {
                        table.set(next, depth + 1);
                        reached += 1;
                    }
                }
            }
            depth += 1;
            debug!(
                working!("{}: {} entries at depth {}, {}/{} done"),
                name,
                reached,
                depth,
                done + reached,
                len
            );
            if reached == 0 {
                warn!("{name}: {} entries are unreachable", len - done);
                break;
            }
            done += reached;
        }

        debug!(
            "Generated the {name} pruning table in {:.3}s",
            start.elapsed().as_secs_f64()
        );
        table
    }

    /// The stored distance of `index`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> u8 {
        let shift = (index % ENTRIES_PER_WORD) * 4;
        ((self.words[index / ENTRIES_PER_WORD] >> shift) & 0xF) as u8
    }

    fn set(&mut self, index: usize, value: u8) {
        let shift = (index % ENTRIES_PER_WORD) * 4;
        let word = &mut self.words[index / ENTRIES_PER_WORD];
        *word = (*word & !(0xF << shift)) | (u32::from(value) << shift);
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The largest stored distance.
    #[must_use]
    pub fn max_depth(&self) -> u8 {
        (0..self.len)
            .map(|index| self.get(index))
            .filter(|&depth| depth != UNKNOWN)
            .max()
            .unwrap_or(0)
    }
}

/// The index after `moove` in a phase 2 table, whose indices are
/// `(24 * permutation + fr_to_br) * 2 + parity`.
fn phase_two_next<C: Coordinate>(
    moves: &MoveTables,
    permutation_table: &MoveTable<C>,
    index: usize,
    moove: usize,
) -> usize {
    let parity = (index % N_PARITY) as u8;
    let fr_to_br = (index / N_PARITY) % N_SLICE_PERM;
    let permutation = index / (N_PARITY * N_SLICE_PERM);
    (N_SLICE_PERM * permutation_table.apply(permutation as u32, moove) as usize
        + moves.fr_to_br.apply(fr_to_br as u32, moove) as usize)
        * N_PARITY
        + usize::from(parity_move(parity, moove))
}

/// The four pruning tables, two per phase.
pub struct PruningTables {
    pub slice_flip: PruningTable,
    pub slice_twist: PruningTable,
    pub slice_urf_to_dlf_parity: PruningTable,
    pub slice_ur_to_df_parity: PruningTable,
}

impl PruningTables {
    #[must_use]
    pub fn generate(moves: &MoveTables) -> Self {
        info!(start!("Generating pruning tables..."));
        let start = Instant::now();
        let phase_one_moves: Vec<usize> = (0..N_MOVES).collect();

        let slice_move = |slice: usize, moove: usize| {
            moves.fr_to_br.apply((slice * N_SLICE_PERM) as u32, moove) as usize / N_SLICE_PERM
        };

        let slice_flip = PruningTable::generate(
            "slice flip",
            N_SLICE * Flip::SIZE,
            &phase_one_moves,
            |index, moove| {
                let (flip, slice) = (index / N_SLICE, index % N_SLICE);
                N_SLICE * moves.flip.apply(flip as u32, moove) as usize + slice_move(slice, moove)
            },
        );

        let slice_twist = PruningTable::generate(
            "slice twist",
            N_SLICE * Twist::SIZE,
            &phase_one_moves,
            |index, moove| {
                let (twist, slice) = (index / N_SLICE, index % N_SLICE);
                N_SLICE * moves.twist.apply(twist as u32, moove) as usize + slice_move(slice, moove)
            },
        );

        let slice_urf_to_dlf_parity = PruningTable::generate(
            "slice URFtoDLF parity",
            N_SLICE_PERM * UrfToDlf::SIZE * N_PARITY,
            &PHASE_TWO_MOVES,
            |index, moove| phase_two_next(moves, &moves.urf_to_dlf, index, moove),
        );

        let slice_ur_to_df_parity = PruningTable::generate(
            "slice URtoDF parity",
            N_SLICE_PERM * UrToDf::SIZE * N_PARITY,
            &PHASE_TWO_MOVES,
            |index, moove| phase_two_next(moves, &moves.ur_to_df, index, moove),
        );

        info!(
            success!("Generated pruning tables in {:.3}s"),
            start.elapsed().as_secs_f64()
        );
        PruningTables {
            slice_flip,
            slice_twist,
            slice_urf_to_dlf_parity,
            slice_ur_to_df_parity,
        }
    }

    /// A lower bound on the moves needed to reach the phase 2 subgroup.
    #[inline]
    #[must_use]
    pub fn phase_one_distance(&self, flip: u32, twist: u32, slice: u32) -> u8 {
        let slice = slice as usize;
        let by_flip = self.slice_flip.get(N_SLICE * flip as usize + slice);
        let by_twist = self.slice_twist.get(N_SLICE * twist as usize + slice);
        by_flip.max(by_twist)
    }

    /// A lower bound on the phase 2 moves needed to solve the cube.
    #[inline]
    #[must_use]
    pub fn phase_two_distance(
        &self,
        urf_to_dlf: u32,
        ur_to_df: u32,
        fr_to_br: u32,
        parity: u8,
    ) -> u8 {
        let index = |permutation: u32| {
            (N_SLICE_PERM * permutation as usize + fr_to_br as usize) * N_PARITY
                + usize::from(parity)
        };
        let by_edges = self.slice_ur_to_df_parity.get(index(ur_to_df));
        let by_corners = self.slice_urf_to_dlf_parity.get(index(urf_to_dlf));
        by_edges.max(by_corners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        coordinates::FrToBr,
        cube::Cube,
        init_solver,
        notation::Move,
    };

    #[test]
    fn test_packing() {
        let mut table = PruningTable::new("test", 20);
        assert_eq!(table.words.len(), 3);
        assert!((0..20).all(|index| table.get(index) == UNKNOWN));

        table.set(0, 3);
        table.set(7, 12);
        table.set(8, 1);
        table.set(19, 0);
        assert_eq!(table.get(0), 3);
        assert_eq!(table.get(7), 12);
        assert_eq!(table.get(8), 1);
        assert_eq!(table.get(19), 0);
        assert_eq!(table.get(1), UNKNOWN);
        assert_eq!(table.get(6), UNKNOWN);
        assert_eq!(table.get(9), UNKNOWN);

        table.set(7, 2);
        assert_eq!(table.get(7), 2);
        assert_eq!(table.get(6), UNKNOWN);
    }

    #[test]
    fn test_small_breadth_first_search() {
        // A cycle of length 10 where a move steps forwards or backwards
        let table = PruningTable::generate("cycle", 10, &[0, 1], |index, moove| {
            if moove == 0 { (index + 1) % 10 } else { (index + 9) % 10 }
        });
        let distances: Vec<u8> = (0..10).map(|index| table.get(index)).collect();
        assert_eq!(distances, [0, 1, 2, 3, 4, 5, 4, 3, 2, 1]);
        assert_eq!(table.max_depth(), 5);
    }

    #[test]
    fn test_unreachable_entries_terminate() {
        let table = PruningTable::generate("disconnected", 6, &[0], |index, _| (index + 2) % 6);
        assert_eq!(table.get(2), 1);
        assert_eq!(table.get(4), 2);
        assert_eq!(table.get(1), UNKNOWN);
    }

    #[test]
    fn test_every_entry_is_reached() {
        let tables = &init_solver().pruning;
        for table in [
            &tables.slice_flip,
            &tables.slice_twist,
            &tables.slice_urf_to_dlf_parity,
            &tables.slice_ur_to_df_parity,
        ] {
            assert_eq!(table.get(0), 0, "{}", table.name());
            assert!(
                (0..table.len()).all(|index| table.get(index) != UNKNOWN),
                "{} has unreached entries",
                table.name()
            );
        }
        for table in [&tables.slice_flip, &tables.slice_twist] {
            assert!(table.max_depth() <= 12, "{} is too deep", table.name());
        }
    }

    #[test]
    fn test_phase_one_bounds_are_admissible() {
        let tables = init_solver();
        let mut rng = fastrand::Rng::with_seed(9);
        for _ in 0..2000 {
            let len = rng.usize(0..9);
            let mut cube = Cube::identity();
            for _ in 0..len {
                cube.apply_move(Move::from_code(rng.usize(0..N_MOVES)).unwrap());
            }
            let slice = FrToBr::encode(&cube) / N_SLICE_PERM as u32;
            let bound = tables
                .pruning
                .phase_one_distance(cube.flip(), cube.twist(), slice);
            assert!(usize::from(bound) <= len);
        }
    }

    #[test]
    fn test_phase_two_bounds_are_admissible() {
        let tables = init_solver();
        let mut rng = fastrand::Rng::with_seed(10);
        for _ in 0..2000 {
            let len = rng.usize(0..12);
            let mut cube = Cube::identity();
            for _ in 0..len {
                let code = PHASE_TWO_MOVES[rng.usize(..PHASE_TWO_MOVES.len())];
                cube.apply_move(Move::from_code(code).unwrap());
            }
            let bound = tables.pruning.phase_two_distance(
                UrfToDlf::encode(&cube),
                UrToDf::encode(&cube),
                FrToBr::encode(&cube),
                cube.corner_parity(),
            );
            assert!(usize::from(bound) <= len);
        }
    }

    #[test]
    fn test_neighbours_differ_by_at_most_one() {
        let tables = init_solver();
        let mut rng = fastrand::Rng::with_seed(11);
        for _ in 0..2000 {
            let flip = rng.u32(0..Flip::SIZE as u32);
            let slice = rng.u32(0..N_SLICE as u32);
            let distance = tables.pruning.slice_flip.get(N_SLICE * flip as usize + slice as usize);
            let mut has_closer_neighbour = distance == 0;
            for moove in 0..N_MOVES {
                let next_flip = tables.moves.flip.apply(flip, moove);
                let next_slice = tables.moves.fr_to_br.apply(slice * 24, moove) / 24;
                let next = tables
                    .pruning
                    .slice_flip
                    .get(N_SLICE * next_flip as usize + next_slice as usize);
                assert!(next.abs_diff(distance) <= 1);
                has_closer_neighbour |= next + 1 == distance;
            }
            assert!(has_closer_neighbour);
        }
    }
}
