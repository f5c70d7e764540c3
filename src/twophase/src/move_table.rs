//! Transition tables: for every coordinate value and every outer move, the
//! coordinate value after the move.

use crate::{
    N_MOVES, start, success,
    coordinates::{
        Coordinate, Flip, FrToBr, N_MERGE, Twist, UbToDf, UrToDf, UrToUl, UrfToDlf,
        merge_ur_to_df,
    },
    cube::Cube,
    notation::{Move, MoveFace, Power},
};
use log::{debug, info};
use std::{marker::PhantomData, time::Instant};

/// The move table of one coordinate, `SIZE` rows of [`N_MOVES`] columns.
pub struct MoveTable<C> {
    rows: Box<[[u32; N_MOVES]]>,
    _coordinate: PhantomData<C>,
}

impl<C: Coordinate> MoveTable<C> {
    /// Decode every value of the coordinate onto a scratch cube and apply the
    /// three powers of each face to it.
    #[must_use]
    pub fn generate() -> Self {
        let start = Instant::now();
        let mut cube = Cube::identity();

        let rows = (0..C::SIZE as u32)
            .map(|index| {
                C::decode(&mut cube, index);
                let mut row = [0; N_MOVES];
                for face in MoveFace::OUTER {
                    let quarter_turn = Cube::move_cube(face);
                    for power in Power::ALL {
                        cube.orbit_multiply(C::ORBIT, quarter_turn);
                        row[Move::new(face, power).code()] = C::encode(&cube);
                    }
                    cube.orbit_multiply(C::ORBIT, quarter_turn);
                    debug_assert_eq!(C::encode(&cube), index, "four quarter turns are not a no-op");
                }
                row
            })
            .collect();

        debug!(
            "Generated the {} move table in {:.3}s",
            C::NAME,
            start.elapsed().as_secs_f64()
        );
        MoveTable {
            rows,
            _coordinate: PhantomData,
        }
    }

    /// The coordinate value after applying the move with code `moove`.
    #[inline]
    #[must_use]
    pub fn apply(&self, index: u32, moove: usize) -> u32 {
        self.rows[index as usize][moove]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// `UrToDf` for every pair of `UrToUl` and `UbToDf` values below
/// [`N_MERGE`], or `None` for pairs that collide.
pub struct MergeTable(Box<[Option<u32>]>);

impl MergeTable {
    #[must_use]
    pub fn generate() -> Self {
        MergeTable(
            (0..(N_MERGE * N_MERGE) as u32)
                .map(|index| merge_ur_to_df(index / N_MERGE as u32, index % N_MERGE as u32))
                .collect(),
        )
    }

    #[inline]
    #[must_use]
    pub fn merge(&self, ur_to_ul: u32, ub_to_df: u32) -> Option<u32> {
        if ur_to_ul as usize >= N_MERGE || ub_to_df as usize >= N_MERGE {
            return None;
        }
        self.0[ur_to_ul as usize * N_MERGE + ub_to_df as usize]
    }
}

/// Codes of the moves that keep a cube inside the phase 2 subgroup: every
/// turn of U and D, and half turns of the other faces.
pub const PHASE_TWO_MOVES: [usize; 10] = [0, 1, 2, 4, 7, 9, 10, 11, 13, 16];

/// The corner permutation parity after a move. Quarter turns are four cycles
/// and flip it; half turns keep it.
#[inline]
#[must_use]
pub fn parity_move(parity: u8, moove: usize) -> u8 {
    parity ^ u8::from(moove % 3 != Power::Half as usize)
}

/// Every move table the search reads.
pub struct MoveTables {
    pub twist: MoveTable<Twist>,
    pub flip: MoveTable<Flip>,
    pub fr_to_br: MoveTable<FrToBr>,
    pub urf_to_dlf: MoveTable<UrfToDlf>,
    pub ur_to_df: MoveTable<UrToDf>,
    pub ur_to_ul: MoveTable<UrToUl>,
    pub ub_to_df: MoveTable<UbToDf>,
    pub merge: MergeTable,
}

impl MoveTables {
    #[must_use]
    pub fn generate() -> Self {
        info!(start!("Generating move tables..."));
        let start = Instant::now();

        let tables = MoveTables {
            twist: MoveTable::generate(),
            flip: MoveTable::generate(),
            fr_to_br: MoveTable::generate(),
            urf_to_dlf: MoveTable::generate(),
            ur_to_df: MoveTable::generate(),
            ur_to_ul: MoveTable::generate(),
            ub_to_df: MoveTable::generate(),
            merge: MergeTable::generate(),
        };

        info!(
            success!("Generated move tables in {:.3}s"),
            start.elapsed().as_secs_f64()
        );
        tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{coordinates::N_SLICE_PERM, notation::Algorithm};
    use std::sync::LazyLock;

    static TABLES: LazyLock<MoveTables> = LazyLock::new(MoveTables::generate);

    fn random_outer_alg(rng: &mut fastrand::Rng, len: usize) -> Algorithm {
        (0..len)
            .map(|_| Move::from_code(rng.usize(0..N_MOVES)).unwrap())
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(TABLES.twist.len(), 2187);
        assert_eq!(TABLES.flip.len(), 2048);
        assert_eq!(TABLES.fr_to_br.len(), 11880);
        assert_eq!(TABLES.urf_to_dlf.len(), 20160);
        assert_eq!(TABLES.ur_to_df.len(), 20160);
        assert_eq!(TABLES.ur_to_ul.len(), 1320);
        assert_eq!(TABLES.ub_to_df.len(), 1320);
    }

    #[test]
    fn test_tables_follow_the_cube() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..100 {
            let alg = random_outer_alg(&mut rng, 30);
            let mut cube = Cube::identity();

            let mut twist = Twist::encode(&cube);
            let mut flip = Flip::encode(&cube);
            let mut fr_to_br = FrToBr::encode(&cube);
            let mut urf_to_dlf = UrfToDlf::encode(&cube);
            let mut ur_to_ul = UrToUl::encode(&cube);
            let mut ub_to_df = UbToDf::encode(&cube);
            let mut parity = cube.corner_parity();

            for &moove in alg.moves() {
                cube.apply_move(moove);
                let code = moove.code();
                twist = TABLES.twist.apply(twist, code);
                flip = TABLES.flip.apply(flip, code);
                fr_to_br = TABLES.fr_to_br.apply(fr_to_br, code);
                urf_to_dlf = TABLES.urf_to_dlf.apply(urf_to_dlf, code);
                ur_to_ul = TABLES.ur_to_ul.apply(ur_to_ul, code);
                ub_to_df = TABLES.ub_to_df.apply(ub_to_df, code);
                parity = parity_move(parity, code);
            }

            assert_eq!(twist, cube.twist());
            assert_eq!(flip, cube.flip());
            assert_eq!(fr_to_br, FrToBr::encode(&cube));
            assert_eq!(urf_to_dlf, UrfToDlf::encode(&cube));
            assert_eq!(ur_to_ul, UrToUl::encode(&cube));
            assert_eq!(ub_to_df, UbToDf::encode(&cube));
            assert_eq!(parity, cube.corner_parity());
        }
    }

    #[test]
    fn test_phase_two_moves_stay_in_subgroup() {
        for code in PHASE_TWO_MOVES {
            assert_eq!(TABLES.twist.apply(0, code), 0);
            assert_eq!(TABLES.flip.apply(0, code), 0);
            assert!((TABLES.fr_to_br.apply(0, code) as usize) < N_SLICE_PERM);
        }
        for code in (0..N_MOVES).filter(|code| !PHASE_TWO_MOVES.contains(code)) {
            let moved = TABLES.twist.apply(0, code) != 0
                || TABLES.flip.apply(0, code) != 0
                || TABLES.fr_to_br.apply(0, code) as usize >= N_SLICE_PERM;
            assert!(moved, "{} leaves the subgroup", Move::from_code(code).unwrap());
        }
    }

    #[test]
    fn test_ur_to_df_follows_phase_two_moves() {
        let mut rng = fastrand::Rng::with_seed(8);
        let mut cube = Cube::identity();
        let mut ur_to_df = UrToDf::encode(&cube);
        for _ in 0..500 {
            let code = PHASE_TWO_MOVES[rng.usize(..PHASE_TWO_MOVES.len())];
            cube.apply_move(Move::from_code(code).unwrap());
            ur_to_df = TABLES.ur_to_df.apply(ur_to_df, code);
            assert!((ur_to_df as usize) < UrToDf::SIZE);
            assert_eq!(ur_to_df, UrToDf::encode(&cube));
        }
    }

    #[test]
    fn test_merge_table() {
        assert_eq!(TABLES.merge.merge(0, 114), Some(0));
        assert_eq!(TABLES.merge.merge(0, 0), None);
        assert_eq!(TABLES.merge.merge(N_MERGE as u32, 0), None);

        let cube = *Cube::identity().apply_moves("U D2 R2 F2 U' B2 L2 D").unwrap();
        assert_eq!(
            TABLES.merge.merge(UrToUl::encode(&cube), UbToDf::encode(&cube)),
            Some(UrToDf::encode(&cube))
        );
    }

    #[test]
    fn test_parity_move() {
        assert_eq!(parity_move(0, 0), 1);
        assert_eq!(parity_move(0, 1), 0);
        assert_eq!(parity_move(1, 2), 0);
        assert_eq!(parity_move(1, 16), 1);
    }
}
