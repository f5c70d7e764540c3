use log::info;
use twophase::{Algorithm, Cube, Solver, SolverConfig, init_solver, inverse, scramble};

fn assert_solves(cube: &Cube, solution: &Algorithm) {
    let mut cube = *cube;
    cube.apply_alg(solution);
    assert!(cube.is_solved(), "{solution} does not solve the cube");
}

#[test_log::test]
fn test_identity() {
    init_solver();
    let solution = Cube::identity().solve(22).unwrap().unwrap();
    info!("Identity solution: {solution}");
    assert_eq!(solution.to_string(), "R L U2 R L F2 R2 U2 R2 F2 R2 U2 F2 L2");
    assert_solves(&Cube::identity(), &solution);
}

#[test_log::test]
fn test_random_cubes() {
    let solver = Solver::new(init_solver());
    let mut rng = fastrand::Rng::with_seed(13);
    for _ in 0..5 {
        let cube = Cube::random(&mut rng);
        let solution = solver.solve(&cube).unwrap();
        info!("{cube}: {solution}");
        assert!(solution.len() <= 22);
        assert_solves(&cube, &solution);
    }
}

#[test_log::test]
fn test_short_scramble() {
    let mut cube = Cube::identity();
    cube.apply_moves("R U R' U' F2 D L'").unwrap();
    let solution = Solver::new(init_solver()).solve(&cube).unwrap();
    assert_solves(&cube, &solution);
}

#[test_log::test]
fn test_budget_exhausted() {
    let solver = Solver::new(init_solver()).with_max_depth(1);
    let mut rng = fastrand::Rng::with_seed(14);
    assert_eq!(solver.solve(&Cube::random(&mut rng)), None);
    assert_eq!(Solver::new(init_solver()).with_max_depth(0).solve(&Cube::identity()), None);
}

#[test_log::test]
fn test_rotated_cubes() {
    let solver = Solver::new(init_solver());
    let mut rng = fastrand::Rng::with_seed(15);
    for rotation in ["x", "y'", "z2", "x y", "z' x2", "M E' S2"] {
        let mut cube = Cube::random(&mut rng);
        cube.apply_moves(rotation).unwrap();
        let solution = solver.solve(&cube).unwrap();
        assert!(
            solution.moves().iter().all(|moove| moove.face.is_outer()),
            "{solution} has moves of inner layers"
        );
        assert_solves(&cube, &solution);
    }
}

#[test_log::test]
fn test_facelet_input() {
    let cube: Cube = "DURRUFRRRBRBDRBDRBFDDDFFDFFBLLBDBLDLFUUFLLFLLULRUBUUBU"
        .parse()
        .unwrap();
    let solution = Solver::new(init_solver()).solve(&cube).unwrap();
    assert_solves(&cube, &solution);
}

#[test_log::test]
fn test_scramble() {
    init_solver();
    let scramble = scramble().unwrap();
    let mut cube = Cube::identity();
    cube.apply_alg(&scramble);
    assert!(!cube.is_solved());

    // The scramble is the inverse of a solution
    let undo: Algorithm = inverse(&scramble.to_string()).unwrap().parse().unwrap();
    assert_solves(&cube, &undo);
}

#[test_log::test]
fn test_scramble_respects_configured_budget() {
    let tables = init_solver();
    let mut rng = fastrand::Rng::with_seed(16);

    let shallow = Solver::from_config(tables, &SolverConfig { max_depth: 1 });
    assert_eq!(shallow.scramble(&mut rng), None);

    let solver = Solver::from_config(tables, &SolverConfig::default());
    let scramble = solver.scramble(&mut rng).unwrap();
    assert!(scramble.len() <= solver.max_depth());
}

#[test_log::test]
fn test_solvers_share_tables_across_threads() {
    let tables = init_solver();
    std::thread::scope(|scope| {
        for seed in 0..3 {
            scope.spawn(move || {
                let mut rng = fastrand::Rng::with_seed(100 + seed);
                let cube = Cube::random(&mut rng);
                let solution = Solver::new(tables).solve(&cube).unwrap();
                assert_solves(&cube, &solution);
            });
        }
    });
}
