use aoc_2023 as _;
use aoc_solver::{SolverError, SolverRegistryBuilder};

const DAYS: [u8; 7] = [10, 14, 16, 17, 18, 20, 21];

#[test]
fn test_every_day_is_registered() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .unwrap()
        .build();

    for day in DAYS {
        let info = registry.info(2023, day).unwrap();
        assert_eq!(info.parts, 2, "day {}", day);
    }
    assert_eq!(registry.iter_info().filter(|info| info.year == 2023).count(), DAYS.len());
}

#[test]
fn test_ring_queue_days_are_tagged() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"ring-queue"))
        .unwrap()
        .build();

    let days: Vec<u8> = registry.iter_info().map(|info| info.day).collect();
    assert_eq!(days, vec![10, 16, 18, 20, 21]);
}

#[test]
fn test_solve_through_registry() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .unwrap()
        .build();

    let input = "\
.....
.S-7.
.|.|.
.L-J.
.....
";
    let mut solver = registry.create_solver(2023, 10, input).unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "4");
    assert_eq!(solver.solve(2).unwrap().answer, "1");
    assert!(solver.solve(3).is_err());

    assert!(matches!(
        registry.create_solver(2023, 14, "O.\n.?"),
        Err(SolverError::Parse(_))
    ));
    assert!(matches!(
        registry.create_solver(2023, 1, ""),
        Err(SolverError::NotFound(2023, 1))
    ));
}
