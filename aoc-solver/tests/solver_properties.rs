//! Property tests for part dispatch, range checks and instance caching

use aoc_solver::{
    AocParser, AocSolver, DynSolver, ParseError, PartSolver, SolveError, Solver, SolverExt,
    SolverInstance,
};
use proptest::prelude::*;

/// Part 1 traces the "expensive" value, part 2 reuses it.
#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct Cached;

#[derive(Debug)]
struct CachedData {
    numbers: Vec<i64>,
    total: Option<i64>,
    computed: u32,
}

impl CachedData {
    fn total(&mut self) -> i64 {
        if let Some(total) = self.total {
            return total;
        }
        self.computed += 1;
        *self.total.insert(self.numbers.iter().sum())
    }
}

impl AocParser for Cached {
    type SharedData<'a> = CachedData;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let numbers = input
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                l.trim()
                    .parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("bad number: {}", l)))
            })
            .collect::<Result<_, _>>()?;
        Ok(CachedData {
            numbers,
            total: None,
            computed: 0,
        })
    }
}

impl PartSolver<1> for Cached {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.total().to_string())
    }
}

impl PartSolver<2> for Cached {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok((shared.total() * 2).to_string())
    }
}

fn render(numbers: &[i64]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_out_of_range_parts_rejected(part in prop_oneof![Just(0u8), 3u8..=255]) {
        let mut shared = Cached::parse("1\n2").unwrap();
        match Cached::solve_part_checked_range(&mut shared, part) {
            Err(SolveError::PartOutOfRange(p)) => prop_assert_eq!(p, part),
            other => prop_assert!(false, "expected PartOutOfRange, got {:?}", other),
        }
        prop_assert_eq!(shared.computed, 0);
    }

    #[test]
    fn prop_dispatch_matches_part_solver(
        numbers in prop::collection::vec(-1000i64..1000, 0..20),
        part in 1u8..=2,
    ) {
        let input = render(&numbers);
        let mut via_solver = Cached::parse(&input).unwrap();
        let mut direct = Cached::parse(&input).unwrap();

        let dispatched = Cached::solve_part(&mut via_solver, part).unwrap();
        let expected = match part {
            1 => <Cached as PartSolver<1>>::solve(&mut direct).unwrap(),
            _ => <Cached as PartSolver<2>>::solve(&mut direct).unwrap(),
        };
        prop_assert_eq!(dispatched, expected);
    }

    #[test]
    fn prop_instance_shares_data_between_parts(
        numbers in prop::collection::vec(-1000i64..1000, 1..20),
    ) {
        let input = render(&numbers);
        let sum: i64 = numbers.iter().sum();
        let mut instance = SolverInstance::<Cached>::new(2023, 1, &input).unwrap();

        prop_assert_eq!(instance.solve(1).unwrap().answer, sum.to_string());
        prop_assert_eq!(instance.solve(2).unwrap().answer, (sum * 2).to_string());
        prop_assert_eq!(instance.solve(1).unwrap().answer, sum.to_string());
    }
}

#[test]
fn test_instance_metadata_and_timing() {
    let mut instance = SolverInstance::<Cached>::new(2023, 7, "5\n6").unwrap();
    assert_eq!(instance.year(), 2023);
    assert_eq!(instance.day(), 7);
    assert_eq!(instance.parts(), 2);
    assert!(instance.parse_duration() >= chrono::TimeDelta::zero());

    let result = instance.solve(1).unwrap();
    assert_eq!(result.answer, "11");
    assert!(result.duration() >= chrono::TimeDelta::zero());
}

#[test]
fn test_parse_failure_surfaces() {
    let result = SolverInstance::<Cached>::new(2023, 7, "5\nfive");
    assert!(matches!(result, Err(ParseError::InvalidFormat(_))));
}
