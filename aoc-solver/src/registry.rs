//! Solver registry backed by flat year/day storage

use crate::error::{ParseError, RegistrationError, SolverError};
use crate::instance::{DynSolver, SolverInstance};
use crate::solver::Solver;

/// First Advent of Code year
pub const BASE_YEAR: u16 = 2015;
/// Years covered by the storage (2015-2034)
pub const MAX_YEARS: usize = 20;
pub const DAYS_PER_YEAR: usize = 25;
pub const CAPACITY: usize = MAX_YEARS * DAYS_PER_YEAR;

#[inline]
fn calc_index(year: u16, day: u8) -> Option<usize> {
    if year < BASE_YEAR || year >= BASE_YEAR + MAX_YEARS as u16 {
        return None;
    }
    if day == 0 || day > DAYS_PER_YEAR as u8 {
        return None;
    }
    Some((year - BASE_YEAR) as usize * DAYS_PER_YEAR + (day - 1) as usize)
}

#[inline]
fn from_index(index: usize) -> (u16, u8) {
    let year = BASE_YEAR + (index / DAYS_PER_YEAR) as u16;
    let day = (index % DAYS_PER_YEAR) as u8 + 1;
    (year, day)
}

/// Creates a parsed solver from puzzle input. Shared across executor threads.
pub type SolverFactory =
    Box<dyn for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError> + Send + Sync>;

/// What the registry knows about a date without parsing anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryInfo {
    pub year: u16,
    pub day: u8,
    pub parts: u8,
}

struct FactoryEntry {
    factory: SolverFactory,
    parts: u8,
    tags: &'static [&'static str],
}

/// Collects factories, rejecting duplicates and unsupported dates.
///
/// ```
/// use aoc_solver::SolverRegistryBuilder;
///
/// let registry = SolverRegistryBuilder::new().register_all_plugins().unwrap().build();
/// assert!(registry.iter_info().all(|info| info.parts >= 1));
/// ```
pub struct SolverRegistryBuilder {
    entries: Vec<Option<FactoryEntry>>,
}

impl SolverRegistryBuilder {
    pub fn new() -> Self {
        Self {
            entries: (0..CAPACITY).map(|_| None).collect(),
        }
    }

    /// Registers `factory` for `year`/`day` with an explicit part count.
    pub fn register_factory<F>(
        self,
        year: u16,
        day: u8,
        parts: u8,
        factory: F,
    ) -> Result<Self, RegistrationError>
    where
        F: for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError>
            + Send
            + Sync
            + 'static,
    {
        self.insert(year, day, parts, &[], boxed_factory(factory))
    }

    /// Registers the concrete solver type `S` for `year`/`day`.
    pub fn register_solver<S>(self, year: u16, day: u8) -> Result<Self, RegistrationError>
    where
        S: Solver + 'static,
    {
        self.insert(year, day, S::PARTS, &[], solver_factory::<S>(year, day))
    }

    /// Registers every plugin submitted through `inventory`.
    pub fn register_all_plugins(self) -> Result<Self, RegistrationError> {
        self.register_solver_plugins(|_| true)
    }

    /// Registers the plugins accepted by `filter`, e.g. by year or by tag.
    ///
    /// ```
    /// use aoc_solver::SolverRegistryBuilder;
    ///
    /// let registry = SolverRegistryBuilder::new()
    ///     .register_solver_plugins(|plugin| plugin.tags.contains(&"bfs"))
    ///     .unwrap()
    ///     .build();
    /// # let _ = registry;
    /// ```
    pub fn register_solver_plugins<F>(mut self, filter: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&SolverPlugin) -> bool,
    {
        for plugin in inventory::iter::<SolverPlugin>() {
            if filter(plugin) {
                self = plugin.solver.register_with(self, plugin.year, plugin.day, plugin.tags)?;
            }
        }
        Ok(self)
    }

    fn insert(
        mut self,
        year: u16,
        day: u8,
        parts: u8,
        tags: &'static [&'static str],
        factory: SolverFactory,
    ) -> Result<Self, RegistrationError> {
        let index = calc_index(year, day).ok_or(RegistrationError::InvalidYearDay(year, day))?;
        if self.entries[index].is_some() {
            return Err(RegistrationError::DuplicateSolver(year, day));
        }
        self.entries[index] = Some(FactoryEntry {
            factory,
            parts,
            tags,
        });
        Ok(self)
    }

    pub fn build(self) -> SolverRegistry {
        SolverRegistry {
            entries: self.entries,
        }
    }
}

impl Default for SolverRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn boxed_factory<F>(factory: F) -> SolverFactory
where
    F: for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError> + Send + Sync + 'static,
{
    Box::new(factory)
}

fn solver_factory<S>(year: u16, day: u8) -> SolverFactory
where
    S: Solver + 'static,
{
    boxed_factory(move |input: &str| {
        let instance = SolverInstance::<S>::new(year, day, input)?;
        Ok(Box::new(instance))
    })
}

/// Immutable lookup table from date to solver factory
pub struct SolverRegistry {
    entries: Vec<Option<FactoryEntry>>,
}

impl SolverRegistry {
    /// Parses `input` with the solver registered for `year`/`day`.
    pub fn create_solver<'a>(
        &self,
        year: u16,
        day: u8,
        input: &'a str,
    ) -> Result<Box<dyn DynSolver + 'a>, SolverError> {
        let index = calc_index(year, day).ok_or(SolverError::InvalidYearDay(year, day))?;
        let entry = self.entries[index]
            .as_ref()
            .ok_or(SolverError::NotFound(year, day))?;

        (entry.factory)(input).map_err(SolverError::Parse)
    }

    pub fn info(&self, year: u16, day: u8) -> Option<FactoryInfo> {
        let entry = self.entries.get(calc_index(year, day)?)?.as_ref()?;
        Some(FactoryInfo {
            year,
            day,
            parts: entry.parts,
        })
    }

    /// Tags the solver was registered with; empty for non-plugin registrations.
    pub fn tags(&self, year: u16, day: u8) -> &'static [&'static str] {
        calc_index(year, day)
            .and_then(|i| self.entries[i].as_ref())
            .map(|e| e.tags)
            .unwrap_or_default()
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.info(year, day).is_some()
    }

    /// Registered dates in ascending (year, day) order.
    pub fn iter_info(&self) -> impl Iterator<Item = FactoryInfo> + '_ {
        self.entries.iter().enumerate().filter_map(|(i, entry)| {
            entry.as_ref().map(|e| {
                let (year, day) = from_index(i);
                FactoryInfo {
                    year,
                    day,
                    parts: e.parts,
                }
            })
        })
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Type-erased registration hook, so plugins of different solver types fit in one collection.
///
/// Every `Solver + Sync + 'static` type gets it through a blanket impl.
pub trait RegisterableSolver: Sync {
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
        tags: &'static [&'static str],
    ) -> Result<SolverRegistryBuilder, RegistrationError>;

    fn parts(&self) -> u8;
}

impl<S> RegisterableSolver for S
where
    S: Solver + Sync + 'static,
{
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
        tags: &'static [&'static str],
    ) -> Result<SolverRegistryBuilder, RegistrationError> {
        builder.insert(year, day, S::PARTS, tags, solver_factory::<S>(year, day))
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}

/// A solver submitted for automatic registration.
///
/// Normally produced by `#[derive(AutoRegisterSolver)]`; a manual submission
/// looks like `inventory::submit! { SolverPlugin { year: 2023, day: 1, solver: &Day1, tags: &["easy"] } }`.
pub struct SolverPlugin {
    pub year: u16,
    pub day: u8,
    pub solver: &'static dyn RegisterableSolver,
    /// Free-form labels used for filtering, e.g. `"grid"` or `"bfs"`
    pub tags: &'static [&'static str],
}

inventory::collect!(SolverPlugin);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolveError;
    use crate::solver::AocParser;

    struct Lines;

    impl AocParser for Lines {
        type SharedData<'a> = Vec<&'a str>;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            Ok(input.lines().collect())
        }
    }

    impl Solver for Lines {
        const PARTS: u8 = 1;

        fn solve_part(shared: &mut Self::SharedData<'_>, _part: u8) -> Result<String, SolveError> {
            Ok(shared.len().to_string())
        }
    }

    #[test]
    fn test_index_roundtrip_covers_storage() {
        for index in 0..CAPACITY {
            let (year, day) = from_index(index);
            assert_eq!(calc_index(year, day), Some(index));
        }
        assert_eq!(calc_index(2014, 1), None);
        assert_eq!(calc_index(2035, 1), None);
        assert_eq!(calc_index(2023, 0), None);
        assert_eq!(calc_index(2023, 26), None);
    }

    #[test]
    fn test_register_and_create() {
        let registry = SolverRegistryBuilder::new()
            .register_solver::<Lines>(2023, 3)
            .unwrap()
            .build();

        assert!(registry.contains(2023, 3));
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.info(2023, 3),
            Some(FactoryInfo {
                year: 2023,
                day: 3,
                parts: 1
            })
        );

        let mut solver = registry.create_solver(2023, 3, "a\nb\nc").unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "3");
        assert!(matches!(solver.solve(2), Err(SolveError::PartOutOfRange(2))));
    }

    #[test]
    fn test_duplicate_and_invalid_dates_rejected() {
        let builder = SolverRegistryBuilder::new()
            .register_solver::<Lines>(2023, 3)
            .unwrap();
        assert!(matches!(
            builder.register_solver::<Lines>(2023, 3),
            Err(RegistrationError::DuplicateSolver(2023, 3))
        ));

        assert!(matches!(
            SolverRegistryBuilder::new().register_solver::<Lines>(2023, 26),
            Err(RegistrationError::InvalidYearDay(2023, 26))
        ));
    }

    #[test]
    fn test_lookup_errors() {
        let registry = SolverRegistryBuilder::new().build();
        assert!(registry.is_empty());
        assert!(matches!(
            registry.create_solver(2023, 1, ""),
            Err(SolverError::NotFound(2023, 1))
        ));
        assert!(matches!(
            registry.create_solver(1999, 1, ""),
            Err(SolverError::InvalidYearDay(1999, 1))
        ));
    }

    #[test]
    fn test_iter_info_is_ordered() {
        let registry = SolverRegistryBuilder::new()
            .register_solver::<Lines>(2024, 1)
            .unwrap()
            .register_solver::<Lines>(2023, 20)
            .unwrap()
            .register_solver::<Lines>(2023, 2)
            .unwrap()
            .build();

        let dates: Vec<_> = registry.iter_info().map(|i| (i.year, i.day)).collect();
        assert_eq!(dates, vec![(2023, 2), (2023, 20), (2024, 1)]);
    }
}
