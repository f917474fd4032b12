use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use log::{debug, trace};

use crate::utils::ring_queue::RingQueue;

const BROADCASTER: &str = "broadcaster";
const BUTTON_PRESSES: usize = 1000;
/// Part 2 gives up if some feeder of `rx` has not fired by then.
const MAX_PRESSES: u64 = 1 << 20;
/// One press of any real input delivers a few hundred pulses; a feedback loop never stops.
const MAX_PULSES_PER_PRESS: usize = 1 << 20;
/// Sender id of the pulse the button emits.
const BUTTON: usize = usize::MAX;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 20, tags = ["simulation", "lcm", "ring-queue"])]
pub struct Solver;

#[derive(Debug, Clone)]
enum Kind {
    Broadcaster,
    FlipFlop { on: bool },
    /// Last pulse per input, as `(sender, high)`, and how many of them are high.
    Conjunction { memory: Vec<(usize, bool)>, high: usize },
    /// Destination that is never declared, such as `rx`.
    Sink,
}

#[derive(Debug, Clone)]
struct Module {
    kind: Kind,
    outputs: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pulse {
    from: usize,
    to: usize,
    high: bool,
}

/// Module wiring plus every module's state; names borrow from the puzzle input.
#[derive(Debug, Clone)]
pub struct Network<'a> {
    names: Vec<&'a str>,
    modules: Vec<Module>,
    broadcaster: usize,
}

impl Network<'_> {
    fn id(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|&n| n == name)
    }

    /// Pushes the button once and feeds every pulse, in delivery order, to `observe`.
    ///
    /// Fails once a single press has delivered [`MAX_PULSES_PER_PRESS`] pulses.
    fn press(
        &mut self,
        queue: &mut RingQueue<Pulse>,
        mut observe: impl FnMut(&Pulse),
    ) -> anyhow::Result<()> {
        queue.push(Pulse {
            from: BUTTON,
            to: self.broadcaster,
            high: false,
        });

        let mut delivered = 0;
        while let Ok(pulse) = queue.pop() {
            delivered += 1;
            if delivered > MAX_PULSES_PER_PRESS {
                queue.clear();
                bail!(
                    "one press delivered more than {} pulses; the network never settles",
                    MAX_PULSES_PER_PRESS
                );
            }
            observe(&pulse);
            let module = &mut self.modules[pulse.to];
            let send = match &mut module.kind {
                Kind::Broadcaster => Some(pulse.high),
                Kind::FlipFlop { on } => {
                    if pulse.high {
                        None
                    } else {
                        *on = !*on;
                        Some(*on)
                    }
                }
                Kind::Conjunction { memory, high } => {
                    if let Some(slot) = memory.iter_mut().find(|(from, _)| *from == pulse.from)
                        && slot.1 != pulse.high
                    {
                        slot.1 = pulse.high;
                        if pulse.high {
                            *high += 1;
                        } else {
                            *high -= 1;
                        }
                    }
                    Some(*high != memory.len())
                }
                Kind::Sink => None,
            };

            if let Some(high) = send {
                for &to in &module.outputs {
                    queue.push(Pulse {
                        from: pulse.to,
                        to,
                        high,
                    });
                }
            }
        }
        Ok(())
    }
}

fn parse_network(input: &str) -> anyhow::Result<Network<'_>> {
    let mut declared = Vec::new();
    for (line_idx, line) in input.trim().lines().map(str::trim).enumerate() {
        let (name, outputs) = line
            .split_once("->")
            .ok_or_else(|| anyhow!("(line {}) missing '->'", line_idx + 1))?;
        let (kind, name) = match name.trim() {
            BROADCASTER => (Kind::Broadcaster, BROADCASTER),
            n if n.len() > 1 && n.starts_with('%') => (Kind::FlipFlop { on: false }, &n[1..]),
            n if n.len() > 1 && n.starts_with('&') => (
                Kind::Conjunction {
                    memory: Vec::new(),
                    high: 0,
                },
                &n[1..],
            ),
            n => bail!("(line {}) unknown module '{}'", line_idx + 1, n),
        };
        let outputs: Vec<&str> = outputs.split(',').map(str::trim).collect();
        if outputs.iter().any(|o| o.is_empty()) {
            bail!("(line {}) empty output name", line_idx + 1);
        }
        declared.push((name, kind, outputs));
    }

    let mut names: Vec<&str> = declared.iter().map(|(name, _, _)| *name).collect();
    for (idx, name) in names.iter().enumerate() {
        if names[..idx].contains(name) {
            bail!("module '{}' declared twice", name);
        }
    }
    for (_, _, outputs) in &declared {
        for &output in outputs {
            if !names.contains(&output) {
                names.push(output);
            }
        }
    }

    let mut modules: Vec<Module> = declared
        .iter()
        .map(|(_, kind, _)| Module {
            kind: kind.clone(),
            outputs: Vec::new(),
        })
        .collect();
    modules.resize_with(names.len(), || Module {
        kind: Kind::Sink,
        outputs: Vec::new(),
    });

    let mut network = Network {
        names,
        modules,
        broadcaster: 0,
    };
    network.broadcaster = network
        .id(BROADCASTER)
        .filter(|&id| id < declared.len())
        .ok_or_else(|| anyhow!("no '{}' module", BROADCASTER))?;

    for (from, (_, _, outputs)) in declared.iter().enumerate() {
        for output in outputs {
            let to = network
                .id(output)
                .ok_or_else(|| anyhow!("unresolved output '{}'", output))?;
            network.modules[from].outputs.push(to);
            if let Kind::Conjunction { memory, .. } = &mut network.modules[to].kind {
                memory.push((from, false));
            }
        }
    }
    Ok(network)
}

impl AocParser for Solver {
    type SharedData<'a> = Network<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_network(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut network = shared.clone();
        let mut queue = RingQueue::with_capacity(64);
        let (mut low, mut high) = (0u64, 0u64);
        for _ in 0..BUTTON_PRESSES {
            network
                .press(&mut queue, |pulse| {
                    if pulse.high {
                        high += 1;
                    } else {
                        low += 1;
                    }
                })
                .map_err(|e| SolveError::SolveFailed(e.into()))?;
        }
        debug!("day 20 after {} presses: {} low, {} high", BUTTON_PRESSES, low, high);
        Ok((low * high).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        presses_until_rx(shared)
            .map(|presses| presses.to_string())
            .map_err(|e| SolveError::SolveFailed(e.into()))
    }
}

/// `rx` is fed by one conjunction whose inputs each fire high on a fixed cycle, so `rx` gets
/// its low pulse at the least common multiple of those cycles.
fn presses_until_rx(shared: &Network<'_>) -> anyhow::Result<u64> {
    let rx = shared.id("rx").ok_or_else(|| anyhow!("no module sends to 'rx'"))?;
    let hubs: Vec<usize> = (0..shared.modules.len())
        .filter(|&id| shared.modules[id].outputs.contains(&rx))
        .collect();
    let &[hub] = hubs.as_slice() else {
        bail!("expected exactly one module feeding 'rx', found {}", hubs.len());
    };
    let Kind::Conjunction { memory, .. } = &shared.modules[hub].kind else {
        bail!("'{}' feeding 'rx' is not a conjunction", shared.names[hub]);
    };

    let mut cycles: Vec<Option<u64>> = vec![None; memory.len()];
    let feeders: Vec<usize> = memory.iter().map(|&(from, _)| from).collect();
    let mut network = shared.clone();
    let mut queue = RingQueue::with_capacity(64);

    for presses in 1..=MAX_PRESSES {
        network.press(&mut queue, |pulse| {
            if pulse.to == hub
                && pulse.high
                && let Some(i) = feeders.iter().position(|&f| f == pulse.from)
                && cycles[i].is_none()
            {
                trace!("day 20 feeder {} fires at press {}", pulse.from, presses);
                cycles[i] = Some(presses);
            }
        })?;
        if cycles.iter().all(Option::is_some) {
            return Ok(cycles.into_iter().flatten().fold(1, lcm));
        }
    }
    bail!("feeders of 'rx' did not all fire within {} presses", MAX_PRESSES)
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn lcm(a: u64, b: u64) -> u64 {
    a / gcd(a, b) * b
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SIMPLE: &str = "\
broadcaster -> a, b, c
%a -> b
%b -> c
%c -> inv
&inv -> a
";

    const WITH_OUTPUT: &str = "\
broadcaster -> a
%a -> inv, con
&inv -> b
%b -> con
&con -> output
";

    const TWO_COUNTERS: &str = "\
broadcaster -> a, b
%a -> ca
%b -> b2
%b2 -> cb
&ca -> hub
&cb -> hub
&hub -> rx
";

    #[test]
    fn test_pulse_counts() {
        let mut network = Solver::parse(SIMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut network, 1).unwrap(), "32000000");

        let mut network = Solver::parse(WITH_OUTPUT).unwrap();
        assert_eq!(Solver::solve_part(&mut network, 1).unwrap(), "11687500");
    }

    #[test]
    fn test_single_press_order() {
        let mut network = Solver::parse(SIMPLE).unwrap();
        let mut queue = RingQueue::new();
        let mut seen = Vec::new();
        network.press(&mut queue, |p| seen.push(*p)).unwrap();

        assert_eq!(seen.len(), 12);
        assert_eq!(seen.iter().filter(|p| p.high).count(), 4);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_self_feeding_conjunction_is_cut_off() {
        let input = "broadcaster -> a\n&a -> a, rx\n";
        let mut network = Solver::parse(input).unwrap();
        let mut queue = RingQueue::new();
        assert!(network.press(&mut queue, |_| {}).is_err());
        assert!(queue.is_empty());

        for part in 1..=2 {
            let mut network = Solver::parse(input).unwrap();
            assert!(matches!(
                Solver::solve_part(&mut network, part),
                Err(SolveError::SolveFailed(_))
            ));
        }
    }

    #[test]
    fn test_presses_until_rx() {
        let mut network = Solver::parse(TWO_COUNTERS).unwrap();
        assert_eq!(Solver::solve_part(&mut network, 2).unwrap(), "4");
    }

    #[test]
    fn test_missing_rx_is_a_solve_error() {
        let mut network = Solver::parse(SIMPLE).unwrap();
        assert!(matches!(
            Solver::solve_part(&mut network, 2),
            Err(SolveError::SolveFailed(_))
        ));
    }

    #[test]
    fn test_parse_errors() {
        let bad_inputs = [
            "%a -> b",
            "broadcaster a",
            "?x -> a",
            "broadcaster -> a,",
            "broadcaster -> a\n%a -> b\n%a -> c",
        ];
        for bad in bad_inputs {
            assert!(
                matches!(Solver::parse(bad), Err(ParseError::InvalidFormat(_))),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_lcm() {
        assert_eq!([3, 4, 6].into_iter().fold(1, lcm), 12);
        assert_eq!(gcd(3739, 3761), 1);
    }
}
