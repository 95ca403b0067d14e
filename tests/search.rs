use proptest::prelude::*;
use sat_backtrack::sat::cnf::Cnf;
use sat_backtrack::sat::dimacs::{parse_str, ParseOptions};
use sat_backtrack::sat::search::{solve, Backtracking, Status};
use sat_backtrack::sat::solver::{SearchLimits, Solutions, Solver, Verdict};

/// Tries every assignment of `num_vars` variables.
fn brute_force(num_vars: usize, clauses: &[Vec<i32>]) -> bool {
    (0u32..1 << num_vars).any(|bits| {
        clauses.iter().all(|clause| {
            clause.iter().any(|&lit| {
                let value = bits & (1 << (lit.unsigned_abs() - 1)) != 0;
                value == (lit > 0)
            })
        })
    })
}

fn satisfies(clauses: &[Vec<i32>], solutions: &Solutions) -> bool {
    clauses.iter().all(|clause| {
        clause.iter().any(|&lit| {
            solutions.value(lit.unsigned_abs()) == Some(lit > 0)
        })
    })
}

fn formula() -> impl Strategy<Value = (usize, Vec<Vec<i32>>)> {
    (1usize..=8).prop_flat_map(|n| {
        let literal = (1..=n as i32, any::<bool>()).prop_map(|(v, pos)| if pos { v } else { -v });
        let clause = prop::collection::vec(literal, 1..=4);
        (Just(n), prop::collection::vec(clause, 0..=24))
    })
}

proptest! {
    #[test]
    fn agrees_with_brute_force((n, clauses) in formula()) {
        let verdict = solve(Cnf::with_num_vars(n, clauses.clone()).unwrap());
        prop_assert_eq!(verdict.is_sat(), brute_force(n, &clauses));
        prop_assert!(!matches!(verdict, Verdict::Unknown));
    }

    #[test]
    fn models_satisfy_every_clause((n, clauses) in formula()) {
        if let Verdict::Sat(solutions) = solve(Cnf::with_num_vars(n, clauses.clone()).unwrap()) {
            prop_assert_eq!(solutions.len(), n);
            prop_assert!(satisfies(&clauses, &solutions));
        }
    }

    #[test]
    fn clause_order_does_not_matter((n, clauses) in formula()) {
        let mut reversed = clauses.clone();
        reversed.reverse();
        let a = solve(Cnf::with_num_vars(n, clauses).unwrap());
        let b = solve(Cnf::with_num_vars(n, reversed).unwrap());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn dimacs_text_gives_same_verdict((n, clauses) in formula()) {
        let cnf = Cnf::with_num_vars(n, clauses).unwrap();
        let reparsed = parse_str(&cnf.to_string(), ParseOptions::strict()).unwrap();
        prop_assert_eq!(solve(cnf), solve(reparsed));
    }

    #[test]
    fn budget_never_changes_a_reached_verdict((n, clauses) in formula(), budget in 1u64..64) {
        let cnf = Cnf::with_num_vars(n, clauses).unwrap();
        let full = solve(cnf.clone());
        let mut limited = Backtracking::with_limits(cnf, SearchLimits::steps(budget));
        let verdict = limited.solve();
        if limited.status() == Status::Unknown {
            prop_assert_eq!(verdict, Verdict::Unknown);
            prop_assert_eq!(limited.stats().steps, budget);
        } else {
            prop_assert_eq!(verdict, full);
        }
    }
}

#[test]
fn seeded_random_3sat_sweep() {
    let mut rng = fastrand::Rng::with_seed(2024);

    for n in 3..=16usize {
        for _ in 0..4 {
            let m = (n * 43) / 10;
            let clauses: Vec<Vec<i32>> = (0..m)
                .map(|_| {
                    (0..3)
                        .map(|_| {
                            let v = rng.i32(1..=n as i32);
                            if rng.bool() { v } else { -v }
                        })
                        .collect()
                })
                .collect();

            let mut solver = Backtracking::new(Cnf::with_num_vars(n, clauses.clone()).unwrap());
            let mut depths = Vec::new();
            let verdict = solver.solve_with_progress(|d| depths.push(d));

            assert_eq!(verdict.is_sat(), brute_force(n, &clauses), "n = {n}");
            if let Some(solutions) = verdict.solutions() {
                assert!(satisfies(&clauses, solutions));
                assert_eq!(depths.last().copied(), Some(n));
            }
            assert!(depths.windows(2).all(|w| w[0] < w[1]));
            assert!(depths.iter().all(|&d| d > 0 && d <= n));
        }
    }
}

#[test]
fn textual_scenarios() {
    let sat = parse_str("p cnf 2 2\n1 2 0\n-1 -2 0\n", ParseOptions::default()).unwrap();
    assert_eq!(solve(sat).to_string(), "SAT\n1 -2 0");

    let unsat = parse_str("p cnf 1 2\n1 0\n-1 0\n", ParseOptions::default()).unwrap();
    assert_eq!(solve(unsat).to_string(), "UNSAT");

    let flip = parse_str("p cnf 2 2\n1 -1 0\n2 0\n", ParseOptions::default()).unwrap();
    assert_eq!(solve(flip).to_string(), "SAT\n-1 2 0");

    let empty = parse_str("p cnf 3 0\n", ParseOptions::default()).unwrap();
    assert_eq!(solve(empty).to_string(), "SAT\n-1 -2 -3 0");
}

#[test]
fn pigeonhole_is_unsat() {
    let pigeons = 4;
    let holes = pigeons - 1;
    let var = |p: i32, h: i32| p * holes + h + 1;
    let mut clauses: Vec<Vec<i32>> = (0..pigeons)
        .map(|p| (0..holes).map(|h| var(p, h)).collect())
        .collect();
    for h in 0..holes {
        for p in 0..pigeons {
            for q in (p + 1)..pigeons {
                clauses.push(vec![-var(p, h), -var(q, h)]);
            }
        }
    }

    let mut solver = Backtracking::new(Cnf::new(clauses));
    assert_eq!(solver.solve(), Verdict::Unsat);
    assert!(solver.stats().conflicts > 0);
}
