//! Properties of the minimization results on classical and random functions

use itertools::Itertools;
use test_log::test;

use qmin::generators::{random, testcases};
use qmin::verify::check_truth_table;
use qmin::{minimize, CostModel, Expression, MinimizeOptions, Minimization, Problem, Term};

fn run(problem: &Problem) -> Minimization {
    minimize(problem, &MinimizeOptions::default()).unwrap()
}

/// Check that the solutions are correct, irredundant and use only prime implicants
fn check_solutions(problem: &Problem, res: &Minimization) {
    assert!(!res.solutions().is_empty());
    let cost = res.solutions()[0].nb_terms();
    for s in res.solutions() {
        assert_eq!(s.nb_terms(), cost);
        check_truth_table(s, problem).unwrap();
        for t in s.terms() {
            assert!(res.tabulation().primes().contains(t));
            // Don't-cares never justify a term on their own
            assert!(problem.minterms().iter().any(|m| t.covers(*m)));
        }
        // No term can be removed
        for i in 0..s.nb_terms() {
            let mut terms = s.terms().to_vec();
            terms.remove(i);
            let reduced = Expression::new(s.width(), terms);
            assert!(reduced
                .check_cover(problem.minterms(), problem.dont_cares())
                .is_err());
        }
        // No literal can be removed
        for (i, t) in s.terms().iter().enumerate() {
            for pos in 0..t.width() {
                if t.symbol(pos).is_none() {
                    continue;
                }
                let mut terms = s.terms().to_vec();
                terms[i] = t.with_dash(pos);
                let expanded = Expression::new(s.width(), terms);
                assert!(expanded
                    .check_cover(problem.minterms(), problem.dont_cares())
                    .is_err());
            }
        }
    }
}

/// All covers of minimal size, found by enumeration of the prime implicants
fn brute_force_covers(problem: &Problem, res: &Minimization) -> Vec<Vec<Term>> {
    let primes: Vec<Term> = res.tabulation().primes().iter().copied().collect();
    for k in 1..=primes.len() {
        let covers: Vec<Vec<Term>> = primes
            .iter()
            .copied()
            .combinations(k)
            .filter(|c| {
                problem
                    .minterms()
                    .iter()
                    .all(|m| c.iter().any(|t| t.covers(*m)))
            })
            .collect();
        if !covers.is_empty() {
            return covers;
        }
    }
    Vec::new()
}

#[test]
fn test_all_minterms() {
    let problem = Problem::new(&[0, 1, 2, 3], &[]).unwrap();
    let res = run(&problem);
    assert_eq!(res.solutions().len(), 1);
    assert_eq!(res.solutions()[0].to_string(), "1");
    assert!(res.solutions()[0].products()[0].is_empty());
}

#[test]
fn test_adjacent_pairs() {
    let problem = Problem::new(&[1, 3, 7], &[]).unwrap();
    let res = run(&problem);
    let primes: Vec<String> = res
        .tabulation()
        .primes()
        .iter()
        .map(|t| t.to_string())
        .collect();
    assert_eq!(primes, vec!["0-1", "-11"]);
    assert_eq!(res.essentials().len(), 2);
    assert!(!res.used_petrick());
    check_solutions(&problem, &res);
}

#[test]
fn test_single_implicant() {
    let problem = Problem::new(&[0, 2], &[]).unwrap();
    let res = run(&problem);
    assert_eq!(res.essentials(), &["-0".parse::<Term>().unwrap()]);
    assert_eq!(res.solutions()[0].to_string(), "B'");
}

#[test]
fn test_two_products() {
    let problem = Problem::new(&[0, 3], &[]).unwrap();
    let res = run(&problem);
    assert_eq!(res.essentials().len(), 2);
    assert_eq!(res.solutions().len(), 1);
    assert_eq!(res.solutions()[0].nb_terms(), 2);
    check_solutions(&problem, &res);
}

#[test]
fn test_trace_artifacts() {
    let problem = Problem::new(&[0, 1, 2, 5, 6, 7, 8], &[]).unwrap();
    let res = run(&problem);
    assert_eq!(res.tabulation().generations().len(), 2);
    assert_eq!(res.tabulation().generations()[0].nb_terms(), 7);
    assert_eq!(res.chart().len(), 7);
    assert_eq!(res.reduced_chart().len(), 5);
    assert!(res.used_petrick());
    check_solutions(&problem, &res);
}

#[test]
fn test_testcases() {
    let problems = [
        testcases::parity(4).unwrap(),
        testcases::threshold(4, 2).unwrap(),
        testcases::threshold(5, 3).unwrap(),
        testcases::cyclic().unwrap(),
        testcases::seven_segment_a().unwrap(),
    ];
    for problem in &problems {
        let res = run(problem);
        check_solutions(problem, &res);
    }
    // Parity cannot be simplified
    let res = run(&problems[0]);
    assert_eq!(res.solutions()[0].nb_terms(), 8);
    assert_eq!(res.solutions()[0].nb_literals(), 32);
}

#[test]
fn test_random_functions() {
    for seed in 0..200 {
        let problem = random::function(4, 0.5, 0.15, seed).unwrap();
        let res = run(&problem);
        check_solutions(&problem, &res);

        // Exactly the covers of minimal size are returned
        let expected: Vec<Vec<Term>> = brute_force_covers(&problem, &res)
            .into_iter()
            .map(|c| c.into_iter().sorted().collect::<Vec<_>>())
            .sorted()
            .collect();
        let actual: Vec<Vec<Term>> = res
            .solutions()
            .iter()
            .map(|s| s.terms().iter().copied().sorted().collect::<Vec<_>>())
            .sorted()
            .collect();
        assert_eq!(actual, expected, "seed {seed}");
    }
}

#[test]
fn test_literal_cost() {
    for seed in 0..100 {
        let problem = random::function(5, 0.4, 0.1, seed).unwrap();
        let all = run(&problem);
        let lits = minimize(
            &problem,
            &MinimizeOptions::default().with_cost(CostModel::TermsThenLiterals),
        )
        .unwrap();
        check_solutions(&problem, &lits);
        let min_lits = all.solutions().iter().map(|s| s.nb_literals()).min();
        assert_eq!(lits.solutions()[0].nb_terms(), all.solutions()[0].nb_terms());
        for s in lits.solutions() {
            assert_eq!(Some(s.nb_literals()), min_lits);
            assert!(all.solutions().iter().any(|a| a.same_terms(s)));
        }
    }
}

#[test]
fn test_term_cost_ties() {
    // Three covers of three terms, one of them with an extra literal
    let problem = random::function(4, 0.5, 0.15, 18).unwrap();
    let all = run(&problem);
    check_solutions(&problem, &all);
    let literals: Vec<usize> = all
        .solutions()
        .iter()
        .map(|s| s.nb_literals())
        .sorted()
        .collect();
    assert_eq!(literals, vec![6, 6, 7]);

    let lits = minimize(
        &problem,
        &MinimizeOptions::default().with_cost(CostModel::TermsThenLiterals),
    )
    .unwrap();
    assert_eq!(lits.solutions().len(), 2);
    assert!(lits.solutions().iter().all(|s| s.nb_literals() == 6));
}

#[test]
fn test_six_variables() {
    for seed in 0..10 {
        let problem = random::function(6, 0.5, 0.1, seed).unwrap();
        let res = run(&problem);
        check_solutions(&problem, &res);
    }
}

#[test]
fn test_idempotence() {
    for seed in 0..20 {
        let problem = random::function(5, 0.5, 0.1, seed).unwrap();
        let a = run(&problem);
        let b = run(&problem);
        assert_eq!(a.solutions().len(), b.solutions().len());
        for s in a.solutions() {
            assert!(b.solutions().iter().any(|t| t.same_terms(s)));
        }
    }
}

#[test]
fn test_order_independence() {
    let problem = random::function(6, 0.5, 0.1, 7).unwrap();
    let mut minterms = problem.minterms().to_vec();
    let mut dont_cares = problem.dont_cares().to_vec();
    minterms.reverse();
    dont_cares.reverse();
    let shuffled = Problem::new(&minterms, &dont_cares)
        .unwrap()
        .with_width(problem.width())
        .unwrap();
    assert_eq!(shuffled, problem);
    let a = run(&problem);
    let b = run(&shuffled);
    assert_eq!(a.tabulation().primes(), b.tabulation().primes());
    assert_eq!(a.essentials(), b.essentials());
}
