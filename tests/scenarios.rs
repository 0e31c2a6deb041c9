//! End-to-end scenarios over the public API.

mod common;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use test_log::test;

use genbdd::config::BddConfig;
use genbdd::error::{BddResult, CapacityExceeded};
use genbdd::manager::BddManager;
use genbdd::reference::Ref;

use common::{from_truth_table, table_from_bits};

#[test]
fn and_is_commutative_by_reference() {
    let mgr = BddManager::new(3, 10);
    let (a, b) = (mgr.var(0), mgr.var(1));

    let f = mgr.apply_and(a, b).unwrap();
    let g = mgr.apply_and(b, a).unwrap();
    assert_eq!(f, g);
}

#[test]
fn xor_of_two_variables() {
    let mgr = BddManager::new(3, 10);
    let (a, b) = (mgr.var(0), mgr.var(1));

    let f = mgr.apply_xor(a, b).unwrap();
    assert_eq!(mgr.dag_size(f), 3);
    assert_eq!(mgr.support_size(f), 2);
}

#[test]
fn contradiction_is_zero() {
    let mgr = BddManager::new(3, 10);
    let a = mgr.var(0);

    let f = mgr.apply_and(a, mgr.apply_not(a)).unwrap();
    assert_eq!(f, mgr.zero());
    assert!(mgr.is_zero(f));
}

/// A random function of five variables: a random truth table restricted to `a | b`.
fn random_function(mgr: &BddManager, bits: u32) -> BddResult<(Ref, Vec<bool>)> {
    let table = table_from_bits(bits as u64, 5);
    let f = from_truth_table(mgr, &table)?;
    let guard = mgr.apply_or(mgr.var(0), mgr.var(1))?;
    let g = mgr.apply_and(f, guard)?;

    let expected = table
        .iter()
        .enumerate()
        .map(|(row, &value)| value && (row & 0b11 != 0))
        .collect();
    Ok((g, expected))
}

#[test]
fn exhaustion_then_restart_and_retry() {
    let mgr = BddManager::with_config(BddConfig::new(5, 8).with_node_limit(50));
    let mut rng = SmallRng::seed_from_u64(42);

    let mut failures = 0;
    let mut retries = 0;
    for _ in 0..100 {
        let bits: u32 = rng.gen();
        match random_function(&mgr, bits) {
            Ok(_) => {}
            Err(CapacityExceeded) => {
                failures += 1;
                assert!(mgr.num_nodes() <= 50);
                assert!(mgr.invariant_violations().is_empty());

                mgr.restart();
                let (g, expected) = random_function(&mgr, bits).expect("retry after restart");
                assert_eq!(mgr.truth_table(g), expected);
                retries += 1;
            }
        }
    }

    assert!(failures >= 1, "a table of 50 nodes should run out");
    assert_eq!(retries, failures);
    assert_eq!(mgr.num_restarts(), failures);
}

#[test]
fn one_cube_of_multiplexer() {
    let mgr = BddManager::new(3, 10);
    let (a, b, c) = (mgr.var(0), mgr.var(1), mgr.var(2));

    let f = mgr.apply_or(mgr.apply_and(a, b).unwrap(), mgr.apply_and(-a, c).unwrap()).unwrap();
    let cube = mgr.one_cube(f).unwrap();

    let lits = mgr.cube_literals(cube);
    assert!(!lits.is_empty());
    assert!(lits.len() <= 2, "cube {} has too many literals", mgr.cover_string(cube));

    // The cube implies f.
    assert_eq!(mgr.apply_and(cube, -f).unwrap(), mgr.zero());

    // Any assignment extending the cube satisfies f.
    let mut assignment = vec![false; 3];
    for lit in &lits {
        assignment[lit.var().index() as usize] = lit.is_positive();
    }
    assert!(mgr.eval(f, &assignment));
}
