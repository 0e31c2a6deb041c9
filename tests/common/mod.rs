#![allow(dead_code)]

use genbdd::error::BddResult;
use genbdd::manager::BddManager;
use genbdd::reference::Ref;

/// Build the function whose truth table is `table` over all variables of the
/// manager. Row `i` gives the value under the assignment where variable `j`
/// is bit `j` of `i`.
///
/// Only the nodes of the result are allocated.
pub fn from_truth_table(mgr: &BddManager, table: &[bool]) -> BddResult<Ref> {
    assert_eq!(table.len(), 1 << mgr.num_vars());
    build(mgr, 0, table)
}

fn build(mgr: &BddManager, v: usize, rows: &[bool]) -> BddResult<Ref> {
    if v == mgr.num_vars() {
        return Ok(if rows[0] { mgr.one() } else { mgr.zero() });
    }
    let low: Vec<bool> = rows.iter().step_by(2).copied().collect();
    let high: Vec<bool> = rows.iter().skip(1).step_by(2).copied().collect();
    let e = build(mgr, v + 1, &low)?;
    let t = build(mgr, v + 1, &high)?;
    if t.is_complemented() {
        Ok(-mgr.make_node(v, -t, -e)?)
    } else {
        mgr.make_node(v, t, e)
    }
}

/// Truth table of the low `1 << num_vars` bits of `bits`.
pub fn table_from_bits(bits: u64, num_vars: usize) -> Vec<bool> {
    (0..1usize << num_vars).map(|i| (bits >> i) & 1 == 1).collect()
}
