use std::collections::HashMap;

use num_bigint::BigUint;

use crate::manager::BddManager;
use crate::reference::Ref;
use crate::types::Lit;

impl BddManager {
    /// Value of `f` under a complete assignment, indexed by variable.
    ///
    /// # Panics
    ///
    /// Panics if `assignment` does not have one entry per variable.
    pub fn eval(&self, f: Ref, assignment: &[bool]) -> bool {
        assert_eq!(
            assignment.len(),
            self.num_vars(),
            "Assignment must give a value to each of the {} variables",
            self.num_vars()
        );
        self.check_live(f);

        let mut current = f;
        while !current.is_constant() {
            let v = self.variable(current).index() as usize;
            current = if assignment[v] {
                self.high_node(current)
            } else {
                self.low_node(current)
            };
        }
        current == Ref::ONE
    }

    /// Truth table of `f` over all variables; bit `i` of the row index is
    /// the value of variable `i`.
    ///
    /// # Panics
    ///
    /// Panics for more than 20 variables.
    pub fn truth_table(&self, f: Ref) -> Vec<bool> {
        let n = self.num_vars();
        assert!(n <= 20, "Truth table of {} variables is too large", n);
        (0..1usize << n)
            .map(|row| {
                let assignment: Vec<bool> = (0..n).map(|i| (row >> i) & 1 == 1).collect();
                self.eval(f, &assignment)
            })
            .collect()
    }

    /// Number of satisfying assignments of `f` over all variables of the manager.
    pub fn sat_count(&self, f: Ref) -> BigUint {
        self.check_live(f);
        let mut cache = HashMap::new();
        let max = BigUint::from(1u32) << self.num_vars();
        self._sat_count(f, &max, &mut cache)
    }

    fn _sat_count(&self, node: Ref, max: &BigUint, cache: &mut HashMap<Ref, BigUint>) -> BigUint {
        if node == Ref::ZERO {
            return BigUint::ZERO;
        } else if node == Ref::ONE {
            return max.clone();
        }

        if let Some(count) = cache.get(&node) {
            return count.clone();
        }

        let n = self.node(node);
        let count_low = self._sat_count(n.low, max, cache);
        let count_high = self._sat_count(n.high, max, cache);

        // Every level halves the share of the assignment space.
        let count: BigUint = (count_low + count_high) >> 1;
        let count = if node.is_complemented() { max - count } else { count };

        cache.insert(node, count.clone());
        count
    }

    /// Literals of a cube, from the top variable down.
    ///
    /// # Panics
    ///
    /// Panics if `cube` is not a conjunction of literals.
    pub fn cube_literals(&self, cube: Ref) -> Vec<Lit> {
        self.check_live(cube);
        assert_ne!(cube, Ref::ZERO, "The zero function is not a cube");

        let mut lits = Vec::new();
        let mut current = cube;
        while !current.is_constant() {
            let var = self.variable(current);
            let (f0, f1) = self.top_cofactors(current, var);
            if f0 == Ref::ZERO {
                lits.push(var.pos());
                current = f1;
            } else if f1 == Ref::ZERO {
                lits.push(var.neg());
                current = f0;
            } else {
                panic!("{} is not a cube", cube);
            }
        }
        lits
    }

    /// Disjoint cover of `f`: one cube per path to the one terminal.
    ///
    /// Else branches are listed first. The number of paths may be exponential
    /// in the number of variables.
    pub fn cubes(&self, f: Ref) -> Vec<Vec<Lit>> {
        self.check_live(f);

        let mut result = Vec::new();
        let mut stack = vec![(f, Vec::new())];
        while let Some((node, path)) = stack.pop() {
            if node == Ref::ONE {
                result.push(path);
                continue;
            }
            if node == Ref::ZERO {
                continue;
            }
            let var = self.variable(node);
            let (f0, f1) = self.top_cofactors(node, var);

            let mut high = path.clone();
            high.push(var.pos());
            stack.push((f1, high));

            let mut low = path;
            low.push(var.neg());
            stack.push((f0, low));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::types::Var;

    #[test]
    fn test_eval() {
        let mgr = BddManager::new(3, 8);
        let (a, b, c) = (mgr.var(0), mgr.var(1), mgr.var(2));
        let f = mgr.apply_or(mgr.apply_and(a, b).unwrap(), mgr.apply_and(-a, c).unwrap()).unwrap();

        assert!(mgr.eval(f, &[true, true, false]));
        assert!(!mgr.eval(f, &[true, false, true]));
        assert!(mgr.eval(f, &[false, false, true]));
        assert!(!mgr.eval(f, &[false, true, false]));
        assert!(mgr.eval(mgr.one(), &[false; 3]));
        assert!(!mgr.eval(mgr.zero(), &[true; 3]));
    }

    #[test]
    fn test_truth_table() {
        let mgr = BddManager::new(2, 8);
        let f = mgr.apply_xor(mgr.var(0), mgr.var(1)).unwrap();
        assert_eq!(mgr.truth_table(f), vec![false, true, true, false]);
    }

    #[test]
    fn test_sat_count() {
        let mgr = BddManager::new(3, 8);
        let (a, b, c) = (mgr.var(0), mgr.var(1), mgr.var(2));

        assert_eq!(mgr.sat_count(mgr.zero()), BigUint::from(0u32));
        assert_eq!(mgr.sat_count(mgr.one()), BigUint::from(8u32));
        assert_eq!(mgr.sat_count(a), BigUint::from(4u32));
        assert_eq!(mgr.sat_count(-c), BigUint::from(4u32));

        let f = mgr.apply_and(a, b).unwrap();
        assert_eq!(mgr.sat_count(f), BigUint::from(2u32));
        assert_eq!(mgr.sat_count(-f), BigUint::from(6u32));

        let g = mgr.apply_xor(a, mgr.apply_xor(b, c).unwrap()).unwrap();
        assert_eq!(mgr.sat_count(g), BigUint::from(4u32));
    }

    #[test]
    fn test_sat_count_matches_truth_table() {
        let mgr = BddManager::new(4, 8);
        let (a, b, c, d) = (mgr.var(0), mgr.var(1), mgr.var(2), mgr.var(3));
        let f = mgr.apply_or(mgr.apply_and(a, -d).unwrap(), mgr.apply_xor(b, c).unwrap()).unwrap();

        let expected = mgr.truth_table(f).into_iter().filter(|&x| x).count();
        assert_eq!(mgr.sat_count(f), BigUint::from(expected));
    }

    #[test]
    fn test_cube_literals() {
        let mgr = BddManager::new(3, 8);
        let cube = mgr.cube([Var::new(2).neg(), Var::new(0).pos()]).unwrap();
        assert_eq!(mgr.cube_literals(cube), vec![Var::new(0).pos(), Var::new(2).neg()]);
        assert!(mgr.cube_literals(mgr.one()).is_empty());
    }

    #[test]
    #[should_panic(expected = "is not a cube")]
    fn test_cube_literals_rejects_non_cube() {
        let mgr = BddManager::new(2, 8);
        let f = mgr.apply_or(mgr.var(0), mgr.var(1)).unwrap();
        mgr.cube_literals(f);
    }

    #[test]
    fn test_cubes() {
        let mgr = BddManager::new(2, 8);
        let (a, b) = (mgr.var(0), mgr.var(1));

        let f = mgr.apply_xor(a, b).unwrap();
        let cubes = mgr.cubes(f);
        assert_eq!(
            cubes,
            vec![
                vec![Var::new(0).neg(), Var::new(1).pos()],
                vec![Var::new(0).pos(), Var::new(1).neg()],
            ]
        );

        assert_eq!(mgr.cubes(mgr.one()), vec![Vec::<Lit>::new()]);
        assert!(mgr.cubes(mgr.zero()).is_empty());
    }
}
