//! Boolean operations.
//!
//! AND is the only primitive. OR and XOR are derived from it through
//! complement edges, which are free. Every operation returns
//! `Err(CapacityExceeded)` as soon as any recursive step fails to allocate a
//! node; partial results are never cached.

use log::{debug, trace};

use crate::cache::Operation;
use crate::error::BddResult;
use crate::manager::BddManager;
use crate::reference::Ref;
use crate::types::{Lit, Var};

impl BddManager {
    /// Negation. Never allocates.
    pub fn apply_not(&self, f: Ref) -> Ref {
        -f
    }

    /// Conjunction.
    ///
    /// # Examples
    ///
    /// ```
    /// use genbdd::manager::BddManager;
    ///
    /// let mgr = BddManager::new(2, 8);
    /// let a = mgr.var(0);
    /// assert_eq!(mgr.apply_and(a, -a)?, mgr.zero());
    /// assert_eq!(mgr.apply_and(a, mgr.one())?, a);
    /// # Ok::<(), genbdd::error::CapacityExceeded>(())
    /// ```
    pub fn apply_and(&self, f: Ref, g: Ref) -> BddResult<Ref> {
        debug!("and(f = {}, g = {})", f, g);
        self.check_live(f);
        self.check_live(g);
        self.and_rec(f, g)
    }

    pub(crate) fn and_rec(&self, f: Ref, g: Ref) -> BddResult<Ref> {
        // Commutative: one cache line for both orders.
        let (f, g) = if f <= g { (f, g) } else { (g, f) };

        if f.regular() == g.regular() {
            return Ok(if f == g { f } else { Ref::ZERO });
        }
        // The constant node has the smallest slot, so it can only be `f` here.
        if f.is_constant() {
            return Ok(if f == Ref::ONE { g } else { Ref::ZERO });
        }

        if let Some(res) = self.cache_get(Operation::And, f, g) {
            return Ok(res);
        }

        let fv = self.variable(f);
        let gv = self.variable(g);
        let v = fv.min(gv);
        let (f0, f1) = self.top_cofactors(f, v);
        let (g0, g1) = self.top_cofactors(g, v);

        let t = self.and_rec(f1, g1)?;
        let e = self.and_rec(f0, g0)?;
        let res = self.mk_node(v, t, e)?;

        trace!("computed: and({}, {}) -> {}", f, g, res);
        self.cache_insert(Operation::And, f, g, res);
        Ok(res)
    }

    /// Disjunction: `~(~f & ~g)`.
    pub fn apply_or(&self, f: Ref, g: Ref) -> BddResult<Ref> {
        debug!("or(f = {}, g = {})", f, g);
        Ok(-self.apply_and(-f, -g)?)
    }

    /// Exclusive or: `(f & ~g) | (~f & g)`.
    pub fn apply_xor(&self, f: Ref, g: Ref) -> BddResult<Ref> {
        debug!("xor(f = {}, g = {})", f, g);
        let a = self.apply_and(f, -g)?;
        let b = self.apply_and(-f, g)?;
        self.apply_or(a, b)
    }

    /// Equivalence: `~(f ^ g)`.
    pub fn apply_eq(&self, f: Ref, g: Ref) -> BddResult<Ref> {
        Ok(-self.apply_xor(f, g)?)
    }

    /// Implication: `~f | g`.
    pub fn apply_imply(&self, f: Ref, g: Ref) -> BddResult<Ref> {
        self.apply_or(-f, g)
    }

    /// Conjunction of many functions, left to right.
    pub fn apply_and_many(&self, fs: impl IntoIterator<Item = Ref>) -> BddResult<Ref> {
        let mut res = Ref::ONE;
        for f in fs {
            res = self.apply_and(res, f)?;
        }
        Ok(res)
    }

    /// Disjunction of many functions, left to right.
    pub fn apply_or_many(&self, fs: impl IntoIterator<Item = Ref>) -> BddResult<Ref> {
        let mut res = Ref::ZERO;
        for f in fs {
            res = self.apply_or(res, f)?;
        }
        Ok(res)
    }

    /// The function of a single literal.
    pub fn lit(&self, lit: Lit) -> Ref {
        self.var(lit.var().index() as usize).not_cond(lit.is_negated())
    }

    /// Conjunction of literals.
    ///
    /// Built from the highest variable up so that every AND only adds one
    /// node on top. Contradicting literals give zero.
    pub fn cube(&self, lits: impl IntoIterator<Item = Lit>) -> BddResult<Ref> {
        let mut lits: Vec<Lit> = lits.into_iter().collect();
        lits.sort_by(|a, b| b.cmp(a));
        debug!("cube(lits = {:?})", lits);

        let mut res = Ref::ONE;
        for lit in lits {
            res = self.and_rec(res, self.lit(lit))?;
        }
        Ok(res)
    }

    /// Conjunction of the positive literals of `vars`.
    pub fn var_cube(&self, vars: impl IntoIterator<Item = usize>) -> BddResult<Ref> {
        self.cube(vars.into_iter().map(|v| Var::new(v as u32).pos()))
    }

    /// Existential quantification of the variables of `cube`.
    ///
    /// # Panics
    ///
    /// Panics if `cube` is not a conjunction of positive literals.
    pub fn exists(&self, f: Ref, cube: Ref) -> BddResult<Ref> {
        debug!("exists(f = {}, cube = {})", f, cube);
        self.check_live(f);
        self.check_positive_cube(cube);
        self.exists_rec(f, cube)
    }

    /// Universal quantification: `~exists(~f, cube)`.
    pub fn forall(&self, f: Ref, cube: Ref) -> BddResult<Ref> {
        debug!("forall(f = {}, cube = {})", f, cube);
        Ok(-self.exists(-f, cube)?)
    }

    fn check_positive_cube(&self, cube: Ref) {
        self.check_live(cube);
        let mut c = cube;
        while c != Ref::ONE {
            assert!(
                !c.is_complemented(),
                "{} is not a cube of positive literals",
                cube
            );
            let node = self.node(c);
            assert_eq!(
                node.low,
                Ref::ZERO,
                "{} is not a cube of positive literals",
                cube
            );
            c = node.high;
        }
    }

    fn exists_rec(&self, f: Ref, cube: Ref) -> BddResult<Ref> {
        if f.is_constant() || cube == Ref::ONE {
            return Ok(f);
        }

        // Variables above the top of `f` do not occur in it.
        let fv = self.variable(f);
        let mut cube = cube;
        while self.variable(cube) < fv {
            cube = self.node(cube).high;
        }
        if cube == Ref::ONE {
            return Ok(f);
        }

        if let Some(res) = self.cache_get(Operation::Exists, f, cube) {
            return Ok(res);
        }

        let (f0, f1) = self.top_cofactors(f, fv);
        let res = if self.variable(cube) == fv {
            let rest = self.node(cube).high;
            let t = self.exists_rec(f1, rest)?;
            if t == Ref::ONE {
                Ref::ONE
            } else {
                let e = self.exists_rec(f0, rest)?;
                -self.and_rec(-t, -e)?
            }
        } else {
            let t = self.exists_rec(f1, cube)?;
            let e = self.exists_rec(f0, cube)?;
            self.mk_node(fv, t, e)?
        };

        trace!("computed: exists({}, {}) -> {}", f, cube, res);
        self.cache_insert(Operation::Exists, f, cube, res);
        Ok(res)
    }

    /// Restriction of `f` to `var = value`.
    pub fn cofactor(&self, f: Ref, var: usize, value: bool) -> BddResult<Ref> {
        debug!("cofactor(f = {}, var = {}, value = {})", f, var, value);
        self.check_live(f);
        let lit = self.var(var).not_cond(!value);
        // f|x=b is the existential abstraction of f & (x=b) over x.
        let g = self.and_rec(f, lit)?;
        self.exists_rec(g, self.var(var))
    }
}
