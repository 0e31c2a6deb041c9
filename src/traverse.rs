//! Depth-first traversals over the spare mark bit of each node.
//!
//! Every routine runs a marking pass followed by a clearing pass over the same
//! roots, so no mark outlives the call. Both passes use explicit stacks; the
//! depth of a diagram is bounded by the number of variables, but collaborators
//! may run with small stacks.

use log::debug;

use crate::error::BddResult;
use crate::manager::BddManager;
use crate::node::Node;
use crate::reference::Ref;
use crate::types::NodeId;

impl BddManager {
    /// Mark every node reachable from `roots` (constant included), calling
    /// `visit` once per newly marked node.
    fn mark_from(&self, roots: &[Ref], mut visit: impl FnMut(NodeId, &Node)) {
        let mut table = self.table().borrow_mut();
        let mut stack: Vec<NodeId> = roots.iter().map(|r| r.id()).collect();

        while let Some(id) = stack.pop() {
            if table.is_marked(id) {
                continue;
            }
            table.set_mark(id);
            let node = *table.node(id);
            visit(id, &node);
            if !id.is_const() {
                stack.push(node.low.id());
                stack.push(node.high.id());
            }
        }
    }

    /// Clear the marks set by [`mark_from`](Self::mark_from) over the same roots.
    fn unmark_from(&self, roots: &[Ref]) {
        let mut table = self.table().borrow_mut();
        let mut stack: Vec<NodeId> = roots.iter().map(|r| r.id()).collect();

        while let Some(id) = stack.pop() {
            if !table.is_marked(id) {
                continue;
            }
            table.clear_mark(id);
            if !id.is_const() {
                let node = *table.node(id);
                stack.push(node.low.id());
                stack.push(node.high.id());
            }
        }
    }

    /// Collect the nodes reachable from `roots` in post-order (children before
    /// parents) into `out`, as regular handles.
    pub(crate) fn collect_post_order(&self, roots: &[Ref], out: &mut Vec<Ref>) {
        {
            let mut table = self.table().borrow_mut();
            // `true` once the children of the node have been pushed.
            let mut stack: Vec<(NodeId, bool)> = roots.iter().rev().map(|r| (r.id(), false)).collect();

            while let Some((id, expanded)) = stack.pop() {
                if expanded {
                    out.push(table.handle(id));
                    continue;
                }
                if table.is_marked(id) {
                    continue;
                }
                table.set_mark(id);
                stack.push((id, true));
                if !id.is_const() {
                    let node = *table.node(id);
                    stack.push((node.low.id(), false));
                    stack.push((node.high.id(), false));
                }
            }
        }
        self.unmark_from(roots);
    }

    /// Variables `f` depends on, as a boolean array indexed by variable.
    pub fn support(&self, f: Ref) -> Vec<bool> {
        self.check_live(f);
        let mut support = vec![false; self.num_vars()];
        self.mark_from(&[f], |id, node| {
            if !id.is_const() {
                support[node.variable.index() as usize] = true;
            }
        });
        self.unmark_from(&[f]);
        support
    }

    /// Number of variables `f` depends on.
    pub fn support_size(&self, f: Ref) -> usize {
        self.support(f).into_iter().filter(|&b| b).count()
    }

    /// Support of `f` as a positive cube.
    ///
    /// Built from the highest variable down, so each AND only adds one node.
    pub fn support_cube(&self, f: Ref) -> BddResult<Ref> {
        let support = self.support(f);
        let mut res = Ref::ONE;
        for (v, _) in support.iter().enumerate().rev().filter(|(_, &b)| b) {
            res = self.and_rec(res, self.var(v))?;
        }
        Ok(res)
    }

    /// Number of nodes in the diagram of `f`, the constant node included.
    ///
    /// # Examples
    ///
    /// ```
    /// use genbdd::manager::BddManager;
    ///
    /// let mgr = BddManager::new(2, 8);
    /// let f = mgr.apply_xor(mgr.var(0), mgr.var(1))?;
    /// assert_eq!(mgr.dag_size(f), 3);
    /// # Ok::<(), genbdd::error::CapacityExceeded>(())
    /// ```
    pub fn dag_size(&self, f: Ref) -> usize {
        self.sharing_size(&[f])
    }

    /// Number of distinct nodes used by all `roots` together.
    pub fn sharing_size(&self, roots: &[Ref]) -> usize {
        for &r in roots {
            self.check_live(r);
        }
        let mut count = 0;
        self.mark_from(roots, |_, _| count += 1);
        self.unmark_from(roots);
        count
    }

    /// Nodes of `f` in post-order, children before parents.
    ///
    /// The result borrows a scratch buffer owned by the manager, reused by
    /// every call. Use [`dag_collect_into`][Self::dag_collect_into] to keep
    /// several collections at once.
    ///
    /// # Panics
    ///
    /// Panics if the result of a previous call is still alive.
    pub fn dag_collect(&self, f: Ref) -> std::cell::Ref<'_, [Ref]> {
        self.check_live(f);
        {
            let mut scratch = self.scratch().borrow_mut();
            if scratch.capacity() == 0 {
                debug!("Allocating collect buffer for {} nodes", self.node_limit());
                scratch.reserve_exact(self.node_limit());
            }
            scratch.clear();
            self.collect_post_order(&[f], &mut scratch);
        }
        std::cell::Ref::map(self.scratch().borrow(), |v| v.as_slice())
    }

    /// Nodes of `f` in post-order, written to `out` in place of its contents.
    pub fn dag_collect_into(&self, f: Ref, out: &mut Vec<Ref>) {
        self.check_live(f);
        out.clear();
        self.collect_post_order(&[f], out);
    }

    /// One satisfying cube of `f`.
    ///
    /// Follows the else branch whenever it is not the zero constant, the then
    /// branch otherwise. Returns zero for the unsatisfiable function and one
    /// for the tautology.
    ///
    /// # Examples
    ///
    /// ```
    /// use genbdd::manager::BddManager;
    ///
    /// let mgr = BddManager::new(2, 8);
    /// let (a, b) = (mgr.var(0), mgr.var(1));
    /// let f = mgr.apply_and(a, -b)?;
    /// assert_eq!(mgr.one_cube(f)?, f);
    /// assert_eq!(mgr.one_cube(mgr.zero())?, mgr.zero());
    /// # Ok::<(), genbdd::error::CapacityExceeded>(())
    /// ```
    pub fn one_cube(&self, f: Ref) -> BddResult<Ref> {
        debug!("one_cube(f = {})", f);
        self.check_live(f);

        let mut lits = Vec::new();
        let mut cur = f;
        while !cur.is_constant() {
            let var = self.variable(cur);
            let (f0, f1) = self.top_cofactors(cur, var);
            if f0 != Ref::ZERO {
                lits.push(self.var(var.index() as usize).not_cond(true));
                cur = f0;
            } else {
                lits.push(self.var(var.index() as usize));
                cur = f1;
            }
        }
        if cur == Ref::ZERO {
            // Only reachable when `f` itself is zero.
            return Ok(Ref::ZERO);
        }

        let mut res = Ref::ONE;
        for &lit in lits.iter().rev() {
            res = self.and_rec(res, lit)?;
        }
        Ok(res)
    }
}
