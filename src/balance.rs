//! The Fibonacci-threshold balancer and the concatenation algebra.
//!
//! > We define the depth of a leaf to be 0, and the depth of a concatenation
//! > to be one plus the maximum depth of its children. Let _Fn_ be the _n_th
//! > Fibonacci number. A rope of depth _n_ is balanced if its length is at
//! > least _Fn_+2 ... Note that balanced ropes may contain unbalanced
//! > subropes.
//! – "Ropes: An Alternative to Strings" (Boehm, Atkinson, Plass)

use crate::node::{CharBuf, Kind, Node, NodeLink, NodeLinkOps, COALESCE_THRESHOLD, MAX_DEPTH};

#[cfg(feature = "atomic")]
use std::sync::Arc as Handle;
#[cfg(not(feature = "atomic"))]
use std::rc::Rc as Handle;

const FIB_LOOKUP: [usize; 93] = [
    0, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144, 233, 377, 610, 987, 1597, 2584, 4181, 6765,
    10946, 17711, 28657, 46368, 75025, 121393, 196418, 317811, 514229, 832040, 1346269, 2178309,
    3524578, 5702887, 9227465, 14930352, 24157817, 39088169, 63245986, 102334155, 165580141,
    267914296, 433494437, 701408733, 1134903170, 1836311903, 2971215073, 4807526976, 7778742049,
    12586269025, 20365011074, 32951280099, 53316291173, 86267571272, 139583862445, 225851433717,
    365435296162, 591286729879, 956722026041, 1548008755920, 2504730781961, 4052739537881,
    6557470319842, 10610209857723, 17167680177565, 27777890035288, 44945570212853,
    72723460248141, 117669030460994, 190392490709135, 308061521170129, 498454011879264,
    806515533049393, 1304969544928657, 2111485077978050, 3416454622906707, 5527939700884757,
    8944394323791464, 14472334024676221, 23416728348467685, 37889062373143906,
    61305790721611591, 99194853094755497, 160500643816367088, 259695496911122585,
    420196140727489673, 679891637638612258, 1100087778366101931, 1779979416004714189,
    2880067194370816120, 4660046610375530309, 7540113804746346429,
];

/// Returns the _n_th Fibonacci number, consulting the lookup table for
/// indices the table covers and falling back to naive recursion beyond it
/// (balanced rope depths never get anywhere near that far in practice).
pub(crate) fn fibonacci(n: usize) -> usize {
    if n < FIB_LOOKUP.len() {
        FIB_LOOKUP[n]
    } else {
        fibonacci(n - 1) + fibonacci(n - 2)
    }
}

/// Flattens a rope into its leaf sequence, left to right, using an explicit
/// stack so deep trees don't blow the call stack (`SPEC_FULL.md` §4.3).
/// `Flat`, `Substring`, and `Reverse` nodes are leaves; `Concat` is the only
/// internal node type.
fn collect_leaves(root: &NodeLink, out: &mut Vec<NodeLink>) {
    let mut stack: Vec<NodeLink> = vec![root.clone()];
    // reversed push order below keeps left-to-right output with a plain pop
    let mut ordered: Vec<NodeLink> = Vec::new();
    while let Some(node) = stack.pop() {
        match node.kind() {
            Kind::Concat { left, right } => {
                stack.push(right.clone());
                stack.push(left.clone());
            }
            // realize a reversed Flat/Substring leaf while we're here, so
            // the tree we reassemble below no longer carries a `Reverse`
            // wrapper that costs an index inversion on every access.
            _ => ordered.push(node.realize_reversed_leaf()),
        }
    }
    // `ordered` was built by popping a stack that always has the leftmost
    // remaining subtree on top, so it is already in left-to-right order.
    out.extend(ordered);
}

/// Rebuilds a balanced tree from a leaf slice by depth-balanced
/// divide-and-conquer (`SPEC_FULL.md` §4.3).
fn merge(leaves: &[NodeLink]) -> NodeLink {
    match leaves.len() {
        0 => Node::empty(),
        1 => leaves[0].clone(),
        2 => Node::concat(leaves[0].clone(), leaves[1].clone()),
        n => {
            let mid = n / 2;
            Node::concat(merge(&leaves[..mid]), merge(&leaves[mid..]))
        }
    }
}

/// Reassembles `root` into a value-equivalent rope of lower depth, or
/// returns it unchanged if it is already balanced.
pub(crate) fn rebalance(root: NodeLink) -> NodeLink {
    if root.is_balanced() {
        return root;
    }
    let mut leaves = Vec::new();
    collect_leaves(&root, &mut leaves);
    merge(&leaves)
}

fn chars_of(buf: &CharBuf) -> &[char] {
    buf
}

/// `concatenate(a, b)`, the single construction path for joining two ropes
/// (`SPEC_FULL.md` §4.2).
pub(crate) fn concatenate(a: NodeLink, b: NodeLink) -> NodeLink {
    if a.is_empty() {
        return b;
    }
    if b.is_empty() {
        return a;
    }

    // step 2: both flat and short enough together — merge into one leaf.
    if let (Kind::Flat(x), Kind::Flat(y)) = (a.kind(), b.kind()) {
        if x.len() + y.len() <= COALESCE_THRESHOLD {
            let mut merged: Vec<char> = Vec::with_capacity(x.len() + y.len());
            merged.extend_from_slice(chars_of(x));
            merged.extend_from_slice(chars_of(y));
            return Node::flat(Handle::from(merged));
        }
    }

    // step 3: right-spine compaction — `a`'s right child is a short flat
    // and `b` is a short flat, combine those two before grafting.
    if let Kind::Concat { left, right } = a.kind() {
        if let (Kind::Flat(r), Kind::Flat(y)) = (right.kind(), b.kind()) {
            if r.len() + y.len() <= COALESCE_THRESHOLD {
                let mut merged: Vec<char> = Vec::with_capacity(r.len() + y.len());
                merged.extend_from_slice(chars_of(r));
                merged.extend_from_slice(chars_of(y));
                let new_right = Node::flat(Handle::from(merged));
                let joined = Node::concat(left.clone(), new_right);
                return finish(joined);
            }
        }
    }

    finish(Node::concat(a, b))
}

fn finish(node: NodeLink) -> NodeLink {
    if node.depth() > MAX_DEPTH || !node.is_balanced() {
        rebalance(node)
    } else {
        node
    }
}
