//! Property-based tests encoding the eleven universal laws of
//! `SPEC_FULL.md` §8 as executable `quickcheck` properties.
//!
//! Grounded on `examples/an-cabal-an-rope/src/test/mod.rs`'s `Arbitrary`
//! impl for `Rope` (build a rope from an arbitrary `String`, shrink via the
//! underlying `Vec<char>`), modernized to the `quickcheck`/`quickcheck_macros`
//! 1.x attribute-macro style instead of the teacher's 0.3-era `#[test]` +
//! manual `quickcheck()` call.

use crate::Rope;
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

impl Arbitrary for Rope {
    fn arbitrary(g: &mut Gen) -> Rope {
        Rope::from(String::arbitrary(g))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Rope>> {
        let chars: Vec<char> = self.iter().collect();
        Box::new(chars.shrink().map(|cs| cs.into_iter().collect::<Rope>()))
    }
}

/// Property 1: indexing equivalence.
#[quickcheck]
fn prop_indexing_equivalence(s: String) -> bool {
    let r = Rope::from(s.as_str());
    let flat: Vec<char> = s.chars().collect();
    (0..r.len()).all(|i| r.get(i) == flat[i])
}

/// Property 2: length additivity.
#[quickcheck]
fn prop_length_additivity(a: String, b: String) -> bool {
    let ra = Rope::from(a.as_str());
    let rb = Rope::from(b.as_str());
    ra.append(&rb).len() == ra.len() + rb.len()
}

/// Property 3: concatenation associativity (value, not tree shape).
#[quickcheck]
fn prop_concat_associativity(a: String, b: String, c: String) -> bool {
    let ra = Rope::from(a.as_str());
    let rb = Rope::from(b.as_str());
    let rc = Rope::from(c.as_str());
    ra.append(&rb).append(&rc) == ra.append(&rb.append(&rc))
}

/// Property 4: double reverse is identity.
#[quickcheck]
fn prop_double_reverse(s: String) -> bool {
    let r = Rope::from(s.as_str());
    r.reverse().reverse() == r
}

/// Property 5: substring round-trip against the flattened string.
#[quickcheck]
fn prop_substring_round_trip(s: String, a: usize, b: usize) -> bool {
    let r = Rope::from(s.as_str());
    let len = r.len();
    if len == 0 {
        return true;
    }
    let a = a % (len + 1);
    let b = a + (b % (len + 1 - a));
    let chars: Vec<char> = s.chars().collect();
    let expected: String = chars[a..b].iter().collect();
    r.sub_sequence(a, b).to_string() == expected
}

/// Property 6: insert then delete is the identity.
#[quickcheck]
fn prop_insert_delete_inverse(s: String, ins: String, k: usize) -> bool {
    let r = Rope::from(s.as_str());
    let len = r.len();
    let k = if len == 0 { 0 } else { k % (len + 1) };
    let inserted = r.insert(k, &ins).unwrap();
    let restored = inserted.delete(k, k + ins.chars().count()).unwrap();
    restored == r
}

/// Property 7: forward/reverse iterator completeness from the start.
#[quickcheck]
fn prop_iterator_completeness(s: String) -> bool {
    let r = Rope::from(s.as_str());
    let forward: String = r.iter().collect();
    let backward: String = r.rev_iter_from(0).unwrap().collect();
    forward == s && backward == s.chars().rev().collect::<String>()
}

/// Property 8: `skip(n)` then `next()` matches `n` successive `next()` calls.
#[quickcheck]
fn prop_skip_equivalence(s: String, n: usize) -> bool {
    let r = Rope::from(s.as_str());
    if r.is_empty() {
        return true;
    }
    let n = n % r.len();
    let mut skipped = r.iter();
    if skipped.skip(n).is_err() {
        return false;
    }
    let mut stepped = r.iter();
    for _ in 0..n {
        stepped.next();
    }
    skipped.next() == stepped.next()
}

/// Property 9: `index_of_seq` soundness — a hit is at-or-after `from` and
/// denotes the pattern; a miss means the pattern truly does not occur.
#[quickcheck]
fn prop_index_of_soundness(s: String, sub: String, from: usize) -> bool {
    if sub.is_empty() {
        return true;
    }
    let r = Rope::from(s.as_str());
    let from = if r.is_empty() { 0 } else { from % (r.len() + 1) };
    let sub_len = sub.chars().count();
    match r.index_of_seq(&sub, from) {
        Some(k) => k >= from && r.sub_sequence(k, (k + sub_len).min(r.len())).to_string() == sub,
        None => {
            let tail: String = s.chars().skip(from).collect();
            !tail.contains(&sub)
        }
    }
}

/// Property 10: root depth stays within the `C * log2(len + 2)` balance
/// bound after a sequence of appends. Reads `Rope`'s private `root` field
/// directly, which submodules of the crate root may do.
#[quickcheck]
fn prop_balance_bound_after_many_appends(pieces: Vec<String>) -> bool {
    let mut r = Rope::new();
    for p in pieces.iter().take(2000) {
        r = r.append(&Rope::from(p.as_str()));
    }
    let bound = 64.0_f64 * ((r.len() as f64 + 2.0).log2());
    (r.root.depth() as f64) <= bound.max(1.0)
}

/// Property 11: equal ropes hash equal.
#[quickcheck]
fn prop_hash_eq_compatibility(a: String, b: String) -> bool {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    let ra = Rope::from(a.as_str());
    let rb = Rope::from(b.as_str());
    if ra != rb {
        return true;
    }
    let mut ha = DefaultHasher::new();
    let mut hb = DefaultHasher::new();
    ra.hash(&mut ha);
    rb.hash(&mut hb);
    ha.finish() == hb.finish()
}
