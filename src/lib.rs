//! An immutable, tree-structured character sequence with fast
//! concatenation, substring, insertion, deletion, reversal, and search.
//!
//! A [`Rope`] never mutates in place: every editing method consumes or
//! borrows `self` and returns a new `Rope` that structurally shares
//! untouched subtrees with the original. This makes cheap "checkpoints" of
//! a long-lived buffer free — keep the old `Rope` around, it still denotes
//! exactly what it always did.
//!
//! Like `String`, `Rope` does not implement `Index<usize>` — a `char` is
//! not always one storage unit wide in every backing representation, and
//! returning `&char` would require either an unsafe leak or an owned
//! scratch cell. Use [`Rope::get`] instead, which returns `char` by value.
//!
//! ```
//! use persistent_rope::Rope;
//!
//! let r = Rope::from("hello").append(&Rope::from(" world"));
//! assert_eq!(r.len(), 11);
//! assert_eq!(r.to_string(), "hello world");
//!
//! let r2 = r.insert(5, ",").unwrap();
//! assert_eq!(r2.to_string(), "hello, world");
//! assert_eq!(r.to_string(), "hello world"); // r is untouched
//! ```

mod balance;
mod error;
mod iter;
mod node;
#[cfg(test)]
mod properties;
pub mod regex_adapter;
mod search;

use std::cmp::Ordering;
use std::fmt;
use std::fmt::Write as FmtWrite;
use std::hash::{Hash, Hasher};
use std::io::Write as IoWrite;
use std::iter::FromIterator;
use std::ops::{Add, Mul};

pub use error::{Result, RopeError};
pub use iter::Chars;

use node::{Node, NodeLink, NodeLinkOps};

#[cfg(feature = "atomic")]
use std::sync::Arc as Handle;
#[cfg(not(feature = "atomic"))]
use std::rc::Rc as Handle;

/// An immutable, tree-structured character sequence.
///
/// See the crate-level documentation for the persistence model. `Rope`
/// cloning is O(1): it clones a shared handle to the underlying tree, not
/// the tree's contents.
#[derive(Clone)]
pub struct Rope {
    root: NodeLink,
}

impl Rope {
    fn from_node(root: NodeLink) -> Self {
        Rope { root }
    }

    /// An empty rope.
    pub fn new() -> Self {
        Rope::from_node(Node::empty())
    }

    /// The number of characters in the rope.
    pub fn len(&self) -> usize {
        self.root.len()
    }

    /// True if the rope contains no characters.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// The character at `i`, panicking if `i >= self.len()`. Mirrors
    /// `Vec`/`String`'s own panicking indexing convention.
    pub fn get(&self, i: usize) -> char {
        self.try_get(i).expect("character index out of range")
    }

    /// The character at `i`, or a [`RopeError::OutOfRange`] if `i` is out
    /// of bounds.
    pub fn try_get(&self, i: usize) -> Result<char> {
        self.root.try_get(i)
    }

    /// The subrange `[a, b)`, panicking on an invalid range. O(log n),
    /// sharing structure with `self` rather than copying characters.
    pub fn sub_sequence(&self, a: usize, b: usize) -> Rope {
        self.try_sub_sequence(a, b)
            .expect("subSequence range out of bounds")
    }

    /// Checked form of [`Rope::sub_sequence`].
    pub fn try_sub_sequence(&self, a: usize, b: usize) -> Result<Rope> {
        self.root.sub_sequence(a, b).map(Rope::from_node)
    }

    /// A new rope equal to `self` followed by `other`. O(1) plus whatever
    /// rebalancing the resulting tree needs.
    pub fn append(&self, other: &Rope) -> Rope {
        Rope::from_node(balance::concatenate(self.root.clone(), other.root.clone()))
    }

    /// Appends the subrange `[s, e)` of `other`.
    pub fn append_range(&self, other: &Rope, s: usize, e: usize) -> Result<Rope> {
        let slice = other.try_sub_sequence(s, e)?;
        Ok(self.append(&slice))
    }

    /// Inserts `seq` at `at`, failing if `at` is out of range.
    pub fn insert(&self, at: usize, seq: &str) -> Result<Rope> {
        if at > self.len() {
            return Err(error::out_of_range(at, self.len()));
        }
        let left = self.sub_sequence(0, at);
        let right = self.sub_sequence(at, self.len());
        Ok(left.append(&Rope::from(seq)).append(&right))
    }

    /// Deletes the subrange `[s, e)`, returning the result. `s == e` is a
    /// no-op that returns an equal (structurally shared) rope.
    pub fn delete(&self, s: usize, e: usize) -> Result<Rope> {
        if s > e || e > self.len() {
            return Err(error::out_of_range(e, self.len()));
        }
        if s == e {
            return Ok(self.clone());
        }
        let left = self.sub_sequence(0, s);
        let right = self.sub_sequence(e, self.len());
        Ok(left.append(&right))
    }

    /// The reverse of `self`. O(1): it wraps (or, if `self` is already a
    /// reversed view, unwraps) a lazy overlay rather than copying
    /// characters (see `DESIGN.md` Open Question 1).
    pub fn reverse(&self) -> Rope {
        Rope::from_node(self.root.reverse())
    }

    /// `self` repeated `n` times. `n == 0` yields the empty rope. Uses
    /// repeated doubling so the result's depth stays O(log n) rather than
    /// O(n).
    pub fn repeat(&self, n: i64) -> Result<Rope> {
        if n < 0 {
            return Err(RopeError::InvalidArgument(
                "repeat count must not be negative".into(),
            ));
        }
        let mut n = n as u64;
        if n == 0 || self.is_empty() {
            return Ok(Rope::new());
        }
        let mut result = Rope::new();
        let mut base = self.clone();
        while n > 0 {
            if n & 1 == 1 {
                result = result.append(&base);
            }
            base = base.append(&base);
            n >>= 1;
        }
        Ok(result)
    }

    /// A forward cursor starting at character 0.
    pub fn iter(&self) -> Chars {
        self.iter_from(0).expect("0 is always a valid start")
    }

    /// A forward cursor starting at character `start`.
    pub fn iter_from(&self, start: usize) -> Result<Chars> {
        iter::forward(self.root.clone(), start)
    }

    /// A reverse cursor: the first character it yields is
    /// `self.get(self.len() - 1 - start)`, matching `SPEC_FULL.md` §4.4.
    pub fn rev_iter_from(&self, start: usize) -> Result<Chars> {
        iter::backward(self.root.clone(), start)
    }

    /// A random-access adapter suitable for a host regex engine
    /// (`SPEC_FULL.md` §4.7).
    pub fn random_access(&self) -> regex_adapter::RandomAccess {
        regex_adapter::RandomAccess::new(self.root.clone())
    }

    /// The first index at or after `from` where `ch` occurs.
    pub fn index_of(&self, ch: char, from: usize) -> Option<usize> {
        search::index_of_char(&self.root, ch, from)
    }

    /// The first index at or after `from` where `sub` occurs as a
    /// contiguous subsequence.
    pub fn index_of_seq(&self, sub: &str, from: usize) -> Option<usize> {
        let pattern: Vec<char> = sub.chars().collect();
        search::index_of_seq(&self.root, &pattern, from)
    }

    /// True if the rope (from `offset`) starts with `prefix`.
    pub fn starts_with(&self, prefix: &str, offset: usize) -> bool {
        let pattern: Vec<char> = prefix.chars().collect();
        search::starts_with(&self.root, &pattern, offset)
    }

    /// True if the rope, truncated to `offset` characters, ends with
    /// `suffix`.
    pub fn ends_with(&self, suffix: &str, offset: usize) -> bool {
        let pattern: Vec<char> = suffix.chars().collect();
        search::ends_with(&self.root, &pattern, offset)
    }

    /// Strips leading and trailing ASCII whitespace (code units `<= 0x20`).
    pub fn trim(&self) -> Rope {
        self.trim_start().trim_end()
    }

    /// Strips leading whitespace.
    pub fn trim_start(&self) -> Rope {
        let n = self.iter().take_while(|c| *c as u32 <= 0x20).count();
        self.sub_sequence(n, self.len())
    }

    /// Strips trailing whitespace.
    pub fn trim_end(&self) -> Rope {
        let mut end = self.len();
        let mut it = self.rev_iter_from(0).expect("0 is always a valid start");
        while let Some(c) = it.next() {
            if c as u32 > 0x20 {
                break;
            }
            end -= 1;
        }
        self.sub_sequence(0, end)
    }

    /// Pads the front with `pad` until the rope is at least `target`
    /// characters long; a no-op if it already is.
    pub fn pad_start(&self, target: usize, pad: char) -> Rope {
        if target <= self.len() {
            return self.clone();
        }
        let filler: String = std::iter::repeat(pad).take(target - self.len()).collect();
        Rope::from(filler.as_str()).append(self)
    }

    /// Pads the back with `pad` until the rope is at least `target`
    /// characters long; a no-op if it already is.
    pub fn pad_end(&self, target: usize, pad: char) -> Rope {
        if target <= self.len() {
            return self.clone();
        }
        let filler: String = std::iter::repeat(pad).take(target - self.len()).collect();
        self.append(&Rope::from(filler.as_str()))
    }

    /// Writes the rope's characters, UTF-8 encoded, to `sink`.
    pub fn write<W: IoWrite>(&self, mut sink: W) -> Result<()> {
        self.root.write(&mut sink)
    }

    /// Writes the subrange `[offset, offset + length)` to `sink`.
    pub fn write_range<W: IoWrite>(&self, mut sink: W, offset: usize, length: usize) -> Result<()> {
        self.root.write_range(&mut sink, offset, length)
    }
}

impl Default for Rope {
    fn default() -> Self {
        Rope::new()
    }
}

impl From<&str> for Rope {
    fn from(s: &str) -> Self {
        let chars: Vec<char> = s.chars().collect();
        Rope::from_node(Node::flat(Handle::from(chars)))
    }
}

impl From<String> for Rope {
    fn from(s: String) -> Self {
        Rope::from(s.as_str())
    }
}

impl FromIterator<char> for Rope {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        let s: String = iter.into_iter().collect();
        Rope::from(s.as_str())
    }
}

impl Add for Rope {
    type Output = Rope;
    fn add(self, rhs: Rope) -> Rope {
        self.append(&rhs)
    }
}

impl<'a> Add<&'a Rope> for &'a Rope {
    type Output = Rope;
    fn add(self, rhs: &'a Rope) -> Rope {
        self.append(rhs)
    }
}

impl Mul<i64> for Rope {
    type Output = Rope;
    fn mul(self, rhs: i64) -> Rope {
        self.repeat(rhs).expect("negative repeat count")
    }
}

impl fmt::Display for Rope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.iter() {
            f.write_char(c)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Rope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rope({:?})", self.to_string())
    }
}

impl PartialEq for Rope {
    fn eq(&self, other: &Rope) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().eq(other.iter())
    }
}

impl Eq for Rope {}

impl PartialEq<str> for Rope {
    fn eq(&self, other: &str) -> bool {
        self.len() == other.chars().count() && self.iter().eq(other.chars())
    }
}

impl PartialOrd for Rope {
    fn partial_cmp(&self, other: &Rope) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rope {
    fn cmp(&self, other: &Rope) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl Hash for Rope {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.root.hash_code().hash(state);
    }
}
