//! String interning for identifiers and literal text.
//!
//! A [`Symbol`] is a compact (4-byte) handle to an interned `&'static str`.
//! Property-path segments and string literals are interned once at compile
//! time so that the evaluator can compare them as integers instead of
//! walking bytes on every lookup — this is the technique that keeps
//! attribute-name comparison off the allocating path entirely.
//!
//! # Thread safety
//!
//! The global table is a pair of [`DashMap`]s (string → index, index →
//! string) so interning and lookup are both lock-free with respect to other
//! threads; compiling rules concurrently never serializes on a single mutex.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::LazyLock;

struct StringTable {
    forward: DashMap<&'static str, u32, ahash::RandomState>,
    backward: DashMap<u32, &'static str, ahash::RandomState>,
    next: AtomicU32,
}

impl StringTable {
    fn new() -> Self {
        Self {
            forward: DashMap::with_hasher(ahash::RandomState::new()),
            backward: DashMap::with_hasher(ahash::RandomState::new()),
            next: AtomicU32::new(0),
        }
    }

    fn intern(&self, s: &str) -> Symbol {
        if let Some(existing) = self.forward.get(s) {
            return Symbol(*existing);
        }
        // Leak the string once so both maps can hold a `'static` reference;
        // the interner lives for the process lifetime so this never grows
        // unbounded relative to distinct attribute names and literals seen.
        // Speculatively leaking before the entry check below means a
        // losing racer's copy goes unused, which is an acceptable cost
        // given interning only happens during compilation, never eval.
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        // `entry` locks the shard for this key across the check-and-insert,
        // so two threads racing to intern the same text can't each assign
        // a distinct index: only one ever runs the closure, and both
        // receive the same resulting `Symbol`.
        let index = *self.forward.entry(leaked).or_insert_with(|| {
            let index = self.next.fetch_add(1, Ordering::Relaxed);
            self.backward.insert(index, leaked);
            index
        });
        Symbol(index)
    }

    fn resolve(&self, sym: Symbol) -> &'static str {
        self.backward
            .get(&sym.0)
            .map(|entry| *entry)
            .unwrap_or("")
    }
}

static TABLE: LazyLock<StringTable> = LazyLock::new(StringTable::new);

/// An interned string handle.
///
/// Two `Symbol`s compare equal iff they were interned from equal strings.
/// Comparison is a single `u32` comparison — no string access required.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Symbol(u32);

impl Symbol {
    /// Intern `s`, returning its handle. Interning the same text twice
    /// returns the same `Symbol`.
    #[inline]
    pub fn intern(s: &str) -> Self {
        TABLE.intern(s)
    }

    /// Resolve back to the original string slice.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        TABLE.resolve(*self)
    }

    /// Compare against a borrowed string without materializing a `Symbol`
    /// for the right-hand side — used when matching a property-path segment
    /// against a context key supplied at evaluation time.
    #[inline]
    pub fn eq_str(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
