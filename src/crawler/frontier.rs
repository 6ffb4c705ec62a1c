//! Crawl frontier: the bounded, duplicate-free queue of URLs
//!
//! The frontier is both the set of known URLs and the traversal sequence.
//! Entries are kept in insertion order and walked with an integer cursor, so
//! URLs appended while the crawl is running are reached later in the same
//! pass. That is what turns FIFO insertion into breadth-first order: links
//! found on entry *i* land at the tail and are visited once every entry that
//! was queued before them has been.
//!
//! Membership doubles as the visited check. Once the cursor has passed an
//! index, the URL at that index has been visited; any URL still present is
//! either visited or pending, and in both cases is never enqueued again.

use std::collections::HashSet;

/// Bounded, insertion-ordered, duplicate-free sequence of URLs
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    /// URLs in insertion order
    entries: Vec<String>,

    /// Index over `entries` for O(1) membership checks
    seen: HashSet<String>,

    /// Hard ceiling on `entries.len()`; `None` means unbounded
    capacity: Option<usize>,

    /// Position of the next unvisited entry
    cursor: usize,
}

impl Frontier {
    /// Creates an empty frontier
    ///
    /// A capacity of `Some(0)` is treated as unbounded, matching the
    /// "non-positive means unlimited" rule of `max-crawls`.
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            entries: Vec::new(),
            seen: HashSet::new(),
            capacity: capacity.filter(|&c| c > 0),
            cursor: 0,
        }
    }

    /// Creates an empty frontier from a `max-crawls` style limit
    ///
    /// Positive values cap the number of entries, zero and negative values
    /// leave the frontier unbounded.
    ///
    /// # Examples
    ///
    /// ```
    /// use sumi_sweep::Frontier;
    ///
    /// assert_eq!(Frontier::from_max_crawls(5).capacity(), Some(5));
    /// assert_eq!(Frontier::from_max_crawls(-1).capacity(), None);
    /// ```
    pub fn from_max_crawls(max_crawls: i64) -> Self {
        let capacity = usize::try_from(max_crawls).ok().filter(|&c| c > 0);
        Self::new(capacity)
    }

    /// Returns the capacity bound, if any
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Determines if the frontier has been filled up to capacity
    pub fn is_full(&self) -> bool {
        self.capacity
            .map_or(false, |capacity| self.entries.len() >= capacity)
    }

    /// Appends a URL if it is new and there is room for it
    ///
    /// # Returns
    ///
    /// * `true` - The URL was appended
    /// * `false` - The URL is already present or the frontier is full; nothing changed
    pub fn add(&mut self, url: &str) -> bool {
        if self.is_full() || self.seen.contains(url) {
            return false;
        }

        self.seen.insert(url.to_string());
        self.entries.push(url.to_string());
        true
    }

    /// Adds every URL in order, keeping the ones that fit
    ///
    /// This is not all-or-nothing: accepted URLs stay in the frontier even
    /// when others are rejected.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Every URL was accepted
    /// * `Err(rejected)` - The duplicates and over-capacity URLs, in input order
    pub fn add_from<I, S>(&mut self, urls: I) -> Result<(), Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rejected: Vec<String> = urls
            .into_iter()
            .filter_map(|url| {
                let url = url.as_ref();
                (!self.add(url)).then(|| url.to_string())
            })
            .collect();

        if rejected.is_empty() {
            Ok(())
        } else {
            Err(rejected)
        }
    }

    /// Determines if the URL exists within the frontier
    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    /// Removes a URL from the frontier
    ///
    /// If the removed entry sat before the cursor, the cursor moves back one
    /// slot so that it still points at the same unvisited entry.
    pub fn remove(&mut self, url: &str) -> bool {
        if !self.seen.remove(url) {
            return false;
        }

        if let Some(index) = self.entries.iter().position(|entry| entry == url) {
            self.entries.remove(index);
            if index < self.cursor {
                self.cursor -= 1;
            }
        }

        true
    }

    /// Returns the number of URLs ever accepted and not removed
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Determines if the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries the cursor has not reached yet
    pub fn pending(&self) -> usize {
        self.entries.len().saturating_sub(self.cursor)
    }

    /// Iterates over every entry in insertion order, visited or not
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    // ===== Traversal protocol =====

    /// Moves the cursor back to the first entry
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Determines if the cursor points at a live entry
    pub fn valid(&self) -> bool {
        self.cursor < self.entries.len()
    }

    /// Returns the entry under the cursor without advancing
    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Returns the cursor position
    pub fn key(&self) -> usize {
        self.cursor
    }

    /// Advances the cursor by one entry
    pub fn next(&mut self) {
        if self.cursor < self.entries.len() {
            self.cursor += 1;
        }
    }
}
