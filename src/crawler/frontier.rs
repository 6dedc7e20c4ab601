//! Crawl frontier and visited set
//!
//! A URL lives in at most one of {frontier, visited}. Dequeuing moves it to
//! the visited set before any processing happens, so it is never processed
//! twice, whatever the outcome of the fetch.

use std::collections::{HashSet, VecDeque};

/// A URL waiting to be visited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedUrl {
    /// The normalized URL to visit
    pub url: String,

    /// Link hops from the seed (the seed is depth 0)
    pub depth: u32,
}

/// FIFO frontier with a visited set
///
/// Entries come out in non-decreasing depth order, so every URL is visited
/// at the smallest depth at which it was discovered.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<QueuedUrl>,
    queued: HashSet<String>,
    visited: HashSet<String>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a URL unless it is already queued or visited
    ///
    /// # Returns
    ///
    /// * `true` - The URL was queued
    /// * `false` - The URL was already known
    pub fn push(&mut self, url: String, depth: u32) -> bool {
        if self.visited.contains(&url) || self.queued.contains(&url) {
            return false;
        }

        self.queued.insert(url.clone());
        self.queue.push_back(QueuedUrl { url, depth });
        true
    }

    /// Dequeues the next URL and marks it visited
    pub fn pop(&mut self) -> Option<QueuedUrl> {
        let next = self.queue.pop_front()?;
        self.queued.remove(&next.url);
        self.visited.insert(next.url.clone());
        Some(next)
    }

    /// Dequeues up to `max` URLs, marking each visited
    pub fn pop_batch(&mut self, max: usize) -> Vec<QueuedUrl> {
        let mut batch = Vec::with_capacity(max.min(self.queue.len()));
        while batch.len() < max {
            match self.pop() {
                Some(next) => batch.push(next),
                None => break,
            }
        }
        batch
    }

    /// Returns true if the URL has been dequeued
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Number of URLs waiting
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if nothing is waiting
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of URLs dequeued so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
