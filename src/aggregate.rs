use indexmap::IndexMap;

use crate::classify::Classification;

/// content_type -> domain_category -> theme -> URLs in recorded order.
pub type GroupingTree = IndexMap<String, IndexMap<String, IndexMap<String, Vec<String>>>>;

/// Accumulates per-URL classifications into the grouping tree, plus the
/// list of URLs whose fetch failed. Every processed URL lands in exactly
/// one of the two.
#[derive(Default)]
pub struct Aggregator {
    tree: GroupingTree,
    unreachable: Vec<String>,
    sorted: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, url: &str, classification: &Classification) {
        self.tree
            .entry(classification.content_type.clone())
            .or_default()
            .entry(classification.domain_category.clone())
            .or_default()
            .entry(classification.theme.clone())
            .or_default()
            .push(url.to_string());
        self.sorted += 1;
    }

    pub fn record_unreachable(&mut self, url: &str) {
        self.unreachable.push(url.to_string());
    }

    pub fn sorted_count(&self) -> usize {
        self.sorted
    }

    pub fn unreachable_count(&self) -> usize {
        self.unreachable.len()
    }

    /// Final snapshot, taken once after all bookmarks are processed.
    pub fn export(self) -> (GroupingTree, Vec<String>) {
        (self.tree, self.unreachable)
    }
}
