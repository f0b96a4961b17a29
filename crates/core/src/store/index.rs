use std::collections::{BTreeSet, HashMap};
use trends_id::DocumentId;

/// In-memory inverted index from keyword to document ids for one collection.
///
/// Matching is exact and case-sensitive, like an equality match on an array element.
#[derive(Debug, Default, Clone)]
pub struct KeywordIndex {
    by_keyword: HashMap<String, BTreeSet<DocumentId>>,
}

impl KeywordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: &DocumentId, keywords: &BTreeSet<String>) {
        for keyword in keywords {
            self.by_keyword
                .entry(keyword.clone())
                .or_default()
                .insert(id.clone());
        }
    }

    pub fn remove(&mut self, id: &DocumentId, keywords: &BTreeSet<String>) {
        for keyword in keywords {
            if let Some(ids) = self.by_keyword.get_mut(keyword) {
                ids.remove(id);
                if ids.is_empty() {
                    self.by_keyword.remove(keyword);
                }
            }
        }
    }

    /// Swaps the keywords of `id` from `old` to `new`.
    pub fn update(&mut self, id: &DocumentId, old: &BTreeSet<String>, new: &BTreeSet<String>) {
        self.remove(id, old);
        self.insert(id, new);
    }

    /// Ids tagged with `keyword`, in ascending order.
    pub fn lookup(&self, keyword: &str) -> Vec<DocumentId> {
        self.by_keyword
            .get(keyword)
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> DocumentId {
        DocumentId::parse(s).unwrap()
    }

    fn keywords(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_lookup_is_exact_match() {
        let mut index = KeywordIndex::new();
        index.insert(&id("b"), &keywords(&["cancer", "BRCA1"]));
        index.insert(&id("a"), &keywords(&["cancer"]));

        assert_eq!(index.lookup("cancer"), vec![id("a"), id("b")]);
        assert_eq!(index.lookup("BRCA1"), vec![id("b")]);
        assert!(index.lookup("brca1").is_empty());
        assert!(index.lookup("canc").is_empty());
    }

    #[test]
    fn test_update_moves_document_between_keywords() {
        let mut index = KeywordIndex::new();
        let old = keywords(&["asthma", "copd"]);
        index.insert(&id("a"), &old);

        index.update(&id("a"), &old, &keywords(&["copd", "emphysema"]));

        assert!(index.lookup("asthma").is_empty());
        assert_eq!(index.lookup("copd"), vec![id("a")]);
        assert_eq!(index.lookup("emphysema"), vec![id("a")]);
        assert!(!index.by_keyword.contains_key("asthma"));
        assert_eq!(index.by_keyword.len(), 2);
    }
}
