use serde::{Deserialize, Serialize};
use trendscout_api::RepositoryNode;

/// One row block in the trending table
///
/// Empty strings stand in for "no description" and "no language" so the
/// renderer never has to care.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub owner: String,
    pub name: String,
    pub url: String,
    pub description: String,
    pub stars: u64,
    pub forks: u64,
    pub language: String,
}

impl RepositorySummary {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl From<RepositoryNode> for RepositorySummary {
    fn from(node: RepositoryNode) -> Self {
        Self {
            owner: node.owner.login,
            name: node.name,
            url: node.url,
            description: node.description.unwrap_or_default(),
            stars: node.stargazer_count,
            forks: node.fork_count,
            language: node.primary_language.map(|l| l.name).unwrap_or_default(),
        }
    }
}

/// A single page of trending results plus how many exist server-side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingPage {
    items: Vec<RepositorySummary>,
    total: usize,
}

impl TrendingPage {
    /// `total` is clamped so it never undercounts what we actually got
    pub fn new(items: Vec<RepositorySummary>, total: usize) -> Self {
        let total = total.max(items.len());
        Self { items, total }
    }

    pub fn items(&self) -> &[RepositorySummary] {
        &self.items
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Matches that exist but weren't returned in this page
    pub fn remaining(&self) -> usize {
        self.total - self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str) -> RepositorySummary {
        RepositorySummary {
            owner: "octo".to_string(),
            name: name.to_string(),
            url: format!("https://github.com/octo/{}", name),
            description: String::new(),
            stars: 1,
            forks: 0,
            language: String::new(),
        }
    }

    #[test]
    fn test_full_name() {
        assert_eq!(repo("cat").full_name(), "octo/cat");
    }

    #[test]
    fn test_remaining_count() {
        let page = TrendingPage::new(vec![repo("a"), repo("b")], 40);
        assert_eq!(page.total(), 40);
        assert_eq!(page.remaining(), 38);
    }

    #[test]
    fn test_total_never_below_item_count() {
        let page = TrendingPage::new(vec![repo("a"), repo("b"), repo("c")], 1);
        assert_eq!(page.total(), 3);
        assert_eq!(page.remaining(), 0);
    }

    #[test]
    fn test_order_is_preserved() {
        let page = TrendingPage::new(vec![repo("z"), repo("a"), repo("m")], 3);
        let names: Vec<_> = page.items().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }
}
