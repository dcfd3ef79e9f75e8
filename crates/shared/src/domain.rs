use std::fmt;

use serde::{Deserialize, Serialize};

/// A search term with every whitespace character removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query(String);

impl Query {
    /// Returns `None` when nothing is left after whitespace removal.
    pub fn parse(raw: &str) -> Option<Self> {
        let term: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if term.is_empty() {
            None
        } else {
            Some(Self(term))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Zero-based fetch counter, owned locally. Unrelated to the upstream cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Page(pub u32);

impl Page {
    pub const FIRST: Page = Page(0);

    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    pub fn is_first(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of the last item on the most recently received page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CursorToken(pub String);

impl CursorToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CursorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Fullname such as `t3_abc123`; doubles as the pagination cursor.
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub num_comments: u64,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub subreddit: String,
}

impl Post {
    pub fn cursor(&self) -> CursorToken {
        CursorToken(self.name.clone())
    }
}
