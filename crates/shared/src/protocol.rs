use serde::{Deserialize, Serialize};

use crate::{domain::Post, error::FetchError};

/// Top-level shape of a subreddit `.json` listing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingEnvelope {
    pub data: ListingData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<ListingChild>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingChild {
    #[serde(default)]
    pub kind: String,
    pub data: Post,
}

impl ListingEnvelope {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, FetchError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn into_posts(self) -> Vec<Post> {
        self.data.children.into_iter().map(|child| child.data).collect()
    }
}
