//! Output data structures

use serde::{Deserialize, Serialize};

/// One note as returned to the caller
///
/// Created fresh per request, either by field extraction from a live page
/// or by the mock generator. Items have no identity beyond the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Note title, 6–100 characters
    pub title: String,

    /// Author display name, `未知用户` when unresolved
    pub author: String,

    /// View counter display string, e.g. `3.4万浏览`
    pub view_count: String,

    /// Like counter display string, e.g. `812点赞`
    pub like_count: String,

    /// Absolute note URL, or `#` when no link was found
    pub link: String,

    /// Absolute thumbnail URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl ContentItem {
    /// True when every mandatory display field is non-empty
    #[must_use]
    pub fn is_displayable(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.author.trim().is_empty()
            && !self.view_count.is_empty()
            && !self.like_count.is_empty()
            && !self.link.is_empty()
    }
}
