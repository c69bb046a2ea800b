//! Request body and keyword validation

use serde::Deserialize;

use crate::extraction::errors::ScrapeError;
use crate::utils::{MAX_KEYWORD_LENGTH, char_len};

/// Body of `POST /api/scrape`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub keyword: Option<String>,
}

/// Trim and check a keyword before any pipeline work starts
pub fn validate_keyword(keyword: Option<&str>) -> Result<String, ScrapeError> {
    let keyword = keyword.map(str::trim).unwrap_or_default();

    if keyword.is_empty() {
        return Err(ScrapeError::InvalidInput("搜索关键词不能为空".to_string()));
    }
    if char_len(keyword) > MAX_KEYWORD_LENGTH {
        return Err(ScrapeError::InvalidInput(format!(
            "搜索关键词不能超过{MAX_KEYWORD_LENGTH}个字符"
        )));
    }

    Ok(keyword.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_accepts() {
        assert_eq!(validate_keyword(Some("  副业 ")).unwrap(), "副业");
    }

    #[test]
    fn rejects_missing_empty_and_blank() {
        for input in [None, Some(""), Some("   \t")] {
            assert!(matches!(validate_keyword(input), Err(ScrapeError::InvalidInput(_))));
        }
    }

    #[test]
    fn length_counts_characters() {
        let at_limit = "字".repeat(MAX_KEYWORD_LENGTH);
        assert!(validate_keyword(Some(&at_limit)).is_ok());
        let over = "字".repeat(MAX_KEYWORD_LENGTH + 1);
        assert!(validate_keyword(Some(&over)).is_err());
    }

    #[test]
    fn body_without_keyword_deserializes() {
        let req: SearchRequest = serde_json::from_str("{}").unwrap();
        assert!(req.keyword.is_none());
    }
}
