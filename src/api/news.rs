//! News feed endpoint

use super::ApiClient;
use crate::error::Result;
use crate::models::NewsItem;
use serde::Deserialize;

/// The backend has served both a bare array and an `{ items: [...] }`
/// envelope; accept either and normalize.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NewsResponse {
    List(Vec<NewsItem>),
    Wrapped { items: Vec<NewsItem> },
}

impl NewsResponse {
    fn into_items(self) -> Vec<NewsItem> {
        match self {
            NewsResponse::List(items) => items,
            NewsResponse::Wrapped { items } => items,
        }
    }
}

impl ApiClient {
    /// `GET /news?limit=&refresh=`
    pub async fn news(&self, limit: usize, refresh: bool) -> Result<Vec<NewsItem>> {
        let query = [
            ("limit", limit.to_string()),
            ("refresh", refresh.to_string()),
        ];
        let response: NewsResponse = self.get_json("/news", &query).await?;
        Ok(response.into_items())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEM: &str = r#"{"source":"wire","title":"Markets rally","url":"https://example.com/a"}"#;

    #[test]
    fn bare_array_shape_is_accepted() {
        let response: NewsResponse = serde_json::from_str(&format!("[{ITEM}]")).unwrap();
        assert_eq!(response.into_items().len(), 1);
    }

    #[test]
    fn wrapped_items_shape_is_accepted() {
        let response: NewsResponse =
            serde_json::from_str(&format!(r#"{{"items":[{ITEM}]}}"#)).unwrap();
        let items = response.into_items();
        assert_eq!(items[0].title, "Markets rally");
    }
}
