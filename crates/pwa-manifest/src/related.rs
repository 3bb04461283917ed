use serde::Serialize;
use serde_json::{Map, Value};

/// A native application on another platform that provides similar functionality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedApplication {
    platform: String,
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
}

impl RelatedApplication {
    pub fn new(platform: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            url: url.into(),
            id: None,
        }
    }

    /// Set the platform-specific store ID. An empty string leaves the ID unset.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.id = (!id.is_empty()).then_some(id);
        self
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn render(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("platform".to_owned(), Value::from(self.platform.as_str()));
        map.insert("url".to_owned(), Value::from(self.url.as_str()));
        if let Some(id) = &self.id {
            map.insert("id".to_owned(), Value::from(id.as_str()));
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAY_URL: &str = "https://play.google.com/store/apps/details?id=com.example.app1";

    #[test]
    fn renders_id_when_present() {
        let app = RelatedApplication::new("play", PLAY_URL).with_id("com.example.app1");
        let rendered = app.render();
        let keys: Vec<&String> = rendered.keys().collect();
        assert_eq!(keys, vec!["platform", "url", "id"]);
        assert_eq!(rendered["id"], "com.example.app1");
    }

    #[test]
    fn omits_missing_id() {
        let app = RelatedApplication::new(
            "itunes",
            "https://itunes.apple.com/app/example-app1/id123456789",
        );
        assert_eq!(
            serde_json::to_string(&app.render()).unwrap(),
            r#"{"platform":"itunes","url":"https://itunes.apple.com/app/example-app1/id123456789"}"#
        );
    }

    #[test]
    fn empty_id_is_treated_as_absent() {
        let app = RelatedApplication::new("play", PLAY_URL).with_id("");
        assert_eq!(app.id(), None);
        assert!(!app.render().contains_key("id"));
    }

    #[test]
    fn fields_are_stored_verbatim() {
        let app = RelatedApplication::new("  webapp ", "not a url");
        assert_eq!(app.platform(), "  webapp ");
        assert_eq!(app.url(), "not a url");
    }
}
