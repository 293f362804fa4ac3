use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://fsa-crud-2aa9294fe819.herokuapp.com/api";
const DEFAULT_COHORT: &str = "2503-ftb-et-web-pt";
const DEFAULT_MOUNT_SELECTOR: &str = "#app";

/// Where the CRUD service lives. The cohort segment picks the deployment the events belong to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiConfig {
    pub base_url: String,
    pub cohort: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cohort: DEFAULT_COHORT.to_string(),
        }
    }
}

impl ApiConfig {
    /// `resource_url("/events/3")` -> `{base}/{cohort}/events/3`, skipping empty segments.
    pub fn resource_url(&self, path: &str) -> String {
        [self.base_url.as_str(), self.cohort.as_str(), path]
            .iter()
            .map(|segment| segment.trim_matches('/'))
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("/")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub api: ApiConfig,
    /// CSS selector of the container the whole view is rendered into.
    pub mount_selector: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            mount_selector: DEFAULT_MOUNT_SELECTOR.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_url_defaults() {
        let config = ApiConfig::default();
        assert_eq!(
            config.resource_url("/events"),
            "https://fsa-crud-2aa9294fe819.herokuapp.com/api/2503-ftb-et-web-pt/events"
        );
    }

    #[test]
    fn test_resource_url_normalises_slashes() {
        let config = ApiConfig {
            base_url: "http://localhost:3000/api/".to_string(),
            cohort: "/demo/".to_string(),
        };
        assert_eq!(
            config.resource_url("events/12"),
            "http://localhost:3000/api/demo/events/12"
        );
    }

    #[test]
    fn test_resource_url_empty_cohort() {
        let config = ApiConfig {
            base_url: "https://example.com/api/2503-ftb-et-web-pt/".to_string(),
            cohort: String::new(),
        };
        assert_eq!(
            config.resource_url("/guests"),
            "https://example.com/api/2503-ftb-et-web-pt/guests"
        );
    }

    #[test]
    fn test_partial_json_override_keeps_defaults() {
        let config = AppConfig::from_json(r##"{"api": {"cohort": "2601-demo"}}"##).unwrap();
        assert_eq!(config.api.cohort, "2601-demo");
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.mount_selector, "#app");
    }
}
