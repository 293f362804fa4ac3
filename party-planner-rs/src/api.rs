//! Remote resource client for the events / rsvps / guests collections.
//!
//! The client owns no state. Every read returns the `data` field of the service's JSON envelope;
//! writes report only success or failure.

use reqwest::{Method, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::model::{Event, Guest, Id, NewEvent, Rsvp};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("{method} {url} failed: {source}")]
    Network {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{method} {url} returned HTTP {status}")]
    Status {
        method: Method,
        url: String,
        status: u16,
    },
    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Requests are not deduplicated or cancelled; callers may have several in flight at once.
#[allow(async_fn_in_trait)] // single-threaded, nobody needs the futures to be Send
pub trait Resources {
    async fn list_events(&self) -> Result<Vec<Event>, TransportError>;
    async fn get_event(&self, id: &Id) -> Result<Event, TransportError>;
    async fn create_event(&self, event: &NewEvent) -> Result<(), TransportError>;
    async fn delete_event(&self, id: &Id) -> Result<(), TransportError>;
    async fn list_rsvps(&self) -> Result<Vec<Rsvp>, TransportError>;
    async fn list_guests(&self) -> Result<Vec<Guest>, TransportError>;
}

/// [`Resources`] over HTTP. On wasm32 reqwest goes through the browser's `fetch`.
#[derive(Clone, Debug)]
pub struct HttpResources {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpResources {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&NewEvent>,
    ) -> Result<Response, TransportError> {
        let mut request = self.client.request(method.clone(), url);
        if let Some(body) = body {
            // sets Content-Type: application/json
            request = request.json(body);
        }
        let response = request
            .send()
            .await
            .map_err(|source| TransportError::Network {
                method: method.clone(),
                url: url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(TransportError::Status {
                method,
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }
        Ok(response)
    }

    async fn read<T: DeserializeOwned>(&self, path: &str) -> Result<T, TransportError> {
        let url = self.config.resource_url(path);
        let response = self.send(Method::GET, &url, None).await?;
        let text = response
            .text()
            .await
            .map_err(|source| TransportError::Network {
                method: Method::GET,
                url: url.clone(),
                source,
            })?;
        parse_envelope(&url, &text)
    }
}

fn parse_envelope<T: DeserializeOwned>(url: &str, text: &str) -> Result<T, TransportError> {
    serde_json::from_str::<Envelope<T>>(text)
        .map(|envelope| envelope.data)
        .map_err(|source| TransportError::Decode {
            url: url.to_string(),
            source,
        })
}

impl Resources for HttpResources {
    async fn list_events(&self) -> Result<Vec<Event>, TransportError> {
        self.read("/events").await
    }

    async fn get_event(&self, id: &Id) -> Result<Event, TransportError> {
        self.read(&format!("/events/{id}")).await
    }

    async fn create_event(&self, event: &NewEvent) -> Result<(), TransportError> {
        let url = self.config.resource_url("/events");
        // the created record is not trusted; callers re-fetch the list instead
        self.send(Method::POST, &url, Some(event)).await.map(drop)
    }

    async fn delete_event(&self, id: &Id) -> Result<(), TransportError> {
        let url = self.config.resource_url(&format!("/events/{id}"));
        self.send(Method::DELETE, &url, None).await.map(drop)
    }

    async fn list_rsvps(&self) -> Result<Vec<Rsvp>, TransportError> {
        self.read("/rsvps").await
    }

    async fn list_guests(&self) -> Result<Vec<Guest>, TransportError> {
        self.read("/guests").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_envelope_list() {
        let events: Vec<Event> = parse_envelope(
            "/events",
            r#"{"success": true, "data": [
                {"id": 1, "name": "A", "description": "", "date": "2025-01-01T00:00:00.000Z", "location": "X"},
                {"id": 2, "name": "B", "description": "", "date": "2025-01-02T00:00:00.000Z", "location": "Y"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].name, "B");
    }

    #[test]
    fn test_parse_envelope_single_record() {
        let guest: Guest = parse_envelope("/guests/5", r#"{"data": {"id": 5, "name": "Ada"}}"#)
            .unwrap();
        assert_eq!(guest.id, Id::Number(5));
    }

    #[test]
    fn test_parse_envelope_rejects_malformed_json() {
        let err = parse_envelope::<Vec<Guest>>("/guests", "<html>oops</html>").unwrap_err();
        assert!(matches!(err, TransportError::Decode { .. }));
    }

    #[test]
    fn test_parse_envelope_rejects_missing_data() {
        let err = parse_envelope::<Event>("/events/9", r#"{"success": false, "error": "nope"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("/events/9"));
    }
}
