//! GraphQL Remote Data Service
//!
//! Queries and mutations are plain JSON POSTs. The creation feed uses the same
//! endpoint with `Accept: text/event-stream` and reads GraphQL-over-SSE frames.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;

use crate::config::{AuthMode, ServiceConfig};
use crate::domain::{Item, ItemId, NewItem};
use crate::error::{ConfigError, RemoteError, RemoteResult};
use super::documents::{self, GraphQlRequest, GraphQlResponse};
use super::sse::{SseDecoder, SseFrame};
use super::traits::{ItemSubscription, RemoteDataService};

const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Clone)]
enum Credential {
    ApiKey(String),
    Token(String),
}

/// Client for a managed GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct GraphQlService {
    client: Client,
    endpoint: String,
    credential: Credential,
    timeout: Duration,
}

impl GraphQlService {
    pub fn new(config: &ServiceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let credential = match config.auth_mode {
            AuthMode::ApiKey => Credential::ApiKey(config.api_key.clone().unwrap_or_default()),
            AuthMode::UserPool => Credential::Token(config.auth_token.clone().unwrap_or_default()),
        };
        Ok(Self {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
            credential,
            timeout: config.request_timeout(),
        })
    }

    fn post(&self) -> RequestBuilder {
        let request = self.client.post(&self.endpoint);
        match &self.credential {
            Credential::ApiKey(key) => request.header(API_KEY_HEADER, key),
            Credential::Token(token) => request.header(AUTHORIZATION, token),
        }
    }

    async fn execute<V>(&self, body: &GraphQlRequest<'_, V>) -> RemoteResult<GraphQlResponse>
    where
        V: Serialize + Sync,
    {
        let response = self
            .post()
            .json(body)
            .timeout(self.timeout)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }
}

async fn ensure_success(response: Response) -> RemoteResult<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(RemoteError::Status { status, body })
}

fn decode_frame_data(data: &str) -> RemoteResult<Item> {
    let response: GraphQlResponse = serde_json::from_str(data)?;
    documents::decode_event(response)
}

enum FrameStep {
    Deliver(RemoteResult<Item>),
    Complete,
    Skip,
}

fn frame_step(frame: SseFrame) -> FrameStep {
    match frame.event.as_str() {
        "next" | "message" => FrameStep::Deliver(decode_frame_data(&frame.data)),
        "error" => FrameStep::Deliver(Err(RemoteError::Feed(frame.data))),
        "complete" => FrameStep::Complete,
        _ => FrameStep::Skip,
    }
}

#[async_trait]
impl RemoteDataService for GraphQlService {
    async fn list(&self, limit: usize) -> RemoteResult<Vec<Item>> {
        let response = self.execute(&documents::list_request(limit)).await?;
        documents::decode_list(response)
    }

    async fn create(&self, item: &NewItem) -> RemoteResult<Item> {
        let response = self.execute(&documents::create_request(item)).await?;
        documents::decode_created(response)
    }

    async fn delete(&self, id: &ItemId) -> RemoteResult<()> {
        let response = self.execute(&documents::delete_request(id)).await?;
        documents::decode_deleted(response)
    }

    async fn subscribe_on_create(&self) -> RemoteResult<ItemSubscription> {
        // No request timeout: the feed stays open for the whole view session
        let response = self
            .post()
            .header(ACCEPT, "text/event-stream")
            .json(&documents::subscribe_request())
            .send()
            .await?;
        let response = ensure_success(response).await?;
        tracing::debug!(endpoint = %self.endpoint, "Creation feed connected");

        let events = async_stream::stream! {
            let mut chunks = response.bytes_stream();
            let mut decoder = SseDecoder::new();
            'feed: loop {
                let chunk = match chunks.next().await {
                    Some(Ok(chunk)) => chunk,
                    Some(Err(e)) => {
                        yield Err(RemoteError::Http(e));
                        break 'feed;
                    }
                    None => {
                        if let Some(FrameStep::Deliver(event)) = decoder.finish().map(frame_step) {
                            yield event;
                        }
                        break 'feed;
                    }
                };
                for frame in decoder.push(&chunk) {
                    match frame_step(frame) {
                        FrameStep::Deliver(event) => {
                            yield event;
                        }
                        FrameStep::Complete => break 'feed,
                        FrameStep::Skip => {}
                    }
                }
            }
        };
        Ok(ItemSubscription::new(events))
    }
}
