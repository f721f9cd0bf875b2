use http::header::{self, HeaderMap, HeaderValue};
use http::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{error, info};
use url::Url;

use crate::config::{ClientConfiguration, HttpLoggingLevel, HTTP_TIMEOUT};
use crate::error::{Error, Result};
use crate::models::run::{Run, RunCreateRequest};
use crate::models::thread::{MessageCreateRequest, MessageList, Thread, ThreadMessage};
use crate::models::{ChatRequest, ChatResponse, ErrorResponse};

use super::api::OpenAiApi;

const ASSISTANTS_BETA_HEADER: &str = "OpenAI-Beta";
const ASSISTANTS_BETA_VALUE: &str = "assistants=v1";

/// Plain HTTP mapping of the chat and assistants endpoints.
///
/// Listing messages and retrieving a run are sent as POST, the same as every other call.
pub struct OpenAiService {
    http_client: reqwest::Client,
    base_url: String,
    authorization: HeaderValue,
    logging_level: HttpLoggingLevel,
}

impl OpenAiService {
    pub fn new(config: &ClientConfiguration) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(crate::user_agent())
            .timeout(HTTP_TIMEOUT)
            .connect_timeout(HTTP_TIMEOUT)
            .read_timeout(HTTP_TIMEOUT);

        if let Some(proxy) = &config.http.http_proxy {
            let proxy_url = Url::parse(&proxy.url())
                .map_err(|e| Error::Configuration(format!("Invalid proxy {}: {}", proxy.url(), e)))?;
            let proxy = reqwest::Proxy::all(proxy_url.as_str())
                .map_err(|e| Error::Configuration(format!("Invalid proxy {}: {}", proxy_url, e)))?;
            builder = builder.proxy(proxy);
        }

        Url::parse(&config.base_url).map_err(|e| {
            Error::Configuration(format!("Invalid base URL {}: {}", config.base_url, e))
        })?;

        let mut authorization =
            HeaderValue::from_str(&format!("Bearer {}", config.auth_bearer_token))
                .map_err(|e| Error::Configuration(format!("Invalid bearer token: {}", e)))?;
        authorization.set_sensitive(true);

        Ok(OpenAiService {
            http_client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            authorization,
            logging_level: config.http.logging_level,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<B, T>(&self, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let body = body.map(serde_json::to_string).transpose()?;

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, self.authorization.clone());
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            ASSISTANTS_BETA_HEADER,
            HeaderValue::from_static(ASSISTANTS_BETA_VALUE),
        );

        let mut request = self.http_client.request(Method::POST, &url).headers(headers);
        if let Some(body) = &body {
            request = request.body(body.clone());
        }
        let request = request.build()?;

        self.log_request(&request, body.as_deref());

        let response = self.http_client.execute(request).await.map_err(|e| {
            error!("Error sending request to {}: {}", url, e);
            e
        })?;

        let status = response.status();
        let response_headers = response.headers().clone();
        let response_text = response.text().await?;

        self.log_response(&url, status, &response_headers, &response_text);

        if !status.is_success() {
            error!("API returned error status {} for {}", status, url);
            let message = serde_json::from_str::<ErrorResponse>(&response_text)
                .ok()
                .map(|parsed| parsed.error.message);
            return Err(Error::Api {
                status: status.as_u16(),
                message,
                body: response_text,
            });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            error!(
                "Error parsing response JSON from {}: {}\nRaw response: {}",
                url, e, response_text
            );
            Error::Decode(e)
        })
    }

    fn log_request(&self, request: &reqwest::Request, body: Option<&str>) {
        let level = self.logging_level;
        if !level.logs_info() {
            return;
        }
        info!("--> {} {}", request.method(), request.url());
        if level.logs_headers() {
            for (name, value) in request.headers() {
                info!("{}: {}", name, redacted(name, value));
            }
        }
        if level.logs_body() {
            info!("body: {}", body.unwrap_or(""));
        }
    }

    fn log_response(&self, url: &str, status: http::StatusCode, headers: &HeaderMap, body: &str) {
        let level = self.logging_level;
        if !level.logs_info() {
            return;
        }
        info!("<-- {} {}", status, url);
        if level.logs_headers() {
            for (name, value) in headers {
                info!("{}: {}", name, redacted(name, value));
            }
        }
        if level.logs_body() {
            info!("body: {}", body);
        }
    }
}

fn redacted(name: &header::HeaderName, value: &HeaderValue) -> String {
    if *name == header::AUTHORIZATION || value.is_sensitive() {
        "<redacted>".to_string()
    } else {
        value.to_str().unwrap_or("<binary>").to_string()
    }
}

impl OpenAiApi for OpenAiService {
    async fn chat_completions(&self, request: &ChatRequest) -> Result<ChatResponse> {
        self.post("/chat/completions", Some(request)).await
    }

    async fn create_thread(&self) -> Result<Thread> {
        self.post::<(), _>("/threads", None).await
    }

    async fn create_message(
        &self,
        thread_id: &str,
        request: &MessageCreateRequest,
    ) -> Result<ThreadMessage> {
        self.post(&format!("/threads/{}/messages", thread_id), Some(request))
            .await
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>> {
        let list: MessageList = self
            .post::<(), _>(&format!("/threads/{}/messages", thread_id), None)
            .await?;
        Ok(list.into_messages())
    }

    async fn create_run(&self, thread_id: &str, request: &RunCreateRequest) -> Result<Run> {
        self.post(&format!("/threads/{}/runs", thread_id), Some(request))
            .await
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        self.post::<(), _>(&format!("/threads/{}/runs/{}", thread_id, run_id), None)
            .await
    }
}
