//! Ollama text-generation client.
//!
//! Talks to a self-hosted Ollama server over its HTTP API. Streaming
//! replies arrive as newline-delimited JSON objects carrying a `response`
//! fragment and a `done` flag.

use std::fmt::Display;
use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use aura_core::ports::{
    GenerationError, GenerationOptions, GenerationRequest, ModelInfo, TextGenerator, TextStream,
};

/// Ollama client configuration.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Server root, e.g. `http://192.168.1.100:11434`.
    pub base_url: String,
    /// Model used when a request does not name one.
    pub model: String,
    /// Limit for non-streaming calls. Streams are only bounded by the
    /// connect timeout.
    pub request_timeout: Duration,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://192.168.1.100:11434".to_string(),
            model: "llama3.2".to_string(),
            request_timeout: Duration::from_secs(120),
        }
    }
}

#[derive(Serialize)]
struct GenerateBody<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "GenerationOptions::is_empty")]
    options: GenerationOptions,
}

#[derive(Debug, Deserialize)]
struct GenerateChunk {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<OllamaModel>,
}

#[derive(Deserialize)]
struct OllamaModel {
    name: String,
    #[serde(default)]
    size: Option<u64>,
    #[serde(default)]
    modified_at: Option<String>,
}

impl From<OllamaModel> for ModelInfo {
    fn from(m: OllamaModel) -> Self {
        Self {
            name: m.name,
            size: m.size,
            modified_at: m.modified_at,
        }
    }
}

/// HTTP client for an Ollama server.
pub struct OllamaClient {
    client: Client,
    config: OllamaConfig,
}

impl OllamaClient {
    pub fn new(config: OllamaConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn post_generate(
        &self,
        request: &GenerationRequest,
        stream: bool,
    ) -> Result<reqwest::Response, GenerationError> {
        let model = request.model.as_deref().unwrap_or(&self.config.model);
        let body = GenerateBody {
            model,
            prompt: &request.prompt,
            stream,
            options: request.options.clone(),
        };

        tracing::debug!(model, stream, prompt_len = request.prompt.len(), "Calling Ollama");

        let mut builder = self.client.post(self.url("/api/generate")).json(&body);
        if !stream {
            builder = builder.timeout(self.config.request_timeout);
        }
        let response = builder.send().await.map_err(transport)?;
        check_status(response).await
    }
}

fn transport(e: reqwest::Error) -> GenerationError {
    tracing::error!(error = %e, "Ollama request failed");
    GenerationError::Transport(e.to_string())
}

/// Non-success statuses become `Upstream`; the body is only logged.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GenerationError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::error!(status = status.as_u16(), body = %body, "Ollama returned an error");
    Err(GenerationError::Upstream {
        status: status.as_u16(),
    })
}

fn decode_chunk(line: &[u8]) -> Result<Option<GenerateChunk>, GenerationError> {
    let line = String::from_utf8_lossy(line);
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let chunk: GenerateChunk =
        serde_json::from_str(line).map_err(|e| GenerationError::Decode(e.to_string()))?;
    if let Some(error) = chunk.error {
        tracing::error!(error = %error, "Ollama stream reported an error");
        return Err(GenerationError::Decode(error));
    }
    Ok(Some(chunk))
}

struct NdjsonState<S> {
    inner: Pin<Box<S>>,
    buffer: Vec<u8>,
    finished: bool,
}

/// Turn a byte stream of NDJSON chunks into response fragments.
///
/// Chunks may split lines anywhere. The stream ends at the first `done`
/// chunk or the first error.
fn ndjson_fragments<S, B, E>(inner: S) -> TextStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send,
    E: Display + Send,
{
    let state = NdjsonState {
        inner: Box::pin(inner),
        buffer: Vec::new(),
        finished: false,
    };

    futures::stream::unfold(state, |mut st| async move {
        loop {
            if st.finished {
                return None;
            }

            let line = match st.buffer.iter().position(|b| *b == b'\n') {
                Some(pos) => Some(st.buffer.drain(..=pos).collect::<Vec<u8>>()),
                None => None,
            };

            if let Some(line) = line {
                match decode_chunk(&line) {
                    Ok(None) => continue,
                    Ok(Some(chunk)) => {
                        st.finished = chunk.done;
                        if chunk.response.is_empty() {
                            continue;
                        }
                        return Some((Ok(chunk.response), st));
                    }
                    Err(e) => {
                        st.finished = true;
                        return Some((Err(e), st));
                    }
                }
            }

            match st.inner.next().await {
                Some(Ok(bytes)) => st.buffer.extend_from_slice(bytes.as_ref()),
                Some(Err(e)) => {
                    st.finished = true;
                    return Some((Err(GenerationError::Transport(e.to_string())), st));
                }
                None => {
                    st.finished = true;
                    let rest = std::mem::take(&mut st.buffer);
                    return match decode_chunk(&rest) {
                        Ok(Some(chunk)) if !chunk.response.is_empty() => {
                            Some((Ok(chunk.response), st))
                        }
                        Ok(_) => None,
                        Err(e) => Some((Err(e), st)),
                    };
                }
            }
        }
    })
    .boxed()
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        let response = self.post_generate(&request, false).await?;
        let chunk: GenerateChunk = response
            .json()
            .await
            .map_err(|e| GenerationError::Decode(e.to_string()))?;
        if let Some(error) = chunk.error {
            return Err(GenerationError::Decode(error));
        }

        tracing::debug!(reply_len = chunk.response.len(), "Ollama reply received");
        Ok(chunk.response)
    }

    async fn generate_stream(
        &self,
        request: GenerationRequest,
    ) -> Result<TextStream, GenerationError> {
        let response = self.post_generate(&request, true).await?;
        Ok(ndjson_fragments(response.bytes_stream()))
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, GenerationError> {
        let response = self
            .client
            .get(self.url("/api/tags"))
            .timeout(self.config.request_timeout)
            .send()
            .await
            .map_err(transport)?;
        let tags: TagsResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| GenerationError::Decode(e.to_string()))?;

        Ok(tags.models.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;
    use mockito::Matcher;
    use serde_json::json;

    fn client(server: &mockito::Server) -> OllamaClient {
        OllamaClient::new(OllamaConfig {
            base_url: server.url(),
            model: "llama3.2".to_string(),
            request_timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_generate_returns_response_text() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/api/generate")
            .match_body(Matcher::PartialJson(json!({
                "model": "llama3.2",
                "prompt": "Say hi",
                "stream": false,
                "options": { "temperature": 0.5 }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"model":"llama3.2","response":"Hi there","done":true}"#)
            .expect(1)
            .create_async()
            .await;

        let request = GenerationRequest::new("Say hi").with_options(GenerationOptions {
            temperature: Some(0.5),
            ..Default::default()
        });
        let reply = client(&server).generate(request).await.unwrap();

        assert_eq!(reply, "Hi there");
    }

    #[tokio::test]
    async fn test_generate_maps_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/api/generate")
            .with_status(500)
            .with_body(r#"{"error":"model not loaded"}"#)
            .create_async()
            .await;

        let result = client(&server).generate(GenerationRequest::new("x")).await;

        assert!(matches!(result, Err(GenerationError::Upstream { status: 500 })));
    }

    #[tokio::test]
    async fn test_generate_stream_concatenates_fragments() {
        let mut server = mockito::Server::new_async().await;
        let body = concat!(
            r#"{"response":"Moon ","done":false}"#,
            "\n",
            r#"{"response":"rituals","done":false}"#,
            "\n",
            r#"{"response":"","done":true}"#,
            "\n"
        );
        let _m = server
            .mock("POST", "/api/generate")
            .match_body(Matcher::PartialJson(json!({ "stream": true })))
            .with_status(200)
            .with_header("content-type", "application/x-ndjson")
            .with_body(body)
            .create_async()
            .await;

        let stream = client(&server)
            .generate_stream(GenerationRequest::new("Write"))
            .await
            .unwrap();
        let parts: Vec<String> = stream.try_collect().await.unwrap();

        assert_eq!(parts.concat(), "Moon rituals");
    }

    #[tokio::test]
    async fn test_list_models() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/tags")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"models":[{"name":"llama3.2:latest","size":2019393189,"modified_at":"2024-10-01T10:00:00Z"}]}"#)
            .create_async()
            .await;

        let models = client(&server).list_models().await.unwrap();

        assert_eq!(models.len(), 1);
        assert_eq!(models[0].name, "llama3.2:latest");
        assert_eq!(models[0].size, Some(2019393189));
    }

    #[tokio::test]
    async fn test_ndjson_lines_split_across_chunks() {
        let chunks: Vec<Result<&'static [u8], std::io::Error>> = vec![
            Ok(br#"{"response":"Bre"#.as_slice()),
            Ok(b"athe\",\"done\":false}\n{\"resp".as_slice()),
            Ok(br#"onse":" in","done":true}"#.as_slice()),
            Ok(b"\n{\"response\":\"ignored\",\"done\":false}\n".as_slice()),
        ];

        let parts: Vec<String> = ndjson_fragments(futures::stream::iter(chunks))
            .try_collect()
            .await
            .unwrap();

        assert_eq!(parts, vec!["Breathe", " in"]);
    }

    #[tokio::test]
    async fn test_ndjson_error_line_ends_stream() {
        let chunks: Vec<Result<&'static [u8], std::io::Error>> = vec![Ok(
            b"{\"response\":\"Hi\",\"done\":false}\n{\"error\":\"out of memory\"}\n".as_slice(),
        )];

        let results: Vec<Result<String, GenerationError>> =
            ndjson_fragments(futures::stream::iter(chunks)).collect().await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap(), "Hi");
        assert!(matches!(results[1], Err(GenerationError::Decode(_))));
    }
}
