use serde::{Deserialize, Serialize};

use crate::error::{invalid_input_error, upstream_error, Error};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Request {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f64,
    pub max_tokens: u32,
}

#[derive(Clone, Debug, Deserialize)]
struct Response {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Clone, Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Clone, Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[tracing::instrument(skip(client, api_key, request), fields(model = %request.model))]
pub async fn chat_completion(
    client: &reqwest::Client,
    api_base: &str,
    api_key: Option<&str>,
    request: &Request,
) -> Result<String, Error> {
    let url = format!("{}/chat/completions", api_base.trim_end_matches('/'));

    let mut builder = client.post(url).json(request);
    if let Some(key) = api_key {
        builder = builder.bearer_auth(key);
    }

    let res = builder.send().await?;

    let status_code = res.status().as_u16();

    if (400..500).contains(&status_code) {
        let body = res.text().await.unwrap_or_default();
        tracing::warn!("chat completion rejected (HTTP {}): {}", status_code, body);
        return Err(invalid_input_error(format!(
            "chat completion rejected with HTTP {}",
            status_code
        )));
    } else if status_code != 200 {
        return Err(upstream_error(format!(
            "chat completion failed with HTTP {}",
            status_code
        )));
    }

    let data: Response = res.json().await?;

    extract_content(data)
}

fn extract_content(data: Response) -> Result<String, Error> {
    data.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or_else(|| upstream_error("chat completion returned no content"))
}
