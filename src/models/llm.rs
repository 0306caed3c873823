use std::env;
use std::time::Duration;

use async_trait::async_trait;

use crate::{
    config::BenchmarkConfig,
    entities::{Prediction, RouteQuery},
    error::Error,
    external::chat_completions::{self, Message, Request},
    models::{prompt, RouteModel},
};

pub struct LlmModel {
    model_name: String,
    api_key: Option<String>,
    api_base: String,
    temperature: f64,
    max_tokens: u32,
    client: reqwest::Client,
}

impl LlmModel {
    #[tracing::instrument(name = "LlmModel::new", skip(api_key, config))]
    pub fn new(
        model_name: &str,
        api_key: Option<String>,
        config: &BenchmarkConfig,
    ) -> Result<Self, Error> {
        let api_key = api_key.or_else(|| {
            env::var("TURNBACK_API_KEY")
                .ok()
                .filter(|key| !key.is_empty())
        });

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let api_base = config.api_base();

        tracing::info!("initialized client for {} at {}", model_name, api_base);

        Ok(Self {
            model_name: model_name.into(),
            api_key,
            api_base,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            client,
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl RouteModel for LlmModel {
    fn name(&self) -> &str {
        &self.model_name
    }

    fn prepare_input(&self, query: &RouteQuery) -> String {
        prompt::reverse_route_prompt(query)
    }

    #[tracing::instrument(skip(self, query), fields(route_id = %query.route_id))]
    async fn predict(&self, query: &RouteQuery) -> Result<Prediction, Error> {
        let request = Request {
            model: self.model_name.clone(),
            messages: vec![
                Message::system(prompt::SYSTEM_PROMPT),
                Message::user(self.prepare_input(query)),
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let completion = chat_completions::chat_completion(
            &self.client,
            &self.api_base,
            self.api_key.as_deref(),
            &request,
        )
        .await?;

        let prediction = prompt::parse_prediction(&completion);

        tracing::debug!(
            "generated prediction with {} waypoints",
            prediction.intermediate_points.len()
        );

        Ok(prediction)
    }
}
