pub mod metrics;

use std::sync::Arc;

use async_channel::{Receiver, Sender};
use chrono::Utc;
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    config::BenchmarkConfig,
    dataset::RouteDataset,
    entities::{EvaluationResults, Prediction, RouteQuery},
    error::{invalid_state_error, Error},
    models::DynModel,
};

type PredictionResult = (usize, Result<Prediction, Error>);

#[derive(Debug)]
pub struct RouteEvaluator {
    config: BenchmarkConfig,
}

impl RouteEvaluator {
    pub fn new(config: BenchmarkConfig) -> Self {
        tracing::debug!("route evaluator initialized");
        Self { config }
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    #[tracing::instrument(skip_all, fields(model = %model.name(), routes = dataset.len()))]
    pub async fn evaluate(
        &self,
        model: DynModel,
        dataset: &RouteDataset,
    ) -> Result<EvaluationResults, Error> {
        let predictions = self.collect_predictions(model.clone(), dataset).await?;

        let mut failed_predictions = 0;
        let mut routes = Vec::with_capacity(dataset.len());

        for (route, result) in dataset.iter().zip(predictions) {
            let score = match result {
                Ok(prediction) => metrics::score_route(route, &prediction, None, &self.config),
                Err(err) => {
                    failed_predictions += 1;
                    metrics::score_route(
                        route,
                        &Prediction::empty(),
                        Some(err.message),
                        &self.config,
                    )
                }
            };
            routes.push(score);
        }

        let metrics = metrics::aggregate(&routes);
        let overall_score = metrics::overall_score(&metrics, &self.config);

        tracing::info!(
            "evaluation completed for {}: {} routes, {} failed",
            model.name(),
            routes.len(),
            failed_predictions
        );

        Ok(EvaluationResults {
            run_id: Uuid::new_v4(),
            model_name: model.name().to_string(),
            dataset_size: dataset.len(),
            evaluated_at: Utc::now(),
            metrics,
            overall_score,
            failed_predictions,
            routes,
        })
    }

    // Results come back in completion order and are slotted by index.
    async fn collect_predictions(
        &self,
        model: DynModel,
        dataset: &RouteDataset,
    ) -> Result<Vec<Result<Prediction, Error>>, Error> {
        let total = dataset.len();
        if total == 0 {
            return Ok(Vec::new());
        }

        let queries: Arc<Vec<RouteQuery>> = Arc::new(dataset.iter().map(|r| r.query()).collect());

        let (job_tx, job_rx): (Sender<usize>, Receiver<usize>) = async_channel::unbounded();
        let (result_tx, result_rx): (Sender<PredictionResult>, Receiver<PredictionResult>) =
            async_channel::unbounded();

        let mut handles = vec![];
        for _ in 0..self.config.concurrency().min(total) {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            let model = model.clone();
            let queries = queries.clone();

            let handle = tokio::spawn(
                async move {
                    while let Ok(idx) = job_rx.recv().await {
                        let result = model.predict(&queries[idx]).await;
                        if result_tx.send((idx, result)).await.is_err() {
                            break;
                        }
                    }
                }
                .instrument(tracing::Span::current()),
            );

            handles.push(handle);
        }
        drop(result_tx);

        for idx in 0..total {
            job_tx
                .send(idx)
                .await
                .map_err(|_| invalid_state_error())?;
        }
        job_tx.close();

        let mut slots: Vec<Option<Result<Prediction, Error>>> = (0..total).map(|_| None).collect();

        while let Ok((idx, result)) = result_rx.recv().await {
            if let Err(err) = &result {
                tracing::warn!(
                    "prediction failed for route {}: {}",
                    queries[idx].route_id,
                    err
                );

                if self.config.fail_fast {
                    for handle in &handles {
                        handle.abort();
                    }
                    return result.map(|_| Vec::new());
                }
            }

            slots[idx] = Some(result);
        }

        futures::future::join_all(handles).await;

        slots
            .into_iter()
            .map(|slot| slot.ok_or_else(invalid_state_error))
            .collect()
    }
}

pub async fn evaluate_model(
    model: DynModel,
    dataset: &RouteDataset,
    config: Option<BenchmarkConfig>,
) -> Result<EvaluationResults, Error> {
    RouteEvaluator::new(config.unwrap_or_default())
        .evaluate(model, dataset)
        .await
}
