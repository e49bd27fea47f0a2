use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tracing::{debug, warn};

use super::assessors::AssessorRegistry;
use super::domain::{ApplicantContext, ComponentScore, DimensionId};

/// Fans the registered assessors out concurrently and joins their scores.
///
/// Each assessor runs on the blocking pool under its own deadline. A deadline
/// miss or a panicking assessor yields an unavailable score for that
/// dimension; the other assessors are unaffected.
///
/// A timed-out assessor is abandoned, not cancelled. Its blocking-pool thread
/// stays occupied until `assess` returns, so an assessor that never returns
/// holds one thread per run. [`AssessmentPipeline::running_assessments`]
/// reports how many are still executing.
#[derive(Debug, Clone)]
pub struct AssessmentPipeline {
    registry: Arc<AssessorRegistry>,
    timeout: Duration,
    running: Arc<AtomicUsize>,
}

/// Counts one executing assessor; released when the blocking closure ends or unwinds.
struct RunningGuard(Arc<AtomicUsize>);

impl RunningGuard {
    fn enter(running: &Arc<AtomicUsize>) -> Self {
        running.fetch_add(1, Ordering::AcqRel);
        Self(Arc::clone(running))
    }
}

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

impl AssessmentPipeline {
    pub fn new(registry: Arc<AssessorRegistry>, timeout: Duration) -> Self {
        Self {
            registry,
            timeout,
            running: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Assessors still executing on the blocking pool, including abandoned ones.
    pub fn running_assessments(&self) -> usize {
        self.running.load(Ordering::Acquire)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn registry(&self) -> &AssessorRegistry {
        &self.registry
    }

    /// Returns once every registered dimension has a score, available or not.
    pub async fn run(
        &self,
        context: Arc<ApplicantContext>,
    ) -> BTreeMap<DimensionId, ComponentScore> {
        let deadline = self.timeout;
        let mut join_set = JoinSet::new();

        for (dimension, assessor) in self.registry.iter() {
            let assessor = Arc::clone(assessor);
            let context = Arc::clone(&context);
            let guard = RunningGuard::enter(&self.running);
            let running = Arc::clone(&self.running);
            join_set.spawn(async move {
                let task = tokio::task::spawn_blocking(move || {
                    let _guard = guard;
                    assessor.assess(&context)
                });
                let score = match tokio::time::timeout(deadline, task).await {
                    Ok(Ok(mut score)) => {
                        score.dimension = dimension;
                        debug!(
                            %dimension,
                            available = score.available,
                            value = score.value,
                            "assessor returned"
                        );
                        score
                    }
                    Ok(Err(error)) => {
                        warn!(%dimension, %error, "assessor failed");
                        ComponentScore::unavailable(dimension, format!("assessor failed: {error}"))
                    }
                    Err(_) => {
                        warn!(
                            %dimension,
                            timeout_ms = deadline.as_millis() as u64,
                            still_running = running.load(Ordering::Acquire),
                            "assessor timed out; its blocking thread is abandoned"
                        );
                        ComponentScore::unavailable(
                            dimension,
                            format!("assessor timed out after {} ms", deadline.as_millis()),
                        )
                    }
                };
                (dimension, score)
            });
        }

        let mut scores = BTreeMap::new();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((dimension, score)) => {
                    scores.insert(dimension, score);
                }
                Err(error) => warn!(%error, "assessment task join error"),
            }
        }

        for dimension in self.registry.dimensions() {
            scores.entry(dimension).or_insert_with(|| {
                ComponentScore::unavailable(dimension, "assessment task did not complete")
            });
        }

        debug!(
            application_id = %context.application_id,
            available = scores.values().filter(|score| score.is_available()).count(),
            total = scores.len(),
            "assessment fan-out joined"
        );
        scores
    }
}
