//! Recurring pipeline runs.
//!
//! Registers a single cron job that runs the pipeline with a fixed query.
//! A tick that fires while the previous run is still in flight is skipped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use newsfeed_pipeline::NewsPipeline;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

/// What the scheduled job runs, and when.
#[derive(Debug, Clone)]
pub struct ScheduledRun {
    pub cron: String,
    pub query: String,
    pub days_back: u32,
}

/// Builds and starts the scheduler with one pipeline job registered.
///
/// The returned handle must be kept alive; dropping it stops the job.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the cron expression is invalid or the
/// scheduler cannot be started.
pub async fn build_scheduler(
    pipeline: Arc<NewsPipeline>,
    run: ScheduledRun,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;
    register_pipeline_job(&scheduler, pipeline, run).await?;
    scheduler.start().await?;
    Ok(scheduler)
}

async fn register_pipeline_job(
    scheduler: &JobScheduler,
    pipeline: Arc<NewsPipeline>,
    run: ScheduledRun,
) -> Result<(), JobSchedulerError> {
    let guard = Arc::new(RunGuard::default());
    let cron = run.cron.clone();
    let query = run.query.clone();
    let run = Arc::new(run);

    let job = Job::new_async(cron.as_str(), move |_uuid, _lock| {
        let pipeline = Arc::clone(&pipeline);
        let guard = Arc::clone(&guard);
        let run = Arc::clone(&run);

        Box::pin(async move {
            let Some(_active) = guard.try_acquire() else {
                tracing::warn!(
                    query = %run.query,
                    "scheduler: previous run still in flight; skipping this tick"
                );
                return;
            };

            tracing::info!(query = %run.query, days_back = run.days_back, "scheduler: starting run");
            match pipeline.run(&run.query, run.days_back).await {
                Ok(Some(uri)) => tracing::info!(uri = %uri, "scheduler: run uploaded"),
                Ok(None) => tracing::info!("scheduler: run found nothing to upload"),
                // Already logged with its stage by the pipeline; wait for the next tick.
                Err(e) => tracing::warn!(error = %e, "scheduler: run failed"),
            }
        })
    })?;

    scheduler.add(job).await?;
    tracing::info!(cron = %cron, query = %query, "scheduler: registered pipeline job");
    Ok(())
}

/// Single-flight flag shared by every tick of one job.
#[derive(Debug, Default)]
struct RunGuard {
    running: AtomicBool,
}

impl RunGuard {
    /// Returns `None` while another holder is active.
    fn try_acquire(&self) -> Option<ActiveRun<'_>> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ActiveRun { guard: self })
    }
}

/// Releases the [`RunGuard`] when dropped, including on panic.
struct ActiveRun<'a> {
    guard: &'a RunGuard,
}

impl Drop for ActiveRun<'_> {
    fn drop(&mut self) {
        self.guard.running.store(false, Ordering::Release);
    }
}
