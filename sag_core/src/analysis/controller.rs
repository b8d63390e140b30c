//! # Analysis Controller
//!
//! Runs a span at its five target temperatures
//! (`base - 2i, base - i, base, base + i, base + 2i`).
//!
//! Each run spawns `min(max_workers, jobs)` scoped threads. Jobs are dealt
//! round-robin, so worker `k` solves jobs `k, k + n, k + 2n, ...`, and every
//! job writes only its own result slot. All workers are joined before
//! `run_analysis` returns, so result order always matches temperature order.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sag_core::analysis::AnalysisController;
//! use sag_core::project::AnalysisSettings;
//!
//! let mut controller = AnalysisController::new(&AnalysisSettings::default());
//! let outcome = controller.run_analysis(Some(&span))?;
//! if outcome.has_errors() {
//!     for message in &outcome.messages {
//!         eprintln!("{}", message);
//!     }
//! }
//! let solved = controller.results().iter().filter(|r| r.is_solved()).count();
//! ```

use std::thread;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::analysis::result::AnalysisResult;
use crate::analysis::worker::{AnalysisJob, AnalysisWorker};
use crate::analysis::AnalysisMessage;
use crate::calculations::tension_curve::TensionFitPolicy;
use crate::errors::{SagError, SagResult};
use crate::model::SagSpan;
use crate::project::AnalysisSettings;
use crate::units::UnitSystem;

/// Summary of one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub job_count: usize,
    pub worker_count: usize,
    pub elapsed: Duration,
    /// Per-temperature failures, grouped by worker in emission order
    pub messages: Vec<AnalysisMessage>,
}

impl AnalysisOutcome {
    /// True when any temperature failed, regardless of how many solved.
    pub fn has_errors(&self) -> bool {
        !self.messages.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisController {
    max_workers: usize,
    units: UnitSystem,
    tension_fit: TensionFitPolicy,
    results: Vec<AnalysisResult>,
}

impl AnalysisController {
    pub fn new(settings: &AnalysisSettings) -> Self {
        let max_workers = settings.max_workers.unwrap_or_else(detect_parallelism).max(1);
        AnalysisController {
            max_workers,
            units: settings.units,
            tension_fit: settings.tension_fit,
            results: Vec::new(),
        }
    }

    /// Override the worker limit (minimum 1).
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    pub fn units(&self) -> UnitSystem {
        self.units
    }

    /// Solve the span at its target temperatures.
    ///
    /// A missing span clears the results and returns an empty outcome.
    /// Span validation errors abort the run before any solve. Failures at
    /// individual temperatures are returned in the outcome and leave the
    /// matching slot unsolved.
    pub fn run_analysis(&mut self, span: Option<&SagSpan>) -> SagResult<AnalysisOutcome> {
        self.clear_results();

        let Some(span) = span else {
            debug!("No span selected, nothing to analyze");
            return Ok(AnalysisOutcome::default());
        };

        let errors = span.validation_errors();
        if !errors.is_empty() {
            for err in &errors {
                error!(span = %span.description, "{}", err);
            }
            error!(span = %span.description, "Span validation errors are present, aborting analysis");
            return Err(SagError::SpanInvalid {
                span: span.description.clone(),
                errors,
            });
        }

        let start = Instant::now();
        let temperatures = span.target_temperatures();
        let mut results = vec![AnalysisResult::default(); temperatures.len()];
        let job_count = temperatures.len();
        let worker_count = self.max_workers.min(job_count).max(1);

        debug!(
            span = %span.description,
            jobs = job_count,
            workers = worker_count,
            "Calculating sagging solutions"
        );

        let mut workers: Vec<AnalysisWorker<'_, '_>> = (0..worker_count)
            .map(|_| AnalysisWorker::new(span, self.units, self.tension_fit))
            .collect();
        for (index, (temperature, result)) in temperatures.iter().zip(results.iter_mut()).enumerate() {
            workers[index % worker_count].add_job(AnalysisJob {
                temperature: *temperature,
                result,
            });
        }

        let messages = run_workers(workers)?;
        let elapsed = start.elapsed();

        for message in &messages {
            error!(span = %span.description, "{}", message);
        }
        debug!(
            span = %span.description,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            failed = messages.len(),
            "Analysis finished"
        );

        self.results = results;
        Ok(AnalysisOutcome {
            job_count,
            worker_count,
            elapsed,
            messages,
        })
    }

    /// Solved result at `index`, or `None` if out of range or unsolved.
    pub fn result(&self, index: usize) -> Option<&AnalysisResult> {
        self.results.get(index).filter(|result| result.is_solved())
    }

    /// All result slots in temperature order, including unsolved ones.
    pub fn results(&self) -> &[AnalysisResult] {
        &self.results
    }

    pub fn clear_results(&mut self) {
        self.results.clear();
    }
}

/// Usable hardware parallelism, or 1 if the query fails.
pub fn detect_parallelism() -> usize {
    match thread::available_parallelism() {
        Ok(count) => count.get(),
        Err(err) => {
            warn!("Couldn't query available parallelism, using one worker: {}", err);
            1
        }
    }
}

/// Run every worker on its own scoped thread and merge messages in worker order.
///
/// If any worker fails to start the whole run fails; workers that did start
/// are still joined before returning.
fn run_workers(workers: Vec<AnalysisWorker<'_, '_>>) -> SagResult<Vec<AnalysisMessage>> {
    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(workers.len());
        let mut failure = None;

        for (index, worker) in workers.into_iter().enumerate() {
            let spawned = thread::Builder::new()
                .name(format!("sag-analysis-{}", index))
                .spawn_scoped(scope, move || worker.run());
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    failure = Some(SagError::WorkerStart {
                        worker: index,
                        reason: err.to_string(),
                    });
                    break;
                }
            }
        }

        let mut messages = Vec::new();
        for (index, handle) in handles.into_iter().enumerate() {
            match handle.join() {
                Ok(worker_messages) => messages.extend(worker_messages),
                Err(_) => {
                    failure.get_or_insert(SagError::Internal {
                        message: format!("analysis worker {} panicked", index),
                    });
                }
            }
        }

        match failure {
            Some(err) => Err(err),
            None => Ok(messages),
        }
    })
}
