//! # Analysis Worker
//!
//! Runs a fixed list of jobs on one thread with its own [`SpanSagger`].
//! Jobs are handed to the worker before it starts and each job owns a
//! distinct result slot, so workers share nothing mutable.

use crate::analysis::result::{AnalysisResult, MethodResult};
use crate::analysis::AnalysisMessage;
use crate::calculations::span_sagger::SpanSagger;
use crate::calculations::tension_curve::TensionFitPolicy;
use crate::errors::SagResult;
use crate::model::{SagMethod, SagSpan};
use crate::units::UnitSystem;

/// One temperature to solve and the slot its result is written to.
#[derive(Debug)]
pub struct AnalysisJob<'r> {
    pub temperature: f64,
    pub result: &'r mut AnalysisResult,
}

#[derive(Debug)]
pub struct AnalysisWorker<'a, 'r> {
    span: &'a SagSpan,
    units: UnitSystem,
    tension_fit: TensionFitPolicy,
    jobs: Vec<AnalysisJob<'r>>,
}

impl<'a, 'r> AnalysisWorker<'a, 'r> {
    pub fn new(span: &'a SagSpan, units: UnitSystem, tension_fit: TensionFitPolicy) -> Self {
        AnalysisWorker {
            span,
            units,
            tension_fit,
            jobs: Vec::new(),
        }
    }

    pub fn add_job(&mut self, job: AnalysisJob<'r>) {
        self.jobs.push(job);
    }

    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    /// Solve every job in assignment order, returning the messages of failed jobs.
    pub fn run(self) -> Vec<AnalysisMessage> {
        let mut sagger = SpanSagger::for_span(self.span, self.units);
        sagger.set_tension_fit(self.tension_fit);

        let mut messages = Vec::new();
        for job in self.jobs {
            do_job(&mut sagger, self.span, job, &mut messages);
        }
        messages
    }
}

fn do_job(sagger: &mut SpanSagger<'_>, span: &SagSpan, job: AnalysisJob<'_>, messages: &mut Vec<AnalysisMessage>) {
    *job.result = AnalysisResult::default();
    sagger.set_temperature(job.temperature);

    if let Err(errors) = sagger.validate() {
        messages.extend(errors.into_iter().map(|error| AnalysisMessage::new(job.temperature, error)));
        return;
    }

    match read_result(sagger, span, job.temperature) {
        Ok(result) => *job.result = result,
        Err(error) => messages.push(AnalysisMessage::new(job.temperature, error)),
    }
}

fn read_result(sagger: &mut SpanSagger<'_>, span: &SagSpan, temperature: f64) -> SagResult<AnalysisResult> {
    let catenary = sagger.catenary()?.clone();

    let method = match span.method {
        SagMethod::Dynamometer { .. } => MethodResult::Dynamometer {
            tension_dyno: sagger.tension_dyno()?,
        },
        SagMethod::Stopwatch { .. } => MethodResult::Stopwatch {
            time_stopwatch: sagger.time_stopwatch()?,
            speed_wave: sagger.speed_wave()?,
        },
        SagMethod::Transit { .. } => MethodResult::Transit {
            angle_transit: sagger.angle_transit()?,
            direction_transit: sagger.direction_transit()?,
            distance_target: sagger.distance_attachment_to_target().ok(),
            point_target: sagger.point_target()?,
            factor_control: sagger.factor_control()?,
        },
    };

    Ok(AnalysisResult {
        temperature_cable: Some(temperature),
        catenary: Some(catenary),
        offset_coordinates: span.structure_back.point_attachment,
        method: Some(method),
    })
}
