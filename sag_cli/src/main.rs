//! # Sagline CLI Application
//!
//! Terminal front end for `sag_core`. Given a project file it analyzes the
//! activated span; without one it prompts for a demo span. Prints the
//! sagging table followed by the JSON results.
//!
//! ```text
//! sag_cli [project.json]
//! RUST_LOG=sag_core=debug sag_cli
//! ```

use std::io::{self, BufRead, Write};
use std::path::Path;

use sag_core::analysis::AnalysisReport;
use sag_core::geometry::{Point2d, SpanEnd};
use sag_core::{
    load_project, SagCable, SagError, SagMethod, SagProject, SagSpan, SagStructure, TensionPoint,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input).ok()?;
    Some(input.trim().to_string())
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    prompt_line(prompt)
        .and_then(|input| input.parse().ok())
        .unwrap_or(default)
}

fn prompt_method() -> SagMethod {
    let choice = prompt_line("Sagging method - [d]ynamometer, [s]topwatch, [t]ransit [d]: ").unwrap_or_default();
    match choice.to_ascii_lowercase().chars().next() {
        Some('s') => SagMethod::Stopwatch {
            wave_return: prompt_f64("Wave returns [3]: ", 3.0).max(1.0) as u32,
        },
        Some('t') => SagMethod::Transit {
            point_transit: Point2d::new(
                prompt_f64("Transit station (ft) [0.0]: ", 0.0),
                prompt_f64("Transit elevation (ft) [-10.0]: ", -10.0),
            ),
        },
        _ => SagMethod::Dynamometer { end: SpanEnd::Back },
    }
}

/// Level 500 ft span with a 1.5 lbs/ft cable calibrated from 0 to 100 deg F
fn demo_project() -> SagProject {
    println!("No project file given. Building a demo span...");
    println!();

    let temperature_base = prompt_f64("Base temperature (deg F) [50.0]: ", 50.0);
    let temperature_interval = prompt_f64("Temperature interval (deg F) [20.0]: ", 20.0);
    let method = prompt_method();

    let span = SagSpan {
        description: "Demo Str 1 - Str 2".to_string(),
        notes: String::new(),
        cable: SagCable {
            name: "Demo 1.5 lbs/ft".to_string(),
            scale: 1.0,
            correction_creep: 0.0,
            correction_sag: 0.0,
            weight_unit: 1.5,
            tensions: vec![
                TensionPoint::new(0.0, 10000.0),
                TensionPoint::new(25.0, 9000.0),
                TensionPoint::new(50.0, 8200.0),
                TensionPoint::new(75.0, 7600.0),
                TensionPoint::new(100.0, 7200.0),
            ],
        },
        method,
        structure_back: SagStructure::new("Str 1", Point2d::new(0.0, 0.0)),
        structure_ahead: SagStructure::new("Str 2", Point2d::new(500.0, 0.0)),
        temperature_base,
        temperature_interval,
    };

    let mut project = SagProject::new("Demo", "");
    let id = project.add_span(span);
    project.activated = Some(id);
    project
}

fn print_error(e: &SagError) {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    println!("Sagline CLI - Cable Sagging Calculator");
    println!("======================================");
    println!();

    let project = match std::env::args().nth(1) {
        Some(path) => match load_project(Path::new(&path)) {
            Ok(project) => project,
            Err(e) => {
                print_error(&e);
                std::process::exit(1);
            }
        },
        None => demo_project(),
    };

    let Some(span) = project.activated_span() else {
        eprintln!("Error: project has no activated span");
        std::process::exit(1);
    };

    info!(span = %span.description, method = %span.method, "Running sagging analysis");
    let mut controller = project.controller();
    let outcome = match project.run_analysis(&mut controller) {
        Ok(outcome) => outcome,
        Err(e) => {
            print_error(&e);
            std::process::exit(1);
        }
    };

    let units = project.settings.units;
    let report = AnalysisReport::new(span, controller.results(), units);

    println!();
    println!("═══════════════════════════════════════");
    println!("  SAGGING TABLE - {}", report.span);
    println!("  Method: {}", span.method);
    println!("═══════════════════════════════════════");
    println!();
    if report.is_empty() {
        println!("No temperatures solved.");
    } else {
        println!("{}", report.to_table());
    }
    println!();
    println!(
        "Solved {}/{} temperatures using {} worker(s) in {:.1} ms",
        report.rows.len(),
        outcome.job_count,
        outcome.worker_count,
        outcome.elapsed.as_secs_f64() * 1000.0
    );

    if outcome.has_errors() {
        println!();
        println!("[FAIL] Sagging errors:");
        for message in &outcome.messages {
            println!("  {}", message);
        }
    }

    println!();
    println!("JSON Output:");
    if let Ok(json) = serde_json::to_string_pretty(controller.results()) {
        println!("{}", json);
    }
}
