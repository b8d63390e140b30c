//! # Sagging Report
//!
//! Printable rows built from the solved results of an analysis run.
//! Columns depend on the span's sagging method:
//!
//! | Method      | Columns                                                        |
//! |-------------|----------------------------------------------------------------|
//! | Dynamometer | temperature, H, sag, dyno tension                              |
//! | Stopwatch   | temperature, H, sag, wave speed, length, return time           |
//! | Transit     | temperature, H, sag, angle, direction, target distance, factor |
//!
//! Unsolved slots are skipped.

use serde::{Deserialize, Serialize};

use crate::analysis::result::{AnalysisResult, MethodResult};
use crate::geometry::AxisDirection;
use crate::model::{SagMethod, SagSpan};
use crate::units::UnitSystem;

/// One solved temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub temperature: f64,
    pub tension_horizontal: f64,
    pub sag: f64,
    pub length: f64,
    pub method: MethodResult,
}

impl ReportRow {
    fn from_result(result: &AnalysisResult) -> Option<Self> {
        let temperature = result.temperature_cable?;
        let catenary = result.catenary.as_ref()?;
        let method = result.method?;
        Some(ReportRow {
            temperature,
            tension_horizontal: catenary.tension_horizontal(),
            sag: catenary.sag(),
            length: catenary.length(),
            method,
        })
    }

    /// Formatted cells in column order.
    pub fn cells(&self) -> Vec<String> {
        let mut cells = vec![
            format!("{:.0}", self.temperature),
            format!("{:.0}", self.tension_horizontal),
            format!("{:.2}", self.sag),
        ];
        match self.method {
            MethodResult::Dynamometer { tension_dyno } => {
                cells.push(format!("{:.0}", tension_dyno));
            }
            MethodResult::Stopwatch {
                time_stopwatch,
                speed_wave,
            } => {
                cells.push(format!("{:.1}", speed_wave));
                cells.push(format!("{:.2}", self.length));
                cells.push(format!("{:.2}", time_stopwatch));
            }
            MethodResult::Transit {
                angle_transit,
                direction_transit,
                distance_target,
                factor_control,
                ..
            } => {
                cells.push(format!("{:.2}", angle_transit));
                cells.push(
                    match direction_transit {
                        Some(AxisDirection::Positive) => "ahead",
                        Some(AxisDirection::Negative) => "back",
                        None => "-",
                    }
                    .to_string(),
                );
                cells.push(match distance_target {
                    Some(distance) => format!("{:.2}", distance),
                    None => "-".to_string(),
                });
                cells.push(format!("{:.3}", factor_control));
            }
        }
        cells
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub span: String,
    pub method: String,
    pub units: UnitSystem,
    pub headers: Vec<String>,
    pub rows: Vec<ReportRow>,
}

impl AnalysisReport {
    pub fn new(span: &SagSpan, results: &[AnalysisResult], units: UnitSystem) -> Self {
        let length = units.length_label();
        let force = units.force_label();

        let mut headers = vec![
            format!("Temp ({})", units.temperature_label()),
            format!("H ({})", force),
            format!("Sag ({})", length),
        ];
        match span.method {
            SagMethod::Dynamometer { .. } => headers.push(format!("Tension ({})", force)),
            SagMethod::Stopwatch { .. } => {
                headers.push(format!("Wave speed ({}/s)", length));
                headers.push(format!("Length ({})", length));
                headers.push("Return (s)".to_string());
            }
            SagMethod::Transit { .. } => {
                headers.push("Angle (deg)".to_string());
                headers.push("Sight".to_string());
                headers.push(format!("Target ({})", length));
                headers.push("Control".to_string());
            }
        }

        AnalysisReport {
            span: span.description.clone(),
            method: span.method.name().to_string(),
            units,
            headers,
            rows: results.iter().filter_map(ReportRow::from_result).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render as a right-aligned text table.
    pub fn to_table(&self) -> String {
        let cells: Vec<Vec<String>> = self.rows.iter().map(ReportRow::cells).collect();
        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(column, header)| {
                cells
                    .iter()
                    .filter_map(|row| row.get(column))
                    .map(String::len)
                    .chain(std::iter::once(header.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let format_line = |values: &[String]| -> String {
            values
                .iter()
                .zip(&widths)
                .map(|(value, width)| format!("{:>width$}", value, width = *width))
                .collect::<Vec<_>>()
                .join("  ")
        };

        let mut lines = vec![format_line(&self.headers)];
        lines.push(
            widths
                .iter()
                .map(|width| "-".repeat(*width))
                .collect::<Vec<_>>()
                .join("  "),
        );
        lines.extend(cells.iter().map(|row| format_line(row)));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catenary::Catenary;
    use crate::geometry::{Point2d, Vector3d};
    use crate::test_support::{dyno_span, span_with_method};

    fn solved(temperature: f64, method: MethodResult) -> AnalysisResult {
        AnalysisResult {
            temperature_cable: Some(temperature),
            catenary: Some(Catenary::new(Vector3d::new(500.0, 0.0, 0.0), 1.5, 8200.0)),
            offset_coordinates: Point2d::default(),
            method: Some(method),
        }
    }

    #[test]
    fn test_unsolved_slots_skipped() {
        let span = dyno_span(50.0, 20.0);
        let results = vec![
            AnalysisResult::default(),
            solved(30.0, MethodResult::Dynamometer { tension_dyno: 8210.0 }),
        ];
        let report = AnalysisReport::new(&span, &results, UnitSystem::Imperial);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.method, "dynamometer");
        assert_eq!(report.headers.len(), 4);
        assert_eq!(report.rows[0].cells().len(), 4);
    }

    #[test]
    fn test_transit_columns() {
        let span = span_with_method(
            SagMethod::Transit {
                point_transit: Point2d::new(0.0, -10.0),
            },
            50.0,
            20.0,
        );
        let results = vec![solved(
            50.0,
            MethodResult::Transit {
                angle_transit: 1.5,
                direction_transit: Some(AxisDirection::Positive),
                distance_target: None,
                point_target: Point2d::new(500.0, -3.0),
                factor_control: 0.9,
            },
        )];
        let report = AnalysisReport::new(&span, &results, UnitSystem::Imperial);
        let cells = report.rows[0].cells();
        assert_eq!(cells.len(), report.headers.len());
        assert_eq!(cells[4], "ahead");
        assert_eq!(cells[5], "-");
    }

    #[test]
    fn test_table_has_header_and_rows() {
        let span = dyno_span(50.0, 20.0);
        let results = vec![
            solved(30.0, MethodResult::Dynamometer { tension_dyno: 8210.0 }),
            solved(50.0, MethodResult::Dynamometer { tension_dyno: 8205.0 }),
        ];
        let table = AnalysisReport::new(&span, &results, UnitSystem::Imperial).to_table();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Temp (deg F)"));
        assert!(lines[2].contains("8210"));
    }
}
