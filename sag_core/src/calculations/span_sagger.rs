//! # Span Sagger
//!
//! Solves one span at one temperature. The sagger borrows its inputs from
//! the span (it never mutates them) and caches its work in two stages:
//!
//! 1. **Catenary** - creep-corrected temperature → interpolated horizontal
//!    tension → catenary between the attachments, optionally re-solved for
//!    the sag correction.
//! 2. **Sagging** - the method-specific sub-solve on that catenary.
//!
//! Any setter drops the cache back to `Stale`. Every accessor advances the
//! cache before answering and returns an error instead of stale data.
//!
//! ## Example
//!
//! ```rust
//! use sag_core::calculations::span_sagger::SpanSagger;
//! use sag_core::geometry::{Point2d, SpanEnd};
//! use sag_core::model::{SagCable, SagMethod, SagStructure, TensionPoint};
//! use sag_core::units::UnitSystem;
//!
//! let cable = SagCable {
//!     name: "Cable".to_string(),
//!     scale: 1.0,
//!     correction_creep: 0.0,
//!     correction_sag: 0.0,
//!     weight_unit: 1.5,
//!     tensions: vec![
//!         TensionPoint::new(0.0, 10000.0),
//!         TensionPoint::new(25.0, 9000.0),
//!         TensionPoint::new(50.0, 8200.0),
//!         TensionPoint::new(75.0, 7600.0),
//!         TensionPoint::new(100.0, 7200.0),
//!     ],
//! };
//! let method = SagMethod::Dynamometer { end: SpanEnd::Back };
//! let back = SagStructure::new("Str 1", Point2d::new(0.0, 0.0));
//! let ahead = SagStructure::new("Str 2", Point2d::new(500.0, 0.0));
//!
//! let mut sagger = SpanSagger::new(UnitSystem::Imperial);
//! sagger.set_cable(&cable);
//! sagger.set_method(&method);
//! sagger.set_structure_back(&back);
//! sagger.set_structure_ahead(&ahead);
//! sagger.set_temperature(60.0);
//!
//! assert!(sagger.validate().is_ok());
//! assert!(sagger.tension_dyno().unwrap() > sagger.catenary().unwrap().tension_horizontal());
//! ```

use crate::calculations::control_factor::is_valid_control_factor;
use crate::calculations::tension_curve::{TensionCurve, TensionFitPolicy};
use crate::catenary::{Catenary, CatenarySolver};
use crate::errors::{SagError, SagResult};
use crate::geometry::{AxisDirection, Point2d, Point3d, Vector3d};
use crate::model::{SagCable, SagMethod, SagSpan, SagStructure};
use crate::saggers::{DynoSagger, StopwatchSagger, TransitSagger};
use crate::units::UnitSystem;

/// Method sub-solve cached on top of the catenary.
#[derive(Debug, Clone, PartialEq)]
enum SaggingSolution {
    Dynamometer(DynoSagger),
    Stopwatch {
        sagger: StopwatchSagger,
        wave_return: u32,
    },
    Transit {
        sagger: TransitSagger,
        point_transit: Point2d,
        /// Target point in span coordinates
        point_target: Point2d,
    },
}

#[derive(Debug, Clone, PartialEq)]
enum SaggerState {
    Stale,
    CatenaryValid {
        catenary: Catenary,
    },
    FullyValid {
        catenary: Catenary,
        solution: SaggingSolution,
    },
}

/// All inputs present, copied out of the sagger.
#[derive(Clone, Copy)]
struct Inputs<'a> {
    cable: &'a SagCable,
    method: &'a SagMethod,
    structure_ahead: &'a SagStructure,
    structure_back: &'a SagStructure,
    temperature: f64,
}

#[derive(Debug, Clone)]
pub struct SpanSagger<'a> {
    cable: Option<&'a SagCable>,
    method: Option<&'a SagMethod>,
    structure_ahead: Option<&'a SagStructure>,
    structure_back: Option<&'a SagStructure>,
    temperature: Option<f64>,
    units: UnitSystem,
    tension_fit: TensionFitPolicy,
    state: SaggerState,
}

impl<'a> SpanSagger<'a> {
    pub fn new(units: UnitSystem) -> Self {
        SpanSagger {
            cable: None,
            method: None,
            structure_ahead: None,
            structure_back: None,
            temperature: None,
            units,
            tension_fit: TensionFitPolicy::default(),
            state: SaggerState::Stale,
        }
    }

    /// Sagger with every input except the temperature taken from a span.
    pub fn for_span(span: &'a SagSpan, units: UnitSystem) -> Self {
        let mut sagger = SpanSagger::new(units);
        sagger.set_cable(&span.cable);
        sagger.set_method(&span.method);
        sagger.set_structure_ahead(&span.structure_ahead);
        sagger.set_structure_back(&span.structure_back);
        sagger
    }

    // ------------------------------------------------------------------
    // Inputs
    // ------------------------------------------------------------------

    pub fn set_cable(&mut self, cable: &'a SagCable) {
        self.cable = Some(cable);
        self.state = SaggerState::Stale;
    }

    pub fn set_method(&mut self, method: &'a SagMethod) {
        self.method = Some(method);
        self.state = SaggerState::Stale;
    }

    pub fn set_structure_ahead(&mut self, structure: &'a SagStructure) {
        self.structure_ahead = Some(structure);
        self.state = SaggerState::Stale;
    }

    pub fn set_structure_back(&mut self, structure: &'a SagStructure) {
        self.structure_back = Some(structure);
        self.state = SaggerState::Stale;
    }

    pub fn set_temperature(&mut self, temperature: f64) {
        self.temperature = Some(temperature);
        self.state = SaggerState::Stale;
    }

    pub fn set_units(&mut self, units: UnitSystem) {
        self.units = units;
        self.state = SaggerState::Stale;
    }

    pub fn set_tension_fit(&mut self, tension_fit: TensionFitPolicy) {
        self.tension_fit = tension_fit;
        self.state = SaggerState::Stale;
    }

    pub fn cable(&self) -> Option<&'a SagCable> {
        self.cable
    }

    pub fn method(&self) -> Option<&'a SagMethod> {
        self.method
    }

    pub fn structure_ahead(&self) -> Option<&'a SagStructure> {
        self.structure_ahead
    }

    pub fn structure_back(&self) -> Option<&'a SagStructure> {
        self.structure_back
    }

    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    pub fn units(&self) -> UnitSystem {
        self.units
    }

    /// Both stages are cached
    pub fn is_updated(&self) -> bool {
        matches!(self.state, SaggerState::FullyValid { .. })
    }

    // ------------------------------------------------------------------
    // Results
    // ------------------------------------------------------------------

    pub fn catenary(&mut self) -> SagResult<&Catenary> {
        self.ensure_updated()?;
        match &self.state {
            SaggerState::FullyValid { catenary, .. } => Ok(catenary),
            _ => Err(not_updated()),
        }
    }

    /// Tension read on the dynamometer
    pub fn tension_dyno(&mut self) -> SagResult<f64> {
        match self.solution()? {
            SaggingSolution::Dynamometer(sagger) => Ok(sagger.tension()),
            other => Err(mismatch("dynamometer", other)),
        }
    }

    /// Seconds for the method's number of wave returns
    pub fn time_stopwatch(&mut self) -> SagResult<f64> {
        match self.solution()? {
            SaggingSolution::Stopwatch { sagger, wave_return } => Ok(sagger.time_return(*wave_return)),
            other => Err(mismatch("stopwatch", other)),
        }
    }

    pub fn speed_wave(&mut self) -> SagResult<f64> {
        match self.solution()? {
            SaggingSolution::Stopwatch { sagger, .. } => Ok(sagger.speed_wave()),
            other => Err(mismatch("stopwatch", other)),
        }
    }

    /// Vertical sight angle in degrees
    pub fn angle_transit(&mut self) -> SagResult<f64> {
        match self.solution()? {
            SaggingSolution::Transit { sagger, .. } => Ok(sagger.angle_low()),
            other => Err(mismatch("transit", other)),
        }
    }

    pub fn factor_control(&mut self) -> SagResult<f64> {
        match self.solution()? {
            SaggingSolution::Transit { sagger, .. } => Ok(sagger.factor_control()),
            other => Err(mismatch("transit", other)),
        }
    }

    /// Target point in span coordinates
    pub fn point_target(&mut self) -> SagResult<Point2d> {
        match self.solution()? {
            SaggingSolution::Transit { point_target, .. } => Ok(*point_target),
            other => Err(mismatch("transit", other)),
        }
    }

    /// Direction from the transit to the target, `None` when they share an x.
    pub fn direction_transit(&mut self) -> SagResult<Option<AxisDirection>> {
        match self.solution()? {
            SaggingSolution::Transit {
                point_transit,
                point_target,
                ..
            } => Ok(direction_between(*point_transit, *point_target)),
            other => Err(mismatch("transit", other)),
        }
    }

    /// Vertical distance from the sighted structure's attachment down to the target.
    pub fn distance_attachment_to_target(&mut self) -> SagResult<f64> {
        let direction = self.direction_transit()?;
        let point_target = self.point_target()?;

        let structure = match direction {
            Some(AxisDirection::Positive) => self.structure_ahead,
            Some(AxisDirection::Negative) => self.structure_back,
            None => {
                return Err(SagError::sagging_unsolved(
                    "transit",
                    "transit and target share a horizontal position",
                ))
            }
        };
        let structure = structure.ok_or_else(|| SagError::missing_field("structure"))?;
        Ok(structure.point_attachment.y - point_target.y)
    }

    /// Check inputs and run both stages, collecting every problem found.
    pub fn validate(&mut self) -> Result<(), Vec<SagError>> {
        let mut errors = Vec::new();

        if self.cable.is_none() {
            errors.push(SagError::missing_field("cable"));
        }
        if self.method.is_none() {
            errors.push(SagError::missing_field("method"));
        }
        if self.structure_ahead.is_none() {
            errors.push(SagError::missing_field("structure_ahead"));
        }
        if self.structure_back.is_none() {
            errors.push(SagError::missing_field("structure_back"));
        }
        if self.temperature.is_none() {
            errors.push(SagError::missing_field("temperature"));
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        if let (Some(cable), Some(temperature)) = (self.cable, self.temperature) {
            match cable.temperature_range() {
                Some((min, max)) if temperature < min || max < temperature => {
                    errors.push(SagError::TemperatureOutOfRange { temperature, min, max });
                }
                Some(_) => {}
                None => errors.push(SagError::missing_field("tensions")),
            }
        }

        if let Err(error) = self.ensure_updated() {
            if !errors.contains(&error) {
                errors.push(error);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    // ------------------------------------------------------------------
    // Update stages
    // ------------------------------------------------------------------

    fn inputs(&self) -> SagResult<Inputs<'a>> {
        Ok(Inputs {
            cable: self.cable.ok_or_else(|| SagError::missing_field("cable"))?,
            method: self.method.ok_or_else(|| SagError::missing_field("method"))?,
            structure_ahead: self
                .structure_ahead
                .ok_or_else(|| SagError::missing_field("structure_ahead"))?,
            structure_back: self
                .structure_back
                .ok_or_else(|| SagError::missing_field("structure_back"))?,
            temperature: self.temperature.ok_or_else(|| SagError::missing_field("temperature"))?,
        })
    }

    fn solution(&mut self) -> SagResult<&SaggingSolution> {
        self.ensure_updated()?;
        match &self.state {
            SaggerState::FullyValid { solution, .. } => Ok(solution),
            _ => Err(not_updated()),
        }
    }

    /// Advance Stale → CatenaryValid → FullyValid, stopping at the first failure.
    fn ensure_updated(&mut self) -> SagResult<()> {
        if self.is_updated() {
            return Ok(());
        }
        let inputs = self.inputs()?;

        let catenary = match std::mem::replace(&mut self.state, SaggerState::Stale) {
            SaggerState::CatenaryValid { catenary } => catenary,
            _ => self.solve_catenary(&inputs)?,
        };

        match self.solve_sagging(&inputs, &catenary) {
            Ok(solution) => {
                self.state = SaggerState::FullyValid { catenary, solution };
                Ok(())
            }
            Err(error) => {
                self.state = SaggerState::CatenaryValid { catenary };
                Err(error)
            }
        }
    }

    fn solve_catenary(&self, inputs: &Inputs<'_>) -> SagResult<Catenary> {
        let cable = inputs.cable;
        let temperature = inputs.temperature - cable.correction_creep;

        let tension = TensionCurve::new(&cable.tensions, self.units)
            .tension_horizontal(temperature, self.tension_fit)?;

        let back = inputs.structure_back.point_attachment;
        let ahead = inputs.structure_ahead.point_attachment;
        let spacing = Vector3d::new(ahead.x - back.x, 0.0, ahead.y - back.y);

        let catenary = Catenary::new(spacing, cable.weight_unit, tension);
        catenary.validate()?;

        if cable.correction_sag == 0.0 {
            return Ok(catenary);
        }

        let sag_target = catenary.sag() + cable.correction_sag;
        let corrected = CatenarySolver::new(spacing, cable.weight_unit, sag_target)
            .solve()
            .map_err(|error| {
                SagError::catenary_unsolved(format!("sag correction of {} failed - {}", cable.correction_sag, error))
            })?;
        corrected.validate()?;
        Ok(corrected)
    }

    fn solve_sagging(&self, inputs: &Inputs<'_>, catenary: &Catenary) -> SagResult<SaggingSolution> {
        match *inputs.method {
            SagMethod::Dynamometer { end } => DynoSagger::solve(catenary, end).map(SaggingSolution::Dynamometer),
            SagMethod::Stopwatch { wave_return } => {
                StopwatchSagger::solve(catenary, self.units).map(|sagger| SaggingSolution::Stopwatch {
                    sagger,
                    wave_return,
                })
            }
            SagMethod::Transit { point_transit } => {
                let offset = inputs.structure_back.point_attachment;
                let sagger = TransitSagger::solve(catenary, Point3d::from_span(point_transit - offset))?;

                let elevation_factor = catenary.elevation_factor();
                let control_factor = sagger.factor_control();
                if !is_valid_control_factor(elevation_factor, control_factor) {
                    return Err(SagError::ControlFactorRejected {
                        elevation_factor,
                        control_factor,
                    });
                }

                Ok(SaggingSolution::Transit {
                    sagger,
                    point_transit,
                    point_target: sagger.point_target().to_span() + offset,
                })
            }
        }
    }
}

fn direction_between(point_transit: Point2d, point_target: Point2d) -> Option<AxisDirection> {
    if point_transit.x < point_target.x {
        Some(AxisDirection::Positive)
    } else if point_target.x < point_transit.x {
        Some(AxisDirection::Negative)
    } else {
        None
    }
}

fn not_updated() -> SagError {
    SagError::Internal {
        message: "span sagger state not updated".to_string(),
    }
}

fn mismatch(requested: &str, solution: &SaggingSolution) -> SagError {
    let active = match solution {
        SaggingSolution::Dynamometer(_) => "dynamometer",
        SaggingSolution::Stopwatch { .. } => "stopwatch",
        SaggingSolution::Transit { .. } => "transit",
    };
    SagError::MethodMismatch {
        requested: requested.to_string(),
        active: active.to_string(),
    }
}
