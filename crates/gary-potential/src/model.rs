use std::collections::BTreeMap;
use std::fmt::{self, Display};

use gary_core::errors::{ErrorInfo, GaryError};
use gary_core::units::UnitSystem;

use crate::kind::PotentialKind;

fn validation_error(code: &str, kind: PotentialKind, message: String) -> ErrorInfo {
    ErrorInfo::new(code, message).with_context("class", kind.class_name())
}

fn expected_names(kind: PotentialKind) -> String {
    kind.schema()
        .iter()
        .map(|spec| spec.name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Checks that `parameters` holds exactly the finite values required by `kind`.
pub(crate) fn validate_parameters(
    kind: PotentialKind,
    parameters: &BTreeMap<String, f64>,
) -> Result<(), GaryError> {
    for spec in kind.schema() {
        if !parameters.contains_key(spec.name) {
            return Err(GaryError::Validation(
                validation_error(
                    "missing_parameter",
                    kind,
                    format!("parameter `{}` is required", spec.name),
                )
                .with_context("parameter", spec.name)
                .with_hint(format!("expected parameters: {}", expected_names(kind))),
            ));
        }
    }
    for (name, value) in parameters {
        if kind.parameter(name).is_none() {
            return Err(GaryError::Validation(
                validation_error(
                    "unexpected_parameter",
                    kind,
                    format!("parameter `{name}` is not accepted"),
                )
                .with_context("parameter", name.as_str())
                .with_hint(format!("expected parameters: {}", expected_names(kind))),
            ));
        }
        if !value.is_finite() {
            return Err(GaryError::Validation(
                validation_error(
                    "non_finite_parameter",
                    kind,
                    format!("parameter `{name}` must be finite"),
                )
                .with_context("parameter", name.as_str())
                .with_context("value", value.to_string()),
            ));
        }
    }
    Ok(())
}

/// Immutable potential description: a kind, its parameters and their unit system.
///
/// Values are interpreted in the units of the attached [`UnitSystem`]; the
/// parameter set always matches [`PotentialKind::schema`] exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct PotentialModel {
    kind: PotentialKind,
    parameters: BTreeMap<String, f64>,
    units: UnitSystem,
}

impl PotentialModel {
    /// Builds a model, rejecting missing, extra, duplicated or non-finite parameters.
    pub fn new<I, K>(
        kind: PotentialKind,
        parameters: I,
        units: UnitSystem,
    ) -> Result<Self, GaryError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (name, value) in parameters {
            let name = name.into();
            if map.contains_key(&name) {
                return Err(GaryError::Validation(
                    validation_error(
                        "duplicate_parameter",
                        kind,
                        format!("parameter `{name}` was given twice"),
                    )
                    .with_context("parameter", name),
                ));
            }
            map.insert(name, value);
        }
        validate_parameters(kind, &map)?;
        Ok(Self {
            kind,
            parameters: map,
            units,
        })
    }

    /// Point mass of mass `m`.
    pub fn kepler(m: f64, units: UnitSystem) -> Result<Self, GaryError> {
        Self::new(PotentialKind::Kepler, [("m", m)], units)
    }

    /// Isochrone of mass `m` and core radius `b`.
    pub fn isochrone(m: f64, b: f64, units: UnitSystem) -> Result<Self, GaryError> {
        Self::new(PotentialKind::Isochrone, [("m", m), ("b", b)], units)
    }

    /// Hernquist sphere of mass `m` and scale radius `c`.
    pub fn hernquist(m: f64, c: f64, units: UnitSystem) -> Result<Self, GaryError> {
        Self::new(PotentialKind::Hernquist, [("m", m), ("c", c)], units)
    }

    /// Plummer sphere of mass `m` and scale radius `b`.
    pub fn plummer(m: f64, b: f64, units: UnitSystem) -> Result<Self, GaryError> {
        Self::new(PotentialKind::Plummer, [("m", m), ("b", b)], units)
    }

    /// Miyamoto-Nagai disk of mass `m`, scale length `a` and scale height `b`.
    pub fn miyamoto_nagai(m: f64, a: f64, b: f64, units: UnitSystem) -> Result<Self, GaryError> {
        Self::new(PotentialKind::MiyamotoNagai, [("m", m), ("a", a), ("b", b)], units)
    }

    /// NFW halo with scale mass `m` and scale radius `r_s`.
    pub fn nfw(m: f64, r_s: f64, units: UnitSystem) -> Result<Self, GaryError> {
        Self::new(PotentialKind::Nfw, [("m", m), ("r_s", r_s)], units)
    }

    /// Potential family.
    pub fn kind(&self) -> PotentialKind {
        self.kind
    }

    /// Value of a named parameter, in the model's units.
    pub fn parameter(&self, name: &str) -> Option<f64> {
        self.parameters.get(name).copied()
    }

    /// All parameters sorted by name.
    pub fn parameters(&self) -> &BTreeMap<String, f64> {
        &self.parameters
    }

    /// Unit system the parameters are expressed in.
    pub fn units(&self) -> &UnitSystem {
        &self.units
    }

    /// Re-expresses every parameter in `target` units.
    ///
    /// Fails with a validation error when a converted value overflows.
    pub fn to_units(&self, target: &UnitSystem) -> Result<Self, GaryError> {
        let parameters = self
            .parameters
            .iter()
            .map(|(name, value)| {
                let converted = match self.kind.parameter(name) {
                    Some(spec) => self.units.convert(*value, spec.physical_type, target),
                    None => *value,
                };
                (name.clone(), converted)
            })
            .collect();
        validate_parameters(self.kind, &parameters)?;
        Ok(Self {
            kind: self.kind,
            parameters,
            units: *target,
        })
    }

    /// Same kind and units, every parameter equal within relative tolerance `rel_tol`.
    pub fn approx_eq(&self, other: &Self, rel_tol: f64) -> bool {
        self.kind == other.kind
            && self.units == other.units
            && self.parameters.len() == other.parameters.len()
            && self.parameters.iter().all(|(name, a)| {
                other
                    .parameters
                    .get(name)
                    .is_some_and(|b| a == b || (a - b).abs() <= rel_tol * a.abs().max(b.abs()))
            })
    }
}

fn format_value(value: f64) -> String {
    let magnitude = value.abs();
    if value != 0.0 && !(1e-3..1e5).contains(&magnitude) {
        format!("{value:e}")
    } else {
        format!("{value}")
    }
}

impl Display for PotentialModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}: ", self.kind.class_name())?;
        for (idx, (name, value)) in self.parameters.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}={}", format_value(*value))?;
        }
        write!(f, " {}>", self.units)
    }
}
