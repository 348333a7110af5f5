use std::fmt::{self, Display};

use gary_core::errors::{ErrorInfo, GaryError};
use gary_core::units::UnitSystem;

use crate::model::PotentialModel;

/// Ordered, uniquely named components sharing one unit system.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositePotential {
    components: Vec<(String, PotentialModel)>,
}

impl CompositePotential {
    /// Builds a composite. Fails on no components, repeated names or mixed unit systems.
    pub fn from_components<I, N>(components: I) -> Result<Self, GaryError>
    where
        I: IntoIterator<Item = (N, PotentialModel)>,
        N: Into<String>,
    {
        let mut collected: Vec<(String, PotentialModel)> = Vec::new();
        for (name, model) in components {
            let name = name.into();
            if collected.iter().any(|(existing, _)| *existing == name) {
                return Err(GaryError::Validation(
                    ErrorInfo::new(
                        "duplicate_component",
                        format!("component `{name}` appears more than once"),
                    )
                    .with_context("component", name),
                ));
            }
            if let Some((first, reference)) = collected.first() {
                if reference.units() != model.units() {
                    return Err(GaryError::Validation(
                        ErrorInfo::new(
                            "unit_system_mismatch",
                            format!("component `{name}` does not share the composite's units"),
                        )
                        .with_context("component", name.as_str())
                        .with_context("expected", reference.units().to_string())
                        .with_context("found", model.units().to_string())
                        .with_context("first_component", first.as_str()),
                    ));
                }
            }
            collected.push((name, model));
        }
        if collected.is_empty() {
            return Err(GaryError::Validation(ErrorInfo::new(
                "empty_composite",
                "a composite potential needs at least one component",
            )));
        }
        Ok(Self {
            components: collected,
        })
    }

    /// Component by name.
    pub fn get(&self, name: &str) -> Option<&PotentialModel> {
        self.components
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, model)| model)
    }

    /// Components in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &PotentialModel)> + '_ {
        self.components
            .iter()
            .map(|(name, model)| (name.as_str(), model))
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether there are no components; never true for a constructed composite.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Unit system shared by every component.
    pub fn units(&self) -> &UnitSystem {
        // Construction guarantees at least one component.
        self.components[0].1.units()
    }

    /// Re-expresses every component in `target` units.
    pub fn to_units(&self, target: &UnitSystem) -> Result<Self, GaryError> {
        let components = self
            .components
            .iter()
            .map(|(name, model)| {
                let converted = model.to_units(target).map_err(|err| match err {
                    GaryError::Validation(info) => {
                        GaryError::Validation(info.with_context("component", name.as_str()))
                    }
                    other => other,
                })?;
                Ok((name.clone(), converted))
            })
            .collect::<Result<Vec<_>, GaryError>>()?;
        Ok(Self { components })
    }

    /// Same names in the same order, each pair of components approximately equal.
    pub fn approx_eq(&self, other: &Self, rel_tol: f64) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((na, a), (nb, b))| na == nb && a.approx_eq(b, rel_tol))
    }
}

impl Display for CompositePotential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<CompositePotential {}>", self.units())?;
        for (idx, (name, model)) in self.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "  {name}: {model}")?;
        }
        Ok(())
    }
}

/// Either a single model or a composite, as found at the top of a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Potential {
    /// Single potential family.
    Single(PotentialModel),
    /// Named sum of potentials.
    Composite(CompositePotential),
}

impl Potential {
    /// Unit system of the potential.
    pub fn units(&self) -> &UnitSystem {
        match self {
            Potential::Single(model) => model.units(),
            Potential::Composite(composite) => composite.units(),
        }
    }

    /// Re-expresses the potential in `target` units.
    pub fn to_units(&self, target: &UnitSystem) -> Result<Self, GaryError> {
        Ok(match self {
            Potential::Single(model) => Potential::Single(model.to_units(target)?),
            Potential::Composite(composite) => {
                Potential::Composite(composite.to_units(target)?)
            }
        })
    }

    /// Approximate equality for matching shapes; a single and a composite never match.
    pub fn approx_eq(&self, other: &Self, rel_tol: f64) -> bool {
        match (self, other) {
            (Potential::Single(a), Potential::Single(b)) => a.approx_eq(b, rel_tol),
            (Potential::Composite(a), Potential::Composite(b)) => a.approx_eq(b, rel_tol),
            _ => false,
        }
    }
}

impl From<PotentialModel> for Potential {
    fn from(model: PotentialModel) -> Self {
        Potential::Single(model)
    }
}

impl From<CompositePotential> for Potential {
    fn from(composite: CompositePotential) -> Self {
        Potential::Composite(composite)
    }
}

impl Display for Potential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Potential::Single(model) => model.fmt(f),
            Potential::Composite(composite) => composite.fmt(f),
        }
    }
}
