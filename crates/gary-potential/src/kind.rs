use std::fmt::{self, Display};

use gary_core::errors::{ErrorInfo, GaryError};
use gary_core::units::PhysicalType;
use serde::{Deserialize, Serialize};

/// Name and physical type of one required parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterSpec {
    /// Key used in parameter mappings and documents.
    pub name: &'static str,
    /// Dimension used when converting between unit systems.
    pub physical_type: PhysicalType,
}

const fn param(name: &'static str, physical_type: PhysicalType) -> ParameterSpec {
    ParameterSpec {
        name,
        physical_type,
    }
}

const MASS: PhysicalType = PhysicalType::Mass;
const LENGTH: PhysicalType = PhysicalType::Length;

const KEPLER: &[ParameterSpec] = &[param("m", MASS)];
const MASS_B: &[ParameterSpec] = &[param("b", LENGTH), param("m", MASS)];
const MASS_C: &[ParameterSpec] = &[param("c", LENGTH), param("m", MASS)];
const MIYAMOTO_NAGAI: &[ParameterSpec] =
    &[param("a", LENGTH), param("b", LENGTH), param("m", MASS)];
const NFW: &[ParameterSpec] = &[param("m", MASS), param("r_s", LENGTH)];
const LOGARITHMIC: &[ParameterSpec] = &[
    param("phi", PhysicalType::Angle),
    param("q1", PhysicalType::Dimensionless),
    param("q2", PhysicalType::Dimensionless),
    param("q3", PhysicalType::Dimensionless),
    param("r_h", LENGTH),
    param("v_c", PhysicalType::Speed),
];
const HARMONIC_OSCILLATOR: &[ParameterSpec] = &[param("omega", PhysicalType::Frequency)];

/// Closed set of potential families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PotentialKind {
    /// Point mass.
    Kepler,
    /// Hénon isochrone sphere.
    Isochrone,
    /// Hernquist sphere.
    Hernquist,
    /// Plummer sphere.
    Plummer,
    /// Jaffe sphere.
    Jaffe,
    /// Miyamoto-Nagai flattened disk.
    MiyamotoNagai,
    /// Navarro-Frenk-White halo.
    Nfw,
    /// Triaxial logarithmic potential.
    Logarithmic,
    /// Isotropic harmonic oscillator.
    HarmonicOscillator,
}

impl PotentialKind {
    /// Every kind, in listing order.
    pub const ALL: [PotentialKind; 9] = [
        PotentialKind::Kepler,
        PotentialKind::Isochrone,
        PotentialKind::Hernquist,
        PotentialKind::Plummer,
        PotentialKind::Jaffe,
        PotentialKind::MiyamotoNagai,
        PotentialKind::Nfw,
        PotentialKind::Logarithmic,
        PotentialKind::HarmonicOscillator,
    ];

    /// Short snake_case tag.
    pub fn tag(&self) -> &'static str {
        match self {
            PotentialKind::Kepler => "kepler",
            PotentialKind::Isochrone => "isochrone",
            PotentialKind::Hernquist => "hernquist",
            PotentialKind::Plummer => "plummer",
            PotentialKind::Jaffe => "jaffe",
            PotentialKind::MiyamotoNagai => "miyamoto_nagai",
            PotentialKind::Nfw => "nfw",
            PotentialKind::Logarithmic => "logarithmic",
            PotentialKind::HarmonicOscillator => "harmonic_oscillator",
        }
    }

    /// Class name written to the `class` field of documents.
    pub fn class_name(&self) -> &'static str {
        match self {
            PotentialKind::Kepler => "KeplerPotential",
            PotentialKind::Isochrone => "IsochronePotential",
            PotentialKind::Hernquist => "HernquistPotential",
            PotentialKind::Plummer => "PlummerPotential",
            PotentialKind::Jaffe => "JaffePotential",
            PotentialKind::MiyamotoNagai => "MiyamotoNagaiPotential",
            PotentialKind::Nfw => "NFWPotential",
            PotentialKind::Logarithmic => "LogarithmicPotential",
            PotentialKind::HarmonicOscillator => "HarmonicOscillatorPotential",
        }
    }

    /// Required parameters, sorted by name.
    pub fn schema(&self) -> &'static [ParameterSpec] {
        match self {
            PotentialKind::Kepler => KEPLER,
            PotentialKind::Isochrone | PotentialKind::Plummer => MASS_B,
            PotentialKind::Hernquist | PotentialKind::Jaffe => MASS_C,
            PotentialKind::MiyamotoNagai => MIYAMOTO_NAGAI,
            PotentialKind::Nfw => NFW,
            PotentialKind::Logarithmic => LOGARITHMIC,
            PotentialKind::HarmonicOscillator => HARMONIC_OSCILLATOR,
        }
    }

    /// Looks up the schema entry for a parameter name.
    pub fn parameter(&self, name: &str) -> Option<&'static ParameterSpec> {
        self.schema().iter().find(|spec| spec.name == name)
    }

    /// Accepts either the tag or the class name.
    pub fn parse(name: &str) -> Result<Self, GaryError> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == name || kind.class_name() == name)
            .ok_or_else(|| {
                GaryError::Format(
                    ErrorInfo::new(
                        "unknown_potential",
                        format!("`{name}` is not a known potential class"),
                    )
                    .with_context("class", name),
                )
            })
    }
}

impl Display for PotentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemas_are_sorted_and_unique() {
        for kind in PotentialKind::ALL {
            let names: Vec<_> = kind.schema().iter().map(|spec| spec.name).collect();
            let mut sorted = names.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(names, sorted, "{kind}");
        }
    }

    #[test]
    fn parse_accepts_tag_and_class() {
        for kind in PotentialKind::ALL {
            assert_eq!(PotentialKind::parse(kind.tag()).unwrap(), kind);
            assert_eq!(PotentialKind::parse(kind.class_name()).unwrap(), kind);
        }
        let err = PotentialKind::parse("WobblyPotential").unwrap_err();
        assert_eq!(err.code(), "unknown_potential");
    }
}
