//! Unit registry, unit systems and value conversion.
//!
//! A [`UnitSystem`] fixes one base unit for each of length, mass, time and
//! angle. Parameters carry a [`PhysicalType`] whose base-dimension exponents
//! determine how a value scales when it is re-expressed in another system.

use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

use crate::errors::{ErrorInfo, GaryError};

fn format_error(code: &str, message: impl Into<String>) -> GaryError {
    GaryError::Format(ErrorInfo::new(code, message))
}

/// Base dimensions spanned by a unit system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BaseDimension {
    /// Spatial extent.
    Length,
    /// Mass.
    Mass,
    /// Time.
    Time,
    /// Plane angle.
    Angle,
}

impl BaseDimension {
    /// All base dimensions in exponent order.
    pub const ALL: [BaseDimension; 4] = [
        BaseDimension::Length,
        BaseDimension::Mass,
        BaseDimension::Time,
        BaseDimension::Angle,
    ];

    /// Returns the lowercase name used as a document key.
    pub fn name(&self) -> &'static str {
        match self {
            BaseDimension::Length => "length",
            BaseDimension::Mass => "mass",
            BaseDimension::Time => "time",
            BaseDimension::Angle => "angle",
        }
    }

    /// Parses a document key into a base dimension.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dim| dim.name() == name)
    }

    fn index(&self) -> usize {
        match self {
            BaseDimension::Length => 0,
            BaseDimension::Mass => 1,
            BaseDimension::Time => 2,
            BaseDimension::Angle => 3,
        }
    }
}

/// A registered unit with its scale relative to SI.
#[derive(Debug, Clone, Copy)]
pub struct Unit {
    symbol: &'static str,
    dimension: BaseDimension,
    si_scale: f64,
}

impl Unit {
    const fn new(symbol: &'static str, dimension: BaseDimension, si_scale: f64) -> Self {
        Self {
            symbol,
            dimension,
            si_scale,
        }
    }

    /// Canonical symbol written to documents.
    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    /// Base dimension measured by the unit.
    pub fn dimension(&self) -> BaseDimension {
        self.dimension
    }

    /// Size of one unit expressed in the SI unit of the same dimension.
    pub fn si_scale(&self) -> f64 {
        self.si_scale
    }

    /// Resolves a symbol or alias against the registry.
    pub fn lookup(name: &str) -> Result<Unit, GaryError> {
        let name = name.trim();
        REGISTRY
            .iter()
            .find(|entry| {
                entry.unit.symbol == name || entry.aliases.iter().any(|alias| *alias == name)
            })
            .map(|entry| entry.unit)
            .ok_or_else(|| {
                GaryError::Format(
                    ErrorInfo::new("unknown_unit", format!("unit `{name}` is not registered"))
                        .with_context("unit", name),
                )
            })
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }
}

impl Eq for Unit {}

impl Hash for Unit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.symbol.hash(state);
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol)
    }
}

/// Metre.
pub const M: Unit = Unit::new("m", BaseDimension::Length, 1.0);
/// Centimetre.
pub const CM: Unit = Unit::new("cm", BaseDimension::Length, 1e-2);
/// Kilometre.
pub const KM: Unit = Unit::new("km", BaseDimension::Length, 1e3);
/// Astronomical unit.
pub const AU: Unit = Unit::new("AU", BaseDimension::Length, 1.495_978_707e11);
/// Light year.
pub const LYR: Unit = Unit::new("lyr", BaseDimension::Length, 9.460_730_472_580_8e15);
/// Parsec.
pub const PC: Unit = Unit::new("pc", BaseDimension::Length, 3.085_677_581_491_367_3e16);
/// Kiloparsec.
pub const KPC: Unit = Unit::new("kpc", BaseDimension::Length, 3.085_677_581_491_367_3e19);
/// Megaparsec.
pub const MPC: Unit = Unit::new("Mpc", BaseDimension::Length, 3.085_677_581_491_367_3e22);
/// Kilogram.
pub const KG: Unit = Unit::new("kg", BaseDimension::Mass, 1.0);
/// Gram.
pub const G: Unit = Unit::new("g", BaseDimension::Mass, 1e-3);
/// Solar mass.
pub const SOLMASS: Unit = Unit::new("solMass", BaseDimension::Mass, 1.988_409_870_698_051e30);
/// Second.
pub const S: Unit = Unit::new("s", BaseDimension::Time, 1.0);
/// Minute.
pub const MIN: Unit = Unit::new("min", BaseDimension::Time, 60.0);
/// Hour.
pub const H: Unit = Unit::new("h", BaseDimension::Time, 3_600.0);
/// Day.
pub const DAY: Unit = Unit::new("day", BaseDimension::Time, 86_400.0);
/// Julian year.
pub const YR: Unit = Unit::new("yr", BaseDimension::Time, 3.155_76e7);
/// Megayear.
pub const MYR: Unit = Unit::new("Myr", BaseDimension::Time, 3.155_76e13);
/// Gigayear.
pub const GYR: Unit = Unit::new("Gyr", BaseDimension::Time, 3.155_76e16);
/// Radian.
pub const RAD: Unit = Unit::new("rad", BaseDimension::Angle, 1.0);
/// Degree.
pub const DEG: Unit = Unit::new("deg", BaseDimension::Angle, PI / 180.0);
/// Arcminute.
pub const ARCMIN: Unit = Unit::new("arcmin", BaseDimension::Angle, PI / 10_800.0);
/// Arcsecond.
pub const ARCSEC: Unit = Unit::new("arcsec", BaseDimension::Angle, PI / 648_000.0);
/// Milliarcsecond.
pub const MAS: Unit = Unit::new("mas", BaseDimension::Angle, PI / 648_000_000.0);

struct RegistryEntry {
    unit: Unit,
    aliases: &'static [&'static str],
}

const fn entry(unit: Unit, aliases: &'static [&'static str]) -> RegistryEntry {
    RegistryEntry { unit, aliases }
}

static REGISTRY: &[RegistryEntry] = &[
    entry(M, &["meter"]),
    entry(CM, &[]),
    entry(KM, &[]),
    entry(AU, &["au"]),
    entry(LYR, &["lightyear"]),
    entry(PC, &["parsec"]),
    entry(KPC, &[]),
    entry(MPC, &[]),
    entry(KG, &[]),
    entry(G, &[]),
    entry(SOLMASS, &["M_sun", "Msun"]),
    entry(S, &["second"]),
    entry(MIN, &[]),
    entry(H, &["hr", "hour"]),
    entry(DAY, &["d"]),
    entry(YR, &["year", "a"]),
    entry(MYR, &[]),
    entry(GYR, &[]),
    entry(RAD, &["radian"]),
    entry(DEG, &["degree"]),
    entry(ARCMIN, &[]),
    entry(ARCSEC, &[]),
    entry(MAS, &[]),
];

/// Physical dimension of a potential parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalType {
    /// Pure number (flattening ratios and similar).
    Dimensionless,
    /// Length.
    Length,
    /// Mass.
    Mass,
    /// Time.
    Time,
    /// Angle.
    Angle,
    /// Length per time.
    Speed,
    /// Inverse time.
    Frequency,
}

impl PhysicalType {
    /// Exponents over (length, mass, time, angle).
    pub fn exponents(&self) -> [i32; 4] {
        match self {
            PhysicalType::Dimensionless => [0, 0, 0, 0],
            PhysicalType::Length => [1, 0, 0, 0],
            PhysicalType::Mass => [0, 1, 0, 0],
            PhysicalType::Time => [0, 0, 1, 0],
            PhysicalType::Angle => [0, 0, 0, 1],
            PhysicalType::Speed => [1, 0, -1, 0],
            PhysicalType::Frequency => [0, 0, -1, 0],
        }
    }

    /// Lowercase label used in diagnostics and listings.
    pub fn name(&self) -> &'static str {
        match self {
            PhysicalType::Dimensionless => "dimensionless",
            PhysicalType::Length => "length",
            PhysicalType::Mass => "mass",
            PhysicalType::Time => "time",
            PhysicalType::Angle => "angle",
            PhysicalType::Speed => "speed",
            PhysicalType::Frequency => "frequency",
        }
    }
}

/// A parsed unit expression such as `pc`, `km/s` or `1/Myr`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitExpr {
    si_scale: f64,
    exponents: [i32; 4],
}

impl UnitExpr {
    /// Parses an expression made of registered units joined by `*` and at most one `/`.
    pub fn parse(text: &str) -> Result<Self, GaryError> {
        let (numerator, denominator) = match text.split_once('/') {
            Some((num, den)) => (num, Some(den)),
            None => (text, None),
        };
        let mut expr = UnitExpr {
            si_scale: 1.0,
            exponents: [0; 4],
        };
        expr.accumulate(numerator, 1, text)?;
        if let Some(denominator) = denominator {
            if denominator.contains('/') {
                return Err(format_error(
                    "invalid_unit_expression",
                    format!("unit expression `{text}` has more than one `/`"),
                ));
            }
            expr.accumulate(denominator, -1, text)?;
        }
        Ok(expr)
    }

    fn accumulate(&mut self, factors: &str, sign: i32, original: &str) -> Result<(), GaryError> {
        for factor in factors.split('*').map(str::trim) {
            if factor.is_empty() {
                return Err(format_error(
                    "invalid_unit_expression",
                    format!("unit expression `{original}` has an empty factor"),
                ));
            }
            if factor == "1" {
                continue;
            }
            let unit = Unit::lookup(factor)?;
            self.exponents[unit.dimension.index()] += sign;
            self.si_scale *= unit.si_scale.powi(sign);
        }
        Ok(())
    }

    /// Whether the expression measures the given physical type.
    pub fn measures(&self, physical_type: PhysicalType) -> bool {
        self.exponents == physical_type.exponents()
    }

    /// Size of one unit of the expression in SI.
    pub fn si_scale(&self) -> f64 {
        self.si_scale
    }
}

/// Immutable choice of base units used to interpret parameter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitSystem {
    length: Unit,
    mass: Unit,
    time: Unit,
    angle: Unit,
}

impl UnitSystem {
    /// Builds a unit system, checking that every unit measures its slot.
    pub fn new(length: Unit, mass: Unit, time: Unit, angle: Unit) -> Result<Self, GaryError> {
        let system = Self {
            length,
            mass,
            time,
            angle,
        };
        for dim in BaseDimension::ALL {
            let unit = system.unit(dim);
            if unit.dimension != dim {
                return Err(GaryError::Validation(
                    ErrorInfo::new(
                        "unit_dimension_mismatch",
                        format!("unit `{unit}` does not measure {}", dim.name()),
                    )
                    .with_context("dimension", dim.name())
                    .with_context("unit", unit.symbol),
                ));
            }
        }
        Ok(system)
    }

    /// kpc, solMass, Myr, rad.
    pub const fn galactic() -> Self {
        Self {
            length: KPC,
            mass: SOLMASS,
            time: MYR,
            angle: RAD,
        }
    }

    /// AU, solMass, yr, rad.
    pub const fn solar_system() -> Self {
        Self {
            length: AU,
            mass: SOLMASS,
            time: YR,
            angle: RAD,
        }
    }

    /// m, kg, s, rad.
    pub const fn si() -> Self {
        Self {
            length: M,
            mass: KG,
            time: S,
            angle: RAD,
        }
    }

    /// Resolves one of the preset names (`galactic`, `solarsystem`, `si`).
    pub fn named(name: &str) -> Result<Self, GaryError> {
        match name.trim() {
            "galactic" => Ok(Self::galactic()),
            "solarsystem" | "solar_system" => Ok(Self::solar_system()),
            "si" | "SI" => Ok(Self::si()),
            other => Err(GaryError::Format(
                ErrorInfo::new(
                    "unknown_unit_system",
                    format!("unit system `{other}` is not defined"),
                )
                .with_context("units", other)
                .with_hint("use one of: galactic, solarsystem, si"),
            )),
        }
    }

    /// Returns the preset name when the system matches one.
    pub fn name(&self) -> Option<&'static str> {
        if *self == Self::galactic() {
            Some("galactic")
        } else if *self == Self::solar_system() {
            Some("solarsystem")
        } else if *self == Self::si() {
            Some("si")
        } else {
            None
        }
    }

    /// Resolves an explicit `dimension -> unit` mapping. Angle defaults to radians.
    pub fn from_bases(bases: &BTreeMap<String, String>) -> Result<Self, GaryError> {
        let mut slots: [Option<Unit>; 4] = [None, None, None, Some(RAD)];
        for (key, symbol) in bases {
            let dim = BaseDimension::from_name(key).ok_or_else(|| {
                GaryError::Format(
                    ErrorInfo::new(
                        "unknown_dimension",
                        format!("`{key}` is not a base dimension"),
                    )
                    .with_context("dimension", key.as_str())
                    .with_hint("expected keys: length, mass, time, angle"),
                )
            })?;
            let unit = Unit::lookup(symbol)?;
            if unit.dimension != dim {
                return Err(GaryError::Format(
                    ErrorInfo::new(
                        "unit_dimension_mismatch",
                        format!("unit `{unit}` does not measure {}", dim.name()),
                    )
                    .with_context("dimension", dim.name())
                    .with_context("unit", unit.symbol),
                ));
            }
            slots[dim.index()] = Some(unit);
        }
        match slots {
            [Some(length), Some(mass), Some(time), Some(angle)] => Ok(Self {
                length,
                mass,
                time,
                angle,
            }),
            _ => {
                let missing = BaseDimension::ALL
                    .into_iter()
                    .filter(|dim| slots[dim.index()].is_none())
                    .map(|dim| dim.name())
                    .collect::<Vec<_>>()
                    .join(", ");
                Err(GaryError::Format(
                    ErrorInfo::new(
                        "incomplete_unit_system",
                        "unit system is missing base units",
                    )
                    .with_context("missing", missing),
                ))
            }
        }
    }

    /// Returns the `dimension -> symbol` mapping written to documents.
    pub fn to_bases(&self) -> BTreeMap<String, String> {
        BaseDimension::ALL
            .into_iter()
            .map(|dim| (dim.name().to_string(), self.unit(dim).symbol.to_string()))
            .collect()
    }

    /// Base unit for the given dimension.
    pub fn unit(&self, dim: BaseDimension) -> Unit {
        match dim {
            BaseDimension::Length => self.length,
            BaseDimension::Mass => self.mass,
            BaseDimension::Time => self.time,
            BaseDimension::Angle => self.angle,
        }
    }

    /// SI size of one unit of `physical_type` in this system.
    pub fn si_factor(&self, physical_type: PhysicalType) -> f64 {
        BaseDimension::ALL
            .into_iter()
            .zip(physical_type.exponents())
            .map(|(dim, exp)| self.unit(dim).si_scale.powi(exp))
            .product()
    }

    /// Re-expresses `value` of the given type in the units of `target`.
    pub fn convert(&self, value: f64, physical_type: PhysicalType, target: &UnitSystem) -> f64 {
        if self == target {
            return value;
        }
        value * self.si_factor(physical_type) / target.si_factor(physical_type)
    }

    /// Converts a value given in `expr` units into this system.
    pub fn absorb(&self, value: f64, expr: &UnitExpr) -> f64 {
        let exponents = expr.exponents;
        let factor: f64 = BaseDimension::ALL
            .into_iter()
            .zip(exponents)
            .map(|(dim, exp)| self.unit(dim).si_scale.powi(exp))
            .product();
        value * expr.si_scale / factor
    }
}

impl Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{},{},{})",
            self.length, self.time, self.mass, self.angle
        )
    }
}
