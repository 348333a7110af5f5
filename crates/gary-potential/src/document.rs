//! Document shape shared by the YAML and JSON encodings.
//!
//! Written documents always spell units as an explicit base mapping and list
//! parameters sorted by name. Reading is more lenient: `units` may name a
//! preset system, angle may be omitted, and any parameter may carry its own
//! unit in a sibling `<name>_unit` key.

use std::collections::BTreeMap;
use std::path::Path;

use gary_core::errors::{ErrorInfo, GaryError};
use gary_core::units::{UnitExpr, UnitSystem};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::composite::{CompositePotential, Potential};
use crate::kind::PotentialKind;
use crate::model::{validate_parameters, PotentialModel};
use crate::serde::{from_json_slice, from_yaml_slice, to_json_string, to_yaml_string};

const COMPOSITE_TYPE: &str = "composite";
const UNIT_SUFFIX: &str = "_unit";

fn format_error(code: &str, message: impl Into<String>) -> ErrorInfo {
    ErrorInfo::new(code, message)
}

fn in_component(err: GaryError, name: &str) -> GaryError {
    match err {
        GaryError::Format(info) => GaryError::Format(info.with_context("component", name)),
        other => other,
    }
}

/// Textual encoding of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    /// Block-style YAML.
    #[default]
    Yaml,
    /// Pretty-printed JSON.
    Json,
}

impl DocumentFormat {
    /// Picks the format from a file extension, falling back to YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }

    /// Lowercase name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            DocumentFormat::Yaml => "yaml",
            DocumentFormat::Json => "json",
        }
    }
}

/// Serialized form of a single potential.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentDocument {
    /// Class name of the potential family.
    pub class: String,
    /// Parameter values in the document's units.
    pub parameters: BTreeMap<String, f64>,
    /// `dimension -> unit` mapping.
    pub units: BTreeMap<String, String>,
}

/// Component entry of a composite document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedComponentDocument {
    /// Component name.
    pub name: String,
    /// Component body.
    #[serde(flatten)]
    pub component: ComponentDocument,
}

/// Serialized form of a composite potential.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeDocument {
    /// Always `composite`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Components in order.
    pub components: Vec<NamedComponentDocument>,
}

/// Top-level document as written.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PotentialDocument {
    /// Single potential.
    Single(ComponentDocument),
    /// Composite potential.
    Composite(CompositeDocument),
}

impl PotentialDocument {
    /// Renders the document in the requested encoding.
    pub fn render(&self, format: DocumentFormat) -> Result<String, GaryError> {
        match format {
            DocumentFormat::Yaml => to_yaml_string(self),
            DocumentFormat::Json => to_json_string(self),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDocument {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    class: Option<String>,
    #[serde(default)]
    parameters: Option<BTreeMap<String, RawValue>>,
    #[serde(default)]
    units: Option<RawUnits>,
    #[serde(default)]
    components: Vec<RawDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawUnits {
    Named(String),
    Bases(BTreeMap<String, String>),
}

impl RawUnits {
    fn resolve(&self) -> Result<UnitSystem, GaryError> {
        match self {
            RawUnits::Named(name) => UnitSystem::named(name),
            RawUnits::Bases(bases) => UnitSystem::from_bases(bases),
        }
    }
}

fn decode_component(raw: RawDocument) -> Result<PotentialModel, GaryError> {
    if raw.kind.is_some() || !raw.components.is_empty() {
        return Err(GaryError::Format(format_error(
            "nested_composite",
            "composite potentials cannot be nested",
        )));
    }
    let class = raw.class.ok_or_else(|| {
        GaryError::Format(
            format_error("missing_class", "document does not name a potential class")
                .with_hint("add a `class` field such as `IsochronePotential`"),
        )
    })?;
    let kind = PotentialKind::parse(&class)?;
    let units = raw
        .units
        .ok_or_else(|| {
            GaryError::Format(
                format_error("missing_units", "document does not specify a unit system")
                    .with_context("class", kind.class_name())
                    .with_hint("add `units: galactic` or an explicit base-unit mapping"),
            )
        })?
        .resolve()?;

    let mut values = BTreeMap::new();
    let mut overrides = BTreeMap::new();
    for (key, value) in raw.parameters.unwrap_or_default() {
        if let Some(stem) = key.strip_suffix(UNIT_SUFFIX) {
            match value {
                RawValue::Text(expr) => {
                    overrides.insert(stem.to_string(), expr);
                }
                _ => {
                    return Err(GaryError::Format(
                        format_error("invalid_unit", format!("`{key}` must be a unit string"))
                            .with_context("class", kind.class_name())
                            .with_context("parameter", stem),
                    ))
                }
            }
            continue;
        }
        match value {
            RawValue::Number(number) => {
                values.insert(key, number);
            }
            RawValue::Text(_) | RawValue::Other(_) => {
                return Err(GaryError::Format(
                    format_error(
                        "non_numeric_parameter",
                        format!("parameter `{key}` is not a number"),
                    )
                    .with_context("class", kind.class_name())
                    .with_context("parameter", key),
                ))
            }
        }
    }

    for (stem, expr) in overrides {
        let Some(spec) = kind.parameter(&stem) else {
            return Err(GaryError::Format(
                format_error(
                    "unexpected_parameter",
                    format!("unit given for unknown parameter `{stem}`"),
                )
                .with_context("class", kind.class_name())
                .with_context("parameter", stem),
            ));
        };
        let parsed = UnitExpr::parse(&expr)?;
        if !parsed.measures(spec.physical_type) {
            return Err(GaryError::Format(
                format_error(
                    "unit_dimension_mismatch",
                    format!(
                        "unit `{expr}` does not measure {} for parameter `{stem}`",
                        spec.physical_type.name()
                    ),
                )
                .with_context("class", kind.class_name())
                .with_context("parameter", stem.as_str())
                .with_context("unit", expr.as_str()),
            ));
        }
        if let Some(value) = values.get_mut(&stem) {
            *value = units.absorb(*value, &parsed);
        }
    }

    PotentialModel::new(kind, values, units).map_err(GaryError::into_format)
}

fn decode(mut raw: RawDocument) -> Result<Potential, GaryError> {
    let Some(kind) = raw.kind.take() else {
        if !raw.components.is_empty() {
            return Err(GaryError::Format(
                format_error(
                    "missing_document_type",
                    "document lists components but does not declare its type",
                )
                .with_hint("add `type: composite`"),
            ));
        }
        if let Some(name) = raw.name.take() {
            return Err(GaryError::Format(
                format_error("unexpected_field", "only composite components carry a `name`")
                    .with_context("field", "name")
                    .with_context("name", name),
            ));
        }
        return decode_component(raw).map(Potential::Single);
    };
    if kind != COMPOSITE_TYPE {
        return Err(GaryError::Format(
            format_error(
                "unknown_document_type",
                format!("document type `{kind}` is not supported"),
            )
            .with_context("type", kind.as_str())
            .with_hint("omit `type` for a single potential or use `type: composite`"),
        ));
    }
    if raw.components.is_empty() {
        return Err(GaryError::Format(format_error(
            "empty_composite",
            "composite document lists no components",
        )));
    }
    let mut components = Vec::with_capacity(raw.components.len());
    for (idx, mut component) in raw.components.into_iter().enumerate() {
        let name = component.name.take().unwrap_or_else(|| idx.to_string());
        let model = decode_component(component).map_err(|err| in_component(err, &name))?;
        components.push((name, model));
    }
    CompositePotential::from_components(components)
        .map(Potential::Composite)
        .map_err(GaryError::into_format)
}

/// Parses document bytes into a potential.
pub fn parse_document(bytes: &[u8], format: DocumentFormat) -> Result<Potential, GaryError> {
    let raw: RawDocument = match format {
        DocumentFormat::Yaml => from_yaml_slice(bytes)?,
        DocumentFormat::Json => from_json_slice(bytes)?,
    };
    decode(raw)
}

/// Values that can be written as a potential document.
pub trait ToDocument {
    /// Builds the serializable document form.
    fn to_document(&self) -> Result<PotentialDocument, GaryError>;
}

/// Values that can be produced from a decoded document.
pub trait FromDocument: Sized {
    /// Narrows a decoded potential to `Self`.
    fn from_potential(potential: Potential) -> Result<Self, GaryError>;
}

fn component_document(model: &PotentialModel) -> Result<ComponentDocument, GaryError> {
    validate_parameters(model.kind(), model.parameters()).map_err(GaryError::into_format)?;
    Ok(ComponentDocument {
        class: model.kind().class_name().to_string(),
        parameters: model.parameters().clone(),
        units: model.units().to_bases(),
    })
}

impl ToDocument for PotentialModel {
    fn to_document(&self) -> Result<PotentialDocument, GaryError> {
        component_document(self).map(PotentialDocument::Single)
    }
}

impl ToDocument for CompositePotential {
    fn to_document(&self) -> Result<PotentialDocument, GaryError> {
        let components = self
            .iter()
            .map(|(name, model)| {
                Ok(NamedComponentDocument {
                    name: name.to_string(),
                    component: component_document(model)?,
                })
            })
            .collect::<Result<Vec<_>, GaryError>>()?;
        Ok(PotentialDocument::Composite(CompositeDocument {
            kind: COMPOSITE_TYPE.to_string(),
            components,
        }))
    }
}

impl ToDocument for Potential {
    fn to_document(&self) -> Result<PotentialDocument, GaryError> {
        match self {
            Potential::Single(model) => model.to_document(),
            Potential::Composite(composite) => composite.to_document(),
        }
    }
}

impl FromDocument for Potential {
    fn from_potential(potential: Potential) -> Result<Self, GaryError> {
        Ok(potential)
    }
}

impl FromDocument for PotentialModel {
    fn from_potential(potential: Potential) -> Result<Self, GaryError> {
        match potential {
            Potential::Single(model) => Ok(model),
            Potential::Composite(composite) => Err(GaryError::Format(
                format_error(
                    "expected_single_potential",
                    "document describes a composite potential",
                )
                .with_context("components", composite.len().to_string())
                .with_hint("read it as a CompositePotential or Potential"),
            )),
        }
    }
}

impl FromDocument for CompositePotential {
    fn from_potential(potential: Potential) -> Result<Self, GaryError> {
        match potential {
            Potential::Single(model) => CompositePotential::from_components([("0", model)]),
            Potential::Composite(composite) => Ok(composite),
        }
    }
}
