//! Stele Registry - metadata schema registry
//!
//! Validates a configuration's free-form metadata against the shape
//! declared for its (type, subtype). The registry is an immutable,
//! thread-safe lookup table built once at process start (from a TOML
//! definition file or via the builder) and injected by handle — it is
//! never reached through ambient global state.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use stele_common::ValidationOutcome;

/// Declared kind of a single metadata field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Array,
    Object,
    Any,
}

impl FieldKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Array => value.is_array(),
            FieldKind::Object => value.is_object(),
            FieldKind::Any => true,
        }
    }

    fn name(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Array => "array",
            FieldKind::Object => "object",
            FieldKind::Any => "any",
        }
    }
}

/// Declared spec of a single metadata field.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct FieldSpec {
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
}

impl FieldSpec {
    pub fn required(kind: FieldKind) -> Self {
        Self {
            kind,
            required: true,
        }
    }

    pub fn optional(kind: FieldKind) -> Self {
        Self {
            kind,
            required: false,
        }
    }
}

/// Resolved metadata shape for one (type, subtype) pair.
#[derive(Clone, Debug, Default)]
struct Shape {
    fields: HashMap<String, FieldSpec>,
}

impl Shape {
    fn validate(&self, metadata: &Map<String, Value>) -> ValidationOutcome {
        let mut errors = Vec::new();

        for (name, spec) in &self.fields {
            match metadata.get(name) {
                Some(value) => {
                    if !spec.kind.matches(value) {
                        errors.push(format!("field '{}' must be a {}", name, spec.kind.name()));
                    }
                }
                None => {
                    if spec.required {
                        errors.push(format!("missing required field '{}'", name));
                    }
                }
            }
        }

        for name in metadata.keys() {
            if !self.fields.contains_key(name) {
                errors.push(format!("unknown field '{}'", name));
            }
        }

        if errors.is_empty() {
            ValidationOutcome::ok()
        } else {
            errors.sort();
            ValidationOutcome::invalid(errors)
        }
    }
}

#[derive(Clone, Debug, Default)]
struct TypeSchema {
    base: Shape,
    // Subtype shapes are resolved at build time: base fields merged with
    // the subtype's own, the subtype winning on collision.
    subtypes: HashMap<String, Shape>,
}

/// Immutable lookup table of declared configuration types.
#[derive(Clone, Debug, Default)]
pub struct SchemaRegistry {
    types: HashMap<String, TypeSchema>,
}

impl SchemaRegistry {
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::default()
    }

    /// Build a registry from a TOML definition document.
    pub fn from_toml_str(doc: &str) -> anyhow::Result<Self> {
        let def: RegistryDef = toml::from_str(doc)?;
        let mut builder = Self::builder();

        for (type_name, type_def) in def.types {
            builder = builder.schema_type(&type_name, type_def.fields);
            for (subtype_name, subtype_def) in type_def.subtypes {
                builder = builder.subtype(&type_name, &subtype_name, subtype_def.fields);
            }
        }

        Ok(builder.build())
    }

    pub fn type_exists(&self, r#type: &str) -> bool {
        self.types.contains_key(r#type)
    }

    pub fn subtype_exists(&self, r#type: &str, subtype: &str) -> bool {
        self.types
            .get(r#type)
            .is_some_and(|t| t.subtypes.contains_key(subtype))
    }

    /// Validate a metadata map against the shape declared for
    /// (type, subtype). A `None` subtype validates against the type's
    /// base shape.
    pub fn validate_metadata(
        &self,
        r#type: &str,
        subtype: Option<&str>,
        metadata: &Map<String, Value>,
    ) -> ValidationOutcome {
        let Some(type_schema) = self.types.get(r#type) else {
            return ValidationOutcome::invalid(vec![format!("unknown type '{}'", r#type)]);
        };

        let shape = match subtype {
            Some(subtype) => match type_schema.subtypes.get(subtype) {
                Some(shape) => shape,
                None => {
                    return ValidationOutcome::invalid(vec![format!(
                        "unknown subtype '{}' for type '{}'",
                        subtype, r#type
                    )]);
                }
            },
            None => &type_schema.base,
        };

        shape.validate(metadata)
    }
}

/// Builder for programmatic registry construction.
#[derive(Debug, Default)]
pub struct SchemaRegistryBuilder {
    types: HashMap<String, TypeSchema>,
}

impl SchemaRegistryBuilder {
    /// Declare a type and its base metadata shape.
    pub fn schema_type(
        mut self,
        name: &str,
        fields: impl IntoIterator<Item = (String, FieldSpec)>,
    ) -> Self {
        let entry = self.types.entry(name.to_string()).or_default();
        entry.base.fields.extend(fields);
        self
    }

    /// Declare a subtype under an existing type. The subtype's shape is
    /// the base shape extended by the given fields.
    pub fn subtype(
        mut self,
        type_name: &str,
        subtype_name: &str,
        fields: impl IntoIterator<Item = (String, FieldSpec)>,
    ) -> Self {
        let entry = self.types.entry(type_name.to_string()).or_default();
        let mut shape = entry.base.clone();
        shape.fields.extend(fields);
        entry.subtypes.insert(subtype_name.to_string(), shape);
        self
    }

    pub fn build(self) -> SchemaRegistry {
        SchemaRegistry { types: self.types }
    }
}

// TOML definition document shape.

#[derive(Debug, Deserialize)]
struct RegistryDef {
    #[serde(default)]
    types: HashMap<String, TypeDef>,
}

#[derive(Debug, Deserialize)]
struct TypeDef {
    #[serde(default)]
    fields: HashMap<String, FieldSpec>,
    #[serde(default)]
    subtypes: HashMap<String, SubtypeDef>,
}

#[derive(Debug, Deserialize)]
struct SubtypeDef {
    #[serde(default)]
    fields: HashMap<String, FieldSpec>,
}
