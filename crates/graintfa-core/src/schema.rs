//! Configuration schemas and values for element instances.
//!
//! Every element declares a [`ConfigSchema`]: an ordered set of named
//! fields, each of a [`ConfigField`] kind. The host application turns the
//! schema into input widgets, stores the user's answers as [`ConfigValues`]
//! on the instance, and hands them back to the element when rendering.
//!
//! # Example
//!
//! ```
//! use graintfa_core::schema::{ConfigField, ConfigSchema, ConfigValue};
//!
//! let schema = ConfigSchema::new()
//!     .with_field("label", ConfigField::StringInput)
//!     .with_field("rows", ConfigField::BoundNumberInput { min: 1.0, max: 6.0 });
//!
//! let mut values = schema.defaults();
//! values.insert("rows".to_string(), ConfigValue::Number(3.0));
//! assert!(schema.check(&values).is_ok());
//!
//! values.insert("rows".to_string(), ConfigValue::Number(9.0));
//! assert!(schema.check(&values).is_err());
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A validator for [`ConfigField::ValidatedStringInput`].
///
/// Returns an error message describing why the value was rejected.
pub type StringValidator = fn(&str) -> Result<(), String>;

/// The kind of input a configuration field expects.
#[derive(Clone)]
pub enum ConfigField {
    /// Free-form text.
    StringInput,
    /// Text accepted only when `validator` returns `Ok`.
    ValidatedStringInput { validator: StringValidator },
    /// A number in the inclusive range `min..=max`.
    BoundNumberInput { min: f64, max: f64 },
    /// Any finite number.
    UnboundNumberInput,
    /// A choice from `values`, shown as a dropdown.
    Dropdown { values: Vec<String> },
    /// A choice from `values`, shown as radio buttons.
    Radio { values: Vec<String> },
    /// A file whose name ends in one of `extensions`.
    FileInput { extensions: Vec<String> },
}

impl ConfigField {
    /// Returns a short name for this kind of field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StringInput => "string_input",
            Self::ValidatedStringInput { .. } => "validated_string_input",
            Self::BoundNumberInput { .. } => "bound_number_input",
            Self::UnboundNumberInput => "unbound_number_input",
            Self::Dropdown { .. } => "dropdown",
            Self::Radio { .. } => "radio",
            Self::FileInput { .. } => "file_input",
        }
    }

    /// Returns the value a freshly placed instance starts with.
    ///
    /// File inputs start empty and have no default.
    pub fn default_value(&self) -> Option<ConfigValue> {
        match self {
            Self::StringInput | Self::ValidatedStringInput { .. } => {
                Some(ConfigValue::Text(String::new()))
            }
            Self::BoundNumberInput { min, .. } => Some(ConfigValue::Number(*min)),
            Self::UnboundNumberInput => Some(ConfigValue::Number(0.0)),
            Self::Dropdown { values } | Self::Radio { values } => Some(ConfigValue::Selection(
                values.first().cloned().into_iter().collect(),
            )),
            Self::FileInput { .. } => None,
        }
    }

    /// Checks that `value` is acceptable for this field.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValueError`] when the value has the wrong type, is out
    /// of range, is not one of the offered choices, has a disallowed file
    /// extension, or is rejected by a string validator.
    pub fn check(&self, value: &ConfigValue) -> Result<(), ConfigValueError> {
        match (self, value) {
            (Self::StringInput, ConfigValue::Text(_)) => Ok(()),
            (Self::ValidatedStringInput { validator }, ConfigValue::Text(text)) => {
                validator(text).map_err(ConfigValueError::Rejected)
            }
            (Self::BoundNumberInput { min, max }, ConfigValue::Number(number)) => {
                if number.is_finite() && *min <= *number && *number <= *max {
                    Ok(())
                } else {
                    Err(ConfigValueError::OutOfRange {
                        value: *number,
                        min: *min,
                        max: *max,
                    })
                }
            }
            (Self::UnboundNumberInput, ConfigValue::Number(number)) => {
                if number.is_finite() {
                    Ok(())
                } else {
                    Err(ConfigValueError::Rejected(format!(
                        "`{number}` is not a finite number"
                    )))
                }
            }
            (Self::Dropdown { values } | Self::Radio { values }, ConfigValue::Selection(chosen)) => {
                match chosen.iter().find(|choice| !values.contains(*choice)) {
                    Some(choice) => Err(ConfigValueError::UnknownChoice(choice.clone())),
                    None => Ok(()),
                }
            }
            (Self::FileInput { extensions }, ConfigValue::File(file)) => {
                let accepted = extensions.is_empty()
                    || extensions.iter().any(|extension| {
                        file.filename()
                            .rsplit_once('.')
                            .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case(extension))
                    });
                if accepted {
                    Ok(())
                } else {
                    Err(ConfigValueError::Rejected(format!(
                        "`{}` does not have one of the extensions {extensions:?}",
                        file.filename()
                    )))
                }
            }
            (field, value) => Err(ConfigValueError::WrongType {
                expected: field.kind(),
                found: value.kind(),
            }),
        }
    }
}

impl fmt::Debug for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundNumberInput { min, max } => f
                .debug_struct("BoundNumberInput")
                .field("min", min)
                .field("max", max)
                .finish(),
            Self::Dropdown { values } | Self::Radio { values } => {
                f.debug_tuple(self.kind()).field(values).finish()
            }
            Self::FileInput { extensions } => f
                .debug_struct("FileInput")
                .field("extensions", extensions)
                .finish(),
            _ => f.write_str(self.kind()),
        }
    }
}

/// A reference to a user-provided file, as stored in a scene document.
///
/// `blob` is whatever handle the host uses to fetch the contents (for
/// example an object URL); `filename` is the original file name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRef {
    blob: String,
    filename: String,
}

impl FileRef {
    pub fn new(blob: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            blob: blob.into(),
            filename: filename.into(),
        }
    }

    pub fn blob(&self) -> &str {
        &self.blob
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }
}

/// A concrete value for one configuration field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Text(String),
    Number(f64),
    Selection(Vec<String>),
    File(FileRef),
}

impl ConfigValue {
    fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::Selection(_) => "selection",
            Self::File(_) => "file",
        }
    }
}

/// The values of an element instance, keyed by field name.
pub type ConfigValues = IndexMap<String, ConfigValue>;

/// A value that does not satisfy its field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValueError {
    #[error("expected a {expected} value, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{value} is outside the range {min}..={max}")]
    OutOfRange { value: f64, min: f64, max: f64 },

    #[error("`{0}` is not one of the offered choices")]
    UnknownChoice(String),

    #[error("{0}")]
    Rejected(String),

    #[error("field `{key}`: {source}")]
    Field {
        key: String,
        #[source]
        source: Box<ConfigValueError>,
    },
}

/// The ordered set of configurable fields an element exposes.
#[derive(Debug, Clone, Default)]
pub struct ConfigSchema {
    fields: IndexMap<String, ConfigField>,
}

impl ConfigSchema {
    /// Creates a schema with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field (builder style). A repeated key replaces the earlier field.
    pub fn with_field(mut self, key: impl Into<String>, field: ConfigField) -> Self {
        self.fields.insert(key.into(), field);
        self
    }

    pub fn get(&self, key: &str) -> Option<&ConfigField> {
        self.fields.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Iterates fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigField)> {
        self.fields.iter().map(|(key, field)| (key.as_str(), field))
    }

    /// Returns the starting values for a newly placed instance.
    pub fn defaults(&self) -> ConfigValues {
        self.fields
            .iter()
            .filter_map(|(key, field)| field.default_value().map(|value| (key.clone(), value)))
            .collect()
    }

    /// Checks every value whose key the schema declares.
    ///
    /// Keys the schema does not know are ignored, and missing keys are
    /// allowed; elements fall back to their own defaults for those.
    ///
    /// # Errors
    ///
    /// Returns the first failing field wrapped in [`ConfigValueError::Field`].
    pub fn check(&self, values: &ConfigValues) -> Result<(), ConfigValueError> {
        for (key, value) in values {
            if let Some(field) = self.fields.get(key) {
                field.check(value).map_err(|err| ConfigValueError::Field {
                    key: key.clone(),
                    source: Box::new(err),
                })?;
            }
        }
        Ok(())
    }
}
