//! # Schema Checking
//!
//! Runtime validation of decoded documents against a JSON Schema
//! (Draft 2020-12).
//!
//! A [`SchemaValidator`] compiles one schema once and checks any number of
//! instances against it. Failures carry every violation with the instance
//! path, the schema path that triggered it, and a message.
//!
//! Schemas are self-contained: `$ref`s to anything but the schema's own
//! `#/...` definitions are not resolved.

use std::fmt;

use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

/// The schema itself is unusable.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema could not be compiled into a validator.
    #[error("invalid schema: {reason}")]
    Invalid {
        /// Reason reported by the schema compiler.
        reason: String,
    },
}

/// A single validation violation with structured context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// JSON Pointer path to the violating field in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of validation violations. Never empty when returned as an error.
#[derive(Debug, Clone)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }

    /// All violations on one line, separated by `; `.
    pub fn summary(&self) -> String {
        self.violations
            .iter()
            .map(|v| v.to_string().trim_start().to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// A compiled JSON Schema backed by the `jsonschema` crate.
///
/// `SchemaValidator` is `Send + Sync`; one instance can be shared by every
/// caller of a config validator.
pub struct SchemaValidator {
    schema: Value,
    compiled: Validator,
}

impl SchemaValidator {
    /// Compile `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Invalid`] if the schema is not a valid
    /// Draft 2020-12 schema.
    pub fn new(schema: Value) -> Result<Self, SchemaError> {
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        let compiled = opts.build(&schema).map_err(|e| SchemaError::Invalid {
            reason: e.to_string(),
        })?;
        Ok(Self { schema, compiled })
    }

    /// The schema this validator was compiled from.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    pub fn is_valid(&self, instance: &Value) -> bool {
        self.compiled.is_valid(instance)
    }

    /// Check `instance`, collecting every violation.
    ///
    /// # Errors
    ///
    /// Returns the non-empty set of violations if the instance is invalid.
    pub fn check(&self, instance: &Value) -> Result<(), ValidationViolations> {
        let violations: Vec<Violation> = self
            .compiled
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationViolations { violations })
        }
    }
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_schema_accepts_anything() {
        let validator = SchemaValidator::new(json!({})).unwrap();
        for instance in [json!(null), json!([1, 2]), json!({"a": "b"}), json!("x")] {
            assert!(validator.check(&instance).is_ok(), "rejected {instance}");
        }
    }

    #[test]
    fn array_schema_rejects_object() {
        let validator = SchemaValidator::new(json!({"type": "array"})).unwrap();
        assert!(validator.is_valid(&json!(["foo", "bar"])));

        let violations = validator.check(&json!({"foo": "bar"})).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations.violations()[0].instance_path, "");
        assert!(violations.violations()[0].schema_path.contains("type"));
    }

    #[test]
    fn nested_violations_report_instance_path() {
        let schema = json!({
            "type": "array",
            "items": {
                "type": "object",
                "properties": {"id": {"type": "string"}},
                "required": ["id"]
            }
        });
        let validator = SchemaValidator::new(schema).unwrap();
        let violations = validator
            .check(&json!([{"id": "ok"}, {"id": 3}, {}]))
            .unwrap_err();

        let paths: Vec<&str> = violations
            .violations()
            .iter()
            .map(|v| v.instance_path.as_str())
            .collect();
        assert!(paths.contains(&"/1/id"), "got: {paths:?}");
        assert!(paths.contains(&"/2"), "got: {paths:?}");
    }

    #[test]
    fn invalid_schema_is_rejected_at_construction() {
        let err = SchemaValidator::new(json!({"type": 12})).unwrap_err();
        assert!(matches!(err, SchemaError::Invalid { .. }));
    }

    #[test]
    fn schema_is_retained() {
        let schema = json!({"type": "array"});
        let validator = SchemaValidator::new(schema.clone()).unwrap();
        assert_eq!(validator.schema(), &schema);
    }

    #[test]
    fn summary_is_single_line() {
        let validator = SchemaValidator::new(json!({
            "type": "object",
            "required": ["repo", "sha"]
        }))
        .unwrap();
        let violations = validator.check(&json!({})).unwrap_err();
        let summary = violations.summary();

        assert_eq!(violations.len(), 2);
        assert!(!summary.contains('\n'), "got: {summary}");
        assert!(summary.contains("\"repo\"") && summary.contains("\"sha\""), "got: {summary}");
        assert!(summary.contains("; "), "got: {summary}");
        assert!(!summary.starts_with(' '), "got: {summary}");
    }

    #[test]
    fn violation_display_root() {
        let v = Violation {
            instance_path: String::new(),
            schema_path: "/type".to_string(),
            message: r#"{"foo":"bar"} is not of type "array""#.to_string(),
        };
        assert!(v.to_string().contains("(root)"));
    }

    #[test]
    fn violation_display_nested() {
        let v = Violation {
            instance_path: "/0/hooks/0/id".to_string(),
            schema_path: "/items/properties/hooks/items/properties/id/type".to_string(),
            message: r#"3 is not of type "string""#.to_string(),
        };
        let display = v.to_string();
        assert!(display.contains("/0/hooks/0/id"));
        assert!(display.contains("is not of type"));
    }
}
