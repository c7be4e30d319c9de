//! Backend-dialect predicate fragments for the protocol engine's
//! expression parser.
//!
//! The engine walks its expression tree and calls into this translator to
//! render alias-qualified comparisons; the finished fragment comes back to
//! the provider as a [`super::FilterInfo`] and is attached verbatim.

use serde_json::Value;

/// Renders predicate fragments against one aliased query root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionTranslator {
    alias: String,
}

impl ExpressionTranslator {
    pub fn new(alias: impl Into<String>) -> Self {
        ExpressionTranslator {
            alias: alias.into(),
        }
    }

    /// Alias-qualified property reference: `r.name`.
    pub fn property(&self, name: &str) -> String {
        format!("{}.{}", self.alias, name)
    }

    /// Render a literal. Strings are single-quoted with embedded quotes
    /// doubled; null, booleans, and numbers render bare.
    pub fn literal(&self, value: &Value) -> String {
        match value {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => format!("'{}'", s.replace('\'', "''")),
            other => format!("'{}'", other.to_string().replace('\'', "''")),
        }
    }

    pub fn eq(&self, left: &str, right: &str) -> String {
        format!("({} = {})", left, right)
    }

    pub fn ne(&self, left: &str, right: &str) -> String {
        format!("({} <> {})", left, right)
    }

    pub fn gt(&self, left: &str, right: &str) -> String {
        format!("({} > {})", left, right)
    }

    pub fn ge(&self, left: &str, right: &str) -> String {
        format!("({} >= {})", left, right)
    }

    pub fn lt(&self, left: &str, right: &str) -> String {
        format!("({} < {})", left, right)
    }

    pub fn le(&self, left: &str, right: &str) -> String {
        format!("({} <= {})", left, right)
    }

    pub fn and(&self, left: &str, right: &str) -> String {
        format!("({} AND {})", left, right)
    }

    pub fn or(&self, left: &str, right: &str) -> String {
        format!("({} OR {})", left, right)
    }

    pub fn not(&self, operand: &str) -> String {
        format!("(NOT {})", operand)
    }
}
