//! Comparison rules checked against input values
//!
//! A rule is the pair `[operator, operand]`, e.g. `[">", 10]` or
//! `["in", ["a", "b"]]`. Rules are usually written by the programmer, so a
//! badly formed rule is reported as [`SiftError::MalformedRule`], a
//! programming error, while a value that fails a well-formed rule is reported
//! as [`SiftError::ComparisonFailed`], a bad request.

use serde_json::Value;
use sift_format::value::{loose_cmp, loose_eq};
use sift_format::{Result, SiftError};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

const SUPPORTED: &str = "only '>', '>=', '<', '<=', '==', '===', 'in' are supported";

/// Comparison operator of a [`Rule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `==`, loose equality
    Eq,
    /// `===`, exact equality of kind and value
    StrictEq,
    /// `in`, loose membership in an array or in the values of an object
    In,
}

impl Operator {
    /// Textual form of the operator
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Eq => "==",
            Operator::StrictEq => "===",
            Operator::In => "in",
        }
    }
}

impl FromStr for Operator {
    type Err = SiftError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            ">" => Ok(Operator::Gt),
            ">=" => Ok(Operator::Ge),
            "<" => Ok(Operator::Lt),
            "<=" => Ok(Operator::Le),
            "==" => Ok(Operator::Eq),
            "===" => Ok(Operator::StrictEq),
            "in" => Ok(Operator::In),
            other => Err(SiftError::MalformedRule {
                reason: format!("unsupported operator `{other}`, {SUPPORTED}"),
            }),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Comparison applied to a value before type coercion
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    operator: Operator,
    operand: Value,
}

impl Rule {
    /// Build a rule; `in` requires an array or object operand
    pub fn new(operator: Operator, operand: impl Into<Value>) -> Result<Self> {
        let operand = operand.into();
        if operator == Operator::In && !(operand.is_array() || operand.is_object()) {
            return Err(SiftError::MalformedRule {
                reason: format!("`in` needs an array operand, got {operand}"),
            });
        }
        Ok(Self { operator, operand })
    }

    /// Build a rule from an operator symbol
    pub fn parse(operator: &str, operand: impl Into<Value>) -> Result<Self> {
        Self::new(operator.parse()?, operand)
    }

    /// `value > operand`
    pub fn gt(operand: impl Into<Value>) -> Self {
        Self::comparison(Operator::Gt, operand)
    }

    /// `value >= operand`
    pub fn ge(operand: impl Into<Value>) -> Self {
        Self::comparison(Operator::Ge, operand)
    }

    /// `value < operand`
    pub fn lt(operand: impl Into<Value>) -> Self {
        Self::comparison(Operator::Lt, operand)
    }

    /// `value <= operand`
    pub fn le(operand: impl Into<Value>) -> Self {
        Self::comparison(Operator::Le, operand)
    }

    /// `value == operand`
    pub fn equal(operand: impl Into<Value>) -> Self {
        Self::comparison(Operator::Eq, operand)
    }

    /// `value === operand`
    pub fn identical(operand: impl Into<Value>) -> Self {
        Self::comparison(Operator::StrictEq, operand)
    }

    /// `value in items`
    pub fn one_of<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            operator: Operator::In,
            operand: Value::Array(items.into_iter().map(Into::into).collect()),
        }
    }

    fn comparison(operator: Operator, operand: impl Into<Value>) -> Self {
        Self {
            operator,
            operand: operand.into(),
        }
    }

    /// Operator of the rule
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Operand of the rule
    pub fn operand(&self) -> &Value {
        &self.operand
    }

    /// Whether `value` satisfies the rule
    pub fn matches(&self, value: &Value) -> bool {
        let ordering = || loose_cmp(value, &self.operand);
        match self.operator {
            Operator::Gt => ordering() == Some(Ordering::Greater),
            Operator::Ge => matches!(ordering(), Some(Ordering::Greater | Ordering::Equal)),
            Operator::Lt => ordering() == Some(Ordering::Less),
            Operator::Le => matches!(ordering(), Some(Ordering::Less | Ordering::Equal)),
            Operator::Eq => loose_eq(value, &self.operand),
            Operator::StrictEq => value == &self.operand,
            Operator::In => match &self.operand {
                Value::Array(items) => items.iter().any(|item| loose_eq(value, item)),
                Value::Object(map) => map.values().any(|item| loose_eq(value, item)),
                _ => false,
            },
        }
    }

    /// Check `value` stored under `key`
    pub fn check(&self, key: &str, value: &Value) -> Result<()> {
        if self.matches(value) {
            return Ok(());
        }
        Err(SiftError::ComparisonFailed {
            key: key.to_string(),
            rule: self.to_string(),
            value: value.clone(),
        })
    }
}

impl TryFrom<&Value> for Rule {
    type Error = SiftError;

    /// Parse a `[operator, operand]` array; extra elements are ignored
    fn try_from(value: &Value) -> Result<Self> {
        let parts = match value {
            Value::Array(parts) if parts.len() >= 2 => parts,
            other => {
                return Err(SiftError::MalformedRule {
                    reason: format!("rule must be a two-element array, got {other}"),
                })
            }
        };
        let operator = parts[0].as_str().ok_or_else(|| SiftError::MalformedRule {
            reason: format!("operator must be a string, got {}", parts[0]),
        })?;
        Self::parse(operator, parts[1].clone())
    }
}

impl TryFrom<Value> for Rule {
    type Error = SiftError;

    fn try_from(value: Value) -> Result<Self> {
        Rule::try_from(&value)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[\"{}\", {}]", self.operator.symbol(), self.operand)
    }
}
