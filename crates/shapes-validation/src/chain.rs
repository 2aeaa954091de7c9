//! Ordered composition of validation rules for a single value

use crate::error::{ValidationErrors, ValidationResult};
use crate::traits::ValidationRule;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
struct Step {
    rule: Arc<dyn ValidationRule>,
    /// A failing gate stops the chain; later rules assume it passed.
    gate: bool,
}

/// Rules applied in insertion order to one value.
///
/// Plain rules accumulate their errors. Gates (typically the type check)
/// end the chain on failure so that later rules never report on a value of
/// the wrong type.
#[derive(Clone, Default)]
pub struct RuleChain {
    steps: Vec<Step>,
}

impl std::fmt::Debug for RuleChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleChain")
            .field("rules", &self.rule_names())
            .finish()
    }
}

impl RuleChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule whose failure stops the chain
    pub fn gate<R>(mut self, rule: R) -> Self
    where
        R: ValidationRule + 'static,
    {
        self.steps.push(Step {
            rule: Arc::new(rule),
            gate: true,
        });
        self
    }

    /// Append a rule whose errors are collected alongside the others
    pub fn rule<R>(mut self, rule: R) -> Self
    where
        R: ValidationRule + 'static,
    {
        self.steps.push(Step {
            rule: Arc::new(rule),
            gate: false,
        });
        self
    }

    /// Append a rule only when one was produced
    pub fn rule_opt<R>(self, rule: Option<R>) -> Self
    where
        R: ValidationRule + 'static,
    {
        match rule {
            Some(rule) => self.rule(rule),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.rule.rule_name()).collect()
    }
}

#[async_trait]
impl ValidationRule for RuleChain {
    async fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();

        for step in &self.steps {
            if let Err(rule_errors) = step.rule.validate(value, field).await {
                errors.merge(rule_errors);
                if step.gate {
                    break;
                }
            }
        }

        errors.into_result()
    }

    fn rule_name(&self) -> &'static str {
        "chain"
    }

    fn parameters(&self) -> Option<Value> {
        let rules: Vec<Value> = self
            .steps
            .iter()
            .map(|step| {
                serde_json::json!({
                    "rule": step.rule.rule_name(),
                    "gate": step.gate,
                    "parameters": step.rule.parameters(),
                })
            })
            .collect();
        Some(Value::Array(rules))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{LengthValidator, OneOfValidator, TypeValidator, ValueType};
    use serde_json::json;

    fn code_chain() -> RuleChain {
        RuleChain::new()
            .gate(TypeValidator::new(ValueType::String))
            .rule(LengthValidator::new().max(3))
            .rule(OneOfValidator::new(vec![json!("ab"), json!("abc")]))
    }

    #[tokio::test]
    async fn test_chain_collects_non_gate_errors() {
        let errors = code_chain().validate(&json!("abcd"), "code").await.unwrap_err();
        assert_eq!(errors.codes("code"), vec!["length_max", "not_allowed"]);
    }

    #[tokio::test]
    async fn test_failed_gate_stops_chain() {
        let errors = code_chain().validate(&json!(12), "code").await.unwrap_err();
        assert_eq!(errors.codes("code"), vec!["invalid_type"]);
    }

    #[tokio::test]
    async fn test_empty_chain_accepts_anything() {
        let chain = RuleChain::new();
        assert!(chain.is_empty());
        assert!(chain.validate(&json!({"any": 1}), "value").await.is_ok());
    }

    #[test]
    fn test_rule_names_and_parameters() {
        let chain = code_chain().rule_opt(None::<LengthValidator>);
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.rule_names(), vec!["type", "length", "one_of"]);

        let params = chain.parameters().unwrap();
        assert_eq!(params[0]["gate"], json!(true));
        assert_eq!(params[1]["parameters"]["max"], json!(3));
    }
}
