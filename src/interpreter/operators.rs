//! Operator dispatch: primitive operations first, then dunder methods when
//! the left operand is an instance.
use std::io::Write;

use crate::{
    ast::{BinaryVerb, CompareVerb, UnaryVerb},
    runtime::{Object, RuntimeError},
};

use super::Interpreter;

const EQ_METHOD: &str = "__eq__";
const LT_METHOD: &str = "__lt__";
const NOT_METHOD: &str = "__not__";

/// Fixed AST-operator → method-name table consulted for instance operands.
fn dunder_name(verb: BinaryVerb) -> &'static str {
    match verb {
        BinaryVerb::Add => "__add__",
        BinaryVerb::Sub => "__sub__",
        BinaryVerb::Mult => "__mult__",
        BinaryVerb::Div => "__div__",
        BinaryVerb::And => "__and__",
        BinaryVerb::Or => "__or__",
    }
}

fn numeric_op(verb: BinaryVerb, lhs: i64, rhs: i64) -> Result<Object, RuntimeError> {
    let value = match verb {
        BinaryVerb::Add => lhs.wrapping_add(rhs),
        BinaryVerb::Sub => lhs.wrapping_sub(rhs),
        BinaryVerb::Mult => lhs.wrapping_mul(rhs),
        BinaryVerb::Div => {
            if rhs == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            lhs.wrapping_div(rhs)
        }
        BinaryVerb::And | BinaryVerb::Or => {
            return Err(RuntimeError::TypeError(format!(
                "'{verb}' is not defined for numbers"
            )))
        }
    };

    Ok(Object::Number(value))
}

impl<W> Interpreter<W>
where
    W: Write,
{
    /// Binary dispatch ladder: Bool combination for `and`/`or`, string
    /// concatenation for `+`, integer arithmetic, then the left operand's
    /// dunder method. Both operands are always evaluated before this is
    /// reached; `and`/`or` do not short-circuit.
    pub(crate) fn apply_binary(
        &mut self,
        verb: BinaryVerb,
        lhs: Object,
        rhs: Object,
    ) -> Result<Object, RuntimeError> {
        match (verb, &lhs, &rhs) {
            (BinaryVerb::And, Object::Bool(lhs), Object::Bool(rhs)) => {
                return Ok(Object::Bool(*lhs && *rhs))
            }
            (BinaryVerb::Or, Object::Bool(lhs), Object::Bool(rhs)) => {
                return Ok(Object::Bool(*lhs || *rhs))
            }
            (BinaryVerb::Add, Object::String(lhs), Object::String(rhs)) => {
                return Ok(Object::String(format!("{lhs}{rhs}")))
            }
            (
                BinaryVerb::Add | BinaryVerb::Sub | BinaryVerb::Mult | BinaryVerb::Div,
                Object::Number(lhs),
                Object::Number(rhs),
            ) => return numeric_op(verb, *lhs, *rhs),
            _ => {}
        }

        if let Object::Instance(instance) = &lhs {
            if instance.has_method(dunder_name(verb), 1) {
                let instance = instance.clone();
                return self.call_method(&instance, dunder_name(verb), vec![rhs]);
            }
        }

        Err(RuntimeError::TypeError(format!(
            "no valid operand types for '{verb}': {} and {}",
            lhs.type_name(),
            rhs.type_name()
        )))
    }

    pub(crate) fn apply_unary(
        &mut self,
        verb: UnaryVerb,
        operand: Object,
    ) -> Result<Object, RuntimeError> {
        match verb {
            UnaryVerb::Stringify => Ok(Object::String(operand.to_string())),
            UnaryVerb::Not => match operand {
                Object::Bool(value) => Ok(Object::Bool(!value)),
                Object::Instance(instance) if instance.has_method(NOT_METHOD, 0) => {
                    self.call_method(&instance, NOT_METHOD, vec![])
                }
                other => Err(RuntimeError::TypeError(format!(
                    "'not' is not defined for {}",
                    other.type_name()
                ))),
            },
        }
    }

    /// All six comparators reduce to `==` and `<`.
    pub(crate) fn compare(
        &mut self,
        verb: CompareVerb,
        lhs: Object,
        rhs: Object,
    ) -> Result<Object, RuntimeError> {
        let result = match verb {
            CompareVerb::Equal => self.equal(&lhs, &rhs)?,
            CompareVerb::NotEqual => !self.equal(&lhs, &rhs)?,
            CompareVerb::Less => self.less(&lhs, &rhs)?,
            CompareVerb::LessOrEqual => self.less(&lhs, &rhs)? || self.equal(&lhs, &rhs)?,
            CompareVerb::Greater => self.less(&rhs, &lhs)?,
            CompareVerb::GreaterOrEqual => self.less(&rhs, &lhs)? || self.equal(&rhs, &lhs)?,
        };

        Ok(Object::Bool(result))
    }

    /// `==`: an instance left operand with `__eq__/1` dispatches to it (the
    /// result is coerced through truthiness); otherwise both operands must
    /// share a primitive type.
    fn equal(&mut self, lhs: &Object, rhs: &Object) -> Result<bool, RuntimeError> {
        if let Object::Instance(instance) = lhs {
            if instance.has_method(EQ_METHOD, 1) {
                let instance = instance.clone();
                let result = self.call_method(&instance, EQ_METHOD, vec![rhs.clone()])?;
                return Ok(result.is_true());
            }
        }

        match (lhs, rhs) {
            (Object::Number(lhs), Object::Number(rhs)) => Ok(lhs == rhs),
            (Object::String(lhs), Object::String(rhs)) => Ok(lhs == rhs),
            (Object::Bool(lhs), Object::Bool(rhs)) => Ok(lhs == rhs),
            _ => Err(RuntimeError::TypeError(format!(
                "cannot compare {} and {} for equality",
                lhs.type_name(),
                rhs.type_name()
            ))),
        }
    }

    /// `<`: same dispatch scheme as [`Interpreter::equal`], via `__lt__/1`.
    fn less(&mut self, lhs: &Object, rhs: &Object) -> Result<bool, RuntimeError> {
        if let Object::Instance(instance) = lhs {
            if instance.has_method(LT_METHOD, 1) {
                let instance = instance.clone();
                let result = self.call_method(&instance, LT_METHOD, vec![rhs.clone()])?;
                return Ok(result.is_true());
            }
        }

        match (lhs, rhs) {
            (Object::Number(lhs), Object::Number(rhs)) => Ok(lhs < rhs),
            (Object::String(lhs), Object::String(rhs)) => Ok(lhs < rhs),
            (Object::Bool(lhs), Object::Bool(rhs)) => Ok(lhs < rhs),
            _ => Err(RuntimeError::TypeError(format!(
                "cannot order {} and {}",
                lhs.type_name(),
                rhs.type_name()
            ))),
        }
    }
}
