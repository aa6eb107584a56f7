//! Tree-walking executor for the Mython AST.
mod operators;

use std::{io::Write, rc::Rc};

use log::debug;

use crate::{
    ast::{
        Assignment, FieldAssignment, IfElse, MethodCall, NewInstance, Print, Statement,
        VariableValue,
    },
    runtime::{Closure, Instance, Object, RuntimeError},
};

const INIT_METHOD: &str = "__init__";

/// The value produced by executing a node, together with the out-of-band
/// flag that signals an active `return` unwinding towards the nearest
/// method frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Executed {
    value: Object,
    returning: bool,
}

impl Executed {
    fn value(value: Object) -> Self {
        Self {
            value,
            returning: false,
        }
    }

    fn returning(value: Object) -> Self {
        Self {
            value,
            returning: true,
        }
    }

    pub fn into_value(self) -> Object {
        self.value
    }

    pub fn is_returning(&self) -> bool {
        self.returning
    }
}

pub type ExecResult = Result<Executed, RuntimeError>;

/// Executes an AST against a closure. Owns the print sink for the duration
/// of one program run.
pub struct Interpreter<W> {
    output: W,
}

impl<W> Interpreter<W>
where
    W: Write,
{
    pub fn new(output: W) -> Self {
        Self { output }
    }

    /// Execute a whole program against a fresh global closure. A top-level
    /// `return` simply ends execution with its value.
    pub fn run(&mut self, program: &Statement) -> Result<Object, RuntimeError> {
        debug!("executing program");
        let mut globals = Closure::new();

        Ok(self.exec(program, &mut globals)?.into_value())
    }

    fn exec(&mut self, statement: &Statement, closure: &mut Closure) -> ExecResult {
        match statement {
            Statement::NumericConst(value) => Ok(Executed::value(Object::Number(*value))),
            Statement::StringConst(value) => Ok(Executed::value(Object::String(value.clone()))),
            Statement::BoolConst(value) => Ok(Executed::value(Object::Bool(*value))),
            Statement::NoneConst => Ok(Executed::value(Object::None)),
            Statement::VariableValue(variable) => {
                Ok(Executed::value(self.resolve(variable, closure)?))
            }
            Statement::Assignment(assignment) => self.exec_assignment(assignment, closure),
            Statement::FieldAssignment(assignment) => {
                self.exec_field_assignment(assignment, closure)
            }
            Statement::Print(print) => self.exec_print(print, closure),
            Statement::MethodCall(call) => self.exec_method_call(call, closure),
            Statement::NewInstance(new_instance) => self.exec_new_instance(new_instance, closure),
            Statement::UnaryOp(op) => {
                let operand = self.eval(&op.operand, closure)?;
                Ok(Executed::value(self.apply_unary(op.verb, operand)?))
            }
            Statement::BinaryOp(op) => {
                let lhs = self.eval(&op.lhs, closure)?;
                let rhs = self.eval(&op.rhs, closure)?;
                Ok(Executed::value(self.apply_binary(op.verb, lhs, rhs)?))
            }
            Statement::Comparison(comparison) => {
                let lhs = self.eval(&comparison.lhs, closure)?;
                let rhs = self.eval(&comparison.rhs, closure)?;
                Ok(Executed::value(self.compare(comparison.verb, lhs, rhs)?))
            }
            Statement::Compound(compound) => {
                let mut last = Object::None;
                for statement in &compound.statements {
                    let executed = self.exec(statement, closure)?;
                    if executed.is_returning() {
                        return Ok(executed);
                    }
                    last = executed.into_value();
                }
                Ok(Executed::value(last))
            }
            Statement::Return(ret) => Ok(Executed::returning(self.eval(&ret.value, closure)?)),
            Statement::IfElse(if_else) => self.exec_if_else(if_else, closure),
            Statement::ClassDefinition(definition) => {
                Ok(Executed::value(Object::Class(definition.class.clone())))
            }
        }
    }

    /// Execute in expression position, where no `return` can originate.
    fn eval(
        &mut self,
        statement: &Statement,
        closure: &mut Closure,
    ) -> Result<Object, RuntimeError> {
        Ok(self.exec(statement, closure)?.into_value())
    }

    /// Resolve `a.b.c`: the leading id in the closure, the rest through
    /// instance fields.
    fn resolve(
        &self,
        variable: &VariableValue,
        closure: &Closure,
    ) -> Result<Object, RuntimeError> {
        let mut ids = variable.dotted_ids.iter();
        let first = ids
            .next()
            .ok_or_else(|| RuntimeError::NameError("empty variable reference".to_owned()))?;
        let mut value = closure.get_or_error(first)?.clone();

        for id in ids {
            let instance = as_instance(&value, &format!("field access '{id}'"))?;
            let field = instance.fields().get(id).cloned();
            value = field.ok_or_else(|| {
                RuntimeError::NameError(format!(
                    "'{}' instance has no field '{id}'",
                    instance.class().name()
                ))
            })?;
        }

        Ok(value)
    }

    fn exec_assignment(&mut self, assignment: &Assignment, closure: &mut Closure) -> ExecResult {
        let value = self.eval(&assignment.value, closure)?;
        closure.set(assignment.var.clone(), value.clone());

        Ok(Executed::value(value))
    }

    fn exec_field_assignment(
        &mut self,
        assignment: &FieldAssignment,
        closure: &mut Closure,
    ) -> ExecResult {
        let target = self.resolve(&assignment.object, closure)?;
        let instance = as_instance(
            &target,
            &format!("field assignment '{}'", assignment.field_name),
        )?;

        let value = self.eval(&assignment.value, closure)?;
        instance
            .fields_mut()
            .set(assignment.field_name.clone(), value.clone());

        Ok(Executed::value(value))
    }

    /// All arguments are evaluated left-to-right before any of them is
    /// printed, so output produced while evaluating an argument lands ahead
    /// of the print's own line.
    fn exec_print(&mut self, print: &Print, closure: &mut Closure) -> ExecResult {
        let values = self.eval_args(&print.args, closure)?;

        for (index, value) in values.iter().enumerate() {
            if index > 0 {
                write!(self.output, " ").map_err(output_error)?;
            }
            write!(self.output, "{value}").map_err(output_error)?;
        }
        writeln!(self.output).map_err(output_error)?;

        Ok(Executed::value(Object::None))
    }

    fn exec_method_call(&mut self, call: &MethodCall, closure: &mut Closure) -> ExecResult {
        let receiver = self.eval(&call.object, closure)?;
        let instance = as_instance(&receiver, &format!("method call '{}'", call.method))?;
        let args = self.eval_args(&call.args, closure)?;

        Ok(Executed::value(self.call_method(
            &instance,
            &call.method,
            args,
        )?))
    }

    fn exec_new_instance(
        &mut self,
        new_instance: &NewInstance,
        closure: &mut Closure,
    ) -> ExecResult {
        let instance = Instance::new(new_instance.class.clone());
        let args = self.eval_args(&new_instance.args, closure)?;

        // A missing or arity-mismatched __init__ skips initialization
        // silently; the instance starts out with no fields.
        if instance.has_method(INIT_METHOD, args.len()) {
            self.call_method(&instance, INIT_METHOD, args)?;
        }

        Ok(Executed::value(Object::Instance(instance)))
    }

    fn exec_if_else(&mut self, if_else: &IfElse, closure: &mut Closure) -> ExecResult {
        let condition = self.eval(&if_else.condition, closure)?;

        if condition.is_true() {
            self.exec(&if_else.if_body, closure)
        } else if let Some(else_body) = &if_else.else_body {
            self.exec(else_body, closure)
        } else {
            Ok(Executed::value(Object::None))
        }
    }

    fn eval_args(
        &mut self,
        args: &[Statement],
        closure: &mut Closure,
    ) -> Result<Vec<Object>, RuntimeError> {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval(arg, closure)?);
        }

        Ok(values)
    }

    /// Invoke a method on an instance: resolve it (arity included), build a
    /// call frame from a copy of the instance fields plus `self` and the
    /// formal parameters, execute the body and strip the return flag.
    ///
    /// The frame copy is discarded afterwards; field mutations survive
    /// because they go through the shared instance handle bound to `self`.
    pub fn call_method(
        &mut self,
        instance: &Rc<Instance>,
        method: &str,
        args: Vec<Object>,
    ) -> Result<Object, RuntimeError> {
        let class = instance.class().clone();
        let method = match class.method(method) {
            Some(found) if found.formal_params.len() == args.len() => found,
            _ => {
                return Err(RuntimeError::AttributeError(format!(
                    "'{}' instance has no method '{}/{}'",
                    class.name(),
                    method,
                    args.len()
                )))
            }
        };

        let mut frame = instance.fields().clone();
        frame.set("self", Object::Instance(instance.clone()));
        for (param, arg) in method.formal_params.iter().zip(args) {
            frame.set(param.clone(), arg);
        }

        let body = method.body.clone();
        Ok(self.exec(&body, &mut frame)?.into_value())
    }
}

fn as_instance(value: &Object, context: &str) -> Result<Rc<Instance>, RuntimeError> {
    match value {
        Object::Instance(instance) => Ok(instance.clone()),
        other => Err(RuntimeError::TypeError(format!(
            "{context}: expected an instance, found {}",
            other.type_name()
        ))),
    }
}

fn output_error(error: std::io::Error) -> RuntimeError {
    RuntimeError::OutputError(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryVerb, Compound, Return};
    use crate::runtime::{Class, Method};

    fn interpreter() -> Interpreter<Vec<u8>> {
        Interpreter::new(Vec::new())
    }

    fn boxed(statement: Statement) -> Box<Statement> {
        Box::new(statement)
    }

    #[test]
    fn assignment_yields_and_binds() {
        let mut interpreter = interpreter();
        let mut closure = Closure::new();

        let statement = Statement::Assignment(Assignment {
            var: "x".to_owned(),
            value: boxed(Statement::NumericConst(57)),
        });

        let executed = interpreter.exec(&statement, &mut closure).unwrap();
        assert_eq!(executed, Executed::value(Object::Number(57)));
        assert_eq!(closure.get("x"), Some(&Object::Number(57)));
    }

    #[test]
    fn compound_halts_on_return() {
        let mut interpreter = interpreter();
        let mut closure = Closure::new();

        let statement = Statement::Compound(Compound {
            statements: vec![
                Statement::Return(Return {
                    value: boxed(Statement::NumericConst(1)),
                }),
                Statement::Assignment(Assignment {
                    var: "x".to_owned(),
                    value: boxed(Statement::NumericConst(2)),
                }),
            ],
        });

        let executed = interpreter.exec(&statement, &mut closure).unwrap();
        assert!(executed.is_returning());
        assert_eq!(executed.into_value(), Object::Number(1));
        // The statement after the return never ran.
        assert_eq!(closure.get("x"), None);
    }

    #[test]
    fn method_call_strips_return_flag() {
        let mut interpreter = interpreter();

        let class = Rc::new(Class::new(
            "C",
            vec![Method {
                name: "answer".to_owned(),
                formal_params: vec![],
                body: Rc::new(Statement::Return(Return {
                    value: boxed(Statement::NumericConst(42)),
                })),
            }],
            None,
        ));
        let instance = Instance::new(class);

        let value = interpreter.call_method(&instance, "answer", vec![]).unwrap();
        assert_eq!(value, Object::Number(42));
    }

    #[test]
    fn method_call_arity_mismatch_fails() {
        let mut interpreter = interpreter();

        let class = Rc::new(Class::new(
            "C",
            vec![Method {
                name: "m".to_owned(),
                formal_params: vec!["a".to_owned()],
                body: Rc::new(Statement::NoneConst),
            }],
            None,
        ));
        let instance = Instance::new(class);

        let error = interpreter
            .call_method(&instance, "m", vec![])
            .unwrap_err();
        assert!(matches!(error, RuntimeError::AttributeError(_)));
    }

    #[test]
    fn frame_mutations_do_not_leak_into_fields() {
        let mut interpreter = interpreter();

        // def m(): x = 1
        let class = Rc::new(Class::new(
            "C",
            vec![Method {
                name: "m".to_owned(),
                formal_params: vec![],
                body: Rc::new(Statement::Assignment(Assignment {
                    var: "x".to_owned(),
                    value: boxed(Statement::NumericConst(1)),
                })),
            }],
            None,
        ));
        let instance = Instance::new(class);

        interpreter.call_method(&instance, "m", vec![]).unwrap();
        assert_eq!(instance.fields().get("x"), None);
    }

    #[test]
    fn binary_op_evaluates_left_to_right() {
        let mut interpreter = interpreter();
        let mut closure = Closure::new();

        // (x = 1) + (x * 10) == 11: the right operand sees the assignment.
        let statement = Statement::BinaryOp(crate::ast::BinaryOp {
            verb: BinaryVerb::Add,
            lhs: boxed(Statement::Assignment(Assignment {
                var: "x".to_owned(),
                value: boxed(Statement::NumericConst(1)),
            })),
            rhs: boxed(Statement::BinaryOp(crate::ast::BinaryOp {
                verb: BinaryVerb::Mult,
                lhs: boxed(Statement::VariableValue(VariableValue {
                    dotted_ids: vec!["x".to_owned()],
                })),
                rhs: boxed(Statement::NumericConst(10)),
            })),
        });

        let executed = interpreter.exec(&statement, &mut closure).unwrap();
        assert_eq!(executed.into_value(), Object::Number(11));
    }
}
