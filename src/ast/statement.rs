use serde::Serialize;

use super::{
    Assignment, BinaryOp, ClassDefinition, Comparison, Compound, FieldAssignment, IfElse,
    MethodCall, NewInstance, Print, Return, UnaryOp, VariableValue,
};

/// A single node of a Mython program.
#[derive(Debug, Clone, Serialize)]
pub enum Statement {
    NumericConst(i64),
    StringConst(String),
    BoolConst(bool),
    NoneConst,
    VariableValue(VariableValue),
    Assignment(Assignment),
    FieldAssignment(FieldAssignment),
    Print(Print),
    MethodCall(MethodCall),
    NewInstance(NewInstance),
    UnaryOp(UnaryOp),
    BinaryOp(BinaryOp),
    Comparison(Comparison),
    Compound(Compound),
    Return(Return),
    IfElse(IfElse),
    ClassDefinition(ClassDefinition),
}
