use std::{
    cell::{Ref, RefCell, RefMut},
    fmt::Display,
    rc::Rc,
};

use serde::Serialize;

use crate::ast::Statement;

use super::Closure;

/// A runtime value. Cloning copies the handle: primitives are immutable, so
/// copying them is unobservable, while classes and instances stay shared.
#[derive(Debug, Clone)]
pub enum Object {
    Number(i64),
    String(String),
    Bool(bool),
    None,
    Class(Rc<Class>),
    Instance(Rc<Instance>),
}

impl Object {
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Number(_) => "Number",
            Object::String(_) => "String",
            Object::Bool(_) => "Bool",
            Object::None => "None",
            Object::Class(_) => "Class",
            Object::Instance(_) => "Instance",
        }
    }

    /// Truthiness as used by `if`. Instances are always true; Mython has no
    /// `__bool__` protocol.
    pub fn is_true(&self) -> bool {
        match self {
            Object::Number(value) => *value != 0,
            Object::String(value) => !value.is_empty(),
            Object::Bool(value) => *value,
            Object::None => false,
            Object::Class(_) | Object::Instance(_) => true,
        }
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::Number(value) => write!(f, "{value}"),
            Object::String(value) => f.write_str(value),
            Object::Bool(value) => f.write_str(if *value { "True" } else { "False" }),
            Object::None => f.write_str("None"),
            Object::Class(class) => f.write_str(class.name()),
            Object::Instance(instance) => write!(f, "<{} object>", instance.class().name()),
        }
    }
}

impl PartialEq for Object {
    /// Handle equality: primitives compare by value, classes and instances
    /// by identity. Language-level `==` lives in the evaluator because it
    /// may dispatch to `__eq__`.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Number(lhs), Object::Number(rhs)) => lhs == rhs,
            (Object::String(lhs), Object::String(rhs)) => lhs == rhs,
            (Object::Bool(lhs), Object::Bool(rhs)) => lhs == rhs,
            (Object::None, Object::None) => true,
            (Object::Class(lhs), Object::Class(rhs)) => Rc::ptr_eq(lhs, rhs),
            (Object::Instance(lhs), Object::Instance(rhs)) => Rc::ptr_eq(lhs, rhs),
            _ => false,
        }
    }
}

/// A method bound to a class at definition time.
#[derive(Debug, Serialize)]
pub struct Method {
    pub name: String,
    pub formal_params: Vec<String>,
    pub body: Rc<Statement>,
}

/// A user-defined class. Immutable after definition.
#[derive(Debug, Serialize)]
pub struct Class {
    name: String,
    methods: Vec<Method>,
    parent: Option<Rc<Class>>,
}

impl Class {
    pub fn new(name: impl Into<String>, methods: Vec<Method>, parent: Option<Rc<Class>>) -> Self {
        Self {
            name: name.into(),
            methods,
            parent,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolve a method by name: own methods first, then the parent chain.
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods
            .iter()
            .find(|method| method.name == name)
            .or_else(|| {
                self.parent
                    .as_deref()
                    .and_then(|parent| parent.method(name))
            })
    }
}

/// A runtime object of a user-defined class with its own mutable field
/// store. `self` is not kept in the fields; method call frames bind it to
/// the instance handle instead, which keeps the object graph cycle-free for
/// reference counting.
#[derive(Debug)]
pub struct Instance {
    class: Rc<Class>,
    fields: RefCell<Closure>,
}

impl Instance {
    pub fn new(class: Rc<Class>) -> Rc<Self> {
        Rc::new(Self {
            class,
            fields: RefCell::new(Closure::new()),
        })
    }

    pub fn class(&self) -> &Rc<Class> {
        &self.class
    }

    pub fn fields(&self) -> Ref<'_, Closure> {
        self.fields.borrow()
    }

    pub fn fields_mut(&self) -> RefMut<'_, Closure> {
        self.fields.borrow_mut()
    }

    /// True when the class chain defines `method` with exactly
    /// `argument_count` formal parameters.
    pub fn has_method(&self, method: &str, argument_count: usize) -> bool {
        self.class
            .method(method)
            .map(|method| method.formal_params.len() == argument_count)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(name: &str, params: &[&str]) -> Method {
        Method {
            name: name.to_owned(),
            formal_params: params.iter().map(|p| (*p).to_owned()).collect(),
            body: Rc::new(Statement::NoneConst),
        }
    }

    #[test]
    fn truthiness_table() {
        assert!(!Object::Number(0).is_true());
        assert!(Object::Number(-1).is_true());
        assert!(!Object::String(String::new()).is_true());
        assert!(Object::String("x".into()).is_true());
        assert!(Object::Bool(true).is_true());
        assert!(!Object::Bool(false).is_true());
        assert!(!Object::None.is_true());

        let class = Rc::new(Class::new("Empty", vec![], None));
        assert!(Object::Class(class.clone()).is_true());
        assert!(Object::Instance(Instance::new(class)).is_true());
    }

    #[test]
    fn printed_forms() {
        assert_eq!(Object::Number(-8).to_string(), "-8");
        assert_eq!(Object::String("hello".into()).to_string(), "hello");
        assert_eq!(Object::Bool(true).to_string(), "True");
        assert_eq!(Object::Bool(false).to_string(), "False");
        assert_eq!(Object::None.to_string(), "None");

        let class = Rc::new(Class::new("Counter", vec![], None));
        assert_eq!(Object::Class(class.clone()).to_string(), "Counter");
        assert_eq!(
            Object::Instance(Instance::new(class)).to_string(),
            "<Counter object>"
        );
    }

    #[test]
    fn method_resolution_walks_parent_chain() {
        let base = Rc::new(Class::new(
            "Base",
            vec![method("shared", &[]), method("base_only", &[])],
            None,
        ));
        let derived = Rc::new(Class::new(
            "Derived",
            vec![method("shared", &["x"])],
            Some(base),
        ));

        // Own definition shadows the parent's.
        let shared = derived.method("shared").unwrap();
        assert_eq!(shared.formal_params, vec!["x".to_owned()]);

        assert!(derived.method("base_only").is_some());
        assert!(derived.method("missing").is_none());
    }

    #[test]
    fn has_method_checks_arity() {
        let class = Rc::new(Class::new("C", vec![method("m", &["a", "b"])], None));
        let instance = Instance::new(class);

        assert!(instance.has_method("m", 2));
        assert!(!instance.has_method("m", 1));
        assert!(!instance.has_method("other", 0));
    }

    #[test]
    fn instance_handles_share_fields() {
        let class = Rc::new(Class::new("C", vec![], None));
        let first = Instance::new(class);
        let second = first.clone();

        first.fields_mut().set("value", Object::Number(1));
        assert_eq!(second.fields().get("value"), Some(&Object::Number(1)));

        assert_eq!(
            Object::Instance(first.clone()),
            Object::Instance(second.clone())
        );
        assert_ne!(
            Object::Instance(first),
            Object::Instance(Instance::new(Rc::new(Class::new("C", vec![], None))))
        );
    }
}
