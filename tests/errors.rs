//! Failure semantics: every error aborts execution and names its kind.
use mython::{run_program, runtime::RuntimeError, Error};

fn run_err(source: &str) -> Error {
    let mut output = Vec::new();
    run_program(source.as_bytes(), &mut output).expect_err("program should fail")
}

#[test]
fn odd_indentation_is_a_lex_error() {
    assert!(matches!(run_err("if x:\n   print 1\n"), Error::Lex(_)));
}

#[test]
fn tab_indentation_is_a_lex_error() {
    assert!(matches!(run_err("if x:\n\tprint 1\n"), Error::Lex(_)));
}

#[test]
fn unterminated_string_is_a_lex_error() {
    assert!(matches!(run_err("x = 'unterminated\n"), Error::Lex(_)));
}

#[test]
fn unrecognized_character_is_a_lex_error() {
    assert!(matches!(run_err("x = 1 & 2\n"), Error::Lex(_)));
}

#[test]
fn missing_block_is_a_parse_error() {
    assert!(matches!(run_err("if 1 > 0:\nprint 'no block'\n"), Error::Parse(_)));
}

#[test]
fn unknown_class_is_a_parse_error() {
    assert!(matches!(run_err("x = Missing()\n"), Error::Parse(_)));
}

#[test]
fn undefined_name_is_a_name_error() {
    assert!(matches!(
        run_err("print missing\n"),
        Error::Runtime(RuntimeError::NameError(_))
    ));
}

#[test]
fn missing_field_is_a_name_error() {
    let source = "\
class Empty:
  def nothing():
    return None

e = Empty()
print e.value
";

    assert!(matches!(
        run_err(source),
        Error::Runtime(RuntimeError::NameError(_))
    ));
}

#[test]
fn uninitialized_instance_has_no_fields() {
    let source = "\
class Counter:
  def __init__():
    self.value = 0

x = Counter(1, 2)
print x.value
";

    // __init__/0 does not match two arguments, so no field was ever set.
    assert!(matches!(
        run_err(source),
        Error::Runtime(RuntimeError::NameError(_))
    ));
}

#[test]
fn missing_method_is_an_attribute_error() {
    let source = "\
class Empty:
  def nothing():
    return None

e = Empty()
e.missing()
";

    assert!(matches!(
        run_err(source),
        Error::Runtime(RuntimeError::AttributeError(_))
    ));
}

#[test]
fn method_arity_mismatch_is_an_attribute_error() {
    let source = "\
class Greeter:
  def greet(name):
    return name

g = Greeter()
g.greet()
";

    let Error::Runtime(RuntimeError::AttributeError(message)) = run_err(source) else {
        panic!("expected an attribute error");
    };
    assert!(message.contains("greet/0"), "unexpected message: {message}");
}

#[test]
fn division_by_zero_is_an_arithmetic_error() {
    assert_eq!(
        run_err("x = 0\nprint 1 / x\n"),
        Error::Runtime(RuntimeError::DivisionByZero)
    );
}

#[test]
fn mixed_operand_types_are_a_type_error() {
    assert!(matches!(
        run_err("print 1 + 'one'\n"),
        Error::Runtime(RuntimeError::TypeError(_))
    ));
}

#[test]
fn cross_type_comparison_is_a_type_error() {
    assert!(matches!(
        run_err("print 1 < 'one'\n"),
        Error::Runtime(RuntimeError::TypeError(_))
    ));
}

#[test]
fn and_on_numbers_is_a_type_error() {
    assert!(matches!(
        run_err("print 1 and 2\n"),
        Error::Runtime(RuntimeError::TypeError(_))
    ));
}

#[test]
fn field_access_on_primitive_is_a_type_error() {
    assert!(matches!(
        run_err("x = 5\nprint x.value\n"),
        Error::Runtime(RuntimeError::TypeError(_))
    ));
}

#[test]
fn method_call_on_primitive_is_a_type_error() {
    assert!(matches!(
        run_err("x = 'text'\nx.upper()\n"),
        Error::Runtime(RuntimeError::TypeError(_))
    ));
}

#[test]
fn failing_statement_stops_execution_midway() {
    let mut output = Vec::new();
    let result = run_program("print 'first'\nprint missing\n".as_bytes(), &mut output);

    assert!(result.is_err());
    assert_eq!(String::from_utf8(output).unwrap(), "first\n");
}
