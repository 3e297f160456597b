//! C-colon interpreter: evaluates the AST with a tree-walking interpreter.
//!
//! The interpreter walks the top-level items in order against a single flat
//! [`Env`] that is passed explicitly through every evaluation step. All
//! observable effects go through the [`Console`] seam: `console.println`
//! writes a line, `console.scanp` writes a prompt and reads a line.

pub mod console;
pub mod env;
pub mod interpreter;
pub mod value;

pub use console::{BufferConsole, Console, StdConsole};
pub use env::{Binding, Env};
pub use interpreter::{Interpreter, CONSOLE, ENTRY_POINT};
pub use value::Value;

#[cfg(test)]
mod tests {
    use super::*;
    use ccolon_lexer::Lexer;
    use ccolon_parser::Parser;
    use ccolon_syntax::error::{Error, ErrorKind};

    fn run_with_input(input: &str, lines: &[&str]) -> Result<(Env, BufferConsole), Error> {
        let tokens = Lexer::new(input).tokenize()?;
        let program = Parser::new(tokens).parse_program()?;
        let mut console = BufferConsole::with_input(lines.iter().copied());
        let env = Interpreter::with_console(&mut console).run(program)?;
        Ok((env, console))
    }

    fn run_program(input: &str) -> (Env, BufferConsole) {
        match run_with_input(input, &[]) {
            Ok(r) => r,
            Err(e) => panic!("Program failed: {}\nInput: {}", e, input),
        }
    }

    fn expect_output(input: &str, expected: &str) {
        let (_, console) = run_program(input);
        assert_eq!(console.output(), expected, "Program: {}", input);
    }

    fn eval(input: &str) -> Result<Option<Value>, Error> {
        let tokens = Lexer::new(input).tokenize()?;
        let program = Parser::new(tokens).parse_program()?;
        let mut interpreter = Interpreter::with_console(BufferConsole::new());
        interpreter.run_with_env(program, &mut Env::new())
    }

    fn expect_value(input: &str, expected: Value) {
        match eval(input) {
            Ok(Some(actual)) => assert_eq!(actual, expected, "Program: {}", input),
            Ok(None) => panic!("Expected value but got None for: {}", input),
            Err(e) => panic!("Program failed: {}\nInput: {}", e, input),
        }
    }

    fn expect_error(input: &str) -> Error {
        match eval(input) {
            Ok(v) => panic!("Expected error but program succeeded with {:?}: {}", v, input),
            Err(e) => e,
        }
    }

    fn str_value(s: &str) -> Value {
        Value::Str(s.to_string())
    }

    #[test]
    fn test_literal_values() {
        expect_value("42", Value::Int(42));
        expect_value("\"hello\"", str_value("hello"));
    }

    #[test]
    fn test_arithmetic_operations() {
        expect_value("2 + 3 * 4", Value::Int(14));
        expect_value("(2 + 3) * 4", Value::Int(20));
        expect_value("10 / 3", Value::Int(3));
        expect_value("10 - 2 - 3", Value::Int(5));
        expect_value("100 / 10 / 5", Value::Int(2));
        expect_value("0 - 7 / 2", Value::Int(-3));
    }

    #[test]
    fn test_floor_division() {
        expect_value("(0 - 7) / 2", Value::Int(-4));
        expect_value("7 / (0 - 2)", Value::Int(-4));
        expect_value("(0 - 8) / 2", Value::Int(-4));
        expect_value("(0 - 7) / (0 - 2)", Value::Int(3));
    }

    #[test]
    fn test_string_concatenation() {
        expect_value("\"a\" + 1", str_value("a1"));
        expect_value("1 + \"a\"", str_value("1a"));
        expect_value("\"ab\" + \"cd\"", str_value("abcd"));
        expect_value("\"n=\" + 1 + 2", str_value("n=12"));
        expect_value("\"n=\" + (1 + 2)", str_value("n=3"));
        expect_value("\"eq: \" + (1 == 1)", str_value("eq: true"));
    }

    #[test]
    fn test_integer_coercion() {
        expect_value("\"5\" * 2", Value::Int(10));
        expect_value("\"6\" - 1", Value::Int(5));
        expect_value("\" 12 \" / 4", Value::Int(3));
        expect_value("(1 == 1) * 3", Value::Int(3));
        expect_value("(1 == 2) - 1", Value::Int(-1));
    }

    #[test]
    fn test_equality_never_coerces() {
        expect_value("1 == \"1\"", Value::Bool(false));
        expect_value("1 == 1", Value::Bool(true));
        expect_value("\"a\" == \"a\"", Value::Bool(true));
        expect_value("(1 == 1) == 1", Value::Bool(false));
    }

    #[test]
    fn test_unbound_identifier_is_its_own_name() {
        expect_value("foo", str_value("foo"));
        expect_value("foo + 1", str_value("foo1"));
        expect_value("var int foo = 3\nfoo + 1", Value::Int(4));
    }

    #[test]
    fn test_evaluation_errors() {
        let e = expect_error("1 / 0");
        assert_eq!(e.kind, ErrorKind::Division);
        assert!(e.is_evaluation());

        let e = expect_error("\"abc\" - 1");
        assert_eq!(e.kind, ErrorKind::Evaluation);
        assert!(e.msg.contains("Cannot convert \"abc\" to int"));

        assert!(expect_error("9223372036854775807 + 1").msg.contains("overflow"));
        assert!(expect_error("9223372036854775807 * 2").msg.contains("overflow"));
        assert!(expect_error("console.println() * 2").msg.contains("Cannot convert none"));
    }

    #[test]
    fn test_println_output() {
        expect_output("console.println(\"Hello, \", \"world\")", "Hello, world\n");
        expect_output("console.println(1, 2, 3)", "123\n");
        expect_output("console.println()", "\n");
        expect_output("console.println(1 == 1, \" \", 1 == 2)", "true false\n");
        expect_output("console.println(console.println(\"x\"))", "x\nnone\n");
    }

    #[test]
    fn test_main_runs_inline_in_order() {
        let src = r#"
            console.println("a")
            function main() { console.println("b") }
            console.println("c")
        "#;
        expect_output(src, "a\nb\nc\n");
    }

    #[test]
    fn test_other_functions_are_stored_not_run() {
        let (env, console) = run_program("function helper() { console.println(\"never\") }");
        assert_eq!(console.output(), "");
        assert!(matches!(env.value("helper"), Some(Value::Function(f)) if f.name == "helper"));
        assert_eq!(env.function_names(), vec!["helper".to_string()]);

        expect_output(
            "function helper() { } console.println(helper)",
            "<function helper>\n",
        );
    }

    #[test]
    fn test_main_shares_the_global_environment() {
        let src = r#"
            var int base = 40
            function main() {
                var int answer = base + 2
                console.println("answer=", answer)
            }
            console.println(answer)
        "#;
        let (env, console) = run_program(src);
        assert_eq!(console.output(), "answer=42\n42\n");
        assert_eq!(env.value("answer"), Some(&Value::Int(42)));
    }

    #[test]
    fn test_var_rebinding_overwrites_type() {
        let (env, _) = run_program("var int x = 1\nvar string x = \"s\"");
        let binding = env.get("x").expect("x should be bound");
        assert_eq!(binding.value, str_value("s"));
        assert_eq!(binding.declared.as_deref(), Some("string"));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_if_else_runs_exactly_one_branch() {
        expect_output(
            "if (1 == 1) { console.println(\"if\") } else { console.println(\"else\") }",
            "if\n",
        );
        expect_output(
            "if (1 == 2) { console.println(\"if\") } else { console.println(\"else\") }",
            "else\n",
        );
        expect_output("if (1 == 2) { console.println(\"if\") }", "");
    }

    #[test]
    fn test_truthiness() {
        expect_output("if (0) { console.println(\"zero\") }", "");
        expect_output("if (5) { console.println(\"five\") }", "five\n");
        expect_output("if (\"\") { console.println(\"empty\") }", "");
        // unbound names evaluate to their non-empty text
        expect_output("if (flag) { console.println(\"flag\") }", "flag\n");
        expect_output("if (console.println()) { console.println(\"unit\") }", "\n");

        assert!(Value::Bool(true).is_truthy());
        assert!(!Value::Unit.is_truthy());
    }

    #[test]
    fn test_scanp_prompts_and_reads() {
        let src = r#"
            function main() {
                var string name = console.scanp("name: ")
                console.println("Hello ", name, "!")
            }
        "#;
        let (env, console) = run_with_input(src, &["Ada"]).expect("program should run");
        assert_eq!(console.output(), "name: Hello Ada!\n");
        assert_eq!(env.value("name"), Some(&str_value("Ada")));
    }

    #[test]
    fn test_scanp_without_prompt_and_coercion() {
        let src = "var int n = console.scanp() * 2\nconsole.println(n)";
        let (_, console) = run_with_input(src, &["21"]).expect("program should run");
        assert_eq!(console.output(), "42\n");
    }

    #[test]
    fn test_scanp_at_end_of_input() {
        let err = run_with_input("console.scanp(\"> \")", &[]).unwrap_err();
        assert!(err.is_evaluation());
        assert!(err.msg.contains("end of input"));
    }

    #[test]
    fn test_tostring() {
        expect_output("var int x = 4\nconsole.println(x.tostring() + 1)", "41\n");
        expect_value("abc.tostring()", str_value("abc"));
        expect_value("var int n = 2 * 3\nn.tostring() == \"6\"", Value::Bool(true));
    }

    #[test]
    fn test_chained_receiver_is_evaluated_once() {
        let src = "console.println(console.scanp().tostring())\nconsole.println(console.scanp())";
        let (_, console) = run_with_input(src, &["first", "second"]).expect("program should run");
        assert_eq!(console.output(), "first\nsecond\n");
    }

    #[test]
    fn test_console_receiver_is_literal_name() {
        expect_output("var string console = \"other\"\nconsole.println(\"hi\")", "hi\n");
        expect_output("console.tostring().println(\"via chain\")", "via chain\n");
    }

    #[test]
    fn test_unknown_method_is_a_diagnosed_noop() {
        let (_, console) = run_program("console.shout(console.println(\"x\"))\nlogger.info(1)");
        assert_eq!(console.output(), "");
        assert_eq!(
            console.warnings(),
            &[
                "unknown method 'shout' on receiver 'console'".to_string(),
                "unknown method 'info' on receiver 'logger'".to_string(),
            ]
        );
        expect_value("thing.frobnicate()", Value::Unit);
    }

    #[test]
    fn test_import_is_a_noop() {
        let (env, console) = run_program("import io");
        assert!(env.is_empty());
        assert_eq!(console.output(), "");
    }

    #[test]
    fn test_parse_error_runs_nothing() {
        let mut console = BufferConsole::new();
        let mut env = Env::new();
        let src = "console.println(\"before\")\nvar int x = 1\nvar int y 2";
        let result = Lexer::new(src)
            .tokenize()
            .and_then(|tokens| Parser::new(tokens).parse_program())
            .and_then(|program| Interpreter::with_console(&mut console).run_with_env(program, &mut env));
        let err = result.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Parse);
        assert!(err.msg.contains("Expected OP '='"));
        assert_eq!(console.output(), "");
        assert!(env.is_empty());
    }

    #[test]
    fn test_runtime_error_stops_the_run() {
        let mut console = BufferConsole::new();
        let tokens = Lexer::new("console.println(\"a\")\nconsole.println(1 / 0)\nconsole.println(\"b\")")
            .tokenize()
            .unwrap();
        let program = Parser::new(tokens).parse_program().unwrap();
        let result = Interpreter::with_console(&mut console).run(program);
        assert!(matches!(result, Err(e) if e.kind == ErrorKind::Division));
        assert_eq!(console.output(), "a\n");
    }

    #[test]
    fn test_run_with_env_keeps_state() {
        let mut env = Env::new();
        let mut interpreter = Interpreter::with_console(BufferConsole::new());
        for (src, expected) in [("var int x = 5", None), ("x * 2", Some(Value::Int(10)))] {
            let tokens = Lexer::new(src).tokenize().unwrap();
            let program = Parser::new(tokens).parse_program().unwrap();
            assert_eq!(interpreter.run_with_env(program, &mut env).unwrap(), expected);
        }
        assert_eq!(env.vars_snapshot().len(), 1);
    }
}
