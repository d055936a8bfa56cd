mod common;
use common::{run, run_err};

#[cfg(test)]
mod r#return {
    use super::*;

    #[test]
    fn returns_stop_execution_after_an_if_branch() {
        let source = r#"
            fun f() {
                if (true) return "ok";
                return "bad";
            }
            print(f());
        "#;
        assert_eq!(run(source), "ok\n");
    }

    #[test]
    fn returns_stop_execution_after_an_else_branch() {
        let source = r#"
            fun f() {
                if (false) return "bad";
                else return "ok";
                return "also bad";
            }
            print(f());
        "#;
        assert_eq!(run(source), "ok\n");
    }

    #[test]
    fn returns_stop_execution_inside_a_while_loop() {
        let source = r#"
            fun f() {
                while (true) {
                    return "ok";
                }
                return "bad";
            }
            print(f());
        "#;
        assert_eq!(run(source), "ok\n");
    }

    #[test]
    fn returning_from_top_level_code_is_a_static_error() {
        let stderr = run_err("return 1;");
        assert!(stderr.contains("Can't return from top-level code."), "got: {stderr}");
    }

    #[test]
    fn a_bare_return_yields_nil() {
        let source = r#"
            fun f() { return; }
            print(f());
        "#;
        assert_eq!(run(source), "nil\n");
    }

    #[test]
    fn a_method_can_return_before_its_last_statement() {
        let source = r#"
            class Foo {
                method() {
                    return "ok";
                    print("unreached");
                }
            }
            print(Foo().method());
        "#;
        assert_eq!(run(source), "ok\n");
    }
}
