mod common;
use common::{run, run_err};

#[cfg(test)]
mod method {
    use super::*;

    #[test]
    fn a_method_can_take_several_parameters() {
        let source = r#"
            class Foo {
                f0() { return 0; }
                f1(a) { return a; }
                f2(a, b) { return a + b; }
            }
            var foo = Foo();
            print(foo.f0());
            print(foo.f1(1));
            print(foo.f2(1, 2));
        "#;
        assert_eq!(run(source), "0\n1\n3\n");
    }

    #[test]
    fn a_method_with_an_empty_body_returns_nil() {
        let source = r#"
            class Foo { bar() {} }
            print(Foo().bar());
        "#;
        assert_eq!(run(source), "nil\n");
    }

    #[test]
    fn too_many_method_arguments_is_a_runtime_error() {
        let stderr = run_err(r#"
            class Foo { f(a, b) { return a + b; } }
            Foo().f(1, 2, 3, 4);
        "#);
        assert!(stderr.contains("Expected 2 arguments but got 4."), "got: {stderr}");
    }

    #[test]
    fn too_few_method_arguments_is_a_runtime_error() {
        let stderr = run_err(r#"
            class Foo { f(a, b) { return a + b; } }
            Foo().f(1);
        "#);
        assert!(stderr.contains("Expected 2 arguments but got 1."), "got: {stderr}");
    }

    #[test]
    fn calling_an_undefined_method_is_a_runtime_error() {
        let stderr = run_err(r#"
            class Foo {}
            Foo().unknown();
        "#);
        assert!(stderr.contains("Undefined property 'unknown'."), "got: {stderr}");
    }

    #[test]
    fn printing_a_bound_method_shows_its_function_form() {
        let source = r#"
            class Foo { method() {} }
            print(Foo().method);
        "#;
        assert_eq!(run(source), "<fn method>\n");
    }

    #[test]
    fn referring_to_a_method_by_bare_name_inside_the_class_is_unresolved() {
        let source = r#"
            class Foo {
                bar() { return method; }
                method() { return "method"; }
            }
            Foo().bar();
        "#;
        let stderr = run_err(source);
        assert!(stderr.contains("Undefined variable 'method'."), "got: {stderr}");
    }

    #[test]
    fn more_than_255_method_arguments_is_a_parse_error() {
        let args: Vec<String> = (0..300).map(|i| i.to_string()).collect();
        let source = format!("class Foo {{ f() {{}} }} Foo().f({});", args.join(", "));
        let stderr = run_err(&source);
        assert!(stderr.contains("Can't have more than 255 arguments."), "got: {stderr}");
    }

    #[test]
    fn more_than_255_method_parameters_is_a_parse_error() {
        let params: Vec<String> = (0..300).map(|i| format!("p{i}")).collect();
        let source = format!("class Foo {{ f({}) {{}} }}", params.join(", "));
        let stderr = run_err(&source);
        assert!(stderr.contains("Can't have more than 255 parameters."), "got: {stderr}");
    }
}
