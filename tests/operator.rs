mod common;
use common::{run, run_err};

#[cfg(test)]
mod operator {
    use super::*;

    #[test]
    fn add_numbers_and_concatenate_strings() {
        let source = r#"
            print(123 + 456);
            print("str" + "ing");
        "#;
        assert_eq!(run(source), "579\nstring\n");
    }

    #[test]
    fn add_rejects_mismatched_operand_types() {
        let stderr = run_err("print(1 + \"1\");");
        assert!(stderr.contains("Operands must be two numbers or two strings."), "got: {stderr}");
    }

    #[test]
    fn comparison_operators() {
        let source = r#"
            print(1 < 2);
            print(2 < 2);
            print(2 < 1);
            print(1 <= 2);
            print(2 <= 2);
            print(2 <= 1);
            print(1 > 2);
            print(2 > 2);
            print(2 > 1);
            print(1 >= 2);
            print(2 >= 2);
            print(2 >= 1);
        "#;
        assert_eq!(
            run(source),
            "true\nfalse\nfalse\ntrue\ntrue\nfalse\nfalse\nfalse\ntrue\nfalse\ntrue\ntrue\n"
        );
    }

    #[test]
    fn comparison_requires_numbers() {
        let stderr = run_err("print(\"a\" < \"b\");");
        assert!(stderr.contains("Operands must be numbers."), "got: {stderr}");
    }

    #[test]
    fn divide() {
        assert_eq!(run("print(8 / 2); print(6 / 4);"), "4\n1.5\n");
    }

    #[test]
    fn divide_by_zero_is_a_runtime_error() {
        let stderr = run_err("print(1 / 0);");
        assert!(stderr.contains("Cannot divide by zero."), "got: {stderr}");
    }

    #[test]
    fn multiply() {
        assert_eq!(run("print(5 * 3); print(1.2 * 3.0);"), "15\n3.6\n");
    }

    #[test]
    fn subtract() {
        assert_eq!(run("print(4 - 3); print(3 - 3); print(3 - 7);"), "1\n0\n-4\n");
    }

    #[test]
    fn negate() {
        assert_eq!(run("print(-3); print(-(-3)); print(-(-(-3)));"), "-3\n3\n-3\n");
    }

    #[test]
    fn negate_requires_a_number() {
        let stderr = run_err("print(-\"muffin\");");
        assert!(stderr.contains("Operand must be a number."), "got: {stderr}");
    }

    #[test]
    fn not_is_never_a_type_error() {
        let source = r#"
            print(!true);
            print(!false);
            print(!nil);
            print(!0);
            print(!"");
        "#;
        assert_eq!(run(source), "false\ntrue\ntrue\nfalse\nfalse\n");
    }

    #[test]
    fn equals_and_not_equals_are_structural_and_type_aware() {
        let source = r#"
            print(1 == 1);
            print(1 == 2);
            print("a" == "a");
            print("a" == "b");
            print(nil == nil);
            print(nil == false);
            print(1 == "1");
        "#;
        assert_eq!(run(source), "true\nfalse\ntrue\nfalse\ntrue\nfalse\nfalse\n");
    }

    #[test]
    fn equals_compares_class_and_instance_identity() {
        let source = r#"
            class Foo {}
            var a = Foo();
            var b = Foo();
            print(a == a);
            print(a == b);
            print(Foo == Foo);
        "#;
        assert_eq!(run(source), "true\nfalse\ntrue\n");
    }
}
