mod common;
use common::{run, run_err};

#[cfg(test)]
mod field {
    use super::*;

    #[test]
    fn a_field_holding_a_function_can_be_called() {
        let source = r#"
            class Foo {}
            fun bar(a, b) {
                print("bar");
                print(a);
                print(b);
            }
            var foo = Foo();
            foo.bar = bar;
            foo.bar(1, 2);
        "#;
        assert_eq!(run(source), "bar\n1\n2\n");
    }

    #[test]
    fn calling_a_non_function_field_is_a_runtime_error() {
        let stderr = run_err(r#"
            class Foo {}
            var foo = Foo();
            foo.bar = "not a function";
            foo.bar();
        "#);
        assert!(stderr.contains("Can only call functions and classes."), "got: {stderr}");
    }

    #[test]
    fn fields_can_be_set_and_read_back() {
        let source = r#"
            class Foo {}
            var foo = Foo();
            foo.bar = "bar value";
            foo.baz = "baz value";
            print(foo.bar);
            print(foo.baz);
        "#;
        assert_eq!(run(source), "bar value\nbaz value\n");
    }

    #[test]
    fn getting_a_property_off_a_bool_is_a_runtime_error() {
        let stderr = run_err("true.foo;");
        assert!(stderr.contains("Only instances have properties."), "got: {stderr}");
    }

    #[test]
    fn getting_a_property_off_a_class_is_a_runtime_error() {
        let stderr = run_err("class Foo {} Foo.bar;");
        assert!(stderr.contains("Only instances have properties."), "got: {stderr}");
    }

    #[test]
    fn getting_a_property_off_nil_is_a_runtime_error() {
        let stderr = run_err("nil.foo;");
        assert!(stderr.contains("Only instances have properties."), "got: {stderr}");
    }

    #[test]
    fn setting_a_property_off_a_bool_is_a_runtime_error() {
        let stderr = run_err("true.foo = 1;");
        assert!(stderr.contains("Only instances have fields."), "got: {stderr}");
    }

    #[test]
    fn setting_a_property_off_a_class_is_a_runtime_error() {
        let stderr = run_err("class Foo {} Foo.bar = 1;");
        assert!(stderr.contains("Only instances have fields."), "got: {stderr}");
    }

    #[test]
    fn reading_an_undefined_property_is_a_runtime_error() {
        let stderr = run_err(r#"
            class Foo {}
            var foo = Foo();
            foo.bar;
        "#);
        assert!(stderr.contains("Undefined property 'bar'."), "got: {stderr}");
    }

    #[test]
    fn instance_methods_see_their_own_fields_through_this() {
        let source = r#"
            class Foo {
                method(arg) {
                    print("got method");
                    print(arg);
                }
            }
            Foo().method("arg");
        "#;
        assert_eq!(run(source), "got method\narg\n");
    }

    #[test]
    fn a_method_looked_up_and_stored_still_binds_this() {
        let source = r#"
            class Foo {
                getClosure() {
                    fun closure() { print(this.field); }
                    return closure;
                }
            }
            var foo = Foo();
            foo.field = "foo1";
            var closure = foo.getClosure();
            closure();
        "#;
        assert_eq!(run(source), "foo1\n");
    }
}
