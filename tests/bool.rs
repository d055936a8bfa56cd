mod common;
use common::run;

#[cfg(test)]
mod bool {
    use super::*;

    #[test]
    fn equality_among_bools() {
        let source = r#"
            print(true == true);
            print(true == false);
            print(false == true);
            print(false == false);
            print(true != true);
            print(true != false);
            print(false != true);
            print(false != false);
        "#;
        assert_eq!(run(source), "true\nfalse\nfalse\ntrue\nfalse\ntrue\ntrue\nfalse\n");
    }

    #[test]
    fn equality_across_types_is_false_not_an_error() {
        assert_eq!(run(r#"print(true == 1); print(true == "true"); print(false != nil);"#), "false\nfalse\ntrue\n");
    }

    #[test]
    fn not_negates_truthiness() {
        assert_eq!(run("print(!true); print(!false); print(!!true);"), "false\ntrue\ntrue\n");
    }
}
