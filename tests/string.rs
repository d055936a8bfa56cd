mod common;
use common::{run, run_err};

#[cfg(test)]
mod string {
    use super::*;

    #[test]
    fn a_multiline_string_literal_counts_embedded_newlines_toward_the_line() {
        let source = "var a = \"1\n2\n3\";\nprint(a);\nerr;\n";
        let stderr = run_err(source);
        assert!(stderr.contains("Undefined variable 'err'."), "got: {stderr}");
    }

    #[test]
    fn literals_carry_arbitrary_utf8_text() {
        let source = "print(\"()\");\nprint(\"a string\");\nprint(\"A~¶Þॐஃ\");\n";
        assert_eq!(run(source), "()\na string\nA~¶Þॐஃ\n");
    }

    #[test]
    fn a_multiline_string_literal_prints_with_its_embedded_newlines() {
        assert_eq!(run("print(\"1\n2\n3\");"), "1\n2\n3\n");
    }

    #[test]
    fn an_unterminated_string_is_a_scan_error() {
        let stderr = run_err("\"unterminated\n");
        assert!(stderr.contains("Unterminated string."), "got: {stderr}");
    }
}
