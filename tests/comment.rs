mod common;
use common::run;

#[cfg(test)]
mod comment {
    use super::*;

    #[test]
    fn a_line_comment_with_no_trailing_newline_at_eof_is_fine() {
        assert_eq!(run("print(\"ok\"); // comment"), "ok\n");
    }

    #[test]
    fn a_source_that_is_only_a_comment_produces_no_output() {
        assert_eq!(run("// this whole file is a comment"), "");
    }

    #[test]
    fn a_comment_followed_by_a_blank_line_produces_no_output() {
        assert_eq!(run("// comment\n"), "");
    }

    #[test]
    fn unicode_inside_a_comment_is_ignored() {
        assert_eq!(run("// café, 日本語, ☃\nprint(\"ok\");"), "ok\n");
    }
}
