use pysh::scanner::{ScannerOptions, TokenKind};

use crate::harness::{statement_start, valid, Harness};

fn predicted(input: &str) -> Option<(TokenKind, String)> {
    Harness::new(input).scan(statement_start())
}

fn predicted_kind(input: &str) -> Option<TokenKind> {
    predicted(input).map(|(kind, _)| kind)
}

// --- bare subprocess positives -------------------------------------------

#[test]
fn known_command_with_flags_is_a_subprocess() {
    assert_eq!(
        predicted("ls -la\n"),
        Some((TokenKind::SubprocessStart, String::new()))
    );
}

#[test]
fn known_command_alone_is_a_subprocess() {
    assert_eq!(predicted_kind("make\n"), Some(TokenKind::SubprocessStart));
    assert_eq!(
        predicted_kind("git status\n"),
        Some(TokenKind::SubprocessStart)
    );
}

#[test]
fn absolute_relative_and_home_paths_are_subprocesses() {
    assert_eq!(
        predicted_kind("/usr/bin/env python\n"),
        Some(TokenKind::SubprocessStart)
    );
    assert_eq!(predicted_kind("./run.sh\n"), Some(TokenKind::SubprocessStart));
    assert_eq!(
        predicted_kind("~/bin/tool --fast\n"),
        Some(TokenKind::SubprocessStart)
    );
}

#[test]
fn unknown_command_with_a_flag_is_a_subprocess() {
    assert_eq!(
        predicted_kind("mytool --verbose\n"),
        Some(TokenKind::SubprocessStart)
    );
    assert_eq!(predicted_kind("mytool -v\n"), Some(TokenKind::SubprocessStart));
}

#[test]
fn pipes_and_redirects_are_shell_signals() {
    assert_eq!(
        predicted_kind("cat file | grep foo && echo ok\n"),
        Some(TokenKind::SubprocessStart)
    );
    assert_eq!(
        predicted_kind("prog > out.log\n"),
        Some(TokenKind::SubprocessStart)
    );
    assert_eq!(
        predicted_kind("prog < input\n"),
        Some(TokenKind::SubprocessStart)
    );
}

#[test]
fn trailing_ampersand_is_a_shell_signal() {
    assert_eq!(
        predicted_kind("sleep 5 &\n"),
        Some(TokenKind::SubprocessStart)
    );
    assert_eq!(
        predicted_kind("sleep 5 &   \n"),
        Some(TokenKind::SubprocessStart)
    );
}

#[test]
fn environment_arguments_are_shell_signals() {
    assert_eq!(
        predicted_kind("prog $HOME\n"),
        Some(TokenKind::SubprocessStart)
    );
    assert_eq!(
        predicted_kind("prog $(hostname)\n"),
        Some(TokenKind::SubprocessStart)
    );
    assert_eq!(
        predicted_kind("prog @$(which py)\n"),
        Some(TokenKind::SubprocessStart)
    );
    assert_eq!(
        predicted_kind("prog @(count + 1)\n"),
        Some(TokenKind::SubprocessStart)
    );
}

#[test]
fn python_operators_inside_an_eval_argument_do_not_count() {
    assert_eq!(
        predicted_kind("prog @(mode == 'fast') run\n"),
        Some(TokenKind::SubprocessStart)
    );
    assert_eq!(
        predicted_kind("prog @(limit := 3)\n"),
        Some(TokenKind::SubprocessStart)
    );
}

#[test]
fn flag_value_equals_stays_shell_syntax() {
    assert_eq!(
        predicted_kind("--env=FOO=bar ./cmd\n"),
        Some(TokenKind::SubprocessStart)
    );
    assert_eq!(
        predicted_kind("prog -o=out run\n"),
        Some(TokenKind::SubprocessStart)
    );
}

#[test]
fn file_arguments_after_a_known_command_are_not_attributes() {
    assert_eq!(
        predicted_kind("cat output.txt\n"),
        Some(TokenKind::SubprocessStart)
    );
}

#[test]
fn comma_only_line_is_a_subprocess_alias() {
    assert_eq!(predicted_kind(",\n"), Some(TokenKind::SubprocessStart));
    assert_eq!(predicted_kind(",,  \n"), Some(TokenKind::SubprocessStart));
    assert_eq!(predicted_kind(", x\n"), None);
}

#[test]
fn mid_line_macro_keeps_the_line_a_subprocess() {
    assert_eq!(
        predicted_kind("weird run! fast\n"),
        Some(TokenKind::SubprocessStart)
    );
    assert_eq!(
        predicted_kind("weird -c! echo done\n"),
        Some(TokenKind::SubprocessStart)
    );
}

// --- python negatives -----------------------------------------------------

#[test]
fn assignment_and_comparisons_stay_python() {
    assert_eq!(predicted_kind("x = 1\n"), None);
    assert_eq!(predicted_kind("x == 1\n"), None);
    assert_eq!(predicted_kind("x != y\n"), None);
    assert_eq!(predicted_kind("a <= b\n"), None);
    assert_eq!(predicted_kind("a >= b\n"), None);
    assert_eq!(predicted_kind("y := 2\n"), None);
}

#[test]
fn call_subscript_and_attribute_stay_python() {
    assert_eq!(predicted_kind("rm(path)\n"), None);
    assert_eq!(predicted_kind("print(x)\n"), None);
    assert_eq!(predicted_kind("data[0]\n"), None);
    assert_eq!(predicted_kind("obj.attr\n"), None);
    assert_eq!(predicted_kind("fn!(args)\n"), None);
}

#[test]
fn reserved_keywords_stay_python() {
    assert_eq!(predicted_kind("def f():\n"), None);
    assert_eq!(predicted_kind("import os\n"), None);
    assert_eq!(predicted_kind("with open('x') as f:\n"), None);
    assert_eq!(predicted_kind("xontrib load z\n"), None);
}

#[test]
fn explicit_capture_forms_are_not_bare() {
    assert_eq!(predicted_kind("$(ls)\n"), None);
    assert_eq!(predicted_kind("$[ls]\n"), None);
    assert_eq!(predicted_kind("!(ls)\n"), None);
    assert_eq!(predicted_kind("![ls]\n"), None);
}

#[test]
fn list_literal_lines_stay_python() {
    assert_eq!(predicted_kind("[1, 2]\n"), None);
}

#[test]
fn help_queries_stay_python() {
    assert_eq!(predicted_kind("ls?\n"), None);
    assert_eq!(predicted_kind("ls??\n"), None);
    assert_eq!(predicted_kind("ls??   \n"), None);
}

#[test]
fn ambiguous_identifier_lines_default_to_python() {
    assert_eq!(predicted_kind("result\n"), None);
    assert_eq!(predicted_kind("foo bar baz\n"), None);
}

#[test]
fn quoted_operators_are_ignored() {
    assert_eq!(predicted_kind("foo 'a=b'\n"), None);
    assert_eq!(
        predicted_kind("foo 'a=b' | tee\n"),
        Some(TokenKind::SubprocessStart)
    );
}

// --- decorators and modifiers --------------------------------------------

#[test]
fn decorators_stay_python() {
    assert_eq!(predicted_kind("@decorator\n"), None);
    assert_eq!(predicted_kind("@app.route('/')\n"), None);
    assert_eq!(predicted_kind("@cached()\n"), None);
}

#[test]
fn at_modifier_before_a_command_is_a_subprocess() {
    assert_eq!(
        predicted_kind("@unthread ./tool.sh\n"),
        Some(TokenKind::SubprocessStart)
    );
    assert_eq!(
        predicted_kind("@unthread git push\n"),
        Some(TokenKind::SubprocessStart)
    );
    assert_eq!(
        predicted_kind("@unthread --flag\n"),
        Some(TokenKind::SubprocessStart)
    );
    assert_eq!(predicted_kind("@unthread unknownword\n"), None);
}

// --- macros ---------------------------------------------------------------

#[test]
fn with_bang_is_the_block_macro() {
    assert_eq!(
        predicted("with! open('x') as f:\n"),
        Some((TokenKind::BlockMacroStart, "with!".to_string()))
    );
}

#[test]
fn identifier_bang_space_is_the_subprocess_macro() {
    assert_eq!(
        predicted("echo! \"hi\"\n"),
        Some((TokenKind::SubprocessMacroStart, "echo! ".to_string()))
    );
}

#[test]
fn macro_prefix_swallows_the_blank_run() {
    assert_eq!(
        predicted("timeit!   sorted(xs)\n"),
        Some((TokenKind::SubprocessMacroStart, "timeit!   ".to_string()))
    );
}

#[test]
fn identifier_bang_paren_is_a_function_macro_not_a_subprocess() {
    assert_eq!(predicted_kind("fmt!(x)\n"), None);
}

#[test]
fn known_command_before_bang_paren_keeps_its_shell_reading() {
    // The leading known command latches the shell signal, so the parens no
    // longer read as a Python call.
    assert_eq!(predicted_kind("echo!(x)\n"), Some(TokenKind::SubprocessStart));
}

// --- string and path prefixes --------------------------------------------

#[test]
fn string_prefix_wins_over_the_command_dictionary() {
    let mut harness = Harness::new("rf'pat'\n");
    assert_eq!(
        harness.scan(statement_start()),
        Some((TokenKind::StringStart, "rf'".to_string()))
    );
    let delimiter = harness.scanner.state().top_delimiter().expect("open");
    assert!(delimiter.is_raw());
    assert!(delimiter.is_format());
}

#[test]
fn bytes_prefix_at_line_start_opens_a_string() {
    let mut harness = Harness::new("b'x'\n");
    assert_eq!(
        harness.scan(statement_start()),
        Some((TokenKind::StringStart, "b'".to_string()))
    );
    assert!(harness.scanner.state().top_delimiter().expect("open").is_bytes());
}

#[test]
fn unprefixed_quote_at_line_start_opens_a_string() {
    let mut harness = Harness::new("'just text'\n");
    assert_eq!(
        harness.scan(statement_start()),
        Some((TokenKind::StringStart, "'".to_string()))
    );
}

#[test]
fn rm_with_arguments_is_still_a_command() {
    // `rm` shares letters with the raw/bytes prefixes; only a quote directly
    // after the word makes it a string.
    assert_eq!(predicted_kind("rm -rf /tmp\n"), Some(TokenKind::SubprocessStart));
}

#[test]
fn path_prefix_outcomes_consume_only_the_prefix() {
    assert_eq!(
        predicted("p'/tmp/foo'\n"),
        Some((TokenKind::PathPrefix, "p".to_string()))
    );
    assert_eq!(
        predicted("pr'/tmp'\n"),
        Some((TokenKind::PathPrefix, "pr".to_string()))
    );
    assert_eq!(
        predicted("PF\"/tmp\"\n"),
        Some((TokenKind::PathPrefix, "PF".to_string()))
    );
}

#[test]
fn bare_p_with_arguments_is_python() {
    assert_eq!(predicted_kind("p = 1\n"), None);
    assert_eq!(predicted_kind("p and q\n"), None);
}

// --- predictor contract ---------------------------------------------------

#[test]
fn none_outcome_commits_nothing() {
    let mut harness = Harness::new("x = 1\n");
    assert_eq!(harness.scan(statement_start()), None);
    assert_eq!(harness.position(), 0);
    assert_eq!(harness.scanner.state().indent_depth(), 1);
    assert_eq!(harness.scanner.state().delimiter_depth(), 0);
}

#[test]
fn subprocess_marker_is_zero_width() {
    let mut harness = Harness::new("ls -la\n");
    assert_eq!(
        harness.scan(statement_start()),
        Some((TokenKind::SubprocessStart, String::new()))
    );
    assert_eq!(harness.position(), 0);
}

#[test]
fn prediction_stops_at_the_line_boundary() {
    // Shell signals on the next line must not leak into this one.
    assert_eq!(predicted_kind("x = 1\nls -la\n"), None);
    assert_eq!(
        predicted_kind("ls -la\nx = 1\n"),
        Some(TokenKind::SubprocessStart)
    );
}

#[test]
fn prediction_without_marker_tokens_never_runs() {
    let mut harness = Harness::new("ls -la\n");
    assert_eq!(harness.scan(valid(&[TokenKind::Newline])), None);
    assert_eq!(harness.position(), 0);
}

#[test]
fn extended_dictionary_recognizes_extra_commands() {
    let options = ScannerOptions {
        extra_shell_commands: vec!["deploytool".to_string()],
    };
    let mut harness = Harness::with_options("deploytool prod\n", options);
    assert_eq!(
        harness.scan(statement_start()),
        Some((TokenKind::SubprocessStart, String::new()))
    );

    // Without the extension the same line defaults to Python.
    assert_eq!(predicted_kind("deploytool prod\n"), None);
}
