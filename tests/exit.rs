//! Runs `Parser::parse` in a child process, since it exits on help and
//! errors.

use std::env;
use std::process::{Command, Output};

use argline::Parser;

const MODE: &str = "ARGLINE_EXIT_MODE";
const ARGS: &str = "ARGLINE_EXIT_ARGS";

/// Does nothing unless started by [run].
#[test]
fn child() {
    let mode = match env::var(MODE) {
        Ok(mode) => mode,
        Err(..) => return,
    };

    let args = env::var(ARGS).unwrap_or_default();
    let argv = std::iter::once("prog").chain(args.split_whitespace());

    let mut name = String::new();
    let mut parser = Parser::new("Say hello.", argv);
    parser
        .arg(&mut name, ["n", "name"])
        .meta("NAME")
        .help("Who to greet.");
    parser.parse();

    match mode.as_str() {
        "error" => parser.error("nobody to greet"),
        "help" => parser.help_and_exit(),
        _ => {}
    }

    drop(parser);
    println!("hello {}", name);
}

fn run(mode: &str, args: &str) -> Output {
    let exe = env::current_exe().unwrap();

    Command::new(exe)
        .args(["child", "--exact", "--nocapture", "--test-threads=1"])
        .env(MODE, mode)
        .env(ARGS, args)
        .output()
        .unwrap()
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

const HELP: &str = "\
usage: prog [-h] -n NAME

Say hello.

optional arguments:
 -h, --help      show this help message and exit
 -n, --name NAME Who to greet.
";

#[test]
fn help_goes_to_stdout_with_success() {
    for args in ["--help", "-h", "-n Ferris --help"] {
        let output = run("parse", args);
        let stdout = text(&output.stdout);

        assert_eq!(output.status.code(), Some(0));
        assert!(stdout.ends_with(HELP), "{:?}", stdout);
        assert!(!text(&output.stderr).contains("usage:"));
    }
}

#[test]
fn errors_go_to_stderr_with_status_two() {
    let output = run("parse", "");
    let stderr = text(&output.stderr);

    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr.ends_with("usage: prog [-h] -n NAME\nprog: error: argument -n is required\n"),
        "{:?}",
        stderr
    );
    assert!(!text(&output.stdout).contains("usage:"));

    let output = run("parse", "-n Ferris --loud");
    assert_eq!(output.status.code(), Some(2));
    assert!(text(&output.stderr).ends_with("prog: error: unrecognized argument: --loud\n"));
}

#[test]
fn user_errors_exit_with_status_two() {
    let output = run("error", "-n Ferris");
    let stderr = text(&output.stderr);

    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr.ends_with("usage: prog [-h] -n NAME\nprog: error: nobody to greet\n"),
        "{:?}",
        stderr
    );
}

#[test]
fn help_and_exit_prints_help() {
    let output = run("help", "-n Ferris");

    assert_eq!(output.status.code(), Some(0));
    assert!(text(&output.stdout).ends_with(HELP));
}

#[test]
fn successful_parse_continues() {
    let output = run("parse", "--name Ferris");

    assert!(output.status.success());
    assert!(text(&output.stdout).contains("hello Ferris\n"));
}
