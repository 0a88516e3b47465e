use argline::{Parser, Stop};
use pretty_assertions::assert_eq;

/// Declare the arguments of a file copying tool and run `f` on the parser.
fn with_parser<T>(args: &[&str], f: impl FnOnce(&mut Parser<'_>) -> T) -> T {
    let mut sources = Vec::<String>::new();
    let mut dest = String::new();
    let mut verbose = false;
    let mut excludes = Vec::<String>::new();

    let argv = std::iter::once("/usr/bin/tool").chain(args.iter().copied());
    let mut parser = Parser::new(
        "Copy files from one place to another, keeping their metadata intact.",
        argv,
    );

    parser
        .append(&mut sources, ())
        .meta("SOURCE")
        .help("Files to copy.");
    parser
        .arg(&mut dest, ["d", "dest"])
        .meta("DIR")
        .help("Directory to copy into.");
    parser
        .set(&mut verbose, true, ["v", "verbose"])
        .help("Print every file as it is copied.")
        .opt();
    parser
        .append(&mut excludes, "exclude")
        .meta("GLOB")
        .help("Skip files matching GLOB.")
        .opt();

    f(&mut parser)
}

#[test]
fn usage_line() {
    let usage = with_parser(&[], |parser| parser.usage_line());
    assert_eq!(usage, "usage: tool [-h] [SOURCE ...] -d DIR [-v] [--exclude GLOB ...]");
}

#[test]
fn usage_override() {
    let usage = with_parser(&[], |parser| {
        parser.set_usage("[options] SOURCE... -d DIR");
        parser.usage_line()
    });

    assert_eq!(usage, "usage: tool [options] SOURCE... -d DIR");
}

#[test]
fn help_fits_width() {
    let help = with_parser(&[], |parser| parser.help().width(50).to_string());

    assert_eq!(
        help,
        "\
usage: tool [-h] [SOURCE ...] -d DIR [-v]
       [--exclude GLOB ...]

Copy files from one place to another, keeping
their metadata intact.

positional arguments:
 SOURCE         Files to copy.

optional arguments:
 -h, --help     show this help message and exit
 -d, --dest DIR Directory to copy into.
 -v, --verbose  Print every file as it is copied.
 --exclude GLOB Skip files matching GLOB.
"
    );
}

#[test]
fn help_without_terminal() {
    let help = with_parser(&[], |parser| parser.help().width(0).to_string());

    assert_eq!(
        help,
        "\
usage: tool [-h] [SOURCE ...] -d DIR [-v] [--exclude GLOB ...]

Copy files from one place to another, keeping their metadata intact.

positional arguments:
 SOURCE         Files to copy.

optional arguments:
 -h, --help     show this help message and exit
 -d, --dest DIR Directory to copy into.
 -v, --verbose  Print every file as it is copied.
 --exclude GLOB Skip files matching GLOB.
"
    );
}

#[test]
fn help_on_narrow_terminal() {
    let help = with_parser(&[], |parser| parser.help().width(40).to_string());
    let listing = &help[help.find("\npositional").unwrap()..];

    assert_eq!(
        listing,
        "
positional arguments:
 SOURCE      Files to copy.

optional arguments:
 -h, --help  show this help message and
             exit
 -d, --dest DIR Directory to copy into.
 -v, --verbose Print every file as it
               is copied.
 --exclude GLOB Skip files matching
                GLOB.
"
    );

    for line in help.lines() {
        assert!(line.chars().count() < 40, "{:?} is too long", line);
    }
}

#[test]
fn help_without_implicit_switch() {
    let help = with_parser(&[], |parser| {
        parser.set_provide_help(false);
        parser.help().width(0).to_string()
    });

    assert!(help.starts_with("usage: tool [SOURCE ...] -d DIR"));
    assert!(!help.contains("--help"));
}

#[test]
fn help_stop_renders_help() {
    let (status, output) = with_parser(&["a.txt", "--help"], |parser| {
        let stop = parser.try_parse().unwrap_err();
        (stop.status(), parser.render_stop(&stop, 0))
    });

    assert_eq!(status, 0);
    assert!(output.starts_with("usage: tool"));
}

#[test]
fn error_stop_renders_usage_and_message() {
    let (status, output) = with_parser(&["a.txt"], |parser| {
        let stop = parser.try_parse().unwrap_err();
        (stop.status(), parser.render_stop(&stop, 40))
    });

    assert_eq!(status, 2);
    assert_eq!(
        output,
        "\
usage: tool [-h] [SOURCE ...] -d DIR
       [-v] [--exclude GLOB ...]
tool: error: argument -d is required
"
    );
}

#[test]
fn unrecognized_switch_is_reported_verbatim() {
    let output = with_parser(&["-d", "out", "--frobnicate"], |parser| {
        let stop = parser.try_parse().unwrap_err();
        assert!(matches!(stop, Stop::Error(..)));
        parser.render_stop(&stop, 0)
    });

    assert!(output.ends_with("tool: error: unrecognized argument: --frobnicate\n"));
}
