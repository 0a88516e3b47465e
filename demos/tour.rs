use anyhow::Result;
use argline::{Callback, Parser};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy)]
enum Mode {
    Fast,
    Thorough,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut input = Vec::<String>::new();
    let mut output = String::from("-");
    let mut limit = 10u32;
    let mut mode = Mode::Fast;
    let mut includes = Vec::<String>::new();
    let mut defines = Vec::<(String, String)>::new();
    let mut quiet = 0usize;

    let mut parser = Parser::from_env(
        "A command touring the capabilities of argline. Descriptions which are \
         overly long are wrapped to the width of the terminal, and so are the \
         descriptions of the arguments listed below.",
    );

    parser
        .append(&mut input, ())
        .meta("INPUT")
        .help("Files to read from.");
    parser
        .arg(&mut output, ["o", "output"])
        .meta("FILE")
        .help("Write to FILE instead of stdout.")
        .opt();
    parser
        .arg(&mut limit, ["l", "limit"])
        .meta("N")
        .help("Stop after N things (default: 10).")
        .opt();
    parser
        .set(&mut mode, Mode::Thorough, ["t", "thorough"])
        .help("Take the time to look at everything, which is a lot slower but finds the things the fast mode glosses over.")
        .opt();
    parser
        .append(&mut includes, "I")
        .meta("DIR")
        .help("Add DIR to the search path.")
        .opt();
    parser
        .custom(
            Callback::value(|define| {
                let (key, value) = define
                    .split_once('=')
                    .ok_or_else(|| format!("`{}` is not KEY=VALUE", define))?;
                defines.push((key.to_owned(), value.to_owned()));
                Ok(())
            }),
            ["D", "define"],
        )
        .meta("KEY=VALUE")
        .help("Define a variable.")
        .multi()
        .opt();
    parser
        .custom(
            Callback::no_arg(|| {
                quiet += 1;
                Ok(())
            }),
            "q",
        )
        .help("Print less, can be repeated.")
        .multi()
        .opt();
    parser
        .custom(
            Callback::parser(|ctx| {
                println!("{} was given {} arguments", ctx.program(), ctx.args().len());
                Ok(())
            }),
            "count-args",
        )
        .help("Show how many arguments were given.")
        .opt();
    parser.parse();
    drop(parser);

    println!("input: {:?}", input);
    println!("output: {}", output);
    println!("limit: {}", limit);
    println!("mode: {:?}", mode);
    println!("includes: {:?}", includes);
    println!("defines: {:?}", defines);
    println!("quiet: {}", quiet);
    Ok(())
}
