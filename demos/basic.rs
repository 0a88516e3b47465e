fn main() {
    let mut file = String::new();
    let mut limit = 42usize;
    let mut verbose = false;

    let mut parser = argline::Parser::from_env("A simple test command.\n\nThis is nice!");
    parser
        .arg(&mut limit, ["l", "limit"])
        .meta("N")
        .help("Limit the number of things by N.")
        .opt();
    parser
        .arg(&mut file, ["f", "file"])
        .meta("PATH")
        .help("Write to the file specified by PATH.");
    parser
        .set(&mut verbose, true, ["v", "verbose"])
        .help("Say more about what is going on.")
        .opt();
    parser.parse();
    drop(parser);

    println!("file: {}", file);
    println!("limit: {}", limit);
    println!("verbose: {}", verbose);
}
