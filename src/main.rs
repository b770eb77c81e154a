use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::{crate_version, App, Arg, ArgMatches};
use function_interpreter::{Interpreter, Parser};

struct Options {
    show_tokens: bool,
    show_tree: bool,
}

fn run(interpreter: &Interpreter, source: &str, options: &Options) -> anyhow::Result<i32> {
    let tokens = interpreter.tokenize(source);
    if options.show_tokens {
        let rendered: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        println!("{}", rendered.join(" "));
    }
    let tree = interpreter.build(&tokens)?;
    if options.show_tree {
        println!("{}", tree);
    }
    Ok(interpreter.interpret_tree(&tree)?)
}

/// read-eval-print until stdin runs dry; a bad line is reported, not fatal
fn prompt(interpreter: &Interpreter, options: &Options) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            println!();
            return Ok(());
        }
        let source = line.trim_end_matches(&['\r', '\n'][..]);
        if source.trim().is_empty() {
            continue;
        }

        match run(interpreter, source, options) {
            Ok(value) => println!("{}", value),
            Err(e) => eprintln!("error: {}", e),
        }
    }
}

fn parser_from(matches: &ArgMatches) -> anyhow::Result<Parser> {
    let mut parser = Parser::default();
    if let Some(depth) = matches.value_of("max-depth") {
        parser.max_depth = depth
            .parse()
            .with_context(|| format!("invalid --max-depth {:?}", depth))?;
    }
    Ok(parser)
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let matches = App::new("function-interpreter")
        .version(crate_version!())
        .about("Evaluates integer expressions written as function calls, e.g. ADD(1,MULTIPLY(2,3))")
        .arg(
            Arg::with_name("max-depth")
                .long("max-depth")
                .value_name("N")
                .takes_value(true)
                .help("Maximum nesting depth of function calls"),
        )
        .arg(
            Arg::with_name("tokens")
                .long("tokens")
                .help("Print the tokens of each expression"),
        )
        .arg(
            Arg::with_name("tree")
                .long("tree")
                .help("Print the expression tree before evaluating it"),
        )
        .arg(
            Arg::with_name("EXPRESSION")
                .multiple(true)
                .help("Evaluate this expression and exit instead of prompting"),
        )
        .get_matches();

    let interpreter = Interpreter::with_parser(parser_from(&matches)?);
    let options = Options {
        show_tokens: matches.is_present("tokens"),
        show_tree: matches.is_present("tree"),
    };

    match matches.values_of("EXPRESSION") {
        Some(words) => {
            let source = words.collect::<Vec<&str>>().join(" ");
            let value = run(&interpreter, &source, &options)?;
            println!("{}", value);
            Ok(())
        }
        None => prompt(&interpreter, &options),
    }
}
