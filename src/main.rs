extern crate clap;

use std::{
    collections::HashSet,
    io,
    num::NonZeroUsize,
    path::PathBuf,
    time::Instant,
};

use anyhow::{ensure, Context, Result};
use bfcc::{
    interpreter::{Interpreter, Runtime},
    lexer::{Lexer, TokenKind},
    Generator, Target, DEFAULT_MEMSIZE,
};
use clap::{ArgAction, Parser, ValueEnum};
use colored::Colorize;
use tracing::Level;

/// Brainf**k to Rust/C/Go compiler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The file to operate on
    #[arg()]
    file: PathBuf,

    /// What to do with the program, `build` when none are given
    #[arg(value_enum)]
    commands: Vec<Commands>,

    /// Where the binary goes, the generated source lands next to it [default: FILE without extension]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Language to generate
    #[arg(short, long, value_enum, default_value_t = Target::Rust)]
    target: Target,

    /// Number of cells on the tape
    #[arg(short, long, default_value_t = DEFAULT_MEMSIZE)]
    memsize: NonZeroUsize,

    /// More diagnostics on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Hash, PartialEq, Eq)]
enum Commands {
    /// Output the lexer
    Tokens,
    /// Output the generated source
    Source,
    /// Run the program with the interpreter on stdin/stdout
    Interpret,
    /// Generate the source and build it into a binary
    Build,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let mut commands: HashSet<Commands> = HashSet::from_iter(args.commands);
    if commands.is_empty() {
        commands.insert(Commands::Build);
    }

    eprintln!("Running {}", args.file.display());

    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    if commands.contains(&Commands::Tokens) {
        for (index, token) in Lexer::new(&text).with_comments(true).enumerate() {
            match &token.kind {
                TokenKind::Comment(c) => {
                    println!("{:>6}  {:<10} {:?}", index, token.kind.to_string(), c);
                }
                kind => println!(
                    "{:>6}  {:<10} x{:<5} {}",
                    index,
                    kind.to_string(),
                    token.repeat,
                    token.location
                ),
            }
        }
    }

    eprintln!("{}", "Starting lexing".blue());
    let now = Instant::now();
    let tokens = Lexer::new(&text).tokens();
    eprintln!(
        "{} {} tokens in {:.2?}",
        "Finished lexing with".green(),
        tokens.len(),
        now.elapsed()
    );

    let generator = Generator::new(args.memsize, args.target);

    if commands.contains(&Commands::Source) {
        let source = generator.generate_source(&tokens)?;
        print!("{}", source);
    }

    if commands.contains(&Commands::Interpret) {
        eprintln!("{}", "Starting interpreter".blue());
        let now = Instant::now();
        let mut runtime = Runtime::new(args.memsize, io::stdin().lock(), io::stdout().lock());
        Interpreter::new()
            .run(&mut runtime, &tokens)
            .context("interpreter failed")?;
        eprintln!();
        eprintln!("{} {:.2?}", "Finished interpreter in".green(), now.elapsed());
    }

    if commands.contains(&Commands::Build) {
        let output = args
            .output
            .unwrap_or_else(|| args.file.with_extension(""));
        ensure!(
            output != args.file,
            "building {} would overwrite the source, pass --output",
            output.display()
        );

        eprintln!("{} {}", "Starting build for".blue(), generator.target());
        let now = Instant::now();
        generator
            .generate(&text, &output)
            .with_context(|| format!("failed to build {}", output.display()))?;
        eprintln!(
            "{} {} in {:.2?}",
            "Finished building".green(),
            output.display(),
            now.elapsed()
        );
    }

    Ok(())
}
