use std::{
    io::Write,
    num::NonZeroUsize,
    path::Path,
    process::{Command, Output, Stdio},
};

use anyhow::Result;
use bfcc::{
    interpreter::{Interpreter, Runtime},
    lexer::Lexer,
    CodegenError, Error, Generator, Target,
};
use tempfile::tempdir;

const MEMSIZE: NonZeroUsize = match NonZeroUsize::new(1024) {
    Some(n) => n,
    None => unreachable!(),
};

const HELLO_WORLD: &str = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";

/// (program, stdin, expected stdout)
fn corpus() -> Vec<(String, &'static str, Vec<u8>)> {
    vec![
        ("+".repeat(65) + ".", "", b"A".to_vec()),
        ("++++[>++++++++<-]>.".to_string(), "", b" ".to_vec()),
        (HELLO_WORLD.to_string(), "", b"Hello World!\n".to_vec()),
        (",.>,.<.".to_string(), "ok", b"oko".to_vec()),
        (
            "+++[-]++++++++[>++++++<-]>+. then [-] clear again .".to_string(),
            "",
            vec![b'1', 0],
        ),
        ("-.".to_string(), "", vec![255]),
        (
            "+".repeat(256) + "[.-]",
            "",
            (1..=256).rev().map(|n: i64| n as u8).collect(),
        ),
        ("++++[--]+.".to_string(), "", vec![1]),
    ]
}

fn toolchain_available(target: Target) -> bool {
    let program = match target {
        Target::Rust => "rustc",
        Target::C => "cc",
        Target::Go => "go",
    };
    let flag = if target == Target::Go { "version" } else { "--version" };
    Command::new(program)
        .arg(flag)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

fn interpret(program: &str, input: &[u8]) -> Vec<u8> {
    let tokens = Lexer::new(program).tokens();
    let mut runtime = Runtime::new(MEMSIZE, input, Vec::new());
    Interpreter::new().run(&mut runtime, &tokens).unwrap();
    runtime.into_output()
}

fn execute(binary: &Path, input: &[u8]) -> Result<Output> {
    let mut child = Command::new(binary)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    child.stdin.take().unwrap().write_all(input)?;
    Ok(child.wait_with_output()?)
}

fn check_corpus(target: Target) -> Result<()> {
    if !toolchain_available(target) {
        eprintln!("skipping {target}: toolchain not installed");
        return Ok(());
    }

    let dir = tempdir()?;
    let generator = Generator::new(MEMSIZE, target);

    for (i, (program, input, expected)) in corpus().into_iter().enumerate() {
        assert_eq!(
            interpret(&program, input.as_bytes()),
            expected,
            "interpreter on {program}"
        );

        let binary = dir.path().join(format!("program{i}"));
        generator.generate(&program, &binary)?;
        assert!(dir
            .path()
            .join(format!("program{i}.{}", generator.backend().extension()))
            .exists());

        let output = execute(&binary, input.as_bytes())?;
        assert!(output.status.success(), "{target} binary for {program} failed");
        assert_eq!(output.stdout, expected, "{target} binary for {program}");
    }

    Ok(())
}

#[test]
fn rust_binaries_match_interpreter() -> Result<()> {
    check_corpus(Target::Rust)
}

#[test]
fn c_binaries_match_interpreter() -> Result<()> {
    check_corpus(Target::C)
}

#[test]
fn go_binaries_match_interpreter() -> Result<()> {
    check_corpus(Target::Go)
}

#[test]
fn starved_input_aborts_the_program() -> Result<()> {
    if !toolchain_available(Target::Rust) {
        return Ok(());
    }

    let dir = tempdir()?;
    let binary = dir.path().join("starved");
    Generator::new(MEMSIZE, Target::Rust).generate(",.,.", &binary)?;

    let output = execute(&binary, b"x")?;
    assert!(!output.status.success());
    assert_eq!(output.stdout, b"x");
    Ok(())
}

#[test]
fn leaving_the_tape_aborts_c_programs() -> Result<()> {
    if !toolchain_available(Target::C) {
        return Ok(());
    }

    let dir = tempdir()?;
    for (i, program) in ["<+", "+.>>>>.", "+[>+]"].into_iter().enumerate() {
        let binary = dir.path().join(format!("outside{i}"));
        Generator::new(NonZeroUsize::new(4).unwrap(), Target::C).generate(program, &binary)?;
        let output = execute(&binary, b"")?;
        assert!(!output.status.success(), "{program}");
    }
    Ok(())
}

#[test]
fn failed_generation_writes_nothing() -> Result<()> {
    let dir = tempdir()?;
    let binary = dir.path().join("broken");

    for target in [Target::Rust, Target::C, Target::Go] {
        let err = Generator::new(MEMSIZE, target)
            .generate("+[>+", &binary)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Codegen(CodegenError::UnclosedLoop { index: 1 })
        ));
    }

    assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);
    Ok(())
}

#[test]
fn regenerating_gives_identical_source() -> Result<()> {
    if !toolchain_available(Target::Rust) {
        return Ok(());
    }

    let dir = tempdir()?;
    let binary = dir.path().join("twice");
    let generator = Generator::new(MEMSIZE, Target::Rust);
    let source_path = dir.path().join("twice.rs");

    generator.generate(HELLO_WORLD, &binary)?;
    let first = std::fs::read(&source_path)?;
    generator.generate(HELLO_WORLD, &binary)?;
    let second = std::fs::read(&source_path)?;

    assert_eq!(first, second);
    Ok(())
}
