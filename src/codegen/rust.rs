use std::{num::NonZeroUsize, path::Path, process::Command};

use super::Backend;

pub struct RustBackend;

impl Backend for RustBackend {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn extension(&self) -> &'static str {
        "rs"
    }

    fn prologue(&self, memsize: NonZeroUsize) -> String {
        format!(
            "\
// This program was generated by bfcc from brainfuck source.
#![allow(unused)]

use std::io::{{Read, Write}};

fn main() {{
    let mut array = vec![0i64; {memsize}];
    let mut idx: usize = 0;

    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    let mut input = || -> i64 {{
        let _ = std::io::stdout().flush();
        let mut buf = [0u8; 1];
        match stdin.read(&mut buf) {{
            Ok(1) => i64::from(buf[0]),
            Ok(_) => panic!(\"byte not read\"),
            Err(err) => panic!(\"{{}}\", err),
        }}
    }};

"
        )
    }

    fn epilogue(&self) -> &'static str {
        "\n    stdout.flush().unwrap();\n}\n"
    }

    fn shift_right(&self, by: usize) -> String {
        format!("idx += {by};")
    }

    fn shift_left(&self, by: usize) -> String {
        format!("idx -= {by};")
    }

    fn add(&self, by: usize) -> String {
        format!("array[idx] = array[idx].wrapping_add({by});")
    }

    fn sub(&self, by: usize) -> String {
        format!("array[idx] = array[idx].wrapping_sub({by});")
    }

    fn write(&self) -> &'static str {
        "stdout.write_all(&[array[idx] as u8]).unwrap();"
    }

    fn read(&self) -> &'static str {
        "array[idx] = input();"
    }

    fn loop_open(&self) -> &'static str {
        "while array[idx] != 0 {"
    }

    fn loop_close(&self) -> &'static str {
        "}"
    }

    fn clear(&self) -> &'static str {
        "array[idx] = 0;"
    }

    fn build_command(&self, source: &Path, output: &Path) -> Command {
        let mut command = Command::new("rustc");
        command
            .args(["--edition", "2021", "-C", "opt-level=3", "-C", "strip=symbols"])
            .arg("-o")
            .arg(output)
            .arg(source);
        command
    }
}
