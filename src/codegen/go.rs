use std::{num::NonZeroUsize, path::Path, process::Command};

use super::Backend;

pub struct GoBackend;

impl Backend for GoBackend {
    fn name(&self) -> &'static str {
        "go"
    }

    fn extension(&self) -> &'static str {
        "go"
    }

    // gofmt style
    fn indent(&self) -> &'static str {
        "\t"
    }

    fn prologue(&self, memsize: NonZeroUsize) -> String {
        format!(
            "\
// This program was generated by bfcc from brainfuck source.
package main

import (
\t\"os\"
)

var array [{memsize}]int
var idx int

func main() {{
\tinput := func() int {{
\t\tbuf := make([]byte, 1)
\t\tn, err := os.Stdin.Read(buf)
\t\tif err != nil {{
\t\t\tpanic(err)
\t\t}}
\t\tif n != 1 {{
\t\t\tpanic(\"byte not read\")
\t\t}}
\t\treturn int(buf[0])
\t}}
\t_ = input

"
        )
    }

    fn epilogue(&self) -> &'static str {
        "}\n"
    }

    fn shift_right(&self, by: usize) -> String {
        format!("idx += {by}")
    }

    fn shift_left(&self, by: usize) -> String {
        format!("idx -= {by}")
    }

    fn add(&self, by: usize) -> String {
        format!("array[idx] += {by}")
    }

    fn sub(&self, by: usize) -> String {
        format!("array[idx] -= {by}")
    }

    fn write(&self) -> &'static str {
        "os.Stdout.Write([]byte{byte(array[idx])})"
    }

    fn read(&self) -> &'static str {
        "array[idx] = input()"
    }

    fn loop_open(&self) -> &'static str {
        "for array[idx] != 0 {"
    }

    fn loop_close(&self) -> &'static str {
        "}"
    }

    fn clear(&self) -> &'static str {
        "array[idx] = 0"
    }

    fn build_command(&self, source: &Path, output: &Path) -> Command {
        let mut command = Command::new("go");
        command
            .arg("build")
            .arg("-o")
            .arg(output)
            .args(["-ldflags", "-s -w"])
            .arg(source);
        command
    }
}

#[cfg(test)]
mod tests {
    use crate::codegen::{Generator, Target};

    use super::*;

    fn generate(program: &str) -> String {
        Generator::new(NonZeroUsize::new(16).unwrap(), Target::Go)
            .source_for(program)
            .unwrap()
    }

    #[test]
    fn body_is_gofmt_shaped() {
        let source = generate("++[>+++[->+<]<-],>>.[-]");
        let body = &source[GoBackend.prologue(NonZeroUsize::new(16).unwrap()).len()..];

        let mut depth = 1;
        for line in body.lines().filter(|line| !line.is_empty()) {
            if line == "}" {
                // closes func main
                assert_eq!(depth, 1);
                continue;
            }
            if line.trim_start() == "}" {
                depth -= 1;
            }
            assert!(line.starts_with(&"\t".repeat(depth)), "{line:?}");
            assert!(!line[depth..].starts_with(['\t', ' ']), "{line:?}");
            assert!(!line.ends_with(';'), "{line:?}");
            if line.ends_with('{') {
                depth += 1;
            }
        }
        assert_eq!(depth, 1);
    }

    #[test]
    fn declared_locals_are_used() {
        // go refuses to build with unused locals or imports
        let source = generate("");
        assert!(source.contains("\t_ = input\n"));
        assert!(source.contains("\"os\""));
        assert!(source.contains("os.Stdin.Read"));
    }

    #[test]
    fn writes_low_byte_of_int_cells() {
        let source = generate("+.");
        assert!(source.contains("var array [16]int\n"));
        assert!(source.contains("\tos.Stdout.Write([]byte{byte(array[idx])})\n"));
    }
}
