use std::{num::NonZeroUsize, path::Path, process::Command};

use super::Backend;

pub struct CBackend;

impl Backend for CBackend {
    fn name(&self) -> &'static str {
        "c"
    }

    fn extension(&self) -> &'static str {
        "c"
    }

    fn prologue(&self, memsize: NonZeroUsize) -> String {
        format!(
            "\
/* This program was generated by bfcc from brainfuck source. */
#include <stdio.h>
#include <stdlib.h>

#define MEMSIZE {memsize}
#define CELL (*cell())

static long long array[MEMSIZE];
static size_t idx = 0;

/* idx is unsigned, so moving left of cell 0 also lands past the end */
static long long *cell(void) {{
    if (idx >= MEMSIZE) {{
        fprintf(stderr, \"cell index %zu out of range\\n\", idx);
        abort();
    }}
    return &array[idx];
}}

static long long input(void) {{
    fflush(stdout);
    int c = getchar();
    if (c == EOF) {{
        fputs(\"byte not read\\n\", stderr);
        abort();
    }}
    return (unsigned char)c;
}}

int main(void) {{
"
        )
    }

    fn epilogue(&self) -> &'static str {
        "\n    fflush(stdout);\n    return 0;\n}\n"
    }

    fn shift_right(&self, by: usize) -> String {
        format!("idx += {by};")
    }

    fn shift_left(&self, by: usize) -> String {
        format!("idx -= {by};")
    }

    fn add(&self, by: usize) -> String {
        format!("CELL += {by};")
    }

    fn sub(&self, by: usize) -> String {
        format!("CELL -= {by};")
    }

    fn write(&self) -> &'static str {
        "putchar((unsigned char)CELL);"
    }

    fn read(&self) -> &'static str {
        "CELL = input();"
    }

    fn loop_open(&self) -> &'static str {
        "while (CELL != 0) {"
    }

    fn loop_close(&self) -> &'static str {
        "}"
    }

    fn clear(&self) -> &'static str {
        "CELL = 0;"
    }

    fn build_command(&self, source: &Path, output: &Path) -> Command {
        let mut command = Command::new("cc");
        command.args(["-O2", "-s", "-o"]).arg(output).arg(source);
        command
    }
}
