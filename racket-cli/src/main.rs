use std::env;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use miniracket::execute;

fn main() -> Result<ExitCode> {
    let arguments: Vec<String> = env::args().skip(1).collect();
    let source = match arguments.as_slice() {
        [] => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
        [path] => fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?,
        _ => bail!("usage: miniracket [FILE]"),
    };

    let mut failed = false;
    for result in execute(&source) {
        match (result.value, result.error) {
            (Some(value), _) => println!("{value}"),
            (_, Some(error)) => {
                eprintln!("error: {error}");
                failed = true;
            }
            _ => {}
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
