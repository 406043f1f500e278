#[cfg(not(target_arch = "wasm32"))]
use std::{env, fs};

#[cfg(not(target_arch = "wasm32"))]
use anyhow::{anyhow, Context, Result};

#[cfg(not(target_arch = "wasm32"))]
use donut_view::app::{run_interactive, WindowInitError};
#[cfg(not(target_arch = "wasm32"))]
use donut_view::replay::{parse_trace, run_headless, TraceEvent};

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<()> {
    let options = CliOptions::parse(env::args().skip(1))?;
    let trace = match options.trace.as_deref() {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read trace {path}"))?;
            parse_trace(&contents).with_context(|| format!("failed to parse trace {path}"))?
        }
        None => Vec::new(),
    };

    if options.headless {
        return headless(&options, &trace);
    }

    match run_interactive(options.width, options.height) {
        Ok(()) => Ok(()),
        Err(err) if err.downcast_ref::<WindowInitError>().is_some() => {
            eprintln!("{err}. Falling back to --headless mode.");
            headless(&options, &trace)
        }
        Err(err) => Err(err),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn headless(options: &CliOptions, trace: &[TraceEvent]) -> Result<()> {
    let report = run_headless((options.width, options.height), options.frames, trace)?;
    println!("{report}");
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, PartialEq)]
struct CliOptions {
    width: u32,
    height: u32,
    headless: bool,
    frames: u64,
    trace: Option<String>,
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for CliOptions {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            headless: false,
            frames: 120,
            trace: None,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
const USAGE: &str =
    "Usage: donut-view [--width W] [--height H] [--headless] [--frames N] [--trace FILE]";

#[cfg(not(target_arch = "wasm32"))]
impl CliOptions {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut options = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--width" => options.width = parse_value(&arg, args.next())?,
                "--height" => options.height = parse_value(&arg, args.next())?,
                "--frames" => options.frames = parse_value(&arg, args.next())?,
                "--trace" => {
                    options.trace = Some(
                        args.next()
                            .ok_or_else(|| anyhow!("--trace expects a file path\n{USAGE}"))?,
                    );
                }
                "--headless" => options.headless = true,
                "--help" | "-h" => return Err(anyhow!(USAGE)),
                other => return Err(anyhow!("Unknown argument: {other}\n{USAGE}")),
            }
        }
        Ok(options)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_value<T>(flag: &str, value: Option<String>) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let value = value.ok_or_else(|| anyhow!("{flag} expects a value\n{USAGE}"))?;
    value
        .parse::<T>()
        .map_err(|err| anyhow!("invalid value {value:?} for {flag}: {err}"))
}
