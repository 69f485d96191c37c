use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;

use intbag::{demonstrate_overflow, Args, Bag, SelfCheck};

fn summarize(text: &str) -> Result<()> {
    let bag: Bag = text
        .parse()
        .with_context(|| format!("unable to read bag from {:?}", text))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    bag.write(&mut out)?;
    writeln!(out)?;
    writeln!(out, "size: {} of {}", bag.size(), bag.capacity())?;
    for (value, count) in bag.distinct_counts() {
        writeln!(out, "{}: {}", value, count)?;
    }
    Ok(())
}

fn run_checks(args: &Args) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut check = SelfCheck::new(&mut out);
    check.run_all()?;
    check.run_random(args.rounds, args.seed)?;
    let report = check.finish();

    if args.overflow {
        demonstrate_overflow(&mut out)?;
    }

    writeln!(out, "All tests completed.")?;
    if !report.is_success() {
        bail!(
            "{} of {} checks failed",
            report.failures.len(),
            report.total()
        );
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let result = match &args.bag {
        Some(text) => summarize(text),
        None => run_checks(&args),
    };
    match result {
        Ok(_) => {}
        Err(e) => panic!("{:#}", e),
    }
}
