use airport_weather::cli::{args::Args, commands};
use clap::{CommandFactory, Parser};
use std::process;

fn main() {
    let args = Args::parse();

    // Without a subcommand there is nothing to seed, so show help
    if args.command.is_none() {
        if let Err(e) = Args::command().print_help() {
            eprintln!("Failed to print help: {}", e);
            process::exit(1);
        }
        println!();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    eprintln!("Failed to listen for CTRL+C: {}", e);
                }
                eprintln!("\nReceived CTRL+C, shutting down...");
                process::exit(130);
            }
        }
    });

    if let Err(error) = result {
        eprintln!("Error: {}", error);
        process::exit(1);
    }
}
