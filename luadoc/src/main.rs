//! Command line tool for building a Lua package's Markdown API reference.

use clap::Parser;
use luadoc::{cli::Command, compile_markdown};
use luadoc_tracing::{init_tracing_subscriber, println_red_err, TracingSubscriberOptions};

fn main() {
    let command = Command::parse();
    init_tracing_subscriber(TracingSubscriberOptions {
        silent: Some(command.silent),
        ..Default::default()
    });
    if let Err(err) = compile_markdown(&command) {
        println_red_err(&format!("{err}"));
        std::process::exit(1);
    }
}
