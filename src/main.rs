use std::io::{self, BufWriter, Write};
use std::process;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use updatectl::cli::commands::{execute_command, parse_global, report_invalid_args};
use updatectl::cli::output;

fn main() {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let code = match parse_global(std::env::args_os()) {
        Ok(args) => {
            setup_logging(args.debug);
            match execute_command(&args, &mut out) {
                Ok(code) => code,
                Err(e) => {
                    output::error(&e);
                    e.exit_code()
                }
            }
        }
        Err(e) => report_invalid_args(&e, &mut out),
    };

    if let Err(e) = out.flush() {
        output::error(&format!("write output: {}", e));
    }
    drop(out);
    process::exit(code);
}

/// WARN by default, DEBUG with `--debug`; `RUST_LOG` overrides both.
fn setup_logging(debug: bool) {
    let default = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    tracing::debug!("Debug mode: debug");
}
