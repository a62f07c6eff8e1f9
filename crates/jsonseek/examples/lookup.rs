//! Serves record lookups the way a `GET /api/job/:index` route would.
//!
//! ```text
//! cargo run --example lookup -- public/features.json 0 42 -1 abc
//! ```
//!
//! Each index argument is treated as the raw `:index` path segment of one
//! request. The response status follows the route's contract:
//!
//! * `200` with the record as compact JSON when it exists,
//! * `404` when the array has fewer elements,
//! * `400` when the index is not a non-negative integer,
//! * `500` when the source cannot be opened, read or parsed.
//!
//! Set `RUST_LOG=jsonseek=debug` to watch each lookup stop early.

use std::{path::Path, process::ExitCode};

use jsonseek::{Lookup, LookupError, LookupResult, TargetIndex};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Handles one request, returning the status and the response body.
fn respond(service: &Lookup, source: &Path, index: &str) -> (u16, String) {
    let outcome = index
        .parse::<TargetIndex>()
        .and_then(|target| service.find_in_file(source, target));

    match outcome {
        Ok(LookupResult::Found(record)) => (200, record.to_string()),
        Ok(LookupResult::NotFound) => (404, "Job not found.".to_owned()),
        Err(LookupError::InvalidArgument(msg)) => (400, msg),
        Err(err) => {
            error!(error = %err, "stream error");
            (500, "Error processing data file.".to_owned())
        }
    }
}

fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jsonseek=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(source) = args.next() else {
        eprintln!("usage: lookup <features.json> <index>...");
        return ExitCode::from(2);
    };

    let service = Lookup::default();
    for index in args {
        let (status, body) = respond(&service, Path::new(&source), &index);
        println!("GET /api/job/{index} -> {status} {body}");
    }
    ExitCode::SUCCESS
}
