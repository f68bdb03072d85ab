//! Command-line front end for the catalogue query engine.
//!
//! `catq` reads one normalized request as JSON, compiles it and prints the
//! engine request body, or the error envelope when the request is rejected.

pub mod config;
pub mod logging;

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use catalogue_query::{
    ErrorEnvelope, ListingRequest, QueryCompiler, QueryConfig, QueryResult, RelationshipRequest,
    RelationshipResolver, SearchRequest, build_listing,
};
use serde_json::{Value, json};

pub use config::{CliConfig, Command, InputArgs};
pub use logging::init_logging;

/// Exit status for a rejected request.
pub const EXIT_REJECTED: i32 = 2;

/// The result of compiling one request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The engine request body.
    Compiled(Value),
    /// The client-facing error.
    Rejected(ErrorEnvelope),
}

impl Outcome {
    /// Renders the outcome as printed on stdout.
    pub fn to_json(&self) -> Value {
        match self {
            Outcome::Compiled(body) => body.clone(),
            Outcome::Rejected(envelope) => json!(envelope),
        }
    }

    /// Returns true when the request was rejected.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }
}

/// Reads the request JSON from `path`, or from stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> anyhow::Result<Value> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display()))?,
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read request from stdin")?;
            raw
        }
    };
    serde_json::from_str(&raw).context("Request is not valid JSON")
}

/// Compiles one request for the given subcommand.
pub fn execute(command: &Command, input: Value, config: &QueryConfig) -> Outcome {
    let result: QueryResult<Value> = match command {
        Command::Search(_) => SearchRequest::from_json(input).and_then(|request| {
            QueryCompiler::new(config.clone())
                .compile_body(&request)
                .map(|body| body.to_json())
        }),
        Command::Relationship(_) => RelationshipRequest::from_json(input).and_then(|request| {
            RelationshipResolver::new()
                .resolve_checked(&request)
                .map(|query| json!({ "query": query }))
        }),
        Command::List(_) => ListingRequest::from_json(input)
            .and_then(|request| build_listing(&request, config))
            .map(|listing| listing.body()),
    };

    match result {
        Ok(body) => Outcome::Compiled(body),
        Err(e) => Outcome::Rejected(e.to_envelope()),
    }
}
