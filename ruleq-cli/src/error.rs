use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("could not read context file {path:?}: {source}")]
    ReadContext {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse context file as JSON: {source}")]
    ParseContext {
        #[source]
        source: serde_json::Error,
    },

    #[error("context JSON must be an object at the top level")]
    ContextNotAnObject,

    #[error("rule did not compile: {source}")]
    Compile {
        #[source]
        source: ruleq::CompileError,
    },
}
