//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use fogtile::service::ServiceError;
use std::fmt;
use std::process;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Failed to create the service
    ServiceCreation(ServiceError),
    /// Failed to activate or serve the tile request
    Fetch(ServiceError),
    /// The composed tile path was not routed to the synthesizer
    UnroutedPath(String),
    /// Failed to write the output file
    FileWrite { path: String, error: std::io::Error },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        if let CliError::ServiceCreation(ServiceError::InvalidTileSize(_)) = self {
            eprintln!();
            eprintln!("Supported tile sizes: 256, 512, 1024");
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::ServiceCreation(e) => write!(f, "Failed to create service: {}", e),
            CliError::Fetch(e) => write!(f, "Failed to render tile: {}", e),
            CliError::UnroutedPath(path) => {
                write!(f, "Path {:?} was not intercepted as a tile request", path)
            }
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write {}: {}", path, error)
            }
        }
    }
}
