//! CLI argument parsing using clap.

use clap::Parser;

/// `Postcraft` - AI social media post generator client.
///
/// Connects to a running generation backend and opens the interactive
/// two-step wizard (context, then content).
#[derive(Parser, Debug)]
#[command(name = "postcraft", version, about, long_about = None)]
pub struct Args {
    /// Base URL of the generation backend
    #[arg(long, default_value = "http://localhost:5000")]
    pub server: String,
}
