use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "samvidhan",
    version,
    about = "Learn the Indian Constitution: quiz and AI assistant in the terminal"
)]
pub struct Cli {
    /// Backend base URL [default: http://127.0.0.1:8000]
    #[arg(long, value_name = "url", global = true)]
    pub api_url: Option<String>,

    /// Config file [default: <config dir>/samvidhan/config.yaml]
    #[arg(long, value_name = "path", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Take the constitution quiz
    Quiz,
    /// Chat with the constitution assistant
    Chat,
    /// Ask the assistant one question and print the answer
    Ask {
        /// The question; multiple words are joined with spaces
        #[arg(required = true)]
        query: Vec<String>,
    },
}
