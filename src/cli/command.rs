use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_DATA_DIR;

#[derive(Parser, Debug)]
#[command(name = "rolodex", version, about = "Address book backed by a persisted contact store")]
pub struct Cli {
    /// Storage medium (json, mem)
    #[arg(long, env = "ROLODEX_STORAGE", default_value_t = String::from("json"))]
    pub storage: String,

    /// Directory holding the json storage file
    #[arg(long, env = "ROLODEX_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Simulated I/O delay per store operation, in milliseconds
    #[arg(long, env = "ROLODEX_LATENCY_MS", default_value_t = 300)]
    pub latency_ms: u64,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommand and their flags
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List contacts
    List {
        /// Only list one category (work, personal, client, other, all)
        #[arg(long)]
        category: Option<String>,
    },
    /// Search names, email, phone and company
    Search {
        query: String,
    },
    /// Show every field of one contact
    Show {
        id: String,
    },
    /// Add a new contact
    Add {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: String,

        /// Contact category (work, personal, client, other)
        #[arg(long, default_value = "other")]
        category: String,

        #[arg(long)]
        address: Option<String>,

        #[arg(long)]
        company: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },
    /// Edit an existing contact, changing only the fields given
    Edit {
        id: String,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        address: Option<String>,

        #[arg(long)]
        company: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a contact by id
    Delete {
        id: String,
    },
    /// List the known categories
    Categories,
}
