//! rollbook CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::Settings;

mod commands;
mod input;
mod output;

#[derive(Parser)]
#[command(name = "rollbook", version, about = "Flat-file student record manager")]
struct Cli {
    /// Backing file for student records (overrides config)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a student
    Add {
        /// Roll number (positive, unique)
        #[arg(long, allow_hyphen_values = true)]
        roll: i64,

        /// Full name (letters and spaces)
        #[arg(long)]
        name: String,

        /// Grade: A+, A, B+, B, C+, C, D, F
        #[arg(long)]
        grade: String,
    },

    /// Show all students
    Show {
        /// Output format: table, json, plain
        #[arg(long)]
        format: Option<String>,
    },

    /// Find students by roll or by name
    Find {
        /// Roll number to look up
        #[arg(
            long,
            allow_hyphen_values = true,
            conflicts_with = "name",
            required_unless_present = "name"
        )]
        roll: Option<i64>,

        /// Case-insensitive name fragment
        #[arg(long)]
        name: Option<String>,

        /// Output format: table, json, plain
        #[arg(long)]
        format: Option<String>,
    },

    /// Update a student's name and/or grade
    Update {
        /// Roll number of the student to update
        #[arg(long, allow_hyphen_values = true)]
        roll: i64,

        /// New full name
        #[arg(long)]
        name: Option<String>,

        /// New grade
        #[arg(long)]
        grade: Option<String>,
    },

    /// Delete a student
    Delete {
        /// Roll number of the student to delete
        #[arg(long, allow_hyphen_values = true)]
        roll: i64,
    },

    /// Sort the stored records
    Sort {
        /// Sort key: roll, name
        #[arg(long, default_value = "roll")]
        by: String,
    },

    /// Count stored students
    Count,

    /// Average subject marks (0-100) and print the resulting grade
    Grade {
        /// One mark per subject
        #[arg(required = true, allow_negative_numbers = true)]
        marks: Vec<f64>,
    },

    /// Interactive numbered menu (default)
    Shell,

    /// Create a starter config file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rollbook_core=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = || Settings::resolve(cli.data_file.clone(), cli.config.as_deref());

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Add { roll, name, grade } => {
            commands::add::execute(&settings()?, roll, &name, &grade)
        }
        Commands::Show { format } => commands::show::execute(&settings()?, format.as_deref()),
        Commands::Find { roll, name, format } => {
            commands::find::execute(&settings()?, roll, name.as_deref(), format.as_deref())
        }
        Commands::Update { roll, name, grade } => {
            commands::update::execute(&settings()?, roll, name.as_deref(), grade.as_deref())
        }
        Commands::Delete { roll } => commands::delete::execute(&settings()?, roll),
        Commands::Sort { by } => commands::sort::execute(&settings()?, &by),
        Commands::Count => commands::show::count(&settings()?),
        Commands::Grade { marks } => commands::grade::execute(&marks),
        Commands::Shell => commands::shell::execute(&settings()?),
        Commands::Init => commands::init::execute(),
    }
}
