//! Spendscope CLI - bank statement reports in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{category, dashboard, interactive, logs, phones, search};

/// Spendscope - bank statement reports in your terminal
#[derive(Parser)]
#[command(name = "spend", version, about, long_about = None)]
struct Cli {
    /// Transaction export to read instead of the default one
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Dashboard followed by optional searches and a category report
    Interactive,

    /// Greeting, card totals, top transactions and quotes for a month
    Dashboard {
        /// Reference date (DD.MM.YYYY); the month up to it is summarized
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find transactions by a word in the description or category
    Search {
        /// Word to look for
        keyword: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find transactions that mention a phone number
    Phones {
        /// Also match numbers glued to other digits or text
        #[arg(long)]
        loose: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Spending in one category over the last three months
    Category {
        /// Category name, as written in the export
        name: String,
        /// End of the window (DD.MM.YYYY, DD/MM/YYYY or YYYY-MM-DD); now if omitted
        #[arg(long)]
        date: Option<String>,
        /// Don't write the report file
        #[arg(long)]
        no_save: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View and manage application logs
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            commands::log_failure(&e);
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let file = cli.file.as_deref();

    match cli.command {
        None | Some(Commands::Interactive) => interactive::run(file),
        Some(Commands::Dashboard { date, json }) => dashboard::run(date, file, json),
        Some(Commands::Search { keyword, json }) => search::run(&keyword, file, json),
        Some(Commands::Phones { loose, json }) => phones::run(file, loose, json),
        Some(Commands::Category {
            name,
            date,
            no_save,
            json,
        }) => category::run(&name, date, file, no_save, json),
        Some(Commands::Logs { command }) => logs::run(command),
    }
}
