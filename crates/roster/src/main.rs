//! `roster` - CLI for the student roster
//!
//! This binary is the presentation layer: it parses intake flags into a
//! draft, hands it to the roster store, and renders the roster as text.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use roster::cli::{
    render_plain, render_table, AddCommand, Cli, Command, ConfigCommand, ListCommand,
    OutputFormat, ResetCommand,
};
use roster::storage::{RosterPersistence, SqliteStore};
use roster::{init_logging, Config, RosterStore, SaveStatus};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;
    debug!("Using database at {}", config.database_path().display());

    match cli.command {
        Command::List(cmd) => handle_list(&config, &cmd),
        Command::Add(cmd) => handle_add(&config, &cmd),
        Command::Status(cmd) => handle_status(&config, cmd.json),
        Command::Reset(cmd) => handle_reset(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_roster(config: &Config) -> anyhow::Result<RosterStore<SqliteStore>> {
    let path = config.database_path();
    let store = SqliteStore::open(&path)
        .with_context(|| format!("opening roster database {}", path.display()))?;
    let persistence = RosterPersistence::with_key(store, config.storage.key.as_str());
    let seed = config.load_seed()?;
    let roster = RosterStore::open(persistence, &seed, config.seed.on_corrupt)?;
    Ok(roster)
}

fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<ExitCode> {
    let roster = open_roster(config)?;
    let students = roster.students();

    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(students)?),
        OutputFormat::Plain => print!("{}", render_plain(students)),
        OutputFormat::Table => print!("{}", render_table(students)),
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_add(config: &Config, cmd: &AddCommand) -> anyhow::Result<ExitCode> {
    let mut roster = open_roster(config)?;
    let mut draft = cmd.to_draft();

    let (id, status) = match roster.submit(&mut draft) {
        Ok(added) => added,
        Err(err) if err.is_validation_error() => {
            eprintln!("{err}");
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err.into()),
    };

    if cmd.json {
        if let Some(student) = roster.get(&id) {
            println!("{}", serde_json::to_string_pretty(student)?);
        }
    } else {
        println!("{id}");
    }

    if let SaveStatus::Unsaved(err) = status {
        eprintln!("warning: student added but not saved: {err}");
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<ExitCode> {
    let roster = open_roster(config)?;
    let summary = roster.summary();
    let store = roster.persistence().store();
    let stats = store.stats()?;
    let last_saved = store.updated_at(roster.persistence().key())?;

    if json {
        let status = serde_json::json!({
            "students": summary.total,
            "graduated": summary.graduated,
            "other_programs": summary.other_programs,
            "by_program": summary
                .by_program
                .iter()
                .map(|(program, count)| (program.label().to_string(), serde_json::json!(count)))
                .collect::<serde_json::Map<String, serde_json::Value>>(),
            "database_path": store.path(),
            "storage_key": roster.persistence().key(),
            "last_saved": last_saved,
            "db_size_bytes": stats.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("roster status");
        println!("-------------");
        println!("Students:      {}", summary.total);
        println!("Graduated:     {}", summary.graduated);
        for (program, count) in &summary.by_program {
            println!("  {:<12}{count}", format!("{program}:"));
        }
        if summary.other_programs > 0 {
            println!("  {:<12}{}", "Other:", summary.other_programs);
        }
        println!("Database:      {}", store.path().display());
        println!("Storage key:   {}", roster.persistence().key());
        match last_saved {
            Some(at) => println!("Last saved:    {}", at.to_rfc3339()),
            None => println!("Last saved:    never"),
        }
        println!("Size:          {} bytes", stats.db_size_bytes);
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_reset(config: &Config, cmd: &ResetCommand) -> anyhow::Result<ExitCode> {
    if !cmd.yes {
        println!("This will delete the stored roster; the next run starts from the seed.");
        println!("Use --yes to confirm.");
        return Ok(ExitCode::FAILURE);
    }

    let path = config.database_path();
    let store = SqliteStore::open(&path)
        .with_context(|| format!("opening roster database {}", path.display()))?;
    let mut persistence = RosterPersistence::with_key(store, config.storage.key.as_str());
    if persistence.clear()? {
        println!("Stored roster removed.");
    } else {
        println!("Nothing stored under '{}'.", persistence.key());
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<ExitCode> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:  {}", config.database_path().display());
                println!("  Key:            {}", config.storage.key);
                println!();
                println!("[Seed]");
                match &config.seed.path {
                    Some(path) => println!("  Path:           {}", path.display()),
                    None => println!("  Path:           (bundled)"),
                }
                println!("  On corrupt:     {:?}", config.seed.on_corrupt);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => {
                    println!("Configuration error: {e}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
