//! `roster` - CLI for the student roster
//!
//! Runs the interactive menu by default, or a single operation when a
//! subcommand is given.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io;

use anyhow::Context;
use clap::Parser;

use roster::cli::{AddCommand, Cli, Command, ConfigCommand, EditCommand, Menu, SearchCommand};
use roster::{init_logging, Config, Error, Roster, Storage};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    let mut config = Config::load_from(cli.config.clone()).context("loading configuration")?;
    if let Some(path) = &cli.data_file {
        config.storage.data_file = Some(path.clone());
        config.validate()?;
    }

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => handle_menu(&config),
        Command::Add(cmd) => handle_add(&config, &cmd),
        Command::Edit(cmd) => handle_edit(&config, &cmd),
        Command::Remove(cmd) => {
            let mut roster = try_open_roster(&config)?;
            let removed = roster.remove(&cmd.roll)?;
            roster.flush().context("saving roster")?;
            println!("Removed {removed} student(s).");
            Ok(())
        }
        Command::Search(cmd) => handle_search(&config, &cmd),
        Command::List(cmd) => handle_list(&config, cmd.json),
        Command::Stats(cmd) => handle_stats(&config, cmd.json),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

/// Open for the interactive menu, which keeps going on an unreadable file.
fn open_roster(config: &Config) -> Roster {
    Roster::open(Storage::new(config.data_file()))
}

/// Open for a single operation, which fails on an unreadable file.
fn try_open_roster(config: &Config) -> anyhow::Result<Roster> {
    let path = config.data_file();
    Roster::try_open(Storage::new(&path))
        .with_context(|| format!("reading roster file {}", path.display()))
}

fn handle_menu(config: &Config) -> anyhow::Result<()> {
    let mut roster = open_roster(config);
    let stdin = io::stdin();
    let stdout = io::stdout();

    Menu::new(&mut roster, stdin.lock(), stdout.lock())
        .show_header(config.display.show_header)
        .run()
        .context("interactive session failed")?;
    Ok(())
}

fn handle_add(config: &Config, cmd: &AddCommand) -> anyhow::Result<()> {
    let mut roster = try_open_roster(config)?;
    roster.add(&cmd.name, &cmd.roll, &cmd.grade)?;
    roster.flush().context("saving roster")?;
    println!("Student added successfully.");
    Ok(())
}

fn handle_edit(config: &Config, cmd: &EditCommand) -> anyhow::Result<()> {
    let mut roster = try_open_roster(config)?;
    roster.edit(&cmd.roll, &cmd.name, &cmd.grade)?;
    roster.flush().context("saving roster")?;
    println!("Student details updated.");
    Ok(())
}

fn handle_search(config: &Config, cmd: &SearchCommand) -> anyhow::Result<()> {
    let roster = try_open_roster(config)?;
    let student = roster
        .find(&cmd.roll)
        .ok_or_else(|| Error::not_found(cmd.roll.trim()))?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(student)?);
    } else {
        println!("{student}");
    }
    Ok(())
}

fn handle_list(config: &Config, json: bool) -> anyhow::Result<()> {
    let roster = try_open_roster(config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(roster.students())?);
    } else if roster.students().is_empty() {
        println!("No students found.");
    } else {
        for student in roster.students() {
            println!("{student}");
        }
    }
    Ok(())
}

fn handle_stats(config: &Config, json: bool) -> anyhow::Result<()> {
    let mut roster = try_open_roster(config)?;
    let stats = roster.stats()?;

    if json {
        let status = serde_json::json!({
            "data_file": roster.path(),
            "total_students": stats.total_students,
            "last_saved": stats.last_saved,
            "file_size_bytes": stats.file_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("roster stats");
        println!("------------");
        println!("Roster file:   {}", roster.path().display());
        println!("Students:      {}", stats.total_students);
        match stats.last_saved {
            Some(at) => println!("Last saved:    {}", at.to_rfc3339()),
            None => println!("Last saved:    never"),
        }
        println!("File size:     {} bytes", stats.file_size_bytes);
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Data file:          {}", config.data_file().display());
                println!();
                println!("[Display]");
                println!("  Show header:        {}", config.display.show_header);
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
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
