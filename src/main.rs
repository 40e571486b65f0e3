//! kago - a shopping-list manager with automatic price lookup

use clap::Parser;

use kago::cli::{Cli, Commands};
use kago::error::Result;

mod commands;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        if let Some(hint) = e.hint() {
            eprintln!("\n{}", hint);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Add {
            name,
            link,
            price,
            priority,
            owner,
        } => commands::cmd_add(name, link, price, priority, owner),

        Commands::List { owner, json } => commands::cmd_list(owner, json),

        Commands::Edit {
            item,
            name,
            link,
            price,
            priority,
        } => commands::cmd_edit(item, name, link, price, priority),

        Commands::Remove { item, yes } => commands::cmd_remove(item, yes),

        Commands::Price { url, json } => commands::cmd_price(url, json),
    }
}
