//! Command implementations for the kago CLI

use colored::Colorize;
use inquire::Confirm;

use kago::config::Config;
use kago::db::Database;
use kago::error::Result;
use kago::item::{resolve_price, PriceSpec, ShoppingListItem};
use kago::price;
use kago::KagoError;

/// Add an item to the shopping list
pub fn cmd_add(
    name: String,
    link: Option<String>,
    price_str: String,
    priority: bool,
    owner: Option<String>,
) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open()?;

    let spec: PriceSpec = price_str.parse()?;

    if spec == PriceSpec::Auto && link.is_some() {
        println!("  Looking up price from {}...", link.as_deref().unwrap_or(""));
    }

    let (price, source) = resolve_price(spec, link.as_deref(), config.default_price);

    let mut item = ShoppingListItem::new(config.owner_or_default(owner), name, link, price);
    item.priority = priority;
    db.insert_item(&item)?;

    match source {
        Some(source) => println!(
            "{} Added {} at {:.2} (via {})",
            "✓".green(),
            item.name.bold(),
            item.price,
            source.label()
        ),
        None if spec == PriceSpec::Auto => println!(
            "{} Added {} at {:.2} ({})",
            "✓".green(),
            item.name.bold(),
            item.price,
            "couldn't fetch the price automatically".yellow()
        ),
        None => println!(
            "{} Added {} at {:.2}",
            "✓".green(),
            item.name.bold(),
            item.price
        ),
    }

    Ok(())
}

/// Show the shopping list
pub fn cmd_list(owner: Option<String>, json: bool) -> Result<()> {
    let db = Database::open()?;
    let items = db.list_items(owner.as_deref())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("Shopping list is empty. Add something: kago add \"Milk\" --price 2.49");
        return Ok(());
    }

    for item in &items {
        let marker = if item.priority { "!".red().bold() } else { " ".normal() };
        let link = item
            .link
            .as_deref()
            .map(|l| format!("  {}", l.dimmed()))
            .unwrap_or_default();
        println!(
            "{} {}  {:>10.2}{}",
            marker,
            item.name.bold(),
            item.price,
            link
        );
    }
    println!("\n  {} item(s)", items.len());

    Ok(())
}

/// Edit an item by name or ID
pub fn cmd_edit(
    item_ref: String,
    name: Option<String>,
    link: Option<String>,
    price_str: Option<String>,
    priority: Option<bool>,
) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open()?;

    let mut item = db
        .get_item(&item_ref)?
        .ok_or_else(|| KagoError::ItemNotFound(item_ref.clone()))?;

    if let Some(name) = name {
        item.name = name;
    }
    if let Some(link) = link {
        item.link = Some(link);
    }
    if let Some(priority) = priority {
        item.priority = priority;
    }
    if let Some(price_str) = price_str {
        let spec: PriceSpec = price_str.parse()?;
        if spec == PriceSpec::Auto && item.link.is_some() {
            println!("  Looking up price from {}...", item.link.as_deref().unwrap_or(""));
        }
        let (price, _source) = resolve_price(spec, item.link.as_deref(), config.default_price);
        item.price = price;
    }

    db.update_item(&item)?;
    println!("{} Updated {} ({:.2})", "✓".green(), item.name.bold(), item.price);

    Ok(())
}

/// Remove an item (bought, or no longer wanted)
pub fn cmd_remove(item_ref: String, yes: bool) -> Result<()> {
    let db = Database::open()?;

    let item = db
        .get_item(&item_ref)?
        .ok_or_else(|| KagoError::ItemNotFound(item_ref.clone()))?;

    if !yes {
        let confirmed = Confirm::new(&format!("Remove \"{}\" from the list?", item.name))
            .with_default(true)
            .prompt()
            .unwrap_or(false);
        if !confirmed {
            println!("Kept {}.", item.name);
            return Ok(());
        }
    }

    db.delete_item(&item.id)?;
    println!("{} Removed {}", "✓".green(), item.name.bold());

    Ok(())
}

/// Run the price lookup against a URL without saving anything
pub fn cmd_price(url: String, json: bool) -> Result<()> {
    let result = price::extract_price(&url);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match result {
        Some(found) => {
            println!("{} {}  (via {})", "Price:".bold(), found.raw, found.source.label());
            if let Some(amount) = price::parse_amount(&found.raw) {
                println!("  Stored as: {:.2}", amount);
            }
        }
        None => println!("{}", "No price found on that page.".yellow()),
    }

    Ok(())
}
