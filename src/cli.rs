use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kago")]
#[command(author, version, about = "A shopping-list manager with automatic price lookup", long_about = None)]
#[command(after_help = r#"Examples:
  kago add "AirPods" --link https://shop.example.com/airpods     Price looked up from the page
  kago add "Milk" --price 2.49                                   Explicit price, no lookup
  kago add "Medicine" --price 12 --priority                      Sorts to the top of the list
  kago list                                                      Show the shopping list
  kago price https://shop.example.com/airpods                    Try the price lookup alone
  kago remove "Milk"                                             Bought it
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add an item to the shopping list
    #[command(after_help = r#"Examples:
  kago add "AirPods" --link https://shop.example.com/airpods
  kago add "AirPods" --link https://... --price auto     # Same: auto is the default
  kago add "Milk" --price 2.49                           # Skip the lookup entirely
  kago add "Medicine" --price 12 --priority
"#)]
    Add {
        /// Item name
        #[arg(value_name = "NAME")]
        name: String,

        /// Product page URL; used for automatic price lookup
        #[arg(long)]
        link: Option<String>,

        /// Price as a number, or `auto` to scrape it from the link
        #[arg(long, default_value = "auto")]
        price: String,

        /// Mark as high priority (sorts to the top)
        #[arg(long)]
        priority: bool,

        /// Record a different owner than the configured default
        #[arg(long)]
        owner: Option<String>,
    },

    /// Show the shopping list
    List {
        /// Only show items for this owner
        #[arg(long)]
        owner: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Edit an item (by name or ID)
    Edit {
        /// Item name or ID
        #[arg(value_name = "ITEM")]
        item: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New product page URL
        #[arg(long)]
        link: Option<String>,

        /// New price as a number, or `auto` to re-scrape from the link
        #[arg(long)]
        price: Option<String>,

        /// Set or clear the priority flag
        #[arg(long)]
        priority: Option<bool>,
    },

    /// Remove an item (bought, or no longer wanted)
    Remove {
        /// Item name or ID
        #[arg(value_name = "ITEM")]
        item: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Run the price lookup against a URL without saving anything
    Price {
        /// Product page URL
        #[arg(value_name = "URL")]
        url: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
