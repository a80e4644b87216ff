use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "roster",
    bin_name = "roster",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Person registry with runtime-defined attributes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (defaults to $ROSTER_DATA, then the OS data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage people
    #[command(subcommand)]
    Person(PersonCommands),

    /// Manage attribute definitions
    #[command(subcommand)]
    Field(FieldCommands),

    /// Manage attribute values
    #[command(subcommand)]
    Value(ValueCommands),

    /// Show the filtered, paginated people grid
    Grid(GridArgs),

    /// Choose which grid columns are shown
    #[command(subcommand)]
    Columns(ColumnCommands),

    /// Print the effective configuration
    Config,

    /// Remove dangling values and repair id sequences
    Doctor,
}

#[derive(Subcommand, Debug)]
pub enum PersonCommands {
    /// Register a person
    Add(PersonArgs),

    /// List everyone
    #[command(alias = "ls")]
    List,

    /// Show one person with their attribute values
    Show { id: u64 },

    /// Delete a person and all their values
    Rm { id: u64 },
}

#[derive(Args, Debug)]
pub struct PersonArgs {
    /// Full name
    pub full_name: String,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    /// Date of birth (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub birth: Option<String>,

    #[arg(long)]
    pub gender: Option<String>,

    #[arg(long, value_name = "TYPE")]
    pub doc_type: Option<String>,

    #[arg(long, value_name = "NUMBER")]
    pub doc_number: Option<String>,

    /// Register as inactive
    #[arg(long)]
    pub inactive: bool,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum FieldCommands {
    /// Define a new attribute
    Add {
        name: String,

        /// One of: text, number, date, email, url, boolean, image, file
        kind: String,

        #[arg(long)]
        required: bool,

        /// Create hidden from the grid
        #[arg(long)]
        inactive: bool,
    },

    /// List attribute definitions
    #[command(alias = "ls")]
    List {
        /// Only active definitions
        #[arg(long)]
        active: bool,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Rename or toggle flags on a definition
    Update {
        id: u64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, value_name = "BOOL")]
        required: Option<bool>,

        #[arg(long, value_name = "BOOL")]
        active: Option<bool>,
    },

    /// Delete a definition and every value attached to it
    Rm { id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum ValueCommands {
    /// Attach a value to a person
    Set {
        person: u64,
        field: u64,

        /// Raw value (omit for image/file fields when using --file)
        value: Option<String>,

        /// Upload a file for image/file fields
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Change a stored value
    Update {
        id: u64,

        value: Option<String>,

        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// List a person's values
    #[command(alias = "ls")]
    List { person: u64 },

    /// Delete a value
    Rm { id: u64 },
}

#[derive(Args, Debug)]
pub struct GridArgs {
    /// Field key to search on (e.g. full_name, dynamic_3)
    #[arg(long, default_value = "full_name")]
    pub field: String,

    /// Text to search for (text-like, file-name and status fields)
    #[arg(long, default_value = "")]
    pub text: String,

    /// Lower bound for number fields
    #[arg(long, allow_negative_numbers = true)]
    pub min: Option<f64>,

    /// Upper bound for number fields
    #[arg(long, allow_negative_numbers = true)]
    pub max: Option<f64>,

    /// Start date for date fields (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// End date for date fields (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    #[command(flatten)]
    pub paging: PagingArgs,
}

#[derive(Args, Debug)]
pub struct PagingArgs {
    /// Page to show, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page (defaults to the configured page size)
    #[arg(long)]
    pub page_size: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum ColumnCommands {
    /// Show every available column and whether it is visible
    #[command(alias = "ls")]
    List,

    /// Show a hidden column or hide a shown one
    Toggle { key: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_parse_person_add() {
        let cli = parse(&[
            "roster", "person", "add", "Ana Pérez", "--email", "ana@example.com", "--inactive",
        ]);
        match cli.command {
            Commands::Person(PersonCommands::Add(args)) => {
                assert_eq!(args.full_name, "Ana Pérez");
                assert_eq!(args.email.as_deref(), Some("ana@example.com"));
                assert!(args.inactive);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_grid_ranges() {
        let cli = parse(&[
            "roster", "grid", "--field", "dynamic_2", "--min", "-5", "--max", "20", "--start",
            "2024-01-01", "--page", "2",
        ]);
        match cli.command {
            Commands::Grid(args) => {
                assert_eq!(args.field, "dynamic_2");
                assert_eq!(args.min, Some(-5.0));
                assert_eq!(args.max, Some(20.0));
                assert_eq!(args.start, NaiveDate::from_ymd_opt(2024, 1, 1));
                assert_eq!(args.paging.page, 2);
                assert_eq!(args.paging.page_size, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_field_update_flags() {
        let cli = parse(&["roster", "field", "update", "3", "--active", "false"]);
        match cli.command {
            Commands::Field(FieldCommands::Update {
                id,
                name,
                required,
                active,
            }) => {
                assert_eq!(id, 3);
                assert_eq!(name, None);
                assert_eq!(required, None);
                assert_eq!(active, Some(false));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_data_flag() {
        let cli = parse(&["roster", "columns", "list", "--data", "/tmp/r"]);
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/r")));
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
