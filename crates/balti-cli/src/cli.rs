use std::path::PathBuf;

use balti_core::{FilterDimension, TranslationDirection};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "balti")]
#[command(about = "Search and translate with the Balti dictionary from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to the config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Dictionary API base URL (overrides config and BALTI_API_BASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Signed-in user id used for saved searches
    #[arg(long, global = true, value_name = "ID")]
    pub user: Option<String>,

    /// Use a local JSON word list instead of the API
    #[arg(long, global = true, value_name = "PATH")]
    pub words_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show autocomplete suggestions for a partial query
    Suggest {
        /// Partial query (empty shows curated suggestions)
        #[arg(default_value = "")]
        query: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search the dictionary
    Search {
        /// Search query
        query: String,
        #[command(flatten)]
        filters: FilterArgs,
        /// Let the server match approximately
        #[arg(long)]
        fuzzy: bool,
        /// Number of words to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Translate text word by word
    #[command(alias = "tr")]
    Translate {
        /// Text to translate
        text: Vec<String>,
        /// Translation direction
        #[arg(short, long, value_enum, default_value_t = DirectionArg::BaltiToEnglish)]
        direction: DirectionArg,
        /// Also list dictionary words that partially match the input
        #[arg(long)]
        matches: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the values each search filter accepts
    Filters {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage saved searches
    Presets {
        #[command(subcommand)]
        command: PresetCommands,
    },
    /// Configure the CLI
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

/// Repeatable multi-select filters
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Word category (repeatable)
    #[arg(long = "category", value_name = "NAME")]
    pub categories: Vec<String>,
    /// Dialect (repeatable)
    #[arg(long = "dialect", value_name = "NAME")]
    pub dialects: Vec<String>,
    /// Difficulty level (repeatable)
    #[arg(long = "difficulty", value_name = "LEVEL")]
    pub difficulties: Vec<String>,
    /// Feedback status (repeatable)
    #[arg(long = "feedback", value_name = "STATUS")]
    pub feedback: Vec<String>,
}

impl FilterArgs {
    /// `(dimension, value)` pairs in the order given
    pub fn selections(&self) -> Vec<(FilterDimension, &str)> {
        [
            (FilterDimension::Category, &self.categories),
            (FilterDimension::Dialect, &self.dialects),
            (FilterDimension::Difficulty, &self.difficulties),
            (FilterDimension::Feedback, &self.feedback),
        ]
        .into_iter()
        .flat_map(|(dimension, values)| values.iter().map(move |value| (dimension, value.as_str())))
        .collect()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum DirectionArg {
    BaltiToEnglish,
    EnglishToBalti,
}

impl From<DirectionArg> for TranslationDirection {
    fn from(value: DirectionArg) -> Self {
        match value {
            DirectionArg::BaltiToEnglish => Self::BaltiToEnglish,
            DirectionArg::EnglishToBalti => Self::EnglishToBalti,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum PresetCommands {
    /// List saved searches
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Save a search under a name
    Save {
        /// Preset name
        #[arg(long)]
        name: String,
        /// Query text to save
        #[arg(default_value = "")]
        query: String,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Run a saved search by name
    Run {
        /// Preset name
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a saved search by id
    Delete {
        /// Preset id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Store --api-url and --user in the config file
    Init,
    /// Print the effective configuration
    Show,
}
