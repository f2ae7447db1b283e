//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::draft::DraftStudent;
use crate::student::{Program, GRADUATION_YEAR_MAX, GRADUATION_YEAR_MIN};

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Add command arguments: one flag per intake field.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Full name
    #[arg(long, default_value = "")]
    pub full_name: String,

    /// Profile image URL
    #[arg(long, default_value = "")]
    pub image: String,

    /// Phone number
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Email address
    #[arg(long, default_value = "")]
    pub email: String,

    /// Program (omit to leave unselected)
    #[arg(long, value_enum)]
    pub program: Option<ProgramArg>,

    /// Graduation year
    #[arg(
        long,
        default_value_t = GRADUATION_YEAR_MIN,
        value_parser = clap::value_parser!(i64).range(GRADUATION_YEAR_MIN..=GRADUATION_YEAR_MAX)
    )]
    pub graduation_year: i64,

    /// Mark the student as graduated
    #[arg(long)]
    pub graduated: bool,

    /// Print the new student as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl AddCommand {
    /// Fill a draft from the parsed flags.
    #[must_use]
    pub fn to_draft(&self) -> DraftStudent {
        let mut draft = DraftStudent::new();
        draft
            .set_full_name(self.full_name.as_str())
            .set_image(self.image.as_str())
            .set_phone(self.phone.as_str())
            .set_email(self.email.as_str())
            .set_program(self.program.map(Program::from))
            .set_graduation_year(self.graduation_year)
            .set_graduated(self.graduated);
        draft
    }
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Reset command arguments.
#[derive(Debug, Args)]
pub struct ResetCommand {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Program argument for intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProgramArg {
    /// Web Dev
    WebDev,
    /// UXUI
    Uxui,
    /// Data
    Data,
}

impl From<ProgramArg> for Program {
    fn from(arg: ProgramArg) -> Self {
        match arg {
            ProgramArg::WebDev => Self::WebDev,
            ProgramArg::Uxui => Self::UxUi,
            ProgramArg::Data => Self::Data,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One line per student
    Plain,
    /// Aligned columns with a header
    #[default]
    Table,
    /// JSON array, same layout as the stored roster
    Json,
}
