use std::ffi::OsString;

pub use clap::Parser;
use clap::{Args, Subcommand};

use crate::analysis::{AbjadSystem, AnalysisError, AnalysisRequest, LetterCountMethod};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Profile name
    /// Profile to read connection settings from. Default is 'default'.
    /// If the profile file does not exist, built-in defaults are used.
    #[clap(short = 'p', long, default_value = "default", help = "profile name")]
    profile: String,

    /// Verbose mode
    #[clap(short = 'v', long, help = "Print verbose messages")]
    verbose: bool,

    /// Print results as JSON instead of text
    #[clap(long, help = "Print results as JSON")]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Operation to run
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Analyze free text or a stored verse
    Analyze(AnalyzeArgs),

    /// List, remove or clear past analyses
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },

    /// Check that the backend is reachable
    Health,

    /// List all surahs
    Surahs,

    /// Show one surah
    Surah { number: u16 },

    /// Show a verse, or every verse of a surah when no ayah is given
    Verse { surah: u16, ayah: Option<u16> },

    /// Letter frequency distribution
    Frequency {
        #[arg(long)]
        surah: Option<u16>,
        #[arg(long)]
        verse: Option<u16>,
    },

    /// Search verse text
    Search {
        query: String,
        #[arg(long)]
        surah: Option<u16>,
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeArgs {
    /// Arabic text to analyze
    #[arg(short = 't', long)]
    pub text: Option<String>,

    /// Surah number (1-114); requires --ayah
    #[arg(short = 's', long)]
    pub surah: Option<u16>,

    /// Ayah number; requires --surah
    #[arg(short = 'a', long)]
    pub ayah: Option<u16>,

    /// Letter counting method: traditional, uthmani_full or no_wasla
    #[arg(long, default_value = "traditional")]
    pub method: LetterCountMethod,

    /// Abjad system: mashriqi or maghribi
    #[arg(long, default_value = "mashriqi")]
    pub system: AbjadSystem,

    /// Skip the per-letter breakdown
    #[arg(long)]
    pub no_breakdown: bool,

    /// Do not record the result in history
    #[arg(long)]
    pub no_history: bool,
}

impl AnalyzeArgs {
    pub fn to_request(&self) -> Result<AnalysisRequest, AnalysisError> {
        AnalysisRequest::from_parts(
            self.text.clone(),
            self.surah,
            self.ayah,
            self.method,
            self.system,
            !self.no_breakdown,
        )
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum HistoryAction {
    /// List entries, newest first
    List,
    /// Remove one entry by id
    Remove { id: String },
    /// Remove every entry
    Clear,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    verbose: bool,
    json: bool,
    command: Command,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        Self::from_clap(ClapArgs::parse())
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::from_clap(ClapArgs::parse_from(itr))
    }

    fn from_clap(args: ClapArgs) -> Self {
        Self {
            profile: args.profile,
            verbose: args.verbose,
            json: args.json,
            command: args.command,
        }
    }

    pub fn profile(&self) -> &String {
        &self.profile
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn json(&self) -> bool {
        self.json
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}
