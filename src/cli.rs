use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::assessment::OptionId;

/// Command line interface definition for fincoach.
#[derive(Parser, Debug)]
#[command(name = "fincoach")]
#[command(about = "Financial self-assessment questionnaire and AI coach chat")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbosity")]
    pub quiet: bool,

    /// Directory for session data (overrides FINCOACH_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(flatten)]
    pub coach: CoachArgs,
}

/// Coach service options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct CoachArgs {
    /// Base URL of the coach API (overrides FINCOACH_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds (overrides FINCOACH_TIMEOUT_SECS)
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the questionnaire
    Questions(QuestionsArgs),
    /// Answer the questionnaire and show the result
    Assess(AssessArgs),
    /// Show the result of the last saved assessment
    #[command(name = "result")]
    LastResult(ResultArgs),
    /// Talk to the AI coach
    Chat(ChatArgs),
    /// Create an account and sign in
    Signup(CredentialArgs),
    /// Sign in
    Login(CredentialArgs),
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Check that the coach service is reachable
    Health,
}

#[derive(Args, Debug, Clone)]
pub struct QuestionsArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct AssessArgs {
    /// Answers as QUESTION=OPTION pairs, e.g. 1=a,2=d (prompts interactively when omitted)
    #[arg(short, long, value_delimiter = ',', value_parser = parse_answer_pair)]
    pub answers: Option<Vec<(u32, OptionId)>>,

    /// Your name, used to personalise the result and the coach
    #[arg(short, long)]
    pub name: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: OutputFormat,

    /// Do not keep the result for the coach
    #[arg(long)]
    pub no_save: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ResultArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct ChatArgs {
    /// Message to send (shows the conversation so far when omitted)
    #[arg(value_name = "MESSAGE", trailing_var_arg = true)]
    pub message: Vec<String>,

    /// Start a new conversation
    #[arg(long)]
    pub reset: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CredentialArgs {
    /// Email address
    #[arg(short, long)]
    pub email: String,

    /// Password (not checked)
    #[arg(short, long, default_value = "")]
    pub password: String,
}

/// Output format for reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Pretty,
    /// JSON output
    Json,
    /// Markdown report
    Markdown,
    /// Single line
    Compact,
}

/// Parse a `QUESTION=OPTION` pair such as `3=c`.
pub fn parse_answer_pair(s: &str) -> Result<(u32, OptionId), String> {
    let (question, option) = s
        .split_once('=')
        .ok_or_else(|| format!("Expected QUESTION=OPTION, got '{}'", s))?;
    let question: u32 = question
        .trim()
        .parse()
        .map_err(|_| format!("Invalid question id '{}'", question.trim()))?;
    let option: OptionId = option.parse()?;
    Ok((question, option))
}
