//! Interactive session
//!
//! Reads one command per line, runs it against a single in-memory
//! `Session` and prints the result. A failing command prints its error and
//! the loop carries on; nothing a command does can end the session except
//! `quit` or end of input.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::assistant::KeywordResponder;
use crate::config::Settings;
use crate::display::{
    format_challenge_progress, format_goal_progress, format_goal_table, format_spending_summary,
    format_transaction_list, format_week_report,
};
use crate::error::{FinanceError, FinanceResult};
use crate::models::Category;
use crate::services::{ChallengeService, GoalService, ImportService, LedgerService};
use crate::session::Session;

use super::{format_categories, handle_audit_command, handle_chat, handle_classify};
use super::{parse_amount, parse_category};

const PROMPT: &str = "finance> ";

/// One line of session input
#[derive(Parser)]
#[command(name = "session", no_binary_name = true, disable_version_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

/// Commands available inside a session
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Record an expense
    Add {
        /// Category (e.g. "Campus Food" or campus-food)
        category: String,
        /// Amount (e.g. "4500" or "4500.00")
        amount: String,
    },

    /// Record expenses from a CSV file with category and amount columns
    Import {
        /// Path to the CSV file
        file: PathBuf,
    },

    /// List recorded transactions
    #[command(alias = "txns")]
    Transactions,

    /// Show spending per category
    Summary,

    /// Budget goal commands
    #[command(subcommand)]
    Goal(GoalCommand),

    /// Weekly challenge commands
    #[command(subcommand)]
    Challenge(ChallengeCommand),

    /// Check whether an expense is significant
    Classify {
        /// Amount to classify
        amount: String,
    },

    /// Ask the assistant a question
    Chat {
        /// Your message
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        message: Vec<String>,
    },

    /// List spending categories
    Categories,

    /// Show recent audit log entries
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "10")]
        count: usize,
    },

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

/// Goal subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum GoalCommand {
    /// Set the budget target for a category
    Set {
        /// Category name
        category: String,
        /// Target amount
        amount: String,
    },

    /// Show progress against one category's goal
    Show {
        /// Category name
        category: String,
    },

    /// Show progress for every goal
    List,
}

/// Challenge subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ChallengeCommand {
    /// Start a weekly spending challenge
    Accept {
        /// Category (Campus Food, Social Life, Groceries or Transportation)
        category: String,
        /// Weekly spending limit
        limit: String,
    },

    /// Show this week's progress
    Status,

    /// Close the week and check the result
    Complete,

    /// Give up on the current challenge
    Abandon,
}

/// Whether the loop should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Executes session commands against one session
pub struct SessionShell<'a> {
    session: &'a Session,
    settings: &'a Settings,
    responder: KeywordResponder,
}

impl<'a> SessionShell<'a> {
    pub fn new(session: &'a Session, settings: &'a Settings) -> Self {
        Self {
            session,
            settings,
            responder: KeywordResponder::default(),
        }
    }

    fn symbol(&self) -> &str {
        &self.settings.currency_symbol
    }

    /// Parse and run one input line
    pub fn execute_line<W: Write>(&self, line: &str, out: &mut W) -> FinanceResult<Flow> {
        let words = match split_words(line) {
            Ok(words) => words,
            Err(e) => {
                writeln!(out, "Error: {}", e)?;
                return Ok(Flow::Continue);
            }
        };

        if words.is_empty() {
            return Ok(Flow::Continue);
        }

        let command = match SessionLine::try_parse_from(&words) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                // Help output and usage errors both land here
                write!(out, "{}", e.render())?;
                return Ok(Flow::Continue);
            }
        };

        let flow = match self.execute(command, out) {
            Ok(flow) => flow,
            Err(e) => {
                writeln!(out, "Error: {}", e)?;
                Flow::Continue
            }
        };

        for warning in self.session.take_audit_warnings() {
            writeln!(out, "Warning: change applied but not audited: {}", warning)?;
        }

        Ok(flow)
    }

    /// Run a parsed command
    pub fn execute<W: Write>(&self, command: SessionCommand, out: &mut W) -> FinanceResult<Flow> {
        match command {
            SessionCommand::Add { category, amount } => {
                let category = parse_category(&category)?;
                let amount = parse_amount(&amount)?;
                let txn = LedgerService::new(self.session).record_transaction(category, amount)?;
                writeln!(
                    out,
                    "Transaction added: {} {} ({})",
                    txn.category,
                    txn.amount.format_with_symbol(self.symbol()),
                    txn.id
                )?;
            }

            SessionCommand::Import { file } => {
                let result = ImportService::new(self.session).import_file(&file)?;
                writeln!(
                    out,
                    "Imported {} transaction(s) totalling {}.",
                    result.imported.len(),
                    result.imported_total().format_with_symbol(self.symbol())
                )?;
                for rejected in &result.rejected {
                    writeln!(out, "  line {}: {}", rejected.line, rejected.reason)?;
                }
            }

            SessionCommand::Transactions => {
                let history = LedgerService::new(self.session).all_transactions()?;
                writeln!(out, "{}", format_transaction_list(&history, self.symbol()))?;
            }

            SessionCommand::Summary => {
                let summary = LedgerService::new(self.session).category_totals()?;
                writeln!(out, "{}", format_spending_summary(&summary, self.symbol()))?;
            }

            SessionCommand::Goal(cmd) => self.execute_goal(cmd, out)?,

            SessionCommand::Challenge(cmd) => self.execute_challenge(cmd, out)?,

            SessionCommand::Classify { amount } => handle_classify(self.settings, &amount, out)?,

            SessionCommand::Chat { message } => handle_chat(&self.responder, &message, out)?,

            SessionCommand::Categories => write!(out, "{}", format_categories())?,

            SessionCommand::History { count } => match self.session.audit_logger() {
                Some(logger) => handle_audit_command(logger, count, out)?,
                None => writeln!(out, "Audit logging is disabled for this session.")?,
            },

            SessionCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn execute_goal<W: Write>(&self, cmd: GoalCommand, out: &mut W) -> FinanceResult<()> {
        let goals = GoalService::new(self.session);

        match cmd {
            GoalCommand::Set { category, amount } => {
                let category = parse_category(&category)?;
                let target = parse_amount(&amount)?;
                let goal = goals.set_goal(category, target)?;
                writeln!(
                    out,
                    "Budget set: {} for {}.",
                    goal.target.format_with_symbol(self.symbol()),
                    goal.category
                )?;
            }

            GoalCommand::Show { category } => {
                let progress = goals.progress(parse_category(&category)?)?;
                writeln!(out, "{}", format_goal_progress(&progress, self.symbol()))?;
            }

            GoalCommand::List => {
                let progress = goals.all_progress()?;
                writeln!(out, "{}", format_goal_table(&progress, self.symbol()))?;
            }
        }

        Ok(())
    }

    fn execute_challenge<W: Write>(&self, cmd: ChallengeCommand, out: &mut W) -> FinanceResult<()> {
        let challenges = ChallengeService::new(self.session);

        match cmd {
            ChallengeCommand::Accept { category, limit } => {
                let category = parse_category(&category)?;
                if !category.is_challenge_eligible() {
                    let eligible: Vec<String> =
                        Category::challenge_categories().map(|c| c.to_string()).collect();
                    return Err(FinanceError::Validation(format!(
                        "Challenges are available for: {}",
                        eligible.join(", ")
                    )));
                }

                let limit = parse_amount(&limit)?;
                let challenge = challenges.accept_challenge(category, limit)?;
                writeln!(
                    out,
                    "Challenge accepted! Try to spend at most {} on {} this week.",
                    challenge.limit.format_with_symbol(self.symbol()),
                    challenge.category
                )?;
            }

            ChallengeCommand::Status => match challenges.active_challenge()? {
                Some(challenge) => {
                    let progress = challenges.current_progress()?;
                    writeln!(
                        out,
                        "{}",
                        format_challenge_progress(&challenge, &progress, self.symbol())
                    )?;
                }
                None => writeln!(
                    out,
                    "No active challenge. Start one with 'challenge accept <category> <limit>'."
                )?,
            },

            ChallengeCommand::Complete => {
                let report = challenges.complete_week()?;
                writeln!(out, "{}", format_week_report(&report, self.symbol()))?;
            }

            ChallengeCommand::Abandon => {
                challenges.abandon_challenge()?;
                writeln!(
                    out,
                    "Challenge abandoned. You can start a new one anytime."
                )?;
            }
        }

        Ok(())
    }
}

/// Run the read-eval-print loop until `quit` or end of input
pub fn run_session<R: BufRead, W: Write>(
    session: &Session,
    settings: &Settings,
    input: R,
    out: &mut W,
) -> FinanceResult<()> {
    let shell = SessionShell::new(session, settings);

    writeln!(out, "Student Finance Navigator. Type 'help' for commands, 'quit' to leave.")?;

    write!(out, "{}", PROMPT)?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;

        if shell.execute_line(&line, out)? == Flow::Quit {
            return Ok(());
        }

        write!(out, "{}", PROMPT)?;
        out.flush()?;
    }

    writeln!(out)?;
    Ok(())
}

/// Split a line into words, keeping quoted phrases together
fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(format!("Unclosed quote ({})", q));
    }

    if in_word {
        words.push(current);
    }

    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn run_lines(session: &Session, lines: &[&str]) -> String {
        let settings = Settings::default();
        let shell = SessionShell::new(session, &settings);
        let mut out = Vec::new();
        for line in lines {
            shell.execute_line(line, &mut out).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_split_words() {
        assert_eq!(
            split_words(r#"add "Campus Food" 4500"#).unwrap(),
            vec!["add", "Campus Food", "4500"]
        );
        assert_eq!(split_words("  goal   list ").unwrap(), vec!["goal", "list"]);
        assert_eq!(split_words("chat ''").unwrap(), vec!["chat", ""]);
        assert!(split_words("add \"Campus Food 4500").is_err());
        assert!(split_words("   ").unwrap().is_empty());
    }

    #[test]
    fn test_goal_warning_flow() {
        let session = Session::default();
        let output = run_lines(
            &session,
            &[
                "goal set campus-food 5000",
                "add 'Campus Food' 4500",
                "goal show campus-food",
                "add campus-food 600",
                "goal show campus-food",
            ],
        );

        assert!(output.contains("Budget set: ₦5000.00 for Campus Food."));
        assert!(output.contains("Heads up! You're at 90%"));
        assert!(output.contains("Warning! You have reached your ₦5000.00 budget"));
    }

    #[test]
    fn test_challenge_flow() {
        let session = Session::default();
        let output = run_lines(
            &session,
            &[
                "challenge accept transportation 2000",
                "add transportation 1500",
                "challenge status",
                "challenge complete",
                "challenge status",
                "challenge complete",
            ],
        );

        assert!(output.contains("Challenge accepted!"));
        assert!(output.contains("on track"));
        assert!(output.contains("Challenge completed!"));
        assert!(output.contains("No active challenge."));
        assert!(output.contains("Error: Cannot complete week: no challenge is active"));
        assert!(LedgerService::new(&session).all_transactions().unwrap().is_empty());
    }

    #[test]
    fn test_ineligible_challenge_category() {
        let session = Session::default();
        let output = run_lines(&session, &["challenge accept textbooks 100"]);

        assert!(output.contains("Challenges are available for: Campus Food"));
        assert!(ChallengeService::new(&session).active_challenge().unwrap().is_none());
    }

    #[test]
    fn test_errors_do_not_end_session() {
        let session = Session::default();
        let output = run_lines(
            &session,
            &["add groceries 0", "add holidays 10", "frobnicate", "add groceries 10"],
        );

        assert!(output.contains("must be positive"));
        assert!(output.contains("Unknown category: holidays"));
        assert!(output.contains("unrecognized subcommand"));
        assert_eq!(
            LedgerService::new(&session).total_for(Category::Groceries).unwrap(),
            Money::from_major_minor(10, 0)
        );
    }

    #[test]
    fn test_unwritable_audit_log_only_warns() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let session =
            Session::default().with_audit(crate::audit::AuditLogger::new(temp_dir.path().into()));

        let output = run_lines(
            &session,
            &[
                "challenge accept groceries 1000",
                "add groceries 400",
                "challenge complete",
            ],
        );

        assert!(!output.contains("Error:"));
        assert!(output.contains("Challenge completed!"));
        assert_eq!(output.matches("Warning: change applied but not audited").count(), 3);
        assert!(ChallengeService::new(&session).active_challenge().unwrap().is_none());
    }

    #[test]
    fn test_quit() {
        let session = Session::default();
        let settings = Settings::default();
        let shell = SessionShell::new(&session, &settings);
        let mut out = Vec::new();

        assert_eq!(shell.execute_line("summary", &mut out).unwrap(), Flow::Continue);
        assert_eq!(shell.execute_line("exit", &mut out).unwrap(), Flow::Quit);
    }

    #[test]
    fn test_run_session_stops_at_quit() {
        let session = Session::default();
        let settings = Settings::default();
        let input = "add groceries 5\nquit\nadd groceries 5\n";
        let mut out = Vec::new();

        run_session(&session, &settings, input.as_bytes(), &mut out).unwrap();

        assert_eq!(LedgerService::new(&session).all_transactions().unwrap().len(), 1);
        let output = String::from_utf8(out).unwrap();
        assert!(output.starts_with("Student Finance Navigator."));
    }
}
