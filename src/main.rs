use std::io::{self, Write};

use anyhow::Result;
use clap::{Parser, Subcommand};

use student_finance::assistant::KeywordResponder;
use student_finance::audit::AuditLogger;
use student_finance::cli::{
    format_categories, handle_audit_command, handle_chat, handle_classify, run_session,
};
use student_finance::config::{FinancePaths, Settings};
use student_finance::session::Session;

#[derive(Parser)]
#[command(
    name = "finance",
    version,
    about = "Terminal budgeting companion for students",
    long_about = "Student Finance Navigator records your spending by category, \
                  warns you as you approach your budget goals and runs weekly \
                  spending challenges to help you save."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive budgeting session (default)
    Session,

    /// Check whether an expense is significant
    Classify {
        /// Amount to classify (e.g. 25000 or 19999.99)
        amount: String,
    },

    /// Ask the budgeting assistant a question
    Chat {
        /// Your message
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        message: Vec<String>,
    },

    /// List spending categories
    Categories,

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        count: usize,
    },

    /// Write a default settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = FinancePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut out = io::stdout();

    match cli.command.unwrap_or(Commands::Session) {
        Commands::Session => {
            let mut session = Session::new(settings.budget_policy());
            if settings.audit_enabled {
                paths.ensure_directories()?;
                session = session.with_audit(AuditLogger::new(paths.audit_log()));
            }

            let stdin = io::stdin();
            run_session(&session, &settings, stdin.lock(), &mut out)?;
        }
        Commands::Classify { amount } => {
            handle_classify(&settings, &amount, &mut out)?;
        }
        Commands::Chat { message } => {
            handle_chat(&KeywordResponder::default(), &message, &mut out)?;
        }
        Commands::Categories => {
            write!(out, "{}", format_categories())?;
        }
        Commands::Audit { count } => {
            let logger = AuditLogger::new(paths.audit_log());
            handle_audit_command(&logger, count, &mut out)?;
        }
        Commands::Init => {
            if paths.is_initialized() {
                println!("Already initialized at: {}", paths.base_dir().display());
            } else {
                settings.save(&paths)?;
                println!("Initialized Student Finance Navigator at: {}", paths.base_dir().display());
            }
        }
        Commands::Config => {
            println!("Student Finance Navigator Configuration");
            println!("=======================================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:          {}", settings.currency_symbol);
            println!("  Near-limit warning at:    {}%", settings.near_limit_percent);
            println!(
                "  Significant expense from: {}",
                settings
                    .significant_expense_threshold
                    .format_with_symbol(&settings.currency_symbol)
            );
            println!("  Reset ledger on week close: {}", settings.reset_ledger_on_week_close);
            println!("  Audit logging:            {}", settings.audit_enabled);
        }
    }

    Ok(())
}
