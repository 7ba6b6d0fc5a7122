//! # Main — CLI Entry Point
//!
//! ## Subcommands
//!
//! - `serve`: run the web server.
//! - `featured`: print the homepage featured selection.
//! - `check`: strictly load every data document and report problems.
//!
//! ## Global Options
//!
//! - `--data-dir` / `PORTFOLIO_DATA_DIR`: directory holding `projects.json`,
//!   `project_details.json`, and `site_data.json`.
//!
//! Mail and CSRF settings are read from the environment (`MAIL_*`,
//! `SECRET_KEY`); a `.env` file in the working directory is loaded first.

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use portfolio::catalog::{select_featured, Catalog};
use portfolio::config::{non_empty, parse_flag, AppConfig, MailSettings, ResumeFile};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "portfolio", about = "Personal portfolio web server")]
struct Cli {
    /// Directory containing the JSON data documents
    #[arg(long, env = "PORTFOLIO_DATA_DIR", default_value = "data", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server
    Serve(ServeArgs),
    /// Print the homepage featured selection (id and title per line)
    Featured,
    /// Validate the data documents; exits non-zero if any is missing or invalid
    Check,
}

#[derive(Args)]
struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 5000)]
    port: u16,
    /// Directory served under /static
    #[arg(long, env = "PORTFOLIO_STATIC_DIR", default_value = "static")]
    static_dir: PathBuf,
    /// Resume PDF served by /download-resume
    #[arg(long, env = "RESUME_PATH", default_value = "static/files/resume.pdf")]
    resume: PathBuf,
    /// File name offered to the browser (defaults to the resume's file name)
    #[arg(long, env = "RESUME_DOWNLOAD_NAME")]
    resume_name: Option<String>,

    #[command(flatten)]
    mail: MailArgs,

    /// Signing key for contact form CSRF tokens
    #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,
}

#[derive(Args)]
struct MailArgs {
    /// SMTP server host
    #[arg(long, env = "MAIL_SERVER")]
    mail_server: Option<String>,
    /// SMTP server port
    #[arg(long, env = "MAIL_PORT", default_value_t = 587)]
    mail_port: u16,
    /// Use STARTTLS (True/False)
    #[arg(long, env = "MAIL_USE_TLS", default_value = "True", value_parser = parse_flag, action = ArgAction::Set)]
    mail_use_tls: bool,
    /// SMTP login
    #[arg(long, env = "MAIL_USERNAME")]
    mail_username: Option<String>,
    /// SMTP password
    #[arg(long, env = "MAIL_PASSWORD", hide_env_values = true)]
    mail_password: Option<String>,
    /// From address for contact notifications
    #[arg(long, env = "MAIL_DEFAULT_SENDER")]
    mail_default_sender: Option<String>,
    /// Address contact notifications are delivered to
    #[arg(long, env = "MAIL_RECIPIENT")]
    mail_recipient: Option<String>,
    /// SMTP send timeout in seconds
    #[arg(long, env = "MAIL_TIMEOUT_SECS", default_value_t = 10)]
    mail_timeout_secs: u64,
}

impl From<MailArgs> for MailSettings {
    fn from(args: MailArgs) -> Self {
        MailSettings {
            server: non_empty(args.mail_server),
            port: args.mail_port,
            use_tls: args.mail_use_tls,
            username: non_empty(args.mail_username),
            password: non_empty(args.mail_password),
            default_sender: non_empty(args.mail_default_sender),
            recipient: non_empty(args.mail_recipient),
            timeout_secs: args.mail_timeout_secs,
        }
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Structured logging: LOG_FORMAT=json for log shippers, human-readable otherwise
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();
    let catalog = Catalog::new(&cli.data_dir);

    match cli.command {
        Commands::Serve(args) => {
            let config = AppConfig {
                data_dir: cli.data_dir.clone(),
                static_dir: Some(args.static_dir),
                resume: ResumeFile::new(args.resume, non_empty(args.resume_name)),
                mail: args.mail.into(),
                secret_key: non_empty(args.secret_key),
            };
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(portfolio::web::run(args.port, config))
        }
        Commands::Featured => {
            let projects = catalog.projects();
            for project in select_featured(&projects) {
                println!("{}\t{}", project.id, project.title);
            }
            Ok(())
        }
        Commands::Check => {
            let mut failed = false;
            for report in catalog.check() {
                match report.outcome {
                    Ok(count) => println!("ok      {} ({} entries)", report.file, count),
                    Err(e) => {
                        failed = true;
                        println!("FAILED  {}: {}", report.file, e);
                    }
                }
            }
            if failed {
                anyhow::bail!("one or more data documents failed to load");
            }
            Ok(())
        }
    }
}
