//! vouch: run claim verification operations against a JSON state file.

mod state;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use vouch_types::{ClaimKind, ResumeId};
use vouch_utils::{init_logging, LogFormat};
use vouch_verification::{EngineConfig, OperationResponse, VerificationService};

use crate::state::{Backends, StateFile};

#[derive(Parser)]
#[command(name = "vouch", about = "Reconcile resume claims against a ledger and institutional records")]
struct Cli {
    /// JSON file holding resumes, records, directory collections and ledger
    /// entries. Created on first write if it does not exist.
    #[arg(long, default_value = "./vouch_state.json", env = "VOUCH_STATE")]
    state: PathBuf,

    /// Path to a TOML engine configuration file. CLI flags and env vars
    /// override the logging settings in it.
    #[arg(long, env = "VOUCH_CONFIG")]
    config: Option<PathBuf>,

    /// Log format: "human" or "json".
    #[arg(long, env = "VOUCH_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "VOUCH_LOG_LEVEL")]
    log_level: Option<String>,

    /// Run the operation but leave the state file untouched.
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the verification record for a resume and check every claim.
    Init { resume_id: String },

    /// Re-check one education claim against the ledger and directory.
    CheckEducation { resume_id: String, index: usize },

    /// Re-check one work experience claim against the ledger and directory.
    CheckWork { resume_id: String, index: usize },

    /// Approve or reject one education claim.
    VerifyEducation {
        resume_id: String,
        index: usize,
        decision: Decision,
    },

    /// Approve or reject one work experience claim.
    VerifyWork {
        resume_id: String,
        index: usize,
        decision: Decision,
    },

    /// Print the ledger fingerprint of a claim on an existing record.
    Fingerprint {
        resume_id: String,
        section: Section,
        index: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Decision {
    Approve,
    Reject,
}

#[derive(Clone, Copy, ValueEnum)]
enum Section {
    Education,
    Work,
}

impl From<Section> for ClaimKind {
    fn from(section: Section) -> Self {
        match section {
            Section::Education => ClaimKind::Education,
            Section::Work => ClaimKind::WorkExperience,
        }
    }
}

fn resume_id(raw: &str) -> anyhow::Result<ResumeId> {
    ResumeId::new(raw).context("invalid resume id")
}

/// Print the fingerprint the ledger knows a claim by.
fn print_fingerprint(
    backends: &Backends,
    id: &ResumeId,
    kind: ClaimKind,
    index: usize,
) -> anyhow::Result<()> {
    let record = backends
        .store
        .record(id)
        .with_context(|| format!("no verification record for resume {id}"))?;
    let claim = record
        .claim(kind, index)
        .with_context(|| format!("no {kind} claim at index {index}"))?;
    println!("{}", vouch_crypto::claim_fingerprint(&record.name, &claim));
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    if let Some(level) = cli.log_level.clone() {
        config.log_level = level;
    }
    init_logging(config.log_format, &config.log_level);

    let backends = StateFile::load(&cli.state)?.into_backends();
    tracing::debug!(state = %cli.state.display(), "loaded state file");

    let service = VerificationService::new(
        config,
        backends.ledger.clone(),
        backends.directory.clone(),
        backends.store.clone(),
        backends.resumes.clone(),
    );

    let response: OperationResponse = match &cli.command {
        Command::Init { resume_id: raw } => service.initialize(&resume_id(raw)?).await,
        Command::CheckEducation {
            resume_id: raw,
            index,
        } => service.check_education(&resume_id(raw)?, *index).await,
        Command::CheckWork {
            resume_id: raw,
            index,
        } => service.check_work_experience(&resume_id(raw)?, *index).await,
        Command::VerifyEducation {
            resume_id: raw,
            index,
            decision,
        } => {
            let approve = matches!(decision, Decision::Approve);
            service
                .verify_education(&resume_id(raw)?, *index, approve)
                .await
        }
        Command::VerifyWork {
            resume_id: raw,
            index,
            decision,
        } => {
            let approve = matches!(decision, Decision::Approve);
            service
                .verify_work_experience(&resume_id(raw)?, *index, approve)
                .await
        }
        Command::Fingerprint {
            resume_id: raw,
            section,
            index,
        } => {
            print_fingerprint(&backends, &resume_id(raw)?, (*section).into(), *index)?;
            return Ok(());
        }
    };

    if cli.dry_run {
        tracing::info!("dry run, state file left unchanged");
    } else {
        backends.capture().save(&cli.state)?;
    }

    println!("{}", serde_json::to_string_pretty(&response)?);
    if !response.success {
        std::process::exit(1);
    }
    Ok(())
}
