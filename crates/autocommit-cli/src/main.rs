//! autocommit - commit-and-push pipeline step
//!
//! Reads its inputs from flags or the workflow environment, runs one
//! commit-step orchestration against the checkout, and reports the
//! outcome through the host's failure channel and exit code.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, Level};

use autocommit_core::{
    emit_error, init_tracing, run_step, Repo, StepInput, StepOutcome, StepOutputs,
};

#[derive(Parser)]
#[command(name = "autocommit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Stage, commit, and push modified files as one pipeline step", long_about = None)]
struct Cli {
    /// Push credential (bearer token or basic-auth password)
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    token: String,

    /// Commit message
    #[arg(long, env = "INPUT_MESSAGE", default_value = "automated commit")]
    message: String,

    /// JSON array of modified repository-relative paths
    #[arg(long, env = "INPUT_MODIFIED", default_value = "")]
    modified: String,

    /// Pipeline reference string (e.g. refs/heads/feature/x)
    #[arg(long = "ref", env = "GITHUB_REF")]
    pipeline_ref: String,

    /// Handle of the acting principal
    #[arg(long, env = "GITHUB_ACTOR", default_value = "")]
    actor: String,

    /// Remote host's domain, for the fallback author address
    #[arg(long, env = "GITHUB_HOST_DOMAIN", default_value = "github.com")]
    host_domain: String,

    /// Checkout to operate on
    #[arg(long, default_value = ".")]
    repo_dir: PathBuf,

    /// Remote to push to
    #[arg(long, default_value = "origin")]
    remote: String,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json, Level::INFO);

    let repo = Repo::open(&cli.repo_dir);
    let input = StepInput {
        token: cli.token,
        message: cli.message,
        modified: cli.modified,
        pipeline_ref: cli.pipeline_ref,
        actor: cli.actor,
        host_domain: cli.host_domain,
        remote: cli.remote,
    };

    match run_step(&repo, &input).await {
        Ok(StepOutcome::NoOp) => {
            info!("commit step finished: nothing to commit");
        }
        Ok(StepOutcome::Committed { branch, commit }) => {
            info!(branch = %branch, commit = %commit, "commit step finished");
            let outputs = StepOutputs::from_env("GITHUB_OUTPUT");
            outputs.set("commit_sha", commit.as_str())?;
            outputs.set("branch", &branch)?;
        }
        Err(err) => {
            for message in err.messages() {
                error!("{message}");
                emit_error(&message);
            }
            std::process::exit(1);
        }
    }

    Ok(())
}
