//! rolegate policy command
//!
//! Offline checks against a JSON data file, without starting the server.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Subcommand};
use console::style;
use rolegate_adapter::JsonFileStore;
use rolegate_domain::UserId;
use rolegate_usecase::AuthorizationEngine;

#[derive(Debug, Args)]
pub struct PolicyCommand {
    /// Data file to read (defaults to ROLEGATE_DATA_FILE)
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: PolicySubcommand,
}

#[derive(Debug, Subcommand)]
pub enum PolicySubcommand {
    /// Check whether a user holds a permission
    Check {
        /// User id
        #[arg(short, long)]
        user: String,
        /// Permission name
        #[arg(short, long)]
        permission: String,
    },
    /// List every permission a user holds through its roles
    Grants {
        /// User id
        #[arg(short, long)]
        user: String,
    },
}

impl PolicyCommand {
    pub fn run(&self) -> anyhow::Result<()> {
        let path = self.resolve_data_file()?;
        let store = JsonFileStore::open(&path)
            .with_context(|| format!("failed to open data file {}", path.display()))?;
        let engine = AuthorizationEngine::from_store(Arc::new(store));

        for line in self.evaluate(&engine)? {
            println!("{}", line);
        }
        Ok(())
    }

    fn resolve_data_file(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = &self.data_file {
            return Ok(path.clone());
        }
        std::env::var_os(shared::ENV_DATA_FILE)
            .map(PathBuf::from)
            .with_context(|| format!("no data file: pass --data-file or set {}", shared::ENV_DATA_FILE))
    }

    /// Output lines for the selected subcommand
    pub fn evaluate(&self, engine: &AuthorizationEngine) -> anyhow::Result<Vec<String>> {
        match &self.command {
            PolicySubcommand::Check { user, permission } => {
                let allowed = engine.check_permission(&UserId::new(user.as_str()), permission)?;
                let verdict = if allowed {
                    style("allowed").green()
                } else {
                    style("denied").red()
                };
                Ok(vec![verdict.to_string()])
            }
            PolicySubcommand::Grants { user } => {
                let names = engine.effective_permissions(&UserId::new(user.as_str()))?;
                if names.is_empty() {
                    return Ok(vec![style("(no permissions)").dim().to_string()]);
                }
                Ok(names)
            }
        }
    }
}
