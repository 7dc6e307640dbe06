//! `davdrive upload` - enqueue one upload and wait for its outcome

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use davdrive_core::config::Config;
use davdrive_core::domain::transfer::account_tag;
use davdrive_core::domain::{Account, AccountName, TransferPayload, UploadOrder};
use davdrive_core::ports::{ITaskScheduler, TaskSpec, TaskState};
use davdrive_dav::DavClient;
use davdrive_transfer::{
    FsContentSource, RetryPolicy, TokioTaskRunner, UploadContentWorker, TAG_AUTO_UPLOAD,
};

use crate::accounts::StaticAccountRepository;

#[derive(Debug, Args)]
pub struct UploadCommand {
    /// Local file to upload
    pub file: PathBuf,

    /// Destination path on the server, e.g. /Photos/img.jpg
    #[arg(long)]
    pub destination: String,

    /// Login name on the server
    #[arg(long)]
    pub user: String,

    /// Password or app token; read from $DAVDRIVE_PASSWORD if omitted
    #[arg(long)]
    pub password: Option<String>,
}

impl UploadCommand {
    pub async fn execute(self, config: &Config) -> Result<()> {
        let base_url = config.server.base_url.clone();
        anyhow::ensure!(!base_url.is_empty(), "server.base_url is not configured");

        let password = match self.password {
            Some(password) => password,
            None => std::env::var("DAVDRIVE_PASSWORD")
                .context("no --password given and DAVDRIVE_PASSWORD is unset")?,
        };

        let host = base_url
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/');
        let account_name = AccountName::new(format!("{}@{host}", self.user))?;
        let account = Account::new(account_name.clone(), base_url.clone(), self.user.clone());

        let last_modified = std::fs::metadata(&self.file)
            .and_then(|m| m.modified())
            .with_context(|| format!("cannot stat {}", self.file.display()))?
            .duration_since(UNIX_EPOCH)
            .context("file modification time predates the epoch")?
            .as_secs()
            .to_string();

        let order = UploadOrder {
            account_name: account_name.to_string(),
            content_handle: self.file.display().to_string(),
            destination: self.destination.clone(),
            last_modified,
            behavior: config.auto_upload.behavior.clone(),
        };

        let worker = UploadContentWorker::new(
            Arc::new(StaticAccountRepository::new(vec![account])),
            Arc::new(FsContentSource::new()),
            Arc::new(DavClient::new(base_url, self.user.clone(), password)),
        );
        let runner = TokioTaskRunner::new(
            Arc::new(worker),
            RetryPolicy {
                max_retries: config.transfers.max_retries,
                backoff: Duration::from_secs(config.transfers.retry_backoff_secs),
            },
        );

        let spec = TaskSpec {
            payload: TransferPayload::Upload(order),
            tags: vec![TAG_AUTO_UPLOAD.to_string(), account_tag(&account_name)],
        };

        let id = runner.enqueue(spec).await?;
        info!("Enqueued upload {id}");

        match runner.wait_for(id).await {
            Some(TaskState::Succeeded) => {
                println!("Uploaded {} -> {}", self.file.display(), self.destination);
                Ok(())
            }
            Some(state) => anyhow::bail!("upload ended in state {state:?}"),
            None => anyhow::bail!("upload task is not known to the runner"),
        }
    }
}
