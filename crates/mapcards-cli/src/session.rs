//! Command handlers.
//!
//! `replay` and `collect` share one shape: spawn a background dispatcher,
//! start a collection session, push traffic through an [`Interceptor`] wired
//! to the dispatcher, then stop and export. Per-input failures are logged and
//! skipped so one bad file or URL does not abort the run.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use mapcards_collector::{spawn_background, BackgroundConfig, BackgroundHandle};
use mapcards_core::{AppConfig, CandidateSink, Command, Reply};
use mapcards_scraper::{extract_records, InterceptingClient, Interceptor};

/// Prints every record extracted from `files` as one pretty JSON array.
pub(crate) async fn run_extract(files: &[PathBuf], source_url: Option<&str>) -> anyhow::Result<()> {
    let mut records = Vec::new();
    for file in files {
        let bytes = tokio::fs::read(file)
            .await
            .with_context(|| format!("failed to read {}", file.display()))?;
        let body: serde_json::Value = serde_json::from_slice(&bytes)
            .with_context(|| format!("{} is not valid JSON", file.display()))?;

        let url = source_url.map_or_else(|| file_url(file), str::to_owned);
        let extracted = extract_records(&body, &url);
        tracing::info!(file = %file.display(), count = extracted.len(), "extracted records");
        records.extend(extracted);
    }

    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

/// Replays saved bodies. The relevance filter is bypassed: a file on disk
/// has no request URL to judge.
pub(crate) async fn run_replay(
    config: &AppConfig,
    files: &[PathBuf],
    limit: Option<usize>,
    export_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let (handle, interceptor) = start_session(config, limit, export_dir).await?;

    for file in files {
        match tokio::fs::read(file).await {
            Ok(bytes) => {
                let count = interceptor.inspect_body(&file_url(file), &bytes);
                tracing::info!(file = %file.display(), count, "replayed response body");
            }
            Err(e) => tracing::warn!(file = %file.display(), error = %e, "skipping unreadable file"),
        }
    }

    finish_session(&handle).await
}

/// Fetches each URL through the intercepting client.
pub(crate) async fn run_collect(
    config: &AppConfig,
    urls: &[String],
    limit: Option<usize>,
    export_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let (handle, interceptor) = start_session(config, limit, export_dir).await?;
    let client =
        InterceptingClient::new(config.request_timeout_secs, &config.user_agent, interceptor)
            .context("failed to build HTTP client")?;

    for url in urls {
        match client.get(url).await {
            Ok(response) => tracing::info!(
                url = %url,
                status = response.status.as_u16(),
                bytes = response.body.len(),
                "fetched"
            ),
            Err(e) => tracing::warn!(url = %url, error = %e, "fetch failed; skipping"),
        }
    }

    finish_session(&handle).await
}

async fn start_session(
    config: &AppConfig,
    limit: Option<usize>,
    export_dir: Option<PathBuf>,
) -> anyhow::Result<(BackgroundHandle, Arc<Interceptor>)> {
    let mut background = BackgroundConfig::from_app_config(config);
    if let Some(dir) = export_dir {
        background.export_dir = dir;
    }
    let (handle, _task) = spawn_background(background, None);

    if limit.is_some() {
        handle.send(Command::SetCollectionLimit { limit }).await?;
    }
    handle.send(Command::StartCollection).await?;

    let sink: Arc<dyn CandidateSink> = Arc::new(handle.clone());
    Ok((handle, Arc::new(Interceptor::new(Some(sink)))))
}

/// Stops the session and exports. Batches posted earlier are handled before
/// the stop command, so the count is final.
async fn finish_session(handle: &BackgroundHandle) -> anyhow::Result<()> {
    if let Reply::Stopped { data_count } = handle.send(Command::StopCollection).await? {
        println!("collected {data_count} records");
    }

    match handle.send(Command::RequestExport).await? {
        Reply::Exported {
            path: Some(path),
            count,
        } => println!("exported {count} records to {path}"),
        Reply::Exported { path: None, .. } => println!("nothing to export"),
        Reply::Failed { reason } => anyhow::bail!("export failed: {reason}"),
        other => anyhow::bail!("unexpected reply to export: {other:?}"),
    }
    Ok(())
}

fn file_url(path: &Path) -> String {
    format!("file://{}", path.display())
}
