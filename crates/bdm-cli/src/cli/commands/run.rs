//! `bdm run` – download every PDF named in a URL list.

use std::path::Path;

use anyhow::{Context, Result};
use bdm_core::config::BdmConfig;
use bdm_core::joblist;
use bdm_core::pipeline::{run_all, RunOptions};
use bdm_core::session::CdpBrowserSession;

pub async fn run_pipeline(cfg: &BdmConfig, urls_file: &Path) -> Result<()> {
    let requests = joblist::read_url_list(urls_file)?;
    if requests.is_empty() {
        println!("No URLs in {}.", urls_file.display());
        return Ok(());
    }

    // Directories must exist before the browser starts; Chrome refuses to
    // create its download target itself.
    let opts = RunOptions::from_config(cfg);
    opts.prepare_directories()?;

    let session =
        CdpBrowserSession::launch(&cfg.browser, &opts.incoming_dir, cfg.navigation_timeout())
            .await
            .context("could not start a browser session")?;

    let total = requests.len();
    let summary = run_all(session, &requests, &opts, |index, request, outcome| {
        println!("[{}/{}] {}: {}", index + 1, total, request.url, outcome);
    })
    .await?;

    println!("{}", summary);
    Ok(())
}
