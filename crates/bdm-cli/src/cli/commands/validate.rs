//! `bdm validate` – check a URL list without launching a browser.

use std::path::Path;

use anyhow::Result;
use bdm_core::joblist;
use bdm_core::url_model::is_valid_url;

pub fn run_validate(urls_file: &Path) -> Result<()> {
    let requests = joblist::read_url_list(urls_file)?;
    let mut ok = 0usize;
    for request in &requests {
        if is_valid_url(&request.url) {
            ok += 1;
            println!("ok   {}", request.url);
        } else {
            println!("bad  {}", request.url);
        }
    }
    println!("{} of {} line(s) look downloadable.", ok, requests.len());
    Ok(())
}
