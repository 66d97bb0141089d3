//! `metadata <CODE>`: show the metadata panel for one station.

use anyhow::Context;
use rbmc_core::client::RbmcClient;
use rbmc_core::StationCode;
use rbmc_state::metadata_panel::MetadataPanel;

pub async fn run_metadata(client: &RbmcClient, code: &str) -> anyhow::Result<()> {
    let code = StationCode::parse(code)?;
    let metadata = client
        .metadata(&code)
        .await
        .with_context(|| format!("failed to load metadata for {}", code))?;
    println!("{}", code);
    println!("{}", MetadataPanel::Loaded(metadata));
    Ok(())
}
