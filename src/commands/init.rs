use anyhow::Result;
use std::path::PathBuf;
use crate::cli::InitPreset;
use license_gate::config::manifest_path;
use license_gate::init;

pub fn handle_init(manifest: Option<PathBuf>, policy: InitPreset, quiet: bool) -> Result<()> {
    let init_preset = match policy {
        InitPreset::Green => init::InitPreset::Green,
        InitPreset::Yellow => init::InitPreset::Yellow,
        InitPreset::Red => init::InitPreset::Red,
    };

    let manifest_path = manifest_path(manifest.as_deref());
    init::generate_config_at_path(&manifest_path, init_preset)?;

    if !quiet {
        println!("✅ Configuration initialized in {}", manifest_path.display());
    }

    Ok(())
}
