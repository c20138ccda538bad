use anyhow::Result;
use std::path::PathBuf;
use std::rc::Rc;
use super::check::VIOLATION_EXIT_CODE;
use license_gate::config::{load_policy_value, manifest_path};
use license_gate::lifecycle::{ConsoleIo, EventScript};

pub fn handle_replay(
    manifest: Option<PathBuf>,
    script: PathBuf,
    quiet: bool,
    verbose: bool,
) -> Result<()> {
    let config = load_policy_value(&manifest_path(manifest.as_deref()))?;
    let script = EventScript::load(&script)?;
    let command = script.command.clone();
    let io = Rc::new(ConsoleIo::new(verbose, quiet));

    match script.run(&config, io) {
        Ok(dispatched) => {
            if !quiet {
                println!("✅ {} finished: {} package operations passed the license policy", command, dispatched);
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(VIOLATION_EXIT_CODE);
        }
    }
}
