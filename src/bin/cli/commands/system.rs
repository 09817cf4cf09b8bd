use atelie::backup;
use atelie::repo;
use atelie::store::DocumentStore;

use crate::output::{self, OutputConfig};

/// Shows storage information
pub fn info(
    store: &dyn DocumentStore,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let info = backup::system_info(store)?;
    output::print_system_info(&info, config);
    Ok(())
}

/// Removes the primary document after confirmation; backups survive
pub fn clear(
    store: &dyn DocumentStore,
    yes: bool,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if !yes {
        return Err("refusing to clear data without --yes".into());
    }
    repo::clear_data(store)?;
    output::print_success("All student data removed.", config);
    Ok(())
}
