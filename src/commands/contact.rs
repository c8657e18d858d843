use anyhow::Result;

use super::common::open_stores;
use crate::config::Config;
use crate::render::render_contacts;
use crate::store::ContactStore;

/// List contacts. Only the contact store is read.
pub fn list(config: &Config) -> Result<()> {
    let (_, contacts) = open_stores(config)?;
    let contacts = contacts.fetch_all()?;

    let mut out = std::io::stdout().lock();
    render_contacts(&mut out, &contacts)?;
    Ok(())
}
