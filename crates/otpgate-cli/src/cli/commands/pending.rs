//! Pending sign-in command handlers.

use anyhow::Result;
use otpgate_core::config::Config;
use otpgate_core::mask::mask_identifier;
use otpgate_core::store::{FilePendingStore, PendingLoginStore};

pub fn show(config: &Config) -> Result<()> {
    let store = FilePendingStore::open_default(&config.storage)?;
    match store.load() {
        Some(identifier) => println!("{}", mask_identifier(&identifier)),
        None => println!("(none)"),
    }
    Ok(())
}

pub fn clear(config: &Config) -> Result<()> {
    let mut store = FilePendingStore::open_default(&config.storage)?;
    store.clear()?;
    println!("Cleared pending sign-in");
    Ok(())
}
