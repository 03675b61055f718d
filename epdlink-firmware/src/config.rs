//! Embedded link configuration
//!
//! `link.toml` is compiled into the image and validated by the build
//! script. Edit it and rebuild to change timings.

use defmt::*;
use epdlink_core::config::{from_toml, BusyPolicy, LinkConfig};

/// Embedded configuration (compiled into firmware)
const EMBEDDED_CONFIG: &str = include_str!("../link.toml");

/// Parse the embedded configuration
///
/// Falls back to [`LinkConfig::default`] if the document does not parse.
/// The heap must be initialized first.
pub fn load() -> LinkConfig {
    match from_toml(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Loaded link.toml");
            log_config_summary(&config);
            config
        }
        Err(e) => {
            warn!("Failed to parse link.toml: {:?}, using defaults", e);
            LinkConfig::default()
        }
    }
}

fn log_config_summary(config: &LinkConfig) {
    info!(
        "Link config: edge={}ns, reset={}/{}ms, settle={}ms, poll={}ms",
        config.edge_delay_ns,
        config.reset.assert_ms,
        config.reset.release_ms,
        config.reset.settle_ms,
        config.reset.poll_interval_ms
    );
    match config.busy {
        BusyPolicy::Unbounded => info!("BUSY wait: unbounded"),
        BusyPolicy::Bounded { timeout_ms } => info!("BUSY wait: bounded, {}ms", timeout_ms),
    }
}
