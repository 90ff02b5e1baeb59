//! Tracing subscriber setup for binaries embedding Mapcast.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a global `fmt` subscriber filtered by `RUST_LOG`.
///
/// Without `RUST_LOG`, the Mapcast crates and `binary_name` log at
/// `default_level` and everything else is silent.
///
/// # Panics
/// Panics if a global subscriber is already installed.
pub fn init(binary_name: &str, default_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn default_filter(binary_name: &str, level: &str) -> String {
    let binary = binary_name.replace('-', "_");
    format!(
        "mapcast={level},mapcast_player={level},mapcast_room={level},{binary}={level}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_all_layers() {
        assert_eq!(
            default_filter("lobby-demo", "debug"),
            "mapcast=debug,mapcast_player=debug,mapcast_room=debug,lobby_demo=debug"
        );
    }
}
