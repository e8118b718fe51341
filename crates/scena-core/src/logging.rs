//! Tracing subscriber setup.
use tracing::Level;

/// Install a fmt subscriber at `level` ("trace" .. "error").
///
/// Unknown levels fall back to info. Returns false when a global subscriber
/// was already installed.
pub fn init(level: &str) -> bool {
    let level = parse_level(level).unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .is_ok()
}

fn parse_level(level: &str) -> Option<Level> {
    level.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Some(Level::DEBUG));
        assert_eq!(parse_level(" WARN "), Some(Level::WARN));
        assert_eq!(parse_level("loud"), None);
    }
}
