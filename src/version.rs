//! Version information.

/// Package version from Cargo.toml.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// `User-Agent` sent on every upstream call: `animanga/{version}`.
pub const USER_AGENT: &str = concat!("animanga/", env!("CARGO_PKG_VERSION"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_carries_pkg_version() {
        assert!(USER_AGENT.starts_with("animanga/"));
        assert!(USER_AGENT.ends_with(PKG_VERSION));
    }
}
