//! # cinema-tickets-core
//!
//! Build metadata for the cinema-tickets workspace.
//!
//! This crate has no dependencies on other workspace crates, so the CLI can
//! report version details without pulling in the domain.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

/// Build-time information about the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    /// Package name from Cargo.toml
    pub name: &'static str,

    /// Package version from Cargo.toml (semver)
    pub version: &'static str,

    /// Minimum supported Rust version declared by the workspace
    pub rust_version: &'static str,

    /// CPU architecture (e.g., "x86_64")
    pub arch: &'static str,

    /// Operating system (e.g., "linux")
    pub os: &'static str,

    /// Build profile ("debug" or "release")
    pub profile: &'static str,

    /// Git commit hash (short form, if provided at build time)
    pub git_hash: Option<&'static str>,
}

impl BuildInfo {
    /// Returns `name version` or `name version (hash)` when git info is present.
    ///
    /// # Example
    ///
    /// ```
    /// use cinema_tickets_core::build_info;
    ///
    /// let info = build_info();
    /// assert!(info.version_string().starts_with(info.name));
    /// ```
    #[must_use]
    pub fn version_string(&self) -> String {
        self.git_hash.map_or_else(
            || format!("{} {}", self.name, self.version),
            |hash| format!("{} {} ({hash})", self.name, self.version),
        )
    }

    /// Returns `arch-os`.
    #[must_use]
    pub fn platform(&self) -> String {
        format!("{}-{}", self.arch, self.os)
    }

    /// Returns true if this is a debug build.
    #[must_use]
    pub const fn is_debug(&self) -> bool {
        matches!(self.profile.as_bytes(), b"debug")
    }
}

/// Returns build-time information about the binary.
///
/// Values are captured at compile time and never change while running.
#[must_use]
pub const fn build_info() -> BuildInfo {
    BuildInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        rust_version: env!("CARGO_PKG_RUST_VERSION"),
        arch: std::env::consts::ARCH,
        os: std::env::consts::OS,
        profile: if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
        git_hash: option_env!("GIT_HASH"),
    }
}
