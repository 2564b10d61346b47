/// Build metadata embedded by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

impl BuildMetadata {
    /// `0.1.0 (abc1234, clean) x86_64-unknown-linux-gnu release`
    pub fn describe(&self) -> String {
        format!(
            "{} ({}, {}) {} {}",
            self.version, self.git_hash, self.git_status, self.target, self.profile
        )
    }
}

pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("LEDGER_RECON_BUILD_HASH").unwrap_or("unknown"),
        git_status: option_env!("LEDGER_RECON_BUILD_STATUS").unwrap_or("unknown"),
        timestamp: option_env!("LEDGER_RECON_BUILD_TIMESTAMP").unwrap_or("unknown"),
        target: option_env!("LEDGER_RECON_BUILD_TARGET").unwrap_or("unknown"),
        profile: option_env!("LEDGER_RECON_BUILD_PROFILE").unwrap_or("unknown"),
        rustc: option_env!("LEDGER_RECON_BUILD_RUSTC").unwrap_or("unknown"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn version_is_semver() {
        let pattern = Regex::new(r"^\d+\.\d+\.\d+").unwrap();
        assert!(pattern.is_match(current().version));
    }

    #[test]
    fn describe_starts_with_version() {
        let meta = current();
        assert!(meta.describe().starts_with(meta.version));
    }
}
