//! Build metadata captured by the build script.

const fn or_none(value: Option<&'static str>) -> &'static str {
    match value {
        Some(v) => v,
        None => "<none>",
    }
}

macro_rules! env_or_none {
    ($name:ident, $env:literal) => {
        #[allow(dead_code)]
        pub const $name: &str = or_none(option_env!($env));
    };
}

pub const PACKAGE: &str = "spalink";
env_or_none!(VERSION, "VERGEN_BUILD_SEMVER");
env_or_none!(BUILD_TIMESTAMP, "VERGEN_BUILD_TIMESTAMP");
env_or_none!(RUSTC_SEMVER, "VERGEN_RUSTC_SEMVER");
env_or_none!(RUSTC_COMMIT_HASH, "VERGEN_RUSTC_COMMIT_HASH");

/// One-line description of this build, e.g. for `--version` style output.
pub fn describe() -> String {
    format!("{PACKAGE} {VERSION} (built {BUILD_TIMESTAMP}, rustc {RUSTC_SEMVER})")
}
