//! Build flags and their command line encoding

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Build configuration passed with `-c`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildConfig {
    #[default]
    Debug,
    Release,
}

impl BuildConfig {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildConfig::Debug => "debug",
            BuildConfig::Release => "release",
        }
    }
}

impl fmt::Display for BuildConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debug" => Ok(BuildConfig::Debug),
            "release" => Ok(BuildConfig::Release),
            other => Err(Error::InvalidValue(format!(
                "unknown build configuration '{other}' (expected debug or release)"
            ))),
        }
    }
}

/// Flags appended to a `swift` invocation
///
/// Values are interpolated verbatim: no quoting or escaping is applied, so a
/// value containing shell metacharacters reaches the shell as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    /// `--help`
    Help,
    /// `-c debug|release`
    Config(BuildConfig),

    /// `-Xcc`: pass flag through to all C compiler invocations
    C(String),
    /// `-Xcxx`: pass flag through to all C++ compiler invocations
    Cxx(String),
    /// `-Xlinker`: pass flag through to all linker invocations
    Linker(String),
    /// `-Xswiftc`: pass flag through to all Swift compiler invocations
    Swift(String),

    /// Compilation condition, e.g. `DEBUG` for `-D DEBUG`
    Macro(String),
    /// Target triple, e.g. `x86_64-apple-macosx10.12`
    Target(String),

    /// `--static-swift-stdlib` when true, `--no-static-swift-stdlib` otherwise
    Stdlib(bool),

    /// `--build-path`
    BuildPath(String),
    /// `--show-bin-path`
    ShowBinaryPath,
    /// `-v`
    Verbose,

    /// `--filter`, in `<test-target>.<test-case>` or `<test-target>.<test-case>/<test>` form
    Filter(String),
    /// `-parallel`
    Parallel,
    /// `--list-tests`
    ListTests,
    /// `--generate-linuxmain`
    GenerateLinuxMain,
    /// `--enable-code-coverage`
    EnableCodeCoverage,

    /// `--disable-prefetching`
    DisablePrefetching,
    /// `--disable-sandbox`
    DisableSandbox,
    /// `--enable-build-manifest-caching`
    EnableBuildManifestCaching,
    /// `--package-path`
    PackagePath(String),
    /// `--sanitize`
    Sanitize,
    /// `--skip-build`
    SkipBuild,
    /// `--skip-update`
    SkipUpdate,

    /// Appended to the command line as is
    Raw(String),
}

impl Flag {
    /// Encode the flag into the text appended to the command line
    pub fn encode(&self) -> String {
        match self {
            Flag::Help => "--help".to_string(),
            Flag::Config(config) => format!("-c {config}"),

            Flag::C(value) => format!("-Xcc {value}"),
            Flag::Cxx(value) => format!("-Xcxx {value}"),
            Flag::Linker(value) => format!("-Xlinker {value}"),
            Flag::Swift(value) => format!("-Xswiftc {value}"),

            Flag::Macro(value) => format!("-Xswiftc \"-D\" -Xswiftc {value}"),
            Flag::Target(value) => format!("-Xswiftc \"-target\" -Xswiftc {value}"),
            Flag::Stdlib(true) => "--static-swift-stdlib".to_string(),
            Flag::Stdlib(false) => "--no-static-swift-stdlib".to_string(),

            Flag::BuildPath(value) => format!("--build-path {value}"),
            Flag::ShowBinaryPath => "--show-bin-path".to_string(),
            Flag::Verbose => "-v".to_string(),

            Flag::Filter(value) => format!("--filter {value}"),
            Flag::Parallel => "-parallel".to_string(),
            Flag::ListTests => "--list-tests".to_string(),
            Flag::GenerateLinuxMain => "--generate-linuxmain".to_string(),
            Flag::EnableCodeCoverage => "--enable-code-coverage".to_string(),

            Flag::DisablePrefetching => "--disable-prefetching".to_string(),
            Flag::DisableSandbox => "--disable-sandbox".to_string(),
            Flag::EnableBuildManifestCaching => "--enable-build-manifest-caching".to_string(),
            Flag::PackagePath(value) => format!("--package-path {value}"),
            Flag::Sanitize => "--sanitize".to_string(),
            Flag::SkipBuild => "--skip-build".to_string(),
            Flag::SkipUpdate => "--skip-update".to_string(),

            Flag::Raw(value) => value.clone(),
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
