use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use buildkit_core::{BuildConfig, Command, Flag, PackageType, Subcommand as PackageSubcommand};

use crate::commands::{config_command, run_command};
use crate::utils::parse_env_pair;

#[derive(Parser, Debug)]
#[command(name = "buildkit")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(flatten)]
    pub flags: FlagArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Execution context options, shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Package directory; created for `package init`
    #[arg(short = 'C', long = "path", global = true)]
    pub path: Option<String>,

    /// Shell used to run the command line [default: /bin/sh]
    #[arg(long, global = true)]
    pub shell: Option<String>,

    /// Extra environment variable for the shell
    #[arg(short = 'e', long = "env", value_name = "KEY=VALUE", value_parser = parse_env_pair, global = true)]
    pub env: Vec<(String, String)>,

    /// Configuration file (defaults to the nearest .buildkit.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print the command line without executing it
    #[arg(short = 'n', long = "dry-run", global = true)]
    pub dry_run: bool,

    /// Print the dry run as JSON
    #[arg(long, global = true, requires = "dry_run")]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build sources into binary products
    #[command(visible_alias = "b")]
    Build,
    /// Build and run an executable product
    #[command(visible_alias = "r")]
    Run,
    /// Build and run tests
    #[command(visible_alias = "t")]
    Test,
    /// Perform operations on Swift packages
    Package {
        #[command(subcommand)]
        subcommand: PackageCommand,
    },
    /// Write the effective configuration to .buildkit.json
    Config {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum PackageCommand {
    /// Initialize a new package
    Init {
        /// empty, library, executable or system-module
        #[arg(long = "type", value_name = "TYPE", default_value_t = PackageType::Empty)]
        package_type: PackageType,
    },
    /// Update package dependencies
    Update,
    /// Generate an Xcode project
    #[command(name = "generate-xcodeproj")]
    GenerateXcodeproj,
    /// Delete build artifacts
    Clean,
    /// Completion tool (for shell completions)
    CompletionTool,
    /// Describe the current package
    Describe,
    /// Print parsed Package.swift as JSON
    DumpPackage,
    /// Put a package in editable mode
    Edit { name: String },
    /// Reset the complete cache/build directory
    Reset,
    /// Resolve package dependencies
    Resolve,
    /// Print the resolved dependency graph
    ShowDependencies,
    /// Manipulate tools version of the current package
    ToolsVersion,
    /// Remove a package from editable mode
    Unedit { name: String },
}

/// Flags forwarded to `swift`, emitted in declaration order
#[derive(Args, Debug, Clone, Default)]
pub struct FlagArgs {
    /// Pass --help to swift
    #[arg(long = "swift-help", global = true)]
    pub swift_help: bool,

    /// Build with configuration (debug or release)
    #[arg(short = 'c', long = "configuration", value_name = "CONFIG", global = true)]
    pub configuration: Option<BuildConfig>,

    /// Pass flag through to all C compiler invocations
    #[arg(long = "xcc", value_name = "FLAG", allow_hyphen_values = true, global = true)]
    pub xcc: Vec<String>,

    /// Pass flag through to all C++ compiler invocations
    #[arg(long = "xcxx", value_name = "FLAG", allow_hyphen_values = true, global = true)]
    pub xcxx: Vec<String>,

    /// Pass flag through to all linker invocations
    #[arg(long = "xlinker", value_name = "FLAG", allow_hyphen_values = true, global = true)]
    pub xlinker: Vec<String>,

    /// Pass flag through to all Swift compiler invocations
    #[arg(long = "xswiftc", value_name = "FLAG", allow_hyphen_values = true, global = true)]
    pub xswiftc: Vec<String>,

    /// Define a compilation condition (-D)
    #[arg(short = 'D', long = "define", value_name = "NAME", global = true)]
    pub define: Vec<String>,

    /// Target triple for the Swift compiler
    #[arg(long = "target", value_name = "TRIPLE", global = true)]
    pub target: Option<String>,

    /// Link the Swift stdlib statically
    #[arg(long = "static-swift-stdlib", global = true)]
    pub static_stdlib: bool,

    /// Do not link the Swift stdlib statically
    #[arg(long = "no-static-swift-stdlib", conflicts_with = "static_stdlib", global = true)]
    pub no_static_stdlib: bool,

    /// Build/cache directory
    #[arg(long = "build-path", global = true)]
    pub build_path: Option<String>,

    /// Print the binary output path
    #[arg(long = "show-bin-path", global = true)]
    pub show_bin_path: bool,

    /// Increase verbosity of swift output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Run test cases matching a regular expression
    #[arg(long, global = true)]
    pub filter: Option<String>,

    /// Run the tests in parallel
    #[arg(long, global = true)]
    pub parallel: bool,

    /// List test methods in specifier format
    #[arg(long = "list-tests", global = true)]
    pub list_tests: bool,

    /// Generate LinuxMain.swift entries for the package
    #[arg(long = "generate-linuxmain", global = true)]
    pub generate_linuxmain: bool,

    /// Enable code coverage
    #[arg(long = "enable-code-coverage", global = true)]
    pub enable_code_coverage: bool,

    #[arg(long = "disable-prefetching", global = true)]
    pub disable_prefetching: bool,

    /// Disable using the sandbox when executing subprocesses
    #[arg(long = "disable-sandbox", global = true)]
    pub disable_sandbox: bool,

    /// Enable llbuild manifest caching
    #[arg(long = "enable-build-manifest-caching", global = true)]
    pub enable_build_manifest_caching: bool,

    /// Package path passed to swift (not the working directory)
    #[arg(long = "package-path", global = true)]
    pub package_path: Option<String>,

    /// Turn on runtime checks for erroneous behavior
    #[arg(long, global = true)]
    pub sanitize: bool,

    /// Skip building the test target
    #[arg(long = "skip-build", global = true)]
    pub skip_build: bool,

    /// Skip updating dependencies from their remote
    #[arg(long = "skip-update", global = true)]
    pub skip_update: bool,

    /// Text appended verbatim to the command line
    #[arg(long, value_name = "TEXT", allow_hyphen_values = true, global = true)]
    pub raw: Vec<String>,
}

impl From<PackageCommand> for PackageSubcommand {
    fn from(command: PackageCommand) -> Self {
        match command {
            PackageCommand::Init { package_type } => PackageSubcommand::Initialize(package_type),
            PackageCommand::Update => PackageSubcommand::Update,
            PackageCommand::GenerateXcodeproj => PackageSubcommand::GenerateXcodeProject,
            PackageCommand::Clean => PackageSubcommand::Clean,
            PackageCommand::CompletionTool => PackageSubcommand::CompletionTool,
            PackageCommand::Describe => PackageSubcommand::Describe,
            PackageCommand::DumpPackage => PackageSubcommand::DumpPackage,
            PackageCommand::Edit { name } => PackageSubcommand::Edit(name),
            PackageCommand::Reset => PackageSubcommand::Reset,
            PackageCommand::Resolve => PackageSubcommand::Resolve,
            PackageCommand::ShowDependencies => PackageSubcommand::ShowDependencies,
            PackageCommand::ToolsVersion => PackageSubcommand::ToolsVersion,
            PackageCommand::Unedit { name } => PackageSubcommand::Unedit(name),
        }
    }
}

impl FlagArgs {
    /// Convert the parsed arguments into flags, in declaration order
    pub fn to_flags(&self) -> Vec<Flag> {
        let mut flags = Vec::new();

        if self.swift_help {
            flags.push(Flag::Help);
        }
        if let Some(config) = self.configuration {
            flags.push(Flag::Config(config));
        }
        flags.extend(self.xcc.iter().cloned().map(Flag::C));
        flags.extend(self.xcxx.iter().cloned().map(Flag::Cxx));
        flags.extend(self.xlinker.iter().cloned().map(Flag::Linker));
        flags.extend(self.xswiftc.iter().cloned().map(Flag::Swift));
        flags.extend(self.define.iter().cloned().map(Flag::Macro));
        if let Some(target) = &self.target {
            flags.push(Flag::Target(target.clone()));
        }
        if self.static_stdlib {
            flags.push(Flag::Stdlib(true));
        }
        if self.no_static_stdlib {
            flags.push(Flag::Stdlib(false));
        }
        if let Some(path) = &self.build_path {
            flags.push(Flag::BuildPath(path.clone()));
        }

        let switches = [
            (self.show_bin_path, Flag::ShowBinaryPath),
            (self.verbose, Flag::Verbose),
        ];
        flags.extend(switches.into_iter().filter(|(on, _)| *on).map(|(_, f)| f));

        if let Some(filter) = &self.filter {
            flags.push(Flag::Filter(filter.clone()));
        }

        let switches = [
            (self.parallel, Flag::Parallel),
            (self.list_tests, Flag::ListTests),
            (self.generate_linuxmain, Flag::GenerateLinuxMain),
            (self.enable_code_coverage, Flag::EnableCodeCoverage),
            (self.disable_prefetching, Flag::DisablePrefetching),
            (self.disable_sandbox, Flag::DisableSandbox),
            (
                self.enable_build_manifest_caching,
                Flag::EnableBuildManifestCaching,
            ),
        ];
        flags.extend(switches.into_iter().filter(|(on, _)| *on).map(|(_, f)| f));

        if let Some(path) = &self.package_path {
            flags.push(Flag::PackagePath(path.clone()));
        }

        let switches = [
            (self.sanitize, Flag::Sanitize),
            (self.skip_build, Flag::SkipBuild),
            (self.skip_update, Flag::SkipUpdate),
        ];
        flags.extend(switches.into_iter().filter(|(on, _)| *on).map(|(_, f)| f));

        flags.extend(self.raw.iter().cloned().map(Flag::Raw));
        flags
    }
}

impl Cli {
    /// Execute the parsed command line
    pub fn execute(self) -> Result<()> {
        let Cli {
            global,
            flags,
            command,
        } = self;

        let command = match command {
            Commands::Build => Command::Build,
            Commands::Run => Command::Run,
            Commands::Test => Command::Test,
            Commands::Package { subcommand } => Command::Package(subcommand.into()),
            Commands::Config { force } => return config_command(&global, force),
        };

        run_command(&global, command, flags.to_flags())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("buildkit").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_release() {
        let cli = parse(&["-C", "./demo", "run", "-c", "release"]);
        assert_eq!(cli.global.path.as_deref(), Some("./demo"));
        assert!(matches!(cli.command, Commands::Run));
        assert_eq!(cli.flags.to_flags(), vec![Flag::Config(BuildConfig::Release)]);
    }

    #[test]
    fn test_parse_package_init() {
        let cli = parse(&["package", "init", "--type", "system-module"]);
        match cli.command {
            Commands::Package { subcommand } => assert_eq!(
                PackageSubcommand::from(subcommand),
                PackageSubcommand::Initialize(PackageType::SystemModule)
            ),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_package_subcommand_names() {
        let cases = [
            ("generate-xcodeproj", PackageSubcommand::GenerateXcodeProject),
            ("completion-tool", PackageSubcommand::CompletionTool),
            ("dump-package", PackageSubcommand::DumpPackage),
            ("show-dependencies", PackageSubcommand::ShowDependencies),
            ("tools-version", PackageSubcommand::ToolsVersion),
        ];
        for (name, expected) in cases {
            let cli = parse(&["package", name]);
            let Commands::Package { subcommand } = cli.command else {
                panic!("expected package command for {name}");
            };
            assert_eq!(PackageSubcommand::from(subcommand), expected);
        }
    }

    #[test]
    fn test_flag_order_follows_declaration() {
        let cli = parse(&[
            "test",
            "--parallel",
            "-v",
            "--xswiftc",
            "-warnings-as-errors",
            "--raw",
            "--jobs 2",
        ]);
        assert_eq!(
            cli.flags.to_flags(),
            vec![
                Flag::Swift("-warnings-as-errors".into()),
                Flag::Verbose,
                Flag::Parallel,
                Flag::Raw("--jobs 2".into()),
            ]
        );
    }

    #[test]
    fn test_env_pairs() {
        let cli = parse(&["-e", "A=1", "--env", "B=x=y", "build"]);
        assert_eq!(
            cli.global.env,
            vec![
                ("A".to_string(), "1".to_string()),
                ("B".to_string(), "x=y".to_string())
            ]
        );
    }

    #[test]
    fn test_keywords_come_from_core_types() {
        let cli = parse(&["package", "init"]);
        let Commands::Package { subcommand } = cli.command else {
            panic!("expected package command");
        };
        assert_eq!(
            PackageSubcommand::from(subcommand),
            PackageSubcommand::Initialize(PackageType::Empty)
        );

        for package_type in ["empty", "library", "executable", "system-module"] {
            assert!(
                Cli::try_parse_from(["buildkit", "package", "init", "--type", package_type]).is_ok(),
                "{package_type}"
            );
        }

        assert!(
            Cli::try_parse_from(["buildkit", "package", "init", "--type", "systemModule"]).is_err()
        );
        assert!(Cli::try_parse_from(["buildkit", "build", "-c", "Release"]).is_err());
    }

    #[test]
    fn test_stdlib_flags_conflict() {
        let result = Cli::try_parse_from([
            "buildkit",
            "build",
            "--static-swift-stdlib",
            "--no-static-swift-stdlib",
        ]);
        assert!(result.is_err());
    }
}
