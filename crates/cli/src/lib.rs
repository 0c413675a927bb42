mod archive;
mod checksum;
mod collect;
mod locate;
mod modules;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use collect::CollectArgs;

#[derive(Parser)]
#[command(
    name = "jpackstage",
    version,
    about = "Stages resolved jars for jlink and jpackage",
    long_about = "jpackstage sorts the resolved dependencies of a Java application into explicit \
                  modules, automatic modules and plain classpath jars, and copies each group into \
                  its own directory so that jlink and jpackage can consume them."
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify dependencies and copy them into the staging directories
    #[command(
        long_about = "Walks the resolved dependency graph, classifies every jar and copies it into \
                            the modules, automatic modules or classpath directory. By default these are \
                            <build-dir>/jpacktool/{jmods,autojar,jar}."
    )]
    Collect(CollectArgs),
    /// Print the path of a JDK tool such as jlink or jpackage
    Locate {
        /// Tool name without extension
        #[arg(value_name = "TOOL")]
        tool: String,
        /// JDK to use instead of JAVA_HOME and the usual install locations
        #[arg(long, value_name = "DIR")]
        jdk_home: Option<PathBuf>,
    },
    /// List the modules of the JDK's runtime image
    SystemModules {
        #[arg(long, value_name = "DIR")]
        jdk_home: Option<PathBuf>,
    },
    /// Write a <name>.sha256 file next to a file
    Checksum {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Zip a directory tree into <output>/<name>.zip
    Archive {
        #[arg(value_name = "DIR")]
        dir: PathBuf,
        #[arg(long, value_name = "DIR")]
        output: PathBuf,
        #[arg(long, value_name = "FINAL_NAME")]
        name: String,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let component = match &cli.command {
        Commands::Collect(_) => "collect",
        _ => "cli",
    };
    let _guard = jpackstage_runtime::init_logging(component, cli.verbose);

    match cli.command {
        Commands::Collect(args) => collect::run(args),
        Commands::Locate { tool, jdk_home } => locate::run(&tool, jdk_home),
        Commands::SystemModules { jdk_home } => modules::run(jdk_home),
        Commands::Checksum { file } => checksum::run(&file),
        Commands::Archive { dir, output, name } => archive::run(&dir, &output, &name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_collect() {
        let cli = Cli::try_parse_from([
            "jpackstage",
            "collect",
            "--lib-dir",
            "lib",
            "--disable",
            "named-module",
            "--exclude",
            "org.slf4j:*",
            "--exclude",
            "junit:junit",
            "--trust-module-system",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Collect(args) => {
                assert_eq!(args.lib_dir, Some(PathBuf::from("lib")));
                assert_eq!(args.exclude.len(), 2);
                assert!(args.trust_module_system);
            }
            _ => panic!("expected collect"),
        }
    }

    #[test]
    fn test_collect_needs_exactly_one_source() {
        assert!(Cli::try_parse_from(["jpackstage", "collect"]).is_err());
        assert!(
            Cli::try_parse_from([
                "jpackstage",
                "collect",
                "--lib-dir",
                "lib",
                "--listing",
                "deps.json"
            ])
            .is_err()
        );
    }
}
