use clap::{ArgGroup, Args};
use jpackstage_api::Category;
use jpackstage_core::{ArtifactSelector, CollectConfig, CollectReport};
use jpackstage_runtime::DependencySource;
use std::path::PathBuf;
use tabled::{Table, Tabled};
use tracing::{info, warn};

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["listing", "lib_dir"])))]
pub struct CollectArgs {
    /// JSON listing of the resolved dependencies
    #[arg(long, value_name = "FILE")]
    pub listing: Option<PathBuf>,
    /// Directory of jars, flat or in Maven repository layout
    #[arg(long, value_name = "DIR")]
    pub lib_dir: Option<PathBuf>,
    /// JSON configuration file; flags take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    #[arg(long, value_name = "DIR")]
    pub build_dir: Option<PathBuf>,
    #[arg(long, value_name = "DIR")]
    pub modules_dir: Option<PathBuf>,
    #[arg(long, value_name = "DIR")]
    pub automatic_dir: Option<PathBuf>,
    #[arg(long, value_name = "DIR")]
    pub classpath_dir: Option<PathBuf>,
    /// Do not stage this category (named-module, automatic-module, classpath-jar)
    #[arg(long, value_name = "CATEGORY", value_parser = parse_category)]
    pub disable: Vec<Category>,
    /// Stage every automatic module as such, even without Automatic-Module-Name
    #[arg(long)]
    pub trust_module_system: bool,
    /// groupId:artifactId[:version[:classifier]] to leave out entirely
    #[arg(long, value_name = "SELECTOR")]
    pub exclude: Vec<ArtifactSelector>,
    /// groupId:artifactId[:version[:classifier]] to always stage as a classpath jar
    #[arg(long, value_name = "SELECTOR")]
    pub force_classpath: Vec<ArtifactSelector>,
    #[arg(long)]
    pub skip: bool,
    /// Print a table of staged artifacts
    #[arg(long)]
    pub summary: bool,
}

fn parse_category(s: &str) -> Result<Category, String> {
    Category::ALL
        .into_iter()
        .find(|c| c.as_str() == s)
        .ok_or_else(|| {
            let known: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
            format!("unknown category '{}', expected one of {}", s, known.join(", "))
        })
}

impl CollectArgs {
    fn source(&self) -> Option<DependencySource> {
        match (&self.listing, &self.lib_dir) {
            (Some(listing), _) => Some(DependencySource::Listing(listing.clone())),
            (None, Some(dir)) => Some(DependencySource::Directory(dir.clone())),
            (None, None) => None,
        }
    }

    /// Configuration file (or defaults) with the command-line flags applied.
    pub fn effective_config(&self) -> jpackstage_core::Result<CollectConfig> {
        let mut config = match &self.config {
            Some(path) => CollectConfig::load(path)?,
            None => CollectConfig::default(),
        };

        if let Some(dir) = &self.build_dir {
            config.build_dir = dir.clone();
        }
        if self.modules_dir.is_some() {
            config.modules_dir = self.modules_dir.clone();
        }
        if self.automatic_dir.is_some() {
            config.automatic_dir = self.automatic_dir.clone();
        }
        if self.classpath_dir.is_some() {
            config.classpath_dir = self.classpath_dir.clone();
        }
        for category in &self.disable {
            if !config.disabled.contains(category) {
                config.disabled.push(*category);
            }
        }
        if self.trust_module_system {
            config.only_named_are_automatic = false;
        }
        config.excluded.extend(self.exclude.iter().cloned());
        config.classpath.extend(self.force_classpath.iter().cloned());
        config.skip |= self.skip;

        Ok(config)
    }
}

#[derive(Tabled)]
struct StagedRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Artifact")]
    artifact: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Size")]
    size: String,
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    }
}

fn summary_table(report: &CollectReport) -> Table {
    let rows: Vec<StagedRow> = report
        .results
        .iter()
        .map(|r| StagedRow {
            category: r.category.to_string(),
            artifact: r.coordinates.to_string(),
            target: r
                .target
                .as_ref()
                .map(|t| t.display().to_string())
                .unwrap_or_else(|| "(not staged)".to_string()),
            size: if r.is_staged() {
                format_size(r.bytes)
            } else {
                "-".to_string()
            },
        })
        .collect();
    Table::new(rows)
}

pub fn run(args: CollectArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.effective_config()?;
    if config.skip {
        warn!("skipped due to: skip parameter is true");
        return Ok(());
    }

    let Some(source) = args.source() else {
        return Err("either --listing or --lib-dir is required".into());
    };

    let layout = config.layout();
    for (category, dir) in layout.configured() {
        info!("{} directory: {}", category, dir.display());
    }

    let collector = jpackstage_runtime::build_default_collector(&config, source);
    let report = collector.run(&layout)?;

    if args.summary {
        println!("{}", summary_table(&report));
    }
    println!(
        "Staged {} of {} artifacts ({} excluded, {} demoted to classpath)",
        report.staged(),
        report.results.len(),
        report.stats.excluded,
        report.stats.demoted
    );
    Ok(())
}
