use clap::Parser;
use policygen::PolicygenConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Generate Group Policy templates from policies declared in TypeScript sources.
#[derive(Parser, Debug)]
#[command(name = "policygen", version, about)]
struct Cli {
    /// Project root containing product.json, package.json and the sources
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Output directory (default: <ROOT>/.build/policies/win32)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Language-pack ids to render, comma separated (default: all published)
    #[arg(long, value_delimiter = ',')]
    languages: Option<Vec<String>>,

    /// Render only the source language
    #[arg(long)]
    no_translations: bool,

    /// Also write the extracted policies as JSON
    #[arg(long, value_name = "FILE")]
    emit_json: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Overlay command-line flags on the loaded configuration.
    fn config(&self) -> anyhow::Result<PolicygenConfig> {
        let mut config = PolicygenConfig::load(&self.root)?;
        let cwd = std::env::current_dir()?;

        if let Some(out) = &self.out {
            config.output.dir = Some(cwd.join(out));
        }
        if let Some(json) = &self.emit_json {
            config.output.json = Some(cwd.join(json));
        }
        if let Some(languages) = &self.languages {
            config.translations.languages = Some(languages.clone());
        }
        if self.no_translations {
            config.translations.enabled = Some(false);
        }
        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.config()?;
    let summary = policygen::run(&cli.root, &config, None)?;

    println!(
        "{} policies in {} categories from {} files",
        summary.policies, summary.categories, summary.files
    );
    for path in &summary.written {
        println!("  {}", path.display());
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
