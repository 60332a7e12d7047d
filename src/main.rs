mod diagnostics;
mod document;
mod error;
mod extract;
mod loader;
mod model;
mod output;
mod query;
mod settings;
mod validate;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};

use diagnostics::Diagnostics;
use document::HtmlDocument;
use loader::LoadedPage;
use settings::Settings;
use tracing::info;

const STEPS: usize = 5;

#[derive(Parser)]
#[command(name = "aria_data", about = "Extract WAI-ARIA roles, states and properties into JSON")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the published spec and regenerate the data file
    Build {
        /// Spec URL (default: ARIA_SPEC_URL or the WAI-ARIA 1.1 TR page)
        #[arg(long)]
        url: Option<String>,
        /// Output path (default: ARIA_OUTPUT or data.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Same pipeline on a saved copy of the spec
    Extract {
        /// Saved HTML file
        #[arg(short, long)]
        input: PathBuf,
        /// URL the saved page was served from (default: the spec URL)
        #[arg(long)]
        base_url: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check an existing data file
    Validate {
        /// Data file (default: ARIA_OUTPUT or data.json)
        path: Option<PathBuf>,
    },
    /// List the states and properties a role supports, inherited ones included
    Attrs {
        /// Role name, e.g. "alert"
        role: String,
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(settings.debug()).into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build { url, output } => {
            let url = url.unwrap_or_else(|| settings.spec_url.clone());
            let output = output.unwrap_or_else(|| settings.output.clone());
            print_banner(&settings);
            step(1, &format!("Loading WAI-ARIA spec from {}...", url));
            let page = loader::fetch(&url, Duration::from_secs(settings.timeout_secs)).await?;
            run_pipeline(page, &output, settings.debug())
        }
        Commands::Extract {
            input,
            base_url,
            output,
        } => {
            let base_url = base_url.unwrap_or_else(|| settings.spec_url.clone());
            let output = output.unwrap_or_else(|| settings.output.clone());
            print_banner(&settings);
            step(1, &format!("Reading {}...", input.display()));
            let page = loader::read_file(&input, &base_url)?;
            run_pipeline(page, &output, settings.debug())
        }
        Commands::Validate { path } => {
            let path = path.unwrap_or_else(|| settings.output.clone());
            let value = output::read(&path)?;
            let data = validate::validate(&value)?;
            println!("{} is valid: {}", path.display(), data.summary());
            Ok(())
        }
        Commands::Attrs { role, data } => {
            let path = data.unwrap_or_else(|| settings.output.clone());
            let data = validate::validate(&output::read(&path)?)?;
            let found = query::find_role_by_name(&data, &role)
                .ok_or_else(|| error::ExtractError::UnknownRole(role.clone()))?;
            let refs = query::inherited_attributes(&data, &found.reference)?;
            for name in query::attribute_names(&data, &refs) {
                println!("{}", name);
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

/// Parse → extract → validate → write. Nothing is written unless every
/// earlier step succeeded.
fn run_pipeline(page: LoadedPage, out_path: &Path, debug: bool) -> anyhow::Result<()> {
    let diag = Diagnostics::new(debug);

    step(2, "Parsing document...");
    let doc = HtmlDocument::parse(&page.markup, &page.base_url)?;

    step(3, "Extracting roles, value types and attributes...");
    let data = extract::extract_all(&doc, &diag)?;

    step(4, "Validating data...");
    let value = serde_json::to_value(&data)?;
    validate::validate(&value)?;

    step(5, &format!("Updating {}...", out_path.display()));
    output::write(out_path, &value)?;

    println!("Success! {}", data.summary());
    if diag.verbose() {
        info!("{} fields fell back to defaults", diag.total());
    } else if diag.suppressed() > 0 {
        println!(
            "{} fields fell back to defaults (set DEBUG=true to list them)",
            diag.suppressed()
        );
    }
    Ok(())
}

/// Quiet runs only surface warnings and errors; progress goes through `step`.
fn default_filter(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "warn"
    }
}

fn print_banner(settings: &Settings) {
    if settings.debug() {
        println!("Running in debug mode...");
    }
}

fn step(n: usize, message: &str) {
    println!("[{}/{}] {}", n, STEPS, message);
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.w3.org/TR/wai-aria-1.1/";

    #[test]
    fn pipeline_writes_validated_document() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("data.json");
        let page = loader::read_file(Path::new("tests/fixtures/aria_sample.html"), BASE).unwrap();

        run_pipeline(page, &out, false).unwrap();

        let value = output::read(&out).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["roles", "valueTypes", "attributes"]);
        let data = validate::validate(&value).unwrap();
        let none = &data.roles[&format!("{}#none", BASE)];
        let presentation = format!("{}#presentation", BASE);
        assert_eq!(
            none.super_class_roles.iter().filter(|r| **r == presentation).count(),
            1
        );
    }

    #[test]
    fn rerun_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("data.json");
        let run = || {
            let page = loader::read_file(Path::new("tests/fixtures/aria_sample.html"), BASE).unwrap();
            run_pipeline(page, &out, false).unwrap();
            std::fs::read(&out).unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn fatal_error_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("data.json");
        let page = LoadedPage {
            base_url: BASE.to_string(),
            markup: r#"<div class="state" id="aria-busy"><h4 class="state-name"><code>aria-busy</code></h4></div>"#
                .to_string(),
        };

        assert!(run_pipeline(page, &out, false).is_err());
        assert!(!out.exists());
    }

    #[test]
    fn broken_reference_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("data.json");
        let page = LoadedPage {
            base_url: BASE.to_string(),
            markup: r##"
                <div class="role" id="alert">
                  <h4 class="role-name"><code>alert</code></h4>
                  <table><tr>
                    <td class="role-parent"><a class="role-reference" href="#section">section</a></td>
                  </tr></table>
                </div>"##
                .to_string(),
        };

        let err = run_pipeline(page, &out, false).unwrap_err();
        assert!(err.to_string().contains("superClassRoles"));
        assert!(!out.exists());
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["aria_data", "attrs", "alert", "--data", "x.json"]).unwrap();
        assert!(matches!(cli.command, Commands::Attrs { ref role, .. } if role == "alert"));
        let cli = Cli::try_parse_from(["aria_data", "extract", "-i", "spec.html"]).unwrap();
        assert!(matches!(cli.command, Commands::Extract { base_url: None, .. }));
    }

    #[test]
    fn quiet_mode_hides_info_logs() {
        assert_eq!(default_filter(false), "warn");
        assert_eq!(default_filter(true), "debug");
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
    }
}
