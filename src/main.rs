use anyhow::{Context, Result};
use clap::Parser;
use parking_lot::Mutex;
use quicklaunch::checker::UpdateChecker;
use quicklaunch::config::Config;
use quicklaunch::document::MemoryDocument;
use quicklaunch::host::{HostEnvironment, ManifestRuntime};
use quicklaunch::lifecycle::{Lifecycle, LifecycleEvent};
use quicklaunch::notify::NotificationPresenter;
use quicklaunch::version::is_newer_version;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// quicklaunch - Quick Launch extension update checker
///
/// Polls the extension's release feed and announces newer versions with an
/// update banner.
///
/// If the GITHUB_TOKEN environment variable is set, it will be used for authentication.
/// This is useful for avoiding rate limits.
///
/// Examples:
///   quicklaunch check --extension ./firefox     # Check the unpacked extension in ./firefox
///   quicklaunch compare 1.2.0 1.1.9             # Compare two versions
#[derive(Parser, Debug)]
#[command(author, version = env!("QUICKLAUNCH_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Check the release feed for a newer extension version
    Check(CheckArgs),

    /// Tell whether one version is strictly newer than another
    Compare(CompareArgs),
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq)]
enum Browser {
    Firefox,
    Chrome,
}

impl From<Browser> for HostEnvironment {
    fn from(browser: Browser) -> Self {
        match browser {
            Browser::Firefox => HostEnvironment::Firefox,
            Browser::Chrome => HostEnvironment::Chrome,
        }
    }
}

#[derive(clap::Args, Debug)]
struct CheckArgs {
    /// Unpacked extension directory or its manifest.json
    #[arg(
        long,
        short = 'e',
        env = "QUICKLAUNCH_EXTENSION",
        value_name = "PATH",
        default_value = "."
    )]
    extension: PathBuf,

    /// Run as this browser instead of detecting it from the manifest
    #[arg(long, value_enum)]
    browser: Option<Browser>,

    /// Repository publishing the releases
    #[arg(long, env = "QUICKLAUNCH_REPO", value_name = "OWNER/REPO")]
    repo: Option<String>,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(long = "api-url", env = "QUICKLAUNCH_API_URL", value_name = "URL")]
    api_url: Option<String>,

    /// Lifecycle event to simulate: "ready" or "installed" (repeatable)
    #[arg(long = "event", value_name = "EVENT", default_value = "ready")]
    events: Vec<LifecycleEvent>,

    /// Delay between "ready" and its check
    #[arg(long = "ready-delay-ms", value_name = "MS", default_value_t = 2000)]
    ready_delay_ms: u64,

    /// Write the resulting page (with any banner) to this file
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Keep running until the banner has been auto-dismissed
    #[arg(long)]
    wait_dismiss: bool,
}

#[derive(clap::Args, Debug)]
struct CompareArgs {
    #[arg(value_name = "LATEST")]
    latest: String,

    #[arg(value_name = "CURRENT")]
    current: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => check(args).await?,
        Commands::Compare(args) => compare(&args)?,
    }
    Ok(())
}

#[tracing::instrument]
async fn check(args: CheckArgs) -> Result<()> {
    let config = Config::new(args.repo, args.api_url)?;

    let mut runtime = ManifestRuntime::load(&args.extension)?;
    if let Some(browser) = args.browser {
        runtime = runtime.with_environment(browser.into());
    }

    let document = Arc::new(Mutex::new(MemoryDocument::new()));
    let presenter = NotificationPresenter::new(Arc::clone(&document));
    let checker = Arc::new(UpdateChecker::new(config.feed, runtime, presenter));
    let lifecycle = Lifecycle::new(Arc::clone(&checker))
        .with_ready_delay(Duration::from_millis(args.ready_delay_ms));

    for outcome in lifecycle.dispatch(&args.events).await {
        println!("{}", outcome);
    }

    if let Some(path) = &args.output {
        let html = document.lock().to_html();
        std::fs::write(path, html).with_context(|| format!("Failed to write {:?}", path))?;
    }

    if args.wait_dismiss {
        while checker.notifier().is_showing() {
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }

    Ok(())
}

fn compare(args: &CompareArgs) -> Result<()> {
    let newer = is_newer_version(&args.latest, &args.current)?;
    if newer {
        println!("{} is newer than {}", args.latest, args.current);
    } else {
        println!("{} is not newer than {}", args.latest, args.current);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_check_defaults() {
        let cli = Cli::try_parse_from(["quicklaunch", "check"]).unwrap();
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.extension, PathBuf::from("."));
                assert_eq!(args.events, vec![LifecycleEvent::DocumentReady]);
                assert_eq!(args.ready_delay_ms, 2000);
                assert_eq!(args.browser, None);
                assert!(!args.wait_dismiss);
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_check_events_and_browser() {
        let cli = Cli::try_parse_from([
            "quicklaunch",
            "check",
            "--event",
            "ready",
            "--event",
            "installed",
            "--browser",
            "firefox",
            "-e",
            "/tmp/ext",
        ])
        .unwrap();
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(
                    args.events,
                    vec![
                        LifecycleEvent::DocumentReady,
                        LifecycleEvent::ExtensionInstalled
                    ]
                );
                assert_eq!(args.browser, Some(Browser::Firefox));
                assert_eq!(args.extension, PathBuf::from("/tmp/ext"));
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_event() {
        let result = Cli::try_parse_from(["quicklaunch", "check", "--event", "click"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_compare_parsing() {
        let cli = Cli::try_parse_from(["quicklaunch", "compare", "1.2.0", "1.1.9"]).unwrap();
        match cli.command {
            Commands::Compare(args) => {
                assert_eq!(args.latest, "1.2.0");
                assert_eq!(args.current, "1.1.9");
            }
            _ => panic!("Expected Compare command"),
        }
    }

    #[test]
    fn test_cli_no_subcommand_fails() {
        assert!(Cli::try_parse_from(["quicklaunch"]).is_err());
    }

    #[test]
    fn test_compare_malformed() {
        let args = CompareArgs {
            latest: "1.x".into(),
            current: "1.0".into(),
        };
        assert!(compare(&args).is_err());
    }
}
