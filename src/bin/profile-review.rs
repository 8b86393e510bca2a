//! CLI binary for profile-review.
//!
//! A thin host around [`UiController`]: it reads the PDF, submits it, then
//! replays the requested page actions (copy, open certificate, toggle theme)
//! as events and prints the rendered page.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use profile_review::config::DEFAULT_SERVER_URL;
use profile_review::platform::{Osc52Clipboard, PrintLinkOpener};
use profile_review::theme::system_theme;
use profile_review::view::badge::BadgeTier;
use profile_review::view::document::document;
use profile_review::view::escape::text_content;
use profile_review::view::page::COPY_LABEL;
use profile_review::{
    ClientConfig, Observer, Page, PdfUpload, SectionId, Theme, UiController, UiEvent, UiObserver,
    UploadForm,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

fn tier_colour(tier: Option<BadgeTier>, s: &str) -> String {
    match tier {
        Some(BadgeTier::Excellent | BadgeTier::Good) => green(s),
        Some(BadgeTier::Average) => yellow(s),
        Some(BadgeTier::Weak | BadgeTier::Poor) => red(s),
        None => dim(s),
    }
}

// ── Terminal observer ────────────────────────────────────────────────────────

/// Mirrors page events on stderr: a spinner while the review is loading and
/// one line per copy confirmation or theme change.
struct TerminalObserver {
    spinner: Option<ProgressBar>,
    quiet: bool,
}

impl TerminalObserver {
    fn new(show_progress: bool, quiet: bool) -> Arc<Self> {
        let spinner = show_progress.then(|| {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  {elapsed:.dim}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner())
                    .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
            );
            bar.set_prefix("Reviewing");
            bar
        });
        Arc::new(Self { spinner, quiet })
    }

    fn line(&self, msg: String) {
        if self.quiet {
            return;
        }
        match &self.spinner {
            Some(bar) if !bar.is_finished() => bar.println(msg),
            _ => eprintln!("{msg}"),
        }
    }
}

impl UiObserver for TerminalObserver {
    fn on_loading_changed(&self, visible: bool) {
        let Some(bar) = &self.spinner else {
            return;
        };
        if visible {
            bar.set_message("Uploading profile and waiting for feedback…");
            bar.enable_steady_tick(Duration::from_millis(80));
        } else {
            bar.finish_and_clear();
        }
    }

    fn on_copy_label_changed(&self, section: SectionId, label: &str) {
        if label != COPY_LABEL {
            self.line(format!("{} {}: {}", green("✓"), section.title(), label));
        }
    }

    fn on_theme_changed(&self, theme: Theme) {
        self.line(format!("{} theme set to {}", cyan("◆"), bold(theme.as_str())));
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Review a profile export against the default local server
  profile-review Profile.pdf

  # Target a role and a remote server
  profile-review --role "Data Engineer" --server https://review.example.com Profile.pdf

  # Copy the suggested headline and summary to the clipboard (OSC 52)
  profile-review --copy headline --copy summary Profile.pdf

  # Save a standalone HTML page and print the certificate link
  profile-review --html review.html --open-certificate Profile.pdf

  # Raw review as JSON
  profile-review --json Profile.pdf > review.json

SECTIONS:
  headline, about, keywords, summary   copyable
  experience, skills                   display only

ENVIRONMENT VARIABLES:
  PROFILE_REVIEW_SERVER        Review service base URL
  PROFILE_REVIEW_ROLE          Default target role
  PROFILE_REVIEW_PREFERENCES   Theme preference file
  COLORFGBG                    Used to guess light/dark when no theme is stored
  RUST_LOG                     Overrides the log filter
"#;

/// Upload a LinkedIn PDF export and print the review.
#[derive(Parser, Debug)]
#[command(
    name = "profile-review",
    version,
    about = "Upload a LinkedIn PDF export to a review service and print the feedback",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// PDF export of the profile.
    input: PathBuf,

    /// Role the review should target. May be empty.
    #[arg(short, long, env = "PROFILE_REVIEW_ROLE", default_value = "")]
    role: String,

    /// Base URL of the review service.
    #[arg(long, env = "PROFILE_REVIEW_SERVER", default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// Print the decoded review as JSON instead of the summary.
    #[arg(long, env = "PROFILE_REVIEW_JSON")]
    json: bool,

    /// Also write the rendered page as a standalone HTML file.
    #[arg(long, env = "PROFILE_REVIEW_HTML")]
    html: Option<PathBuf>,

    /// Copy a section's text to the clipboard. Repeatable.
    #[arg(long = "copy", value_name = "SECTION", env = "PROFILE_REVIEW_COPY", value_delimiter = ',')]
    copy: Vec<SectionId>,

    /// Open (print) the certificate link.
    #[arg(long, env = "PROFILE_REVIEW_OPEN_CERTIFICATE")]
    open_certificate: bool,

    /// Flip the stored light/dark preference before rendering.
    #[arg(long, env = "PROFILE_REVIEW_TOGGLE_THEME")]
    toggle_theme: bool,

    /// Theme preference file.
    #[arg(long, env = "PROFILE_REVIEW_PREFERENCES")]
    preferences: Option<PathBuf>,

    /// Disable the spinner.
    #[arg(long, env = "PROFILE_REVIEW_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PROFILE_REVIEW_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and the review itself.
    #[arg(short, long, env = "PROFILE_REVIEW_QUIET")]
    quiet: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner covers the one slow step; INFO lines would only tear it.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    tokio::task::LocalSet::new().run_until(run(cli, show_progress)).await
}

async fn run(cli: Cli, show_progress: bool) -> Result<()> {
    let config = build_config(&cli)?;
    let observer = TerminalObserver::new(show_progress, cli.quiet);

    let (mut controller, mut events) = UiController::builder(config)
        .clipboard(Osc52Clipboard::stderr())
        .link_opener(PrintLinkOpener::new(io::stderr()))
        .observer(observer as Observer)
        .system_theme(system_theme())
        .build()
        .context("Invalid configuration")?;

    let pdf = PdfUpload::from_path(&cli.input)
        .await
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;

    if cli.toggle_theme {
        controller.handle(UiEvent::ToggleTheme);
    }

    // ── Submit and wait for the review ───────────────────────────────────
    controller.handle(UiEvent::Submit(UploadForm::new(Some(pdf), cli.role.clone())));
    controller.run_until_settled(&mut events).await;

    if let Some(message) = controller.page().error() {
        anyhow::bail!("{message}");
    }

    // ── Page actions ─────────────────────────────────────────────────────
    for &section in &cli.copy {
        if !section.is_copyable() {
            eprintln!("{} {} has no copy button", yellow("⚠"), section.title());
            continue;
        }
        let before = controller.page().copy_button(section).map(|b| b.generation);
        controller.handle(UiEvent::Copy(section));
        if controller.page().copy_button(section).map(|b| b.generation) != before {
            continue;
        }
        match controller.page().error() {
            Some(message) => eprintln!("{} {}", red("✗"), message),
            None => eprintln!("{} {} is empty, nothing copied", yellow("⚠"), section.title()),
        }
    }

    if cli.open_certificate {
        if controller.page().certificate.is_none() {
            eprintln!("{} no score in this review, so no certificate", yellow("⚠"));
        }
        controller.handle(UiEvent::OpenCertificate);
    }

    // ── Output ───────────────────────────────────────────────────────────
    if let Some(ref path) = cli.html {
        write_atomic(path, &document(controller.page()))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        if !cli.quiet {
            eprintln!("{} page written to {}", green("✔"), bold(&path.display().to_string()));
        }
    }

    if cli.json {
        let json = serde_json::to_string_pretty(&controller.review())
            .context("Failed to serialise review")?;
        println!("{json}");
    } else {
        print_summary(controller.page()).context("Failed to write to stdout")?;
    }

    Ok(())
}

/// Map CLI args to `ClientConfig`.
fn build_config(cli: &Cli) -> Result<ClientConfig> {
    let mut builder = ClientConfig::builder().server_url(cli.server.clone());
    if let Some(path) = cli.preferences.clone().or_else(default_preferences_path) {
        builder = builder.preferences_path(path);
    }
    builder.build().context("Invalid configuration")
}

/// `$XDG_CONFIG_HOME/profile-review/preferences.json`, falling back to
/// `~/.config`.
fn default_preferences_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
    Some(base.join("profile-review").join("preferences.json"))
}

/// Write via a sibling temp file and rename, so readers never see a
/// partial document.
fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn print_summary(page: &Page) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let score = tier_colour(page.score.tier, &bold(&page.score.text));
    writeln!(out, "{} {}/100", bold("Score:"), score)?;
    if let Some(cert) = &page.certificate {
        writeln!(out, "{}", dim(&cert.standing.to_string()))?;
    }
    if page.stats.visible {
        writeln!(
            out,
            "Connections: {}  Followers: {}",
            page.stats.connections, page.stats.followers
        )?;
    }

    for (id, section) in page.sections() {
        let text = text_content(&section.html);
        writeln!(out)?;
        writeln!(out, "{}", bold(&cyan(id.title())))?;
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            writeln!(out, "  {line}")?;
        }
    }

    if let Some(cert) = &page.certificate {
        writeln!(out)?;
        writeln!(out, "{} {}", bold("Certificate:"), cert.url)?;
    }
    if let Some(share) = &page.share_url {
        writeln!(out, "{} {}", bold("Share:"), share)?;
    }
    out.flush()
}
