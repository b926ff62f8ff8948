//! Colorful console output for typology runs.
//!
//! Provides a custom `tracing` layer that formats OTForge events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (typology start/end)
//! - **DEBUG**: Per-competition contenders and language counts
//! - **TRACE**: Individual language extensions and RCD verdicts

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the OTForge banner and sets up tracing.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::builder()
            .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(TypologyConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let banner = r#"
  ___ _____ _____
 / _ \_   _|  ___|__  _ __ __ _  ___
| | | || | | |_ / _ \| '__/ _` |/ _ \
| |_| || | |  _| (_) | | | (_| |  __/
 \___/ |_| |_|  \___/|_|  \__, |\___|
                          |___/
"#;

    let version_line = format!("        v{} - Constraint Ranking and Typology\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats typology events with colors.
pub struct TypologyConsoleLayer;

impl<S: Subscriber> Layer<S> for TypologyConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("otforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    input: Option<String>,
    winner: Option<String>,
    message: Option<String>,
    error: Option<String>,
    threads: Option<u64>,
    competition_count: Option<u64>,
    candidate_count: Option<u64>,
    constraint_count: Option<u64>,
    candidates: Option<u64>,
    contenders: Option<u64>,
    bound: Option<u64>,
    competition: Option<u64>,
    languages: Option<u64>,
    depth: Option<u64>,
    unexplained: Option<u64>,
    strata: Option<u64>,
    duration_ms: Option<u64>,
    consistent: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        let s = s.trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "input" => self.input = Some(s),
            "winner" => self.winner = Some(s),
            "message" => self.message = Some(s),
            "error" => self.error = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "competition_count" => self.competition_count = Some(value),
            "candidate_count" => self.candidate_count = Some(value),
            "constraint_count" => self.constraint_count = Some(value),
            "candidates" => self.candidates = Some(value),
            "contenders" => self.contenders = Some(value),
            "bound" => self.bound = Some(value),
            "competition" => self.competition = Some(value),
            "languages" => self.languages = Some(value),
            "depth" => self.depth = Some(value),
            "unexplained" => self.unexplained = Some(value),
            "strata" => self.strata = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "threads" => self.threads = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "consistent" {
            self.consistent = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "input" => self.input = Some(value.to_string()),
            "winner" => self.winner = Some(value.to_string()),
            "message" => self.message = Some(value.to_string()),
            "error" => self.error = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref().unwrap_or("") {
        "typology_start" => format_typology_start(v),
        "typology_end" => format_typology_end(v),
        "contenders" => format_contenders(v),
        "progress" => format_progress(v),
        "competition_skipped" => format_skipped(v),
        "language_kept" | "language_pruned" => format_extension(v, level),
        "rcd" => format_rcd(v, level),
        "thread_pool_fallback" => format_pool_fallback(v),
        _ => String::new(),
    }
}

fn count(n: Option<u64>) -> String {
    n.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_typology_start(v: &EventVisitor) -> String {
    format!(
        "{} Typology │ {} competitions │ {} candidates │ {} constraints",
        "▶".bright_green().bold(),
        count(v.competition_count).bright_yellow(),
        count(v.candidate_count).bright_yellow(),
        count(v.constraint_count).bright_yellow(),
    )
}

fn format_typology_end(v: &EventVisitor) -> String {
    let languages = v.languages.unwrap_or(0);
    let mut output = format!(
        "{} Typology complete │ {} │ {} languages",
        "■".bright_cyan().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        languages
            .to_formatted_string(&Locale::en)
            .bright_magenta()
            .bold(),
    );
    if languages == 0 {
        output.push_str(&format!(" │ {}", "NO CONSISTENT LANGUAGE".bright_red().bold()));
    }
    output
}

fn format_contenders(v: &EventVisitor) -> String {
    let input = v.input.as_deref().unwrap_or("?");
    let mut output = format!(
        "  {} /{}/ │ {} of {} candidates contend",
        "◆".bright_blue(),
        input.white().bold(),
        count(v.contenders).bright_green(),
        count(v.candidates).white(),
    );
    if let Some(bound) = v.bound.filter(|b| *b > 0) {
        output.push_str(&format!(
            " │ {} bound",
            bound.to_formatted_string(&Locale::en).bright_black()
        ));
    }
    output
}

fn format_progress(v: &EventVisitor) -> String {
    format!(
        "  {} #{:<4} /{}/ │ {} languages",
        "⚡".bright_cyan(),
        v.competition.unwrap_or(0) + 1,
        v.input.as_deref().unwrap_or("?").white(),
        count(v.languages).bright_magenta().bold(),
    )
}

fn format_skipped(v: &EventVisitor) -> String {
    format!(
        "  {} /{}/ skipped │ {}",
        "!".bright_yellow().bold(),
        v.input.as_deref().unwrap_or("?"),
        v.message.as_deref().unwrap_or("no contenders").yellow(),
    )
}

fn format_pool_fallback(v: &EventVisitor) -> String {
    format!(
        "  {} {}-thread pool unavailable, running sequentially │ {}",
        "!".bright_yellow().bold(),
        count(v.threads),
        v.error.as_deref().unwrap_or("unknown error").yellow(),
    )
}

fn format_extension(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }
    let kept = v.event.as_deref() == Some("language_kept");
    let icon = if kept {
        "✓".bright_green().to_string()
    } else {
        "✗".bright_red().to_string()
    };
    let detail = if kept {
        format!("depth {}", count(v.depth))
    } else {
        format!("{} unexplained", count(v.unexplained))
    };
    format!(
        "    {} /{}/ {} │ {}",
        icon,
        v.input.as_deref().unwrap_or("?").bright_black(),
        v.winner.as_deref().unwrap_or("?").white(),
        detail.bright_black(),
    )
}

fn format_rcd(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }
    let verdict = if v.consistent.unwrap_or(false) {
        "consistent".bright_green().to_string()
    } else {
        "inconsistent".bright_red().to_string()
    };
    format!(
        "    {} RCD │ {} strata │ {}",
        "·".bright_black(),
        count(v.strata).bright_black(),
        verdict,
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}
