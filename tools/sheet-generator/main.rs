use clap::Parser;
use kaiwa::sheet::Column;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::{Path, PathBuf};

/// A CLI tool to generate synthetic conversation-design sheets for kaiwa
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory to write the generated CSV files to
    #[arg(short, long, default_value = "generated_sheets")]
    output: PathBuf,

    /// Number of sheets to generate
    #[arg(short, long, default_value_t = 1)]
    files: usize,

    /// The minimum number of pages per sheet
    #[arg(long, default_value_t = 5)]
    min: usize,

    /// The maximum number of pages per sheet
    #[arg(long, default_value_t = 40)]
    max: usize,

    /// Chance (0.0 to 1.0) that a route points at a page no row defines
    #[arg(long, default_value_t = 0.0)]
    dangling: f64,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

const TOPICS: &[&str] = &[
    "grades",
    "assignments",
    "schedule",
    "advisor",
    "library",
    "tuition",
    "housing",
    "exams",
];

const UTTERANCES: &[&str] = &[
    "what's my {}",
    "show me {}",
    "help with {}",
    "I have a question about {}",
    "tell me about {}",
];

const EVENTS: &[&str] = &["sys.no-match-default", "sys.no-input-default", "welcome"];

const WEBHOOK_VERBS: &[&str] = &["fetch", "update", "check", "list"];

const CHIPS: &[&str] = &["Yes", "No", "Main menu", "Talk to a human", "More options"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.min == 0 || cli.min > cli.max {
        eprintln!(
            "Error: --min ({}) must be at least 1 and not greater than --max ({})",
            cli.min, cli.max
        );
        std::process::exit(1);
    }
    if !(0.0..=1.0).contains(&cli.dangling) {
        eprintln!("Error: --dangling must be between 0.0 and 1.0");
        std::process::exit(1);
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(rand::random()),
    };

    fs::create_dir_all(&cli.output)?;
    println!(
        "Generating {} sheet(s) with {} to {} pages each...",
        cli.files, cli.min, cli.max
    );

    for i in 0..cli.files {
        let page_count = rng.random_range(cli.min..=cli.max);
        let rows = generate_sheet(&mut rng, page_count, cli.dangling);
        let path = cli.output.join(format!("generated_flow_{:03}.csv", i + 1));
        write_sheet(&path, &rows)?;
        println!(
            "-> Wrote {} ({} pages, {} rows)",
            path.display(),
            page_count,
            rows.len()
        );
    }

    Ok(())
}

/// One generated design row, in `Column::ALL` order.
type SheetRow = [String; 10];

fn generate_sheet(rng: &mut StdRng, page_count: usize, dangling: f64) -> Vec<SheetRow> {
    let pages: Vec<String> = (0..page_count)
        .map(|i| match i {
            0 => "Start".to_string(),
            _ => {
                let topic = TOPICS.choose(rng).copied().unwrap_or("general");
                format!("{} {}", capitalize(topic), i)
            }
        })
        .collect();

    let mut rows = Vec::new();
    for i in 0..pages.len() {
        let route_count = rng.random_range(1..=3);
        for r in 0..route_count {
            rows.push(generate_row(rng, &pages, i, r, dangling));
        }
    }
    rows
}

fn generate_row(
    rng: &mut StdRng,
    pages: &[String],
    index: usize,
    route: usize,
    dangling: f64,
) -> SheetRow {
    let page = pages[index].clone();
    let topic = TOPICS.choose(rng).copied().unwrap_or("general");

    let trigger = match rng.random_range(0..10) {
        0..=5 => {
            let template = UTTERANCES.choose(rng).copied().unwrap_or("{}");
            format!("Intent: User says '{}'", template.replace("{}", topic))
        }
        6..=7 => format!("Event: {}", EVENTS.choose(rng).copied().unwrap_or("welcome")),
        _ => "Default".to_string(),
    };

    // The last page ends the conversation so every sheet has an end state.
    let is_last = index + 1 == pages.len();
    let next_page = if is_last {
        String::new()
    } else if rng.random_bool(dangling) {
        format!("Missing Page {}", rng.random_range(100..1000))
    } else {
        let forward = &pages[index + 1..];
        let count = rng.random_range(1..=forward.len().min(2));
        forward
            .choose_multiple(rng, count)
            .cloned()
            .collect::<Vec<_>>()
            .join(" / ")
    };

    let parameters = if rng.random_bool(0.3) {
        format!("topic={}, attempt={}", topic, route + 1)
    } else {
        String::new()
    };

    let webhook = if rng.random_bool(0.25) {
        let verb = WEBHOOK_VERBS.choose(rng).copied().unwrap_or("fetch");
        format!("{} student {}", verb, topic)
    } else {
        "N/A".to_string()
    };

    let chips = if rng.random_bool(0.4) {
        CHIPS
            .choose_multiple(rng, 2)
            .copied()
            .collect::<Vec<_>>()
            .join("; ")
    } else {
        String::new()
    };

    let step = format!("{}", index + 1);
    let next_step = if is_last {
        String::new()
    } else {
        format!("{}", index + 2)
    };

    [
        page,
        String::new(),
        trigger,
        format!("Let's talk about {}.", topic),
        next_page,
        parameters,
        webhook,
        chips,
        step,
        next_step,
    ]
}

fn write_sheet(path: &Path, rows: &[SheetRow]) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(Column::ALL.iter().map(|c| c.header()))?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
