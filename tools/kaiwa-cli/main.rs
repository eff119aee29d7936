use clap::{Parser, Subcommand};
use kaiwa::batch::{self, DEFAULT_OUTPUT_DIR};
use kaiwa::dispatch::handler_fn;
use kaiwa::parsing::normalize_webhook;
use kaiwa::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Compiles CSV conversation designs into flow documents
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log per-row details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert one CSV file, or every CSV in a directory with --bulk
    Convert {
        /// CSV file, or directory in bulk mode
        input: PathBuf,

        /// Output file, or output directory in bulk mode
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Convert every CSV file in the input directory
        #[arg(long)]
        bulk: bool,

        /// JSON file with converter options
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Display name of the flow (defaults to the file name)
        #[arg(long)]
        flow_name: Option<String>,

        /// Display name of the webhook that carries tagged calls
        #[arg(long)]
        webhook_name: Option<String>,
    },
    /// Print the webhook identifier for a plain-English description
    Normalize {
        /// Free-text webhook description
        text: Vec<String>,
    },
    /// Show which webhook of a converted document a tag reaches
    Resolve {
        /// Converted flow document (JSON)
        document: PathBuf,

        /// Tag or free-text description to resolve
        tag: String,

        /// Keyword alias, e.g. `grade,check=check_grades`
        #[arg(short, long)]
        alias: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Convert {
            input,
            output,
            bulk,
            config,
            flow_name,
            webhook_name,
        } => {
            let converter = build_converter(config, flow_name, webhook_name);
            if bulk {
                run_bulk(&converter, &input, output.as_deref());
            } else {
                run_single(&converter, &input, output);
            }
        }
        Command::Normalize { text } => run_normalize(&text.join(" ")),
        Command::Resolve {
            document,
            tag,
            alias,
        } => run_resolve(&document, &tag, &alias),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "kaiwa=debug" } else { "kaiwa=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn build_converter(
    config: Option<PathBuf>,
    flow_name: Option<String>,
    webhook_name: Option<String>,
) -> Converter {
    let options = match config {
        Some(path) => ConverterOptions::from_file(&path).unwrap_or_else(|e| {
            exit_with_error(&format!(
                "Failed to load options from '{}': {}",
                path.display(),
                e
            ))
        }),
        None => ConverterOptions::default(),
    };

    let mut builder = Converter::builder().with_options(options);
    if let Some(name) = flow_name {
        builder = builder.with_flow_name(&name);
    }
    if let Some(name) = webhook_name {
        builder = builder.with_webhook_display_name(&name);
    }
    builder
        .build()
        .unwrap_or_else(|e| exit_with_error(&e.to_string()))
}

fn run_single(converter: &Converter, input: &Path, output: Option<PathBuf>) {
    let start = Instant::now();
    let output = output.unwrap_or_else(|| {
        let dir = input
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(DEFAULT_OUTPUT_DIR);
        batch::output_path_for(input, &dir)
    });

    let converted = converter.convert_file(input).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to convert '{}': {}", input.display(), e))
    });
    converted.value.save(&output).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to write '{}': {}", output.display(), e))
    });

    let document = &converted.value;
    println!("\n--- Conversion Result ---");
    println!("Flow:      {}", document.display_name);
    println!("Pages:     {}", document.pages.len());
    println!("End pages: {}", document.metadata.end_pages.join(", "));
    println!("Intents:   {}", document.intents.len());
    println!("Routes:    {}", document.metadata.route_count);
    println!("Webhooks:  {}", document.webhooks.len());
    if !converted.diagnostics.is_empty() {
        println!("\nDiagnostics:");
        for diagnostic in &converted.diagnostics {
            println!("  [{:?}] {}", diagnostic.severity(), diagnostic);
        }
    }
    println!("\nWrote {} in {:?}", output.display(), start.elapsed());
}

fn run_bulk(converter: &Converter, input_dir: &Path, output_dir: Option<&Path>) {
    let start = Instant::now();
    let report = batch::convert_directory(converter, input_dir, output_dir).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to convert directory '{}': {}",
            input_dir.display(),
            e
        ))
    });
    println!("\n{}", report);
    println!("Finished in {:?}", start.elapsed());
    if report.failed().next().is_some() {
        std::process::exit(2);
    }
}

fn run_normalize(text: &str) {
    match normalize_webhook(text) {
        Some(action) => println!("{}", action.identifier),
        None => exit_with_error("Webhook description is empty"),
    }
}

fn run_resolve(document_path: &Path, tag: &str, aliases: &[String]) {
    let document = Document::from_file(document_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to load document '{}': {}",
            document_path.display(),
            e
        ))
    });

    let mut builder = Dispatcher::builder();
    for webhook in &document.webhooks {
        let description = webhook.description.clone();
        builder = builder.with_handler(Box::new(handler_fn(&webhook.tag, move |_| {
            Ok(WebhookResponse::text(description.clone()))
        })));
    }
    for alias in aliases {
        let (keywords, identifier) = alias.split_once('=').unwrap_or_else(|| {
            exit_with_error(&format!(
                "Alias '{}' must look like `keyword,keyword=identifier`",
                alias
            ))
        });
        let keywords: Vec<&str> = keywords.split(',').map(str::trim).collect();
        builder = builder.with_alias(&keywords, identifier.trim());
    }
    let dispatcher = builder.build();

    match dispatcher.resolve(tag) {
        Some(identifier) => println!("'{}' -> {}", tag, identifier),
        None => {
            println!("'{}' -> no handler (default reply would be sent)", tag);
            std::process::exit(2);
        }
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
