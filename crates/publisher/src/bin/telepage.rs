// ABOUTME: CLI binary for publishing HTML to Telegraph.
// ABOUTME: Reads HTML from a file or stdin and publishes it, or prints the page plan with --dry-run.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{LevelFilter, Metadata, Record};
use serde_json::json;
use telepage_publisher::{
    content_format, nodes_to_html, partition, Client, Element, Node, DEFAULT_API_URL,
    MAX_CONTENT_LIMIT, NEXT_PAGE_LABEL,
};

const TOKEN_ENV: &str = "TELEGRAPH_ACCESS_TOKEN";

#[derive(Parser, Debug)]
#[command(name = "telepage")]
#[command(about = "Publish HTML to Telegraph, splitting long articles into linked pages")]
struct Args {
    /// HTML file to publish; "-" or nothing reads stdin
    #[arg()]
    input: Option<PathBuf>,

    /// Page title
    #[arg(short = 't', long = "title", default_value = "")]
    title: String,

    /// Access token (default: $TELEGRAPH_ACCESS_TOKEN)
    #[arg(long = "token")]
    token: Option<String>,

    /// Author name shown under the title
    #[arg(long = "author-name")]
    author_name: Option<String>,

    /// Author profile link
    #[arg(long = "author-url")]
    author_url: Option<String>,

    /// Telegraph API base URL
    #[arg(long = "api-url", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Maximum content bytes per page
    #[arg(long = "limit", default_value_t = MAX_CONTENT_LIMIT)]
    limit: usize,

    /// HTML appended to every page instead of the default footer
    #[arg(long = "footer-html")]
    footer_html: Option<String>,

    /// Label of the link to the next page
    #[arg(long = "next-label", default_value = NEXT_PAGE_LABEL)]
    next_label: String,

    /// Publish as one page without splitting
    #[arg(long = "single")]
    single: bool,

    /// Print the page plan as JSON instead of publishing
    #[arg(long = "dry-run")]
    dry_run: bool,

    /// Request timeout in seconds
    #[arg(long = "timeout", default_value_t = 30)]
    timeout: u64,

    /// Log each page as it is published
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Print elapsed time in ms to stderr
    #[arg(long = "timing")]
    timing: bool,
}

/// Writes log records to stderr.
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbose: bool) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(if verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        });
    }
}

fn read_input(input: Option<&PathBuf>) -> io::Result<Vec<u8>> {
    match input {
        Some(path) if path.as_os_str() != "-" => fs::read(path),
        _ => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

/// A single footer node from user HTML; several top-level nodes are grouped
/// in an aside.
fn footer_from_html(html: &str) -> Result<Node, telepage_publisher::Error> {
    let mut nodes = content_format(html)?;
    if nodes.len() == 1 {
        return Ok(nodes.remove(0));
    }
    let mut aside = Element::new("aside");
    aside.children = nodes;
    Ok(aside.into())
}

fn dry_run(document: &[Node], limit: usize) -> Result<String, telepage_publisher::Error> {
    let partitions = partition(document, limit)?;
    let mut pages = Vec::with_capacity(partitions.len());
    for part in &partitions {
        pages.push(json!({
            "index": part.index,
            "nodes": part.nodes.len(),
            "bytes": part.approximate_size()?,
            "html": nodes_to_html(part.nodes),
        }));
    }
    let plan = json!({ "limit": limit, "pages": pages });
    serde_json::to_string_pretty(&plan)
        .map_err(|e| telepage_publisher::Error::serialization("dry_run", Some(e.into())))
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let start = Instant::now();
    let code = run(&args).await;

    if args.timing {
        let _ = writeln!(io::stderr(), "elapsed: {}ms", start.elapsed().as_millis());
    }

    code
}

async fn run(args: &Args) -> ExitCode {
    let raw = match read_input(args.input.as_ref()) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("error reading input: {}", e);
            return ExitCode::from(1);
        }
    };

    let document = match content_format(raw) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("error converting HTML: {}", e);
            return ExitCode::from(1);
        }
    };

    if args.dry_run {
        return match dry_run(&document, args.limit) {
            Ok(plan) => {
                println!("{}", plan);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: {}", e);
                ExitCode::from(1)
            }
        };
    }

    let token = args
        .token
        .clone()
        .or_else(|| std::env::var(TOKEN_ENV).ok())
        .unwrap_or_default();

    let mut builder = Client::builder()
        .api_url(&args.api_url)
        .access_token(token)
        .size_limit(args.limit)
        .next_label(&args.next_label)
        .timeout(Duration::from_secs(args.timeout))
        .debug(args.verbose);
    if let Some(name) = &args.author_name {
        builder = builder.author_name(name);
    }
    if let Some(url) = &args.author_url {
        builder = builder.author_url(url);
    }
    if let Some(html) = &args.footer_html {
        match footer_from_html(html) {
            Ok(footer) => builder = builder.footer(footer),
            Err(e) => {
                eprintln!("error converting footer: {}", e);
                return ExitCode::from(1);
            }
        }
    }

    let client = match builder.build() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(1);
        }
    };

    let meta = client.page_meta(&args.title);
    let result = if args.single {
        client.create_single_document(document, &meta).await
    } else {
        client.publish_document(&document, &meta).await
    };

    match result {
        Ok(url) => {
            println!("{}", url);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error publishing: {}", e);
            ExitCode::from(1)
        }
    }
}
