//! Vitrine - Command line driver
//!
//! Loads a serialized document, fetches records for the showcase anchored
//! at the given node and prints the rendered page to stdout.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;
use vitrine_engine::{
    load_pages, render_page, EditorMode, HttpTransport, ListSource, Registry, Showcase, ShowcaseConfig, TemplateDocument,
    Viewport,
};

const USAGE: &str = "Usage: vitrine <document.json> <anchor-id> [--endpoint URL] [--limit N] [--list-path P] \
[--pages N] [--viewport desktop|tablet|mobile] [--authoring]";

#[derive(Debug, PartialEq)]
struct Args {
    document: PathBuf,
    anchor: String,
    endpoint: Option<String>,
    limit: Option<usize>,
    list_path: Option<String>,
    pages: usize,
    viewport: Viewport,
    mode: EditorMode,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut positional = Vec::new();
        let mut endpoint = None;
        let mut limit = None;
        let mut list_path = None;
        let mut pages = 1;
        let mut viewport = Viewport::Desktop;
        let mut mode = EditorMode::Live;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let mut value = |flag: &str| args.next().with_context(|| format!("{flag} needs a value"));
            match arg.as_str() {
                "--endpoint" => endpoint = Some(value("--endpoint")?),
                "--limit" => limit = Some(value("--limit")?.parse().context("--limit must be a number")?),
                "--list-path" => list_path = Some(value("--list-path")?),
                "--pages" => pages = value("--pages")?.parse().context("--pages must be a number")?,
                "--viewport" => viewport = value("--viewport")?.parse()?,
                "--authoring" => mode = EditorMode::Authoring,
                "-h" | "--help" => bail!("{USAGE}"),
                flag if flag.starts_with("--") => bail!("Unknown option {flag}\n{USAGE}"),
                other => positional.push(other.to_string()),
            }
        }

        let [document, anchor]: [String; 2] = positional.try_into().map_err(|_| anyhow::anyhow!("{USAGE}"))?;
        Ok(Self {
            document: document.into(),
            anchor,
            endpoint,
            limit,
            list_path,
            pages: pages.max(1),
            viewport,
            mode,
        })
    }
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the page
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse(std::env::args().skip(1))?;
    tracing::info!(version = vitrine_engine::VERSION, document = %args.document.display(), "starting");

    let text = std::fs::read_to_string(&args.document)
        .with_context(|| format!("reading {}", args.document.display()))?;
    let document = TemplateDocument::from_json(&text).with_context(|| format!("parsing {}", args.document.display()))?;
    let anchor = document
        .get(&args.anchor)
        .with_context(|| format!("no node '{}' in {}", args.anchor, args.document.display()))?;

    let mut config = ShowcaseConfig::from_node(anchor);
    if let Some(endpoint) = args.endpoint {
        config.source.endpoint = endpoint;
    }
    if let Some(limit) = args.limit {
        config.source.limit = limit;
    }
    if let Some(path) = args.list_path {
        config.source.list_path = Some(path);
    }
    if args.pages > 1 {
        config.source.infinite_scroll = true;
    }

    let registry = Registry::with_builtins();
    let showcase = Showcase::new(&document, &registry, args.anchor.as_str(), config);

    let transport = HttpTransport::new().context("building HTTP client")?;
    let source = ListSource::new(transport, showcase.config().source.clone());
    smol::block_on(load_pages(&source, args.pages, args.mode));

    let grid = showcase.render(&source.state(), args.mode);
    println!("{}", render_page(&showcase, grid, args.viewport));
    Ok(())
}
