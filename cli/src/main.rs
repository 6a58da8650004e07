mod report;

use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use codespan_reporting::files::SimpleFiles;

use apidoc::Document;
use apidoc::diagnostic::{Diagnostic, Severity};
use scanner::doc_file::display_name;
use scanner::{DocFile, DocSet, Extraction};

use report::{Reporter, bold};

#[derive(Parser)]
#[command(name = "apidoc", version, about = "Checks Markdown API documentation")]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Show informational messages; repeat for debug logging
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract resources, methods and tables, reporting annotation problems
    CheckDocs(CheckArgs),

    /// Verify that relative links point at files inside the doc set
    CheckLinks(CheckArgs),

    /// Run both checks
    CheckAll(CheckArgs),

    /// List the definitions found in each page
    Print(PrintArgs),
}

#[derive(clap::Args)]
struct CheckArgs {
    /// Root directory of the doc set
    path: PathBuf,

    /// Report skipped external and bookmark links as warnings
    #[arg(short, long)]
    warnings: bool,
}

#[derive(clap::Args)]
struct PrintArgs {
    /// Root directory of the doc set
    path: PathBuf,

    /// Only list resources
    #[arg(long)]
    resources: bool,

    /// Only list methods
    #[arg(long)]
    methods: bool,
}

#[derive(Clone, Copy)]
struct Checks {
    docs: bool,
    links: bool,
}

fn main() {
    let Cli {
        no_color,
        verbose,
        command,
    } = Cli::parse();

    let level = match verbose {
        0 | 1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let exit_code = match command {
        Command::CheckDocs(args) => check(&args, Checks { docs: true, links: false }, no_color, verbose),
        Command::CheckLinks(args) => check(&args, Checks { docs: false, links: true }, no_color, verbose),
        Command::CheckAll(args) => check(&args, Checks { docs: true, links: true }, no_color, verbose),
        Command::Print(args) => print(&args, no_color),
    };
    process::exit(exit_code);
}

/// A page that was read and tokenized, or the diagnostic explaining why not.
fn load_page(
    docset: &DocSet,
    path: &Path,
    files: &mut SimpleFiles<String, String>,
) -> Result<(DocFile, Document), Diagnostic> {
    let name = display_name(path, docset.root());
    let page = DocFile::load(path, docset.root()).map_err(|err| {
        log::warn!("{}", err);
        err.to_diagnostic(&name)
    })?;

    let file_id = files.add(name.clone(), page.source.clone());
    let document = page.parse(file_id).map_err(|err| {
        log::warn!("{}", err);
        err.to_diagnostic(&name)
    })?;
    Ok((page, document))
}

fn open_docset(path: &Path, reporter: &mut Reporter) -> Option<(DocSet, Vec<PathBuf>)> {
    let files = SimpleFiles::new();
    let source = path.display().to_string();

    let docset = match DocSet::open(path) {
        Ok(docset) => docset,
        Err(err) => {
            reporter.fatal(&err.to_diagnostic(&source), &files);
            return None;
        }
    };
    match docset.files() {
        Ok(pages) => Some((docset, pages)),
        Err(err) => {
            reporter.fatal(&err.to_diagnostic(&source), &files);
            None
        }
    }
}

fn check(args: &CheckArgs, checks: Checks, no_color: bool, verbose: u8) -> i32 {
    let mut reporter = Reporter::new(no_color, verbose > 0);
    let Some((docset, pages)) = open_docset(&args.path, &mut reporter) else {
        return reporter.finish();
    };
    let include_warnings = args.warnings || docset.config().include_warnings;

    eprintln!("{}", bold(&docset.root().display().to_string(), no_color));

    let mut files = SimpleFiles::new();
    for path in &pages {
        let name = display_name(path, docset.root());
        let diagnostics = match load_page(&docset, path, &mut files) {
            Ok((page, document)) => {
                let mut diagnostics = Vec::new();
                if checks.docs {
                    diagnostics.extend(page.extract(&document).diagnostics);
                }
                if checks.links {
                    let links = page.validate_links(&document, docset.root(), include_warnings);
                    diagnostics.extend(links.diagnostics);
                }
                diagnostics
            }
            Err(diagnostic) => vec![diagnostic],
        };
        reporter.page(&name, &diagnostics, &files);
    }

    reporter.finish()
}

fn print(args: &PrintArgs, no_color: bool) -> i32 {
    let mut reporter = Reporter::new(no_color, false);
    let Some((docset, pages)) = open_docset(&args.path, &mut reporter) else {
        return reporter.finish();
    };
    let everything = !args.resources && !args.methods;

    let mut files = SimpleFiles::new();
    let mut failed = false;
    for path in &pages {
        let (page, document) = match load_page(&docset, path, &mut files) {
            Ok(loaded) => loaded,
            Err(diagnostic) => {
                reporter.emit(&diagnostic, &files);
                failed = true;
                continue;
            }
        };

        let extraction = page.extract(&document);
        for diagnostic in &extraction.diagnostics {
            if diagnostic.severity >= Severity::Warning {
                reporter.emit(diagnostic, &files);
            }
        }
        failed |= !extraction.is_ok();

        if extraction.definitions.is_empty() {
            continue;
        }
        println!("{}", bold(&page.display_name, no_color));
        if everything || args.resources {
            print_resources(&extraction);
        }
        if everything || args.methods {
            print_methods(&extraction);
        }
        if everything {
            print_examples(&extraction);
        }
    }

    if failed { 1 } else { 0 }
}

fn print_resources(extraction: &Extraction) {
    for resource in extraction.resources() {
        let key = resource
            .key_property
            .as_deref()
            .map(|k| format!(" key={}", k))
            .unwrap_or_default();
        println!(
            "  resource {}{} {}",
            resource.resource_type,
            key,
            resource.title.as_deref().unwrap_or("")
        );
    }
}

fn print_methods(extraction: &Extraction) {
    for method in extraction.methods() {
        let statuses: Vec<String> = method
            .expected_responses
            .iter()
            .map(|r| r.status_code.map_or_else(|| "?".to_string(), |c| c.to_string()))
            .collect();
        println!(
            "  method {}: {} {} -> [{}] ({} parameters, {} errors)",
            method.identifier,
            method.http_method.as_deref().unwrap_or("?"),
            method.request_url.as_deref().unwrap_or("?"),
            statuses.join(", "),
            method.parameters.len(),
            method.errors.len()
        );
    }
}

fn print_examples(extraction: &Extraction) {
    for example in extraction.examples() {
        println!(
            "  example {} ({})",
            example.title.as_deref().unwrap_or("(untitled)"),
            example.language.as_deref().unwrap_or("text")
        );
    }
}
