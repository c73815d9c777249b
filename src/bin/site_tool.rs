use anyhow::{bail, Context};
use clap::{ArgGroup, Parser};
use football_site::adapters::{load_site, to_model_string, LocalStorage};
use football_site::domain::{Site, Storage};
use football_site::rules::RuleSet;
use football_site::site::{compile, write_pages};
use football_site::utils::logger;
use std::path::{Path, PathBuf};

/// Validate fixture documents and compile them into site pages.
///
/// `--model` is the production mode: one document, any rule violation
/// aborts. `--models` and `--models-dir` are dev modes: invalid documents
/// are reported and skipped.
#[derive(Parser, Debug)]
#[command(name = "site-tool")]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["model", "models", "models_dir"])
))]
struct Args {
    /// Single JSON document (fail on any diagnostic)
    #[arg(long)]
    model: Option<PathBuf>,

    /// One or more JSON documents (warn and skip invalid ones)
    #[arg(long, num_args = 1..)]
    models: Vec<PathBuf>,

    /// Directory whose *.json documents are compiled (warn and skip)
    #[arg(long)]
    models_dir: Option<PathBuf>,

    /// Directory the page data models are written to
    #[arg(long)]
    output: PathBuf,

    /// Also write the document as a .fb model next to the pages
    #[arg(long)]
    emit_fb: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let output = LocalStorage::new(args.output.to_string_lossy());
    let rules = RuleSet::standard();

    if let Some(model) = &args.model {
        tracing::info!("🏭 Production mode: {}", model.display());
        let site = read_document(model).await?;
        let diagnostics = rules.evaluate(&site);
        if !diagnostics.is_empty() {
            for d in &diagnostics {
                eprintln!("{}", d);
            }
            bail!(
                "{} rule violation(s) in {}, aborting",
                diagnostics.len(),
                model.display()
            );
        }
        generate(&site, &output, args.emit_fb).await?;
    } else {
        let paths = match &args.models_dir {
            Some(dir) => list_documents(dir)?,
            None => args.models.clone(),
        };
        tracing::info!("🛠️ Dev mode: {} document(s)", paths.len());

        let mut generated = 0;
        for path in &paths {
            let site = match read_document(path).await {
                Ok(site) => site,
                Err(e) => {
                    tracing::warn!("⚠️ Skipping {}: {:#}", path.display(), e);
                    continue;
                }
            };
            let diagnostics = rules.evaluate(&site);
            if !diagnostics.is_empty() {
                for d in &diagnostics {
                    tracing::warn!("{}", d);
                }
                tracing::warn!(
                    "⚠️ {} rule violation(s) in {}, skipping",
                    diagnostics.len(),
                    path.display()
                );
                continue;
            }
            match generate(&site, &output, args.emit_fb).await {
                Ok(()) => generated += 1,
                Err(e) => tracing::warn!("⚠️ {}: {:#}", path.display(), e),
            }
        }
        tracing::info!("📊 Generated {}/{} document(s)", generated, paths.len());
    }

    println!("✅ Done. Output in: {}", args.output.display());
    Ok(())
}

async fn read_document(path: &Path) -> anyhow::Result<Site> {
    let storage = LocalStorage::new("");
    let site = load_site(&storage, &path.to_string_lossy())
        .await
        .with_context(|| format!("Failed to read document {}", path.display()))?;
    tracing::info!(
        "  Site '{}': {} countries, {} matches",
        site.name,
        site.countries.len(),
        site.total_matches()
    );
    Ok(site)
}

fn list_documents(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("--models-dir is not a directory: {}", dir.display());
    }
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("Cannot list {}", dir.display()))? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();
    if paths.is_empty() {
        tracing::warn!("No .json documents found in {}", dir.display());
    }
    Ok(paths)
}

async fn generate(site: &Site, output: &LocalStorage, emit_fb: bool) -> anyhow::Result<()> {
    let pages = compile(site);
    let report = write_pages(output, "", &pages).await;
    if !report.is_success() {
        bail!("Failed to write pages: {}", report.failures.join("; "));
    }
    tracing::info!("✅ Wrote {} page(s) for '{}'", report.written.len(), site.name);

    if emit_fb {
        let file = format!("{}.fb", site.name);
        output
            .write_file(&file, to_model_string(site).as_bytes())
            .await
            .with_context(|| format!("Failed to write {}", file))?;
        tracing::info!("✅ Wrote model {}", file);
    }
    Ok(())
}
