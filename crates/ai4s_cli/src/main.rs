use std::path::{Path, PathBuf};

use ai4s_client::{ArticleClient, ArticleExports, ClientConfig, CopyAcknowledgement};
use ai4s_core::GeneratedArticle;
use ai4s_markup::{write_export, ExportFormat};
use ai4s_storage::{create_store, StoreConfig};
use ai4s_web::ServiceConfig;
use clap::{Args, Parser, Subcommand};
use tracing::info;

mod logging;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate blog articles and export them as HTML or Markdown", long_about = None)]
struct Cli {
    /// Environment file loaded before reading configuration
    #[arg(long, env = "DOTENV_PATH", default_value = ".env", global = true)]
    dotenv: PathBuf,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the article generation service
    Serve {
        /// Overrides AI4S_BIND_ADDR
        #[arg(long)]
        bind: Option<String>,
    },
    /// Request an article from the service and export it
    Generate(GenerateArgs),
    /// Export an existing HTML fragment
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[arg(long)]
    topic: String,

    #[arg(long)]
    creator: String,

    /// Earlier writing by the same author, used as a style reference
    #[arg(long, conflicts_with = "previous_blog_file")]
    previous_blog: Option<String>,

    #[arg(long)]
    previous_blog_file: Option<PathBuf>,

    /// Write `<slug>.html` into this directory
    #[arg(long)]
    html_dir: Option<PathBuf>,

    /// Write `<slug>.md` into this directory
    #[arg(long)]
    markdown_dir: Option<PathBuf>,

    /// Print the HTML to stdout
    #[arg(long)]
    stdout: bool,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// HTML fragment to export
    #[arg(long)]
    input: PathBuf,

    /// Topic the file name is derived from
    #[arg(long)]
    topic: String,

    #[arg(long, default_value = "html")]
    format: ExportFormat,

    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.dotenv.exists() {
        dotenvy::from_path(&cli.dotenv)?;
    }
    logging::init_logging(cli.verbose);

    match cli.command {
        Commands::Serve { bind } => {
            let mut config = ServiceConfig::from_env()?;
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            ai4s_web::serve(config).await?;
        }
        Commands::Generate(args) => generate(args).await?,
        Commands::Export(args) => export(args)?,
    }

    Ok(())
}

async fn generate(args: GenerateArgs) -> anyhow::Result<()> {
    let previous_blog = match (&args.previous_blog, &args.previous_blog_file) {
        (Some(text), _) => Some(text.clone()),
        (None, Some(path)) => Some(std::fs::read_to_string(path)?),
        (None, None) => None,
    };

    let mut client = ArticleClient::new(ClientConfig::from_env()?)?;
    if let Some(store) = create_store(&StoreConfig::from_env()?)? {
        client = client.with_store(store);
    }

    info!("✍️ Generating article about {:?} by {}", args.topic, args.creator);
    let article = client
        .submit(&args.topic, &args.creator, previous_blog.as_deref())
        .await?;

    print_suggestions(&article, args.stdout);

    if args.stdout {
        let ack = CopyAcknowledgement::new();
        println!("{}", article.copy_html(&ack));
    }
    if let Some(dir) = &args.html_dir {
        report_export(&article.export_html(dir)?, ExportFormat::Html);
    }
    if let Some(dir) = &args.markdown_dir {
        report_export(&article.export_markdown(dir)?, ExportFormat::Markdown);
    }

    Ok(())
}

fn export(args: ExportArgs) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&args.input)?;
    let path = write_export(&args.out_dir, &args.topic, &content, args.format)?;
    report_export(&path, args.format);
    Ok(())
}

/// Suggested topics go to stderr when stdout carries the article.
fn print_suggestions(article: &GeneratedArticle, article_on_stdout: bool) {
    let topics = article.suggested_topics();
    if topics.is_empty() {
        return;
    }
    let listing = topics
        .iter()
        .enumerate()
        .map(|(i, topic)| format!("  {}. {topic}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    if article_on_stdout {
        eprintln!("Suggested topics:\n{listing}");
    } else {
        println!("Suggested topics:\n{listing}");
    }
}

fn report_export(path: &Path, format: ExportFormat) {
    info!("💾 Exported {} ({})", path.display(), format.mime_type());
}
