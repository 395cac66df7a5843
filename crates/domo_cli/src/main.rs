use clap::Parser;
use std::sync::Arc;
use tracing::info;

use domo_content::headings::extract_headings;
use domo_content::FsContentStore;
use domo_core::{CompletionModel, ContentStore, Error, Result};
use domo_inference::{ChatAssistant, Config, OpenRouterModel};
use domo_web::AppState;

const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the markdown article corpus
    #[arg(long, default_value = "content")]
    content_dir: String,
    /// Completion model identifier passed to the provider
    #[arg(long)]
    model: Option<String>,
    /// Public site URL sent as the HTTP-Referer header
    #[arg(long)]
    site_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        #[arg(long, default_value = "0.0.0.0:3000")]
        bind: String,
    },
    /// List the article corpus, newest first
    List,
    /// Show one article's front matter and heading outline
    Show { slug: String },
    /// Ask the assistant a single question
    Ask { message: String },
}

fn build_assistant(cli: &Cli, store: Arc<dyn ContentStore>) -> Result<ChatAssistant> {
    let api_key = std::env::var(API_KEY_ENV)
        .map_err(|_| Error::Configuration(format!("{} is not set", API_KEY_ENV)))?;

    let model = OpenRouterModel::new(Config {
        api_key,
        model: cli.model.clone(),
        site_url: cli.site_url.clone(),
    })?;
    info!("🧠 Completion model initialized (using {})", model.name());

    Ok(ChatAssistant::new(store, Arc::new(model)))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let store: Arc<dyn ContentStore> = Arc::new(FsContentStore::new(&cli.content_dir));
    let articles = store.load_all().await?;
    info!(
        "📚 Corpus loaded: {} articles from {}",
        articles.len(),
        cli.content_dir
    );

    match &cli.command {
        Commands::List => {
            for article in articles {
                println!(
                    "{}  {}  [{}] ({} min)",
                    article.date,
                    article.title,
                    article.slug,
                    article.reading_time
                );
            }
        }
        Commands::Show { slug } => {
            let article = store.load(slug).await?;
            println!("{}", article.title);
            println!("{} · {} min de lecture", article.date, article.reading_time);
            if let Some(author) = &article.author {
                println!("par {}", author);
            }
            println!("tags: {}", article.tags.join(", "));
            println!();
            println!("{}", article.excerpt);

            let headings = extract_headings(&article.content);
            if !headings.is_empty() {
                println!();
                println!("Table des matières:");
                for heading in headings {
                    let indent = if heading.level == 2 { "  " } else { "    " };
                    println!("{}- {}", indent, heading.text);
                }
            }
        }
        Commands::Ask { message } => {
            let assistant = build_assistant(&cli, store.clone())?;
            let reply = assistant.handle(message, &[]).await?;
            println!("{}", reply.response.trim());
            for article in reply.articles {
                println!("📄 {} [{}]", article.title, article.slug);
            }
        }
        Commands::Serve { bind } => {
            let assistant = build_assistant(&cli, store.clone())?;
            let state = AppState { store, assistant };
            domo_web::serve(bind, state).await?;
        }
    }

    Ok(())
}
