use news_search::command::{self, Command};
use news_search::config::{ClientConfig, OutputFormat};
use news_search::{render, Action, NewsClient, SearchPipeline, Store, View};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout only carries rendered results
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env()?;
    info!("Starting news search client");
    info!("News API URL: {}", config.api_url);

    let client = NewsClient::from_config(&config)?;
    let store = Store::default();

    println!("News");
    println!(
        "keyword: {}  language: {}  sort: {}",
        store.query().keyword,
        store.query().language,
        store.query().sort_by
    );
    println!("{}\n", command::HELP);

    let (tx, rx) = mpsc::channel::<Action>(64);
    tokio::spawn(read_commands(tx));

    let output = config.output;
    SearchPipeline::new(store, client)
        .run(rx, move |view| print_view(view, output))
        .await;

    Ok(())
}

/// Feed stdin lines to the pipeline until `:quit` or end of input.
async fn read_commands(tx: mpsc::Sender<Action>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to read input: {}", e);
                break;
            }
        };
        match command::parse(&line) {
            Ok(Command::Dispatch(action)) => {
                if tx.send(action).await.is_err() {
                    break;
                }
            }
            Ok(Command::ListLanguages) => println!("{}", command::language_list()),
            Ok(Command::ListSortModes) => println!("{}", command::sort_mode_list()),
            Ok(Command::Help) => println!("{}", command::HELP),
            Ok(Command::Quit) => break,
            Err(e) => eprintln!("{}", e),
        }
    }
}

fn print_view(view: &View, output: OutputFormat) {
    let rendered = match output {
        OutputFormat::Text => render::text(view),
        OutputFormat::Html => render::html(view),
    };
    if !rendered.is_empty() {
        println!("{}", rendered);
    }
}
