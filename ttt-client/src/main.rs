use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use protocol::TrainingCorpus;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ttt_ai::llm::OllamaClient;
use ttt_ai::{AiPlayer, TrainingRetriever};
use ttt_client::game::{parse_line, InputCommand, HELP_TEXT};
use ttt_client::render::render_screen;
use ttt_client::{ColorTheme, GameSession, GameSettings, SessionControl, StorageManager};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so the board on stdout stays readable
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ttt_client=info".parse()?)
                .add_directive("ttt_ai=info".parse()?),
        )
        .init();

    info!("Tic-tac-toe starting");

    let storage = StorageManager::new();
    let settings = storage.load_settings();
    let scores = storage.load_scores();
    let ai = build_ai(&settings).await;

    let mut session = GameSession::new(ai, settings, scores, storage);
    let mut commentary = session.subscribe_commentary();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}\n", HELP_TEXT);
    draw(&session)?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };

                match parse_line(&line) {
                    Ok(InputCommand::Intent(intent)) => {
                        if session.handle_intent(intent).await == SessionControl::Quit {
                            break;
                        }
                    }
                    Ok(InputCommand::Help) => println!("{}", HELP_TEXT),
                    Err(e) => println!("{}", e),
                }
                let _ = commentary.borrow_and_update();
                draw(&session)?;
            }
            changed = commentary.changed() => {
                if changed.is_err() {
                    continue;
                }
                let text = commentary.borrow_and_update().text.clone();
                if let Some(text) = text {
                    let theme = ColorTheme::for_mode(session.settings().dark_mode);
                    print!("\r{}\n> ", theme.paint(&format!("AI: {}", text), theme.commentary));
                    std::io::stdout().flush()?;
                }
            }
        }
    }

    info!("Goodbye");
    Ok(())
}

/// Wire the remote tiers to the configured service
async fn build_ai(settings: &GameSettings) -> AiPlayer {
    let config = settings.ollama_config();
    let client = match OllamaClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            warn!("Reasoning service client unavailable: {:#}. Hard and Trained will play like Medium", e);
            return AiPlayer::offline();
        }
    };

    if let Err(e) = client.health_check().await {
        warn!("Reasoning service not reachable: {:#}. Hard and Trained will fall back to the heuristic", e);
    }

    let retriever = TrainingRetriever::builtin().unwrap_or_else(|e| {
        warn!("Training corpus rejected: {}. Trained runs without examples", e);
        TrainingRetriever::new(Arc::new(TrainingCorpus::empty()))
    });
    info!("Training corpus: {} games", retriever.corpus().len());

    AiPlayer::with_generator(Arc::new(client), retriever, &settings.ai_config())
}

fn draw(session: &GameSession) -> Result<()> {
    let theme = ColorTheme::for_mode(session.settings().dark_mode);
    let commentary = session.commentary();
    let screen = render_screen(session.game(), session.scores(), &theme, commentary.as_deref());

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "\n{}\n", screen)?;
    write!(stdout, "> ")?;
    stdout.flush()?;
    Ok(())
}
