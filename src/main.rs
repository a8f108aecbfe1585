use quizzer::app::App;
use quizzer::config::{Interface, QuizConfig};
use quizzer::error::user_friendly_message;
use quizzer::logging::{init_logging, LogConfig};
use quizzer::simple::run_plain;
use quizzer::Result;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}", user_friendly_message(&e));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = QuizConfig::load()?;

    // The quiz still runs when the log file is unavailable
    match LogConfig::from_quiz_config(&config).and_then(|log| init_logging(&log)) {
        Ok(()) => tracing::info!(interface = ?config.interface, "Quizzer starting"),
        Err(e) => eprintln!("Logging disabled: {}", e),
    }

    // First run leaves an editable config file behind
    if !QuizConfig::config_file_path()?.exists() {
        if let Err(e) = config.save() {
            tracing::warn!(error = %e, "Failed to write default config");
        }
    }

    match config.interface {
        Interface::Tui => {
            let mut app = App::new(&config)?;
            app.init()?;
            app.run()
        }
        Interface::Plain => run_plain(&config).await,
    }
}
