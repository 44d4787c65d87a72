mod engine;
mod model;
mod ui;

use eframe::egui;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::engine::llm_client::GroqClient;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Build the client before the window opens so a missing GROQ_API_KEY
    // surfaces immediately, with no network call attempted.
    let client = GroqClient::from_env();
    if let Err(err) = &client {
        error!(%err, "starting without a usable story client");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Fantasy Adventure Quest",
        options,
        Box::new(|_cc| Ok(Box::new(ui::app::AdventureApp::new(client)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start the UI: {e}"))
}
