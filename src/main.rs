use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use movierec_client::{
    logging, services::HttpRecommendationClient, App, Config, Event,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing();

    let config = Config::from_env()?;
    let client = HttpRecommendationClient::new(&config)?;
    tracing::info!(api_url = %client.api_url(), "Starting movie recommendation client");

    let (app, events) = App::new(Arc::new(client), &config);

    // Feed stdin lines into the event loop; EOF quits
    let input = app.sender();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match Event::from_line(&line) {
                Some(event) => {
                    if input.send(event).is_err() {
                        break;
                    }
                }
                None => eprintln!("Commands: :focus, :select <n>, :reset, :quit"),
            }
        }
        let _ = input.send(Event::Quit);
    });

    app.run(events, |frame| {
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{}", frame);
        let _ = stdout.flush();
    })
    .await;

    Ok(())
}
