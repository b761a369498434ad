use termdesk::app::{self, countdown::Countdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    app::startup("countdown")?;
    app::run::<Countdown>().await
}
