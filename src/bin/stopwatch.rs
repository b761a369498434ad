use termdesk::app::{self, stopwatch::Stopwatch};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    app::startup("stopwatch")?;
    app::run::<Stopwatch>().await
}
