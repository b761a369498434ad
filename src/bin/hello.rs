use termdesk::app::{self, hello::Hello};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    app::startup("hello")?;
    app::run::<Hello>().await
}
