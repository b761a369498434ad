use termdesk::app::{self, notepad::NotepadApp};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    app::startup("notepad")?;
    app::run::<NotepadApp>().await
}
