use anyhow::Result;
use chatrelay::debug_print;
use chatrelay::{
    api::WebhookClient,
    app::{App, AppState},
    chat::ChatService,
    chat_view::draw_chat,
    config,
    conversation::ConversationStore,
    key_handlers::{handle_chat_input, handle_quit_confirm_input},
    models::Message,
};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use std::{io, sync::Arc, time::Duration};
use tokio::sync::mpsc::{self, UnboundedReceiver};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    config::initialize_config()?;

    let cfg = config::get_config();
    env_logger::Builder::new()
        .parse_filters(&cfg.log_level)
        .init();

    debug_print!("chatrelay starting against {}", cfg.webhook_url);

    // One conversation for the whole app, handed to whoever needs it.
    let conversation = ConversationStore::shared();

    // The UI mirrors the store through a subscribed observer that forwards
    // each snapshot over a channel drained by the event loop.
    let (snapshot_tx, snapshot_rx) = mpsc::unbounded_channel::<Vec<Message>>();
    conversation.lock().await.subscribe(move |messages| {
        let _ = snapshot_tx.send(messages.to_vec());
    });

    let service = Arc::new(ChatService::new(
        conversation.clone(),
        WebhookClient::from_config(),
    ));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let res = run_app(&mut terminal, &mut app, &service, snapshot_rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    service: &Arc<ChatService>,
    mut snapshot_rx: UnboundedReceiver<Vec<Message>>,
) -> Result<()> {
    loop {
        while let Ok(messages) = snapshot_rx.try_recv() {
            app.apply_snapshot(messages);
        }
        app.status_indicator.set_busy(service.is_busy());

        terminal.draw(|f| draw_chat(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                match app.state {
                    AppState::Chat => handle_chat_input(key, app, service),
                    AppState::QuitConfirm => handle_quit_confirm_input(key, app),
                    AppState::Quit => {}
                }
            }
        }

        if app.state == AppState::Quit {
            return Ok(());
        }
    }
}
