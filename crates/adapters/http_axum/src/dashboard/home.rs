//! Dashboard home page: tiles, connection badge and transcript.

use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};

use homedash_app::ports::CommandPublisher;
use homedash_domain::board::TargetView;
use homedash_domain::chat::{ChatMessage, ChatSender};
use homedash_domain::time::clock_label;

use crate::state::AppState;

/// Transcript lines shown on the page.
const CHAT_LINES: usize = 50;

/// One transcript line, pre-formatted for the template.
pub struct ChatLine {
    pub sender: String,
    pub css_class: &'static str,
    pub time: String,
    pub text: String,
}

impl From<ChatMessage> for ChatLine {
    fn from(message: ChatMessage) -> Self {
        let css_class = match message.sender {
            ChatSender::User => "user",
            ChatSender::Bot => "bot",
            ChatSender::Sensor => "sensor",
            ChatSender::System => "system",
        };
        Self {
            sender: message.sender.to_string(),
            css_class,
            time: clock_label(&message.at),
            text: message.text,
        }
    }
}

/// Home page template.
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    refresh_seconds: u32,
    connection: String,
    connected: bool,
    active_count: usize,
    targets: Vec<TargetView>,
    chat: Vec<ChatLine>,
}

impl IntoResponse for HomeTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// `GET /`: status overview.
pub async fn index<P>(State(state): State<AppState<P>>) -> HomeTemplate
where
    P: CommandPublisher + Send + Sync + 'static,
{
    let connection = state.dashboard.connection();

    HomeTemplate {
        refresh_seconds: state.refresh_seconds,
        connected: connection.is_connected(),
        connection: connection.to_string(),
        active_count: state.dashboard.active_count(),
        targets: state.dashboard.targets(),
        chat: state
            .dashboard
            .chat(CHAT_LINES)
            .into_iter()
            .map(ChatLine::from)
            .collect(),
    }
}
