//! Server state shared by every handler.

use std::sync::Arc;

use crate::{domain::OnlineRegistry, usecase::MessageRouter};

/// Shared application state
pub struct AppState {
    /// MessageRouter（接続ごとのコマンド振り分け）
    pub router: Arc<MessageRouter>,
    /// OnlineRegistry（オンライン数の参照用）
    pub registry: Arc<dyn OnlineRegistry>,
}
