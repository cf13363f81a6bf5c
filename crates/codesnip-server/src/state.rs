use codesnip_storage::repository::SnippetRepository;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub snippets: SnippetRepository,
}

impl AppState {
    pub fn new(snippets: SnippetRepository) -> Self {
        Self { snippets }
    }
}
