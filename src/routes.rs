use std::sync::Arc;

use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::client::{FeedClient, FeedController, FeedState};
use crate::feed::{self, FeedPayload, NewsItem};

pub struct AppState {
    pub client: FeedClient,
    pub site_title: String,
}

// Template structs
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub site_title: String,
    pub feed: FeedView,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub site_title: String,
    pub message: String,
}

#[derive(Template)]
#[template(path = "loading.html")]
pub struct LoadingTemplate {
    pub site_title: String,
}

/// Display model built from a ready payload. Construction is a pure mapping:
/// no side effects, and the same payload always yields the same view.
pub struct FeedView {
    pub last_updated: Option<String>,
    /// Empty means the trending section is omitted entirely, never rendered
    /// as an empty container.
    pub trending_topics: Vec<String>,
    /// None: no list at all. Some but empty: explicit placeholder.
    pub items: Option<Vec<CardView>>,
}

pub struct CardView {
    pub id: String,
    pub category: String,
    pub tag_class: &'static str,
    pub rating: Option<String>,
    pub headline: String,
    pub summary: String,
    pub source_name: Option<String>,
    pub published: Option<String>,
}

impl FeedView {
    pub fn from_payload(payload: &FeedPayload) -> Self {
        Self {
            last_updated: payload.last_updated.as_deref().map(feed::format_date_time),
            trending_topics: payload.trending_topics.clone().unwrap_or_default(),
            items: payload
                .news_items
                .as_ref()
                .map(|items| items.iter().map(CardView::from_item).collect()),
        }
    }
}

impl CardView {
    fn from_item(item: &NewsItem) -> Self {
        let units = feed::rating_units(item.relevance_score);
        Self {
            id: item.id.to_string(),
            category: item.category.clone(),
            tag_class: feed::category_tag(&item.category),
            rating: (units > 0).then(|| "★".repeat(units)),
            headline: item.headline.clone(),
            summary: item.summary.clone(),
            source_name: item.source_name.clone(),
            published: item.published_date.as_deref().map(feed::format_date),
        }
    }
}

// Wrapper for HTML responses
struct HtmlTemplate<T>(T);

impl<T: Template> IntoResponse for HtmlTemplate<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {}", err),
            )
                .into_response(),
        }
    }
}

// Route handlers

/// The page mount: one controller, one fetch, then render whichever state
/// the controller settled into.
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    let mut controller = FeedController::new();
    controller.load(&state.client).await;

    match controller.state() {
        FeedState::Ready { payload } => HtmlTemplate(IndexTemplate {
            site_title: state.site_title.clone(),
            feed: FeedView::from_payload(payload),
        })
        .into_response(),
        FeedState::Failed { message } => HtmlTemplate(ErrorTemplate {
            site_title: state.site_title.clone(),
            message: message.clone(),
        })
        .into_response(),
        // Not reachable after load(); a not-yet-settled controller renders
        // as the loading indicator.
        FeedState::Pending => HtmlTemplate(LoadingTemplate {
            site_title: state.site_title.clone(),
        })
        .into_response(),
    }
}

pub async fn health() -> impl IntoResponse {
    Html("OK")
}
