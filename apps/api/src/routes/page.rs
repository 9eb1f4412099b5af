use axum::response::Html;

/// GET /
/// Serves the single browser page. All behavior lives in the JSON routes;
/// the page is pure view logic reacting to session state.
pub async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}
