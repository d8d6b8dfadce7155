use axum::{body::Body, response::Response};
use scraper::{Html, Selector};

async fn body_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not get response body");

    String::from_utf8_lossy(&body).to_string()
}

pub(crate) async fn parse_html_document(response: Response<Body>) -> Html {
    Html::parse_document(&body_text(response).await)
}

pub(crate) async fn parse_html_fragment(response: Response<Body>) -> Html {
    Html::parse_fragment(&body_text(response).await)
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}

/// The kind and message of every toast in `html`, in document order.
pub(crate) fn select_toasts(html: &Html) -> Vec<(String, String)> {
    let message_selector = Selector::parse("p").unwrap();

    html.select(&Selector::parse("[data-toast]").unwrap())
        .map(|toast| {
            let kind = toast.value().attr("data-toast").unwrap_or_default();
            let message = toast
                .select(&message_selector)
                .next()
                .map(|p| p.text().collect::<String>())
                .unwrap_or_default();

            (kind.to_owned(), message.trim().to_owned())
        })
        .collect()
}
