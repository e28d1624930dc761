//! Shared fixtures for integration tests.
//!
//! Upstream file servers are simulated with wiremock; timestamps are
//! generated relative to the wall clock because the running server polls
//! with `Utc::now()`.

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path of the directory listing on the mock server.
pub const LISTING_PATH: &str = "/players/";

/// Listing URL for a mock server.
pub fn base_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), LISTING_PATH)
}

/// Format a time as an HTTP-date.
pub fn http_date(t: DateTime<Utc>) -> String {
    t.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// IIS-style listing with a parent link followed by `names`.
pub fn iis_listing(names: &[&str]) -> String {
    let mut html = String::from(
        "<html><body><H1>files - /players/</H1><hr>\n<pre><A HREF=\"/\">[To Parent Directory]</A><br><br>",
    );
    for name in names {
        html.push_str(&format!(
            " 4/10/2024  9:12 AM        &lt;dir&gt; <A HREF=\"/players/{0}/\">{0}/</A><br>\n",
            name
        ));
    }
    html.push_str("</pre><hr></body></html>");
    html
}

/// Serve `html` as the listing.
pub async fn mount_listing(server: &MockServer, html: String) {
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(server)
        .await;
}

/// Answer HEAD on `name`'s thumbnail with a `Last-Modified` of `age` ago.
pub async fn mount_thumbnail(server: &MockServer, name: &str, age: Duration) {
    Mock::given(method("HEAD"))
        .and(path(format!("{}{}/thumbnail.jpg", LISTING_PATH, name)))
        .respond_with(
            ResponseTemplate::new(200).insert_header("Last-Modified", http_date(Utc::now() - age).as_str()),
        )
        .mount(server)
        .await;
}

/// Answer HEAD on `name`'s thumbnail with a bare status.
pub async fn mount_thumbnail_status(server: &MockServer, name: &str, status: u16) {
    Mock::given(method("HEAD"))
        .and(path(format!("{}{}/thumbnail.jpg", LISTING_PATH, name)))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}
