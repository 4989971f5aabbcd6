//! HTTP helpers.
//!
//! Wraps `fetch` for the only network traffic the page makes: the optional,
//! read-only GitHub statistics.

use anyhow::{Result, anyhow};
use folio_types::{GitHubRepo, GitHubUser};
use folio_view::stats::{self, PortfolioStats};
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

/// GET a URL and return the body. Non-2xx responses are errors.
pub async fn fetch_text(url: &str, accept: Option<&str>) -> Result<String> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    if let Some(accept) = accept {
        let headers = Headers::new().map_err(|e| anyhow!("{:?}", e))?;
        headers
            .set("Accept", accept)
            .map_err(|e| anyhow!("{:?}", e))?;
        opts.set_headers(&headers);
    }

    let request = Request::new_with_str_and_init(url, &opts).map_err(|e| anyhow!("{:?}", e))?;

    let window = gloo_utils::window();
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| anyhow!("fetch error: {:?}", e))?;

    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| anyhow!("response is not a Response"))?;

    if !resp.ok() {
        return Err(anyhow!("{} {} for {}", resp.status(), resp.status_text(), url));
    }

    let text = JsFuture::from(resp.text().map_err(|e| anyhow!("{:?}", e))?)
        .await
        .map_err(|e| anyhow!("text error: {:?}", e))?;

    Ok(text.as_string().unwrap_or_default())
}

pub async fn fetch_json<T: DeserializeOwned>(url: &str, accept: Option<&str>) -> Result<T> {
    let text = fetch_text(url, accept).await?;
    serde_json::from_str(&text).map_err(|e| anyhow!("JSON parse error for {}: {}", url, e))
}

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Fetch profile and repositories once. Any failure yields the placeholder.
pub async fn load_stats(user: &str) -> PortfolioStats {
    let fetched: Result<PortfolioStats> = async {
        let profile: GitHubUser = fetch_json(&stats::user_url(user), Some(GITHUB_ACCEPT)).await?;
        let repos: Vec<GitHubRepo> =
            fetch_json(&stats::repos_url(user), Some(GITHUB_ACCEPT)).await?;
        Ok(PortfolioStats::from_github(&profile, &repos))
    }
    .await;

    match fetched {
        Ok(stats) => {
            info!(user, repos = stats.repos, stars = stats.stars, "loaded GitHub stats");
            stats
        }
        Err(err) => {
            warn!(user, error = %err, "GitHub stats unavailable, showing placeholders");
            PortfolioStats::placeholder()
        }
    }
}
