use anyhow::{Context, Result, anyhow};

use crate::models::{Analytics, Job};

// Seam between the UI and the network so the fetch worker (and tests) can
// swap in a stub source.
pub trait JobsApi: Send + 'static {
    fn fetch_jobs(&self, company_id: i64) -> Result<Vec<Job>>;
    fn fetch_analytics(&self, job_id: i64) -> Result<Analytics>;
}

pub struct ApiClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            client: reqwest::blocking::Client::new(),
        }
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to send request to {url}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();
            return Err(anyhow!("Request to {url} failed with status {status}: {error_text}"));
        }

        response
            .json()
            .with_context(|| format!("Failed to parse response from {url}"))
    }
}

impl JobsApi for ApiClient {
    fn fetch_jobs(&self, company_id: i64) -> Result<Vec<Job>> {
        let url = format!("{}/api/jobs?company_id={}", self.base_url, company_id);
        self.get_json(&url)
    }

    fn fetch_analytics(&self, job_id: i64) -> Result<Analytics> {
        let url = format!("{}/api/jobs/{}/analytics", self.base_url, job_id);
        self.get_json(&url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = ApiClient::new("http://localhost:5000/");
        assert_eq!(client.base_url, "http://localhost:5000");

        let client = ApiClient::new("http://localhost:5000");
        assert_eq!(client.base_url, "http://localhost:5000");
    }
}
