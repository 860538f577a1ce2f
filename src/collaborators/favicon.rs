use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, trace};
use url::Url;

use super::LogoUrlResolver;
use crate::config::FaviconConfig;
use crate::errors::{CollaboratorError, CollaboratorResult};

/// Host prefixes that name an endpoint rather than the brand
const SERVICE_HOST_PREFIXES: &[&str] = &["api.", "mcp.", "www.", "app."];

/// Favicon lookup over HTTPS.
///
/// Candidates are probed in order: the brand domain's own `/favicon.ico`, then
/// the configured favicon service. The first one answering 2xx with an image
/// content type wins.
pub struct HttpFaviconResolver {
    client: Client,
    enabled: bool,
    service_template: Option<String>,
}

impl HttpFaviconResolver {
    pub fn from_config(config: &FaviconConfig) -> CollaboratorResult<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            enabled: config.enabled,
            service_template: config.service_template.clone(),
        })
    }

    /// Brand domain for a service URL: `https://api.linear.app/v1` -> `linear.app`
    pub fn brand_domain(service_url: &str) -> CollaboratorResult<String> {
        let url = Url::parse(service_url).map_err(|e| CollaboratorError::InvalidUrl {
            url: service_url.to_string(),
            message: e.to_string(),
        })?;

        let host = url
            .host_str()
            .ok_or_else(|| CollaboratorError::InvalidUrl {
                url: service_url.to_string(),
                message: "URL has no host".to_string(),
            })?
            .to_ascii_lowercase();

        let mut domain = host.as_str();
        while let Some(stripped) = SERVICE_HOST_PREFIXES
            .iter()
            .find_map(move |prefix| domain.strip_prefix(prefix))
            .filter(|rest| rest.contains('.'))
        {
            domain = stripped;
        }

        Ok(domain.to_string())
    }

    pub fn candidate_urls(&self, domain: &str) -> Vec<String> {
        let mut candidates = vec![format!("https://{domain}/favicon.ico")];
        if let Some(template) = &self.service_template {
            candidates.push(template.replace("{domain}", domain));
        }
        candidates
    }

    async fn probe(&self, candidate: &str) -> CollaboratorResult<bool> {
        let response = self.client.get(candidate).send().await?;

        if !response.status().is_success() {
            trace!("Favicon probe {} answered {}", candidate, response.status());
            return Ok(false);
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        Ok(content_type.starts_with("image/"))
    }
}

#[async_trait]
impl LogoUrlResolver for HttpFaviconResolver {
    async fn get_logo_url(
        &self,
        service_url: &str,
        provider: &str,
    ) -> CollaboratorResult<Option<String>> {
        if !self.enabled {
            return Ok(None);
        }

        let domain = Self::brand_domain(service_url)?;
        debug!(
            "Looking up favicon for {} (provider: {}, domain: {})",
            service_url, provider, domain
        );

        let mut first_error = None;
        for candidate in self.candidate_urls(&domain) {
            match self.probe(&candidate).await {
                Ok(true) => return Ok(Some(candidate)),
                Ok(false) => {}
                Err(e) => {
                    trace!("Favicon probe {} failed: {}", candidate, e);
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(None),
        }
    }
}
