use crate::{
    config::Config,
    error::{Result, TransportError},
    extract,
    identifier::Identifier,
    record::Record,
};

/// Longest stretch of an error body quoted back to the user.
const BODY_SNIPPET_CHARS: usize = 200;

/// A blocking client for the archive's listing pages.
pub struct Archive {
    agent: ureq::Agent,
    config: Config,
}

impl Archive {
    pub fn new(config: Config) -> Self {
        // Statuses are checked by hand so the error can quote the body.
        let agent_config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build();
        Archive {
            agent: ureq::Agent::new_with_config(agent_config),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// GET the listing page of `id`. Anything but a 2xx answer is an error.
    pub fn fetch(&self, id: &Identifier) -> core::result::Result<String, TransportError> {
        let url = self.config.page_url(id);
        tracing::debug!(%url, "fetching listing page");

        let request_failed = |source: ureq::Error| TransportError::Request {
            url: url.clone(),
            source: Box::new(source),
        };
        let mut res = self
            .agent
            .get(&url)
            .header("User-Agent", &self.config.user_agent)
            .call()
            .map_err(request_failed)?;

        let status = res.status();
        let body = res
            .body_mut()
            .read_to_string()
            .map_err(request_failed)?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "received listing page");

        if !status.is_success() {
            return Err(TransportError::Status {
                url,
                status: status.as_u16(),
                body: snippet(&body),
            });
        }
        Ok(body)
    }

    /// Fetch the listing page of `id` and extract its record.
    pub fn resolve(&self, id: &Identifier) -> Result<Record> {
        let html = self.fetch(id)?;
        let record = extract::parse(&html)?;
        if record.identifier() != id {
            tracing::warn!(
                requested = %id,
                found = %record.identifier(),
                "page reports a different article id"
            );
        }
        Ok(record)
    }
}

impl Default for Archive {
    fn default() -> Self {
        Archive::new(Config::default())
    }
}

fn snippet(body: &str) -> String {
    let line = body.trim().lines().next().unwrap_or_default().trim();
    if line.chars().count() > BODY_SNIPPET_CHARS {
        let cut: String = line.chars().take(BODY_SNIPPET_CHARS).collect();
        format!("{cut}...")
    } else {
        line.to_string()
    }
}
