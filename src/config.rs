use url::Url;

use crate::{identifier::Identifier, record::ARCHIVE_BASE_URL};

/// Runtime settings for talking to the archive.
#[derive(Clone, Debug)]
pub struct Config {
    /// Where listing pages are fetched from. Only the fetch honours this; links and citations in
    /// a [`Record`](crate::Record) always name the public archive.
    pub base_url: Url,
    pub user_agent: String,
}

impl Config {
    pub fn with_base_url(base_url: Url) -> Self {
        Config {
            base_url,
            ..Config::default()
        }
    }

    /// The listing page of `id` under the configured base URL.
    pub fn page_url(&self, id: &Identifier) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), id)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: Url::parse(ARCHIVE_BASE_URL).expect("archive base URL is valid"),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
