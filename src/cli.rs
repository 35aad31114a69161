use clap::{ArgAction, Parser, ValueEnum};
use iacr_dl::Identifier;
use url::Url;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Fetch and parse the metadata of a paper in the IACR ePrint archive",
    long_about = None
)]
pub struct Cli {
    /// The article ID. For example, 2009/123.
    #[arg(value_name = "ID", value_parser = parse_identifier)]
    pub id: Identifier,

    /// How to print the record
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    pub format: Format,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Where listing pages are fetched from
    #[arg(
        long,
        value_name = "URL",
        env = "IACR_DL_BASE_URL",
        default_value = iacr_dl::record::ARCHIVE_BASE_URL
    )]
    pub base_url: Url,

    /// Raise log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// The record and its derived links as a JSON object
    Json,
    /// A BibTeX citation entry
    Bibtex,
}

fn parse_identifier(s: &str) -> Result<Identifier, String> {
    Identifier::parse(s).map_err(|e| e.to_string())
}
