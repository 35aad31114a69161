use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    error::ValidationError,
    identifier::Identifier,
    text::{escape_braces, normalize_ws, split_normalized},
};

/// Public home of the archive. Download links and citations always point here.
pub const ARCHIVE_BASE_URL: &str = "https://eprint.iacr.org";

const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// The metadata of one ePrint paper.
///
/// Built once, validated once, then only read. Text fields hold whitespace-normalized values: the
/// title and each author or keyword is a single trimmed line, and the abstract is one or more such
/// lines separated by a blank line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    title: String,
    authors: Vec<String>,
    abstract_: String,
    keywords: Vec<String>,
    identifier: Identifier,
}

impl Record {
    /// Normalize and validate the fields of a record.
    ///
    /// The title, the abstract and every author must be non-empty after normalization, and there
    /// must be at least one author. Keywords that normalize to nothing are dropped.
    pub fn new(
        title: &str,
        authors: Vec<String>,
        abstract_: &str,
        keywords: Vec<String>,
        identifier: Identifier,
    ) -> Result<Self, ValidationError> {
        let title = normalize_ws(title);
        if title.is_empty() {
            return Err(ValidationError::Field {
                field: "title",
                reason: "must not be empty",
            });
        }

        if authors.is_empty() {
            return Err(ValidationError::Field {
                field: "authors",
                reason: "must name at least one author",
            });
        }
        let authors: Vec<String> = authors.iter().map(|a| normalize_ws(a)).collect();
        if authors.iter().any(String::is_empty) {
            return Err(ValidationError::Field {
                field: "authors",
                reason: "must not contain an empty name",
            });
        }

        let abstract_ = split_normalized(abstract_, PARAGRAPH_SEPARATOR).join(PARAGRAPH_SEPARATOR);
        if abstract_.is_empty() {
            return Err(ValidationError::Field {
                field: "abstract",
                reason: "must not be empty",
            });
        }

        let keywords = keywords
            .iter()
            .map(|k| normalize_ws(k))
            .filter(|k| !k.is_empty())
            .collect();

        Ok(Record {
            title,
            authors,
            abstract_,
            keywords,
            identifier,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    /// Paragraphs joined by a blank line.
    pub fn abstract_text(&self) -> &str {
        &self.abstract_
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Where the paper's PDF lives.
    pub fn download_link(&self) -> String {
        format!("{}.pdf", archive_link(&self.identifier))
    }

    /// A BibTeX `@misc` entry in the archive's own citation style.
    pub fn citation(&self) -> String {
        citation(&self.title, &self.authors, &self.identifier)
    }

    /// The interchange form: every field plus `pdf_link` and `bibtex`.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "title": self.title,
            "authors": self.authors,
            "abstract": self.abstract_,
            "keywords": self.keywords,
            "id": self.identifier.as_str(),
            "pdf_link": self.download_link(),
            "bibtex": self.citation(),
        })
    }

    /// Rebuild a record from its interchange form. `pdf_link` and `bibtex` are ignored when
    /// present.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ValidationError> {
        let raw: RawRecord = serde_json::from_value(value)?;
        raw.into_record()
    }
}

/// Render the citation for the given fields. Identical inputs always yield identical bytes.
pub fn citation(title: &str, authors: &[String], identifier: &Identifier) -> String {
    let fields = [
        ("author", escape_braces(&authors.join(" and "))),
        ("title", escape_braces(title)),
        (
            "howpublished",
            format!("Cryptology ePrint Archive, Report {identifier}"),
        ),
        ("year", identifier.year().to_string()),
        ("note", format!("\\url{{{}}}", archive_link(identifier))),
    ];

    let mut out = String::new();
    out.push_str("@misc{cryptoeprint:");
    out.push_str(identifier.year());
    out.push(':');
    out.push_str(identifier.sequence());
    out.push_str(",\n");
    for (k, v) in fields {
        out.push_str("    ");
        out.push_str(k);
        out.push_str(" = {");
        out.push_str(&v);
        out.push_str("},\n");
    }
    out.push_str("}\n");
    out
}

/// The paper's listing page on the public archive.
fn archive_link(identifier: &Identifier) -> String {
    format!("{ARCHIVE_BASE_URL}/{identifier}")
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// The base fields as they appear on the wire, before validation.
#[derive(Deserialize)]
struct RawRecord {
    title: String,
    authors: Vec<String>,
    #[serde(rename = "abstract")]
    abstract_: String,
    keywords: Vec<String>,
    id: Identifier,
}

impl RawRecord {
    fn into_record(self) -> Result<Record, ValidationError> {
        Record::new(&self.title, self.authors, &self.abstract_, self.keywords, self.id)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawRecord::deserialize(deserializer)?
            .into_record()
            .map_err(serde::de::Error::custom)
    }
}
