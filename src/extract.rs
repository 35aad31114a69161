//! Turn an ePrint listing page into a [`Record`].
//!
//! The page is loosely structured: the title is the first bold element, the authors the first
//! italic one, and the remaining fields follow bold labels such as `Abstract: `. Extraction is
//! all-or-nothing except for keywords, which many pages do not declare.

use scraper::Html;

use crate::{
    document::{
        DocNode, HtmlNode, Reach, descendants, find_anchor, find_first, flowing_text,
        read_following,
    },
    error::{ExtractionError, Field},
    identifier::Identifier,
    record::Record,
    text::{normalize_ws, split_normalized},
};

const LABEL_TAG: &str = "b";
const ABSTRACT_LABEL: &str = "Abstract: ";
const KEYWORDS_LABEL: &str = "Category / Keywords: ";
const SHORT_URL_LABEL: &str = "Short URL: ";
const AUTHOR_SEPARATOR: &str = " and ";

/// Extract the record described by an ePrint listing page.
pub fn parse(markup: &str) -> Result<Record, ExtractionError> {
    let html = Html::parse_document(markup);
    extract(HtmlNode::root(&html))
}

/// Extract a record from any document tree.
pub fn extract<N: DocNode>(root: N) -> Result<Record, ExtractionError> {
    let title = title(root)?;
    let authors = authors(root)?;
    let abstract_ = abstract_text(root)?;
    let keywords = keywords(root);
    let identifier = identifier(root)?;

    tracing::debug!(
        %identifier,
        %title,
        authors = authors.len(),
        keywords = keywords.len(),
        "extracted record"
    );
    Ok(Record::new(&title, authors, &abstract_, keywords, identifier)?)
}

fn title<N: DocNode>(root: N) -> Result<String, ExtractionError> {
    let title = find_first(root, LABEL_TAG)
        .map(|b| normalize_ws(&flowing_text(b)))
        .ok_or(ExtractionError::Missing(Field::Title))?;
    if title.is_empty() {
        return Err(ExtractionError::Missing(Field::Title));
    }
    Ok(title)
}

fn authors<N: DocNode>(root: N) -> Result<Vec<String>, ExtractionError> {
    let authors = find_first(root, "i")
        .map(|i| split_normalized(&flowing_text(i), AUTHOR_SEPARATOR))
        .ok_or(ExtractionError::Missing(Field::Authors))?;
    if authors.is_empty() {
        return Err(ExtractionError::Missing(Field::Authors));
    }
    Ok(authors)
}

/// Ends a labelled section: a bold label such as `Date: `, or a block holding one. Bold text
/// that does not end in a colon is emphasis and reads as part of the section.
fn is_label<N: DocNode>(node: &N) -> bool {
    descendants(*node)
        .any(|n| n.tag() == Some(LABEL_TAG) && normalize_ws(&n.text()).ends_with(':'))
}

fn abstract_text<N: DocNode>(root: N) -> Result<String, ExtractionError> {
    let anchor = find_anchor(root, LABEL_TAG, ABSTRACT_LABEL)
        .ok_or(ExtractionError::Missing(Field::Abstract))?;
    let paragraphs = read_following(anchor, Reach::Blocks, is_label);
    tracing::trace!(paragraphs = paragraphs.len(), "read abstract");
    if paragraphs.is_empty() {
        return Err(ExtractionError::Malformed {
            field: Field::Abstract,
            reason: "no text follows the label".to_string(),
        });
    }
    Ok(paragraphs.join("\n\n"))
}

fn keywords<N: DocNode>(root: N) -> Vec<String> {
    let Some(anchor) = find_anchor(root, LABEL_TAG, KEYWORDS_LABEL) else {
        tracing::info!("document declares no keywords");
        return Vec::new();
    };
    read_following(anchor, Reach::Inline, is_label)
        .first()
        .map(|line| split_normalized(line, ","))
        .unwrap_or_default()
}

fn identifier<N: DocNode>(root: N) -> Result<Identifier, ExtractionError> {
    let anchor = find_anchor(root, LABEL_TAG, SHORT_URL_LABEL)
        .ok_or(ExtractionError::Missing(Field::ShortUrl))?;
    let short_url = read_following(anchor, Reach::Inline, is_label)
        .into_iter()
        .next()
        .and_then(|line| line.split_whitespace().next().map(str::to_string))
        .ok_or_else(|| ExtractionError::Malformed {
            field: Field::ShortUrl,
            reason: "no URL follows the label".to_string(),
        })?;

    let without_scheme = short_url
        .strip_prefix("https://")
        .or_else(|| short_url.strip_prefix("http://"))
        .unwrap_or(&short_url);
    let (_host, path) = without_scheme
        .split_once('/')
        .ok_or_else(|| ExtractionError::Malformed {
            field: Field::ShortUrl,
            reason: format!("'{short_url}' has no path"),
        })?;

    Identifier::parse(path).map_err(|_| ExtractionError::Malformed {
        field: Field::ShortUrl,
        reason: format!("'{short_url}' does not end in an article id"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(abstract_html: &str, keywords_html: Option<&str>) -> String {
        let keywords = keywords_html
            .map(|k| format!("<p><b>Category / Keywords: </b>{k}</p>"))
            .unwrap_or_default();
        format!(
            "<html><body>\
             <p><b>A  Title</b></p>\
             <p><i>Alice and  Bob</i></p>\
             <p><b>Abstract: </b>{abstract_html}\
             {keywords}\
             <p><b>Date: </b>received 1 Jan 2000</p>\
             <p><b>Short URL: </b><a href=\"https://ia.cr/2000/123\">ia.cr/2000/123</a></p>\
             </body></html>"
        )
    }

    #[test]
    fn extracts_every_field() {
        let record = parse(&page("One\nline.</p>", Some("a, b"))).unwrap();
        assert_eq!(record.title(), "A Title");
        assert_eq!(record.authors(), ["Alice", "Bob"]);
        assert_eq!(record.abstract_text(), "One line.");
        assert_eq!(record.keywords(), ["a", "b"]);
        assert_eq!(record.identifier().as_str(), "2000/123");
    }

    #[test]
    fn multi_paragraph_abstract_joins_with_blank_line() {
        let record = parse(&page("para one.</p><p>para two.</p>", Some("a"))).unwrap();
        assert_eq!(record.abstract_text(), "para one.\n\npara two.");
    }

    #[test]
    fn abstract_stops_at_the_next_label_without_keywords() {
        let record = parse(&page("only.</p>\n<p>more.</p>", None)).unwrap();
        assert_eq!(record.abstract_text(), "only.\n\nmore.");
    }

    #[test]
    fn bold_emphasis_does_not_end_the_abstract() {
        let record = parse(&page(
            "We show <b>strong</b> results.</p><p>second <b>bold</b> one.</p>",
            Some("a"),
        ))
        .unwrap();
        assert_eq!(
            record.abstract_text(),
            "We show strong results.\n\nsecond bold one."
        );
        assert_eq!(record.keywords(), ["a"]);
    }

    #[test]
    fn missing_keywords_is_an_empty_list() {
        let record = parse(&page("x</p>", None)).unwrap();
        assert!(record.keywords().is_empty());
    }

    #[test]
    fn empty_keywords_is_an_empty_list() {
        let record = parse(&page("x</p>", Some(""))).unwrap();
        assert!(record.keywords().is_empty());
    }

    #[test]
    fn missing_abstract_label_fails() {
        let markup = page("x</p>", None).replace("Abstract: ", "Summary: ");
        let err = parse(&markup).unwrap_err();
        assert_eq!(err.field(), Some(Field::Abstract));
    }

    #[test]
    fn missing_title_and_authors_fail() {
        let err = parse("<html><body><p>nothing</p></body></html>").unwrap_err();
        assert!(matches!(err, ExtractionError::Missing(Field::Title)));

        let err = parse("<html><body><b>Title</b></body></html>").unwrap_err();
        assert!(matches!(err, ExtractionError::Missing(Field::Authors)));
    }

    #[test]
    fn short_url_is_required_and_must_hold_an_id() {
        let markup = page("x</p>", None).replace("Short URL: ", "Link: ");
        assert!(matches!(
            parse(&markup),
            Err(ExtractionError::Missing(Field::ShortUrl))
        ));

        let markup = page("x</p>", None).replace(">ia.cr/2000/123<", ">ia.cr/latest<");
        assert!(matches!(
            parse(&markup),
            Err(ExtractionError::Malformed {
                field: Field::ShortUrl,
                ..
            })
        ));
    }

    #[test]
    fn short_url_with_scheme_is_accepted() {
        let markup = page("x</p>", None).replace(">ia.cr/2000/123<", ">https://ia.cr/2000/123<");
        assert_eq!(parse(&markup).unwrap().identifier().as_str(), "2000/123");
    }
}
