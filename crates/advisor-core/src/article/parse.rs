//! arXiv OAI-PMH `GetRecord` response parsing

use chrono::NaiveDate;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::warn;

use super::ParsedArticle;
use crate::common::CommonWordSet;
use crate::error::{AdvisorError, Result};

/// OAI error code for an identifier the archive does not know
const ID_DOES_NOT_EXIST: &str = "idDoesNotExist";

/// Prefix of OAI identifiers for arXiv records
const OAI_ID_PREFIX: &str = "oai:arXiv.org:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    Title,
    Abstract,
    Created,
    Categories,
    Forenames,
    Keyname,
    Error,
}

#[derive(Debug, Default)]
struct AuthorName {
    forenames: Option<String>,
    keyname: Option<String>,
}

impl AuthorName {
    fn full_name(self) -> Option<String> {
        let keyname = self.keyname?;
        Some(match self.forenames {
            Some(forenames) => format!("{} {}", forenames, keyname),
            None => keyname,
        })
    }
}

#[derive(Debug, Default)]
struct RecordFields {
    requested_id: Option<String>,
    has_record: bool,
    id: Option<String>,
    title: Option<String>,
    abstract_text: Option<String>,
    created: Option<String>,
    categories: Option<String>,
    authors: Vec<String>,
    error_code: Option<String>,
    error_message: Option<String>,
}

impl RecordFields {
    fn slot<'a>(
        &'a mut self,
        field: Field,
        author: &'a mut Option<AuthorName>,
    ) -> Option<&'a mut Option<String>> {
        match field {
            Field::Id => Some(&mut self.id),
            Field::Title => Some(&mut self.title),
            Field::Abstract => Some(&mut self.abstract_text),
            Field::Created => Some(&mut self.created),
            Field::Categories => Some(&mut self.categories),
            Field::Error => Some(&mut self.error_message),
            Field::Forenames => author.as_mut().map(|a| &mut a.forenames),
            Field::Keyname => author.as_mut().map(|a| &mut a.keyname),
        }
    }
}

/// Parse an arXiv-format OAI-PMH `GetRecord` response into an article
///
/// Uncommon title and abstract words are derived against `common`. The
/// response is read structurally only; no schema validation is done.
///
/// # Errors
///
/// - `ArticleNotFound` for an `idDoesNotExist` OAI error
/// - `MalformedRecord` for other OAI errors or missing title, abstract or categories
/// - `Xml` if the document is not well formed
#[tracing::instrument(skip(xml, common), fields(bytes = xml.len()))]
pub fn parse_article_xml(xml: &str, common: &CommonWordSet) -> Result<ParsedArticle> {
    let fields = read_record_fields(xml)?;

    if let Some(code) = fields.error_code {
        let identifier = fields.requested_id.unwrap_or_default();
        if code == ID_DOES_NOT_EXIST {
            return Err(AdvisorError::ArticleNotFound { identifier });
        }
        let message = fields.error_message.unwrap_or_default();
        return Err(AdvisorError::malformed(format!(
            "OAI error {} for {}: {}",
            code,
            identifier,
            message.trim()
        )));
    }

    if !fields.has_record {
        return Err(AdvisorError::malformed("response has no GetRecord element"));
    }

    let title = fields
        .title
        .ok_or_else(|| AdvisorError::malformed("record has no title"))?;
    let abstract_text = fields
        .abstract_text
        .ok_or_else(|| AdvisorError::malformed("record has no abstract"))?;
    let categories = fields
        .categories
        .ok_or_else(|| AdvisorError::malformed("record has no categories"))?;
    let (categories, sub_categories) = split_categories(&categories);

    let mut builder = ParsedArticle::builder(title, abstract_text)
        .authors(fields.authors)
        .categories(categories)
        .sub_categories(sub_categories)
        .derive_words(common);

    if let Some(id) = fields.id {
        builder = builder.identifier(id.trim());
    }
    if let Some(created) = fields.created {
        match NaiveDate::parse_from_str(created.trim(), "%Y-%m-%d") {
            Ok(date) => builder = builder.created(date),
            Err(e) => warn!(created = %created.trim(), error = %e, "Unparsable creation date"),
        }
    }

    builder.build().map_err(|e| AdvisorError::malformed(e.to_string()))
}

fn read_record_fields(xml: &str) -> Result<RecordFields> {
    let mut reader = Reader::from_str(xml);
    let mut fields = RecordFields::default();
    let mut in_metadata = false;
    let mut current: Option<Field> = None;
    // Unrecognized elements open inside the current field, such as markup in a title
    let mut nested = 0usize;
    let mut author: Option<AuthorName> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let opened = open_element(&e, &mut fields, &mut in_metadata, &mut author)?;
                if opened.is_some() {
                    current = opened;
                    nested = 0;
                } else if current.is_some() {
                    nested += 1;
                }
            }
            Event::Empty(e) => {
                open_element(&e, &mut fields, &mut in_metadata, &mut author)?;
            }
            Event::Text(t) => {
                if let Some(field) = current {
                    let text = t.unescape()?;
                    append_text(fields.slot(field, &mut author), &text);
                }
            }
            Event::CData(c) => {
                if let Some(field) = current {
                    let bytes = c.into_inner();
                    let text = String::from_utf8_lossy(&bytes);
                    append_text(fields.slot(field, &mut author), &text);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"arXiv" => in_metadata = false,
                b"author" => {
                    if let Some(name) = author.take().and_then(AuthorName::full_name) {
                        fields.authors.push(name);
                    } else {
                        warn!("Skipping author without keyname");
                    }
                }
                _ if nested > 0 => nested -= 1,
                _ => current = None,
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(fields)
}

/// Track structure for a start or empty element and return the text field it opens
fn open_element(
    e: &BytesStart<'_>,
    fields: &mut RecordFields,
    in_metadata: &mut bool,
    author: &mut Option<AuthorName>,
) -> Result<Option<Field>> {
    let field = match e.local_name().as_ref() {
        b"request" => {
            if let Some(attr) = e.try_get_attribute("identifier")? {
                let value = attr.unescape_value()?;
                let id = value.strip_prefix(OAI_ID_PREFIX).unwrap_or(value.as_ref());
                fields.requested_id = Some(id.to_string());
            }
            None
        }
        b"error" => {
            let code = match e.try_get_attribute("code")? {
                Some(attr) => attr.unescape_value()?.into_owned(),
                None => String::new(),
            };
            fields.error_code = Some(code);
            Some(Field::Error)
        }
        b"GetRecord" => {
            fields.has_record = true;
            None
        }
        b"arXiv" => {
            *in_metadata = true;
            None
        }
        b"author" if *in_metadata => {
            *author = Some(AuthorName::default());
            None
        }
        b"id" if *in_metadata => Some(Field::Id),
        b"title" if *in_metadata => Some(Field::Title),
        b"abstract" if *in_metadata => Some(Field::Abstract),
        b"created" if *in_metadata => Some(Field::Created),
        b"categories" if *in_metadata => Some(Field::Categories),
        b"forenames" if author.is_some() => Some(Field::Forenames),
        b"keyname" if author.is_some() => Some(Field::Keyname),
        _ => None,
    };
    Ok(field)
}

fn append_text(slot: Option<&mut Option<String>>, text: &str) {
    if let Some(slot) = slot {
        slot.get_or_insert_with(String::new).push_str(text);
    }
}

/// Split arXiv category codes like `astro-ph.CO` into top-level categories and
/// subcategories
///
/// Every code contributes its top-level part; only dotted codes contribute a
/// subcategory.
pub(crate) fn split_categories(codes: &str) -> (Vec<String>, Vec<String>) {
    let mut categories = Vec::new();
    let mut sub_categories = Vec::new();

    for code in codes.split_whitespace() {
        let mut parts = code.split('.');
        categories.push(parts.next().unwrap_or_default().to_string());
        if let Some(sub) = parts.next() {
            sub_categories.push(sub.to_string());
        }
    }

    (categories, sub_categories)
}
