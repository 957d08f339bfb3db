//! Attribute-id decoding for the SOAP provider.
//!
//! The provider's structured responses carry an indirection: `serie` elements
//! declare an `id` and a human-readable `name`, while `item` elements carry a
//! `date` attribute plus numeric attributes keyed by serie id, e.g.
//! `{date: "2022-07-26T01:00:00+02:00", value1: "6651"}` where serie
//! `value1` is named `"Generation plan [MW]"`.
//!
//! Decoding is an explicit two-pass resolution: first build the immutable
//! id-to-name lookup, then map every item through it, failing fast on any
//! unresolved id. Downstream code indexes fields by name, so a dangling id
//! must never be dropped silently.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use grid_core::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// One decoded item: an absolute timestamp plus named numeric values.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedItem {
    /// Parsed `date` attribute.
    pub date: DateTime<Utc>,
    /// Values renamed from serie ids to serie names.
    pub values: BTreeMap<String, f64>,
}

/// Decode a structured-data XML document into flat named records, one per
/// `item` element, in document order.
pub fn decode_series_items(xml: &str) -> Result<Vec<DecodedItem>> {
    let names = collect_serie_names(xml)?;

    let mut reader = Reader::from_str(xml);
    let mut items = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"item" => {
                items.push(decode_item(&e, &names)?);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(items)
}

/// First pass: collect the serie id-to-name lookup table.
fn collect_serie_names(xml: &str) -> Result<BTreeMap<String, String>> {
    let mut reader = Reader::from_str(xml);
    let mut names = BTreeMap::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"serie" => {
                let mut id = None;
                let mut name = None;
                for attr in e.attributes() {
                    let attr = attr.map_err(quick_xml::Error::from)?;
                    let value = attr.unescape_value()?.into_owned();
                    match attr.key.local_name().as_ref() {
                        b"id" => id = Some(value),
                        b"name" => name = Some(value),
                        _ => {}
                    }
                }
                match (id, name) {
                    (Some(id), Some(name)) => {
                        names.insert(id, name);
                    }
                    _ => return Err(Error::data("serie element missing id or name attribute")),
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(names)
}

/// Second pass, per item: parse the date, rename every other attribute via
/// the serie lookup and coerce its value to a float.
fn decode_item(item: &BytesStart<'_>, names: &BTreeMap<String, String>) -> Result<DecodedItem> {
    let mut date = None;
    let mut values = BTreeMap::new();
    for attr in item.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let raw = attr.unescape_value()?;
        if key == "date" {
            let parsed = DateTime::parse_from_rfc3339(&raw)
                .map_err(|e| Error::data(format!("unparseable item date {raw:?}: {e}")))?;
            date = Some(parsed.with_timezone(&Utc));
        } else {
            let name = names.get(&key).ok_or_else(|| {
                Error::vocabulary(format!("item attribute {key:?} has no matching serie"))
            })?;
            let value: f64 = raw
                .parse()
                .map_err(|e| Error::data(format!("non-numeric value {raw:?} for {name:?}: {e}")))?;
            values.insert(name.clone(), value);
        }
    }
    let date = date.ok_or_else(|| Error::data("item element missing date attribute"))?;
    Ok(DecodedItem { date, values })
}
