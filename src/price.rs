//! Price extraction pipeline.
//!
//! Given a product URL, fetch the page once and try three independent
//! strategies in priority order until one yields a displayed price:
//!
//! 1. JSON-LD structured data (`offers.price` of an embedded product block)
//! 2. `<meta>` price hints in the document head
//! 3. A currency-pattern regex over the visible page text
//!
//! Extraction is advisory: every failure mode (network, parse, no match)
//! collapses to `None`, never an error. The caller substitutes a default
//! price so item creation is never blocked by a failed lookup.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde::Serialize;

use crate::fetch::fetch_html;

/// Currency-symbol-prefixed numeric literal, thousands separators and
/// decimal point allowed. First match anywhere in page text wins, which
/// is prone to false positives (shipping costs etc.); accepted, since
/// this strategy is only ever a last resort.
static PRICE_RE: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"[$₹€]\s?[0-9,.]+").expect("Invalid price regex")
});

/// Which strategy produced a price. Diagnostics only; correctness does
/// not depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    JsonLd,
    MetaTag,
    TextScan,
}

impl PriceSource {
    pub fn label(&self) -> &'static str {
        match self {
            PriceSource::JsonLd => "json-ld",
            PriceSource::MetaTag => "meta tag",
            PriceSource::TextScan => "text scan",
        }
    }
}

/// A price recovered from a page, as displayed (no normalization)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedPrice {
    /// Raw matched value; may carry a currency symbol (text scan) or not
    pub raw: String,
    pub source: PriceSource,
}

/// Best-effort price lookup for a product URL.
///
/// Returns `None` on any failure: unreachable host, non-2xx, timeout,
/// unparseable document, or simply no recognizable price on the page.
pub fn extract_price(url: &str) -> Option<ExtractedPrice> {
    let html = fetch_html(url).ok()?;
    extract_from_html(&html)
}

/// Run the strategy chain over already-fetched HTML.
///
/// The document is parsed once and shared by all three readers; the first
/// non-empty result short-circuits the chain.
pub fn extract_from_html(html: &str) -> Option<ExtractedPrice> {
    let document = Html::parse_document(html);

    let readers: [(fn(&Html) -> Option<String>, PriceSource); 3] = [
        (jsonld_price, PriceSource::JsonLd),
        (meta_price, PriceSource::MetaTag),
        (text_price, PriceSource::TextScan),
    ];

    readers.iter().find_map(|(reader, source)| {
        reader(&document)
            // An empty value is no result; the chain keeps going
            .filter(|raw| !raw.is_empty())
            .map(|raw| ExtractedPrice { raw, source: *source })
    })
}

/// Strategy 1: JSON-LD structured data.
///
/// Scans `script[type="application/ld+json"]` blocks in document order.
/// The first block that decodes to an object with an object-valued
/// `offers` field resolves this strategy to its `price` field; malformed
/// blocks are skipped silently.
fn jsonld_price(document: &Html) -> Option<String> {
    let selector = Selector::parse(r#"script[type="application/ld+json"]"#).ok()?;

    for script in document.select(&selector) {
        let text: String = script.text().collect();
        let Ok(json) = serde_json::from_str::<serde_json::Value>(&text) else {
            continue;
        };
        if let serde_json::Value::Object(map) = &json {
            if let Some(serde_json::Value::Object(offers)) = map.get("offers") {
                return match offers.get("price") {
                    Some(serde_json::Value::String(s)) => Some(s.clone()),
                    // A numeric zero is "no price", not a price of 0
                    Some(serde_json::Value::Number(n)) if n.as_f64() != Some(0.0) => {
                        Some(n.to_string())
                    }
                    _ => None,
                };
            }
        }
    }

    None
}

/// Strategy 2: meta-tag price hints.
///
/// Two interchangeable attribute families, matched case-insensitively:
/// `property` = `product:price:amount` / `og:price:amount`, or
/// `name` = `price` / `twitter:data1`. Returns the `content` attribute of
/// the first matching element in document order.
fn meta_price(document: &Html) -> Option<String> {
    let selector = Selector::parse("meta").ok()?;

    document
        .select(&selector)
        .find(|el| {
            let property = el.value().attr("property").unwrap_or("");
            let name = el.value().attr("name").unwrap_or("");
            property.eq_ignore_ascii_case("product:price:amount")
                || property.eq_ignore_ascii_case("og:price:amount")
                || name.eq_ignore_ascii_case("price")
                || name.eq_ignore_ascii_case("twitter:data1")
        })
        .and_then(|el| el.value().attr("content").map(String::from))
}

/// Strategy 3: heuristic text scan.
///
/// Joins all text nodes with single spaces and returns the first
/// currency-like match, raw, symbol included. Each fragment is trimmed
/// before joining so markup whitespace between a symbol and its number
/// never exceeds the regex's single optional space.
fn text_price(document: &Html) -> Option<String> {
    let text: String = document
        .root_element()
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    PRICE_RE.find(&text).map(|m| m.as_str().to_string())
}

/// Plain number with optional comma thousands groups and a dot decimal.
/// Anything else (decimal-comma locales, doubled separators) is ambiguous
/// and rejected so the caller falls back to the default price.
static AMOUNT_RE: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^(?:[0-9]{1,3}(?:,[0-9]{3})+|[0-9]+)(?:\.[0-9]+)?$")
        .expect("Invalid amount regex")
});

/// Reduce a raw extracted price to a storable number.
///
/// Strips currency symbols and whitespace; `None` when what remains is
/// not a plain dot-decimal numeric literal.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    if !AMOUNT_RE.is_match(&cleaned) {
        return None;
    }
    cleaned.replace(',', "").parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jsonld_price_wins_over_everything() {
        let html = r#"
            <html><head>
            <script type="application/ld+json">
            {"@type": "Product", "name": "Widget", "offers": {"price": "19.99", "priceCurrency": "USD"}}
            </script>
            <meta property="og:price:amount" content="42.00">
            </head>
            <body>Now only $5.00!</body></html>
        "#;
        let result = extract_from_html(html).unwrap();
        assert_eq!(result.raw, "19.99");
        assert_eq!(result.source, PriceSource::JsonLd);
    }

    #[test]
    fn test_jsonld_numeric_price() {
        let html = r#"
            <html><head>
            <script type="application/ld+json">
            {"@type": "Product", "offers": {"price": 24.5}}
            </script>
            </head><body></body></html>
        "#;
        let result = extract_from_html(html).unwrap();
        assert_eq!(result.raw, "24.5");
        assert_eq!(result.source, PriceSource::JsonLd);
    }

    #[test]
    fn test_malformed_jsonld_skipped() {
        let html = r#"
            <html><head>
            <script type="application/ld+json">{not valid json</script>
            <script type="application/ld+json">
            {"@type": "Product", "offers": {"price": "7.99"}}
            </script>
            </head><body></body></html>
        "#;
        let result = extract_from_html(html).unwrap();
        assert_eq!(result.raw, "7.99");
    }

    #[test]
    fn test_jsonld_without_offers_falls_through() {
        let html = r#"
            <html><head>
            <script type="application/ld+json">
            {"@type": "Article", "headline": "Not a product"}
            </script>
            <meta property="og:price:amount" content="9.50">
            </head><body></body></html>
        "#;
        let result = extract_from_html(html).unwrap();
        assert_eq!(result.raw, "9.50");
        assert_eq!(result.source, PriceSource::MetaTag);
    }

    #[test]
    fn test_meta_og_price() {
        let html = r#"
            <html><head>
            <meta property="og:price:amount" content="9.50">
            </head><body></body></html>
        "#;
        let result = extract_from_html(html).unwrap();
        assert_eq!(result.raw, "9.50");
        assert_eq!(result.source, PriceSource::MetaTag);
    }

    #[test]
    fn test_meta_property_case_insensitive() {
        let html = r#"
            <html><head>
            <meta property="PRODUCT:PRICE:AMOUNT" content="120.00">
            </head><body></body></html>
        "#;
        let result = extract_from_html(html).unwrap();
        assert_eq!(result.raw, "120.00");
    }

    #[test]
    fn test_meta_name_twitter_data() {
        let html = r#"
            <html><head>
            <meta name="twitter:data1" content="59.00">
            </head><body></body></html>
        "#;
        let result = extract_from_html(html).unwrap();
        assert_eq!(result.raw, "59.00");
        assert_eq!(result.source, PriceSource::MetaTag);
    }

    #[test]
    fn test_meta_first_match_in_document_order() {
        let html = r#"
            <html><head>
            <meta name="price" content="10.00">
            <meta property="og:price:amount" content="20.00">
            </head><body></body></html>
        "#;
        let result = extract_from_html(html).unwrap();
        assert_eq!(result.raw, "10.00");
    }

    #[test]
    fn test_empty_meta_content_falls_through_to_text() {
        let html = r#"
            <html><head>
            <meta name="price" content="">
            </head>
            <body>Only $5.00 today</body></html>
        "#;
        let result = extract_from_html(html).unwrap();
        assert_eq!(result.raw, "$5.00");
        assert_eq!(result.source, PriceSource::TextScan);
    }

    #[test]
    fn test_empty_jsonld_price_falls_through_to_meta() {
        let html = r#"
            <html><head>
            <script type="application/ld+json">
            {"@type": "Product", "offers": {"price": ""}}
            </script>
            <meta property="og:price:amount" content="9.50">
            </head><body></body></html>
        "#;
        let result = extract_from_html(html).unwrap();
        assert_eq!(result.raw, "9.50");
        assert_eq!(result.source, PriceSource::MetaTag);
    }

    #[test]
    fn test_zero_jsonld_price_falls_through() {
        let html = r#"
            <html><head>
            <script type="application/ld+json">
            {"@type": "Product", "offers": {"price": 0}}
            </script>
            </head>
            <body>Yours for €12.00</body></html>
        "#;
        let result = extract_from_html(html).unwrap();
        assert_eq!(result.raw, "€12.00");
        assert_eq!(result.source, PriceSource::TextScan);
    }

    #[test]
    fn test_text_scan_rupee() {
        let html = r#"<html><body><p>Now only ₹499 today!</p></body></html>"#;
        let result = extract_from_html(html).unwrap();
        assert_eq!(result.raw, "₹499");
        assert_eq!(result.source, PriceSource::TextScan);
    }

    #[test]
    fn test_text_scan_dollar_with_space_and_separators() {
        let html = r#"<html><body>Sale price: $ 1,299.99 while stocks last</body></html>"#;
        let result = extract_from_html(html).unwrap();
        assert_eq!(result.raw, "$ 1,299.99");
    }

    #[test]
    fn test_text_scan_symbol_and_amount_in_separate_elements() {
        // Markup whitespace between the symbol and the number collapses
        // to a single space before scanning
        let html = "<html><body><p><b>$</b>\n            <span>5.00</span></p></body></html>";
        let result = extract_from_html(html).unwrap();
        assert_eq!(result.raw, "$ 5.00");
        assert_eq!(result.source, PriceSource::TextScan);
    }

    #[test]
    fn test_text_scan_first_match_wins() {
        let html = r#"<html><body>
            <span>€15.00</span>
            <span>shipping €4.99</span>
        </body></html>"#;
        let result = extract_from_html(html).unwrap();
        assert_eq!(result.raw, "€15.00");
    }

    #[test]
    fn test_no_price_signal() {
        let html = r#"<html><head><title>About us</title></head>
            <body><p>We sell things.</p></body></html>"#;
        assert_eq!(extract_from_html(html), None);
    }

    #[test]
    fn test_idempotent_on_static_document() {
        let html = r#"<html><body>Only $12.50 today</body></html>"#;
        let first = extract_from_html(html);
        let second = extract_from_html(html);
        assert_eq!(first, second);
    }

    #[test]
    fn test_unreachable_url_returns_none() {
        assert_eq!(extract_price("http://127.0.0.1:1/product"), None);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("19.99"), Some(19.99));
        assert_eq!(parse_amount("₹499"), Some(499.0));
        assert_eq!(parse_amount("$ 1,299.99"), Some(1299.99));
        assert_eq!(parse_amount("€,."), None);
        assert_eq!(parse_amount(""), None);
        // Two decimal points cannot be disambiguated
        assert_eq!(parse_amount("1.299.99"), None);
    }

    #[test]
    fn test_parse_amount_rejects_decimal_comma_formats() {
        // European formats are ambiguous in a dot-decimal store;
        // rejecting them fails safe to the default price
        assert_eq!(parse_amount("€1.299,99"), None);
        assert_eq!(parse_amount("€12,99"), None);
        assert_eq!(parse_amount("1,29"), None);
        // Dot-decimal with comma thousands stays valid
        assert_eq!(parse_amount("$12,345,678.90"), Some(12345678.90));
    }
}
