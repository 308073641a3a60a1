// Citation detail page parsing.
//
// The `view_citation` page lists a publication's metadata as labelled
// field/value pairs. We map the labels we care about onto the `bib` keys the
// normalizer reads, and capture the publisher link and any eprint (PDF) link.

use anyhow::Result;
use scraper::Html;

use super::{element_text, selector};
use crate::records::RawPublication;

/// Field labels on the detail page and the `bib` key each one fills.
const FIELD_KEYS: &[(&str, &str)] = &[
    ("authors", "author"),
    ("inventors", "author"),
    ("journal", "journal"),
    ("conference", "conference"),
    ("book", "booktitle"),
    ("source", "venue"),
    ("publisher", "publisher"),
    ("volume", "volume"),
    ("issue", "number"),
    ("pages", "pages"),
    ("description", "abstract"),
];

/// Parse a `citations?view_op=view_citation` page into a detail document.
pub fn parse_citation_page(html: &str) -> Result<RawPublication> {
    let document = Html::parse_document(html);

    let title_link_sel = selector("a.gsc_oci_title_link")?;
    let title_sel = selector("#gsc_oci_title")?;
    let eprint_sel = selector("div.gsc_oci_title_ggi a")?;
    let row_sel = selector("div.gs_scl")?;
    let field_sel = selector("div.gsc_oci_field")?;
    let value_sel = selector("div.gsc_oci_value")?;

    let mut detail = RawPublication::new();

    if let Some(link) = document.select(&title_link_sel).next() {
        set_text(&mut detail, "title", element_text(link));
        if let Some(href) = link.value().attr("href") {
            detail.set_field("pub_url", href);
        }
    } else if let Some(title) = document.select(&title_sel).next() {
        set_text(&mut detail, "title", element_text(title));
    }

    if let Some(href) = document
        .select(&eprint_sel)
        .next()
        .and_then(|a| a.value().attr("href"))
    {
        detail.set_field("eprint_url", href);
    }

    for row in document.select(&row_sel) {
        let (Some(field), Some(value)) = (
            row.select(&field_sel).next().map(element_text),
            row.select(&value_sel).next().map(element_text),
        ) else {
            continue;
        };
        let label = field.to_lowercase();

        if label == "publication date" {
            if let Some(year) = year_from_date(&value) {
                detail.set_bib_field("pub_year", year);
            }
        } else if label == "total citations" {
            if let Some(count) = cited_by_count(&value) {
                detail.set_field("num_citations", count);
            }
        } else if let Some((_, key)) = FIELD_KEYS.iter().find(|(name, _)| *name == label) {
            set_text(&mut detail, key, value);
        }
    }

    Ok(detail)
}

/// Leading year of a Scholar date such as "2019/6/12" or "2019".
pub fn year_from_date(date: &str) -> Option<String> {
    let year: String = date.trim().chars().take_while(char::is_ascii_digit).collect();
    (year.len() == 4).then_some(year)
}

/// Count from a "Cited by 123" line.
fn cited_by_count(text: &str) -> Option<u64> {
    let rest = &text[text.find("Cited by")? + "Cited by".len()..];
    let digits: String = rest
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

fn set_text(detail: &mut RawPublication, key: &str, text: String) {
    if !text.is_empty() {
        detail.set_bib_field(key, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAIL_HTML: &str = r##"
        <html><body>
        <div id="gsc_oci_title_gg"><div class="gsc_oci_title_ggi">
          <a href="https://arxiv.org/pdf/2101.00001"><span class="gsc_vcd_title_ggt">[PDF]</span> arxiv.org</a>
        </div></div>
        <div id="gsc_oci_title"><a class="gsc_oci_title_link" href="https://ieeexplore.ieee.org/document/123">Graph neural networks for traffic forecasting</a></div>
        <div id="gsc_oci_table">
          <div class="gs_scl"><div class="gsc_oci_field">Authors</div><div class="gsc_oci_value">Jane Researcher, Alan Colleague</div></div>
          <div class="gs_scl"><div class="gsc_oci_field">Publication date</div><div class="gsc_oci_value">2021/3/15</div></div>
          <div class="gs_scl"><div class="gsc_oci_field">Journal</div><div class="gsc_oci_value">IEEE Transactions on Intelligent Transportation Systems</div></div>
          <div class="gs_scl"><div class="gsc_oci_field">Volume</div><div class="gsc_oci_value">22</div></div>
          <div class="gs_scl"><div class="gsc_oci_field">Publisher</div><div class="gsc_oci_value">IEEE</div></div>
          <div class="gs_scl"><div class="gsc_oci_field">Total citations</div><div class="gsc_oci_value"><div style="margin-bottom:1em"><a href="#">Cited by 37</a></div></div></div>
        </div>
        </body></html>
    "##;

    #[test]
    fn test_parse_citation_page_fields() {
        let detail = parse_citation_page(DETAIL_HTML).unwrap();
        assert_eq!(detail.bib_str("title"), Some("Graph neural networks for traffic forecasting"));
        assert_eq!(detail.str_field("pub_url"), Some("https://ieeexplore.ieee.org/document/123"));
        assert_eq!(detail.str_field("eprint_url"), Some("https://arxiv.org/pdf/2101.00001"));
        assert_eq!(detail.bib_str("author"), Some("Jane Researcher, Alan Colleague"));
        assert_eq!(detail.bib_str("pub_year"), Some("2021"));
        assert_eq!(
            detail.bib_str("journal"),
            Some("IEEE Transactions on Intelligent Transportation Systems")
        );
        assert_eq!(detail.bib_str("volume"), Some("22"));
        assert_eq!(detail.bib_str("publisher"), Some("IEEE"));
        assert_eq!(detail.field("num_citations"), Some(&serde_json::Value::from(37)));
    }

    #[test]
    fn test_year_from_date() {
        assert_eq!(year_from_date("2019/6/12").as_deref(), Some("2019"));
        assert_eq!(year_from_date(" 2020 ").as_deref(), Some("2020"));
        assert_eq!(year_from_date("6/12"), None);
    }

    #[test]
    fn test_cited_by_count() {
        assert_eq!(cited_by_count("Cited by 1204 2019 2020 2021"), Some(1204));
        assert_eq!(cited_by_count("no citations"), None);
    }
}
