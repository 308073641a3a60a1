// Profile page parsing: author name and the publication table.
//
// Each table row becomes a publication stub carrying what the listing shows
// (title, authors, citation line, year, citation count) plus the citation ID
// needed to fetch the detail page later.

use anyhow::Result;
use scraper::Html;
use serde_json::Value;
use url::Url;

use super::{element_text, selector};
use crate::records::RawPublication;

/// Base used to resolve the relative citation links on profile pages.
const LINK_BASE: &str = "https://scholar.google.com/";

/// One page of an author's profile.
#[derive(Debug, Clone, Default)]
pub struct ProfilePage {
    /// Display name; only present when the page is a real profile.
    pub name: Option<String>,
    pub publications: Vec<RawPublication>,
}

/// Parse one page of `citations?user=...` HTML.
pub fn parse_profile_page(html: &str) -> Result<ProfilePage> {
    let document = Html::parse_document(html);

    let name_sel = selector("#gsc_prf_in")?;
    let row_sel = selector("tr.gsc_a_tr")?;
    let title_sel = selector("a.gsc_a_at")?;
    let gray_sel = selector("div.gs_gray")?;
    let cites_sel = selector("a.gsc_a_ac")?;
    let year_sel = selector("span.gsc_a_h")?;

    let name = document
        .select(&name_sel)
        .next()
        .map(element_text)
        .filter(|n| !n.is_empty());

    let mut publications = Vec::new();
    for row in document.select(&row_sel) {
        let mut stub = RawPublication::new();

        if let Some(link) = row.select(&title_sel).next() {
            insert_text(&mut stub, "title", element_text(link));
            let href = link
                .value()
                .attr("href")
                .or_else(|| link.value().attr("data-href"));
            if let Some(id) = href.and_then(citation_id_from_href) {
                stub.set_field("author_pub_id", id);
            }
        }

        let mut gray = row.select(&gray_sel).map(element_text);
        if let Some(authors) = gray.next() {
            insert_text(&mut stub, "author", authors);
        }
        if let Some(citation) = gray.next() {
            insert_text(&mut stub, "citation", citation);
        }

        if let Some(year) = row.select(&year_sel).next().map(element_text) {
            insert_text(&mut stub, "pub_year", year);
        }

        let citations = row
            .select(&cites_sel)
            .next()
            .map(element_text)
            .and_then(|text| text.parse::<u64>().ok())
            .unwrap_or(0);
        stub.set_field("num_citations", citations);

        publications.push(stub);
    }

    Ok(ProfilePage { name, publications })
}

/// Pull `citation_for_view` out of a profile row's link.
pub fn citation_id_from_href(href: &str) -> Option<String> {
    let url = Url::parse(LINK_BASE).ok()?.join(href).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "citation_for_view")
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty())
}

fn insert_text(stub: &mut RawPublication, key: &str, text: String) {
    if !text.is_empty() {
        stub.set_bib_field(key, Value::String(text));
    }
}
