// Publication source trait: the seam between the pipeline and the network.
//
// The production implementation scrapes Google Scholar. Tests drive the
// pipeline with in-memory sources instead.

use anyhow::Result;
use async_trait::async_trait;

use crate::records::RawPublication;

/// An author's display name and their publication stubs, as listed on the
/// profile page.
#[derive(Debug, Clone, Default)]
pub struct AuthorProfile {
    pub name: String,
    pub publications: Vec<RawPublication>,
}

/// Something that can look up an author and fill in publication details.
#[async_trait]
pub trait PublicationSource: Send + Sync {
    /// Fetch the author's name and every publication stub on their profile.
    async fn fetch_author(&self, author_id: &str) -> Result<AuthorProfile>;

    /// Fetch the full record for one publication stub. The returned document
    /// contains the stub's fields with the detail fields merged over them.
    async fn fill_publication(&self, publication: &RawPublication) -> Result<RawPublication>;
}
