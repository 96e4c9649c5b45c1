use forum_client::ForumClient;
use nav_table::TableRow;

use crate::error::Error;

/// Regenerates the index topic body (preserved preamble + freshly emitted
/// table) and pushes it to the forum. Called with whatever rows survived
/// execution, even if that's none at all -- a fully emptied docs tree still
/// collapses the index to its preamble plus an empty table rather than
/// leaving stale rows behind.
pub async fn update_index(
    client: &dyn ForumClient,
    index_url: &str,
    preamble: &str,
    rows: &[TableRow],
) -> Result<(), Error> {
    let body = nav_table::emit(preamble, rows);
    client.update_topic(index_url, &body).await?;
    Ok(())
}
