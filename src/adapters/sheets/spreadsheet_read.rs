use error_stack::{report, ResultExt};
use tracing::instrument;

use super::{spreadsheet_manager::SpreadsheetManager, string_rows::IntoStringRows};
use crate::domain::sheets::a1_notation::A1Notation;
use crate::ports::spreadsheet::{SpreadsheetRead, SpreadsheetReadError};

#[async_trait::async_trait]
impl SpreadsheetRead for SpreadsheetManager {
    #[instrument(skip(self), fields(spreadsheet_id = %self.spreadsheet_id))]
    async fn read_rows(
        &self,
        range: &A1Notation,
    ) -> error_stack::Result<Vec<Vec<String>>, SpreadsheetReadError> {
        let (_, value_range) = self
            .hub
            .spreadsheets()
            .values_get(&self.spreadsheet_id, range.as_ref())
            .doit()
            .await
            .map_err(|error| {
                report!(SpreadsheetReadError::FailedToFetchRange {
                    range: range.to_string(),
                    reason: error.to_string(),
                })
            })
            .attach_printable_lazy(|| {
                format!(
                    "Check the spreadsheet id {} and that the sheet is shared with the service account",
                    self.spreadsheet_id
                )
            })?;

        // An empty range comes back without `values` at all.
        let rows = value_range.values.unwrap_or_default().into_string_rows();
        tracing::debug!(rows = rows.len(), "range fetched");

        Ok(rows)
    }
}
