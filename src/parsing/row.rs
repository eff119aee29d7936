use super::text::clean_cell;
use crate::error::RowError;
use crate::sheet::{Column, ColumnLayout};

/// One design-sheet record with its cells cleaned but not yet interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    /// 1-based sheet line; the header row is line 1.
    pub line: usize,
    pub page_name: String,
    pub intent_name: Option<String>,
    pub trigger_spec: String,
    pub bot_prompt: String,
    pub next_page_spec: String,
    pub parameter_spec: String,
    pub webhook_spec: String,
    pub chips_spec: String,
    pub step: Option<String>,
    pub next_step: Option<String>,
}

/// Parses one record against a column layout.
///
/// Optional cells that are missing or blank become empty strings. A blank
/// page name, trigger, or bot prompt rejects the row.
pub fn parse_row<S: AsRef<str>>(
    layout: &ColumnLayout,
    record: &[S],
    line: usize,
) -> Result<Row, RowError> {
    let cell = |column: Column| clean_cell(layout.cell(record, column));
    let required = |column: Column| {
        let value = cell(column);
        if value.is_empty() {
            Err(RowError::RequiredFieldMissing {
                line,
                column: column.header(),
            })
        } else {
            Ok(value)
        }
    };
    let optional = |column: Column| Some(cell(column)).filter(|v| !v.is_empty());

    Ok(Row {
        line,
        page_name: required(Column::PageName)?,
        intent_name: optional(Column::IntentName),
        trigger_spec: required(Column::Trigger)?,
        bot_prompt: required(Column::BotPrompt)?,
        next_page_spec: cell(Column::NextPage),
        parameter_spec: cell(Column::ParameterSet),
        webhook_spec: cell(Column::WebhookAction),
        chips_spec: cell(Column::SuggestedChips),
        step: optional(Column::Step),
        next_step: optional(Column::NextStep),
    })
}
