use ahash::AHashMap;
use tracing::debug;

/// The columns the converter understands. Any other header is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    PageName,
    IntentName,
    Trigger,
    BotPrompt,
    NextPage,
    ParameterSet,
    WebhookAction,
    SuggestedChips,
    Step,
    NextStep,
}

impl Column {
    pub const ALL: [Column; 10] = [
        Column::PageName,
        Column::IntentName,
        Column::Trigger,
        Column::BotPrompt,
        Column::NextPage,
        Column::ParameterSet,
        Column::WebhookAction,
        Column::SuggestedChips,
        Column::Step,
        Column::NextStep,
    ];

    /// The canonical header text, as written in the design sheet template.
    pub fn header(self) -> &'static str {
        match self {
            Column::PageName => "Page Name",
            Column::IntentName => "Intent Name",
            Column::Trigger => "Trigger Type & Example",
            Column::BotPrompt => "Bot Prompt",
            Column::NextPage => "Next Page/Transition",
            Column::ParameterSet => "Parameter Set",
            Column::WebhookAction => "Webhook Action",
            Column::SuggestedChips => "Suggested Chips",
            Column::Step => "Step",
            Column::NextStep => "Next Step",
        }
    }

    /// Header spellings accepted besides the canonical one.
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Column::Trigger => &["Trigger Type & User Example", "Trigger"],
            Column::NextPage => &["Next Page / Transition", "Next Page"],
            Column::SuggestedChips => &["Chips"],
            _ => &[],
        }
    }

    /// Resolves a raw header cell to a column, ignoring case and whitespace.
    pub fn from_header(raw: &str) -> Option<Column> {
        let key = header_key(raw);
        Column::ALL.into_iter().find(|col| {
            header_key(col.header()) == key || col.aliases().iter().any(|a| header_key(a) == key)
        })
    }
}

fn header_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Maps each known column to its position in a record.
#[derive(Debug, Clone, Default)]
pub struct ColumnLayout {
    positions: AHashMap<Column, usize>,
}

impl ColumnLayout {
    /// Builds the layout from a header row. The first occurrence of a column wins.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut positions = AHashMap::new();
        for (idx, raw) in headers.iter().enumerate() {
            match Column::from_header(raw.as_ref()) {
                Some(col) => {
                    positions.entry(col).or_insert(idx);
                }
                None => debug!("ignoring unrecognized column '{}'", raw.as_ref()),
            }
        }
        Self { positions }
    }

    pub fn contains(&self, column: Column) -> bool {
        self.positions.contains_key(&column)
    }

    /// Returns the raw cell for `column`, or `""` when the column is absent or the record is short.
    pub fn cell<'r, S: AsRef<str>>(&self, record: &'r [S], column: Column) -> &'r str {
        self.positions
            .get(&column)
            .and_then(|&idx| record.get(idx))
            .map(|s| s.as_ref())
            .unwrap_or("")
    }
}

/// A format-agnostic table of design rows: one header row plus records.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
    /// Source line of each record, when the reader knows it.
    pub lines: Vec<usize>,
}

impl Sheet {
    /// A sheet whose records sit on consecutive lines right after the header.
    pub fn new(headers: Vec<String>, records: Vec<Vec<String>>) -> Self {
        Self {
            headers,
            records,
            lines: Vec::new(),
        }
    }

    /// A sheet with the source line of every record, e.g. when blank lines were skipped.
    pub fn with_lines(headers: Vec<String>, records: Vec<Vec<String>>, lines: Vec<usize>) -> Self {
        Self {
            headers,
            records,
            lines,
        }
    }

    /// The 1-based source line of record `idx`. Without recorded lines the
    /// header is line 1 and records follow it.
    pub fn line_of(&self, idx: usize) -> usize {
        self.lines.get(idx).copied().unwrap_or(idx + 2)
    }

    pub fn layout(&self) -> ColumnLayout {
        ColumnLayout::from_headers(&self.headers)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
