use csv::{ReaderBuilder, StringRecord, Trim};

use crate::domain::PropertyFeatures;

const FEATURE_COLUMNS: usize = 5;

// Normalised header spellings per feature, in feature order.
const HEADER_ALIASES: [&[&str]; FEATURE_COLUMNS] = [
    &["avgareaincome", "income"],
    &["avgareahouseage", "houseage", "age"],
    &["avgareanumberofrooms", "rooms"],
    &["avgareanumberofbedrooms", "bedrooms"],
    &["areapopulation", "population"],
];

/// Where each feature lives in a data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    indices: [usize; FEATURE_COLUMNS],
    matched_by_header: bool,
}

impl ColumnLayout {
    pub const POSITIONAL: ColumnLayout = ColumnLayout {
        indices: [0, 1, 2, 3, 4],
        matched_by_header: false,
    };

    /// Uses header names when all five features are present, otherwise the first
    /// five columns in order.
    pub fn from_header(header: &StringRecord) -> Self {
        let names: Vec<String> = header.iter().map(normalize_header).collect();

        let mut indices = [0usize; FEATURE_COLUMNS];
        for (slot, aliases) in indices.iter_mut().zip(HEADER_ALIASES) {
            match names.iter().position(|n| aliases.contains(&n.as_str())) {
                Some(index) => *slot = index,
                None => return Self::POSITIONAL,
            }
        }

        Self {
            indices,
            matched_by_header: true,
        }
    }

    pub fn matched_by_header(&self) -> bool {
        self.matched_by_header
    }

    pub fn parse_row(&self, record: &StringRecord) -> Result<PropertyFeatures, RowParseError> {
        let mut values = [0f64; FEATURE_COLUMNS];

        for (feature, (slot, index)) in values.iter_mut().zip(self.indices).enumerate() {
            let column = PropertyFeatures::FIELD_NAMES[feature];
            let raw = record.get(index).ok_or(RowParseError::MissingColumn {
                column,
                found: record.len(),
            })?;
            *slot = raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| RowParseError::NotNumeric {
                    column,
                    value: raw.to_string(),
                })?;
        }

        Ok(PropertyFeatures::from_array(values))
    }
}

/// An uploaded file split into its header layout and non-blank data rows.
#[derive(Debug, Clone)]
pub struct BatchSheet {
    pub layout: ColumnLayout,
    pub rows: Vec<StringRecord>,
}

impl BatchSheet {
    pub fn parse(text: &str) -> Result<Self, SheetError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let mut records = reader
            .records()
            .filter(|r| r.as_ref().map_or(true, |record| !is_blank(record)));

        let header = match records.next() {
            Some(Ok(header)) => header,
            Some(Err(e)) => return Err(SheetError::MalformedHeader(e.to_string())),
            None => return Err(SheetError::MalformedHeader("file is empty".to_string())),
        };
        let layout = ColumnLayout::from_header(&header);

        // A record the reader cannot decode still counts as a row so it is reported as failed.
        let rows = records
            .map(|r| r.unwrap_or_else(|_| StringRecord::new()))
            .collect();

        Ok(Self { layout, rows })
    }
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

fn normalize_header(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum RowParseError {
    #[error("missing column {column} (row has {found} columns)")]
    MissingColumn { column: &'static str, found: usize },
    #[error("column {column}: {value:?} is not a finite number")]
    NotNumeric { column: &'static str, value: String },
}

#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("malformed header: {0}")]
    MalformedHeader(String),
}
