use csv::StringRecord;

use scoutout::application::services::{BatchSheet, ColumnLayout, RowParseError};

#[test]
fn given_dataset_header_when_parsing_then_columns_matched_by_name() {
    let text = "Area Population,Avg. Area Income,Avg. Area House Age,Avg. Area Number of Rooms,Avg. Area Number of Bedrooms\n\
                35000,75000,5,7,4\n";

    let sheet = BatchSheet::parse(text).unwrap();

    assert!(sheet.layout.matched_by_header());
    let features = sheet.layout.parse_row(&sheet.rows[0]).unwrap();
    assert_eq!(features.as_array(), [75_000.0, 5.0, 7.0, 4.0, 35_000.0]);
}

#[test]
fn given_unrecognised_header_when_parsing_then_positional_layout_used() {
    let text = "a,b,c,d,e\n75000,5,7,4,35000\n";

    let sheet = BatchSheet::parse(text).unwrap();

    assert_eq!(sheet.layout, ColumnLayout::POSITIONAL);
    assert_eq!(sheet.rows.len(), 1);
}

#[test]
fn given_blank_lines_when_parsing_then_they_are_not_rows() {
    let text = "\n\nincome,age,rooms,bedrooms,population\n\n75000,5,7,4,35000\n ,  , \n62000,22,6,3,120000\n\n";

    let sheet = BatchSheet::parse(text).unwrap();

    assert!(sheet.layout.matched_by_header());
    assert_eq!(sheet.rows.len(), 2);
}

#[test]
fn given_header_only_file_when_parsing_then_no_rows() {
    let sheet = BatchSheet::parse("income,age,rooms,bedrooms,population\n").unwrap();

    assert!(sheet.rows.is_empty());
}

#[test]
fn given_empty_file_when_parsing_then_malformed_header() {
    assert!(BatchSheet::parse("").is_err());
    assert!(BatchSheet::parse("\n \n").is_err());
}

#[test]
fn given_short_row_when_parsing_row_then_missing_column() {
    let record = StringRecord::from(vec!["75000", "5", "7"]);

    let err = ColumnLayout::POSITIONAL.parse_row(&record).unwrap_err();

    assert!(matches!(
        err,
        RowParseError::MissingColumn {
            column: "avgAreaNumberOfBedrooms",
            found: 3
        }
    ));
}

#[test]
fn given_text_in_numeric_column_when_parsing_row_then_not_numeric() {
    let record = StringRecord::from(vec!["75000", "old", "7", "4", "35000"]);

    let err = ColumnLayout::POSITIONAL.parse_row(&record).unwrap_err();

    assert!(matches!(err, RowParseError::NotNumeric { column: "avgAreaHouseAge", .. }));
}

#[test]
fn given_nan_literal_when_parsing_row_then_rejected() {
    let record = StringRecord::from(vec!["NaN", "5", "7", "4", "35000"]);

    assert!(ColumnLayout::POSITIONAL.parse_row(&record).is_err());
}
