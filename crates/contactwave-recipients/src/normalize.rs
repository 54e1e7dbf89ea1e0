// SPDX-FileCopyrightText: 2026 ContactWave Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversion of raw spreadsheet rows into [`Recipient`] records.

use contactwave_core::{HeaderSet, RawRow, Recipient, RecipientIdentity};
use tracing::debug;

use crate::columns::ColumnLayout;

/// Normalize selected rows against the header set they were fetched with.
///
/// Output order matches input order. The same inputs always produce the
/// same recipients.
pub fn normalize(rows: &[RawRow], headers: &HeaderSet) -> Vec<Recipient> {
    let layout = ColumnLayout::resolve(headers);
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            if row.len() != headers.len() {
                // Out-of-range cells read as empty so one bad row cannot
                // abort the whole batch.
                debug!(
                    row = i,
                    cells = row.len(),
                    headers = headers.len(),
                    "row length differs from header set"
                );
            }
            normalize_row(row, headers, &layout)
        })
        .collect()
}

/// Normalize one row using an already-resolved layout.
///
/// Every header becomes a field holding its trimmed cell; for duplicate
/// header names the first column is kept. Identity fields come from the
/// layout, and the resolved phone always takes precedence over any header
/// literally named like an identity key.
pub fn normalize_row(row: &RawRow, headers: &HeaderSet, layout: &ColumnLayout) -> Recipient {
    let mut fields: Vec<(String, String)> = Vec::with_capacity(headers.len());
    for (index, name) in headers.iter().enumerate() {
        if fields.iter().any(|(k, _)| k == name) {
            continue;
        }
        fields.push((name.to_string(), row.cell(index).to_string()));
    }

    let pick = |index: Option<usize>| index.map(|i| row.cell(i).to_string()).unwrap_or_default();
    let identity = RecipientIdentity {
        first_name: pick(layout.first_name),
        middle_name: pick(layout.middle_name),
        last_name: pick(layout.last_name),
        phone: pick(layout.phone),
        email: pick(layout.email),
        unique_id: pick(layout.unique_id),
    };

    Recipient::new(identity, fields)
}

/// Recipient for a test send: the entered phone number and nothing else.
pub fn normalize_test(phone: &str) -> Recipient {
    Recipient::test(phone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn headers(names: &[&str]) -> HeaderSet {
        names.iter().copied().collect()
    }

    fn row(cells: &[&str]) -> RawRow {
        cells.iter().copied().collect()
    }

    #[test]
    fn normalizes_standard_row() {
        let h = headers(&["Unique ID", "First Name", "Mobile Number", "Email Address"]);
        let out = normalize(&[row(&["7", "Asha", "9876543210", "a@x.com"])], &h);

        assert_eq!(out.len(), 1);
        let id = out[0].identity();
        assert_eq!(id.unique_id, "7");
        assert_eq!(id.first_name, "Asha");
        assert_eq!(id.phone, "9876543210");
        assert_eq!(id.email, "a@x.com");
        assert_eq!(id.middle_name, "");
        assert_eq!(id.last_name, "");
        assert_eq!(out[0].field("Mobile Number"), Some("9876543210"));
    }

    #[test]
    fn missing_phone_column_yields_empty_phone() {
        let h = headers(&["First Name", "Email Address"]);
        let out = normalize(&[row(&["Asha", "a@x.com"])], &h);
        assert_eq!(out[0].phone(), "");
        assert_eq!(out[0].identity().first_name, "Asha");
    }

    #[test]
    fn missing_middle_name_is_empty_not_error() {
        let h = headers(&["First Name", "Surname", "Mobile"]);
        let out = normalize(&[row(&["Asha", "Rao", "9876543210"])], &h);
        assert_eq!(out[0].identity().middle_name, "");
        assert_eq!(out[0].identity().last_name, "Rao");
    }

    #[test]
    fn short_row_reads_empty_cells() {
        let h = headers(&["First Name", "Email Address", "Mobile Number"]);
        let out = normalize(&[row(&["Asha"])], &h);
        assert_eq!(out[0].phone(), "");
        assert_eq!(out[0].field("Email Address"), Some(""));
    }

    #[test]
    fn cells_are_trimmed() {
        let h = headers(&["Mobile Number", "City"]);
        let out = normalize(&[row(&["  98765 43210 \t", " Pune "])], &h);
        assert_eq!(out[0].phone(), "98765 43210");
        assert_eq!(out[0].field("City"), Some("Pune"));
    }

    #[test]
    fn resolved_phone_overrides_header_named_phone() {
        let h = headers(&["phone", "Mobile Number"]);
        let out = normalize(&[row(&["old", "9876543210"])], &h);
        assert_eq!(out[0].phone(), "9876543210");
        assert_eq!(out[0].field("phone"), Some("old"));

        let json = serde_json::to_value(&out[0]).unwrap();
        assert_eq!(json["phone"], "9876543210");
    }

    #[test]
    fn wire_key_headers_survive_serialization() {
        let h = headers(&["firstName", "email", "Mobile", "lastName"]);
        let out = normalize(&[row(&["Asha", "a@x.com", "9876543210", "Rao"])], &h);
        assert_eq!(out[0].identity().first_name, "Asha");
        assert_eq!(out[0].identity().last_name, "Rao");

        let json = serde_json::to_value(&out[0]).unwrap();
        assert_eq!(json["firstName"], "Asha");
        assert_eq!(json["lastName"], "Rao");
        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json["phone"], "9876543210");
        assert_eq!(json["Mobile"], "9876543210");
    }

    #[test]
    fn duplicate_headers_keep_first_column() {
        let h = headers(&["Email", "Email"]);
        let out = normalize(&[row(&["first@x.com", "second@x.com"])], &h);
        assert_eq!(out[0].fields().len(), 1);
        assert_eq!(out[0].field("Email"), Some("first@x.com"));
        assert_eq!(out[0].identity().email, "first@x.com");
    }

    #[test]
    fn order_follows_input_rows() {
        let h = headers(&["Mobile"]);
        let out = normalize(&[row(&["1"]), row(&["2"]), row(&["3"])], &h);
        let phones: Vec<_> = out.iter().map(|r| r.phone()).collect();
        assert_eq!(phones, ["1", "2", "3"]);
    }

    #[test]
    fn test_recipient_has_only_phone() {
        let r = normalize_test("9998887776");
        assert_eq!(r.phone(), "9998887776");
        assert!(r.fields().is_empty());
    }

    fn phone_alias() -> impl Strategy<Value = &'static str> {
        prop::sample::select(crate::columns::ColumnRole::Phone.aliases().to_vec())
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(
            cells in prop::collection::vec(prop::collection::vec("[ a-z0-9]{0,6}", 0..5), 0..8),
        ) {
            let h = headers(&["Mobile Number", "First Name", "Middle Name", "Email"]);
            let rows: Vec<RawRow> = cells.into_iter().map(RawRow::new).collect();
            prop_assert_eq!(normalize(&rows, &h), normalize(&rows, &h));
        }

        #[test]
        fn phone_found_at_any_position(
            alias in phone_alias(),
            position in 0usize..5,
            phone in "[0-9]{10}",
        ) {
            let mut names: Vec<String> = (0..4).map(|i| format!("Extra {i}")).collect();
            let position = position.min(names.len());
            names.insert(position, alias.to_string());
            let h = HeaderSet::new(names);

            let mut cells = vec!["x".to_string(); 5];
            cells[position] = format!("  {phone} ");
            let out = normalize(&[RawRow::new(cells)], &h);
            prop_assert_eq!(out[0].phone(), phone.as_str());
        }
    }
}
