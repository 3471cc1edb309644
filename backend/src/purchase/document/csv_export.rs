use super::PurchaseRequest;
use mms_common::purchase::TABULAR_HEADER;
use std::path::Path;

pub(super) fn write(request: &PurchaseRequest, path: &Path) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(TABULAR_HEADER)?;
    for line in &request.lines {
        writer.write_record(line.record())?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::purchase::document::tests::bolt_and_nut;
    use chrono::NaiveDate;

    fn read_back(path: &Path) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();
        reader
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect()
    }

    #[test]
    fn header_then_selected_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pr.csv");
        let request = PurchaseRequest::from_spares(
            &bolt_and_nut()[..1],
            5,
            NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
        );

        write(&request, &path).unwrap();

        assert_eq!(
            read_back(&path),
            vec![
                vec!["ID", "Name", "Stock", "Location", "Suggested Qty"],
                vec!["1", "Bolt", "2", "A1", "8"],
            ]
        );
    }

    #[test]
    fn header_is_written_for_empty_requests() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        let request = PurchaseRequest {
            date: NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
            lines: Vec::new(),
        };

        write(&request, &path).unwrap();

        assert_eq!(read_back(&path), vec![TABULAR_HEADER.to_vec()]);
    }

    #[test]
    fn names_with_commas_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quoted.csv");
        let mut spares = bolt_and_nut();
        spares[0].name = "Bolt, M8".into();
        let request =
            PurchaseRequest::from_spares(&spares, 5, NaiveDate::from_ymd_opt(2024, 5, 17).unwrap());

        write(&request, &path).unwrap();

        let rows = read_back(&path);
        assert_eq!(rows[1][1], "Bolt, M8");
        assert_eq!(rows[2], vec!["2", "Nut", "10", "A2", "0"]);
    }
}
