//! tabula_engine - Spreadsheet engine: addressing, cell storage, formulas.

pub mod builtins;
pub mod engine;

#[cfg(test)]
mod tests {
    use crate::engine::*;

    fn store(cells: &[(&str, &str)]) -> CellStore {
        cells
            .iter()
            .map(|(addr, raw)| (CellRef::from_str(addr).unwrap(), *raw))
            .collect()
    }

    #[test]
    fn test_from_str_single_letter_columns() {
        let a1 = CellRef::from_str("A1").unwrap();
        assert_eq!(a1.row, 0);
        assert_eq!(a1.col, 0);

        let b1 = CellRef::from_str("B1").unwrap();
        assert_eq!(b1.row, 0);
        assert_eq!(b1.col, 1);

        let z1 = CellRef::from_str("Z1").unwrap();
        assert_eq!(z1.row, 0);
        assert_eq!(z1.col, 25);
    }

    #[test]
    fn test_from_str_multi_letter_columns() {
        assert_eq!(CellRef::from_str("AA1").unwrap().col, 26);
        assert_eq!(CellRef::from_str("AZ1").unwrap().col, 51);
        assert_eq!(CellRef::from_str("BA1").unwrap().col, 52);
    }

    #[test]
    fn test_from_str_case_insensitive() {
        let lower = CellRef::from_str("c3").unwrap();
        assert_eq!(lower, CellRef::new(2, 2));
    }

    #[test]
    fn test_from_str_invalid_inputs() {
        assert!(CellRef::from_str("").is_none());
        assert!(CellRef::from_str("123").is_none());
        assert!(CellRef::from_str("ABC").is_none());
        assert!(CellRef::from_str("A0").is_none());
        assert!(CellRef::from_str("1A").is_none());
        assert!(CellRef::from_str("A 1").is_none());
    }

    #[test]
    fn test_address_round_trip_over_sample_grid() {
        for row in 0..15 {
            for col in 0..10 {
                let addr = cell_address(row, col);
                assert_eq!(CellRef::from_str(&addr), Some(CellRef::new(row, col)));
            }
        }
    }

    #[test]
    fn test_unset_references_contribute_zero() {
        let store = store(&[("A1", "4")]);
        assert_eq!(evaluate("=A1+B7", &store), "4");
        assert_eq!(evaluate("=SUM(A1:C9)", &store), "4");
        assert_eq!(evaluate("=B7", &store), "0");
    }

    #[test]
    fn test_budget_sheet() {
        let store = store(&[
            ("A1", "Rent"),
            ("B1", "1200"),
            ("A2", "Food"),
            ("B2", "350.5"),
            ("A3", "Misc"),
            ("B3", "n/a"),
            ("B4", "=SUM(B1:B3)"),
            ("B5", "=AVERAGE(B1:B3)"),
            ("B6", "=(B1+B2)*12"),
        ]);

        let display: Vec<String> = ["B4", "B5", "B6", "A1"]
            .iter()
            .map(|addr| evaluate(store.get_addr(addr), &store))
            .collect();
        assert_eq!(display, vec!["1550.5", "775.25", "18606", "Rent"]);
    }

    #[test]
    fn test_evaluating_every_cell_leaves_store_untouched() {
        let store = store(&[("A1", "=1/0"), ("A2", "=A1"), ("A3", "x")]);
        let before = store.clone();
        let display: Vec<String> = store.values().map(|(_, raw)| evaluate(raw, &store)).collect();
        assert_eq!(display, vec![ERROR_MARKER, "0", "x"]);
        assert_eq!(store, before);
    }
}
