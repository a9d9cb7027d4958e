use crate::types::table::COL_DATE;
use crate::types::window::DateWindow;
use polars::prelude::{col, lit, Expr, LazyFrame};

pub trait ObservationFrameFilterExt {
    /// Filters a measurement LazyFrame to the rows whose `date` falls inside `window`.
    /// Assumes the 'date' column is a 'YYYY-MM-DD' string.
    ///
    /// # Returns
    /// A new `LazyFrame` with the filter applied. Errors surface on `collect`.
    fn filter_window(self, window: &DateWindow) -> LazyFrame;
}

impl ObservationFrameFilterExt for LazyFrame {
    fn filter_window(self, window: &DateWindow) -> LazyFrame {
        self.filter(window_predicate(window))
    }
}

/// Builds the string comparison predicate for `window` on the `date` column.
pub fn window_predicate(window: &DateWindow) -> Expr {
    match window {
        DateWindow::HalfOpen { start, end } => col(COL_DATE)
            .gt_eq(lit(start.as_str()))
            .and(col(COL_DATE).lt(lit(end.as_str()))),
        DateWindow::Inclusive { start, end } => col(COL_DATE)
            .gt_eq(lit(start.as_str()))
            .and(col(COL_DATE).lt_eq(lit(end.as_str()))),
        DateWindow::Since { start } => col(COL_DATE).gt_eq(lit(start.as_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn dates_frame() -> LazyFrame {
        let dates = Column::new(
            "date".into(),
            vec!["2016-08-22", "2016-08-23", "2017-01-15", "2017-08-22", "2017-08-23"],
        );
        DataFrame::new(vec![dates]).unwrap().lazy()
    }

    fn collect_dates(frame: LazyFrame) -> Vec<String> {
        let df = frame.collect().unwrap();
        df.column("date")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_filter_trailing_year_is_half_open() {
        let dates = collect_dates(dates_frame().filter_window(&DateWindow::trailing_year()));
        assert_eq!(dates, vec!["2016-08-23", "2017-01-15", "2017-08-22"]);
    }

    #[test]
    fn test_filter_inclusive_keeps_both_ends() {
        let window = DateWindow::between("2016-08-23", "2017-08-22");
        let dates = collect_dates(dates_frame().filter_window(&window));
        assert_eq!(dates, vec!["2016-08-23", "2017-01-15", "2017-08-22"]);
    }

    #[test]
    fn test_filter_since() {
        let dates = collect_dates(dates_frame().filter_window(&DateWindow::since("2017-08-22")));
        assert_eq!(dates, vec!["2017-08-22", "2017-08-23"]);
    }

    #[test]
    fn test_filter_agrees_with_contains() {
        let window = DateWindow::between("2016-08-23", "2017-01-15");
        let dates = collect_dates(dates_frame().filter_window(&window));
        assert!(dates.iter().all(|d| window.contains(d)));
        assert_eq!(dates.len(), 2);
    }
}
