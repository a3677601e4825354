use crate::model::id::RoomId;
use chrono::{Days, NaiveDate};
use shared::error::{AppError, AppResult};

// 両端を含む日付の範囲
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

// キャンセルされていない予約の滞在期間
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayPeriod {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl StayPeriod {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            check_in,
            check_out,
        }
    }

    // チェックアウト日は空室扱いなので占有はその前日まで
    fn occupied_within(&self, window: DateRange) -> Option<DateRange> {
        if self.check_out < window.start || self.check_in > window.end {
            return None;
        }
        let start = self.check_in.max(window.start);
        let end = self
            .check_out
            .checked_sub_days(Days::new(1))?
            .min(window.end);
        (start <= end).then_some(DateRange { start, end })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomAvailability {
    pub room_id: RoomId,
    pub available_dates: Vec<NaiveDate>,
    pub occupied_ranges: Vec<DateRange>,
}

impl RoomAvailability {
    // 占有範囲は開始日順に並べるだけで結合はしない
    pub fn calculate(room_id: RoomId, start: NaiveDate, end: NaiveDate, stays: &[StayPeriod]) -> Self {
        let window = DateRange { start, end };

        let mut occupied_ranges: Vec<DateRange> = stays
            .iter()
            .filter_map(|stay| stay.occupied_within(window))
            .collect();
        occupied_ranges.sort_by_key(|range| range.start);

        let available_dates = start
            .iter_days()
            .take_while(|date| *date <= end)
            .filter(|date| !occupied_ranges.iter().any(|range| range.contains(*date)))
            .collect();

        Self {
            room_id,
            available_dates,
            occupied_ranges,
        }
    }
}

pub fn validate_window(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> AppResult<()> {
    if start > end {
        return Err(AppError::ValidationError(
            "La fecha de inicio debe ser anterior a la fecha de fin".into(),
        ));
    }
    if start < today {
        return Err(AppError::ValidationError(
            "La fecha de inicio no puede ser en el pasado".into(),
        ));
    }
    Ok(())
}
