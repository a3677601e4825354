use chrono::NaiveDate;
use kernel::model::{
    availability::{DateRange, RoomAvailability},
    id::RoomId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct DateRangeResponse {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl From<DateRange> for DateRangeResponse {
    fn from(value: DateRange) -> Self {
        Self {
            start: value.start,
            end: value.end,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub room_id: RoomId,
    pub available_dates: Vec<NaiveDate>,
    pub occupied_ranges: Vec<DateRangeResponse>,
}

impl From<RoomAvailability> for AvailabilityResponse {
    fn from(value: RoomAvailability) -> Self {
        let RoomAvailability {
            room_id,
            available_dates,
            occupied_ranges,
        } = value;
        Self {
            room_id,
            available_dates,
            occupied_ranges: occupied_ranges.into_iter().map(Into::into).collect(),
        }
    }
}
