use chrono::NaiveDate;
use tracing::warn;

/// Date layout used by the special events spreadsheet.
pub const EVENT_DATE_FORMAT: &str = "%m/%d/%Y";

/// One row of the special events sheet with both dates parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialEventRecord {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub lot: String,
}

impl SpecialEventRecord {
    pub fn parse(start: &str, end: &str, lot: &str) -> Result<Self, chrono::ParseError> {
        Ok(Self {
            start: NaiveDate::parse_from_str(start.trim(), EVENT_DATE_FORMAT)?,
            end: NaiveDate::parse_from_str(end.trim(), EVENT_DATE_FORMAT)?,
            lot: lot.trim().to_string(),
        })
    }

    /// Every closed day in `start..=end`. Empty when the range is inverted.
    pub fn days(&self) -> impl Iterator<Item = SpecialEventDay> + '_ {
        std::iter::successors(Some(self.start), |date| date.succ_opt())
            .take_while(move |date| *date <= self.end)
            .map(move |date| SpecialEventDay {
                date,
                lot: self.lot.clone(),
            })
    }
}

/// A single lot closed on a single day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialEventDay {
    pub date: NaiveDate,
    pub lot: String,
}

/// Expanded special event days, in sheet order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecialEventCalendar {
    days: Vec<SpecialEventDay>,
}

impl SpecialEventCalendar {
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = SpecialEventRecord>,
    {
        let mut days = Vec::new();
        for record in records {
            if record.start > record.end {
                warn!(
                    lot = %record.lot,
                    start = %record.start,
                    end = %record.end,
                    "special event ends before it starts; no days recorded"
                );
                continue;
            }
            days.extend(record.days());
        }

        Self { days }
    }

    pub fn days(&self) -> &[SpecialEventDay] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn is_closed(&self, date: NaiveDate, lot: &str) -> bool {
        self.days
            .iter()
            .any(|day| day.date == date && day.lot == lot)
    }
}
