//! Chinese lunisolar calendar.
//!
//! The calendar here is driven entirely by the per-year month table in
//! [`table`]: each year's leap-month placement and month lengths are
//! decoded from one packed entry, and both conversion directions reduce
//! to day-offset walks against those lengths. The anchor is the epoch
//! Gregorian 1900-01-31, defined as day 1 of month 1 of lunisolar 1900.

use thiserror::Error;

use crate::date::Date;

pub mod fmt;
pub mod table;

/// Julian day number of Gregorian 1900-01-31, lunisolar 1900-01-01.
const EPOCH_JDN: u32 = 2415051;

/// Argument or derived date outside what the year table covers.
///
/// These are deterministic, caller-input errors; nothing is ever clamped
/// to the supported span.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum RangeError {
    /// Year outside the table span 1900..=2100.
    #[error("year {0} not in 1900..=2100")]
    Year(i32),
    /// Regular month index outside 1..=12.
    #[error("month {0} not in 1..=12")]
    Month(u32),
    /// A date with no counterpart in the supported span, e.g. a Gregorian
    /// date before the epoch or a leap month the year does not have.
    #[error("date outside the supported span")]
    Date,
}

/// Month name, `Common` for a regular month, `Leap` for a leap month.
///
/// A leap month carries the index of the regular month it follows, so the
/// calendar order of a year with leap month 2 is `Common(1)`, `Common(2)`,
/// `Leap(2)`, `Common(3)`, ... `Common(12)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Month {
    Common(u32),
    Leap(u32),
}

impl Month {
    /// Returns the month index, leap or not.
    pub fn num(&self) -> u32 {
        use Month::*;
        *match self {
            Common(v) | Leap(v) => v,
        }
    }
    /// Returns `true` for a leap month, `false` for a regular one.
    pub fn is_leap(&self) -> bool {
        matches!(self, Self::Leap(_))
    }
    /// Returns the length in days of this month instance within `year`.
    ///
    /// A `Leap` month that `year` does not contain is reported as
    /// [`RangeError::Date`].
    ///
    /// # Example
    ///
    /// ```
    /// use lunkalendaro::chinese::{Month::*, RangeError};
    ///
    /// assert_eq!(Ok(30), Common(2).days(2023));
    /// assert_eq!(Ok(29), Leap(2).days(2023));
    /// assert_eq!(Err(RangeError::Date), Leap(3).days(2023));
    /// ```
    pub fn days(&self, year: i32) -> Result<u32, RangeError> {
        match *self {
            Month::Common(m) => table::month_days(year, m),
            Month::Leap(m) => {
                if !(1..=12).contains(&m) {
                    return Err(RangeError::Month(m));
                }
                if table::leap_month(year)? != m {
                    return Err(RangeError::Date);
                }
                table::leap_month_days(year)
            }
        }
    }
    /// Returns the traditional text form of the month name.
    pub fn name(&self) -> String {
        fmt::month(*self)
    }
}

/// Returns the months of lunisolar `year` in calendar order, the leap
/// month (if any) inserted right after the regular month it follows.
///
/// This sequence is the whole leap-month bookkeeping of the crate: walks
/// that consume month lengths never track a leap flag, they just follow
/// the order given here.
///
/// # Example
///
/// ```
/// use lunkalendaro::chinese::{months, Month::*};
///
/// let months = months(2023).unwrap();
/// assert_eq!(13, months.len());
/// assert_eq!([Common(1), Common(2), Leap(2), Common(3)], months[..4]);
/// assert_eq!(12, lunkalendaro::chinese::months(2022).unwrap().len());
/// ```
pub fn months(year: i32) -> Result<Vec<Month>, RangeError> {
    let leap = table::leap_month(year)?;
    let mut months = Vec::with_capacity(if leap > 0 { 13 } else { 12 });
    for m in 1..=12 {
        months.push(Month::Common(m));
        if m == leap {
            months.push(Month::Leap(m));
        }
    }
    Ok(months)
}

/// A date in the Chinese lunisolar calendar.
///
/// Plain value, no invariants enforced on the public fields; use
/// [`LunisolarDate::new`] to have them checked against the year table, or
/// obtain instances from [`LunisolarDate::from_date`], which only
/// produces valid ones.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct LunisolarDate {
    /// Lunisolar year, 1900..=2100.
    pub year: i32,
    /// Month within the year.
    pub month: Month,
    /// Day of month, 1..=30.
    pub day: u32,
}

impl LunisolarDate {
    /// Creates a `LunisolarDate` after checking it designates a day that
    /// exists: the year in table range, the month instance present in
    /// that year, and the day within that month's actual length.
    ///
    /// # Example
    ///
    /// ```
    /// use lunkalendaro::chinese::{LunisolarDate, Month::*, RangeError};
    ///
    /// assert!(LunisolarDate::new(2023, Leap(2), 29).is_ok());
    /// assert_eq!(
    ///     Err(RangeError::Date),
    ///     LunisolarDate::new(2023, Leap(2), 30),
    /// );
    /// assert_eq!(
    ///     Err(RangeError::Date),
    ///     LunisolarDate::new(2022, Leap(2), 1),
    /// );
    /// ```
    pub fn new(year: i32, month: Month, day: u32) -> Result<Self, RangeError> {
        let days = month.days(year)?;
        if day == 0 || day > days {
            return Err(RangeError::Date);
        }
        Ok(LunisolarDate { year, month, day })
    }

    /// Converts a [`Date`] to the lunisolar calendar.
    ///
    /// Walks forward from the epoch, first consuming whole years, then the
    /// months of the landing year in calendar order. A day offset that
    /// exhausts a month lands on day 1 of the next month in that order, so
    /// exhausting the regular host month of a leap month lands on day 1 of
    /// the leap month, not of the following regular month.
    ///
    /// Dates before the epoch or after the last day of lunisolar 2100 are
    /// reported as [`RangeError::Date`].
    ///
    /// # Example
    ///
    /// ```
    /// use lunkalendaro::Date;
    /// use lunkalendaro::chinese::{LunisolarDate, Month::*};
    ///
    /// let date = Date::from_gregorian(2017, 7, 23).unwrap();
    /// assert_eq!(
    ///     Ok(LunisolarDate { year: 2017, month: Leap(6), day: 1 }),
    ///     LunisolarDate::from_date(date),
    /// );
    /// ```
    pub fn from_date(date: Date) -> Result<Self, RangeError> {
        let offset = date - Date::from_jdn(EPOCH_JDN);
        let mut offset = u32::try_from(offset).map_err(|_| RangeError::Date)?;

        let mut year = table::FIRST_YEAR;
        loop {
            if year > table::LAST_YEAR {
                return Err(RangeError::Date);
            }
            let days = table::year_days(year)?;
            if offset < days {
                break;
            }
            offset -= days;
            year += 1;
        }

        for month in months(year)? {
            let days = month.days(year)?;
            if offset < days {
                return Ok(LunisolarDate {
                    year,
                    month,
                    day: offset + 1,
                });
            }
            offset -= days;
        }
        unreachable!("offset {} exceeds months of {}", offset, year);
    }

    /// Converts the lunisolar date back to a [`Date`].
    ///
    /// Accumulates the day offset of the date from the epoch: whole years
    /// before `self.year`, then month lengths in calendar order up to the
    /// designated month instance, then `self.day - 1`.
    ///
    /// Only the table lookups are range-checked; a `day` past the month's
    /// real end is the caller's mistake and shifts into the next month,
    /// same as anywhere else in day arithmetic. Construct with
    /// [`LunisolarDate::new`] to rule that out.
    ///
    /// # Example
    ///
    /// ```
    /// use lunkalendaro::chinese::{LunisolarDate, Month::*};
    ///
    /// let lunar = LunisolarDate { year: 2033, month: Common(11), day: 1 };
    /// assert_eq!("2033-12-22", lunar.to_date().unwrap().iso_gregorian());
    /// ```
    pub fn to_date(&self) -> Result<Date, RangeError> {
        let mut offset: i32 = 0;
        for y in table::FIRST_YEAR..self.year {
            offset += table::year_days(y)? as i32;
        }

        let leap = table::leap_month(self.year)?;
        for m in 1..self.month.num() {
            offset += table::month_days(self.year, m)? as i32;
            if m == leap {
                offset += table::leap_month_days(self.year)? as i32;
            }
        }
        if self.month.is_leap() && leap == self.month.num() {
            // The leap month sits after its regular host month.
            offset += table::month_days(self.year, self.month.num())? as i32;
        }
        offset += self.day as i32 - 1;

        Ok(Date::from_jdn(EPOCH_JDN) + offset)
    }

    /// Returns the traditional text form of the date, e.g.
    /// 「癸卯(兔)年闰二月廿九」.
    pub fn name(&self) -> String {
        fmt::lunisolar(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Month::*;

    fn gregorian(y: i32, m: i32, d: i32) -> Date {
        Date::from_gregorian(y, m, d).unwrap()
    }

    #[test]
    fn epoch() {
        assert_eq!(EPOCH_JDN, gregorian(1900, 1, 31).jdn());
        assert_eq!(
            Ok(LunisolarDate {
                year: 1900,
                month: Common(1),
                day: 1,
            }),
            LunisolarDate::from_date(gregorian(1900, 1, 31)),
        );
    }

    #[test]
    fn new_year_days() {
        for (y, (gy, gm, gd)) in [
            (1900, (1900, 1, 31)),
            (1984, (1984, 2, 2)),
            (2000, (2000, 2, 5)),
            (2017, (2017, 1, 28)),
            (2023, (2023, 1, 22)),
            (2024, (2024, 2, 10)),
            (2100, (2100, 2, 9)),
        ] {
            let first = LunisolarDate {
                year: y,
                month: Common(1),
                day: 1,
            };
            assert_eq!(Ok(first), LunisolarDate::from_date(gregorian(gy, gm, gd)));
            assert_eq!(Ok(gregorian(gy, gm, gd)), first.to_date());
        }
    }

    #[test]
    fn from_date_dataset() {
        let dataset = [
            ((2000, 1, 1), (1999, Common(11), 25)),
            ((2017, 1, 27), (2016, Common(12), 30)),
            ((2017, 7, 22), (2017, Common(6), 29)),
            ((2017, 7, 23), (2017, Leap(6), 1)),
            ((2033, 12, 22), (2033, Common(11), 1)),
            ((2101, 1, 28), (2100, Common(12), 29)),
        ];
        for ((gy, gm, gd), (y, month, day)) in dataset {
            assert_eq!(
                Ok(LunisolarDate { year: y, month, day }),
                LunisolarDate::from_date(gregorian(gy, gm, gd)),
                "{gy:04}-{gm:02}-{gd:02}"
            );
        }
    }

    #[test]
    fn leap_month_boundary() {
        // Leap month 2 of 2023 runs 2023-03-22 through 2023-04-19. The day
        // after the regular second month ends must flip the leap flag
        // without advancing the month index.
        let dataset = [
            ((2023, 2, 20), (Common(2), 1)),
            ((2023, 3, 21), (Common(2), 30)),
            ((2023, 3, 22), (Leap(2), 1)),
            ((2023, 4, 19), (Leap(2), 29)),
            ((2023, 4, 20), (Common(3), 1)),
        ];
        for ((gy, gm, gd), (month, day)) in dataset {
            assert_eq!(
                Ok(LunisolarDate {
                    year: 2023,
                    month,
                    day,
                }),
                LunisolarDate::from_date(gregorian(gy, gm, gd)),
                "{gy:04}-{gm:02}-{gd:02}"
            );
        }
    }

    #[test]
    fn month_sequences() {
        let months_2023 = months(2023).unwrap();
        assert_eq!(13, months_2023.len());
        assert_eq!([Common(1), Common(2), Leap(2), Common(3)], months_2023[..4]);
        assert_eq!(Common(12), *months_2023.last().unwrap());

        let months_2022 = months(2022).unwrap();
        assert_eq!(12, months_2022.len());
        assert!(months_2022.iter().all(|m| !m.is_leap()));
    }

    #[test]
    fn no_leap_year_never_leaps() {
        // Month 11 of 2033 is a regular month in the table; converting it
        // back and forth must keep the common flag.
        let lunar = LunisolarDate {
            year: 2033,
            month: Common(11),
            day: 1,
        };
        let date = lunar.to_date().unwrap();
        assert_eq!(Ok(lunar), LunisolarDate::from_date(date));
    }

    #[test]
    fn out_of_range() {
        assert_eq!(
            Err(RangeError::Date),
            LunisolarDate::from_date(gregorian(1900, 1, 30)),
        );
        assert_eq!(
            Err(RangeError::Date),
            LunisolarDate::from_date(gregorian(2101, 1, 29)),
        );
        for year in [1899, 2101] {
            let lunar = LunisolarDate {
                year,
                month: Common(1),
                day: 1,
            };
            assert_eq!(Err(RangeError::Year(year)), lunar.to_date(), "{year}");
        }
    }

    #[test]
    fn new_validates() {
        assert!(LunisolarDate::new(2023, Common(2), 30).is_ok());
        assert!(LunisolarDate::new(2023, Leap(2), 29).is_ok());
        for (year, month, day) in [
            (2023, Leap(2), 30),  // leap month has 29 days
            (2023, Leap(3), 1),   // not the leap month of 2023
            (2022, Leap(2), 1),   // 2022 has no leap month
            (1900, Common(1), 30), // short month
            (2023, Common(2), 0),
        ] {
            assert_eq!(
                Err(RangeError::Date),
                LunisolarDate::new(year, month, day),
                "{year} {month:?} {day}"
            );
        }
        assert_eq!(
            Err(RangeError::Year(1899)),
            LunisolarDate::new(1899, Common(1), 1),
        );
        assert_eq!(
            Err(RangeError::Month(13)),
            LunisolarDate::new(2023, Common(13), 1),
        );
    }

    #[test]
    fn round_trip_all_days() {
        let epoch = Date::from_jdn(EPOCH_JDN);
        let mut total = 0;
        for year in table::FIRST_YEAR..=table::LAST_YEAR {
            total += table::year_days(year).unwrap() as i32;
        }
        for offset in 0..total {
            let date = epoch + offset;
            let lunar = LunisolarDate::from_date(date).unwrap();
            assert_eq!(Ok(date), lunar.to_date(), "{}", date.iso_gregorian());
        }
    }

    #[test]
    fn round_trip_all_lunar_dates() {
        for year in table::FIRST_YEAR..=table::LAST_YEAR {
            for month in months(year).unwrap() {
                let days = month.days(year).unwrap();
                for day in 1..=days {
                    let lunar = LunisolarDate { year, month, day };
                    let date = lunar.to_date().unwrap();
                    assert_eq!(
                        Ok(lunar),
                        LunisolarDate::from_date(date),
                        "{year} {month:?} {day}"
                    );
                }
            }
        }
    }
}
