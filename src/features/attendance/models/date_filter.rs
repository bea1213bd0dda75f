use chrono::NaiveDate;

/// Which inclusive date bounds a listing or report was asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    NoBound,
    LowerOnly(NaiveDate),
    UpperOnly(NaiveDate),
    Range(NaiveDate, NaiveDate),
}

impl DateFilter {
    pub fn from_bounds(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        match (from, to) {
            (None, None) => DateFilter::NoBound,
            (Some(from), None) => DateFilter::LowerOnly(from),
            (None, Some(to)) => DateFilter::UpperOnly(to),
            (Some(from), Some(to)) => DateFilter::Range(from, to),
        }
    }

    pub fn from(&self) -> Option<NaiveDate> {
        match *self {
            DateFilter::LowerOnly(from) | DateFilter::Range(from, _) => Some(from),
            _ => None,
        }
    }

    pub fn to(&self) -> Option<NaiveDate> {
        match *self {
            DateFilter::UpperOnly(to) | DateFilter::Range(_, to) => Some(to),
            _ => None,
        }
    }

    pub fn is_bounded(&self) -> bool {
        !matches!(self, DateFilter::NoBound)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            DateFilter::NoBound => true,
            DateFilter::LowerOnly(from) => date >= from,
            DateFilter::UpperOnly(to) => date <= to,
            DateFilter::Range(from, to) => from <= date && date <= to,
        }
    }
}
