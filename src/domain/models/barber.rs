use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A bookable window within a day, half-open on neither side: the closing
/// boundary is itself a valid slot start ("09:00"–"12:30" yields 12:30).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SlotWindow {
    pub start: String,
    pub end: String,
}

impl SlotWindow {
    pub fn new(start: &str, end: &str) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

/// Per-barber weekly schedule configuration. A missing weekday means the
/// barber never opens on that day. Stored as JSON on the barber row so
/// per-barber variation is data, not code.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct WeekPattern {
    pub monday: Option<Vec<SlotWindow>>,
    pub tuesday: Option<Vec<SlotWindow>>,
    pub wednesday: Option<Vec<SlotWindow>>,
    pub thursday: Option<Vec<SlotWindow>>,
    pub friday: Option<Vec<SlotWindow>>,
    pub saturday: Option<Vec<SlotWindow>>,
    pub sunday: Option<Vec<SlotWindow>>,
}

impl WeekPattern {
    pub fn windows_for(&self, weekday: Weekday) -> Option<&Vec<SlotWindow>> {
        match weekday {
            Weekday::Mon => self.monday.as_ref(),
            Weekday::Tue => self.tuesday.as_ref(),
            Weekday::Wed => self.wednesday.as_ref(),
            Weekday::Thu => self.thursday.as_ref(),
            Weekday::Fri => self.friday.as_ref(),
            Weekday::Sat => self.saturday.as_ref(),
            Weekday::Sun => self.sunday.as_ref(),
        }
    }

    fn full_day() -> Vec<SlotWindow> {
        vec![
            SlotWindow::new("09:00", "12:30"),
            SlotWindow::new("15:00", "17:30"),
        ]
    }

    /// The shop's stock week: Tue-Fri full days, afternoon-only Monday,
    /// Saturday with the earlier afternoon start, Sunday closed.
    pub fn standard() -> Self {
        Self {
            monday: Some(vec![SlotWindow::new("15:00", "17:30")]),
            tuesday: Some(Self::full_day()),
            wednesday: Some(Self::full_day()),
            thursday: Some(Self::full_day()),
            friday: Some(Self::full_day()),
            saturday: Some(vec![
                SlotWindow::new("09:00", "12:30"),
                SlotWindow::new("14:30", "17:00"),
            ]),
            sunday: None,
        }
    }

    /// Standard week except Monday afternoon runs until 18:00.
    pub fn late_monday() -> Self {
        let mut pattern = Self::standard();
        pattern.monday = Some(vec![SlotWindow::new("15:00", "18:00")]);
        pattern
    }

    /// Standard week with a trailing 18:00 slot appended to every open day.
    pub fn extended() -> Self {
        let mut pattern = Self::standard();
        for windows in [
            &mut pattern.monday,
            &mut pattern.tuesday,
            &mut pattern.wednesday,
            &mut pattern.thursday,
            &mut pattern.friday,
            &mut pattern.saturday,
        ]
        .into_iter()
        .flatten()
        {
            windows.push(SlotWindow::new("18:00", "18:00"));
        }
        pattern
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "standard" => Some(Self::standard()),
            "late_monday" => Some(Self::late_monday()),
            "extended" => Some(Self::extended()),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Barber {
    pub id: String,
    pub name: String,
    pub email: String,
    pub active: bool,
    pub pattern_json: String,
    pub created_at: DateTime<Utc>,
}

impl Barber {
    pub fn new(name: String, email: String, pattern: &WeekPattern) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            active: true,
            pattern_json: serde_json::to_string(pattern).unwrap_or_else(|_| "{}".to_string()),
            created_at: Utc::now(),
        }
    }

    pub fn pattern(&self) -> WeekPattern {
        serde_json::from_str(&self.pattern_json).unwrap_or_default()
    }
}
