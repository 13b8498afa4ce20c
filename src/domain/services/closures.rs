use crate::domain::models::closure::{
    ClosureType, RecurringClosure, RemovedAutoClosure, SpecificClosure,
};
use crate::domain::models::schedule::ScheduleDay;
use chrono::{Datelike, NaiveDate, Weekday};
use tracing::warn;

/// Effective closure state for one (barber, date) after layering every
/// override source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosureDecision {
    Open,
    Closed(ClosureType),
}

impl ClosureDecision {
    pub fn is_closed(&self) -> bool {
        matches!(self, ClosureDecision::Closed(_))
    }
}

pub fn weekday_index(weekday: Weekday) -> i32 {
    weekday.num_days_from_monday() as i32
}

/// Collapses a set of closure types into one decision. FULL dominates;
/// MORNING and AFTERNOON together cover the whole day, which the legacy
/// data uses as an alternative encoding of a full closure.
fn collapse(types: &[ClosureType]) -> Option<ClosureType> {
    if types.is_empty() {
        return None;
    }
    if types.contains(&ClosureType::Full) {
        return Some(ClosureType::Full);
    }
    let morning = types.contains(&ClosureType::Morning);
    let afternoon = types.contains(&ClosureType::Afternoon);
    match (morning, afternoon) {
        (true, true) => Some(ClosureType::Full),
        (true, false) => Some(ClosureType::Morning),
        (false, true) => Some(ClosureType::Afternoon),
        (false, false) => None,
    }
}

/// Resolves the closure decision for one date with strict precedence:
/// specific closures beat recurring rules, and a recurring rule is
/// suppressed by a removed-auto ledger entry of its type or by an
/// explicitly reopened schedule day. `specific`, `removed` must already be
/// filtered to the date; `recurring` is the barber's full rule set.
pub fn decide(
    date: NaiveDate,
    specific: &[SpecificClosure],
    recurring: &[RecurringClosure],
    removed: &[RemovedAutoClosure],
    schedule: Option<&ScheduleDay>,
) -> ClosureDecision {
    if !specific.is_empty() {
        // Explicit beats inferred: a specific closure coexisting with a
        // removed-auto ledger entry of the same type is inconsistent data,
        // but the closure still applies.
        for closure in specific {
            if removed.iter().any(|r| r.kind() == closure.kind()) {
                warn!(
                    barber_id = %closure.barber_id,
                    date = %date,
                    closure_type = %closure.closure_type,
                    "specific closure conflicts with removed-auto ledger entry; closure wins"
                );
            }
        }
        let kinds: Vec<ClosureType> = specific.iter().map(|c| c.kind()).collect();
        if let Some(kind) = collapse(&kinds) {
            return ClosureDecision::Closed(kind);
        }
        return ClosureDecision::Open;
    }

    if schedule.is_some_and(|s| s.is_exception) {
        return ClosureDecision::Open;
    }

    let weekday = weekday_index(date.weekday());
    let kinds: Vec<ClosureType> = recurring
        .iter()
        .filter(|rule| rule.weekday == weekday)
        .map(|rule| rule.kind())
        .filter(|kind| !removed.iter().any(|r| r.kind() == *kind))
        .collect();

    match collapse(&kinds) {
        Some(kind) => ClosureDecision::Closed(kind),
        None => ClosureDecision::Open,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::closure::AUTO_CLOSURE_CREATOR;

    fn date() -> NaiveDate {
        // a Monday
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn specific(kind: ClosureType) -> SpecificClosure {
        SpecificClosure::new("b1".into(), date(), kind, None, "admin".into())
    }

    fn recurring(kind: ClosureType) -> RecurringClosure {
        RecurringClosure::new("b1".into(), 0, kind)
    }

    fn removed(kind: ClosureType) -> RemovedAutoClosure {
        RemovedAutoClosure::new("b1".into(), date(), kind, None)
    }

    #[test]
    fn open_without_rules() {
        assert_eq!(decide(date(), &[], &[], &[], None), ClosureDecision::Open);
    }

    #[test]
    fn specific_beats_recurring() {
        let decision = decide(
            date(),
            &[specific(ClosureType::Morning)],
            &[recurring(ClosureType::Full)],
            &[],
            None,
        );
        assert_eq!(decision, ClosureDecision::Closed(ClosureType::Morning));
    }

    #[test]
    fn recurring_applies_on_matching_weekday_only() {
        let rules = [RecurringClosure::new("b1".into(), 3, ClosureType::Full)];
        assert_eq!(decide(date(), &[], &rules, &[], None), ClosureDecision::Open);

        let rules = [recurring(ClosureType::Full)];
        assert_eq!(
            decide(date(), &[], &rules, &[], None),
            ClosureDecision::Closed(ClosureType::Full)
        );
    }

    #[test]
    fn removed_ledger_suppresses_recurring() {
        let rules = [recurring(ClosureType::Full)];
        let ledger = [removed(ClosureType::Full)];
        assert_eq!(
            decide(date(), &[], &rules, &ledger, None),
            ClosureDecision::Open
        );
    }

    #[test]
    fn exception_flag_suppresses_recurring() {
        let rules = [recurring(ClosureType::Morning)];
        let mut day =
            crate::domain::models::schedule::ScheduleDay::new("b1".into(), date(), &[]);
        day.is_exception = true;
        assert_eq!(
            decide(date(), &[], &rules, &[], Some(&day)),
            ClosureDecision::Open
        );
    }

    #[test]
    fn morning_plus_afternoon_collapse_to_full() {
        let decision = decide(
            date(),
            &[specific(ClosureType::Morning), specific(ClosureType::Afternoon)],
            &[],
            &[],
            None,
        );
        assert_eq!(decision, ClosureDecision::Closed(ClosureType::Full));
    }

    #[test]
    fn conflicting_ledger_loses_to_specific() {
        let auto = SpecificClosure::new(
            "b1".into(),
            date(),
            ClosureType::Full,
            None,
            AUTO_CLOSURE_CREATOR.into(),
        );
        let ledger = [removed(ClosureType::Full)];
        assert_eq!(
            decide(date(), &[auto], &[], &ledger, None),
            ClosureDecision::Closed(ClosureType::Full)
        );
    }
}
