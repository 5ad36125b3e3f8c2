use crate::core::{DayPlan, ProgressSet};

/// Marks the lowest-indexed incomplete day as current and clears the flag
/// everywhere else. A fully completed plan has no current day.
pub fn mark_current(days: &mut [DayPlan]) {
    let mut found = false;
    for day in days.iter_mut() {
        day.is_current = !found && !day.completed;
        found |= day.is_current;
    }
}

/// Replaces every day's completion flag with membership in `progress`, then
/// reruns the current-day rule. Returns how many entries in `progress` did
/// not match a day of the plan.
pub fn apply_progress(days: &mut [DayPlan], progress: &ProgressSet) -> usize {
    for day in days.iter_mut() {
        day.completed = progress.contains(day.day);
    }
    mark_current(days);

    progress
        .iter()
        .filter(|index| !days.iter().any(|day| day.day == *index))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::builder::build_plan;
    use crate::plan::catalogue::{DEFAULT_START_DATE, new_testament};

    fn plan(days: u32) -> Vec<DayPlan> {
        build_plan(&new_testament(), days, DEFAULT_START_DATE).unwrap()
    }

    fn current_days(days: &[DayPlan]) -> Vec<u32> {
        days.iter().filter(|d| d.is_current).map(|d| d.day).collect()
    }

    #[test]
    fn test_first_incomplete_day_is_current() {
        let mut days = plan(10);
        days[0].completed = true;
        days[1].completed = true;
        days[3].completed = true;

        mark_current(&mut days);
        assert_eq!(current_days(&days), vec![3]);
    }

    #[test]
    fn test_no_current_day_when_all_complete() {
        let mut days = plan(4);
        for day in days.iter_mut() {
            day.completed = true;
            day.is_current = true;
        }

        mark_current(&mut days);
        assert!(current_days(&days).is_empty());
    }

    #[test]
    fn test_apply_progress_overwrites_previous_state() {
        let mut days = plan(6);
        days[4].completed = true;

        let unknown = apply_progress(&mut days, &ProgressSet::from([1, 2, 99]));

        assert_eq!(unknown, 1);
        let completed: Vec<u32> = days.iter().filter(|d| d.completed).map(|d| d.day).collect();
        assert_eq!(completed, vec![1, 2]);
        assert_eq!(current_days(&days), vec![3]);
    }
}
