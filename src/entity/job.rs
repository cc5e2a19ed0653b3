//! Job location and work schedule

use crate::core::error::{ActorError, Result};
use crate::core::time::{TimeInterval, TimeOfDay};
use crate::core::types::Point;
use crate::entity::state::StateComponent;

/// Where an actor works and the shifts it works, in the order they were added
#[derive(Debug, Clone, PartialEq)]
pub struct JobState {
    pub job: Point,
    job_times: Vec<TimeInterval>,
}

impl JobState {
    pub fn new(job: Point) -> Self {
        Self {
            job,
            job_times: Vec::new(),
        }
    }

    pub fn with_shifts(job: Point, shifts: &[TimeInterval]) -> Result<Self> {
        let mut state = Self::new(job);
        for shift in shifts {
            state.add_job_time(*shift)?;
        }
        Ok(state)
    }

    /// Append a shift; shifts overlapping an existing one are rejected
    pub fn add_job_time(&mut self, interval: TimeInterval) -> Result<()> {
        if let Some(existing) = self.job_times.iter().find(|t| t.overlaps(&interval)) {
            return Err(ActorError::OverlappingShift {
                existing: *existing,
                new: interval,
            });
        }
        self.job_times.push(interval);
        Ok(())
    }

    pub fn job_times(&self) -> &[TimeInterval] {
        &self.job_times
    }

    pub fn current_shift(&self, time: TimeOfDay) -> Option<&TimeInterval> {
        self.job_times.iter().find(|shift| shift.contains(time))
    }

    pub fn is_working_at(&self, time: TimeOfDay) -> bool {
        self.current_shift(time).is_some()
    }

    pub fn total_minutes(&self) -> u32 {
        self.job_times
            .iter()
            .map(|shift| shift.duration_minutes() as u32)
            .sum()
    }
}

impl StateComponent for JobState {
    const KIND: &'static str = "job";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_shift() -> JobState {
        let mut job = JobState::new(Point::new(5.0, 5.0));
        job.add_job_time(TimeInterval::from_hm(10, 30, 13, 0).unwrap()).unwrap();
        job.add_job_time(TimeInterval::from_hm(15, 30, 18, 0).unwrap()).unwrap();
        job
    }

    #[test]
    fn test_shifts_keep_insertion_order() {
        let mut job = JobState::new(Point::new(0.0, 0.0));
        job.add_job_time(TimeInterval::from_hm(20, 0, 20, 30).unwrap()).unwrap();
        job.add_job_time(TimeInterval::from_hm(19, 0, 19, 30).unwrap()).unwrap();

        let times = job.job_times();
        assert_eq!(times.len(), 2);
        assert_eq!(times[0].to_string(), "20:00-20:30");
        assert_eq!(times[1].to_string(), "19:00-19:30");
    }

    #[test]
    fn test_overlap_rejected_and_sequence_unchanged() {
        let mut job = split_shift();
        let result = job.add_job_time(TimeInterval::from_hm(12, 0, 16, 0).unwrap());

        assert!(matches!(result, Err(ActorError::OverlappingShift { .. })));
        assert_eq!(job.job_times().len(), 2);
    }

    #[test]
    fn test_adjacent_shift_accepted() {
        let mut job = split_shift();
        job.add_job_time(TimeInterval::from_hm(13, 0, 15, 30).unwrap()).unwrap();
        assert_eq!(job.job_times().len(), 3);
        assert_eq!(job.total_minutes(), 150 + 150 + 150);
    }

    #[test]
    fn test_working_hours() {
        let job = split_shift();
        assert!(job.is_working_at(TimeOfDay::new(11, 0).unwrap()));
        assert!(!job.is_working_at(TimeOfDay::new(14, 0).unwrap()));
        assert_eq!(
            job.current_shift(TimeOfDay::new(17, 59).unwrap()),
            Some(&job.job_times()[1])
        );
    }

    #[test]
    fn test_copy_has_independent_schedule() {
        let original = split_shift();
        let mut copy = original.clone();
        copy.add_job_time(TimeInterval::from_hm(19, 0, 19, 30).unwrap()).unwrap();
        copy.job = Point::new(-1.0, -1.0);

        assert_eq!(original.job_times().len(), 2);
        assert_eq!(original.job, Point::new(5.0, 5.0));
    }
}
