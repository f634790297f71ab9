pub mod exercise;
pub mod from_row;
pub mod stats;
pub mod workout;

pub use exercise::{CreateExercise, Exercise, UpdateExercise};
pub use from_row::FromSqliteRow;
pub use stats::{DailyStats, DayTotal, MonthlyBucket, QuarterlyPoint};
pub use workout::{CreateWorkout, NewWorkout, Workout, WorkoutForm, WorkoutWithExercise};
