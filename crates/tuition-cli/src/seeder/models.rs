//! Seed row shapes and the knobs that size a seeding run.

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use tuition_models::{ClassType, GenderType, PaymentMode};

/// Written to `notes` on every generated row so `clear-seed` can find them.
pub const SEED_MARKER: &str = "seeded";

pub struct StudentSeed {
    pub full_name: String,
    pub standard_id: Option<Uuid>,
    pub batch_id: Option<Uuid>,
    pub fees_plan_id: Option<Uuid>,
    pub fees_paid: f64,
    pub pending_fees: f64,
    pub email: String,
    pub contact_number: String,
    pub parent_name: String,
    pub gender: GenderType,
    pub joining_date: NaiveDate,
}

pub struct TeacherSeed {
    pub full_name: String,
    pub subjects: Vec<String>,
    pub salary: f64,
    pub email: String,
    pub contact_number: String,
    pub gender: GenderType,
}

pub struct ClassSeed {
    pub standard_id: Option<Uuid>,
    pub batch_id: Option<Uuid>,
    pub subject_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
    pub class_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub class_type: ClassType,
}

pub struct PaymentSeed {
    pub student_id: Uuid,
    pub amount_paid: f64,
    pub payment_mode: PaymentMode,
    pub payment_date: NaiveDate,
}

/// Reference rows the generated people and classes point at.
#[derive(Debug, Clone, Default)]
pub struct Lookups {
    /// `(batch_id, standard_id)`
    pub batches: Vec<(Uuid, Uuid)>,
    /// `(subject_id, subject_name)`
    pub subjects: Vec<(Uuid, String)>,
    pub fees_plans: Vec<Uuid>,
}

#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub students: usize,
    pub teachers: usize,
    /// Classes are scheduled from a week ago through this many days ahead.
    pub days_ahead: u64,
    pub classes_per_day: usize,
    pub payments_per_student: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            students: 200,
            teachers: 12,
            days_ahead: 14,
            classes_per_day: 4,
            payments_per_student: 2,
        }
    }
}

impl SeedConfig {
    pub fn new(students: usize) -> Self {
        Self {
            students,
            ..Default::default()
        }
    }

    pub fn with_teachers(mut self, teachers: usize) -> Self {
        self.teachers = teachers;
        self
    }

    pub fn with_schedule(mut self, days_ahead: u64, classes_per_day: usize) -> Self {
        self.days_ahead = days_ahead;
        self.classes_per_day = classes_per_day;
        self
    }

    pub fn with_payments(mut self, payments_per_student: usize) -> Self {
        self.payments_per_student = payments_per_student;
        self
    }
}
