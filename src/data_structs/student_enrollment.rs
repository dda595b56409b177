use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlRow;
use sqlx::Row;

pub const ENROLLMENT_NUMBER_MAX_LEN: usize = 10;
pub const OFFER_NAME_MAX_LEN: usize = 50;
pub const OFFER_SHIFT_MAX_LEN: usize = 10;
pub const FULL_NAME_MAX_LEN: usize = 200;

/// The enrollment tuple. Two deliveries refer to the same student only when
/// all four fields are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[derive(Deserialize, Serialize)]
pub struct NewEnrollment {
    pub enrollment_number: String,
    pub offer_name: String,
    pub offer_shift: String,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(Deserialize, Serialize)]
pub struct StudentEnrollment {
    pub id: u64,
    pub enrollment_number: String,
    pub offer_name: String,
    pub offer_shift: String,
    pub full_name: String,
    pub created_timestamp: i64,
}

impl StudentEnrollment {
    pub(crate) fn decode(row: &MySqlRow) -> Result<Self, sqlx::Error> {
        Ok(StudentEnrollment {
            id: row.try_get("id")?,
            enrollment_number: row.try_get("enrollment_number")?,
            offer_name: row.try_get("offer_name")?,
            offer_shift: row.try_get("offer_shift")?,
            full_name: row.try_get("full_name")?,
            created_timestamp: row.try_get("created_timestamp")?,
        })
    }
}

impl fmt::Display for StudentEnrollment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.enrollment_number)
    }
}
