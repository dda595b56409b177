use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::data_structs::student_enrollment::{NewEnrollment, StudentEnrollment};
use crate::store::{EnrollmentStore, StoreError};

/// In-process stand-in for the MySQL table.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<StudentEnrollment>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following call fail like a dropped database connection.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn rows(&self) -> Vec<StudentEnrollment> {
        self.rows.lock().unwrap().clone()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl EnrollmentStore for MemoryStore {
    async fn find_or_create(&self, enrollment: &NewEnrollment) -> Result<(StudentEnrollment, bool), StoreError> {
        self.check_available()?;

        // lookup and insert under one lock, same guarantee the unique key gives MySQL
        let mut rows = self.rows.lock().unwrap();
        let existing = rows.iter().find(|row| {
            row.enrollment_number == enrollment.enrollment_number
                && row.offer_name == enrollment.offer_name
                && row.offer_shift == enrollment.offer_shift
                && row.full_name == enrollment.full_name
        });
        if let Some(row) = existing {
            return Ok((row.clone(), false));
        }

        let row = StudentEnrollment {
            id: rows.len() as u64 + 1,
            enrollment_number: enrollment.enrollment_number.clone(),
            offer_name: enrollment.offer_name.clone(),
            offer_shift: enrollment.offer_shift.clone(),
            full_name: enrollment.full_name.clone(),
            created_timestamp: chrono::Local::now().timestamp(),
        };
        rows.push(row.clone());
        Ok((row, true))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maria() -> NewEnrollment {
        NewEnrollment {
            enrollment_number: "12345".to_string(),
            offer_name: "Engenharia".to_string(),
            offer_shift: "Noite".to_string(),
            full_name: "Maria Silva".to_string(),
        }
    }

    #[actix_web::test]
    async fn second_lookup_returns_the_first_row() {
        let store = MemoryStore::new();
        let (first, created) = store.find_or_create(&maria()).await.unwrap();
        assert!(created);
        let (second, created) = store.find_or_create(&maria()).await.unwrap();
        assert!(!created);
        assert_eq!(first, second);
        assert_eq!(store.rows().len(), 1);
    }

    #[actix_web::test]
    async fn any_differing_field_is_a_new_student() {
        let store = MemoryStore::new();
        store.find_or_create(&maria()).await.unwrap();

        let variants = [
            NewEnrollment { enrollment_number: "12346".to_string(), ..maria() },
            NewEnrollment { offer_name: "Medicina".to_string(), ..maria() },
            NewEnrollment { offer_shift: "Manha".to_string(), ..maria() },
            NewEnrollment { full_name: "maria silva".to_string(), ..maria() },
        ];
        for variant in &variants {
            let (_, created) = store.find_or_create(variant).await.unwrap();
            assert!(created, "{:?} should not match the existing row", variant);
        }
        assert_eq!(store.rows().len(), 5);
    }

    #[actix_web::test]
    async fn concurrent_identical_deliveries_store_one_row() {
        let store = MemoryStore::new();
        let enrollment = maria();
        let (a, b) = tokio::join!(store.find_or_create(&enrollment), store.find_or_create(&enrollment));
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_eq!(a.0, b.0);
        assert!(a.1 ^ b.1);
        assert_eq!(store.rows().len(), 1);
    }

    #[actix_web::test]
    async fn unavailable_store_fails() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        assert!(store.find_or_create(&maria()).await.is_err());
        assert!(store.ping().await.is_err());
        assert!(store.rows().is_empty());
    }
}
