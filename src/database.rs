use async_trait::async_trait;
use sqlx::{Error, Executor, MySql, Pool};
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions, MySqlQueryResult};

use crate::config::MySqlConfig;
use crate::data_structs::student_enrollment::{NewEnrollment, StudentEnrollment};
use crate::store::{EnrollmentStore, StoreError};

#[derive(Debug)]
#[derive(Clone)]
pub struct DatabasePool {
    pool: Pool<MySql>
}

impl DatabasePool {

    pub async fn new(config: &MySqlConfig) -> Result<Self, StoreError> {
        Self::connect_with(config.connect_options(), config).await
    }

    pub async fn connect(connection_url: &str, config: &MySqlConfig) -> Result<Self, StoreError> {
        let options: MySqlConnectOptions = connection_url.parse()?;
        Self::connect_with(options, config).await
    }

    async fn connect_with(options: MySqlConnectOptions, config: &MySqlConfig) -> Result<Self, StoreError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(options).await?;

        Ok(DatabasePool { pool })
    }

    pub async fn init(&self) -> Result<(), StoreError> {
        self.create_student_enrollments_table().await?;
        Ok(())
    }

    async fn select_enrollment(&self, enrollment: &NewEnrollment) -> Result<StudentEnrollment, Error> {
        let row = sqlx::query(r#"
            SELECT id, enrollment_number, offer_name, offer_shift, full_name, created_timestamp
            FROM student_enrollments
            WHERE enrollment_number=? AND offer_name=? AND offer_shift=? AND full_name=?
        "#)
            .bind(&enrollment.enrollment_number)
            .bind(&enrollment.offer_name)
            .bind(&enrollment.offer_shift)
            .bind(&enrollment.full_name)
            .fetch_one(&self.pool).await?;

        StudentEnrollment::decode(&row)
    }

    // the unique key makes the insert a no-op for a known tuple, so two
    // identical deliveries racing each other still leave a single row.
    // utf8mb4_0900_bin is NO PAD: 'Maria' and 'Maria ' are different keys
    async fn create_student_enrollments_table(&self) -> Result<MySqlQueryResult, Error> {
        self.pool.execute(r#"
            create table if not exists student_enrollments
            (
                id                    bigint unsigned auto_increment  primary key,
                enrollment_number     varchar(10)                     not null default '',
                offer_name            varchar(50)                     not null default '',
                offer_shift           varchar(10)                     not null default '',
                full_name             varchar(200)                    not null default '',
                created_timestamp     bigint                          not null,
                unique key enrollment_tuple (enrollment_number, offer_name, offer_shift, full_name)
            ) character set utf8mb4 collate utf8mb4_0900_bin;
        "#).await
    }
}

#[async_trait]
impl EnrollmentStore for DatabasePool {
    async fn find_or_create(&self, enrollment: &NewEnrollment) -> Result<(StudentEnrollment, bool), StoreError> {
        // affected rows is 1 for a fresh insert and 0 when the unique key
        // already holds this tuple. Widths are checked before we get here,
        // IGNORE only ever swallows the duplicate.
        let result = sqlx::query(r#"
            INSERT IGNORE INTO student_enrollments
            (enrollment_number, offer_name, offer_shift, full_name, created_timestamp)
            VALUES (?, ?, ?, ?, ?)
        "#)
            .bind(&enrollment.enrollment_number)
            .bind(&enrollment.offer_name)
            .bind(&enrollment.offer_shift)
            .bind(&enrollment.full_name)
            .bind(chrono::Local::now().timestamp())
            .execute(&self.pool).await?;

        let created = result.rows_affected() == 1;
        let student = self.select_enrollment(enrollment).await?;

        Ok((student, created))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.pool.execute("SELECT 1").await?;
        Ok(())
    }
}
