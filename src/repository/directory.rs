//! Directory repository: departments, employees and vendors

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::directory::{Department, Employee, Vendor},
};

#[derive(Clone)]
pub struct DirectoryRepository {
    pool: Pool<Postgres>,
}

impl DirectoryRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list_departments(&self) -> AppResult<Vec<Department>> {
        let departments =
            sqlx::query_as::<_, Department>("SELECT id, name FROM departments ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
        Ok(departments)
    }

    pub async fn list_employees(&self) -> AppResult<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT e.id, e.name, e.department_id, d.name AS department_name
            FROM employees e
            LEFT JOIN departments d ON d.id = e.department_id
            ORDER BY e.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(employees)
    }

    pub async fn list_vendors(&self) -> AppResult<Vec<Vendor>> {
        let vendors = sqlx::query_as::<_, Vendor>("SELECT id, name FROM vendors ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(vendors)
    }

    pub async fn department_exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM departments WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    pub async fn employee_exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM employees WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    pub async fn vendor_exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM vendors WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}
