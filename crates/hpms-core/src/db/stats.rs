//! Dashboard statistics queries.

use serde::{Deserialize, Serialize};

use super::{Database, DbResult};

/// Headline figures for the dashboard view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_patients: i64,
    pub total_appointments: i64,
    pub unpaid_bills: i64,
    /// Sum of paid bill amounts; 0 when nothing has been paid.
    pub revenue_collected: f64,
}

impl Database {
    /// Compute dashboard statistics across all tables.
    pub fn dashboard_stats(&self) -> DbResult<DashboardStats> {
        let total_patients =
            self.conn
                .query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))?;
        let total_appointments =
            self.conn
                .query_row("SELECT COUNT(*) FROM appointments", [], |row| row.get(0))?;
        let unpaid_bills = self.conn.query_row(
            "SELECT COUNT(*) FROM bills WHERE status = 'Unpaid'",
            [],
            |row| row.get(0),
        )?;
        let revenue_collected = self.conn.query_row(
            "SELECT IFNULL(SUM(amount), 0) FROM bills WHERE status = 'Paid'",
            [],
            |row| row.get(0),
        )?;

        Ok(DashboardStats {
            total_patients,
            total_appointments,
            unpaid_bills,
            revenue_collected,
        })
    }
}
