use serde::{Deserialize, Serialize};

/// Appointment lifecycle. Only `Cancelled` and `Completed` free their
/// slot; every other status keeps it occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Confirmed => "confirmed",
            Status::Completed => "completed",
            Status::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Status::Pending),
            "confirmed" => Some(Status::Confirmed),
            "completed" => Some(Status::Completed),
            "cancelled" => Some(Status::Cancelled),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Cancelled | Status::Completed)
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AppointmentRow {
    pub id: String,
    pub client_id: String,
    pub barber_id: String,
    pub service_id: String,
    pub date: String,
    pub time: String,
    pub status: Status,
    pub notes: Option<String>,
    pub created_at: String,
    pub client_name: String,
    pub barber_name: String,
    pub service_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub client_id: String,
    pub client_name: String,
    pub barber_id: String,
    pub barber_name: String,
    pub service_id: String,
    pub service_name: String,
    pub date: String,
    pub time: String,
    pub status: Status,
    pub notes: Option<String>,
    pub created_at: String,
}

impl From<AppointmentRow> for Appointment {
    fn from(row: AppointmentRow) -> Self {
        Appointment {
            id: row.id,
            client_id: row.client_id,
            client_name: row.client_name,
            barber_id: row.barber_id,
            barber_name: row.barber_name,
            service_id: row.service_id,
            service_name: row.service_name,
            date: row.date,
            time: row.time,
            status: row.status,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: String,
    pub barber_id: String,
    pub date: String,
    pub time: String,
    pub motivo: Option<String>,
    pub created_at: String,
}
