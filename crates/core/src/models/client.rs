use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Phone kinds accepted by the store's check constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhoneKind {
    Mobile,
    Landline,
    Whatsapp,
    Other,
}

impl PhoneKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhoneKind::Mobile => "MOBILE",
            PhoneKind::Landline => "LANDLINE",
            PhoneKind::Whatsapp => "WHATSAPP",
            PhoneKind::Other => "OTHER",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientPhone {
    pub id: i64,
    pub client_id: i64,
    pub kind: PhoneKind,
    pub number: String,
    pub is_primary: bool,
}
