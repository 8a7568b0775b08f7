use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseType {
    Transports,
    Restaurants,
    Hotel,
    OnlineServices,
    ItElectronics,
    Equipment,
    OfficeSupplies,
    /// Label coming back from the store that is not one of the known categories.
    Other(String),
}

impl ExpenseType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Transports => "Transports",
            Self::Restaurants => "Restaurants et bars",
            Self::Hotel => "Hôtel et logement",
            Self::OnlineServices => "Services en ligne",
            Self::ItElectronics => "IT et électronique",
            Self::Equipment => "Equipement et matériel",
            Self::OfficeSupplies => "Fournitures de bureau",
            Self::Other(label) => label,
        }
    }

    pub fn parse(s: &str) -> Self {
        Self::all()
            .iter()
            .find(|t| t.as_str().to_lowercase() == s.trim().to_lowercase())
            .cloned()
            .unwrap_or_else(|| Self::Other(s.to_string()))
    }

    /// Categories offered by the new-bill form, in display order.
    pub fn all() -> &'static [ExpenseType] {
        &[
            Self::Transports,
            Self::Restaurants,
            Self::Hotel,
            Self::OnlineServices,
            Self::ItElectronics,
            Self::Equipment,
            Self::OfficeSupplies,
        ]
    }
}

impl std::fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for ExpenseType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for ExpenseType {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl Serialize for ExpenseType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ExpenseType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from(label))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Refused => "refused",
        }
    }

    pub fn all() -> &'static [BillStatus] {
        &[Self::Pending, Self::Accepted, Self::Refused]
    }
}

impl std::fmt::Display for BillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One expense report, as exchanged with the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "type", default)]
    pub expense_type: ExpenseType,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub amount: i64,
    /// ISO `YYYY-MM-DD`.
    #[serde(default)]
    pub date: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub vat: String,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub pct: i64,
    #[serde(default)]
    pub commentary: String,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub status: BillStatus,
}

// The store hands back whatever the form sent: numbers may arrive as strings
// and the VAT field may arrive as a number.
fn number_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

fn text_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}
