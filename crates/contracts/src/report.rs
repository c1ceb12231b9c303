//! Emergency report - the inbound request payload
//!
//! Every field is optional free text; rendering of absent fields is
//! centralized here so sentinel strings never leak into handlers.

use serde::{Deserialize, Serialize};

/// One emergency submission, request-scoped, never persisted.
///
/// Wire names are the fixed Italian keys of the public contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyReport {
    /// Customer name
    #[serde(rename = "nome_cliente", skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,

    /// Callback phone number
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Free-text description of the emergency
    #[serde(rename = "messaggio", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Pet name
    #[serde(rename = "pet", skip_serializing_if = "Option::is_none")]
    pub pet_name: Option<String>,

    /// Caller location
    #[serde(rename = "posizione", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl EmergencyReport {
    /// Customer name or the "not specified" sentinel
    pub fn customer_display(&self) -> &str {
        self.customer_name.as_deref().unwrap_or("Non specificato")
    }

    /// Pet name or the "not specified" sentinel
    pub fn pet_display(&self) -> &str {
        self.pet_name.as_deref().unwrap_or("Non specificato")
    }

    /// Phone or the "not provided" sentinel
    pub fn phone_display(&self) -> &str {
        self.phone.as_deref().unwrap_or("Non fornito")
    }

    /// Location or the "not provided" sentinel
    pub fn location_display(&self) -> &str {
        self.location.as_deref().unwrap_or("Non fornita")
    }

    /// Message body or the "no message" sentinel
    pub fn message_display(&self) -> &str {
        self.message.as_deref().unwrap_or("Nessun messaggio fornito")
    }
}
