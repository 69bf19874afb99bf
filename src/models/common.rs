use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub pincode: Option<String>,
}

impl Address {
    pub fn format_multiline(&self) -> String {
        let mut lines = vec![self.line1.clone()];
        if let Some(line2) = &self.line2 {
            lines.push(line2.clone());
        }
        let mut city_line = format!("{}, {}", self.city, self.state);
        if let Some(pincode) = &self.pincode {
            city_line.push_str(&format!(" - {}", pincode));
        }
        lines.push(city_line);
        lines.join("\n")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankDetails {
    pub bank_name: String,
    pub account_number: String,
    pub ifsc_code: String,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub upi_id: Option<String>,
}

/// Company header data served by the backend profile endpoint, keyed by
/// tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    pub gstin: String,
    pub address: Address,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bank_details: Option<BankDetails>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl CompanyProfile {
    /// Fallback header used when no override is supplied and the profile
    /// service cannot be reached.
    pub fn unavailable() -> Self {
        CompanyProfile {
            name: "(company profile unavailable)".to_string(),
            gstin: String::new(),
            address: Address {
                line1: String::new(),
                line2: None,
                city: String::new(),
                state: String::new(),
                pincode: None,
            },
            phone: None,
            email: None,
            bank_details: None,
            logo_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    #[serde(default)]
    pub gstin: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderOptions {
    #[serde(default)]
    pub watermark: Option<String>,
    /// Embed a QR code for the IRN / e-way payload when present.
    #[serde(default = "default_true")]
    pub include_qr: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            watermark: None,
            include_qr: true,
        }
    }
}
