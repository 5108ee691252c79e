//! Company profile shown on public pages.
//!
//! The profile is process-wide configuration: the API loads it once at
//! startup (defaults below, overridden by `COMPANY_*` environment
//! variables) and hands it to handlers through shared state.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyProfile {
    pub company_name: String,
    pub tagline: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub address: String,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
    pub founder_name: String,
    pub founder_title: String,
    pub vision: String,
    pub mission: String,
    pub established_year: i32,
    pub registration_year: i32,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        Self {
            company_name: "The Writing Hub Tz".to_string(),
            tagline: "Empowering Excellence through Words".to_string(),
            phone: "+255 (0) 717 313797".to_string(),
            email: "thewritinghubtz@gmail.com".to_string(),
            website: "www.thewritinghutz.net".to_string(),
            address: "9 Floor, Elite Towers, Azikiwe St, Dar es Salaam, Tanzania".to_string(),
            facebook: None,
            twitter: None,
            linkedin: None,
            instagram: Some("the_writing_hub_tz".to_string()),
            founder_name: "Frank Mhando (MA., PhD. DT)".to_string(),
            founder_title: "Founder".to_string(),
            vision: "To be the leading catalyst for academic, research and professional \
                     success by fostering exceptional writing skills and promoting \
                     impactful communication."
                .to_string(),
            mission: "To provide comprehensive writing solutions, research and development \
                      support, and educational support that empower individuals and \
                      organisations to achieve their goals."
                .to_string(),
            established_year: 2018,
            registration_year: 2023,
        }
    }
}

impl CompanyProfile {
    /// Years the company has operated as of `current_year`.
    pub fn years_in_operation(&self, current_year: i32) -> i32 {
        (current_year - self.established_year).max(0)
    }
}
