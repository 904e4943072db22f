use crate::error::AgreementError;

pub const DEFAULT_COMPANY: &str = "Chereka Technology";

/// Fills the fixed service-agreement template. Values are substituted as
/// given; nothing is escaped.
pub fn generate_agreement(company: &str, client: &str, services: &str) -> String {
    format!(
        "SOFTWARE SERVICE AGREEMENT\n\
         \n\
         This Software Service Agreement (\u{201c}Agreement\u{201d}) is entered into between {company}, and {client}.\n\
         \n\
         Services Provided:\n\
         {services}\n\
         \n\
         Terms & Conditions:\n\
         1. Service will be provided as per SLA.\n\
         2. The client shall pay fees agreed upon.\n\
         3. Both parties agree to confidentiality.\n\
         \n\
         Signed,\n\
         {company} | {client}\n"
    )
}

pub fn draft_agreement(company: &str, client: &str, services: &str) -> Result<String, AgreementError> {
    for (field, value) in [("company", company), ("client", client), ("services", services)] {
        if value.trim().is_empty() {
            return Err(AgreementError::MissingField(field));
        }
    }

    Ok(generate_agreement(company, client, services))
}
