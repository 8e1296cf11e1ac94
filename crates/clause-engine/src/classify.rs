//! First-match keyword classifier for contract type

use shared_types::ContractType;

use crate::patterns::{
    contains_any, EMPLOYMENT_KEYWORDS, LEASE_KEYWORDS, NDA_KEYWORDS, SERVICE_KEYWORDS,
};

/// Rules evaluated top to bottom; the first group with any hit wins
const RULES: &[(&[&str], ContractType)] = &[
    (LEASE_KEYWORDS, ContractType::Lease),
    (NDA_KEYWORDS, ContractType::Nda),
    (EMPLOYMENT_KEYWORDS, ContractType::Employment),
    (SERVICE_KEYWORDS, ContractType::Service),
];

pub fn classify_contract(text: &str) -> ContractType {
    let text_lower = text.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| contains_any(&text_lower, keywords))
        .map_or(ContractType::General, |(_, label)| *label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifies_each_contract_type() {
        assert_eq!(
            classify_contract("The LANDLORD leases the premises."),
            ContractType::Lease
        );
        assert_eq!(
            classify_contract("Recipient keeps all Confidential Information secret."),
            ContractType::Nda
        );
        assert_eq!(
            classify_contract("The Employer pays a monthly salary."),
            ContractType::Employment
        );
        assert_eq!(
            classify_contract("The Vendor meets the agreed service level."),
            ContractType::Service
        );
        assert_eq!(
            classify_contract("Seller transfers the goods to Buyer."),
            ContractType::General
        );
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // Mentions both tenant (lease) and confidential (NDA) terms.
        let text = "Tenant keeps the alarm code confidential.";
        assert_eq!(classify_contract(text), ContractType::Lease);
    }
}
