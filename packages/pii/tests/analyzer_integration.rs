//! End-to-end checks of analyze followed by anonymize on realistic text.

use pii::{
    AnalyzeRequest, AnalyzerEngine, AnonymizerEngine, EntityType, Operator, OperatorConfig,
};

fn mask(text: &str, operators: &OperatorConfig) -> String {
    let results = AnalyzerEngine::new()
        .analyze(&AnalyzeRequest::new(text, "en"))
        .unwrap();
    AnonymizerEngine::new()
        .anonymize(text, &results, operators)
        .unwrap()
        .text
}

#[test]
fn test_support_ticket_is_fully_masked() {
    let text = "Hi, my name is Jane Cooper. Please call me at (612) 555-0199 or write to \
                jane.cooper@example.com. My card 4111 1111 1111 1111 was charged twice \
                on 03/14/2024 from IP 73.12.201.9.";

    let masked = mask(text, &OperatorConfig::default());

    assert_eq!(
        masked,
        "Hi, my name is <PERSON>. Please call me at <PHONE_NUMBER> or write to \
         <EMAIL_ADDRESS>. My card <CREDIT_CARD> was charged twice \
         on <DATE_TIME> from IP <IP_ADDRESS>."
    );
}

#[test]
fn test_bank_details_are_masked() {
    let text = "Wire it to IBAN DE89 3704 0044 0532 0130 00, ref Mr. Hoffmann.";
    let masked = mask(text, &OperatorConfig::default());

    assert_eq!(masked, "Wire it to IBAN <IBAN_CODE>, ref Mr. <PERSON>.");
}

#[test]
fn test_iban_before_capitalised_word_is_masked_whole() {
    let text = "Transfer to IBAN PL61 1090 1014 0000 0712 1981 2874 PAID in full.";
    let masked = mask(text, &OperatorConfig::default());

    assert_eq!(masked, "Transfer to IBAN <IBAN_CODE> PAID in full.");
}

#[test]
fn test_ipv6_before_colon_is_masked() {
    let masked = mask("host 2001:db8::1: down", &OperatorConfig::default());
    assert_eq!(masked, "host <IP_ADDRESS>: down");
}

#[test]
fn test_operator_per_entity_end_to_end() {
    let text = "Reach me at sam@example.net or 555-867-5309";
    let operators = OperatorConfig::new(Operator::Redact).with(
        EntityType::PhoneNumber,
        Operator::Mask {
            masking_char: 'X',
            chars_to_mask: 4,
            from_end: true,
        },
    );

    assert_eq!(mask(text, &operators), "Reach me at  or 555-867-XXXX");
}

#[test]
fn test_analysis_scores_are_in_range() {
    let text = "Dr. Alan Grant, 1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa, 00:1A:2B:3C:4D:5E, \
                www.jurassic.example, 2001:db8::1";
    let results = AnalyzerEngine::new()
        .analyze(&AnalyzeRequest::new(text, "en"))
        .unwrap();

    let found: Vec<EntityType> = results.iter().map(|r| r.entity_type).collect();
    assert_eq!(
        found,
        vec![
            EntityType::Person,
            EntityType::CryptoWallet,
            EntityType::MacAddress,
            EntityType::Url,
            EntityType::IpAddress,
        ]
    );
    assert!(results.iter().all(|r| (0.0..=1.0).contains(&r.score)));
}
