//! Built-in English recognizers.

use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

use super::recognizer::{Pattern, PatternRecognizer, Recognizer};
use super::validators::{
    is_valid_bitcoin_address, is_valid_iban, is_valid_ipv4, is_valid_ipv6, is_valid_luhn,
    is_valid_mac, is_valid_ssn,
};
use crate::types::EntityType;

lazy_static! {
    // Email pattern - RFC 5322 simplified
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"(?i)\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b"
    ).unwrap();

    // US numbers with area code: (555) 123-4567, 555.123.4567, +1 555 123 4567
    static ref PHONE_US_REGEX: Regex = Regex::new(
        r"(?:\+1[-.\s]?|\b1[-.\s])?(?:\(\d{3}\)\s?|\b\d{3}[-.\s])\d{3}[-.\s]\d{4}\b"
    ).unwrap();

    // Seven digit local number: 555-1234
    static ref PHONE_LOCAL_REGEX: Regex = Regex::new(
        r"\b\d{3}-\d{4}\b"
    ).unwrap();

    // International: +44 20 7946 0958
    static ref PHONE_INTL_REGEX: Regex = Regex::new(
        r"\+\d{1,3}(?:[-.\s]?\d{1,4})(?:[-.\s]?\d{2,4}){2,4}\b"
    ).unwrap();

    // Credit card numbers - grouped in fours, Amex 4-6-5, or a plain digit run
    static ref CREDIT_CARD_GROUPED_REGEX: Regex = Regex::new(
        r"\b(?:\d{4}[-\s]?){3}\d{4}\b|\b\d{4}[-\s]?\d{6}[-\s]?\d{5}\b"
    ).unwrap();

    static ref CREDIT_CARD_PLAIN_REGEX: Regex = Regex::new(
        r"\b\d{13,19}\b"
    ).unwrap();

    // Social Security Number - XXX-XX-XXXX or XXX XX XXXX
    static ref SSN_REGEX: Regex = Regex::new(
        r"\b\d{3}[- ]\d{2}[- ]\d{4}\b"
    ).unwrap();

    // IPv4 addresses
    static ref IPV4_REGEX: Regex = Regex::new(
        r"\b(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\b"
    ).unwrap();

    // IPv6 candidates, confirmed by the std parser. The last group must hold
    // a digit (or be `::`) so a trailing colon in prose is left out.
    static ref IPV6_REGEX: Regex = Regex::new(
        r"(?:^|[^0-9A-Za-z:])(?P<pii>(?:[0-9A-Fa-f]{1,4})?(?::[0-9A-Fa-f]{0,4}){0,6}(?::[0-9A-Fa-f]{1,4}|::))"
    ).unwrap();

    static ref URL_REGEX: Regex = Regex::new(
        r#"(?i)\b(?:https?://|www\.)[^\s<>"']*[^\s<>"'.,;:!?)\]}]"#
    ).unwrap();

    static ref IBAN_REGEX: Regex = Regex::new(
        r"\b[A-Z]{2}\d{2}(?: ?[A-Z0-9]{4}){2,7}(?: ?[A-Z0-9]{1,3})?\b"
    ).unwrap();

    // 01/31/2024, 1-31-24
    static ref DATE_US_REGEX: Regex = Regex::new(
        r"\b(?:0?[1-9]|1[0-2])[/-](?:0?[1-9]|[12]\d|3[01])[/-](?:(?:19|20)\d{2}|\d{2})\b"
    ).unwrap();

    // 31/01/2024
    static ref DATE_EU_REGEX: Regex = Regex::new(
        r"\b(?:1[3-9]|2\d|3[01])/(?:0?[1-9]|1[0-2])/(?:19|20)\d{2}\b"
    ).unwrap();

    // 2024-01-31
    static ref DATE_ISO_REGEX: Regex = Regex::new(
        r"\b(?:19|20)\d{2}-(?:0[1-9]|1[0-2])-(?:0[1-9]|[12]\d|3[01])\b"
    ).unwrap();

    // January 31, 2024 / Jan 31st 2024
    static ref DATE_MONTH_FIRST_REGEX: Regex = Regex::new(
        r"(?i)\b(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+\d{1,2}(?:st|nd|rd|th)?,?\s+(?:19|20)\d{2}\b"
    ).unwrap();

    // 31 January 2024 / 31st Jan, 2024
    static ref DATE_DAY_FIRST_REGEX: Regex = Regex::new(
        r"(?i)\b\d{1,2}(?:st|nd|rd|th)?\s+(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?,?\s+(?:19|20)\d{2}\b"
    ).unwrap();

    static ref BITCOIN_REGEX: Regex = Regex::new(
        r"\b(?:bc1[a-z0-9]{25,59}|[13][a-km-zA-HJ-NP-Z1-9]{25,34})\b"
    ).unwrap();

    static ref MAC_REGEX: Regex = Regex::new(
        r"\b(?:[0-9A-Fa-f]{2}[:-]){5}[0-9A-Fa-f]{2}\b"
    ).unwrap();

    // Mr. John Smith, Dr Jane O'Neil
    static ref PERSON_TITLE_REGEX: Regex = Regex::new(
        r"\b(?:Mr|Mrs|Ms|Mx|Miss|Dr|Prof|Sir|Madam)\.?\s+(?P<pii>[A-Z](?:'[A-Z])?[a-z]+(?:-[A-Z][a-z]+)?(?:\s[A-Z](?:'[A-Z])?[a-z]+(?:-[A-Z][a-z]+)?){0,2})\b"
    ).unwrap();

    // "my name is John Smith", "Name: Jane", "Regards,\nBob"
    static ref PERSON_INTRODUCED_REGEX: Regex = Regex::new(
        r"(?i:\bmy\s+name\s+is|\bname\s*:|\bdear|\bregards,|\bsincerely,|\bthanks,|\bcheers,|\bsigned,)\s*(?P<pii>[A-Z](?:'[A-Z])?[a-z]+(?:-[A-Z][a-z]+)?(?:[ \t][A-Z](?:'[A-Z])?[a-z]+(?:-[A-Z][a-z]+)?){0,2})\b"
    ).unwrap();
}

/// Capitalised words that follow an introducer without being a name
const NOT_A_NAME: &[&str] = &[
    "The", "This", "That", "These", "Those", "It", "You", "We", "They", "All", "Team", "Sir",
    "Madam", "Customer", "Friend", "Friends", "Everyone", "Here", "There", "Not", "Again",
];

pub fn email_recognizer() -> PatternRecognizer {
    PatternRecognizer::new(
        "EmailRecognizer",
        EntityType::EmailAddress,
        vec![Pattern::from_regex("email", EMAIL_REGEX.clone(), 1.0)],
    )
    .with_context(&["email", "e-mail", "mail", "address", "contact"])
}

pub fn phone_recognizer() -> PatternRecognizer {
    PatternRecognizer::new(
        "PhoneRecognizer",
        EntityType::PhoneNumber,
        vec![
            Pattern::from_regex("phone_us", PHONE_US_REGEX.clone(), 0.7),
            Pattern::from_regex("phone_international", PHONE_INTL_REGEX.clone(), 0.5),
            Pattern::from_regex("phone_local", PHONE_LOCAL_REGEX.clone(), 0.4),
        ],
    )
    .with_context(&[
        "phone",
        "number",
        "telephone",
        "tel",
        "cell",
        "cellphone",
        "mobile",
        "call",
        "fax",
        "text",
    ])
}

pub fn credit_card_recognizer() -> PatternRecognizer {
    PatternRecognizer::new(
        "CreditCardRecognizer",
        EntityType::CreditCard,
        vec![
            Pattern::from_regex("card_grouped", CREDIT_CARD_GROUPED_REGEX.clone(), 1.0),
            Pattern::from_regex("card_plain", CREDIT_CARD_PLAIN_REGEX.clone(), 0.9),
        ],
    )
    .with_context(&[
        "credit", "card", "visa", "mastercard", "amex", "discover", "debit", "cc",
    ])
    .with_validator(is_valid_luhn)
}

pub fn ssn_recognizer() -> PatternRecognizer {
    PatternRecognizer::new(
        "UsSsnRecognizer",
        EntityType::UsSsn,
        vec![Pattern::from_regex("ssn", SSN_REGEX.clone(), 0.5)],
    )
    .with_context(&["ssn", "social", "security", "ssid"])
    .with_validator(is_valid_ssn)
}

pub fn ipv4_recognizer() -> PatternRecognizer {
    PatternRecognizer::new(
        "Ipv4Recognizer",
        EntityType::IpAddress,
        vec![Pattern::from_regex("ipv4", IPV4_REGEX.clone(), 0.6)],
    )
    .with_context(&["ip", "ipv4", "address", "host", "server"])
    .with_deny_context(&["version", "ver", "v", "release", "build"])
    .with_validator(is_valid_ipv4)
}

pub fn ipv6_recognizer() -> PatternRecognizer {
    PatternRecognizer::new(
        "Ipv6Recognizer",
        EntityType::IpAddress,
        vec![Pattern::from_regex("ipv6", IPV6_REGEX.clone(), 0.6)],
    )
    .with_context(&["ip", "ipv6", "address", "host", "server"])
    .with_validator(is_valid_ipv6)
}

pub fn url_recognizer() -> PatternRecognizer {
    PatternRecognizer::new(
        "UrlRecognizer",
        EntityType::Url,
        vec![Pattern::from_regex("url", URL_REGEX.clone(), 0.6)],
    )
    .with_context(&["url", "website", "link", "site", "visit"])
}

pub fn iban_recognizer() -> PatternRecognizer {
    PatternRecognizer::new(
        "IbanRecognizer",
        EntityType::IbanCode,
        vec![Pattern::from_regex("iban", IBAN_REGEX.clone(), 1.0)],
    )
    .with_context(&["iban", "bank", "account", "transaction"])
    .with_validator(is_valid_iban)
    // A following word in capitals can be swallowed as one more group
    .with_whitespace_backoff()
}

pub fn date_recognizer() -> PatternRecognizer {
    PatternRecognizer::new(
        "DateRecognizer",
        EntityType::DateTime,
        vec![
            Pattern::from_regex("date_us", DATE_US_REGEX.clone(), 0.6),
            Pattern::from_regex("date_eu", DATE_EU_REGEX.clone(), 0.6),
            Pattern::from_regex("date_iso", DATE_ISO_REGEX.clone(), 0.6),
            Pattern::from_regex("date_month_first", DATE_MONTH_FIRST_REGEX.clone(), 0.6),
            Pattern::from_regex("date_day_first", DATE_DAY_FIRST_REGEX.clone(), 0.6),
        ],
    )
    .with_context(&["date", "birthday", "born", "dob", "birth"])
}

pub fn crypto_recognizer() -> PatternRecognizer {
    PatternRecognizer::new(
        "CryptoRecognizer",
        EntityType::CryptoWallet,
        vec![Pattern::from_regex("bitcoin", BITCOIN_REGEX.clone(), 0.5)],
    )
    .with_context(&["wallet", "btc", "bitcoin", "crypto"])
    .with_validator(is_valid_bitcoin_address)
}

pub fn mac_recognizer() -> PatternRecognizer {
    PatternRecognizer::new(
        "MacAddressRecognizer",
        EntityType::MacAddress,
        vec![Pattern::from_regex("mac", MAC_REGEX.clone(), 0.6)],
    )
    .with_context(&["mac", "hardware", "ethernet", "wifi"])
    .with_validator(is_valid_mac)
}

pub fn person_recognizer() -> PatternRecognizer {
    PatternRecognizer::new(
        "PersonRecognizer",
        EntityType::Person,
        vec![
            Pattern::from_regex("person_title", PERSON_TITLE_REGEX.clone(), 0.85),
            Pattern::from_regex("person_introduced", PERSON_INTRODUCED_REGEX.clone(), 0.6),
        ],
    )
    .with_context(&["name", "called", "signed", "contact"])
    .with_validator(is_plausible_name)
}

fn is_plausible_name(candidate: &str) -> bool {
    candidate
        .split_whitespace()
        .next()
        .is_some_and(|first| !NOT_A_NAME.contains(&first))
}

/// Every built-in recognizer, all for English.
pub fn default_recognizers() -> Vec<Arc<dyn Recognizer>> {
    vec![
        Arc::new(email_recognizer()),
        Arc::new(phone_recognizer()),
        Arc::new(credit_card_recognizer()),
        Arc::new(ssn_recognizer()),
        Arc::new(ipv4_recognizer()),
        Arc::new(ipv6_recognizer()),
        Arc::new(url_recognizer()),
        Arc::new(iban_recognizer()),
        Arc::new(date_recognizer()),
        Arc::new(crypto_recognizer()),
        Arc::new(mac_recognizer()),
        Arc::new(person_recognizer()),
    ]
}
