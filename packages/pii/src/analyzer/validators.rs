//! Structural checks that turn regex candidates into confident findings.

use std::net::{Ipv4Addr, Ipv6Addr};

use sha2::{Digest, Sha256};

/// Luhn checksum for payment card numbers
pub fn is_valid_luhn(candidate: &str) -> bool {
    let digits: Vec<u32> = candidate.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() < 13 || digits.len() > 19 {
        return false;
    }

    let checksum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(idx, &digit)| {
            if idx % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                digit
            }
        })
        .sum();

    checksum % 10 == 0
}

/// US social security number structure: consistent delimiters, no zero
/// groups, no 666/9xx area, and not a well-known published sample.
pub fn is_valid_ssn(candidate: &str) -> bool {
    let delimiters: Vec<char> = candidate.chars().filter(|c| !c.is_ascii_digit()).collect();
    if delimiters.windows(2).any(|w| w[0] != w[1]) {
        return false;
    }

    let digits: String = candidate.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 9 {
        return false;
    }
    if digits.chars().all(|c| Some(c) == digits.chars().next()) {
        return false;
    }

    let (area, rest) = digits.split_at(3);
    let (group, serial) = rest.split_at(2);

    if area == "000" || area == "666" || area.starts_with('9') {
        return false;
    }
    if group == "00" || serial == "0000" {
        return false;
    }

    !matches!(digits.as_str(), "078051120" | "219099999")
}

/// IPv4 address that does not look like a version number such as `1.0.0.0`
pub fn is_valid_ipv4(candidate: &str) -> bool {
    if candidate.parse::<Ipv4Addr>().is_err() {
        return false;
    }

    let parts: Vec<&str> = candidate.split('.').collect();
    let zero_count = parts.iter().filter(|&&p| p == "0").count();
    parts[0] != "0" && zero_count < 3
}

/// IPv6 address with at least a little substance (rejects a bare `::`)
pub fn is_valid_ipv6(candidate: &str) -> bool {
    candidate.parse::<Ipv6Addr>().is_ok()
        && candidate.chars().filter(|c| c.is_ascii_hexdigit()).count() >= 2
}

/// IBAN mod-97 check over the rearranged, letter-expanded account number
pub fn is_valid_iban(candidate: &str) -> bool {
    let compact: String = candidate.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.len() < 15 || compact.len() > 34 || !compact.is_ascii() {
        return false;
    }

    let (head, tail) = compact.split_at(4);
    let mut remainder: u32 = 0;
    for c in tail.chars().chain(head.chars()) {
        let value = match c.to_digit(36) {
            Some(v) => v,
            None => return false,
        };
        remainder = if value < 10 {
            (remainder * 10 + value) % 97
        } else {
            (remainder * 100 + value) % 97
        };
    }

    remainder == 1
}

/// MAC address written with one consistent separator
pub fn is_valid_mac(candidate: &str) -> bool {
    let separators: Vec<char> = candidate.chars().filter(|c| !c.is_ascii_hexdigit()).collect();
    separators.len() == 5 && separators.windows(2).all(|w| w[0] == w[1])
}

const BASE58_ALPHABET: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
const BECH32_CHARSET: &[u8] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";
const BECH32_CONST: u32 = 1;
const BECH32M_CONST: u32 = 0x2bc8_30a3;

/// Bitcoin address: base58check for legacy/P2SH, bech32/bech32m for segwit
pub fn is_valid_bitcoin_address(candidate: &str) -> bool {
    if candidate.to_ascii_lowercase().starts_with("bc1") {
        is_valid_bech32(candidate)
    } else {
        is_valid_base58check(candidate)
    }
}

fn is_valid_base58check(candidate: &str) -> bool {
    let mut bytes = [0u8; 25];

    for c in candidate.bytes() {
        let Some(digit) = BASE58_ALPHABET.iter().position(|&a| a == c) else {
            return false;
        };
        let mut carry = digit as u32;
        for byte in bytes.iter_mut().rev() {
            carry += u32::from(*byte) * 58;
            *byte = (carry & 0xff) as u8;
            carry >>= 8;
        }
        if carry != 0 {
            return false;
        }
    }

    let (payload, checksum) = bytes.split_at(21);
    let digest = Sha256::digest(Sha256::digest(payload));
    digest[..4] == *checksum
}

fn is_valid_bech32(candidate: &str) -> bool {
    let lower = candidate.to_ascii_lowercase();
    if lower != candidate && candidate.to_ascii_uppercase() != candidate {
        return false;
    }

    let Some(separator) = lower.rfind('1') else {
        return false;
    };
    let (hrp, data) = lower.split_at(separator);
    let data = &data[1..];
    if hrp.is_empty() || data.len() < 6 {
        return false;
    }

    let mut values: Vec<u32> = hrp.bytes().map(|b| u32::from(b >> 5)).collect();
    values.push(0);
    values.extend(hrp.bytes().map(|b| u32::from(b & 31)));
    for c in data.bytes() {
        match BECH32_CHARSET.iter().position(|&a| a == c) {
            Some(v) => values.push(v as u32),
            None => return false,
        }
    }

    matches!(bech32_polymod(&values), BECH32_CONST | BECH32M_CONST)
}

fn bech32_polymod(values: &[u32]) -> u32 {
    const GENERATORS: [u32; 5] = [0x3b6a_57b2, 0x2650_8e6d, 0x1ea1_19fa, 0x3d42_33dd, 0x2a14_62b3];

    let mut chk: u32 = 1;
    for &value in values {
        let top = chk >> 25;
        chk = ((chk & 0x01ff_ffff) << 5) ^ value;
        for (i, generator) in GENERATORS.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                chk ^= generator;
            }
        }
    }
    chk
}
