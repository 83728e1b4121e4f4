//! Human-facing document numbers ("INV-0042", "QT-0007", "PUR-0013").
//!
//! Numbers are assigned from a per-kind sequence: the next number is simply
//! count-so-far + 1, zero-padded to four digits (wider once the sequence
//! outgrows them).

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use billkit_core::DomainError;

/// Document kind, determines the number prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Invoice,
    Quotation,
    Purchase,
}

impl DocumentKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "INV",
            DocumentKind::Quotation => "QT",
            DocumentKind::Purchase => "PUR",
        }
    }
}

/// A formatted document number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct DocumentNumber {
    kind: DocumentKind,
    sequence: u32,
}

impl DocumentNumber {
    pub fn new(kind: DocumentKind, sequence: u32) -> Self {
        Self { kind, sequence }
    }

    /// Number for the next document, given how many already exist.
    pub fn next(kind: DocumentKind, existing_count: u32) -> Self {
        Self::new(kind, existing_count + 1)
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }
}

impl core::fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}-{:04}", self.kind.prefix(), self.sequence)
    }
}

impl From<DocumentNumber> for String {
    fn from(value: DocumentNumber) -> Self {
        value.to_string()
    }
}

impl FromStr for DocumentNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, digits) = s
            .split_once('-')
            .ok_or_else(|| DomainError::invalid_id(format!("DocumentNumber: {s}")))?;

        let kind = match prefix {
            "INV" => DocumentKind::Invoice,
            "QT" => DocumentKind::Quotation,
            "PUR" => DocumentKind::Purchase,
            _ => return Err(DomainError::invalid_id(format!("DocumentNumber: {s}"))),
        };

        let sequence = digits
            .parse::<u32>()
            .map_err(|e| DomainError::invalid_id(format!("DocumentNumber: {e}")))?;

        Ok(Self { kind, sequence })
    }
}

impl TryFrom<String> for DocumentNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_prefix_and_padding() {
        assert_eq!(
            DocumentNumber::new(DocumentKind::Invoice, 1).to_string(),
            "INV-0001"
        );
        assert_eq!(
            DocumentNumber::new(DocumentKind::Quotation, 42).to_string(),
            "QT-0042"
        );
        assert_eq!(
            DocumentNumber::new(DocumentKind::Purchase, 12345).to_string(),
            "PUR-12345"
        );
    }

    #[test]
    fn next_is_count_plus_one() {
        let n = DocumentNumber::next(DocumentKind::Invoice, 7);
        assert_eq!(n.sequence(), 8);
        assert_eq!(n.to_string(), "INV-0008");
    }

    #[test]
    fn round_trips_through_string() {
        let n = DocumentNumber::new(DocumentKind::Quotation, 9);
        let parsed: DocumentNumber = n.to_string().parse().unwrap();
        assert_eq!(parsed, n);
    }

    #[test]
    fn rejects_unknown_prefix_and_garbage() {
        assert!("ZZZ-0001".parse::<DocumentNumber>().is_err());
        assert!("INV0001".parse::<DocumentNumber>().is_err());
        assert!("INV-abcd".parse::<DocumentNumber>().is_err());
    }
}
