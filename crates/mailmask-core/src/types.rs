//! Entity and category types shared across Mailmask

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of personally identifiable information a span holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Date of birth (or any calendar date)
    Dob,

    /// Person name
    FullName,

    /// Email address
    Email,

    /// Phone number
    PhoneNumber,

    /// 12 digit Aadhaar number
    AadharNum,

    /// 16 digit payment card number
    CreditDebitNo,

    /// Card security code
    CvvNo,

    /// Card expiry (MM/YY)
    ExpiryNo,
}

impl Classification {
    /// Every classification, in cascade order
    pub fn all() -> [Classification; 8] {
        [
            Classification::Dob,
            Classification::FullName,
            Classification::Email,
            Classification::PhoneNumber,
            Classification::AadharNum,
            Classification::CreditDebitNo,
            Classification::CvvNo,
            Classification::ExpiryNo,
        ]
    }

    /// The snake_case name used on the wire and inside placeholders
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Dob => "dob",
            Classification::FullName => "full_name",
            Classification::Email => "email",
            Classification::PhoneNumber => "phone_number",
            Classification::AadharNum => "aadhar_num",
            Classification::CreditDebitNo => "credit_debit_no",
            Classification::CvvNo => "cvv_no",
            Classification::ExpiryNo => "expiry_no",
        }
    }

    /// The literal token written into masked text, e.g. `[email]`
    pub fn placeholder(&self) -> String {
        format!("[{}]", self.as_str())
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Classification {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Classification::all()
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::UnknownClassification(s.to_string()))
    }
}

/// A finalized masked entity
///
/// `position` is a half-open `[start, end)` pair of character offsets into
/// the masked buffer as it stood when the entity was detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub position: [usize; 2],
    pub classification: Classification,
    pub entity: String,
}

impl EntitySpan {
    pub fn new(start: usize, end: usize, classification: Classification, entity: impl Into<String>) -> Self {
        Self {
            position: [start, end],
            classification,
            entity: entity.into(),
        }
    }

    pub fn start(&self) -> usize {
        self.position[0]
    }

    pub fn end(&self) -> usize {
        self.position[1]
    }

    /// Whether the two half-open ranges share at least one offset
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        start < self.end() && self.start() < end
    }
}

/// Support ticket category predicted for an email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Change,
    Incident,
    Problem,
    Request,
}

impl Category {
    /// Map a model output index to its category
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Category::Change),
            1 => Some(Category::Incident),
            2 => Some(Category::Problem),
            3 => Some(Category::Request),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Change => "Change",
            Category::Incident => "Incident",
            Category::Problem => "Problem",
            Category::Request => "Request",
        };
        f.pad(name)
    }
}

#[cfg(test)]
mod tests;
