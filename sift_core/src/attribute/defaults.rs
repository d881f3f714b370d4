use super::{Attribute, AttributeType};

/// Instantiates the built-in attributes every person profile has.
///
/// The People API does not list these; they are confirmed reachable by
/// fetching a sample person and then taken from this fixed set.
pub fn standard_attributes() -> Vec<Attribute> {
    vec![
        // Identity
        Attribute::new("externalId", AttributeType::String),
        Attribute::new("firstName", AttributeType::String),
        Attribute::new("lastName", AttributeType::String),
        Attribute::new("middleName", AttributeType::String),
        Attribute::enumeration("gender", &["MALE", "FEMALE"]),
        Attribute::new("birthDate", AttributeType::Date),
        Attribute::enumeration("type", &["LEAD", "CUSTOMER", "UNKNOWN"]),
        Attribute::new("profilePicture", AttributeType::String),
        Attribute::new("preferredLanguage", AttributeType::String),
        // Location
        Attribute::new("address", AttributeType::String),
        Attribute::new("city", AttributeType::String),
        Attribute::new("country", AttributeType::String),
        // Contact information
        Attribute::new("contactInformation.email.address", AttributeType::String),
        Attribute::new("contactInformation.phone.number", AttributeType::String),
        // Segmentation
        Attribute::new("tags", AttributeType::Array),
        Attribute::new("origin", AttributeType::String),
        // Timestamps
        Attribute::new("createdAt", AttributeType::DateTime),
        Attribute::new("modifiedAt", AttributeType::DateTime),
    ]
}
